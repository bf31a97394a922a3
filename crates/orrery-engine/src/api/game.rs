use glam::Vec3;
use crate::api::types::{NodeId, UiUpdate};
use crate::components::mesh::Color;
use crate::core::rng::Rng;
use crate::core::scene::SceneGraph;
use crate::input::queue::InputQueue;
use crate::renderer::camera::{CameraSettings, PerspectiveCamera};
use crate::renderer::controls::{ControlSettings, OrbitControls};
use crate::systems::lighting::LightRig;

/// Drawing surface size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Zero or negative sizes (a collapsed canvas) are raised to 1px so
    /// aspect and NDC math stay finite.
    pub fn new(width: f32, height: f32) -> Self {
        let sane = |v: f32| if v.is_finite() && v >= 1.0 { v } else { 1.0 };
        Self {
            width: sane(width),
            height: sane(height),
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Configuration for the engine, provided by the simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// Maximum number of scene nodes (default: 64).
    pub max_nodes: usize,
    /// Maximum number of static points (default: 2048).
    pub max_points: usize,
    /// Largest delta handed to a single update, in seconds (default: 0.25).
    pub max_frame_dt: f32,
    /// Initial viewport size.
    pub viewport: Viewport,
    pub camera: CameraSettings,
    pub controls: ControlSettings,
    /// Scene clear colour.
    pub background: Color,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            max_nodes: 64,
            max_points: 2048,
            max_frame_dt: 0.25,
            viewport: Viewport::default(),
            camera: CameraSettings::default(),
            controls: ControlSettings::default(),
            background: Color::from_hex(0x000011),
        }
    }
}

/// The core contract every simulation must fulfill.
pub trait Simulation {
    /// Diagnostic for a rejected initialisation.
    type Error: std::fmt::Display;

    /// Return engine configuration. Called once before init.
    fn config(&self) -> SimConfig {
        SimConfig::default()
    }

    /// Build the initial state and spawn scene nodes.
    /// An error aborts startup; nothing from a failed init is kept.
    fn init(&mut self, ctx: &mut EngineContext, rng: &mut Rng) -> Result<(), Self::Error>;

    /// One frame. `dt` is already sanitized: finite, non-negative and capped.
    /// Camera gestures in `input` have already been applied to the controls.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32);
}

/// Mutable access to engine state, passed to Simulation::init and Simulation::update.
pub struct EngineContext {
    pub scene: SceneGraph,
    /// Static point cloud (stars, belt particles), uploaded once.
    pub points: Vec<Vec3>,
    pub camera: PerspectiveCamera,
    pub controls: OrbitControls,
    pub viewport: Viewport,
    pub lights: LightRig,
    pub background: Color,
    ui: Vec<UiUpdate>,
    next_id: u32,
}

impl EngineContext {
    pub fn new(config: &SimConfig) -> Self {
        let camera = PerspectiveCamera::new(&config.camera, config.viewport);
        let controls = OrbitControls::new(config.controls, &camera);
        Self {
            scene: SceneGraph::with_capacity(config.max_nodes),
            points: Vec::new(),
            camera,
            controls,
            viewport: config.viewport,
            lights: LightRig::new(),
            background: config.background,
            ui: Vec::new(),
            next_id: 0,
        }
    }

    /// Generate the next node ID. IDs are dense from 0 and double as
    /// frame-buffer slots.
    pub fn next_id(&mut self) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Queue a DOM update for the host page.
    pub fn push_ui(&mut self, update: UiUpdate) {
        self.ui.push(update);
    }

    /// DOM updates queued since the last `clear_frame_data`.
    pub fn ui_updates(&self) -> &[UiUpdate] {
        &self.ui
    }

    /// Apply a viewport resize to the context and camera.
    pub fn resize(&mut self, viewport: Viewport) {
        self.viewport = viewport;
        self.camera.resize(viewport);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.ui.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new(&SimConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_dense_from_zero() {
        let mut ctx = EngineContext::default();
        assert_eq!(ctx.next_id(), NodeId(0));
        assert_eq!(ctx.next_id(), NodeId(1));
    }

    #[test]
    fn ui_updates_clear_per_frame() {
        let mut ctx = EngineContext::default();
        ctx.push_ui(UiUpdate::HideTooltip);
        assert_eq!(ctx.ui_updates().len(), 1);
        ctx.clear_frame_data();
        assert!(ctx.ui_updates().is_empty());
    }

    #[test]
    fn degenerate_viewport_is_raised() {
        let vp = Viewport::new(0.0, f32::NAN);
        assert_eq!(vp, Viewport::new(1.0, 1.0));
        assert_eq!(vp.aspect(), 1.0);
    }

    #[test]
    fn resize_reaches_camera() {
        let mut ctx = EngineContext::default();
        ctx.resize(Viewport::new(1200.0, 600.0));
        assert_eq!(ctx.camera.aspect, 2.0);
        assert_eq!(ctx.viewport.width, 1200.0);
    }
}
