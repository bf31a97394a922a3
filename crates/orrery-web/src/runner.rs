use orrery_engine::{
    Simulation, SimConfig, EngineContext,
    InputEvent, InputQueue, TransformBuffer,
    FrameClock, FrameLoop, FrameLayout, FrameBuffer,
    Rng, SceneManifest, Viewport,
};
use orrery_engine::systems::render::build_transform_buffer;

/// Generic simulation runner that wires up the engine loop.
///
/// Each concrete simulation creates a `thread_local!` SimRunner and exports
/// free functions via `#[wasm_bindgen]` (see `export_sim!`), because
/// wasm-bindgen cannot export generic structs directly.
pub struct SimRunner<S: Simulation> {
    sim: S,
    ctx: EngineContext,
    input: InputQueue,
    transforms: TransformBuffer,
    frame: FrameBuffer,
    frame_loop: FrameLoop,
    config: SimConfig,
    /// Flat xyz copy of the static points.
    points: Vec<f32>,
    manifest_json: String,
    initialized: bool,
}

impl<S: Simulation> SimRunner<S> {
    pub fn new(sim: S) -> Self {
        let config = sim.config();
        let layout = FrameLayout::from_config(&config);

        Self {
            ctx: EngineContext::new(&config),
            input: InputQueue::new(),
            transforms: TransformBuffer::with_capacity(config.max_nodes),
            frame: FrameBuffer::new(layout),
            frame_loop: FrameLoop::new(FrameClock::new(config.max_frame_dt)),
            points: Vec::new(),
            manifest_json: String::new(),
            initialized: false,
            config,
            sim,
        }
    }

    /// Initialize the simulation. Call once after construction.
    ///
    /// On error the runner stays uninitialized and every tick is a no-op.
    pub fn init(&mut self, seed: u64) -> Result<(), String> {
        self.initialized = false;
        self.input.drain();
        self.config = self.sim.config();
        self.ctx = EngineContext::new(&self.config);
        self.frame = FrameBuffer::new(FrameLayout::from_config(&self.config));
        self.frame_loop = FrameLoop::new(FrameClock::new(self.config.max_frame_dt));

        let mut rng = Rng::new(seed);
        if let Err(e) = self.sim.init(&mut self.ctx, &mut rng) {
            log::error!("simulation init failed: {e}");
            return Err(e.to_string());
        }

        if self.ctx.points.len() > self.config.max_points {
            log::warn!(
                "{} points exceed max_points {}, truncating",
                self.ctx.points.len(),
                self.config.max_points
            );
        }
        self.points = self
            .ctx
            .points
            .iter()
            .take(self.config.max_points)
            .flat_map(|p| p.to_array())
            .collect();

        self.manifest_json = SceneManifest::from_context(&self.ctx)
            .to_json()
            .map_err(|e| format!("scene manifest: {e}"))?;

        // Frame 0, so the host can draw before the first tick.
        self.rebuild_frame();
        self.initialized = true;
        log::info!(
            "simulation ready: {} nodes, {} points",
            self.ctx.scene.len(),
            self.point_count()
        );
        Ok(())
    }

    /// Push an input event into the queue. Dropped unless the loop is running.
    pub fn push_input(&mut self, event: InputEvent) {
        if self.is_running() {
            self.input.push(event);
        }
    }

    /// Events waiting for the next tick.
    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    /// Run one animation frame. Returns false once the loop is stopped (or
    /// was never started); the host must not schedule another frame then.
    pub fn tick(&mut self, now_ms: f64) -> bool {
        if !self.initialized {
            self.input.drain();
            return false;
        }
        let Some(dt) = self.frame_loop.advance(now_ms) else {
            self.input.drain();
            return false;
        };

        // Clear per-frame transient data
        self.ctx.clear_frame_data();

        // Camera gestures and resizes first, so the simulation sees the
        // current viewport.
        for event in self.input.iter() {
            match *event {
                InputEvent::Resize { width, height } => {
                    self.ctx.resize(Viewport::new(width, height));
                }
                _ => {
                    self.ctx.controls.handle(event, &self.ctx.camera, self.ctx.viewport);
                }
            }
        }

        self.sim.update(&mut self.ctx, &self.input, dt);

        // Drain input after update
        self.input.drain();

        // Damping keeps easing even while the simulation is paused.
        self.ctx.controls.update(&mut self.ctx.camera);

        self.rebuild_frame();
        true
    }

    fn rebuild_frame(&mut self) {
        build_transform_buffer(self.ctx.scene.iter(), &mut self.transforms, self.config.max_nodes);
        let camera = self.ctx.camera.block();
        let point_count = self.point_count() as usize;
        self.frame.write_frame(
            self.frame_loop.frame_count(),
            point_count,
            &camera,
            &self.transforms,
        );
    }

    /// Stop the frame loop and drop pending input. Idempotent.
    pub fn stop(&mut self) {
        self.frame_loop.stop();
        self.input.drain();
    }

    pub fn is_running(&self) -> bool {
        self.initialized && self.frame_loop.is_running()
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn sim(&self) -> &S {
        &self.sim
    }

    pub fn ctx(&self) -> &EngineContext {
        &self.ctx
    }

    // ---- Pointer accessors for shared-memory reads ----

    pub fn frame_ptr(&self) -> *const f32 {
        self.frame.as_ptr()
    }

    pub fn frame_len(&self) -> u32 {
        self.frame.len() as u32
    }

    pub fn frame(&self) -> &[f32] {
        self.frame.as_slice()
    }

    pub fn points_ptr(&self) -> *const f32 {
        self.points.as_ptr()
    }

    pub fn point_count(&self) -> u32 {
        (self.points.len() / 3) as u32
    }

    // ---- JSON accessors ----

    pub fn manifest_json(&self) -> &str {
        &self.manifest_json
    }

    /// DOM updates produced by the last init or tick.
    pub fn ui_updates_json(&self) -> String {
        serde_json::to_string(self.ctx.ui_updates()).unwrap_or_else(|e| {
            log::error!("ui update serialization failed: {e}");
            "[]".to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use orrery_engine::{Node, NodeId, UiUpdate};
    use orrery_engine::bridge::protocol::{HEADER_FRAME_COUNTER, HEADER_NODE_COUNT};

    #[derive(Default)]
    struct Spinner {
        node: Option<NodeId>,
        angle: f32,
        fail: bool,
        customs: u32,
    }

    impl Simulation for Spinner {
        type Error = String;

        fn config(&self) -> SimConfig {
            SimConfig {
                max_nodes: 4,
                max_points: 2,
                ..Default::default()
            }
        }

        fn init(&mut self, ctx: &mut EngineContext, _rng: &mut Rng) -> Result<(), String> {
            if self.fail {
                return Err("bad catalog".into());
            }
            let id = ctx.next_id();
            ctx.scene.spawn(Node::new(id).with_tag("spinner"));
            ctx.points = vec![Vec3::ONE, Vec3::X, Vec3::Y];
            ctx.push_ui(UiUpdate::text("play-pause", "Pause"));
            self.node = Some(id);
            Ok(())
        }

        fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue, dt: f32) {
            self.customs += input
                .iter()
                .filter(|e| matches!(e, InputEvent::Custom { .. }))
                .count() as u32;
            self.angle += dt;
            if let Some(node) = self.node.and_then(|id| ctx.scene.get_mut(id)) {
                node.pos = Vec3::new(self.angle, 0.0, 0.0);
            }
        }
    }

    #[test]
    fn tick_before_init_is_noop() {
        let mut runner = SimRunner::new(Spinner::default());
        assert!(!runner.tick(16.0));
        assert!(!runner.is_running());
    }

    #[test]
    fn failed_init_leaves_runner_idle() {
        let mut runner = SimRunner::new(Spinner { fail: true, ..Default::default() });
        let err = runner.init(1).unwrap_err();
        assert_eq!(err, "bad catalog");
        assert!(!runner.is_initialized());
        assert!(!runner.tick(16.0));
    }

    #[test]
    fn init_publishes_manifest_points_and_ui() {
        let mut runner = SimRunner::new(Spinner::default());
        runner.init(1).unwrap();
        assert!(runner.manifest_json().contains("spinner"));
        // Capped at max_points.
        assert_eq!(runner.point_count(), 2);
        assert!(runner.ui_updates_json().contains("play-pause"));
        assert_eq!(runner.frame()[HEADER_NODE_COUNT], 1.0);
    }

    #[test]
    fn tick_advances_by_wall_clock_delta() {
        let mut runner = SimRunner::new(Spinner::default());
        runner.init(1).unwrap();
        assert!(runner.tick(1000.0));
        assert!(runner.tick(1100.0));
        assert!((runner.sim().angle - 0.1).abs() < 1e-5);
        assert_eq!(runner.frame()[HEADER_FRAME_COUNTER], 2.0);
        // UI updates from init are gone after the first tick.
        assert_eq!(runner.ui_updates_json(), "[]");
    }

    #[test]
    fn nan_timestamp_does_not_poison_state() {
        let mut runner = SimRunner::new(Spinner::default());
        runner.init(1).unwrap();
        runner.tick(1000.0);
        runner.tick(f64::NAN);
        runner.tick(1050.0);
        assert!(runner.sim().angle.is_finite());
        assert!((runner.sim().angle - 0.05).abs() < 1e-5);
    }

    #[test]
    fn stop_is_idempotent_and_ends_ticks() {
        let mut runner = SimRunner::new(Spinner::default());
        runner.init(1).unwrap();
        assert!(runner.tick(0.0));
        runner.stop();
        runner.stop();
        assert!(!runner.is_running());
        assert!(!runner.tick(16.0));
    }

    #[test]
    fn stopped_runner_does_not_queue_input() {
        let mut runner = SimRunner::new(Spinner::default());
        runner.init(1).unwrap();
        runner.tick(0.0);
        runner.push_input(InputEvent::PointerMove { x: 1.0, y: 1.0 });
        runner.stop();
        assert_eq!(runner.pending_input(), 0);

        for i in 0..1000 {
            runner.push_input(InputEvent::PointerMove { x: i as f32, y: 0.0 });
            assert!(!runner.tick(16.0 * i as f64));
        }
        assert_eq!(runner.pending_input(), 0);
    }

    #[test]
    fn failed_init_does_not_queue_input() {
        let mut runner = SimRunner::new(Spinner { fail: true, ..Default::default() });
        assert!(runner.init(1).is_err());
        for _ in 0..500 {
            runner.push_input(InputEvent::Custom { kind: 2, a: 1.0, b: 0.0, c: 0.0 });
            runner.tick(0.0);
        }
        assert_eq!(runner.pending_input(), 0);
    }

    #[test]
    fn input_reaches_simulation_once() {
        let mut runner = SimRunner::new(Spinner::default());
        runner.init(1).unwrap();
        runner.push_input(InputEvent::Custom { kind: 3, a: 0.0, b: 0.0, c: 0.0 });
        runner.tick(0.0);
        runner.tick(16.0);
        assert_eq!(runner.sim().customs, 1);
    }

    #[test]
    fn resize_event_updates_camera_aspect() {
        let mut runner = SimRunner::new(Spinner::default());
        runner.init(1).unwrap();
        runner.push_input(InputEvent::Resize { width: 1000.0, height: 500.0 });
        runner.tick(0.0);
        assert_eq!(runner.ctx().camera.aspect, 2.0);
    }
}
