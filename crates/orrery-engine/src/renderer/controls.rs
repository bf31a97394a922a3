use std::f32::consts::{PI, TAU};
use glam::{Vec2, Vec3};
use crate::api::game::Viewport;
use crate::input::queue::{InputEvent, PointerButton};
use crate::renderer::camera::PerspectiveCamera;

/// Keeps the polar angle off the poles so the view never flips.
const POLAR_EPS: f32 = 1e-6;

/// Orbit-controls tuning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlSettings {
    pub enable_damping: bool,
    /// Fraction of the pending motion applied per update (0..1].
    pub damping_factor: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    /// When false, panning slides the target across the XZ plane.
    pub screen_space_panning: bool,
}

impl Default for ControlSettings {
    fn default() -> Self {
        Self {
            enable_damping: true,
            damping_factor: 0.05,
            min_distance: 10.0,
            max_distance: 200.0,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            pan_speed: 1.0,
            screen_space_panning: false,
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Drag {
    button: PointerButton,
    last: Vec2,
}

/// Damped orbit camera controller.
///
/// Pointer drags and wheel ticks accumulate pending motion; `update` eases
/// the camera toward it a fraction at a time, so the view keeps gliding
/// briefly after the pointer stops.
#[derive(Debug, Clone)]
pub struct OrbitControls {
    settings: ControlSettings,
    target: Vec3,
    /// Pending (theta, phi) rotation.
    spherical_delta: Vec2,
    /// Pending dolly multiplier.
    scale: f32,
    /// Pending target translation.
    pan_offset: Vec3,
    drag: Option<Drag>,
    position0: Vec3,
    target0: Vec3,
}

impl OrbitControls {
    /// Attach to a camera, saving its current placement as the reset state.
    pub fn new(settings: ControlSettings, camera: &PerspectiveCamera) -> Self {
        Self {
            settings,
            target: camera.target,
            spherical_delta: Vec2::ZERO,
            scale: 1.0,
            pan_offset: Vec3::ZERO,
            drag: None,
            position0: camera.position,
            target0: camera.target,
        }
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn settings(&self) -> &ControlSettings {
        &self.settings
    }

    /// Whether any damped motion is still pending.
    pub fn is_settled(&self) -> bool {
        self.spherical_delta.length_squared() < 1e-12
            && self.pan_offset.length_squared() < 1e-12
            && (self.scale - 1.0).abs() < 1e-6
    }

    /// Feed one input event. Returns true if it was a camera gesture.
    pub fn handle(
        &mut self,
        event: &InputEvent,
        camera: &PerspectiveCamera,
        viewport: Viewport,
    ) -> bool {
        match *event {
            InputEvent::PointerDown { x, y, button } => {
                self.drag = Some(Drag { button, last: Vec2::new(x, y) });
                true
            }
            InputEvent::PointerMove { x, y } => {
                let Some(drag) = self.drag.as_mut() else {
                    return false;
                };
                let pos = Vec2::new(x, y);
                let delta = pos - drag.last;
                drag.last = pos;
                let button = drag.button;
                match button {
                    PointerButton::Primary => {
                        let k = TAU * self.settings.rotate_speed / viewport.height;
                        self.rotate_left(delta.x * k);
                        self.rotate_up(delta.y * k);
                    }
                    PointerButton::Secondary => self.pan(delta, camera, viewport),
                }
                true
            }
            InputEvent::PointerUp { .. } => self.drag.take().is_some(),
            InputEvent::Wheel { delta } => {
                let zoom = 0.95_f32.powf(self.settings.zoom_speed);
                if delta < 0.0 {
                    self.scale *= zoom;
                } else if delta > 0.0 {
                    self.scale /= zoom;
                }
                true
            }
            _ => false,
        }
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.x -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.y -= angle;
    }

    fn pan(&mut self, delta: Vec2, camera: &PerspectiveCamera, viewport: Viewport) {
        let offset = camera.position - self.target;
        // Half the visible height at the target's depth.
        let target_distance = offset.length() * (camera.fov_deg.to_radians() / 2.0).tan();
        let per_px = 2.0 * target_distance * self.settings.pan_speed / viewport.height;

        let forward = (camera.target - camera.position).normalize_or_zero();
        let right = forward.cross(camera.up).normalize_or_zero();
        let up = if self.settings.screen_space_panning {
            right.cross(forward)
        } else {
            camera.up.cross(right)
        };
        self.pan_offset += right * (-delta.x * per_px) + up * (delta.y * per_px);
    }

    /// Ease the camera toward the pending motion. Call once per frame.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) {
        let offset = camera.position - self.target;
        let mut radius = offset.length();
        let mut theta = offset.x.atan2(offset.z);
        let mut phi = if radius > 0.0 {
            (offset.y / radius).clamp(-1.0, 1.0).acos()
        } else {
            PI / 2.0
        };

        let damping = self.settings.enable_damping;
        let factor = if damping { self.settings.damping_factor } else { 1.0 };

        theta += self.spherical_delta.x * factor;
        phi += self.spherical_delta.y * factor;
        phi = phi.clamp(POLAR_EPS, PI - POLAR_EPS);

        let (min, max) = (self.settings.min_distance, self.settings.max_distance);
        radius = (radius * self.scale).clamp(min, max);
        self.target += self.pan_offset * factor;

        let sin_phi = phi.sin();
        let offset = Vec3::new(
            radius * sin_phi * theta.sin(),
            radius * phi.cos(),
            radius * sin_phi * theta.cos(),
        );
        camera.position = self.target + offset;
        camera.target = self.target;

        if damping {
            self.spherical_delta *= 1.0 - factor;
            self.pan_offset *= 1.0 - factor;
        } else {
            self.spherical_delta = Vec2::ZERO;
            self.pan_offset = Vec3::ZERO;
        }
        self.scale = 1.0;
    }

    /// Restore the saved camera placement and drop all pending motion.
    pub fn reset(&mut self, camera: &mut PerspectiveCamera) {
        self.target = self.target0;
        camera.position = self.position0;
        camera.target = self.target0;
        self.spherical_delta = Vec2::ZERO;
        self.pan_offset = Vec3::ZERO;
        self.scale = 1.0;
        self.drag = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::camera::CameraSettings;

    fn setup() -> (OrbitControls, PerspectiveCamera, Viewport) {
        let viewport = Viewport::new(800.0, 600.0);
        let camera = PerspectiveCamera::new(&CameraSettings::default(), viewport);
        let controls = OrbitControls::new(ControlSettings::default(), &camera);
        (controls, camera, viewport)
    }

    fn drag(controls: &mut OrbitControls, camera: &PerspectiveCamera, vp: Viewport, dx: f32) {
        let down = InputEvent::PointerDown { x: 100.0, y: 100.0, button: PointerButton::Primary };
        controls.handle(&down, camera, vp);
        controls.handle(&InputEvent::PointerMove { x: 100.0 + dx, y: 100.0 }, camera, vp);
        controls.handle(&InputEvent::PointerUp { x: 100.0 + dx, y: 100.0 }, camera, vp);
    }

    fn pan_start() -> InputEvent {
        InputEvent::PointerDown { x: 0.0, y: 0.0, button: PointerButton::Secondary }
    }

    #[test]
    fn update_without_input_keeps_camera() {
        let (mut controls, mut camera, _) = setup();
        let before = camera.position;
        controls.update(&mut camera);
        assert!((camera.position - before).length() < 1e-4);
    }

    #[test]
    fn drag_rotation_is_damped_over_frames() {
        let (mut controls, mut camera, vp) = setup();
        let start = camera.position;
        drag(&mut controls, &camera, vp, 60.0);

        controls.update(&mut camera);
        let first = (camera.position - start).length();
        assert!(first > 0.0);
        assert!(!controls.is_settled());

        for _ in 0..30 {
            controls.update(&mut camera);
        }
        // Still gliding, further along than after one frame.
        assert!((camera.position - start).length() > first);
        // Orbiting keeps the distance to the target.
        assert!((camera.position.length() - start.length()).abs() < 1e-3);
    }

    #[test]
    fn pointer_move_without_drag_is_not_a_gesture() {
        let (mut controls, camera, vp) = setup();
        assert!(!controls.handle(&InputEvent::PointerMove { x: 5.0, y: 5.0 }, &camera, vp));
        assert!(controls.is_settled());
    }

    #[test]
    fn wheel_distance_is_clamped() {
        let (mut controls, mut camera, vp) = setup();
        for _ in 0..200 {
            controls.handle(&InputEvent::Wheel { delta: -1.0 }, &camera, vp);
            controls.update(&mut camera);
        }
        let d = camera.position.distance(controls.target());
        assert!(d >= 10.0 - 1e-3, "too close: {d}");

        for _ in 0..400 {
            controls.handle(&InputEvent::Wheel { delta: 1.0 }, &camera, vp);
            controls.update(&mut camera);
        }
        let d = camera.position.distance(controls.target());
        assert!(d <= 200.0 + 1e-3, "too far: {d}");
    }

    #[test]
    fn reset_restores_position_and_zeroes_velocity() {
        let (mut controls, mut camera, vp) = setup();
        drag(&mut controls, &camera, vp, 200.0);
        controls.handle(&pan_start(), &camera, vp);
        controls.handle(&InputEvent::PointerMove { x: 50.0, y: 20.0 }, &camera, vp);
        for _ in 0..5 {
            controls.update(&mut camera);
        }

        controls.reset(&mut camera);
        assert_eq!(camera.position, Vec3::new(0.0, 20.0, 40.0));
        assert_eq!(camera.target, Vec3::ZERO);
        assert!(controls.is_settled());

        // No residual glide after reset.
        controls.update(&mut camera);
        assert!((camera.position - Vec3::new(0.0, 20.0, 40.0)).length() < 1e-3);
    }

    #[test]
    fn pan_moves_target_in_ground_plane() {
        let (mut controls, mut camera, vp) = setup();
        controls.handle(&pan_start(), &camera, vp);
        controls.handle(&InputEvent::PointerMove { x: 0.0, y: 40.0 }, &camera, vp);
        for _ in 0..100 {
            controls.update(&mut camera);
        }
        assert!(controls.target().length() > 0.1);
        assert!(controls.target().y.abs() < 1e-4);
    }
}
