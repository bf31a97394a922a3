//! Orbit integrator: circular orbits, pure math plus one mutating step.
//!
//! Angles are f64 so long sessions do not drift; positions drop to f32 only
//! when they are written out.

use std::f64::consts::TAU;
use glam::Vec3;

use crate::registry::BodyRegistry;

/// Scales stylized km/s into radians per second.
pub const K_ORBIT: f64 = 0.1;
/// Orbital plane height.
pub const ORBIT_HEIGHT: f32 = 0.0;
/// Asteroid belt drift, radians per second before the global multiplier.
pub const BELT_RATE: f64 = 0.1;

/// Session-wide animation state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GlobalAnimationState {
    pub is_animating: bool,
    /// Always >= 0.
    pub global_speed_multiplier: f64,
    /// Delta handed to the most recent step, paused or not.
    pub elapsed_since_last_frame: f64,
}

impl Default for GlobalAnimationState {
    fn default() -> Self {
        Self {
            is_animating: true,
            global_speed_multiplier: 1.0,
            elapsed_since_last_frame: 0.0,
        }
    }
}

impl GlobalAnimationState {
    /// Flip play/pause. Returns the new state.
    pub fn toggle_animating(&mut self) -> bool {
        self.is_animating = !self.is_animating;
        self.is_animating
    }

    /// Set the global multiplier outright; negatives clamp to 0.
    pub fn set_global_speed(&mut self, value: f64) -> f64 {
        self.global_speed_multiplier = value.max(0.0);
        self.global_speed_multiplier
    }
}

/// Wrap an angle into [0, TAU).
pub fn wrap_angle(angle: f64) -> f64 {
    let wrapped = angle.rem_euclid(TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs.
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Point on a circle of `radius` in the XZ plane at height `y`.
pub fn orbit_position(radius: f32, angle: f64, y: f32) -> Vec3 {
    let r = radius as f64;
    Vec3::new((r * angle.cos()) as f32, y, (r * angle.sin()) as f32)
}

/// Advance every body, satellite, ring layer and the belt by `dt` seconds.
///
/// `dt` must be finite and non-negative; the frame loop guarantees it.
/// A paused state makes this a no-op apart from recording `dt`.
pub fn step(
    registry: &mut BodyRegistry,
    belt_angle: &mut f64,
    dt: f64,
    state: &mut GlobalAnimationState,
) {
    state.elapsed_since_last_frame = dt;
    if !state.is_animating {
        return;
    }
    let global = state.global_speed_multiplier;

    for body in registry.all_mut() {
        if body.is_orbiting() {
            body.current_angle = wrap_angle(
                body.current_angle
                    + dt * body.base_angular_speed * body.speed_multiplier * global * K_ORBIT,
            );
            body.position = body.orbit_position();
        }

        // Spin ignores every multiplier.
        body.spin_angle = wrap_angle(body.spin_angle + body.spin_rate * dt);

        // Parent position is final for this frame from here on.
        let parent = body.position;
        for moon in &mut body.satellites {
            moon.current_angle =
                wrap_angle(moon.current_angle + dt * moon.base_angular_speed * global);
            moon.position = parent + orbit_position(moon.orbit_radius, moon.current_angle, 0.0);
            moon.spin_angle = wrap_angle(moon.spin_angle + moon.spin_rate * dt);
        }

        for ring in &mut body.rings {
            ring.angle = wrap_angle(ring.angle + dt * ring.rotation_speed * global);
        }
    }

    *belt_angle = wrap_angle(*belt_angle + dt * BELT_RATE * global);
}
