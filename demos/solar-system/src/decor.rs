//! Decorative scenery: starfield, asteroid belt, orbit guides.
//! None of it is pickable or part of the orbital state.

use glam::Vec3;
use orrery_engine::{Color, MeshComponent, Rng};

// ── Starfield ────────────────────────────────────────────────────────

pub const STAR_COUNT: usize = 1000;
/// Stars fill the cube [-STAR_EXTENT, STAR_EXTENT]³.
pub const STAR_EXTENT: f64 = 200.0;
pub const STAR_SIZE: f32 = 0.5;

// ── Asteroid belt (between Mars and Jupiter) ─────────────────────────

pub const BELT_COUNT: usize = 500;
pub const BELT_RADIUS: f64 = 25.0;
/// Radial scatter either side of `BELT_RADIUS`.
pub const BELT_SPREAD: f64 = 4.0;
pub const BELT_HALF_HEIGHT: f64 = 1.0;
pub const BELT_COLOR: u32 = 0x8B7355;
pub const BELT_SIZE: f32 = 0.3;
pub const BELT_OPACITY: f32 = 0.8;

// ── Orbit guides ─────────────────────────────────────────────────────

pub const GUIDE_HALF_WIDTH: f32 = 0.1;
pub const GUIDE_COLOR: u32 = 0x333333;
pub const GUIDE_OPACITY: f32 = 0.3;

pub fn starfield(rng: &mut Rng) -> Vec<Vec3> {
    (0..STAR_COUNT)
        .map(|_| {
            Vec3::new(
                rng.range(-STAR_EXTENT, STAR_EXTENT) as f32,
                rng.range(-STAR_EXTENT, STAR_EXTENT) as f32,
                rng.range(-STAR_EXTENT, STAR_EXTENT) as f32,
            )
        })
        .collect()
}

pub fn asteroid_belt(rng: &mut Rng) -> Vec<Vec3> {
    (0..BELT_COUNT)
        .map(|_| {
            let angle = rng.angle();
            let r = BELT_RADIUS + rng.range(-BELT_SPREAD, BELT_SPREAD);
            let y = rng.range(-BELT_HALF_HEIGHT, BELT_HALF_HEIGHT);
            Vec3::new((angle.cos() * r) as f32, y as f32, (angle.sin() * r) as f32)
        })
        .collect()
}

/// Thin flat ring tracing an orbit of radius `distance`.
pub fn orbit_guide(distance: f32) -> MeshComponent {
    MeshComponent::ring(
        distance - GUIDE_HALF_WIDTH,
        distance + GUIDE_HALF_WIDTH,
        Color::from_hex(GUIDE_COLOR),
    )
    .with_opacity(GUIDE_OPACITY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_engine::Shape;

    #[test]
    fn stars_fill_the_cube() {
        let stars = starfield(&mut Rng::new(1));
        assert_eq!(stars.len(), STAR_COUNT);
        let e = STAR_EXTENT as f32;
        assert!(stars.iter().all(|s| s.abs().max_element() <= e));
    }

    #[test]
    fn belt_stays_in_its_band() {
        let belt = asteroid_belt(&mut Rng::new(2));
        assert_eq!(belt.len(), BELT_COUNT);
        for p in &belt {
            let r = (p.x * p.x + p.z * p.z).sqrt();
            assert!((21.0 - 1e-3..=29.0 + 1e-3).contains(&r), "r = {r}");
            assert!(p.y.abs() <= 1.0);
        }
    }

    #[test]
    fn guide_brackets_the_orbit() {
        let guide = orbit_guide(15.0);
        let Shape::Ring { inner, outer } = guide.shape else {
            panic!("expected a ring, got {:?}", guide.shape);
        };
        assert!((inner - 14.9).abs() < 1e-5);
        assert!((outer - 15.1).abs() < 1e-5);
        assert_eq!(guide.opacity, GUIDE_OPACITY);
    }
}
