//! Scene light rig.
//!
//! Lights are set up once at init and described to the renderer through the
//! scene manifest; they do not move per frame.

use glam::Vec3;
use serde::Serialize;
use crate::components::mesh::Color;

/// A point light with position, color, intensity and falloff distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointLight {
    pub position: [f32; 3],
    pub color: Color,
    pub intensity: f32,
    /// Falloff distance in world units (0 = infinite).
    pub distance: f32,
    pub cast_shadow: bool,
    /// Square shadow-map resolution when `cast_shadow` is set.
    pub shadow_map_size: u32,
}

impl PointLight {
    /// Create a new point light at the given position.
    ///
    /// - `pos`: World-space position
    /// - `color`: RGB color
    /// - `intensity`: Light strength multiplier
    /// - `distance`: Falloff distance in world units
    pub fn new(pos: Vec3, color: Color, intensity: f32, distance: f32) -> Self {
        Self {
            position: pos.to_array(),
            color,
            intensity,
            distance,
            cast_shadow: false,
            shadow_map_size: 0,
        }
    }

    /// Enable shadow casting with a square shadow map.
    pub fn with_shadows(mut self, map_size: u32) -> Self {
        self.cast_shadow = true;
        self.shadow_map_size = map_size;
        self
    }
}

/// Uniform ambient light.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AmbientLight {
    pub color: Color,
    pub intensity: f32,
}

impl Default for AmbientLight {
    fn default() -> Self {
        Self {
            color: Color::WHITE,
            intensity: 1.0,
        }
    }
}

/// Manages the scene's lights.
#[derive(Debug, Clone, Default, Serialize)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub points: Vec<PointLight>,
}

impl LightRig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_ambient(&mut self, color: Color, intensity: f32) {
        self.ambient = AmbientLight { color, intensity };
    }

    /// Add a point light to the scene.
    pub fn add(&mut self, light: PointLight) {
        self.points.push(light);
    }

    pub fn count(&self) -> usize {
        self.points.len()
    }
}
