use serde::Serialize;

/// Linear RGB color for mesh materials.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Color {
    pub const WHITE: Self = Self { r: 1.0, g: 1.0, b: 1.0 };

    /// Build from a packed `0xRRGGBB` value.
    pub fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self { r: 0.6, g: 0.6, b: 0.8 }
    }
}

/// Geometry primitive the renderer should build for a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Shape {
    /// Lit sphere.
    Sphere { radius: f32 },
    /// Additive back-face halo around a sphere.
    Halo { radius: f32 },
    /// Flat annulus in the node's local XY plane.
    Ring { inner: f32, outer: f32 },
    /// A run of `count` points starting at `first` in the static point buffer.
    Points { first: u32, count: u32, size: f32 },
}

/// Renderable mesh description attached to a node.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MeshComponent {
    pub shape: Shape,
    pub color: Color,
    /// Self-illumination strength (0.0 = lit only by scene lights).
    pub emissive: f32,
    /// 1.0 = opaque.
    pub opacity: f32,
    pub cast_shadow: bool,
}

impl Default for MeshComponent {
    fn default() -> Self {
        Self {
            shape: Shape::Sphere { radius: 1.0 },
            color: Color::default(),
            emissive: 0.0,
            opacity: 1.0,
            cast_shadow: false,
        }
    }
}

impl MeshComponent {
    pub fn new(shape: Shape, color: Color) -> Self {
        Self {
            shape,
            color,
            ..Default::default()
        }
    }

    pub fn sphere(radius: f32, color: Color) -> Self {
        Self::new(Shape::Sphere { radius }, color)
    }

    pub fn ring(inner: f32, outer: f32, color: Color) -> Self {
        Self::new(Shape::Ring { inner, outer }, color)
    }

    pub fn with_emissive(mut self, emissive: f32) -> Self {
        self.emissive = emissive;
        self
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity;
        self
    }

    pub fn with_shadows(mut self) -> Self {
        self.cast_shadow = true;
        self
    }
}
