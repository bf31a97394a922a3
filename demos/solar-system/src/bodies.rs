//! Static body catalog.
//!
//! Loaded from embedded JSON. Distances and speeds are stylized display
//! values, not ephemerides; speeds are the familiar km/s figures and get
//! scaled into angle-per-second by the integrator.

use serde::Deserialize;

/// Embed the catalog at compile time.
pub const CATALOG_JSON: &str = include_str!("../data/catalog.json");

/// A label/value line shown in the info panel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Fact {
    pub label: String,
    pub value: String,
}

/// One sun or planet.
#[derive(Debug, Clone, Deserialize)]
pub struct BodyDescriptor {
    /// Unique key; also the display name unless `name` is given.
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    pub radius: f32,
    /// 0 for the sun.
    pub orbit_radius: f32,
    /// Stylized km/s.
    pub angular_speed: f64,
    /// Axial spin, radians per second.
    #[serde(default)]
    pub spin_rate: f64,
    /// `#RRGGBB`.
    pub color: String,
    #[serde(default)]
    pub emissive: f32,
    #[serde(default = "opaque")]
    pub opacity: f32,
    /// Additive glow shell radius, if any.
    #[serde(default)]
    pub halo_radius: Option<f32>,
    /// Pins the starting orbit angle (radians). Random when absent.
    #[serde(default)]
    pub initial_angle: Option<f64>,
    pub summary: String,
    #[serde(default)]
    pub facts: Vec<Fact>,
}

/// A moon, positioned relative to its parent body.
#[derive(Debug, Clone, Deserialize)]
pub struct SatelliteDescriptor {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Id of the owning body.
    pub parent: String,
    pub radius: f32,
    pub orbit_radius: f32,
    /// Radians per second; not scaled like planet speeds.
    pub angular_speed: f64,
    #[serde(default)]
    pub spin_rate: f64,
    pub color: String,
    #[serde(default)]
    pub initial_angle: Option<f64>,
}

/// One flat ring layer. Radii are multiples of the parent's radius.
#[derive(Debug, Clone, Deserialize)]
pub struct RingDescriptor {
    pub parent: String,
    pub inner: f32,
    pub outer: f32,
    /// Radians per second before the global multiplier; 0 = static.
    #[serde(default)]
    pub rotation_speed: f64,
    pub color: String,
    #[serde(default = "opaque")]
    pub opacity: f32,
}

/// Root structure for the JSON file.
#[derive(Debug, Clone, Deserialize)]
pub struct Catalog {
    pub bodies: Vec<BodyDescriptor>,
    #[serde(default)]
    pub satellites: Vec<SatelliteDescriptor>,
    #[serde(default)]
    pub rings: Vec<RingDescriptor>,
}

fn opaque() -> f32 {
    1.0
}

impl Catalog {
    /// Load the embedded catalog.
    pub fn load() -> Result<Self, serde_json::Error> {
        Self::from_json(CATALOG_JSON)
    }

    /// Parse a catalog from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

impl BodyDescriptor {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

impl SatelliteDescriptor {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }
}

/// Parse a `#RRGGBB` (or bare `RRGGBB`) colour.
pub fn parse_hex_color(hex: &str) -> Option<u32> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embedded_catalog_parses() {
        let catalog = Catalog::load().unwrap();
        assert_eq!(catalog.bodies.len(), 9);
        assert_eq!(catalog.bodies[0].id, "Sun");
        assert_eq!(catalog.bodies[0].orbit_radius, 0.0);
        assert_eq!(catalog.satellites.len(), 1);
        assert_eq!(catalog.satellites[0].parent, "Earth");
        assert_eq!(catalog.rings.len(), 5);
    }

    #[test]
    fn earth_matches_reference_values() {
        let catalog = Catalog::load().unwrap();
        let earth = catalog.bodies.iter().find(|b| b.id == "Earth").unwrap();
        assert_eq!(earth.orbit_radius, 15.0);
        assert_eq!(earth.angular_speed, 2.98);
        assert_eq!(earth.opacity, 0.9);
        assert_eq!(parse_hex_color(&earth.color), Some(0x6B93D6));
    }

    #[test]
    fn defaults_fill_optional_fields() {
        let json = r##"{ "bodies": [
            { "id": "X", "radius": 1, "orbit_radius": 2, "angular_speed": 1,
              "color": "#FFFFFF", "summary": "x" }
        ] }"##;
        let catalog = Catalog::from_json(json).unwrap();
        let x = &catalog.bodies[0];
        assert_eq!(x.display_name(), "X");
        assert_eq!(x.opacity, 1.0);
        assert_eq!(x.spin_rate, 0.0);
        assert!(x.facts.is_empty());
        assert!(catalog.satellites.is_empty());
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#FDB813"), Some(0xFDB813));
        assert_eq!(parse_hex_color("000011"), Some(0x000011));
        assert_eq!(parse_hex_color("#FFF"), None);
        assert_eq!(parse_hex_color("#GGGGGG"), None);
    }
}
