//! Body registry: the simulation-side records for every body.
//!
//! Built once from the catalog and never resized. Satellites and ring layers
//! are owned by their parent body, so iterating bodies in order always visits
//! a parent before its children.

use std::collections::HashMap;
use glam::Vec3;
use orrery_engine::Rng;

use crate::bodies::{parse_hex_color, Catalog, Fact};
use crate::error::ConfigError;
use crate::orbit::{self, ORBIT_HEIGHT};

/// Static display data.
#[derive(Debug, Clone)]
pub struct Description {
    pub name: String,
    pub summary: String,
    pub facts: Vec<Fact>,
}

/// Static look, forwarded to the renderer.
#[derive(Debug, Clone, Copy)]
pub struct Appearance {
    pub color: u32,
    pub emissive: f32,
    pub opacity: f32,
    pub halo_radius: Option<f32>,
}

/// Moon orbiting a parent body's current position.
#[derive(Debug, Clone)]
pub struct Satellite {
    pub id: String,
    pub name: String,
    pub base_radius: f32,
    pub orbit_radius: f32,
    pub base_angular_speed: f64,
    pub current_angle: f64,
    pub spin_rate: f64,
    pub spin_angle: f64,
    pub position: Vec3,
    pub color: u32,
}

/// Flat ring rotating independently around its parent.
#[derive(Debug, Clone)]
pub struct RingLayer {
    /// World units (already multiplied by the parent radius).
    pub inner: f32,
    pub outer: f32,
    pub angle: f64,
    pub rotation_speed: f64,
    pub color: u32,
    pub opacity: f32,
}

/// Sun or planet.
#[derive(Debug, Clone)]
pub struct CelestialBody {
    pub id: String,
    pub base_radius: f32,
    pub orbit_radius: f32,
    pub base_angular_speed: f64,
    /// User-set factor, always >= 0. 1.0 is the catalog speed.
    pub speed_multiplier: f64,
    /// Radians in [0, TAU).
    pub current_angle: f64,
    pub spin_rate: f64,
    pub spin_angle: f64,
    pub position: Vec3,
    pub description: Description,
    pub appearance: Appearance,
    pub satellites: Vec<Satellite>,
    pub rings: Vec<RingLayer>,
}

impl CelestialBody {
    /// Bodies with a zero orbit radius stay at the origin.
    pub fn is_orbiting(&self) -> bool {
        self.orbit_radius > 0.0
    }

    /// Position implied by the current angle.
    pub fn orbit_position(&self) -> Vec3 {
        orbit::orbit_position(self.orbit_radius, self.current_angle, ORBIT_HEIGHT)
    }
}

/// Id-keyed arena of bodies, iterated in catalog order.
#[derive(Debug, Clone)]
pub struct BodyRegistry {
    bodies: Vec<CelestialBody>,
    index: HashMap<String, usize>,
}

fn color_of(id: &str, hex: &str) -> Result<u32, ConfigError> {
    parse_hex_color(hex).ok_or_else(|| ConfigError::invalid(id, format!("bad color {hex:?}")))
}

fn check_angle(id: &str, angle: Option<f64>) -> Result<(), ConfigError> {
    match angle {
        Some(a) if !a.is_finite() => Err(ConfigError::invalid(id, "non-finite initial angle")),
        _ => Ok(()),
    }
}

impl BodyRegistry {
    /// Build every body from the catalog.
    ///
    /// Orbit angles start random in [0, TAU) unless the descriptor pins one.
    /// Any bad entry rejects the whole catalog.
    pub fn initialize(catalog: &Catalog, rng: &mut Rng) -> Result<Self, ConfigError> {
        let mut bodies = Vec::with_capacity(catalog.bodies.len());
        let mut index = HashMap::with_capacity(catalog.bodies.len());

        for desc in &catalog.bodies {
            let id = desc.id.as_str();
            if index.contains_key(id) {
                return Err(ConfigError::DuplicateId(id.to_string()));
            }
            if !(desc.radius.is_finite() && desc.radius > 0.0) {
                return Err(ConfigError::invalid(id, "radius must be positive"));
            }
            if !(desc.orbit_radius.is_finite() && desc.orbit_radius >= 0.0) {
                return Err(ConfigError::invalid(id, "orbit radius must be non-negative"));
            }
            if !desc.angular_speed.is_finite() || !desc.spin_rate.is_finite() {
                return Err(ConfigError::invalid(id, "non-finite speed"));
            }
            check_angle(id, desc.initial_angle)?;

            let current_angle =
                orbit::wrap_angle(desc.initial_angle.unwrap_or_else(|| rng.angle()));
            let mut body = CelestialBody {
                id: id.to_string(),
                base_radius: desc.radius,
                orbit_radius: desc.orbit_radius,
                base_angular_speed: desc.angular_speed,
                speed_multiplier: 1.0,
                current_angle,
                spin_rate: desc.spin_rate,
                spin_angle: 0.0,
                position: Vec3::ZERO,
                description: Description {
                    name: desc.display_name().to_string(),
                    summary: desc.summary.clone(),
                    facts: desc.facts.clone(),
                },
                appearance: Appearance {
                    color: color_of(id, &desc.color)?,
                    emissive: desc.emissive,
                    opacity: desc.opacity,
                    halo_radius: desc.halo_radius,
                },
                satellites: Vec::new(),
                rings: Vec::new(),
            };
            body.position = body.orbit_position();

            index.insert(id.to_string(), bodies.len());
            bodies.push(body);
        }

        let mut registry = Self { bodies, index };

        for desc in &catalog.satellites {
            let id = desc.id.as_str();
            if registry.index.contains_key(id) || registry.satellite_ids().any(|s| s == id) {
                return Err(ConfigError::DuplicateId(id.to_string()));
            }
            let Some(&parent) = registry.index.get(&desc.parent) else {
                return Err(ConfigError::UnknownParent {
                    satellite: id.to_string(),
                    parent: desc.parent.clone(),
                });
            };
            if !(desc.radius.is_finite() && desc.radius > 0.0) {
                return Err(ConfigError::invalid(id, "radius must be positive"));
            }
            if !(desc.orbit_radius.is_finite() && desc.orbit_radius > 0.0) {
                return Err(ConfigError::invalid(id, "satellite orbit radius must be positive"));
            }
            if !desc.angular_speed.is_finite() || !desc.spin_rate.is_finite() {
                return Err(ConfigError::invalid(id, "non-finite speed"));
            }
            check_angle(id, desc.initial_angle)?;

            let color = color_of(id, &desc.color)?;
            let current_angle =
                orbit::wrap_angle(desc.initial_angle.unwrap_or_else(|| rng.angle()));
            let parent_body = &mut registry.bodies[parent];
            let position = parent_body.position
                + orbit::orbit_position(desc.orbit_radius, current_angle, 0.0);
            parent_body.satellites.push(Satellite {
                id: id.to_string(),
                name: desc.display_name().to_string(),
                base_radius: desc.radius,
                orbit_radius: desc.orbit_radius,
                base_angular_speed: desc.angular_speed,
                current_angle,
                spin_rate: desc.spin_rate,
                spin_angle: 0.0,
                position,
                color,
            });
        }

        for desc in &catalog.rings {
            let Some(&parent) = registry.index.get(&desc.parent) else {
                return Err(ConfigError::invalid(&desc.parent, "ring attached to unknown body"));
            };
            if !(desc.inner > 0.0 && desc.inner < desc.outer && desc.outer.is_finite()) {
                return Err(ConfigError::invalid(
                    &desc.parent,
                    format!("ring needs 0 < inner < outer, got {}..{}", desc.inner, desc.outer),
                ));
            }
            if !desc.rotation_speed.is_finite() {
                return Err(ConfigError::invalid(&desc.parent, "non-finite ring speed"));
            }
            let color = color_of(&desc.parent, &desc.color)?;
            let parent_body = &mut registry.bodies[parent];
            let scale = parent_body.base_radius;
            parent_body.rings.push(RingLayer {
                inner: desc.inner * scale,
                outer: desc.outer * scale,
                angle: 0.0,
                rotation_speed: desc.rotation_speed,
                color,
                opacity: desc.opacity,
            });
        }

        log::info!(
            "body registry: {} bodies, {} satellites, {} ring layers",
            registry.len(),
            registry.bodies.iter().map(|b| b.satellites.len()).sum::<usize>(),
            registry.bodies.iter().map(|b| b.rings.len()).sum::<usize>(),
        );
        Ok(registry)
    }

    fn satellite_ids(&self) -> impl Iterator<Item = &str> {
        self.bodies
            .iter()
            .flat_map(|b| b.satellites.iter().map(|s| s.id.as_str()))
    }

    pub fn find_by_id(&self, id: &str) -> Option<&CelestialBody> {
        self.index.get(id).map(|&i| &self.bodies[i])
    }

    pub fn find_by_id_mut(&mut self, id: &str) -> Option<&mut CelestialBody> {
        match self.index.get(id) {
            Some(&i) => self.bodies.get_mut(i),
            None => None,
        }
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// All bodies in catalog order.
    pub fn all(&self) -> &[CelestialBody] {
        &self.bodies
    }

    pub fn all_mut(&mut self) -> &mut [CelestialBody] {
        &mut self.bodies
    }

    pub fn get(&self, index: usize) -> Option<&CelestialBody> {
        self.bodies.get(index)
    }

    pub fn len(&self) -> usize {
        self.bodies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bodies.is_empty()
    }

    /// Set a body's speed multiplier outright (never compounded).
    /// Negative values clamp to 0. Returns the stored value.
    pub fn set_speed_multiplier(&mut self, index: usize, value: f64) -> Option<f64> {
        let body = self.bodies.get_mut(index)?;
        body.speed_multiplier = value.max(0.0);
        Some(body.speed_multiplier)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    fn catalog(json: &str) -> Catalog {
        Catalog::from_json(json).unwrap()
    }

    const TWO_BODIES: &str = r##"{
        "bodies": [
            { "id": "Sun", "radius": 3, "orbit_radius": 0, "angular_speed": 0,
              "color": "#FDB813", "summary": "s" },
            { "id": "Earth", "radius": 0.8, "orbit_radius": 15, "angular_speed": 2.98,
              "color": "#6B93D6", "summary": "e", "initial_angle": 0 }
        ],
        "satellites": [
            { "id": "Moon", "parent": "Earth", "radius": 0.2, "orbit_radius": 2.5,
              "angular_speed": 12, "color": "#C0C0C0", "initial_angle": 0 }
        ],
        "rings": [
            { "parent": "Earth", "inner": 1.1, "outer": 1.4, "rotation_speed": 0.001,
              "color": "#CCCCCC" }
        ]
    }"##;

    fn two_bodies() -> BodyRegistry {
        BodyRegistry::initialize(&catalog(TWO_BODIES), &mut Rng::new(1)).unwrap()
    }

    fn full_catalog(seed: u64) -> BodyRegistry {
        BodyRegistry::initialize(&Catalog::load().unwrap(), &mut Rng::new(seed)).unwrap()
    }

    #[test]
    fn builds_full_catalog_in_order() {
        let registry = full_catalog(7);
        let names: Vec<_> = registry.all().iter().map(|b| b.id.as_str()).collect();
        assert_eq!(
            names,
            ["Sun", "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune"]
        );
        let saturn = registry.find_by_id("Saturn").unwrap();
        assert_eq!(saturn.rings.len(), 5);
        assert!((saturn.rings[0].inner - 2.2 * 1.1).abs() < 1e-5);
        assert_eq!(registry.find_by_id("Earth").unwrap().satellites.len(), 1);
    }

    #[test]
    fn random_angles_are_in_range_and_distinct() {
        let registry = full_catalog(99);
        let angles: Vec<f64> = registry.all().iter().map(|b| b.current_angle).collect();
        assert!(angles.iter().all(|a| (0.0..TAU).contains(a)));
        assert!(angles.windows(2).any(|w| w[0] != w[1]));
    }

    #[test]
    fn sun_stays_at_origin() {
        let registry = full_catalog(3);
        let sun = registry.find_by_id("Sun").unwrap();
        assert!(!sun.is_orbiting());
        assert_eq!(sun.position, Vec3::ZERO);
    }

    #[test]
    fn pinned_angles_place_bodies() {
        let registry = two_bodies();
        let earth = registry.find_by_id("Earth").unwrap();
        assert_eq!(earth.position, Vec3::new(15.0, 0.0, 0.0));
        assert_eq!(earth.satellites[0].position, Vec3::new(17.5, 0.0, 0.0));
        assert!((earth.rings[0].outer - 0.8 * 1.4).abs() < 1e-6);
        assert_eq!(earth.rings[0].opacity, 1.0);
    }

    #[test]
    fn rejects_duplicate_ids() {
        let json = TWO_BODIES.replace(r#""id": "Earth""#, r#""id": "Sun""#);
        let err = BodyRegistry::initialize(&catalog(&json), &mut Rng::new(1)).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateId(ref id) if id == "Sun"));
    }

    #[test]
    fn rejects_satellite_sharing_a_body_id() {
        let json = TWO_BODIES.replace(r#""id": "Moon""#, r#""id": "Earth""#);
        let err = BodyRegistry::initialize(&catalog(&json), &mut Rng::new(1)).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateId(_)));
    }

    #[test]
    fn rejects_unknown_parent() {
        let json = TWO_BODIES.replace(
            r#""parent": "Earth", "radius": 0.2"#,
            r#""parent": "Vulcan", "radius": 0.2"#,
        );
        let err = BodyRegistry::initialize(&catalog(&json), &mut Rng::new(1)).unwrap_err();
        match err {
            ConfigError::UnknownParent { satellite, parent } => {
                assert_eq!(satellite, "Moon");
                assert_eq!(parent, "Vulcan");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn rejects_bad_geometry() {
        let json = TWO_BODIES.replace(r#""radius": 3"#, r#""radius": 0"#);
        assert!(matches!(
            BodyRegistry::initialize(&catalog(&json), &mut Rng::new(1)),
            Err(ConfigError::InvalidBody { .. })
        ));

        let json = TWO_BODIES.replace(r#""inner": 1.1"#, r#""inner": 1.5"#);
        assert!(matches!(
            BodyRegistry::initialize(&catalog(&json), &mut Rng::new(1)),
            Err(ConfigError::InvalidBody { .. })
        ));
    }

    #[test]
    fn lookup_by_id() {
        let mut registry = two_bodies();
        assert_eq!(registry.index_of("Earth"), Some(1));
        assert!(registry.find_by_id("Pluto").is_none());
        registry.find_by_id_mut("Earth").unwrap().speed_multiplier = 2.0;
        assert_eq!(registry.get(1).unwrap().speed_multiplier, 2.0);
    }

    #[test]
    fn speed_multiplier_is_set_not_compounded() {
        let mut registry = two_bodies();
        registry.set_speed_multiplier(1, 2.0);
        registry.set_speed_multiplier(1, 1.0);
        assert_eq!(registry.get(1).unwrap().speed_multiplier, 1.0);
        assert_eq!(registry.set_speed_multiplier(1, -3.0), Some(0.0));
        assert_eq!(registry.set_speed_multiplier(9, 1.0), None);
    }
}
