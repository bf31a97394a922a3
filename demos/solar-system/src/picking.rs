//! Pointer picking against the bodies' current positions.

use glam::Vec2;
use orrery_engine::{intersect_spheres, PerspectiveCamera, SphereTarget, Viewport};
use orrery_engine::renderer::camera::client_to_ndc;

use crate::registry::BodyRegistry;

/// Bounding spheres of every pickable body, keyed by registry index, in
/// catalog order. Satellites and ring layers are not pickable.
pub fn pickable_set(registry: &BodyRegistry) -> Vec<SphereTarget<usize>> {
    registry
        .all()
        .iter()
        .enumerate()
        .map(|(index, body)| SphereTarget {
            key: index,
            center: body.position,
            radius: body.base_radius,
        })
        .collect()
}

/// Nearest body under a normalized-device coordinate, if any.
///
/// Ties on distance go to the earlier target, so catalog order wins.
pub fn resolve<K: Copy>(
    ndc: Vec2,
    camera: &PerspectiveCamera,
    pickables: &[SphereTarget<K>],
) -> Option<K> {
    if !ndc.is_finite() {
        return None;
    }
    let ray = camera.ray_from_ndc(ndc);
    intersect_spheres(&ray, pickables).first().map(|hit| hit.key)
}

/// Everything one pick needs, captured at the moment of the event.
pub struct PickContext<'a> {
    pub camera: &'a PerspectiveCamera,
    pub viewport: Viewport,
    pub targets: &'a [SphereTarget<usize>],
}

impl PickContext<'_> {
    /// Resolve a pointer position in client pixels.
    pub fn pick(&self, client: Vec2) -> Option<usize> {
        resolve(client_to_ndc(client, self.viewport), self.camera, self.targets)
    }
}
