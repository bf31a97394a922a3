//! Ray casting against bounding spheres.
//!
//! Stateless: every query reads the target positions it is given, so moving
//! objects never need a cache invalidation step.

use glam::Vec3;

/// A half-line with a unit direction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Build a ray; `direction` is normalized here.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Smallest positive distance at which the ray enters (or, from inside,
    /// leaves) the sphere.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let to_center = center - self.origin;
        let along = to_center.dot(self.direction);
        let closest_sq = to_center.length_squared() - along * along;
        let radius_sq = radius * radius;
        if closest_sq > radius_sq {
            return None;
        }
        let half_chord = (radius_sq - closest_sq).sqrt();
        let near = along - half_chord;
        let far = along + half_chord;
        if near > 0.0 {
            Some(near)
        } else if far > 0.0 {
            Some(far)
        } else {
            None
        }
    }
}

/// One pickable sphere. `key` is whatever the caller uses to identify it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SphereTarget<K> {
    pub key: K,
    pub center: Vec3,
    pub radius: f32,
}

/// One ray hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit<K> {
    pub key: K,
    pub distance: f32,
    pub point: Vec3,
}

/// Intersect a ray with every target. Hits come back nearest first; equal
/// distances keep the targets' input order.
pub fn intersect_spheres<K: Copy>(ray: &Ray, targets: &[SphereTarget<K>]) -> Vec<RayHit<K>> {
    let mut hits: Vec<RayHit<K>> = targets
        .iter()
        .filter_map(|t| {
            ray.intersect_sphere(t.center, t.radius).map(|distance| RayHit {
                key: t.key,
                distance,
                point: ray.at(distance),
            })
        })
        .collect();
    // sort_by is stable, which is what keeps ties in input order.
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    hits
}
