use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec2, Vec3};
use crate::api::game::Viewport;
use crate::picking::ray::Ray;

/// Initial camera placement and lens.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CameraSettings {
    /// Vertical field of view in degrees.
    pub fov_deg: f32,
    pub near: f32,
    pub far: f32,
    pub position: Vec3,
    pub target: Vec3,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_deg: 75.0,
            near: 0.1,
            far: 1000.0,
            position: Vec3::new(0.0, 20.0, 40.0),
            target: Vec3::ZERO,
        }
    }
}

/// Perspective camera looking from `position` at `target`.
#[derive(Debug, Clone, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    projection: Mat4,
}

/// Camera state as the renderer reads it (16 floats).
///
/// Wire format: `[px, py, pz, tx, ty, tz, ux, uy, uz, fov, aspect, near, far, pad×3]`
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, Pod, Zeroable)]
pub struct CameraBlock {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub up: [f32; 3],
    pub fov_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub _pad: [f32; 3],
}

impl CameraBlock {
    pub const FLOATS: usize = 16;
}

impl PerspectiveCamera {
    pub fn new(settings: &CameraSettings, viewport: Viewport) -> Self {
        let mut camera = Self {
            position: settings.position,
            target: settings.target,
            up: Vec3::Y,
            fov_deg: settings.fov_deg,
            aspect: viewport.aspect(),
            near: settings.near,
            far: settings.far,
            projection: Mat4::IDENTITY,
        };
        camera.update_projection();
        camera
    }

    /// Recompute the projection matrix after a lens or aspect change.
    pub fn update_projection(&mut self) {
        self.projection =
            Mat4::perspective_rh(self.fov_deg.to_radians(), self.aspect, self.near, self.far);
    }

    /// Adopt a new viewport size (window resize).
    pub fn resize(&mut self, viewport: Viewport) {
        self.aspect = viewport.aspect();
        self.update_projection();
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection * self.view_matrix()
    }

    /// Picking ray through a normalized-device coordinate.
    ///
    /// Origin is the camera position; the direction points at the NDC
    /// location unprojected onto a plane inside the frustum.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection_matrix().inverse();
        let on_plane = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 0.5));
        Ray::new(self.position, on_plane - self.position)
    }

    pub fn block(&self) -> CameraBlock {
        CameraBlock {
            position: self.position.to_array(),
            target: self.target.to_array(),
            up: self.up.to_array(),
            fov_deg: self.fov_deg,
            aspect: self.aspect,
            near: self.near,
            far: self.far,
            _pad: [0.0; 3],
        }
    }
}

/// Convert DOM client pixels to NDC (`x` right, `y` up, both in [-1, 1]).
pub fn client_to_ndc(client: Vec2, viewport: Viewport) -> Vec2 {
    Vec2::new(
        (client.x / viewport.width) * 2.0 - 1.0,
        -(client.y / viewport.height) * 2.0 + 1.0,
    )
}
