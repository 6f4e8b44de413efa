//! Camera lens description and framing checks.
//!
//! The lens is kept apart from the scene graph: a camera node only carries a
//! transform, the host pairs it with a lens when it needs a projection.

use glam::{Mat4, Vec2, Vec3};

use crate::constants::{DEFAULT_ASPECT, DEFAULT_FOVY_DEG, DEFAULT_ZFAR, DEFAULT_ZNEAR};

/// Right-handed perspective lens.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraLens {
    pub fovy_radians: f32,
    pub aspect: f32,
    pub znear: f32,
    pub zfar: f32,
}

impl Default for CameraLens {
    fn default() -> Self {
        Self {
            fovy_radians: DEFAULT_FOVY_DEG.to_radians(),
            aspect: DEFAULT_ASPECT,
            znear: DEFAULT_ZNEAR,
            zfar: DEFAULT_ZFAR,
        }
    }
}

impl CameraLens {
    /// Board aspect ratio (width / height).
    pub fn with_aspect(mut self, aspect: f32) -> Self {
        self.aspect = aspect;
        self
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fovy_radians, self.aspect, self.znear, self.zfar)
    }

    /// Normalized device coordinates of `point` seen from a camera placed at
    /// `camera_world`, or `None` when the point is behind the camera.
    pub fn frames_point(&self, camera_world: Mat4, point: Vec3) -> Option<Vec2> {
        let view = camera_world.inverse();
        let in_view = view.transform_point3(point);
        if in_view.z >= 0.0 {
            return None;
        }
        let clip = self.projection_matrix() * in_view.extend(1.0);
        Some(Vec2::new(clip.x / clip.w, clip.y / clip.w))
    }
}
