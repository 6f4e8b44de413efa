use glam::Vec3;
use log::debug;
use rand::Rng;

use super::ShotRule;
use crate::constants::{world_up, VERTICAL_ELEVATION_LIMIT_DEG};
use crate::error::Result;
use crate::scene::{NodeId, SceneGraph};

const DEGENERATE_EPSILON: f32 = 1e-6;

/// Raises or lowers the camera around the focus point, about the horizontal
/// axis perpendicular to the line from the focus to the camera. Positive
/// angles raise the camera. The resulting elevation is clamped so the camera
/// never swings over the top or bottom of the subject.
#[derive(Clone, Debug, PartialEq)]
pub struct VerticalAngleRule {
    focus: Vec3,
    angle: f32,
}

impl VerticalAngleRule {
    /// Angle drawn uniformly from `[-max_degrees, max_degrees]`.
    pub fn new<R: Rng + ?Sized>(focus: Vec3, max_degrees: f32, rng: &mut R) -> Self {
        let max = max_degrees.abs();
        let degrees = if max > 0.0 {
            rng.gen_range(-max..=max)
        } else {
            0.0
        };
        Self::with_angle_degrees(focus, degrees)
    }

    pub fn with_angle_degrees(focus: Vec3, degrees: f32) -> Self {
        Self {
            focus,
            angle: degrees.to_radians(),
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }
}

impl ShotRule for VerticalAngleRule {
    fn name(&self) -> &'static str {
        "vertical-angle"
    }

    fn adjust(&self, scene: &mut SceneGraph, camera: NodeId) -> Result<()> {
        let world = scene.world_matrix(camera)?;
        let offset = world.transform_point3(Vec3::ZERO) - self.focus;
        let axis = offset.cross(world_up());
        if axis.length_squared() < DEGENERATE_EPSILON {
            debug!("vertical-angle skipped, {camera:?} is on the focus axis");
            return Ok(());
        }

        let limit = VERTICAL_ELEVATION_LIMIT_DEG.to_radians();
        let elevation = (offset.y / offset.length()).clamp(-1.0, 1.0).asin();
        let target = (elevation + self.angle).clamp(-limit, limit);
        let delta = target - elevation;
        debug!(
            "vertical-angle {camera:?}: elevation {:.1} -> {:.1} deg",
            elevation.to_degrees(),
            target.to_degrees()
        );
        scene.rotate_around_point(camera, self.focus, axis, delta)?;
        Ok(())
    }
}
