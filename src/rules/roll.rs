use glam::{Mat4, Quat};
use log::debug;
use rand::Rng;

use super::ShotRule;
use crate::error::Result;
use crate::scene::{NodeId, SceneGraph};

/// Dutch angle: rolls the camera about its own viewing axis.
#[derive(Clone, Debug, PartialEq)]
pub struct RollRule {
    angle: f32,
}

impl RollRule {
    pub fn new<R: Rng + ?Sized>(max_degrees: f32, rng: &mut R) -> Self {
        let max = max_degrees.abs();
        let degrees = if max > 0.0 {
            rng.gen_range(-max..=max)
        } else {
            0.0
        };
        Self::with_angle_degrees(degrees)
    }

    pub fn with_angle_degrees(degrees: f32) -> Self {
        Self {
            angle: degrees.to_radians(),
        }
    }

    pub fn angle(&self) -> f32 {
        self.angle
    }
}

impl ShotRule for RollRule {
    fn name(&self) -> &'static str {
        "roll"
    }

    fn adjust(&self, scene: &mut SceneGraph, camera: NodeId) -> Result<()> {
        debug!("roll {camera:?} by {:.1} deg", self.angle.to_degrees());
        let world = scene.world_matrix(camera)?;
        scene.set_world_matrix(camera, world * Mat4::from_quat(Quat::from_rotation_z(self.angle)))?;
        Ok(())
    }
}
