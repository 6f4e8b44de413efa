//! Camera shot rules.
//!
//! A rule is a one-shot command: it is built for a single shot with whatever
//! random parameters it needs, applied once to a camera node, then dropped.
//! Every rule runs the shared [`prepare_camera`] step before its own
//! adjustment and refreshes world matrices afterwards, so renderers reading
//! cached matrices see the committed transform.

mod orbiting;
mod roll;
mod vertical;

pub use orbiting::*;
pub use roll::*;
pub use vertical::*;

use log::warn;

use crate::error::{Result, ShotError};
use crate::scene::{NodeId, SceneGraph};

pub trait ShotRule {
    fn name(&self) -> &'static str;

    /// Rule-specific change to the camera's transform.
    fn adjust(&self, scene: &mut SceneGraph, camera: NodeId) -> Result<()>;

    fn apply(&self, scene: &mut SceneGraph, camera: NodeId) -> Result<()> {
        prepare_camera(scene, camera)?;
        self.adjust(scene, camera)?;
        scene.update_world_matrices();
        Ok(())
    }
}

/// Shared step run before any rule touches the camera: the camera must hang
/// under some parent, and world matrices are resolved from the current locals.
pub fn prepare_camera(scene: &mut SceneGraph, camera: NodeId) -> Result<()> {
    if scene.parent(camera)?.is_none() {
        warn!("shot rule applied to parentless node {camera:?}");
        return Err(ShotError::CameraWithoutParent(camera));
    }
    scene.update_world_matrices();
    Ok(())
}

/// Closed set of rule kinds a shot can be built from.
#[derive(Clone, Debug, PartialEq)]
pub enum Rule {
    Orbiting(OrbitingRule),
    VerticalAngle(VerticalAngleRule),
    Roll(RollRule),
}

impl ShotRule for Rule {
    fn name(&self) -> &'static str {
        match self {
            Rule::Orbiting(r) => r.name(),
            Rule::VerticalAngle(r) => r.name(),
            Rule::Roll(r) => r.name(),
        }
    }

    fn adjust(&self, scene: &mut SceneGraph, camera: NodeId) -> Result<()> {
        match self {
            Rule::Orbiting(r) => r.adjust(scene, camera),
            Rule::VerticalAngle(r) => r.adjust(scene, camera),
            Rule::Roll(r) => r.adjust(scene, camera),
        }
    }
}

impl From<OrbitingRule> for Rule {
    fn from(rule: OrbitingRule) -> Self {
        Rule::Orbiting(rule)
    }
}

impl From<VerticalAngleRule> for Rule {
    fn from(rule: VerticalAngleRule) -> Self {
        Rule::VerticalAngle(rule)
    }
}

impl From<RollRule> for Rule {
    fn from(rule: RollRule) -> Self {
        Rule::Roll(rule)
    }
}
