//! Error types for scene-graph edits and shot rules.

use thiserror::Error;

use crate::scene::NodeId;

/// Errors raised by [`SceneGraph`](crate::scene::SceneGraph) operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneError {
    /// The id does not refer to a node of this graph
    #[error("unknown scene node {0:?}")]
    UnknownNode(NodeId),

    /// Reparenting would make a node its own ancestor
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    Cycle { child: NodeId, parent: NodeId },

    /// The root cannot be reparented
    #[error("the scene root cannot be reparented")]
    RootIsFixed,
}

/// Errors raised while applying a shot rule.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShotError {
    /// The camera is detached from any hierarchy
    #[error("camera {0:?} has no parent node")]
    CameraWithoutParent(NodeId),

    /// More candidate shots requested than a single call produces
    #[error("requested {requested} shots, at most {max} per call")]
    TooManyShots { requested: usize, max: usize },

    #[error(transparent)]
    Scene(#[from] SceneError),
}

pub type Result<T> = std::result::Result<T, ShotError>;
