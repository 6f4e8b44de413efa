//! Procedural camera framing for storyboard shot exploration.
//!
//! A camera lives as a node in a [`SceneGraph`]; shot rules such as
//! [`OrbitingRule`] move it around a focus point while keeping the point in
//! view, and [`ShotGenerator`] composes rules into candidate shots.

pub mod constants;
pub mod error;
pub mod lens;
pub mod math;
pub mod rules;
pub mod scene;
pub mod shots;

pub use constants::*;
pub use error::{Result, SceneError, ShotError};
pub use lens::CameraLens;
pub use rules::*;
pub use scene::{NodeId, SceneGraph, SceneNode, Transform};
pub use shots::*;
