//! A small arena-backed scene graph.
//!
//! Nodes carry a local [`Transform`] relative to their parent and a cached
//! world matrix refreshed by [`SceneGraph::update_world_matrices`]. Every graph
//! owns a fixed root node; all other nodes hang somewhere below it.
//!
//! # Example
//!
//! ```
//! use glam::Vec3;
//! use shot_explorer::scene::{SceneGraph, Transform};
//!
//! let mut scene = SceneGraph::new();
//! let rig = scene
//!     .add_node("rig", scene.root(), Transform::new().with_position(Vec3::new(1.0, 0.0, 0.0)))
//!     .unwrap();
//! let camera = scene
//!     .add_node("camera", rig, Transform::new().with_position(Vec3::new(0.0, 1.0, 0.0)))
//!     .unwrap();
//!
//! let world = scene.world_matrix(camera).unwrap();
//! let p = world.transform_point3(Vec3::ZERO);
//! assert!((p - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-5);
//! ```

use fnv::FnvHashMap;
use glam::{Mat4, Quat, Vec3};
use smallvec::SmallVec;

use crate::constants::ROOT_NODE_NAME;
use crate::error::SceneError;
use crate::math;

pub type Result<T> = std::result::Result<T, SceneError>;

/// Handle to a node in a [`SceneGraph`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Position, rotation and scale of a node relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_position(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    pub fn with_rotation(mut self, rotation: Quat) -> Self {
        self.rotation = rotation;
        self
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Transform placed at `eye` with its -Z axis aimed at `target`.
    pub fn looking_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        Self::new()
            .with_position(eye)
            .with_rotation(math::look_rotation(eye, target, up))
    }

    /// Decompose an affine matrix. Shear is lost.
    pub fn from_matrix(m: Mat4) -> Self {
        let (scale, rotation, position) = m.to_scale_rotation_translation();
        Self {
            position,
            rotation: rotation.normalize(),
            scale,
        }
    }

    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Local viewing direction (-Z).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }

    pub fn right(&self) -> Vec3 {
        self.rotation * Vec3::X
    }

    pub fn up(&self) -> Vec3 {
        self.rotation * Vec3::Y
    }
}

#[derive(Clone, Debug)]
pub struct SceneNode {
    name: String,
    local: Transform,
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    world: Mat4,
}

impl SceneNode {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn local(&self) -> &Transform {
        &self.local
    }

    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// World matrix as of the last refresh.
    pub fn cached_world(&self) -> Mat4 {
        self.world
    }
}

#[derive(Clone, Debug)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    names: FnvHashMap<String, NodeId>,
}

impl Default for SceneGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneGraph {
    pub fn new() -> Self {
        let root = SceneNode {
            name: ROOT_NODE_NAME.to_string(),
            local: Transform::default(),
            parent: None,
            children: SmallVec::new(),
            world: Mat4::IDENTITY,
        };
        let mut names = FnvHashMap::default();
        names.insert(ROOT_NODE_NAME.to_string(), NodeId(0));
        Self {
            nodes: vec![root],
            names,
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Result<&SceneNode> {
        self.nodes.get(id.0).ok_or(SceneError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut SceneNode> {
        self.nodes.get_mut(id.0).ok_or(SceneError::UnknownNode(id))
    }

    /// Add a node under `parent`. Names need not be unique; [`find`](Self::find)
    /// returns the first node registered under a name.
    pub fn add_node(
        &mut self,
        name: impl Into<String>,
        parent: NodeId,
        local: Transform,
    ) -> Result<NodeId> {
        let parent_world = self.node(parent)?.world;
        let id = NodeId(self.nodes.len());
        let name = name.into();
        self.names.entry(name.clone()).or_insert(id);
        self.nodes.push(SceneNode {
            name,
            local,
            parent: Some(parent),
            children: SmallVec::new(),
            world: parent_world * local.local_matrix(),
        });
        self.node_mut(parent)?.children.push(id);
        Ok(id)
    }

    pub fn find(&self, name: &str) -> Option<NodeId> {
        self.names.get(name).copied()
    }

    pub fn parent(&self, id: NodeId) -> Result<Option<NodeId>> {
        Ok(self.node(id)?.parent)
    }

    pub fn children(&self, id: NodeId) -> Result<&[NodeId]> {
        Ok(self.node(id)?.children())
    }

    pub fn local(&self, id: NodeId) -> Result<&Transform> {
        Ok(&self.node(id)?.local)
    }

    pub fn set_local(&mut self, id: NodeId, local: Transform) -> Result<()> {
        self.node_mut(id)?.local = local;
        Ok(())
    }

    /// True when `ancestor` appears on the parent chain of `id`.
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> Result<bool> {
        let mut current = self.node(id)?.parent;
        while let Some(p) = current {
            if p == ancestor {
                return Ok(true);
            }
            current = self.node(p)?.parent;
        }
        Ok(false)
    }

    /// Move `child` under `parent`, keeping its local transform as is.
    pub fn attach(&mut self, child: NodeId, parent: NodeId) -> Result<()> {
        self.node(parent)?;
        let old_parent = self.node(child)?.parent.ok_or(SceneError::RootIsFixed)?;
        if child == parent || self.is_ancestor(child, parent)? {
            return Err(SceneError::Cycle { child, parent });
        }
        self.node_mut(old_parent)?.children.retain(|c| *c != child);
        self.node_mut(parent)?.children.push(child);
        self.node_mut(child)?.parent = Some(parent);
        Ok(())
    }

    /// Move `child` under `parent` without changing where it sits in the world.
    pub fn attach_preserving_world(&mut self, child: NodeId, parent: NodeId) -> Result<()> {
        let world = self.world_matrix(child)?;
        self.attach(child, parent)?;
        self.set_world_matrix(child, world)
    }

    /// Reattach `child` directly under the root, preserving its world transform.
    pub fn detach(&mut self, child: NodeId) -> Result<()> {
        let root = self.root();
        self.attach_preserving_world(child, root)
    }

    /// World matrix computed from the hierarchy, independent of the cache.
    pub fn world_matrix(&self, id: NodeId) -> Result<Mat4> {
        let node = self.node(id)?;
        let local = node.local.local_matrix();
        match node.parent {
            Some(parent) => Ok(self.world_matrix(parent)? * local),
            None => Ok(local),
        }
    }

    /// Refresh every cached world matrix, parents before children.
    pub fn update_world_matrices(&mut self) {
        let mut stack = vec![(self.root(), Mat4::IDENTITY)];
        while let Some((id, parent_world)) = stack.pop() {
            let node = &mut self.nodes[id.0];
            node.world = parent_world * node.local.local_matrix();
            let world = node.world;
            stack.extend(node.children.iter().map(|c| (*c, world)));
        }
    }

    /// Bake a world matrix into the node's local transform relative to its
    /// current parent. Cached matrices of descendants stay stale until the
    /// next [`update_world_matrices`](Self::update_world_matrices).
    ///
    /// Under a non-uniformly scaled parent the exact matrix is generally not
    /// reachable with a position/rotation/scale local. The world origin and
    /// the direction of the node's -Z axis are always kept; the up axis keeps
    /// its side of the view plane but may pick up the parent's shear.
    pub fn set_world_matrix(&mut self, id: NodeId, world: Mat4) -> Result<()> {
        let parent_world = match self.node(id)?.parent {
            Some(parent) => self.world_matrix(parent)?,
            None => Mat4::IDENTITY,
        };
        let to_parent = parent_world.inverse();
        let scale = Transform::from_matrix(to_parent * world).scale;
        let forward = to_parent.transform_vector3(world.transform_vector3(Vec3::NEG_Z));
        let up = to_parent.transform_vector3(world.transform_vector3(Vec3::Y));
        let local = Transform::new()
            .with_position(to_parent.transform_point3(world.transform_point3(Vec3::ZERO)))
            .with_rotation(math::look_rotation(Vec3::ZERO, forward, up))
            .with_scale(scale);

        let node = self.node_mut(id)?;
        node.local = local;
        node.world = parent_world * local.local_matrix();
        Ok(())
    }

    /// Rotate a node about a world axis through a world point, keeping it
    /// under its current parent.
    pub fn rotate_around_point(
        &mut self,
        id: NodeId,
        point: Vec3,
        axis: Vec3,
        angle: f32,
    ) -> Result<()> {
        let world = self.world_matrix(id)?;
        self.set_world_matrix(id, math::rotate_around_point(world, point, axis, angle))
    }
}
