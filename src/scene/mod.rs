//! Scene graph interface.
//!
//! The renderer is a collaborator: effects and piles only create nodes,
//! set numeric properties on them, parent them, and ask where they are on
//! screen. Anything that implements `SceneGraph` can sit behind them.
//! `MemoryScene` is the headless implementation used by tests and by
//! drivers that render from a snapshot.

mod memory;

pub use memory::MemoryScene;

use serde::{Deserialize, Serialize};

/// Handle to a node owned by a `SceneGraph`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

/// A 2D point or vector in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Move a fraction `t` of the way towards `target`.
    #[must_use]
    pub fn lerp(self, target: Vec2, t: f32) -> Vec2 {
        Vec2 {
            x: self.x + (target.x - self.x) * t,
            y: self.y + (target.y - self.y) * t,
        }
    }

    #[must_use]
    pub fn distance(self, other: Vec2) -> f32 {
        ((self.x - other.x).powi(2) + (self.y - other.y).powi(2)).sqrt()
    }
}

/// Numeric node properties that can be set directly or tweened.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Property {
    X,
    Y,
    ScaleX,
    ScaleY,
    Rotation,
    Alpha,
    SkewX,
}

/// Renderer-side operations the core needs.
///
/// Operations on a node that no longer exists are ignored; `get` returns
/// the property's neutral value for such nodes.
pub trait SceneGraph {
    /// The top-level stage node. Never destroyed.
    fn root(&self) -> NodeId;

    /// Create a detached node, optionally drawing the texture with this alias.
    fn create_node(&mut self, texture: Option<&str>) -> NodeId;

    /// Destroy a node and all of its descendants.
    fn destroy_node(&mut self, node: NodeId);

    /// Attach `child` under `parent`, detaching it from any previous parent.
    fn add_child(&mut self, parent: NodeId, child: NodeId);

    /// Detach a node from its parent. The node stays alive.
    fn detach(&mut self, node: NodeId);

    fn parent(&self, node: NodeId) -> Option<NodeId>;

    fn contains(&self, node: NodeId) -> bool;

    fn get(&self, node: NodeId, property: Property) -> f32;

    fn set(&mut self, node: NodeId, property: Property, value: f32);

    /// Draw order among siblings; higher draws on top.
    fn set_z_index(&mut self, node: NodeId, z: i32);

    /// Screen-space position of the node's origin.
    fn global_position(&self, node: NodeId) -> Vec2;

    /// Accumulated rotation of the node and all of its ancestors.
    fn global_rotation(&self, node: NodeId) -> f32;

    fn position(&self, node: NodeId) -> Vec2 {
        Vec2::new(self.get(node, Property::X), self.get(node, Property::Y))
    }

    fn set_position(&mut self, node: NodeId, position: Vec2) {
        self.set(node, Property::X, position.x);
        self.set(node, Property::Y, position.y);
    }

    fn set_scale(&mut self, node: NodeId, scale: f32) {
        self.set(node, Property::ScaleX, scale);
        self.set(node, Property::ScaleY, scale);
    }

    /// Reparent a node directly under the root, keeping it where it is on
    /// screen. The root carries the identity transform.
    fn lift_to_root(&mut self, node: NodeId) {
        let position = self.global_position(node);
        let rotation = self.global_rotation(node);
        let root = self.root();
        self.add_child(root, node);
        self.set_position(node, position);
        self.set(node, Property::Rotation, rotation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec2_lerp() {
        let a = Vec2::new(0.0, 0.0);
        let b = Vec2::new(100.0, -50.0);

        assert_eq!(a.lerp(b, 0.1), Vec2::new(10.0, -5.0));
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.0), a);
    }

    #[test]
    fn test_node_display() {
        assert_eq!(format!("{}", NodeId(7)), "Node(7)");
    }
}
