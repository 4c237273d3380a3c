//! Headless retained scene graph.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use super::{NodeId, Property, SceneGraph, Vec2};

#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    children: SmallVec<[NodeId; 4]>,
    texture: Option<String>,
    x: f32,
    y: f32,
    scale_x: f32,
    scale_y: f32,
    rotation: f32,
    alpha: f32,
    skew_x: f32,
    z_index: i32,
}

impl Node {
    fn new(texture: Option<&str>) -> Self {
        Self {
            parent: None,
            children: SmallVec::new(),
            texture: texture.map(str::to_owned),
            x: 0.0,
            y: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
            alpha: 1.0,
            skew_x: 0.0,
            z_index: 0,
        }
    }

    fn local_transform(&self) -> Affine {
        let (sin, cos) = self.rotation.sin_cos();
        Affine {
            a: cos * self.scale_x,
            b: sin * self.scale_x,
            c: -sin * self.scale_y,
            d: cos * self.scale_y,
            tx: self.x,
            ty: self.y,
        }
    }
}

/// 2D affine matrix. Skew is a draw-time effect and is not composed.
#[derive(Clone, Copy, Debug)]
struct Affine {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    tx: f32,
    ty: f32,
}

impl Affine {
    const IDENTITY: Affine = Affine { a: 1.0, b: 0.0, c: 0.0, d: 1.0, tx: 0.0, ty: 0.0 };

    fn then(self, child: Affine) -> Affine {
        Affine {
            a: self.a * child.a + self.c * child.b,
            b: self.b * child.a + self.d * child.b,
            c: self.a * child.c + self.c * child.d,
            d: self.b * child.c + self.d * child.d,
            tx: self.a * child.tx + self.c * child.ty + self.tx,
            ty: self.b * child.tx + self.d * child.ty + self.ty,
        }
    }

    fn apply(self, p: Vec2) -> Vec2 {
        Vec2 {
            x: self.a * p.x + self.c * p.y + self.tx,
            y: self.b * p.x + self.d * p.y + self.ty,
        }
    }
}

/// In-memory `SceneGraph`.
///
/// Keeps every node with its parent link, z-ordered children and texture
/// alias, so tests can assert on exactly what a renderer would draw.
#[derive(Clone, Debug)]
pub struct MemoryScene {
    nodes: FxHashMap<NodeId, Node>,
    next_id: u32,
}

impl Default for MemoryScene {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryScene {
    const ROOT: NodeId = NodeId(0);

    #[must_use]
    pub fn new() -> Self {
        let mut nodes = FxHashMap::default();
        nodes.insert(Self::ROOT, Node::new(None));
        Self { nodes, next_id: 1 }
    }

    /// Number of live nodes, the root included.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Children of a node in draw order (lowest z first).
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.nodes.get(&node).map_or(&[], |n| n.children.as_slice())
    }

    #[must_use]
    pub fn texture(&self, node: NodeId) -> Option<&str> {
        self.nodes.get(&node).and_then(|n| n.texture.as_deref())
    }

    #[must_use]
    pub fn z_index(&self, node: NodeId) -> i32 {
        self.nodes.get(&node).map_or(0, |n| n.z_index)
    }

    /// Whether the node is connected to the root (i.e. would be drawn).
    #[must_use]
    pub fn is_attached(&self, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == Self::ROOT {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.nodes.get(&node).and_then(|n| n.parent);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(&id).and_then(|n| n.parent);
        }
        false
    }

    fn world_transform(&self, node: NodeId) -> Affine {
        match self.nodes.get(&node) {
            Some(n) => {
                let parent = n.parent.map_or(Affine::IDENTITY, |p| self.world_transform(p));
                parent.then(n.local_transform())
            }
            None => Affine::IDENTITY,
        }
    }

    fn sort_children(&mut self, parent: NodeId) {
        let Some(children) = self.nodes.get(&parent).map(|n| n.children.clone()) else {
            return;
        };
        let mut keyed: SmallVec<[(i32, NodeId); 4]> =
            children.iter().map(|c| (self.z_index(*c), *c)).collect();
        // Stable: equal z keeps insertion order
        keyed.sort_by_key(|(z, _)| *z);
        if let Some(n) = self.nodes.get_mut(&parent) {
            n.children = keyed.into_iter().map(|(_, c)| c).collect();
        }
    }
}

impl SceneGraph for MemoryScene {
    fn root(&self) -> NodeId {
        Self::ROOT
    }

    fn create_node(&mut self, texture: Option<&str>) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(texture));
        id
    }

    fn destroy_node(&mut self, node: NodeId) {
        if node == Self::ROOT || !self.nodes.contains_key(&node) {
            return;
        }
        self.detach(node);

        let mut pending = vec![node];
        while let Some(id) = pending.pop() {
            if let Some(removed) = self.nodes.remove(&id) {
                pending.extend(removed.children);
            }
        }
    }

    fn add_child(&mut self, parent: NodeId, child: NodeId) {
        if !self.nodes.contains_key(&parent) || !self.nodes.contains_key(&child) {
            return;
        }
        assert!(
            child != parent && !self.is_ancestor(child, parent),
            "{} cannot be parented under its own descendant {}",
            child,
            parent
        );

        self.detach(child);
        if let Some(c) = self.nodes.get_mut(&child) {
            c.parent = Some(parent);
        }
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.push(child);
        }
        self.sort_children(parent);
    }

    fn detach(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get_mut(&node).and_then(|n| n.parent.take()) else {
            return;
        };
        if let Some(p) = self.nodes.get_mut(&parent) {
            p.children.retain(|c| *c != node);
        }
    }

    fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.get(&node).and_then(|n| n.parent)
    }

    fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    fn get(&self, node: NodeId, property: Property) -> f32 {
        let Some(n) = self.nodes.get(&node) else {
            return match property {
                Property::ScaleX | Property::ScaleY | Property::Alpha => 1.0,
                _ => 0.0,
            };
        };
        match property {
            Property::X => n.x,
            Property::Y => n.y,
            Property::ScaleX => n.scale_x,
            Property::ScaleY => n.scale_y,
            Property::Rotation => n.rotation,
            Property::Alpha => n.alpha,
            Property::SkewX => n.skew_x,
        }
    }

    fn set(&mut self, node: NodeId, property: Property, value: f32) {
        let Some(n) = self.nodes.get_mut(&node) else {
            return;
        };
        match property {
            Property::X => n.x = value,
            Property::Y => n.y = value,
            Property::ScaleX => n.scale_x = value,
            Property::ScaleY => n.scale_y = value,
            Property::Rotation => n.rotation = value,
            Property::Alpha => n.alpha = value,
            Property::SkewX => n.skew_x = value,
        }
    }

    fn set_z_index(&mut self, node: NodeId, z: i32) {
        let Some(n) = self.nodes.get_mut(&node) else {
            return;
        };
        n.z_index = z;
        if let Some(parent) = n.parent {
            self.sort_children(parent);
        }
    }

    fn global_position(&self, node: NodeId) -> Vec2 {
        let Some(n) = self.nodes.get(&node) else {
            return Vec2::ZERO;
        };
        let parent = n.parent.map_or(Affine::IDENTITY, |p| self.world_transform(p));
        parent.apply(Vec2::new(n.x, n.y))
    }

    fn global_rotation(&self, node: NodeId) -> f32 {
        let mut total = 0.0;
        let mut current = Some(node);
        while let Some(id) = current {
            match self.nodes.get(&id) {
                Some(n) => {
                    total += n.rotation;
                    current = n.parent;
                }
                None => break,
            }
        }
        total
    }
}
