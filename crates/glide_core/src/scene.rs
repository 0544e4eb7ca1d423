//! Minimal retained scene
//!
//! A slotmap of nodes with plain numeric properties. Enough surface to drive
//! tweens in tests, examples, and small embedding hosts; real UI layers
//! implement [`Surface`] over their own retained tree instead.

use slotmap::SlotMap;

use crate::surface::{Property, Surface, TargetId};

/// Property storage for a single render target
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Node {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub opacity: f32,
    pub scale_x: f32,
    pub scale_y: f32,
    pub rotation: f32,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            width: 0.0,
            height: 0.0,
            opacity: 1.0,
            scale_x: 1.0,
            scale_y: 1.0,
            rotation: 0.0,
        }
    }
}

impl Node {
    fn get(&self, property: Property) -> f32 {
        match property {
            Property::X => self.x,
            Property::Y => self.y,
            Property::Width => self.width,
            Property::Height => self.height,
            Property::Opacity => self.opacity,
            Property::ScaleX => self.scale_x,
            Property::ScaleY => self.scale_y,
            Property::Rotation => self.rotation,
        }
    }

    fn set(&mut self, property: Property, value: f32) {
        match property {
            Property::X => self.x = value,
            Property::Y => self.y = value,
            Property::Width => self.width = value,
            Property::Height => self.height = value,
            Property::Opacity => self.opacity = value,
            Property::ScaleX => self.scale_x = value,
            Property::ScaleY => self.scale_y = value,
            Property::Rotation => self.rotation = value,
        }
    }
}

/// A retained set of nodes addressable by [`TargetId`]
#[derive(Default)]
pub struct Scene {
    nodes: SlotMap<TargetId, Node>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node and return its target id
    pub fn insert(&mut self, node: Node) -> TargetId {
        self.nodes.insert(node)
    }

    /// Remove a node; in-flight tween frames for it become no-ops
    pub fn remove(&mut self, target: TargetId) -> Option<Node> {
        self.nodes.remove(target)
    }

    pub fn node(&self, target: TargetId) -> Option<&Node> {
        self.nodes.get(target)
    }

    pub fn contains(&self, target: TargetId) -> bool {
        self.nodes.contains_key(target)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl Surface for Scene {
    fn property(&self, target: TargetId, property: Property) -> Option<f32> {
        self.nodes.get(target).map(|node| node.get(property))
    }

    fn set_property(&mut self, target: TargetId, property: Property, value: f32) {
        match self.nodes.get_mut(target) {
            Some(node) => node.set(property, value),
            None => {
                tracing::warn!(property = property.name(), "set_property on removed target");
            }
        }
    }
}
