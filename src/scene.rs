//! Retained scene graph: stand-in nodes, the shared shadow surface, the
//! fixed camera, and the lights.
//!
//! The scene is built once per overlay. Nodes are added and removed as
//! pointer contacts come and go; the renderer reads them back in insertion
//! order. Opacity is applied recursively: setting a node's opacity scales
//! every part by its own base opacity, so a translucent part stays
//! proportionally translucent while the node fades.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use std::collections::HashMap;

use crate::config::{DirectionalConfig, LayerConfig, LightConfig};
use crate::geom::{Camera, Euler, Vec3, Viewport};

/// Handle to a node owned by a [`SceneGraph`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(u64);

/// What a node stands in for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Mouse contact: tracked but draws nothing.
    Placeholder,
    /// Touch contact: a translucent flat disc.
    Marker,
    /// Pen contact: body cylinder plus conical tip.
    Stylus,
    /// Ground plane that receives stylus shadows.
    ShadowSurface,
}

/// Geometry of one part, in the node's local frame.
///
/// Cylinders and cones run along the local z axis between two z values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// Flat disc in the local xy plane, centered on the origin.
    Disc { radius: f64 },
    Cylinder { radius: f64, from_z: f64, to_z: f64 },
    /// Cone with its point at `apex_z` and its round base at `base_z`.
    Cone { radius: f64, apex_z: f64, base_z: f64 },
    /// Unbounded plane through the origin facing +z.
    Plane,
}

/// A drawable piece of a node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Part {
    pub shape: Shape,
    /// Packed `0xRRGGBB` color.
    pub color: u32,
    /// Opacity of this part when its node is fully visible.
    pub base_opacity: f64,
    /// Current effective opacity.
    pub opacity: f64,
}

impl Part {
    #[must_use]
    pub fn new(shape: Shape, color: u32, base_opacity: f64) -> Self {
        Self { shape, color, base_opacity, opacity: base_opacity }
    }
}

/// A renderable object in the scene.
#[derive(Debug, Clone, PartialEq)]
pub struct Node {
    pub kind: NodeKind,
    pub parts: Vec<Part>,
    pub position: Vec3,
    pub rotation: Euler,
    /// Node-level opacity last applied through [`SceneGraph::set_opacity`].
    pub opacity: f64,
}

impl Node {
    fn with_parts(kind: NodeKind, parts: Vec<Part>, rotation: Euler) -> Self {
        Self { kind, parts, position: Vec3::default(), rotation, opacity: 1.0 }
    }

    /// An invisible stand-in with no parts.
    #[must_use]
    pub fn placeholder() -> Self {
        Self::with_parts(NodeKind::Placeholder, Vec::new(), Euler::default())
    }

    /// A translucent flat disc.
    #[must_use]
    pub fn marker(cfg: &LayerConfig) -> Self {
        let disc = Part::new(Shape::Disc { radius: cfg.marker_radius }, cfg.marker_color, cfg.marker_opacity);
        Self::with_parts(NodeKind::Marker, vec![disc], Euler::default())
    }

    /// A two-part stylus: the tip's point sits on the node origin and the
    /// body extends behind it along local +z. The default orientation leans
    /// the body away from the view axis along the fixed diagonal yaw.
    #[must_use]
    pub fn stylus(cfg: &LayerConfig) -> Self {
        let tip = Part::new(
            Shape::Cone { radius: cfg.stylus_radius, apex_z: 0.0, base_z: cfg.tip_length },
            cfg.stylus_color,
            1.0,
        );
        let body = Part::new(
            Shape::Cylinder {
                radius: cfg.stylus_radius,
                from_z: cfg.tip_length,
                to_z: cfg.tip_length + cfg.stylus_length,
            },
            cfg.stylus_color,
            1.0,
        );
        Self::with_parts(NodeKind::Stylus, vec![body, tip], Self::stylus_default_rotation())
    }

    /// Orientation of a stylus before any tilt has been reported.
    #[must_use]
    pub fn stylus_default_rotation() -> Euler {
        Euler::new(crate::consts::STYLUS_LEAN, 0.0, crate::consts::STYLUS_YAW)
    }

    fn shadow_surface(strength: f64) -> Self {
        let plane = Part::new(Shape::Plane, 0, 1.0);
        let mut node = Self::with_parts(NodeKind::ShadowSurface, vec![plane], Euler::default());
        node.apply_opacity(strength);
        node
    }

    /// Whether any part would draw at all.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.parts.iter().any(|p| p.opacity > 0.0)
    }

    /// Scene-space position of a point on the local z axis.
    #[must_use]
    pub fn axis_point(&self, local_z: f64) -> Vec3 {
        self.position.add(self.rotation.rotate(Vec3::new(0.0, 0.0, local_z)))
    }

    fn apply_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
        for part in &mut self.parts {
            part.opacity = part.base_opacity * opacity;
        }
    }
}

/// Scene lighting, fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lights {
    pub ambient: LightConfig,
    pub directional: DirectionalConfig,
}

/// All renderable state of one overlay.
pub struct SceneGraph {
    nodes: HashMap<NodeId, Node>,
    order: Vec<NodeId>,
    next_id: u64,
    camera: Camera,
    lights: Lights,
    shadow: NodeId,
}

impl SceneGraph {
    /// Build the camera, lights, and shadow surface for a viewport.
    #[must_use]
    pub fn new(viewport: Viewport, cfg: &LayerConfig) -> Self {
        let mut scene = Self {
            nodes: HashMap::new(),
            order: Vec::new(),
            next_id: 0,
            camera: Camera::for_viewport(viewport),
            lights: Lights { ambient: cfg.ambient, directional: cfg.directional },
            shadow: NodeId(0),
        };
        scene.shadow = scene.add(Node::shadow_surface(cfg.shadow_opacity));
        scene
    }

    /// Add a node and return its handle.
    pub fn add(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, node);
        self.order.push(id);
        id
    }

    /// Remove a node, returning it if it was present.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        let node = self.nodes.remove(&id)?;
        self.order.retain(|other| *other != id);
        Some(node)
    }

    #[must_use]
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    #[must_use]
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Number of nodes, including the shadow surface.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Set a node's position. Returns false if the node doesn't exist.
    pub fn set_position(&mut self, id: NodeId, position: Vec3) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.position = position;
        true
    }

    /// Set a node's depth, keeping x and y. Returns false if missing.
    pub fn set_depth(&mut self, id: NodeId, z: f64) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.position.z = z;
        true
    }

    /// Set a node's orientation. Returns false if the node doesn't exist.
    pub fn set_rotation(&mut self, id: NodeId, rotation: Euler) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.rotation = rotation;
        true
    }

    /// Apply opacity to every part of a node. Returns false if missing.
    pub fn set_opacity(&mut self, id: NodeId, opacity: f64) -> bool {
        let Some(node) = self.nodes.get_mut(&id) else {
            return false;
        };
        node.apply_opacity(opacity.clamp(0.0, 1.0));
        true
    }

    /// Nodes in insertion order (draw order).
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.order.iter().filter_map(|id| self.nodes.get(id).map(|node| (*id, node)))
    }

    /// The shared shadow-receiving surface.
    #[must_use]
    pub fn shadow_surface(&self) -> NodeId {
        self.shadow
    }

    #[must_use]
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    #[must_use]
    pub fn lights(&self) -> &Lights {
        &self.lights
    }

    /// Rebuild the camera for a resized viewport.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        self.camera = Camera::for_viewport(viewport);
    }
}
