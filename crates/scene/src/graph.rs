//! Scene node tree.
//!
//! The renderer owns the authoritative scene; this model is the snapshot the
//! interaction layer reads. Nodes may come and go between input events, so
//! nothing here is cached across lookups.

use crate::bounds::{Bounds, Sphere};
use glam::{Mat4, Quat, Vec3};

/// Identity of a node within its scene, assigned in depth-first order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

/// Local transform (translation, rotation, scale).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Translation relative to the parent.
    pub translation: Vec3,
    /// Rotation relative to the parent.
    pub rotation: Quat,
    /// Per-axis scale.
    pub scale: Vec3,
}

impl Transform {
    /// The identity transform.
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    /// Transform with only a translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Transform with only a rotation.
    pub fn from_rotation(rotation: Quat) -> Self {
        Self {
            rotation,
            ..Self::IDENTITY
        }
    }

    /// Compose into a local-to-parent matrix.
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Reference to an external splat asset rendered at this node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplatMeshInfo {
    /// URL or path of the splat asset (.spz, .ply, zipped bundle).
    pub source: String,
}

/// Panoramic backdrop rendered behind everything else.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackdropInfo {
    /// Equirectangular image source.
    pub image: String,
}

/// What a scene node represents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Pure grouping/transform node.
    Group,
    /// A renderable splat mesh; the default interaction target.
    SplatMesh(SplatMeshInfo),
    /// Panoramic background; never an interaction target.
    Backdrop(BackdropInfo),
}

/// One node in the scene tree.
#[derive(Debug, Clone)]
pub struct SceneNode {
    /// Identity within the owning scene; assigned by [`Scene::new`].
    pub id: NodeId,
    /// Human-readable name for logs.
    pub name: String,
    /// Local transform relative to the parent.
    pub transform: Transform,
    /// Node payload.
    pub kind: NodeKind,
    /// Draw-order bias; backdrops render first with a negative value.
    pub render_order: i32,
    /// Optional pickable bound in local space. Nodes without bounds are
    /// traversed but never hit.
    pub bounds: Option<Bounds>,
    /// Child nodes.
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        Self {
            id: NodeId(0),
            name: name.into(),
            transform: Transform::IDENTITY,
            kind,
            render_order: 0,
            bounds: None,
            children: Vec::new(),
        }
    }

    /// Create a grouping node.
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    /// Create a splat-mesh node with a bounding sphere of `radius` at the
    /// node origin.
    pub fn splat_mesh(name: impl Into<String>, source: impl Into<String>, radius: f32) -> Self {
        let mut node = Self::new(
            name,
            NodeKind::SplatMesh(SplatMeshInfo {
                source: source.into(),
            }),
        );
        node.bounds = Some(Bounds::Sphere(Sphere::new(Vec3::ZERO, radius)));
        node
    }

    /// Create a backdrop node. Backdrops carry no bounds and render first.
    pub fn backdrop(name: impl Into<String>, image: impl Into<String>) -> Self {
        let mut node = Self::new(
            name,
            NodeKind::Backdrop(BackdropInfo {
                image: image.into(),
            }),
        );
        node.render_order = -1;
        node
    }

    /// Set the local transform.
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    /// Set the pickable bound.
    pub fn with_bounds(mut self, bounds: Bounds) -> Self {
        self.bounds = Some(bounds);
        self
    }

    /// Set the render order.
    pub fn with_render_order(mut self, render_order: i32) -> Self {
        self.render_order = render_order;
        self
    }

    /// Append a child node.
    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    /// Whether this node is a splat mesh.
    pub fn is_splat_mesh(&self) -> bool {
        matches!(self.kind, NodeKind::SplatMesh(_))
    }
}

/// A scene tree with stable depth-first node ids.
#[derive(Debug, Clone)]
pub struct Scene {
    root: SceneNode,
}

impl Scene {
    /// Take ownership of a node tree and assign ids in depth-first order
    /// (the root is `node#0`).
    pub fn new(mut root: SceneNode) -> Self {
        let mut next = 0u32;
        assign_ids(&mut root, &mut next);
        Self { root }
    }

    /// The root node.
    pub fn root(&self) -> &SceneNode {
        &self.root
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&SceneNode> {
        find(&self.root, id)
    }

    /// Look up a node by id for mutation (used by the demo to spin meshes).
    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut SceneNode> {
        find_mut(&mut self.root, id)
    }

    /// Id of the first splat-mesh node in depth-first order, if any.
    pub fn first_splat_mesh(&self) -> Option<NodeId> {
        fn walk(node: &SceneNode) -> Option<NodeId> {
            if node.is_splat_mesh() {
                return Some(node.id);
            }
            node.children.iter().find_map(walk)
        }
        walk(&self.root)
    }
}

fn assign_ids(node: &mut SceneNode, next: &mut u32) {
    node.id = NodeId(*next);
    *next += 1;
    for child in &mut node.children {
        assign_ids(child, next);
    }
}

fn find(node: &SceneNode, id: NodeId) -> Option<&SceneNode> {
    if node.id == id {
        return Some(node);
    }
    node.children.iter().find_map(|child| find(child, id))
}

fn find_mut(node: &mut SceneNode, id: NodeId) -> Option<&mut SceneNode> {
    if node.id == id {
        return Some(node);
    }
    node.children
        .iter_mut()
        .find_map(|child| find_mut(child, id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_scene() -> Scene {
        Scene::new(
            SceneNode::group("world")
                .with_child(
                    SceneNode::group("orientation")
                        .with_child(SceneNode::splat_mesh("butterfly", "butterfly.spz", 1.0)),
                )
                .with_child(SceneNode::backdrop("pano", "default360.jpg")),
        )
    }

    #[test]
    fn ids_follow_depth_first_order() {
        let scene = sample_scene();
        assert_eq!(scene.root().id, NodeId(0));
        assert_eq!(scene.node(NodeId(2)).unwrap().name, "butterfly");
        assert_eq!(scene.node(NodeId(3)).unwrap().name, "pano");
        assert!(scene.node(NodeId(4)).is_none());
    }

    #[test]
    fn first_splat_mesh_skips_groups_and_backdrops() {
        let scene = sample_scene();
        let id = scene.first_splat_mesh().unwrap();
        assert!(scene.node(id).unwrap().is_splat_mesh());
    }

    #[test]
    fn node_mut_reaches_nested_nodes() {
        let mut scene = sample_scene();
        let id = scene.first_splat_mesh().unwrap();
        scene.node_mut(id).unwrap().transform.translation = Vec3::new(0.0, 1.0, 0.0);
        assert_eq!(
            scene.node(id).unwrap().transform.translation,
            Vec3::new(0.0, 1.0, 0.0)
        );
    }

    #[test]
    fn backdrop_has_no_bounds_and_renders_first() {
        let scene = sample_scene();
        let pano = scene.node(NodeId(3)).unwrap();
        assert!(pano.bounds.is_none());
        assert_eq!(pano.render_order, -1);
    }
}
