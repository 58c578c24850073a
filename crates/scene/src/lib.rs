#![warn(missing_docs)]
//! Scene graph snapshot model: node tree, bounding volumes, orbit camera,
//! and the ray-intersection primitive the interaction layer picks against.

mod bounds;
mod camera;
mod graph;
mod raycast;

pub use bounds::{Aabb, Bounds, Sphere};
pub use camera::OrbitCamera;
pub use graph::{BackdropInfo, NodeId, NodeKind, Scene, SceneNode, SplatMeshInfo, Transform};
pub use raycast::{Ray, RayHit};
