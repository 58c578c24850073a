//! Recursive ray intersection against the scene tree.

use crate::graph::{NodeId, Scene, SceneNode};
use glam::{Mat4, Vec3};

/// A world-space ray.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// Origin point.
    pub origin: Vec3,
    /// Normalized direction.
    pub direction: Vec3,
}

impl Ray {
    /// Create a ray, normalizing the direction.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }
}

/// One intersection between a ray and a bounded scene node.
#[derive(Debug, Clone, Copy)]
pub struct RayHit {
    /// The intersected node.
    pub node: NodeId,
    /// World-space intersection point.
    pub point: Vec3,
    /// Distance from the ray origin to the hit point.
    pub distance: f32,
}

impl Scene {
    /// Intersect a ray against every bounded node in the tree, descendants
    /// included, sorted by ascending distance. The sort is stable, so equal
    /// distances keep traversal order.
    pub fn raycast(&self, ray: &Ray) -> Vec<RayHit> {
        let mut hits = Vec::new();
        intersect_node(self.root(), Mat4::IDENTITY, ray, &mut hits);
        hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        hits
    }
}

fn intersect_node(node: &SceneNode, parent: Mat4, ray: &Ray, hits: &mut Vec<RayHit>) {
    let world = parent * node.transform.to_matrix();

    if let Some(bounds) = &node.bounds {
        // Intersect in node-local space, then map the hit point back out.
        let inv_world = world.inverse();
        let local_origin = inv_world.transform_point3(ray.origin);
        let local_dir = inv_world.transform_vector3(ray.direction).normalize();

        if let Some(local_t) = bounds.ray_intersection(local_origin, local_dir) {
            let local_point = local_origin + local_dir * local_t;
            let point = world.transform_point3(local_point);
            let distance = (point - ray.origin).dot(ray.direction);
            if distance >= 0.0 {
                hits.push(RayHit {
                    node: node.id,
                    point,
                    distance,
                });
            }
        }
    }

    for child in &node.children {
        intersect_node(child, world, ray, hits);
    }
}
