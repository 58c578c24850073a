#![warn(missing_docs)]
//! Deterministic scene fixtures shared by interaction tests.

use glam::Vec3;
use splatview_scene::{Aabb, Bounds, OrbitCamera, Scene, SceneNode, Transform};

/// A splat-mesh node with a bounding sphere of `radius` centered at `center`.
pub fn splat_at(name: &str, center: Vec3, radius: f32) -> SceneNode {
    SceneNode::splat_mesh(name, format!("{name}.spz"), radius)
        .with_transform(Transform::from_translation(center))
}

/// A non-target (group) node that still carries a pickable bound, for
/// occlusion and filter tests.
pub fn blocker_at(name: &str, center: Vec3, half_extent: f32) -> SceneNode {
    SceneNode::group(name)
        .with_transform(Transform::from_translation(center))
        .with_bounds(Bounds::Aabb(Aabb::from_center_size(
            Vec3::ZERO,
            Vec3::splat(half_extent * 2.0),
        )))
}

/// Wrap nodes in a "world" root group and assign ids.
pub fn scene_of(children: Vec<SceneNode>) -> Scene {
    let mut root = SceneNode::group("world");
    for child in children {
        root = root.with_child(child);
    }
    Scene::new(root)
}

/// Orbit camera at `(distance, 0, 0)` looking back at the origin, so world
/// -X is straight ahead. Aspect matches an 800×600 surface.
pub fn camera_on_x_axis(distance: f32) -> OrbitCamera {
    OrbitCamera::new(800.0 / 600.0, distance)
}

#[cfg(test)]
mod tests {
    use super::*;
    use splatview_scene::Ray;

    #[test]
    fn fixtures_compose_into_a_pickable_scene() {
        let scene = scene_of(vec![splat_at("s", Vec3::new(2.0, 0.0, 0.0), 0.5)]);
        let hits = scene.raycast(&Ray::new(Vec3::ZERO, Vec3::X));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn blockers_are_bounded_but_not_splat_meshes() {
        let scene = scene_of(vec![blocker_at("b", Vec3::new(2.0, 0.0, 0.0), 0.5)]);
        let hits = scene.raycast(&Ray::new(Vec3::ZERO, Vec3::X));
        assert_eq!(hits.len(), 1);
        assert!(!scene.node(hits[0].node).unwrap().is_splat_mesh());
    }
}
