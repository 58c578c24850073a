//! Bounding volumes and their ray intersection tests.

use glam::Vec3;

/// Bounding volume attached to a scene node, in the node's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    /// Sphere bound; the natural fit for splat clouds.
    Sphere(Sphere),
    /// Axis-aligned box bound.
    Aabb(Aabb),
}

impl Bounds {
    /// Distance along the ray to the nearest intersection, if any.
    pub fn ray_intersection(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        match self {
            Bounds::Sphere(sphere) => sphere.ray_intersection(origin, dir),
            Bounds::Aabb(aabb) => aabb.ray_intersection(origin, dir),
        }
    }
}

/// Bounding sphere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    /// Center in local space.
    pub center: Vec3,
    /// Radius (> 0).
    pub radius: f32,
}

impl Sphere {
    /// Create a sphere, asserting a positive radius in debug builds.
    pub fn new(center: Vec3, radius: f32) -> Self {
        debug_assert!(radius > 0.0);
        Self { center, radius }
    }

    /// Test if a ray intersects this sphere.
    /// Returns distance to the nearest intersection in front of the origin.
    pub fn ray_intersection(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let to_center = self.center - origin;
        let proj = to_center.dot(dir);
        let perp_sq = to_center.length_squared() - proj * proj;
        let radius_sq = self.radius * self.radius;
        if perp_sq > radius_sq {
            return None;
        }

        let half_chord = (radius_sq - perp_sq).sqrt();
        let t_near = proj - half_chord;
        let t_far = proj + half_chord;

        // Entirely behind the origin
        if t_far < 0.0 {
            return None;
        }

        // If t_near < 0, the origin is inside the sphere
        Some(if t_near < 0.0 { t_far } else { t_near })
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    /// Minimum corner.
    pub min: Vec3,
    /// Maximum corner.
    pub max: Vec3,
}

impl Aabb {
    /// Create a new AABB ensuring min <= max per axis.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y && min.z <= max.z);
        Self { min, max }
    }

    /// Create an AABB from center position and size.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half_size = size * 0.5;
        Self {
            min: center - half_size,
            max: center + half_size,
        }
    }

    /// Test if a ray intersects this AABB using the slab method.
    /// Returns distance to the nearest intersection in front of the origin.
    pub fn ray_intersection(&self, origin: Vec3, dir: Vec3) -> Option<f32> {
        let inv_dir = Vec3::new(1.0 / dir.x, 1.0 / dir.y, 1.0 / dir.z);

        let t1 = (self.min.x - origin.x) * inv_dir.x;
        let t2 = (self.max.x - origin.x) * inv_dir.x;
        let t3 = (self.min.y - origin.y) * inv_dir.y;
        let t4 = (self.max.y - origin.y) * inv_dir.y;
        let t5 = (self.min.z - origin.z) * inv_dir.z;
        let t6 = (self.max.z - origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        // Entire box behind the origin
        if tmax < 0.0 {
            return None;
        }

        if tmin > tmax {
            return None;
        }

        // If tmin < 0, the origin is inside the box
        Some(if tmin < 0.0 { tmax } else { tmin })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sphere_hit_from_outside() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0);
        let t = sphere.ray_intersection(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(t.is_some());
        assert!((t.unwrap() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn sphere_miss() {
        let sphere = Sphere::new(Vec3::new(0.0, 3.0, -5.0), 1.0);
        let t = sphere.ray_intersection(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(t.is_none());
    }

    #[test]
    fn sphere_behind_origin() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let t = sphere.ray_intersection(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert!(t.is_none());
    }

    #[test]
    fn sphere_origin_inside_returns_exit() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0);
        let t = sphere.ray_intersection(Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0));
        assert!((t.unwrap() - 2.0).abs() < 1e-4);
    }

    #[test]
    fn aabb_hit() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);
        let t = aabb.ray_intersection(Vec3::new(0.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(t.is_some());
        assert!((t.unwrap() - 1.5).abs() < 1e-3);
    }

    #[test]
    fn aabb_miss() {
        let aabb = Aabb::from_center_size(Vec3::ZERO, Vec3::ONE);
        let t = aabb.ray_intersection(Vec3::new(2.0, 0.0, 2.0), Vec3::new(0.0, 0.0, -1.0));
        assert!(t.is_none());
    }
}
