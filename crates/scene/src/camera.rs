//! Orbit camera with view and projection matrices.

use crate::raycast::Ray;
use glam::{Mat4, Vec2, Vec3};

/// Orbit camera circling a target point, as used by the viewer's controls.
#[derive(Debug, Clone)]
pub struct OrbitCamera {
    /// Point the camera orbits and looks at.
    pub target: Vec3,
    /// Orbit angle around the vertical axis, in radians.
    pub yaw: f32,
    /// Elevation angle, in radians.
    pub pitch: f32,
    /// Distance from the target.
    pub distance: f32,
    /// Field of view in radians.
    pub fov: f32,
    /// Aspect ratio (width/height).
    pub aspect: f32,
    /// Near clip plane.
    pub near: f32,
    /// Far clip plane.
    pub far: f32,
}

impl OrbitCamera {
    /// Create a camera at the given orbit distance with default angles.
    pub fn new(aspect: f32, distance: f32) -> Self {
        Self {
            target: Vec3::ZERO,
            yaw: 0.0,
            pitch: 0.0,
            distance: distance.max(0.01),
            fov: std::f32::consts::FRAC_PI_3, // 60 degrees
            aspect,
            near: 0.1,
            far: 2000.0,
        }
    }

    /// World-space camera position derived from the orbit parameters.
    pub fn position(&self) -> Vec3 {
        let (yaw_sin, yaw_cos) = self.yaw.sin_cos();
        let (pitch_sin, pitch_cos) = self.pitch.sin_cos();
        let offset = Vec3::new(yaw_cos * pitch_cos, pitch_sin, yaw_sin * pitch_cos);
        self.target + offset * self.distance
    }

    /// Build the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position(), self.target, Vec3::Y)
    }

    /// Build the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    /// Update aspect ratio (call when the surface resizes).
    pub fn set_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    /// Orbit the camera by yaw/pitch deltas.
    pub fn rotate(&mut self, yaw_delta: f32, pitch_delta: f32) {
        self.yaw += yaw_delta;
        self.pitch = (self.pitch + pitch_delta).clamp(
            -std::f32::consts::FRAC_PI_2 + 0.001,
            std::f32::consts::FRAC_PI_2 - 0.001,
        );
    }

    /// Move the camera closer to or away from the target.
    pub fn zoom(&mut self, distance_delta: f32) {
        self.distance = (self.distance + distance_delta).max(0.01);
    }

    /// Cast a world-space ray through a normalized-device-coordinate point.
    pub fn ray_through_ndc(&self, ndc: Vec2) -> Ray {
        // Unproject the NDC point into view space, then into world space
        let ray_clip = Vec3::new(ndc.x, ndc.y, -1.0);
        let inv_proj = self.projection_matrix().inverse();
        let ray_eye = inv_proj.project_point3(ray_clip);
        // Rescale onto the z = -1 plane so the direction still passes through
        // the unprojected point; overwriting z alone would squash the frustum.
        let ray_eye = Vec3::new(ray_eye.x / -ray_eye.z, ray_eye.y / -ray_eye.z, -1.0);

        let inv_view = self.view_matrix().inverse();
        let direction = inv_view.transform_vector3(ray_eye).normalize();
        let origin = inv_view.transform_point3(Vec3::ZERO);

        Ray::new(origin, direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_orbit_position_is_on_positive_x() {
        let camera = OrbitCamera::new(16.0 / 9.0, 5.0);
        let pos = camera.position();
        assert!((pos.x - 5.0).abs() < 1e-4);
        assert!(pos.y.abs() < 1e-4);
        assert!(pos.z.abs() < 1e-4);
    }

    #[test]
    fn center_ndc_ray_points_at_target() {
        let camera = OrbitCamera::new(4.0 / 3.0, 5.0);
        let ray = camera.ray_through_ndc(Vec2::ZERO);

        let to_target = (camera.target - camera.position()).normalize();
        assert!((ray.direction - to_target).length() < 1e-4);
        assert!((ray.origin - camera.position()).length() < 1e-4);
    }

    #[test]
    fn edge_ray_angle_matches_field_of_view() {
        // NDC y = 1 is the top of the frustum: half the vertical fov off axis.
        let camera = OrbitCamera::new(1.0, 5.0);
        let center = camera.ray_through_ndc(Vec2::ZERO);
        let top = camera.ray_through_ndc(Vec2::new(0.0, 1.0));
        let angle = center.direction.dot(top.direction).acos();
        assert!((angle - camera.fov / 2.0).abs() < 1e-3);
    }

    #[test]
    fn horizontal_edge_ray_angle_scales_with_aspect() {
        let camera = OrbitCamera::new(2.0, 5.0);
        let center = camera.ray_through_ndc(Vec2::ZERO);
        let right = camera.ray_through_ndc(Vec2::new(1.0, 0.0));
        let angle = center.direction.dot(right.direction).acos();
        let expected = ((camera.fov / 2.0).tan() * camera.aspect).atan();
        assert!((angle - expected).abs() < 1e-3);
    }

    #[test]
    fn off_axis_ray_misses_a_small_centered_target() {
        // Camera 5 out, sphere radius 0.5 at the target: the corner ray of a
        // 60-degree frustum passes well wide of it.
        let camera = OrbitCamera::new(4.0 / 3.0, 5.0);
        let corner = camera.ray_through_ndc(Vec2::new(-1.0, 1.0));
        let to_target = camera.target - corner.origin;
        let closest = to_target - corner.direction * to_target.dot(corner.direction);
        assert!(closest.length() > 0.5);
    }

    #[test]
    fn pitch_clamps_short_of_vertical() {
        let mut camera = OrbitCamera::new(1.0, 5.0);
        camera.rotate(0.0, std::f32::consts::PI);
        assert!(camera.pitch < std::f32::consts::FRAC_PI_2);

        camera.rotate(0.0, -std::f32::consts::PI * 2.0);
        assert!(camera.pitch > -std::f32::consts::FRAC_PI_2);
    }
}
