//! Render-surface geometry and pixel → NDC conversion.

use glam::Vec2;

/// Bounding rectangle of the render surface in client-space pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceRect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width in pixels (> 0).
    pub width: f32,
    /// Height in pixels (> 0).
    pub height: f32,
}

impl SurfaceRect {
    /// Rectangle anchored at the client origin.
    pub fn from_size(width: f32, height: f32) -> Self {
        debug_assert!(width > 0.0 && height > 0.0);
        Self {
            left: 0.0,
            top: 0.0,
            width,
            height,
        }
    }

    /// Map client-space pixel coordinates to normalized device coordinates.
    ///
    /// The surface center maps to (0, 0), top-left to (-1, 1), bottom-right
    /// to (1, -1). Y is flipped: pixels grow downward, NDC grows upward.
    pub fn ndc_for(&self, px: f32, py: f32) -> Vec2 {
        Vec2::new(
            (px - self.left) / self.width * 2.0 - 1.0,
            -((py - self.top) / self.height) * 2.0 + 1.0,
        )
    }
}
