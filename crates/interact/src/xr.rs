//! XR session state and pose plumbing.
//!
//! Mirrors the shape of the platform XR layer the viewer runs against: a
//! level-triggered session-active flag, one established reference space, and
//! per-frame pose lookups keyed by (ray space, reference space). Pose
//! unavailability is routine (tracking loss, jitter) and never an error.

use glam::{Quat, Vec3};
use std::cell::Cell;
use std::collections::HashMap;

/// Opaque handle for an XR coordinate space (reference space or an input
/// device's ray space).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct XrSpaceId(pub u32);

/// A tracked pose relative to some reference space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct XrPose {
    /// Position of the device.
    pub position: Vec3,
    /// Orientation of the device. Device-forward is local -Z.
    pub orientation: Quat,
}

impl XrPose {
    /// World-space aim direction: the pose orientation applied to the
    /// device-forward axis, normalized.
    pub fn aim_direction(&self) -> Vec3 {
        (self.orientation * Vec3::NEG_Z).normalize()
    }
}

/// Pose snapshot for one animation frame.
#[derive(Debug, Clone, Default)]
pub struct XrFrame {
    poses: HashMap<(XrSpaceId, XrSpaceId), XrPose>,
}

impl XrFrame {
    /// Empty frame with no poses (all lookups fail).
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the pose of `ray_space` relative to `reference`.
    pub fn set_pose(&mut self, ray_space: XrSpaceId, reference: XrSpaceId, pose: XrPose) {
        self.poses.insert((ray_space, reference), pose);
    }

    /// Look up the pose of `ray_space` relative to `reference`, if tracked
    /// this frame.
    pub fn pose(&self, ray_space: XrSpaceId, reference: XrSpaceId) -> Option<XrPose> {
        self.poses.get(&(ray_space, reference)).copied()
    }
}

/// Live XR session state shared between the platform layer and the router.
///
/// Single-threaded by design (all input handling runs on the event-dispatch
/// thread), so plain `Cell`s suffice. Share via `Rc`.
#[derive(Debug, Default)]
pub struct XrSessionState {
    active: Cell<bool>,
    reference_space: Cell<Option<XrSpaceId>>,
}

impl XrSessionState {
    /// New inactive session state with no reference space.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an immersive session is currently presenting.
    pub fn is_active(&self) -> bool {
        self.active.get()
    }

    /// Flip the session-active flag.
    pub fn set_active(&self, active: bool) {
        self.active.set(active);
    }

    /// The established reference space, if any.
    pub fn reference_space(&self) -> Option<XrSpaceId> {
        self.reference_space.get()
    }

    /// Establish (or clear) the reference space.
    pub fn set_reference_space(&self, space: Option<XrSpaceId>) {
        self.reference_space.set(space);
    }
}
