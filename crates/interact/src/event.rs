//! Input event model.
//!
//! Event kinds are closed enums so every variant is handled at compile time;
//! payloads carry exactly what the router needs and nothing else. Events are
//! immutable and consumed once.

use crate::xr::{XrFrame, XrSpaceId};
use glam::Vec3;
use splatview_scene::NodeId;

/// Semantic kind of a screen-space pointer event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// Pointer pressed over the surface.
    Down,
    /// Pointer released.
    Up,
    /// Pointer moved (throttled to one per 16 ms window).
    Move,
    /// Pointer entered the surface.
    Enter,
    /// Pointer left the surface.
    Leave,
    /// Press-and-release completed.
    Click,
}

/// A screen-space pointer event over the render surface.
#[derive(Debug, Clone, Copy)]
pub struct PointerEvent {
    /// Event kind.
    pub kind: PointerKind,
    /// Client-space x coordinate in pixels.
    pub x: f32,
    /// Client-space y coordinate in pixels.
    pub y: f32,
    /// Event timestamp in milliseconds on a monotonic clock; the move
    /// throttle compares these.
    pub time_ms: f64,
}

impl PointerEvent {
    /// Construct a pointer event.
    pub fn new(kind: PointerKind, x: f32, y: f32, time_ms: f64) -> Self {
        Self { kind, x, y, time_ms }
    }
}

/// Semantic kind of an XR controller event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum XrKind {
    /// Primary action completed.
    Select,
    /// Primary action began.
    SelectStart,
    /// Primary action ended.
    SelectEnd,
    /// Squeeze action completed.
    Squeeze,
    /// Squeeze action began.
    SqueezeStart,
    /// Squeeze action ended.
    SqueezeEnd,
}

/// The tracked input device an XR event originated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct XrInputSource {
    /// The device's ray space, if the platform exposes one. Events without a
    /// ray space cannot be hit-tested and degrade to no-hit.
    pub ray_space: Option<XrSpaceId>,
}

/// An XR controller event with the frame it was delivered in.
///
/// Missing `source` or `frame` payloads are expected platform jitter, not
/// errors; the router answers them with `None`.
#[derive(Debug, Clone)]
pub struct XrInputEvent {
    /// Event kind.
    pub kind: XrKind,
    /// Originating input device, if known.
    pub source: Option<XrInputSource>,
    /// Pose snapshot for the event's animation frame, if available.
    pub frame: Option<XrFrame>,
}

/// Which input path produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitKind {
    /// Screen-space pointer hit.
    Pointer(PointerKind),
    /// XR controller hit.
    Xr(XrKind),
}

/// A successful ray hit against a target node.
#[derive(Debug, Clone, Copy)]
pub struct Hit {
    /// The action that produced the hit.
    pub kind: HitKind,
    /// The intersected target node.
    pub node: NodeId,
    /// World-space intersection point.
    pub point: Vec3,
    /// Distance from the ray origin.
    pub distance: f32,
}
