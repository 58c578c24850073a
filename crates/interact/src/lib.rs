#![warn(missing_docs)]
//! Interaction routing: translates pointer and XR controller input into hit
//! notifications against the splat scene.
//!
//! The router is the only stateful piece: it owns the move-throttle timestamp
//! and the attached flag, both scoped to an [`InteractionRouter`] instance and
//! bounded by its [`RouterSubscription`]. Screen and XR input are mutually
//! exclusive; whichever mode is off yields silent no-hits, never errors.

mod event;
mod router;
mod surface;
mod xr;

pub use event::{Hit, HitKind, PointerEvent, PointerKind, XrInputEvent, XrInputSource, XrKind};
pub use router::{
    splat_mesh_filter, InteractionRouter, RouterError, RouterSubscription, TargetFilter,
    MOVE_THROTTLE_MS,
};
pub use surface::SurfaceRect;
pub use xr::{XrFrame, XrPose, XrSessionState, XrSpaceId};
