//! The interaction router.

use crate::event::{Hit, HitKind, PointerEvent, PointerKind, XrInputEvent};
use crate::surface::SurfaceRect;
use crate::xr::XrSessionState;
use splatview_scene::{OrbitCamera, Ray, Scene, SceneNode};
use std::cell::Cell;
use std::rc::Rc;
use tracing::{debug, trace};

/// Minimum interval between processed move events. Moves arriving inside the
/// window are discarded, not queued.
pub const MOVE_THROTTLE_MS: f64 = 16.0;

/// Predicate selecting which scene nodes are eligible hit targets.
pub type TargetFilter = Box<dyn Fn(&SceneNode) -> bool>;

/// Default target filter: splat-mesh nodes only.
pub fn splat_mesh_filter(node: &SceneNode) -> bool {
    node.is_splat_mesh()
}

/// Errors the router raises eagerly. Everything else degrades to no-hit.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum RouterError {
    /// `attach` was called while a previous subscription is still live.
    /// Allowing it would double-register listeners and double-deliver hits.
    #[error("router is already attached; release the previous subscription first")]
    AlreadyAttached,
}

// State shared between the router and its subscription so that releasing the
// subscription stops processing immediately.
#[derive(Debug, Default)]
struct RouterState {
    attached: Cell<bool>,
    last_move_ms: Cell<Option<f64>>,
}

/// Routes pointer and XR input to ray hits against filtered scene nodes.
///
/// All throttle and lifecycle state is owned by the instance; independent
/// routers never interfere with each other.
pub struct InteractionRouter {
    surface: Cell<SurfaceRect>,
    session: Rc<XrSessionState>,
    filter: TargetFilter,
    state: Rc<RouterState>,
}

impl InteractionRouter {
    /// Create a router over the given surface, session state, and target
    /// filter. The router starts detached; call [`attach`](Self::attach).
    pub fn new(surface: SurfaceRect, session: Rc<XrSessionState>, filter: TargetFilter) -> Self {
        Self {
            surface: Cell::new(surface),
            session,
            filter,
            state: Rc::new(RouterState::default()),
        }
    }

    /// Create a router targeting splat meshes.
    pub fn with_default_filter(surface: SurfaceRect, session: Rc<XrSessionState>) -> Self {
        Self::new(surface, session, Box::new(splat_mesh_filter))
    }

    /// Begin processing events. Fails fast if a previous subscription has not
    /// been released. The returned subscription detaches on `release()` and
    /// on drop, on every exit path.
    pub fn attach(&self) -> Result<RouterSubscription, RouterError> {
        if self.state.attached.replace(true) {
            return Err(RouterError::AlreadyAttached);
        }
        self.state.last_move_ms.set(None);
        debug!("interaction router attached");
        Ok(RouterSubscription {
            state: Rc::clone(&self.state),
            released: Cell::new(false),
        })
    }

    /// Update the surface rectangle after a resize.
    pub fn set_surface(&self, surface: SurfaceRect) {
        self.surface.set(surface);
    }

    /// Handle a screen-space pointer event.
    ///
    /// Returns the nearest filtered hit, or `None` when detached, when an XR
    /// session holds the input, when a move falls inside the throttle window,
    /// or when nothing qualifying intersects the ray.
    pub fn handle_pointer(
        &self,
        scene: &Scene,
        camera: &OrbitCamera,
        event: &PointerEvent,
    ) -> Option<Hit> {
        if !self.state.attached.get() {
            return None;
        }
        // Screen input is ignored while an immersive session owns the devices.
        if self.session.is_active() {
            trace!(kind = ?event.kind, "pointer event dropped: XR session active");
            return None;
        }

        if event.kind == PointerKind::Move {
            if let Some(last) = self.state.last_move_ms.get() {
                if event.time_ms - last < MOVE_THROTTLE_MS {
                    trace!(time_ms = event.time_ms, "move event throttled");
                    return None;
                }
            }
            self.state.last_move_ms.set(Some(event.time_ms));
        }

        let ndc = self.surface.get().ndc_for(event.x, event.y);
        let ray = camera.ray_through_ndc(ndc);
        self.pick(scene, &ray, HitKind::Pointer(event.kind))
    }

    /// Handle an XR controller event.
    ///
    /// Missing session, ray space, reference space, or pose are precondition
    /// failures answered with `None`, never errors.
    pub fn handle_xr(&self, scene: &Scene, event: &XrInputEvent) -> Option<Hit> {
        if !self.state.attached.get() {
            return None;
        }
        if !self.session.is_active() {
            trace!(kind = ?event.kind, "XR event dropped: no active session");
            return None;
        }

        let ray_space = event.source.as_ref()?.ray_space?;
        let reference = self.session.reference_space()?;
        let pose = event.frame.as_ref()?.pose(ray_space, reference)?;

        let ray = Ray::new(pose.position, pose.aim_direction());
        self.pick(scene, &ray, HitKind::Xr(event.kind))
    }

    // Nearest hit whose node passes the filter. The filter runs over the
    // sorted hit list, so a nearer non-target never occludes a farther target.
    fn pick(&self, scene: &Scene, ray: &Ray, kind: HitKind) -> Option<Hit> {
        let hits = scene.raycast(ray);
        let hit = hits.iter().find_map(|candidate| {
            let node = scene.node(candidate.node)?;
            (self.filter)(node).then_some(Hit {
                kind,
                node: candidate.node,
                point: candidate.point,
                distance: candidate.distance,
            })
        });

        match &hit {
            Some(hit) => debug!(
                kind = ?hit.kind,
                node = %hit.node,
                point = ?hit.point,
                distance = hit.distance,
                "hit"
            ),
            None => trace!(kind = ?kind, "no hit"),
        }
        hit
    }
}

/// Capability returned by [`InteractionRouter::attach`]. Releasing it (or
/// dropping it) detaches the router; a second release is a no-op. Only the
/// attachment this handle owns is cleared, so a stale handle released after
/// the router re-attaches never touches the live subscription.
#[derive(Debug)]
pub struct RouterSubscription {
    state: Rc<RouterState>,
    released: Cell<bool>,
}

impl RouterSubscription {
    /// Detach the router. Idempotent.
    pub fn release(&self) {
        if self.released.replace(true) {
            return;
        }
        if self.state.attached.replace(false) {
            debug!("interaction router detached");
        }
    }
}

impl Drop for RouterSubscription {
    fn drop(&mut self) {
        self.release();
    }
}
