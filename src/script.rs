//! Scripted input playback for headless runs.
//!
//! A script is a JSON list of timestamped steps replayed through the router
//! in order. XR steps manage the simulated session state so mode-exclusivity
//! behaves exactly as it does in a live session.

use glam::{Quat, Vec3};
use serde::Deserialize;
use splatview_interact::{
    InteractionRouter, PointerEvent, PointerKind, XrFrame, XrInputEvent, XrInputSource, XrKind,
    XrPose, XrSessionState, XrSpaceId,
};
use splatview_scene::{OrbitCamera, Scene};
use std::rc::Rc;
use std::{fs, path::Path};
use tracing::info;

/// Reference space the simulated session establishes.
pub const REFERENCE_SPACE: XrSpaceId = XrSpaceId(0);
/// Ray space of the simulated controller.
pub const CONTROLLER_RAY_SPACE: XrSpaceId = XrSpaceId(1);

#[derive(Debug, Deserialize)]
struct ScriptFile {
    steps: Vec<ScriptStep>,
}

#[derive(Debug, Clone, Deserialize)]
struct ScriptStep {
    at_ms: f64,
    #[serde(flatten)]
    event: ScriptEvent,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "event", rename_all = "kebab-case")]
enum ScriptEvent {
    PointerDown { x: f32, y: f32 },
    PointerUp { x: f32, y: f32 },
    PointerMove { x: f32, y: f32 },
    PointerEnter { x: f32, y: f32 },
    PointerLeave { x: f32, y: f32 },
    Click { x: f32, y: f32 },
    XrSessionStart,
    XrSessionEnd,
    XrSelect { position: [f32; 3], orientation: [f32; 4] },
    XrSelectStart { position: [f32; 3], orientation: [f32; 4] },
    XrSelectEnd { position: [f32; 3], orientation: [f32; 4] },
    XrSqueeze { position: [f32; 3], orientation: [f32; 4] },
    XrSqueezeStart { position: [f32; 3], orientation: [f32; 4] },
    XrSqueezeEnd { position: [f32; 3], orientation: [f32; 4] },
}

/// Totals reported after a playback run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackSummary {
    /// Steps replayed (session toggles included).
    pub events: usize,
    /// Steps that produced a hit.
    pub hits: usize,
}

/// Replays a script through an attached router.
pub struct ScriptPlayer {
    steps: Vec<ScriptStep>,
}

impl ScriptPlayer {
    pub fn from_path(path: &Path) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    pub fn from_json(json: &str) -> anyhow::Result<Self> {
        let file: ScriptFile = serde_json::from_str(json)?;
        if file.steps.is_empty() {
            anyhow::bail!("input script contains no steps");
        }
        Ok(Self { steps: file.steps })
    }

    /// Replay every step in order.
    pub fn play(
        &self,
        router: &InteractionRouter,
        scene: &Scene,
        camera: &OrbitCamera,
        session: &Rc<XrSessionState>,
    ) -> PlaybackSummary {
        let mut hits = 0usize;
        for step in &self.steps {
            let hit = match &step.event {
                ScriptEvent::PointerDown { x, y } => {
                    pointer(router, scene, camera, PointerKind::Down, *x, *y, step.at_ms)
                }
                ScriptEvent::PointerUp { x, y } => {
                    pointer(router, scene, camera, PointerKind::Up, *x, *y, step.at_ms)
                }
                ScriptEvent::PointerMove { x, y } => {
                    pointer(router, scene, camera, PointerKind::Move, *x, *y, step.at_ms)
                }
                ScriptEvent::PointerEnter { x, y } => {
                    pointer(router, scene, camera, PointerKind::Enter, *x, *y, step.at_ms)
                }
                ScriptEvent::PointerLeave { x, y } => {
                    pointer(router, scene, camera, PointerKind::Leave, *x, *y, step.at_ms)
                }
                ScriptEvent::Click { x, y } => {
                    pointer(router, scene, camera, PointerKind::Click, *x, *y, step.at_ms)
                }
                ScriptEvent::XrSessionStart => {
                    session.set_active(true);
                    session.set_reference_space(Some(REFERENCE_SPACE));
                    false
                }
                ScriptEvent::XrSessionEnd => {
                    session.set_active(false);
                    session.set_reference_space(None);
                    false
                }
                ScriptEvent::XrSelect { position, orientation } => {
                    xr(router, scene, XrKind::Select, *position, *orientation)
                }
                ScriptEvent::XrSelectStart { position, orientation } => {
                    xr(router, scene, XrKind::SelectStart, *position, *orientation)
                }
                ScriptEvent::XrSelectEnd { position, orientation } => {
                    xr(router, scene, XrKind::SelectEnd, *position, *orientation)
                }
                ScriptEvent::XrSqueeze { position, orientation } => {
                    xr(router, scene, XrKind::Squeeze, *position, *orientation)
                }
                ScriptEvent::XrSqueezeStart { position, orientation } => {
                    xr(router, scene, XrKind::SqueezeStart, *position, *orientation)
                }
                ScriptEvent::XrSqueezeEnd { position, orientation } => {
                    xr(router, scene, XrKind::SqueezeEnd, *position, *orientation)
                }
            };
            if hit {
                hits += 1;
            }
        }
        PlaybackSummary {
            events: self.steps.len(),
            hits,
        }
    }
}

fn pointer(
    router: &InteractionRouter,
    scene: &Scene,
    camera: &OrbitCamera,
    kind: PointerKind,
    x: f32,
    y: f32,
    time_ms: f64,
) -> bool {
    let event = PointerEvent::new(kind, x, y, time_ms);
    match router.handle_pointer(scene, camera, &event) {
        Some(hit) => {
            info!(kind = ?hit.kind, node = %hit.node, point = ?hit.point, "scripted pointer hit");
            true
        }
        None => false,
    }
}

fn xr(
    router: &InteractionRouter,
    scene: &Scene,
    kind: XrKind,
    position: [f32; 3],
    orientation: [f32; 4],
) -> bool {
    let mut frame = XrFrame::new();
    frame.set_pose(
        CONTROLLER_RAY_SPACE,
        REFERENCE_SPACE,
        XrPose {
            position: Vec3::from_array(position),
            orientation: Quat::from_array(orientation),
        },
    );
    let event = XrInputEvent {
        kind,
        source: Some(XrInputSource {
            ray_space: Some(CONTROLLER_RAY_SPACE),
        }),
        frame: Some(frame),
    };
    match router.handle_xr(scene, &event) {
        Some(hit) => {
            info!(kind = ?hit.kind, node = %hit.node, point = ?hit.point, "scripted XR hit");
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use splatview_interact::SurfaceRect;
    use splatview_scene::{SceneNode, Transform};

    fn demo_scene() -> Scene {
        Scene::new(SceneNode::group("world").with_child(
            SceneNode::splat_mesh("mesh", "mesh.spz", 0.5).with_transform(
                Transform::from_translation(Vec3::new(2.0, 0.0, 0.0)),
            ),
        ))
    }

    fn demo_router() -> (InteractionRouter, Rc<XrSessionState>) {
        let session = Rc::new(XrSessionState::new());
        let router = InteractionRouter::with_default_filter(
            SurfaceRect::from_size(800.0, 600.0),
            Rc::clone(&session),
        );
        (router, session)
    }

    #[test]
    fn empty_script_is_rejected() {
        assert!(ScriptPlayer::from_json(r#"{"steps": []}"#).is_err());
    }

    #[test]
    fn pointer_steps_replay_and_count_hits() {
        let script = r#"{
            "steps": [
                { "at_ms": 0,  "event": "pointer-move", "x": 400, "y": 300 },
                { "at_ms": 5,  "event": "pointer-move", "x": 400, "y": 300 },
                { "at_ms": 40, "event": "click", "x": 400, "y": 300 },
                { "at_ms": 50, "event": "click", "x": 0, "y": 0 }
            ]
        }"#;
        let player = ScriptPlayer::from_json(script).unwrap();
        let (router, session) = demo_router();
        let _sub = router.attach().unwrap();

        let camera = OrbitCamera::new(800.0 / 600.0, 5.0);
        let summary = player.play(&router, &demo_scene(), &camera, &session);
        assert_eq!(summary.events, 4);
        // First move hits, second is throttled, center click hits, corner
        // click misses.
        assert_eq!(summary.hits, 2);
    }

    #[test]
    fn xr_steps_toggle_the_session_and_pick() {
        // Controller at the camera spot aiming down -X (quarter turn about Y).
        let half_sqrt2 = std::f32::consts::FRAC_1_SQRT_2;
        let script = format!(
            r#"{{
                "steps": [
                    {{ "at_ms": 0, "event": "xr-select",
                       "position": [5, 0, 0],
                       "orientation": [0, {half_sqrt2}, 0, {half_sqrt2}] }},
                    {{ "at_ms": 10, "event": "xr-session-start" }},
                    {{ "at_ms": 20, "event": "xr-select",
                       "position": [5, 0, 0],
                       "orientation": [0, {half_sqrt2}, 0, {half_sqrt2}] }},
                    {{ "at_ms": 30, "event": "click", "x": 400, "y": 300 }},
                    {{ "at_ms": 40, "event": "xr-session-end" }}
                ]
            }}"#
        );
        let player = ScriptPlayer::from_json(&script).unwrap();
        let (router, session) = demo_router();
        let _sub = router.attach().unwrap();

        let camera = OrbitCamera::new(800.0 / 600.0, 5.0);
        let summary = player.play(&router, &demo_scene(), &camera, &session);
        // Only the in-session XR select lands: the first select precedes the
        // session and the click arrives while the session is active.
        assert_eq!(summary.hits, 1);
        assert!(!session.is_active());
    }
}
