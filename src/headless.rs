//! Headless mode: replays a scripted event stream through the router with no
//! window, logging each hit and a final summary.

use crate::config::ViewerConfig;
use crate::script::ScriptPlayer;
use anyhow::{Context, Result};
use splatview_interact::{InteractionRouter, SurfaceRect, XrSessionState};
use splatview_scene::{OrbitCamera, Scene};
use std::path::Path;
use std::rc::Rc;
use tracing::info;

pub fn run(
    config: &ViewerConfig,
    scene: &Scene,
    camera: &OrbitCamera,
    script_path: &Path,
) -> Result<()> {
    let player = ScriptPlayer::from_path(script_path)
        .with_context(|| format!("failed to load input script {}", script_path.display()))?;

    let session = Rc::new(XrSessionState::new());
    let router = InteractionRouter::with_default_filter(
        SurfaceRect::from_size(config.width as f32, config.height as f32),
        Rc::clone(&session),
    );
    let subscription = router.attach()?;

    let summary = player.play(&router, scene, camera, &session);
    subscription.release();

    info!(
        events = summary.events,
        hits = summary.hits,
        "script playback finished"
    );
    Ok(())
}
