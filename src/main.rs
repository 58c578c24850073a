//! splatview - Gaussian-splat scene viewer demo
//!
//! Composes a splat scene from a manifest and routes pointer/XR input to ray
//! hits against it, windowed or headless.

mod config;
mod headless;
mod script;
mod window;

use anyhow::Result;
use config::ViewerConfig;
use splatview_assets::{build_scene, SceneManifest};
use splatview_scene::OrbitCamera;
use std::{env, path::PathBuf};
use tracing::info;

fn main() -> Result<()> {
    // Initialize tracing with INFO level by default (can be overridden via RUST_LOG env var)
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Starting splatview v{}", env!("CARGO_PKG_VERSION"));

    let cli = CliOptions::parse(env::args().skip(1))?;

    let mut viewer = match &cli.config {
        Some(path) => ViewerConfig::load_from_path(path),
        None => ViewerConfig::load(),
    };
    if let Some(width) = cli.width {
        viewer.width = width.max(1);
    }
    if let Some(height) = cli.height {
        viewer.height = height.max(1);
    }

    let manifest_path = cli
        .manifest
        .clone()
        .unwrap_or_else(|| PathBuf::from(&viewer.manifest_path));
    let manifest = SceneManifest::load_from_path(&manifest_path)?;
    let scene = build_scene(&manifest)?;

    let mut camera = OrbitCamera::new(viewer.aspect(), viewer.orbit_distance);
    camera.fov = viewer.fov_degrees.to_radians();

    if cli.headless {
        let script = cli
            .script
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("--headless requires --script <path>"))?;
        headless::run(&viewer, &scene, &camera, script)
    } else {
        if cli.script.is_some() {
            tracing::warn!("--script has no effect without --headless");
        }
        window::run(&viewer, scene, camera)
    }
}

#[derive(Debug, Default)]
struct CliOptions {
    headless: bool,
    script: Option<PathBuf>,
    config: Option<PathBuf>,
    manifest: Option<PathBuf>,
    width: Option<u32>,
    height: Option<u32>,
}

impl CliOptions {
    fn parse(mut args: impl Iterator<Item = String>) -> Result<Self> {
        let mut options = CliOptions::default();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--headless" => options.headless = true,
                "--script" => options.script = Some(next_path(&mut args, "--script")?),
                "--config" => options.config = Some(next_path(&mut args, "--config")?),
                "--manifest" => options.manifest = Some(next_path(&mut args, "--manifest")?),
                "--width" => options.width = Some(next_u32(&mut args, "--width")?),
                "--height" => options.height = Some(next_u32(&mut args, "--height")?),
                other => anyhow::bail!("unknown argument '{other}'"),
            }
        }
        Ok(options)
    }
}

fn next_path(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<PathBuf> {
    args.next()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow::anyhow!("{flag} requires a path argument"))
}

fn next_u32(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<u32> {
    let value = args
        .next()
        .ok_or_else(|| anyhow::anyhow!("{flag} requires a value"))?;
    value
        .parse()
        .map_err(|err| anyhow::anyhow!("{flag}: invalid value '{value}': {err}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn parse(args: &[&str]) -> Result<CliOptions> {
        CliOptions::parse(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn parses_headless_run() {
        let cli = parse(&["--headless", "--script", "scripts/sweep.json"]).unwrap();
        assert!(cli.headless);
        assert_eq!(cli.script.unwrap(), Path::new("scripts/sweep.json"));
    }

    #[test]
    fn parses_surface_overrides() {
        let cli = parse(&["--width", "1024", "--height", "768"]).unwrap();
        assert_eq!(cli.width, Some(1024));
        assert_eq!(cli.height, Some(768));
    }

    #[test]
    fn rejects_unknown_arguments_and_missing_values() {
        assert!(parse(&["--frobnicate"]).is_err());
        assert!(parse(&["--script"]).is_err());
        assert!(parse(&["--width", "many"]).is_err());
    }
}
