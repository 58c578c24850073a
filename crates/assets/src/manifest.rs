//! JSON scene manifest and scene composition.
//!
//! The manifest lists which splat assets to show and how to place them; it is
//! viewer configuration, not asset data.

use crate::source::{AssetError, SplatSource};
use glam::{EulerRot, Quat, Vec3};
use serde::Deserialize;
use splatview_scene::{Scene, SceneNode, Transform};
use std::{fs, path::Path};
use tracing::warn;

/// Errors produced while loading or composing a manifest.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// The manifest file could not be read.
    #[error("failed to read manifest {path}: {source}")]
    Io {
        /// Path that failed to read.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// The manifest is not valid JSON of the expected shape.
    #[error("failed to parse manifest: {0}")]
    Parse(#[from] serde_json::Error),
    /// A splat entry references an unloadable source.
    #[error(transparent)]
    Asset(#[from] AssetError),
    /// The manifest lists no splats.
    #[error("manifest contains no splat entries")]
    Empty,
}

fn default_scale() -> f32 {
    1.0
}

fn default_radius() -> f32 {
    1.0
}

fn default_pano_scale() -> f32 {
    500.0
}

fn default_pano_yaw() -> f32 {
    -1.5
}

/// One splat asset placement.
#[derive(Debug, Clone, Deserialize)]
pub struct SplatEntry {
    /// Node name used in logs and lookups.
    pub name: String,
    /// Asset URL or path (.spz, .ply, .zip).
    pub source: String,
    /// World position.
    #[serde(default)]
    pub position: [f32; 3],
    /// Euler rotation in degrees (x, y, z).
    #[serde(default)]
    pub rotation_degrees: [f32; 3],
    /// Uniform scale.
    #[serde(default = "default_scale")]
    pub scale: f32,
    /// Radius of the pickable bounding sphere.
    #[serde(default = "default_radius")]
    pub bounding_radius: f32,
    /// Wrap the mesh in a half-turn group; some captures come in flipped.
    #[serde(default)]
    pub upside_down: bool,
}

/// Optional panoramic backdrop.
#[derive(Debug, Clone, Deserialize)]
pub struct PanoramaEntry {
    /// Equirectangular image source.
    pub image: String,
    /// Backdrop sphere scale, large enough to sit behind everything.
    #[serde(default = "default_pano_scale")]
    pub scale: f32,
    /// Rotation about the vertical axis, in radians.
    #[serde(default = "default_pano_yaw")]
    pub rotation_y: f32,
}

/// The viewer's scene description.
#[derive(Debug, Clone, Deserialize)]
pub struct SceneManifest {
    /// Splat placements; at least one is required.
    #[serde(default)]
    pub splats: Vec<SplatEntry>,
    /// Optional panoramic backdrop.
    #[serde(default)]
    pub panorama: Option<PanoramaEntry>,
}

impl SceneManifest {
    /// Parse a manifest from JSON.
    pub fn from_json(json: &str) -> Result<Self, ManifestError> {
        let manifest: SceneManifest = serde_json::from_str(json)?;
        if manifest.splats.is_empty() {
            return Err(ManifestError::Empty);
        }
        Ok(manifest)
    }

    /// Load a manifest from a file.
    pub fn load_from_path(path: &Path) -> Result<Self, ManifestError> {
        let contents = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&contents)
    }
}

/// Compose a scene from the manifest.
///
/// Entries with unloadable sources are logged and skipped rather than
/// failing the whole scene; a manifest that loses all of its splats this way
/// is an error.
pub fn build_scene(manifest: &SceneManifest) -> Result<Scene, ManifestError> {
    let mut root = SceneNode::group("world");

    if let Some(pano) = &manifest.panorama {
        root = root.with_child(
            SceneNode::backdrop("panorama", pano.image.clone()).with_transform(Transform {
                translation: Vec3::ZERO,
                rotation: Quat::from_rotation_y(pano.rotation_y),
                scale: Vec3::splat(pano.scale),
            }),
        );
    }

    let mut placed = 0usize;
    for entry in &manifest.splats {
        let source = match SplatSource::parse(entry.source.clone()) {
            Ok(source) => source,
            Err(err) => {
                warn!(name = %entry.name, %err, "skipping splat entry");
                continue;
            }
        };

        tracing::debug!(name = %entry.name, kind = ?source.kind, "placing splat");
        let mesh = SceneNode::splat_mesh(entry.name.clone(), source.source, entry.bounding_radius)
            .with_transform(Transform {
                translation: Vec3::from_array(entry.position),
                rotation: Quat::from_euler(
                    EulerRot::XYZ,
                    entry.rotation_degrees[0].to_radians(),
                    entry.rotation_degrees[1].to_radians(),
                    entry.rotation_degrees[2].to_radians(),
                ),
                scale: Vec3::splat(entry.scale),
            });

        let child = if entry.upside_down {
            SceneNode::group(format!("{}/orientation", entry.name))
                .with_transform(Transform::from_rotation(Quat::from_rotation_x(
                    std::f32::consts::PI,
                )))
                .with_child(mesh)
        } else {
            mesh
        };

        root = root.with_child(child);
        placed += 1;
    }

    if placed == 0 {
        return Err(ManifestError::Empty);
    }
    Ok(Scene::new(root))
}
