#![warn(missing_docs)]
//! Splat asset descriptors and the scene manifest.
//!
//! This crate classifies asset sources and composes the viewer's scene from a
//! JSON manifest. It never reads or parses splat file contents; decoding is
//! the external renderer's job.

mod manifest;
mod source;

pub use manifest::{build_scene, ManifestError, PanoramaEntry, SceneManifest, SplatEntry};
pub use source::{AssetError, AssetKind, SplatSource};
