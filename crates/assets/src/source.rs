//! Splat source classification.

/// Errors produced while classifying an asset source.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum AssetError {
    /// The source has an extension the renderer cannot load.
    #[error("unsupported splat source '{0}' (expected .spz, .ply, or .zip)")]
    UnsupportedSource(String),
    /// The source has no file extension at all.
    #[error("splat source '{0}' has no file extension")]
    MissingExtension(String),
}

/// The container format of a splat asset, inferred from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssetKind {
    /// Compressed .spz splat file.
    Spz,
    /// Point-cloud .ply splat file.
    Ply,
    /// Zipped splat bundle.
    Bundle,
}

impl AssetKind {
    /// Classify a URL or path by extension. Query strings and fragments are
    /// ignored; matching is case-insensitive.
    pub fn from_source(source: &str) -> Result<Self, AssetError> {
        let path = source
            .split_once(['?', '#'])
            .map_or(source, |(path, _)| path);
        let ext = path
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .filter(|ext| !ext.is_empty() && !ext.contains('/'))
            .ok_or_else(|| AssetError::MissingExtension(source.to_string()))?;

        match ext.as_str() {
            "spz" => Ok(AssetKind::Spz),
            "ply" => Ok(AssetKind::Ply),
            "zip" => Ok(AssetKind::Bundle),
            _ => Err(AssetError::UnsupportedSource(source.to_string())),
        }
    }
}

/// A validated splat asset reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SplatSource {
    /// URL or path handed to the external renderer.
    pub source: String,
    /// Classified container format.
    pub kind: AssetKind,
}

impl SplatSource {
    /// Validate and classify a source string.
    pub fn parse(source: impl Into<String>) -> Result<Self, AssetError> {
        let source = source.into();
        let kind = AssetKind::from_source(&source)?;
        Ok(Self { source, kind })
    }
}
