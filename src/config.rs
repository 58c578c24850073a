use serde::Deserialize;
use std::{fs, path::Path};
use tracing::warn;

const DEFAULT_VIEWER_PATH: &str = "config/viewer.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Render surface width in pixels.
    pub width: u32,
    /// Render surface height in pixels.
    pub height: u32,
    /// Field of view in degrees.
    pub fov_degrees: f32,
    /// Initial orbit distance from the scene origin.
    pub orbit_distance: f32,
    /// Demo spin applied to the first splat mesh, radians per second.
    pub spin_radians_per_second: f32,
    /// Path of the scene manifest.
    pub manifest_path: String,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 600,
            fov_degrees: 60.0,
            orbit_distance: 5.0,
            spin_radians_per_second: 0.5,
            manifest_path: "config/scene.json".to_string(),
        }
    }
}

impl ViewerConfig {
    /// Load viewer configuration from the default path.
    pub fn load() -> Self {
        Self::load_from_path(Path::new(DEFAULT_VIEWER_PATH))
    }

    /// Load configuration from an explicit path, falling back to defaults on errors.
    pub fn load_from_path(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match toml::from_str::<ViewerConfig>(&contents) {
                Ok(cfg) => cfg,
                Err(err) => {
                    warn!("Failed to parse {}: {err}. Using defaults", path.display());
                    ViewerConfig::default()
                }
            },
            Err(err) => {
                if path != Path::new(DEFAULT_VIEWER_PATH) {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else if err.kind() != std::io::ErrorKind::NotFound {
                    warn!("Failed to read {}: {err}. Using defaults", path.display());
                } else {
                    warn!(
                        "Viewer config not found at {}. Using defaults",
                        path.display()
                    );
                }
                ViewerConfig::default()
            }
        }
    }

    /// Aspect ratio of the configured surface.
    pub fn aspect(&self) -> f32 {
        self.width as f32 / self.height as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_demo_surface() {
        let cfg = ViewerConfig::default();
        assert_eq!((cfg.width, cfg.height), (800, 600));
        assert!((cfg.aspect() - 4.0 / 3.0).abs() < 1e-6);
    }

    #[test]
    fn partial_toml_fills_in_defaults() {
        let cfg: ViewerConfig = toml::from_str("width = 1024\nheight = 768\n").unwrap();
        assert_eq!(cfg.width, 1024);
        assert_eq!(cfg.height, 768);
        assert_eq!(cfg.manifest_path, "config/scene.json");
        assert!((cfg.spin_radians_per_second - 0.5).abs() < 1e-6);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let cfg = ViewerConfig::load_from_path(Path::new("/nonexistent/viewer.toml"));
        assert_eq!(cfg.width, 800);
    }
}
