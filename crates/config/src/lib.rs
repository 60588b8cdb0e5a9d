//! Shared configuration for Tailor
//!
//! This crate provides the single source of truth for editing surface
//! dimensions, viewport camera limits, preview capture settings, and asset
//! locations shared by every component of the customizer.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Default editing surface width in pixels
pub const DEFAULT_SURFACE_WIDTH: u32 = 500;

/// Default editing surface height in pixels
pub const DEFAULT_SURFACE_HEIGHT: u32 = 500;

/// Default surface background color
pub const DEFAULT_SURFACE_BACKGROUND: &str = "#ffffff";

/// Default tile size for texture dirty tracking
pub const DEFAULT_TILE_SIZE: u32 = 128;

/// Default viewport width in pixels
pub const DEFAULT_VIEWPORT_WIDTH: u32 = 800;

/// Default viewport height in pixels
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 600;

/// Default vertical field of view in degrees
pub const DEFAULT_FOV_DEGREES: f32 = 45.0;

/// Default distance of the camera from the model origin
pub const DEFAULT_CAMERA_DISTANCE: f32 = 6.0;

/// Closest the camera may zoom towards the model
pub const MIN_ZOOM_DISTANCE: f32 = 2.0;

/// Furthest the camera may zoom away from the model
pub const MAX_ZOOM_DISTANCE: f32 = 10.0;

/// Delay between resetting the camera and capturing a preview
pub const DEFAULT_CAPTURE_SETTLE_MS: u64 = 100;

/// Default preview image edge length in pixels
pub const DEFAULT_CAPTURE_SIZE: u32 = 512;

/// Environment variable overriding the asset root
pub const ASSET_ROOT_ENV: &str = "TAILOR_ASSET_ROOT";

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Editing surface configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Background fill painted under the base design
    pub background: String,
    /// Tile edge length used by the texture bridge
    pub tile_size: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_SURFACE_WIDTH,
            height: DEFAULT_SURFACE_HEIGHT,
            background: DEFAULT_SURFACE_BACKGROUND.to_string(),
            tile_size: DEFAULT_TILE_SIZE,
        }
    }
}

impl SurfaceConfig {
    /// Create a surface config with the given dimensions
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ..Default::default()
        }
    }

    /// Get width as f32 for calculations
    pub fn width_f32(&self) -> f32 {
        self.width as f32
    }

    /// Get height as f32 for calculations
    pub fn height_f32(&self) -> f32 {
        self.height as f32
    }
}

/// 3D viewport configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportConfig {
    /// Viewport width in pixels
    pub width: u32,
    /// Viewport height in pixels
    pub height: u32,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Camera distance of the default pose
    pub default_distance: f32,
    /// Zoom lower bound
    pub min_distance: f32,
    /// Zoom upper bound
    pub max_distance: f32,
    /// RGBA clear color of rendered frames
    pub clear_color: [u8; 4],
}

impl Default for ViewportConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_VIEWPORT_WIDTH,
            height: DEFAULT_VIEWPORT_HEIGHT,
            fov_degrees: DEFAULT_FOV_DEGREES,
            default_distance: DEFAULT_CAMERA_DISTANCE,
            min_distance: MIN_ZOOM_DISTANCE,
            max_distance: MAX_ZOOM_DISTANCE,
            clear_color: [255, 255, 255, 255],
        }
    }
}

impl ViewportConfig {
    /// Width over height
    pub fn aspect_ratio(&self) -> f32 {
        self.width.max(1) as f32 / self.height.max(1) as f32
    }
}

/// Preview capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureConfig {
    /// Output width in pixels
    pub width: u32,
    /// Output height in pixels
    pub height: u32,
    /// Milliseconds to wait after resetting the camera
    pub settle_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_CAPTURE_SIZE,
            height: DEFAULT_CAPTURE_SIZE,
            settle_ms: DEFAULT_CAPTURE_SETTLE_MS,
        }
    }
}

/// A font file registered under a family name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FontEntry {
    pub family: String,
    /// Path relative to the asset root
    pub path: String,
}

/// Asset location configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Directory that asset paths (`/designs/...`, `/models/...`) resolve against
    pub root: PathBuf,
    /// Fonts available to text decorations
    pub fonts: Vec<FontEntry>,
    /// Resolve families missing from `fonts` against installed fonts
    pub system_fonts: bool,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("assets"),
            fonts: Vec::new(),
            system_fonts: true,
        }
    }
}

impl AssetConfig {
    /// Resolve an asset path against the root, ignoring any leading slash
    pub fn resolve(&self, asset_path: &str) -> PathBuf {
        self.root.join(asset_path.trim_start_matches('/'))
    }
}

/// Complete customizer configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomizerConfig {
    pub surface: SurfaceConfig,
    pub viewport: ViewportConfig,
    pub capture: CaptureConfig,
    pub assets: AssetConfig,
}

impl CustomizerConfig {
    /// Parse a configuration from JSON, filling omitted fields with defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file and apply environment overrides
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config = Self::from_json_str(&text)?;
        config.apply_env();
        info!("Loaded customizer config from {}", path.display());
        Ok(config)
    }

    /// Default configuration with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Apply `TAILOR_ASSET_ROOT` if set
    pub fn apply_env(&mut self) {
        if let Ok(root) = std::env::var(ASSET_ROOT_ENV) {
            debug!("Asset root overridden by {}: {}", ASSET_ROOT_ENV, root);
            self.assets.root = PathBuf::from(root);
        }
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.surface.width == 0 || self.surface.height == 0 {
            return Err(ConfigError::Invalid("surface dimensions must be non-zero".into()));
        }
        if self.surface.tile_size == 0 {
            return Err(ConfigError::Invalid("tile size must be non-zero".into()));
        }
        if self.viewport.min_distance <= 0.0
            || self.viewport.min_distance > self.viewport.max_distance
        {
            return Err(ConfigError::Invalid(format!(
                "zoom range [{}, {}] is empty",
                self.viewport.min_distance, self.viewport.max_distance
            )));
        }
        if !(1.0..180.0).contains(&self.viewport.fov_degrees) {
            return Err(ConfigError::Invalid(format!(
                "field of view {} out of range",
                self.viewport.fov_degrees
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CustomizerConfig::default();
        assert_eq!(config.surface.width, DEFAULT_SURFACE_WIDTH);
        assert_eq!(config.surface.height, DEFAULT_SURFACE_HEIGHT);
        assert_eq!(config.viewport.min_distance, 2.0);
        assert_eq!(config.viewport.max_distance, 10.0);
        assert_eq!(config.capture.settle_ms, 100);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config =
            CustomizerConfig::from_json_str(r#"{ "surface": { "width": 1024 } }"#).unwrap();
        assert_eq!(config.surface.width, 1024);
        assert_eq!(config.surface.height, DEFAULT_SURFACE_HEIGHT);
        assert_eq!(config.viewport.fov_degrees, DEFAULT_FOV_DEGREES);
    }

    #[test]
    fn test_invalid_zoom_range_rejected() {
        let result = CustomizerConfig::from_json_str(
            r#"{ "viewport": { "min_distance": 12.0, "max_distance": 10.0 } }"#,
        );
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_system_fonts_default_on() {
        let config = CustomizerConfig::from_json_str(r#"{ "assets": { "root": "/srv" } }"#).unwrap();
        assert!(config.assets.system_fonts);
        let config =
            CustomizerConfig::from_json_str(r#"{ "assets": { "system_fonts": false } }"#).unwrap();
        assert!(!config.assets.system_fonts);
    }

    #[test]
    fn test_malformed_json_is_parse_error() {
        let result = CustomizerConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_resolve_strips_leading_slash() {
        let assets = AssetConfig {
            root: PathBuf::from("/srv/assets"),
            ..Default::default()
        };
        assert_eq!(
            assets.resolve("/designs/jersey.svg"),
            PathBuf::from("/srv/assets/designs/jersey.svg")
        );
    }

    #[test]
    fn test_viewport_aspect_ratio() {
        let viewport = ViewportConfig::default();
        assert!((viewport.aspect_ratio() - 800.0 / 600.0).abs() < 1e-6);
    }
}
