//! Shared configuration for the artboard
//!
//! This crate provides the single source of truth for canvas dimensions,
//! default tool settings, and history limits shared by the painting engine
//! and the headless driver binary.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default canvas width in pixels
pub const DEFAULT_WIDTH: u32 = 800;

/// Default canvas height in pixels
pub const DEFAULT_HEIGHT: u32 = 600;

/// Default canvas background (surface white)
pub const DEFAULT_BACKGROUND: &str = "#ffffff";

/// Default ink colour
pub const DEFAULT_COLOR: &str = "#000000";

/// Default stroke width in pixels
pub const DEFAULT_STROKE_WIDTH: f32 = 25.0;

/// Default number of darkening steps a bristle colour may receive
pub const DEFAULT_VARY_BRIGHTNESS: f32 = 5.0;

/// Default width of the faint neighbour links drawn by hatching tools
pub const DEFAULT_NEIGHBOUR_LINE_WIDTH: f32 = 1.0;

/// Errors raised while loading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Canvas configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Surface width in pixels
    pub width: u32,
    /// Surface height in pixels
    pub height: u32,
    /// Background colour as a hex string
    pub background: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl CanvasConfig {
    /// Create a new canvas config with the given dimensions
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

/// Settings for the active drawing tool
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Tool name: brush, marker, airbrush, eraser, sketch, shading, watercolor
    pub kind: String,
    /// Ink colour as a hex string
    pub color: String,
    /// Stroke width in pixels
    pub stroke_width: f32,
    /// Maximum darkening steps applied to bristle colours
    pub vary_brightness: f32,
    /// Override for the neighbour link colour (defaults to ink at 20% alpha)
    pub neighbour_color: Option<String>,
    /// Width of neighbour links
    pub neighbour_line_width: f32,
    /// Override for the neighbour distance threshold
    pub distance_threshold: Option<f32>,
    /// Override for the neighbour spread factor
    pub spread_factor: Option<f32>,
    /// Cap on the neighbour trail length (None keeps the whole stroke)
    pub max_trail: Option<usize>,
    /// Seed for reproducible strokes (None draws from entropy)
    pub seed: Option<u64>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            kind: "brush".to_string(),
            color: DEFAULT_COLOR.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            vary_brightness: DEFAULT_VARY_BRIGHTNESS,
            neighbour_color: None,
            neighbour_line_width: DEFAULT_NEIGHBOUR_LINE_WIDTH,
            distance_threshold: None,
            spread_factor: None,
            max_trail: None,
            seed: None,
        }
    }
}

/// Snapshot history settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryConfig {
    /// Whether the artboard records snapshots at all
    pub enabled: bool,
    /// Oldest snapshots are evicted beyond this depth
    pub max_depth: Option<usize>,
}

impl HistoryConfig {
    /// History enabled with an optional depth cap
    pub fn enabled(max_depth: Option<usize>) -> Self {
        Self {
            enabled: true,
            max_depth,
        }
    }
}

/// Top-level artboard configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtboardConfig {
    pub canvas: CanvasConfig,
    pub tool: ToolConfig,
    pub history: HistoryConfig,
}

impl Default for ArtboardConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            tool: ToolConfig::default(),
            history: HistoryConfig::enabled(Some(50)),
        }
    }
}

impl ArtboardConfig {
    /// Parse a configuration from JSON; missing fields take their defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a configuration file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ArtboardConfig::default();
        assert_eq!(config.canvas.width, DEFAULT_WIDTH);
        assert_eq!(config.canvas.height, DEFAULT_HEIGHT);
        assert_eq!(config.tool.stroke_width, DEFAULT_STROKE_WIDTH);
        assert_eq!(config.tool.kind, "brush");
        assert!(config.history.enabled);
    }

    #[test]
    fn test_partial_json_takes_defaults() {
        let config =
            ArtboardConfig::from_json_str(r##"{ "tool": { "kind": "marker", "color": "#993366" } }"##)
                .unwrap();
        assert_eq!(config.tool.kind, "marker");
        assert_eq!(config.tool.color, "#993366");
        assert_eq!(config.tool.stroke_width, DEFAULT_STROKE_WIDTH);
        assert_eq!(config.canvas, CanvasConfig::default());
    }

    #[test]
    fn test_history_depth() {
        let config =
            ArtboardConfig::from_json_str(r#"{ "history": { "enabled": true, "max_depth": 3 } }"#)
                .unwrap();
        assert_eq!(config.history.max_depth, Some(3));
    }

    #[test]
    fn test_invalid_json() {
        let result = ArtboardConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_canvas_dimensions() {
        let canvas = CanvasConfig::new(320, 240);
        assert_eq!(canvas.width_f32(), 320.0);
        assert_eq!(canvas.height_f32(), 240.0);
        assert_eq!(canvas.background, DEFAULT_BACKGROUND);
    }
}
