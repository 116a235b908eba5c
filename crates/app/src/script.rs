//! Stroke scripts: a JSON list of tool changes, strokes and history actions
//! replayed against a raster artboard
//!
//! ```json
//! {
//!   "canvas": { "width": 400, "height": 300 },
//!   "steps": [
//!     { "action": "tool", "kind": "watercolor", "color": "#3366cc", "seed": 7 },
//!     { "action": "stroke", "points": [[20, 20], [60, 40], [120, 45]] },
//!     { "action": "undo" }
//!   ]
//! }
//! ```

use std::path::Path;

use artboard_config::{ArtboardConfig, CanvasConfig, ConfigError, ToolConfig};
use artboard_painting::{Artboard, ArtboardError, Point, RasterContext};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("usage: artboard <script.json> <out.png>")]
    Usage,
    #[error("Failed to read script: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Artboard(#[from] ArtboardError),
    #[error("Step {index}: {source}")]
    Step {
        index: usize,
        #[source]
        source: ArtboardError,
    },
    #[error("Surface could not be encoded")]
    Export,
}

/// One replayed action
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Step {
    /// Switch tools; unspecified settings take their defaults
    Tool(ToolConfig),
    /// Pointer down at the first point, moves through the rest, then up
    Stroke { points: Vec<Point> },
    Undo,
    Redo,
    Clear,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Script {
    /// Overrides the configured canvas when present
    pub canvas: Option<CanvasConfig>,
    pub steps: Vec<Step>,
}

impl Script {
    pub fn from_json_str(json: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ScriptError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

/// Counts of what a replay actually did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayStats {
    pub strokes: usize,
    pub undos: usize,
    pub redos: usize,
    pub clears: usize,
}

/// Mount a fresh raster surface and apply every step in order
pub fn replay(
    script: &Script,
    config: &ArtboardConfig,
) -> Result<(Artboard<RasterContext>, ReplayStats), ScriptError> {
    let mut config = config.clone();
    if let Some(canvas) = &script.canvas {
        config.canvas = canvas.clone();
    }

    let mut artboard = Artboard::from_config(&config)?;
    artboard.mount(RasterContext::new(config.canvas.width, config.canvas.height));
    info!(
        "Replaying {} steps on {}x{} canvas",
        script.steps.len(),
        config.canvas.width,
        config.canvas.height
    );

    let mut stats = ReplayStats::default();
    for (index, step) in script.steps.iter().enumerate() {
        match step {
            Step::Tool(tool) => {
                // Unseeded tool steps inherit the configured seed
                let mut tool = tool.clone();
                tool.seed = tool.seed.or(config.tool.seed);
                artboard
                    .configure_tool(&tool)
                    .map_err(|source| ScriptError::Step { index, source })?;
                debug!("step {}: tool {}", index, tool.kind);
            }
            Step::Stroke { points } => {
                let Some((&first, rest)) = points.split_first() else {
                    warn!("step {}: empty stroke skipped", index);
                    continue;
                };
                artboard.pointer_down(first);
                for &point in rest {
                    artboard.pointer_move(point);
                }
                if artboard.pointer_up() {
                    stats.strokes += 1;
                }
            }
            Step::Undo => {
                if artboard.undo() {
                    stats.undos += 1;
                } else {
                    warn!("step {}: nothing to undo", index);
                }
            }
            Step::Redo => {
                if artboard.redo() {
                    stats.redos += 1;
                } else {
                    warn!("step {}: nothing to redo", index);
                }
            }
            Step::Clear => {
                if artboard.clear() {
                    stats.clears += 1;
                }
            }
        }
    }

    Ok((artboard, stats))
}
