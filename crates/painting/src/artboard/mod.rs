//! Artboard driver
//!
//! This module connects:
//! - Pointer input (down/move/up/leave/enter, already in surface pixels)
//! - The active tool (start/continue/end stroke)
//! - The mounted paint context
//! - Snapshot history (one entry per finished stroke or clear)
//!
//! Until a context is mounted every call is a harmless no-op, and nothing
//! here raises: outcomes are reported as booleans and logged.

mod stroke;
mod surface_ops;
mod undo;

use artboard_config::{ArtboardConfig, ToolConfig};
use tracing::{debug, warn};

use crate::context::PaintContext;
use crate::cursor::CursorHint;
use crate::history::{History, SnapshotTarget};
use crate::tools::{ActiveTool, Tool, ToolConfigError};
use crate::types::{ColorParseError, Rgba};

/// Errors building an artboard from configuration
#[derive(Debug, thiserror::Error)]
pub enum ArtboardError {
    #[error("Invalid tool configuration: {0}")]
    Tool(#[from] ToolConfigError),
    #[error("Invalid background: {0}")]
    Background(#[from] ColorParseError),
}

/// Drawing surface driver owning the context, the active tool and history
pub struct Artboard<C> {
    /// Mounted paint target (None until `mount`)
    pub(crate) context: Option<C>,
    /// Tool receiving strokes
    pub(crate) tool: ActiveTool,
    /// Snapshot history (None when disabled)
    pub(crate) history: Option<History>,
    /// True between pointer down and the end of the stroke
    pub(crate) drawing: bool,
    /// Colour used by `mount` and `clear`
    pub(crate) background: Rgba,
}

impl<C: PaintContext + SnapshotTarget> Artboard<C> {
    /// Unmounted artboard with the given tool and no history
    pub fn new(tool: ActiveTool) -> Self {
        Self {
            context: None,
            tool,
            history: None,
            drawing: false,
            background: Rgba::WHITE,
        }
    }

    /// Build tool, history and background from configuration
    pub fn from_config(config: &ArtboardConfig) -> Result<Self, ArtboardError> {
        let background = Rgba::from_hex(&config.canvas.background)?;
        let tool = tool_for_background(&config.tool, background)?;
        let mut artboard = Self::new(tool).with_background(background);
        if config.history.enabled {
            artboard = artboard.with_history(History::with_max_depth(config.history.max_depth));
        }
        Ok(artboard)
    }

    /// Switch to a tool built from configuration; the eraser erases to
    /// this artboard's background
    pub fn configure_tool(&mut self, config: &ToolConfig) -> Result<(), ArtboardError> {
        let tool = tool_for_background(config, self.background)?;
        self.set_tool(tool);
        Ok(())
    }

    pub fn with_history(mut self, history: History) -> Self {
        self.history = Some(history);
        self
    }

    pub fn with_background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }

    /// Take ownership of a context: paint the background, bind history and
    /// record the blank surface as the first snapshot
    pub fn mount(&mut self, mut context: C) {
        if self.context.is_some() {
            warn!("mount: replacing an already mounted context");
        }
        self.drawing = false;

        let (width, height) = context.dimensions();
        context.set_fill_style(self.background);
        context.fill_rect(0.0, 0.0, width as f32, height as f32);

        if let Some(history) = self.history.as_mut() {
            history.clear();
            history.attach(&context);
            if let Err(e) = history.push_state(&context) {
                warn!("mount: initial snapshot failed: {}", e);
            }
        }
        debug!("mount: {}x{} surface, tool {}", width, height, self.tool.name());
        self.context = Some(context);
    }

    /// Give the context back; an in-flight stroke is abandoned
    pub fn unmount(&mut self) -> Option<C> {
        self.drawing = false;
        self.context.take()
    }

    pub fn is_mounted(&self) -> bool {
        self.context.is_some()
    }

    pub fn context(&self) -> Option<&C> {
        self.context.as_ref()
    }

    pub fn context_mut(&mut self) -> Option<&mut C> {
        self.context.as_mut()
    }

    pub fn tool(&self) -> &ActiveTool {
        &self.tool
    }

    /// Cursor the host should show for the active tool
    pub fn cursor(&self) -> Option<CursorHint> {
        self.tool.cursor()
    }

    pub fn history(&self) -> Option<&History> {
        self.history.as_ref()
    }

    pub fn background(&self) -> Rgba {
        self.background
    }
}

fn tool_for_background(config: &ToolConfig, background: Rgba) -> Result<ActiveTool, ToolConfigError> {
    Ok(match ActiveTool::from_config(config)? {
        ActiveTool::Eraser(eraser) => ActiveTool::Eraser(eraser.with_background(background)),
        tool => tool,
    })
}
