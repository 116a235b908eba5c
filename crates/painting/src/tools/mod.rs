//! Stroke tools and the lifecycle they share
//!
//! A driver calls [`Tool::start_stroke`] once when a gesture begins,
//! [`Tool::continue_stroke`] for every further sample, and
//! [`Tool::end_stroke`] exactly once when the gesture finishes, even for a
//! tap with no samples in between. Every tool owns its per-stroke state and
//! its own [`StrokeRng`](crate::random::StrokeRng), and leaves the context's
//! composite mode back at source-over when the stroke ends, since the
//! context outlives tool switches.

mod airbrush;
mod brush;
mod eraser;
mod marker;
mod neighbour;
mod watercolor;

use std::fmt;
use std::str::FromStr;

use artboard_config::ToolConfig;
use tracing::debug;

use crate::context::PaintContext;
use crate::cursor::CursorHint;
use crate::random::StrokeRng;
use crate::types::{ColorParseError, Point, Rgba};

pub use airbrush::Airbrush;
pub use brush::{Bristle, BristleBrush, draw_stroke, make_brush};
pub use eraser::Eraser;
pub use marker::Marker;
pub use neighbour::{NeighbourBrush, NeighbourPreset, SHADING, SKETCH};
pub use watercolor::{
    Watercolor, deform_polygon, get_splodge, make_polygon, splodge_at_point, splodge_trail,
};

/// The start/continue/end contract; every callback defaults to a no-op
pub trait Tool {
    /// Display name
    fn name(&self) -> &str;

    fn cursor(&self) -> Option<CursorHint> {
        None
    }

    fn start_stroke(&mut self, _point: Point, _ctx: &mut dyn PaintContext) {}

    fn continue_stroke(&mut self, _point: Point, _ctx: &mut dyn PaintContext) {}

    fn end_stroke(&mut self, _ctx: &mut dyn PaintContext) {}
}

/// Errors building a tool from configuration
#[derive(Debug, thiserror::Error)]
pub enum ToolConfigError {
    #[error("Unknown tool: {0:?}")]
    UnknownTool(String),
    #[error(transparent)]
    Color(#[from] ColorParseError),
    #[error("Stroke width must be positive and finite, got {0}")]
    InvalidWidth(f32),
}

/// Every tool the engine ships
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToolKind {
    Brush,
    Marker,
    Airbrush,
    Eraser,
    Sketch,
    Shading,
    Watercolor,
}

impl ToolKind {
    pub const ALL: [ToolKind; 7] = [
        ToolKind::Brush,
        ToolKind::Marker,
        ToolKind::Airbrush,
        ToolKind::Eraser,
        ToolKind::Sketch,
        ToolKind::Shading,
        ToolKind::Watercolor,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ToolKind::Brush => "brush",
            ToolKind::Marker => "marker",
            ToolKind::Airbrush => "airbrush",
            ToolKind::Eraser => "eraser",
            ToolKind::Sketch => "sketch",
            ToolKind::Shading => "shading",
            ToolKind::Watercolor => "watercolor",
        }
    }
}

impl fmt::Display for ToolKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ToolKind {
    type Err = ToolConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        match wanted.as_str() {
            // "neighbour" is the hatching tool's generic name
            "neighbour" | "neighbor" => Ok(ToolKind::Sketch),
            _ => ToolKind::ALL
                .into_iter()
                .find(|kind| kind.as_str() == wanted)
                .ok_or_else(|| ToolConfigError::UnknownTool(s.to_string())),
        }
    }
}

/// The tool currently driving strokes, selected once per tool change
#[derive(Debug, Clone)]
pub enum ActiveTool {
    Brush(BristleBrush),
    Marker(Marker),
    Airbrush(Airbrush),
    Eraser(Eraser),
    Neighbour(NeighbourBrush),
    Watercolor(Watercolor),
}

impl ActiveTool {
    /// Build a tool from its configuration
    pub fn from_config(config: &ToolConfig) -> Result<Self, ToolConfigError> {
        let kind: ToolKind = config.kind.parse()?;
        let color = Rgba::from_hex(&config.color)?;
        let width = config.stroke_width;
        if !(width > 0.0 && width.is_finite()) {
            return Err(ToolConfigError::InvalidWidth(width));
        }
        let rng = StrokeRng::from_seed_option(config.seed);

        let tool = match kind {
            ToolKind::Brush => ActiveTool::Brush(
                BristleBrush::new(color, width)
                    .with_vary_brightness(config.vary_brightness)
                    .with_rng(rng),
            ),
            ToolKind::Marker => ActiveTool::Marker(Marker::new(color, width)),
            ToolKind::Airbrush => ActiveTool::Airbrush(Airbrush::new(color, width)),
            ToolKind::Eraser => ActiveTool::Eraser(Eraser::new(width)),
            ToolKind::Sketch | ToolKind::Shading => {
                let preset = if kind == ToolKind::Sketch { SKETCH } else { SHADING };
                let preset = NeighbourPreset {
                    distance_threshold: config.distance_threshold.unwrap_or(preset.distance_threshold),
                    spread_factor: config.spread_factor.unwrap_or(preset.spread_factor),
                    ..preset
                };
                let mut brush = NeighbourBrush::new(preset, color)
                    .with_line_width(config.neighbour_line_width)
                    .with_max_trail(config.max_trail)
                    .with_rng(rng);
                if let Some(hex) = &config.neighbour_color {
                    brush = brush.with_neighbour_color(Rgba::from_hex(hex)?);
                }
                ActiveTool::Neighbour(brush)
            }
            ToolKind::Watercolor => ActiveTool::Watercolor(Watercolor::new(color, width).with_rng(rng)),
        };
        debug!("ActiveTool::from_config: {} ({})", tool.name(), kind);
        Ok(tool)
    }

    fn as_tool(&self) -> &dyn Tool {
        match self {
            ActiveTool::Brush(t) => t,
            ActiveTool::Marker(t) => t,
            ActiveTool::Airbrush(t) => t,
            ActiveTool::Eraser(t) => t,
            ActiveTool::Neighbour(t) => t,
            ActiveTool::Watercolor(t) => t,
        }
    }

    fn as_tool_mut(&mut self) -> &mut dyn Tool {
        match self {
            ActiveTool::Brush(t) => t,
            ActiveTool::Marker(t) => t,
            ActiveTool::Airbrush(t) => t,
            ActiveTool::Eraser(t) => t,
            ActiveTool::Neighbour(t) => t,
            ActiveTool::Watercolor(t) => t,
        }
    }
}

impl Default for ActiveTool {
    fn default() -> Self {
        ActiveTool::Brush(BristleBrush::default())
    }
}

impl Tool for ActiveTool {
    fn name(&self) -> &str {
        self.as_tool().name()
    }

    fn cursor(&self) -> Option<CursorHint> {
        self.as_tool().cursor()
    }

    fn start_stroke(&mut self, point: Point, ctx: &mut dyn PaintContext) {
        self.as_tool_mut().start_stroke(point, ctx);
    }

    fn continue_stroke(&mut self, point: Point, ctx: &mut dyn PaintContext) {
        self.as_tool_mut().continue_stroke(point, ctx);
    }

    fn end_stroke(&mut self, ctx: &mut dyn PaintContext) {
        self.as_tool_mut().end_stroke(ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::RecordingContext;
    use crate::types::CompositeMode;

    fn config(kind: &str) -> ToolConfig {
        ToolConfig {
            kind: kind.to_string(),
            seed: Some(7),
            ..ToolConfig::default()
        }
    }

    #[test]
    fn test_tool_kind_parsing() {
        assert_eq!("brush".parse::<ToolKind>().unwrap(), ToolKind::Brush);
        assert_eq!(" Watercolor ".parse::<ToolKind>().unwrap(), ToolKind::Watercolor);
        assert_eq!("neighbour".parse::<ToolKind>().unwrap(), ToolKind::Sketch);
        assert!(matches!("pencil".parse::<ToolKind>(), Err(ToolConfigError::UnknownTool(_))));
    }

    #[test]
    fn test_tool_kind_display_round_trips() {
        for kind in ToolKind::ALL {
            assert_eq!(kind.to_string().parse::<ToolKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_from_config_names() {
        let expected = [
            ("brush", "Brush"),
            ("marker", "Marker"),
            ("airbrush", "Airbrush"),
            ("eraser", "Eraser"),
            ("sketch", "Sketch"),
            ("shading", "Shading"),
            ("watercolor", "Watercolor"),
        ];
        for (kind, name) in expected {
            let tool = ActiveTool::from_config(&config(kind)).unwrap();
            assert_eq!(tool.name(), name);
        }
    }

    #[test]
    fn test_from_config_rejects_bad_input() {
        let mut bad_color = config("brush");
        bad_color.color = "not-a-colour".to_string();
        assert!(matches!(ActiveTool::from_config(&bad_color), Err(ToolConfigError::Color(_))));

        let mut bad_width = config("marker");
        bad_width.stroke_width = 0.0;
        assert!(matches!(
            ActiveTool::from_config(&bad_width),
            Err(ToolConfigError::InvalidWidth(_))
        ));
    }

    #[test]
    fn test_cursor_hints() {
        let brush = ActiveTool::from_config(&config("brush")).unwrap();
        assert_eq!(brush.cursor(), Some(CursorHint::circle(25.0)));
        let shading = ActiveTool::from_config(&config("shading")).unwrap();
        assert_eq!(shading.cursor(), Some(CursorHint::Crosshair));
    }

    #[test]
    fn test_every_tool_restores_composite() {
        for kind in ToolKind::ALL {
            let mut tool = ActiveTool::from_config(&config(kind.as_str())).unwrap();
            let mut ctx = RecordingContext::new();
            tool.start_stroke(Point::new(10.0, 10.0), &mut ctx);
            tool.continue_stroke(Point::new(20.0, 14.0), &mut ctx);
            tool.continue_stroke(Point::new(30.0, 22.0), &mut ctx);
            tool.end_stroke(&mut ctx);
            assert_eq!(ctx.composite(), CompositeMode::SourceOver, "{kind}");
            assert_eq!(ctx.global_alpha(), 1.0, "{kind}");
        }
    }

    #[test]
    fn test_tap_without_samples() {
        for kind in ToolKind::ALL {
            let mut tool = ActiveTool::from_config(&config(kind.as_str())).unwrap();
            let mut ctx = RecordingContext::new();
            tool.start_stroke(Point::new(10.0, 10.0), &mut ctx);
            tool.end_stroke(&mut ctx);
            assert_eq!(ctx.composite(), CompositeMode::SourceOver, "{kind}");
        }
    }
}
