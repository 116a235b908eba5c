//! Command-recording paint context
//!
//! [`RecordingContext`] keeps the same persistent state a real surface would
//! but, instead of rasterizing, appends every call to a command log. Seeded
//! tools replay identical logs, which makes it the backend for golden tests
//! and for hosts that forward draw calls to a canvas of their own.

use serde::{Deserialize, Serialize};

use crate::context::{DrawState, PaintContext};
use crate::types::{CompositeMode, LineCap, LineJoin, Point, Rgba};

/// One recorded paint-context call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum DrawCommand {
    BeginPath,
    ClosePath,
    MoveTo { point: Point },
    LineTo { point: Point },
    QuadraticCurveTo { control: Point, to: Point },
    Stroke,
    Fill,
    FillRect { x: f32, y: f32, width: f32, height: f32 },
    SetStrokeStyle { color: Rgba },
    SetFillStyle { color: Rgba },
    SetLineWidth { width: f32 },
    SetLineCap { cap: LineCap },
    SetLineJoin { join: LineJoin },
    SetGlobalAlpha { alpha: f32 },
    SetComposite { mode: CompositeMode },
    SetShadowColor { color: Rgba },
    SetShadowBlur { blur: f32 },
}

/// Paint context that records calls instead of drawing
#[derive(Debug, Clone, Default)]
pub struct RecordingContext {
    state: DrawState,
    commands: Vec<DrawCommand>,
}

impl RecordingContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// All calls recorded so far
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Take the recorded calls, leaving the state untouched
    pub fn take_commands(&mut self) -> Vec<DrawCommand> {
        std::mem::take(&mut self.commands)
    }

    /// Number of `stroke()` calls recorded
    pub fn stroke_count(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Stroke))
    }

    /// Number of `fill()` calls recorded
    pub fn fill_count(&self) -> usize {
        self.count(|c| matches!(c, DrawCommand::Fill))
    }

    pub fn count(&self, predicate: impl Fn(&DrawCommand) -> bool) -> usize {
        self.commands.iter().filter(|c| predicate(c)).count()
    }

    /// Serialize the log as JSON (for golden files)
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.commands)
    }

    fn push(&mut self, command: DrawCommand) {
        self.commands.push(command);
    }
}

impl PaintContext for RecordingContext {
    fn begin_path(&mut self) {
        self.push(DrawCommand::BeginPath);
    }

    fn close_path(&mut self) {
        self.push(DrawCommand::ClosePath);
    }

    fn move_to(&mut self, point: Point) {
        self.push(DrawCommand::MoveTo { point });
    }

    fn line_to(&mut self, point: Point) {
        self.push(DrawCommand::LineTo { point });
    }

    fn quadratic_curve_to(&mut self, control: Point, to: Point) {
        self.push(DrawCommand::QuadraticCurveTo { control, to });
    }

    fn stroke(&mut self) {
        self.push(DrawCommand::Stroke);
    }

    fn fill(&mut self) {
        self.push(DrawCommand::Fill);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.push(DrawCommand::FillRect { x, y, width, height });
    }

    fn state(&self) -> &DrawState {
        &self.state
    }

    fn state_mut(&mut self) -> &mut DrawState {
        &mut self.state
    }

    fn set_stroke_style(&mut self, color: Rgba) {
        self.state.stroke_style = color;
        self.push(DrawCommand::SetStrokeStyle { color });
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.state.fill_style = color;
        self.push(DrawCommand::SetFillStyle { color });
    }

    fn set_line_width(&mut self, width: f32) {
        if width > 0.0 && width.is_finite() {
            self.state.line_width = width;
            self.push(DrawCommand::SetLineWidth { width });
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state.line_cap = cap;
        self.push(DrawCommand::SetLineCap { cap });
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.state.line_join = join;
        self.push(DrawCommand::SetLineJoin { join });
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        if (0.0..=1.0).contains(&alpha) {
            self.state.global_alpha = alpha;
            self.push(DrawCommand::SetGlobalAlpha { alpha });
        }
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.state.composite = mode;
        self.push(DrawCommand::SetComposite { mode });
    }

    fn set_shadow_color(&mut self, color: Rgba) {
        self.state.shadow_color = color;
        self.push(DrawCommand::SetShadowColor { color });
    }

    fn set_shadow_blur(&mut self, blur: f32) {
        if blur >= 0.0 && blur.is_finite() {
            self.state.shadow_blur = blur;
            self.push(DrawCommand::SetShadowBlur { blur });
        }
    }
}
