//! Eraser: paints the surface background over existing ink

use artboard_config::DEFAULT_STROKE_WIDTH;

use super::Tool;
use crate::context::PaintContext;
use crate::cursor::CursorHint;
use crate::types::{CompositeMode, LineCap, LineJoin, Point, Rgba};

#[derive(Debug, Clone)]
pub struct Eraser {
    width: f32,
    background: Rgba,
}

impl Eraser {
    pub fn new(width: f32) -> Self {
        Self {
            width,
            background: Rgba::WHITE,
        }
    }

    /// Erase to a background other than white
    pub fn with_background(mut self, background: Rgba) -> Self {
        self.background = background;
        self
    }
}

impl Default for Eraser {
    fn default() -> Self {
        Self::new(DEFAULT_STROKE_WIDTH)
    }
}

impl Tool for Eraser {
    fn name(&self) -> &str {
        "Eraser"
    }

    fn cursor(&self) -> Option<CursorHint> {
        Some(CursorHint::circle(self.width))
    }

    fn start_stroke(&mut self, point: Point, ctx: &mut dyn PaintContext) {
        ctx.set_composite(CompositeMode::SourceOver);
        ctx.set_global_alpha(1.0);
        ctx.set_shadow_blur(0.0);
        ctx.set_line_width(self.width);
        ctx.set_stroke_style(self.background);
        ctx.set_line_cap(LineCap::Round);
        ctx.set_line_join(LineJoin::Round);
        ctx.begin_path();
        ctx.move_to(point);
    }

    fn continue_stroke(&mut self, point: Point, ctx: &mut dyn PaintContext) {
        ctx.line_to(point);
        ctx.stroke();
    }

    fn end_stroke(&mut self, ctx: &mut dyn PaintContext) {
        ctx.begin_path();
        ctx.set_composite(CompositeMode::SourceOver);
    }
}
