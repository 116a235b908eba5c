//! Flat-nib marker

use artboard_config::DEFAULT_STROKE_WIDTH;

use super::Tool;
use crate::constants::{MARKER_LINE_WIDTH, MARKER_PASS_STEP};
use crate::context::PaintContext;
use crate::cursor::CursorHint;
use crate::types::{CompositeMode, LineCap, LineJoin, Point, Rgba};

/// Draws each segment as a fan of thin diagonal passes that fade towards
/// one edge of the nib
#[derive(Debug, Clone)]
pub struct Marker {
    color: Rgba,
    width: f32,
    last_point: Option<Point>,
}

impl Marker {
    pub fn new(color: Rgba, width: f32) -> Self {
        Self {
            color,
            width,
            last_point: None,
        }
    }
}

impl Default for Marker {
    fn default() -> Self {
        Self::new(Rgba::BLACK, DEFAULT_STROKE_WIDTH)
    }
}

impl Tool for Marker {
    fn name(&self) -> &str {
        "Marker"
    }

    fn cursor(&self) -> Option<CursorHint> {
        Some(CursorHint::circle(self.width))
    }

    fn start_stroke(&mut self, point: Point, ctx: &mut dyn PaintContext) {
        ctx.set_line_width(MARKER_LINE_WIDTH);
        ctx.set_line_cap(LineCap::Round);
        ctx.set_line_join(LineJoin::Round);
        ctx.set_stroke_style(self.color);
        self.last_point = Some(point);
    }

    fn continue_stroke(&mut self, point: Point, ctx: &mut dyn PaintContext) {
        let Some(last) = self.last_point else {
            self.last_point = Some(point);
            return;
        };
        if last == point {
            return;
        }

        let width = self.width;
        let mut i = 0usize;
        while (i as f32) < width {
            let step = i as f32;
            // Halves round up so odd widths stay centred
            let offset = (width / 2.0 - step + 0.5).floor();
            ctx.set_global_alpha((width - step) / width);
            ctx.begin_path();
            ctx.move_to(Point::new(last.x - offset, last.y - offset));
            ctx.line_to(Point::new(point.x - offset, point.y - offset));
            ctx.stroke();
            i += MARKER_PASS_STEP;
        }
        ctx.begin_path();

        self.last_point = Some(point);
    }

    fn end_stroke(&mut self, ctx: &mut dyn PaintContext) {
        self.last_point = None;
        ctx.set_global_alpha(1.0);
        ctx.set_composite(CompositeMode::SourceOver);
    }
}
