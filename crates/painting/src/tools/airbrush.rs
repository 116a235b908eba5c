//! Soft airbrush: one continuous darkening path with a wide shadow halo

use artboard_config::DEFAULT_STROKE_WIDTH;

use super::Tool;
use crate::constants::{AIRBRUSH_BLUR_FACTOR, AIRBRUSH_SHADOW_ALPHA};
use crate::context::PaintContext;
use crate::cursor::CursorHint;
use crate::types::{CompositeMode, LineCap, LineJoin, Point, Rgba};

#[derive(Debug, Clone)]
pub struct Airbrush {
    color: Rgba,
    width: f32,
}

impl Airbrush {
    pub fn new(color: Rgba, width: f32) -> Self {
        Self { color, width }
    }
}

impl Default for Airbrush {
    fn default() -> Self {
        Self::new(Rgba::BLACK, DEFAULT_STROKE_WIDTH)
    }
}

impl Tool for Airbrush {
    fn name(&self) -> &str {
        "Airbrush"
    }

    fn cursor(&self) -> Option<CursorHint> {
        Some(CursorHint::circle(self.width))
    }

    fn start_stroke(&mut self, point: Point, ctx: &mut dyn PaintContext) {
        ctx.set_composite(CompositeMode::Darken);
        ctx.set_line_width(self.width);
        ctx.set_line_cap(LineCap::Round);
        ctx.set_line_join(LineJoin::Round);
        ctx.set_stroke_style(self.color);
        ctx.set_shadow_blur(self.width * AIRBRUSH_BLUR_FACTOR);
        ctx.set_shadow_color(self.color.with_alpha(AIRBRUSH_SHADOW_ALPHA));
        ctx.begin_path();
        ctx.move_to(point);
    }

    /// The whole path is re-stroked each time; darken keeps overlaps from
    /// building up
    fn continue_stroke(&mut self, point: Point, ctx: &mut dyn PaintContext) {
        ctx.line_to(point);
        ctx.stroke();
    }

    fn end_stroke(&mut self, ctx: &mut dyn PaintContext) {
        ctx.begin_path();
        ctx.set_shadow_blur(0.0);
        ctx.set_composite(CompositeMode::SourceOver);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recording::{DrawCommand, RecordingContext};

    #[test]
    fn test_airbrush_state_during_stroke() {
        let color = Rgba::from_hex("#204080").unwrap();
        let mut airbrush = Airbrush::new(color, 20.0);
        let mut ctx = RecordingContext::new();
        airbrush.start_stroke(Point::new(1.0, 1.0), &mut ctx);

        assert_eq!(ctx.composite(), CompositeMode::Darken);
        assert_eq!(ctx.line_width(), 20.0);
        assert_eq!(ctx.state().shadow_blur, 10.0);
        assert_eq!(ctx.state().shadow_color, color.with_alpha(0.5));

        airbrush.continue_stroke(Point::new(5.0, 5.0), &mut ctx);
        airbrush.continue_stroke(Point::new(9.0, 5.0), &mut ctx);
        assert_eq!(ctx.stroke_count(), 2);
        // Path accumulates from the start point
        assert_eq!(ctx.count(|c| matches!(c, DrawCommand::MoveTo { .. })), 1);

        airbrush.end_stroke(&mut ctx);
        assert_eq!(ctx.composite(), CompositeMode::SourceOver);
        assert_eq!(ctx.state().shadow_blur, 0.0);
    }
}
