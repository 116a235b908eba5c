//! Pointer handling for the artboard

use tracing::debug;

use crate::context::PaintContext;
use crate::history::SnapshotTarget;
use crate::tools::{ActiveTool, Tool};
use crate::types::Point;

use super::Artboard;

impl<C: PaintContext + SnapshotTarget> Artboard<C> {
    /// Primary button pressed or touch began: start a stroke
    ///
    /// Returns false if unmounted or a stroke is already running.
    pub fn pointer_down(&mut self, point: Point) -> bool {
        let Some(ctx) = self.context.as_mut() else {
            debug!("pointer_down: not mounted, ignoring");
            return false;
        };
        if self.drawing {
            return false;
        }
        self.tool.start_stroke(point, ctx);
        self.drawing = true;
        true
    }

    /// Pointer moved; feeds the stroke only while drawing
    pub fn pointer_move(&mut self, point: Point) -> bool {
        if !self.drawing {
            return false;
        }
        let Some(ctx) = self.context.as_mut() else {
            return false;
        };
        self.tool.continue_stroke(point, ctx);
        true
    }

    /// Button released or touch ended: finish the stroke and snapshot
    pub fn pointer_up(&mut self) -> bool {
        self.finish_stroke()
    }

    /// Pointer left the surface: the exit point still counts, then the
    /// stroke ends
    pub fn pointer_leave(&mut self, point: Point) -> bool {
        if !self.drawing {
            return false;
        }
        self.pointer_move(point);
        self.finish_stroke()
    }

    /// Pointer re-entered: resume drawing if the primary button is still
    /// held, otherwise close any stroke left open
    pub fn pointer_enter(&mut self, point: Point, primary_down: bool) -> bool {
        if primary_down {
            self.pointer_down(point)
        } else if self.drawing {
            self.finish_stroke()
        } else {
            false
        }
    }

    /// Check if a stroke is currently in progress
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    /// Switch tools, finishing any stroke in progress with the old one
    pub fn set_tool(&mut self, tool: ActiveTool) {
        if self.drawing {
            debug!("set_tool: finishing stroke before switching from {}", self.tool.name());
            self.finish_stroke();
        }
        self.tool = tool;
    }

    /// End the stroke without recording a snapshot
    ///
    /// The ink already laid down stays; undo to the previous snapshot to
    /// remove it.
    pub fn cancel_stroke(&mut self) -> bool {
        if !self.drawing {
            return false;
        }
        self.drawing = false;
        if let Some(ctx) = self.context.as_mut() {
            self.tool.end_stroke(ctx);
        }
        true
    }

    fn finish_stroke(&mut self) -> bool {
        if !self.drawing {
            return false;
        }
        self.drawing = false;
        let Some(ctx) = self.context.as_mut() else {
            return false;
        };
        self.tool.end_stroke(ctx);
        self.record_snapshot();
        true
    }
}

#[cfg(test)]
mod tests {
    use crate::artboard::Artboard;
    use crate::history::History;
    use crate::raster::RasterContext;
    use crate::tools::{ActiveTool, Airbrush, Marker, Tool};
    use crate::types::{CompositeMode, Point, Rgba};
    use crate::context::PaintContext;

    fn mounted(tool: ActiveTool) -> Artboard<RasterContext> {
        let mut artboard = Artboard::new(tool).with_history(History::new());
        artboard.mount(RasterContext::new(64, 64));
        artboard
    }

    fn marker() -> ActiveTool {
        ActiveTool::Marker(Marker::new(Rgba::BLACK, 6.0))
    }

    #[test]
    fn test_stroke_lifecycle_pushes_snapshot() {
        let mut artboard = mounted(marker());
        assert!(artboard.pointer_down(Point::new(10.0, 10.0)));
        assert!(artboard.is_drawing());
        assert!(!artboard.pointer_down(Point::new(11.0, 11.0)));
        assert!(artboard.pointer_move(Point::new(40.0, 30.0)));
        assert!(artboard.pointer_up());

        assert!(!artboard.is_drawing());
        assert_eq!(artboard.history().unwrap().len(), 2);
        assert!(artboard.can_undo());
        let ctx = artboard.context().unwrap();
        assert!(ctx.get_pixel(25, 20).unwrap().r < 1.0);
    }

    #[test]
    fn test_move_without_down_is_ignored() {
        let mut artboard = mounted(marker());
        assert!(!artboard.pointer_move(Point::new(5.0, 5.0)));
        assert!(!artboard.pointer_up());
        assert_eq!(artboard.history().unwrap().len(), 1);
    }

    #[test]
    fn test_leave_ends_stroke() {
        let mut artboard = mounted(marker());
        artboard.pointer_down(Point::new(10.0, 10.0));
        assert!(artboard.pointer_leave(Point::new(63.0, 10.0)));
        assert!(!artboard.is_drawing());
        assert_eq!(artboard.history().unwrap().len(), 2);
        assert!(!artboard.pointer_leave(Point::new(63.0, 12.0)));
    }

    #[test]
    fn test_enter_with_button_resumes() {
        let mut artboard = mounted(marker());
        assert!(artboard.pointer_enter(Point::new(0.0, 5.0), true));
        assert!(artboard.is_drawing());
        assert!(artboard.pointer_enter(Point::new(0.0, 5.0), false));
        assert!(!artboard.is_drawing());
        assert!(!artboard.pointer_enter(Point::new(0.0, 5.0), false));
    }

    #[test]
    fn test_set_tool_finishes_stroke() {
        let airbrush = ActiveTool::Airbrush(Airbrush::new(Rgba::BLACK, 10.0));
        let mut artboard = mounted(airbrush);
        artboard.pointer_down(Point::new(10.0, 10.0));
        artboard.pointer_move(Point::new(20.0, 10.0));
        assert_eq!(artboard.context().unwrap().composite(), CompositeMode::Darken);

        artboard.set_tool(marker());
        assert!(!artboard.is_drawing());
        assert_eq!(artboard.tool().name(), "Marker");
        assert_eq!(artboard.context().unwrap().composite(), CompositeMode::SourceOver);
        assert_eq!(artboard.history().unwrap().len(), 2);
    }

    #[test]
    fn test_cancel_skips_snapshot() {
        let mut artboard = mounted(marker());
        artboard.pointer_down(Point::new(10.0, 10.0));
        artboard.pointer_move(Point::new(30.0, 10.0));
        assert!(artboard.cancel_stroke());
        assert!(!artboard.is_drawing());
        assert_eq!(artboard.history().unwrap().len(), 1);
    }
}
