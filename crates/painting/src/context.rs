//! The drawing-surface contract tools paint through
//!
//! [`PaintContext`] mirrors the subset of an immediate-mode 2D canvas API the
//! tools need: path building, stroke/fill with persistent style state,
//! global alpha, compositing, and shadow. Settings persist across calls and
//! across tool switches, so tools restore the composite mode they change.

use serde::{Deserialize, Serialize};

use crate::types::{CompositeMode, LineCap, LineJoin, Point, Rgba};

/// Persistent drawing state carried by a context
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DrawState {
    pub stroke_style: Rgba,
    pub fill_style: Rgba,
    pub line_width: f32,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub global_alpha: f32,
    pub composite: CompositeMode,
    pub shadow_color: Rgba,
    pub shadow_blur: f32,
}

impl Default for DrawState {
    fn default() -> Self {
        Self {
            stroke_style: Rgba::BLACK,
            fill_style: Rgba::BLACK,
            line_width: 1.0,
            line_cap: LineCap::Butt,
            line_join: LineJoin::Miter,
            global_alpha: 1.0,
            composite: CompositeMode::SourceOver,
            shadow_color: Rgba::TRANSPARENT,
            shadow_blur: 0.0,
        }
    }
}

/// Mutable 2D paint target
///
/// Coordinates share one unscaled pixel space with the surface.
pub trait PaintContext {
    /// Discard the current path
    fn begin_path(&mut self);
    /// Close the current subpath back to its first point
    fn close_path(&mut self);
    /// Start a new subpath
    fn move_to(&mut self, point: Point);
    /// Extend the current subpath; with no current point this acts as `move_to`
    fn line_to(&mut self, point: Point);
    /// Quadratic Bézier from the current point through `control` to `to`
    fn quadratic_curve_to(&mut self, control: Point, to: Point);
    /// Stroke the current path with the stroke style
    fn stroke(&mut self);
    /// Fill the current path (nonzero winding) with the fill style
    fn fill(&mut self);
    /// Fill an axis-aligned rectangle with the fill style, ignoring the path
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    fn state(&self) -> &DrawState;
    fn state_mut(&mut self) -> &mut DrawState;

    fn set_stroke_style(&mut self, color: Rgba) {
        self.state_mut().stroke_style = color;
    }

    fn set_fill_style(&mut self, color: Rgba) {
        self.state_mut().fill_style = color;
    }

    fn set_line_width(&mut self, width: f32) {
        if width > 0.0 && width.is_finite() {
            self.state_mut().line_width = width;
        }
    }

    fn set_line_cap(&mut self, cap: LineCap) {
        self.state_mut().line_cap = cap;
    }

    fn set_line_join(&mut self, join: LineJoin) {
        self.state_mut().line_join = join;
    }

    fn set_global_alpha(&mut self, alpha: f32) {
        if (0.0..=1.0).contains(&alpha) {
            self.state_mut().global_alpha = alpha;
        }
    }

    fn set_composite(&mut self, mode: CompositeMode) {
        self.state_mut().composite = mode;
    }

    fn set_shadow_color(&mut self, color: Rgba) {
        self.state_mut().shadow_color = color;
    }

    fn set_shadow_blur(&mut self, blur: f32) {
        if blur >= 0.0 && blur.is_finite() {
            self.state_mut().shadow_blur = blur;
        }
    }

    fn composite(&self) -> CompositeMode {
        self.state().composite
    }

    fn global_alpha(&self) -> f32 {
        self.state().global_alpha
    }

    fn line_width(&self) -> f32 {
        self.state().line_width
    }
}
