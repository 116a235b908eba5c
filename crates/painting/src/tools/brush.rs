//! Bristle brush
//!
//! A brush is a row of bristles generated once per stroke. Each segment of
//! the stroke is drawn bristle by bristle as a quadratic curve whose
//! endpoints are rotated to the old and new stroke directions, so the row
//! twists smoothly around corners.

use tracing::debug;

use artboard_config::{DEFAULT_STROKE_WIDTH, DEFAULT_VARY_BRIGHTNESS};

use super::Tool;
use crate::constants::{BRISTLE_SPACING, BRISTLE_THICKNESS_MAX, BRISTLE_THICKNESS_MIN};
use crate::context::PaintContext;
use crate::cursor::CursorHint;
use crate::geometry::{rotate_point, smoothed_angle};
use crate::random::StrokeRng;
use crate::types::{CompositeMode, LineCap, LineJoin, Point, Rgba};

use std::f32::consts::TAU;

/// One simulated fibre
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bristle {
    /// Distance from the first bristle across the stroke
    pub offset: f32,
    pub thickness: f32,
    pub color: Rgba,
}

/// Generate a row of bristles for a stroke of `width`
///
/// Count is `round(width / 3)` (at least one), spaced `width / count` apart
/// with every bristle after the first jittered around its slot. Colours are
/// darkened by up to `vary_brightness` steps with alpha in (0.75, 1].
pub fn make_brush(width: f32, color: Rgba, vary_brightness: f32, rng: &mut StrokeRng) -> Vec<Bristle> {
    let count = ((width / BRISTLE_SPACING).round() as usize).max(1);
    let gap = width / count as f32;

    (0..count)
        .map(|i| {
            let offset = if i == 0 {
                0.0
            } else {
                gap * i as f32 + rng.unit() * gap / 2.0 - gap / 2.0
            };
            let thickness = rng.uniform(BRISTLE_THICKNESS_MIN, BRISTLE_THICKNESS_MAX);
            Bristle {
                offset,
                thickness,
                color: vary_color(color, vary_brightness, rng),
            }
        })
        .collect()
}

fn vary_color(color: Rgba, vary_brightness: f32, rng: &mut StrokeRng) -> Rgba {
    let amount = (rng.unit() * vary_brightness).round();
    let alpha = 1.0 - rng.unit() / 4.0;
    color.darken(amount).with_alpha(alpha)
}

/// Draw one stroke segment with every bristle
pub fn draw_stroke(
    bristles: &[Bristle],
    origin: Point,
    destination: Point,
    old_angle: f32,
    new_angle: f32,
    width: f32,
    ctx: &mut dyn PaintContext,
) {
    for bristle in bristles {
        let distance = bristle.offset - width / 2.0;
        let start = rotate_point(distance, old_angle, origin);
        let end = rotate_point(distance, new_angle, destination);
        let control = rotate_point(distance, new_angle, origin);

        ctx.begin_path();
        ctx.move_to(start);
        ctx.set_stroke_style(bristle.color);
        ctx.set_line_width(bristle.thickness);
        ctx.set_line_cap(LineCap::Round);
        ctx.set_line_join(LineJoin::Round);
        ctx.set_shadow_color(bristle.color);
        ctx.set_shadow_blur(bristle.thickness / 2.0);
        ctx.quadratic_curve_to(control, end);
        ctx.line_to(end);
        ctx.stroke();
    }
}

/// Per-stroke state: where the pointer was and which way the row faced
#[derive(Debug, Clone, Copy, Default)]
struct StrokeState {
    last_point: Option<Point>,
    angle: Option<f32>,
}

/// Multi-bristle brush tool
#[derive(Debug, Clone)]
pub struct BristleBrush {
    color: Rgba,
    width: f32,
    vary_brightness: f32,
    rng: StrokeRng,
    bristles: Vec<Bristle>,
    state: StrokeState,
}

impl BristleBrush {
    pub fn new(color: Rgba, width: f32) -> Self {
        Self {
            color,
            width,
            vary_brightness: DEFAULT_VARY_BRIGHTNESS,
            rng: StrokeRng::default(),
            bristles: Vec::new(),
            state: StrokeState::default(),
        }
    }

    pub fn with_vary_brightness(mut self, vary_brightness: f32) -> Self {
        self.vary_brightness = vary_brightness.max(0.0);
        self
    }

    pub fn with_rng(mut self, rng: StrokeRng) -> Self {
        self.rng = rng;
        self
    }

    /// Bristles of the current (or last) stroke
    pub fn bristles(&self) -> &[Bristle] {
        &self.bristles
    }
}

impl Default for BristleBrush {
    fn default() -> Self {
        Self::new(Rgba::BLACK, DEFAULT_STROKE_WIDTH)
    }
}

impl Tool for BristleBrush {
    fn name(&self) -> &str {
        "Brush"
    }

    fn cursor(&self) -> Option<CursorHint> {
        Some(CursorHint::circle(self.width))
    }

    fn start_stroke(&mut self, point: Point, _ctx: &mut dyn PaintContext) {
        self.bristles = make_brush(self.width, self.color, self.vary_brightness, &mut self.rng);
        self.state = StrokeState {
            last_point: Some(point),
            angle: None,
        };
        debug!("BristleBrush: start at ({:.1}, {:.1}), {} bristles", point.x, point.y, self.bristles.len());
    }

    fn continue_stroke(&mut self, point: Point, ctx: &mut dyn PaintContext) {
        let Some(last) = self.state.last_point else {
            self.state.last_point = Some(point);
            return;
        };

        let new_angle = smoothed_angle(last, point, self.state.angle);
        let old_angle = *self.state.angle.get_or_insert(new_angle % TAU);
        draw_stroke(&self.bristles, last, point, old_angle, new_angle, self.width, ctx);

        self.state.angle = Some(new_angle % TAU);
        self.state.last_point = Some(point);
    }

    fn end_stroke(&mut self, ctx: &mut dyn PaintContext) {
        self.state = StrokeState::default();
        ctx.set_shadow_blur(0.0);
        ctx.set_composite(CompositeMode::SourceOver);
    }
}
