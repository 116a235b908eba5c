//! Watercolor splodges
//!
//! A splodge is a regular polygon whose edges are recursively subdivided
//! with normally distributed midpoint displacement, filled at very low
//! alpha. A stroke lays splodges along the recent trail, older ones wider
//! and fainter, so pigment appears to bleed outwards.

use artboard_config::DEFAULT_STROKE_WIDTH;

use super::Tool;
use crate::constants::{
    DEFORM_DEPTH, DEFORM_VARIANCE_DIVISOR, WATERCOLOR_ALPHA_FALLOFF, WATERCOLOR_BASE_ALPHA,
    WATERCOLOR_START_SCALE, WATERCOLOR_TRAIL,
};
use crate::context::PaintContext;
use crate::cursor::CursorHint;
use crate::random::StrokeRng;
use crate::types::{CompositeMode, Point, Rgba};

use std::f32::consts::TAU;

/// Smallest polygon a splodge starts from
const MIN_SPLODGE_SIDES: usize = 3;

/// Vertices of a regular polygon, the first one a single step past angle 0
pub fn make_polygon(center: Point, sides: usize, radius: f32) -> Vec<Point> {
    if sides == 0 {
        return Vec::new();
    }
    let increment = TAU / sides as f32;
    (1..=sides)
        .map(|i| {
            let angle = increment * i as f32;
            Point::new(radius * angle.cos() + center.x, radius * angle.sin() + center.y)
        })
        .collect()
}

/// Subdivide every edge `depth` times, displacing each new midpoint by a
/// normal sample scaled by `variance`; variance is divided by `vdiv` per
/// level. The original vertices are kept in order; depth 0 returns them
/// unchanged.
pub fn deform_polygon(
    points: &[Point],
    depth: u32,
    variance: f32,
    vdiv: f32,
    rng: &mut StrokeRng,
) -> Vec<Point> {
    let n = points.len();
    let mut out = Vec::with_capacity(n << depth.min(16));
    for (i, &current) in points.iter().enumerate() {
        let next = points[(i + 1) % n];
        out.push(current);
        subdivide(current, next, depth, variance, vdiv, rng, &mut out);
    }
    out
}

fn subdivide(
    from: Point,
    to: Point,
    depth: u32,
    variance: f32,
    vdiv: f32,
    rng: &mut StrokeRng,
    out: &mut Vec<Point>,
) {
    if depth == 0 {
        return;
    }
    let mid = from.midpoint(to);
    let nudged = Point::new(mid.x + rng.normal() * variance, mid.y + rng.normal() * variance);

    subdivide(from, nudged, depth - 1, variance / vdiv, vdiv, rng, out);
    out.push(nudged);
    subdivide(nudged, to, depth - 1, variance / vdiv, vdiv, rng, out);
}

/// Outline of one splodge of the given radius
pub fn get_splodge(center: Point, sides: usize, radius: f32, rng: &mut StrokeRng) -> Vec<Point> {
    let polygon = make_polygon(center, sides, radius);
    deform_polygon(&polygon, DEFORM_DEPTH, radius / 10.0, DEFORM_VARIANCE_DIVISOR, rng)
}

/// Fill one splodge centred on `point`
pub fn splodge_at_point(point: Point, width: f32, ctx: &mut dyn PaintContext, rng: &mut StrokeRng) {
    let sides = ((width / 5.0).round() as usize).max(MIN_SPLODGE_SIDES);
    ctx.begin_path();
    for vertex in get_splodge(point, sides, width, rng) {
        ctx.line_to(vertex);
    }
    ctx.close_path();
    ctx.fill();
}

/// Splodges at up to `trail` of the most recent points, every third one
/// back, fading from the base alpha and widening with age
///
/// Global alpha is left at the last splodge's value; the tool restores it
/// when the stroke ends.
pub fn splodge_trail(
    points: &[Point],
    width: f32,
    trail: usize,
    ctx: &mut dyn PaintContext,
    rng: &mut StrokeRng,
) {
    let len = points.len();
    let count = (trail as f32).min(len as f32 / 3.0);
    let mut i = 0usize;
    while (i as f32) < count {
        let age = i as f32;
        ctx.set_global_alpha(WATERCOLOR_BASE_ALPHA - (WATERCOLOR_ALPHA_FALLOFF / count) * age);
        splodge_at_point(points[len - i * 3 - 1], width + (width / count) * age, ctx, rng);
        i += 1;
    }
}

#[derive(Debug, Clone)]
pub struct Watercolor {
    color: Rgba,
    width: f32,
    trail: Vec<Point>,
    rng: StrokeRng,
}

impl Watercolor {
    pub fn new(color: Rgba, width: f32) -> Self {
        Self {
            color,
            width,
            trail: Vec::new(),
            rng: StrokeRng::default(),
        }
    }

    pub fn with_rng(mut self, rng: StrokeRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn trail(&self) -> &[Point] {
        &self.trail
    }
}

impl Default for Watercolor {
    fn default() -> Self {
        Self::new(Rgba::BLACK, DEFAULT_STROKE_WIDTH)
    }
}

impl Tool for Watercolor {
    fn name(&self) -> &str {
        "Watercolor"
    }

    fn cursor(&self) -> Option<CursorHint> {
        Some(CursorHint::circle(self.width))
    }

    /// A tap still leaves one faint splodge
    fn start_stroke(&mut self, point: Point, ctx: &mut dyn PaintContext) {
        ctx.set_fill_style(self.color);
        ctx.set_shadow_color(self.color);
        ctx.set_global_alpha(WATERCOLOR_BASE_ALPHA);
        self.trail.clear();
        self.trail.push(point);
        splodge_trail(&self.trail, self.width * WATERCOLOR_START_SCALE, 1, ctx, &mut self.rng);
    }

    fn continue_stroke(&mut self, point: Point, ctx: &mut dyn PaintContext) {
        self.trail.push(point);
        splodge_trail(&self.trail, self.width, WATERCOLOR_TRAIL, ctx, &mut self.rng);
    }

    fn end_stroke(&mut self, ctx: &mut dyn PaintContext) {
        self.trail.clear();
        ctx.set_global_alpha(1.0);
        ctx.set_composite(CompositeMode::SourceOver);
    }
}
