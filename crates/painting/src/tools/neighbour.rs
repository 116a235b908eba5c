//! Neighbour hatching (the sketch and shading tools)
//!
//! Each new sample is joined to the previous one, then to earlier samples
//! of the same stroke at random: the closer a sample, the likelier a faint
//! link. Dense scribbling therefore fills in with cross-hatching while
//! long sweeps stay clean.

use tracing::debug;

use artboard_config::DEFAULT_NEIGHBOUR_LINE_WIDTH;

use super::Tool;
use crate::constants::{SHADING_DISTANCE, SHADING_SPREAD, SKETCH_DISTANCE, SKETCH_SPREAD};
use crate::context::PaintContext;
use crate::cursor::CursorHint;
use crate::random::StrokeRng;
use crate::types::{CompositeMode, LineCap, LineJoin, Point, Rgba};

/// Alpha of the default link colour
const NEIGHBOUR_ALPHA: f32 = 0.2;

/// Tuning for one flavour of the hatching tool
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NeighbourPreset {
    pub name: &'static str,
    /// Samples at or beyond this distance are never linked
    pub distance_threshold: f32,
    /// How far past each endpoint a link reaches, as a fraction of its length
    pub spread_factor: f32,
}

/// Long, loose links
pub const SKETCH: NeighbourPreset = NeighbourPreset {
    name: "Sketch",
    distance_threshold: SKETCH_DISTANCE,
    spread_factor: SKETCH_SPREAD,
};

/// Short, dense links
pub const SHADING: NeighbourPreset = NeighbourPreset {
    name: "Shading",
    distance_threshold: SHADING_DISTANCE,
    spread_factor: SHADING_SPREAD,
};

#[derive(Debug, Clone)]
pub struct NeighbourBrush {
    preset: NeighbourPreset,
    color: Rgba,
    neighbour_color: Rgba,
    line_width: f32,
    max_trail: Option<usize>,
    trail: Vec<Point>,
    rng: StrokeRng,
}

impl NeighbourBrush {
    pub fn new(preset: NeighbourPreset, color: Rgba) -> Self {
        Self {
            preset,
            color,
            neighbour_color: color.with_alpha(NEIGHBOUR_ALPHA),
            line_width: DEFAULT_NEIGHBOUR_LINE_WIDTH,
            max_trail: None,
            trail: Vec::new(),
            rng: StrokeRng::default(),
        }
    }

    pub fn sketch(color: Rgba) -> Self {
        Self::new(SKETCH, color)
    }

    pub fn shading(color: Rgba) -> Self {
        Self::new(SHADING, color)
    }

    pub fn with_neighbour_color(mut self, color: Rgba) -> Self {
        self.neighbour_color = color;
        self
    }

    /// Width of the links (the direct segment is always one pixel)
    pub fn with_line_width(mut self, width: f32) -> Self {
        self.line_width = width;
        self
    }

    /// Keep only the most recent samples; bounds the per-sample cost of
    /// very long strokes
    pub fn with_max_trail(mut self, max_trail: Option<usize>) -> Self {
        self.max_trail = max_trail.map(|n| n.max(1));
        self
    }

    pub fn with_rng(mut self, rng: StrokeRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn preset(&self) -> &NeighbourPreset {
        &self.preset
    }

    /// Samples recorded so far in this stroke
    pub fn trail(&self) -> &[Point] {
        &self.trail
    }
}

impl Tool for NeighbourBrush {
    fn name(&self) -> &str {
        self.preset.name
    }

    fn cursor(&self) -> Option<CursorHint> {
        Some(CursorHint::Crosshair)
    }

    fn start_stroke(&mut self, point: Point, ctx: &mut dyn PaintContext) {
        ctx.set_composite(CompositeMode::Darken);
        ctx.set_line_width(1.0);
        ctx.set_line_cap(LineCap::Round);
        ctx.set_line_join(LineJoin::Round);
        self.trail.clear();
        self.trail.push(point);
    }

    fn continue_stroke(&mut self, point: Point, ctx: &mut dyn PaintContext) {
        let Some(&previous) = self.trail.last() else {
            self.trail.push(point);
            return;
        };

        ctx.set_stroke_style(self.color);
        ctx.set_line_width(1.0);
        ctx.begin_path();
        ctx.move_to(previous);
        ctx.line_to(point);
        ctx.stroke();
        ctx.set_line_width(self.line_width);

        let threshold_sq = self.preset.distance_threshold * self.preset.distance_threshold;
        let spread = self.preset.spread_factor;
        let mut links = 0usize;
        for &neighbour in &self.trail {
            let dx = neighbour.x - point.x;
            let dy = neighbour.y - point.y;
            let distance_sq = dx * dx + dy * dy;
            if distance_sq >= threshold_sq || self.rng.unit() <= distance_sq / threshold_sq {
                continue;
            }
            ctx.begin_path();
            ctx.set_stroke_style(self.neighbour_color);
            ctx.move_to(Point::new(point.x + dx * spread, point.y + dy * spread));
            ctx.line_to(Point::new(neighbour.x - dx * spread, neighbour.y - dy * spread));
            ctx.stroke();
            links += 1;
        }

        self.trail.push(point);
        if let Some(max) = self.max_trail {
            if self.trail.len() > max {
                let excess = self.trail.len() - max;
                self.trail.drain(..excess);
            }
        }
        if links > 0 {
            debug!("{}: {} links from ({:.1}, {:.1})", self.preset.name, links, point.x, point.y);
        }
    }

    fn end_stroke(&mut self, ctx: &mut dyn PaintContext) {
        self.trail.clear();
        ctx.set_composite(CompositeMode::SourceOver);
    }
}
