//! Anti-aliased coverage masks for strokes and fills

use crate::types::{LineCap, Point};

use super::path::Path;

/// Vertical samples per pixel row when filling
const FILL_SUBSAMPLES: u32 = 4;

/// Per-pixel coverage (0..1) over a rectangle of the surface
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageMask {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    data: Vec<f32>,
}

impl CoverageMask {
    /// Mask over `[min, max]` padded by `margin`, clamped to the surface.
    /// Returns None if the clamped region is empty.
    pub fn covering(min: Point, max: Point, margin: f32, surface: (u32, u32)) -> Option<Self> {
        let clamp = |v: f32, limit: u32| v.max(0.0).min(limit as f32) as u32;
        let x0 = clamp((min.x - margin).floor(), surface.0);
        let y0 = clamp((min.y - margin).floor(), surface.1);
        let x1 = clamp((max.x + margin).ceil(), surface.0);
        let y1 = clamp((max.y + margin).ceil(), surface.1);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        let (width, height) = (x1 - x0, y1 - y0);
        Some(Self {
            x: x0,
            y: y0,
            width,
            height,
            data: vec![0.0; (width as usize) * (height as usize)],
        })
    }

    #[inline]
    fn index(&self, px: u32, py: u32) -> Option<usize> {
        if px < self.x || py < self.y || px >= self.x + self.width || py >= self.y + self.height {
            return None;
        }
        Some(((py - self.y) as usize) * (self.width as usize) + (px - self.x) as usize)
    }

    /// Coverage at a surface pixel (0 outside the mask)
    pub fn get(&self, px: u32, py: u32) -> f32 {
        self.index(px, py).map_or(0.0, |i| self.data[i])
    }

    /// Union: keep the larger coverage
    #[inline]
    fn cover_max(&mut self, px: u32, py: u32, value: f32) {
        if let Some(i) = self.index(px, py) {
            let slot = &mut self.data[i];
            *slot = slot.max(value.clamp(0.0, 1.0));
        }
    }

    #[inline]
    fn cover_add(&mut self, px: u32, py: u32, value: f32) {
        if let Some(i) = self.index(px, py) {
            let slot = &mut self.data[i];
            *slot = (*slot + value).min(1.0);
        }
    }

    /// Iterate `(x, y, coverage)` over pixels with non-zero coverage
    pub fn covered(&self) -> impl Iterator<Item = (u32, u32, f32)> + '_ {
        self.data.iter().enumerate().filter(|(_, c)| **c > 0.0).map(|(i, c)| {
            let w = self.width as usize;
            (self.x + (i % w) as u32, self.y + (i / w) as u32, *c)
        })
    }

    pub fn is_blank(&self) -> bool {
        self.data.iter().all(|c| *c <= 0.0)
    }

    /// Soft copy for shadows: the mask grown by `blur` and smoothed with
    /// three box passes (a cheap Gaussian approximation)
    pub fn blurred(&self, blur: f32, surface: (u32, u32)) -> Option<Self> {
        let radius = (blur / 2.0).ceil().max(1.0) as i64;
        let min = Point::new(self.x as f32, self.y as f32);
        let max = Point::new((self.x + self.width) as f32, (self.y + self.height) as f32);
        let mut out = Self::covering(min, max, blur.ceil(), surface)?;
        for (px, py, c) in self.covered() {
            out.cover_max(px, py, c);
        }
        for _ in 0..3 {
            out.box_pass(radius, true);
            out.box_pass(radius, false);
        }
        Some(out)
    }

    fn box_pass(&mut self, radius: i64, horizontal: bool) {
        let (w, h) = (self.width as i64, self.height as i64);
        let (lines, len) = if horizontal { (h, w) } else { (w, h) };
        let at = |line: i64, k: i64| -> usize {
            if horizontal {
                (line * w + k) as usize
            } else {
                (k * w + line) as usize
            }
        };
        let window = (2 * radius + 1) as f32;
        let mut scratch = vec![0.0f32; len as usize];

        for line in 0..lines {
            let mut sum = 0.0;
            for k in -radius..=radius {
                if (0..len).contains(&k) {
                    sum += self.data[at(line, k)];
                }
            }
            for k in 0..len {
                scratch[k as usize] = sum / window;
                let leaving = k - radius;
                let entering = k + radius + 1;
                if (0..len).contains(&leaving) {
                    sum -= self.data[at(line, leaving)];
                }
                if (0..len).contains(&entering) {
                    sum += self.data[at(line, entering)];
                }
            }
            for k in 0..len {
                self.data[at(line, k)] = scratch[k as usize];
            }
        }
    }
}

/// How a segment end is finished
#[derive(Debug, Clone, Copy, PartialEq)]
enum EndStyle {
    Round,
    /// Flat end extended past the endpoint by the given distance
    Flat(f32),
}

impl EndStyle {
    fn for_cap(cap: LineCap, radius: f32) -> Self {
        match cap {
            LineCap::Round => EndStyle::Round,
            LineCap::Butt => EndStyle::Flat(0.0),
            LineCap::Square => EndStyle::Flat(radius),
        }
    }
}

/// Coverage of a stroked path of the given width
///
/// Interior vertices are joined round; the subpath ends use `cap`.
pub fn stroke_coverage(
    path: &Path,
    width: f32,
    cap: LineCap,
    surface: (u32, u32),
) -> Option<CoverageMask> {
    let (min, max) = path.bounds()?;
    let radius = width / 2.0;
    let mut mask = CoverageMask::covering(min, max, radius + 1.0, surface)?;
    let outer = EndStyle::for_cap(cap, radius);

    for subpath in path.flattened() {
        let points = &subpath.points;
        if points.len() < 2 {
            continue;
        }

        let degenerate = points.windows(2).all(|w| w[0] == w[1]);
        if degenerate {
            cover_dot(&mut mask, points[0], radius, cap);
            continue;
        }

        let last = points.len() - 2;
        for (i, w) in points.windows(2).enumerate() {
            let start = if i == 0 && !subpath.closed { outer } else { EndStyle::Round };
            let end = if i == last && !subpath.closed { outer } else { EndStyle::Round };
            cover_segment(&mut mask, w[0], w[1], radius, start, end);
        }
        if subpath.closed && points.len() > 2 {
            cover_segment(
                &mut mask,
                points[points.len() - 1],
                points[0],
                radius,
                EndStyle::Round,
                EndStyle::Round,
            );
        }
    }

    (!mask.is_blank()).then_some(mask)
}

/// A zero-length subpath: a disc for round caps, a square for square caps,
/// nothing for butt caps
fn cover_dot(mask: &mut CoverageMask, center: Point, radius: f32, cap: LineCap) {
    if cap == LineCap::Butt {
        return;
    }
    let (x0, y0, x1, y1) = pixel_span(mask, center, center, radius + 1.0);
    for py in y0..y1 {
        for px in x0..x1 {
            let dx = px as f32 + 0.5 - center.x;
            let dy = py as f32 + 0.5 - center.y;
            let c = match cap {
                LineCap::Square => {
                    edge_aa(radius - dx.abs()) * edge_aa(radius - dy.abs())
                }
                _ => edge_aa(radius - (dx * dx + dy * dy).sqrt()),
            };
            mask.cover_max(px, py, c);
        }
    }
}

fn cover_segment(
    mask: &mut CoverageMask,
    a: Point,
    b: Point,
    radius: f32,
    start: EndStyle,
    end: EndStyle,
) {
    let len = a.distance(b);
    if len <= f32::EPSILON {
        return;
    }
    let (ux, uy) = ((b.x - a.x) / len, (b.y - a.y) / len);
    let (x0, y0, x1, y1) = pixel_span(mask, a, b, radius + 1.0);

    for py in y0..y1 {
        for px in x0..x1 {
            let cx = px as f32 + 0.5 - a.x;
            let cy = py as f32 + 0.5 - a.y;
            // s runs along the segment, n across it
            let s = cx * ux + cy * uy;
            let n = (cy * ux - cx * uy).abs();

            let c = if s < 0.0 {
                match start {
                    EndStyle::Round => edge_aa(radius - (cx * cx + cy * cy).sqrt()),
                    EndStyle::Flat(ext) => edge_aa(radius - n) * edge_aa(s + ext),
                }
            } else if s > len {
                match end {
                    EndStyle::Round => {
                        let (ex, ey) = (px as f32 + 0.5 - b.x, py as f32 + 0.5 - b.y);
                        edge_aa(radius - (ex * ex + ey * ey).sqrt())
                    }
                    EndStyle::Flat(ext) => edge_aa(radius - n) * edge_aa(len + ext - s),
                }
            } else {
                edge_aa(radius - n)
            };

            if c > 0.0 {
                mask.cover_max(px, py, c);
            }
        }
    }
}

/// Coverage of the path's interior under the nonzero winding rule
pub fn fill_coverage(path: &Path, surface: (u32, u32)) -> Option<CoverageMask> {
    let (min, max) = path.bounds()?;
    let mut mask = CoverageMask::covering(min, max, 1.0, surface)?;
    let subpaths = path.flattened();
    let edges: Vec<(Point, Point)> = subpaths
        .iter()
        .flat_map(|subpath| subpath.fill_edges())
        .filter(|(a, b)| a.y != b.y)
        .collect();
    if edges.is_empty() {
        return None;
    }

    let sample_weight = 1.0 / FILL_SUBSAMPLES as f32;
    let mut crossings: Vec<(f32, i32)> = Vec::new();

    for py in mask.y..mask.y + mask.height {
        for k in 0..FILL_SUBSAMPLES {
            let sy = py as f32 + (k as f32 + 0.5) * sample_weight;
            crossings.clear();
            for (a, b) in &edges {
                let (lo, hi) = if a.y < b.y { (a.y, b.y) } else { (b.y, a.y) };
                if sy < lo || sy >= hi {
                    continue;
                }
                let x = a.x + (sy - a.y) * (b.x - a.x) / (b.y - a.y);
                let winding = if b.y > a.y { 1 } else { -1 };
                crossings.push((x, winding));
            }
            crossings.sort_by(|l, r| l.0.total_cmp(&r.0));

            let mut winding = 0;
            let mut span_start = 0.0;
            for &(x, w) in &crossings {
                let was_inside = winding != 0;
                winding += w;
                let inside = winding != 0;
                if !was_inside && inside {
                    span_start = x;
                } else if was_inside && !inside {
                    cover_span(&mut mask, py, span_start, x, sample_weight);
                }
            }
        }
    }

    (!mask.is_blank()).then_some(mask)
}

/// Add exact horizontal overlap of `[x0, x1)` with each pixel of row `py`
fn cover_span(mask: &mut CoverageMask, py: u32, x0: f32, x1: f32, weight: f32) {
    let lo = x0.max(mask.x as f32);
    let hi = x1.min((mask.x + mask.width) as f32);
    if lo >= hi {
        return;
    }
    for px in lo.floor() as u32..hi.ceil() as u32 {
        let overlap = hi.min(px as f32 + 1.0) - lo.max(px as f32);
        if overlap > 0.0 {
            mask.cover_add(px, py, overlap * weight);
        }
    }
}

/// Pixel range (x0, y0, x1, y1) of the segment's box padded by `pad`,
/// clipped to the mask
fn pixel_span(mask: &CoverageMask, a: Point, b: Point, pad: f32) -> (u32, u32, u32, u32) {
    let clip = |v: f32, lo: u32, hi: u32| (v.max(lo as f32).min(hi as f32)) as u32;
    let (mx1, my1) = (mask.x + mask.width, mask.y + mask.height);
    (
        clip((a.x.min(b.x) - pad).floor(), mask.x, mx1),
        clip((a.y.min(b.y) - pad).floor(), mask.y, my1),
        clip((a.x.max(b.x) + pad).ceil(), mask.x, mx1),
        clip((a.y.max(b.y) + pad).ceil(), mask.y, my1),
    )
}

/// One-pixel linear ramp across an edge at signed distance `d` (inside > 0)
#[inline]
fn edge_aa(d: f32) -> f32 {
    (d + 0.5).clamp(0.0, 1.0)
}
