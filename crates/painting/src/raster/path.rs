//! Path accumulation with canvas semantics on top of `kurbo::BezPath`

use kurbo::{BezPath, PathEl, Shape};

use crate::types::Point;

/// Maximum deviation in pixels between a curve and its flattened polyline
const FLATTEN_TOLERANCE: f64 = 0.25;

/// One flattened subpath
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Subpath {
    pub points: Vec<Point>,
    pub closed: bool,
}

impl Subpath {
    /// Straight segments to stroke, including the closing segment
    pub fn segments(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let closing = if self.closed && self.points.len() > 2 {
            self.points.last().copied().zip(self.points.first().copied())
        } else {
            None
        };
        self.points.windows(2).map(|w| (w[0], w[1])).chain(closing)
    }

    /// Edges to fill; an open subpath is closed implicitly
    pub fn fill_edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        let n = if self.points.len() > 2 { self.points.len() } else { 0 };
        (0..n).map(move |i| (self.points[i], self.points[(i + 1) % n]))
    }
}

/// The path built between two `begin_path` calls
#[derive(Debug, Clone, Default)]
pub struct Path {
    bez: BezPath,
    /// First point of the open subpath, where `close` returns to
    start: Option<Point>,
    current: Option<Point>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    /// True when nothing would be stroked or filled
    pub fn is_empty(&self) -> bool {
        self.bez.segments().next().is_none()
    }

    pub fn as_bez_path(&self) -> &BezPath {
        &self.bez
    }

    pub fn current_point(&self) -> Option<Point> {
        self.current
    }

    pub fn move_to(&mut self, point: Point) {
        self.bez.move_to(point);
        self.start = Some(point);
        self.current = Some(point);
    }

    /// With no current point this behaves as `move_to`
    pub fn line_to(&mut self, point: Point) {
        if self.current.is_none() {
            self.move_to(point);
            return;
        }
        self.bez.line_to(point);
        self.current = Some(point);
    }

    /// With no current point the curve starts at its control point
    pub fn quadratic_curve_to(&mut self, control: Point, to: Point) {
        if self.current.is_none() {
            self.move_to(control);
        }
        self.bez.quad_to(control, to);
        self.current = Some(to);
    }

    /// Close the open subpath; drawing continues from its first point
    pub fn close(&mut self) {
        let Some(start) = self.start else {
            return;
        };
        self.bez.close_path();
        self.bez.move_to(start);
        self.current = Some(start);
    }

    /// Bounding box (min, max) of the drawable geometry
    pub fn bounds(&self) -> Option<(Point, Point)> {
        if self.is_empty() {
            return None;
        }
        let rect = self.bez.bounding_box();
        Some((Point::from(rect.origin()), Point::new(rect.x1 as f32, rect.y1 as f32)))
    }

    /// Curves replaced by polylines, one entry per subpath
    pub fn flattened(&self) -> Vec<Subpath> {
        let mut subpaths: Vec<Subpath> = Vec::new();
        kurbo::flatten(self.bez.iter(), FLATTEN_TOLERANCE, |el| match el {
            PathEl::MoveTo(p) => subpaths.push(Subpath {
                points: vec![p.into()],
                closed: false,
            }),
            PathEl::LineTo(p) => match subpaths.last_mut() {
                Some(subpath) => subpath.points.push(p.into()),
                None => subpaths.push(Subpath {
                    points: vec![p.into()],
                    closed: false,
                }),
            },
            PathEl::ClosePath => {
                if let Some(subpath) = subpaths.last_mut() {
                    subpath.closed = true;
                }
            }
            // flatten only emits moves, lines and closes
            PathEl::QuadTo(..) | PathEl::CurveTo(..) => {}
        });
        subpaths.retain(|s| s.points.len() > 1);
        subpaths
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment_count(path: &Path) -> usize {
        path.flattened().iter().map(|s| s.segments().count()).sum()
    }

    #[test]
    fn test_line_to_without_current_point_moves() {
        let mut path = Path::new();
        path.line_to(Point::new(5.0, 5.0));
        assert!(path.is_empty());
        assert_eq!(path.current_point(), Some(Point::new(5.0, 5.0)));

        path.line_to(Point::new(10.0, 5.0));
        assert_eq!(segment_count(&path), 1);
    }

    #[test]
    fn test_quadratic_flattens_onto_target() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0));
        path.quadratic_curve_to(Point::new(50.0, 50.0), Point::new(100.0, 0.0));

        let subpaths = path.flattened();
        assert_eq!(subpaths.len(), 1);
        let points = &subpaths[0].points;
        assert!(points.len() > 2);
        assert_eq!(*points.last().unwrap(), Point::new(100.0, 0.0));
        // The apex sits halfway to the control point
        let apex = points.iter().map(|p| p.y).fold(0.0f32, f32::max);
        assert!((apex - 25.0).abs() < 0.5);
    }

    #[test]
    fn test_close_adds_closing_segment() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(10.0, 0.0));
        path.line_to(Point::new(10.0, 10.0));
        path.close();
        assert_eq!(segment_count(&path), 3);
        assert_eq!(path.current_point(), Some(Point::new(0.0, 0.0)));

        // Drawing after close starts from the first point
        path.line_to(Point::new(0.0, 10.0));
        let subpaths = path.flattened();
        assert_eq!(subpaths.len(), 2);
        assert_eq!(subpaths[1].points[0], Point::new(0.0, 0.0));
    }

    #[test]
    fn test_bounds() {
        let mut path = Path::new();
        assert!(path.bounds().is_none());
        path.move_to(Point::new(3.0, 8.0));
        assert!(path.bounds().is_none());
        path.line_to(Point::new(-2.0, 4.0));
        let (min, max) = path.bounds().unwrap();
        assert_eq!(min, Point::new(-2.0, 4.0));
        assert_eq!(max, Point::new(3.0, 8.0));
    }

    #[test]
    fn test_fill_edges_close_implicitly() {
        let mut path = Path::new();
        path.move_to(Point::new(0.0, 0.0));
        path.line_to(Point::new(10.0, 0.0));
        path.line_to(Point::new(0.0, 10.0));
        let subpaths = path.flattened();
        assert_eq!(subpaths[0].fill_edges().count(), 3);
        assert_eq!(subpaths[0].segments().count(), 2);
    }
}
