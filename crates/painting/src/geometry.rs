//! Angle and point helpers shared by the stroke tools
//!
//! Angles are radians. Bearings are measured so that a stroke heading
//! straight down the surface (+y) has bearing 0, which puts bristle offsets
//! perpendicular to the direction of travel.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use crate::types::Point;

/// Offset `origin` by `distance` along `angle`
#[inline]
pub fn rotate_point(distance: f32, angle: f32, origin: Point) -> Point {
    Point::new(
        origin.x + distance * angle.cos(),
        origin.y + distance * angle.sin(),
    )
}

/// Angle of the vector `origin -> destination` minus a quarter turn,
/// wrapped into (-2π, 2π)
#[inline]
pub fn bearing(origin: Point, destination: Point) -> f32 {
    let raw = (destination.y - origin.y).atan2(destination.x - origin.x);
    (raw - FRAC_PI_2) % TAU
}

/// Signed shortest angular distance from `b` to `a`, in (-π, π]
#[inline]
pub fn wrapped_diff(a: f32, b: f32) -> f32 {
    let diff = (a - b).rem_euclid(TAU);
    if diff > PI { diff - TAU } else { diff }
}

/// Bearing of the new segment, unwrapped so it stays continuous with
/// `prior_angle`
///
/// Without a prior angle this is the raw bearing. Otherwise the result is
/// `prior_angle` moved by the shortest signed turn towards the new bearing,
/// so crossing ±π never flips the brush around.
#[inline]
pub fn smoothed_angle(previous: Point, current: Point, prior_angle: Option<f32>) -> f32 {
    let bearing = bearing(previous, current);
    match prior_angle {
        None => bearing,
        Some(prior) => prior - wrapped_diff(prior, bearing),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn test_rotate_point() {
        let p = rotate_point(10.0, 0.0, Point::new(5.0, 5.0));
        assert!((p.x - 15.0).abs() < EPS);
        assert!((p.y - 5.0).abs() < EPS);

        let q = rotate_point(10.0, FRAC_PI_2, Point::new(0.0, 0.0));
        assert!(q.x.abs() < EPS);
        assert!((q.y - 10.0).abs() < EPS);
    }

    #[test]
    fn test_bearing_directions() {
        let o = Point::new(0.0, 0.0);
        // Heading down (+y) is bearing zero
        assert!(bearing(o, Point::new(0.0, 10.0)).abs() < EPS);
        // Heading right is a quarter turn back
        assert!((bearing(o, Point::new(10.0, 0.0)) + FRAC_PI_2).abs() < EPS);
    }

    #[test]
    fn test_bearing_range() {
        let o = Point::new(0.0, 0.0);
        for i in 0..32 {
            let a = i as f32 / 32.0 * TAU;
            let b = bearing(o, Point::new(a.cos(), a.sin()));
            assert!(b > -TAU && b < TAU);
        }
    }

    #[test]
    fn test_wrapped_diff_identity() {
        for a in [-7.0, -PI, -1.0, 0.0, 0.5, PI, 4.0, 12.0] {
            assert!(wrapped_diff(a, a).abs() < EPS, "a = {a}");
        }
    }

    #[test]
    fn test_wrapped_diff_antisymmetric() {
        let samples = [-5.0, -2.5, -0.3, 0.0, 0.7, 1.9, 3.0, 6.1];
        for a in samples {
            for b in samples {
                let ab = wrapped_diff(a, b);
                let ba = wrapped_diff(b, a);
                // The ±π boundary is the only place the half-open range bites
                if (ab.abs() - PI).abs() < 1e-3 {
                    continue;
                }
                assert!((ab + ba).abs() < 1e-4, "a = {a}, b = {b}");
            }
        }
    }

    #[test]
    fn test_wrapped_diff_takes_short_way() {
        // 350° vs 10° is -20°, not 340°
        let a = 350f32.to_radians();
        let b = 10f32.to_radians();
        assert!((wrapped_diff(a, b) + 20f32.to_radians()).abs() < 1e-4);
        assert!(wrapped_diff(a, b) > -PI && wrapped_diff(a, b) <= PI);
    }

    #[test]
    fn test_smoothed_angle_without_prior_is_bearing() {
        let a = Point::new(3.0, 4.0);
        let b = Point::new(-8.0, 11.0);
        assert_eq!(smoothed_angle(a, b, None), bearing(a, b));
    }

    #[test]
    fn test_smoothed_angle_is_continuous_across_wrap() {
        // Prior just below +π, new bearing just above -π: the result should
        // stay near +π instead of jumping a full turn
        let prior = PI - 0.05;
        let o = Point::new(0.0, 0.0);
        // raw atan2 near +π/2 gives a bearing near 0; build one near -π instead
        let dest = rotate_point(10.0, -PI + 0.05 + FRAC_PI_2, o);
        let result = smoothed_angle(o, dest, Some(prior));
        assert!((result - prior).abs() < 0.2, "result = {result}");
    }
}
