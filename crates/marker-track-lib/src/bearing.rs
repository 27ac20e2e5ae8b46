//! Heading between two points

use crate::GeoPoint;
use geo::{Bearing, Haversine};

/// Great-circle initial bearing from `from` to `to` in degrees.
///
/// 0° is north and angles grow clockwise, in the range [0, 360). When both points
/// coincide the heading is undefined and `f32::NAN` is returned; callers must treat
/// that as "keep the current rotation".
pub fn bearing(from: GeoPoint, to: GeoPoint) -> f32 {
    if from == to {
        return f32::NAN;
    }
    Haversine.bearing(from.to_point(), to.to_point()) as f32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f32, expected: f32) {
        assert!(
            (actual - expected).abs() < 0.01,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn test_cardinal_directions() {
        let origin = GeoPoint::new(0.0, 0.0);
        assert_close(bearing(origin, GeoPoint::new(1.0, 0.0)), 0.0);
        assert_close(bearing(origin, GeoPoint::new(0.0, 1.0)), 90.0);
        assert_close(bearing(origin, GeoPoint::new(-1.0, 0.0)), 180.0);
        assert_close(bearing(origin, GeoPoint::new(0.0, -1.0)), 270.0);
    }

    #[test]
    fn test_range_is_non_negative() {
        let from = GeoPoint::new(10.0, 20.0);
        let to = GeoPoint::new(9.9, 19.9);
        let b = bearing(from, to);
        assert!((180.0..270.0).contains(&b), "south-west bearing was {b}");
    }

    #[test]
    fn test_degenerate_bearing_is_nan() {
        for p in [
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(10.0, 20.0),
            GeoPoint::new(-45.5, 170.25),
            GeoPoint::new(89.9, -179.9),
        ] {
            assert!(bearing(p, p).is_nan(), "bearing({p}, {p}) should be NaN");
        }
    }

    #[test]
    fn test_small_displacement_is_defined() {
        let b = bearing(GeoPoint::new(10.0, 20.0), GeoPoint::new(10.1, 20.1));
        assert!(b.is_finite());
        // North-east, slightly more north than east at this latitude
        assert!(b > 40.0 && b < 50.0, "bearing was {b}");
    }
}
