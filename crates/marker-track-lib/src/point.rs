//! Geographic point value type

use geo::{Distance, Haversine, Point};

/// An immutable latitude/longitude pair in degrees (WGS84)
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    latitude: f64,
    longitude: f64,
}

impl GeoPoint {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Convert to a `geo` point (x = longitude, y = latitude)
    pub fn to_point(self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }

    /// Great-circle distance to `other` in meters (haversine)
    pub fn distance_m(&self, other: &GeoPoint) -> f64 {
        Haversine.distance(self.to_point(), other.to_point())
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(point: Point<f64>) -> Self {
        Self::new(point.y(), point.x())
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        point.to_point()
    }
}

impl std::fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6})", self.latitude, self.longitude)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_point_axis_order() {
        let p = GeoPoint::new(51.5074, -0.1278);
        let geo_point = p.to_point();
        assert_eq!(geo_point.x(), -0.1278);
        assert_eq!(geo_point.y(), 51.5074);
        assert_eq!(GeoPoint::from(geo_point), p);
    }

    #[test]
    fn test_distance_one_degree_longitude_at_equator() {
        let a = GeoPoint::new(0.0, 0.0);
        let b = GeoPoint::new(0.0, 1.0);
        let d = a.distance_m(&b);
        // One degree at the equator is roughly 111 km
        assert!(d > 110_000.0 && d < 112_500.0, "distance was {d}");
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = GeoPoint::new(10.0, 20.0);
        assert_eq!(p.distance_m(&p), 0.0);
    }

    #[test]
    fn test_display() {
        assert_eq!(GeoPoint::new(10.0, 20.5).to_string(), "(10.000000, 20.500000)");
    }
}
