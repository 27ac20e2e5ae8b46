//! Linear interpolation of marker position and rotation
//!
//! All functions are pure and expect a progress fraction `t` in [0, 1]. Easing is not
//! applied here: the caller maps elapsed time to progress linearly.

use crate::GeoPoint;

/// How rotation is blended between the start and target heading
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RotationMode {
    /// Blend the two angles as plain scalars. Going from 350° to 10° sweeps the long
    /// way round through 180°.
    #[default]
    Linear,
    /// Turn through the smaller arc; the result is normalized to [0, 360)
    ShortestPath,
}

impl RotationMode {
    pub fn interpolate(self, start: f32, end: f32, t: f32) -> f32 {
        match self {
            Self::Linear => lerp_rotation(start, end, t),
            Self::ShortestPath => lerp_rotation_shortest(start, end, t),
        }
    }
}

/// Point on the straight latitude/longitude segment from `start` to `end`
#[inline]
pub fn lerp_position(start: GeoPoint, end: GeoPoint, t: f64) -> GeoPoint {
    GeoPoint::new(
        start.latitude() * (1.0 - t) + end.latitude() * t,
        start.longitude() * (1.0 - t) + end.longitude() * t,
    )
}

/// Scalar blend of two angles: `t * end + (1 - t) * start`
#[inline]
pub fn lerp_rotation(start: f32, end: f32, t: f32) -> f32 {
    t * end + (1.0 - t) * start
}

/// Blend along the shorter arc between `start` and `end`
#[inline]
pub fn lerp_rotation_shortest(start: f32, end: f32, t: f32) -> f32 {
    let delta = wrap_180(end - start);
    wrap_360(start + delta * t)
}

/// Normalize an angle in degrees to [-180, 180)
#[inline]
pub fn wrap_180(degrees: f32) -> f32 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

/// Normalize an angle in degrees to [0, 360)
#[inline]
pub fn wrap_360(degrees: f32) -> f32 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}
