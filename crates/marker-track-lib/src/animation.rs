//! A single marker animation: one translation and one rotation timeline sharing a clock

use crate::interpolate::{self, RotationMode};
use crate::{GeoPoint, MarkerState};
use std::time::Duration;
use tokio::time::Instant;

/// Rotation goal of an animation.
///
/// A not-a-number bearing never reaches the interpolator; it is encoded as `Hold`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum RotationTarget {
    /// Heading is undefined (start and target coincide): keep the current rotation
    Hold,
    /// Turn toward the given heading in degrees
    Toward(f32),
}

impl RotationTarget {
    pub fn from_bearing(bearing: f32) -> Self {
        if bearing.is_nan() {
            Self::Hold
        } else {
            Self::Toward(bearing)
        }
    }

    /// Final rotation, given the rotation held before the animation
    pub fn resolve(self, current: f32) -> f32 {
        match self {
            Self::Hold => current,
            Self::Toward(degrees) => degrees,
        }
    }
}

/// Progress fractions of both timelines, each clamped to [0, 1]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Progress {
    pub translation: f64,
    pub rotation: f32,
}

impl Progress {
    /// Both timelines have reached the end
    pub fn is_complete(&self) -> bool {
        self.translation >= 1.0 && self.rotation >= 1.0
    }
}

/// Transient animation from the current marker pose to a new target.
///
/// Translation and rotation start together and are sampled against the same clock.
/// The rotation usually finishes first; the animation is only done once both have.
#[derive(Clone, Debug)]
pub struct Animation {
    start_position: GeoPoint,
    end_position: GeoPoint,
    start_rotation: f32,
    end_rotation: f32,
    started_at: Instant,
    translation_duration: Duration,
    rotation_duration: Duration,
    rotation_mode: RotationMode,
}

impl Animation {
    pub fn new(
        from: MarkerState,
        to: GeoPoint,
        rotation: RotationTarget,
        started_at: Instant,
        translation_duration: Duration,
        rotation_duration: Duration,
        rotation_mode: RotationMode,
    ) -> Self {
        Self {
            start_position: from.position,
            end_position: to,
            start_rotation: from.rotation,
            end_rotation: rotation.resolve(from.rotation),
            started_at,
            translation_duration,
            rotation_duration,
            rotation_mode,
        }
    }

    pub fn start_position(&self) -> GeoPoint {
        self.start_position
    }

    pub fn end_position(&self) -> GeoPoint {
        self.end_position
    }

    pub fn start_rotation(&self) -> f32 {
        self.start_rotation
    }

    pub fn end_rotation(&self) -> f32 {
        self.end_rotation
    }

    /// Time since the animation started (zero if `now` is before the start)
    pub fn elapsed(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.started_at)
    }

    pub fn progress(&self, now: Instant) -> Progress {
        let elapsed = self.elapsed(now);
        Progress {
            translation: fraction(elapsed, self.translation_duration),
            rotation: fraction(elapsed, self.rotation_duration) as f32,
        }
    }

    pub fn is_finished(&self, now: Instant) -> bool {
        self.progress(now).is_complete()
    }

    /// Marker pose at `now`. Once complete the position is exactly the target.
    pub fn sample(&self, now: Instant) -> MarkerState {
        let progress = self.progress(now);
        let rotation =
            self.rotation_mode
                .interpolate(self.start_rotation, self.end_rotation, progress.rotation);

        let position = if progress.is_complete() {
            self.end_position
        } else {
            interpolate::lerp_position(self.start_position, self.end_position, progress.translation)
        };

        MarkerState { position, rotation }
    }
}

/// Linear time-to-progress mapping, clamped to [0, 1]
fn fraction(elapsed: Duration, duration: Duration) -> f64 {
    if duration.is_zero() {
        return 1.0;
    }
    (elapsed.as_secs_f64() / duration.as_secs_f64()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn animation(start: Instant, rotation: RotationTarget) -> Animation {
        Animation::new(
            MarkerState {
                position: GeoPoint::new(0.0, 0.0),
                rotation: 30.0,
            },
            GeoPoint::new(0.0, 1.0),
            rotation,
            start,
            Duration::from_millis(3000),
            Duration::from_millis(1500),
            RotationMode::Linear,
        )
    }

    #[test]
    fn test_rotation_target_from_bearing() {
        assert_eq!(RotationTarget::from_bearing(f32::NAN), RotationTarget::Hold);
        assert_eq!(RotationTarget::from_bearing(90.0), RotationTarget::Toward(90.0));
        assert_eq!(RotationTarget::Hold.resolve(42.0), 42.0);
        assert_eq!(RotationTarget::Toward(90.0).resolve(42.0), 90.0);
    }

    #[test]
    fn test_progress_two_timelines() {
        let start = Instant::now();
        let anim = animation(start, RotationTarget::Toward(90.0));

        let p = anim.progress(start + Duration::from_millis(750));
        assert!((p.translation - 0.25).abs() < 1e-9);
        assert!((p.rotation - 0.5).abs() < 1e-6);
        assert!(!p.is_complete());

        // Rotation done, translation still running
        let p = anim.progress(start + Duration::from_millis(2000));
        assert_eq!(p.rotation, 1.0);
        assert!(p.translation < 1.0);
        assert!(!anim.is_finished(start + Duration::from_millis(2000)));

        assert!(anim.is_finished(start + Duration::from_millis(3000)));
        assert!(anim.is_finished(start + Duration::from_secs(60)));
    }

    #[test]
    fn test_progress_before_start_is_zero() {
        let start = Instant::now() + Duration::from_secs(1);
        let anim = animation(start, RotationTarget::Hold);
        let p = anim.progress(start - Duration::from_millis(500));
        assert_eq!(p.translation, 0.0);
        assert_eq!(p.rotation, 0.0);
    }

    #[test]
    fn test_sample_midway() {
        let start = Instant::now();
        let anim = animation(start, RotationTarget::Toward(90.0));
        let state = anim.sample(start + Duration::from_millis(1500));
        assert!((state.position.longitude() - 0.5).abs() < 1e-9);
        assert_eq!(state.rotation, 90.0);
    }

    #[test]
    fn test_sample_complete_is_exact() {
        let start = Instant::now();
        let anim = animation(start, RotationTarget::Toward(90.0));
        let state = anim.sample(start + Duration::from_millis(3000));
        assert_eq!(state.position, GeoPoint::new(0.0, 1.0));
        assert_eq!(state.rotation, 90.0);
    }

    #[test]
    fn test_hold_keeps_rotation() {
        let start = Instant::now();
        let anim = animation(start, RotationTarget::Hold);
        assert_eq!(anim.end_rotation(), 30.0);
        for ms in [0, 500, 1500, 3000] {
            let state = anim.sample(start + Duration::from_millis(ms));
            assert!((state.rotation - 30.0).abs() < 1e-4, "rotation was {}", state.rotation);
        }
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        assert_eq!(fraction(Duration::ZERO, Duration::ZERO), 1.0);
        assert_eq!(fraction(Duration::from_secs(2), Duration::from_secs(1)), 1.0);
    }
}
