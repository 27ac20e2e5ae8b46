//! Tracker configuration

use crate::{QueueConfig, Result, RotationMode, TrackerError};
use std::time::Duration;

/// Configuration for the tracker pipeline
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TrackerConfig {
    /// Period of the scheduler tick. Only bounds the latency between a point
    /// arriving and its animation starting.
    pub scheduler_interval: Duration,
    /// Period of the animation frame clock
    pub frame_interval: Duration,
    /// Duration of the translation timeline
    pub translation_duration: Duration,
    /// Duration of the rotation timeline (not longer than the translation)
    pub rotation_duration: Duration,
    /// Rotation blending mode
    pub rotation_mode: RotationMode,
    /// Zoom level requested whenever the camera follows a new target
    pub camera_zoom: f32,
    /// Queue bounding
    pub queue: QueueConfig,
    /// Fixes closer than this to the last accepted fix are ignored (0 = keep all)
    pub min_displacement_m: f64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            scheduler_interval: Duration::from_millis(5),
            frame_interval: Duration::from_millis(16),
            translation_duration: Duration::from_millis(3000),
            rotation_duration: Duration::from_millis(1555),
            rotation_mode: RotationMode::Linear,
            camera_zoom: 16.0,
            queue: QueueConfig::unbounded(),
            min_displacement_m: 0.0,
        }
    }
}

impl TrackerConfig {
    /// Check the configuration for values the pipeline cannot run with
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| Err(TrackerError::InvalidConfig(msg.to_string()));

        if self.scheduler_interval.is_zero() {
            return invalid("scheduler interval must be positive");
        }
        if self.frame_interval.is_zero() {
            return invalid("frame interval must be positive");
        }
        if self.translation_duration.is_zero() {
            return invalid("translation duration must be positive");
        }
        if self.rotation_duration.is_zero() {
            return invalid("rotation duration must be positive");
        }
        if self.rotation_duration > self.translation_duration {
            return invalid("rotation duration must not exceed translation duration");
        }
        if !self.camera_zoom.is_finite() || self.camera_zoom <= 0.0 {
            return invalid("camera zoom must be a positive number");
        }
        if self.queue.capacity == Some(0) {
            return invalid("queue capacity must be at least 1");
        }
        if !self.min_displacement_m.is_finite() || self.min_displacement_m < 0.0 {
            return invalid("minimum displacement must be a non-negative number of meters");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OverflowPolicy;

    #[test]
    fn test_default_is_valid() {
        let config = TrackerConfig::default();
        assert!(config.validate().is_ok());
        assert!(config.rotation_duration < config.translation_duration);
        assert_eq!(config.queue.capacity, None);
    }

    #[test]
    fn test_rotation_longer_than_translation_rejected() {
        let config = TrackerConfig {
            rotation_duration: Duration::from_secs(4),
            translation_duration: Duration::from_secs(3),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(TrackerError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_equal_durations_allowed() {
        let config = TrackerConfig {
            rotation_duration: Duration::from_secs(1),
            translation_duration: Duration::from_secs(1),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_intervals_rejected() {
        let zero_tick = TrackerConfig {
            scheduler_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(zero_tick.validate().is_err());

        let zero_frame = TrackerConfig {
            frame_interval: Duration::ZERO,
            ..Default::default()
        };
        assert!(zero_frame.validate().is_err());
    }

    #[test]
    fn test_zero_capacity_rejected() {
        let config = TrackerConfig {
            queue: QueueConfig::bounded(0, OverflowPolicy::Reject),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_bad_displacement_and_zoom_rejected() {
        let negative = TrackerConfig {
            min_displacement_m: -1.0,
            ..Default::default()
        };
        assert!(negative.validate().is_err());

        let nan_zoom = TrackerConfig {
            camera_zoom: f32::NAN,
            ..Default::default()
        };
        assert!(nan_zoom.validate().is_err());
    }
}
