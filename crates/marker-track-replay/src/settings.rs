use clap::{Parser, ValueEnum};
use marker_track_lib::{OverflowPolicy, QueueConfig, RotationMode, TrackerConfig};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
/// Marker Track Replay - Plays a GPX track as a live position feed and prints the animated marker
pub struct Settings {
    /// GPX file whose track points are replayed as position fixes
    #[clap(value_name = "FILE")]
    pub track: PathBuf,

    /// Delay between bursts of fixes in milliseconds (0 = send everything at once)
    #[clap(long, default_value = "1000")]
    pub interval_ms: u64,

    /// Number of fixes sent back to back in each burst
    #[clap(long, default_value = "1", value_parser = clap::value_parser!(u64).range(1..))]
    pub burst: u64,

    /// Scheduler tick period in milliseconds
    #[clap(long, default_value = "5")]
    pub tick_ms: u64,

    /// Animation frame period in milliseconds
    #[clap(long, default_value = "16")]
    pub frame_ms: u64,

    /// Duration of each marker move in milliseconds
    #[clap(long, default_value = "3000")]
    pub move_ms: u64,

    /// Duration of each marker turn in milliseconds (not longer than --move-ms)
    #[clap(long, default_value = "1555")]
    pub rotate_ms: u64,

    /// How the marker turns toward a new heading
    #[clap(long, value_enum, default_value_t = RotationArg::Linear)]
    pub rotation_mode: RotationArg,

    /// Maximum number of buffered fixes (unbounded if omitted)
    #[clap(long)]
    pub queue_capacity: Option<usize>,

    /// What to do with a new fix when the queue is full
    #[clap(long, value_enum, default_value_t = OverflowArg::DropOldest)]
    pub overflow: OverflowArg,

    /// Camera zoom requested when following the marker
    #[clap(long, default_value = "16.0")]
    pub zoom: f32,

    /// Ignore fixes closer than this many meters to the last accepted one
    #[clap(long, default_value = "0.0")]
    pub min_displacement: f64,

    /// Print every marker and camera update as a JSON line on stdout
    #[clap(long, default_value = "false")]
    pub json: bool,

    /// Write a Chrome trace of the run to this file
    #[cfg(feature = "profiling")]
    #[clap(long, value_name = "FILE")]
    pub trace_file: Option<PathBuf>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationArg {
    /// Blend the angles as plain numbers (may turn the long way round)
    Linear,
    /// Always turn through the smaller arc
    ShortestPath,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverflowArg {
    DropOldest,
    Reject,
}

impl From<RotationArg> for RotationMode {
    fn from(arg: RotationArg) -> Self {
        match arg {
            RotationArg::Linear => RotationMode::Linear,
            RotationArg::ShortestPath => RotationMode::ShortestPath,
        }
    }
}

impl From<OverflowArg> for OverflowPolicy {
    fn from(arg: OverflowArg) -> Self {
        match arg {
            OverflowArg::DropOldest => OverflowPolicy::DropOldest,
            OverflowArg::Reject => OverflowPolicy::Reject,
        }
    }
}

impl Settings {
    /// Parse from the command line, exiting with usage on error
    pub fn from_cli() -> Self {
        match Settings::try_parse() {
            Ok(args) => args,
            Err(e) => e.exit(),
        }
    }

    /// Tracker configuration described by these settings (not yet validated)
    pub fn tracker_config(&self) -> TrackerConfig {
        TrackerConfig {
            scheduler_interval: Duration::from_millis(self.tick_ms),
            frame_interval: Duration::from_millis(self.frame_ms),
            translation_duration: Duration::from_millis(self.move_ms),
            rotation_duration: Duration::from_millis(self.rotate_ms),
            rotation_mode: self.rotation_mode.into(),
            camera_zoom: self.zoom,
            queue: QueueConfig {
                capacity: self.queue_capacity,
                overflow: self.overflow.into(),
            },
            min_displacement_m: self.min_displacement,
        }
    }

    /// Pause between bursts
    pub fn interval(&self) -> Duration {
        Duration::from_millis(self.interval_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_library_defaults() {
        let settings = Settings::try_parse_from(["marker-track-replay", "walk.gpx"]).unwrap();
        assert_eq!(settings.track, PathBuf::from("walk.gpx"));
        assert_eq!(settings.tracker_config(), TrackerConfig::default());
        assert_eq!(settings.interval(), Duration::from_secs(1));
        assert_eq!(settings.burst, 1);
        assert!(!settings.json);
    }

    #[test]
    fn test_overrides() {
        let settings = Settings::try_parse_from([
            "marker-track-replay",
            "walk.gpx",
            "--rotation-mode",
            "shortest-path",
            "--queue-capacity",
            "8",
            "--overflow",
            "reject",
            "--move-ms",
            "500",
            "--rotate-ms",
            "250",
            "--min-displacement",
            "100",
            "--burst",
            "4",
        ])
        .unwrap();

        let config = settings.tracker_config();
        assert_eq!(config.rotation_mode, RotationMode::ShortestPath);
        assert_eq!(config.queue, QueueConfig::bounded(8, OverflowPolicy::Reject));
        assert_eq!(config.translation_duration, Duration::from_millis(500));
        assert_eq!(config.rotation_duration, Duration::from_millis(250));
        assert_eq!(config.min_displacement_m, 100.0);
        assert_eq!(settings.burst, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_burst_rejected() {
        let result = Settings::try_parse_from(["marker-track-replay", "walk.gpx", "--burst", "0"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_missing_track_rejected() {
        assert!(Settings::try_parse_from(["marker-track-replay"]).is_err());
    }
}
