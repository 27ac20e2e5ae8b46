//! Marker Track Library - Smooth marker motion between irregular position fixes
//!
//! This library turns a bursty, unevenly spaced stream of raw position fixes into
//! continuous marker motion. Fixes are buffered in arrival order, released one at a
//! time by a periodic scheduler and animated (translation and rotation) over a fixed
//! duration, so a renderer sees smooth motion instead of jumps.
//!
//! # Architecture
//!
//! - **[`GeoPoint`]**: Immutable latitude/longitude pair
//! - **[`PositionQueue`]**: FIFO buffer between the location source and the scheduler
//! - **[`bearing()`]**: Great-circle initial bearing between two points
//! - **[`interpolate`]**: Linear position and rotation blending
//! - **[`AnimationController`]**: Idle/Animating state machine owning the marker state
//! - **[`Scheduler`]**: Periodic tick releasing at most one point per idle period
//! - **[`Tracker`]**: Async driver running all of the above on one task
//!
//! # Data flow
//!
//! ```text
//! PositionFeed -> channel -> PositionQueue -> Scheduler tick -> AnimationController
//!                                                                    |
//!                                              MarkerSink <- frame ticks
//! ```

mod animation;
mod bearing;
mod config;
mod controller;
pub mod interpolate;
mod point;
mod queue;
mod scheduler;
mod sink;
mod tracker;

// Public API exports
pub use animation::{Animation, Progress, RotationTarget};
pub use bearing::bearing;
pub use config::TrackerConfig;
pub use controller::{Accepted, AnimationController};
pub use interpolate::RotationMode;
pub use point::GeoPoint;
pub use queue::{EnqueueOutcome, OverflowPolicy, PositionQueue, QueueConfig};
pub use scheduler::{Scheduler, SchedulerStats, TickOutcome};
pub use sink::{CameraTarget, MarkerSink, MarkerState, RecordingSink, SinkEvent, WatchSink};
pub use tracker::{PositionFeed, Tracker, TrackerReport, TrackerStats};

/// Error types for the tracker
#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Position feed closed: the tracker is no longer running")]
    FeedClosed,
}

pub type Result<T> = std::result::Result<T, TrackerError>;
