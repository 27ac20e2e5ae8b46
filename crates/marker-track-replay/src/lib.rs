//! Marker Track Replay - GPX driven front end for the marker tracker
//!
//! Plays the part of both external collaborators of the tracker: a GPX track stands in
//! for the live location source, and [`LogSink`] stands in for the map renderer.

pub mod logging;
mod settings;
mod sink;
mod source;

pub use settings::{OverflowArg, RotationArg, Settings};
pub use sink::LogSink;
pub use source::GpxSource;

use marker_track_lib::{Tracker, TrackerError};

/// Error types for the replay tool
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("GPX parsing error: {0}")]
    Gpx(#[from] gpx::errors::GpxError),

    #[error("GPX file contains no track points")]
    EmptyTrack,

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error("Replay task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ReplayError>;

/// Replay the configured track through a tracker until every fix has been animated
pub async fn run(settings: Settings) -> Result<()> {
    let config = settings.tracker_config();
    config.validate()?;

    let source = GpxSource::open(&settings.track)?;
    tracing::info!(
        "Loaded {} fixes from {}",
        source.len(),
        settings.track.display()
    );

    let (tracker, feed) = Tracker::new(config, LogSink::stdout(settings.json))?;
    let burst = usize::try_from(settings.burst).unwrap_or(usize::MAX);
    let producer = tokio::spawn(source.replay(feed, burst, settings.interval()));

    let report = tracker.run().await;
    let sent = producer.await??;

    let stats = report.stats;
    tracing::info!(
        "Replay finished: {sent} fixes sent, {} animated, {} filtered, {} dropped, {} rejected, {} marker updates",
        stats.scheduler.dispatched,
        stats.filtered,
        stats.dropped,
        stats.rejected,
        report.sink.frames()
    );

    if let Some(mut out) = report.sink.into_writer() {
        use std::io::Write;
        out.flush()?;
    }
    Ok(())
}
