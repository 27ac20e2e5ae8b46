//! Async driver running the whole pipeline on one logical timeline
//!
//! Producers never touch the marker state. They push fixes through a
//! [`PositionFeed`] (an unbounded channel), and a single task owns the queue, the
//! controller, the scheduler and the sink. That task is driven by two intervals:
//!
//! - the **scheduler tick**, which drains the channel into the [`PositionQueue`] and
//!   then releases at most one point to the controller;
//! - the **frame clock**, polled only while an animation runs, which samples the
//!   animation and publishes the marker pose.
//!
//! Both run inside one `select!` loop, so ticks never overlap or reenter.

use crate::{
    AnimationController, EnqueueOutcome, GeoPoint, MarkerSink, PositionQueue, Result, Scheduler,
    SchedulerStats, TrackerConfig, TrackerError,
};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tokio::time::{self, Instant, MissedTickBehavior};

/// Cloneable producer handle used by the location source
#[derive(Debug, Clone)]
pub struct PositionFeed {
    tx: mpsc::UnboundedSender<GeoPoint>,
}

impl PositionFeed {
    /// Inbound callback of the location source. Never blocks.
    pub fn on_position_update(&self, latitude: f64, longitude: f64) -> Result<()> {
        self.send(GeoPoint::new(latitude, longitude))
    }

    pub fn send(&self, point: GeoPoint) -> Result<()> {
        self.tx.send(point).map_err(|_| TrackerError::FeedClosed)
    }

    /// Whether the tracker has stopped listening
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Counters collected over a tracker run
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TrackerStats {
    /// Fixes received from the feed
    pub received: u64,
    /// Fixes ignored by the minimum displacement filter
    pub filtered: u64,
    /// Queued fixes evicted by a full queue
    pub dropped: u64,
    /// Incoming fixes refused by a full queue
    pub rejected: u64,
    pub scheduler: SchedulerStats,
}

/// Result of a completed [`Tracker::run`]
#[derive(Debug)]
pub struct TrackerReport<S> {
    /// The sink, handed back to the caller
    pub sink: S,
    pub stats: TrackerStats,
}

/// The pipeline: queue, controller, scheduler and sink owned by one task
#[derive(Debug)]
pub struct Tracker<S> {
    config: TrackerConfig,
    rx: mpsc::UnboundedReceiver<GeoPoint>,
    queue: PositionQueue,
    controller: AnimationController,
    scheduler: Scheduler,
    sink: S,
    last_accepted: Option<GeoPoint>,
    received: u64,
    filtered: u64,
}

impl<S: MarkerSink> Tracker<S> {
    /// Create a tracker and the feed that supplies it with fixes
    pub fn new(config: TrackerConfig, sink: S) -> Result<(Self, PositionFeed)> {
        config.validate()?;

        let (tx, rx) = mpsc::unbounded_channel();
        let tracker = Self {
            queue: PositionQueue::new(config.queue),
            controller: AnimationController::new(&config),
            scheduler: Scheduler::new(config.scheduler_interval),
            config,
            rx,
            sink,
            last_accepted: None,
            received: 0,
            filtered: 0,
        };

        Ok((tracker, PositionFeed { tx }))
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn controller(&self) -> &AnimationController {
        &self.controller
    }

    pub fn queue(&self) -> &PositionQueue {
        &self.queue
    }

    pub fn stats(&self) -> TrackerStats {
        TrackerStats {
            received: self.received,
            filtered: self.filtered,
            dropped: self.queue.dropped_count(),
            rejected: self.queue.rejected_count(),
            scheduler: self.scheduler.stats(),
        }
    }

    /// Run until every feed handle is dropped and all received fixes have been
    /// animated, then hand the sink back.
    pub async fn run(mut self) -> TrackerReport<S> {
        let mut tick = time::interval(self.scheduler.interval());
        tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut frame = time::interval(self.config.frame_interval);
        frame.set_missed_tick_behavior(MissedTickBehavior::Delay);

        tracing::debug!(
            "Tracker started (tick {:?}, frame {:?})",
            self.scheduler.interval(),
            self.config.frame_interval
        );

        let mut feed_open = true;
        loop {
            tokio::select! {
                now = frame.tick(), if self.controller.is_running() => {
                    self.controller.on_frame(now, &mut self.sink);
                }
                _ = tick.tick() => {
                    // A late tick reports its missed deadline; animations start from the real clock
                    let now = Instant::now();
                    feed_open = self.drain_feed() && feed_open;
                    let running_before = self.controller.is_running();
                    self.scheduler.tick(&mut self.queue, &mut self.controller, now, &mut self.sink);
                    if !running_before && self.controller.is_running() {
                        // First frame of the new animation lands one frame interval out
                        frame.reset();
                    }

                    if !feed_open && self.queue.is_empty() && !self.controller.is_running() {
                        break;
                    }
                }
            }
        }

        let stats = self.stats();
        tracing::debug!("Tracker finished: {stats:?}");
        TrackerReport {
            sink: self.sink,
            stats,
        }
    }

    /// Move everything the producers sent since the last tick into the queue.
    /// Returns `false` once all producers are gone.
    fn drain_feed(&mut self) -> bool {
        profiling::scope!("Tracker::drain_feed");
        loop {
            match self.rx.try_recv() {
                Ok(point) => self.ingest(point),
                Err(TryRecvError::Empty) => return true,
                Err(TryRecvError::Disconnected) => return false,
            }
        }
    }

    fn ingest(&mut self, point: GeoPoint) {
        self.received += 1;

        let min = self.config.min_displacement_m;
        if let Some(last) = self.last_accepted.filter(|_| min > 0.0) {
            let distance = last.distance_m(&point);
            if distance < min {
                self.filtered += 1;
                tracing::trace!("Ignoring {point}: moved {distance:.1} m (< {min} m)");
                return;
            }
        }
        match self.queue.enqueue(point) {
            EnqueueOutcome::Rejected(_) => {}
            outcome => {
                self.last_accepted = Some(point);
                if outcome == EnqueueOutcome::Queued {
                    tracing::trace!("Queued {point} ({} pending)", self.queue.len());
                }
            }
        }
    }
}
