//! Periodic release of queued points into the animation controller

use crate::{AnimationController, GeoPoint, MarkerSink, PositionQueue};
use std::time::Duration;
use tokio::time::Instant;

/// What a single scheduler tick did
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TickOutcome {
    /// An animation is running; the queue was left alone
    Busy,
    /// Idle, but nothing was queued
    Empty,
    /// One point was dequeued and handed to the controller
    Dispatched(GeoPoint),
}

/// Counters describing scheduler activity
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SchedulerStats {
    pub ticks: u64,
    pub busy_ticks: u64,
    pub empty_ticks: u64,
    pub dispatched: u64,
}

/// Fixed-period scheduler.
///
/// Each tick dequeues at most one point, and only when the controller is idle, so
/// a backlog drains one point per idle period and animations never overlap.
#[derive(Debug)]
pub struct Scheduler {
    interval: Duration,
    stats: SchedulerStats,
}

impl Scheduler {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            stats: SchedulerStats::default(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn stats(&self) -> SchedulerStats {
        self.stats
    }

    pub fn tick<S: MarkerSink + ?Sized>(
        &mut self,
        queue: &mut PositionQueue,
        controller: &mut AnimationController,
        now: Instant,
        sink: &mut S,
    ) -> TickOutcome {
        profiling::scope!("Scheduler::tick");
        self.stats.ticks += 1;

        if controller.is_running() {
            self.stats.busy_ticks += 1;
            return TickOutcome::Busy;
        }

        let Some(point) = queue.dequeue() else {
            self.stats.empty_ticks += 1;
            return TickOutcome::Empty;
        };

        self.stats.dispatched += 1;
        tracing::trace!("Dispatching {point} ({} still queued)", queue.len());
        controller.animate_to(point, now, sink);
        TickOutcome::Dispatched(point)
    }
}
