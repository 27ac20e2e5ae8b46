//! FIFO buffer between the location source and the scheduler

use crate::GeoPoint;
use std::collections::VecDeque;

/// What to do when a bounded queue is full
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum OverflowPolicy {
    /// Evict the oldest queued point to make room for the new one
    #[default]
    DropOldest,
    /// Keep the queue as is and discard the incoming point
    Reject,
}

/// Capacity settings for a [`PositionQueue`]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct QueueConfig {
    /// Maximum number of buffered points (`None` = unbounded)
    pub capacity: Option<usize>,
    /// Policy applied once `capacity` is reached
    pub overflow: OverflowPolicy,
}

impl QueueConfig {
    pub fn unbounded() -> Self {
        Self::default()
    }

    pub fn bounded(capacity: usize, overflow: OverflowPolicy) -> Self {
        Self {
            capacity: Some(capacity),
            overflow,
        }
    }
}

/// Result of an enqueue. Enqueueing never fails, but a bounded queue may shed a point.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum EnqueueOutcome {
    Queued,
    /// The point was queued after evicting the contained (oldest) point
    DroppedOldest(GeoPoint),
    /// The queue was full and the contained (incoming) point was discarded
    Rejected(GeoPoint),
}

/// Ordered buffer of pending target points with a single consumer.
///
/// Points leave in exactly the order they arrived. Overflow handling only ever
/// removes from the head or refuses at the tail, so the survivors stay in order.
#[derive(Debug, Default)]
pub struct PositionQueue {
    points: VecDeque<GeoPoint>,
    config: QueueConfig,
    dropped: u64,
    rejected: u64,
}

impl PositionQueue {
    pub fn new(config: QueueConfig) -> Self {
        Self {
            points: VecDeque::new(),
            config,
            dropped: 0,
            rejected: 0,
        }
    }

    /// Append a point at the tail
    pub fn enqueue(&mut self, point: GeoPoint) -> EnqueueOutcome {
        let full = self
            .config
            .capacity
            .is_some_and(|capacity| self.points.len() >= capacity);

        if !full {
            self.points.push_back(point);
            return EnqueueOutcome::Queued;
        }

        match self.config.overflow {
            OverflowPolicy::DropOldest => match self.points.pop_front() {
                Some(evicted) => {
                    self.dropped += 1;
                    self.points.push_back(point);
                    tracing::warn!("Position queue full, dropped oldest point {evicted}");
                    EnqueueOutcome::DroppedOldest(evicted)
                }
                // Zero capacity (only reachable through `PositionQueue::new`, tracker
                // configs reject it): nothing to evict, so nothing can be kept either
                None => {
                    self.rejected += 1;
                    tracing::warn!("Position queue has zero capacity, rejected point {point}");
                    EnqueueOutcome::Rejected(point)
                }
            },
            OverflowPolicy::Reject => {
                self.rejected += 1;
                tracing::warn!("Position queue full, rejected point {point}");
                EnqueueOutcome::Rejected(point)
            }
        }
    }

    /// Remove and return the oldest point, or `None` if the queue is empty
    pub fn dequeue(&mut self) -> Option<GeoPoint> {
        self.points.pop_front()
    }

    /// Look at the oldest point without removing it
    pub fn peek(&self) -> Option<&GeoPoint> {
        self.points.front()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &GeoPoint> {
        self.points.iter()
    }

    pub fn config(&self) -> &QueueConfig {
        &self.config
    }

    /// Number of points evicted by [`OverflowPolicy::DropOldest`]
    pub fn dropped_count(&self) -> u64 {
        self.dropped
    }

    /// Number of incoming points refused because the queue was full
    pub fn rejected_count(&self) -> u64 {
        self.rejected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(i: usize) -> GeoPoint {
        GeoPoint::new(i as f64, i as f64 * 2.0)
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = PositionQueue::new(QueueConfig::unbounded());
        for i in 0..50 {
            assert_eq!(queue.enqueue(point(i)), EnqueueOutcome::Queued);
        }
        assert_eq!(queue.len(), 50);

        for i in 0..50 {
            assert_eq!(queue.dequeue(), Some(point(i)));
        }
        assert!(queue.is_empty());
    }

    #[test]
    fn test_dequeue_empty_returns_none() {
        let mut queue = PositionQueue::default();
        assert_eq!(queue.dequeue(), None);
        assert_eq!(queue.peek(), None);
    }

    #[test]
    fn test_interleaved_enqueue_dequeue_keeps_order() {
        let mut queue = PositionQueue::default();
        let _ = queue.enqueue(point(1));
        let _ = queue.enqueue(point(2));
        assert_eq!(queue.dequeue(), Some(point(1)));
        let _ = queue.enqueue(point(3));
        assert_eq!(queue.peek(), Some(&point(2)));
        assert_eq!(queue.dequeue(), Some(point(2)));
        assert_eq!(queue.dequeue(), Some(point(3)));
    }

    #[test]
    fn test_drop_oldest_policy() {
        let mut queue = PositionQueue::new(QueueConfig::bounded(3, OverflowPolicy::DropOldest));
        for i in 0..3 {
            let _ = queue.enqueue(point(i));
        }
        assert_eq!(queue.enqueue(point(3)), EnqueueOutcome::DroppedOldest(point(0)));
        assert_eq!(queue.enqueue(point(4)), EnqueueOutcome::DroppedOldest(point(1)));
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dropped_count(), 2);

        let remaining: Vec<_> = queue.iter().copied().collect();
        assert_eq!(remaining, vec![point(2), point(3), point(4)]);
    }

    #[test]
    fn test_reject_policy() {
        let mut queue = PositionQueue::new(QueueConfig::bounded(2, OverflowPolicy::Reject));
        let _ = queue.enqueue(point(0));
        let _ = queue.enqueue(point(1));
        assert_eq!(queue.enqueue(point(2)), EnqueueOutcome::Rejected(point(2)));
        assert_eq!(queue.rejected_count(), 1);

        assert_eq!(queue.dequeue(), Some(point(0)));
        assert_eq!(queue.enqueue(point(3)), EnqueueOutcome::Queued);
        assert_eq!(queue.dequeue(), Some(point(1)));
        assert_eq!(queue.dequeue(), Some(point(3)));
    }

    #[test]
    fn test_zero_capacity_drop_oldest_rejects() {
        let mut queue = PositionQueue::new(QueueConfig::bounded(0, OverflowPolicy::DropOldest));
        assert_eq!(queue.enqueue(point(0)), EnqueueOutcome::Rejected(point(0)));
        assert!(queue.is_empty());
        assert_eq!(queue.rejected_count(), 1);
        assert_eq!(queue.dropped_count(), 0);
    }

    #[test]
    fn test_clear() {
        let mut queue = PositionQueue::default();
        let _ = queue.enqueue(point(0));
        queue.clear();
        assert!(queue.is_empty());
    }
}
