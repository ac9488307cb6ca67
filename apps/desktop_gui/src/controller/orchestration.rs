//! Deadline queue standing in for toolkit timer callbacks.

use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
struct Scheduled<E> {
    due: Instant,
    epoch: u64,
    event: E,
}

/// Events wait here until their deadline passes. Each entry remembers the
/// session epoch it was scheduled in and is dropped if the epoch has moved on.
#[derive(Debug, Clone)]
pub struct DeferredQueue<E> {
    entries: Vec<Scheduled<E>>,
}

impl<E> Default for DeferredQueue<E> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<E> DeferredQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, now: Instant, delay: Duration, epoch: u64, event: E) {
        let due = now + delay;
        // Stable insert keeps same-deadline events in scheduling order.
        let index = self.entries.partition_point(|entry| entry.due <= due);
        self.entries.insert(index, Scheduled { due, epoch, event });
    }

    /// Removes and returns every event whose deadline has passed, oldest first.
    pub fn drain_due(&mut self, now: Instant, current_epoch: u64) -> Vec<E> {
        let split = self.entries.partition_point(|entry| entry.due <= now);
        self.entries
            .drain(..split)
            .filter_map(|entry| {
                if entry.epoch == current_epoch {
                    Some(entry.event)
                } else {
                    tracing::debug!(
                        scheduled_epoch = entry.epoch,
                        current_epoch,
                        "dropping deferred event from a previous game"
                    );
                    None
                }
            })
            .collect()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.entries.first().map(|entry| entry.due)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nothing_is_due_before_its_deadline() {
        let start = Instant::now();
        let mut queue = DeferredQueue::new();
        queue.schedule(start, Duration::from_millis(1000), 0, "resolve");

        assert!(queue
            .drain_due(start + Duration::from_millis(999), 0)
            .is_empty());
        assert_eq!(
            queue.next_deadline(),
            Some(start + Duration::from_millis(1000))
        );
    }

    #[test]
    fn due_events_drain_in_deadline_order() {
        let start = Instant::now();
        let mut queue = DeferredQueue::new();
        queue.schedule(start, Duration::from_millis(300), 0, "late");
        queue.schedule(start, Duration::from_millis(100), 0, "early");
        queue.schedule(start, Duration::from_millis(100), 0, "early-second");
        queue.schedule(start, Duration::from_millis(900), 0, "pending");

        let drained = queue.drain_due(start + Duration::from_millis(300), 0);

        assert_eq!(drained, vec!["early", "early-second", "late"]);
        assert_eq!(
            queue.next_deadline(),
            Some(start + Duration::from_millis(900))
        );
    }

    #[test]
    fn stale_epoch_events_are_dropped() {
        let start = Instant::now();
        let mut queue = DeferredQueue::new();
        queue.schedule(start, Duration::from_millis(10), 0, "old game");
        queue.schedule(start, Duration::from_millis(10), 1, "new game");

        let drained = queue.drain_due(start + Duration::from_millis(10), 1);

        assert_eq!(drained, vec!["new game"]);
        assert!(queue.is_empty());
        assert_eq!(queue.next_deadline(), None);
    }
}
