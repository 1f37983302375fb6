use crate::core::FrameSnapshot;

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// The two most recent snapshots plus the timing the consumer needs to blend them
#[derive(Debug, Clone)]
pub struct PublishedFrames {
    pub previous: Arc<FrameSnapshot>,
    pub current: Arc<FrameSnapshot>,
    /// When the tick that produced `current` started
    pub tick_start: Instant,
    /// Tick number of `current`
    pub tick: u64,
    /// False when `previous` and `current` must not be blended, e.g. after a teleport
    pub interpolate: bool,
}

#[derive(Debug)]
struct Shared {
    frames: Mutex<PublishedFrames>,
    // lets readers skip the lock when nothing new was published
    latest_tick: AtomicU64,
}

/// Double-buffered hand-off of snapshots from the simulation thread to consumers.
///
/// Publishing rotates `current` into `previous` under a short lock. Snapshots are immutable once
/// published, so readers clone the `Arc`s and work outside the lock.
#[derive(Debug, Clone)]
pub struct FrameExchange {
    shared: Arc<Shared>,
}

impl FrameExchange {
    /// Creates an exchange where both buffers hold `initial`
    pub fn new(initial: FrameSnapshot, now: Instant) -> Self {
        let tick = initial.tick;
        let initial = Arc::new(initial);
        Self {
            shared: Arc::new(Shared {
                frames: Mutex::new(PublishedFrames {
                    previous: Arc::clone(&initial),
                    current: initial,
                    tick_start: now,
                    tick,
                    interpolate: false,
                }),
                latest_tick: AtomicU64::new(tick),
            }),
        }
    }

    /// Rotates a new snapshot in and hands back the one that fell out of the pair.
    ///
    /// The displaced snapshot leaves the lock still referenced, so freeing it never happens
    /// inside the critical section.
    pub fn publish(&self, snapshot: FrameSnapshot, tick_start: Instant, interpolate: bool) -> Arc<FrameSnapshot> {
        let tick = snapshot.tick;
        let snapshot = Arc::new(snapshot);

        let mut frames = self.shared.frames.lock();
        let previous = std::mem::replace(&mut frames.current, snapshot);
        let retired = std::mem::replace(&mut frames.previous, previous);
        frames.tick_start = tick_start;
        frames.tick = tick;
        frames.interpolate = interpolate;
        self.shared.latest_tick.store(tick, Ordering::Release);
        retired
    }

    /// Copies out the current pair
    pub fn latest(&self) -> PublishedFrames {
        self.shared.frames.lock().clone()
    }

    /// Tick number of the most recent publish, read without locking
    pub fn latest_tick(&self) -> u64 {
        self.shared.latest_tick.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(tick: u64) -> FrameSnapshot {
        FrameSnapshot { tick, ..Default::default() }
    }

    #[test]
    fn publish_rotates_current_into_previous() {
        let start = Instant::now();
        let exchange = FrameExchange::new(frame(0), start);
        let initial = exchange.latest();
        assert_eq!(initial.previous.tick, 0);
        assert_eq!(initial.current.tick, 0);
        assert!(!initial.interpolate);

        exchange.publish(frame(1), start, true);
        exchange.publish(frame(2), start, true);

        let latest = exchange.latest();
        assert_eq!(latest.previous.tick, 1);
        assert_eq!(latest.current.tick, 2);
        assert_eq!(exchange.latest_tick(), 2);
        assert!(latest.interpolate);
    }

    #[test]
    fn readers_keep_their_copy() {
        let exchange = FrameExchange::new(frame(0), Instant::now());
        let held = exchange.latest();
        exchange.publish(frame(7), Instant::now(), false);
        assert_eq!(held.current.tick, 0);
    }

    #[test]
    fn retired_snapshot_is_released_by_the_publisher() {
        let start = Instant::now();
        let exchange = FrameExchange::new(frame(0), start);
        exchange.publish(frame(1), start, true);

        let retired = exchange.publish(frame(2), start, true);
        assert_eq!(retired.tick, 0);
        // nothing else holds it and the lock is already free
        assert_eq!(Arc::strong_count(&retired), 1);
        assert!(exchange.shared.frames.try_lock().is_some());
    }
}
