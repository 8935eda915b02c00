//! Events retired from disarmed pins
//!
//! When a pin leaves edge capture (mode change, eviction, re-arm with a
//! different event type) its queued samples are converted right away and
//! parked here until the next publish pass.

use heapless::Deque;

use super::{EdgeTracker, Event, EventSink};

/// Events held between a teardown and the next publish pass
pub const BACKLOG_DEPTH: usize = 32;

#[derive(Debug, Default)]
pub struct Backlog {
    events: Deque<Event, BACKLOG_DEPTH>,
    dropped: u32,
}

impl Backlog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Events waiting to be published
    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events lost because the backlog was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Convert every sample still queued in `tracker` and hold the events
    ///
    /// Returns the number of events held.
    pub fn retire(&mut self, source: u16, mut tracker: EdgeTracker) -> usize {
        let before = self.dropped;
        let converted = tracker.drain(source, self);
        converted - (self.dropped - before) as usize
    }

    /// Publish held events oldest first
    pub fn drain<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let mut published = 0;
        while let Some(event) = self.events.pop_front() {
            sink.publish(event);
            published += 1;
        }
        published
    }
}

impl EventSink for Backlog {
    fn publish(&mut self, event: Event) {
        if self.events.push_back(event).is_err() {
            self.dropped = self.dropped.saturating_add(1);
        }
    }
}
