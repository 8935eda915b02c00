//! Edge capture and pulse timing
//!
//! Interrupt handlers only push raw `(edge, timestamp)` samples into a
//! bounded per-pin queue. [`EdgeTracker::drain`] later converts them into
//! events in capture order, so per-pin ordering is exact while ordering
//! across pins depends on the order pins are drained.
//!
//! The shortest pulse that can be measured is bounded by interrupt latency
//! (around 85 µs, roughly 5 kHz, on typical parts). Finer resolution needs
//! a timer capture peripheral.

use heapless::Deque;

use super::{Event, EventKind, EventSink};

/// Samples buffered per pin between interrupt and drain
pub const EDGE_QUEUE_DEPTH: usize = 16;

/// Direction of a detected transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    /// Low to high
    Rise,
    /// High to low
    Fall,
}

impl Edge {
    /// Level of the pin after this edge
    pub fn level_after(self) -> bool {
        matches!(self, Edge::Rise)
    }
}

/// What a tracked pin reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EdgeEventType {
    /// Publish `Rise` / `Fall`
    Edge,
    /// Publish `PulseLow` / `PulseHigh` durations
    Pulse,
}

#[derive(Debug, Clone, Copy)]
struct EdgeSample {
    edge: Edge,
    at_us: u64,
}

/// Per-pin edge state
#[derive(Debug)]
pub struct EdgeTracker {
    event_type: EdgeEventType,
    last_edge_us: u64,
    pending: Deque<EdgeSample, EDGE_QUEUE_DEPTH>,
    dropped: u32,
}

impl EdgeTracker {
    /// Start tracking at `now_us`
    ///
    /// The first pulse is measured from the moment tracking was armed.
    pub fn new(event_type: EdgeEventType, now_us: u64) -> Self {
        Self {
            event_type,
            last_edge_us: now_us,
            pending: Deque::new(),
            dropped: 0,
        }
    }

    /// Configured event type
    pub fn event_type(&self) -> EdgeEventType {
        self.event_type
    }

    /// Timestamp of the last converted edge
    pub fn last_edge_us(&self) -> u64 {
        self.last_edge_us
    }

    /// Samples captured but not yet converted
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Samples lost because the queue was full
    pub fn dropped(&self) -> u32 {
        self.dropped
    }

    /// Record an edge from interrupt context
    ///
    /// Returns `false` if the queue was full and the sample was discarded.
    /// Queued samples are never overwritten.
    pub fn capture(&mut self, edge: Edge, at_us: u64) -> bool {
        match self.pending.push_back(EdgeSample { edge, at_us }) {
            Ok(()) => true,
            Err(_) => {
                self.dropped = self.dropped.saturating_add(1);
                false
            }
        }
    }

    /// Convert every pending sample and publish it as `source`
    ///
    /// Returns the number of events published.
    pub fn drain<S: EventSink + ?Sized>(&mut self, source: u16, sink: &mut S) -> usize {
        let mut published = 0;
        while let Some(sample) = self.pending.pop_front() {
            sink.publish(self.convert(source, sample));
            published += 1;
        }
        published
    }

    fn convert(&mut self, source: u16, sample: EdgeSample) -> Event {
        let event = match (self.event_type, sample.edge) {
            (EdgeEventType::Edge, Edge::Rise) => Event::new(source, EventKind::Rise, sample.at_us),
            (EdgeEventType::Edge, Edge::Fall) => Event::new(source, EventKind::Fall, sample.at_us),
            // A rise ends a low phase, a fall ends a high phase
            (EdgeEventType::Pulse, Edge::Rise) => Event::new(
                source,
                EventKind::PulseLow,
                sample.at_us.saturating_sub(self.last_edge_us),
            ),
            (EdgeEventType::Pulse, Edge::Fall) => Event::new(
                source,
                EventKind::PulseHigh,
                sample.at_us.saturating_sub(self.last_edge_us),
            ),
        };
        self.last_edge_us = sample.at_us;
        event
    }
}
