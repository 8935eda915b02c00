//! Semantic pin events
//!
//! Events are handed to an [`EventSink`] supplied by the surrounding system
//! (usually a message bus) and are not retained afterwards.

pub mod backlog;
pub mod edge;

pub use backlog::{Backlog, BACKLOG_DEPTH};
pub use edge::{Edge, EdgeEventType, EdgeTracker, EDGE_QUEUE_DEPTH};

/// Kind of event raised by a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EventKind {
    /// Rising edge; value is the edge timestamp
    Rise,
    /// Falling edge; value is the edge timestamp
    Fall,
    /// End of a high phase; value is its duration
    PulseHigh,
    /// End of a low phase; value is its duration
    PulseLow,
    /// Debounced touch began; value is the timestamp
    TouchDown,
    /// Debounced touch ended; value is the timestamp
    TouchUp,
    /// Short touch completed (follows `TouchUp`); value is the timestamp
    TouchClick,
    /// Touch held past the long-click time completed (follows `TouchUp`)
    TouchLongClick,
    /// Touch still held after the hold time; raised once per touch
    TouchHold,
}

impl EventKind {
    /// Check if the value carries a duration rather than a timestamp
    pub fn is_pulse(&self) -> bool {
        matches!(self, EventKind::PulseHigh | EventKind::PulseLow)
    }

    /// Check if this is a button-style touch event
    pub fn is_touch(&self) -> bool {
        matches!(
            self,
            EventKind::TouchDown
                | EventKind::TouchUp
                | EventKind::TouchClick
                | EventKind::TouchLongClick
                | EventKind::TouchHold
        )
    }
}

/// Event published by a pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Event {
    /// Id of the pin that raised the event
    pub source: u16,
    /// What happened
    pub kind: EventKind,
    /// Timestamp or pulse duration in microseconds, see [`EventKind`]
    pub value_us: u64,
}

impl Event {
    /// Create an event
    pub const fn new(source: u16, kind: EventKind, value_us: u64) -> Self {
        Self {
            source,
            kind,
            value_us,
        }
    }
}

/// Outward publish capability
pub trait EventSink {
    /// Deliver one event
    fn publish(&mut self, event: Event);
}

impl<F: FnMut(Event)> EventSink for F {
    fn publish(&mut self, event: Event) {
        self(event)
    }
}

/// Event generation mode selected through `event_on`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinEventMode {
    /// No events
    None,
    /// `Rise` / `Fall` on every edge
    Edge,
    /// `PulseHigh` / `PulseLow` with phase durations
    Pulse,
    /// Resistive touch with button-style events
    Touch,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert!(EventKind::PulseHigh.is_pulse());
        assert!(!EventKind::Rise.is_pulse());
        assert!(EventKind::TouchClick.is_touch());
        assert!(EventKind::TouchHold.is_touch());
        assert!(!EventKind::TouchLongClick.is_pulse());
        assert!(!EventKind::Fall.is_touch());
    }

    #[test]
    fn test_closure_sink() {
        let mut count = 0;
        let mut sink = |_event: Event| count += 1;
        sink.publish(Event::new(1, EventKind::Rise, 0));
        sink.publish(Event::new(1, EventKind::Fall, 10));
        assert_eq!(count, 2);
    }
}
