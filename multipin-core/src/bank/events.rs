//! Edge, pulse and touch event generation
//!
//! Interrupt-side entry points ([`PinBank::on_detect`],
//! [`PinBank::capture_edge`]) only queue samples. The foreground calls
//! [`PinBank::process_events`] to publish them and [`PinBank::touch_tick`]
//! from a periodic tick to sample touch pins.

use multipin_hal::{DigitalInput, MicrosClock, PeripheralFactory, Sense};

use super::{retire_edges, PinBank};
use crate::error::{PinError, Result};
use crate::event::{
    Edge, EdgeEventType, EdgeTracker, Event, EventKind, EventSink, PinEventMode,
};
use crate::pin::driver::ActiveDriver;
use crate::pin::Mode;
use crate::touch::TouchMode;

impl<F, C, const N: usize, const P: usize> PinBank<F, C, N, P>
where
    F: PeripheralFactory,
    C: MicrosClock,
{
    /// Arm both-edge detection on a digital input
    ///
    /// The pin becomes `DigitalIn` if it is not already. DETECT is armed
    /// for the level opposite to the one the pin reads now and is flipped
    /// on every edge. Pulse timing starts from the moment of arming.
    ///
    /// Re-arming with the same event type keeps the queued edges and the
    /// pulse reference. Switching type retires the queued edges to the
    /// backlog first.
    pub fn enable_rise_fall_events(
        &mut self,
        index: usize,
        event_type: EdgeEventType,
    ) -> Result<()> {
        self.set_mode(index, Mode::DigitalIn)?;
        let now = self.clock.now_us();

        let pin = self.pins.get_mut(index).ok_or(PinError::InvalidPin)?;
        let ActiveDriver::DigitalIn(input) = &mut pin.driver else {
            return Err(PinError::UnsupportedCapability);
        };
        let sense = Sense::opposite_of(input.is_high());

        match pin.edge.take() {
            Some(tracker) if tracker.event_type() == event_type => pin.edge = Some(tracker),
            old => {
                if let Some(tracker) = old {
                    retire_edges(&mut self.backlog, pin.id(), tracker);
                }
                pin.edge = Some(EdgeTracker::new(event_type, now));
            }
        }
        self.factory.set_detect(pin.designator(), sense);
        pin.sense = sense;
        debug!("pin {} events {}", pin.id(), event_type);
        Ok(())
    }

    /// Disarm edge or touch events
    ///
    /// A touch pin is disconnected; an input pin stays an input and its
    /// queued edges move to the backlog. Safe to call when nothing is armed.
    pub fn disable_events(&mut self, index: usize) -> Result<()> {
        if matches!(self.get(index)?.mode(), Mode::Touch(_)) {
            return self.disconnect(index);
        }

        let pin = self.pins.get_mut(index).ok_or(PinError::InvalidPin)?;
        self.factory.set_detect(pin.designator(), Sense::Disabled);
        pin.sense = Sense::Disabled;
        if let Some(tracker) = pin.edge.take() {
            retire_edges(&mut self.backlog, pin.id(), tracker);
        }
        Ok(())
    }

    /// Select the kind of events a pin raises
    pub fn event_on(&mut self, index: usize, mode: PinEventMode) -> Result<()> {
        match mode {
            PinEventMode::None => self.disable_events(index),
            PinEventMode::Edge => self.enable_rise_fall_events(index, EdgeEventType::Edge),
            PinEventMode::Pulse => self.enable_rise_fall_events(index, EdgeEventType::Pulse),
            PinEventMode::Touch => self.set_mode(index, Mode::Touch(TouchMode::Resistive)),
        }
    }

    /// DETECT handler for one pin
    ///
    /// Derives the edge from the sense that fired, queues it, and re-arms
    /// for the opposite level. Returns `false` if nothing was queued
    /// (events not armed, or the queue was full).
    pub fn on_detect(&mut self, index: usize) -> Result<bool> {
        let now = self.clock.now_us();
        let pin = self.pins.get_mut(index).ok_or(PinError::InvalidPin)?;
        let id = pin.id();
        let designator = pin.designator();

        let Some(tracker) = pin.edge.as_mut() else {
            return Ok(false);
        };
        let edge = match pin.sense {
            Sense::High => Edge::Rise,
            Sense::Low => Edge::Fall,
            Sense::Disabled => return Ok(false),
        };

        let next = Sense::opposite_of(edge.level_after());
        self.factory.set_detect(designator, next);
        pin.sense = next;

        let queued = tracker.capture(edge, now);
        if !queued {
            warn!("pin {} edge queue full, {} dropped", id, tracker.dropped());
        }
        Ok(queued)
    }

    /// Queue an edge reported by a dedicated edge interrupt
    ///
    /// # Errors
    /// `UnsupportedCapability` if rise/fall events are not armed.
    pub fn capture_edge(&mut self, index: usize, edge: Edge) -> Result<bool> {
        let now = self.clock.now_us();
        let pin = self.get_mut(index)?;
        let id = pin.id();
        let tracker = pin.edge.as_mut().ok_or(PinError::UnsupportedCapability)?;

        let queued = tracker.capture(edge, now);
        if !queued {
            warn!("pin {} edge queue full, {} dropped", id, tracker.dropped());
        }
        Ok(queued)
    }

    /// Publish every queued edge as events
    ///
    /// Edges retired from disarmed pins go out first, then pins are
    /// drained in index order; events from one pin keep their capture
    /// order. Returns the number of events published.
    pub fn process_events<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let mut published = self.backlog.drain(&mut *sink);
        for pin in self.pins.iter_mut() {
            let id = pin.id();
            if let Some(tracker) = pin.edge.as_mut() {
                published += tracker.drain(id, &mut *sink);
            }
        }
        published
    }

    /// Take one debounce sample from every touch pin
    ///
    /// Publishes `TouchDown` when a touch settles, a single `TouchHold`
    /// once it has lasted the configured hold time, and on release
    /// `TouchUp` followed by `TouchClick` or, for presses of at least the
    /// long-click time, `TouchLongClick`. Returns the number of events
    /// published.
    pub fn touch_tick<S: EventSink + ?Sized>(&mut self, sink: &mut S) -> usize {
        let now = self.clock.now_us();
        let long_click_us = self.touch.long_click_us;
        let hold_us = self.touch.hold_us;
        let mut published = 0;

        for pin in self.pins.iter_mut() {
            let id = pin.id();
            let ActiveDriver::Touch(sensor) = &mut pin.driver else {
                continue;
            };

            match sensor.sample() {
                Some(true) => {
                    trace!("pin {} touched", id);
                    pin.press.press(now);
                    sink.publish(Event::new(id, EventKind::TouchDown, now));
                    published += 1;
                }
                Some(false) => {
                    trace!("pin {} released", id);
                    let click = pin.press.release(now, long_click_us);
                    sink.publish(Event::new(id, EventKind::TouchUp, now));
                    sink.publish(Event::new(id, click, now));
                    published += 2;
                }
                None => {
                    if pin.press.hold_due(now, hold_us) {
                        trace!("pin {} held", id);
                        sink.publish(Event::new(id, EventKind::TouchHold, now));
                        published += 1;
                    }
                }
            }
        }

        published
    }

    /// Debounced touch state using the pin's touch mode
    ///
    /// Enters touch mode if needed. The state only advances through
    /// [`PinBank::touch_tick`].
    pub fn is_touched(&mut self, index: usize) -> Result<bool> {
        let mode = self.get(index)?.touch_mode();
        self.is_touched_with(index, mode)
    }

    /// Debounced touch state, switching to `mode` first if different
    pub fn is_touched_with(&mut self, index: usize, mode: TouchMode) -> Result<bool> {
        self.set_mode(index, Mode::Touch(mode))?;
        match &self.get(index)?.driver {
            ActiveDriver::Touch(sensor) => Ok(sensor.is_touched()),
            _ => Err(PinError::UnsupportedCapability),
        }
    }

    /// Re-measure the capacitive baseline
    ///
    /// The baseline is kept for the next time the pin enters capacitive
    /// touch mode.
    ///
    /// # Errors
    /// `UnsupportedCapability` unless the pin is in capacitive touch mode.
    pub fn touch_calibrate(&mut self, index: usize) -> Result<u16> {
        let pin = self.get_mut(index)?;
        let ActiveDriver::Touch(sensor) = &mut pin.driver else {
            return Err(PinError::UnsupportedCapability);
        };
        let baseline = sensor.calibrate().ok_or(PinError::UnsupportedCapability)?;
        pin.calibration = Some(baseline);
        info!("pin {} touch baseline {}", pin.id(), baseline);
        Ok(baseline)
    }
}
