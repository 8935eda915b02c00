//! Instrumented host-side fakes
//!
//! [`MockFactory`] hands out drivers that share one in-memory model of the
//! chip. Digital outputs loop back onto the line level, so a pin read right
//! after being driven sees what was written. Every driver counts its own
//! construction and destruction per designator, which lets tests check
//! that a pin never holds more than one driver.

use core::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::rc::Rc;
use std::vec::Vec;

use multipin_hal::{
    AnalogInput, DigitalInput, DigitalOutput, DriveStrength, MicrosClock, PeripheralFactory,
    Pull, PwmOutput, Sense,
};

use crate::event::{Event, EventKind, EventSink};

/// Observable state of one physical line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Line {
    pub level: bool,
    pub pull: Pull,
    pub sense: Sense,
    pub drive: DriveStrength,
    /// Raw ADC reading returned by analog drivers
    pub adc: u16,
    /// PWM channel routed to this line
    pub pwm_channel: Option<u8>,
    pub duty: u16,
    /// Drivers alive right now
    pub live: u32,
    /// Highest `live` ever observed
    pub max_live: u32,
    pub created: u32,
    pub dropped: u32,
}

#[derive(Debug)]
struct Chip {
    lines: BTreeMap<u8, Line>,
    period_us: u32,
    adc_bits: u8,
    compare_and_drive: bool,
}

impl Chip {
    fn line(&mut self, designator: u8) -> &mut Line {
        self.lines.entry(designator).or_default()
    }

    fn attach(&mut self, designator: u8) {
        let line = self.line(designator);
        line.live += 1;
        line.created += 1;
        line.max_live = line.max_live.max(line.live);
    }

    fn detach(&mut self, designator: u8) {
        let line = self.line(designator);
        line.live = line.live.saturating_sub(1);
        line.dropped += 1;
    }
}

/// Test-side view of the fake chip
#[derive(Debug, Clone)]
pub struct MockHandle(Rc<RefCell<Chip>>);

impl MockHandle {
    /// Snapshot of a line
    pub fn line(&self, designator: u8) -> Line {
        self.0.borrow_mut().line(designator).clone()
    }

    /// Drive a line from outside, as a button or signal source would
    pub fn set_level(&self, designator: u8, high: bool) {
        self.0.borrow_mut().line(designator).level = high;
    }

    pub fn set_adc(&self, designator: u8, raw: u16) {
        self.0.borrow_mut().line(designator).adc = raw;
    }

    /// Enable the hardware compare-and-drive primitive on digital inputs
    pub fn set_compare_and_drive(&self, enabled: bool) {
        self.0.borrow_mut().compare_and_drive = enabled;
    }

    pub fn pwm_period_us(&self) -> u32 {
        self.0.borrow().period_us
    }

    /// Largest number of drivers any line ever held at once
    pub fn max_live(&self) -> u32 {
        self.0
            .borrow()
            .lines
            .values()
            .map(|line| line.max_live)
            .max()
            .unwrap_or(0)
    }

    /// Drivers alive across all lines
    pub fn total_live(&self) -> u32 {
        self.0.borrow().lines.values().map(|line| line.live).sum()
    }
}

/// Factory producing instrumented drivers
#[derive(Debug)]
pub struct MockFactory {
    chip: Rc<RefCell<Chip>>,
}

impl MockFactory {
    /// Create a factory with a 10-bit ADC, plus the handle tests inspect
    /// it through
    pub fn new() -> (Self, MockHandle) {
        Self::with_adc_bits(10)
    }

    pub fn with_adc_bits(adc_bits: u8) -> (Self, MockHandle) {
        let chip = Rc::new(RefCell::new(Chip {
            lines: BTreeMap::new(),
            period_us: 0,
            adc_bits,
            compare_and_drive: false,
        }));
        (Self { chip: chip.clone() }, MockHandle(chip))
    }
}

impl PeripheralFactory for MockFactory {
    type DigitalIn = MockInput;
    type DigitalOut = MockOutput;
    type AnalogIn = MockAdc;
    type Pwm = MockPwm;

    fn make_digital_in(&mut self, designator: u8, pull: Pull) -> MockInput {
        let mut chip = self.chip.borrow_mut();
        chip.attach(designator);
        chip.line(designator).pull = pull;
        MockInput {
            designator,
            chip: self.chip.clone(),
        }
    }

    fn make_digital_out(&mut self, designator: u8) -> MockOutput {
        let mut chip = self.chip.borrow_mut();
        chip.attach(designator);
        chip.line(designator).level = false;
        MockOutput {
            designator,
            high: false,
            chip: self.chip.clone(),
        }
    }

    fn make_analog_in(&mut self, designator: u8) -> MockAdc {
        self.chip.borrow_mut().attach(designator);
        MockAdc {
            designator,
            chip: self.chip.clone(),
        }
    }

    fn bind_pwm_channel(&mut self, channel: u8, designator: u8) -> MockPwm {
        let mut chip = self.chip.borrow_mut();
        chip.attach(designator);
        let line = chip.line(designator);
        line.pwm_channel = Some(channel);
        line.duty = 0;
        MockPwm {
            designator,
            duty: 0,
            chip: self.chip.clone(),
        }
    }

    fn set_pwm_period_us(&mut self, period_us: u32) {
        self.chip.borrow_mut().period_us = period_us;
    }

    fn pwm_period_us(&self) -> u32 {
        self.chip.borrow().period_us
    }

    fn set_detect(&mut self, designator: u8, sense: Sense) {
        self.chip.borrow_mut().line(designator).sense = sense;
    }

    fn set_drive(&mut self, designator: u8, drive: DriveStrength) {
        self.chip.borrow_mut().line(designator).drive = drive;
    }
}

#[derive(Debug)]
pub struct MockInput {
    designator: u8,
    chip: Rc<RefCell<Chip>>,
}

impl DigitalInput for MockInput {
    fn is_high(&mut self) -> bool {
        self.chip.borrow_mut().line(self.designator).level
    }

    fn set_pull(&mut self, pull: Pull) {
        self.chip.borrow_mut().line(self.designator).pull = pull;
    }

    fn drive_if_opposite(&mut self, high: bool) -> Option<bool> {
        let mut chip = self.chip.borrow_mut();
        if !chip.compare_and_drive {
            return None;
        }
        let line = chip.line(self.designator);
        if line.level == high {
            return Some(false);
        }
        line.level = high;
        Some(true)
    }
}

impl Drop for MockInput {
    fn drop(&mut self) {
        self.chip.borrow_mut().detach(self.designator);
    }
}

#[derive(Debug)]
pub struct MockOutput {
    designator: u8,
    high: bool,
    chip: Rc<RefCell<Chip>>,
}

impl DigitalOutput for MockOutput {
    fn set_high(&mut self) {
        self.high = true;
        self.chip.borrow_mut().line(self.designator).level = true;
    }

    fn set_low(&mut self) {
        self.high = false;
        self.chip.borrow_mut().line(self.designator).level = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

impl Drop for MockOutput {
    fn drop(&mut self) {
        self.chip.borrow_mut().detach(self.designator);
    }
}

#[derive(Debug)]
pub struct MockAdc {
    designator: u8,
    chip: Rc<RefCell<Chip>>,
}

impl AnalogInput for MockAdc {
    fn resolution_bits(&self) -> u8 {
        self.chip.borrow().adc_bits
    }

    fn read_raw(&mut self) -> u16 {
        self.chip.borrow_mut().line(self.designator).adc
    }
}

impl Drop for MockAdc {
    fn drop(&mut self) {
        self.chip.borrow_mut().detach(self.designator);
    }
}

/// PWM channel whose resolution is one count per microsecond of period
#[derive(Debug)]
pub struct MockPwm {
    designator: u8,
    duty: u16,
    chip: Rc<RefCell<Chip>>,
}

impl PwmOutput for MockPwm {
    fn max_duty(&self) -> u16 {
        self.chip.borrow().period_us.min(u16::MAX as u32) as u16
    }

    fn set_duty(&mut self, duty: u16) {
        self.duty = duty.min(self.max_duty());
        self.chip.borrow_mut().line(self.designator).duty = self.duty;
    }

    fn duty(&self) -> u16 {
        self.duty
    }
}

impl Drop for MockPwm {
    fn drop(&mut self) {
        let mut chip = self.chip.borrow_mut();
        let line = chip.line(self.designator);
        line.pwm_channel = None;
        line.duty = 0;
        chip.detach(self.designator);
    }
}

/// Clock that only moves when told to
#[derive(Debug, Clone, Default)]
pub struct ManualClock(Rc<Cell<u64>>);

impl ManualClock {
    pub fn new(start_us: u64) -> Self {
        Self(Rc::new(Cell::new(start_us)))
    }

    pub fn set(&self, now_us: u64) {
        self.0.set(now_us);
    }

    pub fn advance(&self, delta_us: u64) {
        self.0.set(self.0.get() + delta_us);
    }
}

impl MicrosClock for ManualClock {
    fn now_us(&self) -> u64 {
        self.0.get()
    }
}

/// Sink that keeps every published event
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<Event>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Kinds of the recorded events, in publish order
    pub fn kinds(&self) -> Vec<EventKind> {
        self.events.iter().map(|event| event.kind).collect()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn publish(&mut self, event: Event) {
        self.events.push(event);
    }
}
