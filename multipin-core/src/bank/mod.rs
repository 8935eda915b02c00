//! Pin bank
//!
//! The bank owns every pin, the peripheral factory, the timestamp source
//! and the single PWM channel allocator. All mode changes go through
//! [`PinBank::set_mode`], which is the only place drivers are created or
//! destroyed:
//!
//! ```text
//!   set_mode(pin, target)
//!     │ capability check (no mutation on failure)
//!     │ already in target? → refresh PWM recency, done
//!     ▼
//!   teardown: DETECT off → queued edges retired → driver dropped → PWM released
//!     ▼
//!   setup:    PWM acquired (evicting the LRU pin) → new driver built
//! ```
//!
//! The operations themselves are split by concern across `digital`,
//! `analog` and `events`.

mod analog;
mod digital;
mod events;

use heapless::Vec;
use multipin_hal::{MicrosClock, PeripheralFactory, Pull, Sense};

use crate::config::{BankConfig, ServoConfig, TouchConfig};
use crate::error::{PinError, Result};
use crate::event::{Backlog, EdgeTracker};
use crate::pin::driver::ActiveDriver;
use crate::pin::{Mode, Pin};
use crate::pwm::{PwmAllocator, PWM_CHANNEL_COUNT};
use crate::touch::{PressTracker, TouchMode, TouchSensor};

/// Pins sharing one PWM peripheral and one interrupt line
///
/// Pins are addressed by their index in [`BankConfig::pins`].
pub struct PinBank<F, C, const N: usize, const P: usize = PWM_CHANNEL_COUNT>
where
    F: PeripheralFactory,
    C: MicrosClock,
{
    pins: Vec<Pin<F>, N>,
    pwm: PwmAllocator<P>,
    factory: F,
    clock: C,
    touch: TouchConfig,
    servo: ServoConfig,
    backlog: Backlog,
}

impl<F, C, const N: usize, const P: usize> PinBank<F, C, N, P>
where
    F: PeripheralFactory,
    C: MicrosClock,
{
    /// Bring up a bank with every pin `Unused`
    ///
    /// The PWM timer is set to the configured default period.
    ///
    /// # Errors
    /// `InvalidParameter` if the configuration is invalid or `P` is not a
    /// usable channel count (1 to 256).
    pub fn new(mut factory: F, clock: C, config: &BankConfig<N>) -> Result<Self> {
        if P == 0 || P > u8::MAX as usize + 1 {
            return Err(PinError::InvalidParameter);
        }
        config.validate()?;

        let mut pins = Vec::new();
        for pin in &config.pins {
            pins.push(Pin::new(*pin)).map_err(|_| PinError::InvalidParameter)?;
        }

        factory.set_pwm_period_us(config.default_pwm_period_us);
        info!("pin bank up: {} pins, {} pwm channels", pins.len(), P);

        Ok(Self {
            pins,
            pwm: PwmAllocator::new(),
            factory,
            clock,
            touch: config.touch,
            servo: config.servo,
            backlog: Backlog::new(),
        })
    }

    /// Number of pins in the bank
    pub fn len(&self) -> usize {
        self.pins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pins.is_empty()
    }

    /// Pin at `index`
    pub fn pin(&self, index: usize) -> Option<&Pin<F>> {
        self.pins.get(index)
    }

    /// All pins in index order
    pub fn pins(&self) -> impl Iterator<Item = &Pin<F>> + '_ {
        self.pins.iter()
    }

    /// Index of the pin with event source `id`
    pub fn index_of(&self, id: u16) -> Option<usize> {
        self.pins.iter().position(|pin| pin.id() == id)
    }

    pub fn allocator(&self) -> &PwmAllocator<P> {
        &self.pwm
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn touch_config(&self) -> &TouchConfig {
        &self.touch
    }

    pub fn servo_config(&self) -> &ServoConfig {
        &self.servo
    }

    /// Events retired from disarmed pins, published first by
    /// [`PinBank::process_events`]
    pub fn backlog(&self) -> &Backlog {
        &self.backlog
    }

    /// Current mode of a pin
    pub fn mode(&self, index: usize) -> Result<Mode> {
        self.get(index).map(Pin::mode)
    }

    /// Move a pin into `target`
    ///
    /// Does nothing if the pin is already there (an `AnalogOut` pin still
    /// counts as a fresh use of its PWM channel). Entering `AnalogOut` with
    /// every channel taken forces the least recently used PWM pin to
    /// `Unused`.
    ///
    /// # Errors
    /// - `InvalidPin` if `index` is out of range
    /// - `UnsupportedCapability` if the pin cannot enter `target`; the pin
    ///   is left untouched
    pub fn set_mode(&mut self, index: usize, target: Mode) -> Result<()> {
        let pin = self.get(index)?;
        if !target.is_supported_by(pin.capability()) {
            return Err(PinError::UnsupportedCapability);
        }

        if pin.mode() == target {
            if target.needs_pwm_channel() {
                self.pwm.acquire(index);
            }
            return Ok(());
        }

        debug!("pin {}: {} -> {}", pin.id(), pin.mode(), target);
        self.teardown(index);
        self.setup(index, target)
    }

    /// Release everything the pin holds and return it to `Unused`
    pub fn disconnect(&mut self, index: usize) -> Result<()> {
        self.get(index)?;
        self.teardown(index);
        Ok(())
    }

    pub(crate) fn get(&self, index: usize) -> Result<&Pin<F>> {
        self.pins.get(index).ok_or(PinError::InvalidPin)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Result<&mut Pin<F>> {
        self.pins.get_mut(index).ok_or(PinError::InvalidPin)
    }

    /// Tear down whatever the pin holds
    fn teardown(&mut self, index: usize) {
        let Some(pin) = self.pins.get_mut(index) else {
            return;
        };

        // Interrupts first so no handler sees a half-dismantled pin
        self.factory.set_detect(pin.designator(), Sense::Disabled);
        pin.sense = Sense::Disabled;
        if let Some(tracker) = pin.edge.take() {
            retire_edges(&mut self.backlog, pin.id(), tracker);
        }
        pin.press = PressTracker::default();

        let old = pin.driver.take();
        if let ActiveDriver::Touch(sensor) = &old {
            if let Some(baseline) = sensor.baseline() {
                pin.calibration = Some(baseline);
            }
        }
        drop(old);

        if let Some(channel) = self.pwm.release(index) {
            trace!("pin {} released pwm channel {}", pin.id(), channel);
        }
    }

    /// Build the driver for `target` on a torn-down pin
    fn setup(&mut self, index: usize, target: Mode) -> Result<()> {
        let pin = self.get(index)?;
        let id = pin.id();
        let designator = pin.designator();
        let pull = pin.pull;
        let drive = pin.drive;
        let stored = pin.calibration.or(self.touch.default_baseline);

        let driver = match target {
            Mode::Unused => ActiveDriver::None,
            Mode::DigitalIn => {
                ActiveDriver::DigitalIn(self.factory.make_digital_in(designator, pull))
            }
            Mode::DigitalOut => {
                let out = self.factory.make_digital_out(designator);
                self.factory.set_drive(designator, drive);
                ActiveDriver::DigitalOut(out)
            }
            Mode::AnalogIn => ActiveDriver::AnalogIn(self.factory.make_analog_in(designator)),
            Mode::AnalogOut => {
                let grant = self.pwm.acquire(index);
                if let Some(victim) = grant.evicted {
                    if let Some(lost) = self.pins.get(victim) {
                        warn!("pwm channel {} taken from pin {}", grant.channel, lost.id());
                    }
                    self.teardown(victim);
                }
                ActiveDriver::AnalogOut {
                    channel: grant.channel,
                    pwm: self.factory.bind_pwm_channel(grant.channel, designator),
                }
            }
            Mode::Touch(TouchMode::Resistive) => {
                let pull = if self.touch.resistive_pull_up {
                    Pull::Up
                } else {
                    Pull::None
                };
                let input = self.factory.make_digital_in(designator, pull);
                ActiveDriver::Touch(TouchSensor::resistive(input, &self.touch))
            }
            Mode::Touch(TouchMode::Capacitive) => {
                let adc = self.factory.make_analog_in(designator);
                let sensor = TouchSensor::capacitive(adc, &self.touch, stored);
                if stored.is_none() {
                    info!("pin {} touch baseline {}", id, sensor.baseline());
                }
                ActiveDriver::Touch(sensor)
            }
        };

        let pin = self.get_mut(index)?;
        if let ActiveDriver::Touch(sensor) = &driver {
            pin.touch_mode = sensor.mode();
            if let Some(baseline) = sensor.baseline() {
                pin.calibration = Some(baseline);
            }
        }
        pin.analog_level = 0;
        pin.driver = driver;
        Ok(())
    }
}

/// Move a disarmed pin's queued edges into the backlog
pub(crate) fn retire_edges(backlog: &mut Backlog, id: u16, tracker: EdgeTracker) {
    let pending = tracker.pending();
    let held = backlog.retire(id, tracker);
    if held < pending {
        warn!("pin {} backlog full, {} edges lost", id, pending - held);
    }
}
