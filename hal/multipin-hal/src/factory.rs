//! Peripheral driver factory
//!
//! The core never touches registers. Whenever a pin enters a mode it asks
//! the factory for a fresh driver bound to that pin, and drops the driver
//! again when the pin leaves the mode.

use crate::adc::AnalogInput;
use crate::gpio::{DigitalInput, DigitalOutput, DriveStrength, Pull, Sense};
use crate::pwm::PwmOutput;

/// Chip-specific constructor for per-pin drivers
///
/// Pins are identified by their physical designator (e.g. the GPIO number
/// on port 0). Implementations may assume the core never holds two drivers
/// for the same designator at once.
pub trait PeripheralFactory {
    /// Digital input driver type
    type DigitalIn: DigitalInput;
    /// Digital output driver type
    type DigitalOut: DigitalOutput;
    /// ADC driver type
    type AnalogIn: AnalogInput;
    /// PWM channel driver type
    type Pwm: PwmOutput;

    /// Configure `designator` as a digital input with the given pull
    fn make_digital_in(&mut self, designator: u8, pull: Pull) -> Self::DigitalIn;

    /// Configure `designator` as a push-pull digital output
    fn make_digital_out(&mut self, designator: u8) -> Self::DigitalOut;

    /// Connect `designator` to the ADC
    fn make_analog_in(&mut self, designator: u8) -> Self::AnalogIn;

    /// Route PWM compare channel `channel` to `designator`
    ///
    /// The channel starts at 0% duty.
    fn bind_pwm_channel(&mut self, channel: u8, designator: u8) -> Self::Pwm;

    /// Set the period of the PWM timer shared by every channel
    fn set_pwm_period_us(&mut self, period_us: u32);

    /// Current period of the shared PWM timer
    fn pwm_period_us(&self) -> u32;

    /// Configure the DETECT sense of `designator`
    ///
    /// This is a pin-level setting and is valid whatever driver (if any)
    /// currently owns the pin.
    fn set_detect(&mut self, designator: u8, sense: Sense);

    /// Configure the drive strength of `designator`
    fn set_drive(&mut self, designator: u8, drive: DriveStrength);
}
