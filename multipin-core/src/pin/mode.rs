//! Pin operating modes
//!
//! A pin is in exactly one mode at a time. Every change between modes goes
//! through a full teardown of the old driver followed by setup of the new
//! one; there are no partial or shared states. Pins start `Unused` and can
//! be switched indefinitely.

use crate::config::Capability;
use crate::touch::TouchMode;

/// Pin operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Mode {
    /// Disconnected, no driver
    #[default]
    Unused,
    /// Digital input
    DigitalIn,
    /// Digital push-pull output
    DigitalOut,
    /// ADC input
    AnalogIn,
    /// PWM output on a shared channel
    AnalogOut,
    /// Touch sensing
    Touch(TouchMode),
}

impl Mode {
    /// Capabilities a pin needs to enter this mode
    pub fn required_capability(&self) -> Capability {
        match self {
            Mode::Unused => Capability::NONE,
            Mode::DigitalIn | Mode::DigitalOut => Capability::DIGITAL,
            Mode::AnalogIn | Mode::AnalogOut => Capability::ANALOG,
            Mode::Touch(TouchMode::Resistive) => Capability::TOUCH | Capability::DIGITAL,
            Mode::Touch(TouchMode::Capacitive) => Capability::TOUCH | Capability::ANALOG,
        }
    }

    /// Check if a pin with `capability` may enter this mode
    pub fn is_supported_by(&self, capability: Capability) -> bool {
        capability.contains(self.required_capability())
    }

    /// Check if this is an analog or digital input
    pub fn is_input(&self) -> bool {
        matches!(self, Mode::DigitalIn | Mode::AnalogIn)
    }

    /// Check if this is an analog or digital output
    pub fn is_output(&self) -> bool {
        matches!(self, Mode::DigitalOut | Mode::AnalogOut)
    }

    /// Check if this is a digital mode
    pub fn is_digital(&self) -> bool {
        matches!(self, Mode::DigitalIn | Mode::DigitalOut)
    }

    /// Check if this is an analog mode
    pub fn is_analog(&self) -> bool {
        matches!(self, Mode::AnalogIn | Mode::AnalogOut)
    }

    /// Check if this mode holds a PWM channel
    pub fn needs_pwm_channel(&self) -> bool {
        matches!(self, Mode::AnalogOut)
    }
}
