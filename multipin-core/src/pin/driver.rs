//! Driver ownership slot
//!
//! A pin holds its active peripheral driver by value in a tagged variant.
//! Replacing the variant drops the old driver, which is the only way a
//! driver is ever destroyed.

use multipin_hal::PeripheralFactory;

use super::mode::Mode;
use crate::touch::TouchSensor;

/// Touch sensor built from the factory's driver types
pub(crate) type FactoryTouch<F> =
    TouchSensor<<F as PeripheralFactory>::DigitalIn, <F as PeripheralFactory>::AnalogIn>;

pub(crate) enum ActiveDriver<F: PeripheralFactory> {
    None,
    DigitalIn(F::DigitalIn),
    DigitalOut(F::DigitalOut),
    AnalogIn(F::AnalogIn),
    AnalogOut { channel: u8, pwm: F::Pwm },
    Touch(FactoryTouch<F>),
}

impl<F: PeripheralFactory> ActiveDriver<F> {
    /// Mode implied by the driver held
    pub(crate) fn mode(&self) -> Mode {
        match self {
            ActiveDriver::None => Mode::Unused,
            ActiveDriver::DigitalIn(_) => Mode::DigitalIn,
            ActiveDriver::DigitalOut(_) => Mode::DigitalOut,
            ActiveDriver::AnalogIn(_) => Mode::AnalogIn,
            ActiveDriver::AnalogOut { .. } => Mode::AnalogOut,
            ActiveDriver::Touch(sensor) => Mode::Touch(sensor.mode()),
        }
    }

    pub(crate) fn pwm_channel(&self) -> Option<u8> {
        match self {
            ActiveDriver::AnalogOut { channel, .. } => Some(*channel),
            _ => None,
        }
    }

    /// Drop the current driver, leaving the slot empty
    pub(crate) fn take(&mut self) -> Self {
        core::mem::replace(self, ActiveDriver::None)
    }
}
