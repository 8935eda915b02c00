//! Digital I/O and pin-level settings

use multipin_hal::{
    DigitalInput, DigitalOutput, DriveStrength, MicrosClock, PeripheralFactory, Pull, Sense,
};

use super::PinBank;
use crate::error::{PinError, Result};
use crate::pin::driver::ActiveDriver;
use crate::pin::Mode;

impl<F, C, const N: usize, const P: usize> PinBank<F, C, N, P>
where
    F: PeripheralFactory,
    C: MicrosClock,
{
    /// Drive the pin as a digital output
    ///
    /// # Errors
    /// - `InvalidParameter` unless `value` is 0 or 1
    /// - `UnsupportedCapability` if the pin has no digital capability
    pub fn set_digital_value(&mut self, index: usize, value: u8) -> Result<()> {
        let high = digital_level(value)?;
        self.set_mode(index, Mode::DigitalOut)?;

        let pin = self.get_mut(index)?;
        match &mut pin.driver {
            ActiveDriver::DigitalOut(out) => {
                out.set_state(high);
                Ok(())
            }
            _ => Err(PinError::UnsupportedCapability),
        }
    }

    /// Read the pin as a digital input with its current pull
    pub fn get_digital_value(&mut self, index: usize) -> Result<u8> {
        let pull = self.get(index)?.pull;
        self.get_digital_value_with_pull(index, pull)
    }

    /// Read the pin as a digital input with `pull`
    ///
    /// A pin that is already an input is re-pulled in place instead of
    /// being torn down.
    pub fn get_digital_value_with_pull(&mut self, index: usize, pull: Pull) -> Result<u8> {
        let pin = self.get(index)?;
        if !Mode::DigitalIn.is_supported_by(pin.capability()) {
            return Err(PinError::UnsupportedCapability);
        }

        if pin.mode() != Mode::DigitalIn {
            self.get_mut(index)?.pull = pull;
            self.set_mode(index, Mode::DigitalIn)?;
        }

        let pin = self.get_mut(index)?;
        let ActiveDriver::DigitalIn(input) = &mut pin.driver else {
            return Err(PinError::UnsupportedCapability);
        };
        if pin.pull != pull {
            input.set_pull(pull);
            pin.pull = pull;
        }
        Ok(input.is_high() as u8)
    }

    /// Drive `value` only if the pin is an input currently reading the
    /// opposite level
    ///
    /// Platforms whose input driver implements
    /// [`DigitalInput::drive_if_opposite`] get the comparison done in
    /// hardware; otherwise the level is sampled and then driven, which an
    /// interrupt can slip between.
    ///
    /// # Errors
    /// - `InvalidParameter` unless `value` is 0 or 1
    /// - `Busy` if the pin is not a digital input or already reads `value`
    pub fn get_and_set_digital_value(&mut self, index: usize, value: u8) -> Result<()> {
        let high = digital_level(value)?;

        let pin = self.get_mut(index)?;
        let ActiveDriver::DigitalIn(input) = &mut pin.driver else {
            return Err(PinError::Busy);
        };

        let opposite = match input.drive_if_opposite(high) {
            Some(driven) => driven,
            None => input.is_high() != high,
        };
        if !opposite {
            return Err(PinError::Busy);
        }

        self.set_digital_value(index, value)
    }

    /// Change the pull of a digital input
    ///
    /// # Errors
    /// `UnsupportedCapability` unless the pin is currently `DigitalIn`.
    pub fn set_pull(&mut self, index: usize, pull: Pull) -> Result<()> {
        let pin = self.get_mut(index)?;
        let ActiveDriver::DigitalIn(input) = &mut pin.driver else {
            return Err(PinError::UnsupportedCapability);
        };
        input.set_pull(pull);
        pin.pull = pull;
        Ok(())
    }

    /// Select high or standard drive; applies in any mode
    pub fn set_high_drive(&mut self, index: usize, high: bool) -> Result<()> {
        let drive = if high {
            DriveStrength::High
        } else {
            DriveStrength::Standard
        };

        let pin = self.pins.get_mut(index).ok_or(PinError::InvalidPin)?;
        self.factory.set_drive(pin.designator(), drive);
        pin.drive = drive;
        Ok(())
    }

    pub fn is_high_drive(&self, index: usize) -> Result<bool> {
        self.get(index).map(|pin| pin.is_high_drive())
    }

    /// Program the DETECT sense of a pin
    ///
    /// Safe at any time, including when nothing is armed.
    pub fn set_detect(&mut self, index: usize, sense: Sense) -> Result<()> {
        let pin = self.pins.get_mut(index).ok_or(PinError::InvalidPin)?;
        self.factory.set_detect(pin.designator(), sense);
        pin.sense = sense;
        Ok(())
    }
}

fn digital_level(value: u8) -> Result<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(PinError::InvalidParameter),
    }
}
