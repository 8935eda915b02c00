//! GPIO pin abstractions
//!
//! Digital input and output drivers bound to one physical pin, plus the
//! pin-level settings (pull, drive strength, detect sense) they share.

/// Internal pull resistor configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Pull {
    /// No pull resistor (floating)
    #[default]
    None,
    /// Pull towards VDD
    Up,
    /// Pull towards ground
    Down,
}

/// Output drive strength
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriveStrength {
    /// Standard drive
    #[default]
    Standard,
    /// High drive (sources/sinks more current)
    High,
}

/// Level sense used to raise the pin's DETECT interrupt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Sense {
    /// No interrupt is raised for this pin
    #[default]
    Disabled,
    /// Interrupt when the pin reads high
    High,
    /// Interrupt when the pin reads low
    Low,
}

impl Sense {
    /// Sense level that fires on the next transition away from `high`
    pub fn opposite_of(high: bool) -> Self {
        if high {
            Sense::Low
        } else {
            Sense::High
        }
    }
}

/// Digital output driver
///
/// Implementations should handle the actual hardware register manipulation
/// for the specific chip. Dropping the driver disconnects the pin.
pub trait DigitalOutput {
    /// Set the pin high (logic 1)
    fn set_high(&mut self);

    /// Set the pin low (logic 0)
    fn set_low(&mut self);

    /// Set the pin to a specific state
    fn set_state(&mut self, high: bool) {
        if high {
            self.set_high();
        } else {
            self.set_low();
        }
    }

    /// Check if the pin is currently set high
    fn is_set_high(&self) -> bool;

    /// Check if the pin is currently set low
    fn is_set_low(&self) -> bool {
        !self.is_set_high()
    }
}

/// Digital input driver
///
/// Takes `&mut self` for reads because some chips latch the input register
/// on access. Dropping the driver disconnects the input buffer.
pub trait DigitalInput {
    /// Check if the pin reads high (logic 1)
    fn is_high(&mut self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&mut self) -> bool {
        !self.is_high()
    }

    /// Reconfigure the pull resistor without releasing the pin
    fn set_pull(&mut self, pull: Pull);

    /// Compare-and-drive primitive for chips that can check the input level
    /// and switch to output in one step.
    ///
    /// Returns `Some(true)` if the pin read the opposite of `high` and is now
    /// driving `high`, `Some(false)` if the level already matched, or `None`
    /// if the platform has no such primitive. The default is `None`.
    fn drive_if_opposite(&mut self, high: bool) -> Option<bool> {
        let _ = high;
        None
    }
}
