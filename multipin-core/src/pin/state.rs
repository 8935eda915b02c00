//! Per-pin state

use multipin_hal::{DriveStrength, PeripheralFactory, Pull, Sense};

use super::driver::ActiveDriver;
use super::mode::Mode;
use crate::config::{Capability, PinConfig};
use crate::event::{EdgeEventType, EdgeTracker};
use crate::touch::{PressTracker, TouchMode};

/// One multiplexed pin
///
/// Owned by a [`crate::bank::PinBank`]; every operation that changes the
/// pin goes through the bank so PWM channels and interrupts stay
/// consistent across pins.
pub struct Pin<F: PeripheralFactory> {
    config: PinConfig,
    pub(crate) pull: Pull,
    pub(crate) drive: DriveStrength,
    pub(crate) sense: Sense,
    pub(crate) driver: ActiveDriver<F>,
    pub(crate) edge: Option<EdgeTracker>,
    pub(crate) touch_mode: TouchMode,
    pub(crate) calibration: Option<u16>,
    pub(crate) analog_level: u16,
    pub(crate) press: PressTracker,
}

impl<F: PeripheralFactory> Pin<F> {
    pub(crate) fn new(config: PinConfig) -> Self {
        Self {
            config,
            pull: Pull::default(),
            drive: DriveStrength::default(),
            sense: Sense::Disabled,
            driver: ActiveDriver::None,
            edge: None,
            touch_mode: TouchMode::default(),
            calibration: None,
            analog_level: 0,
            press: PressTracker::default(),
        }
    }

    /// Event source id
    pub fn id(&self) -> u16 {
        self.config.id
    }

    /// Physical designator
    pub fn designator(&self) -> u8 {
        self.config.designator
    }

    pub fn capability(&self) -> Capability {
        self.config.capability
    }

    /// Current mode, derived from the driver the pin holds
    pub fn mode(&self) -> Mode {
        self.driver.mode()
    }

    /// Pull applied whenever the pin becomes a digital input
    pub fn pull(&self) -> Pull {
        self.pull
    }

    pub fn is_high_drive(&self) -> bool {
        self.drive == DriveStrength::High
    }

    /// Sense currently programmed into the DETECT logic
    pub fn sense(&self) -> Sense {
        self.sense
    }

    /// Touch strategy used by `is_touched`
    pub fn touch_mode(&self) -> TouchMode {
        self.touch_mode
    }

    /// Stored capacitive baseline, kept across mode changes
    pub fn calibration(&self) -> Option<u16> {
        self.calibration
    }

    /// PWM channel held while in `AnalogOut`
    pub fn pwm_channel(&self) -> Option<u8> {
        self.driver.pwm_channel()
    }

    /// Last analog output value written (0-1024)
    pub fn analog_level(&self) -> u16 {
        self.analog_level
    }

    /// Edge event type if rise/fall events are armed
    pub fn events(&self) -> Option<EdgeEventType> {
        self.edge.as_ref().map(EdgeTracker::event_type)
    }

    pub fn edge_tracker(&self) -> Option<&EdgeTracker> {
        self.edge.as_ref()
    }

    pub fn is_input(&self) -> bool {
        self.mode().is_input()
    }

    pub fn is_output(&self) -> bool {
        self.mode().is_output()
    }

    pub fn is_digital(&self) -> bool {
        self.mode().is_digital()
    }

    pub fn is_analog(&self) -> bool {
        self.mode().is_analog()
    }
}
