//! Bank-wide configuration

use heapless::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::pin::PinConfig;
use crate::error::{PinError, Result};

/// Default PWM timer period (20 ms, servo friendly)
pub const DEFAULT_PWM_PERIOD_US: u32 = 20_000;

/// Default servo pulse span in microseconds
pub const DEFAULT_SERVO_RANGE_US: u32 = 2000;

/// Default servo center pulse in microseconds
pub const DEFAULT_SERVO_CENTER_US: u32 = 1500;

/// Default number of consecutive consistent samples before a touch change
pub const DEFAULT_DEBOUNCE_SAMPLES: u8 = 4;

/// Default margin above baseline that counts as a capacitive touch
pub const DEFAULT_CAPACITIVE_MARGIN: u16 = 40;

/// Default press length that turns a click into a long click
pub const DEFAULT_LONG_CLICK_US: u64 = 1_000_000;

/// Default press length after which a hold is reported
pub const DEFAULT_HOLD_US: u64 = 1_500_000;

/// Touch sensing tuning
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TouchConfig {
    /// Consecutive samples that must agree before the reported state flips
    pub debounce_samples: u8,
    /// Reading above baseline (0-1024 scale) that counts as touched
    pub capacitive_margin: u16,
    /// Baseline used before any calibration; `None` takes a reading when
    /// the pin first enters capacitive mode
    pub default_baseline: Option<u16>,
    /// Resistive touch reads low when touched
    pub resistive_active_low: bool,
    /// Enable the internal pull-up for resistive touch
    pub resistive_pull_up: bool,
    /// Releases after at least this long raise `TouchLongClick`
    pub long_click_us: u64,
    /// Touches held this long raise one `TouchHold`
    pub hold_us: u64,
}

impl Default for TouchConfig {
    fn default() -> Self {
        Self {
            debounce_samples: DEFAULT_DEBOUNCE_SAMPLES,
            capacitive_margin: DEFAULT_CAPACITIVE_MARGIN,
            default_baseline: None,
            resistive_active_low: true,
            resistive_pull_up: false,
            long_click_us: DEFAULT_LONG_CLICK_US,
            hold_us: DEFAULT_HOLD_US,
        }
    }
}

/// Servo pulse mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ServoConfig {
    /// Pulse span covering 0-180 (center +/- range/2)
    pub range_us: u32,
    /// Pulse width at 90
    pub center_us: u32,
    /// PWM period used while driving servos
    pub period_us: u32,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            range_us: DEFAULT_SERVO_RANGE_US,
            center_us: DEFAULT_SERVO_CENTER_US,
            period_us: DEFAULT_PWM_PERIOD_US,
        }
    }
}

/// Everything a pin bank needs at bring-up
#[derive(Debug, Clone)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BankConfig<const N: usize> {
    /// Pins owned by the bank, in index order
    pub pins: Vec<PinConfig, N>,
    /// Touch tuning shared by all pins
    pub touch: TouchConfig,
    /// Servo defaults
    pub servo: ServoConfig,
    /// PWM timer period applied at bring-up
    pub default_pwm_period_us: u32,
}

impl<const N: usize> Default for BankConfig<N> {
    fn default() -> Self {
        Self {
            pins: Vec::new(),
            touch: TouchConfig::default(),
            servo: ServoConfig::default(),
            default_pwm_period_us: DEFAULT_PWM_PERIOD_US,
        }
    }
}

impl<const N: usize> BankConfig<N> {
    /// Create a config for the given pins with default tuning
    ///
    /// Fails with `InvalidParameter` if more than `N` pins are given.
    pub fn with_pins(pins: &[PinConfig]) -> Result<Self> {
        let pins = Vec::from_slice(pins).map_err(|_| PinError::InvalidParameter)?;
        Ok(Self {
            pins,
            ..Self::default()
        })
    }

    /// Check the config for duplicate pins and zero periods
    pub fn validate(&self) -> Result<()> {
        for (i, a) in self.pins.iter().enumerate() {
            for b in self.pins.iter().skip(i + 1) {
                if a.id == b.id || a.designator == b.designator {
                    return Err(PinError::InvalidParameter);
                }
            }
        }

        if self.touch.debounce_samples == 0 {
            return Err(PinError::InvalidParameter);
        }

        if self.default_pwm_period_us == 0 || self.servo.period_us == 0 {
            return Err(PinError::InvalidParameter);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Capability;

    #[test]
    fn test_default_config_is_valid() {
        let config: BankConfig<4> = BankConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.servo.center_us, 1500);
        assert_eq!(config.touch.debounce_samples, 4);
    }

    #[test]
    fn test_with_pins_capacity() {
        let pins = [PinConfig::all(1, 0), PinConfig::all(2, 1), PinConfig::all(3, 2)];
        assert!(BankConfig::<3>::with_pins(&pins).is_ok());
        assert_eq!(
            BankConfig::<2>::with_pins(&pins).unwrap_err(),
            PinError::InvalidParameter
        );
    }

    #[test]
    fn test_duplicate_designator_rejected() {
        let pins = [
            PinConfig::new(1, 5, Capability::DIGITAL),
            PinConfig::new(2, 5, Capability::ANALOG),
        ];
        let config = BankConfig::<4>::with_pins(&pins).unwrap();
        assert_eq!(config.validate(), Err(PinError::InvalidParameter));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let pins = [PinConfig::all(7, 1), PinConfig::all(7, 2)];
        let config = BankConfig::<4>::with_pins(&pins).unwrap();
        assert_eq!(config.validate(), Err(PinError::InvalidParameter));
    }

    #[test]
    fn test_zero_debounce_rejected() {
        let mut config = BankConfig::<4>::default();
        config.touch.debounce_samples = 0;
        assert_eq!(config.validate(), Err(PinError::InvalidParameter));
    }
}
