//! Per-pin configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Set of functions a physical pin can perform
///
/// Fixed when the pin is created; no operation ever changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Capability(u8);

impl Capability {
    /// No capabilities
    pub const NONE: Self = Self(0);
    /// Digital input and output
    pub const DIGITAL: Self = Self(0x01);
    /// ADC input and PWM output
    pub const ANALOG: Self = Self(0x02);
    /// Touch sensing
    pub const TOUCH: Self = Self(0x04);
    /// Digital and analog
    pub const AD: Self = Self(0x03);
    /// Everything
    pub const ALL: Self = Self(0x07);

    /// Build from raw bits, ignoring unknown ones
    pub const fn from_bits(bits: u8) -> Self {
        Self(bits & Self::ALL.0)
    }

    /// Raw bit representation
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Check whether every capability in `other` is present
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Combine two capability sets
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl core::ops::BitOr for Capability {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

/// Static description of one pin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PinConfig {
    /// Event source id published with every event from this pin
    pub id: u16,
    /// Physical pin designator passed to the peripheral factory
    pub designator: u8,
    /// What the pin can do
    pub capability: Capability,
}

impl PinConfig {
    /// Create a pin config
    pub const fn new(id: u16, designator: u8, capability: Capability) -> Self {
        Self {
            id,
            designator,
            capability,
        }
    }

    /// Create a digital-only pin
    pub const fn digital(id: u16, designator: u8) -> Self {
        Self::new(id, designator, Capability::DIGITAL)
    }

    /// Create a pin with every capability
    pub const fn all(id: u16, designator: u8) -> Self {
        Self::new(id, designator, Capability::ALL)
    }
}
