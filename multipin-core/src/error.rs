//! Pin operation errors

use core::fmt;

/// Errors returned by pin operations
///
/// Every error is local to the failed call: the pin keeps the mode and
/// driver it had before the call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PinError {
    /// The pin lacks the capability the operation needs, or is not in a
    /// mode where the operation applies
    UnsupportedCapability,
    /// An argument was outside its legal range
    InvalidParameter,
    /// `get_and_set_digital_value` precondition did not hold
    Busy,
    /// No pin with that index exists in the bank
    InvalidPin,
}

impl fmt::Display for PinError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msg = match self {
            PinError::UnsupportedCapability => "operation not supported by pin",
            PinError::InvalidParameter => "parameter out of range",
            PinError::Busy => "pin busy",
            PinError::InvalidPin => "no such pin",
        };
        f.write_str(msg)
    }
}

/// Result type for pin operations
pub type Result<T> = core::result::Result<T, PinError>;
