//! Touch sensing
//!
//! Debounced "makey makey" style touch detection on top of a digital input
//! (resistive) or an analog reading compared against a calibrated baseline
//! (capacitive).

pub mod debounce;
pub mod press;
pub mod sensor;

pub use debounce::Debouncer;
pub use press::PressTracker;
pub use sensor::{TouchInput, TouchSensor};

/// Touch sensing strategy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TouchMode {
    /// Digital level through skin resistance
    #[default]
    Resistive,
    /// Analog reading above a calibrated baseline
    Capacitive,
}
