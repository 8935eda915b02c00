//! Runtime pin multiplexing for microcontrollers
//!
//! Lets one physical pin be switched at runtime between digital input,
//! digital output, ADC input, PWM output and touch sensing, while a small
//! pool of PWM channels is shared across every pin that needs one.
//!
//! - Pin mode state machine with strict teardown-then-setup transitions
//! - LRU allocation of PWM channels with forced eviction
//! - Edge and pulse-width events from the DETECT interrupt
//! - Debounced resistive and capacitive touch with calibration
//! - Configuration types and interrupt-safe sharing of the bank
//!
//! Chip access goes through the traits in `multipin-hal`; events leave
//! through an [`event::EventSink`] supplied by the caller.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

#[cfg(all(feature = "mock", not(test)))]
extern crate std;

// Must come first so the logging macros are visible to later modules
mod fmt;

pub mod analog;
pub mod bank;
pub mod config;
pub mod error;
pub mod event;
pub mod pin;
pub mod pwm;
pub mod sync;
pub mod touch;

#[cfg(feature = "embassy-time")]
pub mod time;

#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use bank::PinBank;
pub use config::{BankConfig, Capability, PinConfig};
pub use error::{PinError, Result};
pub use event::{Event, EventKind, EventSink, PinEventMode};
pub use pin::{Mode, Pin};
pub use sync::SharedBank;
pub use touch::TouchMode;
