//! multipin Hardware Abstraction Layer
//!
//! This crate defines the boundary between the pin multiplexing core and
//! the chip-specific peripheral drivers. A board crate implements
//! [`PeripheralFactory`] once; the core then creates and destroys driver
//! objects through it as pins change mode.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  multipin-core (pin bank, allocator)    │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  multipin-hal (this crate - traits)     │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  board crate  │       │ embedded-hal  │
//! │   factory     │       │   adapters    │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::DigitalInput`], [`gpio::DigitalOutput`] - Digital I/O
//! - [`adc::AnalogInput`] - ADC sampling
//! - [`pwm::PwmOutput`] - One bound PWM channel
//! - [`factory::PeripheralFactory`] - Driver construction and pin-level config
//! - [`clock::MicrosClock`] - Monotonic microsecond timestamps

#![no_std]
#![deny(unsafe_code)]

pub mod adapter;
pub mod adc;
pub mod clock;
pub mod factory;
pub mod gpio;
pub mod pwm;

// Re-export key traits at crate root for convenience
pub use adc::AnalogInput;
pub use clock::MicrosClock;
pub use factory::PeripheralFactory;
pub use gpio::{DigitalInput, DigitalOutput, DriveStrength, Pull, Sense};
pub use pwm::PwmOutput;
