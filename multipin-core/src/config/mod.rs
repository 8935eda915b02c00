//! Configuration types
//!
//! Board-agnostic description of the pins a bank owns and the tuning
//! constants for touch sensing and servo output.

pub mod bank;
pub mod pin;

pub use bank::*;
pub use pin::*;
