//! PWM channel sharing and servo helpers

pub mod allocator;
pub mod servo;

pub use allocator::{Grant, PwmAllocator, PWM_CHANNEL_COUNT};
pub use servo::{pulse_to_analog, servo_pulse_us, SERVO_MAX_VALUE};
