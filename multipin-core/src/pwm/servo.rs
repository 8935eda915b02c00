//! Servo pulse mapping
//!
//! Hobby servos expect a pulse every 20 ms whose width encodes the angle.
//! With the default 2000 µs range around a 1500 µs center, 0 maps to
//! 500 µs and 180 to 2500 µs.

use crate::analog::ANALOG_MAX;

/// Largest logical servo value
pub const SERVO_MAX_VALUE: u16 = 180;

/// Pulse width for a logical servo value
///
/// `value` is clamped to `0..=180`; the lower bound saturates at 0 µs and
/// the result at `u32::MAX`.
pub fn servo_pulse_us(value: u16, range_us: u32, center_us: u32) -> u32 {
    let value = value.min(SERVO_MAX_VALUE) as u64;
    let range = range_us as u64;
    let lower = (center_us as u64).saturating_sub(range / 2);
    let pulse = lower + range * value / SERVO_MAX_VALUE as u64;
    pulse.min(u32::MAX as u64) as u32
}

/// Analog output value that produces `pulse_us` at `period_us`
///
/// Pulses longer than the period are clamped to 100%.
pub fn pulse_to_analog(pulse_us: u32, period_us: u32) -> u16 {
    if period_us == 0 {
        return 0;
    }
    let pulse = pulse_us.min(period_us) as u64;
    (pulse * ANALOG_MAX as u64 / period_us as u64) as u16
}
