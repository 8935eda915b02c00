//! Analog value scaling
//!
//! Analog values seen by callers use one fixed 0-1024 scale whatever the
//! ADC resolution or PWM timer period behind them.

/// Full-scale analog value
pub const ANALOG_MAX: u16 = 1024;

/// Scale a raw ADC reading onto `0..=ANALOG_MAX`
pub fn scale_adc(raw: u16, max_raw: u16) -> u16 {
    if max_raw == 0 {
        return 0;
    }
    let raw = raw.min(max_raw) as u32;
    (raw * ANALOG_MAX as u32 / max_raw as u32) as u16
}

/// Convert an analog value to a duty register value
///
/// `value` is clamped to `ANALOG_MAX` first.
pub fn analog_to_duty(value: u16, max_duty: u16) -> u16 {
    let value = value.min(ANALOG_MAX) as u32;
    (value * max_duty as u32 / ANALOG_MAX as u32) as u16
}
