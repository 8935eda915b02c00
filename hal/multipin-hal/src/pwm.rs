//! PWM channel abstraction
//!
//! A PWM output is one compare channel of a shared PWM timer, bound to a
//! physical pin. The period belongs to the timer, not the channel, and is
//! configured through [`crate::PeripheralFactory::set_pwm_period_us`].

/// One bound PWM channel
///
/// Dropping the channel unbinds it from its pin.
pub trait PwmOutput {
    /// Duty value that corresponds to 100% at the current timer period
    fn max_duty(&self) -> u16;

    /// Write the duty register (`0..=max_duty()`)
    fn set_duty(&mut self, duty: u16);

    /// Read back the duty register
    fn duty(&self) -> u16;
}
