//! `embedded-hal` 1.0 adapters
//!
//! Lets a board crate build its factory out of existing `embedded-hal`
//! drivers (e.g. embassy `Output`, `Flex` or PWM slices) instead of
//! implementing the multipin traits by hand. Only infallible drivers are
//! accepted; pin operations in the core have no error path.

use core::convert::Infallible;

use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal::pwm::SetDutyCycle;

use crate::gpio::{DigitalInput, DigitalOutput, Pull};
use crate::pwm::PwmOutput;

/// Pull configuration, which `embedded-hal` does not model
pub trait PullControl {
    /// Apply `pull` to the underlying pin
    fn set_pull(&mut self, pull: Pull);
}

/// Wraps an `embedded-hal` output pin
///
/// The driven level is cached so it can be read back through `&self`.
pub struct OutputAdapter<P> {
    pin: P,
    high: bool,
}

impl<P> OutputAdapter<P>
where
    P: OutputPin<Error = Infallible>,
{
    /// Wrap `pin`, driving it low
    pub fn new(mut pin: P) -> Self {
        pin.set_low().unwrap_or_else(|e| match e {});
        Self { pin, high: false }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> DigitalOutput for OutputAdapter<P>
where
    P: OutputPin<Error = Infallible>,
{
    fn set_high(&mut self) {
        self.pin.set_high().unwrap_or_else(|e| match e {});
        self.high = true;
    }

    fn set_low(&mut self) {
        self.pin.set_low().unwrap_or_else(|e| match e {});
        self.high = false;
    }

    fn is_set_high(&self) -> bool {
        self.high
    }
}

/// Wraps an `embedded-hal` input pin that can also change its pull
pub struct InputAdapter<P> {
    pin: P,
}

impl<P> InputAdapter<P>
where
    P: InputPin<Error = Infallible> + PullControl,
{
    /// Wrap `pin` and apply `pull`
    pub fn new(mut pin: P, pull: Pull) -> Self {
        pin.set_pull(pull);
        Self { pin }
    }

    /// Release the wrapped pin
    pub fn into_inner(self) -> P {
        self.pin
    }
}

impl<P> DigitalInput for InputAdapter<P>
where
    P: InputPin<Error = Infallible> + PullControl,
{
    fn is_high(&mut self) -> bool {
        self.pin.is_high().unwrap_or_else(|e| match e {})
    }

    fn set_pull(&mut self, pull: Pull) {
        self.pin.set_pull(pull);
    }
}

/// Wraps an `embedded-hal` PWM channel
///
/// `SetDutyCycle` is write-only, so the last written duty is cached.
pub struct PwmAdapter<P> {
    channel: P,
    duty: u16,
}

impl<P> PwmAdapter<P>
where
    P: SetDutyCycle<Error = Infallible>,
{
    /// Wrap `channel`, starting at 0% duty
    pub fn new(mut channel: P) -> Self {
        channel.set_duty_cycle(0).unwrap_or_else(|e| match e {});
        Self { channel, duty: 0 }
    }
}

impl<P> PwmOutput for PwmAdapter<P>
where
    P: SetDutyCycle<Error = Infallible>,
{
    fn max_duty(&self) -> u16 {
        self.channel.max_duty_cycle()
    }

    fn set_duty(&mut self, duty: u16) {
        let duty = duty.min(self.channel.max_duty_cycle());
        self.channel
            .set_duty_cycle(duty)
            .unwrap_or_else(|e| match e {});
        self.duty = duty;
    }

    fn duty(&self) -> u16 {
        self.duty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::ErrorType;

    struct Line {
        high: bool,
        pull: Pull,
    }

    impl ErrorType for Line {
        type Error = Infallible;
    }

    impl OutputPin for Line {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.high = false;
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.high = true;
            Ok(())
        }
    }

    impl InputPin for Line {
        fn is_high(&mut self) -> Result<bool, Infallible> {
            Ok(self.high)
        }

        fn is_low(&mut self) -> Result<bool, Infallible> {
            Ok(!self.high)
        }
    }

    impl PullControl for Line {
        fn set_pull(&mut self, pull: Pull) {
            self.pull = pull;
            self.high = pull == Pull::Up;
        }
    }

    struct Channel {
        duty: u16,
    }

    impl embedded_hal::pwm::ErrorType for Channel {
        type Error = Infallible;
    }

    impl SetDutyCycle for Channel {
        fn max_duty_cycle(&self) -> u16 {
            1000
        }

        fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Infallible> {
            self.duty = duty;
            Ok(())
        }
    }

    #[test]
    fn test_output_adapter_starts_low() {
        let mut out = OutputAdapter::new(Line {
            high: true,
            pull: Pull::None,
        });
        assert!(out.is_set_low());

        out.set_high();
        assert!(out.is_set_high());
        assert!(out.into_inner().high);
    }

    #[test]
    fn test_input_adapter_applies_pull() {
        let mut input = InputAdapter::new(
            Line {
                high: false,
                pull: Pull::None,
            },
            Pull::Up,
        );
        assert!(input.is_high());

        input.set_pull(Pull::Down);
        assert!(input.is_low());
        assert_eq!(input.into_inner().pull, Pull::Down);
    }

    #[test]
    fn test_pwm_adapter_clamps_duty() {
        let mut pwm = PwmAdapter::new(Channel { duty: 77 });
        assert_eq!(pwm.duty(), 0);
        assert_eq!(pwm.max_duty(), 1000);

        pwm.set_duty(250);
        assert_eq!(pwm.duty(), 250);
        assert_eq!(pwm.channel.duty, 250);

        pwm.set_duty(5000);
        assert_eq!(pwm.duty(), 1000);
    }
}
