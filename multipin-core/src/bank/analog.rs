//! Analog input, PWM output and servo control

use multipin_hal::{AnalogInput, MicrosClock, PeripheralFactory, PwmOutput};

use super::PinBank;
use crate::analog::{analog_to_duty, scale_adc, ANALOG_MAX};
use crate::error::{PinError, Result};
use crate::pin::driver::ActiveDriver;
use crate::pin::Mode;
use crate::pwm::{pulse_to_analog, servo_pulse_us};

impl<F, C, const N: usize, const P: usize> PinBank<F, C, N, P>
where
    F: PeripheralFactory,
    C: MicrosClock,
{
    /// Output `value` (0-1024, clamped) as PWM duty
    pub fn set_analog_value(&mut self, index: usize, value: u16) -> Result<()> {
        self.set_mode(index, Mode::AnalogOut)?;
        let value = value.min(ANALOG_MAX);

        let pin = self.get_mut(index)?;
        let ActiveDriver::AnalogOut { pwm, .. } = &mut pin.driver else {
            return Err(PinError::UnsupportedCapability);
        };
        pwm.set_duty(analog_to_duty(value, pwm.max_duty()));
        pin.analog_level = value;
        Ok(())
    }

    /// Set the shared PWM period in microseconds
    ///
    /// The timer is shared, so every `AnalogOut` pin changes period. Their
    /// duty registers are rewritten so each keeps its analog value.
    ///
    /// # Errors
    /// `InvalidParameter` if `period_us` is 0.
    pub fn set_analog_period_us(&mut self, index: usize, period_us: u32) -> Result<()> {
        if period_us == 0 {
            return Err(PinError::InvalidParameter);
        }
        self.set_mode(index, Mode::AnalogOut)?;
        self.apply_period(period_us);
        Ok(())
    }

    /// Set the shared PWM period in milliseconds
    pub fn set_analog_period(&mut self, index: usize, period_ms: u32) -> Result<()> {
        let period_us = period_ms
            .checked_mul(1000)
            .ok_or(PinError::InvalidParameter)?;
        self.set_analog_period_us(index, period_us)
    }

    /// Shared PWM period in microseconds
    pub fn analog_period_us(&mut self, index: usize) -> Result<u32> {
        self.set_mode(index, Mode::AnalogOut)?;
        Ok(self.factory.pwm_period_us())
    }

    /// Shared PWM period in milliseconds
    pub fn analog_period(&mut self, index: usize) -> Result<u32> {
        self.analog_period_us(index).map(|us| us / 1000)
    }

    /// Output a raw servo pulse of `pulse_us`
    ///
    /// Switches the shared timer to the servo period first if needed. The
    /// pulse is clamped to the period.
    pub fn set_servo_pulse_us(&mut self, index: usize, pulse_us: u32) -> Result<()> {
        self.set_mode(index, Mode::AnalogOut)?;
        let period_us = self.servo.period_us;
        self.apply_period(period_us);

        let pin = self.get_mut(index)?;
        let ActiveDriver::AnalogOut { pwm, .. } = &mut pin.driver else {
            return Err(PinError::UnsupportedCapability);
        };
        // Written straight from the pulse for full timer resolution
        let pulse = pulse_us.min(period_us) as u64;
        let duty = pulse * pwm.max_duty() as u64 / period_us as u64;
        pwm.set_duty(duty as u16);
        pin.analog_level = pulse_to_analog(pulse_us, period_us);
        Ok(())
    }

    /// Drive a servo to `value` (0-180, clamped)
    ///
    /// # Arguments
    /// - `range_us`: pulse span covering 0-180
    /// - `center_us`: pulse width at 90
    pub fn set_servo_value(
        &mut self,
        index: usize,
        value: u16,
        range_us: u32,
        center_us: u32,
    ) -> Result<()> {
        self.set_servo_pulse_us(index, servo_pulse_us(value, range_us, center_us))
    }

    /// Drive a servo to `value` with the configured range and center
    pub fn set_servo_angle(&mut self, index: usize, value: u16) -> Result<()> {
        let servo = self.servo;
        self.set_servo_value(index, value, servo.range_us, servo.center_us)
    }

    /// Sample the ADC, scaled to 0-1024
    pub fn get_analog_value(&mut self, index: usize) -> Result<u16> {
        self.set_mode(index, Mode::AnalogIn)?;

        let pin = self.get_mut(index)?;
        let ActiveDriver::AnalogIn(adc) = &mut pin.driver else {
            return Err(PinError::UnsupportedCapability);
        };
        let max = adc.max_raw();
        Ok(scale_adc(adc.read_raw(), max))
    }

    fn apply_period(&mut self, period_us: u32) {
        if self.factory.pwm_period_us() == period_us {
            return;
        }

        self.factory.set_pwm_period_us(period_us);
        info!("pwm period {} us", period_us);

        for pin in self.pins.iter_mut() {
            if let ActiveDriver::AnalogOut { pwm, .. } = &mut pin.driver {
                pwm.set_duty(analog_to_duty(pin.analog_level, pwm.max_duty()));
            }
        }
    }
}
