//! Touch sensor driver state

use multipin_hal::{AnalogInput, DigitalInput};

use super::debounce::Debouncer;
use super::TouchMode;
use crate::analog::scale_adc;
use crate::config::TouchConfig;

/// Driver the touch sensor samples through
pub enum TouchInput<D, A> {
    /// Digital input for resistive sensing
    Resistive(D),
    /// ADC input for capacitive sensing
    Capacitive(A),
}

/// Debounced touch sensor owning the pin's input driver
pub struct TouchSensor<D, A> {
    input: TouchInput<D, A>,
    baseline: u16,
    margin: u16,
    active_low: bool,
    debouncer: Debouncer,
}

impl<D, A> TouchSensor<D, A>
where
    D: DigitalInput,
    A: AnalogInput,
{
    /// Build a resistive sensor on `input`
    pub fn resistive(input: D, config: &TouchConfig) -> Self {
        Self {
            input: TouchInput::Resistive(input),
            baseline: 0,
            margin: 0,
            active_low: config.resistive_active_low,
            debouncer: Debouncer::new(config.debounce_samples),
        }
    }

    /// Build a capacitive sensor on `input`
    ///
    /// Without a `baseline` one is measured immediately.
    pub fn capacitive(mut input: A, config: &TouchConfig, baseline: Option<u16>) -> Self {
        let baseline = baseline.unwrap_or_else(|| read_level(&mut input));
        Self {
            input: TouchInput::Capacitive(input),
            baseline,
            margin: config.capacitive_margin,
            active_low: false,
            debouncer: Debouncer::new(config.debounce_samples),
        }
    }

    /// Sensing strategy in use
    pub fn mode(&self) -> TouchMode {
        match self.input {
            TouchInput::Resistive(_) => TouchMode::Resistive,
            TouchInput::Capacitive(_) => TouchMode::Capacitive,
        }
    }

    /// Capacitive baseline, `None` for resistive sensors
    pub fn baseline(&self) -> Option<u16> {
        match self.input {
            TouchInput::Resistive(_) => None,
            TouchInput::Capacitive(_) => Some(self.baseline),
        }
    }

    /// Take a fresh baseline reading
    ///
    /// Returns the new baseline, or `None` for resistive sensors.
    pub fn calibrate(&mut self) -> Option<u16> {
        match &mut self.input {
            TouchInput::Resistive(_) => None,
            TouchInput::Capacitive(adc) => {
                self.baseline = read_level(adc);
                self.debouncer.reset(false);
                Some(self.baseline)
            }
        }
    }

    /// Undebounced touch reading
    pub fn read_raw(&mut self) -> bool {
        match &mut self.input {
            TouchInput::Resistive(pin) => pin.is_high() != self.active_low,
            TouchInput::Capacitive(adc) => {
                read_level(adc) > self.baseline.saturating_add(self.margin)
            }
        }
    }

    /// Take one sample; returns the new debounced state when it changes
    pub fn sample(&mut self) -> Option<bool> {
        let raw = self.read_raw();
        self.debouncer.update(raw)
    }

    /// Debounced touch state
    pub fn is_touched(&self) -> bool {
        self.debouncer.state()
    }
}

fn read_level<A: AnalogInput>(adc: &mut A) -> u16 {
    let max = adc.max_raw();
    scale_adc(adc.read_raw(), max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use multipin_hal::Pull;

    struct Level(bool);

    impl DigitalInput for Level {
        fn is_high(&mut self) -> bool {
            self.0
        }

        fn set_pull(&mut self, _pull: Pull) {}
    }

    /// Replays a fixed sequence of 10-bit readings, repeating the last one
    struct Script {
        readings: &'static [u16],
        next: usize,
    }

    impl AnalogInput for Script {
        fn resolution_bits(&self) -> u8 {
            10
        }

        fn read_raw(&mut self) -> u16 {
            let i = self.next.min(self.readings.len() - 1);
            self.next += 1;
            self.readings[i]
        }
    }

    type Sensor = TouchSensor<Level, Script>;

    fn config() -> TouchConfig {
        TouchConfig {
            debounce_samples: 3,
            capacitive_margin: 50,
            ..TouchConfig::default()
        }
    }

    #[test]
    fn test_resistive_active_low() {
        let mut sensor = Sensor::resistive(Level(false), &config());
        assert_eq!(sensor.mode(), TouchMode::Resistive);
        assert_eq!(sensor.baseline(), None);
        assert!(sensor.read_raw());

        assert_eq!(sensor.sample(), None);
        assert_eq!(sensor.sample(), None);
        assert_eq!(sensor.sample(), Some(true));
        assert!(sensor.is_touched());
    }

    #[test]
    fn test_capacitive_measures_baseline_on_creation() {
        let adc = Script {
            readings: &[300, 300, 400],
            next: 0,
        };
        let mut sensor = Sensor::capacitive(adc, &config(), None);
        // baseline comes from the first reading
        assert_eq!(sensor.baseline(), Some(300));
        assert!(!sensor.read_raw());
        assert!(sensor.read_raw());
    }

    #[test]
    fn test_capacitive_alternating_never_touches() {
        let adc = Script {
            readings: &[100, 500, 100, 500, 100, 500, 100, 500, 100, 500, 100],
            next: 0,
        };
        let mut sensor = Sensor::capacitive(adc, &config(), Some(100));
        for _ in 0..10 {
            assert_eq!(sensor.sample(), None);
        }
        assert!(!sensor.is_touched());
    }

    #[test]
    fn test_calibrate_resets_baseline() {
        let adc = Script {
            readings: &[600],
            next: 0,
        };
        let mut sensor = Sensor::capacitive(adc, &config(), Some(100));
        assert!(sensor.read_raw());

        let baseline = sensor.calibrate();
        assert_eq!(baseline, Some(600));
        assert!(!sensor.read_raw());
    }

    #[test]
    fn test_calibrate_resistive_is_none() {
        let mut sensor = Sensor::resistive(Level(true), &config());
        assert_eq!(sensor.calibrate(), None);
    }
}
