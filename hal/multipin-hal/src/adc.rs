//! ADC sampling abstraction

/// Analog input driver bound to one pin
///
/// Takes `&mut self` because ADC conversions typically require mutable
/// access to the converter.
pub trait AnalogInput {
    /// Converter resolution in bits (e.g. 12 for a 12-bit SAADC)
    fn resolution_bits(&self) -> u8;

    /// Perform one conversion and return the raw result
    ///
    /// The result is in `0..=(1 << resolution_bits()) - 1`.
    fn read_raw(&mut self) -> u16;

    /// Largest raw value the converter can return
    fn max_raw(&self) -> u16 {
        let bits = self.resolution_bits().min(16);
        ((1u32 << bits) - 1) as u16
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(u8);

    impl AnalogInput for Fixed {
        fn resolution_bits(&self) -> u8 {
            self.0
        }

        fn read_raw(&mut self) -> u16 {
            0
        }
    }

    #[test]
    fn test_max_raw() {
        assert_eq!(Fixed(10).max_raw(), 1023);
        assert_eq!(Fixed(12).max_raw(), 4095);
        assert_eq!(Fixed(16).max_raw(), u16::MAX);
        assert_eq!(Fixed(20).max_raw(), u16::MAX);
    }
}
