//! `embassy-time` timestamp source

use embassy_time::Instant;
use multipin_hal::MicrosClock;

/// [`MicrosClock`] reading the embassy time driver
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl MicrosClock for EmbassyClock {
    fn now_us(&self) -> u64 {
        Instant::now().as_micros()
    }
}
