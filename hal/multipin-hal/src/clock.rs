//! Timestamp source

/// Monotonic microsecond clock
///
/// Must be callable from interrupt context and never block.
pub trait MicrosClock {
    /// Microseconds since an arbitrary fixed epoch (usually boot)
    fn now_us(&self) -> u64;
}

impl<C: MicrosClock + ?Sized> MicrosClock for &C {
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}
