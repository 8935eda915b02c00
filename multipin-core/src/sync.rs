//! Interrupt-safe sharing of a pin bank
//!
//! The DETECT interrupt and the foreground both need the bank. Wrapping it
//! in a critical-section mutex keeps every access atomic with respect to
//! interrupts, including PWM evictions that touch two pins at once.

use core::cell::RefCell;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::blocking_mutex::Mutex;

/// Value shared between interrupt handlers and foreground code
///
/// `new` is const so the wrapper can live in a `static`.
pub struct SharedBank<T> {
    inner: Mutex<CriticalSectionRawMutex, RefCell<T>>,
}

impl<T> SharedBank<T> {
    pub const fn new(value: T) -> Self {
        Self {
            inner: Mutex::new(RefCell::new(value)),
        }
    }

    /// Run `f` with shared access inside a critical section
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        self.inner.lock(|cell| f(&cell.borrow()))
    }

    /// Run `f` with exclusive access inside a critical section
    ///
    /// # Panics
    ///
    /// Panics if called re-entrantly from inside `f`.
    pub fn with_mut<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        self.inner.lock(|cell| f(&mut cell.borrow_mut()))
    }

    pub fn into_inner(self) -> T {
        self.inner.into_inner().into_inner()
    }
}
