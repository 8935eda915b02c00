//! Consecutive-sample debouncer

/// Reports a state change only after `window` consecutive samples agree
///
/// Any sample matching the current stable state restarts the count, so a
/// signal that chatters faster than the window never flips the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    stable: bool,
    count: u8,
    window: u8,
}

impl Debouncer {
    /// Create a debouncer that starts released (`false`)
    ///
    /// A `window` of 0 is treated as 1.
    pub fn new(window: u8) -> Self {
        Self {
            stable: false,
            count: 0,
            window: window.max(1),
        }
    }

    /// Current debounced state
    pub fn state(&self) -> bool {
        self.stable
    }

    /// Feed one raw sample
    ///
    /// Returns the new state when it changes.
    pub fn update(&mut self, raw: bool) -> Option<bool> {
        if raw == self.stable {
            self.count = 0;
            return None;
        }

        self.count = self.count.saturating_add(1);
        if self.count >= self.window {
            self.stable = raw;
            self.count = 0;
            Some(raw)
        } else {
            None
        }
    }

    /// Forget any partial count and force the state
    pub fn reset(&mut self, state: bool) {
        self.stable = state;
        self.count = 0;
    }
}
