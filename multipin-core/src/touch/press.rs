//! Press timing for button-style touch events

use crate::event::EventKind;

/// How long the current touch has lasted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PressTracker {
    down_at_us: Option<u64>,
    hold_reported: bool,
}

impl PressTracker {
    /// Start timing a touch
    pub fn press(&mut self, now_us: u64) {
        self.down_at_us = Some(now_us);
        self.hold_reported = false;
    }

    pub fn is_pressed(&self) -> bool {
        self.down_at_us.is_some()
    }

    /// True exactly once per touch, when it has lasted `hold_us`
    pub fn hold_due(&mut self, now_us: u64, hold_us: u64) -> bool {
        match self.down_at_us {
            Some(down) if !self.hold_reported && now_us.saturating_sub(down) >= hold_us => {
                self.hold_reported = true;
                true
            }
            _ => false,
        }
    }

    /// End the touch and classify it as a click or a long click
    pub fn release(&mut self, now_us: u64, long_click_us: u64) -> EventKind {
        let held = self
            .down_at_us
            .map_or(0, |down| now_us.saturating_sub(down));
        *self = Self::default();
        if held >= long_click_us {
            EventKind::TouchLongClick
        } else {
            EventKind::TouchClick
        }
    }
}
