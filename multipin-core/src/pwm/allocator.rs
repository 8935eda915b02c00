//! PWM channel allocation
//!
//! The PWM peripheral has far fewer compare channels than there are pins
//! that can do analog output. Channels are handed out on demand and, once
//! the pool is exhausted, the least recently used binding is reclaimed.
//! Acquisition never fails; exhaustion shows up as an eviction instead.

/// Hardware PWM channels per PWM peripheral
pub const PWM_CHANNEL_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Binding {
    pin: usize,
    last_used: u64,
}

/// Result of [`PwmAllocator::acquire`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Grant {
    /// Channel now bound to the requesting pin
    pub channel: u8,
    /// Pin that lost this channel, which must be disconnected
    pub evicted: Option<usize>,
}

/// LRU allocator over `C` PWM channels
///
/// Pins are identified by their index in the owning bank.
#[derive(Debug, Clone)]
pub struct PwmAllocator<const C: usize = PWM_CHANNEL_COUNT> {
    slots: [Option<Binding>; C],
    clock: u64,
}

impl<const C: usize> Default for PwmAllocator<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const C: usize> PwmAllocator<C> {
    /// Create an allocator with every channel free
    pub const fn new() -> Self {
        Self {
            slots: [None; C],
            clock: 0,
        }
    }

    /// Number of channels in the pool
    pub const fn capacity(&self) -> usize {
        C
    }

    /// Obtain a channel for `pin`
    ///
    /// - Already bound: the same channel is returned and marked most
    ///   recently used.
    /// - A channel is free: the lowest free channel is bound.
    /// - Otherwise the least recently used binding (lowest channel on ties)
    ///   is taken over and reported in [`Grant::evicted`].
    ///
    /// # Panics
    ///
    /// Panics if `C` is zero.
    pub fn acquire(&mut self, pin: usize) -> Grant {
        self.clock += 1;
        let now = self.clock;

        if let Some(channel) = self.channel_of(pin) {
            if let Some(binding) = self.slots[channel as usize].as_mut() {
                binding.last_used = now;
            }
            return Grant {
                channel,
                evicted: None,
            };
        }

        let (index, evicted) = match self.slots.iter().position(|slot| slot.is_none()) {
            Some(free) => (free, None),
            None => {
                let victim = self.least_recently_used();
                (victim, self.slots[victim].map(|b| b.pin))
            }
        };

        self.slots[index] = Some(Binding {
            pin,
            last_used: now,
        });

        Grant {
            channel: index as u8,
            evicted,
        }
    }

    /// Free the channel held by `pin`, returning it if there was one
    pub fn release(&mut self, pin: usize) -> Option<u8> {
        let channel = self.channel_of(pin)?;
        self.slots[channel as usize] = None;
        Some(channel)
    }

    /// Channel currently bound to `pin`
    pub fn channel_of(&self, pin: usize) -> Option<u8> {
        self.slots
            .iter()
            .position(|slot| matches!(slot, Some(b) if b.pin == pin))
            .map(|i| i as u8)
    }

    /// Pin currently bound to `channel`
    pub fn owner(&self, channel: u8) -> Option<usize> {
        self.slots
            .get(channel as usize)
            .and_then(|slot| slot.map(|b| b.pin))
    }

    /// Number of bound channels
    pub fn bound_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    /// Pins holding a channel, in channel order
    pub fn bound_pins(&self) -> impl Iterator<Item = (u8, usize)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.map(|b| (i as u8, b.pin)))
    }

    fn least_recently_used(&self) -> usize {
        let mut victim = 0;
        let mut oldest = u64::MAX;
        for (i, slot) in self.slots.iter().enumerate() {
            if let Some(binding) = slot {
                // Strict comparison keeps the lowest index on ties
                if binding.last_used < oldest {
                    oldest = binding.last_used;
                    victim = i;
                }
            }
        }
        victim
    }
}
