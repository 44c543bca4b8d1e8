//! Tick clock and turn parity.
//!
//! The clock is the single source of temporal state: the number of ticks
//! run so far and the global turn parity. An agent is eligible to act in
//! a tick when its own parity equals the global one.

use predation_types::Parity;

/// Errors that can occur during clock operations.
#[derive(Debug, thiserror::Error)]
pub enum ClockError {
    /// Tick counter would overflow.
    #[error("tick counter overflow: cannot advance beyond u64::MAX")]
    TickOverflow,
}

/// Tick counter plus global parity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickClock {
    /// Ticks completed or in progress (0 before the first tick).
    tick: u64,
    /// Parity an agent must carry to act in the current tick.
    parity: Parity,
}

impl TickClock {
    /// Create a clock at tick 0 with [`Parity::Even`].
    pub const fn new() -> Self {
        Self {
            tick: 0,
            parity: Parity::Even,
        }
    }

    /// Advance the clock by one tick. Returns the new tick number.
    ///
    /// # Errors
    ///
    /// Returns [`ClockError::TickOverflow`] if the tick counter would exceed
    /// `u64::MAX`.
    pub fn advance(&mut self) -> Result<u64, ClockError> {
        self.tick = self.tick.checked_add(1).ok_or(ClockError::TickOverflow)?;
        Ok(self.tick)
    }

    /// Return the current tick number.
    pub const fn tick(&self) -> u64 {
        self.tick
    }

    /// Return the current global parity.
    pub const fn parity(&self) -> Parity {
        self.parity
    }

    /// Toggle the global parity at the end of a tick.
    pub const fn flip_parity(&mut self) {
        self.parity = self.parity.flipped();
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn advance_counts_from_one() {
        let mut clock = TickClock::new();
        assert_eq!(clock.tick(), 0);
        assert_eq!(clock.advance().unwrap(), 1);
        assert_eq!(clock.advance().unwrap(), 2);
        assert_eq!(clock.tick(), 2);
    }

    #[test]
    fn advance_overflow_is_an_error() {
        let mut clock = TickClock {
            tick: u64::MAX,
            parity: Parity::Odd,
        };
        assert!(matches!(clock.advance(), Err(ClockError::TickOverflow)));
        assert_eq!(clock.tick(), u64::MAX);
    }

    #[test]
    fn parity_alternates() {
        let mut clock = TickClock::new();
        assert_eq!(clock.parity(), Parity::Even);
        clock.flip_parity();
        assert_eq!(clock.parity(), Parity::Odd);
        clock.flip_parity();
        assert_eq!(clock.parity(), Parity::Even);
    }
}
