//! Randomness for placement and neighbor ordering.
//!
//! All random draws in a run go through the [`RandomSource`] trait so the
//! tick engine can be driven by the seeded production generator or by a
//! scripted stub in tests.
//!
//! # Determinism
//!
//! [`SeededRandom`] wraps a single [`StdRng`] created once per simulation.
//! Constructed with [`SeededRandom::from_seed`], the same seed always yields
//! the same placement and the same sequence of direction orders.

use std::collections::VecDeque;

use predation_types::Direction;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

/// Source of the random values the simulation consumes.
pub trait RandomSource {
    /// Draw a uniform integer from the inclusive range `min..=max`.
    ///
    /// A reversed range is treated as its normalized form.
    fn uniform_int(&mut self, min: u32, max: u32) -> u32;

    /// Return the four directions in a uniformly random order.
    fn shuffled_directions(&mut self) -> [Direction; 4];
}

/// Production random source backed by one process-lifetime [`StdRng`].
#[derive(Debug, Clone)]
pub struct SeededRandom {
    /// The generator shared by every draw.
    rng: StdRng,
}

impl SeededRandom {
    /// Create a reproducible source from a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create a source seeded once from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Create a source from an optional seed, falling back to entropy.
    pub fn new(seed: Option<u64>) -> Self {
        seed.map_or_else(Self::from_entropy, Self::from_seed)
    }
}

impl RandomSource for SeededRandom {
    fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        self.rng.random_range(low..=high)
    }

    fn shuffled_directions(&mut self) -> [Direction; 4] {
        let mut directions = Direction::ALL;
        directions.shuffle(&mut self.rng);
        directions
    }
}

/// Deterministic stub that replays queued values.
///
/// Once a queue runs dry, direction orders fall back to
/// [`Direction::ALL`] and integers fall back to the low end of the
/// requested range.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRandom {
    /// Direction orders returned by successive shuffles.
    directions: VecDeque<[Direction; 4]>,
    /// Integers returned by successive draws (clamped into range).
    integers: VecDeque<u32>,
}

impl ScriptedRandom {
    /// Create a stub with empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a direction order for the next shuffle.
    #[must_use]
    pub fn with_directions(mut self, order: [Direction; 4]) -> Self {
        self.directions.push_back(order);
        self
    }

    /// Queue an order whose first entry is `first`, followed by the
    /// remaining directions in canonical order.
    #[must_use]
    pub fn with_first_direction(self, first: Direction) -> Self {
        self.with_directions(order_starting_with(first))
    }

    /// Queue integers for upcoming draws.
    #[must_use]
    pub fn with_integers(mut self, values: impl IntoIterator<Item = u32>) -> Self {
        self.integers.extend(values);
        self
    }

    /// Number of direction orders not yet consumed.
    pub fn pending_directions(&self) -> usize {
        self.directions.len()
    }
}

impl RandomSource for ScriptedRandom {
    fn uniform_int(&mut self, min: u32, max: u32) -> u32 {
        let (low, high) = if min <= max { (min, max) } else { (max, min) };
        self.integers
            .pop_front()
            .map_or(low, |value| value.clamp(low, high))
    }

    fn shuffled_directions(&mut self) -> [Direction; 4] {
        self.directions.pop_front().unwrap_or(Direction::ALL)
    }
}

/// Build a direction order that tries `first` before the others.
pub fn order_starting_with(first: Direction) -> [Direction; 4] {
    let mut order = [first; 4];
    let rest = Direction::ALL.into_iter().filter(|d| *d != first);
    for (slot, direction) in order.iter_mut().skip(1).zip(rest) {
        *slot = direction;
    }
    order
}
