//! Plain data structs exchanged between the core and its collaborators.

use serde::{Deserialize, Serialize};

use crate::enums::{Direction, Species};
use crate::ids::AgentId;

/// A cell coordinate on the grid.
///
/// The coordinator scans `x` in the outer loop and `y` in the inner loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    /// Outer scan coordinate (row).
    pub x: u32,
    /// Inner scan coordinate (column).
    pub y: u32,
}

impl Position {
    /// Create a position from its coordinates.
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Return the neighbor one step away in `direction`.
    ///
    /// Returns `None` when the step would leave the non-negative quadrant.
    /// The upper bound depends on the grid and is checked there.
    pub const fn step(self, direction: Direction) -> Option<Self> {
        let (x, y) = match direction {
            Direction::West => (self.x.checked_sub(1), Some(self.y)),
            Direction::North => (Some(self.x), self.y.checked_sub(1)),
            Direction::East => (self.x.checked_add(1), Some(self.y)),
            Direction::South => (Some(self.x), self.y.checked_add(1)),
        };
        match (x, y) {
            (Some(x), Some(y)) => Some(Self { x, y }),
            _ => None,
        }
    }
}

impl core::fmt::Display for Position {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Read-only view of one occupied cell, used by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellSnapshot {
    /// The occupant's handle.
    pub id: AgentId,
    /// The occupant's species.
    pub species: Species,
    /// Ticks survived so far.
    pub age: u32,
    /// Age at which the occupant dies.
    pub max_age: u32,
    /// Whether the occupant is a sleeping predator.
    pub is_asleep: bool,
}

impl CellSnapshot {
    /// Whether the occupant has lived past half of its lifespan.
    pub const fn is_elder(&self) -> bool {
        self.age > self.max_age / 2
    }
}

/// Population counts taken after one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PopulationSample {
    /// Living predators.
    pub predators: u32,
    /// Living prey.
    pub prey: u32,
}

impl PopulationSample {
    /// Create a sample from explicit counts.
    pub const fn new(predators: u32, prey: u32) -> Self {
        Self { predators, prey }
    }

    /// Total number of living agents.
    pub const fn total(&self) -> u32 {
        self.predators.saturating_add(self.prey)
    }

    /// Count for a single species.
    pub const fn of(&self, species: Species) -> u32 {
        match species {
            Species::Predator => self.predators,
            Species::Prey => self.prey,
        }
    }

    /// Whether at least one species has died out.
    pub const fn has_extinction(&self) -> bool {
        self.predators == 0 || self.prey == 0
    }
}
