//! Enumeration types shared across the simulation.

use serde::{Deserialize, Serialize};

/// The two kinds of agent that inhabit the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Species {
    /// Hunts prey, starves without kills, sleeps after eating.
    Predator,
    /// Grazes freely; only ages, breeds, and moves.
    Prey,
}

impl core::fmt::Display for Species {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Predator => write!(f, "predator"),
            Self::Prey => write!(f, "prey"),
        }
    }
}

/// A unit step to one of the four orthogonal neighbors.
///
/// `x` grows to the east and `y` grows to the south.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    /// `x - 1`
    West,
    /// `y - 1`
    North,
    /// `x + 1`
    East,
    /// `y + 1`
    South,
}

impl Direction {
    /// All four directions in their canonical order.
    pub const ALL: [Self; 4] = [Self::West, Self::North, Self::East, Self::South];
}

/// The turn-parity bit.
///
/// The coordinator holds one global parity and every agent holds its own.
/// An agent may act only while the two agree; acting flips the agent's bit,
/// and the global bit flips once at the end of every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Parity {
    /// The parity every run starts with.
    #[default]
    Even,
    /// The other one.
    Odd,
}

impl Parity {
    /// Return the opposite parity.
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Even => Self::Odd,
            Self::Odd => Self::Even,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parity_flip_is_an_involution() {
        assert_eq!(Parity::Even.flipped(), Parity::Odd);
        assert_eq!(Parity::Even.flipped().flipped(), Parity::Even);
    }

    #[test]
    fn species_serializes_snake_case() {
        let json = serde_json::to_string(&Species::Predator).ok();
        assert_eq!(json.as_deref(), Some("\"predator\""));
    }

    #[test]
    fn all_directions_are_distinct() {
        let mut dirs = Direction::ALL.to_vec();
        dirs.sort();
        dirs.dedup();
        assert_eq!(dirs.len(), 4);
    }
}
