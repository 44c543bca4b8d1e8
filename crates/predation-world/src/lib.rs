//! Grid, occupancy, and randomness for the Predation simulation.
//!
//! This crate models the physical space agents live in: a fixed square
//! grid of optional agent handles with bounds checking and atomic
//! place/replace/clear operations, plus the random source that orders
//! neighbor choices.
//!
//! # Modules
//!
//! - [`error`] -- Error types for grid operations.
//! - [`grid`] -- The [`Grid`]: an `N x N` array of `Option<AgentId>`.
//! - [`random`] -- The [`RandomSource`] seam, the seeded production
//!   implementation, and a scripted stub for deterministic tests.

pub mod error;
pub mod grid;
pub mod random;

// Re-export primary types at crate root.
pub use error::WorldError;
pub use grid::Grid;
pub use random::{RandomSource, ScriptedRandom, SeededRandom, order_starting_with};
