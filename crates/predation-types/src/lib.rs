//! Shared type definitions for the Predation simulation.
//!
//! This crate is the single source of truth for the small value types that
//! flow between the grid, the agent state machine, the tick coordinator,
//! and the renderers.
//!
//! # Modules
//!
//! - [`ids`] -- Stable agent handles allocated from a monotonic counter
//! - [`enums`] -- Species, compass directions, and turn parity
//! - [`structs`] -- Grid positions, cell snapshots, and population samples

pub mod enums;
pub mod ids;
pub mod structs;

// Re-export all public types at crate root for convenience.
pub use enums::{Direction, Parity, Species};
pub use ids::AgentId;
pub use structs::{CellSnapshot, PopulationSample, Position};
