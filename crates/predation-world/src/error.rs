//! Error types for the `predation-world` crate.
//!
//! Every variant is a contract violation by the caller. Ordinary
//! simulation events (a blocked move, a failed breeding attempt) are never
//! reported through [`WorldError`].

use predation_types::{AgentId, Position};

/// Errors that can occur during grid operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WorldError {
    /// A coordinate outside `0..dimension` was passed to a cell operation.
    #[error("position {position} is outside the {dimension}x{dimension} grid")]
    OutOfBounds {
        /// The offending position.
        position: Position,
        /// Side length of the grid.
        dimension: u32,
    },

    /// An agent was placed onto a cell that already holds one.
    #[error("cell {position} is already occupied by agent {occupant}")]
    CellOccupied {
        /// The contested cell.
        position: Position,
        /// The agent currently in the cell.
        occupant: AgentId,
    },

    /// The grid cannot be built with the requested side length.
    #[error("invalid grid dimension: {dimension}")]
    InvalidDimension {
        /// The rejected side length.
        dimension: u32,
    },
}
