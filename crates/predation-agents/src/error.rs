//! Error types for the predation-agents crate.
//!
//! Deaths, failed breeding attempts, and blocked moves are outcomes, not
//! errors. The variants here describe broken contracts: a handle that the
//! arena does not know, a grid that disagrees with an agent's stored
//! position, or a behavior invoked on the wrong species.

use predation_types::{AgentId, Position, Species};
use predation_world::WorldError;

/// Errors that can occur during agent state operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    /// A grid operation failed.
    #[error("world error: {source}")]
    World {
        /// The underlying grid error.
        #[from]
        source: WorldError,
    },

    /// Agent with the given ID is not in the arena.
    #[error("agent not found: {0}")]
    AgentNotFound(AgentId),

    /// A predator-only behavior was invoked on a prey.
    #[error("agent {0} is not a predator")]
    NotAPredator(AgentId),

    /// An operation that needs an occupant found an empty cell.
    #[error("no agent at {position}")]
    NoOccupant {
        /// The empty cell.
        position: Position,
    },

    /// A kill targeted something other than prey.
    #[error("agent at {position} is a {species}, not prey")]
    NotPrey {
        /// The targeted cell.
        position: Position,
        /// What was found there.
        species: Species,
    },

    /// The grid and the arena disagree about where an agent is.
    #[error("agent {agent} is stored at {stored} but referenced from {cell}")]
    PositionMismatch {
        /// The inconsistent agent.
        agent: AgentId,
        /// Position held by the agent itself.
        stored: Position,
        /// Cell that references the agent.
        cell: Position,
    },

    /// An arena entry is not referenced by any cell.
    #[error("agent {0} is alive but not on the grid")]
    Detached(AgentId),

    /// An arithmetic overflow occurred while updating agent state.
    #[error("arithmetic overflow: {context}")]
    ArithmeticOverflow {
        /// Description of what was being computed.
        context: String,
    },

    /// Species parameters failed validation.
    #[error("invalid ecosystem configuration: {reason}")]
    InvalidConfig {
        /// Explanation of what is wrong with the configuration.
        reason: String,
    },
}
