//! Death causes and records.
//!
//! Agents leave the grid in exactly four ways:
//! - aging out (`age >= max_age`)
//! - predator starvation (`time_to_eat` reaches 0)
//! - being hunted by an adjacent predator
//! - (prey only) being overwritten by a predator's offspring

use predation_types::{AgentId, Position, Species};
use serde::{Deserialize, Serialize};

use crate::agent::Agent;

/// The cause of an agent's death.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// The agent's age reached its lifespan.
    OldAge,
    /// A predator went `starvation_time` eligible ticks without a kill.
    Starvation,
    /// A prey was eaten.
    Predation,
    /// A prey's cell was taken by a newborn predator.
    DisplacedByBirth,
}

impl core::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OldAge => write!(f, "old_age"),
            Self::Starvation => write!(f, "starvation"),
            Self::Predation => write!(f, "predation"),
            Self::DisplacedByBirth => write!(f, "displaced_by_birth"),
        }
    }
}

/// Data emitted when an agent dies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathRecord {
    /// The agent who died.
    pub agent_id: AgentId,
    /// The dead agent's species.
    pub species: Species,
    /// Why it died.
    pub cause: DeathCause,
    /// Age at death.
    pub final_age: u32,
    /// Cell the agent occupied.
    pub position: Position,
    /// The predator responsible, for predation and displacement.
    pub caused_by: Option<AgentId>,
}

impl DeathRecord {
    /// Build a record from the removed agent.
    pub const fn new(agent: &Agent, cause: DeathCause, caused_by: Option<AgentId>) -> Self {
        Self {
            agent_id: agent.id(),
            species: agent.species(),
            cause,
            final_age: agent.age(),
            position: agent.position(),
            caused_by,
        }
    }
}
