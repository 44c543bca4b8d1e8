//! Agent records.
//!
//! The population is a closed set of two variants, expressed as the
//! [`Agent`] enum. Fields common to both live in [`AgentCore`]; only
//! [`PredatorState`] carries hunger and sleep.

use predation_types::{AgentId, CellSnapshot, Parity, Position, Species};
use serde::{Deserialize, Serialize};

use crate::config::EcosystemConfig;

/// Fields shared by every agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentCore {
    /// Stable handle, unique within a run.
    pub id: AgentId,
    /// The cell this agent occupies.
    pub position: Position,
    /// Eligible ticks survived.
    pub age: u32,
    /// Age at which the agent is removed.
    pub max_age: u32,
    /// Value `time_to_breed` resets to after a successful birth.
    pub breed_rate: u32,
    /// Countdown to the next breeding attempt.
    pub time_to_breed: u32,
    /// Relocations attempted per tick.
    pub move_speed: u32,
    /// This agent's half of the turn-parity handshake.
    pub turn_parity: Parity,
}

/// Predator-specific state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredatorState {
    /// Shared fields.
    pub core: AgentCore,
    /// Countdown to starvation; reset by every kill.
    pub time_to_eat: u32,
    /// Countdown to waking; set by every kill.
    pub time_to_sleep: u32,
    /// Whether the predator is digesting a kill.
    pub is_asleep: bool,
}

/// Prey-specific state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreyState {
    /// Shared fields.
    pub core: AgentCore,
}

/// A living agent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Agent {
    /// A hunter.
    Predator(PredatorState),
    /// A grazer.
    Prey(PreyState),
}

impl Agent {
    /// Build a fresh agent of `species` with age 0 and full countdowns.
    pub const fn new(
        species: Species,
        id: AgentId,
        position: Position,
        turn_parity: Parity,
        config: &EcosystemConfig,
    ) -> Self {
        let traits = config.traits(species);
        let core = AgentCore {
            id,
            position,
            age: 0,
            max_age: traits.max_age,
            breed_rate: traits.breed_rate,
            time_to_breed: traits.breed_rate,
            move_speed: traits.move_speed,
            turn_parity,
        };
        match species {
            Species::Predator => Self::Predator(PredatorState {
                core,
                time_to_eat: config.predator.starvation_time,
                time_to_sleep: 0,
                is_asleep: false,
            }),
            Species::Prey => Self::Prey(PreyState { core }),
        }
    }

    /// Return the species discriminator.
    pub const fn species(&self) -> Species {
        match self {
            Self::Predator(_) => Species::Predator,
            Self::Prey(_) => Species::Prey,
        }
    }

    /// Return the shared fields.
    pub const fn core(&self) -> &AgentCore {
        match self {
            Self::Predator(p) => &p.core,
            Self::Prey(p) => &p.core,
        }
    }

    /// Return the shared fields mutably.
    pub const fn core_mut(&mut self) -> &mut AgentCore {
        match self {
            Self::Predator(p) => &mut p.core,
            Self::Prey(p) => &mut p.core,
        }
    }

    /// Return the agent's handle.
    pub const fn id(&self) -> AgentId {
        self.core().id
    }

    /// Return the agent's stored position.
    pub const fn position(&self) -> Position {
        self.core().position
    }

    /// Return the agent's age.
    pub const fn age(&self) -> u32 {
        self.core().age
    }

    /// Return the agent's turn parity.
    pub const fn turn_parity(&self) -> Parity {
        self.core().turn_parity
    }

    /// Whether this is a sleeping predator.
    pub const fn is_asleep(&self) -> bool {
        match self {
            Self::Predator(p) => p.is_asleep,
            Self::Prey(_) => false,
        }
    }

    /// Return predator state, if this is a predator.
    pub const fn as_predator(&self) -> Option<&PredatorState> {
        match self {
            Self::Predator(p) => Some(p),
            Self::Prey(_) => None,
        }
    }

    /// Return predator state mutably, if this is a predator.
    pub const fn as_predator_mut(&mut self) -> Option<&mut PredatorState> {
        match self {
            Self::Predator(p) => Some(p),
            Self::Prey(_) => None,
        }
    }

    /// Produce the read-only view used by renderers.
    pub const fn snapshot(&self) -> CellSnapshot {
        let core = self.core();
        CellSnapshot {
            id: core.id,
            species: self.species(),
            age: core.age,
            max_age: core.max_age,
            is_asleep: self.is_asleep(),
        }
    }
}
