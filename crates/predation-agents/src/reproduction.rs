//! Breeding.
//!
//! Each eligible tick an agent counts `time_to_breed` down. When the
//! countdown is at zero it makes one breeding attempt: one shuffled
//! direction order, up to four neighbors, first acceptable cell wins.
//!
//! | Parent   | Accepts                      | Occupant fate                |
//! |----------|------------------------------|------------------------------|
//! | Prey     | empty cell                   | n/a                          |
//! | Predator | empty cell or cell with prey | prey removed, no kill credit |
//!
//! A predator birth onto prey bypasses [`kill`](crate::movement::kill):
//! the parent's hunger and sleep are untouched. The displaced prey is
//! reported with [`DeathCause::DisplacedByBirth`].
//!
//! If every neighbor is rejected the countdown stays at zero and the
//! attempt repeats on the next eligible tick.

use predation_types::{AgentId, Position, Species};
use predation_world::RandomSource;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::death::{DeathCause, DeathRecord};
use crate::error::AgentError;
use crate::habitat::Habitat;
use crate::turn::TurnContext;

/// A successful birth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthRecord {
    /// The breeding agent.
    pub parent: AgentId,
    /// The newborn.
    pub child: AgentId,
    /// Species of both.
    pub species: Species,
    /// Where the newborn was placed.
    pub position: Position,
    /// The prey that previously held the cell, for predator births.
    pub displaced: Option<DeathRecord>,
}

/// Result of one breeding step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BreedingOutcome {
    /// The countdown has not reached zero yet.
    NotDue,
    /// A newborn was placed.
    Born(BirthRecord),
    /// The countdown is at zero but no neighbor accepted the newborn.
    NoRoom,
}

/// Run the breeding step for one agent.
///
/// # Errors
///
/// Returns [`AgentError::AgentNotFound`] for an unknown handle, or a grid
/// error if the habitat is inconsistent.
pub fn handle_breeding(
    habitat: &mut Habitat,
    id: AgentId,
    ctx: &TurnContext<'_>,
    rng: &mut dyn RandomSource,
) -> Result<BreedingOutcome, AgentError> {
    let agent = habitat.agent_mut(id).ok_or(AgentError::AgentNotFound(id))?;
    let species = agent.species();
    let core = agent.core_mut();
    core.time_to_breed = core.time_to_breed.saturating_sub(1);
    if core.time_to_breed > 0 {
        return Ok(BreedingOutcome::NotDue);
    }
    let origin = core.position;
    let breed_rate = core.breed_rate;

    for direction in rng.shuffled_directions() {
        let Some(target) = habitat.grid().neighbor(origin, direction) else {
            continue;
        };
        let (child, displaced) = match (species, habitat.species_at(target)?) {
            (_, None) => {
                let child = habitat.spawn(species, target, ctx.newborn_parity, ctx.config)?;
                (child, None)
            }
            (Species::Predator, Some(Species::Prey)) => {
                let (child, displaced) =
                    habitat.spawn_overwriting(species, target, ctx.newborn_parity, ctx.config)?;
                let record = displaced
                    .map(|prey| DeathRecord::new(&prey, DeathCause::DisplacedByBirth, Some(id)));
                (child, record)
            }
            _ => continue,
        };

        if let Some(parent) = habitat.agent_mut(id) {
            parent.core_mut().time_to_breed = breed_rate;
        }
        debug!(
            tick = ctx.tick,
            parent = %id,
            child = %child,
            %species,
            position = %target,
            displaced = displaced.is_some(),
            "Agent born"
        );
        return Ok(BreedingOutcome::Born(BirthRecord {
            parent: id,
            child,
            species,
            position: target,
            displaced,
        }));
    }

    Ok(BreedingOutcome::NoRoom)
}
