//! Movement and predation.
//!
//! An agent makes up to `move_speed` relocation steps per eligible tick.
//! One shuffled direction order is drawn per movement phase. Every step
//! walks that order from the start and handles each neighbor as it is
//! tried: a predator eats prey there and stops moving for the tick, and
//! any agent steps into it if it is empty.

use predation_types::{AgentId, Direction, Position, Species};
use predation_world::RandomSource;
use tracing::debug;

use crate::config::PredatorConfig;
use crate::death::{DeathCause, DeathRecord};
use crate::error::AgentError;
use crate::habitat::Habitat;
use crate::turn::TurnContext;

/// What happened during one agent's movement phase.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    /// Relocations made.
    pub steps: u32,
    /// The prey eaten, if any.
    pub kill: Option<DeathRecord>,
}

/// What one relocation step found.
enum Step {
    /// The agent moved into an empty cell.
    Moved,
    /// The predator ate the prey at this cell.
    Ate(Position),
    /// No tried neighbor was usable.
    Blocked,
}

/// Run the movement phase for one agent.
///
/// # Errors
///
/// Returns [`AgentError::AgentNotFound`] for an unknown handle, or a grid
/// error if the habitat is inconsistent.
pub fn move_agent(
    habitat: &mut Habitat,
    id: AgentId,
    ctx: &TurnContext<'_>,
    rng: &mut dyn RandomSource,
) -> Result<MoveOutcome, AgentError> {
    let agent = habitat.agent(id).ok_or(AgentError::AgentNotFound(id))?;
    let hunts = agent.species() == Species::Predator;
    let mut remaining = agent.core().move_speed;
    let mut outcome = MoveOutcome::default();
    let order = rng.shuffled_directions();

    while remaining > 0 {
        match step(habitat, id, hunts, order)? {
            Step::Moved => {
                outcome.steps = outcome.steps.saturating_add(1);
                remaining = remaining.saturating_sub(1);
            }
            Step::Ate(target) => {
                let record = kill(habitat, id, target, &ctx.config.predator)?;
                debug!(
                    tick = ctx.tick,
                    predator = %id,
                    prey = %record.agent_id,
                    position = %target,
                    "Prey eaten"
                );
                outcome.kill = Some(record);
                break;
            }
            Step::Blocked => break,
        }
    }

    Ok(outcome)
}

/// Try the neighbors in `order` until one is usable.
fn step(
    habitat: &mut Habitat,
    id: AgentId,
    hunts: bool,
    order: [Direction; 4],
) -> Result<Step, AgentError> {
    let here = habitat
        .agent(id)
        .ok_or(AgentError::AgentNotFound(id))?
        .position();
    for direction in order {
        let Some(cell) = habitat.grid().neighbor(here, direction) else {
            continue;
        };
        match habitat.species_at(cell)? {
            Some(Species::Prey) if hunts => return Ok(Step::Ate(cell)),
            Some(_) => {}
            None => {
                habitat.relocate(id, cell)?;
                return Ok(Step::Moved);
            }
        }
    }
    Ok(Step::Blocked)
}

/// Have predator `predator_id` eat the prey at `victim`.
///
/// The prey is removed, the predator's hunger resets to
/// `starvation_time`, and it falls asleep for `sleep_time` ticks. The
/// predator stays in its own cell.
///
/// # Errors
///
/// - [`AgentError::NotAPredator`] if `predator_id` is not a predator
/// - [`AgentError::NoOccupant`] if `victim` is empty
/// - [`AgentError::NotPrey`] if `victim` holds a predator
pub fn kill(
    habitat: &mut Habitat,
    predator_id: AgentId,
    victim: Position,
    config: &PredatorConfig,
) -> Result<DeathRecord, AgentError> {
    let hunter = habitat
        .agent(predator_id)
        .ok_or(AgentError::AgentNotFound(predator_id))?;
    if hunter.as_predator().is_none() {
        return Err(AgentError::NotAPredator(predator_id));
    }
    match habitat.species_at(victim)? {
        None => return Err(AgentError::NoOccupant { position: victim }),
        Some(Species::Predator) => {
            return Err(AgentError::NotPrey {
                position: victim,
                species: Species::Predator,
            });
        }
        Some(Species::Prey) => {}
    }

    let prey = habitat
        .remove_at(victim)?
        .ok_or(AgentError::NoOccupant { position: victim })?;
    if let Some(predator) = habitat
        .agent_mut(predator_id)
        .and_then(|agent| agent.as_predator_mut())
    {
        predator.time_to_eat = config.starvation_time;
        predator.time_to_sleep = config.sleep_time;
        predator.is_asleep = true;
    }
    Ok(DeathRecord::new(&prey, DeathCause::Predation, Some(predator_id)))
}
