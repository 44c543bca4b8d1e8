//! Per-tick vital mechanics: aging, hunger, and sleep.
//!
//! Each function runs one eligible tick's worth of a single mechanic:
//!
//! - Age increments by 1; the agent dies once `age >= max_age`
//! - Predator `time_to_eat` decrements by 1; the predator starves at 0
//! - Predator `time_to_sleep` decrements by 1; the predator stays asleep
//!   while it is still positive
//!
//! A death removes the agent from its cell and the arena before returning,
//! so the caller only has to stop processing it.

use predation_types::{AgentId, Position};

use crate::death::{DeathCause, DeathRecord};
use crate::error::AgentError;
use crate::habitat::Habitat;

/// Whether an agent survived a vital check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifeOutcome {
    /// The agent is still on the grid.
    Alive,
    /// The agent was removed.
    Died(DeathRecord),
}

impl LifeOutcome {
    /// Whether the agent was removed.
    pub const fn is_dead(&self) -> bool {
        matches!(self, Self::Died(_))
    }
}

/// Whether a predator may move this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SleepOutcome {
    /// Still digesting; movement is skipped.
    Asleep,
    /// Awake; movement proceeds.
    Awake,
}

/// Age the agent by one tick, removing it once it reaches its lifespan.
///
/// # Errors
///
/// Returns [`AgentError::AgentNotFound`] for an unknown handle.
pub fn handle_age(habitat: &mut Habitat, id: AgentId) -> Result<LifeOutcome, AgentError> {
    let agent = habitat.agent_mut(id).ok_or(AgentError::AgentNotFound(id))?;
    let core = agent.core_mut();
    core.age = core.age.checked_add(1).ok_or_else(|| AgentError::ArithmeticOverflow {
        context: String::from("age increment overflow"),
    })?;
    if core.age < core.max_age {
        return Ok(LifeOutcome::Alive);
    }
    let position = core.position;
    retire(habitat, id, position, DeathCause::OldAge)
}

/// Count a predator's hunger down, removing it when it reaches zero.
///
/// Prey never starve and always report [`LifeOutcome::Alive`].
///
/// # Errors
///
/// Returns [`AgentError::AgentNotFound`] for an unknown handle.
pub fn handle_hunger(habitat: &mut Habitat, id: AgentId) -> Result<LifeOutcome, AgentError> {
    let agent = habitat.agent_mut(id).ok_or(AgentError::AgentNotFound(id))?;
    let position = agent.position();
    let Some(predator) = agent.as_predator_mut() else {
        return Ok(LifeOutcome::Alive);
    };
    predator.time_to_eat = predator.time_to_eat.saturating_sub(1);
    if predator.time_to_eat > 0 {
        return Ok(LifeOutcome::Alive);
    }
    retire(habitat, id, position, DeathCause::Starvation)
}

/// Count a predator's sleep down.
///
/// Prey never sleep and always report [`SleepOutcome::Awake`].
///
/// # Errors
///
/// Returns [`AgentError::AgentNotFound`] for an unknown handle.
pub fn handle_sleep(habitat: &mut Habitat, id: AgentId) -> Result<SleepOutcome, AgentError> {
    let agent = habitat.agent_mut(id).ok_or(AgentError::AgentNotFound(id))?;
    let Some(predator) = agent.as_predator_mut() else {
        return Ok(SleepOutcome::Awake);
    };
    predator.time_to_sleep = predator.time_to_sleep.saturating_sub(1);
    if predator.time_to_sleep > 0 {
        return Ok(SleepOutcome::Asleep);
    }
    predator.is_asleep = false;
    Ok(SleepOutcome::Awake)
}

fn retire(
    habitat: &mut Habitat,
    id: AgentId,
    position: Position,
    cause: DeathCause,
) -> Result<LifeOutcome, AgentError> {
    let removed = habitat
        .remove_at(position)?
        .ok_or(AgentError::NoOccupant { position })?;
    if removed.id() != id {
        return Err(AgentError::PositionMismatch {
            agent: id,
            stored: position,
            cell: removed.position(),
        });
    }
    Ok(LifeOutcome::Died(DeathRecord::new(&removed, cause, None)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::panic)]
mod tests {
    use predation_types::{Parity, Species};

    use super::*;
    use crate::config::EcosystemConfig;

    fn setup(species: Species) -> (Habitat, AgentId) {
        let mut h = Habitat::new(4).unwrap();
        let id = h
            .spawn(species, Position::new(1, 1), Parity::Even, &EcosystemConfig::default())
            .unwrap();
        (h, id)
    }

    #[test]
    fn age_increments_until_lifespan() {
        let (mut h, id) = setup(Species::Prey);
        for expected in 1..20 {
            assert_eq!(handle_age(&mut h, id).unwrap(), LifeOutcome::Alive);
            assert_eq!(h.agent(id).map(|a| a.age()), Some(expected));
        }
        let outcome = handle_age(&mut h, id).unwrap();
        let LifeOutcome::Died(record) = outcome else {
            panic!("prey should die at max age");
        };
        assert_eq!(record.cause, DeathCause::OldAge);
        assert_eq!(record.final_age, 20);
        assert!(h.agent(id).is_none());
        assert!(h.grid().is_empty(Position::new(1, 1)).unwrap());
    }

    #[test]
    fn predator_starves_after_starvation_time() {
        let (mut h, id) = setup(Species::Predator);
        for _ in 1..10 {
            assert!(!handle_hunger(&mut h, id).unwrap().is_dead());
        }
        let outcome = handle_hunger(&mut h, id).unwrap();
        assert!(matches!(
            outcome,
            LifeOutcome::Died(DeathRecord {
                cause: DeathCause::Starvation,
                species: Species::Predator,
                ..
            })
        ));
        assert!(h.is_empty());
    }

    #[test]
    fn prey_ignores_hunger_and_sleep() {
        let (mut h, id) = setup(Species::Prey);
        for _ in 0..50 {
            assert_eq!(handle_hunger(&mut h, id).unwrap(), LifeOutcome::Alive);
        }
        assert_eq!(handle_sleep(&mut h, id).unwrap(), SleepOutcome::Awake);
    }

    #[test]
    fn sleep_counts_down_then_wakes() {
        let (mut h, id) = setup(Species::Predator);
        if let Some(p) = h.agent_mut(id).and_then(|a| a.as_predator_mut()) {
            p.time_to_sleep = 3;
            p.is_asleep = true;
        }
        assert_eq!(handle_sleep(&mut h, id).unwrap(), SleepOutcome::Asleep);
        assert_eq!(handle_sleep(&mut h, id).unwrap(), SleepOutcome::Asleep);
        assert_eq!(handle_sleep(&mut h, id).unwrap(), SleepOutcome::Awake);
        assert!(!h.agent(id).unwrap().is_asleep());
    }

    #[test]
    fn awake_predator_stays_awake() {
        let (mut h, id) = setup(Species::Predator);
        assert_eq!(handle_sleep(&mut h, id).unwrap(), SleepOutcome::Awake);
        assert_eq!(handle_sleep(&mut h, id).unwrap(), SleepOutcome::Awake);
        assert_eq!(
            h.agent(id).and_then(|a| a.as_predator()).map(|p| p.time_to_sleep),
            Some(0)
        );
    }

    #[test]
    fn unknown_handle_is_an_error() {
        let (mut h, _) = setup(Species::Prey);
        assert_eq!(
            handle_age(&mut h, AgentId(99)),
            Err(AgentError::AgentNotFound(AgentId(99)))
        );
    }
}
