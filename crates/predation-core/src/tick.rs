//! Tick cycle: one full scan of the grid.
//!
//! Each tick runs these steps:
//!
//! 1. **Advance** -- increment the tick counter.
//! 2. **Scan** -- visit every cell in row-major order (x outer, y inner).
//!    An occupant acts only if its turn parity equals the global parity.
//!    An acting agent runs breeding, aging, hunger, and sleep, stops early
//!    on death or sleep, then flips its own parity and moves.
//! 3. **Flip** -- toggle the global parity.
//! 4. **Count** -- recount both populations and append a history sample.
//!
//! An agent that moves into a cell the scan has not reached yet already
//! carries the flipped parity, so it is not processed twice. Newborns carry
//! the tick's global parity: one placed ahead of the scan acts in its birth
//! tick, one placed behind it waits for the parity to come round again.

use predation_agents::{
    AgentError, BirthRecord, BreedingOutcome, DeathRecord, EcosystemConfig, Habitat, LifeOutcome,
    SleepOutcome, TurnContext, handle_age, handle_breeding, handle_hunger, handle_sleep,
    move_agent,
};
use predation_types::{AgentId, PopulationSample, Species};
use predation_world::RandomSource;
use tracing::{debug, info};

use crate::clock::{ClockError, TickClock};
use crate::population::PopulationTracker;

/// Errors that can occur during tick execution.
#[derive(Debug, thiserror::Error)]
pub enum TickError {
    /// A clock operation failed.
    #[error("clock error: {source}")]
    Clock {
        /// The underlying clock error.
        #[from]
        source: ClockError,
    },

    /// A habitat lookup failed outside any agent's turn.
    #[error("habitat error: {source}")]
    Habitat {
        /// The underlying agent-layer error.
        #[from]
        source: AgentError,
    },

    /// An agent's turn failed.
    #[error("agent error for {agent_id}: {source}")]
    Agent {
        /// The agent whose turn failed.
        agent_id: AgentId,
        /// The underlying agent error.
        source: AgentError,
    },

    /// A tick was requested after one species died out.
    #[error("game over at tick {tick}: {predators} predators, {prey} prey")]
    GameOver {
        /// The last tick that ran.
        tick: u64,
        /// Predators remaining.
        predators: u32,
        /// Prey remaining.
        prey: u32,
    },
}

/// Everything one run mutates.
#[derive(Debug, Clone)]
pub struct SimulationState {
    /// Tick counter and global parity.
    pub clock: TickClock,
    /// Grid plus agent arena.
    pub habitat: Habitat,
    /// Species parameters.
    pub ecosystem: EcosystemConfig,
    /// Latest counts and per-tick history.
    pub population: PopulationTracker,
}

impl SimulationState {
    /// Create an empty state at tick 0.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError`] if the grid cannot be built.
    pub fn new(dimension: u32, ecosystem: EcosystemConfig) -> Result<Self, AgentError> {
        Ok(Self {
            clock: TickClock::new(),
            habitat: Habitat::new(dimension)?,
            ecosystem,
            population: PopulationTracker::new(),
        })
    }

    /// Recount the habitat into the tracker without extending the history.
    pub fn observe_population(&mut self) -> PopulationSample {
        let counts = self.habitat.counts();
        self.population.observe(counts);
        counts
    }
}

/// Summary of a single tick's execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickSummary {
    /// The tick number that was executed.
    pub tick: u64,
    /// Agents born during this tick.
    pub births: Vec<BirthRecord>,
    /// Agents removed during this tick, including prey displaced by births.
    pub deaths: Vec<DeathRecord>,
    /// Relocation steps taken across all agents.
    pub relocations: u32,
    /// Counts at the end of the tick.
    pub population: PopulationSample,
}

impl TickSummary {
    const fn empty(tick: u64) -> Self {
        Self {
            tick,
            births: Vec::new(),
            deaths: Vec::new(),
            relocations: 0,
            population: PopulationSample::new(0, 0),
        }
    }

    /// Number of `species` births this tick.
    pub fn births_of(&self, species: Species) -> usize {
        self.births.iter().filter(|b| b.species == species).count()
    }

    /// Number of `species` deaths this tick.
    pub fn deaths_of(&self, species: Species) -> usize {
        self.deaths.iter().filter(|d| d.species == species).count()
    }
}

/// Execute one complete tick of the simulation.
///
/// This does not check for a finished game; see
/// [`Simulation::tick`](crate::simulation::Simulation::tick) for the gated
/// entry point.
///
/// # Errors
///
/// Returns [`TickError::Clock`] on tick overflow, or
/// [`TickError::Agent`] / [`TickError::Habitat`] if the habitat is found
/// inconsistent.
pub fn run_tick(
    state: &mut SimulationState,
    rng: &mut dyn RandomSource,
) -> Result<TickSummary, TickError> {
    let tick = state.clock.advance()?;
    let parity = state.clock.parity();
    debug!(tick, ?parity, "Tick started");

    let ctx = TurnContext::new(&state.ecosystem, parity, tick);
    let mut summary = TickSummary::empty(tick);

    for position in state.habitat.grid().positions() {
        let Some(id) = state.habitat.occupant(position)? else {
            continue;
        };
        let eligible = state
            .habitat
            .agent(id)
            .is_some_and(|agent| agent.turn_parity() == parity);
        if !eligible {
            continue;
        }
        take_turn(&mut state.habitat, id, &ctx, rng, &mut summary)
            .map_err(|source| TickError::Agent { agent_id: id, source })?;
    }

    state.clock.flip_parity();
    summary.population = state.habitat.counts();
    state.population.record(summary.population);

    info!(
        tick,
        predators = summary.population.predators,
        prey = summary.population.prey,
        births = summary.births.len(),
        deaths = summary.deaths.len(),
        relocations = summary.relocations,
        "Tick completed"
    );
    if summary.population.has_extinction() {
        info!(
            tick,
            predators = summary.population.predators,
            prey = summary.population.prey,
            "Species extinct"
        );
    }

    Ok(summary)
}

/// Run one eligible agent's turn.
fn take_turn(
    habitat: &mut Habitat,
    id: AgentId,
    ctx: &TurnContext<'_>,
    rng: &mut dyn RandomSource,
    summary: &mut TickSummary,
) -> Result<(), AgentError> {
    if let BreedingOutcome::Born(birth) = handle_breeding(habitat, id, ctx, rng)? {
        if let Some(displaced) = &birth.displaced {
            summary.deaths.push(displaced.clone());
        }
        summary.births.push(birth);
    }

    if let LifeOutcome::Died(record) = handle_age(habitat, id)? {
        record_death(ctx.tick, record, summary);
        return Ok(());
    }
    if let LifeOutcome::Died(record) = handle_hunger(habitat, id)? {
        record_death(ctx.tick, record, summary);
        return Ok(());
    }
    if handle_sleep(habitat, id)? == SleepOutcome::Asleep {
        return Ok(());
    }

    let agent = habitat.agent_mut(id).ok_or(AgentError::AgentNotFound(id))?;
    let core = agent.core_mut();
    core.turn_parity = core.turn_parity.flipped();

    let moved = move_agent(habitat, id, ctx, rng)?;
    summary.relocations = summary.relocations.saturating_add(moved.steps);
    if let Some(kill) = moved.kill {
        summary.deaths.push(kill);
    }
    Ok(())
}

fn record_death(tick: u64, record: DeathRecord, summary: &mut TickSummary) {
    debug!(
        tick,
        agent = %record.agent_id,
        species = %record.species,
        cause = %record.cause,
        age = record.final_age,
        position = %record.position,
        "Agent died"
    );
    summary.deaths.push(record);
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::arithmetic_side_effects)]
mod tests {
    use predation_types::{Parity, Position};
    use predation_world::{ScriptedRandom, SeededRandom};

    use super::*;

    fn state(dimension: u32) -> SimulationState {
        SimulationState::new(dimension, EcosystemConfig::default()).unwrap()
    }

    fn place(state: &mut SimulationState, species: Species, x: u32, y: u32) -> AgentId {
        let parity = state.clock.parity();
        state
            .habitat
            .spawn(species, Position::new(x, y), parity, &state.ecosystem)
            .unwrap()
    }

    #[test]
    fn tick_advances_clock_and_flips_parity() {
        let mut s = state(3);
        place(&mut s, Species::Prey, 1, 1);
        let mut rng = ScriptedRandom::new();
        let summary = run_tick(&mut s, &mut rng).unwrap();
        assert_eq!(summary.tick, 1);
        assert_eq!(s.clock.tick(), 1);
        assert_eq!(s.clock.parity(), Parity::Odd);
        assert_eq!(s.population.history(), &[PopulationSample::new(0, 1)]);
    }

    #[test]
    fn mover_into_unscanned_cell_acts_once() {
        let mut s = state(3);
        let prey = place(&mut s, Species::Prey, 0, 0);
        // Canonical order starts West (off-grid), then North (off-grid),
        // then East to (1, 0), a cell the scan visits later.
        let mut rng = ScriptedRandom::new();
        let summary = run_tick(&mut s, &mut rng).unwrap();
        assert_eq!(summary.relocations, 1);
        let agent = s.habitat.agent(prey).unwrap();
        assert_eq!(agent.position(), Position::new(1, 0));
        assert_eq!(agent.age(), 1);
        assert_eq!(agent.turn_parity(), Parity::Odd);
    }

    #[test]
    fn ineligible_agents_are_skipped() {
        let mut s = state(3);
        let prey = place(&mut s, Species::Prey, 1, 1);
        if let Some(agent) = s.habitat.agent_mut(prey) {
            agent.core_mut().turn_parity = Parity::Odd;
        }
        let mut rng = ScriptedRandom::new();
        let summary = run_tick(&mut s, &mut rng).unwrap();
        assert_eq!(summary.relocations, 0);
        assert_eq!(s.habitat.agent(prey).unwrap().age(), 0);

        let summary = run_tick(&mut s, &mut rng).unwrap();
        assert_eq!(summary.relocations, 1);
        assert_eq!(s.habitat.agent(prey).unwrap().age(), 1);
    }

    #[test]
    fn sleeping_predator_neither_moves_nor_flips() {
        let mut s = state(3);
        let predator = place(&mut s, Species::Predator, 1, 1);
        if let Some(p) = s
            .habitat
            .agent_mut(predator)
            .and_then(|a| a.as_predator_mut())
        {
            p.time_to_sleep = 3;
            p.is_asleep = true;
        }
        let mut rng = ScriptedRandom::new();
        let summary = run_tick(&mut s, &mut rng).unwrap();
        let agent = s.habitat.agent(predator).unwrap();
        assert_eq!(summary.relocations, 0);
        assert_eq!(agent.position(), Position::new(1, 1));
        assert_eq!(agent.turn_parity(), Parity::Even);
        assert!(agent.is_asleep());
    }

    #[test]
    fn seeded_runs_keep_occupancy_and_conserve_population() {
        let mut s = state(10);
        let mut rng = SeededRandom::from_seed(2024);
        crate::spawn::populate(&mut s.habitat, &s.ecosystem, Parity::Even, &mut rng)
            .unwrap();
        let mut before = s.observe_population();
        for _ in 0..60 {
            let summary = run_tick(&mut s, &mut rng).unwrap();
            s.habitat.verify_occupancy().unwrap();
            for species in [Species::Predator, Species::Prey] {
                let expected = i64::from(before.of(species))
                    + i64::try_from(summary.births_of(species)).unwrap()
                    - i64::try_from(summary.deaths_of(species)).unwrap();
                assert_eq!(i64::from(summary.population.of(species)), expected);
            }
            before = summary.population;
            if before.has_extinction() {
                break;
            }
        }
    }

    #[test]
    fn same_seed_same_history() {
        let run = |seed| {
            let mut s = state(10);
            let mut rng = SeededRandom::from_seed(seed);
            crate::spawn::populate(&mut s.habitat, &s.ecosystem, Parity::Even, &mut rng)
                .unwrap();
            for _ in 0..30 {
                run_tick(&mut s, &mut rng).unwrap();
            }
            s.population.history().to_vec()
        };
        assert_eq!(run(99), run(99));
    }
}
