//! The simulation facade.
//!
//! [`Simulation`] bundles the mutable state with its random source and
//! exposes the read-only views external collaborators (renderers, the run
//! loop, tests) consume: counts, tick number, cell snapshots, and history.

use predation_agents::AgentError;
use predation_types::{CellSnapshot, PopulationSample, Position};
use predation_world::{RandomSource, SeededRandom};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::config::{ConfigError, SimulationConfig};
use crate::spawn::{self, SpawnError};
use crate::tick::{self, SimulationState, TickError, TickSummary};

/// Errors that can occur while setting up a simulation.
#[derive(Debug, thiserror::Error)]
pub enum SetupError {
    /// The configuration is invalid.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: ConfigError,
    },

    /// The habitat could not be built.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },

    /// The initial population could not be placed.
    #[error("spawn error: {source}")]
    Spawn {
        /// The underlying spawn error.
        #[from]
        source: SpawnError,
    },
}

/// Which species outlasted the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// Prey died out while predators remain.
    PredatorsWon,
    /// Predators died out.
    PreyWon,
}

impl core::fmt::Display for Outcome {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::PredatorsWon => write!(f, "Predators Won"),
            Self::PreyWon => write!(f, "Prey Won"),
        }
    }
}

/// A running simulation.
#[derive(Debug)]
pub struct Simulation<R = SeededRandom> {
    /// Clock, habitat, species parameters, and population history.
    state: SimulationState,
    /// Direction shuffles and placement draws.
    rng: R,
}

impl Simulation<SeededRandom> {
    /// Build and populate a simulation seeded from `config.world.seed`.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if the config is invalid or placement fails.
    pub fn new(config: &SimulationConfig) -> Result<Self, SetupError> {
        Self::with_random(config, SeededRandom::new(config.world.seed))
    }
}

impl<R: RandomSource> Simulation<R> {
    /// Build and populate a simulation drawing from `rng`.
    ///
    /// # Errors
    ///
    /// Returns [`SetupError`] if the config is invalid or placement fails.
    pub fn with_random(config: &SimulationConfig, mut rng: R) -> Result<Self, SetupError> {
        config.validate()?;
        let mut state = SimulationState::new(config.world.dimension, config.ecosystem())?;
        let parity = state.clock.parity();
        spawn::populate(&mut state.habitat, &state.ecosystem, parity, &mut rng)?;
        let counts = state.observe_population();
        info!(
            dimension = config.world.dimension,
            seed = ?config.world.seed,
            predators = counts.predators,
            prey = counts.prey,
            "Simulation created"
        );
        Ok(Self { state, rng })
    }

    /// Wrap an existing state, e.g. a hand-built scenario.
    pub fn from_state(mut state: SimulationState, rng: R) -> Self {
        state.observe_population();
        Self { state, rng }
    }

    /// Run one tick.
    ///
    /// # Errors
    ///
    /// Returns [`TickError::GameOver`] if either species is already
    /// extinct, or any error from [`tick::run_tick`].
    pub fn tick(&mut self) -> Result<TickSummary, TickError> {
        let counts = self.population_counts();
        if counts.has_extinction() {
            return Err(TickError::GameOver {
                tick: self.tick_number(),
                predators: counts.predators,
                prey: counts.prey,
            });
        }
        tick::run_tick(&mut self.state, &mut self.rng)
    }

    /// Return the latest population counts.
    pub const fn population_counts(&self) -> PopulationSample {
        self.state.population.latest()
    }

    /// Return the number of ticks run so far.
    pub const fn tick_number(&self) -> u64 {
        self.state.clock.tick()
    }

    /// Return the occupant view at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::World`] if `position` is outside the grid.
    pub fn cell_snapshot(&self, position: Position) -> Result<Option<CellSnapshot>, AgentError> {
        self.state.habitat.snapshot(position)
    }

    /// Return one sample per completed tick, oldest first.
    pub fn population_history(&self) -> &[PopulationSample] {
        self.state.population.history()
    }

    /// Whether either species has died out.
    pub const fn is_game_over(&self) -> bool {
        self.population_counts().has_extinction()
    }

    /// Return the verdict once the game is over.
    pub const fn outcome(&self) -> Option<Outcome> {
        let counts = self.population_counts();
        if counts.predators == 0 {
            Some(Outcome::PreyWon)
        } else if counts.prey == 0 {
            Some(Outcome::PredatorsWon)
        } else {
            None
        }
    }

    /// Return the grid's side length.
    pub const fn dimension(&self) -> u32 {
        self.state.habitat.dimension()
    }

    /// Return the full state.
    pub const fn state(&self) -> &SimulationState {
        &self.state
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use predation_agents::EcosystemConfig;
    use predation_types::Species;
    use predation_world::ScriptedRandom;

    use super::*;

    fn seeded(seed: u64) -> Simulation {
        let mut config = SimulationConfig::default();
        config.world.seed = Some(seed);
        Simulation::new(&config).unwrap()
    }

    #[test]
    fn new_simulation_places_default_populations() {
        let sim = seeded(5);
        assert_eq!(sim.population_counts(), PopulationSample::new(5, 15));
        assert_eq!(sim.tick_number(), 0);
        assert_eq!(sim.dimension(), 10);
        assert!(sim.population_history().is_empty());
        assert!(!sim.is_game_over());
        assert_eq!(sim.outcome(), None);
    }

    #[test]
    fn tick_extends_history() {
        let mut sim = seeded(5);
        sim.tick().unwrap();
        sim.tick().unwrap();
        assert_eq!(sim.tick_number(), 2);
        assert_eq!(sim.population_history().len(), 2);
        assert_eq!(
            sim.population_history().last().copied(),
            Some(sim.population_counts())
        );
    }

    #[test]
    fn cell_snapshot_reports_occupants_and_bounds() {
        let mut state = SimulationState::new(3, EcosystemConfig::default()).unwrap();
        state
            .habitat
            .spawn(
                Species::Predator,
                Position::new(1, 2),
                state.clock.parity(),
                &state.ecosystem,
            )
            .unwrap();
        let sim = Simulation::from_state(state, ScriptedRandom::new());
        let snap = sim.cell_snapshot(Position::new(1, 2)).unwrap().unwrap();
        assert_eq!(snap.species, Species::Predator);
        assert_eq!(snap.age, 0);
        assert!(!snap.is_asleep);
        assert_eq!(sim.cell_snapshot(Position::new(0, 0)).unwrap(), None);
        assert!(sim.cell_snapshot(Position::new(3, 0)).is_err());
    }

    #[test]
    fn extinct_simulation_refuses_to_tick() {
        let state = SimulationState::new(3, EcosystemConfig::default()).unwrap();
        let mut sim = Simulation::from_state(state, ScriptedRandom::new());
        assert!(sim.is_game_over());
        assert_eq!(sim.outcome(), Some(Outcome::PreyWon));
        assert!(matches!(
            sim.tick(),
            Err(TickError::GameOver {
                tick: 0,
                predators: 0,
                prey: 0
            })
        ));
        assert_eq!(sim.tick_number(), 0);
    }

    #[test]
    fn predators_win_when_prey_are_gone() {
        let mut state = SimulationState::new(3, EcosystemConfig::default()).unwrap();
        state
            .habitat
            .spawn(
                Species::Predator,
                Position::new(0, 0),
                state.clock.parity(),
                &state.ecosystem,
            )
            .unwrap();
        let sim = Simulation::from_state(state, ScriptedRandom::new());
        assert_eq!(sim.outcome(), Some(Outcome::PredatorsWon));
        assert_eq!(Outcome::PredatorsWon.to_string(), "Predators Won");
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = SimulationConfig::default();
        config.world.dimension = 2;
        assert!(matches!(
            Simulation::new(&config),
            Err(SetupError::Config { .. })
        ));
    }
}
