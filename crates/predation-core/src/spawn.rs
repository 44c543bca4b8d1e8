//! Initial population placement.
//!
//! Prey are placed first, then predators. Each agent draws a random cell
//! and retries on collision until its species quota is met. After
//! [`MAX_DRAWS_PER_AGENT`] failed draws the first free cell in scan order
//! is used, so placement always terminates when the quotas fit the grid.

use predation_agents::{AgentError, EcosystemConfig, Habitat};
use predation_types::{Parity, PopulationSample, Position, Species};
use predation_world::RandomSource;
use tracing::{debug, info};

/// Random draws attempted for one agent before falling back to a scan.
pub const MAX_DRAWS_PER_AGENT: u32 = 10_000;

/// Errors that can occur during initial placement.
#[derive(Debug, thiserror::Error)]
pub enum SpawnError {
    /// The habitat rejected a placement.
    #[error("agent error: {source}")]
    Agent {
        /// The underlying agent error.
        #[from]
        source: AgentError,
    },

    /// The quotas exceed the free cells.
    #[error("cannot place {requested} agents on {free} free cells")]
    Overcrowded {
        /// Agents requested across both species.
        requested: u64,
        /// Empty cells available.
        free: u64,
    },
}

/// Place the configured initial populations onto `habitat`.
///
/// All agents carry `parity`. Returns the resulting counts.
///
/// # Errors
///
/// Returns [`SpawnError::Overcrowded`] if the quotas do not fit, or
/// [`SpawnError::Agent`] if the habitat rejects a placement.
pub fn populate(
    habitat: &mut Habitat,
    config: &EcosystemConfig,
    parity: Parity,
    rng: &mut dyn RandomSource,
) -> Result<PopulationSample, SpawnError> {
    let requested = u64::from(config.prey.initial_count)
        .saturating_add(u64::from(config.predator.initial_count));
    let cells = u64::try_from(habitat.grid().cell_count()).unwrap_or(u64::MAX);
    let taken = u64::try_from(habitat.grid().occupied_count()).unwrap_or(u64::MAX);
    let free = cells.saturating_sub(taken);
    if requested > free {
        return Err(SpawnError::Overcrowded { requested, free });
    }

    for species in [Species::Prey, Species::Predator] {
        for _ in 0..config.initial_count(species) {
            let position = pick_free_cell(habitat, rng)?;
            let id = habitat.spawn(species, position, parity, config)?;
            debug!(agent = %id, %species, %position, "Agent spawned");
        }
    }

    let counts = habitat.counts();
    info!(
        predators = counts.predators,
        prey = counts.prey,
        dimension = habitat.dimension(),
        "Initial population placed"
    );
    Ok(counts)
}

fn pick_free_cell(
    habitat: &Habitat,
    rng: &mut dyn RandomSource,
) -> Result<Position, SpawnError> {
    let max = habitat.dimension().saturating_sub(1);
    for _ in 0..MAX_DRAWS_PER_AGENT {
        let x = rng.uniform_int(0, max);
        let y = rng.uniform_int(0, max);
        let position = Position::new(x, y);
        if habitat.grid().is_empty(position).map_err(AgentError::from)? {
            return Ok(position);
        }
    }
    habitat
        .grid()
        .positions()
        .find(|&p| habitat.grid().is_empty(p).unwrap_or(false))
        .ok_or(SpawnError::Overcrowded {
            requested: 1,
            free: 0,
        })
}
