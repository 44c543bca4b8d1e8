//! The habitat: grid plus agent arena.
//!
//! The [`Habitat`] is the sole owner of every living agent. Agents live in a
//! `BTreeMap<AgentId, Agent>` arena; the [`Grid`] holds only handles. Every
//! mutation here updates both sides together, so an agent is in the arena
//! exactly while one cell references it and its stored position names that
//! cell.

use std::collections::BTreeMap;

use predation_types::{AgentId, CellSnapshot, Parity, PopulationSample, Position, Species};
use predation_world::Grid;
use tracing::trace;

use crate::agent::Agent;
use crate::config::EcosystemConfig;
use crate::error::AgentError;

/// Grid, arena, and id counter for one run.
#[derive(Debug, Clone)]
pub struct Habitat {
    /// Cell occupancy by handle.
    grid: Grid,
    /// Every living agent, keyed by handle.
    agents: BTreeMap<AgentId, Agent>,
    /// The most recently allocated handle (0 before the first spawn).
    last_id: AgentId,
}

impl Habitat {
    /// Create an empty habitat with `dimension` cells per side.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::World`] if the grid cannot be built.
    pub fn new(dimension: u32) -> Result<Self, AgentError> {
        Ok(Self {
            grid: Grid::new(dimension)?,
            agents: BTreeMap::new(),
            last_id: AgentId(0),
        })
    }

    /// Return the occupancy grid.
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Return the grid's side length.
    pub const fn dimension(&self) -> u32 {
        self.grid.dimension()
    }

    /// Number of living agents.
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no agent is alive.
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Look up an agent by handle.
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(&id)
    }

    /// Look up an agent mutably by handle.
    ///
    /// Position changes must go through [`Habitat::relocate`].
    pub fn agent_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(&id)
    }

    /// Iterate over living agents in handle order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> {
        self.agents.values()
    }

    /// Return the handle stored at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::World`] for an off-grid position.
    pub fn occupant(&self, position: Position) -> Result<Option<AgentId>, AgentError> {
        Ok(self.grid.occupant(position)?)
    }

    /// Return the agent at `position`.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::World`] for an off-grid position, or
    /// [`AgentError::AgentNotFound`] if the cell names a retired handle.
    pub fn agent_at(&self, position: Position) -> Result<Option<&Agent>, AgentError> {
        match self.grid.occupant(position)? {
            Some(id) => self
                .agents
                .get(&id)
                .map(Some)
                .ok_or(AgentError::AgentNotFound(id)),
            None => Ok(None),
        }
    }

    /// Return the species at `position`, if occupied.
    ///
    /// # Errors
    ///
    /// Same as [`Habitat::agent_at`].
    pub fn species_at(&self, position: Position) -> Result<Option<Species>, AgentError> {
        Ok(self.agent_at(position)?.map(Agent::species))
    }

    /// Return the render snapshot for `position`.
    ///
    /// # Errors
    ///
    /// Same as [`Habitat::agent_at`].
    pub fn snapshot(&self, position: Position) -> Result<Option<CellSnapshot>, AgentError> {
        Ok(self.agent_at(position)?.map(Agent::snapshot))
    }

    /// Create a new agent in an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::World`] if the cell is off-grid or occupied, or
    /// [`AgentError::ArithmeticOverflow`] if handles are exhausted.
    pub fn spawn(
        &mut self,
        species: Species,
        position: Position,
        turn_parity: Parity,
        config: &EcosystemConfig,
    ) -> Result<AgentId, AgentError> {
        if let Some(occupant) = self.grid.occupant(position)? {
            return Err(predation_world::WorldError::CellOccupied { position, occupant }.into());
        }
        let id = self.allocate_id()?;
        self.grid.place(position, id)?;
        self.agents
            .insert(id, Agent::new(species, id, position, turn_parity, config));
        trace!(%id, %species, %position, "Agent spawned");
        Ok(id)
    }

    /// Create a new agent, retiring whatever occupied the cell.
    ///
    /// This is the only sanctioned overwrite path. The displaced agent (if
    /// any) is returned already removed from the arena.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::World`] for an off-grid position, or
    /// [`AgentError::ArithmeticOverflow`] if handles are exhausted.
    pub fn spawn_overwriting(
        &mut self,
        species: Species,
        position: Position,
        turn_parity: Parity,
        config: &EcosystemConfig,
    ) -> Result<(AgentId, Option<Agent>), AgentError> {
        if !self.grid.contains(position) {
            return Err(predation_world::WorldError::OutOfBounds {
                position,
                dimension: self.dimension(),
            }
            .into());
        }
        let id = self.allocate_id()?;
        let displaced = self
            .grid
            .replace(position, id)?
            .and_then(|old| self.agents.remove(&old));
        self.agents
            .insert(id, Agent::new(species, id, position, turn_parity, config));
        trace!(%id, %species, %position, displaced = displaced.is_some(), "Agent spawned over occupant");
        Ok((id, displaced))
    }

    /// Remove the agent at `position` from both the grid and the arena.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::World`] for an off-grid position.
    pub fn remove_at(&mut self, position: Position) -> Result<Option<Agent>, AgentError> {
        Ok(self
            .grid
            .clear(position)?
            .and_then(|id| self.agents.remove(&id)))
    }

    /// Move an agent into an empty cell. Returns the cell it left.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError::AgentNotFound`] for an unknown handle, or
    /// [`AgentError::World`] if the target is off-grid or occupied.
    pub fn relocate(&mut self, id: AgentId, to: Position) -> Result<Position, AgentError> {
        let from = self
            .agents
            .get(&id)
            .map(Agent::position)
            .ok_or(AgentError::AgentNotFound(id))?;
        self.grid.place(to, id)?;
        self.grid.clear(from)?;
        if let Some(agent) = self.agents.get_mut(&id) {
            agent.core_mut().position = to;
        }
        Ok(from)
    }

    /// Count living agents by scanning the grid.
    pub fn counts(&self) -> PopulationSample {
        let mut sample = PopulationSample::default();
        for (_, id) in self.grid.occupied() {
            match self.agents.get(&id).map(Agent::species) {
                Some(Species::Predator) => {
                    sample.predators = sample.predators.saturating_add(1);
                }
                Some(Species::Prey) => sample.prey = sample.prey.saturating_add(1),
                None => {}
            }
        }
        sample
    }

    /// Check that the grid and the arena agree.
    ///
    /// Every occupied cell must name a living agent whose stored position is
    /// that cell, and every living agent must be referenced by some cell.
    /// Since a cell holds one handle and positions are unique per agent,
    /// this also proves no two agents share a cell.
    ///
    /// # Errors
    ///
    /// Returns the first inconsistency found.
    pub fn verify_occupancy(&self) -> Result<(), AgentError> {
        let mut referenced = 0_usize;
        for (cell, id) in self.grid.occupied() {
            let agent = self.agents.get(&id).ok_or(AgentError::AgentNotFound(id))?;
            let stored = agent.position();
            if stored != cell {
                return Err(AgentError::PositionMismatch {
                    agent: id,
                    stored,
                    cell,
                });
            }
            referenced = referenced.saturating_add(1);
        }
        if referenced != self.agents.len() {
            let detached = self
                .agents
                .values()
                .find(|a| self.grid.occupant(a.position()).ok().flatten() != Some(a.id()))
                .map_or(self.last_id, Agent::id);
            return Err(AgentError::Detached(detached));
        }
        Ok(())
    }

    fn allocate_id(&mut self) -> Result<AgentId, AgentError> {
        let id = self.last_id.next().ok_or_else(|| AgentError::ArithmeticOverflow {
            context: String::from("agent id counter overflow"),
        })?;
        self.last_id = id;
        Ok(id)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use predation_world::WorldError;

    fn habitat() -> Habitat {
        Habitat::new(5).unwrap()
    }

    fn spawn(h: &mut Habitat, species: Species, x: u32, y: u32) -> AgentId {
        h.spawn(species, Position::new(x, y), Parity::Even, &EcosystemConfig::default())
            .unwrap()
    }

    #[test]
    fn ids_are_monotonic_from_one() {
        let mut h = habitat();
        let a = spawn(&mut h, Species::Prey, 0, 0);
        let b = spawn(&mut h, Species::Predator, 0, 1);
        assert_eq!(a, AgentId(1));
        assert_eq!(b, AgentId(2));
        h.remove_at(Position::new(0, 0)).unwrap();
        let c = spawn(&mut h, Species::Prey, 0, 0);
        assert_eq!(c, AgentId(3));
    }

    #[test]
    fn spawn_onto_occupied_cell_fails() {
        let mut h = habitat();
        spawn(&mut h, Species::Prey, 1, 1);
        let err = h
            .spawn(
                Species::Predator,
                Position::new(1, 1),
                Parity::Even,
                &EcosystemConfig::default(),
            )
            .unwrap_err();
        assert!(matches!(
            err,
            AgentError::World {
                source: WorldError::CellOccupied { .. }
            }
        ));
        assert_eq!(h.len(), 1);
    }

    #[test]
    fn overwrite_retires_the_occupant() {
        let mut h = habitat();
        let prey = spawn(&mut h, Species::Prey, 2, 2);
        let (child, displaced) = h
            .spawn_overwriting(
                Species::Predator,
                Position::new(2, 2),
                Parity::Odd,
                &EcosystemConfig::default(),
            )
            .unwrap();
        assert_eq!(displaced.map(|a| a.id()), Some(prey));
        assert!(h.agent(prey).is_none());
        assert_eq!(h.occupant(Position::new(2, 2)).unwrap(), Some(child));
        assert_eq!(h.agent(child).map(Agent::turn_parity), Some(Parity::Odd));
        h.verify_occupancy().unwrap();
    }

    #[test]
    fn relocate_moves_both_sides() {
        let mut h = habitat();
        let id = spawn(&mut h, Species::Prey, 0, 0);
        let from = h.relocate(id, Position::new(0, 1)).unwrap();
        assert_eq!(from, Position::new(0, 0));
        assert!(h.grid().is_empty(Position::new(0, 0)).unwrap());
        assert_eq!(h.occupant(Position::new(0, 1)).unwrap(), Some(id));
        assert_eq!(h.agent(id).map(Agent::position), Some(Position::new(0, 1)));
        h.verify_occupancy().unwrap();
    }

    #[test]
    fn relocate_into_occupied_cell_changes_nothing() {
        let mut h = habitat();
        let a = spawn(&mut h, Species::Prey, 0, 0);
        let b = spawn(&mut h, Species::Prey, 0, 1);
        assert!(h.relocate(a, Position::new(0, 1)).is_err());
        assert_eq!(h.occupant(Position::new(0, 0)).unwrap(), Some(a));
        assert_eq!(h.occupant(Position::new(0, 1)).unwrap(), Some(b));
    }

    #[test]
    fn counts_scan_by_species() {
        let mut h = habitat();
        spawn(&mut h, Species::Prey, 0, 0);
        spawn(&mut h, Species::Prey, 4, 4);
        spawn(&mut h, Species::Predator, 2, 3);
        assert_eq!(h.counts(), PopulationSample::new(1, 2));
    }

    #[test]
    fn agent_at_off_grid_is_an_error() {
        let h = habitat();
        assert!(h.agent_at(Position::new(5, 0)).is_err());
        assert!(h.agent_at(Position::new(4, 4)).unwrap().is_none());
    }
}
