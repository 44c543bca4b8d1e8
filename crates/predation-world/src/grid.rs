//! The occupancy grid.
//!
//! The [`Grid`] is a fixed `N x N` array of `Option<AgentId>` stored
//! row-major in a flat vector. It never owns agents, only their handles;
//! the agent arena lives one layer up. Every cell operation is bounds
//! checked and returns [`WorldError::OutOfBounds`] instead of panicking.

use predation_types::{AgentId, Direction, Position};
use serde::{Deserialize, Serialize};

use crate::error::WorldError;

/// A square grid of optional agent handles.
///
/// The side length is fixed at construction for the lifetime of a run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    /// Side length of the grid.
    dimension: u32,
    /// Cells in row-major order: index `x * dimension + y`.
    cells: Vec<Option<AgentId>>,
}

impl Grid {
    /// Create an empty grid with `dimension` cells per side.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidDimension`] if `dimension` is zero or the
    /// cell count does not fit in memory addressing.
    pub fn new(dimension: u32) -> Result<Self, WorldError> {
        let invalid = WorldError::InvalidDimension { dimension };
        if dimension == 0 {
            return Err(invalid);
        }
        let side = usize::try_from(dimension).map_err(|_err| invalid.clone())?;
        let cell_count = side.checked_mul(side).ok_or(invalid)?;
        Ok(Self {
            dimension,
            cells: vec![None; cell_count],
        })
    }

    /// Return the side length.
    pub const fn dimension(&self) -> u32 {
        self.dimension
    }

    /// Return the total number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Whether `position` lies on the grid.
    pub const fn contains(&self, position: Position) -> bool {
        position.x < self.dimension && position.y < self.dimension
    }

    /// Return the in-bounds neighbor of `position` in `direction`, if any.
    pub fn neighbor(&self, position: Position, direction: Direction) -> Option<Position> {
        position.step(direction).filter(|next| self.contains(*next))
    }

    /// Whether the cell holds no agent.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] for an off-grid position.
    pub fn is_empty(&self, position: Position) -> Result<bool, WorldError> {
        Ok(self.occupant(position)?.is_none())
    }

    /// Return the handle stored in the cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] for an off-grid position.
    pub fn occupant(&self, position: Position) -> Result<Option<AgentId>, WorldError> {
        let index = self.index(position)?;
        self.cells
            .get(index)
            .copied()
            .ok_or(WorldError::OutOfBounds {
                position,
                dimension: self.dimension,
            })
    }

    /// Put `agent` into an empty cell.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] for an off-grid position, or
    /// [`WorldError::CellOccupied`] if the cell already holds an agent.
    pub fn place(&mut self, position: Position, agent: AgentId) -> Result<(), WorldError> {
        let slot = self.slot_mut(position)?;
        if let Some(occupant) = *slot {
            return Err(WorldError::CellOccupied { position, occupant });
        }
        *slot = Some(agent);
        Ok(())
    }

    /// Put `agent` into the cell regardless of its current occupant.
    ///
    /// Returns the handle that was displaced, if any. The caller is
    /// responsible for retiring the displaced agent.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] for an off-grid position.
    pub fn replace(
        &mut self,
        position: Position,
        agent: AgentId,
    ) -> Result<Option<AgentId>, WorldError> {
        let slot = self.slot_mut(position)?;
        Ok(slot.replace(agent))
    }

    /// Empty the cell and return whatever it held.
    ///
    /// The previous occupant's identity is not checked.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::OutOfBounds`] for an off-grid position.
    pub fn clear(&mut self, position: Position) -> Result<Option<AgentId>, WorldError> {
        let slot = self.slot_mut(position)?;
        Ok(slot.take())
    }

    /// Iterate over every position in scan order (`x` outer, `y` inner).
    pub fn positions(&self) -> impl Iterator<Item = Position> + use<> {
        let dimension = self.dimension;
        (0..dimension).flat_map(move |x| (0..dimension).map(move |y| Position::new(x, y)))
    }

    /// Iterate over occupied cells in scan order.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, AgentId)> + '_ {
        self.positions()
            .zip(self.cells.iter())
            .filter_map(|(position, cell)| cell.map(|id| (position, id)))
    }

    /// Number of occupied cells.
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_some()).count()
    }

    /// Translate a position into its flat index.
    fn index(&self, position: Position) -> Result<usize, WorldError> {
        let out_of_bounds = WorldError::OutOfBounds {
            position,
            dimension: self.dimension,
        };
        if !self.contains(position) {
            return Err(out_of_bounds);
        }
        let x = usize::try_from(position.x).map_err(|_err| out_of_bounds.clone())?;
        let y = usize::try_from(position.y).map_err(|_err| out_of_bounds.clone())?;
        let side = usize::try_from(self.dimension).map_err(|_err| out_of_bounds.clone())?;
        x.checked_mul(side)
            .and_then(|row| row.checked_add(y))
            .ok_or(out_of_bounds)
    }

    fn slot_mut(&mut self, position: Position) -> Result<&mut Option<AgentId>, WorldError> {
        let index = self.index(position)?;
        let dimension = self.dimension;
        self.cells
            .get_mut(index)
            .ok_or(WorldError::OutOfBounds {
                position,
                dimension,
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn grid() -> Grid {
        Grid::new(10).unwrap()
    }

    #[test]
    fn zero_dimension_is_rejected() {
        assert_eq!(
            Grid::new(0),
            Err(WorldError::InvalidDimension { dimension: 0 })
        );
    }

    #[test]
    fn new_grid_is_empty() {
        let g = grid();
        assert_eq!(g.cell_count(), 100);
        assert_eq!(g.occupied_count(), 0);
        assert!(g.is_empty(Position::new(9, 9)).unwrap());
    }

    #[test]
    fn bounds_are_half_open() {
        let g = grid();
        assert!(g.contains(Position::new(0, 0)));
        assert!(g.contains(Position::new(9, 9)));
        assert!(!g.contains(Position::new(10, 0)));
        assert!(!g.contains(Position::new(0, 10)));
    }

    #[test]
    fn out_of_bounds_operations_fail() {
        let mut g = grid();
        let off = Position::new(10, 3);
        assert!(matches!(g.is_empty(off), Err(WorldError::OutOfBounds { .. })));
        assert!(matches!(g.place(off, AgentId(1)), Err(WorldError::OutOfBounds { .. })));
        assert!(matches!(g.clear(off), Err(WorldError::OutOfBounds { .. })));
        assert!(matches!(g.replace(off, AgentId(1)), Err(WorldError::OutOfBounds { .. })));
    }

    #[test]
    fn place_then_clear() {
        let mut g = grid();
        let p = Position::new(2, 3);
        g.place(p, AgentId(4)).unwrap();
        assert_eq!(g.occupant(p).unwrap(), Some(AgentId(4)));
        assert_eq!(g.clear(p).unwrap(), Some(AgentId(4)));
        assert!(g.is_empty(p).unwrap());
        assert_eq!(g.clear(p).unwrap(), None);
    }

    #[test]
    fn place_onto_occupied_cell_fails() {
        let mut g = grid();
        let p = Position::new(5, 5);
        g.place(p, AgentId(1)).unwrap();
        let err = g.place(p, AgentId(2)).unwrap_err();
        assert_eq!(
            err,
            WorldError::CellOccupied {
                position: p,
                occupant: AgentId(1)
            }
        );
        assert_eq!(g.occupant(p).unwrap(), Some(AgentId(1)));
    }

    #[test]
    fn replace_returns_displaced_handle() {
        let mut g = grid();
        let p = Position::new(1, 1);
        assert_eq!(g.replace(p, AgentId(1)).unwrap(), None);
        assert_eq!(g.replace(p, AgentId(2)).unwrap(), Some(AgentId(1)));
        assert_eq!(g.occupant(p).unwrap(), Some(AgentId(2)));
    }

    #[test]
    fn neighbors_respect_both_edges() {
        let g = grid();
        assert_eq!(g.neighbor(Position::new(0, 0), Direction::West), None);
        assert_eq!(g.neighbor(Position::new(9, 0), Direction::East), None);
        assert_eq!(g.neighbor(Position::new(0, 9), Direction::South), None);
        assert_eq!(
            g.neighbor(Position::new(4, 4), Direction::North),
            Some(Position::new(4, 3))
        );
    }

    #[test]
    fn positions_are_row_major() {
        let g = Grid::new(2).unwrap();
        let order: Vec<Position> = g.positions().collect();
        assert_eq!(
            order,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1),
            ]
        );
    }

    #[test]
    fn occupied_reports_positions() {
        let mut g = Grid::new(3).unwrap();
        g.place(Position::new(2, 1), AgentId(9)).unwrap();
        g.place(Position::new(0, 2), AgentId(3)).unwrap();
        let found: Vec<(Position, AgentId)> = g.occupied().collect();
        assert_eq!(
            found,
            vec![
                (Position::new(0, 2), AgentId(3)),
                (Position::new(2, 1), AgentId(9)),
            ]
        );
    }
}
