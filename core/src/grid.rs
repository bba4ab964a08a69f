//! Dense, bounds-checked cell storage.

use crate::{CellCoord, CellState, GridSize, LifeError, Result};

/// Fixed-size rectangular matrix of cells stored in row-major order.
///
/// The dimensions are chosen at construction and never change. Every
/// coordinate access is checked and reports [`LifeError::OutOfBounds`]
/// instead of clamping.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    rows: u32,
    columns: u32,
    cells: Vec<CellState>,
}

impl Grid {
    /// Creates a grid with every cell dead.
    pub fn new(rows: u32, columns: u32) -> Result<Self> {
        let invalid = LifeError::InvalidDimension { rows, columns };
        if rows == 0 || columns == 0 {
            return Err(invalid);
        }

        let capacity_u64 = u64::from(rows) * u64::from(columns);
        let capacity = usize::try_from(capacity_u64).map_err(|_| invalid)?;
        Ok(Self {
            rows,
            columns,
            cells: vec![CellState::Dead; capacity],
        })
    }

    /// Creates an empty grid matching the provided dimensions.
    pub fn from_size(size: GridSize) -> Result<Self> {
        Self::new(size.rows(), size.columns())
    }

    /// Creates a grid whose listed cells are alive and all others dead.
    pub fn with_live_cells<I>(size: GridSize, live: I) -> Result<Self>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        let mut grid = Self::from_size(size)?;
        for cell in live {
            grid.set(cell, CellState::Alive)?;
        }
        Ok(grid)
    }

    /// Number of rows in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Dimensions of the grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        GridSize::new(self.rows, self.columns)
    }

    /// Reads the state of a cell.
    pub fn get(&self, cell: CellCoord) -> Result<CellState> {
        let index = self.index(cell)?;
        self.cells
            .get(index)
            .copied()
            .ok_or_else(|| self.out_of_bounds(cell))
    }

    /// Overwrites the state of a cell.
    pub fn set(&mut self, cell: CellCoord, state: CellState) -> Result<()> {
        let index = self.index(cell)?;
        let error = self.out_of_bounds(cell);
        let slot = self.cells.get_mut(index).ok_or(error)?;
        *slot = state;
        Ok(())
    }

    /// Flips the state of a cell, returning the state it holds afterwards.
    pub fn toggle(&mut self, cell: CellCoord) -> Result<CellState> {
        let next = self.get(cell)?.toggled();
        self.set(cell, next)?;
        Ok(next)
    }

    /// Derives a new grid of identical dimensions, cell by cell.
    ///
    /// `next` observes this grid only, so every cell of the result is computed
    /// from the same snapshot regardless of iteration order.
    #[must_use]
    pub fn map_cells<F>(&self, mut next: F) -> Self
    where
        F: FnMut(CellCoord, CellState) -> CellState,
    {
        Self {
            rows: self.rows,
            columns: self.columns,
            cells: self.cells().map(|(cell, state)| next(cell, state)).collect(),
        }
    }

    /// Resets every cell to dead while keeping the dimensions.
    pub fn clear(&mut self) {
        self.cells.fill(CellState::Dead);
    }

    /// Reports whether a signed position names a live cell.
    ///
    /// Positions outside the grid are never live; the grid does not wrap.
    #[must_use]
    pub fn is_live_at(&self, row: i64, column: i64) -> bool {
        self.size()
            .checked_cell(row, column)
            .and_then(|cell| self.get(cell).ok())
            .is_some_and(CellState::is_alive)
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, CellState)> + '_ {
        let columns = self.columns;
        self.cells.iter().enumerate().map(move |(index, state)| {
            let index = index as u64;
            let row = (index / u64::from(columns)) as u32;
            let column = (index % u64::from(columns)) as u32;
            (CellCoord::new(row, column), *state)
        })
    }

    /// Iterates over the coordinates of live cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells()
            .filter_map(|(cell, state)| state.is_alive().then_some(cell))
    }

    /// Number of live cells.
    #[must_use]
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|state| state.is_alive()).count()
    }

    fn index(&self, cell: CellCoord) -> Result<usize> {
        if !self.size().contains(cell) {
            return Err(self.out_of_bounds(cell));
        }

        let row = usize::try_from(cell.row()).map_err(|_| self.out_of_bounds(cell))?;
        let column = usize::try_from(cell.column()).map_err(|_| self.out_of_bounds(cell))?;
        let width = usize::try_from(self.columns).map_err(|_| self.out_of_bounds(cell))?;
        Ok(row * width + column)
    }

    fn out_of_bounds(&self, cell: CellCoord) -> LifeError {
        LifeError::OutOfBounds {
            row: cell.row(),
            column: cell.column(),
            rows: self.rows,
            columns: self.columns,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_grid_is_entirely_dead() {
        let grid = Grid::new(3, 4).expect("valid dimensions");
        assert_eq!(grid.size(), GridSize::new(3, 4));
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.cells().count(), 12);
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert_eq!(
            Grid::new(0, 4),
            Err(LifeError::InvalidDimension {
                rows: 0,
                columns: 4
            })
        );
        assert_eq!(
            Grid::new(4, 0),
            Err(LifeError::InvalidDimension {
                rows: 4,
                columns: 0
            })
        );
    }

    #[test]
    fn set_then_get_observes_written_state() {
        let mut grid = Grid::new(2, 3).expect("valid dimensions");
        let cell = CellCoord::new(1, 2);
        grid.set(cell, CellState::Alive).expect("in bounds");
        assert_eq!(grid.get(cell), Ok(CellState::Alive));
        assert_eq!(grid.get(CellCoord::new(0, 2)), Ok(CellState::Dead));
        assert_eq!(grid.live_cells().collect::<Vec<_>>(), vec![cell]);
    }

    #[test]
    fn out_of_bounds_access_fails_fast() {
        let mut grid = Grid::new(2, 3).expect("valid dimensions");
        let expected = LifeError::OutOfBounds {
            row: 2,
            column: 0,
            rows: 2,
            columns: 3,
        };
        assert_eq!(grid.get(CellCoord::new(2, 0)), Err(expected));
        assert_eq!(grid.set(CellCoord::new(2, 0), CellState::Alive), Err(expected));
        assert_eq!(grid.toggle(CellCoord::new(2, 0)), Err(expected));
        assert!(grid.toggle(CellCoord::new(0, 3)).is_err());
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn toggle_flips_only_the_addressed_cell() {
        let mut grid = Grid::new(3, 3).expect("valid dimensions");
        let cell = CellCoord::new(1, 1);
        assert_eq!(grid.toggle(cell), Ok(CellState::Alive));
        assert_eq!(grid.population(), 1);
        assert_eq!(grid.toggle(cell), Ok(CellState::Dead));
        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn clone_is_a_deep_copy() {
        let original = Grid::with_live_cells(GridSize::new(2, 2), [CellCoord::new(0, 0)])
            .expect("valid grid");
        let mut copy = original.clone();
        let _ = copy.toggle(CellCoord::new(1, 1)).expect("in bounds");

        assert_eq!(original.population(), 1);
        assert_eq!(copy.population(), 2);
        assert_eq!(copy.size(), original.size());
    }

    #[test]
    fn signed_lookup_treats_outside_as_dead() {
        let grid = Grid::with_live_cells(GridSize::new(2, 2), [CellCoord::new(0, 0)])
            .expect("valid grid");
        assert!(grid.is_live_at(0, 0));
        assert!(!grid.is_live_at(-1, 0));
        assert!(!grid.is_live_at(0, -1));
        assert!(!grid.is_live_at(2, 0));
    }

    #[test]
    fn clear_keeps_dimensions() {
        let mut grid = Grid::with_live_cells(
            GridSize::new(2, 5),
            [CellCoord::new(0, 4), CellCoord::new(1, 0)],
        )
        .expect("valid grid");
        grid.clear();
        assert_eq!(grid.population(), 0);
        assert_eq!(grid.size(), GridSize::new(2, 5));
    }
}
