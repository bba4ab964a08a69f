#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure generation-advance system implementing Conway's Game of Life.
//!
//! The grid is finite: neighbours beyond an edge are absent rather than
//! wrapped around, so cells on the border see at most five neighbours and
//! corner cells at most three.

use life_composer_core::{CellCoord, CellState, Grid};

/// Relative positions of the eight cells in a Moore neighbourhood.
const NEIGHBOUR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Computes the generation that follows `grid`.
///
/// The input is never mutated; every neighbour count is taken from it, so
/// the result does not depend on the order in which cells are visited.
#[must_use]
pub fn step(grid: &Grid) -> Grid {
    grid.map_cells(|cell, state| next_state(state, count_live_neighbours(grid, cell)))
}

/// Counts the live cells adjacent to `cell`, ignoring positions off the grid.
#[must_use]
pub fn count_live_neighbours(grid: &Grid, cell: CellCoord) -> u8 {
    let row = i64::from(cell.row());
    let column = i64::from(cell.column());
    NEIGHBOUR_OFFSETS
        .iter()
        .filter(|(row_delta, column_delta)| grid.is_live_at(row + row_delta, column + column_delta))
        .count() as u8
}

/// Applies the B3/S23 rule to a single cell.
#[must_use]
pub const fn next_state(current: CellState, live_neighbours: u8) -> CellState {
    match (current, live_neighbours) {
        (CellState::Alive, 2 | 3) => CellState::Alive,
        (CellState::Alive, _) => CellState::Dead,
        (CellState::Dead, 3) => CellState::Alive,
        (CellState::Dead, _) => CellState::Dead,
    }
}

/// Stateless handle over the generation rule for callers that prefer a value.
#[derive(Clone, Copy, Debug, Default)]
pub struct Evolution;

impl Evolution {
    /// Creates a new evolution system.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes the generation that follows `grid`.
    #[must_use]
    pub fn step(&self, grid: &Grid) -> Grid {
        step(grid)
    }

    /// Advances `grid` by `generations` steps.
    #[must_use]
    pub fn advance(&self, grid: &Grid, generations: u64) -> Grid {
        let mut current = grid.clone();
        for _ in 0..generations {
            current = step(&current);
        }
        current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_composer_core::GridSize;

    #[test]
    fn rule_table_matches_conway() {
        for neighbours in 0..=8 {
            let survives = matches!(neighbours, 2 | 3);
            assert_eq!(
                next_state(CellState::Alive, neighbours).is_alive(),
                survives,
                "alive cell with {neighbours} neighbours"
            );
            assert_eq!(
                next_state(CellState::Dead, neighbours).is_alive(),
                neighbours == 3,
                "dead cell with {neighbours} neighbours"
            );
        }
    }

    #[test]
    fn corner_cells_do_not_wrap() {
        let grid = Grid::with_live_cells(
            GridSize::new(4, 4),
            [
                CellCoord::new(3, 3),
                CellCoord::new(3, 0),
                CellCoord::new(0, 3),
            ],
        )
        .expect("valid grid");

        assert_eq!(count_live_neighbours(&grid, CellCoord::new(0, 0)), 0);
        assert_eq!(count_live_neighbours(&grid, CellCoord::new(3, 2)), 1);
    }

    #[test]
    fn centre_cell_counts_all_eight_neighbours() {
        let mut grid = Grid::new(3, 3).expect("valid grid");
        for (cell, _) in Grid::new(3, 3).expect("valid grid").cells() {
            grid.set(cell, CellState::Alive).expect("in bounds");
        }
        assert_eq!(count_live_neighbours(&grid, CellCoord::new(1, 1)), 8);
        assert_eq!(count_live_neighbours(&grid, CellCoord::new(0, 0)), 3);
        assert_eq!(count_live_neighbours(&grid, CellCoord::new(0, 1)), 5);
    }

    #[test]
    fn advance_zero_generations_is_identity() {
        let grid = Grid::with_live_cells(GridSize::new(3, 3), [CellCoord::new(1, 1)])
            .expect("valid grid");
        assert_eq!(Evolution::new().advance(&grid, 0), grid);
    }
}
