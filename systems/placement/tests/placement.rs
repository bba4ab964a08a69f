use life_composer_core::{CellCoord, CellState, Grid, GridSize, Pattern, PlacementOffset};
use life_composer_system_placement::{affected_cells, commit, preview};

fn pattern(rows: &[&str]) -> Pattern {
    Pattern::from_rows(
        rows.iter()
            .map(|row| row.chars().map(|c| CellState::from(c == 'O')).collect())
            .collect(),
    )
    .expect("rectangular rows")
}

fn filled(rows: u32, columns: u32) -> Grid {
    let empty = Grid::new(rows, columns).expect("valid grid");
    Grid::with_live_cells(GridSize::new(rows, columns), empty.cells().map(|(cell, _)| cell))
        .expect("valid grid")
}

#[test]
fn commit_overwrites_live_cells_with_dead_ones() {
    let mut grid = filled(4, 4);
    let stamp = pattern(&["O.", ".O"]);

    let written = commit(&stamp, &mut grid, PlacementOffset::new(1, 1)).expect("commit");

    assert_eq!(written, 4);
    assert_eq!(grid.get(CellCoord::new(1, 2)), Ok(CellState::Dead));
    assert_eq!(grid.get(CellCoord::new(2, 1)), Ok(CellState::Dead));
    assert_eq!(grid.get(CellCoord::new(1, 1)), Ok(CellState::Alive));
    assert_eq!(grid.population(), 14, "cells outside the footprint keep their state");
}

#[test]
fn preview_after_commit_matches_the_written_footprint() {
    let mut grid = Grid::with_live_cells(GridSize::new(6, 6), [CellCoord::new(0, 0)])
        .expect("valid grid");
    let stamp = pattern(&[".O.", "..O", "OOO"]);
    let offset = PlacementOffset::new(4, 4);
    let before = grid.clone();

    let written = commit(&stamp, &mut grid, offset).expect("commit");
    let shown = preview(&stamp, &grid, offset);

    assert_eq!(shown.cells().len(), written);
    for affected in shown.cells() {
        assert_eq!(grid.get(affected.cell), Ok(affected.state));
    }
    for (cell, state) in before.cells() {
        let covered = shown.cells().iter().any(|affected| affected.cell == cell);
        if !covered {
            assert_eq!(grid.get(cell), Ok(state), "cell {cell:?} outside the footprint changed");
        }
    }
}

#[test]
fn footprint_entirely_outside_changes_nothing() {
    let mut grid = Grid::with_live_cells(GridSize::new(5, 5), [CellCoord::new(2, 2)])
        .expect("valid grid");
    let stamp = pattern(&["OO", "OO"]);
    let before = grid.clone();

    for offset in [
        PlacementOffset::new(-2, 0),
        PlacementOffset::new(0, -2),
        PlacementOffset::new(5, 0),
        PlacementOffset::new(0, 5),
        PlacementOffset::new(-10, 20),
    ] {
        assert_eq!(affected_cells(&stamp, grid.size(), offset).count(), 0);
        assert!(preview(&stamp, &grid, offset).is_empty());
        assert_eq!(commit(&stamp, &mut grid, offset), Ok(0));
        assert_eq!(grid, before);
    }
}

#[test]
fn pattern_larger_than_grid_is_clipped_on_every_side() {
    let mut grid = Grid::new(2, 2).expect("valid grid");
    let stamp = pattern(&["....", ".OO.", ".OO.", "...."]);

    let written = commit(&stamp, &mut grid, PlacementOffset::new(-1, -1)).expect("commit");

    assert_eq!(written, 4);
    assert_eq!(grid.population(), 4);
}

#[test]
fn preview_is_repeatable_and_read_only() {
    let grid = Grid::new(5, 5).expect("valid grid");
    let stamp = pattern(&["OOO"]);
    let offset = PlacementOffset::new(2, 1);

    let first = preview(&stamp, &grid, offset);
    let second = preview(&stamp, &grid, offset);

    assert_eq!(first, second);
    assert_eq!(grid.population(), 0);
}
