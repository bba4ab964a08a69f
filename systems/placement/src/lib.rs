#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure placement system that maps pattern cells onto a target grid.
//!
//! Placement anchors a pattern's top-left cell at a signed offset. Pattern
//! cells whose target falls outside the grid are clipped silently; this is
//! distinct from direct grid access, which fails with an out-of-bounds error.
//! Both the non-destructive [`preview`] and the destructive [`commit`] are
//! driven by the same [`affected_cells`] sequence, so a preview always shows
//! exactly the cells a commit with the same arguments would write.

use life_composer_core::{AffectedCell, CellCoord, Grid, GridSize, Pattern, PlacementOffset, Result};

/// Lazily yields the in-bounds target cells covered by `pattern`.
///
/// Cells are produced in the pattern's row-major order. Dead pattern cells
/// are included, because placement overwrites rather than merges.
pub fn affected_cells(
    pattern: &Pattern,
    bounds: GridSize,
    offset: PlacementOffset,
) -> impl Iterator<Item = AffectedCell> + '_ {
    pattern.cells().filter_map(move |(source, state)| {
        target_cell(bounds, offset, source).map(|cell| AffectedCell { cell, state })
    })
}

fn target_cell(bounds: GridSize, offset: PlacementOffset, source: CellCoord) -> Option<CellCoord> {
    let row = offset.row().checked_add(i64::from(source.row()))?;
    let column = offset.column().checked_add(i64::from(source.column()))?;
    bounds.checked_cell(row, column)
}

/// Read-only description of what a placement would write.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlacementPreview {
    offset: PlacementOffset,
    cells: Vec<AffectedCell>,
}

impl PlacementPreview {
    /// Anchor the preview was computed for.
    #[must_use]
    pub const fn offset(&self) -> PlacementOffset {
        self.offset
    }

    /// Every target cell the placement would overwrite.
    #[must_use]
    pub fn cells(&self) -> &[AffectedCell] {
        &self.cells
    }

    /// Target cells that the placement would make alive, for overlays.
    pub fn live_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells
            .iter()
            .filter(|affected| affected.state.is_alive())
            .map(|affected| affected.cell)
    }

    /// Reports whether the whole footprint was clipped away.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Describes the cells a placement would write without touching `grid`.
#[must_use]
pub fn preview(pattern: &Pattern, grid: &Grid, offset: PlacementOffset) -> PlacementPreview {
    PlacementPreview {
        offset,
        cells: affected_cells(pattern, grid.size(), offset).collect(),
    }
}

/// Overwrites the covered cells of `grid` with the pattern's values.
///
/// Returns the number of cells written after clipping. Cells outside the
/// pattern's footprint are left untouched.
pub fn commit(pattern: &Pattern, grid: &mut Grid, offset: PlacementOffset) -> Result<usize> {
    let mut written = 0;
    for affected in affected_cells(pattern, grid.size(), offset) {
        grid.set(affected.cell, affected.state)?;
        written += 1;
    }
    Ok(written)
}
