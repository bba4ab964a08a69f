//! Immutable cell arrangements that can be stamped onto a grid.

use serde::{Deserialize, Serialize};

use crate::{CellCoord, CellState, Grid, GridSize, LifeError, Result};

/// Rectangular, immutable arrangement of live and dead cells.
///
/// A pattern's dimensions are independent of any grid it is later placed on.
/// Once built, no method mutates its cells.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "PatternRepr", into = "PatternRepr")]
pub struct Pattern {
    height: u32,
    width: u32,
    cells: Vec<CellState>,
}

/// Wire layout of a pattern; checked before it becomes a [`Pattern`].
#[derive(Serialize, Deserialize)]
struct PatternRepr {
    height: u32,
    width: u32,
    cells: Vec<CellState>,
}

impl TryFrom<PatternRepr> for Pattern {
    type Error = LifeError;

    fn try_from(repr: PatternRepr) -> Result<Self> {
        let invalid = LifeError::InvalidDimension {
            rows: repr.height,
            columns: repr.width,
        };
        if repr.height == 0 || repr.width == 0 {
            return Err(invalid);
        }
        let expected = u64::from(repr.height) * u64::from(repr.width);
        if u64::try_from(repr.cells.len()).ok() != Some(expected) {
            return Err(invalid);
        }

        Ok(Self {
            height: repr.height,
            width: repr.width,
            cells: repr.cells,
        })
    }
}

impl From<Pattern> for PatternRepr {
    fn from(pattern: Pattern) -> Self {
        Self {
            height: pattern.height,
            width: pattern.width,
            cells: pattern.cells,
        }
    }
}

impl Pattern {
    /// Snapshots every cell of the provided grid.
    #[must_use]
    pub fn from_grid(grid: &Grid) -> Self {
        Self {
            height: grid.rows(),
            width: grid.columns(),
            cells: grid.cells().map(|(_, state)| state).collect(),
        }
    }

    /// Builds a pattern from rows of cells.
    ///
    /// Every row must hold the same, non-zero number of cells.
    pub fn from_rows(rows: Vec<Vec<CellState>>) -> Result<Self> {
        let height = u32::try_from(rows.len()).unwrap_or(u32::MAX);
        let width = rows
            .first()
            .map_or(0, |row| u32::try_from(row.len()).unwrap_or(u32::MAX));
        let invalid = LifeError::InvalidDimension {
            rows: height,
            columns: width,
        };

        if height == 0 || width == 0 || height == u32::MAX || width == u32::MAX {
            return Err(invalid);
        }
        if rows.iter().any(|row| row.len() != rows[0].len()) {
            return Err(invalid);
        }

        Ok(Self {
            height,
            width,
            cells: rows.into_iter().flatten().collect(),
        })
    }

    /// Number of rows in the pattern.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Number of columns in the pattern.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Dimensions of the pattern.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        GridSize::new(self.height, self.width)
    }

    /// Reads the state of a pattern cell addressed in pattern-local coordinates.
    pub fn get(&self, cell: CellCoord) -> Result<CellState> {
        let out_of_bounds = LifeError::OutOfBounds {
            row: cell.row(),
            column: cell.column(),
            rows: self.height,
            columns: self.width,
        };
        if !self.size().contains(cell) {
            return Err(out_of_bounds);
        }

        let index = u64::from(cell.row()) * u64::from(self.width) + u64::from(cell.column());
        usize::try_from(index)
            .ok()
            .and_then(|index| self.cells.get(index).copied())
            .ok_or(out_of_bounds)
    }

    /// Iterates over every cell in row-major order using pattern-local coordinates.
    pub fn cells(&self) -> impl Iterator<Item = (CellCoord, CellState)> + '_ {
        let width = u64::from(self.width);
        self.cells.iter().enumerate().map(move |(index, state)| {
            let index = index as u64;
            let cell = CellCoord::new((index / width) as u32, (index % width) as u32);
            (cell, *state)
        })
    }

    /// Number of live cells in the pattern.
    #[must_use]
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|state| state.is_alive()).count()
    }
}

/// Position of a pattern within the library, stable for the whole session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatternId(u32);

impl PatternId {
    /// Creates a new pattern identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Human-facing name shown in pattern lists, numbered from one.
    #[must_use]
    pub fn label(&self) -> String {
        format!("Pattern {}", u64::from(self.0) + 1)
    }
}
