#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Life Composer engine.
//!
//! This crate defines the data model and the message surface that connects
//! adapters, the authoritative world, and pure systems. Adapters submit
//! [`Command`] values describing desired mutations, the world executes those
//! commands via its `apply` entry point, and then broadcasts [`Event`] values
//! that adapters and systems react to. The [`Grid`] and [`Pattern`] containers
//! live here so that the evolution and placement systems can operate on them
//! without depending on the world.

mod grid;
mod pattern;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use grid::Grid;
pub use pattern::{Pattern, PatternId};

/// Canonical banner emitted when a session boots.
pub const WELCOME_BANNER: &str = "Welcome to Life Composer.";

/// Largest edge length accepted when creating a pattern.
pub const MAX_PATTERN_SIZE: u32 = 30;

/// Edge length used by the pattern creator when no valid size is known.
pub const DEFAULT_PATTERN_SIZE: u32 = 5;

/// Number of rows laid out in the main grid when no configuration is given.
pub const DEFAULT_GRID_ROWS: u32 = 50;

/// Number of columns laid out in the main grid when no configuration is given.
pub const DEFAULT_GRID_COLUMNS: u32 = 80;

/// Convenience alias for results produced by the core containers.
pub type Result<T> = std::result::Result<T, LifeError>;

/// Failures reported by grid, pattern, and library operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum LifeError {
    /// A coordinate fell outside the declared dimensions of a grid or pattern.
    #[error("cell ({row}, {column}) is outside the {rows}x{columns} bounds")]
    OutOfBounds {
        /// Requested row index.
        row: u32,
        /// Requested column index.
        column: u32,
        /// Number of rows in the addressed container.
        rows: u32,
        /// Number of columns in the addressed container.
        columns: u32,
    },
    /// A grid or pattern was requested with a zero or otherwise unusable size.
    #[error("dimensions {rows}x{columns} are not valid, both must be positive")]
    InvalidDimension {
        /// Requested number of rows.
        rows: u32,
        /// Requested number of columns.
        columns: u32,
    },
    /// A pattern creation request exceeded the permitted edge length.
    #[error("pattern size {requested} exceeds the limit of {limit}")]
    SizeLimitExceeded {
        /// Edge length that was requested.
        requested: u32,
        /// Largest edge length accepted.
        limit: u32,
    },
    /// A pattern identifier did not name a saved pattern.
    #[error("no saved pattern with index {index}")]
    MissingPattern {
        /// Identifier that failed to resolve.
        index: u32,
    },
}

/// Binary state held by every cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellState {
    /// The cell is empty.
    #[default]
    Dead,
    /// The cell is populated.
    Alive,
}

impl CellState {
    /// Reports whether the cell is populated.
    #[must_use]
    pub const fn is_alive(self) -> bool {
        matches!(self, Self::Alive)
    }

    /// Returns the opposite state.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Dead => Self::Alive,
            Self::Alive => Self::Dead,
        }
    }
}

impl From<bool> for CellState {
    fn from(alive: bool) -> Self {
        if alive {
            Self::Alive
        } else {
            Self::Dead
        }
    }
}

/// Location of a single cell expressed as zero-based row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }
}

/// Dimensions of a grid or pattern measured in whole cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridSize {
    rows: u32,
    columns: u32,
}

impl GridSize {
    /// Creates a new size descriptor with explicit dimensions.
    #[must_use]
    pub const fn new(rows: u32, columns: u32) -> Self {
        Self { rows, columns }
    }

    /// Number of rows.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Reports whether the coordinate lies within these dimensions.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.row < self.rows && cell.column < self.columns
    }

    /// Converts a signed position into a cell coordinate when it lies within bounds.
    #[must_use]
    pub fn checked_cell(&self, row: i64, column: i64) -> Option<CellCoord> {
        let row = u32::try_from(row).ok()?;
        let column = u32::try_from(column).ok()?;
        let cell = CellCoord::new(row, column);
        self.contains(cell).then_some(cell)
    }
}

/// Anchor that maps a pattern's top-left cell onto a target grid.
///
/// Offsets are signed: a pattern may hang off any edge of the grid, in which
/// case the overhanging cells are clipped during placement.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlacementOffset {
    row: i64,
    column: i64,
}

impl PlacementOffset {
    /// Creates a new placement offset.
    #[must_use]
    pub const fn new(row: i64, column: i64) -> Self {
        Self { row, column }
    }

    /// Anchors the pattern's top-left cell on the provided grid cell.
    #[must_use]
    pub const fn at_cell(cell: CellCoord) -> Self {
        Self {
            row: cell.row as i64,
            column: cell.column as i64,
        }
    }

    /// Offset that centres a pattern of the provided size on a grid.
    ///
    /// Both halves are floored, so odd leftovers shift the pattern up and left.
    #[must_use]
    pub const fn centered(grid: GridSize, pattern: GridSize) -> Self {
        Self {
            row: (grid.rows / 2) as i64 - (pattern.rows / 2) as i64,
            column: (grid.columns / 2) as i64 - (pattern.columns / 2) as i64,
        }
    }

    /// Row that receives the pattern's first row.
    #[must_use]
    pub const fn row(&self) -> i64 {
        self.row
    }

    /// Column that receives the pattern's first column.
    #[must_use]
    pub const fn column(&self) -> i64 {
        self.column
    }
}

/// Target cell written by a placement together with the value it receives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct AffectedCell {
    /// Cell of the target grid covered by the pattern.
    pub cell: CellCoord,
    /// Value the pattern carries for that cell.
    pub state: CellState,
}

/// Commands that express all permissible session mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Flips a single cell of the main grid.
    ToggleCell {
        /// Cell targeted by the toggle.
        cell: CellCoord,
    },
    /// Resets every cell of the main grid to dead and rewinds the generation counter.
    ClearGrid,
    /// Replaces the main grid with its next generation.
    StepGeneration,
    /// Opens the pattern creator with a fresh scratch grid.
    OpenPatternCreator,
    /// Changes the pattern creator's edge length and rebuilds its scratch grid.
    ResizePatternCreator {
        /// Requested edge length of the square scratch grid.
        size: u32,
    },
    /// Flips a single cell of the pattern creator's scratch grid.
    TogglePatternCell {
        /// Cell of the scratch grid targeted by the toggle.
        cell: CellCoord,
    },
    /// Snapshots the scratch grid into the pattern library and closes the creator.
    SavePattern,
    /// Closes the pattern creator without saving.
    ClosePatternCreator,
    /// Stamps a saved pattern onto the main grid.
    PlacePattern {
        /// Library entry to stamp.
        pattern: PatternId,
        /// Anchor of the pattern's top-left cell.
        offset: PlacementOffset,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a main grid cell changed state.
    CellToggled {
        /// Cell that was toggled.
        cell: CellCoord,
        /// State of the cell after the toggle.
        state: CellState,
    },
    /// Reports that a toggle request addressed a cell outside the main grid.
    CellToggleRejected {
        /// Cell provided in the request.
        cell: CellCoord,
        /// Specific reason the toggle failed.
        reason: LifeError,
    },
    /// Announces that the main grid was reset.
    GridCleared,
    /// Announces that a new generation replaced the previous one.
    GenerationAdvanced {
        /// Number of generations computed since the last reset.
        generation: u64,
        /// Number of live cells in the new generation.
        population: usize,
    },
    /// Confirms that the pattern creator holds a fresh scratch grid.
    PatternCreatorOpened {
        /// Edge length of the square scratch grid.
        size: u32,
    },
    /// Reports that a pattern creator request was rejected.
    PatternCreatorRejected {
        /// Specific reason the request failed.
        reason: PatternCreatorError,
    },
    /// Confirms that a scratch grid cell changed state.
    PatternCellToggled {
        /// Cell of the scratch grid that was toggled.
        cell: CellCoord,
        /// State of the cell after the toggle.
        state: CellState,
    },
    /// Confirms that a pattern was appended to the library.
    PatternSaved {
        /// Identifier assigned to the pattern.
        pattern: PatternId,
        /// Dimensions of the saved pattern.
        size: GridSize,
    },
    /// Announces that the pattern creator was closed.
    PatternCreatorClosed,
    /// Confirms that a pattern was stamped onto the main grid.
    PatternPlaced {
        /// Library entry that was stamped.
        pattern: PatternId,
        /// Anchor used for the placement.
        offset: PlacementOffset,
        /// Number of grid cells overwritten after clipping.
        written: usize,
    },
    /// Reports that a placement request was rejected.
    PatternPlacementRejected {
        /// Library entry named in the request.
        pattern: PatternId,
        /// Specific reason the placement failed.
        reason: LifeError,
    },
}

/// Reasons the pattern creator may refuse a request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Error)]
pub enum PatternCreatorError {
    /// The request requires an open creator but none is open.
    #[error("the pattern creator is not open")]
    NotOpen,
    /// The request failed grid or size validation.
    #[error(transparent)]
    Invalid(#[from] LifeError),
}
