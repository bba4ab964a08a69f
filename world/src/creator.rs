//! Scratch editor used to draw new patterns.

use life_composer_core::{CellCoord, CellState, Grid, Result, DEFAULT_PATTERN_SIZE, MAX_PATTERN_SIZE};

use crate::library::{validate_size, PatternLibrary};

/// Editor state for drawing a pattern before it is saved.
///
/// The creator remembers the last requested edge length between openings
/// and holds a scratch grid only while open.
#[derive(Clone, Debug)]
pub struct PatternCreator {
    size: u32,
    scratch: Option<Grid>,
}

impl Default for PatternCreator {
    fn default() -> Self {
        Self::with_size(DEFAULT_PATTERN_SIZE)
    }
}

impl PatternCreator {
    /// Creates a closed creator remembering `size` as its edge length.
    ///
    /// The size is not validated here; a stale value above the limit is
    /// reset when the creator is next opened.
    #[must_use]
    pub const fn with_size(size: u32) -> Self {
        Self {
            size,
            scratch: None,
        }
    }

    /// Edge length that the next scratch grid will use.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Scratch grid being edited, if the creator is open.
    #[must_use]
    pub fn scratch(&self) -> Option<&Grid> {
        self.scratch.as_ref()
    }

    /// Reports whether a scratch grid is being edited.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        self.scratch.is_some()
    }

    /// Opens the creator with a fresh, all-dead scratch grid.
    ///
    /// A remembered size above [`MAX_PATTERN_SIZE`] is reset to
    /// [`DEFAULT_PATTERN_SIZE`] first. This is the only place a size is
    /// corrected instead of rejected; explicit resizes go through
    /// [`PatternCreator::resize`].
    pub fn open(&mut self, library: &PatternLibrary) -> Result<&Grid> {
        if self.size > MAX_PATTERN_SIZE {
            self.size = DEFAULT_PATTERN_SIZE;
        }
        let scratch = library.create(self.size)?;
        let scratch: &Grid = self.scratch.insert(scratch);
        Ok(scratch)
    }

    /// Changes the edge length and reopens the creator with a fresh scratch grid.
    ///
    /// Invalid sizes are rejected and leave both the remembered size and any
    /// open scratch grid unchanged.
    pub fn resize(&mut self, size: u32, library: &PatternLibrary) -> Result<&Grid> {
        validate_size(size)?;
        self.size = size;
        self.open(library)
    }

    /// Flips a scratch cell, returning its new state.
    ///
    /// Returns `None` when the creator is closed.
    pub fn toggle(&mut self, cell: CellCoord) -> Option<Result<CellState>> {
        self.scratch.as_mut().map(|scratch| scratch.toggle(cell))
    }

    /// Closes the creator, handing back the scratch grid if one was open.
    pub fn close(&mut self) -> Option<Grid> {
        self.scratch.take()
    }
}
