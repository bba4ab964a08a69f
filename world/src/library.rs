//! Session-scoped pattern storage.

use life_composer_core::{
    Grid, LifeError, Pattern, PatternId, Result, MAX_PATTERN_SIZE,
};

/// Ordered, append-only collection of saved patterns.
///
/// Patterns keep their insertion position for the whole session, so a
/// [`PatternId`] handed out by [`PatternLibrary::save`] always resolves to
/// the same pattern. Duplicates are kept.
#[derive(Clone, Debug, Default)]
pub struct PatternLibrary {
    patterns: Vec<Pattern>,
}

impl PatternLibrary {
    /// Creates an empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an editable, all-dead scratch grid of `size × size` cells.
    ///
    /// Sizes above [`MAX_PATTERN_SIZE`] are rejected rather than clamped.
    pub fn create(&self, size: u32) -> Result<Grid> {
        validate_size(size)?;
        Grid::new(size, size)
    }

    /// Snapshots the scratch grid and appends it to the library.
    pub fn save(&mut self, scratch: &Grid) -> PatternId {
        let id = PatternId::new(u32::try_from(self.patterns.len()).unwrap_or(u32::MAX));
        self.patterns.push(Pattern::from_grid(scratch));
        id
    }

    /// Saved patterns in creation order.
    #[must_use]
    pub fn list(&self) -> &[Pattern] {
        &self.patterns
    }

    /// Resolves a pattern by identifier.
    #[must_use]
    pub fn get(&self, id: PatternId) -> Option<&Pattern> {
        usize::try_from(id.get())
            .ok()
            .and_then(|index| self.patterns.get(index))
    }

    /// Number of saved patterns.
    #[must_use]
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// Reports whether no pattern was saved yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Identifiers of every saved pattern in creation order.
    pub fn ids(&self) -> impl Iterator<Item = PatternId> + '_ {
        (0..self.patterns.len()).map(|index| PatternId::new(index as u32))
    }
}

/// Checks a requested pattern edge length against the accepted range.
pub(crate) fn validate_size(size: u32) -> Result<()> {
    if size == 0 {
        return Err(LifeError::InvalidDimension {
            rows: size,
            columns: size,
        });
    }
    if size > MAX_PATTERN_SIZE {
        return Err(LifeError::SizeLimitExceeded {
            requested: size,
            limit: MAX_PATTERN_SIZE,
        });
    }
    Ok(())
}
