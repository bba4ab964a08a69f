#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure builder system that turns pointer input into grid editing commands.
//!
//! The builder owns the caller-side selection workflow: choosing a library
//! entry moves it from [`Selection::Idle`] to [`Selection::PatternSelected`];
//! confirming on a cell commits the pattern there and returns to idle, as
//! does an explicit cancel. While idle, confirming on a cell toggles it.

use life_composer_core::{CellCoord, Command, Event, PatternId, PlacementOffset};

/// Placement workflow state tracked on behalf of the adapter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Selection {
    /// No pattern is armed; clicks edit single cells.
    #[default]
    Idle,
    /// A library entry is armed and follows the cursor as a preview.
    PatternSelected(PatternId),
}

/// Input snapshot distilled from adapter-provided frame input data.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct BuilderInput {
    /// Library entry chosen by the player on this frame.
    pub select_pattern: Option<PatternId>,
    /// Indicates whether the player abandoned the current selection.
    pub cancel_action: bool,
    /// Indicates whether the player clicked the grid on this frame.
    pub confirm_action: bool,
    /// Cell currently under the cursor.
    pub cursor_cell: Option<CellCoord>,
}

/// Builder system that translates selection + input into grid commands.
#[derive(Clone, Debug, Default)]
pub struct Builder {
    selection: Selection,
    library_len: usize,
}

impl Builder {
    /// Creates a new builder system instance.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            selection: Selection::Idle,
            library_len: 0,
        }
    }

    /// Current workflow state.
    #[must_use]
    pub const fn selection(&self) -> Selection {
        self.selection
    }

    /// Consumes world events and adapter-derived input to emit commands.
    ///
    /// Selecting an identifier that the world has not announced through a
    /// `PatternSaved` event is ignored.
    pub fn handle(&mut self, events: &[Event], input: BuilderInput, out: &mut Vec<Command>) {
        for event in events {
            if let Event::PatternSaved { pattern, .. } = event {
                let known = usize::try_from(pattern.get()).map_or(0, |index| index + 1);
                self.library_len = self.library_len.max(known);
            }
        }

        if input.cancel_action {
            self.selection = Selection::Idle;
        }

        if let Some(pattern) = input.select_pattern {
            if self.is_known(pattern) {
                self.selection = Selection::PatternSelected(pattern);
            }
        }

        if !input.confirm_action {
            return;
        }
        let Some(cell) = input.cursor_cell else {
            return;
        };

        match self.selection {
            Selection::Idle => out.push(Command::ToggleCell { cell }),
            Selection::PatternSelected(pattern) => {
                out.push(Command::PlacePattern {
                    pattern,
                    offset: PlacementOffset::at_cell(cell),
                });
                self.selection = Selection::Idle;
            }
        }
    }

    /// Pattern and anchor the adapter should preview under the cursor.
    #[must_use]
    pub fn preview_request(&self, cursor_cell: Option<CellCoord>) -> Option<(PatternId, PlacementOffset)> {
        match (self.selection, cursor_cell) {
            (Selection::PatternSelected(pattern), Some(cell)) => {
                Some((pattern, PlacementOffset::at_cell(cell)))
            }
            _ => None,
        }
    }

    fn is_known(&self, pattern: PatternId) -> bool {
        usize::try_from(pattern.get()).is_ok_and(|index| index < self.library_len)
    }
}
