#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative session state management for Life Composer.
//!
//! A [`World`] is created when a session starts and discarded when it ends.
//! It owns the main grid, the generation counter, the pattern library and
//! the pattern creator. State changes only through [`apply`]; reads go
//! through the [`query`] module.

mod creator;
mod library;

use life_composer_core::{
    Command, Event, Grid, LifeError, PatternCreatorError, Result, DEFAULT_GRID_COLUMNS,
    DEFAULT_GRID_ROWS, DEFAULT_PATTERN_SIZE, WELCOME_BANNER,
};
use life_composer_system_evolution as evolution;
use life_composer_system_placement as placement;
use tracing::{debug, warn};

pub use creator::PatternCreator;
pub use library::PatternLibrary;
pub use placement::PlacementPreview;

/// Dimensions and defaults used to start a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WorldConfig {
    /// Number of rows in the main grid.
    pub rows: u32,
    /// Number of columns in the main grid.
    pub columns: u32,
    /// Edge length the pattern creator starts with.
    pub pattern_size: u32,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_GRID_ROWS,
            columns: DEFAULT_GRID_COLUMNS,
            pattern_size: DEFAULT_PATTERN_SIZE,
        }
    }
}

/// Represents the authoritative Life Composer session state.
#[derive(Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    generation: u64,
    library: PatternLibrary,
    creator: PatternCreator,
}

impl World {
    /// Creates a new session using the default grid dimensions.
    #[must_use]
    pub fn new() -> Self {
        Self::from_grid(
            default_grid(),
            PatternCreator::with_size(DEFAULT_PATTERN_SIZE),
        )
    }

    /// Creates a new session from explicit configuration.
    pub fn with_config(config: WorldConfig) -> Result<Self> {
        let grid = Grid::new(config.rows, config.columns)?;
        Ok(Self::from_grid(
            grid,
            PatternCreator::with_size(config.pattern_size),
        ))
    }

    fn from_grid(grid: Grid, creator: PatternCreator) -> Self {
        Self {
            banner: WELCOME_BANNER,
            grid,
            generation: 0,
            library: PatternLibrary::new(),
            creator,
        }
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new()
    }
}

fn default_grid() -> Grid {
    match Grid::new(DEFAULT_GRID_ROWS, DEFAULT_GRID_COLUMNS) {
        Ok(grid) => grid,
        Err(error) => unreachable!("default grid dimensions are positive: {error}"),
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    debug!(?command, "applying command");
    match command {
        Command::ToggleCell { cell } => match world.grid.toggle(cell) {
            Ok(state) => out_events.push(Event::CellToggled { cell, state }),
            Err(reason) => {
                warn!(%reason, "cell toggle rejected");
                out_events.push(Event::CellToggleRejected { cell, reason });
            }
        },
        Command::ClearGrid => {
            world.grid.clear();
            world.generation = 0;
            out_events.push(Event::GridCleared);
        }
        Command::StepGeneration => {
            world.grid = evolution::step(&world.grid);
            world.generation = world.generation.saturating_add(1);
            out_events.push(Event::GenerationAdvanced {
                generation: world.generation,
                population: world.grid.population(),
            });
        }
        Command::OpenPatternCreator => {
            let opened = world.creator.open(&world.library).map(Grid::rows);
            push_creator_outcome(opened, out_events);
        }
        Command::ResizePatternCreator { size } => {
            let resized = world.creator.resize(size, &world.library).map(Grid::rows);
            push_creator_outcome(resized, out_events);
        }
        Command::TogglePatternCell { cell } => match world.creator.toggle(cell) {
            Some(Ok(state)) => out_events.push(Event::PatternCellToggled { cell, state }),
            Some(Err(error)) => reject_creator(PatternCreatorError::Invalid(error), out_events),
            None => reject_creator(PatternCreatorError::NotOpen, out_events),
        },
        Command::SavePattern => match world.creator.close() {
            Some(scratch) => {
                let pattern = world.library.save(&scratch);
                debug!(pattern = pattern.get(), "pattern saved");
                out_events.push(Event::PatternSaved {
                    pattern,
                    size: scratch.size(),
                });
                out_events.push(Event::PatternCreatorClosed);
            }
            None => reject_creator(PatternCreatorError::NotOpen, out_events),
        },
        Command::ClosePatternCreator => {
            if world.creator.close().is_some() {
                out_events.push(Event::PatternCreatorClosed);
            }
        }
        Command::PlacePattern { pattern, offset } => {
            let placed = world
                .library
                .get(pattern)
                .ok_or(LifeError::MissingPattern {
                    index: pattern.get(),
                })
                .and_then(|stamp| placement::commit(stamp, &mut world.grid, offset));
            match placed {
                Ok(written) => out_events.push(Event::PatternPlaced {
                    pattern,
                    offset,
                    written,
                }),
                Err(reason) => {
                    warn!(%reason, pattern = pattern.get(), "pattern placement rejected");
                    out_events.push(Event::PatternPlacementRejected { pattern, reason });
                }
            }
        }
    }
}

fn push_creator_outcome(outcome: Result<u32>, out_events: &mut Vec<Event>) {
    match outcome {
        Ok(size) => out_events.push(Event::PatternCreatorOpened { size }),
        Err(error) => reject_creator(PatternCreatorError::Invalid(error), out_events),
    }
}

fn reject_creator(reason: PatternCreatorError, out_events: &mut Vec<Event>) {
    warn!(%reason, "pattern creator request rejected");
    out_events.push(Event::PatternCreatorRejected { reason });
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{placement, PatternLibrary, PlacementPreview, World};
    use life_composer_core::{Grid, Pattern, PatternId, PlacementOffset};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the main grid.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Number of generations computed since the session started or was cleared.
    #[must_use]
    pub fn generation(world: &World) -> u64 {
        world.generation
    }

    /// Provides read-only access to the pattern library.
    #[must_use]
    pub fn library(world: &World) -> &PatternLibrary {
        &world.library
    }

    /// Saved patterns in creation order.
    #[must_use]
    pub fn patterns(world: &World) -> &[Pattern] {
        world.library.list()
    }

    /// Resolves a saved pattern by identifier.
    #[must_use]
    pub fn pattern(world: &World, id: PatternId) -> Option<&Pattern> {
        world.library.get(id)
    }

    /// Edge length the pattern creator will use when next opened.
    #[must_use]
    pub fn creator_size(world: &World) -> u32 {
        world.creator.size()
    }

    /// Scratch grid of the pattern creator, if it is open.
    #[must_use]
    pub fn creator_grid(world: &World) -> Option<&Grid> {
        world.creator.scratch()
    }

    /// Describes what placing a saved pattern at `offset` would write.
    ///
    /// Returns `None` when the identifier does not name a saved pattern.
    #[must_use]
    pub fn preview(world: &World, id: PatternId, offset: PlacementOffset) -> Option<PlacementPreview> {
        world
            .library
            .get(id)
            .map(|pattern| placement::preview(pattern, &world.grid, offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_composer_core::{CellCoord, CellState, PatternId, PlacementOffset};

    fn small_world() -> World {
        World::with_config(WorldConfig {
            rows: 6,
            columns: 6,
            pattern_size: 3,
        })
        .expect("valid configuration")
    }

    #[test]
    fn new_world_starts_empty() {
        let world = World::new();
        let grid = query::grid(&world);
        assert_eq!(grid.rows(), DEFAULT_GRID_ROWS);
        assert_eq!(grid.columns(), DEFAULT_GRID_COLUMNS);
        assert_eq!(grid.population(), 0);
        assert_eq!(query::generation(&world), 0);
        assert!(query::patterns(&world).is_empty());
        assert!(query::creator_grid(&world).is_none());
        assert_eq!(query::welcome_banner(&world), WELCOME_BANNER);
    }

    #[test]
    fn zero_sized_configuration_is_rejected() {
        let error = World::with_config(WorldConfig {
            rows: 0,
            ..WorldConfig::default()
        })
        .err();
        assert_eq!(
            error.map(|error| error.to_string()),
            Some(LifeError::InvalidDimension { rows: 0, columns: 80 }.to_string())
        );
    }

    #[test]
    fn toggle_reports_new_state() {
        let mut world = small_world();
        let mut events = Vec::new();
        let cell = CellCoord::new(2, 3);

        apply(&mut world, Command::ToggleCell { cell }, &mut events);

        assert_eq!(
            events,
            vec![Event::CellToggled {
                cell,
                state: CellState::Alive
            }]
        );
        assert_eq!(query::grid(&world).get(cell), Ok(CellState::Alive));
    }

    #[test]
    fn toggle_outside_grid_is_rejected() {
        let mut world = small_world();
        let mut events = Vec::new();
        let cell = CellCoord::new(6, 0);

        apply(&mut world, Command::ToggleCell { cell }, &mut events);

        assert_eq!(
            events,
            vec![Event::CellToggleRejected {
                cell,
                reason: LifeError::OutOfBounds {
                    row: 6,
                    column: 0,
                    rows: 6,
                    columns: 6
                }
            }]
        );
    }

    #[test]
    fn step_advances_generation_counter_and_clear_rewinds_it() {
        let mut world = small_world();
        let mut events = Vec::new();
        for column in 1..4 {
            apply(
                &mut world,
                Command::ToggleCell {
                    cell: CellCoord::new(2, column),
                },
                &mut events,
            );
        }
        events.clear();

        apply(&mut world, Command::StepGeneration, &mut events);
        apply(&mut world, Command::StepGeneration, &mut events);

        assert_eq!(
            events,
            vec![
                Event::GenerationAdvanced {
                    generation: 1,
                    population: 3
                },
                Event::GenerationAdvanced {
                    generation: 2,
                    population: 3
                },
            ]
        );

        events.clear();
        apply(&mut world, Command::ClearGrid, &mut events);
        assert_eq!(events, vec![Event::GridCleared]);
        assert_eq!(query::generation(&world), 0);
        assert_eq!(query::grid(&world).population(), 0);
    }

    #[test]
    fn placing_unknown_pattern_is_rejected() {
        let mut world = small_world();
        let mut events = Vec::new();
        let pattern = PatternId::new(3);

        apply(
            &mut world,
            Command::PlacePattern {
                pattern,
                offset: PlacementOffset::new(0, 0),
            },
            &mut events,
        );

        assert_eq!(
            events,
            vec![Event::PatternPlacementRejected {
                pattern,
                reason: LifeError::MissingPattern { index: 3 }
            }]
        );
        assert!(query::preview(&world, pattern, PlacementOffset::new(0, 0)).is_none());
    }

    #[test]
    fn closing_an_already_closed_creator_is_silent() {
        let mut world = small_world();
        let mut events = Vec::new();
        apply(&mut world, Command::ClosePatternCreator, &mut events);
        assert!(events.is_empty());
    }
}
