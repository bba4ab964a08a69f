#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that drives a Life Composer session.
//!
//! The adapter plays the roles the engine leaves to its callers: it seeds the
//! grid, draws patterns through the pattern creator, previews and places them
//! through the builder system, schedules generations through the playback
//! system, and prints frames through the text rendering backend.

mod config;
mod pattern_text;

use std::{io, path::PathBuf, str::FromStr};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use life_composer_core::{CellCoord, Command, Event, Pattern, PatternId, PlacementOffset};
use life_composer_rendering::{RenderingBackend, Scene, TextBackend};
use life_composer_system_builder::{Builder, BuilderInput};
use life_composer_system_playback::{Playback, PlaybackInput};
use life_composer_world::{self as world, query, World};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use self::config::SessionConfig;

/// Runs a Conway's Game of Life session with user-drawn patterns.
#[derive(Debug, Parser)]
#[command(
    name = "life-composer",
    about = "Conway's Game of Life with pattern composition",
    version
)]
struct Args {
    /// TOML session file providing canvas, resolution, and grid settings.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Number of grid rows; overrides the session file.
    #[arg(long)]
    rows: Option<u32>,
    /// Number of grid columns; overrides the session file.
    #[arg(long)]
    columns: Option<u32>,
    /// Pattern in plain-text notation, e.g. `.O./..O/OOO`. Repeatable.
    ///
    /// The pattern creator is square, so a pattern is saved padded with dead
    /// cells to its longer side and placing it overwrites that whole square.
    #[arg(long = "pattern", value_name = "ROWS")]
    patterns: Vec<String>,
    /// Top-left anchor for the pattern with the same position, as
    /// `ROW,COLUMN`. Anchors may be negative or lie past the grid edge.
    /// Patterns without an anchor are centred.
    #[arg(long = "place", value_name = "ROW,COLUMN", allow_hyphen_values = true)]
    places: Vec<AnchorArg>,
    /// Seed for filling the grid with random live cells.
    #[arg(long)]
    seed: Option<u64>,
    /// Fraction of cells made alive by `--seed`.
    #[arg(long, default_value_t = 0.25)]
    density: f64,
    /// Number of generations to run.
    #[arg(long, default_value_t = 10)]
    generations: u64,
    /// Print every generation instead of only the first and last.
    #[arg(long)]
    show_all: bool,
}

/// Placement anchor parsed from `ROW,COLUMN`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AnchorArg(PlacementOffset);

impl FromStr for AnchorArg {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        let (row, column) = value
            .split_once(',')
            .ok_or_else(|| format!("expected ROW,COLUMN but got '{value}'"))?;
        let row = row
            .trim()
            .parse::<i64>()
            .map_err(|error| format!("invalid row '{row}': {error}"))?;
        let column = column
            .trim()
            .parse::<i64>()
            .map_err(|error| format!("invalid column '{column}': {error}"))?;
        Ok(Self(PlacementOffset::new(row, column)))
    }
}

/// Entry point for the Life Composer command-line interface.
fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let stdout = io::stdout();
    let mut backend = TextBackend::new(stdout.lock());
    run(args, &mut backend)
}

fn run<B: RenderingBackend>(args: Args, backend: &mut B) -> Result<()> {
    if !(0.0..=1.0).contains(&args.density) {
        bail!("density must lie between 0 and 1 (received {})", args.density);
    }
    if args.places.len() > args.patterns.len() {
        bail!(
            "received {} --place anchors for {} patterns",
            args.places.len(),
            args.patterns.len()
        );
    }

    let file = match &args.config {
        Some(path) => SessionConfig::load(path)?,
        None => SessionConfig::default(),
    };
    let flags = SessionConfig {
        rows: args.rows,
        columns: args.columns,
        ..SessionConfig::default()
    };
    let world_config = file.merged_with(flags).world_config()?;
    let mut world =
        World::with_config(world_config).context("failed to create the session world")?;
    info!(
        rows = world_config.rows,
        columns = world_config.columns,
        "{}",
        query::welcome_banner(&world)
    );

    if let Some(seed) = args.seed {
        seed_randomly(&mut world, seed, args.density)?;
    }

    let mut builder = Builder::new();
    for (index, text) in args.patterns.iter().enumerate() {
        let pattern = pattern_text::parse_pattern(text)
            .with_context(|| format!("failed to parse pattern {}", index + 1))?;
        let saved = save_pattern(&mut world, &pattern)?;
        match args.places.get(index) {
            Some(AnchorArg(offset)) => place_at(&mut world, &mut builder, &saved, *offset, backend)?,
            None => {
                let id = saved_pattern(&saved)?;
                let offset = PlacementOffset::centered(query::grid(&world).size(), pattern.size());
                let _ = apply_all(
                    &mut world,
                    [Command::PlacePattern {
                        pattern: id,
                        offset,
                    }],
                )?;
            }
        }
    }

    render(&world, None, backend)?;
    let mut playback = Playback::new();
    let mut events = Vec::new();
    for frame in 0..args.generations {
        let mut commands = Vec::new();
        playback.handle(
            &events,
            PlaybackInput {
                toggle_running: frame == 0,
                ..PlaybackInput::default()
            },
            &mut commands,
        );
        events = apply_all(&mut world, commands)?;
        if args.show_all || frame + 1 == args.generations {
            render(&world, None, backend)?;
        }
    }

    info!(
        generation = query::generation(&world),
        population = query::grid(&world).population(),
        "session finished"
    );
    Ok(())
}

fn seed_randomly(world: &mut World, seed: u64, density: f64) -> Result<()> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let cells: Vec<CellCoord> = query::grid(world).cells().map(|(cell, _)| cell).collect();
    let commands = cells
        .into_iter()
        .filter(|_| rng.gen_bool(density))
        .map(|cell| Command::ToggleCell { cell });
    let events = apply_all(world, commands)?;
    debug!(toggled = events.len(), seed, "grid seeded");
    Ok(())
}

/// Draws `pattern` in the pattern creator and saves it to the library.
///
/// The creator is square, so patterns are drawn into a grid as large as their
/// longer side. Resizing opens the creator at that size directly.
fn save_pattern(world: &mut World, pattern: &Pattern) -> Result<Vec<Event>> {
    let size = pattern.height().max(pattern.width());
    let mut commands = vec![Command::ResizePatternCreator { size }];
    commands.extend(
        pattern
            .cells()
            .filter(|(_, state)| state.is_alive())
            .map(|(cell, _)| Command::TogglePatternCell { cell }),
    );
    commands.push(Command::SavePattern);

    let events = apply_all(world, commands)?;
    let id = saved_pattern(&events)?;
    info!(pattern = %id.label(), size, "pattern saved");
    Ok(events)
}

fn saved_pattern(events: &[Event]) -> Result<PatternId> {
    events
        .iter()
        .find_map(|event| match event {
            Event::PatternSaved { pattern, .. } => Some(*pattern),
            _ => None,
        })
        .ok_or_else(|| anyhow!("pattern creator did not save the pattern"))
}

/// Previews and places a saved pattern with its top-left cell at `offset`.
///
/// Anchors on the grid go through the builder like a pointer click would;
/// anchors off the grid are committed directly.
fn place_at<B: RenderingBackend>(
    world: &mut World,
    builder: &mut Builder,
    saved_events: &[Event],
    offset: PlacementOffset,
    backend: &mut B,
) -> Result<()> {
    let pattern = saved_pattern(saved_events)?;
    match query::grid(world).size().checked_cell(offset.row(), offset.column()) {
        Some(cell) => place_with_builder(world, builder, saved_events, pattern, cell, backend),
        None => {
            render(world, Some((pattern, offset)), backend)?;
            let _ = apply_all(world, [Command::PlacePattern { pattern, offset }])?;
            Ok(())
        }
    }
}

/// Selects a saved pattern, renders its preview at `cell`, then commits it.
fn place_with_builder<B: RenderingBackend>(
    world: &mut World,
    builder: &mut Builder,
    saved_events: &[Event],
    pattern: PatternId,
    cell: CellCoord,
    backend: &mut B,
) -> Result<()> {
    let mut commands = Vec::new();
    builder.handle(
        saved_events,
        BuilderInput {
            select_pattern: Some(pattern),
            cursor_cell: Some(cell),
            ..BuilderInput::default()
        },
        &mut commands,
    );
    if let Some((pattern, offset)) = builder.preview_request(Some(cell)) {
        render(world, Some((pattern, offset)), backend)?;
    }

    builder.handle(
        &[],
        BuilderInput {
            confirm_action: true,
            cursor_cell: Some(cell),
            ..BuilderInput::default()
        },
        &mut commands,
    );
    let _ = apply_all(world, commands)?;
    Ok(())
}

fn render<B: RenderingBackend>(
    world: &World,
    preview: Option<(PatternId, PlacementOffset)>,
    backend: &mut B,
) -> Result<()> {
    let preview = preview.and_then(|(pattern, offset)| query::preview(world, pattern, offset));
    let scene = Scene::capture(query::grid(world), preview.as_ref(), query::generation(world));
    backend.present(&scene)
}

/// Applies commands in order, failing on the first rejection the world reports.
fn apply_all(world: &mut World, commands: impl IntoIterator<Item = Command>) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for command in commands {
        let start = events.len();
        world::apply(world, command, &mut events);
        if let Some(rejection) = events[start..].iter().find_map(rejection_message) {
            bail!(rejection);
        }
    }
    Ok(events)
}

fn rejection_message(event: &Event) -> Option<String> {
    match event {
        Event::CellToggleRejected { reason, .. } => Some(format!("cell toggle rejected: {reason}")),
        Event::PatternCreatorRejected { reason } => {
            Some(format!("pattern creator rejected the request: {reason}"))
        }
        Event::PatternPlacementRejected { pattern, reason } => {
            Some(format!("placing {} failed: {reason}", pattern.label()))
        }
        _ => None,
    }
}
