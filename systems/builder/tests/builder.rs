use life_composer_core::{
    CellCoord, Command, Event, GridSize, PatternId, PlacementOffset,
};
use life_composer_system_builder::{Builder, BuilderInput, Selection};
use life_composer_world::{self as world, query, World, WorldConfig};

fn saved(index: u32) -> Event {
    Event::PatternSaved {
        pattern: PatternId::new(index),
        size: GridSize::new(3, 3),
    }
}

#[test]
fn confirm_while_idle_toggles_the_cursor_cell() {
    let mut builder = Builder::default();
    let mut commands = Vec::new();

    builder.handle(
        &[],
        BuilderInput {
            confirm_action: true,
            cursor_cell: Some(CellCoord::new(2, 4)),
            ..BuilderInput::default()
        },
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::ToggleCell {
            cell: CellCoord::new(2, 4)
        }],
        "idle clicks should edit single cells",
    );
}

#[test]
fn confirm_with_selection_places_and_returns_to_idle() {
    let mut builder = Builder::default();
    let mut commands = Vec::new();

    builder.handle(
        &[saved(0)],
        BuilderInput {
            select_pattern: Some(PatternId::new(0)),
            ..BuilderInput::default()
        },
        &mut commands,
    );
    assert_eq!(builder.selection(), Selection::PatternSelected(PatternId::new(0)));
    assert!(commands.is_empty(), "selection alone must not emit commands");

    builder.handle(
        &[],
        BuilderInput {
            confirm_action: true,
            cursor_cell: Some(CellCoord::new(5, 1)),
            ..BuilderInput::default()
        },
        &mut commands,
    );

    assert_eq!(
        commands,
        vec![Command::PlacePattern {
            pattern: PatternId::new(0),
            offset: PlacementOffset::new(5, 1),
        }],
        "confirming a selection should place the pattern at the cursor",
    );
    assert_eq!(builder.selection(), Selection::Idle);
}

#[test]
fn cancel_drops_the_selection() {
    let mut builder = Builder::default();
    let mut commands = Vec::new();

    builder.handle(
        &[saved(0)],
        BuilderInput {
            select_pattern: Some(PatternId::new(0)),
            ..BuilderInput::default()
        },
        &mut commands,
    );
    builder.handle(
        &[],
        BuilderInput {
            cancel_action: true,
            ..BuilderInput::default()
        },
        &mut commands,
    );

    assert_eq!(builder.selection(), Selection::Idle);
    assert!(builder.preview_request(Some(CellCoord::new(0, 0))).is_none());
    assert!(commands.is_empty());
}

#[test]
fn unknown_patterns_cannot_be_selected() {
    let mut builder = Builder::default();
    let mut commands = Vec::new();

    builder.handle(
        &[saved(0)],
        BuilderInput {
            select_pattern: Some(PatternId::new(1)),
            ..BuilderInput::default()
        },
        &mut commands,
    );

    assert_eq!(builder.selection(), Selection::Idle);
}

#[test]
fn preview_request_follows_the_cursor() {
    let mut builder = Builder::default();
    let mut commands = Vec::new();

    builder.handle(
        &[saved(0), saved(1)],
        BuilderInput {
            select_pattern: Some(PatternId::new(1)),
            ..BuilderInput::default()
        },
        &mut commands,
    );

    assert_eq!(builder.preview_request(None), None);
    assert_eq!(
        builder.preview_request(Some(CellCoord::new(3, 7))),
        Some((PatternId::new(1), PlacementOffset::new(3, 7)))
    );
    assert_eq!(
        builder.preview_request(Some(CellCoord::new(3, 7))),
        builder.preview_request(Some(CellCoord::new(3, 7))),
        "repeated previews are stable",
    );
}

#[test]
fn builder_commands_drive_the_world() {
    let mut world = World::with_config(WorldConfig {
        rows: 6,
        columns: 6,
        pattern_size: 2,
    })
    .expect("valid configuration");
    let mut events = Vec::new();
    for command in [
        Command::OpenPatternCreator,
        Command::TogglePatternCell {
            cell: CellCoord::new(0, 0),
        },
        Command::TogglePatternCell {
            cell: CellCoord::new(1, 1),
        },
        Command::SavePattern,
    ] {
        world::apply(&mut world, command, &mut events);
    }

    let mut builder = Builder::new();
    let mut commands = Vec::new();
    builder.handle(
        &events,
        BuilderInput {
            select_pattern: Some(PatternId::new(0)),
            ..BuilderInput::default()
        },
        &mut commands,
    );

    let cursor = Some(CellCoord::new(4, 4));
    let (pattern, offset) = builder.preview_request(cursor).expect("armed selection");
    let preview = query::preview(&world, pattern, offset).expect("saved pattern");
    assert_eq!(preview.live_cells().count(), 2);
    assert_eq!(query::grid(&world).population(), 0, "preview is read-only");

    builder.handle(
        &[],
        BuilderInput {
            confirm_action: true,
            cursor_cell: cursor,
            ..BuilderInput::default()
        },
        &mut commands,
    );
    events.clear();
    for command in commands.drain(..) {
        world::apply(&mut world, command, &mut events);
    }

    let live: Vec<_> = query::grid(&world).live_cells().collect();
    assert_eq!(live, vec![CellCoord::new(4, 4), CellCoord::new(5, 5)]);
}
