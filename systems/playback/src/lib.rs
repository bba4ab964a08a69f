#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure playback system that decides when the scheduler should step the world.
//!
//! The world itself has no notion of time. Adapters call [`Playback::handle`]
//! once per animation frame; while running, each frame yields one
//! `StepGeneration` command. Stopping the animation is simply a matter of
//! no longer emitting steps.

use life_composer_core::{Command, Event};

/// Whether the animation loop is advancing generations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackState {
    /// Generations advance only on explicit single steps.
    #[default]
    Paused,
    /// Every frame advances one generation.
    Running,
}

/// Input snapshot distilled from adapter-provided controls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlaybackInput {
    /// Start/pause button pressed on this frame.
    pub toggle_running: bool,
    /// Clear button pressed on this frame.
    pub clear: bool,
    /// Single-step requested on this frame while paused.
    pub step_once: bool,
}

/// Playback system that translates controls and frames into step commands.
#[derive(Clone, Debug, Default)]
pub struct Playback {
    state: PlaybackState,
}

impl Playback {
    /// Creates a paused playback system.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            state: PlaybackState::Paused,
        }
    }

    /// Current playback state.
    #[must_use]
    pub const fn state(&self) -> PlaybackState {
        self.state
    }

    /// Consumes world events and one frame of input to emit commands.
    ///
    /// A cleared grid always pauses playback, whether the clear came from
    /// this system or elsewhere.
    pub fn handle(&mut self, events: &[Event], input: PlaybackInput, out: &mut Vec<Command>) {
        if events.iter().any(|event| matches!(event, Event::GridCleared)) {
            self.state = PlaybackState::Paused;
        }

        if input.clear {
            self.state = PlaybackState::Paused;
            out.push(Command::ClearGrid);
            return;
        }

        if input.toggle_running {
            self.state = match self.state {
                PlaybackState::Paused => PlaybackState::Running,
                PlaybackState::Running => PlaybackState::Paused,
            };
        }

        match self.state {
            PlaybackState::Running => out.push(Command::StepGeneration),
            PlaybackState::Paused if input.step_once => out.push(Command::StepGeneration),
            PlaybackState::Paused => {}
        }
    }
}
