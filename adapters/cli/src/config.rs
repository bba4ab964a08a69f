//! Session configuration loaded from TOML and merged with command-line flags.

use std::{fs, path::Path};

use anyhow::{bail, Context, Result};
use life_composer_core::{DEFAULT_GRID_COLUMNS, DEFAULT_GRID_ROWS, DEFAULT_PATTERN_SIZE};
use life_composer_rendering::GridPresentation;
use life_composer_world::WorldConfig;
use serde::Deserialize;

/// Default side length of a cell in pixels.
pub(crate) const DEFAULT_RESOLUTION: f32 = 10.0;

/// Optional settings read from a session file.
///
/// Grid dimensions come from `rows`/`columns` when present, otherwise from
/// the canvas size divided by the resolution, otherwise from the defaults.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct SessionConfig {
    /// Canvas width in pixels.
    pub canvas_width: Option<f32>,
    /// Canvas height in pixels.
    pub canvas_height: Option<f32>,
    /// Side length of a cell in pixels.
    pub resolution: Option<f32>,
    /// Explicit number of grid rows.
    pub rows: Option<u32>,
    /// Explicit number of grid columns.
    pub columns: Option<u32>,
    /// Edge length the pattern creator starts with.
    pub pattern_size: Option<u32>,
}

impl SessionConfig {
    /// Reads and parses a session file.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read session config {}", path.display()))?;
        Self::parse(&contents)
    }

    /// Parses session settings from TOML text.
    pub(crate) fn parse(contents: &str) -> Result<Self> {
        toml::from_str(contents).context("failed to parse session config toml contents")
    }

    /// Overlays values from `overrides` on top of this configuration.
    #[must_use]
    pub(crate) fn merged_with(self, overrides: SessionConfig) -> Self {
        Self {
            canvas_width: overrides.canvas_width.or(self.canvas_width),
            canvas_height: overrides.canvas_height.or(self.canvas_height),
            resolution: overrides.resolution.or(self.resolution),
            rows: overrides.rows.or(self.rows),
            columns: overrides.columns.or(self.columns),
            pattern_size: overrides.pattern_size.or(self.pattern_size),
        }
    }

    /// Resolves the world configuration described by these settings.
    ///
    /// A `pattern_size` above the creator limit is kept; the creator resets it
    /// when first opened. Zero is rejected here.
    pub(crate) fn world_config(&self) -> Result<WorldConfig> {
        if self.pattern_size == Some(0) {
            bail!("session config pattern_size must be at least 1");
        }
        let resolution = self.resolution.unwrap_or(DEFAULT_RESOLUTION);
        let canvas = match (self.canvas_width, self.canvas_height) {
            (Some(width), Some(height)) => Some(
                GridPresentation::from_canvas(width, height, resolution)
                    .context("failed to derive grid dimensions from the canvas")?,
            ),
            _ => None,
        };

        Ok(WorldConfig {
            rows: self
                .rows
                .or(canvas.map(|canvas| canvas.rows))
                .unwrap_or(DEFAULT_GRID_ROWS),
            columns: self
                .columns
                .or(canvas.map(|canvas| canvas.columns))
                .unwrap_or(DEFAULT_GRID_COLUMNS),
            pattern_size: self.pattern_size.unwrap_or(DEFAULT_PATTERN_SIZE),
        })
    }
}
