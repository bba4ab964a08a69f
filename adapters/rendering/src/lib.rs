#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Life Composer adapters.
//!
//! Rendering is a consumer of the world: adapters capture a [`Scene`] from
//! the main grid plus an optional placement preview and hand it to a
//! [`RenderingBackend`]. Pointer positions travel the other way, converted
//! into cells and placement anchors by [`GridPresentation`].

use std::{error::Error, fmt, io::Write};

use anyhow::{Context, Result as AnyResult};
use glam::Vec2;
use life_composer_core::{CellCoord, CellState, Grid, GridSize, PlacementOffset};
use life_composer_system_placement::PlacementPreview;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }

    /// Composites this color over an opaque base color.
    #[must_use]
    pub fn over(self, base: Color) -> Self {
        let alpha = self.alpha.clamp(0.0, 1.0);

        Self {
            red: blend_channel(self.red, base.red, alpha),
            green: blend_channel(self.green, base.green, alpha),
            blue: blend_channel(self.blue, base.blue, alpha),
            alpha: 1.0,
        }
    }
}

fn blend_channel(top: f32, base: f32, alpha: f32) -> f32 {
    top * alpha + base * (1.0 - alpha)
}

/// Fill used for live cells.
pub const LIVE_COLOR: Color = Color::from_rgb_u8(255, 255, 255);

/// Fill used for dead cells.
pub const DEAD_COLOR: Color = Color::from_rgb_u8(0, 0, 0);

/// Translucent fill drawn over cells a pending placement would make alive.
pub const PREVIEW_COLOR: Color = Color::new(200.0 / 255.0, 200.0 / 255.0, 200.0 / 255.0, 0.7);

/// Pixel layout of the main grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridPresentation {
    /// Number of rows contained in the grid.
    pub rows: u32,
    /// Number of columns contained in the grid.
    pub columns: u32,
    /// Side length of a single square cell in pixels.
    pub resolution: f32,
}

impl GridPresentation {
    /// Creates a new grid layout descriptor.
    ///
    /// Returns an error when `resolution` is not a positive, finite length.
    pub fn new(rows: u32, columns: u32, resolution: f32) -> Result<Self, RenderingError> {
        validate_resolution(resolution)?;
        Ok(Self {
            rows,
            columns,
            resolution,
        })
    }

    /// Derives the grid layout that fits a canvas of the provided pixel size.
    ///
    /// Partial cells at the right and bottom edges are dropped.
    pub fn from_canvas(width: f32, height: f32, resolution: f32) -> Result<Self, RenderingError> {
        validate_resolution(resolution)?;
        let columns = (width / resolution).floor();
        let rows = (height / resolution).floor();
        if !(columns >= 1.0 && rows >= 1.0) {
            return Err(RenderingError::CanvasTooSmall { width, height });
        }

        Ok(Self {
            rows: rows.min(u32::MAX as f32) as u32,
            columns: columns.min(u32::MAX as f32) as u32,
            resolution,
        })
    }

    /// Dimensions of the grid measured in cells.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        GridSize::new(self.rows, self.columns)
    }

    /// Total width of the grid in pixels.
    #[must_use]
    pub fn width(&self) -> f32 {
        self.columns as f32 * self.resolution
    }

    /// Total height of the grid in pixels.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.rows as f32 * self.resolution
    }

    /// Top-left pixel of a cell.
    #[must_use]
    pub fn cell_origin(&self, cell: CellCoord) -> Vec2 {
        Vec2::new(
            cell.column() as f32 * self.resolution,
            cell.row() as f32 * self.resolution,
        )
    }

    /// Anchor obtained by dividing a pointer position by the resolution.
    ///
    /// The anchor is not clamped; a pointer left of or above the grid yields
    /// negative components.
    #[must_use]
    pub fn offset_at(&self, position: Vec2) -> PlacementOffset {
        let cell = (position / self.resolution).floor();
        PlacementOffset::new(cell.y as i64, cell.x as i64)
    }

    /// Cell under a pointer position, if the pointer is over the grid.
    #[must_use]
    pub fn cell_at(&self, position: Vec2) -> Option<CellCoord> {
        let offset = self.offset_at(position);
        self.size().checked_cell(offset.row(), offset.column())
    }
}

fn validate_resolution(resolution: f32) -> Result<(), RenderingError> {
    if resolution.is_finite() && resolution > 0.0 {
        Ok(())
    } else {
        Err(RenderingError::InvalidResolution { resolution })
    }
}

/// Snapshot of the main grid and the pending placement overlay.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Scene {
    size: GridSize,
    cells: Vec<CellState>,
    overlay: Vec<CellCoord>,
    /// Number of generations computed since the last reset.
    pub generation: u64,
    /// Number of live cells in the captured grid.
    pub population: usize,
}

impl Scene {
    /// Captures the grid and, when given, the live cells of a placement preview.
    #[must_use]
    pub fn capture(grid: &Grid, preview: Option<&PlacementPreview>, generation: u64) -> Self {
        let mut overlay: Vec<CellCoord> = preview
            .map(|preview| preview.live_cells().collect())
            .unwrap_or_default();
        overlay.sort_unstable();

        Self {
            size: grid.size(),
            cells: grid.cells().map(|(_, state)| state).collect(),
            overlay,
            generation,
            population: grid.population(),
        }
    }

    /// Dimensions of the captured grid.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.size
    }

    /// State of a captured cell; cells outside the grid read as dead.
    #[must_use]
    pub fn state(&self, cell: CellCoord) -> CellState {
        if !self.size.contains(cell) {
            return CellState::Dead;
        }
        let index = cell.row() as usize * self.size.columns() as usize + cell.column() as usize;
        self.cells.get(index).copied().unwrap_or_default()
    }

    /// Reports whether the preview overlay covers the cell.
    #[must_use]
    pub fn is_previewed(&self, cell: CellCoord) -> bool {
        self.overlay.binary_search(&cell).is_ok()
    }

    /// Final fill of a cell with the overlay composited on top.
    #[must_use]
    pub fn cell_color(&self, cell: CellCoord) -> Color {
        let base = if self.state(cell).is_alive() {
            LIVE_COLOR
        } else {
            DEAD_COLOR
        };
        if self.is_previewed(cell) {
            PREVIEW_COLOR.over(base)
        } else {
            base
        }
    }
}

/// Rendering backend capable of presenting Life Composer scenes.
pub trait RenderingBackend {
    /// Presents one frame.
    fn present(&mut self, scene: &Scene) -> AnyResult<()>;
}

/// Backend that prints each frame as text, one character per cell.
///
/// Live cells print as `#`, dead cells as `.`, and previewed cells as `+`.
#[derive(Debug)]
pub struct TextBackend<W> {
    out: W,
}

impl<W: Write> TextBackend<W> {
    /// Creates a backend writing frames to `out`.
    #[must_use]
    pub fn new(out: W) -> Self {
        Self { out }
    }

    /// Consumes the backend, yielding the underlying writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderingBackend for TextBackend<W> {
    fn present(&mut self, scene: &Scene) -> AnyResult<()> {
        writeln!(
            self.out,
            "generation {} population {}",
            scene.generation, scene.population
        )
        .context("failed to write frame header")?;

        let size = scene.size();
        for row in 0..size.rows() {
            let line: String = (0..size.columns())
                .map(|column| {
                    let cell = CellCoord::new(row, column);
                    if scene.is_previewed(cell) {
                        '+'
                    } else if scene.state(cell).is_alive() {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect();
            writeln!(self.out, "{line}").context("failed to write frame row")?;
        }
        self.out.flush().context("failed to flush frame")
    }
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Debug, PartialEq)]
pub enum RenderingError {
    /// The cell length must be a positive, finite number of pixels.
    InvalidResolution {
        /// Provided cell length that failed validation.
        resolution: f32,
    },
    /// The canvas cannot hold a single cell.
    CanvasTooSmall {
        /// Canvas width in pixels.
        width: f32,
        /// Canvas height in pixels.
        height: f32,
    },
}

impl fmt::Display for RenderingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidResolution { resolution } => {
                write!(f, "resolution must be positive (received {resolution})")
            }
            Self::CanvasTooSmall { width, height } => {
                write!(f, "canvas {width}x{height} cannot hold a single cell")
            }
        }
    }
}

impl Error for RenderingError {}
