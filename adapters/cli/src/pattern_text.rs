//! Plain-text pattern notation accepted on the command line.
//!
//! Rows are separated by `/` or newlines. `O`, `o`, `#` and `*` mark live
//! cells, `.` marks dead ones. Short rows are padded with dead cells.

use anyhow::{bail, Result};
use life_composer_core::{CellState, Pattern};

/// Parses a pattern written in plain-text notation.
pub(crate) fn parse_pattern(text: &str) -> Result<Pattern> {
    let mut rows: Vec<Vec<CellState>> = Vec::new();
    for (index, line) in text.split(['/', '\n']).enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let mut row = Vec::with_capacity(line.len());
        for symbol in line.chars() {
            row.push(match symbol {
                'O' | 'o' | '#' | '*' => CellState::Alive,
                '.' => CellState::Dead,
                other => bail!("unexpected symbol '{other}' in pattern row {}", index + 1),
            });
        }
        rows.push(row);
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        bail!("pattern '{text}' contains no cells");
    }
    for row in &mut rows {
        row.resize(width, CellState::Dead);
    }

    Ok(Pattern::from_rows(rows)?)
}
