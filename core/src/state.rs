//! Boolean life state and its plain-text notation.
//!
//! The notation stores one line per row joined by `\n` with no trailing
//! newline. `*` marks a live cell; every other character reads as dead and
//! `-` is written for dead cells. Lines shorter than the longest line are
//! padded with dead cells when parsing.

use std::{fmt, str::FromStr};

use crate::{CellCoord, Grid, GridSize, LifeError};

/// Character marking a live cell in the text notation.
pub const ALIVE_MARKER: char = '*';
/// Character written for a dead cell in the text notation.
pub const DEAD_MARKER: char = '-';

/// Live/dead value of every cell on a fixed-size grid.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct LifeState {
    cells: Grid<bool>,
}

impl LifeState {
    /// Creates an all-dead state of the provided size.
    #[must_use]
    pub fn new(size: GridSize) -> Self {
        Self {
            cells: Grid::from_fn(size, |_| false),
        }
    }

    /// Adopts an existing boolean grid as a state.
    #[must_use]
    pub fn from_grid(cells: Grid<bool>) -> Self {
        Self { cells }
    }

    /// Creates a state of the provided size whose live cells are exactly `alive`.
    pub fn with_live_cells<I>(size: GridSize, alive: I) -> Result<Self, LifeError>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        let mut state = Self::new(size);
        for cell in alive {
            let _ = state.set_alive(cell, true)?;
        }
        Ok(state)
    }

    /// Dimensions of the state.
    #[must_use]
    pub const fn size(&self) -> GridSize {
        self.cells.size()
    }

    /// Read-only access to the underlying grid.
    #[must_use]
    pub fn grid(&self) -> &Grid<bool> {
        &self.cells
    }

    /// Reports whether `cell` is alive.
    pub fn is_alive(&self, cell: CellCoord) -> Result<bool, LifeError> {
        self.cells.get(cell).copied()
    }

    /// Stores the value of `cell`, returning the previous value.
    pub fn set_alive(&mut self, cell: CellCoord, alive: bool) -> Result<bool, LifeError> {
        self.cells.set(cell, alive)
    }

    /// Flips `cell`, returning its new value.
    pub fn toggle(&mut self, cell: CellCoord) -> Result<bool, LifeError> {
        let slot = self.cells.get_mut(cell)?;
        *slot = !*slot;
        Ok(*slot)
    }

    /// Number of live cells.
    #[must_use]
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|(_, alive)| **alive).count()
    }

    /// Live cells in row-major order.
    pub fn live_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.cells
            .iter()
            .filter_map(|(cell, alive)| alive.then_some(cell))
    }

    /// Parses the text notation.
    ///
    /// Trailing empty lines are ignored. Width is the longest remaining line
    /// measured in characters; shorter lines are padded with dead cells.
    pub fn parse(text: &str) -> Result<Self, LifeError> {
        let mut lines: Vec<&str> = text.split('\n').collect();
        while lines.last().is_some_and(|line| line.is_empty()) {
            let _ = lines.pop();
        }

        let longest = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);
        if longest == 0 {
            return Err(LifeError::MalformedState(
                "input contains no cells".to_owned(),
            ));
        }

        let width = u32::try_from(longest).map_err(|_| {
            LifeError::MalformedState(format!("line of {longest} characters is too wide"))
        })?;
        let height = u32::try_from(lines.len()).map_err(|_| {
            LifeError::MalformedState(format!("{} lines is too many rows", lines.len()))
        })?;
        let size = GridSize::new(width, height)?;

        let mut cells = Vec::with_capacity(size.cell_count());
        for line in &lines {
            let start = cells.len();
            cells.extend(line.chars().map(|marker| marker == ALIVE_MARKER));
            cells.resize(start + longest, false);
        }

        Ok(Self {
            cells: Grid::from_cells(size, cells)?,
        })
    }

    /// Renders the state using the provided glyphs, one line per row.
    #[must_use]
    pub fn render(&self, alive: char, dead: char) -> String {
        let size = self.size();
        let mut out = String::with_capacity(size.cell_count() + size.height() as usize);
        for (cell, value) in self.cells.iter() {
            if cell.column() == 0 && cell.row() > 0 {
                out.push('\n');
            }
            out.push(if *value { alive } else { dead });
        }
        out
    }

    /// Renders the canonical text notation.
    #[must_use]
    pub fn to_notation(&self) -> String {
        self.render(ALIVE_MARKER, DEAD_MARKER)
    }
}

impl fmt::Display for LifeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_notation())
    }
}

impl FromStr for LifeState {
    type Err = LifeError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        Self::parse(text)
    }
}
