#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Life engine.
//!
//! This crate defines the data and message surface that connects adapters,
//! the authoritative simulation, and the pure systems. Adapters submit
//! [`Command`] values describing desired mutations, the simulation executes
//! those commands via its `apply` entry point, and then broadcasts [`Event`]
//! values so presentation layers can react. Systems read [`LifeState`]
//! snapshots and produce fresh states without mutating their inputs.

mod grid;
mod state;

use std::{fmt, str::FromStr, time::Duration};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use grid::{Grid, GridIter};
pub use state::{LifeState, ALIVE_MARKER, DEAD_MARKER};

/// Number of columns used when no explicit size is requested.
pub const DEFAULT_COLUMNS: u32 = 50;
/// Number of rows used when no explicit size is requested.
pub const DEFAULT_ROWS: u32 = 30;

/// Commands that express all permissible simulation mutations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    /// Replaces the simulation with an all-dead state of the current size.
    NewGame,
    /// Replaces the simulation with an all-dead state of the provided size.
    Resize {
        /// Dimensions of the fresh state.
        size: GridSize,
    },
    /// Adopts the provided state as both the initial snapshot and the current state.
    LoadState {
        /// State that should become the new starting point.
        state: LifeState,
    },
    /// Restores the initial snapshot and rewinds the iteration counter.
    Reset,
    /// Marks the simulation as running so the scheduler starts ticking.
    Start,
    /// Marks the simulation as paused so the scheduler stops ticking.
    Pause,
    /// Advances the current state by one generation.
    Tick,
    /// Flips the live/dead value of a single cell in the current state.
    Toggle {
        /// Cell whose value should be flipped.
        cell: CellCoord,
    },
    /// Selects the adjacency rule used by subsequent generations.
    SetGeometry {
        /// Geometry to activate.
        geometry: GeometryKind,
    },
    /// Updates the cadence the scheduler should tick at while running.
    SetSpeed {
        /// New tick cadence.
        speed: Speed,
    },
}

/// Events broadcast by the simulation after processing commands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// Confirms that a generation was computed.
    Iterated {
        /// Iteration counter after the generation was applied.
        iteration: u64,
    },
    /// Announces that the simulation entered the running state.
    Started,
    /// Announces that the simulation stopped running.
    Paused,
    /// Announces that the initial snapshot became the current state again.
    Reset,
    /// Announces that the simulation was cleared to an all-dead state.
    Renewed,
    /// Announces that the grid dimensions changed.
    Resized {
        /// Dimensions that became active.
        size: GridSize,
    },
    /// Confirms that a single cell was flipped.
    CellToggled {
        /// Cell that was flipped.
        cell: CellCoord,
        /// Value the cell holds after the flip.
        alive: bool,
    },
    /// Announces that a different adjacency rule became active.
    GeometryChanged {
        /// Geometry that became active.
        geometry: GeometryKind,
    },
    /// Announces that the tick cadence changed.
    SpeedChanged {
        /// Cadence that became active.
        speed: Speed,
    },
}

/// Location of a single grid cell expressed as column and row coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellCoord {
    column: u32,
    row: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(column: u32, row: u32) -> Self {
        Self { column, row }
    }

    /// Zero-based column index of the cell (the `x` axis).
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Zero-based row index of the cell (the `y` axis).
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.column, self.row)
    }
}

/// Dimensions of a rectangular grid measured in whole cells.
///
/// Both axes are guaranteed to be at least one cell long.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridSize {
    width: u32,
    height: u32,
}

impl GridSize {
    /// Creates a size descriptor, rejecting empty axes.
    pub fn new(width: u32, height: u32) -> Result<Self, LifeError> {
        if width == 0 || height == 0 {
            return Err(LifeError::InvalidDimension { width, height });
        }
        Ok(Self { width, height })
    }

    /// Width of the grid in cells.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height of the grid in cells.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells covered by the grid.
    #[must_use]
    pub fn cell_count(&self) -> usize {
        let count = u64::from(self.width) * u64::from(self.height);
        usize::try_from(count).unwrap_or(usize::MAX)
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn contains(&self, cell: CellCoord) -> bool {
        cell.column() < self.width && cell.row() < self.height
    }

    /// Row-major storage index of the cell, if it lies inside the grid.
    #[must_use]
    pub fn index(&self, cell: CellCoord) -> Option<usize> {
        if self.contains(cell) {
            let row = usize::try_from(cell.row()).ok()?;
            let column = usize::try_from(cell.column()).ok()?;
            let width = usize::try_from(self.width).ok()?;
            Some(row * width + column)
        } else {
            None
        }
    }

    /// Cell stored at the provided row-major index.
    pub(crate) fn cell_at(&self, index: usize) -> CellCoord {
        let width = self.width as usize;
        CellCoord::new((index % width) as u32, (index / width) as u32)
    }
}

impl Default for GridSize {
    fn default() -> Self {
        Self {
            width: DEFAULT_COLUMNS,
            height: DEFAULT_ROWS,
        }
    }
}

impl fmt::Display for GridSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Built-in adjacency rules selectable by adapters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GeometryKind {
    /// Bounded plane; neighbors beyond the edges do not exist.
    #[default]
    Flat,
    /// Wraparound surface; each edge connects to the opposite edge.
    Toroidal,
}

impl GeometryKind {
    /// Every built-in geometry in selector order.
    pub const ALL: [GeometryKind; 2] = [GeometryKind::Flat, GeometryKind::Toroidal];

    /// Resolves a numeric selector (`0` flat, `1` toroidal).
    pub fn from_index(index: u8) -> Result<Self, LifeError> {
        Self::ALL
            .get(usize::from(index))
            .copied()
            .ok_or_else(|| LifeError::InvalidGeometry(index.to_string()))
    }

    /// Numeric selector associated with the geometry.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Flat => 0,
            Self::Toroidal => 1,
        }
    }

    /// Canonical lowercase name of the geometry.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Toroidal => "toroidal",
        }
    }
}

impl fmt::Display for GeometryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeometryKind {
    type Err = LifeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "flat" | "0" => Ok(Self::Flat),
            "toroidal" | "torus" | "1" => Ok(Self::Toroidal),
            _ => Err(LifeError::InvalidGeometry(value.to_owned())),
        }
    }
}

/// Tick cadence expressed as generations per ten seconds of wall-clock time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Speed(u32);

impl Speed {
    /// Window over which the cadence is measured.
    pub const WINDOW: Duration = Duration::from_secs(10);

    /// Cadence matching a 150 ms timer.
    pub const DEFAULT: Speed = Speed(66);

    /// Creates a cadence, rejecting a zero rate.
    pub fn new(iterations_per_window: u32) -> Result<Self, LifeError> {
        if iterations_per_window == 0 {
            return Err(LifeError::InvalidSpeed(iterations_per_window));
        }
        Ok(Self(iterations_per_window))
    }

    /// Generations per ten seconds.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Delay the scheduler waits between successive ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Self::WINDOW / self.0
    }
}

impl Default for Speed {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Failures reported by grid access, construction, and parsing.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LifeError {
    /// A grid was requested with an empty axis.
    #[error("grid dimensions {width}x{height} must both be at least 1")]
    InvalidDimension {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },
    /// A coordinate fell outside the grid extents.
    #[error("cell {cell} lies outside the {size} grid")]
    OutOfBounds {
        /// Offending coordinate.
        cell: CellCoord,
        /// Extents of the grid that was accessed.
        size: GridSize,
    },
    /// An unknown geometry selector was supplied.
    #[error("unknown geometry `{0}`")]
    InvalidGeometry(String),
    /// Serialized input could not produce a rectangular grid.
    #[error("malformed state: {0}")]
    MalformedState(String),
    /// A tick cadence of zero was requested.
    #[error("speed must be at least 1 iteration per 10 seconds, got {0}")]
    InvalidSpeed(u32),
}
