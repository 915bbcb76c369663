#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure generation system that applies the birth/survival rule.
//!
//! Every cell of the next generation is derived from a read-only snapshot of
//! the previous one, so all cells update simultaneously.

use life_core::LifeState;
use life_system_geometry::{Adjacency, Neighbors};

/// Outcome of the rule for a single cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// Live cell with fewer than two live neighbors dies.
    Underpopulated,
    /// Live cell with more than three live neighbors dies.
    Overcrowded,
    /// Dead cell with exactly three live neighbors comes alive.
    Born,
    /// Cell keeps its current value.
    Unchanged,
}

impl Transition {
    /// Classifies a cell from its value and live-neighbor count.
    #[must_use]
    pub const fn classify(alive: bool, live_neighbors: usize) -> Self {
        match (alive, live_neighbors) {
            (true, 0..=1) => Self::Underpopulated,
            (true, 4..) => Self::Overcrowded,
            (false, 3) => Self::Born,
            _ => Self::Unchanged,
        }
    }

    /// Value the cell holds after the transition.
    #[must_use]
    pub const fn resolve(self, alive: bool) -> bool {
        match self {
            Self::Underpopulated | Self::Overcrowded => false,
            Self::Born => true,
            Self::Unchanged => alive,
        }
    }
}

/// Counts neighbors that are alive in `state`.
///
/// Empty slots and coordinates outside the state count as dead.
#[must_use]
pub fn count_live(neighbors: &Neighbors, state: &LifeState) -> usize {
    neighbors
        .iter()
        .filter(|cell| matches!(state.is_alive(*cell), Ok(true)))
        .count()
}

/// Computes the generation that follows `state` under `geometry`.
///
/// The input is left untouched and the result has identical dimensions.
#[must_use]
pub fn next_generation<A>(state: &LifeState, geometry: &A) -> LifeState
where
    A: Adjacency + ?Sized,
{
    let size = state.size();
    let next = state.grid().map(|cell, alive| {
        let live_neighbors = count_live(&geometry.adjacent(cell, size), state);
        Transition::classify(*alive, live_neighbors).resolve(*alive)
    });
    LifeState::from_grid(next)
}

/// Applies [`next_generation`] `generations` times.
#[must_use]
pub fn advance<A>(state: &LifeState, geometry: &A, generations: u64) -> LifeState
where
    A: Adjacency + ?Sized,
{
    let mut current = state.clone();
    for _ in 0..generations {
        current = next_generation(&current, geometry);
    }
    current
}
