//! Seeded random fill for `life new --density`.

use anyhow::{bail, Result};
use life_core::{Grid, GridSize, LifeState};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Fills a state so each cell is alive with probability `density`.
///
/// The same seed always yields the same state.
pub(crate) fn random_state(size: GridSize, density: f64, seed: u64) -> Result<LifeState> {
    if !(0.0..=1.0).contains(&density) {
        bail!("density {density} must lie between 0.0 and 1.0");
    }

    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let cells = Grid::from_fn(size, |_| rng.gen_bool(density));
    Ok(LifeState::from_grid(cells))
}
