//! Reads and writes life states as plain-text `.txt` files.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use life_core::LifeState;

/// Reads a state file, normalising `\r\n` line endings before parsing.
///
/// Nothing is returned unless the whole file parses, so callers can keep
/// their current state when loading fails.
pub(crate) fn load_state(path: &Path) -> Result<LifeState> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read state file {}", path.display()))?;
    let normalised = contents.lines().collect::<Vec<_>>().join("\n");
    let state = LifeState::parse(&normalised)
        .with_context(|| format!("failed to parse state file {}", path.display()))?;
    log::info!(
        "loaded {} state with {} live cells from {}",
        state.size(),
        state.population(),
        path.display()
    );
    Ok(state)
}

/// Writes the canonical notation of `state` to `path`.
pub(crate) fn save_state(path: &Path, state: &LifeState) -> Result<()> {
    fs::write(path, state.to_notation())
        .with_context(|| format!("failed to write state file {}", path.display()))?;
    log::info!("saved {} state to {}", state.size(), path.display());
    Ok(())
}
