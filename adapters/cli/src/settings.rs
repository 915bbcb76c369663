//! Adapter defaults read from a TOML settings file.

use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use life_core::{
    GeometryKind, GridSize, Speed, ALIVE_MARKER, DEAD_MARKER, DEFAULT_COLUMNS, DEFAULT_ROWS,
};
use serde::Deserialize;

/// Settings file picked up from the working directory when `--config` is absent.
const DEFAULT_SETTINGS_FILE: &str = "life.toml";

/// User-tunable defaults for the command-line adapter.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct Settings {
    /// Grid width used by `new` when no width flag is given.
    pub(crate) width: u32,
    /// Grid height used by `new` when no height flag is given.
    pub(crate) height: u32,
    /// Geometry name, `flat` or `toroidal`.
    pub(crate) geometry: String,
    /// Generations per ten seconds while watching a run.
    pub(crate) speed: u32,
    /// Glyph printed for live cells.
    pub(crate) alive: char,
    /// Glyph printed for dead cells.
    pub(crate) dead: char,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: DEFAULT_COLUMNS,
            height: DEFAULT_ROWS,
            geometry: GeometryKind::default().name().to_owned(),
            speed: Speed::DEFAULT.get(),
            alive: ALIVE_MARKER,
            dead: DEAD_MARKER,
        }
    }
}

impl Settings {
    /// Loads settings from `explicit`, or from `life.toml` when it exists.
    pub(crate) fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => {
                let fallback = PathBuf::from(DEFAULT_SETTINGS_FILE);
                if !fallback.exists() {
                    return Ok(Self::default());
                }
                fallback
            }
        };

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read settings at {}", path.display()))?;
        let settings = Self::from_toml(&contents)
            .with_context(|| format!("invalid settings in {}", path.display()))?;
        log::info!("loaded settings from {}", path.display());
        Ok(settings)
    }

    pub(crate) fn from_toml(contents: &str) -> Result<Self> {
        let settings: Self =
            toml::from_str(contents).context("failed to parse settings toml contents")?;
        let _ = settings.size()?;
        let _ = settings.geometry()?;
        let _ = settings.speed()?;
        if settings.alive == settings.dead {
            log::warn!(
                "alive and dead glyphs are both `{}`; rendered frames will be blank",
                settings.alive
            );
        }
        Ok(settings)
    }

    pub(crate) fn size(&self) -> Result<GridSize> {
        Ok(GridSize::new(self.width, self.height)?)
    }

    pub(crate) fn geometry(&self) -> Result<GeometryKind> {
        Ok(self.geometry.parse()?)
    }

    pub(crate) fn speed(&self) -> Result<Speed> {
        Ok(Speed::new(self.speed)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use life_core::LifeError;

    #[test]
    fn empty_file_yields_defaults() {
        let settings = Settings::from_toml("").expect("defaults");
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.size().expect("size"), GridSize::default());
        assert_eq!(settings.geometry().expect("geometry"), GeometryKind::Flat);
    }

    #[test]
    fn partial_file_overrides_selected_fields() {
        let settings = Settings::from_toml(
            r##"
                width = 12
                geometry = "toroidal"
                alive = "#"
            "##,
        )
        .expect("settings");

        assert_eq!(settings.width, 12);
        assert_eq!(settings.height, DEFAULT_ROWS);
        assert_eq!(settings.geometry().expect("geometry"), GeometryKind::Toroidal);
        assert_eq!(settings.alive, '#');
        assert_eq!(settings.dead, DEAD_MARKER);
    }

    #[test]
    fn unknown_geometry_is_rejected() {
        let error = Settings::from_toml("geometry = \"sphere\"").expect_err("invalid geometry");
        assert_eq!(
            error.downcast_ref::<LifeError>(),
            Some(&LifeError::InvalidGeometry("sphere".to_owned()))
        );
    }

    #[test]
    fn zero_dimensions_and_speed_are_rejected() {
        assert!(Settings::from_toml("width = 0").is_err());
        assert!(Settings::from_toml("speed = 0").is_err());
        assert!(Settings::from_toml("colour = \"blue\"").is_err());
    }
}
