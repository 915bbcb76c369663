//! Built-in starting patterns listed by `life presets`.

use anyhow::{Context, Result};
use life_core::{CellCoord, GridSize, LifeState};

/// Named starting pattern placed inside an otherwise empty field.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Preset {
    pub(crate) name: &'static str,
    pub(crate) description: &'static str,
    pattern: &'static str,
    field: (u32, u32),
    offset: (u32, u32),
}

pub(crate) const PRESETS: [Preset; 4] = [
    Preset {
        name: "glider",
        description: "smallest spaceship, travels one cell diagonally every four generations",
        pattern: "-*-\n--*\n***",
        field: (8, 8),
        offset: (0, 0),
    },
    Preset {
        name: "blinker",
        description: "period-two oscillator",
        pattern: "***",
        field: (5, 5),
        offset: (1, 2),
    },
    Preset {
        name: "spaceship",
        description: "lightweight spaceship travelling east",
        pattern: "-*--*\n*----\n*---*\n****-",
        field: (30, 8),
        offset: (1, 2),
    },
    Preset {
        name: "gosper-glider-gun",
        description: "emits a glider every thirty generations",
        pattern: concat!(
            "------------------------*-----------\n",
            "----------------------*-*-----------\n",
            "------------**------**------------**\n",
            "-----------*---*----**------------**\n",
            "**--------*-----*---**--------------\n",
            "**--------*---*-**----*-*-----------\n",
            "----------*-----*-------*-----------\n",
            "-----------*---*--------------------\n",
            "------------**----------------------",
        ),
        field: (50, 30),
        offset: (1, 1),
    },
];

impl Preset {
    /// Builds the preset's starting state.
    pub(crate) fn state(&self) -> Result<LifeState> {
        let pattern = LifeState::parse(self.pattern)
            .with_context(|| format!("preset `{}` has an invalid pattern", self.name))?;
        let (width, height) = self.field;
        let (column_offset, row_offset) = self.offset;
        let placed = pattern
            .live_cells()
            .map(|cell| CellCoord::new(cell.column() + column_offset, cell.row() + row_offset));
        let state = LifeState::with_live_cells(GridSize::new(width, height)?, placed)
            .with_context(|| format!("preset `{}` does not fit its field", self.name))?;
        Ok(state)
    }
}

/// Looks up a preset by name, ignoring ASCII case.
pub(crate) fn find(name: &str) -> Option<&'static Preset> {
    PRESETS
        .iter()
        .find(|preset| preset.name.eq_ignore_ascii_case(name))
}
