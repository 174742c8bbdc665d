use crate::domain::state::Cell;
use crate::errors::domain::DomainError;

/// Static definition of one playable level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LevelDef {
    pub level: u8,
    pub rows: u8,
    pub cols: u8,
    /// Size of the random active subset; `None` means every grid cell is active.
    pub active_cell_count: Option<u8>,
    pub ammo: u8,
    pub has_beaver: bool,
    pub has_warden: bool,
}

impl LevelDef {
    pub fn grid_size(&self) -> u8 {
        self.rows * self.cols
    }

    /// Number of cells in play for a round on this level.
    pub fn active_count(&self) -> u8 {
        match self.active_cell_count {
            Some(n) if n < self.grid_size() => n,
            _ => self.grid_size(),
        }
    }

    /// Every cell index of the full grid, ascending.
    pub fn all_cells(&self) -> Vec<Cell> {
        (0..self.grid_size()).collect()
    }
}

pub const LEVELS: [LevelDef; 5] = [
    LevelDef {
        level: 1,
        rows: 2,
        cols: 3,
        active_cell_count: None,
        ammo: 3,
        has_beaver: true,
        has_warden: false,
    },
    LevelDef {
        level: 2,
        rows: 3,
        cols: 3,
        active_cell_count: None,
        ammo: 4,
        has_beaver: true,
        has_warden: false,
    },
    LevelDef {
        level: 3,
        rows: 3,
        cols: 4,
        active_cell_count: Some(10),
        ammo: 4,
        has_beaver: true,
        has_warden: true,
    },
    LevelDef {
        level: 4,
        rows: 4,
        cols: 4,
        active_cell_count: Some(12),
        ammo: 5,
        has_beaver: true,
        has_warden: true,
    },
    LevelDef {
        level: 5,
        rows: 5,
        cols: 5,
        active_cell_count: Some(16),
        ammo: 6,
        has_beaver: true,
        has_warden: true,
    },
];

/// Look up a level definition.
///
/// An unknown key is a configuration error in the caller, never player input.
pub fn level_def(level: u8) -> Result<LevelDef, DomainError> {
    LEVELS
        .iter()
        .find(|def| def.level == level)
        .copied()
        .ok_or_else(|| DomainError::config(format!("Unknown level {level}")))
}
