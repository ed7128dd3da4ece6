//! Game configuration and its validation

use thiserror::Error;

use crate::types::{
    CellPos, Color, DEFAULT_COLUMNS, DEFAULT_NEXT_DEPTH, DEFAULT_VISIBLE_ROWS, EMPTY, HIDDEN_ROWS,
};

/// Widest supported board
pub const MAX_COLUMNS: u8 = 32;

/// Tallest supported board (visible rows)
pub const MAX_VISIBLE_ROWS: u8 = 64;

/// How a landing is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResolveMode {
    /// Run every chain pass inside the landing call
    #[default]
    Immediate,
    /// Stay in `Resolving`; the host calls `advance_chain` once per pass
    Stepped,
}

/// Board and queue parameters for one game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    pub columns: u8,
    pub visible_rows: u8,
    /// Color ids; index 0 must be [`EMPTY`]
    pub palette: Vec<Color>,
    /// Buffer coordinates whose occupation ends the game
    pub dead_cells: Vec<CellPos>,
    /// Number of upcoming pairs shown
    pub next_queue_depth: usize,
    pub resolve_mode: ResolveMode,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            columns: DEFAULT_COLUMNS,
            visible_rows: DEFAULT_VISIBLE_ROWS,
            palette: vec![EMPTY, 1, 2, 3, 4],
            dead_cells: vec![(2, HIDDEN_ROWS)],
            next_queue_depth: DEFAULT_NEXT_DEPTH,
            resolve_mode: ResolveMode::Immediate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("column count {0} outside 2..=32")]
    Columns(u8),
    #[error("visible row count {0} outside 1..=64")]
    VisibleRows(u8),
    #[error("palette must start with the empty color")]
    PaletteMissingEmpty,
    #[error("palette has no playable colors")]
    PaletteNoColors,
    #[error("palette lists color {0} more than once")]
    PaletteDuplicate(Color),
    #[error("dead cell ({0}, {1}) is outside the visible board")]
    DeadCellOutOfBounds(u8, u8),
    #[error("next queue depth must be at least 1")]
    QueueDepth,
}

impl GameConfig {
    /// Default board with `colors` playable colors
    pub fn with_colors(colors: u8) -> Self {
        Self {
            palette: (0..=colors).collect(),
            ..Self::default()
        }
    }

    /// Palette entries after the empty slot
    pub fn playable_colors(&self) -> Vec<Color> {
        self.palette.iter().skip(1).copied().collect()
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(2..=MAX_COLUMNS).contains(&self.columns) {
            return Err(ConfigError::Columns(self.columns));
        }
        if !(1..=MAX_VISIBLE_ROWS).contains(&self.visible_rows) {
            return Err(ConfigError::VisibleRows(self.visible_rows));
        }

        match self.palette.first() {
            Some(&EMPTY) => {}
            _ => return Err(ConfigError::PaletteMissingEmpty),
        }
        let colors = &self.palette[1..];
        if colors.is_empty() {
            return Err(ConfigError::PaletteNoColors);
        }
        for (i, &color) in colors.iter().enumerate() {
            if color == EMPTY || colors[..i].contains(&color) {
                return Err(ConfigError::PaletteDuplicate(color));
            }
        }

        let rows = self.visible_rows as u16 + HIDDEN_ROWS as u16;
        for &(x, y) in &self.dead_cells {
            if x >= self.columns || y < HIDDEN_ROWS || y as u16 >= rows {
                return Err(ConfigError::DeadCellOutOfBounds(x, y));
            }
        }

        if self.next_queue_depth == 0 {
            return Err(ConfigError::QueueDepth);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.playable_colors(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_with_colors() {
        let config = GameConfig::with_colors(5);
        assert_eq!(config.palette, vec![0, 1, 2, 3, 4, 5]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_rejects_bad_dimensions() {
        let config = GameConfig {
            columns: 1,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::Columns(1)));

        let config = GameConfig {
            visible_rows: 0,
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::VisibleRows(0)));
    }

    #[test]
    fn test_rejects_bad_palette() {
        let config = GameConfig {
            palette: vec![1, 2],
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::PaletteMissingEmpty));

        let config = GameConfig {
            palette: vec![EMPTY],
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::PaletteNoColors));

        let config = GameConfig {
            palette: vec![EMPTY, 1, 2, 1],
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::PaletteDuplicate(1)));
    }

    #[test]
    fn test_rejects_dead_cell_in_hidden_rows() {
        let config = GameConfig {
            dead_cells: vec![(2, 1)],
            ..GameConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::DeadCellOutOfBounds(2, 1)));

        let config = GameConfig {
            dead_cells: vec![(6, 5)],
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ConfigError::QueueDepth.to_string(),
            "next queue depth must be at least 1"
        );
        assert_eq!(
            ConfigError::Columns(40).to_string(),
            "column count 40 outside 2..=32"
        );
    }
}
