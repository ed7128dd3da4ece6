//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the workspace.
//! All types are pure data structures with no external dependencies, making them
//! usable in any context (core logic, move search, headless hosts).
//!
//! # Board Layout
//!
//! The default playfield is 6 columns by 12 visible rows. Every grid carries
//! [`HIDDEN_ROWS`] extra rows on top for spawning and rotation headroom, so the
//! buffer is `visible_rows + 2` rows tall:
//!
//! - **Columns**: indexed `0..columns` (left to right)
//! - **Rows**: indexed `0..visible_rows + 2` (top to bottom), rows 0 and 1 are hidden
//! - **Spawn**: axis token at column `columns / 2 - 1`, row 1, attached token above it
//!
//! # Scoring Tables
//!
//! | Table | Indexed by | Beyond the table |
//! |-------|------------|------------------|
//! | [`CHAIN_POWER`] | chain index | `32 * (chain - 3)` |
//! | [`COLOR_BONUS`] | distinct colors cleared together | `3 * 2^(colors - 2)` |
//! | [`GROUP_BONUS`] | size of one group | [`GROUP_BONUS_MAX`] |
//!
//! # Examples
//!
//! ```
//! use tui_puyo_types::{Orientation, PiecePair, EMPTY};
//!
//! let pair = PiecePair::new(1, 2);
//! assert!(!pair.is_double());
//!
//! let o = Orientation::Up;
//! assert_eq!(o.rotate_cw(), Orientation::Right);
//! assert_eq!(o.offset(), (0, -1));
//!
//! assert_eq!(EMPTY, 0);
//! ```

/// Color id stored in a grid cell. `0` is [`EMPTY`], `1..` are token colors.
pub type Color = u8;

/// The empty cell value
pub const EMPTY: Color = 0;

/// Grid coordinate `(column, row)` in buffer space (hidden rows included).
pub type CellPos = (u8, u8);

/// Rows above the visible playfield used for spawning and rotation headroom
pub const HIDDEN_ROWS: u8 = 2;

/// Default number of columns
pub const DEFAULT_COLUMNS: u8 = 6;

/// Default number of visible rows
pub const DEFAULT_VISIBLE_ROWS: u8 = 12;

/// Default number of upcoming pairs shown to the player
pub const DEFAULT_NEXT_DEPTH: usize = 2;

/// Buffer row of the axis token when a piece spawns
pub const SPAWN_ROW: i8 = 1;

/// Half rows advanced by one fall step at multiplier 1
pub const FALL_HALF_STEPS: u16 = 1;

/// Smallest connected group that clears
pub const MIN_GROUP_SIZE: usize = 4;

/// Copies of each color placed in one sequencer bag
pub const BAG_COPIES: usize = 64;

/// Default beam width for move search
pub const DEFAULT_BEAM_WIDTH: usize = 4;

/// Bonus awarded on the next scored chain after the board is fully cleared
pub const ALL_CLEAR_BONUS: u32 = 2100;

/// Award for a clear whose table sum is zero (one group of four at chain 1)
pub const MIN_CLEAR_SCORE: u32 = 40;

/// Chain power by chain index (0 and 1 carry no bonus)
pub const CHAIN_POWER: [u32; 20] = [
    0, 0, 8, 16, 32, 64, 96, 128, 160, 192, 224, 256, 288, 320, 352, 384, 416, 448, 480, 512,
];

/// Color bonus by number of distinct colors cleared in one pass
pub const COLOR_BONUS: [u32; 6] = [0, 0, 3, 6, 12, 24];

/// Group bonus by group size
pub const GROUP_BONUS: [u32; 12] = [0, 0, 0, 0, 0, 2, 3, 4, 5, 6, 7, 10];

/// Group bonus for groups larger than [`GROUP_BONUS`] covers
pub const GROUP_BONUS_MAX: u32 = 10;

/// Orientation of the attached token relative to the axis token
///
/// - **Up**: attached token sits above the axis (spawn orientation)
/// - **Right**: attached token sits to the right
/// - **Down**: attached token sits below
/// - **Left**: attached token sits to the left
///
/// The rotation cycle goes: Up → Right → Down → Left → Up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    /// All orientations in index order
    pub const ALL: [Orientation; 4] = [
        Orientation::Up,
        Orientation::Right,
        Orientation::Down,
        Orientation::Left,
    ];

    /// Rotate clockwise (90°)
    ///
    /// # Examples
    ///
    /// ```
    /// use tui_puyo_types::Orientation;
    ///
    /// assert_eq!(Orientation::Up.rotate_cw(), Orientation::Right);
    /// assert_eq!(Orientation::Left.rotate_cw(), Orientation::Up);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Orientation::Up => Orientation::Right,
            Orientation::Right => Orientation::Down,
            Orientation::Down => Orientation::Left,
            Orientation::Left => Orientation::Up,
        }
    }

    /// Rotate counter-clockwise (-90°)
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Orientation::Up => Orientation::Left,
            Orientation::Left => Orientation::Down,
            Orientation::Down => Orientation::Right,
            Orientation::Right => Orientation::Up,
        }
    }

    /// Offset `(dx, dy)` of the attached token from the axis, in whole cells
    pub fn offset(&self) -> (i8, i8) {
        match self {
            Orientation::Up => (0, -1),
            Orientation::Right => (1, 0),
            Orientation::Down => (0, 1),
            Orientation::Left => (-1, 0),
        }
    }

    /// Index 0..=3 in clockwise order starting from Up
    pub fn index(&self) -> u8 {
        match self {
            Orientation::Up => 0,
            Orientation::Right => 1,
            Orientation::Down => 2,
            Orientation::Left => 3,
        }
    }
}

/// Colors of one controlled pair, as held in the upcoming queue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PiecePair {
    /// Axis token color
    pub color1: Color,
    /// Attached token color
    pub color2: Color,
}

impl PiecePair {
    pub fn new(color1: Color, color2: Color) -> Self {
        Self { color1, color2 }
    }

    /// Whether both tokens share a color
    pub fn is_double(&self) -> bool {
        self.color1 == self.color2
    }
}

/// Game actions that can be applied to modify game state
///
/// These actions are used by both human input and automated play.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Shift the pair one column left
    MoveLeft,
    /// Shift the pair one column right
    MoveRight,
    /// Advance one fall step
    SoftDrop,
    /// Drop to the lowest valid position and land immediately
    HardDrop,
    /// Rotate the attached token 90° clockwise
    RotateCw,
    /// Rotate the attached token 90° counter-clockwise
    RotateCcw,
    /// Commit a resting pair to the grid
    ConfirmLanding,
    /// Restart the game
    Restart,
}

/// One connected same-color group removed in a single resolution pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClearedGroup {
    pub color: Color,
    pub count: usize,
}

/// Notification queued by the game engine for its host.
///
/// Hosts drain these after each command or poll; the engine never calls back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    GameStarted {
        episode_id: u32,
    },
    PieceSpawned {
        piece_id: u32,
        pair: PiecePair,
    },
    PieceMoved,
    PieceRotated,
    PieceLanded,
    ChainStarted,
    /// Cells about to be zeroed by chain pass `chain`
    CellsClearing {
        chain: u32,
        cells: Vec<CellPos>,
        groups: Vec<ClearedGroup>,
    },
    ScoreChanged {
        total: u32,
        delta: u32,
    },
    AllClear,
    ChainEnded {
        chains: u32,
    },
    GameOver,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_cycle() {
        let mut o = Orientation::Up;
        for _ in 0..4 {
            assert_eq!(o.rotate_cw().rotate_ccw(), o);
            o = o.rotate_cw();
        }
        assert_eq!(o, Orientation::Up);
    }

    #[test]
    fn test_orientation_index_follows_clockwise_order() {
        for (i, o) in Orientation::ALL.iter().enumerate() {
            assert_eq!(o.index() as usize, i);
            assert_eq!(o.rotate_cw().index(), (o.index() + 1) % 4);
        }
    }

    #[test]
    fn test_orientation_offsets_are_unit() {
        for o in Orientation::ALL {
            let (dx, dy) = o.offset();
            assert_eq!(dx.abs() + dy.abs(), 1);
        }
    }

    #[test]
    fn test_scoring_tables_continue_smoothly() {
        // Linear extrapolation picks up where the chain table ends.
        assert_eq!(CHAIN_POWER[19], 32 * (19 - 3));
        assert_eq!(COLOR_BONUS[5], 3 * (1 << (5 - 2)));
        assert_eq!(GROUP_BONUS[11], GROUP_BONUS_MAX);
    }
}
