use crate::piece::Piece;
use crate::types::{CellPos, Color, Orientation, PiecePair};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActiveSnapshot {
    pub x: i8,
    /// Axis row in half rows
    pub y_half: i16,
    pub orientation: Orientation,
    pub color1: Color,
    pub color2: Color,
}

impl From<Piece> for ActiveSnapshot {
    fn from(value: Piece) -> Self {
        Self {
            x: value.x,
            y_half: value.y_half,
            orientation: value.orientation,
            color1: value.color1,
            color2: value.color2,
        }
    }
}

/// Read-only view of a game for hosts.
///
/// `board` covers the whole buffer, hidden rows first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GameSnapshot {
    pub columns: u8,
    pub rows: u8,
    pub board: Vec<Vec<Color>>,
    /// Cells that end the game when filled after a chain
    pub dead_cells: Vec<CellPos>,
    pub active: Option<ActiveSnapshot>,
    /// Where a hard drop would commit the active pair
    pub ghost: Option<ActiveSnapshot>,
    pub next_queue: Vec<PiecePair>,
    pub score: u32,
    /// Chain passes so far in the current resolution cycle
    pub chain: u32,
    pub max_chain: u32,
    pub game_over: bool,
    pub resolving: bool,
    /// Cells marked by the current chain pass and cleared by the next one
    pub clearing: Vec<CellPos>,
    pub episode_id: u32,
    pub piece_id: u32,
    pub seed: u32,
}

impl GameSnapshot {
    pub fn playable(&self) -> bool {
        !self.game_over && !self.resolving && self.active.is_some()
    }

    /// Color at buffer cell (x, y), if in bounds
    pub fn cell(&self, x: usize, y: usize) -> Option<Color> {
        self.board.get(y)?.get(x).copied()
    }
}
