//! Piece module - the controlled pair of tokens
//!
//! The axis token sits at `(x, y)`; the attached token sits at `axis + offset(orientation)`.
//! The vertical coordinate is kept in half rows so a falling pair can rest between two rows.
//! Every collision test looks at the ceiling of that coordinate, every commit at its rounding.

use crate::types::{Color, Orientation, PiecePair, SPAWN_ROW};

/// Round a half-row coordinate up to a whole row.
#[inline(always)]
pub fn ceil_row(y_half: i16) -> i16 {
    (y_half + 1).div_euclid(2)
}

/// Round a half-row coordinate to the nearest whole row, halves rounding down the board.
///
/// At half-row resolution this coincides with [`ceil_row`].
#[inline(always)]
pub fn round_row(y_half: i16) -> i16 {
    (y_half + 1).div_euclid(2)
}

/// The falling pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    /// Axis column
    pub x: i8,
    /// Axis row, in half rows
    pub y_half: i16,
    pub orientation: Orientation,
    /// Axis token color
    pub color1: Color,
    /// Attached token color
    pub color2: Color,
}

impl Piece {
    /// Create a pair with its axis on whole row `row`
    pub fn new(x: i8, row: i8, orientation: Orientation, pair: PiecePair) -> Self {
        Self {
            x,
            y_half: row as i16 * 2,
            orientation,
            color1: pair.color1,
            color2: pair.color2,
        }
    }

    /// Create a pair at the spawn position for a grid `columns` wide
    pub fn spawn(columns: u8, pair: PiecePair) -> Self {
        Self::new(spawn_column(columns), SPAWN_ROW, Orientation::Up, pair)
    }

    pub fn pair(&self) -> PiecePair {
        PiecePair::new(self.color1, self.color2)
    }

    /// Axis row as a float, for display
    pub fn y(&self) -> f32 {
        self.y_half as f32 / 2.0
    }

    /// Attached token position `(x, y_half)`
    pub fn attached(&self) -> (i8, i16) {
        let (dx, dy) = self.orientation.offset();
        (self.x + dx, self.y_half + dy as i16 * 2)
    }

    /// Both token positions `(x, y_half)`, axis first
    pub fn positions(&self) -> [(i8, i16); 2] {
        [(self.x, self.y_half), self.attached()]
    }

    /// Both token cells after ceiling rounding, axis first
    pub fn ceil_cells(&self) -> [(i8, i16); 2] {
        self.positions().map(|(x, h)| (x, ceil_row(h)))
    }

    pub fn shifted(&self, dx: i8) -> Self {
        Self {
            x: self.x + dx,
            ..*self
        }
    }

    pub fn lowered(&self, half_rows: i16) -> Self {
        Self {
            y_half: self.y_half + half_rows,
            ..*self
        }
    }

    pub fn with_orientation(&self, orientation: Orientation) -> Self {
        Self {
            orientation,
            ..*self
        }
    }
}

/// Column where new pairs appear
pub fn spawn_column(columns: u8) -> i8 {
    (columns / 2) as i8 - 1
}
