//! Grid module - manages the play buffer
//!
//! The grid is `columns` wide and `visible_rows + 2` tall; the two top rows are hidden.
//! Uses a flat vector in row-major order (`y * width + x`) that never changes size after
//! construction - only cell values mutate.
//!
//! Coordinates: (x, y) where x ranges `0..width` (left to right) and y ranges
//! `0..visible_rows + 2` (top to bottom). Rows at negative y lie above the buffer and are
//! always free, which gives rotations headroom over the spawn row.

use arrayvec::ArrayVec;

use crate::piece::{ceil_row, round_row, Piece};
use crate::snapshot::GameSnapshot;
use crate::types::{CellPos, ClearedGroup, Color, EMPTY, HIDDEN_ROWS, MIN_GROUP_SIZE};

/// Cells and groups found by one clearable-group scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClearSet {
    /// Every cell belonging to a group of [`MIN_GROUP_SIZE`] or more
    pub cells: Vec<CellPos>,
    /// One entry per clearable group, in scan order
    pub groups: Vec<ClearedGroup>,
}

impl ClearSet {
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Number of tokens that clearing this set removes
    pub fn token_count(&self) -> usize {
        self.cells.len()
    }
}

/// The play buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u8,
    visible_rows: u8,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Color>,
    dead_cells: Vec<CellPos>,
}

/// Largest width, and largest buffer height, addressable with `i8` coordinates
pub const MAX_DIMENSION: u8 = i8::MAX as u8;

impl Grid {
    /// Create an empty grid with `visible_rows` plus the hidden rows.
    ///
    /// Dimensions are clamped so every cell stays addressable: at most [`MAX_DIMENSION`]
    /// columns and [`MAX_DIMENSION`] buffer rows.
    pub fn new(width: u8, visible_rows: u8, dead_cells: Vec<CellPos>) -> Self {
        let width = width.min(MAX_DIMENSION);
        let visible_rows = visible_rows.min(MAX_DIMENSION - HIDDEN_ROWS);
        let rows = visible_rows as usize + HIDDEN_ROWS as usize;
        Self {
            width,
            visible_rows,
            cells: vec![EMPTY; width as usize * rows],
            dead_cells,
        }
    }

    /// Rebuild the buffer a snapshot was taken from.
    ///
    /// Returns `None` when the board does not match the snapshot's dimensions.
    pub fn from_snapshot(snapshot: &GameSnapshot) -> Option<Self> {
        if snapshot.rows < HIDDEN_ROWS || snapshot.board.len() != snapshot.rows as usize {
            return None;
        }
        let mut grid = Self::new(
            snapshot.columns,
            snapshot.rows - HIDDEN_ROWS,
            snapshot.dead_cells.clone(),
        );
        if grid.width != snapshot.columns || grid.rows() != snapshot.rows {
            return None;
        }

        let width = grid.width as usize;
        for (y, row) in snapshot.board.iter().enumerate() {
            if row.len() != width {
                return None;
            }
            grid.cells[y * width..(y + 1) * width].copy_from_slice(row);
        }
        Some(grid)
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i16, y: i16) -> Option<usize> {
        if x < 0 || x >= self.width as i16 || y < 0 || y >= self.rows() as i16 {
            return None;
        }
        Some(y as usize * self.width as usize + x as usize)
    }

    /// Number of columns
    pub fn width(&self) -> u8 {
        self.width
    }

    /// Number of visible rows
    pub fn height(&self) -> u8 {
        self.visible_rows
    }

    /// Number of buffer rows (visible plus hidden)
    pub fn rows(&self) -> u8 {
        self.visible_rows + HIDDEN_ROWS
    }

    pub fn dead_cells(&self) -> &[CellPos] {
        &self.dead_cells
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i8, y: i8) -> Option<Color> {
        self.index(x as i16, y as i16).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i8, y: i8, color: Color) -> bool {
        match self.index(x as i16, y as i16) {
            Some(idx) => {
                self.cells[idx] = color;
                true
            }
            None => false,
        }
    }

    /// Check if position is within bounds and filled
    pub fn is_occupied(&self, x: i8, y: i8) -> bool {
        matches!(self.get(x, y), Some(c) if c != EMPTY)
    }

    /// Whole-row collision test for a single token.
    ///
    /// Walls and the floor collide; anything above the buffer is free; inside the buffer
    /// only occupied cells collide.
    fn collides(&self, x: i8, row: i16) -> bool {
        if x < 0 || x as u8 >= self.width || row >= self.rows() as i16 {
            return true;
        }
        if row < 0 {
            return false;
        }
        self.index(x as i16, row)
            .is_some_and(|idx| self.cells[idx] != EMPTY)
    }

    /// Check that both tokens of `piece`, with their rows rounded up, are free
    pub fn is_valid(&self, piece: &Piece) -> bool {
        piece
            .ceil_cells()
            .iter()
            .all(|&(x, row)| !self.collides(x, row))
    }

    /// True when the axis row, rounded up, reaches the top of the buffer.
    ///
    /// Rotations and kicks that end here are refused.
    pub fn check_ceiling(&self, piece: &Piece) -> bool {
        ceil_row(piece.y_half) <= 0
    }

    /// Write both tokens of `piece` into the grid and return the cells written.
    ///
    /// Rows are rounded to the nearest whole row. Writes to the topmost hidden row or
    /// outside the buffer are dropped.
    pub fn commit(&mut self, piece: Piece) -> ArrayVec<CellPos, 2> {
        let mut written = ArrayVec::new();
        let colors = [piece.color1, piece.color2];
        for ((x, y_half), color) in piece.positions().into_iter().zip(colors) {
            let row = round_row(y_half);
            if row < 1 {
                continue;
            }
            if let Some(idx) = self.index(x as i16, row) {
                self.cells[idx] = color;
                written.push((x as u8, row as u8));
            }
        }
        written
    }

    /// Compact every column downward, preserving order.
    /// Returns true if any token moved.
    pub fn apply_gravity(&mut self) -> bool {
        let width = self.width as usize;
        let rows = self.rows() as usize;
        let mut moved = false;

        for x in 0..width {
            // Two pointers: read scans bottom to top, write is the next free slot.
            let mut write_y = rows;
            for read_y in (0..rows).rev() {
                let color = self.cells[read_y * width + x];
                if color == EMPTY {
                    continue;
                }
                write_y -= 1;
                if write_y != read_y {
                    self.cells[write_y * width + x] = color;
                    self.cells[read_y * width + x] = EMPTY;
                    moved = true;
                }
            }
        }

        moved
    }

    /// Flood fill from (x, y) over same-color 4-neighbours, marking `visited`.
    fn flood(&self, x: u8, y: u8, visited: &mut [bool], out: &mut Vec<CellPos>) {
        let width = self.width as usize;
        let start = y as usize * width + x as usize;
        let color = self.cells[start];
        if color == EMPTY || visited[start] {
            return;
        }

        let mut stack = vec![(x, y)];
        visited[start] = true;

        while let Some((cx, cy)) = stack.pop() {
            out.push((cx, cy));
            for (dx, dy) in [(0i16, -1i16), (0, 1), (-1, 0), (1, 0)] {
                let Some(idx) = self.index(cx as i16 + dx, cy as i16 + dy) else {
                    continue;
                };
                if !visited[idx] && self.cells[idx] == color {
                    visited[idx] = true;
                    stack.push(((cx as i16 + dx) as u8, (cy as i16 + dy) as u8));
                }
            }
        }
    }

    /// The connected same-color group containing (x, y); empty for an empty cell
    pub fn group_at(&self, x: u8, y: u8) -> Vec<CellPos> {
        let mut group = Vec::new();
        if self.index(x as i16, y as i16).is_none() {
            return group;
        }
        let mut visited = vec![false; self.cells.len()];
        self.flood(x, y, &mut visited, &mut group);
        group
    }

    /// Every connected same-color group of [`MIN_GROUP_SIZE`] or more.
    ///
    /// Scans row-major from the top-left; each cell is examined once.
    pub fn find_clearable_groups(&self) -> ClearSet {
        let mut set = ClearSet::default();
        let mut visited = vec![false; self.cells.len()];
        let mut group = Vec::new();

        for y in 0..self.rows() {
            for x in 0..self.width {
                group.clear();
                self.flood(x, y, &mut visited, &mut group);
                if group.len() >= MIN_GROUP_SIZE {
                    let (gx, gy) = group[0];
                    let color = self.cells[gy as usize * self.width as usize + gx as usize];
                    set.groups.push(ClearedGroup {
                        color,
                        count: group.len(),
                    });
                    set.cells.extend_from_slice(&group);
                }
            }
        }

        set
    }

    /// Zero the given cells; out-of-bounds coordinates are ignored
    pub fn clear(&mut self, cells: &[CellPos]) {
        for &(x, y) in cells {
            if let Some(idx) = self.index(x as i16, y as i16) {
                self.cells[idx] = EMPTY;
            }
        }
    }

    /// One chain pass: gravity, then find and clear every clearable group.
    /// Returns None once nothing is left to clear.
    pub fn resolve_pass(&mut self) -> Option<ClearSet> {
        self.apply_gravity();
        let set = self.find_clearable_groups();
        if set.is_empty() {
            return None;
        }
        self.clear(&set.cells);
        Some(set)
    }

    /// Game over condition: some dead cell is filled
    pub fn is_terminal(&self) -> bool {
        self.dead_cells
            .iter()
            .any(|&(x, y)| self.is_occupied(x as i8, y as i8))
    }

    /// True when every cell, hidden rows included, is empty
    pub fn is_all_clear(&self) -> bool {
        self.cells.iter().all(|&c| c == EMPTY)
    }

    /// Number of filled cells
    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != EMPTY).count()
    }

    /// Stack height of column `x` measured from the floor of the buffer
    pub fn column_height(&self, x: u8) -> u8 {
        let width = self.width as usize;
        let rows = self.rows();
        (0..rows)
            .find(|&y| self.cells[y as usize * width + x as usize] != EMPTY)
            .map_or(0, |top| rows - top)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Color] {
        &self.cells
    }

    /// Row `y` as a slice
    pub fn row(&self, y: u8) -> &[Color] {
        let width = self.width as usize;
        let start = y as usize * width;
        &self.cells[start..start + width]
    }

    /// Copy the buffer into `out` as rows of color ids, reusing its allocations
    pub fn write_rows(&self, out: &mut Vec<Vec<Color>>) {
        let rows = self.rows() as usize;
        out.resize_with(rows, Vec::new);
        for (y, dst) in out.iter_mut().enumerate() {
            dst.clear();
            dst.extend_from_slice(self.row(y as u8));
        }
    }

    /// Fill the bottom of the buffer from text rows.
    ///
    /// `.` is empty and `1`-`9` are colors; the last line lands on the floor.
    /// Returns false if the picture does not fit.
    pub fn fill_from_ascii(&mut self, lines: &[&str]) -> bool {
        if lines.len() > self.rows() as usize {
            return false;
        }
        let top = self.rows() as usize - lines.len();
        for (i, line) in lines.iter().enumerate() {
            if line.chars().count() > self.width as usize {
                return false;
            }
            for (x, ch) in line.chars().enumerate() {
                let color = ch.to_digit(10).map_or(EMPTY, |d| d as Color);
                self.set(x as i8, (top + i) as i8, color);
            }
        }
        true
    }

    /// Clear the entire grid
    pub fn reset(&mut self) {
        self.cells.fill(EMPTY);
    }
}
