//! Board evaluation for move search
//!
//! Chains always win: any placement that clears scores [`CHAIN_SCORE`] per chain, far above
//! what the shape terms can reach. Otherwise the board is scored on three terms:
//!
//! - an ignition shape in the bottom-left corner (columns 1 and 2)
//! - stack height in the build area (columns 3 and up), quadratic with a cubic penalty near the top
//! - chain potential in the build area: groups of three weighted by depth, plus vertical contacts
//!   between different colors

use tui_puyo_core::Grid;
use tui_puyo_core::types::{Color, EMPTY};

/// Score per chain for a placement that clears
pub const CHAIN_SCORE: f64 = 10_000.0;

/// Score of a placement that fills a dead cell, or of a reply ply with no legal move
pub const DEAD_END_SCORE: f64 = -1_000_000.0;

/// First column of the build area
pub const BUILD_COLUMN: u8 = 3;

/// Outcome of dropping one pair and resolving its chain on a scratch grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SimResult {
    pub chains: u32,
    pub cleared: usize,
}

fn cell(grid: &Grid, x: u8, y: u8) -> Color {
    grid.get(x as i8, y as i8).unwrap_or(EMPTY)
}

/// Corner ignition shape.
///
/// The key color sits at column 1 on the floor. Rewards a matching token above it,
/// a different color wall at column 2 stacked three high, and an open igniter cell two rows up.
pub fn gtr_score(grid: &Grid) -> f64 {
    let bottom = grid.rows() - 1;
    let key = cell(grid, 1, bottom);
    if key == EMPTY {
        return 0.0;
    }

    let mut score = 0.0;
    if cell(grid, 1, bottom - 1) == key {
        score += 200.0;
    }

    let wall = cell(grid, 2, bottom);
    if wall != EMPTY {
        if wall != key {
            score += 150.0;
        }
        if cell(grid, 2, bottom - 1) == wall {
            score += 250.0;
        }
        if cell(grid, 2, bottom - 2) == wall {
            score += 300.0;
        }
    }

    match cell(grid, 1, bottom - 2) {
        EMPTY => score += 500.0,
        c if c == key => score -= 100.0,
        _ => score -= 2000.0,
    }
    score
}

/// Tallest column in the build area, measured in buffer rows
pub fn build_area_height(grid: &Grid) -> u8 {
    (BUILD_COLUMN..grid.width())
        .map(|x| grid.column_height(x))
        .max()
        .unwrap_or(0)
}

/// Reward almost-complete groups in columns `from..`
pub fn chain_potential(grid: &Grid, from: u8) -> f64 {
    let rows = grid.rows();
    let width = grid.width();
    let mut visited = vec![false; rows as usize * width as usize];
    let mut score = 0.0;

    for y in 0..rows {
        for x in from..width {
            let color = cell(grid, x, y);
            if color == EMPTY || visited[y as usize * width as usize + x as usize] {
                continue;
            }

            let group = grid.group_at(x, y);
            if group.len() == 3 {
                let center = group.iter().map(|&(_, gy)| gy as f64).sum::<f64>() / 3.0;
                let depth = rows as f64 - center;
                score += depth * depth * 2.0;
            }

            // Sandwich: a different color right below.
            if y + 1 < rows {
                let below = cell(grid, x, y + 1);
                if below != EMPTY && below != color {
                    score += 5.0;
                }
            }

            for (gx, gy) in group {
                visited[gy as usize * width as usize + gx as usize] = true;
            }
        }
    }
    score
}

/// Heuristic value of `grid` after a simulated placement
pub fn evaluate(grid: &Grid, result: &SimResult) -> f64 {
    if grid.is_terminal() {
        return DEAD_END_SCORE;
    }
    if result.chains > 0 {
        return CHAIN_SCORE * result.chains as f64;
    }

    let height = build_area_height(grid) as f64;
    let mut score = gtr_score(grid);
    score -= height * height * 5.0;
    score += chain_potential(grid, BUILD_COLUMN);

    if height > grid.height() as f64 - 4.0 {
        score -= height * height * height;
    }
    score
}
