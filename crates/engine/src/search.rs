//! Two-ply beam search over pair placements
//!
//! Every `(orientation, column)` whose spawn-row placement is valid is a candidate. Each one is
//! dropped on a cloned grid, its chain resolved, and the result scored by [`evaluate`]. The best
//! `beam_width` first-ply boards are then searched again with the next pair, and the first move
//! with the highest combined score wins.

use tracing::debug;

use tui_puyo_core::types::{Orientation, PiecePair, DEFAULT_BEAM_WIDTH, SPAWN_ROW};
use tui_puyo_core::{spawn_column, GameEngine, GameSnapshot, Grid, Piece};

use crate::eval::{evaluate, SimResult, DEAD_END_SCORE};

/// A placement chosen by the search: final orientation and axis column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub orientation: Orientation,
    pub column: i8,
}

impl Move {
    pub fn new(orientation: Orientation, column: i8) -> Self {
        Self {
            orientation,
            column,
        }
    }

    /// Centered, unrotated drop used when nothing else is legal
    pub fn fallback(columns: u8) -> Self {
        Self::new(Orientation::Up, spawn_column(columns))
    }

    /// The pair placed at this move's spawn-row position
    pub fn piece(&self, pair: PiecePair) -> Piece {
        Piece::new(self.column, SPAWN_ROW, self.orientation, pair)
    }
}

/// A scored first-ply placement and the board it leaves behind
#[derive(Debug, Clone)]
struct Candidate {
    mv: Move,
    score: f64,
    grid: Grid,
}

/// Every move whose spawn-row placement is valid, orientation-major
pub fn candidates(grid: &Grid, pair: PiecePair) -> Vec<Move> {
    let mut moves = Vec::with_capacity(4 * grid.width() as usize);
    for orientation in Orientation::ALL {
        for column in 0..grid.width() as i8 {
            let mv = Move::new(orientation, column);
            if grid.is_valid(&mv.piece(pair)) {
                moves.push(mv);
            }
        }
    }
    moves
}

/// Drop `piece` half a row at a time while valid, commit it, and resolve the chain.
pub fn simulate(grid: &mut Grid, piece: Piece) -> SimResult {
    let mut piece = piece;
    while grid.is_valid(&piece.lowered(1)) {
        piece = piece.lowered(1);
    }
    grid.commit(piece);

    let mut result = SimResult::default();
    while let Some(set) = grid.resolve_pass() {
        result.chains += 1;
        result.cleared += set.token_count();
    }
    result
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveSearch {
    beam_width: usize,
}

impl Default for MoveSearch {
    fn default() -> Self {
        Self::new(DEFAULT_BEAM_WIDTH)
    }
}

impl MoveSearch {
    pub fn new(beam_width: usize) -> Self {
        Self {
            beam_width: beam_width.max(1),
        }
    }

    pub fn beam_width(&self) -> usize {
        self.beam_width
    }

    /// Score every candidate for `pair`, best first. Ties keep candidate order.
    fn rank(&self, grid: &Grid, pair: PiecePair) -> Vec<Candidate> {
        let mut ranked: Vec<Candidate> = candidates(grid, pair)
            .into_iter()
            .map(|mv| {
                let mut scratch = grid.clone();
                let result = simulate(&mut scratch, mv.piece(pair));
                Candidate {
                    mv,
                    score: evaluate(&scratch, &result),
                    grid: scratch,
                }
            })
            .collect();
        ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
        ranked
    }

    /// Best single-ply score for `pair` on `grid`
    fn best_reply(&self, grid: &Grid, pair: PiecePair) -> f64 {
        candidates(grid, pair)
            .into_iter()
            .map(|mv| {
                let mut scratch = grid.clone();
                let result = simulate(&mut scratch, mv.piece(pair));
                evaluate(&scratch, &result)
            })
            .fold(DEAD_END_SCORE, f64::max)
    }

    /// Choose a placement for `current`, looking one pair further ahead when `next` is known.
    pub fn think(&self, grid: &Grid, current: PiecePair, next: Option<PiecePair>) -> Move {
        let mut ranked = self.rank(grid, current);
        let Some(first) = ranked.first() else {
            debug!("no legal placement, using fallback");
            return Move::fallback(grid.width());
        };

        let Some(next) = next else {
            debug!(mv = ?first.mv, score = first.score, "one-ply move");
            return first.mv;
        };

        ranked.truncate(self.beam_width);
        let mut best = ranked[0].mv;
        let mut best_score = f64::NEG_INFINITY;
        for candidate in &ranked {
            let total = candidate.score + self.best_reply(&candidate.grid, next);
            if total > best_score {
                best_score = total;
                best = candidate.mv;
            }
        }

        debug!(mv = ?best, score = best_score, "two-ply move");
        best
    }

    /// Search for the engine's active pair, using its next pair as the second ply
    pub fn think_for(&self, engine: &GameEngine) -> Option<Move> {
        let active = engine.active()?;
        Some(self.think(engine.grid(), active.pair(), engine.next_pair()))
    }

    /// Search from a host's snapshot: its active pair, with the first queued pair as the next.
    ///
    /// Returns `None` when the snapshot has no active pair or its board is malformed.
    pub fn think_snapshot(&self, snapshot: &GameSnapshot) -> Option<Move> {
        let active = snapshot.active?;
        let grid = Grid::from_snapshot(snapshot)?;
        let current = PiecePair::new(active.color1, active.color2);
        Some(self.think(&grid, current, snapshot.next_queue.first().copied()))
    }
}
