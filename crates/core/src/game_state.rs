//! Game state module - the turn and chain state machine
//!
//! Ties together the grid, the falling pair, the upcoming queue and scoring.
//! The engine only moves between phases in response to host calls:
//!
//! ```text
//! Spawning -> Falling -> (confirm_landing) -> Resolving -> Spawning
//!     |                                           |
//!     +---------------> GameOver <----------------+
//! ```
//!
//! Commands that do not apply in the current phase return `false` and change nothing.

use tracing::{debug, trace};

use crate::config::{ConfigError, GameConfig, ResolveMode};
use crate::grid::{ClearSet, Grid};
use crate::piece::Piece;
use crate::rng::PieceQueue;
use crate::scoring::ScoreEngine;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{GameAction, GameEvent, PiecePair, FALL_HALF_STEPS};

/// Wall kicks tried after an in-place rotation fails
const KICKS: [i8; 2] = [-1, 1];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Waiting for the next pair to appear
    Spawning,
    /// A pair is under control
    Falling,
    /// Chain passes are running
    Resolving,
    GameOver,
}

/// Outcome of one [`GameEngine::advance_chain`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChainStep {
    /// Groups were found and announced; they are still on the board
    Marked { chain: u32, tokens: usize },
    /// The marked groups were scored and removed
    Cleared { chain: u32, delta: u32 },
    /// Nothing left to clear; the cycle ended after `chains` passes
    Settled { chains: u32 },
    /// Not resolving
    Idle,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameEngine {
    config: GameConfig,
    grid: Grid,
    active: Option<Piece>,
    queue: PieceQueue,
    score: ScoreEngine,
    phase: Phase,
    /// Chain index of the last pass in the current resolution cycle
    chain: u32,
    /// Longest chain this game
    max_chain: u32,
    /// Groups announced by the last pass, removed by the next one
    marked: Option<ClearSet>,
    /// Half rows advanced per step is `FALL_HALF_STEPS * fall_multiplier`
    fall_multiplier: u16,
    started: bool,
    /// Monotonic episode id (increments on restart).
    episode_id: u32,
    /// Monotonic id for spawned pieces (increments only on successful spawn).
    piece_id: u32,
    events: Vec<GameEvent>,
}

impl GameEngine {
    /// Create a game on the default board with the given RNG seed
    pub fn new(seed: u32) -> Self {
        Self::build(GameConfig::default(), seed)
    }

    /// Create a game with a custom configuration
    pub fn with_config(config: GameConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: GameConfig, seed: u32) -> Self {
        let grid = Grid::new(config.columns, config.visible_rows, config.dead_cells.clone());
        let queue = PieceQueue::new(config.playable_colors(), config.next_queue_depth, seed);
        Self {
            config,
            grid,
            active: None,
            queue,
            score: ScoreEngine::new(),
            phase: Phase::Spawning,
            chain: 0,
            max_chain: 0,
            marked: None,
            fall_multiplier: 1,
            started: false,
            episode_id: 0,
            piece_id: 0,
            events: Vec::new(),
        }
    }

    /// Start the game and spawn the first piece
    pub fn start(&mut self) {
        if self.started {
            return;
        }
        self.started = true;
        self.events.push(GameEvent::GameStarted {
            episode_id: self.episode_id,
        });
        self.spawn_piece();
    }

    /// Throw away the board and start a new episode.
    ///
    /// The pair sequence continues from the current RNG state.
    pub fn restart(&mut self) {
        self.grid.reset();
        self.active = None;
        self.queue.reset();
        self.score.reset();
        self.phase = Phase::Spawning;
        self.chain = 0;
        self.max_chain = 0;
        self.marked = None;
        self.fall_multiplier = 1;
        self.episode_id = self.episode_id.wrapping_add(1);
        self.piece_id = 0;
        self.started = false;
        debug!(episode_id = self.episode_id, "game restarted");
        self.start();
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn started(&self) -> bool {
        self.started
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn resolving(&self) -> bool {
        self.phase == Phase::Resolving
    }

    pub fn active(&self) -> Option<Piece> {
        self.active
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Direct grid access for scripted setups and tests
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn score(&self) -> u32 {
        self.score.total()
    }

    pub fn score_engine(&self) -> &ScoreEngine {
        &self.score
    }

    /// The pairs shown as "next"
    pub fn next_pairs(&self) -> Vec<PiecePair> {
        self.queue.visible().collect()
    }

    /// The pair that spawns after the current one
    pub fn next_pair(&self) -> Option<PiecePair> {
        self.queue.peek()
    }

    pub fn episode_id(&self) -> u32 {
        self.episode_id
    }

    pub fn piece_id(&self) -> u32 {
        self.piece_id
    }

    pub fn chain(&self) -> u32 {
        self.chain
    }

    pub fn max_chain(&self) -> u32 {
        self.max_chain
    }

    pub fn fall_multiplier(&self) -> u16 {
        self.fall_multiplier
    }

    /// Scale the distance covered by later [`step`](Self::step) calls (1 = normal)
    pub fn set_fall_multiplier(&mut self, multiplier: u16) {
        self.fall_multiplier = multiplier.max(1);
    }

    /// Events queued since the last drain, oldest first
    pub fn pending_events(&self) -> &[GameEvent] {
        &self.events
    }

    /// Take every queued event
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.columns = self.grid.width();
        out.rows = self.grid.rows();
        self.grid.write_rows(&mut out.board);
        out.dead_cells.clear();
        out.dead_cells.extend_from_slice(self.grid.dead_cells());

        out.active = self.active.map(ActiveSnapshot::from);
        out.ghost = self.ghost_piece().map(ActiveSnapshot::from);
        out.next_queue.clear();
        out.next_queue.extend(self.queue.visible());
        out.score = self.score.total();
        out.chain = self.chain;
        out.max_chain = self.max_chain;
        out.game_over = self.game_over();
        out.resolving = self.resolving();
        out.clearing.clear();
        if let Some(set) = &self.marked {
            out.clearing.extend_from_slice(&set.cells);
        }
        out.episode_id = self.episode_id;
        out.piece_id = self.piece_id;
        out.seed = self.queue.sequencer().seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }

    /// The active piece, but only while it is under control
    fn falling_piece(&self) -> Option<Piece> {
        match self.phase {
            Phase::Falling => self.active,
            _ => None,
        }
    }

    /// Spawn a new piece from the queue
    fn spawn_piece(&mut self) -> bool {
        self.phase = Phase::Spawning;
        let pair = self.queue.pop();
        let piece = Piece::spawn(self.grid.width(), pair);

        if !self.grid.is_valid(&piece) {
            self.active = None;
            self.enter_game_over();
            return false;
        }

        self.active = Some(piece);
        self.queue.refill();
        self.piece_id = self.piece_id.wrapping_add(1);
        self.phase = Phase::Falling;

        trace!(
            piece_id = self.piece_id,
            color1 = pair.color1,
            color2 = pair.color2,
            "piece spawned"
        );
        self.events.push(GameEvent::PieceSpawned {
            piece_id: self.piece_id,
            pair,
        });
        true
    }

    fn enter_game_over(&mut self) {
        self.phase = Phase::GameOver;
        debug!(
            score = self.score.total(),
            pieces = self.piece_id,
            max_chain = self.max_chain,
            "game over"
        );
        self.events.push(GameEvent::GameOver);
    }

    /// Try to move the active piece sideways
    fn try_move(&mut self, dx: i8) -> bool {
        let Some(active) = self.falling_piece() else {
            return false;
        };

        let moved = active.shifted(dx);
        if !self.grid.is_valid(&moved) {
            return false;
        }
        self.active = Some(moved);
        self.events.push(GameEvent::PieceMoved);
        true
    }

    /// Rotate in place, then with a one-column kick either way.
    /// A result at or above the top of the buffer is refused.
    fn try_rotate(&mut self, clockwise: bool) -> bool {
        let Some(active) = self.falling_piece() else {
            return false;
        };

        let orientation = if clockwise {
            active.orientation.rotate_cw()
        } else {
            active.orientation.rotate_ccw()
        };
        let rotated = active.with_orientation(orientation);

        let candidate = std::iter::once(rotated)
            .chain(KICKS.iter().map(|&dx| rotated.shifted(dx)))
            .find(|piece| self.grid.is_valid(piece));

        match candidate {
            Some(piece) if !self.grid.check_ceiling(&piece) => {
                self.active = Some(piece);
                self.events.push(GameEvent::PieceRotated);
                true
            }
            _ => false,
        }
    }

    pub fn move_left(&mut self) -> bool {
        self.try_move(-1)
    }

    pub fn move_right(&mut self) -> bool {
        self.try_move(1)
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.try_rotate(true)
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.try_rotate(false)
    }

    /// One fall step of `fall_multiplier` half rows, stopping early at an obstacle.
    ///
    /// Returns true when the piece cannot fall a further half row.
    pub fn step(&mut self) -> bool {
        let Some(mut piece) = self.falling_piece() else {
            return false;
        };

        let advance = FALL_HALF_STEPS.saturating_mul(self.fall_multiplier);
        for _ in 0..advance {
            let next = piece.lowered(1);
            if !self.grid.is_valid(&next) {
                break;
            }
            piece = next;
        }
        self.active = Some(piece);

        !self.grid.is_valid(&piece.lowered(1))
    }

    /// Lowest valid position of the active piece
    pub fn ghost_piece(&self) -> Option<Piece> {
        let mut piece = self.active?;
        loop {
            let next = piece.lowered(1);
            if !self.grid.is_valid(&next) {
                return Some(piece);
            }
            piece = next;
        }
    }

    /// Drop the active piece as far as it goes and land it
    pub fn hard_drop(&mut self) -> bool {
        if self.falling_piece().is_none() {
            return false;
        }
        self.active = self.ghost_piece();
        self.confirm_landing()
    }

    /// Commit the active piece and start a resolution cycle.
    ///
    /// In [`ResolveMode::Immediate`] the whole chain runs before this returns.
    pub fn confirm_landing(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let Some(piece) = self.active.take() else {
            return false;
        };

        let written = self.grid.commit(piece);
        trace!(piece_id = self.piece_id, cells = ?written.as_slice(), "piece landed");
        self.events.push(GameEvent::PieceLanded);

        self.phase = Phase::Resolving;
        self.chain = 0;
        self.events.push(GameEvent::ChainStarted);

        if self.config.resolve_mode == ResolveMode::Immediate {
            while let ChainStep::Marked { .. } | ChainStep::Cleared { .. } = self.advance_chain() {}
        }
        true
    }

    /// Run one half of a chain pass.
    ///
    /// The first call applies gravity, finds the clearable groups and announces them with
    /// [`GameEvent::CellsClearing`] while they are still on the board. The next call scores
    /// and removes them. When nothing clears the cycle ends and the next piece spawns (or the
    /// game ends).
    pub fn advance_chain(&mut self) -> ChainStep {
        if self.phase != Phase::Resolving {
            return ChainStep::Idle;
        }

        if let Some(set) = self.marked.take() {
            return self.clear_marked(set);
        }

        self.grid.apply_gravity();
        let set = self.grid.find_clearable_groups();
        if set.is_empty() {
            let chains = self.chain;
            self.finish_chain();
            return ChainStep::Settled { chains };
        }

        self.chain += 1;
        self.max_chain = self.max_chain.max(self.chain);
        let tokens = set.token_count();
        trace!(chain = self.chain, tokens, "groups marked");
        self.events.push(GameEvent::CellsClearing {
            chain: self.chain,
            cells: set.cells.clone(),
            groups: set.groups.clone(),
        });
        self.marked = Some(set);

        ChainStep::Marked {
            chain: self.chain,
            tokens,
        }
    }

    fn clear_marked(&mut self, set: ClearSet) -> ChainStep {
        let result = self.score.score(&set.groups, self.chain);
        debug!(
            chain = self.chain,
            groups = set.groups.len(),
            tokens = set.token_count(),
            delta = result.delta(),
            "chain pass cleared"
        );

        self.grid.clear(&set.cells);
        self.events.push(GameEvent::ScoreChanged {
            total: result.total,
            delta: result.delta(),
        });

        ChainStep::Cleared {
            chain: self.chain,
            delta: result.delta(),
        }
    }

    fn finish_chain(&mut self) {
        let chains = self.chain;
        if chains > 0 && self.grid.is_all_clear() {
            self.score.flag_all_clear();
            debug!("all clear");
            self.events.push(GameEvent::AllClear);
        }
        self.events.push(GameEvent::ChainEnded { chains });
        if chains > 0 {
            debug!(chains, score = self.score.total(), "chain ended");
        }

        if self.grid.is_terminal() {
            self.enter_game_over();
            return;
        }
        self.spawn_piece();
    }

    /// Apply a game action.
    ///
    /// Returns true if the action changed anything.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.move_left(),
            GameAction::MoveRight => self.move_right(),
            GameAction::SoftDrop => {
                let before = self.falling_piece();
                if before.is_none() {
                    return false;
                }
                self.step();
                self.active != before
            }
            GameAction::HardDrop => self.hard_drop(),
            GameAction::RotateCw => self.rotate_cw(),
            GameAction::RotateCcw => self.rotate_ccw(),
            GameAction::ConfirmLanding => self.confirm_landing(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }
}
