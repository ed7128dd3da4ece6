//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains all the game rules, state management, and simulation logic.
//! It has **zero dependencies** on UI, input devices, or I/O, making it:
//!
//! - **Deterministic**: Same seed produces identical games (for automated play)
//! - **Testable**: Unit tests for every rule
//! - **Portable**: Can run in any host (terminal, GUI, headless)
//!
//! # Module Structure
//!
//! - [`grid`]: play buffer with half-step collision, flood-fill groups and gravity
//! - [`piece`]: the controlled pair and its half-row coordinate
//! - [`game_state`]: turn and chain state machine with pull-based events
//! - [`rng`]: bag-based pair generation
//! - [`scoring`]: chain, color and group-size scoring with the all-clear bonus
//! - [`config`]: board configuration and validation
//! - [`snapshot`]: read-only view of a game for hosts
//!
//! # Game Rules
//!
//! - A pair spawns at column `columns / 2 - 1` in the hidden rows and falls in half rows
//! - Rotations try in place, then one column left, then one column right
//! - Four or more connected same-color tokens clear; gravity then runs and may chain
//! - The game ends when a dead cell is filled after a chain settles, or a spawn is blocked
//!
//! # Example
//!
//! ```
//! use tui_puyo_core::GameEngine;
//! use tui_puyo_types::GameAction;
//!
//! let mut game = GameEngine::new(12345);
//! game.start();
//!
//! game.apply_action(GameAction::MoveRight);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.grid().occupied_count(), 2);
//! assert_eq!(game.piece_id(), 2);
//! ```

pub mod config;
pub mod game_state;
pub mod grid;
pub mod piece;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use tui_puyo_types as types;

// Re-export commonly used types for convenience
pub use config::{ConfigError, GameConfig, ResolveMode};
pub use game_state::{ChainStep, GameEngine, Phase};
pub use grid::{ClearSet, Grid, MAX_DIMENSION};
pub use piece::{ceil_row, round_row, spawn_column, Piece};
pub use rng::{PieceQueue, PieceSequencer, SimpleRng};
pub use scoring::{calculate_chain_score, ScoreEngine, ScoreResult};
pub use snapshot::{ActiveSnapshot, GameSnapshot};
