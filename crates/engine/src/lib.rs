//! Automated play: move search and placement
//!
//! - [`search`]: two-ply beam search returning a [`Move`]
//! - [`eval`]: the board heuristic the search ranks placements with
//! - [`place`]: turns a [`Move`] into rotate/shift/drop commands on a live engine
//!
//! # Example
//!
//! ```
//! use tui_puyo_core::GameEngine;
//! use tui_puyo_engine::{apply_place, MoveSearch};
//!
//! let mut game = GameEngine::new(7);
//! game.start();
//!
//! let search = MoveSearch::default();
//! let mv = search.think_for(&game).expect("active piece");
//! apply_place(&mut game, mv).expect("legal move");
//! assert_eq!(game.piece_id(), 2);
//! ```

pub mod eval;
pub mod place;
pub mod search;

pub use eval::{evaluate, SimResult, CHAIN_SCORE, DEAD_END_SCORE};
pub use place::{apply_place, PlaceError};
pub use search::{candidates, simulate, Move, MoveSearch};
