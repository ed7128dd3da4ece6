//! TUI Puyo (workspace facade crate).
//!
//! Re-exports the member crates as `tui_puyo::{core,engine,types}` while the implementation
//! lives in dedicated crates under `crates/`.

pub use tui_puyo_core as core;
pub use tui_puyo_engine as engine;
pub use tui_puyo_types as types;
