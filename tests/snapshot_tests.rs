//! Snapshot tests - what a host sees between commands

use tui_puyo::core::{GameConfig, GameEngine, GameSnapshot, ResolveMode};
use tui_puyo::types::{GameAction, EMPTY};

#[test]
fn test_snapshot_into_reuses_buffers() {
    let mut engine = GameEngine::new(3);
    engine.start();

    let mut snap = GameSnapshot::default();
    engine.snapshot_into(&mut snap);
    let board_ptr = snap.board.as_ptr();
    let row_ptr = snap.board[0].as_ptr();

    engine.apply_action(GameAction::HardDrop);
    engine.snapshot_into(&mut snap);
    assert_eq!(snap.board.as_ptr(), board_ptr);
    assert_eq!(snap.board[0].as_ptr(), row_ptr);
    assert_eq!(snap, engine.snapshot());
}

#[test]
fn test_snapshot_next_queue_matches_engine() {
    let config = GameConfig {
        next_queue_depth: 4,
        ..GameConfig::default()
    };
    let mut engine = GameEngine::with_config(config, 8).expect("valid config");
    engine.start();

    for _ in 0..5 {
        let snap = engine.snapshot();
        assert_eq!(snap.next_queue.len(), 4);
        assert_eq!(snap.next_queue, engine.next_pairs());
        assert_eq!(snap.piece_id, engine.piece_id());
        engine.hard_drop();
    }
}

#[test]
fn test_snapshot_flags_while_resolving() {
    let config = GameConfig {
        resolve_mode: ResolveMode::Stepped,
        ..GameConfig::default()
    };
    let mut engine = GameEngine::with_config(config, 8).expect("valid config");
    engine.start();
    engine.hard_drop();

    let snap = engine.snapshot();
    assert!(snap.resolving);
    assert!(snap.active.is_none());
    assert!(snap.ghost.is_none());
    assert!(!snap.playable());
}

#[test]
fn test_snapshot_after_game_over() {
    let mut engine = GameEngine::new(5);
    engine.start();
    for y in 3..14 {
        engine.grid_mut().set(2, y, 1 + (y as u8 % 2));
    }
    // The pair spawns over the filled column and lands on the dead cell.
    assert!(engine.apply_action(GameAction::HardDrop));

    let snap = engine.snapshot();
    assert!(snap.game_over);
    assert!(!snap.playable());
    assert_ne!(snap.cell(2, 2), Some(EMPTY));
}

#[test]
fn test_snapshot_carries_dead_cells() {
    let mut engine = GameEngine::new(5);
    engine.start();
    let snap = engine.snapshot();
    assert_eq!(snap.dead_cells, vec![(2, 2)]);
    assert!(snap.clearing.is_empty());
}
