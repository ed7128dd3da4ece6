//! Move search and placement tests

use tui_puyo::core::{GameConfig, GameEngine, Grid};
use tui_puyo::engine::{apply_place, candidates, simulate, Move, MoveSearch, PlaceError};
use tui_puyo::types::{Orientation, PiecePair};

fn board(lines: &[&str]) -> Grid {
    let mut grid = Grid::new(6, 12, vec![(2, 2)]);
    assert!(grid.fill_from_ascii(lines));
    grid
}

#[test]
fn test_empty_board_moves_are_legal() {
    let grid = board(&[]);
    let search = MoveSearch::default();
    for pair in [PiecePair::new(1, 1), PiecePair::new(1, 2), PiecePair::new(4, 3)] {
        for next in [None, Some(PiecePair::new(2, 2))] {
            let mv = search.think(&grid, pair, next);
            assert!(candidates(&grid, pair).contains(&mv), "{mv:?} not a candidate");

            let mut scratch = grid.clone();
            simulate(&mut scratch, mv.piece(pair));
            assert_eq!(scratch.occupied_count(), 2);
            assert!(!scratch.is_terminal());
        }
    }
}

#[test]
fn test_fallback_is_centered_up() {
    assert_eq!(Move::fallback(6), Move::new(Orientation::Up, 2));
    assert_eq!(Move::fallback(8), Move::new(Orientation::Up, 3));
}

#[test]
fn test_full_spawn_row_falls_back() {
    let mut grid = board(&[]);
    for x in 0..6 {
        grid.set(x, 1, 1 + (x as u8 % 3));
    }
    assert!(candidates(&grid, PiecePair::new(1, 2)).is_empty());
    assert_eq!(
        MoveSearch::default().think(&grid, PiecePair::new(1, 2), None),
        Move::fallback(6)
    );
}

#[test]
fn test_search_completes_group() {
    // Three 4s on the floor; only the fourth column finishes the group.
    let grid = board(&["...444"]);
    let pair = PiecePair::new(4, 1);
    let mv = MoveSearch::new(1).think(&grid, pair, None);

    let mut scratch = grid.clone();
    let result = simulate(&mut scratch, mv.piece(pair));
    assert_eq!(result.chains, 1);
    assert_eq!(result.cleared, 4);
}

#[test]
fn test_wider_board_search() {
    let config = GameConfig {
        columns: 8,
        dead_cells: vec![(3, 2)],
        ..GameConfig::default()
    };
    let mut engine = GameEngine::with_config(config, 17).expect("valid config");
    engine.start();

    let search = MoveSearch::new(2);
    for _ in 0..20 {
        let mv = search.think_for(&engine).expect("expected active piece");
        assert!((0..8).contains(&mv.column));
        apply_place(&mut engine, mv).expect("searched move applies");
    }
    assert_eq!(engine.piece_id(), 21);
}

#[test]
fn test_place_error_codes() {
    let mut engine = GameEngine::new(1);
    assert_eq!(
        apply_place(&mut engine, Move::new(Orientation::Up, 2)),
        Err(PlaceError::NoActive)
    );
    assert_eq!(PlaceError::NoActive.code(), "invalid_place");
    assert_eq!(PlaceError::NotPlayable.code(), "not_playable");
    assert_eq!(
        PlaceError::ColumnOutOfBounds.to_string(),
        PlaceError::ColumnOutOfBounds.message()
    );
}
