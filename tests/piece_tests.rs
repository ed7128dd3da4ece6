//! Piece tests - orientation offsets and half-row geometry

use tui_puyo::core::{ceil_row, round_row, spawn_column, Piece};
use tui_puyo::types::{Orientation, PiecePair};

#[test]
fn test_attached_is_axis_plus_offset() {
    let pair = PiecePair::new(1, 2);
    for orientation in Orientation::ALL {
        let piece = Piece::new(2, 6, orientation, pair);
        let (dx, dy) = orientation.offset();
        assert_eq!(piece.attached(), (2 + dx, 12 + dy as i16 * 2));
        assert_eq!(piece.positions()[0], (2, 12));
    }
}

#[test]
fn test_spawn_column_by_width() {
    assert_eq!(spawn_column(6), 2);
    assert_eq!(spawn_column(8), 3);
    assert_eq!(spawn_column(2), 0);
}

#[test]
fn test_ceil_and_round_rows() {
    for (half, row) in [(0, 0), (1, 1), (2, 1), (3, 2), (-1, 0), (-2, -1)] {
        assert_eq!(ceil_row(half), row, "ceil_row({half})");
        assert_eq!(round_row(half), row, "round_row({half})");
    }
}

#[test]
fn test_transforms_do_not_mutate() {
    let piece = Piece::spawn(6, PiecePair::new(3, 4));
    let moved = piece.shifted(1).lowered(3).with_orientation(Orientation::Left);

    assert_eq!(piece.x, 2);
    assert_eq!(piece.y_half, 2);
    assert_eq!(moved.x, 3);
    assert_eq!(moved.y_half, 5);
    assert_eq!(moved.orientation, Orientation::Left);
    assert_eq!(moved.pair(), PiecePair::new(3, 4));
}

#[test]
fn test_half_row_cells_round_up() {
    let piece = Piece::new(0, 3, Orientation::Up, PiecePair::new(1, 1)).lowered(1);
    assert_eq!(piece.y(), 3.5);
    assert_eq!(piece.ceil_cells(), [(0, 4), (0, 3)]);
}
