use thiserror::Error;

use tui_puyo_core::GameEngine;

use crate::search::Move;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlaceError {
    #[error("game is not playable")]
    NotPlayable,
    #[error("no active piece")]
    NoActive,
    #[error("could not rotate to target orientation")]
    RotationBlocked,
    #[error("target column would place the pair out of bounds")]
    ColumnOutOfBounds,
    #[error("could not move to target column due to collision")]
    ColumnBlocked,
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "not_playable",
            PlaceError::NoActive
            | PlaceError::RotationBlocked
            | PlaceError::ColumnOutOfBounds
            | PlaceError::ColumnBlocked => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "game is not playable",
            PlaceError::NoActive => "no active piece",
            PlaceError::RotationBlocked => "could not rotate to target orientation",
            PlaceError::ColumnOutOfBounds => "target column would place the pair out of bounds",
            PlaceError::ColumnBlocked => "could not move to target column due to collision",
        }
    }
}

/// Rotate, shift and hard-drop the active pair so it lands as `mv` describes.
///
/// On error the engine may have been partially moved but never landed.
pub fn apply_place(engine: &mut GameEngine, mv: Move) -> Result<(), PlaceError> {
    if engine.game_over() || engine.resolving() {
        return Err(PlaceError::NotPlayable);
    }

    let Some(active0) = engine.active() else {
        return Err(PlaceError::NoActive);
    };

    let columns = engine.grid().width() as i8;
    let (dx, _) = mv.orientation.offset();
    if mv.column < 0 || mv.column >= columns || mv.column + dx < 0 || mv.column + dx >= columns {
        return Err(PlaceError::ColumnOutOfBounds);
    }

    // Try CW/CCW plans including 180; keep shorter first.
    let cur = active0.orientation.index() as i8;
    let tgt = mv.orientation.index() as i8;
    let cw = (tgt - cur).rem_euclid(4) as u8;
    let ccw = (cur - tgt).rem_euclid(4) as u8;

    let mut plans: [(bool, u8); 2] = [(true, cw), (false, ccw)];
    if plans[1].1 < plans[0].1 {
        plans.swap(0, 1);
    }

    let snapshot = engine.clone();
    let mut rotated = false;
    for (clockwise, steps) in plans {
        *engine = snapshot.clone();
        let ok = (0..steps).all(|_| {
            if clockwise {
                engine.rotate_cw()
            } else {
                engine.rotate_ccw()
            }
        });
        if ok {
            rotated = true;
            break;
        }
    }
    if !rotated {
        *engine = snapshot;
        return Err(PlaceError::RotationBlocked);
    }

    let Some(active) = engine.active() else {
        return Err(PlaceError::NoActive);
    };

    let shift = mv.column - active.x;
    for _ in 0..shift.unsigned_abs() {
        let moved = if shift > 0 {
            engine.move_right()
        } else {
            engine.move_left()
        };
        if !moved {
            return Err(PlaceError::ColumnBlocked);
        }
    }

    if !engine.hard_drop() {
        return Err(PlaceError::NotPlayable);
    }

    Ok(())
}
