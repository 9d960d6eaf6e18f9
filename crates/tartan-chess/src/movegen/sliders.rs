//! Sliding piece (bishop, rook, queen) turn generation.

use tartan_board::{Offset, Position};

use crate::RawBoard;
use crate::attacks::{DIAGONALS, ORTHOGONALS};
use crate::piece::Piece;
use crate::turn_map::TurnMap;

use super::{Step, step_to};

pub(super) fn gen_bishop(board: &RawBoard, from: Position, piece: Piece, map: &mut TurnMap) {
    gen_rays(board, from, piece, map, &DIAGONALS);
}

pub(super) fn gen_rook(board: &RawBoard, from: Position, piece: Piece, map: &mut TurnMap) {
    gen_rays(board, from, piece, map, &ORTHOGONALS);
}

pub(super) fn gen_queen(board: &RawBoard, from: Position, piece: Piece, map: &mut TurnMap) {
    gen_rays(board, from, piece, map, &ORTHOGONALS);
    gen_rays(board, from, piece, map, &DIAGONALS);
}

/// Walk each direction until the edge or the first piece, which is captured if hostile.
fn gen_rays(board: &RawBoard, from: Position, piece: Piece, map: &mut TurnMap, directions: &[Offset]) {
    for &direction in directions {
        for to in from.ray(direction) {
            if step_to(board, map, piece, from, to) == Step::Blocked {
                break;
            }
        }
    }
}
