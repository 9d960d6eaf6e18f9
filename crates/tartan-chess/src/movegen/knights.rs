//! Knight turn generation.

use tartan_board::Position;

use crate::RawBoard;
use crate::attacks::KNIGHT_JUMPS;
use crate::piece::Piece;
use crate::turn_map::TurnMap;

use super::step_to;

/// Generate knight jumps; blocking pieces in between do not matter.
pub(super) fn gen_knights(board: &RawBoard, from: Position, piece: Piece, map: &mut TurnMap) {
    for to in KNIGHT_JUMPS.iter().filter_map(|&jump| from.translate(jump)) {
        step_to(board, map, piece, from, to);
    }
}
