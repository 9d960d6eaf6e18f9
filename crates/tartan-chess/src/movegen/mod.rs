//! Pseudo-legal turn generation.
//!
//! Generators apply geometry, occupancy, and color rules. Whether a turn
//! leaves the mover's king attacked is decided later by the chessboard,
//! which simulates each candidate on a scratch grid.

mod king;
mod knights;
mod pawns;
mod sliders;

use tartan_board::Position;

use crate::RawBoard;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::turn::Turn;
use crate::turn_map::TurnMap;

use self::king::gen_king;
use self::knights::gen_knights;
use self::pawns::gen_pawns;
use self::sliders::{gen_bishop, gen_queen, gen_rook};

/// Generate every pseudo-legal turn for `piece` standing on `from`.
pub(crate) fn generate_turns(board: &RawBoard, from: Position, piece: Piece) -> TurnMap {
    let mut map = TurnMap::new(from);
    match piece.kind() {
        PieceKind::Pawn => gen_pawns(board, from, piece, &mut map),
        PieceKind::Knight => gen_knights(board, from, piece, &mut map),
        PieceKind::Bishop => gen_bishop(board, from, piece, &mut map),
        PieceKind::Rook => gen_rook(board, from, piece, &mut map),
        PieceKind::Queen => gen_queen(board, from, piece, &mut map),
        PieceKind::King => gen_king(board, from, piece, &mut map),
    }
    map
}

/// Outcome of offering one destination to a non-pawn piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    /// Tile was empty; a slider may keep going.
    Open,
    /// Tile held a piece; the ray ends here.
    Blocked,
}

/// Push a quiet turn or a capture to `to`, unless a friendly piece stands there.
fn step_to(board: &RawBoard, map: &mut TurnMap, piece: Piece, from: Position, to: Position) -> Step {
    match board.get(to) {
        None => {
            map.push(Turn::normal(board.id(), piece, from, to));
            Step::Open
        }
        Some(other) => {
            if other.color() != piece.color() {
                map.push(Turn::capturing(board.id(), piece, from, to, other));
            }
            Step::Blocked
        }
    }
}
