//! Pawn turn generation.

use tartan_board::{Offset, Position};

use crate::RawBoard;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::turn::{Capture, Turn};
use crate::turn_map::TurnMap;

/// Generate pushes, captures, promotions, and en passant.
pub(super) fn gen_pawns(board: &RawBoard, from: Position, pawn: Piece, map: &mut TurnMap) {
    let us = pawn.color();
    let forward = us.forward();

    // Pushes
    if let Some(one) = from.translate(Offset::new(0, forward)) {
        if !board.is_occupied(one) {
            push_or_promote(board, map, pawn, from, one, None);
            if from.rank() == us.pawn_rank() {
                if let Some(two) = one.translate(Offset::new(0, forward)) {
                    if !board.is_occupied(two) {
                        map.push(Turn::normal(board.id(), pawn, from, two));
                    }
                }
            }
        }
    }

    // Diagonal captures
    for df in [-1, 1] {
        let Some(to) = from.translate(Offset::new(df, forward)) else {
            continue;
        };
        if let Some(victim) = board.get(to) {
            if victim.color() != us {
                push_or_promote(board, map, pawn, from, to, Some(victim));
            }
        }
    }

    gen_en_passant(board, from, pawn, map);
}

/// Push one turn, or one per promotion kind when `to` is the last rank.
fn push_or_promote(
    board: &RawBoard,
    map: &mut TurnMap,
    pawn: Piece,
    from: Position,
    to: Position,
    captured: Option<Piece>,
) {
    if to.rank() == pawn.color().promotion_rank() {
        for kind in PieceKind::PROMOTIONS {
            map.push(Turn::promoting(board.id(), pawn, from, to, kind, captured));
        }
        return;
    }
    match captured {
        Some(victim) => map.push(Turn::capturing(board.id(), pawn, from, to, victim)),
        None => map.push(Turn::normal(board.id(), pawn, from, to)),
    }
}

/// En passant is available only right after an enemy pawn's double step
/// that landed beside this pawn.
fn gen_en_passant(board: &RawBoard, from: Position, pawn: Piece, map: &mut TurnMap) {
    let Some(last) = board.last_entry() else {
        return;
    };
    let moved = last.piece();
    if moved.kind() != PieceKind::Pawn || moved.color() == pawn.color() {
        return;
    }
    if last.from().rank().abs_diff(last.to().rank()) != 2
        || last.to().rank() != from.rank()
        || last.to().file().abs_diff(from.file()) != 1
    {
        return;
    }
    let Some(victim) = board.get(last.to()) else {
        return;
    };
    let behind = Offset::new(0, pawn.color().forward());
    let Some(to) = last.to().translate(behind) else {
        return;
    };
    if board.is_occupied(to) {
        return;
    }
    map.push(Turn::en_passant(
        board.id(),
        pawn,
        from,
        to,
        Capture {
            piece: victim,
            position: last.to(),
        },
    ));
}
