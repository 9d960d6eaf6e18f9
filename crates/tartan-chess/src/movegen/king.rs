//! King turn and castling generation.

use tartan_board::{Offset, Position};

use crate::RawBoard;
use crate::attacks::{KING_STEPS, is_attacked};
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::turn::{Castle, Turn};
use crate::turn_map::TurnMap;

use super::step_to;

/// King's starting file.
const KING_FILE: u8 = 4;

/// Rook file and walking direction for each wing.
const WINGS: [(u8, i8); 2] = [(7, 1), (0, -1)];

/// Generate single steps and castling.
pub(super) fn gen_king(board: &RawBoard, from: Position, king: Piece, map: &mut TurnMap) {
    for to in KING_STEPS.iter().filter_map(|&step| from.translate(step)) {
        step_to(board, map, king, from, to);
    }
    gen_castles(board, from, king, map);
}

/// Castling needs an unmoved king on its home tile, an unmoved rook of the
/// same color in the corner, empty tiles between them, and no attack on the
/// king's start, pass, or landing tile.
fn gen_castles(board: &RawBoard, from: Position, king: Piece, map: &mut TurnMap) {
    let us = king.color();
    if king.has_moved() || from.rank() != us.home_rank() || from.file() != KING_FILE {
        return;
    }
    let grid = board.grid();
    if is_attacked(grid, from, us.flip()) {
        return;
    }

    for (rook_file, dir) in WINGS {
        let Ok(rook_from) = Position::new(rook_file, from.rank()) else {
            continue;
        };
        let Some(rook) = board.get(rook_from) else {
            continue;
        };
        if rook.kind() != PieceKind::Rook || rook.color() != us || rook.has_moved() {
            continue;
        }
        let path_clear = from
            .ray(Offset::new(dir, 0))
            .take_while(|&pos| pos != rook_from)
            .all(|pos| !board.is_occupied(pos));
        if !path_clear {
            continue;
        }
        let (Some(pass), Some(land)) = (
            from.translate(Offset::new(dir, 0)),
            from.translate(Offset::new(dir * 2, 0)),
        ) else {
            continue;
        };
        if is_attacked(grid, pass, us.flip()) || is_attacked(grid, land, us.flip()) {
            continue;
        }
        map.push(Turn::castle(
            board.id(),
            king,
            from,
            land,
            Castle {
                rook,
                from: rook_from,
                to: pass,
            },
        ));
    }
}

#[cfg(test)]
mod tests {
    use tartan_board::Position;

    use crate::color::Color;
    use crate::movegen::generate_turns;
    use crate::movegen::tests::{board_with, targets};
    use crate::piece_kind::PieceKind;
    use crate::turn::TurnKind;

    fn castle_targets(board: &crate::RawBoard, from: Position) -> Vec<Position> {
        let king = board.get(from).unwrap();
        let mut out: Vec<_> = generate_turns(board, from, king)
            .iter()
            .filter(|turn| matches!(turn.kind(), TurnKind::Castle(_)))
            .map(|turn| turn.to())
            .collect();
        out.sort();
        out
    }

    #[test]
    fn king_steps_in_middle() {
        let board = board_with(&[(Position::D4, PieceKind::King, Color::White)]);
        assert_eq!(targets(&board, Position::D4).len(), 8);
    }

    #[test]
    fn both_castles_available() {
        let board = board_with(&[
            (Position::E1, PieceKind::King, Color::White),
            (Position::A1, PieceKind::Rook, Color::White),
            (Position::H1, PieceKind::Rook, Color::White),
        ]);
        assert_eq!(castle_targets(&board, Position::E1), vec![Position::C1, Position::G1]);

        let king = board.get(Position::E1).unwrap();
        let map = generate_turns(&board, Position::E1, king);
        let short = map.find(Position::G1, None).unwrap();
        match short.kind() {
            TurnKind::Castle(castle) => {
                assert_eq!(castle.from, Position::H1);
                assert_eq!(castle.to, Position::F1);
            }
            other => panic!("expected castle, got {other:?}"),
        }
    }

    #[test]
    fn blocked_queenside() {
        let board = board_with(&[
            (Position::E8, PieceKind::King, Color::Black),
            (Position::A8, PieceKind::Rook, Color::Black),
            (Position::B8, PieceKind::Knight, Color::Black),
            (Position::H8, PieceKind::Rook, Color::Black),
        ]);
        assert_eq!(castle_targets(&board, Position::E8), vec![Position::G8]);
    }

    #[test]
    fn no_castle_through_attack() {
        let board = board_with(&[
            (Position::E1, PieceKind::King, Color::White),
            (Position::H1, PieceKind::Rook, Color::White),
            (Position::F8, PieceKind::Rook, Color::Black),
        ]);
        assert!(castle_targets(&board, Position::E1).is_empty());
    }

    #[test]
    fn no_castle_out_of_check() {
        let board = board_with(&[
            (Position::E1, PieceKind::King, Color::White),
            (Position::H1, PieceKind::Rook, Color::White),
            (Position::E8, PieceKind::Rook, Color::Black),
        ]);
        assert!(castle_targets(&board, Position::E1).is_empty());
    }

    #[test]
    fn no_castle_with_enemy_rook() {
        let board = board_with(&[
            (Position::E1, PieceKind::King, Color::White),
            (Position::H1, PieceKind::Rook, Color::Black),
        ]);
        assert!(castle_targets(&board, Position::E1).is_empty());
    }
}
