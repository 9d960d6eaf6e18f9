//! Move descriptors and their application to a board.

use std::fmt;

use tartan_board::{BoardId, Grid, Position, Revert};

use crate::RawBoard;
use crate::color::Color;
use crate::error::ChessError;
use crate::movegen;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;

/// A piece removed from the board by a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Capture {
    /// The captured piece as it stood before the turn.
    pub piece: Piece,
    /// Where it stood. Differs from the turn's destination only for en passant.
    pub position: Position,
}

/// The rook half of a castling turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Castle {
    /// The rook as it stood before the turn.
    pub rook: Piece,
    pub from: Position,
    pub to: Position,
}

/// The effect a turn has beyond moving its piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnKind {
    /// A quiet move to an empty tile.
    Normal,
    /// A capture on the destination tile.
    Capture,
    /// A pawn reaching the last rank, replaced by the given kind. May also capture.
    Promotion(PieceKind),
    /// King and rook move together.
    Castle(Castle),
    /// A pawn capturing an adjacent pawn that just made a double step.
    EnPassant,
}

/// One move of one piece, with every side effect spelled out.
///
/// A `Turn` is an immutable value. It records the moving piece and any
/// captured piece exactly as they were, so applying and reverting it are pure
/// functions of the tiles. It also remembers which board instance minted it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Turn {
    board: BoardId,
    piece: Piece,
    from: Position,
    to: Position,
    capture: Option<Capture>,
    kind: TurnKind,
}

impl Turn {
    pub(crate) fn normal(board: BoardId, piece: Piece, from: Position, to: Position) -> Turn {
        Turn {
            board,
            piece,
            from,
            to,
            capture: None,
            kind: TurnKind::Normal,
        }
    }

    pub(crate) fn capturing(
        board: BoardId,
        piece: Piece,
        from: Position,
        to: Position,
        captured: Piece,
    ) -> Turn {
        Turn {
            capture: Some(Capture {
                piece: captured,
                position: to,
            }),
            kind: TurnKind::Capture,
            ..Turn::normal(board, piece, from, to)
        }
    }

    pub(crate) fn promoting(
        board: BoardId,
        piece: Piece,
        from: Position,
        to: Position,
        promote_to: PieceKind,
        captured: Option<Piece>,
    ) -> Turn {
        Turn {
            capture: captured.map(|piece| Capture { piece, position: to }),
            kind: TurnKind::Promotion(promote_to),
            ..Turn::normal(board, piece, from, to)
        }
    }

    pub(crate) fn en_passant(
        board: BoardId,
        piece: Piece,
        from: Position,
        to: Position,
        captured: Capture,
    ) -> Turn {
        Turn {
            capture: Some(captured),
            kind: TurnKind::EnPassant,
            ..Turn::normal(board, piece, from, to)
        }
    }

    pub(crate) fn castle(
        board: BoardId,
        king: Piece,
        from: Position,
        to: Position,
        castle: Castle,
    ) -> Turn {
        Turn {
            kind: TurnKind::Castle(castle),
            ..Turn::normal(board, king, from, to)
        }
    }

    /// The board instance this turn was generated for.
    #[inline]
    pub fn board(&self) -> BoardId {
        self.board
    }

    /// The moving piece as it stood before the turn.
    #[inline]
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// Color of the moving piece.
    #[inline]
    pub fn color(&self) -> Color {
        self.piece.color()
    }

    #[inline]
    pub fn from(&self) -> Position {
        self.from
    }

    #[inline]
    pub fn to(&self) -> Position {
        self.to
    }

    /// The captured piece, if any.
    #[inline]
    pub fn capture(&self) -> Option<Capture> {
        self.capture
    }

    #[inline]
    pub fn kind(&self) -> TurnKind {
        self.kind
    }

    /// The kind a pawn promotes to, if this is a promotion.
    #[inline]
    pub fn promotion(&self) -> Option<PieceKind> {
        match self.kind {
            TurnKind::Promotion(kind) => Some(kind),
            _ => None,
        }
    }

    /// Return `true` if the turn removes an enemy piece.
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Return `true` if this turn would be generated again for its piece on `board`.
    ///
    /// Use this to re-check a turn taken from a map that may be stale.
    pub fn is_legal_on(&self, board: &RawBoard) -> bool {
        board.id() == self.board
            && board.get(self.from) == Some(self.piece)
            && movegen::generate_turns(board, self.from, self.piece).contains(self)
    }

    /// Apply the turn and append it to the history.
    ///
    /// Every precondition is checked before the tiles change, so on error the
    /// board is untouched.
    ///
    /// # Errors
    ///
    /// - [`ChessError::ForeignPiece`] if the turn was minted by another board.
    /// - [`ChessError::NullPiece`] if the moving piece is not on the origin.
    /// - [`ChessError::IllegalTurn`] if the captured piece, the castling rook,
    ///   or an empty destination is not where the turn expects.
    pub fn apply(&self, board: &mut RawBoard) -> Result<(), ChessError> {
        if board.id() != self.board {
            return Err(ChessError::ForeignPiece {
                position: self.from,
            });
        }
        self.check_against(board.grid())?;
        board.commit(self.next_grid(board.grid()), *self);
        Ok(())
    }

    /// Reverse the turn and pop it from the history.
    ///
    /// # Errors
    ///
    /// Returns [`ChessError::IllegalTurn`] unless this turn is the most
    /// recent history entry.
    pub fn undo(&self, board: &mut RawBoard) -> Result<(), ChessError> {
        if board.last_entry() != Some(self) {
            return Err(ChessError::IllegalTurn {
                reason: "turn is not the most recent history entry",
            });
        }
        board.undo_last()?;
        Ok(())
    }

    /// The tiles as they would be after this turn, without touching `grid`.
    pub(crate) fn next_grid(&self, grid: &Grid<Piece>) -> Grid<Piece> {
        let mut next = *grid;
        if let Some(capture) = self.capture {
            next.take(capture.position);
        }
        next.take(self.from);
        let landed = match self.kind {
            TurnKind::Promotion(kind) => self.piece.promoted(kind),
            _ => self.piece.advanced(),
        };
        next.set(self.to, landed);
        if let TurnKind::Castle(castle) = self.kind {
            next.take(castle.from);
            next.set(castle.to, castle.rook.advanced());
        }
        next
    }

    fn check_against(&self, grid: &Grid<Piece>) -> Result<(), ChessError> {
        if self.from == self.to {
            return Err(ChessError::IllegalTurn {
                reason: "origin and destination coincide",
            });
        }
        if grid.get(self.from) != Some(self.piece) {
            return Err(ChessError::NullPiece {
                position: self.from,
            });
        }
        match self.capture {
            Some(capture) if grid.get(capture.position) != Some(capture.piece) => {
                return Err(ChessError::IllegalTurn {
                    reason: "captured piece is not on the board",
                });
            }
            Some(capture) if capture.position == self.to => {}
            _ => {
                if grid.is_occupied(self.to) {
                    return Err(ChessError::IllegalTurn {
                        reason: "destination is occupied",
                    });
                }
            }
        }
        if let TurnKind::Castle(castle) = self.kind {
            if grid.get(castle.from) != Some(castle.rook) || grid.is_occupied(castle.to) {
                return Err(ChessError::IllegalTurn {
                    reason: "castling rook or its destination is not as expected",
                });
            }
        }
        Ok(())
    }
}

impl Revert<Piece> for Turn {
    fn revert(&self, grid: &mut Grid<Piece>) {
        grid.take(self.to);
        if let TurnKind::Castle(castle) = self.kind {
            grid.take(castle.to);
            grid.set(castle.from, castle.rook);
        }
        grid.set(self.from, self.piece);
        if let Some(capture) = self.capture {
            grid.set(capture.position, capture.piece);
        }
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion() {
            write!(f, "{}", kind.letter())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use tartan_board::{Board, Position};

    use super::{Capture, Castle, Turn, TurnKind};
    use crate::RawBoard;
    use crate::color::Color;
    use crate::error::ChessError;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;

    const WHITE_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::White);
    const BLACK_PAWN: Piece = Piece::new(PieceKind::Pawn, Color::Black);
    const WHITE_KING: Piece = Piece::new(PieceKind::King, Color::White);
    const WHITE_ROOK: Piece = Piece::new(PieceKind::Rook, Color::White);

    fn board_with(pieces: &[(Position, Piece)]) -> RawBoard {
        let mut board = Board::new();
        for &(pos, piece) in pieces {
            board.place(pos, piece).unwrap();
        }
        board
    }

    #[test]
    fn apply_and_undo_normal() {
        let mut board = board_with(&[(Position::E2, WHITE_PAWN)]);
        let before = *board.grid();
        let turn = Turn::normal(board.id(), WHITE_PAWN, Position::E2, Position::E4);

        turn.apply(&mut board).unwrap();
        assert_eq!(board.get(Position::E2), None);
        assert_eq!(board.get(Position::E4).map(Piece::moves), Some(1));
        assert_eq!(board.history(), &[turn]);

        turn.undo(&mut board).unwrap();
        assert_eq!(*board.grid(), before);
        assert!(board.history().is_empty());
    }

    #[test]
    fn apply_capture_removes_victim() {
        let mut board = board_with(&[(Position::E4, WHITE_PAWN), (Position::D5, BLACK_PAWN)]);
        let turn = Turn::capturing(board.id(), WHITE_PAWN, Position::E4, Position::D5, BLACK_PAWN);
        turn.apply(&mut board).unwrap();
        assert_eq!(board.get(Position::D5).map(Piece::color), Some(Color::White));
        assert_eq!(board.grid().count(), 1);
        assert!(turn.is_capture());
        assert_eq!(turn.kind(), TurnKind::Capture);
        assert_eq!(
            turn.capture(),
            Some(Capture {
                piece: BLACK_PAWN,
                position: Position::D5,
            })
        );
        assert_eq!(turn.promotion(), None);
    }

    #[test]
    fn apply_en_passant_and_undo() {
        let mut board = board_with(&[(Position::E5, WHITE_PAWN), (Position::D5, BLACK_PAWN)]);
        let before = *board.grid();
        let turn = Turn::en_passant(
            board.id(),
            WHITE_PAWN,
            Position::E5,
            Position::D6,
            Capture {
                piece: BLACK_PAWN,
                position: Position::D5,
            },
        );
        turn.apply(&mut board).unwrap();
        assert_eq!(board.get(Position::D5), None);
        assert!(board.get(Position::D6).is_some());

        turn.undo(&mut board).unwrap();
        assert_eq!(*board.grid(), before);
    }

    #[test]
    fn apply_castle_moves_rook() {
        let mut board = board_with(&[(Position::E1, WHITE_KING), (Position::H1, WHITE_ROOK)]);
        let turn = Turn::castle(
            board.id(),
            WHITE_KING,
            Position::E1,
            Position::G1,
            Castle {
                rook: WHITE_ROOK,
                from: Position::H1,
                to: Position::F1,
            },
        );
        turn.apply(&mut board).unwrap();
        assert_eq!(board.get(Position::G1).map(Piece::kind), Some(PieceKind::King));
        assert_eq!(board.get(Position::F1).map(Piece::kind), Some(PieceKind::Rook));
        assert_eq!(board.get(Position::H1), None);

        board.undo_last().unwrap();
        assert_eq!(board.get(Position::E1), Some(WHITE_KING));
        assert_eq!(board.get(Position::H1), Some(WHITE_ROOK));
    }

    #[test]
    fn apply_promotion_replaces_pawn() {
        let pawn = WHITE_PAWN.advanced();
        let mut board = board_with(&[(Position::A7, pawn)]);
        let turn = Turn::promoting(
            board.id(),
            pawn,
            Position::A7,
            Position::A8,
            PieceKind::Knight,
            None,
        );
        turn.apply(&mut board).unwrap();
        assert_eq!(board.get(Position::A8).map(Piece::kind), Some(PieceKind::Knight));
        assert_eq!(turn.promotion(), Some(PieceKind::Knight));
        assert_eq!(format!("{turn}"), "a7a8n");

        turn.undo(&mut board).unwrap();
        assert_eq!(board.get(Position::A7), Some(pawn));
    }

    #[test]
    fn apply_is_atomic_on_failure() {
        let mut board = board_with(&[(Position::E2, WHITE_PAWN), (Position::E4, BLACK_PAWN)]);
        let before = *board.grid();
        let turn = Turn::normal(board.id(), WHITE_PAWN, Position::E2, Position::E4);
        assert!(matches!(
            turn.apply(&mut board),
            Err(ChessError::IllegalTurn { .. })
        ));
        assert_eq!(*board.grid(), before);
        assert!(board.history().is_empty());
    }

    #[test]
    fn apply_rejects_missing_piece() {
        let mut board = board_with(&[]);
        let turn = Turn::normal(board.id(), WHITE_PAWN, Position::E2, Position::E4);
        assert_eq!(
            turn.apply(&mut board),
            Err(ChessError::NullPiece { position: Position::E2 })
        );
    }

    #[test]
    fn apply_rejects_foreign_board() {
        let other: RawBoard = Board::new();
        let mut board = board_with(&[(Position::E2, WHITE_PAWN)]);
        let turn = Turn::normal(other.id(), WHITE_PAWN, Position::E2, Position::E4);
        assert_eq!(
            turn.apply(&mut board),
            Err(ChessError::ForeignPiece { position: Position::E2 })
        );
    }

    #[test]
    fn undo_requires_latest_entry() {
        let mut board = board_with(&[(Position::A2, WHITE_PAWN), (Position::H7, BLACK_PAWN)]);
        let first = Turn::normal(board.id(), WHITE_PAWN, Position::A2, Position::A3);
        let second = Turn::normal(board.id(), BLACK_PAWN, Position::H7, Position::H6);
        first.apply(&mut board).unwrap();
        second.apply(&mut board).unwrap();

        assert!(matches!(
            first.undo(&mut board),
            Err(ChessError::IllegalTurn { .. })
        ));
        second.undo(&mut board).unwrap();
        first.undo(&mut board).unwrap();
        assert!(matches!(
            first.undo(&mut board),
            Err(ChessError::IllegalTurn { .. })
        ));
    }

    #[test]
    fn is_legal_on_detects_stale_turn() {
        let mut board = board_with(&[(Position::E2, WHITE_PAWN)]);
        let turn = Turn::normal(board.id(), WHITE_PAWN, Position::E2, Position::E4);
        assert!(turn.is_legal_on(&board));

        board.place(Position::E3, BLACK_PAWN).unwrap();
        assert!(!turn.is_legal_on(&board));
    }
}
