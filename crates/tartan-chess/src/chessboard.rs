//! The chess-specific board: side to move, king tracking, check and mate.

use std::fmt;

use tartan_board::Position;
use tracing::{debug, trace, warn};

use crate::RawBoard;
use crate::attacks::is_attacked;
use crate::color::Color;
use crate::error::ChessError;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;
use crate::setup::Setup;
use crate::turn::Turn;
use crate::turn_map::TurnMap;

/// Most pieces one color may start with.
const MAX_PIECES: usize = 16;
/// Most pawns one color may start with.
const MAX_PAWNS: usize = 8;

/// Where the game stands for the side to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameState {
    /// The side to move is not attacked and has a legal turn.
    Ongoing,
    /// The side to move is attacked but can escape.
    Check,
    /// The side to move is attacked and cannot escape. Terminal.
    Checkmate,
    /// The side to move is not attacked but has no legal turn. Terminal.
    Stalemate,
}

impl GameState {
    /// Return `true` if no further turns are accepted.
    #[inline]
    pub const fn is_over(self) -> bool {
        matches!(self, GameState::Checkmate | GameState::Stalemate)
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            GameState::Ongoing => "ongoing",
            GameState::Check => "check",
            GameState::Checkmate => "checkmate",
            GameState::Stalemate => "stalemate",
        };
        f.write_str(name)
    }
}

/// Snapshot returned by every state-changing call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Status {
    pub state: GameState,
    pub side_to_move: Color,
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} to move", self.state, self.side_to_move)
    }
}

/// A chess game in progress.
///
/// Wraps a [`RawBoard`] and keeps the side to move, both king positions, and
/// the current [`GameState`] consistent with its tiles. Every mutating call
/// is atomic: it either commits exactly one history entry and re-evaluates the
/// state, or fails and leaves everything as it was.
#[derive(Debug, Clone)]
pub struct Chessboard {
    board: RawBoard,
    side_to_move: Color,
    kings: [Position; Color::COUNT],
    state: GameState,
}

impl Chessboard {
    /// Build a board from `setup`.
    ///
    /// # Errors
    ///
    /// In order of checking:
    /// - [`ChessError::PositionIsTaken`] or [`ChessError::DuplicateKing`]
    ///   while placing pieces.
    /// - [`ChessError::NoKing`] if a color has no king.
    /// - [`ChessError::BadSet`] if the set as a whole is not a sane chess set.
    pub fn new(setup: &Setup) -> Result<Chessboard, ChessError> {
        let mut board = RawBoard::new();
        let mut kings: [Option<Position>; Color::COUNT] = [None; Color::COUNT];

        for placement in setup.placements() {
            let piece = Piece::new(placement.kind, placement.color);
            board.place(placement.position, piece)?;
            if placement.kind == PieceKind::King {
                let slot = &mut kings[placement.color.index()];
                if slot.is_some() {
                    return Err(ChessError::DuplicateKing {
                        color: placement.color,
                        position: placement.position,
                    });
                }
                *slot = Some(placement.position);
            }
        }

        let white = kings[Color::White.index()].ok_or(ChessError::NoKing {
            color: Color::White,
        })?;
        let black = kings[Color::Black.index()].ok_or(ChessError::NoKing {
            color: Color::Black,
        })?;

        let mut chessboard = Chessboard {
            board,
            side_to_move: setup.first_to_move(),
            kings: [white, black],
            state: GameState::Ongoing,
        };
        chessboard.validate_set()?;
        chessboard.state = chessboard.evaluate();
        debug!(
            board = %chessboard.board.id(),
            pieces = chessboard.board.grid().count(),
            status = %chessboard.status(),
            "board set up"
        );
        Ok(chessboard)
    }

    /// The conventional opening position, White to move.
    pub fn standard() -> Chessboard {
        // The standard layout has one king per color on distinct tiles and a
        // sane set, so validation cannot fail.
        Chessboard::new(&Setup::standard()).expect("standard layout passes validation")
    }

    /// Check-safe turns of the piece on `position`.
    ///
    /// The piece may belong to either color; its turns are filtered against
    /// its own king.
    ///
    /// # Errors
    ///
    /// Returns [`ChessError::TileIsEmpty`] if no piece stands on `position`.
    pub fn legal_turns(&self, position: Position) -> Result<TurnMap, ChessError> {
        let piece = self
            .board
            .get(position)
            .ok_or(ChessError::TileIsEmpty { from: position })?;
        let mut map = piece.turns(&self.board, position);
        map.retain(|turn| self.is_safe(turn));
        Ok(map)
    }

    /// Every check-safe turn of the side to move.
    pub fn all_legal_turns(&self) -> Vec<Turn> {
        self.board
            .pieces()
            .filter(|(_, piece)| piece.color() == self.side_to_move)
            .flat_map(|(from, piece)| piece.turns(&self.board, from))
            .filter(|turn| self.is_safe(turn))
            .collect()
    }

    /// Move the piece on `from` to `to`.
    ///
    /// `promotion` picks the replacement kind when a pawn reaches the last
    /// rank and must be `None` otherwise.
    ///
    /// # Errors
    ///
    /// - [`ChessError::Checkmate`] or [`ChessError::Stalemate`] if the game is over.
    /// - [`ChessError::TileIsEmpty`] if `from` is empty.
    /// - [`ChessError::PieceInWrongColor`] if the piece is not the side to move's.
    /// - [`ChessError::BadPieceType`] if `promotion` names a pawn or king.
    /// - [`ChessError::CanNotMove`] if the piece has no turns at all.
    /// - [`ChessError::NoSuchMove`] if no turn reaches `to` with `promotion`.
    /// - [`ChessError::Check`] if the turn would leave the mover's king attacked.
    pub fn apply_turn(
        &mut self,
        from: Position,
        to: Position,
        promotion: Option<PieceKind>,
    ) -> Result<Status, ChessError> {
        self.ensure_not_over()?;
        let piece = self
            .board
            .get(from)
            .ok_or(ChessError::TileIsEmpty { from })?;
        self.ensure_side_to_move(from, piece)?;
        if let Some(kind) = promotion {
            if !kind.is_promotion_target() {
                return Err(ChessError::BadPieceType {
                    found: kind.to_string(),
                });
            }
        }

        let map = piece.turns(&self.board, from);
        if map.is_empty() {
            trace!(%from, "piece has no turns");
            return Err(ChessError::CanNotMove { from });
        }
        let turn = *map.find(to, promotion).ok_or_else(|| {
            trace!(%from, %to, "destination not in turn map");
            ChessError::NoSuchMove { from, to }
        })?;
        self.commit(turn)
    }

    /// Apply a turn taken from a [`TurnMap`] of this board.
    ///
    /// # Errors
    ///
    /// - [`ChessError::Checkmate`] or [`ChessError::Stalemate`] if the game is over.
    /// - [`ChessError::ForeignPiece`] if the turn was generated by another board.
    /// - [`ChessError::NullPiece`] if its piece is no longer on its origin.
    /// - [`ChessError::PieceInWrongColor`] if its piece is not the side to move's.
    /// - [`ChessError::NoSuchMove`] if the turn is stale.
    /// - [`ChessError::Check`] if the turn would leave the mover's king attacked.
    pub fn play(&mut self, turn: &Turn) -> Result<Status, ChessError> {
        self.ensure_not_over()?;
        if turn.board() != self.board.id() {
            return Err(ChessError::ForeignPiece {
                position: turn.from(),
            });
        }
        if self.board.get(turn.from()) != Some(turn.piece()) {
            return Err(ChessError::NullPiece {
                position: turn.from(),
            });
        }
        self.ensure_side_to_move(turn.from(), turn.piece())?;
        if !turn.is_legal_on(&self.board) {
            trace!(%turn, "stale turn");
            return Err(ChessError::NoSuchMove {
                from: turn.from(),
                to: turn.to(),
            });
        }
        self.commit(*turn)
    }

    /// Take back the most recent turn.
    ///
    /// Allowed after the game has ended.
    ///
    /// # Errors
    ///
    /// Returns [`ChessError::IllegalTurn`] if the history is empty.
    pub fn undo(&mut self) -> Result<Status, ChessError> {
        let turn = self.board.undo_last()?;
        if turn.piece().kind() == PieceKind::King {
            self.kings[turn.color().index()] = turn.from();
        }
        self.side_to_move = turn.color();
        self.state = self.evaluate();
        debug!(%turn, status = %self.status(), "undid turn");
        Ok(self.status())
    }

    /// Applied turns, oldest first.
    #[inline]
    pub fn history(&self) -> &[Turn] {
        self.board.history()
    }

    /// The piece on `position`, if any.
    #[inline]
    pub fn get(&self, position: Position) -> Option<Piece> {
        self.board.get(position)
    }

    /// Occupied tiles from a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.board.pieces()
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn state(&self) -> GameState {
        self.state
    }

    #[inline]
    pub fn status(&self) -> Status {
        Status {
            state: self.state,
            side_to_move: self.side_to_move,
        }
    }

    /// Where the king of `color` stands.
    #[inline]
    pub fn king(&self, color: Color) -> Position {
        self.kings[color.index()]
    }

    /// Return `true` if the side to move is attacked.
    #[inline]
    pub fn in_check(&self) -> bool {
        matches!(self.state, GameState::Check | GameState::Checkmate)
    }

    /// Pieces of `color` captured so far, in capture order.
    pub fn captured(&self, color: Color) -> Vec<Piece> {
        self.history()
            .iter()
            .filter_map(Turn::capture)
            .map(|capture| capture.piece)
            .filter(|piece| piece.color() == color)
            .collect()
    }

    /// The underlying generic board.
    #[inline]
    pub fn raw(&self) -> &RawBoard {
        &self.board
    }

    /// Simulate, re-check, then apply and re-evaluate.
    fn commit(&mut self, turn: Turn) -> Result<Status, ChessError> {
        if !self.is_safe(&turn) {
            trace!(%turn, "rejected: king would be attacked");
            return Err(ChessError::Check {
                from: turn.from(),
                to: turn.to(),
                color: turn.color(),
            });
        }
        turn.apply(&mut self.board)?;
        if turn.piece().kind() == PieceKind::King {
            self.kings[turn.color().index()] = turn.to();
        }
        self.side_to_move = self.side_to_move.flip();

        let previous = self.state;
        self.state = self.evaluate();
        debug!(%turn, kind = ?turn.kind(), status = %self.status(), "committed turn");
        if self.state != previous {
            debug!(from = %previous, to = %self.state, "state changed");
        }
        Ok(self.status())
    }

    /// Return `true` if `turn` leaves its own king unattacked.
    fn is_safe(&self, turn: &Turn) -> bool {
        let color = turn.color();
        let king = if turn.piece().kind() == PieceKind::King {
            turn.to()
        } else {
            self.king(color)
        };
        let next = turn.next_grid(self.board.grid());
        !is_attacked(&next, king, color.flip())
    }

    fn has_legal_turn(&self) -> bool {
        self.board
            .pieces()
            .filter(|(_, piece)| piece.color() == self.side_to_move)
            .any(|(from, piece)| {
                piece
                    .turns(&self.board, from)
                    .iter()
                    .any(|turn| self.is_safe(turn))
            })
    }

    fn evaluate(&self) -> GameState {
        let side = self.side_to_move;
        let attacked = is_attacked(self.board.grid(), self.king(side), side.flip());
        match (attacked, self.has_legal_turn()) {
            (true, true) => GameState::Check,
            (true, false) => GameState::Checkmate,
            (false, true) => GameState::Ongoing,
            (false, false) => GameState::Stalemate,
        }
    }

    fn ensure_not_over(&self) -> Result<(), ChessError> {
        let color = self.side_to_move;
        match self.state {
            GameState::Checkmate => {
                warn!(%color, "turn requested after checkmate");
                Err(ChessError::Checkmate { color })
            }
            GameState::Stalemate => {
                warn!(%color, "turn requested after stalemate");
                Err(ChessError::Stalemate { color })
            }
            GameState::Ongoing | GameState::Check => Ok(()),
        }
    }

    fn ensure_side_to_move(&self, from: Position, piece: Piece) -> Result<(), ChessError> {
        if piece.color() != self.side_to_move {
            return Err(ChessError::PieceInWrongColor {
                from,
                color: piece.color(),
                side_to_move: self.side_to_move,
            });
        }
        Ok(())
    }

    fn validate_set(&self) -> Result<(), ChessError> {
        for color in Color::ALL {
            let own: Vec<(Position, Piece)> = self
                .board
                .pieces()
                .filter(|(_, piece)| piece.color() == color)
                .collect();
            if own.len() > MAX_PIECES {
                return Err(ChessError::BadSet {
                    reason: format!("{color} has {} pieces, at most {MAX_PIECES} allowed", own.len()),
                });
            }
            let pawns: Vec<Position> = own
                .iter()
                .filter(|(_, piece)| piece.kind() == PieceKind::Pawn)
                .map(|&(pos, _)| pos)
                .collect();
            if pawns.len() > MAX_PAWNS {
                return Err(ChessError::BadSet {
                    reason: format!("{color} has {} pawns, at most {MAX_PAWNS} allowed", pawns.len()),
                });
            }
            if let Some(pos) = pawns
                .iter()
                .find(|pos| pos.rank() == 0 || pos.rank() == Position::SIZE - 1)
            {
                return Err(ChessError::BadSet {
                    reason: format!("{color} pawn on back rank at {pos}"),
                });
            }
        }
        let waiting = self.side_to_move.flip();
        if is_attacked(self.board.grid(), self.king(waiting), self.side_to_move) {
            return Err(ChessError::BadSet {
                reason: format!("{waiting} is in check but {} is to move", self.side_to_move),
            });
        }
        Ok(())
    }
}

impl Default for Chessboard {
    fn default() -> Self {
        Self::standard()
    }
}

/// Boards are equal when their tiles, side to move, and state match.
/// Identity and history are ignored.
impl PartialEq for Chessboard {
    fn eq(&self, other: &Self) -> bool {
        self.board.grid() == other.board.grid()
            && self.side_to_move == other.side_to_move
            && self.state == other.state
    }
}

impl Eq for Chessboard {}

impl fmt::Display for Chessboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..Position::SIZE).rev() {
            write!(f, "{}  ", rank + 1)?;
            for file in 0..Position::SIZE {
                let c = Position::from_index(rank * Position::SIZE + file)
                    .and_then(|pos| self.board.get(pos))
                    .map_or('.', Piece::letter);
                if file + 1 < Position::SIZE {
                    write!(f, "{c} ")?;
                } else {
                    write!(f, "{c}")?;
                }
            }
            writeln!(f)?;
        }
        write!(f, "   a b c d e f g h")
    }
}
