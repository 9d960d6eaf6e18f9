//! Rule-violation errors.

use tartan_board::{BoardError, Position};

use crate::color::Color;

/// Coarse grouping of [`ChessError`] kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Raised while building a board or resolving a piece reference.
    Setup,
    /// A requested turn was rejected; the board is unchanged.
    Move,
    /// A turn is internally inconsistent or cannot be undone.
    Structural,
    /// The game is over for the side to move.
    Terminal,
}

/// Every rule violation the engine reports.
///
/// Each variant is one fine-grained kind; [`ChessError::category`] groups them
/// so callers can match broadly or precisely. All errors are recoverable and
/// leave the board as it was before the failing call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChessError {
    /// A placement specification is malformed.
    #[error("bad piece specification \"{spec}\": {reason}")]
    BadPieceSpec {
        /// The rejected specification.
        spec: String,
        /// What is wrong with it.
        reason: &'static str,
    },
    /// A piece letter or requested kind is not usable here.
    #[error("bad piece type \"{found}\"")]
    BadPieceType {
        /// The rejected letter or kind.
        found: String,
    },
    /// The set of pieces as a whole is not a sane chess set.
    #[error("bad piece set: {reason}")]
    BadSet {
        /// What is wrong with the set.
        reason: String,
    },
    /// Two pieces were placed on the same tile.
    #[error("position {position} is already taken")]
    PositionIsTaken {
        /// The contested tile.
        position: Position,
    },
    /// Coordinates fall outside the board.
    #[error("coordinates ({file}, {rank}) are outside the board")]
    OutOfBounds {
        /// Requested zero-based file.
        file: i16,
        /// Requested zero-based rank.
        rank: i16,
    },
    /// A second king of the same color was placed.
    #[error("{color} already has a king, second one on {position}")]
    DuplicateKing {
        /// Color with more than one king.
        color: Color,
        /// Where the extra king was placed.
        position: Position,
    },
    /// A color has no king.
    #[error("{color} has no king")]
    NoKing {
        /// Color without a king.
        color: Color,
    },
    /// A turn was minted by a different board instance.
    #[error("turn from {position} belongs to another board")]
    ForeignPiece {
        /// Origin of the rejected turn.
        position: Position,
    },
    /// The piece a turn refers to is not where the turn expects it.
    #[error("turn piece is not on {position}")]
    NullPiece {
        /// The tile that should hold the piece.
        position: Position,
    },
    /// The selected piece has no moves at all.
    #[error("piece on {from} can't move")]
    CanNotMove {
        /// The selected tile.
        from: Position,
    },
    /// The selected piece can't reach the requested destination.
    #[error("piece on {from} can't move to {to}")]
    NoSuchMove {
        /// The selected tile.
        from: Position,
        /// The requested destination.
        to: Position,
    },
    /// The selected piece belongs to the side not to move.
    #[error("piece on {from} is {color} but {side_to_move} is to move")]
    PieceInWrongColor {
        /// The selected tile.
        from: Position,
        /// Color of the selected piece.
        color: Color,
        /// Color whose turn it is.
        side_to_move: Color,
    },
    /// The selected tile holds no piece.
    #[error("tile {from} is empty")]
    TileIsEmpty {
        /// The selected tile.
        from: Position,
    },
    /// The turn would leave the mover's own king attacked.
    #[error("moving {from} to {to} leaves the {color} king in check")]
    Check {
        /// Origin of the rejected turn.
        from: Position,
        /// Destination of the rejected turn.
        to: Position,
        /// Color of the endangered king.
        color: Color,
    },
    /// A turn is inconsistent with the board it is applied to or undone on.
    #[error("illegal turn: {reason}")]
    IllegalTurn {
        /// What is inconsistent.
        reason: &'static str,
    },
    /// The side to move is checkmated; no further turns are accepted.
    #[error("{color} is checkmated")]
    Checkmate {
        /// The mated color.
        color: Color,
    },
    /// The side to move is stalemated; no further turns are accepted.
    #[error("{color} is stalemated")]
    Stalemate {
        /// The stalemated color.
        color: Color,
    },
}

impl ChessError {
    /// Return the coarse category of this error.
    pub const fn category(&self) -> ErrorCategory {
        match self {
            ChessError::BadPieceSpec { .. }
            | ChessError::BadPieceType { .. }
            | ChessError::BadSet { .. }
            | ChessError::PositionIsTaken { .. }
            | ChessError::OutOfBounds { .. }
            | ChessError::DuplicateKing { .. }
            | ChessError::NoKing { .. }
            | ChessError::ForeignPiece { .. }
            | ChessError::NullPiece { .. } => ErrorCategory::Setup,
            ChessError::CanNotMove { .. }
            | ChessError::NoSuchMove { .. }
            | ChessError::PieceInWrongColor { .. }
            | ChessError::TileIsEmpty { .. }
            | ChessError::Check { .. } => ErrorCategory::Move,
            ChessError::IllegalTurn { .. } => ErrorCategory::Structural,
            ChessError::Checkmate { .. } | ChessError::Stalemate { .. } => ErrorCategory::Terminal,
        }
    }
}

impl From<BoardError> for ChessError {
    fn from(err: BoardError) -> Self {
        match err {
            BoardError::OutOfBounds { file, rank } => ChessError::OutOfBounds { file, rank },
            BoardError::PositionIsTaken { position } => ChessError::PositionIsTaken { position },
            BoardError::InvalidNotation { found } => ChessError::BadPieceSpec {
                spec: found,
                reason: "invalid coordinate",
            },
            BoardError::EmptyHistory => ChessError::IllegalTurn {
                reason: "history is empty",
            },
        }
    }
}
