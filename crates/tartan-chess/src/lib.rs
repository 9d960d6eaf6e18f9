//! Chess rules on top of the generic `tartan-board` container: pieces and
//! their turn generation, check-safe validation, atomic apply and undo.

mod attacks;
mod chessboard;
mod color;
mod error;
mod movegen;
mod piece;
mod piece_kind;
mod setup;
mod turn;
mod turn_map;

pub use attacks::{is_attacked, king_in_check};
pub use chessboard::{Chessboard, GameState, Status};
pub use color::Color;
pub use error::{ChessError, ErrorCategory};
pub use piece::Piece;
pub use piece_kind::PieceKind;
pub use setup::{Placement, Setup};
pub use turn::{Capture, Castle, Turn, TurnKind};
pub use turn_map::TurnMap;

pub use tartan_board::{BoardError, BoardId, Grid, Offset, Position};

/// The generic board specialised to chess pieces and turns.
pub type RawBoard = tartan_board::Board<Piece, Turn>;
