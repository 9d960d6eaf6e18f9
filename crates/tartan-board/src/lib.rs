//! Game-agnostic board primitives: coordinates, tile storage, and a board
//! container with a reversible move history.

mod board;
mod error;
mod grid;
mod offset;
mod position;

pub use board::{Board, BoardId, Revert};
pub use error::BoardError;
pub use grid::Grid;
pub use offset::Offset;
pub use position::Position;
