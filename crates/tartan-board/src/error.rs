//! Errors raised by the grid container.

use crate::position::Position;

/// Errors from [`Board`](crate::board::Board) and [`Position`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    /// A coordinate pair falls outside the 8x8 extent.
    #[error("coordinates ({file}, {rank}) are outside the board")]
    OutOfBounds {
        /// Zero-based file that was requested.
        file: i16,
        /// Zero-based rank that was requested.
        rank: i16,
    },
    /// A piece was placed onto an occupied tile.
    #[error("position {position} is already taken")]
    PositionIsTaken {
        /// The occupied tile.
        position: Position,
    },
    /// A string is not a coordinate such as `e4`.
    #[error("invalid coordinate: \"{found}\"")]
    InvalidNotation {
        /// The rejected input.
        found: String,
    },
    /// An undo was requested with nothing in the history.
    #[error("history is empty")]
    EmptyHistory,
}

#[cfg(test)]
mod tests {
    use super::BoardError;
    use crate::position::Position;

    #[test]
    fn display_messages() {
        let err = BoardError::PositionIsTaken { position: Position::E4 };
        assert_eq!(format!("{err}"), "position e4 is already taken");

        let err = BoardError::OutOfBounds { file: 8, rank: -1 };
        assert_eq!(format!("{err}"), "coordinates (8, -1) are outside the board");

        assert_eq!(format!("{}", BoardError::EmptyHistory), "history is empty");
    }
}
