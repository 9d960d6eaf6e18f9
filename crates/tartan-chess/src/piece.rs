//! Colored chess pieces.

use std::fmt;

use tartan_board::Position;

use crate::RawBoard;
use crate::color::Color;
use crate::movegen;
use crate::piece_kind::PieceKind;
use crate::turn_map::TurnMap;

/// A colored chess piece together with the number of moves it has made.
///
/// Pieces live in the board's tiles and know nothing about where they stand;
/// the position is always supplied by the caller. The move counter backs the
/// "has not moved yet" rules and is restored exactly on undo.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    moves: u16,
}

impl Piece {
    /// Create a piece that has not moved yet.
    #[inline]
    pub const fn new(kind: PieceKind, color: Color) -> Piece {
        Piece {
            kind,
            color,
            moves: 0,
        }
    }

    /// Return the piece kind.
    #[inline]
    pub const fn kind(self) -> PieceKind {
        self.kind
    }

    /// Return the color.
    #[inline]
    pub const fn color(self) -> Color {
        self.color
    }

    /// Number of moves this piece has made.
    #[inline]
    pub const fn moves(self) -> u16 {
        self.moves
    }

    /// Return `true` if the piece has moved at least once.
    #[inline]
    pub const fn has_moved(self) -> bool {
        self.moves > 0
    }

    /// The same piece after one more move.
    #[inline]
    pub(crate) const fn advanced(self) -> Piece {
        Piece {
            moves: self.moves.saturating_add(1),
            ..self
        }
    }

    /// The piece a pawn becomes when it promotes to `kind`.
    #[inline]
    pub(crate) const fn promoted(self, kind: PieceKind) -> Piece {
        Piece {
            kind,
            ..self.advanced()
        }
    }

    /// Letter for this piece: uppercase for White, lowercase for Black.
    #[inline]
    pub fn letter(self) -> char {
        let base = self.kind.letter();
        match self.color {
            Color::White => base.to_ascii_uppercase(),
            Color::Black => base,
        }
    }

    /// Every pseudo-legal turn of this piece standing on `from`.
    ///
    /// Geometry, occupancy, and color rules are applied; whether the turn
    /// leaves the mover's own king attacked is not. The map is a snapshot of
    /// `board` and must be regenerated after any mutation.
    pub fn turns(self, board: &RawBoard, from: Position) -> TurnMap {
        movegen::generate_turns(board, from, self)
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let color_prefix = match self.color {
            Color::White => 'W',
            Color::Black => 'B',
        };
        let kind_char = self.kind.letter().to_ascii_uppercase();
        write!(f, "{color_prefix}{kind_char}")?;
        if self.moves > 0 {
            write!(f, "+{}", self.moves)?;
        }
        Ok(())
    }
}
