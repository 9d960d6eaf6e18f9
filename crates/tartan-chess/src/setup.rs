//! Board configuration: which pieces start where, and who moves first.

use std::fmt;
use std::str::FromStr;

use tartan_board::Position;

use crate::color::Color;
use crate::error::ChessError;
use crate::piece_kind::PieceKind;

/// Back-rank layout from the a-file to the h-file.
const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// One piece on one tile.
///
/// Parses from and displays as `<piece><file><rank>`, the piece letter
/// uppercase for White and lowercase for Black: `"Ke1"`, `"pd7"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Placement {
    pub position: Position,
    pub kind: PieceKind,
    pub color: Color,
}

impl Placement {
    pub const fn new(position: Position, kind: PieceKind, color: Color) -> Placement {
        Placement {
            position,
            kind,
            color,
        }
    }
}

impl FromStr for Placement {
    type Err = ChessError;

    fn from_str(spec: &str) -> Result<Placement, ChessError> {
        let bad_spec = |reason| ChessError::BadPieceSpec {
            spec: spec.to_string(),
            reason,
        };
        match spec.chars().count() {
            n if n > 3 => return Err(bad_spec("too long")),
            n if n < 3 => return Err(bad_spec("too short")),
            _ => {}
        }

        let mut chars = spec.chars();
        let letter = chars.next().ok_or_else(|| bad_spec("too short"))?;
        if !letter.is_ascii_alphabetic() {
            return Err(bad_spec("piece letter is not alphabetic"));
        }
        let kind = PieceKind::from_letter(letter).ok_or_else(|| ChessError::BadPieceType {
            found: letter.to_string(),
        })?;
        let color = if letter.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let position = chars
            .as_str()
            .parse::<Position>()
            .map_err(|_| bad_spec("position is not on the board"))?;

        Ok(Placement::new(position, kind, color))
    }
}

impl fmt::Display for Placement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let letter = match self.color {
            Color::White => self.kind.letter().to_ascii_uppercase(),
            Color::Black => self.kind.letter(),
        };
        write!(f, "{letter}{}", self.position)
    }
}

/// Starting configuration for a [`Chessboard`](crate::Chessboard).
///
/// A `Setup` is only a list; nothing is validated until a board is built
/// from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Setup {
    placements: Vec<Placement>,
    first_to_move: Color,
}

impl Setup {
    /// The conventional 32-piece opening layout, White to move.
    pub fn standard() -> Setup {
        let mut setup = Setup::empty();
        for color in Color::ALL {
            let home = color.home_rank();
            let pawns = color.pawn_rank();
            for (file, kind) in (0u8..).zip(BACK_RANK) {
                if let Some(pos) = Position::from_index(home * Position::SIZE + file) {
                    setup = setup.place(pos, kind, color);
                }
            }
            for file in 0..Position::SIZE {
                if let Some(pos) = Position::from_index(pawns * Position::SIZE + file) {
                    setup = setup.place(pos, PieceKind::Pawn, color);
                }
            }
        }
        setup
    }

    /// No pieces at all, White to move.
    pub fn empty() -> Setup {
        Setup {
            placements: Vec::new(),
            first_to_move: Color::FIRST,
        }
    }

    /// Parse a whitespace-separated list of placement specifications.
    ///
    /// # Errors
    ///
    /// Returns the first [`ChessError::BadPieceSpec`] or
    /// [`ChessError::BadPieceType`] met.
    pub fn parse(specs: &str) -> Result<Setup, ChessError> {
        specs
            .split_whitespace()
            .try_fold(Setup::empty(), |setup, spec| setup.with(spec))
    }

    /// Add one piece given as a specification such as `"Qd1"`.
    pub fn with(self, spec: &str) -> Result<Setup, ChessError> {
        let placement: Placement = spec.parse()?;
        Ok(self.push(placement))
    }

    /// Add one piece.
    pub fn place(self, position: Position, kind: PieceKind, color: Color) -> Setup {
        self.push(Placement::new(position, kind, color))
    }

    /// Choose which color moves first.
    pub fn side_to_move(mut self, color: Color) -> Setup {
        self.first_to_move = color;
        self
    }

    pub fn placements(&self) -> &[Placement] {
        &self.placements
    }

    pub fn first_to_move(&self) -> Color {
        self.first_to_move
    }

    fn push(mut self, placement: Placement) -> Setup {
        self.placements.push(placement);
        self
    }
}

impl Default for Setup {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use tartan_board::Position;

    use super::{Placement, Setup};
    use crate::color::Color;
    use crate::error::ChessError;
    use crate::piece_kind::PieceKind;

    #[test]
    fn parse_placement() {
        let white_king: Placement = "Ke1".parse().unwrap();
        assert_eq!(
            white_king,
            Placement::new(Position::E1, PieceKind::King, Color::White)
        );
        let black_pawn: Placement = "pd7".parse().unwrap();
        assert_eq!(black_pawn.color, Color::Black);
        assert_eq!(black_pawn.kind, PieceKind::Pawn);
        assert_eq!(black_pawn.to_string(), "pd7");
    }

    #[test]
    fn placement_errors() {
        assert!(matches!(
            "Ke1x".parse::<Placement>(),
            Err(ChessError::BadPieceSpec { reason: "too long", .. })
        ));
        assert!(matches!(
            "K1".parse::<Placement>(),
            Err(ChessError::BadPieceSpec { reason: "too short", .. })
        ));
        assert!(matches!(
            "1e1".parse::<Placement>(),
            Err(ChessError::BadPieceSpec { .. })
        ));
        assert_eq!(
            "Xe1".parse::<Placement>(),
            Err(ChessError::BadPieceType { found: "X".to_string() })
        );
        assert!(matches!(
            "Ki9".parse::<Placement>(),
            Err(ChessError::BadPieceSpec { .. })
        ));
    }

    #[test]
    fn standard_layout() {
        let setup = Setup::standard();
        assert_eq!(setup.placements().len(), 32);
        assert_eq!(setup.first_to_move(), Color::White);
        assert!(
            setup
                .placements()
                .contains(&Placement::new(Position::D8, PieceKind::Queen, Color::Black))
        );
        assert!(
            setup
                .placements()
                .contains(&Placement::new(Position::H2, PieceKind::Pawn, Color::White))
        );
        assert_eq!(Setup::default(), setup);
    }

    #[test]
    fn parse_list() {
        let setup = Setup::parse("Ke1 ke8  Ra1\n").unwrap().side_to_move(Color::Black);
        assert_eq!(setup.placements().len(), 3);
        assert_eq!(setup.first_to_move(), Color::Black);
        assert!(Setup::parse("Ke1 ke").is_err());
    }
}
