//! The set of turns available to one piece.

use tartan_board::Position;

use crate::piece_kind::PieceKind;
use crate::turn::Turn;

/// Turns available to the piece on one origin, in generation order.
///
/// No two turns share both destination and promotion kind, so a destination
/// maps to a single turn except for promotions, which carry one turn per kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnMap {
    origin: Position,
    turns: Vec<Turn>,
}

impl TurnMap {
    /// Create an empty map for the piece on `origin`.
    pub(crate) fn new(origin: Position) -> TurnMap {
        TurnMap {
            origin,
            turns: Vec::new(),
        }
    }

    /// Tile the mapped piece stands on.
    #[inline]
    pub fn origin(&self) -> Position {
        self.origin
    }

    /// Add a turn.
    #[inline]
    pub(crate) fn push(&mut self, turn: Turn) {
        debug_assert_eq!(turn.from(), self.origin);
        debug_assert!(self.find(turn.to(), turn.promotion()).is_none());
        self.turns.push(turn);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[Turn] {
        &self.turns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Turn> {
        self.turns.iter()
    }

    /// Look up the turn to `to`, with `promotion` selecting among promotion turns.
    pub fn find(&self, to: Position, promotion: Option<PieceKind>) -> Option<&Turn> {
        self.turns
            .iter()
            .find(|turn| turn.to() == to && turn.promotion() == promotion)
    }

    /// Return `true` if any turn lands on `to`.
    pub fn reaches(&self, to: Position) -> bool {
        self.turns.iter().any(|turn| turn.to() == to)
    }

    /// Return `true` if `turn` is in the map.
    pub fn contains(&self, turn: &Turn) -> bool {
        self.turns.contains(turn)
    }

    /// Keep only the turns for which `keep` returns `true`.
    pub fn retain(&mut self, keep: impl FnMut(&Turn) -> bool) {
        self.turns.retain(keep);
    }

    /// Distinct destinations in generation order.
    pub fn destinations(&self) -> Vec<Position> {
        let mut out: Vec<Position> = Vec::with_capacity(self.turns.len());
        for turn in &self.turns {
            if !out.contains(&turn.to()) {
                out.push(turn.to());
            }
        }
        out
    }
}

impl std::ops::Index<usize> for TurnMap {
    type Output = Turn;
    #[inline]
    fn index(&self, index: usize) -> &Turn {
        &self.turns[index]
    }
}

impl<'a> IntoIterator for &'a TurnMap {
    type Item = &'a Turn;
    type IntoIter = std::slice::Iter<'a, Turn>;
    fn into_iter(self) -> Self::IntoIter {
        self.turns.iter()
    }
}

impl IntoIterator for TurnMap {
    type Item = Turn;
    type IntoIter = std::vec::IntoIter<Turn>;
    fn into_iter(self) -> Self::IntoIter {
        self.turns.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use tartan_board::{Board, Position};

    use super::TurnMap;
    use crate::RawBoard;
    use crate::color::Color;
    use crate::piece::Piece;
    use crate::piece_kind::PieceKind;
    use crate::turn::Turn;

    #[test]
    fn find_distinguishes_promotions() {
        let board: RawBoard = Board::new();
        let pawn = Piece::new(PieceKind::Pawn, Color::White);
        let mut map = TurnMap::new(Position::B7);
        for kind in PieceKind::PROMOTIONS {
            map.push(Turn::promoting(board.id(), pawn, Position::B7, Position::B8, kind, None));
        }
        assert_eq!(map.len(), 4);
        assert_eq!(map.destinations(), vec![Position::B8]);
        assert!(map.reaches(Position::B8));
        assert_eq!(
            map.find(Position::B8, Some(PieceKind::Rook)).and_then(Turn::promotion),
            Some(PieceKind::Rook)
        );
        assert!(map.find(Position::B8, None).is_none());
    }

    #[test]
    fn retain_and_iterate() {
        let board: RawBoard = Board::new();
        let rook = Piece::new(PieceKind::Rook, Color::Black);
        let mut map = TurnMap::new(Position::A8);
        map.push(Turn::normal(board.id(), rook, Position::A8, Position::A7));
        map.push(Turn::normal(board.id(), rook, Position::A8, Position::B8));
        map.retain(|turn| turn.to() != Position::A7);
        assert_eq!(map.len(), 1);
        assert_eq!(map[0].to(), Position::B8);
        assert_eq!((&map).into_iter().count(), 1);
        assert!(!map.is_empty());
        assert_eq!(map.origin(), Position::A8);
    }
}
