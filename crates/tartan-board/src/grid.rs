//! Fixed-size tile storage.

use std::fmt;

use crate::position::Position;

/// An 8x8 array of tiles, each either empty or holding one piece.
///
/// `Grid` is `Copy` whenever the piece type is, so callers can take a scratch
/// copy, mutate it, and either keep or drop the result.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Grid<P> {
    tiles: [Option<P>; Position::COUNT],
}

impl<P: Copy> Grid<P> {
    /// Create a grid with every tile empty.
    pub fn new() -> Grid<P> {
        Grid {
            tiles: [None; Position::COUNT],
        }
    }

    /// Return the piece on `position`, if any.
    #[inline]
    pub fn get(&self, position: Position) -> Option<P> {
        self.tiles[position.index()]
    }

    /// Return `true` if `position` holds a piece.
    #[inline]
    pub fn is_occupied(&self, position: Position) -> bool {
        self.tiles[position.index()].is_some()
    }

    /// Put `piece` on `position`, returning whatever stood there before.
    #[inline]
    pub fn set(&mut self, position: Position, piece: P) -> Option<P> {
        self.tiles[position.index()].replace(piece)
    }

    /// Empty `position`, returning its piece.
    #[inline]
    pub fn take(&mut self, position: Position) -> Option<P> {
        self.tiles[position.index()].take()
    }

    /// Iterate over occupied tiles from a1 to h8.
    pub fn occupied(&self) -> impl Iterator<Item = (Position, P)> + '_ {
        Position::all().filter_map(|pos| self.get(pos).map(|piece| (pos, piece)))
    }

    /// Number of occupied tiles.
    pub fn count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_some()).count()
    }
}

impl<P: Copy> Default for Grid<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: fmt::Debug> fmt::Debug for Grid<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let occupied = Position::all()
            .zip(self.tiles.iter())
            .filter_map(|(pos, tile)| tile.as_ref().map(|piece| (pos, piece)));
        f.debug_map().entries(occupied).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::Grid;
    use crate::position::Position;

    #[test]
    fn set_get_take() {
        let mut grid: Grid<char> = Grid::new();
        assert_eq!(grid.get(Position::D4), None);
        assert_eq!(grid.set(Position::D4, 'x'), None);
        assert_eq!(grid.get(Position::D4), Some('x'));
        assert_eq!(grid.set(Position::D4, 'o'), Some('x'));
        assert_eq!(grid.take(Position::D4), Some('o'));
        assert!(!grid.is_occupied(Position::D4));
    }

    #[test]
    fn occupied_in_order() {
        let mut grid = Grid::new();
        grid.set(Position::H8, 2);
        grid.set(Position::A1, 1);
        let seen: Vec<_> = grid.occupied().collect();
        assert_eq!(seen, vec![(Position::A1, 1), (Position::H8, 2)]);
        assert_eq!(grid.count(), 2);
    }

    #[test]
    fn copies_are_independent() {
        let mut grid = Grid::new();
        grid.set(Position::E4, 'p');
        let mut scratch = grid;
        scratch.take(Position::E4);
        assert!(grid.is_occupied(Position::E4));
        assert!(!scratch.is_occupied(Position::E4));
    }
}
