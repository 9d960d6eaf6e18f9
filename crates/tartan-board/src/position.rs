//! Board coordinates.

use std::fmt;
use std::str::FromStr;

use crate::error::BoardError;
use crate::offset::Offset;

/// A tile on the 8x8 board, stored as `rank * 8 + file`.
///
/// Files and ranks are zero-based: `a1` is file 0, rank 0 and `h8` is file 7,
/// rank 7. The derived ordering is rank-major, which makes positions usable as
/// ordered container keys.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(u8);

impl Position {
    /// Number of files (and ranks) on the board.
    pub const SIZE: u8 = 8;

    /// Total number of tiles.
    pub const COUNT: usize = 64;

    /// Create a position from zero-based file and rank.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::OutOfBounds`] if either coordinate is 8 or more.
    pub fn new(file: u8, rank: u8) -> Result<Position, BoardError> {
        if file < Self::SIZE && rank < Self::SIZE {
            Ok(Position(rank * Self::SIZE + file))
        } else {
            Err(BoardError::OutOfBounds {
                file: file.into(),
                rank: rank.into(),
            })
        }
    }

    /// Create a position from a zero-based index, returning `None` if out of range.
    #[inline]
    pub const fn from_index(index: u8) -> Option<Position> {
        if (index as usize) < Self::COUNT {
            Some(Position(index))
        } else {
            None
        }
    }

    /// Return the zero-based index (0..63).
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Return the zero-based file (0 = a).
    #[inline]
    pub const fn file(self) -> u8 {
        self.0 % Self::SIZE
    }

    /// Return the zero-based rank (0 = 1st rank).
    #[inline]
    pub const fn rank(self) -> u8 {
        self.0 / Self::SIZE
    }

    /// Step by `offset`, or `None` if the result leaves the board.
    #[inline]
    pub fn translate(self, offset: Offset) -> Option<Position> {
        let file = i16::from(self.file()) + i16::from(offset.file);
        let rank = i16::from(self.rank()) + i16::from(offset.rank);
        if (0..Self::SIZE as i16).contains(&file) && (0..Self::SIZE as i16).contains(&rank) {
            Some(Position(rank as u8 * Self::SIZE + file as u8))
        } else {
            None
        }
    }

    /// Iterate over every tile from a1 to h8.
    pub fn all() -> impl Iterator<Item = Position> {
        (0..Self::COUNT as u8).map(Position)
    }

    /// Iterate from `self` in steps of `direction` until the edge, excluding `self`.
    pub fn ray(self, direction: Offset) -> impl Iterator<Item = Position> {
        std::iter::successors(self.translate(direction), move |pos| pos.translate(direction))
    }

    // Named tile constants
    pub const A1: Position = Position(0);
    pub const B1: Position = Position(1);
    pub const C1: Position = Position(2);
    pub const D1: Position = Position(3);
    pub const E1: Position = Position(4);
    pub const F1: Position = Position(5);
    pub const G1: Position = Position(6);
    pub const H1: Position = Position(7);
    pub const A2: Position = Position(8);
    pub const B2: Position = Position(9);
    pub const C2: Position = Position(10);
    pub const D2: Position = Position(11);
    pub const E2: Position = Position(12);
    pub const F2: Position = Position(13);
    pub const G2: Position = Position(14);
    pub const H2: Position = Position(15);
    pub const A3: Position = Position(16);
    pub const B3: Position = Position(17);
    pub const C3: Position = Position(18);
    pub const D3: Position = Position(19);
    pub const E3: Position = Position(20);
    pub const F3: Position = Position(21);
    pub const G3: Position = Position(22);
    pub const H3: Position = Position(23);
    pub const A4: Position = Position(24);
    pub const B4: Position = Position(25);
    pub const C4: Position = Position(26);
    pub const D4: Position = Position(27);
    pub const E4: Position = Position(28);
    pub const F4: Position = Position(29);
    pub const G4: Position = Position(30);
    pub const H4: Position = Position(31);
    pub const A5: Position = Position(32);
    pub const B5: Position = Position(33);
    pub const C5: Position = Position(34);
    pub const D5: Position = Position(35);
    pub const E5: Position = Position(36);
    pub const F5: Position = Position(37);
    pub const G5: Position = Position(38);
    pub const H5: Position = Position(39);
    pub const A6: Position = Position(40);
    pub const B6: Position = Position(41);
    pub const C6: Position = Position(42);
    pub const D6: Position = Position(43);
    pub const E6: Position = Position(44);
    pub const F6: Position = Position(45);
    pub const G6: Position = Position(46);
    pub const H6: Position = Position(47);
    pub const A7: Position = Position(48);
    pub const B7: Position = Position(49);
    pub const C7: Position = Position(50);
    pub const D7: Position = Position(51);
    pub const E7: Position = Position(52);
    pub const F7: Position = Position(53);
    pub const G7: Position = Position(54);
    pub const H7: Position = Position(55);
    pub const A8: Position = Position(56);
    pub const B8: Position = Position(57);
    pub const C8: Position = Position(58);
    pub const D8: Position = Position(59);
    pub const E8: Position = Position(60);
    pub const F8: Position = Position(61);
    pub const G8: Position = Position(62);
    pub const H8: Position = Position(63);
}

impl FromStr for Position {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Position, BoardError> {
        let invalid = || BoardError::InvalidNotation { found: s.to_string() };
        let &[file, rank] = s.as_bytes() else {
            return Err(invalid());
        };
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(invalid());
        }
        Position::new(file - b'a', rank - b'1')
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = (b'a' + self.file()) as char;
        write!(f, "{file}{}", self.rank() + 1)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Position({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::Position;
    use crate::error::BoardError;
    use crate::offset::Offset;

    #[test]
    fn new_and_accessors() {
        let pos = Position::new(4, 3).unwrap();
        assert_eq!(pos, Position::E4);
        assert_eq!(pos.file(), 4);
        assert_eq!(pos.rank(), 3);
        assert_eq!(pos.index(), 28);
    }

    #[test]
    fn new_out_of_range() {
        assert_eq!(
            Position::new(8, 0),
            Err(BoardError::OutOfBounds { file: 8, rank: 0 })
        );
        assert!(Position::new(0, 8).is_err());
        assert!(Position::new(255, 255).is_err());
    }

    #[test]
    fn translate_stops_at_edge() {
        assert_eq!(Position::E4.translate(Offset::new(1, 1)), Some(Position::F5));
        assert_eq!(Position::A1.translate(Offset::new(-1, 0)), None);
        assert_eq!(Position::H8.translate(Offset::new(0, 1)), None);
        assert_eq!(Position::H1.translate(Offset::new(1, 0)), None);
        assert_eq!(Position::B1.translate(Offset::new(-1, 2)), Some(Position::A3));
    }

    #[test]
    fn translate_extreme_offsets_are_off_board() {
        assert_eq!(Position::E4.translate(Offset::new(i8::MAX, 0)), None);
        assert_eq!(Position::H8.translate(Offset::new(i8::MAX, i8::MAX)), None);
        assert_eq!(Position::E4.translate(Offset::new(i8::MIN, i8::MIN)), None);
        assert_eq!(Position::A1.translate(Offset::new(0, i8::MIN)), None);
    }

    #[test]
    fn ray_runs_to_edge() {
        let ray: Vec<_> = Position::C1.ray(Offset::new(1, 1)).collect();
        assert_eq!(
            ray,
            vec![Position::D2, Position::E3, Position::F4, Position::G5, Position::H6]
        );
        assert_eq!(Position::H8.ray(Offset::new(1, 0)).count(), 0);
    }

    #[test]
    fn coordinate_notation() {
        assert_eq!("a1".parse::<Position>(), Ok(Position::A1));
        assert_eq!("e4".parse::<Position>(), Ok(Position::E4));
        assert_eq!("h8".parse::<Position>(), Ok(Position::H8));
        assert_eq!(format!("{}", Position::E4), "e4");
        assert_eq!(format!("{:?}", Position::E4), "Position(e4)");
    }

    #[test]
    fn coordinate_notation_invalid() {
        for bad in ["i1", "a9", "", "a", "a1b", "E4"] {
            assert!(
                matches!(bad.parse::<Position>(), Err(BoardError::InvalidNotation { .. })),
                "{bad:?} should not parse"
            );
        }
    }

    #[test]
    fn ordering_is_rank_major() {
        assert!(Position::H1 < Position::A2);
        assert!(Position::A1 < Position::B1);
    }

    #[test]
    fn all_iterator() {
        assert_eq!(Position::all().count(), Position::COUNT);
        assert_eq!(Position::all().next(), Some(Position::A1));
        assert_eq!(Position::all().last(), Some(Position::H8));
        for pos in Position::all() {
            assert_eq!(Position::new(pos.file(), pos.rank()), Ok(pos));
        }
    }
}
