//! Relative displacements between tiles.

use std::ops::{Add, Mul, Neg};

/// A displacement in files and ranks, used to walk from one [`Position`](crate::Position) to another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Offset {
    pub file: i8,
    pub rank: i8,
}

impl Offset {
    /// The zero displacement.
    pub const ZERO: Offset = Offset::new(0, 0);

    #[inline]
    pub const fn new(file: i8, rank: i8) -> Offset {
        Offset { file, rank }
    }
}

impl Add for Offset {
    type Output = Offset;

    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.file + rhs.file, self.rank + rhs.rank)
    }
}

impl Neg for Offset {
    type Output = Offset;

    #[inline]
    fn neg(self) -> Offset {
        Offset::new(-self.file, -self.rank)
    }
}

impl Mul<i8> for Offset {
    type Output = Offset;

    #[inline]
    fn mul(self, rhs: i8) -> Offset {
        Offset::new(self.file * rhs, self.rank * rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::Offset;

    #[test]
    fn arithmetic() {
        let a = Offset::new(1, 2);
        assert_eq!(a + Offset::new(-1, 1), Offset::new(0, 3));
        assert_eq!(-a, Offset::new(-1, -2));
        assert_eq!(a * 3, Offset::new(3, 6));
        assert_eq!(a + Offset::ZERO, a);
    }
}
