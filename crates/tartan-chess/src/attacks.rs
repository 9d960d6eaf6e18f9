//! Attack detection over a tile grid.

use tartan_board::{Grid, Offset, Position};

use crate::color::Color;
use crate::piece::Piece;
use crate::piece_kind::PieceKind;

pub(crate) const KNIGHT_JUMPS: [Offset; 8] = [
    Offset::new(1, 2),
    Offset::new(2, 1),
    Offset::new(2, -1),
    Offset::new(1, -2),
    Offset::new(-1, -2),
    Offset::new(-2, -1),
    Offset::new(-2, 1),
    Offset::new(-1, 2),
];

pub(crate) const DIAGONALS: [Offset; 4] = [
    Offset::new(1, 1),
    Offset::new(1, -1),
    Offset::new(-1, -1),
    Offset::new(-1, 1),
];

pub(crate) const ORTHOGONALS: [Offset; 4] = [
    Offset::new(0, 1),
    Offset::new(1, 0),
    Offset::new(0, -1),
    Offset::new(-1, 0),
];

pub(crate) const KING_STEPS: [Offset; 8] = [
    Offset::new(0, 1),
    Offset::new(1, 1),
    Offset::new(1, 0),
    Offset::new(1, -1),
    Offset::new(0, -1),
    Offset::new(-1, -1),
    Offset::new(-1, 0),
    Offset::new(-1, 1),
];

/// First piece met walking from `from` along `direction`.
pub(crate) fn first_along(grid: &Grid<Piece>, from: Position, direction: Offset) -> Option<Piece> {
    from.ray(direction).find_map(|pos| grid.get(pos))
}

/// Check if `target` is attacked by any piece of color `by`.
///
/// Works backwards from the target: a knight of color `by` a knight's jump
/// away attacks it, and so on for each kind. Pawns attack diagonally forward
/// only, so their lookup goes one rank against `by`'s direction.
pub fn is_attacked(grid: &Grid<Piece>, target: Position, by: Color) -> bool {
    let holds = |pos: Option<Position>, kind: PieceKind| {
        pos.and_then(|p| grid.get(p))
            .is_some_and(|piece| piece.color() == by && piece.kind() == kind)
    };

    if KNIGHT_JUMPS
        .iter()
        .any(|&jump| holds(target.translate(jump), PieceKind::Knight))
    {
        return true;
    }
    if KING_STEPS
        .iter()
        .any(|&step| holds(target.translate(step), PieceKind::King))
    {
        return true;
    }
    let behind = -by.forward();
    if [-1, 1]
        .iter()
        .any(|&df| holds(target.translate(Offset::new(df, behind)), PieceKind::Pawn))
    {
        return true;
    }

    let slider_hits = |directions: &[Offset; 4], kind: PieceKind| {
        directions.iter().any(|&dir| {
            first_along(grid, target, dir).is_some_and(|piece| {
                piece.color() == by && (piece.kind() == kind || piece.kind() == PieceKind::Queen)
            })
        })
    };
    slider_hits(&ORTHOGONALS, PieceKind::Rook) || slider_hits(&DIAGONALS, PieceKind::Bishop)
}

/// Return `true` if the king of `color` stands on an attacked tile.
///
/// A grid without a king of that color is never in check.
pub fn king_in_check(grid: &Grid<Piece>, color: Color) -> bool {
    grid.occupied()
        .find(|(_, piece)| piece.kind() == PieceKind::King && piece.color() == color)
        .is_some_and(|(pos, _)| is_attacked(grid, pos, color.flip()))
}
