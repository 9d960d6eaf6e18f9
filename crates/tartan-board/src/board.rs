//! Generic grid container with an append-only history.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::trace;

use crate::error::BoardError;
use crate::grid::Grid;
use crate::position::Position;

static NEXT_BOARD_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of one board instance.
///
/// Every [`Board`] receives a fresh id on construction and on clone, so a
/// history entry minted against one instance can be told apart from entries
/// minted against another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BoardId(u64);

impl BoardId {
    fn next() -> BoardId {
        BoardId(NEXT_BOARD_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for BoardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A history entry that knows how to reverse itself on a grid.
pub trait Revert<P> {
    /// Restore `grid` to the occupancy it had before this entry was committed.
    fn revert(&self, grid: &mut Grid<P>);
}

/// A game-agnostic board: an 8x8 [`Grid`] of pieces `P` plus an ordered
/// history of committed entries `R`.
///
/// The board never interprets its entries. Games compute the next grid
/// themselves and hand it over together with the entry through
/// [`Board::commit`], so a commit either lands completely or not at all.
#[derive(Debug)]
pub struct Board<P, R> {
    id: BoardId,
    grid: Grid<P>,
    history: Vec<R>,
}

impl<P: Copy, R> Board<P, R> {
    /// Create an empty board with no history.
    pub fn new() -> Board<P, R> {
        Board::from_grid(Grid::new())
    }

    /// Create a board over pre-filled tiles with no history.
    pub fn from_grid(grid: Grid<P>) -> Board<P, R> {
        Board {
            id: BoardId::next(),
            grid,
            history: Vec::new(),
        }
    }

    /// Return this instance's identity.
    #[inline]
    pub fn id(&self) -> BoardId {
        self.id
    }

    /// Put `piece` on an empty tile.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::PositionIsTaken`] if the tile is occupied.
    pub fn place(&mut self, position: Position, piece: P) -> Result<(), BoardError> {
        if self.grid.is_occupied(position) {
            return Err(BoardError::PositionIsTaken { position });
        }
        self.grid.set(position, piece);
        trace!(board = %self.id, %position, "placed piece");
        Ok(())
    }

    /// Remove and return the piece on `position`.
    pub fn remove(&mut self, position: Position) -> Option<P> {
        self.grid.take(position)
    }

    /// Return the piece on `position`, if any.
    #[inline]
    pub fn get(&self, position: Position) -> Option<P> {
        self.grid.get(position)
    }

    /// Return `true` if `position` holds a piece.
    #[inline]
    pub fn is_occupied(&self, position: Position) -> bool {
        self.grid.is_occupied(position)
    }

    /// Return the current tiles.
    #[inline]
    pub fn grid(&self) -> &Grid<P> {
        &self.grid
    }

    /// Iterate over occupied tiles from a1 to h8.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, P)> + '_ {
        self.grid.occupied()
    }

    /// Committed entries, oldest first.
    #[inline]
    pub fn history(&self) -> &[R] {
        &self.history
    }

    /// The most recently committed entry.
    #[inline]
    pub fn last_entry(&self) -> Option<&R> {
        self.history.last()
    }

    /// Replace the tiles with `grid` and append `entry` to the history.
    pub fn commit(&mut self, grid: Grid<P>, entry: R) {
        self.grid = grid;
        self.history.push(entry);
    }
}

impl<P: Copy, R: Revert<P>> Board<P, R> {
    /// Pop the most recent entry and reverse its effect on the tiles.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError::EmptyHistory`] if nothing has been committed.
    pub fn undo_last(&mut self) -> Result<R, BoardError> {
        let entry = self.history.pop().ok_or(BoardError::EmptyHistory)?;
        entry.revert(&mut self.grid);
        trace!(board = %self.id, remaining = self.history.len(), "reverted last entry");
        Ok(entry)
    }
}

impl<P: Copy, R> Default for Board<P, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Copy, R: Clone> Clone for Board<P, R> {
    /// Copies tiles and history under a new identity.
    fn clone(&self) -> Self {
        Board {
            id: BoardId::next(),
            grid: self.grid,
            history: self.history.clone(),
        }
    }
}
