//! The bingo card: a square grid of items, each remembering which teams
//! collected it.
//!
//! The engine only talks to a card through [`CardView`], so anything that can
//! answer line, completion and lock queries can stand in for [`BingoCard`].

pub mod grid;

use crate::team::TeamId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub use grid::{BingoCard, BingoCell};

/// Position of a cell on the card, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CellId {
    pub row: usize,
    pub col: usize,
}

impl CellId {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Read-only queries the win-condition engine needs from a card.
pub trait CardView {
    /// Number of rows, columns and diagonals fully collected by `team`.
    fn completed_line_count(&self, team: TeamId) -> u32;

    /// Whether `team` has collected every cell.
    fn is_fully_complete(&self, team: TeamId) -> bool;

    /// Whether enough teams have collected `cell` that nobody else may.
    fn is_cell_locked(&self, cell: CellId) -> bool;

    fn all_cells(&self) -> Vec<CellId>;

    fn cell_collectors(&self, cell: CellId) -> BTreeSet<TeamId>;

    fn has_collected(&self, cell: CellId, team: TeamId) -> bool {
        self.cell_collectors(cell).contains(&team)
    }
}
