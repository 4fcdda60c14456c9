use super::{CardView, CellId};
use crate::error::{Result, WinConditionError};
use crate::team::TeamId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A single square on the card.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BingoCell {
    pub item: String,
    pub collectors: BTreeSet<TeamId>,
}

impl BingoCell {
    pub fn new(item: impl Into<String>) -> Self {
        Self { item: item.into(), collectors: BTreeSet::new() }
    }

    pub fn has_collected(&self, team: TeamId) -> bool {
        self.collectors.contains(&team)
    }
}

/// In-memory `size × size` card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BingoCard {
    size: usize,
    cells: Vec<BingoCell>,
    /// Number of distinct collectors that locks a cell; `None` outside lockout.
    lock_threshold: Option<u32>,
}

impl BingoCard {
    /// Card with placeholder item names.
    pub fn new(size: usize) -> Result<Self> {
        if size == 0 {
            return Err(WinConditionError::invalid_argument("card size must be at least 1"));
        }
        let cells = (0..size * size).map(|i| BingoCell::new(format!("item_{:02}", i))).collect();
        Ok(Self { size, cells, lock_threshold: None })
    }

    /// Card laid out row by row from `items`, whose length must be a perfect square.
    pub fn from_items(items: Vec<String>) -> Result<Self> {
        let size = (1..=items.len()).find(|s| s * s >= items.len()).unwrap_or(0);
        if size == 0 || size * size != items.len() {
            return Err(WinConditionError::invalid_argument(format!(
                "{} items do not form a square card",
                items.len()
            )));
        }
        let cells = items.into_iter().map(BingoCell::new).collect();
        Ok(Self { size, cells, lock_threshold: None })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn lock_threshold(&self) -> Option<u32> {
        self.lock_threshold
    }

    /// `None` or `Some(0)` disables locking.
    pub fn set_lock_threshold(&mut self, threshold: Option<u32>) {
        self.lock_threshold = threshold.filter(|k| *k > 0);
    }

    pub fn cell(&self, cell: CellId) -> Option<&BingoCell> {
        self.index_of(cell).map(|i| &self.cells[i])
    }

    pub fn item_at(&self, cell: CellId) -> Option<&str> {
        self.cell(cell).map(|c| c.item.as_str())
    }

    pub fn find_item(&self, item: &str) -> Option<CellId> {
        self.cells
            .iter()
            .position(|c| c.item == item)
            .map(|i| CellId::new(i / self.size, i % self.size))
    }

    /// Records `team` as a collector of `cell`.
    ///
    /// Returns `Ok(false)` when nothing changed: the team already has the cell,
    /// or the cell is locked.
    pub fn collect(&mut self, cell: CellId, team: TeamId) -> Result<bool> {
        let index = self.index_of(cell).ok_or_else(|| {
            WinConditionError::invalid_state(format!("cell {} is off the card", cell))
        })?;

        if self.cells[index].has_collected(team) || self.is_locked_at(index) {
            return Ok(false);
        }

        self.cells[index].collectors.insert(team);
        Ok(true)
    }

    pub fn collected_count_for(&self, team: TeamId) -> u32 {
        self.cells.iter().filter(|c| c.has_collected(team)).count() as u32
    }

    fn index_of(&self, cell: CellId) -> Option<usize> {
        if cell.row < self.size && cell.col < self.size {
            Some(cell.row * self.size + cell.col)
        } else {
            None
        }
    }

    fn is_locked_at(&self, index: usize) -> bool {
        match self.lock_threshold {
            Some(k) => self.cells[index].collectors.len() as u32 >= k,
            None => false,
        }
    }

    fn line_complete<I>(&self, team: TeamId, mut indices: I) -> bool
    where
        I: Iterator<Item = usize>,
    {
        indices.all(|i| self.cells[i].has_collected(team))
    }
}

impl CardView for BingoCard {
    fn completed_line_count(&self, team: TeamId) -> u32 {
        let n = self.size;
        let mut lines = 0;

        for row in 0..n {
            if self.line_complete(team, (0..n).map(|col| row * n + col)) {
                lines += 1;
            }
        }
        for col in 0..n {
            if self.line_complete(team, (0..n).map(|row| row * n + col)) {
                lines += 1;
            }
        }
        if self.line_complete(team, (0..n).map(|i| i * n + i)) {
            lines += 1;
        }
        if self.line_complete(team, (0..n).map(|i| i * n + (n - 1 - i))) {
            lines += 1;
        }

        lines
    }

    fn is_fully_complete(&self, team: TeamId) -> bool {
        self.cells.iter().all(|c| c.has_collected(team))
    }

    fn is_cell_locked(&self, cell: CellId) -> bool {
        self.index_of(cell).map(|i| self.is_locked_at(i)).unwrap_or(false)
    }

    fn all_cells(&self) -> Vec<CellId> {
        (0..self.size)
            .flat_map(|row| (0..self.size).map(move |col| CellId::new(row, col)))
            .collect()
    }

    fn cell_collectors(&self, cell: CellId) -> BTreeSet<TeamId> {
        self.cell(cell).map(|c| c.collectors.clone()).unwrap_or_default()
    }

    fn has_collected(&self, cell: CellId, team: TeamId) -> bool {
        self.cell(cell).map(|c| c.has_collected(team)).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: TeamId = TeamId(1);
    const BLUE: TeamId = TeamId(2);
    const GREEN: TeamId = TeamId(3);

    #[test]
    fn test_zero_size_rejected() {
        assert!(BingoCard::new(0).is_err());
    }

    #[test]
    fn test_from_items_requires_square() {
        let items: Vec<String> = (0..9).map(|i| format!("i{}", i)).collect();
        let card = BingoCard::from_items(items).unwrap();
        assert_eq!(card.size(), 3);
        assert_eq!(card.item_at(CellId::new(1, 2)), Some("i5"));
        assert_eq!(card.find_item("i7"), Some(CellId::new(2, 1)));

        let items: Vec<String> = (0..8).map(|i| format!("i{}", i)).collect();
        assert!(BingoCard::from_items(items).is_err());
    }

    #[test]
    fn test_rows_columns_and_diagonals_count_as_lines() {
        let mut card = BingoCard::new(3).unwrap();
        for col in 0..3 {
            card.collect(CellId::new(0, col), RED).unwrap();
        }
        assert_eq!(card.completed_line_count(RED), 1);

        card.collect(CellId::new(1, 1), RED).unwrap();
        card.collect(CellId::new(2, 2), RED).unwrap();
        // row 0 + main diagonal
        assert_eq!(card.completed_line_count(RED), 2);

        card.collect(CellId::new(2, 0), RED).unwrap();
        // + anti-diagonal (0,2)-(1,1)-(2,0)
        assert_eq!(card.completed_line_count(RED), 3);

        card.collect(CellId::new(1, 0), RED).unwrap();
        // + column 0
        assert_eq!(card.completed_line_count(RED), 4);
        assert_eq!(card.completed_line_count(BLUE), 0);
    }

    #[test]
    fn test_full_card_has_every_line() {
        let mut card = BingoCard::new(5).unwrap();
        for cell in card.all_cells() {
            card.collect(cell, RED).unwrap();
        }
        assert!(card.is_fully_complete(RED));
        assert_eq!(card.completed_line_count(RED), 12);
        assert_eq!(card.collected_count_for(RED), 25);
    }

    #[test]
    fn test_collect_twice_is_noop() {
        let mut card = BingoCard::new(2).unwrap();
        assert!(card.collect(CellId::new(0, 0), RED).unwrap());
        assert!(!card.collect(CellId::new(0, 0), RED).unwrap());
        assert_eq!(card.cell_collectors(CellId::new(0, 0)).len(), 1);
    }

    #[test]
    fn test_off_card_collect_fails() {
        let mut card = BingoCard::new(2).unwrap();
        let err = card.collect(CellId::new(2, 0), RED).unwrap_err();
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_lock_engages_at_threshold_and_stays() {
        let mut card = BingoCard::new(2).unwrap();
        card.set_lock_threshold(Some(2));
        let cell = CellId::new(0, 1);

        card.collect(cell, RED).unwrap();
        assert!(!card.is_cell_locked(cell));

        card.collect(cell, BLUE).unwrap();
        assert!(card.is_cell_locked(cell));

        // Locked for latecomers, collectors keep their claim
        assert!(!card.collect(cell, GREEN).unwrap());
        assert!(card.is_cell_locked(cell));
        assert!(card.has_collected(cell, RED));
        assert!(!card.has_collected(cell, GREEN));
    }

    #[test]
    fn test_no_lock_without_threshold() {
        let mut card = BingoCard::new(2).unwrap();
        card.set_lock_threshold(Some(0));
        assert_eq!(card.lock_threshold(), None);

        let cell = CellId::new(1, 1);
        for team in [RED, BLUE, GREEN] {
            assert!(card.collect(cell, team).unwrap());
        }
        assert!(!card.is_cell_locked(cell));
    }
}
