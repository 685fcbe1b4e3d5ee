//! Cell patterns: the sets a level asks the player to memorise.

use crate::error::GridError;
use crate::grid::{Cell, GRID_SIZE};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::instrument;

/// An ordered set of cells.
///
/// Membership is set-based, so building a pattern from a sequence with
/// repeated indices keeps each cell once.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pattern {
    cells: BTreeSet<Cell>,
}

impl Pattern {
    /// Creates an empty pattern.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a pattern from every cell matching `predicate`.
    pub fn from_fn(predicate: impl Fn(Cell) -> bool) -> Self {
        Cell::all().filter(|cell| predicate(*cell)).collect()
    }

    /// Builds a pattern from raw indices, dropping duplicates.
    ///
    /// # Errors
    ///
    /// Returns [`GridError::OutOfRange`] for the first index outside the board.
    #[instrument(skip(indices))]
    pub fn from_indices(indices: impl IntoIterator<Item = usize>) -> Result<Self, GridError> {
        indices.into_iter().map(Cell::new).collect()
    }

    /// Returns true if `cell` is in the pattern.
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns true if the pattern has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterates cells in ascending index order.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Raw indices in ascending order.
    pub fn indices(&self) -> Vec<usize> {
        self.iter().map(Cell::index).collect()
    }

    /// Adds `cell` if absent, removes it if present.
    ///
    /// Returns true if the cell is a member afterwards.
    pub fn toggle(&mut self, cell: Cell) -> bool {
        if self.cells.remove(&cell) {
            false
        } else {
            self.cells.insert(cell);
            true
        }
    }

    /// Removes every cell.
    pub fn clear(&mut self) {
        self.cells.clear();
    }

    /// Cells in both `self` and `other`.
    pub fn intersection(&self, other: &Pattern) -> Pattern {
        self.cells.intersection(&other.cells).copied().collect()
    }

    /// Cells in exactly one of `self` and `other`.
    pub fn symmetric_difference(&self, other: &Pattern) -> Pattern {
        self.cells
            .symmetric_difference(&other.cells)
            .copied()
            .collect()
    }

    /// Returns true if every cell of `self` is in `other`.
    pub fn is_subset(&self, other: &Pattern) -> bool {
        self.cells.is_subset(&other.cells)
    }

    /// Returns true if the two patterns share no cell.
    pub fn is_disjoint(&self, other: &Pattern) -> bool {
        self.cells.is_disjoint(&other.cells)
    }

    /// Formats the pattern as a 5-line grid (`#` member, `.` otherwise).
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..GRID_SIZE {
            let line: Vec<&str> = (0..GRID_SIZE)
                .map(|col| match Cell::at(row, col) {
                    Ok(cell) if self.contains(cell) => "#",
                    _ => ".",
                })
                .collect();
            result.push_str(&line.join(" "));
            if row + 1 < GRID_SIZE {
                result.push('\n');
            }
        }
        result
    }
}

impl FromIterator<Cell> for Pattern {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Pattern {
    type Item = &'a Cell;
    type IntoIter = std::collections::btree_set::Iter<'a, Cell>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pattern(indices: &[usize]) -> Pattern {
        Pattern::from_indices(indices.iter().copied()).unwrap()
    }

    #[test]
    fn test_duplicates_collapse() {
        let p = pattern(&[0, 1, 1, 2]);
        assert_eq!(p.len(), 3);
        assert_eq!(p.indices(), vec![0, 1, 2]);
    }

    #[test]
    fn test_from_indices_rejects_out_of_range() {
        assert!(Pattern::from_indices([3, 25]).is_err());
    }

    #[test]
    fn test_toggle_is_involution() {
        let mut p = pattern(&[4, 9]);
        let before = p.clone();
        assert!(p.toggle(Cell::new(12).unwrap()));
        assert!(!p.toggle(Cell::new(12).unwrap()));
        assert_eq!(p, before);
    }

    #[test]
    fn test_set_algebra() {
        let target = pattern(&[7, 11, 12, 13, 17]);
        let selection = pattern(&[12, 20]);
        assert_eq!(selection.intersection(&target).indices(), vec![12]);
        assert_eq!(
            selection.symmetric_difference(&target).indices(),
            vec![7, 11, 13, 17, 20]
        );
    }

    #[test]
    fn test_display_grid() {
        let p = pattern(&[0, 6, 12, 18, 24]);
        let expected = "# . . . .\n. # . . .\n. . # . .\n. . . # .\n. . . . #";
        assert_eq!(p.display(), expected);
    }

    #[test]
    fn test_serializes_as_index_list() {
        let p = pattern(&[16, 0, 4]);
        assert_eq!(serde_json::to_string(&p).unwrap(), "[0,4,16]");
    }
}
