//! Error types for the recall engine.
//!
//! The taxonomy is narrow: commands issued in the wrong phase are not errors
//! (they come back as [`crate::Transition::Ignored`]), so only out-of-range
//! input, a malformed catalog or a failed level lookup can fail.

/// A cell index outside the board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum GridError {
    /// Index is not within `0..cell_count`.
    #[display("Cell index {} is outside the board (0..{})", index, cell_count)]
    OutOfRange {
        /// Offending index.
        index: usize,
        /// Number of cells on the board.
        cell_count: usize,
    },
}

/// A catalog lookup or construction failure.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum CatalogError {
    /// The catalog has no levels.
    #[display("Level catalog is empty")]
    Empty,

    /// Level index is not within `0..count`.
    #[display("Level {} does not exist (catalog has {} levels)", index, count)]
    OutOfRange {
        /// Requested level index.
        index: usize,
        /// Number of levels in the catalog.
        count: usize,
    },

    /// A level's rule produced no cells.
    #[display("Level {:?} has an empty pattern", name)]
    EmptyPattern {
        /// Name of the offending level.
        name: &'static str,
    },

    /// A level's rule returned different patterns on repeated calls.
    #[display("Level {:?} has a non-deterministic rule", name)]
    NondeterministicRule {
        /// Name of the offending level.
        name: &'static str,
    },
}

/// Error returned by a session command.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SessionError {
    /// The renderer sent a cell index outside the board.
    #[display("Cannot toggle cell {}: board has {} cells", index, cell_count)]
    OutOfRange {
        /// Offending index.
        index: usize,
        /// Number of cells on the board.
        cell_count: usize,
    },

    /// The session asked the catalog for a level it does not hold.
    #[display("Level lookup failed: {}", _0)]
    Catalog(CatalogError),
}

impl From<CatalogError> for SessionError {
    fn from(err: CatalogError) -> Self {
        SessionError::Catalog(err)
    }
}

impl From<GridError> for SessionError {
    fn from(err: GridError) -> Self {
        match err {
            GridError::OutOfRange { index, cell_count } => {
                SessionError::OutOfRange { index, cell_count }
            }
        }
    }
}
