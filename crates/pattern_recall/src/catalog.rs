//! The level catalog: a fixed, ordered list of pattern rules.
//!
//! Levels are played strictly in catalog order. Each rule is a pure
//! function over the 5x5 board; the catalog never changes after it is built.

use crate::error::CatalogError;
use crate::grid::{CELL_COUNT, GRID_SIZE};
use crate::pattern::Pattern;
use tracing::{debug, instrument, warn};

/// A pure rule computing a level's target pattern.
pub type PatternRule = fn() -> Pattern;

/// One level definition.
#[derive(Clone, Copy)]
pub struct Level {
    name: &'static str,
    description: &'static str,
    hint: &'static str,
    rule: PatternRule,
}

impl Level {
    /// Creates a level.
    pub const fn new(
        name: &'static str,
        description: &'static str,
        hint: &'static str,
        rule: PatternRule,
    ) -> Self {
        Self {
            name,
            description,
            hint,
            rule,
        }
    }

    /// Display label.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Flavour text shown while playing.
    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Hint revealed after a failed attempt.
    pub fn hint(&self) -> &'static str {
        self.hint
    }

    /// Computes the target pattern. Same result on every call.
    pub fn pattern(&self) -> Pattern {
        (self.rule)()
    }
}

impl std::fmt::Debug for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Level").field("name", &self.name).finish()
    }
}

/// Ordered, non-empty, immutable list of levels.
#[derive(Debug, Clone)]
pub struct Catalog {
    levels: Vec<Level>,
}

impl Catalog {
    /// Builds a catalog, validating every level.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::Empty`] if `levels` is empty
    /// - [`CatalogError::EmptyPattern`] if a rule yields no cells
    /// - [`CatalogError::NondeterministicRule`] if a rule disagrees with itself
    #[instrument(skip(levels), fields(count = levels.len()))]
    pub fn new(levels: Vec<Level>) -> Result<Self, CatalogError> {
        if levels.is_empty() {
            return Err(CatalogError::Empty);
        }

        for level in &levels {
            let first = level.pattern();
            if first.is_empty() {
                return Err(CatalogError::EmptyPattern { name: level.name });
            }
            if first != level.pattern() {
                return Err(CatalogError::NondeterministicRule { name: level.name });
            }
            debug!(level = level.name, cells = first.len(), "Level validated");
        }

        Ok(Self { levels })
    }

    /// The ten built-in levels.
    #[instrument]
    pub fn standard() -> Self {
        Self {
            levels: STANDARD_LEVELS.to_vec(),
        }
    }

    /// Returns the level at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::OutOfRange`] if `index >= len()`.
    pub fn get(&self, index: usize) -> Result<&Level, CatalogError> {
        self.levels.get(index).ok_or(CatalogError::OutOfRange {
            index,
            count: self.levels.len(),
        })
    }

    /// Number of levels (never zero).
    pub fn len(&self) -> usize {
        self.levels.len()
    }

    /// Always false; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Index of the last level.
    pub fn last_index(&self) -> usize {
        self.levels.len() - 1
    }

    /// All levels in play order.
    pub fn levels(&self) -> &[Level] {
        &self.levels
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}

// ─────────────────────────────────────────────────────────────
//  Rules
// ─────────────────────────────────────────────────────────────

const FIBONACCI: [usize; 9] = [0, 1, 1, 2, 3, 5, 8, 13, 21];
const CENTER: usize = GRID_SIZE / 2;
const EDGE: usize = GRID_SIZE - 1;

/// Primality over non-negative integers; 0 and 1 are not prime.
pub fn is_prime(n: usize) -> bool {
    if n < 2 {
        return false;
    }
    (2..).take_while(|d| d * d <= n).all(|d| n % d != 0)
}

/// Pattern from hand-written indices; an index off the board is a bug.
fn fixed(indices: &[usize]) -> Pattern {
    match Pattern::from_indices(indices.iter().copied()) {
        Ok(pattern) => pattern,
        Err(e) => {
            warn!(error = %e, ?indices, "Fixed pattern is off the board");
            debug_assert!(false, "fixed pattern is off the board: {}", e);
            Pattern::new()
        }
    }
}

fn even_positions() -> Pattern {
    Pattern::from_fn(|c| c.index() % 2 == 0)
}

fn diagonals() -> Pattern {
    Pattern::from_fn(|c| c.row() == c.col() || c.row() + c.col() == EDGE)
}

fn primes() -> Pattern {
    Pattern::from_fn(|c| is_prime(c.index()))
}

fn center_cluster() -> Pattern {
    fixed(&[7, 11, 12, 13, 17])
}

fn modulo_three() -> Pattern {
    Pattern::from_fn(|c| (c.row() + c.col()) % 3 == 0)
}

fn border() -> Pattern {
    Pattern::from_fn(|c| c.row() == 0 || c.row() == EDGE || c.col() == 0 || c.col() == EDGE)
}

fn checkerboard() -> Pattern {
    Pattern::from_fn(|c| (c.row() + c.col()) % 2 == 0)
}

fn fibonacci() -> Pattern {
    let in_range: Vec<usize> = FIBONACCI.iter().copied().filter(|&n| n < CELL_COUNT).collect();
    fixed(&in_range)
}

fn plus_sign() -> Pattern {
    Pattern::from_fn(|c| c.row() == CENTER || c.col() == CENTER)
}

fn perfect_squares() -> Pattern {
    fixed(&[0, 1, 4, 9, 16])
}

pub(crate) static STANDARD_LEVELS: [Level; 10] = [
    Level::new(
        "Level 1: Even Positions",
        "Watch carefully and remember the pattern...",
        "Look for squares at even positions (0, 2, 4, 6, ...)",
        even_positions,
    ),
    Level::new(
        "Level 2: Diagonals",
        "A new pattern emerges...",
        "Think about diagonal lines - both from top-left to bottom-right and top-right to bottom-left.",
        diagonals,
    ),
    Level::new(
        "Level 3: Prime Numbers",
        "Mathematics will guide you...",
        "Prime numbers are greater than 1 and only divisible by 1 and themselves (2, 3, 5, 7, 11, 13, 17, 19, 23...).",
        primes,
    ),
    Level::new(
        "Level 4: Center Cluster",
        "Focus on the heart of the grid...",
        "The center square is at position 12. What about its immediate neighbors (up, down, left, right)?",
        center_cluster,
    ),
    Level::new(
        "Level 5: Modulo Pattern",
        "A mathematical formula determines this pattern...",
        "For each square, add its row number and column number. If the sum is divisible by 3, it flashes.",
        modulo_three,
    ),
    Level::new(
        "Level 6: Corners and Edges",
        "Look to the boundaries...",
        "The outermost ring of squares forms the border of the grid.",
        border,
    ),
    Level::new(
        "Level 7: Checkerboard",
        "A classic pattern awaits...",
        "Think of a checkerboard - alternating squares. If the sum of row and column is even, it flashes.",
        checkerboard,
    ),
    Level::new(
        "Level 8: Fibonacci Sequence",
        "Nature's favorite numbers...",
        "The Fibonacci sequence: each number is the sum of the two before it (0, 1, 1, 2, 3, 5, 8, 13, 21...).",
        fibonacci,
    ),
    Level::new(
        "Level 9: Plus Sign",
        "Cross patterns in the center...",
        "A plus sign crosses through the middle row and middle column.",
        plus_sign,
    ),
    Level::new(
        "Level 10: Perfect Squares",
        "The final challenge - mathematical perfection...",
        "Perfect squares are numbers like 0, 1, 4, 9, 16, 25... (0², 1², 2², 3², 4²...).",
        perfect_squares,
    ),
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime() {
        let primes: Vec<usize> = (0..25).filter(|&n| is_prime(n)).collect();
        assert_eq!(primes, vec![2, 3, 5, 7, 11, 13, 17, 19, 23]);
    }

    #[test]
    fn test_standard_catalog_validates() {
        let levels = Catalog::standard().levels().to_vec();
        assert_eq!(Catalog::new(levels).map(|c| c.len()), Ok(10));
    }

    #[test]
    fn test_fixed_pattern_keeps_every_index() {
        assert_eq!(fixed(&[0, 1, 4, 9, 16]).len(), 5);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "off the board")]
    fn test_fixed_pattern_rejects_off_board_index() {
        fixed(&[3, 25]);
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[test]
    fn test_empty_pattern_rejected() {
        let blank = Level::new("Blank", "", "", Pattern::new);
        assert_eq!(
            Catalog::new(vec![blank]).map(|c| c.len()),
            Err(CatalogError::EmptyPattern { name: "Blank" })
        );
    }

    #[test]
    fn test_get_out_of_range() {
        let catalog = Catalog::standard();
        assert!(catalog.get(9).is_ok());
        assert_eq!(
            catalog.get(10).map(Level::name),
            Err(CatalogError::OutOfRange {
                index: 10,
                count: 10
            })
        );
    }
}
