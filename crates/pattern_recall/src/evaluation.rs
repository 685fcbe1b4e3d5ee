//! Scoring a guess against the target pattern.
//!
//! False positives (selected but not in the target) and false negatives
//! (in the target but not selected) land in the same `incorrect` bucket.

use crate::pattern::Pattern;
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Outcome of comparing a selection `S` with a target `P`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    /// `S ∩ P`.
    pub correct: Pattern,
    /// `(S \ P) ∪ (P \ S)`.
    pub incorrect: Pattern,
}

impl Evaluation {
    /// Compares `selection` with `target`.
    #[instrument(skip_all, fields(selected = selection.len(), target = target.len()))]
    pub fn evaluate(target: &Pattern, selection: &Pattern) -> Self {
        Self {
            correct: selection.intersection(target),
            incorrect: selection.symmetric_difference(target),
        }
    }

    /// True iff the selection equalled the target.
    ///
    /// `correct == target` alone cannot see extra selections, and an empty
    /// `incorrect` alone cannot see a missing target, so both are required.
    pub fn is_exact_match(&self, target: &Pattern) -> bool {
        is_exact_match(target, &self.correct, &self.incorrect)
    }
}

/// Exact-match test over already computed result sets.
pub fn is_exact_match(target: &Pattern, correct: &Pattern, incorrect: &Pattern) -> bool {
    correct == target && incorrect.is_empty()
}
