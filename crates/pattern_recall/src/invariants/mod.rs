//! First-class invariants for a recall session.
//!
//! Invariants are logical properties that hold between every pair of
//! transitions. They are testable on their own and composed into
//! [`SessionInvariants`], which the session asserts in debug builds.

mod countdown;
mod hint;
mod progress;
mod result_sets;

pub use countdown::CountdownMatchesPhase;
pub use hint::HintMatchesOutcome;
pub use progress::{LevelInCatalog, ScoreIsAwardMultiple};
pub use result_sets::{ObservationSelectionEmpty, ResultSetsConsistent};

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants checked together.
///
/// Implemented for tuples of up to six invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set.
    ///
    /// Returns every violation, not just the first.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

macro_rules! impl_invariant_set {
    ($($inv:ident),+) => {
        impl<S, $($inv),+> InvariantSet<S> for ($($inv,)+)
        where
            $($inv: Invariant<S>,)+
        {
            fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
                let mut violations = Vec::new();
                $(
                    if !$inv::holds(state) {
                        violations.push(InvariantViolation::new($inv::description()));
                    }
                )+
                if violations.is_empty() {
                    Ok(())
                } else {
                    Err(violations)
                }
            }
        }
    };
}

impl_invariant_set!(I1, I2);
impl_invariant_set!(I1, I2, I3);
impl_invariant_set!(I1, I2, I3, I4);
impl_invariant_set!(I1, I2, I3, I4, I5);
impl_invariant_set!(I1, I2, I3, I4, I5, I6);

/// All session invariants as a composable set.
pub type SessionInvariants = (
    LevelInCatalog,
    CountdownMatchesPhase,
    ObservationSelectionEmpty,
    ResultSetsConsistent,
    HintMatchesOutcome,
    ScoreIsAwardMultiple,
);
