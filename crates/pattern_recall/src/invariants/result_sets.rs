//! Selection and result-set invariants.

use super::Invariant;
use crate::{Phase, Session};

/// Invariant: nothing is selected while the pattern is on display.
pub struct ObservationSelectionEmpty;

impl Invariant<Session> for ObservationSelectionEmpty {
    fn holds(session: &Session) -> bool {
        session.phase() != Phase::Observing || session.selection().is_empty()
    }

    fn description() -> &'static str {
        "Selection is empty while observing"
    }
}

/// Invariant: result sets exist only in the result phase and agree with the
/// selection and target.
///
/// In the result phase `correct == S ∩ P` and `incorrect == S △ P`.
/// Everywhere else both sets are empty.
pub struct ResultSetsConsistent;

impl Invariant<Session> for ResultSetsConsistent {
    fn holds(session: &Session) -> bool {
        if session.phase() != Phase::Result {
            return session.correct().is_empty() && session.incorrect().is_empty();
        }
        let target = session.target();
        let selection = session.selection();
        *session.correct() == selection.intersection(target)
            && *session.incorrect() == selection.symmetric_difference(target)
    }

    fn description() -> &'static str {
        "Result sets match selection and target"
    }
}
