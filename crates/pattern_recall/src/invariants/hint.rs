//! Hint invariant: the hint is shown exactly after a failed attempt.

use super::Invariant;
use crate::{Phase, Session};

/// Invariant: `hint_revealed` iff in the result phase without an exact match.
pub struct HintMatchesOutcome;

impl Invariant<Session> for HintMatchesOutcome {
    fn holds(session: &Session) -> bool {
        let failed = session.phase() == Phase::Result && !session.is_exact_match();
        session.hint_revealed() == failed
    }

    fn description() -> &'static str {
        "Hint is revealed exactly after a mismatch"
    }
}
