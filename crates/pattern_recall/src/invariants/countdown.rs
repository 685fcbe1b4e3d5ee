//! Countdown invariant: time left is consistent with the phase.

use super::Invariant;
use crate::{OBSERVE_TICKS, Phase, Session};

/// Invariant: the countdown runs only while observing.
///
/// Observing means `0 < remaining <= OBSERVE_TICKS`; guessing and result
/// both mean the countdown has reached zero.
pub struct CountdownMatchesPhase;

impl Invariant<Session> for CountdownMatchesPhase {
    fn holds(session: &Session) -> bool {
        match session.phase() {
            Phase::Observing => (1..=OBSERVE_TICKS).contains(&session.remaining()),
            Phase::Guessing | Phase::Result => session.remaining() == 0,
        }
    }

    fn description() -> &'static str {
        "Countdown runs only while observing"
    }
}
