//! Progress invariants: level bounds and score granularity.

use super::Invariant;
use crate::{MATCH_AWARD, Session};

/// Invariant: the level being played is the catalog's level at its index.
pub struct LevelInCatalog;

impl Invariant<Session> for LevelInCatalog {
    fn holds(session: &Session) -> bool {
        session
            .catalog()
            .get(session.level_index())
            .is_ok_and(|level| level.name() == session.level().name())
    }

    fn description() -> &'static str {
        "Current level is the catalog level at the current index"
    }
}

/// Invariant: score only ever moves in whole awards.
pub struct ScoreIsAwardMultiple;

impl Invariant<Session> for ScoreIsAwardMultiple {
    fn holds(session: &Session) -> bool {
        session.score() % MATCH_AWARD == 0
    }

    fn description() -> &'static str {
        "Score is a multiple of the match award"
    }
}
