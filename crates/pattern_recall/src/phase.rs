//! Session phases and transition results.

use serde::{Deserialize, Serialize};

/// The three phases of a level attempt.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Pattern shown, countdown running.
    #[display("Observing")]
    Observing,
    /// Pattern hidden, player selecting cells.
    #[display("Guessing")]
    Guessing,
    /// Attempt evaluated, outcome shown.
    #[display("Result")]
    Result,
}

/// Identifies one level entry.
///
/// Bumped every time a level is (re)entered. Scheduled ticks carry the
/// entry they were armed for, so a tick from an older countdown can be
/// told apart from a live one.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
)]
#[display("entry#{}", _0)]
pub struct EntryId(u64);

impl EntryId {
    /// The entry that follows this one.
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// What a command did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum Transition {
    /// The command changed the session.
    #[display("applied")]
    Applied,
    /// The command is not accepted in this phase; nothing changed.
    #[display("ignored in {}", _0)]
    Ignored(Phase),
    /// A tick armed for an earlier level entry; nothing changed.
    #[display("stale tick for {}", _0)]
    Stale(EntryId),
}

impl Transition {
    /// Returns true if the session changed.
    pub fn is_applied(self) -> bool {
        matches!(self, Transition::Applied)
    }
}
