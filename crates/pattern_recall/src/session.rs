//! The game state machine.
//!
//! A [`Session`] owns every piece of mutable game state and applies the
//! observe → guess → result cycle. It is single-owner and synchronous:
//! every command runs to completion on `&mut self`, and time only advances
//! when the caller delivers a tick.

use crate::catalog::{Catalog, Level, STANDARD_LEVELS};
use crate::command::Command;
use crate::error::SessionError;
use crate::evaluation::{self, Evaluation};
use crate::grid::{CELL_COUNT, Cell};
use crate::invariants::{InvariantSet, SessionInvariants};
use crate::pattern::Pattern;
use crate::phase::{EntryId, Phase, Transition};
use tracing::{debug, info, instrument, warn};

/// Countdown units the pattern stays visible.
pub const OBSERVE_TICKS: u32 = 10;

/// Points awarded for an exact match.
pub const MATCH_AWARD: u32 = 100;

/// One play session.
#[derive(Debug, Clone)]
pub struct Session {
    catalog: Catalog,
    level_index: usize,
    level: Level,
    phase: Phase,
    target: Pattern,
    selection: Pattern,
    correct: Pattern,
    incorrect: Pattern,
    remaining: u32,
    score: u32,
    hint_revealed: bool,
    entry: EntryId,
}

impl Session {
    /// Starts a session at level 1, already observing.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Catalog`] if the catalog has no first level.
    #[instrument(skip(catalog), fields(levels = catalog.len()))]
    pub fn new(catalog: Catalog) -> Result<Self, SessionError> {
        let first = *catalog.get(0)?;
        Ok(Self::starting_at(catalog, first))
    }

    /// Starts a session over the built-in levels.
    pub fn standard() -> Self {
        Self::starting_at(Catalog::standard(), STANDARD_LEVELS[0])
    }

    fn starting_at(catalog: Catalog, first: Level) -> Self {
        let mut session = Self {
            catalog,
            level_index: 0,
            level: first,
            phase: Phase::Observing,
            target: Pattern::new(),
            selection: Pattern::new(),
            correct: Pattern::new(),
            incorrect: Pattern::new(),
            remaining: OBSERVE_TICKS,
            score: 0,
            hint_revealed: false,
            entry: EntryId::default(),
        };
        session.begin_level(0, first);
        session
    }

    /// Builds a fresh session and applies `commands` in order.
    ///
    /// # Errors
    ///
    /// Stops at the first command that fails.
    #[instrument(skip(catalog, commands), fields(count = commands.len()))]
    pub fn replay(catalog: Catalog, commands: &[Command]) -> Result<Self, SessionError> {
        let mut session = Self::new(catalog)?;
        for command in commands {
            session.apply(*command)?;
        }
        Ok(session)
    }

    // ─────────────────────────────────────────────────────────
    //  Commands
    // ─────────────────────────────────────────────────────────

    /// Dispatches a first-class command.
    pub fn apply(&mut self, command: Command) -> Result<Transition, SessionError> {
        match command {
            Command::Tick => Ok(self.tick()),
            Command::Toggle { index } => self.toggle(index),
            Command::Submit => Ok(self.submit()),
            Command::Next => self.next_level(),
            Command::Retry => self.retry(),
            Command::Reset => self.reset(),
        }
    }

    /// One countdown unit elapsed for the current entry.
    ///
    /// Ignored unless observing with time left. The tick that reaches zero
    /// hides the pattern and moves to guessing.
    #[instrument(skip(self), fields(entry = %self.entry, remaining = self.remaining))]
    pub fn tick(&mut self) -> Transition {
        if self.phase != Phase::Observing || self.remaining == 0 {
            debug!(phase = %self.phase, "Tick ignored");
            return Transition::Ignored(self.phase);
        }

        self.remaining -= 1;
        if self.remaining == 0 {
            self.phase = Phase::Guessing;
            info!(level = self.level_index, "Observation over, guessing");
        }

        self.assert_invariants();
        Transition::Applied
    }

    /// A tick scheduled for `entry`; dropped if a newer entry has started.
    #[instrument(skip(self), fields(current = %self.entry))]
    pub fn tick_entry(&mut self, entry: EntryId) -> Transition {
        if entry != self.entry {
            debug!(%entry, "Stale tick dropped");
            return Transition::Stale(entry);
        }
        self.tick()
    }

    /// Flips membership of cell `index` in the selection.
    ///
    /// Ignored outside the guessing phase.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::OutOfRange`] for an index outside the board,
    /// whatever the phase.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn toggle(&mut self, index: usize) -> Result<Transition, SessionError> {
        let cell = Cell::new(index).map_err(|e| {
            warn!(index, cell_count = CELL_COUNT, "Toggle out of range");
            SessionError::from(e)
        })?;

        if self.phase != Phase::Guessing {
            debug!("Toggle ignored");
            return Ok(Transition::Ignored(self.phase));
        }

        let selected = self.selection.toggle(cell);
        debug!(index, selected, count = self.selection.len(), "Selection toggled");

        self.assert_invariants();
        Ok(Transition::Applied)
    }

    /// Evaluates the selection and moves to the result phase.
    ///
    /// Ignored outside guessing and while nothing is selected.
    #[instrument(skip(self), fields(phase = %self.phase, selected = self.selection.len()))]
    pub fn submit(&mut self) -> Transition {
        if !self.can_submit() {
            debug!("Submit ignored");
            return Transition::Ignored(self.phase);
        }

        let Evaluation { correct, incorrect } = Evaluation::evaluate(&self.target, &self.selection);
        self.correct = correct;
        self.incorrect = incorrect;

        if self.is_exact_match() {
            self.score += MATCH_AWARD;
            info!(level = self.level_index, score = self.score, "Exact match");
        } else {
            self.hint_revealed = true;
            info!(
                level = self.level_index,
                correct = self.correct.len(),
                incorrect = self.incorrect.len(),
                "Mismatch, hint revealed"
            );
        }

        self.phase = Phase::Result;
        self.assert_invariants();
        Transition::Applied
    }

    /// Advances to the next level.
    ///
    /// From the final level this wraps to level 1 and clears the score,
    /// whether or not the final attempt matched.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Catalog`] if the next level cannot be looked
    /// up; the session is left unchanged.
    #[instrument(skip(self), fields(level = self.level_index))]
    pub fn next_level(&mut self) -> Result<Transition, SessionError> {
        if self.phase != Phase::Result {
            debug!(phase = %self.phase, "Next ignored");
            return Ok(Transition::Ignored(self.phase));
        }

        if self.is_final_level() {
            self.enter_level(0)?;
            info!(score = self.score, "Final level passed, wrapped to level 1");
            self.score = 0;
            self.assert_invariants();
        } else {
            self.enter_level(self.level_index + 1)?;
        }
        Ok(Transition::Applied)
    }

    /// Replays the current level from a fresh observation.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Catalog`] if the level cannot be looked up.
    #[instrument(skip(self), fields(level = self.level_index))]
    pub fn retry(&mut self) -> Result<Transition, SessionError> {
        if self.phase != Phase::Result {
            debug!(phase = %self.phase, "Retry ignored");
            return Ok(Transition::Ignored(self.phase));
        }
        self.enter_level(self.level_index)?;
        Ok(Transition::Applied)
    }

    /// Back to level 1 with the score cleared. Accepted in every phase.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Catalog`] if level 1 cannot be looked up.
    #[instrument(skip(self), fields(level = self.level_index, phase = %self.phase))]
    pub fn reset(&mut self) -> Result<Transition, SessionError> {
        info!(score = self.score, "Session reset");
        self.enter_level(0)?;
        self.score = 0;
        self.assert_invariants();
        Ok(Transition::Applied)
    }

    /// Looks `index` up in the catalog and starts observing it.
    fn enter_level(&mut self, index: usize) -> Result<(), SessionError> {
        let level = *self.catalog.get(index).map_err(|e| {
            warn!(error = %e, "Level lookup failed");
            SessionError::from(e)
        })?;
        self.begin_level(index, level);
        Ok(())
    }

    /// Starts the observation phase of a resolved level.
    fn begin_level(&mut self, index: usize, level: Level) {
        self.level_index = index;
        self.level = level;
        self.phase = Phase::Observing;
        self.selection.clear();
        self.correct.clear();
        self.incorrect.clear();
        self.hint_revealed = false;
        self.remaining = OBSERVE_TICKS;
        self.target = self.level.pattern();
        self.entry = self.entry.next();

        info!(
            level = self.level_index,
            name = self.level.name(),
            cells = self.target.len(),
            entry = %self.entry,
            "Entered level"
        );
        self.assert_invariants();
    }

    /// Checks every session invariant in debug builds.
    fn assert_invariants(&self) {
        if !cfg!(debug_assertions) {
            return;
        }
        if let Err(violations) = SessionInvariants::check_all(self) {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Session invariant violated");
            panic!("Session invariant violated: {}", descriptions);
        }
    }

    // ─────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────

    /// The level catalog.
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The level being played, as resolved from the catalog at entry.
    pub fn level(&self) -> &Level {
        &self.level
    }

    /// Zero-based index of the level being played.
    pub fn level_index(&self) -> usize {
        self.level_index
    }

    /// Number of levels in the catalog.
    pub fn level_count(&self) -> usize {
        self.catalog.len()
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Target pattern cached at level entry.
    pub fn target(&self) -> &Pattern {
        &self.target
    }

    /// Cells to highlight: the target while observing, nothing afterwards.
    pub fn highlighted(&self) -> Option<&Pattern> {
        (self.phase == Phase::Observing).then_some(&self.target)
    }

    /// Cells the player has selected.
    pub fn selection(&self) -> &Pattern {
        &self.selection
    }

    /// Correctly selected cells (result phase only).
    pub fn correct(&self) -> &Pattern {
        &self.correct
    }

    /// Wrongly selected plus missed cells (result phase only).
    pub fn incorrect(&self) -> &Pattern {
        &self.incorrect
    }

    /// Countdown units left in the observation phase.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Accumulated score.
    pub fn score(&self) -> u32 {
        self.score
    }

    /// True after a failed submission.
    pub fn hint_revealed(&self) -> bool {
        self.hint_revealed
    }

    /// Identifier of the current level entry.
    pub fn entry(&self) -> EntryId {
        self.entry
    }

    /// True iff the last submission equalled the target exactly.
    pub fn is_exact_match(&self) -> bool {
        evaluation::is_exact_match(&self.target, &self.correct, &self.incorrect)
    }

    /// True on the last level of the catalog.
    pub fn is_final_level(&self) -> bool {
        self.level_index == self.catalog.last_index()
    }

    /// Number of selected cells.
    pub fn selection_count(&self) -> usize {
        self.selection.len()
    }

    /// True when a submit would be accepted.
    pub fn can_submit(&self) -> bool {
        self.phase == Phase::Guessing && !self.selection.is_empty()
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn guessing() -> Session {
        let mut session = Session::standard();
        for _ in 0..OBSERVE_TICKS {
            session.tick();
        }
        session
    }

    #[test]
    fn test_starts_observing_level_one() {
        let session = Session::standard();
        assert_eq!(session.phase(), Phase::Observing);
        assert_eq!(session.level_index(), 0);
        assert_eq!(session.remaining(), OBSERVE_TICKS);
        assert_eq!(session.highlighted(), Some(session.target()));
        assert_eq!(session.target().len(), 13);
    }

    #[test]
    fn test_countdown_moves_to_guessing() {
        let mut session = Session::standard();
        for _ in 0..OBSERVE_TICKS - 1 {
            assert_eq!(session.tick(), Transition::Applied);
            assert_eq!(session.phase(), Phase::Observing);
        }
        assert_eq!(session.tick(), Transition::Applied);
        assert_eq!(session.phase(), Phase::Guessing);
        assert_eq!(session.remaining(), 0);
        assert_eq!(session.highlighted(), None);
    }

    #[test]
    fn test_toggle_ignored_while_observing() {
        let mut session = Session::standard();
        assert_eq!(session.toggle(3), Ok(Transition::Ignored(Phase::Observing)));
        assert!(session.selection().is_empty());
    }

    #[test]
    fn test_toggle_out_of_range_fails_in_any_phase() {
        let mut session = Session::standard();
        assert!(session.toggle(25).is_err());
        let mut session = guessing();
        assert_eq!(
            session.toggle(99),
            Err(SessionError::OutOfRange {
                index: 99,
                cell_count: 25
            })
        );
    }

    #[test]
    fn test_submit_requires_selection() {
        let mut session = guessing();
        assert_eq!(session.submit(), Transition::Ignored(Phase::Guessing));
        assert_eq!(session.phase(), Phase::Guessing);
    }

    #[test]
    fn test_next_and_retry_only_in_result() {
        let mut session = guessing();
        assert_eq!(session.next_level(), Ok(Transition::Ignored(Phase::Guessing)));
        assert_eq!(session.retry(), Ok(Transition::Ignored(Phase::Guessing)));
        assert_eq!(session.level_index(), 0);
    }

    #[test]
    fn test_retry_keeps_level_and_score() {
        let mut session = guessing();
        session.toggle(1).unwrap();
        session.submit();
        let entry = session.entry();
        assert_eq!(session.retry(), Ok(Transition::Applied));
        assert_eq!(session.level_index(), 0);
        assert_eq!(session.phase(), Phase::Observing);
        assert!(!session.hint_revealed());
        assert!(session.selection().is_empty());
        assert!(session.entry() > entry);
    }

    #[test]
    fn test_is_exact_match_false_before_submit() {
        let session = guessing();
        assert!(!session.is_exact_match());
    }

    #[test]
    fn test_new_resolves_first_level_through_catalog() {
        let session = Session::new(Catalog::standard()).unwrap();
        assert_eq!(session.level().name(), "Level 1: Even Positions");
        assert_eq!(session.level_count(), 10);
    }

    #[test]
    fn test_next_level_resolves_through_catalog() {
        let mut session = guessing();
        session.toggle(0).unwrap();
        session.submit();
        assert_eq!(session.next_level(), Ok(Transition::Applied));
        assert_eq!(session.level().name(), "Level 2: Diagonals");
        assert_eq!(session.catalog().get(1).map(Level::name), Ok(session.level().name()));
    }

    #[test]
    fn test_single_level_catalog_wraps_to_itself() {
        let only = *Catalog::standard().get(3).unwrap();
        let catalog = Catalog::new(vec![only]).unwrap();
        let mut session = Session::new(catalog).unwrap();
        assert!(session.is_final_level());
        while session.phase() == Phase::Observing {
            session.tick();
        }
        session.toggle(12).unwrap();
        session.submit();
        assert_eq!(session.next_level(), Ok(Transition::Applied));
        assert_eq!(session.level_index(), 0);
        assert_eq!(session.score(), 0);
    }
}
