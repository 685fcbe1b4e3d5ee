//! Read-only snapshot of a session for renderers.
//!
//! Everything here is derived from the session on demand; nothing is
//! stored back. A renderer either polls [`Session::view`] or receives
//! views from whatever publishes them after each transition.

use crate::command::Command;
use crate::grid::Cell;
use crate::phase::{EntryId, Phase};
use crate::session::{OBSERVE_TICKS, Session};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// How a single cell should be drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum CellState {
    /// Selected and in the target (result phase).
    #[display("correct")]
    Correct,
    /// Wrongly selected or missed (result phase).
    #[display("incorrect")]
    Incorrect,
    /// Part of the pattern on display.
    #[display("highlighted")]
    Highlighted,
    /// Chosen by the player.
    #[display("selected")]
    Selected,
    /// Nothing to show.
    #[display("idle")]
    Idle,
}

/// An action offered on the result screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(rename_all = "snake_case")]
pub enum ResultAction {
    /// Go on to the next level.
    #[display("Next")]
    Next,
    /// Try the same level again after a mismatch.
    #[display("Retry")]
    Retry,
    /// Play the final level again after beating it.
    #[display("Restart")]
    Restart,
    /// Finish the run; wraps to level 1 with the score cleared.
    #[display("Finish")]
    Finish,
}

impl ResultAction {
    /// The session command this action issues.
    pub fn command(self) -> Command {
        match self {
            ResultAction::Next | ResultAction::Finish => Command::Next,
            ResultAction::Retry | ResultAction::Restart => Command::Retry,
        }
    }
}

/// Headline, message and offered actions for the result phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSummary {
    /// True for an exact match.
    pub success: bool,
    /// Short headline.
    pub title: String,
    /// One-sentence explanation.
    pub message: String,
    /// Actions to offer, in display order.
    pub actions: Vec<ResultAction>,
}

impl ResultSummary {
    /// Builds the summary for a session in the result phase.
    ///
    /// Returns `None` in any other phase.
    #[instrument(skip(session), fields(phase = %session.phase()))]
    pub fn for_session(session: &Session) -> Option<Self> {
        if session.phase() != Phase::Result {
            return None;
        }

        let summary = match (session.is_exact_match(), session.is_final_level()) {
            (true, false) => Self {
                success: true,
                title: "Excellent!".to_string(),
                message: format!(
                    "Flawless execution! Move on to Level {}.",
                    session.level_index() + 2
                ),
                actions: vec![ResultAction::Next],
            },
            (true, true) => Self {
                success: true,
                title: "Challenge Conquered!".to_string(),
                message: "You have successfully completed all levels. Well done!".to_string(),
                actions: vec![ResultAction::Restart, ResultAction::Finish],
            },
            (false, _) => Self {
                success: false,
                title: "Pattern Mismatch".to_string(),
                message: format!(
                    "Keep practicing! You correctly identified {} out of {} targets.",
                    session.correct().len(),
                    session.target().len()
                ),
                actions: vec![ResultAction::Retry],
            },
        };
        Some(summary)
    }
}

/// Everything a renderer reads, captured at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionView {
    /// Current phase.
    pub phase: Phase,
    /// Current level entry.
    pub entry: EntryId,
    /// Zero-based level index.
    pub level_index: usize,
    /// One-based level number for display.
    pub level_number: usize,
    /// Number of levels.
    pub level_count: usize,
    /// Level name.
    pub name: String,
    /// Level description.
    pub description: String,
    /// Level hint; shown when `hint_revealed`.
    pub hint: String,
    /// True after a failed submission.
    pub hint_revealed: bool,
    /// Cells on display (observing only).
    pub highlighted: Vec<usize>,
    /// Cells the player has selected.
    pub selected: Vec<usize>,
    /// Correct cells (result only).
    pub correct: Vec<usize>,
    /// Incorrect cells (result only).
    pub incorrect: Vec<usize>,
    /// Countdown units left.
    pub remaining: u32,
    /// Full countdown length.
    pub observe_total: u32,
    /// Accumulated score.
    pub score: u32,
    /// True iff the last submission matched exactly.
    pub is_exact_match: bool,
    /// True on the last level.
    pub is_final_level: bool,
    /// Number of selected cells.
    pub selection_count: usize,
    /// True when a submit would be accepted.
    pub can_submit: bool,
    /// Per-cell drawing state, indexed by cell.
    pub cells: Vec<CellState>,
    /// Result screen contents (result only).
    pub summary: Option<ResultSummary>,
}

impl SessionView {
    /// Fraction of the countdown still to run, for a progress bar.
    pub fn countdown_ratio(&self) -> f64 {
        if self.observe_total == 0 {
            return 0.0;
        }
        f64::from(self.remaining) / f64::from(self.observe_total)
    }

    /// Drawing state of the cell at `index`, or `None` off the board.
    pub fn cell(&self, index: usize) -> Option<CellState> {
        self.cells.get(index).copied()
    }
}

impl Session {
    /// Drawing state of one cell.
    ///
    /// Result colouring wins over the highlight, which wins over the
    /// selection.
    pub fn cell_state(&self, cell: Cell) -> CellState {
        if self.correct().contains(cell) {
            CellState::Correct
        } else if self.incorrect().contains(cell) {
            CellState::Incorrect
        } else if self.highlighted().is_some_and(|p| p.contains(cell)) {
            CellState::Highlighted
        } else if self.selection().contains(cell) {
            CellState::Selected
        } else {
            CellState::Idle
        }
    }

    /// Captures a snapshot for rendering.
    #[instrument(skip(self), fields(entry = %self.entry(), phase = %self.phase()))]
    pub fn view(&self) -> SessionView {
        let level = self.level();
        SessionView {
            phase: self.phase(),
            entry: self.entry(),
            level_index: self.level_index(),
            level_number: self.level_index() + 1,
            level_count: self.level_count(),
            name: level.name().to_string(),
            description: level.description().to_string(),
            hint: level.hint().to_string(),
            hint_revealed: self.hint_revealed(),
            highlighted: self.highlighted().map(|p| p.indices()).unwrap_or_default(),
            selected: self.selection().indices(),
            correct: self.correct().indices(),
            incorrect: self.incorrect().indices(),
            remaining: self.remaining(),
            observe_total: OBSERVE_TICKS,
            score: self.score(),
            is_exact_match: self.is_exact_match(),
            is_final_level: self.is_final_level(),
            selection_count: self.selection_count(),
            can_submit: self.can_submit(),
            cells: Cell::all().map(|cell| self.cell_state(cell)).collect(),
            summary: ResultSummary::for_session(self),
        }
    }
}
