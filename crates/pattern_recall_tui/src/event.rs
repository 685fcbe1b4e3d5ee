//! Events fed into the controller's single queue.

use crossterm::event::KeyEvent;
use pattern_recall::EntryId;

/// Stimulus for the session: a key press or a countdown tick.
///
/// Both arrive on one channel, so transitions are applied strictly one at
/// a time in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    /// Key pressed in the terminal.
    Key(KeyEvent),
    /// Countdown unit elapsed for the given level entry.
    Tick(EntryId),
}
