//! First-class input commands.
//!
//! Commands are the renderer's intents, separate from their execution, so
//! they can be logged, serialized and replayed against a fresh session.

use serde::{Deserialize, Serialize};

/// An input event forwarded into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    /// One countdown unit elapsed.
    #[display("tick")]
    Tick,
    /// Flip membership of a cell in the selection.
    #[display("toggle {}", index)]
    Toggle {
        /// Raw cell index from the renderer; validated on apply.
        index: usize,
    },
    /// Evaluate the selection.
    #[display("submit")]
    Submit,
    /// Advance to the next level (wraps after the last).
    #[display("next")]
    Next,
    /// Replay the current level.
    #[display("retry")]
    Retry,
    /// Back to level 1 with score cleared.
    #[display("reset")]
    Reset,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let json = serde_json::to_string(&Command::Toggle { index: 12 }).unwrap();
        assert_eq!(json, r#"{"command":"toggle","index":12}"#);

        let parsed: Vec<Command> =
            serde_json::from_str(r#"[{"command":"tick"},{"command":"submit"}]"#).unwrap();
        assert_eq!(parsed, vec![Command::Tick, Command::Submit]);
    }
}
