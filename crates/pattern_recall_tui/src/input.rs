//! Keyboard mapping.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use pattern_recall::{Cell, Direction};

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    /// Move the cursor one cell.
    Move(Direction),
    /// Toggle the cell under the cursor.
    Toggle,
    /// Submit the selection.
    Submit,
    /// Next level, or finish on the final level.
    Next,
    /// Retry, or restart on the final level.
    Retry,
    /// Back to level 1.
    Reset,
    /// Leave the game.
    Quit,
}

/// Maps a key event to an action; releases and unknown keys map to nothing.
pub fn map_key(key: KeyEvent) -> Option<UiAction> {
    if key.kind != KeyEventKind::Press {
        return None;
    }
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiAction::Quit);
    }

    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(UiAction::Move(Direction::Up)),
        KeyCode::Down | KeyCode::Char('j') => Some(UiAction::Move(Direction::Down)),
        KeyCode::Left | KeyCode::Char('h') => Some(UiAction::Move(Direction::Left)),
        KeyCode::Right | KeyCode::Char('l') => Some(UiAction::Move(Direction::Right)),
        KeyCode::Char(' ') | KeyCode::Enter => Some(UiAction::Toggle),
        KeyCode::Char('s') => Some(UiAction::Submit),
        KeyCode::Char('n') => Some(UiAction::Next),
        KeyCode::Char('r') => Some(UiAction::Retry),
        KeyCode::Char('x') => Some(UiAction::Reset),
        KeyCode::Char('q') | KeyCode::Esc => Some(UiAction::Quit),
        _ => None,
    }
}

/// Moves the cursor, staying put at the board edge.
pub fn move_cursor(cursor: Cell, direction: Direction) -> Cell {
    cursor.step(direction).unwrap_or(cursor)
}
