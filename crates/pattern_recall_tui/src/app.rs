//! Application state and input handling.

use crate::controller::GameController;
use crate::input::{UiAction, move_cursor};
use pattern_recall::{Cell, Command, Phase, ResultAction, SessionView, Transition};
use tracing::{debug, warn};

/// Front-end state that is not game state: cursor, status line, quit flag.
#[derive(Debug)]
pub struct App {
    cursor: Cell,
    status_message: String,
    should_quit: bool,
}

impl App {
    /// Creates a new application with the cursor on the centre cell.
    pub fn new() -> Self {
        Self {
            cursor: Cell::at(2, 2).unwrap_or_else(|_| first_cell()),
            status_message: "Memorize the pattern carefully.".to_string(),
            should_quit: false,
        }
    }

    /// Cell under the cursor.
    pub fn cursor(&self) -> Cell {
        self.cursor
    }

    /// Status line text.
    pub fn status_message(&self) -> &str {
        &self.status_message
    }

    /// True once the player asked to leave.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Handles one action against the controller.
    ///
    /// Result-screen keys only fire actions the result screen offers, the
    /// way a button that is not shown cannot be pressed.
    pub fn handle_action(&mut self, action: UiAction, controller: &mut GameController) {
        debug!(?action, "Handling action");

        let command = match action {
            UiAction::Quit => {
                self.should_quit = true;
                return;
            }
            UiAction::Move(direction) => {
                self.cursor = move_cursor(self.cursor, direction);
                return;
            }
            UiAction::Toggle => Command::Toggle {
                index: self.cursor.index(),
            },
            UiAction::Submit => Command::Submit,
            UiAction::Reset => Command::Reset,
            UiAction::Next => match offered(controller, &[ResultAction::Next, ResultAction::Finish]) {
                Some(action) => action.command(),
                None => return,
            },
            UiAction::Retry => {
                match offered(controller, &[ResultAction::Retry, ResultAction::Restart]) {
                    Some(action) => action.command(),
                    None => return,
                }
            }
        };

        match controller.dispatch(command) {
            Ok(Transition::Applied) => self.refresh_status(&controller.session().view()),
            Ok(transition) => debug!(%command, %transition, "Command had no effect"),
            Err(e) => {
                warn!(error = %e, "Command rejected");
                self.status_message = format!("Invalid input: {}", e);
            }
        }
    }

    /// Updates the status line from a fresh snapshot.
    pub fn refresh_status(&mut self, view: &SessionView) {
        self.status_message = match view.phase {
            Phase::Observing => "Memorize the pattern carefully.".to_string(),
            Phase::Guessing if view.can_submit => {
                format!("Selected: {} squares. Press 's' to submit.", view.selection_count)
            }
            Phase::Guessing => "Select the pattern with space.".to_string(),
            Phase::Result => match &view.summary {
                Some(summary) => summary.message.clone(),
                None => String::new(),
            },
        };
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

fn first_cell() -> Cell {
    Cell::all().next().unwrap_or_else(|| unreachable!("board has cells"))
}

/// First of `wanted` that the current result screen offers.
fn offered(controller: &GameController, wanted: &[ResultAction]) -> Option<ResultAction> {
    let view = controller.session().view();
    let summary = view.summary?;
    summary
        .actions
        .into_iter()
        .find(|action| wanted.contains(action))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pattern_recall::{Direction, OBSERVE_TICKS, Session};
    use std::time::Duration;
    use tokio::sync::mpsc;

    fn controller() -> GameController {
        let (tx, _rx) = mpsc::unbounded_channel();
        GameController::new(Session::standard(), Duration::from_millis(100), tx)
    }

    fn finish_observation(controller: &mut GameController) {
        let entry = controller.session().entry();
        for _ in 0..OBSERVE_TICKS {
            controller.tick(entry);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_toggle_at_cursor() {
        let mut controller = controller();
        let mut app = App::new();
        finish_observation(&mut controller);

        app.handle_action(UiAction::Move(Direction::Left), &mut controller);
        app.handle_action(UiAction::Toggle, &mut controller);
        assert_eq!(controller.session().selection().indices(), vec![11]);
        assert!(app.status_message().contains("Selected: 1"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_next_gated_after_mismatch() {
        let mut controller = controller();
        let mut app = App::new();
        finish_observation(&mut controller);

        app.handle_action(UiAction::Move(Direction::Right), &mut controller);
        app.handle_action(UiAction::Toggle, &mut controller);
        app.handle_action(UiAction::Submit, &mut controller);
        assert_eq!(controller.session().phase(), Phase::Result);
        assert!(app.status_message().starts_with("Keep practicing!"));

        app.handle_action(UiAction::Next, &mut controller);
        assert_eq!(controller.session().phase(), Phase::Result);

        app.handle_action(UiAction::Retry, &mut controller);
        assert_eq!(controller.session().phase(), Phase::Observing);
        assert_eq!(controller.session().level_index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quit() {
        let mut controller = controller();
        let mut app = App::new();
        app.handle_action(UiAction::Quit, &mut controller);
        assert!(app.should_quit());
    }
}
