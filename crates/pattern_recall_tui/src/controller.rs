//! Session ownership and change publication.
//!
//! The controller is the single owner of the [`Session`]. It applies
//! commands and ticks, re-arms the observation timer whenever a new level
//! entry starts, and publishes a fresh [`SessionView`] to subscribers after
//! every applied change.

use crate::event::AppEvent;
use crate::timer::ObservationTimer;
use pattern_recall::{Command, EntryId, Phase, Session, SessionError, SessionView, Transition};
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info, instrument};

/// Drives a session from commands and countdown ticks.
#[derive(Debug)]
pub struct GameController {
    session: Session,
    timer: ObservationTimer,
    views: watch::Sender<SessionView>,
}

impl GameController {
    /// Takes ownership of `session` and starts its countdown.
    ///
    /// Ticks are delivered on `events`; the caller feeds them back through
    /// [`GameController::tick`].
    #[instrument(skip(session, events))]
    pub fn new(
        session: Session,
        tick_period: Duration,
        events: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        let (views, _) = watch::channel(session.view());
        let mut controller = Self {
            session,
            timer: ObservationTimer::new(tick_period, events),
            views,
        };
        controller.arm_if_observing();
        info!(entry = %controller.session.entry(), "Controller started");
        controller
    }

    /// Subscribes to session snapshots.
    pub fn subscribe(&self) -> watch::Receiver<SessionView> {
        self.views.subscribe()
    }

    /// The owned session.
    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Applies an input command.
    ///
    /// A command that starts a new level entry (next, retry, reset) cancels
    /// the running countdown and arms a new one.
    #[instrument(skip(self), fields(entry = %self.session.entry()))]
    pub fn dispatch(&mut self, command: Command) -> Result<Transition, SessionError> {
        let before = self.session.entry();
        let transition = self.session.apply(command)?;
        debug!(%transition, "Command applied");

        if self.session.entry() != before {
            self.arm_if_observing();
        }
        if transition.is_applied() {
            self.publish();
        }
        Ok(transition)
    }

    /// Delivers a countdown tick scheduled for `entry`.
    #[instrument(skip(self))]
    pub fn tick(&mut self, entry: EntryId) -> Transition {
        let transition = self.session.tick_entry(entry);
        if transition.is_applied() {
            if self.session.phase() != Phase::Observing {
                debug!(armed = ?self.timer.armed_for(), "Observation over");
                self.timer.cancel();
            }
            self.publish();
        }
        transition
    }

    fn arm_if_observing(&mut self) {
        if self.session.phase() == Phase::Observing {
            self.timer.arm(self.session.entry());
        }
    }

    fn publish(&self) {
        self.views.send_replace(self.session.view());
    }
}
