//! Observation countdown scheduling.
//!
//! One tokio task per level entry emits `AppEvent::Tick(entry)` once per
//! period, `OBSERVE_TICKS` times. Arming a new countdown aborts the old
//! task; ticks it already queued still carry the old entry and are dropped
//! by the session as stale.

use crate::event::AppEvent;
use pattern_recall::{EntryId, OBSERVE_TICKS};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, interval_at};
use tracing::{debug, instrument};

/// Schedules countdown ticks for the current level entry.
#[derive(Debug)]
pub struct ObservationTimer {
    period: Duration,
    events: mpsc::UnboundedSender<AppEvent>,
    armed: Option<(EntryId, JoinHandle<()>)>,
}

impl ObservationTimer {
    /// Creates an idle timer that will send ticks on `events`.
    pub fn new(period: Duration, events: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            period,
            events,
            armed: None,
        }
    }

    /// Starts the countdown for `entry`, cancelling any earlier one.
    #[instrument(skip(self), fields(period_ms = self.period.as_millis() as u64))]
    pub fn arm(&mut self, entry: EntryId) {
        self.cancel();

        let period = self.period;
        let events = self.events.clone();
        let handle = tokio::spawn(async move {
            let mut interval = interval_at(Instant::now() + period, period);
            for _ in 0..OBSERVE_TICKS {
                interval.tick().await;
                if events.send(AppEvent::Tick(entry)).is_err() {
                    debug!(%entry, "Event queue closed, countdown stopped");
                    return;
                }
            }
            debug!(%entry, "Countdown finished");
        });

        self.armed = Some((entry, handle));
    }

    /// Aborts the pending countdown, if any.
    #[instrument(skip(self))]
    pub fn cancel(&mut self) {
        if let Some((entry, handle)) = self.armed.take() {
            handle.abort();
            debug!(%entry, "Countdown cancelled");
        }
    }

    /// Entry the running countdown belongs to.
    pub fn armed_for(&self) -> Option<EntryId> {
        self.armed
            .as_ref()
            .filter(|(_, handle)| !handle.is_finished())
            .map(|(entry, _)| *entry)
    }
}

impl Drop for ObservationTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
