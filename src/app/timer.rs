//! Tokio-backed commit timer.

use std::time::Duration;

use tokio::sync::mpsc::UnboundedSender;

use crate::app::event::AppEvent;
use crate::core::schedule::{Scheduler, Ticket, TimerHandle};

/// Schedules commits as sleeping tasks that post [`AppEvent::Commit`] back
/// onto the main event channel.
#[derive(Debug, Clone)]
pub struct TokioScheduler {
    tx: UnboundedSender<AppEvent>,
}

impl TokioScheduler {
    pub fn new(tx: UnboundedSender<AppEvent>) -> Self {
        Self { tx }
    }
}

impl Scheduler for TokioScheduler {
    fn schedule(&mut self, delay: Duration, ticket: Ticket) -> TimerHandle {
        let handle = TimerHandle::new();
        let flag = handle.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if flag.is_cancelled() {
                tracing::debug!(ticket = ticket.0, "commit timer cancelled");
                return;
            }
            // Receiver gone means the app is shutting down.
            let _ = tx.send(AppEvent::Commit(ticket));
        });
        handle
    }
}
