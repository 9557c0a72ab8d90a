//! One-shot timer abstraction used to commit transitions.
//!
//! The controller never sleeps itself.  It hands a [`Ticket`] and a delay to
//! a [`Scheduler`], and whoever owns the clock calls back into the controller
//! once the delay has elapsed.  The app runtime backs this with a tokio task;
//! tests back it with a manual queue.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Identifies one transition.  A timer carrying a stale ticket is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Ticket(pub u64);

/// Cancellation handle for a scheduled commit.
///
/// Cloning shares the same flag, so the scheduler side and the controller
/// side observe the same cancellation.
#[derive(Debug, Clone, Default)]
pub struct TimerHandle {
    cancelled: Arc<AtomicBool>,
}

impl TimerHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }
}

/// Something that can fire `ticket` back at the controller after `delay`.
pub trait Scheduler {
    fn schedule(&mut self, delay: Duration, ticket: Ticket) -> TimerHandle;
}

#[cfg(test)]
pub mod manual {
    //! Deterministic scheduler for tests: records requests, fires on demand.

    use super::*;

    #[derive(Debug, Default)]
    pub struct ManualScheduler {
        pub scheduled: Vec<(Duration, Ticket, TimerHandle)>,
    }

    impl ManualScheduler {
        /// Tickets whose timers are still live, oldest first.
        pub fn live(&self) -> Vec<Ticket> {
            self.scheduled
                .iter()
                .filter(|(_, _, h)| !h.is_cancelled())
                .map(|(_, t, _)| *t)
                .collect()
        }
    }

    impl Scheduler for ManualScheduler {
        fn schedule(&mut self, delay: Duration, ticket: Ticket) -> TimerHandle {
            let handle = TimerHandle::new();
            self.scheduled.push((delay, ticket, handle.clone()));
            handle
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cancel_is_shared_between_clones() {
        let handle = TimerHandle::new();
        let other = handle.clone();
        assert!(!other.is_cancelled());
        handle.cancel();
        assert!(other.is_cancelled());
    }
}
