//! Transition controller — the carousel's selection state machine.
//!
//! Two states: **Idle** (nothing pending) and **Transitioning** (a target is
//! in flight).  A request runs both animation phases synchronously:
//!
//! 1. *snap* — the incoming item jumps to the edge it enters from, the
//!    current item sits at the centre, the strip stays at its baseline;
//! 2. *settle* — target values the renderer interpolates toward, linearly,
//!    over [`TRANSITION_DURATION`].
//!
//! The commit is *not* tied to animation frames.  A one-shot timer is
//! scheduled when phase 2 starts and the commit happens when it fires, which
//! puts every offset back to rest in one step.
//!
//! # Invariants
//!
//! - While idle, every offset is 0 and no strip item is enlarging.
//! - At most one transition (and one live timer) exists at any time;
//!   requests arriving while one is in flight are dropped.
//! - Invalid requests are rejected before any field is touched.

use std::time::{Duration, Instant};

use thiserror::Error;

use super::ring::{self, Heading, RingError};
use super::schedule::{Scheduler, Ticket, TimerHandle};

/// Fixed length of every transition.
pub const TRANSITION_DURATION: Duration = Duration::from_millis(350);

#[derive(Debug, Error, PartialEq)]
pub enum TransitionError {
    #[error("invalid index {index}: {reason}")]
    InvalidIndex { index: usize, reason: &'static str },
    #[error("geometry must be positive and finite (viewport {viewport_width}, item {item_width})")]
    InvalidGeometry { viewport_width: f64, item_width: f64 },
}

// ───────────────────────────────────────── inputs ────────────

/// Horizontal swipe, expressed as a step along the ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    /// One index back (`-1`).
    Backward,
    /// One index forward (`+1`).
    Forward,
}

impl SwipeDirection {
    pub fn sign(self) -> isize {
        match self {
            SwipeDirection::Backward => -1,
            SwipeDirection::Forward => 1,
        }
    }
}

/// Everything that can start a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Input {
    Swipe(SwipeDirection),
    Tap(usize),
}

/// Layout scalars, read once when a transition starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    viewport_width: f64,
    item_width: f64,
}

impl Geometry {
    pub fn new(viewport_width: f64, item_width: f64) -> Result<Self, TransitionError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(viewport_width) || !valid(item_width) {
            return Err(TransitionError::InvalidGeometry {
                viewport_width,
                item_width,
            });
        }
        Ok(Self {
            viewport_width,
            item_width,
        })
    }

    pub fn viewport_width(&self) -> f64 {
        self.viewport_width
    }

    pub fn item_width(&self) -> f64 {
        self.item_width
    }
}

// ───────────────────────────────────────── outputs ───────────

/// Horizontal displacement of the three moving parts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offsets {
    pub primary: f64,
    pub incoming: f64,
    pub strip: f64,
}

impl Offsets {
    pub const REST: Offsets = Offsets {
        primary: 0.0,
        incoming: 0.0,
        strip: 0.0,
    };

    fn lerp(self, to: Offsets, t: f64) -> Offsets {
        let mix = |a: f64, b: f64| a + (b - a) * t;
        Offsets {
            primary: mix(self.primary, to.primary),
            incoming: mix(self.incoming, to.incoming),
            strip: mix(self.strip, to.strip),
        }
    }
}

/// Effect plan returned for an accepted request: where everything starts,
/// where it ends, how long it takes, and which ticket will commit it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionPlan {
    pub ticket: Ticket,
    pub target: usize,
    pub heading: Heading,
    pub snap: Offsets,
    pub settle: Offsets,
    pub duration: Duration,
}

/// Read-only view the renderer consumes every frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSnapshot {
    pub selected_index: usize,
    pub pending_index: Option<usize>,
    pub primary_offset: f64,
    pub incoming_offset: f64,
    pub secondary_strip_offset: f64,
    /// Strip item growing toward the selected size while a transition runs.
    pub enlarging_index: Option<usize>,
}

impl RenderSnapshot {
    fn new(
        selected_index: usize,
        pending_index: Option<usize>,
        offsets: Offsets,
        enlarging_index: Option<usize>,
    ) -> Self {
        Self {
            selected_index,
            pending_index,
            primary_offset: offsets.primary,
            incoming_offset: offsets.incoming,
            secondary_strip_offset: offsets.strip,
            enlarging_index,
        }
    }
}

// ───────────────────────────────────────── controller ────────

#[derive(Debug)]
struct InFlight {
    plan: TransitionPlan,
    started_at: Instant,
    enlarging: Option<usize>,
    timer: TimerHandle,
}

/// Owns the selection and drives transitions through their two phases.
#[derive(Debug)]
pub struct TransitionController<S> {
    len: usize,
    per_side: usize,
    selected: usize,
    geometry: Geometry,
    in_flight: Option<InFlight>,
    scheduler: S,
    next_ticket: u64,
}

impl<S: Scheduler> TransitionController<S> {
    /// Start idle on index 0 of a ring with `len` items.  `per_side` is the
    /// number of strip neighbours rendered on each side; it is clamped to
    /// what the ring can show without repeats.
    pub fn new(
        len: usize,
        per_side: usize,
        geometry: Geometry,
        scheduler: S,
    ) -> Result<Self, RingError> {
        if len == 0 {
            return Err(RingError::Empty);
        }
        Ok(Self {
            len,
            per_side: ring::safe_per_side(len, per_side),
            selected: 0,
            geometry,
            in_flight: None,
            scheduler,
            next_ticket: 0,
        })
    }

    pub fn per_side(&self) -> usize {
        self.per_side
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    pub fn pending_index(&self) -> Option<usize> {
        self.in_flight.as_ref().map(|f| f.plan.target)
    }

    pub fn is_transitioning(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Update layout scalars.  A running transition keeps the geometry it
    /// started with.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
    }

    #[cfg(test)]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Dispatch a front-end input.
    pub fn apply(
        &mut self,
        input: Input,
        now: Instant,
    ) -> Result<Option<TransitionPlan>, TransitionError> {
        match input {
            Input::Swipe(direction) => self.on_swipe(direction, now),
            Input::Tap(index) => self.on_item_tapped(index, now),
        }
    }

    pub fn on_swipe(
        &mut self,
        direction: SwipeDirection,
        now: Instant,
    ) -> Result<Option<TransitionPlan>, TransitionError> {
        let target = ring::step(self.len, self.selected, direction.sign());
        self.request_advance(target, now)
    }

    pub fn on_item_tapped(
        &mut self,
        index: usize,
        now: Instant,
    ) -> Result<Option<TransitionPlan>, TransitionError> {
        self.request_advance(index, now)
    }

    /// Start a transition toward `target`.
    ///
    /// Returns `Ok(None)` when the request was dropped because another
    /// transition is still in flight.
    pub fn request_advance(
        &mut self,
        target: usize,
        now: Instant,
    ) -> Result<Option<TransitionPlan>, TransitionError> {
        if target >= self.len {
            return Err(TransitionError::InvalidIndex {
                index: target,
                reason: "outside the ring",
            });
        }
        if let Some(flight) = &self.in_flight {
            tracing::debug!(
                target,
                pending = flight.plan.target,
                "transition in flight, request dropped"
            );
            return Ok(None);
        }
        if target == self.selected {
            return Err(TransitionError::InvalidIndex {
                index: target,
                reason: "already selected",
            });
        }

        let heading = ring::direction_and_distance(self.len, self.selected, target);
        let viewport = self.geometry.viewport_width;
        let shift = heading.distance as f64 * self.geometry.item_width;
        let baseline = Offsets::REST.strip;

        // Phase 1: incoming item parked just off-screen on its entry side.
        let snap = Offsets {
            primary: 0.0,
            incoming: if heading.from_left { -viewport } else { viewport },
            strip: baseline,
        };
        // Phase 2: incoming slides to centre, current item leaves the other
        // way, strip moves the target into the centre slot.
        let settle = Offsets {
            primary: if heading.from_left { viewport } else { -viewport },
            incoming: 0.0,
            strip: if heading.from_left {
                baseline + shift
            } else {
                baseline - shift
            },
        };

        let ticket = Ticket(self.next_ticket);
        self.next_ticket = self.next_ticket.wrapping_add(1);

        let plan = TransitionPlan {
            ticket,
            target,
            heading,
            snap,
            settle,
            duration: TRANSITION_DURATION,
        };

        let (left, right) = ring::neighbors(self.len, self.selected, self.per_side);
        let enlarging = left
            .iter()
            .chain(&right)
            .any(|&i| i == target)
            .then_some(target);

        let timer = self.scheduler.schedule(TRANSITION_DURATION, ticket);
        self.in_flight = Some(InFlight {
            plan,
            started_at: now,
            enlarging,
            timer,
        });

        tracing::debug!(
            from = self.selected,
            to = plan.target,
            from_left = plan.heading.from_left,
            distance = plan.heading.distance,
            ticket = plan.ticket.0,
            "transition started"
        );
        Ok(Some(plan))
    }

    /// Timer callback.  Commits the in-flight transition if `ticket` is its
    /// own; returns whether it committed.
    pub fn on_timer(&mut self, ticket: Ticket) -> bool {
        let Some(flight) = &self.in_flight else {
            tracing::debug!(ticket = ticket.0, "timer fired while idle");
            return false;
        };
        if flight.plan.ticket != ticket {
            tracing::debug!(ticket = ticket.0, "stale timer ignored");
            return false;
        }

        self.selected = flight.plan.target;
        self.in_flight = None;
        tracing::debug!(selected = self.selected, "transition committed");
        true
    }

    /// Abandon the running transition, if any: its timer is cancelled and the
    /// controller returns to idle at rest with the selection unchanged.
    /// Returns the abandoned target.
    pub fn abort_transition(&mut self) -> Option<usize> {
        let flight = self.in_flight.take()?;
        flight.timer.cancel();
        tracing::debug!(
            selected = self.selected,
            abandoned = flight.plan.target,
            "transition aborted"
        );
        Some(flight.plan.target)
    }

    /// Fraction of the running transition elapsed at `now`, in `[0, 1]`.
    pub fn progress(&self, now: Instant) -> Option<f64> {
        self.in_flight.as_ref().map(|f| {
            let elapsed = now.saturating_duration_since(f.started_at);
            (elapsed.as_secs_f64() / f.plan.duration.as_secs_f64()).clamp(0.0, 1.0)
        })
    }

    /// State as stored: phase-2 targets while transitioning, rest otherwise.
    pub fn snapshot(&self) -> RenderSnapshot {
        match &self.in_flight {
            Some(f) => RenderSnapshot::new(
                self.selected,
                Some(f.plan.target),
                f.plan.settle,
                f.enlarging,
            ),
            None => RenderSnapshot::new(self.selected, None, Offsets::REST, None),
        }
    }

    /// Snapshot with offsets interpolated for a frame drawn at `now`.
    pub fn frame(&self, now: Instant) -> RenderSnapshot {
        match (&self.in_flight, self.progress(now)) {
            (Some(f), Some(t)) => RenderSnapshot::new(
                self.selected,
                Some(f.plan.target),
                f.plan.snap.lerp(f.plan.settle, t),
                f.enlarging,
            ),
            _ => self.snapshot(),
        }
    }
}
