//! Core carousel engine – ring index maths, transition state machine, and
//! the timer seam it commits through.
//!
//! Nothing in this module depends on any TUI or rendering crate.

pub mod ring;
pub mod schedule;
pub mod transition;
