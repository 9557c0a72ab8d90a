//! Application orchestration — state, event loop plumbing, input handling,
//! and the timer that commits carousel transitions.

pub mod event;
pub mod handler;
pub mod state;
pub mod timer;
