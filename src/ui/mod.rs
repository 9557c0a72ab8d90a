//! UI / rendering layer — everything that touches Ratatui widgets.
//!
//! This layer takes the carousel's render snapshot and turns it into cells
//! on the terminal.  It never mutates selection state.

pub mod carousel;
pub mod layout;
pub mod theme;
