//! Central application state.
//!
//! All mutable state lives here so that the rest of the app can be pure
//! functions over `&AppState` (rendering) or `&mut AppState` (event handling).

use anyhow::Context;
use ratatui::layout::Rect;

use crate::config::AppConfig;
use crate::core::ring::Ring;
use crate::core::schedule::Scheduler;
use crate::core::transition::TransitionController;
use crate::ui::layout::{carousel_geometry, AppLayout};
use crate::ui::theme::{self, Swatch};

/// Top-level application state.
pub struct AppState<S> {
    /// The swatches, in ring order.
    pub ring: Ring<Swatch>,
    /// Selection and transition state machine.
    pub carousel: TransitionController<S>,
    /// User-configurable keybindings and carousel settings.
    pub config: AppConfig,
    /// Controls the main event loop.
    pub should_quit: bool,
    /// Last known terminal area, for mouse hit-testing.
    pub terminal_area: Rect,
    /// Cell where the current left-button press started.
    pub drag_origin: Option<(u16, u16)>,
}

impl<S: Scheduler> AppState<S> {
    pub fn new(config: AppConfig, scheduler: S, terminal_area: Rect) -> anyhow::Result<Self> {
        let ring = Ring::new(theme::swatches(&config.palette))
            .context("palette has no usable colours")?;
        // Provisional geometry: the controller settles the neighbour count,
        // and `resize` below redoes the maths with the settled value.  A
        // zero-width terminal keeps this one until the first real resize.
        let layout = AppLayout::from_area(terminal_area);
        let geometry = carousel_geometry(layout.strip_area.width.max(1), config.neighbors_per_side)
            .context("carousel geometry")?;
        let carousel =
            TransitionController::new(ring.len(), config.neighbors_per_side, geometry, scheduler)?;

        let mut state = Self {
            ring,
            carousel,
            config,
            should_quit: false,
            terminal_area,
            drag_origin: None,
        };
        state.resize(terminal_area);
        Ok(state)
    }

    /// Record a new terminal size and feed the derived geometry to the
    /// carousel.  Zero-width terminals keep the previous geometry.
    pub fn resize(&mut self, area: Rect) {
        self.terminal_area = area;
        let layout = AppLayout::from_area(area);
        if let Some(geometry) = carousel_geometry(layout.strip_area.width, self.carousel.per_side())
        {
            self.carousel.set_geometry(geometry);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schedule::manual::ManualScheduler;

    fn config_with(palette: &[&str], neighbors_per_side: usize) -> AppConfig {
        AppConfig {
            palette: palette.iter().map(|s| s.to_string()).collect(),
            neighbors_per_side,
            ..AppConfig::default()
        }
    }

    #[test]
    fn geometry_follows_clamped_neighbour_count() {
        let config = config_with(&["#FF0000", "#00FF00", "#0000FF"], 3);
        let state = AppState::new(config, ManualScheduler::default(), Rect::new(0, 0, 90, 30))
            .unwrap();
        // Three swatches leave room for one neighbour per side: five blocks.
        assert_eq!(state.carousel.per_side(), 1);
        assert_eq!(state.carousel.geometry().item_width(), 18.0);
        assert_eq!(state.config.neighbors_per_side, 3);
    }

    #[test]
    fn default_palette_keeps_requested_count() {
        let state = AppState::new(
            AppConfig::default(),
            ManualScheduler::default(),
            Rect::new(0, 0, 90, 30),
        )
        .unwrap();
        assert_eq!(state.carousel.per_side(), 3);
        assert_eq!(state.carousel.geometry().item_width(), 10.0);
    }

    #[test]
    fn empty_palette_is_an_error() {
        let config = config_with(&["not a colour"], 3);
        assert!(AppState::new(config, ManualScheduler::default(), Rect::new(0, 0, 90, 30)).is_err());
    }
}
