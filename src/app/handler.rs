//! Input handling — maps key/mouse events to carousel inputs.

use std::time::Instant;

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};

use crate::config::Action;
use crate::core::schedule::Scheduler;
use crate::core::transition::{Input, SwipeDirection};
use crate::ui::carousel::slot_at;
use crate::ui::layout::{point_in_rect, AppLayout};

use super::state::AppState;

/// Process a key event.
pub fn handle_key<S: Scheduler>(state: &mut AppState<S>, key: KeyEvent, now: Instant) {
    if key.kind != KeyEventKind::Press {
        return;
    }

    // Ctrl+c always quits, whatever the bindings say.
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        state.should_quit = true;
        return;
    }

    let Some(action) = state.config.match_key(key) else {
        return;
    };

    match action {
        Action::Quit => state.should_quit = true,
        Action::Previous => submit(state, Input::Swipe(SwipeDirection::Backward), now),
        Action::Next => submit(state, Input::Swipe(SwipeDirection::Forward), now),
        Action::JumpFirst => submit(state, Input::Tap(0), now),
        Action::JumpLast => {
            let last = state.ring.len() - 1;
            submit(state, Input::Tap(last), now);
        }
    }
}

/// Process a mouse event.  A left-button press inside the carousel starts a
/// gesture; the release either swipes (if the pointer moved sideways) or
/// taps the strip swatch under the press.
pub fn handle_mouse<S: Scheduler>(state: &mut AppState<S>, mouse: MouseEvent, now: Instant) {
    let layout = AppLayout::from_area(state.terminal_area);

    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            state.drag_origin = point_in_rect(layout.carousel_area(), mouse.column, mouse.row)
                .then_some((mouse.column, mouse.row));
        }
        MouseEventKind::Up(MouseButton::Left) => {
            let Some((col, row)) = state.drag_origin.take() else {
                return;
            };
            let dx = i32::from(mouse.column) - i32::from(col);
            if let Some(direction) = drag_direction(dx) {
                submit(state, Input::Swipe(direction), now);
                return;
            }
            if !point_in_rect(layout.strip_area, col, row) {
                return;
            }
            // Sample the middle of the clicked cell.
            let column = f64::from(col - layout.strip_area.x) + 0.5;
            let hit = slot_at(
                state.ring.len(),
                state.carousel.selected_index(),
                state.carousel.per_side(),
                state.carousel.geometry(),
                column,
            );
            if let Some(index) = hit {
                submit(state, Input::Tap(index), now);
            }
        }
        _ => {}
    }
}

/// Swipe implied by a drag of `dx` columns.  Pulling the ring to the left
/// brings in the next swatch; pulling it right brings back the previous one.
pub fn drag_direction(dx: i32) -> Option<SwipeDirection> {
    match dx {
        0 => None,
        d if d < 0 => Some(SwipeDirection::Forward),
        _ => Some(SwipeDirection::Backward),
    }
}

fn submit<S: Scheduler>(state: &mut AppState<S>, input: Input, now: Instant) {
    if let Err(err) = state.carousel.apply(input, now) {
        tracing::debug!(%err, ?input, "input ignored");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::core::schedule::manual::ManualScheduler;
    use ratatui::layout::Rect;

    fn state() -> AppState<ManualScheduler> {
        AppState::new(
            AppConfig::default(),
            ManualScheduler::default(),
            Rect::new(0, 0, 90, 30),
        )
        .unwrap()
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    fn gesture(state: &mut AppState<ManualScheduler>, from: (u16, u16), to: (u16, u16)) {
        let now = Instant::now();
        handle_mouse(state, mouse(MouseEventKind::Down(MouseButton::Left), from.0, from.1), now);
        handle_mouse(state, mouse(MouseEventKind::Up(MouseButton::Left), to.0, to.1), now);
    }

    #[test]
    fn arrow_keys_swipe() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Right), Instant::now());
        assert_eq!(s.carousel.pending_index(), Some(1));

        let mut s = state();
        handle_key(&mut s, key(KeyCode::Left), Instant::now());
        assert_eq!(s.carousel.pending_index(), Some(19));
    }

    #[test]
    fn key_release_is_ignored() {
        let mut s = state();
        let mut ev = key(KeyCode::Right);
        ev.kind = KeyEventKind::Release;
        handle_key(&mut s, ev, Instant::now());
        assert!(!s.carousel.is_transitioning());
    }

    #[test]
    fn jump_keys_tap_the_ends() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::End), Instant::now());
        assert_eq!(s.carousel.pending_index(), Some(19));

        // Already on 0: jumping to the first swatch is ignored.
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Home), Instant::now());
        assert!(!s.carousel.is_transitioning());
    }

    #[test]
    fn quit_keys() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Char('q')), Instant::now());
        assert!(s.should_quit);

        let mut s = state();
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        handle_key(&mut s, ctrl_c, Instant::now());
        assert!(s.should_quit);
    }

    #[test]
    fn keys_while_transitioning_are_dropped() {
        let mut s = state();
        handle_key(&mut s, key(KeyCode::Right), Instant::now());
        handle_key(&mut s, key(KeyCode::Right), Instant::now());
        assert_eq!(s.carousel.pending_index(), Some(1));
        assert_eq!(s.carousel.scheduler().scheduled.len(), 1);
    }

    #[test]
    fn drag_left_advances() {
        let mut s = state();
        gesture(&mut s, (50, 10), (30, 10));
        assert_eq!(s.carousel.pending_index(), Some(1));

        let mut s = state();
        gesture(&mut s, (30, 10), (50, 12));
        assert_eq!(s.carousel.pending_index(), Some(19));
    }

    #[test]
    fn click_on_strip_taps_swatch() {
        let mut s = state();
        gesture(&mut s, (5, 2), (5, 2));
        assert_eq!(s.carousel.pending_index(), Some(17));
    }

    #[test]
    fn click_on_selected_or_panel_does_nothing() {
        let mut s = state();
        gesture(&mut s, (45, 2), (45, 2));
        gesture(&mut s, (5, 20), (5, 20));
        assert!(!s.carousel.is_transitioning());
    }

    #[test]
    fn press_outside_carousel_is_not_a_gesture() {
        let mut s = state();
        // Status bar row.
        gesture(&mut s, (50, 29), (10, 29));
        assert!(!s.carousel.is_transitioning());
    }

    #[test]
    fn resize_updates_geometry() {
        let mut s = state();
        s.resize(Rect::new(0, 0, 180, 40));
        assert_eq!(s.carousel.geometry().viewport_width(), 180.0);
        assert_eq!(s.carousel.geometry().item_width(), 20.0);
        s.resize(Rect::new(0, 0, 0, 0));
        assert_eq!(s.carousel.geometry().viewport_width(), 180.0);
    }

    #[test]
    fn drag_direction_sign() {
        assert_eq!(drag_direction(-3), Some(SwipeDirection::Forward));
        assert_eq!(drag_direction(4), Some(SwipeDirection::Backward));
        assert_eq!(drag_direction(0), None);
    }
}
