//! Carousel widgets — the swatch strip and the full-colour panel.
//!
//! Both draw a [`RenderSnapshot`] and nothing else; all motion comes from
//! the offsets the transition controller hands out.  Slot maths is kept in
//! plain functions so mouse hit-testing sees the same layout that is drawn.

use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::Line,
    widgets::Widget,
};

use crate::core::ring::{self, Ring};
use crate::core::transition::{Geometry, RenderSnapshot};

use super::theme::{Swatch, Theme};

// ───────────────────────────────────────── slot maths ────────

/// One drawn swatch, in columns relative to the strip's left edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub index: usize,
    pub x: f64,
    pub width: f64,
}

/// Rest position of the swatch `rel` places away from the selected one.
fn rest_slot(rel: isize, geometry: Geometry) -> (f64, f64) {
    let w = geometry.item_width();
    let centre_left = geometry.viewport_width() / 2.0 - 1.5 * w;
    match rel {
        0 => (centre_left, 3.0 * w),
        r if r < 0 => (centre_left + r as f64 * w, w),
        r => (centre_left + 3.0 * w + (r - 1) as f64 * w, w),
    }
}

/// Where the target sits relative to the selected swatch, signed.
fn target_offset(len: usize, frame: &RenderSnapshot) -> isize {
    match frame.pending_index {
        Some(target) => {
            let heading = ring::direction_and_distance(len, frame.selected_index, target);
            let d = heading.distance as isize;
            if heading.from_left {
                -d
            } else {
                d
            }
        }
        None => 0,
    }
}

/// Swatch slots for a frame at `progress` through its transition.
///
/// Every swatch rides the strip offset.  When an enlarging candidate exists
/// it grows into the centre slot while the selected one shrinks back, and
/// swatches between them make room; far-off targets just slide.
pub fn strip_slots(
    len: usize,
    frame: &RenderSnapshot,
    per_side: usize,
    geometry: Geometry,
    progress: f64,
) -> Vec<Slot> {
    let delta = target_offset(len, frame);
    let reach = (per_side as isize) + delta.abs() + 1;
    let w = geometry.item_width();
    let resizing = frame.enlarging_index.is_some();

    (-reach..=reach)
        .map(|rel| {
            let (x0, w0) = rest_slot(rel, geometry);
            let (x, width) = if resizing {
                let (x1, w1) = rest_slot(rel - delta, geometry);
                // Size-driven drift on top of the uniform strip shift.
                let drift = (x1 - x0) + delta as f64 * w;
                (x0 + drift * progress, w0 + (w1 - w0) * progress)
            } else {
                (x0, w0)
            };
            Slot {
                index: ring::step(len, frame.selected_index, rel),
                x: x + frame.secondary_strip_offset,
                width,
            }
        })
        .collect()
}

/// Ring index of the swatch under `column` while idle.
pub fn slot_at(
    len: usize,
    selected: usize,
    per_side: usize,
    geometry: Geometry,
    column: f64,
) -> Option<usize> {
    let side = per_side as isize;
    ring::strip(len, selected, per_side)
        .into_iter()
        .zip(-side..=side)
        .find_map(|(index, rel)| {
            let (x, width) = rest_slot(rel, geometry);
            (column >= x && column < x + width).then_some(index)
        })
}

// ───────────────────────────────────────── drawing ───────────

/// Fill columns `[x0, x1)` of `area` (clipped) with `style`.
fn fill_columns(buf: &mut Buffer, area: Rect, x0: i32, x1: i32, style: Style) {
    let left = x0.max(0);
    let right = x1.min(i32::from(area.width));
    if left >= right {
        return;
    }
    let rect = Rect::new(
        area.x + left as u16,
        area.y,
        (right - left) as u16,
        area.height,
    );
    buf.set_style(rect, style);
}

/// Row of small swatches flanking a large selected one.
pub struct StripWidget<'a> {
    pub ring: &'a Ring<Swatch>,
    pub frame: RenderSnapshot,
    pub per_side: usize,
    pub geometry: Geometry,
    pub progress: f64,
}

impl Widget for StripWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < 3 || area.width == 0 {
            return;
        }
        // One row of padding above and below, like the gaps between swatches.
        let inner = Rect::new(area.x, area.y + 1, area.width, area.height - 2);

        for slot in strip_slots(
            self.ring.len(),
            &self.frame,
            self.per_side,
            self.geometry,
            self.progress,
        ) {
            let mut x0 = slot.x.round() as i32;
            let mut x1 = (slot.x + slot.width).round() as i32;
            if x1 - x0 >= 3 {
                x0 += 1;
                x1 -= 1;
            }
            let color = self.ring.wrapped(slot.index).color;
            fill_columns(buf, inner, x0, x1, Style::default().bg(color));
        }
    }
}

/// Full-size panel: the selected colour, plus the incoming one while a
/// transition runs.
pub struct PanelWidget<'a> {
    pub ring: &'a Ring<Swatch>,
    pub frame: RenderSnapshot,
}

impl PanelWidget<'_> {
    fn draw(&self, swatch: &Swatch, offset: f64, area: Rect, buf: &mut Buffer) {
        let x0 = offset.round() as i32;
        let x1 = x0 + i32::from(area.width);
        fill_columns(buf, area, x0, x1, Style::default().bg(swatch.color));

        let label_width = swatch.label.len() as i32;
        let label_x = x0 + (i32::from(area.width) - label_width) / 2;
        if label_x >= 0 && label_x + label_width <= i32::from(area.width) {
            let line = Line::styled(swatch.label.as_str(), Theme::label_style(swatch.color));
            buf.set_line(
                area.x + label_x as u16,
                area.y + area.height / 2,
                &line,
                label_width as u16,
            );
        }
    }
}

impl Widget for PanelWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if let Some(next) = self.frame.pending_index {
            self.draw(self.ring.wrapped(next), self.frame.incoming_offset, area, buf);
        }
        self.draw(
            self.ring.wrapped(self.frame.selected_index),
            self.frame.primary_offset,
            area,
            buf,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;

    fn geometry() -> Geometry {
        Geometry::new(90.0, 10.0).unwrap()
    }

    fn rest(selected: usize) -> RenderSnapshot {
        RenderSnapshot {
            selected_index: selected,
            pending_index: None,
            primary_offset: 0.0,
            incoming_offset: 0.0,
            secondary_strip_offset: 0.0,
            enlarging_index: None,
        }
    }

    fn slot_for(slots: &[Slot], index: usize) -> Slot {
        *slots.iter().find(|s| s.index == index).unwrap()
    }

    #[test]
    fn rest_strip_fills_the_viewport() {
        let slots = strip_slots(20, &rest(0), 3, geometry(), 0.0);
        let centre = slot_for(&slots, 0);
        assert_eq!((centre.x, centre.width), (30.0, 30.0));
        assert_eq!(slot_for(&slots, 17).x, 0.0);
        assert_eq!(slot_for(&slots, 3).x, 80.0);
    }

    #[test]
    fn enlarging_swatch_lands_in_the_centre() {
        // Settled frame of a 0 -> 2 tap: strip shifted two items left.
        let frame = RenderSnapshot {
            selected_index: 0,
            pending_index: Some(2),
            primary_offset: -90.0,
            incoming_offset: 0.0,
            secondary_strip_offset: -20.0,
            enlarging_index: Some(2),
        };
        let slots = strip_slots(20, &frame, 3, geometry(), 1.0);
        let target = slot_for(&slots, 2);
        assert_eq!((target.x, target.width), (30.0, 30.0));
        let old = slot_for(&slots, 0);
        assert_eq!(old.width, 10.0);
        assert_eq!(old.x, 10.0);
    }

    #[test]
    fn click_maps_to_ring_index() {
        assert_eq!(slot_at(20, 0, 3, geometry(), 5.0), Some(17));
        assert_eq!(slot_at(20, 0, 3, geometry(), 45.0), Some(0));
        assert_eq!(slot_at(20, 0, 3, geometry(), 89.5), Some(3));
        assert_eq!(slot_at(20, 0, 3, geometry(), 95.0), None);
    }

    #[test]
    fn panel_draws_selected_colour() {
        let ring = Ring::new(vec![
            Swatch::parse("#FF0000").unwrap(),
            Swatch::parse("#0000FF").unwrap(),
        ])
        .unwrap();
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        PanelWidget { ring: &ring, frame: rest(1) }.render(area, &mut buf);
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(0, 0, 255));
        assert_eq!(buf[(11, 2)].bg, Color::Rgb(0, 0, 255));
    }

    #[test]
    fn panel_splits_during_transition() {
        let ring = Ring::new(vec![
            Swatch::parse("#FF0000").unwrap(),
            Swatch::parse("#0000FF").unwrap(),
        ])
        .unwrap();
        let area = Rect::new(0, 0, 10, 1);
        let mut buf = Buffer::empty(area);
        let frame = RenderSnapshot {
            selected_index: 0,
            pending_index: Some(1),
            primary_offset: -4.0,
            incoming_offset: 6.0,
            secondary_strip_offset: 0.0,
            enlarging_index: Some(1),
        };
        PanelWidget { ring: &ring, frame }.render(area, &mut buf);
        assert_eq!(buf[(0, 0)].bg, Color::Rgb(255, 0, 0));
        assert_eq!(buf[(7, 0)].bg, Color::Rgb(0, 0, 255));
    }
}
