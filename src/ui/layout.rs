//! Layout helpers — split the terminal area into regions and derive the
//! carousel geometry from them.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::core::transition::Geometry;

/// Rows used by the swatch strip.
const STRIP_HEIGHT: u16 = 5;

/// Primary screen layout: swatch strip, full-colour panel, status bar.
pub struct AppLayout {
    pub strip_area: Rect,
    pub panel_area: Rect,
    pub status_area: Rect,
}

impl AppLayout {
    /// Compute the layout from the full terminal area.
    pub fn from_area(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(STRIP_HEIGHT), // small swatches
                Constraint::Min(3),               // selected colour, full width
                Constraint::Length(1),            // status bar
            ])
            .split(area);

        Self {
            strip_area: chunks[0],
            panel_area: chunks[1],
            status_area: chunks[2],
        }
    }

    /// Strip and panel together — where drags are recognised.
    pub fn carousel_area(&self) -> Rect {
        self.strip_area.union(self.panel_area)
    }
}

/// Item and viewport widths for a carousel `width` columns wide.
///
/// `2k + 1` swatches share `2k + 3` equal blocks; the selected one takes
/// three of them.  Returns `None` for a zero-width area.
pub fn carousel_geometry(width: u16, per_side: usize) -> Option<Geometry> {
    let viewport = f64::from(width);
    let blocks = (2 * per_side + 3) as f64;
    Geometry::new(viewport, viewport / blocks).ok()
}

/// Is the cell at (`col`, `row`) inside `rect`?
pub fn point_in_rect(rect: Rect, col: u16, row: u16) -> bool {
    col >= rect.x
        && col < rect.x.saturating_add(rect.width)
        && row >= rect.y
        && row < rect.y.saturating_add(rect.height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_strip_panel_status() {
        let layout = AppLayout::from_area(Rect::new(0, 0, 90, 30));
        assert_eq!(layout.strip_area, Rect::new(0, 0, 90, 5));
        assert_eq!(layout.status_area, Rect::new(0, 29, 90, 1));
        assert_eq!(layout.panel_area, Rect::new(0, 5, 90, 24));
        assert_eq!(layout.carousel_area(), Rect::new(0, 0, 90, 29));
    }

    #[test]
    fn geometry_uses_nine_blocks_for_three_per_side() {
        let g = carousel_geometry(90, 3).unwrap();
        assert_eq!(g.viewport_width(), 90.0);
        assert_eq!(g.item_width(), 10.0);
        assert!(carousel_geometry(0, 3).is_none());
    }

    #[test]
    fn hit_testing() {
        let r = Rect::new(2, 3, 4, 2);
        assert!(point_in_rect(r, 2, 3));
        assert!(point_in_rect(r, 5, 4));
        assert!(!point_in_rect(r, 6, 4));
        assert!(!point_in_rect(r, 2, 5));
    }
}
