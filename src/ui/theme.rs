//! Colour palette and text styles used across the UI.

use ratatui::style::{Color, Modifier, Style};

/// Central theme — change colours here and they propagate everywhere.
pub struct Theme;

impl Theme {
    pub fn status_bar_style() -> Style {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    }

    pub fn counter_style() -> Style {
        Style::default()
            .bg(Color::DarkGray)
            .fg(Color::Green)
            .add_modifier(Modifier::BOLD)
    }

    /// Label drawn on top of a colour panel; picks black or white for
    /// contrast against `bg`.
    pub fn label_style(bg: Color) -> Style {
        let fg = match bg {
            Color::Rgb(r, g, b) => {
                let luma = 0.299 * r as f64 + 0.587 * g as f64 + 0.114 * b as f64;
                if luma > 140.0 {
                    Color::Black
                } else {
                    Color::White
                }
            }
            _ => Color::White,
        };
        Style::default().fg(fg).bg(bg).add_modifier(Modifier::BOLD)
    }
}

// ───────────────────────────────────────── swatches ──────────

/// One ring item: the colour plus the text it was configured with.
#[derive(Debug, Clone, PartialEq)]
pub struct Swatch {
    pub label: String,
    pub color: Color,
}

impl Swatch {
    pub fn parse(hex: &str) -> Option<Self> {
        Some(Self {
            label: hex.trim().to_uppercase(),
            color: parse_hex(hex)?,
        })
    }
}

/// Parse `#RRGGBB` (leading `#` optional) into an RGB colour.
pub fn parse_hex(s: &str) -> Option<Color> {
    let digits = s.trim().trim_start_matches('#');
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&digits[i..i + 2], 16).ok();
    Some(Color::Rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Build swatches from config strings, skipping (and logging) bad entries.
pub fn swatches(palette: &[String]) -> Vec<Swatch> {
    palette
        .iter()
        .filter_map(|entry| {
            let swatch = Swatch::parse(entry);
            if swatch.is_none() {
                tracing::warn!(entry = %entry, "skipping palette entry that is not #RRGGBB");
            }
            swatch
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colours() {
        assert_eq!(parse_hex("#FF8000"), Some(Color::Rgb(255, 128, 0)));
        assert_eq!(parse_hex("008080"), Some(Color::Rgb(0, 128, 128)));
        assert_eq!(parse_hex("#F80"), None);
        assert_eq!(parse_hex("#GG0000"), None);
    }

    #[test]
    fn invalid_entries_are_skipped() {
        let palette = vec!["#ff0000".to_string(), "red".to_string(), "#0000FF".to_string()];
        let out = swatches(&palette);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].label, "#FF0000");
        assert_eq!(out[1].color, Color::Rgb(0, 0, 255));
    }

    #[test]
    fn label_contrasts_with_background() {
        assert_eq!(Theme::label_style(Color::Rgb(255, 255, 0)).fg, Some(Color::Black));
        assert_eq!(Theme::label_style(Color::Rgb(0, 0, 255)).fg, Some(Color::White));
    }
}
