//! Theme colors for the hologram screen
//! Defaults to a black stage so the pyramid reflections stay crisp;
//! any color can be overridden with a hex value in config.toml `[theme]`.

use ratatui::style::Color;

use crate::config::ThemeConfig;

/// Theme colors for the UI
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub accent: Color,       // Focused button, key hints
    pub text: Color,         // Primary text and glyph captions
    pub text_dim: Color,     // Subtitles, hint descriptions
    pub bg: Color,           // Stage background (keep black for the projection)
    pub panel_edge: Color,   // Quadrant and card borders
    pub danger: Color,       // Not-found placeholder
    pub header: Color,       // Titles and numbered steps
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            accent: Color::Rgb(250, 179, 135),
            text: Color::Rgb(255, 255, 255),
            text_dim: Color::Rgb(179, 179, 179),  // white at ~70%
            bg: Color::Rgb(0, 0, 0),
            panel_edge: Color::Rgb(51, 51, 51),   // white at ~20%
            danger: Color::Rgb(243, 139, 168),
            header: Color::Rgb(137, 180, 250),
        }
    }
}

impl Theme {
    /// Defaults with any valid hex overrides from config applied
    pub fn from_config(config: &ThemeConfig) -> Self {
        let defaults = Self::default();
        let pick = |value: &Option<String>, fallback: Color, key: &str| match value {
            Some(raw) => Self::parse_hex_color(raw).unwrap_or_else(|| {
                tracing::warn!("Ignoring invalid theme color {} = {:?}", key, raw);
                fallback
            }),
            None => fallback,
        };

        Self {
            accent: pick(&config.accent, defaults.accent, "accent"),
            text: pick(&config.text, defaults.text, "text"),
            text_dim: pick(&config.text_dim, defaults.text_dim, "text_dim"),
            bg: pick(&config.background, defaults.bg, "background"),
            panel_edge: pick(&config.panel_edge, defaults.panel_edge, "panel_edge"),
            danger: pick(&config.danger, defaults.danger, "danger"),
            header: pick(&config.header, defaults.header, "header"),
        }
    }

    /// Parse a hex color string (#RRGGBB or #RGB)
    fn parse_hex_color(s: &str) -> Option<Color> {
        let s = s.trim().trim_start_matches('#');
        if !s.is_ascii() {
            return None;
        }

        if s.len() == 6 {
            let r = u8::from_str_radix(&s[0..2], 16).ok()?;
            let g = u8::from_str_radix(&s[2..4], 16).ok()?;
            let b = u8::from_str_radix(&s[4..6], 16).ok()?;
            Some(Color::Rgb(r, g, b))
        } else if s.len() == 3 {
            let r = u8::from_str_radix(&s[0..1], 16).ok()? * 17;
            let g = u8::from_str_radix(&s[1..2], 16).ok()? * 17;
            let b = u8::from_str_radix(&s[2..3], 16).ok()? * 17;
            Some(Color::Rgb(r, g, b))
        } else {
            None
        }
    }
}
