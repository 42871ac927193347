//! Four-sided projection for a Pepper's Ghost pyramid
//!
//! The same glyph is drawn in each quadrant, turned so that its "up" points
//! away from the center; the pyramid's faces reflect the four copies into
//! one floating image. Terminal cells cannot be rotated, so the turn is
//! carried by how the caption is laid out around the glyph:
//!
//! | Quadrant | Turn | Layout |
//! |----------|------|--------|
//! | Top      | 180° | caption reversed, above the glyph |
//! | Left     | 270° | caption climbing upward, above the glyph |
//! | Right    | 90°  | caption running downward, below the glyph |
//! | Bottom   | 0°   | glyph, caption below |

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Widget},
};

use unicode_segmentation::UnicodeSegmentation;

use crate::theme::Theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quadrant {
    Top,
    Left,
    Right,
    Bottom,
}

impl Quadrant {
    pub fn label(&self) -> &'static str {
        match self {
            Quadrant::Top => "Top",
            Quadrant::Left => "Left",
            Quadrant::Right => "Right",
            Quadrant::Bottom => "Bottom",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Upright,
    Clockwise,
    Inverted,
    CounterClockwise,
}

impl Orientation {
    pub fn degrees(&self) -> u16 {
        match self {
            Orientation::Upright => 0,
            Orientation::Clockwise => 90,
            Orientation::Inverted => 180,
            Orientation::CounterClockwise => 270,
        }
    }

    /// Lines of text for the glyph and its caption, top to bottom.
    /// The caption is split by grapheme so accents and ZWJ sequences stay whole.
    pub fn lines(&self, glyph: &str, caption: &str) -> Vec<String> {
        let graphemes = caption.graphemes(true);
        match self {
            Orientation::Upright => vec![glyph.to_string(), caption.to_string()],
            Orientation::Inverted => vec![graphemes.rev().collect(), glyph.to_string()],
            Orientation::Clockwise => std::iter::once(glyph.to_string())
                .chain(graphemes.map(String::from))
                .collect(),
            Orientation::CounterClockwise => graphemes
                .rev()
                .map(String::from)
                .chain(std::iter::once(glyph.to_string()))
                .collect(),
        }
    }

    fn is_vertical(&self) -> bool {
        matches!(self, Orientation::Clockwise | Orientation::CounterClockwise)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panel {
    pub quadrant: Quadrant,
    pub orientation: Orientation,
}

pub const PANELS: [Panel; 4] = [
    Panel { quadrant: Quadrant::Top, orientation: Orientation::Inverted },
    Panel { quadrant: Quadrant::Left, orientation: Orientation::CounterClockwise },
    Panel { quadrant: Quadrant::Right, orientation: Orientation::Clockwise },
    Panel { quadrant: Quadrant::Bottom, orientation: Orientation::Upright },
];

const CENTER_BADGE: &str = "Place pyramid here";

/// Blank columns between a side glyph and the badge
const SIDE_MARGIN: u16 = 1;

pub struct HologramWidget<'a> {
    pub glyph: &'a str,
    pub caption: &'a str,
    pub theme: &'a Theme,
}

impl<'a> HologramWidget<'a> {
    pub fn new(glyph: &'a str, caption: &'a str, theme: &'a Theme) -> Self {
        Self { glyph, caption, theme }
    }

    fn render_panel(&self, panel: Panel, area: Rect, buf: &mut Buffer) {
        if area.width == 0 || area.height == 0 {
            return;
        }

        // Keep the glyph even when the caption has to be cut short
        let room = usize::from(if panel.orientation.is_vertical() {
            area.height.saturating_sub(1)
        } else {
            area.width
        });
        let caption: String = self.caption.graphemes(true).take(room).collect();

        let lines: Vec<Line> = panel
            .orientation
            .lines(self.glyph, &caption)
            .into_iter()
            .map(|l| Line::from(Span::styled(l, Style::default().fg(self.theme.text))))
            .collect();

        let height = (lines.len() as u16).min(area.height);
        // Every copy hugs the pyramid in the middle
        let (y, alignment) = match panel.quadrant {
            Quadrant::Top => (area.y + area.height - height, Alignment::Center),
            Quadrant::Bottom => (area.y, Alignment::Center),
            Quadrant::Left => (area.y + (area.height - height) / 2, Alignment::Right),
            Quadrant::Right => (area.y + (area.height - height) / 2, Alignment::Left),
        };
        let target = Rect { x: area.x, y, width: area.width, height };

        Paragraph::new(lines).alignment(alignment).render(target, buf);
    }
}

impl<'a> Widget for HologramWidget<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.panel_edge))
            .style(Style::default().bg(self.theme.bg));
        let inner = block.inner(area);
        block.render(area, buf);

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(inner);

        // Side panels get room for their glyph first; the badge takes what is left
        let glyph_width = (Line::from(self.glyph).width() as u16).max(1);
        let side_min = glyph_width + SIDE_MARGIN;
        let badge_width = (CENTER_BADGE.len() as u16 + 4)
            .min(rows[1].width.saturating_sub(side_min * 2));
        let side = rows[1].width.saturating_sub(badge_width) / 2;
        let middle = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(side),
                Constraint::Length(badge_width),
                Constraint::Min(0),
            ])
            .split(rows[1]);

        for panel in PANELS {
            let panel_area = match panel.quadrant {
                Quadrant::Top => rows[0],
                Quadrant::Left => middle[0],
                Quadrant::Right => middle[2],
                Quadrant::Bottom => rows[2],
            };
            self.render_panel(panel, panel_area, buf);
        }

        // Center badge, borderless when squeezed
        let badge = middle[1];
        let bordered = badge.width >= CENTER_BADGE.len() as u16 + 2 && badge.height >= 3;
        let badge_height = if bordered { 3 } else { 1u16.min(badge.height) };
        let badge_area = Rect {
            y: badge.y + (badge.height - badge_height) / 2,
            height: badge_height,
            ..badge
        };
        Clear.render(badge_area, buf);

        let label = Paragraph::new(Line::from(Span::styled(
            CENTER_BADGE,
            Style::default().fg(self.theme.text).add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .style(Style::default().bg(self.theme.bg));

        if bordered {
            label
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(self.theme.panel_edge)),
                )
                .render(badge_area, buf);
        } else {
            label.render(badge_area, buf);
        }
    }
}
