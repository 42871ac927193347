mod hologram;

use std::sync::OnceLock;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{Action, App, HologramView, Popup, Screen};
use crate::route::Navigator;
use crate::theme::Theme;

use hologram::{HologramWidget, PANELS};

// Set once from config at startup; falls back to the default palette
static THEME: OnceLock<Theme> = OnceLock::new();

pub fn init_theme(theme: Theme) {
    if THEME.set(theme).is_err() {
        tracing::debug!("Theme already initialised");
    }
}

fn theme() -> &'static Theme {
    THEME.get_or_init(Theme::default)
}

// Helper functions to get theme colors
fn accent() -> Color { theme().accent }
fn text() -> Color { theme().text }
fn text_dim() -> Color { theme().text_dim }
fn bg() -> Color { theme().bg }
fn panel_edge() -> Color { theme().panel_edge }
fn danger() -> Color { theme().danger }
fn header() -> Color { theme().header }

const SUBTITLE: &str = "Place your pyramid on the screen for 3D effect";

const INSTRUCTIONS: [&str; 3] = [
    "Position your transparent pyramid (Pepper's Ghost pyramid) at the center of the screen where indicated.",
    "The four orientations of the animal will reflect off the pyramid's sides to create a 3D holographic effect.",
    "View from above the pyramid to see the animal appear to float in 3D space!",
];

const TIP: &str = "Dim your room lights and increase screen brightness for the best holographic effect.";

pub fn draw<N: Navigator>(f: &mut Frame, app: &App<N>) {
    let area = f.area();

    // Black stage behind everything
    f.render_widget(Block::default().style(Style::default().bg(bg())), area);

    match &app.screen {
        Screen::Found(view) => draw_hologram_screen(f, app, view, area),
        Screen::NotFound { .. } => draw_not_found(f, area),
    }

    match app.popup {
        Popup::None => {}
        Popup::Help => draw_help_popup(f, &app.screen),
    }
}

fn draw_not_found(f: &mut Frame, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),   // Footer
        ])
        .split(area);

    let message = Paragraph::new(Line::from(Span::styled(
        "Animal not found",
        Style::default().fg(danger()).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);

    f.render_widget(message, chunks[1]);
    draw_footer(f, &[("h", "Help"), ("q", "Quit")], chunks[3]);
}

fn draw_hologram_screen<N: Navigator>(f: &mut Frame, app: &App<N>, view: &HologramView, area: Rect) {
    // Responsive: the card is the first thing to go on short terminals
    let show_card = app.show_instructions && area.height >= 34;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),                                   // Info line
            Constraint::Length(1),                                   // Back button
            Constraint::Length(1),                                   // Title
            Constraint::Length(1),                                   // Subtitle
            Constraint::Min(11),                                     // Hologram
            Constraint::Length(if show_card { 10 } else { 0 }),      // Instructions
            Constraint::Length(3),                                   // Buttons
            Constraint::Length(1),                                   // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_back_button(f, app, view, chunks[1]);

    let title = Paragraph::new(Line::from(Span::styled(
        format!("{} Hologram", view.animal.name),
        Style::default().fg(text()).add_modifier(Modifier::BOLD),
    )))
    .alignment(Alignment::Center);
    f.render_widget(title, chunks[2]);

    let subtitle = Paragraph::new(Line::from(Span::styled(SUBTITLE, Style::default().fg(text_dim()))))
        .alignment(Alignment::Center);
    f.render_widget(subtitle, chunks[3]);

    // Keep the projection square-ish: a cell is about twice as tall as wide
    let stage = chunks[4];
    let stage_width = stage.width.min(stage.height.saturating_mul(2));
    let stage = Rect {
        x: stage.x + (stage.width - stage_width) / 2,
        width: stage_width,
        ..stage
    };
    f.render_widget(HologramWidget::new(&view.glyph, &view.animal.name, theme()), stage);

    if show_card {
        draw_instructions(f, chunks[5]);
    }
    draw_action_buttons(f, app, view, chunks[6]);
    draw_footer(
        f,
        &[
            ("Tab", "Focus"),
            ("Enter", "Open"),
            ("b", "Back"),
            ("t", "Quiz"),
            ("i", "Instructions"),
            ("h", "Help"),
            ("q", "Quit"),
        ],
        chunks[7],
    );
}

fn draw_info_line<N: Navigator>(f: &mut Frame, app: &App<N>, area: Rect) {
    let line = match app.status_message {
        Some(ref status) => Line::from(Span::styled(status.as_str(), Style::default().fg(accent()))),
        None => Line::from(Span::styled("Ready", Style::default().fg(text_dim()))),
    };

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn button_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(accent()).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(text())
    }
}

fn draw_back_button<N: Navigator>(f: &mut Frame, app: &App<N>, view: &HologramView, area: Rect) {
    let focused = app.focus == Action::Back;
    let label = Action::Back.label(&view.animal.name);
    let style = if focused { button_style(true).add_modifier(Modifier::REVERSED) } else { button_style(false) };

    f.render_widget(Paragraph::new(Line::from(Span::styled(format!(" {} ", label), style))), area);
}

fn draw_action_buttons<N: Navigator>(f: &mut Frame, app: &App<N>, view: &HologramView, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Ratio(1, 2), Constraint::Ratio(1, 2)])
        .split(area);

    for (action, chunk) in [Action::LearnMore, Action::TakeQuiz].into_iter().zip(chunks.iter()) {
        let focused = app.focus == action;
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(if focused { accent() } else { panel_edge() }));

        let button = Paragraph::new(Line::from(Span::styled(action.label(&view.animal.name), button_style(focused))))
            .alignment(Alignment::Center)
            .block(block);

        f.render_widget(button, *chunk);
    }
}

fn draw_instructions(f: &mut Frame, area: Rect) {
    let block = Block::default()
        .title(Span::styled(" ⓘ Hologram Instructions ", Style::default().fg(header()).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(panel_edge()));

    let mut lines: Vec<Line> = INSTRUCTIONS
        .iter()
        .enumerate()
        .map(|(i, step)| {
            Line::from(vec![
                Span::styled(format!(" {} ", i + 1), Style::default().fg(bg()).bg(header())),
                Span::raw(" "),
                Span::styled(*step, Style::default().fg(text())),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(vec![
        Span::raw("💡 "),
        Span::styled("Tip: ", Style::default().fg(accent()).add_modifier(Modifier::BOLD)),
        Span::styled(TIP, Style::default().fg(text_dim())),
    ]));

    let card = Paragraph::new(lines)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(card, area);
}

fn draw_footer(f: &mut Frame, hints: &[(&str, &str)], area: Rect) {
    // Responsive: show fewer hints on narrow terminals
    let max_hints = if area.width < 60 { 4 } else if area.width < 80 { 5 } else { hints.len() };

    let hint_spans: Vec<Span> = hints
        .iter()
        .take(max_hints)
        .flat_map(|(key, action)| {
            vec![
                Span::styled(*key, Style::default().fg(accent())),
                Span::styled(format!(" {} │ ", action), Style::default().fg(text_dim())),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(hint_spans))
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}

fn draw_help_popup(f: &mut Frame, screen: &Screen) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 70 },
        if area.height < 30 { 90 } else { 70 },
        area
    );

    f.render_widget(Clear, popup_area);

    let key_line = |key: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", key), Style::default().fg(accent())),
            Span::raw(what),
        ])
    };

    let turns = PANELS
        .iter()
        .map(|p| format!("{} {}°", p.quadrant.label(), p.orientation.degrees()))
        .collect::<Vec<_>>()
        .join(" · ");

    let mut help_text = vec![
        Line::from(Span::styled("═══ Hologram ═══", Style::default().fg(header()).add_modifier(Modifier::BOLD))),
        Line::from("  Four copies of the animal face outward from the center."),
        Line::from("  Set a Pepper's Ghost pyramid, tip down, on the center badge."),
        Line::from(Span::styled(format!("  {}", turns), Style::default().fg(text_dim()))),
        Line::from(""),
    ];

    if let Screen::Found(_) = screen {
        help_text.extend([
            Line::from(Span::styled("═══ Navigation ═══", Style::default().fg(header()).add_modifier(Modifier::BOLD))),
            key_line("Tab ←/→", "Move focus between buttons"),
            key_line("Enter", "Open the focused button"),
            key_line("b", "Back to the animal page"),
            key_line("l", "Learn more about the animal"),
            key_line("t", "Take the habitat quiz"),
            key_line("i", "Show/hide instructions"),
            Line::from(""),
        ]);
    }

    help_text.extend([
        Line::from(Span::styled("═══ General ═══", Style::default().fg(header()).add_modifier(Modifier::BOLD))),
        key_line("h ?", "Toggle this help"),
        key_line("q Ctrl-C", "Quit"),
        Line::from(""),
        Line::from(Span::styled("Press Esc to close", Style::default().fg(text_dim()))),
    ]);

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(" Help ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(accent()))
                .style(Style::default().bg(bg())),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
