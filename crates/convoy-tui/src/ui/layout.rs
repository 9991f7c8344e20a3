//! Screen layout rendering.

use convoy_core::LogColor;
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::app::{App, Mode};
use crate::console::ConsoleLine;

/// Render the entire UI.
pub fn render(frame: &mut Frame, app: &App) {
    match app.mode {
        Mode::Startup => render_startup(frame, app),
        Mode::Main | Mode::ProcessList | Mode::Select(_) => render_dashboard(frame, app),
    }
}

/// The dashboard: scrolling log region above, pinned status bar below.
fn render_dashboard(frame: &mut Frame, app: &App) {
    // One extra row for the horizontal border above the menu.
    let status_height = u16::try_from(app.console.status().len()).unwrap_or(u16::MAX) + 1;

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(status_height)])
        .split(frame.area());

    render_log_region(frame, app, chunks[0]);
    render_status_bar(frame, app, chunks[1]);
}

/// Render the scrolling log region, pinned to the newest lines.
fn render_log_region(frame: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app.console.lines().iter().map(console_line).collect();

    let scroll = lines.len().saturating_sub(area.height as usize);
    let paragraph =
        Paragraph::new(lines).scroll((u16::try_from(scroll).unwrap_or(u16::MAX), 0));

    frame.render_widget(paragraph, area);
}

fn console_line(line: &ConsoleLine) -> Line<'_> {
    match &line.prefix {
        Some((name, color)) => Line::from(vec![
            Span::styled(
                format!("{name} | "),
                Style::default().fg(palette_color(*color)),
            ),
            Span::raw(line.text.as_str()),
        ]),
        None => Line::raw(line.text.as_str()),
    }
}

/// Render the pinned status bar: border line, then the mode's menu.
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let mut lines = vec![Line::styled(
        app.console.border().to_string(),
        Style::default().fg(Color::White),
    )];
    lines.extend(app.console.status().iter().cloned());

    frame.render_widget(Paragraph::new(lines), area);
}

/// Render the startup chooser: which containers to spin up.
fn render_startup(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let title = Paragraph::new(vec![
        Line::styled(
            "Found a compose file with these containers:",
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ),
        Line::raw(""),
    ]);
    frame.render_widget(title, chunks[0]);

    let items: Vec<Line> = app
        .registry
        .iter()
        .enumerate()
        .map(|(i, container)| {
            let cursor = if i == app.startup_cursor { "> " } else { "  " };
            let mark = if app.startup_selected.get(i).copied().unwrap_or(false) {
                "[x] "
            } else {
                "[ ] "
            };
            let name_style = if i == app.startup_cursor {
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Green)
            };
            Line::from(vec![
                Span::raw(cursor),
                Span::raw(mark),
                Span::styled(container.name.clone(), name_style),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(items), chunks[1]);

    let help = Paragraph::new(Line::from(vec![
        Span::styled("Space", Style::default().fg(Color::Cyan)),
        Span::raw(": Toggle  |  "),
        Span::styled("a", Style::default().fg(Color::Cyan)),
        Span::raw(": Select all  |  "),
        Span::styled("Enter", Style::default().fg(Color::Green)),
        Span::raw(": Start selected  |  "),
        Span::styled("q", Style::default().fg(Color::Red)),
        Span::raw(": Quit"),
    ]));
    frame.render_widget(help, chunks[2]);
}

/// Map a registry color to its terminal color.
pub(crate) const fn palette_color(color: LogColor) -> Color {
    match color {
        LogColor::Red => Color::Red,
        LogColor::Green => Color::Green,
        LogColor::Blue => Color::Blue,
        LogColor::Yellow => Color::Yellow,
        LogColor::Cyan => Color::Cyan,
        LogColor::Magenta => Color::Magenta,
    }
}
