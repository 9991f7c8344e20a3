//! Status-bar menu text for each mode.
//!
//! Key hints render as `(x)` with cyan parens and a magenta key, the
//! same glyph style for every mode.

use convoy_core::ContainerRegistry;
use convoy_runtime::Verb;
use ratatui::style::{Color, Style};
use ratatui::text::{Line, Span};

/// `pre(key)post` with the parens in cyan and the key in magenta.
fn hint(pre: &str, key: &str, post: &str) -> Vec<Span<'static>> {
    vec![
        Span::raw(pre.to_string()),
        Span::styled("(", Style::default().fg(Color::Cyan)),
        Span::styled(key.to_string(), Style::default().fg(Color::Magenta)),
        Span::styled(")", Style::default().fg(Color::Cyan)),
        Span::raw(post.to_string()),
    ]
}

/// Main command menu.
#[must_use]
pub fn main_menu() -> Vec<Line<'static>> {
    let mut spans = Vec::new();
    spans.extend(hint("", "r", "estart container, "));
    spans.extend(hint("", "s", "top container, "));
    spans.extend(hint("s", "t", "art container, "));
    spans.extend(hint("", "p", "rocess list, "));
    spans.extend(hint("bui", "l", "d container, "));
    spans.extend(hint("re", "m", "ove container, "));
    spans.extend(hint("", "k", "ill container, "));
    spans.extend(hint("", "q", "uit"));

    vec![Line::raw("Commands:"), Line::from(spans)]
}

/// Numeric container chooser for a lifecycle verb.
#[must_use]
pub fn selection_menu(registry: &ContainerRegistry, verb: Verb) -> Vec<Line<'static>> {
    let mut spans = Vec::new();
    for container in registry {
        spans.extend(hint("", &container.index.to_string(), &container.name));
        spans.push(Span::raw(", "));
    }
    spans.extend(hint("", "b", "ack to main menu"));

    vec![
        Line::raw(format!("Which container do you want to {verb}?")),
        Line::from(spans),
    ]
}

/// Condensed process listing plus the back hint.
#[must_use]
pub fn process_list(ps: &str) -> Vec<Line<'static>> {
    let mut lines: Vec<Line<'static>> = ps
        .lines()
        .map(|line| {
            Line::styled(
                line.to_string(),
                Style::default().fg(Color::Magenta),
            )
        })
        .collect();

    let mut back = vec![Span::raw("Commands: ")];
    back.extend(hint("", "b", "ack to main menu"));
    lines.push(Line::from(back));
    lines
}
