//! Rendering smoke tests against a ratatui test backend.

mod common;

use common::{enter_main, key, test_app};
use convoy_tui::{App, ui};
use crossterm::event::KeyCode;
use ratatui::{Terminal, backend::TestBackend};

/// Render the app and capture the buffer as plain text.
fn render_to_string(app: &App, width: u16, height: u16) -> String {
    let backend = TestBackend::new(width, height);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| ui::render(frame, app)).unwrap();

    let buffer = terminal.backend().buffer().clone();
    let mut output = String::new();
    for y in 0..buffer.area.height {
        for x in 0..buffer.area.width {
            output.push_str(buffer[(x, y)].symbol());
        }
        output.push('\n');
    }
    output
}

#[tokio::test]
async fn startup_screen_lists_containers() {
    let (app, _runtime, _log_rx) = test_app(&["web", "db"]);

    let screen = render_to_string(&app, 80, 24);
    assert!(screen.contains("Found a compose file"));
    assert!(screen.contains("[x] web"));
    assert!(screen.contains("[x] db"));
}

#[tokio::test]
async fn dashboard_shows_menu_and_border() {
    let (mut app, _runtime, _log_rx) = test_app(&["web"]);
    enter_main(&mut app).await;
    app.console.log("something happened");

    let screen = render_to_string(&app, 80, 24);
    assert!(screen.contains("Commands:"));
    assert!(screen.contains("estart container"));
    assert!(screen.contains(&"=".repeat(80)));
    assert!(screen.contains("something happened"));
}

#[tokio::test]
async fn selection_menu_lists_numbered_containers() {
    let (mut app, _runtime, _log_rx) = test_app(&["web", "db"]);
    enter_main(&mut app).await;
    app.handle_key(key(KeyCode::Char('r'))).await.unwrap();

    let screen = render_to_string(&app, 80, 24);
    assert!(screen.contains("Which container do you want to restart?"));
    assert!(screen.contains("(0)web"));
    assert!(screen.contains("(1)db"));
    assert!(screen.contains("ack to main menu"));
}
