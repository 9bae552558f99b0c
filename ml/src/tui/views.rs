//! TUI views and rendering
//!
//! All rendering logic is contained here. The views module draws the
//! form from the App, but never modifies it.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap};
use tracing::trace;

use super::app::App;
use super::state::InteractionMode;

mod colors {
    use ratatui::style::Color;

    pub const HEADER: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const KEYBIND: Color = Color::Rgb(0, 255, 255); // Cyan
    pub const FOCUS: Color = Color::Rgb(255, 215, 0); // Gold
    pub const RESULT: Color = Color::Rgb(50, 205, 50); // Lime green
    pub const ERROR: Color = Color::Rgb(220, 20, 60); // Crimson
    pub const DIM: Color = Color::DarkGray;
}

/// Main render function
pub fn render(app: &App, frame: &mut Frame) {
    trace!(mode = ?app.state().interaction_mode, "render: called");
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Template selector
            Constraint::Min(0),    // Form
            Constraint::Length(1), // Status
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    render_selector(app, frame, chunks[0]);
    render_form(app, frame, chunks[1]);
    render_status(app, frame, chunks[2]);
    render_footer(frame, chunks[3]);

    match &app.state().interaction_mode {
        InteractionMode::Form => {}
        InteractionMode::Result(text) => render_popup(frame, " Your Madlib ", text, colors::RESULT),
        InteractionMode::Error(msg) => render_popup(frame, " Error ", msg, colors::ERROR),
        InteractionMode::Help => render_help(frame),
    }
}

/// One tab per template title
fn render_selector(app: &App, frame: &mut Frame, area: Rect) {
    let titles: Vec<Line> = app.session().catalog().titles().into_iter().map(Line::from).collect();

    let tabs = Tabs::new(titles)
        .select(app.session().selected())
        .style(Style::default().fg(colors::DIM))
        .highlight_style(Style::default().fg(colors::HEADER).add_modifier(Modifier::BOLD))
        .divider("│")
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(Span::styled(" Choose a Template ", Style::default().fg(colors::HEADER))),
        );

    frame.render_widget(tabs, area);
}

/// One "Enter a <label>:" row per placeholder
fn render_form(app: &App, frame: &mut Frame, area: Rect) {
    let template = app.session().template();
    let instance = app.session().instance();
    let focused = app.state().focused_field;
    let editing = !app.state().interaction_mode.is_modal();

    let prompts: Vec<String> = (1..=template.marker_count())
        .map(|i| template.prompt(i).unwrap_or_default())
        .collect();
    let width = prompts.iter().map(|p| p.chars().count()).max().unwrap_or(0);

    let lines: Vec<Line> = prompts
        .iter()
        .enumerate()
        .map(|(i, prompt)| {
            let field = i + 1;
            let value = instance.value(field).unwrap_or_default();
            if field == focused {
                let cursor = if editing { "▏" } else { "" };
                Line::from(vec![
                    Span::styled(
                        format!("{:<width$} ", prompt, width = width),
                        Style::default().fg(colors::FOCUS).add_modifier(Modifier::BOLD),
                    ),
                    Span::styled(format!("{}{}", value, cursor), Style::default().add_modifier(Modifier::UNDERLINED)),
                ])
            } else {
                Line::from(vec![
                    Span::raw(format!("{:<width$} ", prompt, width = width)),
                    Span::raw(value.to_string()),
                ])
            }
        })
        .collect();

    // Keep the focused row visible (2 rows of border)
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = focused.saturating_sub(visible.max(1)) as u16;

    let form = Paragraph::new(lines).scroll((scroll, 0)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" Please fill in the Text Boxes ({}) ", template.title())),
    );

    frame.render_widget(form, area);
}

fn render_status(app: &App, frame: &mut Frame, area: Rect) {
    let state = app.state();
    let line = if let Some(err) = &state.error_message {
        Line::from(Span::styled(err.clone(), Style::default().fg(colors::ERROR)))
    } else if let Some(status) = &state.status_message {
        Line::from(Span::styled(status.clone(), Style::default().fg(colors::DIM)))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(line), area);
}

fn render_footer(frame: &mut Frame, area: Rect) {
    let hints = [
        ("←/→", "template"),
        ("↑/↓", "field"),
        ("Enter", "next"),
        ("^G", "generate"),
        ("^X", "clear"),
        ("F1", "help"),
        ("Esc", "quit"),
    ];
    let mut spans = Vec::new();
    for (key, action) in hints {
        spans.push(Span::styled(format!(" {} ", key), Style::default().fg(colors::KEYBIND)));
        spans.push(Span::styled(format!("{} ", action), Style::default().fg(colors::DIM)));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_popup(frame: &mut Frame, title: &str, text: &str, color: Color) {
    let area = centered_rect(60, 50, frame.area());
    let popup = Paragraph::new(vec![
        Line::from(text.to_string()),
        Line::default(),
        Line::from(Span::styled("Press Enter to continue", Style::default().fg(colors::DIM))),
    ])
    .wrap(Wrap { trim: false })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(Span::styled(
                title.to_string(),
                Style::default().fg(color).add_modifier(Modifier::BOLD),
            )),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(popup, area);
}

fn render_help(frame: &mut Frame) {
    let area = centered_rect(50, 60, frame.area());
    let rows = [
        ("←/→", "Previous / next template"),
        ("↑/↓ Tab", "Move between fields"),
        ("Enter", "Next field, generate on the last"),
        ("Ctrl+G", "Generate"),
        ("Ctrl+X", "Clear all fields"),
        ("Backspace", "Delete a character"),
        ("F1", "Toggle this help"),
        ("Esc Ctrl+C", "Quit"),
    ];
    let lines: Vec<Line> = rows
        .iter()
        .map(|(key, desc)| {
            Line::from(vec![
                Span::styled(format!("{:>12}  ", key), Style::default().fg(colors::KEYBIND)),
                Span::raw(desc.to_string()),
            ])
        })
        .collect();

    let help = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" Help "));
    frame.render_widget(Clear, area);
    frame.render_widget(help, area);
}

/// Create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::session::Session;
    use crossterm::event::{KeyCode, KeyEvent};
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn draw(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|frame| render(app, frame)).unwrap();
        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_render_form() {
        let app = App::new(Session::new(Catalog::load().unwrap()).unwrap());
        let screen = draw(&app);
        assert!(screen.contains("Choose a Template"));
        assert!(screen.contains("Letter From Camp"));
        assert!(screen.contains("Enter a NOUN (plural):"));
        assert!(screen.contains("Enter a PLACE:"));
    }

    #[test]
    fn test_render_error_popup() {
        let mut app = App::new(Session::new(Catalog::load().unwrap()).unwrap());
        app.handle_key(KeyEvent::new(KeyCode::Char('g'), crossterm::event::KeyModifiers::CONTROL));
        let screen = draw(&app);
        assert!(screen.contains("Please fill in all fields."));
    }

    #[test]
    fn test_centered_rect() {
        let area = Rect::new(0, 0, 100, 100);
        let rect = centered_rect(50, 50, area);
        assert_eq!(rect, Rect::new(25, 25, 50, 50));
    }
}
