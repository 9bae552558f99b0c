//! TUI Runner - main loop that owns the terminal
//!
//! The TuiRunner is responsible for:
//! - Drawing the App after every event
//! - Dispatching key events to the App
//! - Copying generated results to the clipboard

use std::time::Duration;

use eyre::Result;
use tracing::{debug, info};

use super::Tui;
use super::app::App;
use super::events::{Event, EventHandler};
use super::views;
use crate::clipboard::{self, Clipboard};

/// How long to wait for input before redrawing
const TICK_RATE: Duration = Duration::from_millis(250);

/// TUI Runner that manages the terminal and event loop
pub struct TuiRunner {
    /// Application state
    app: App,
    /// Terminal handle
    terminal: Tui,
    /// Where results are copied (None = copying off or unavailable)
    clipboard: Option<Box<dyn Clipboard>>,
    /// Event handler
    event_handler: EventHandler,
}

impl TuiRunner {
    pub fn new(terminal: Tui, app: App, clipboard: Option<Box<dyn Clipboard>>) -> Self {
        Self {
            app,
            terminal,
            clipboard,
            event_handler: EventHandler::new(TICK_RATE),
        }
    }

    /// Run the TUI main loop
    pub fn run(&mut self) -> Result<()> {
        info!("TUI started");
        loop {
            self.terminal.draw(|frame| views::render(&self.app, frame))?;

            match self.event_handler.next()? {
                Event::Key(key) => {
                    if self.app.handle_key(key) {
                        break;
                    }
                }
                Event::Resize(width, height) => {
                    debug!(width, height, "TuiRunner::run: resize");
                }
                Event::Tick => {}
            }

            handle_pending_copy(
                &mut self.app,
                self.clipboard.as_mut().map(|c| &mut **c as &mut dyn Clipboard),
            );

            if self.app.state().should_quit {
                break;
            }
        }
        info!("TUI exited");
        Ok(())
    }
}

/// Copy a freshly generated result, if any, and report it in the status line
fn handle_pending_copy(app: &mut App, clipboard: Option<&mut dyn Clipboard>) {
    let Some(text) = app.state_mut().pending_copy.take() else {
        return;
    };
    if let Some(clipboard) = clipboard {
        let status = clipboard::copy(clipboard, &text);
        app.state_mut().set_status(status);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::clipboard::MemoryClipboard;
    use crate::session::Session;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn filled_app() -> App {
        let mut app = App::new(Session::new(Catalog::load().unwrap()).unwrap());
        for word in ["paw", "geese", "mother", "Spain", "wet", "end"] {
            for c in word.chars() {
                app.handle_key(KeyEvent::from(KeyCode::Char(c)));
            }
            app.handle_key(KeyEvent::from(KeyCode::Tab));
        }
        app.handle_key(KeyEvent::new(KeyCode::Char('g'), KeyModifiers::CONTROL));
        app
    }

    #[test]
    fn test_pending_copy_goes_to_clipboard() {
        let mut app = filled_app();
        let mut clipboard = MemoryClipboard::new();
        handle_pending_copy(&mut app, Some(&mut clipboard as &mut dyn Clipboard));

        let copied = clipboard.contents().unwrap();
        assert!(copied.starts_with("Be kind to your paw-footed geese."));
        assert!(app.state().pending_copy.is_none());
        assert_eq!(app.state().status_message.as_deref(), Some("Copied to memory"));
    }

    #[test]
    fn test_pending_copy_without_clipboard() {
        let mut app = filled_app();
        handle_pending_copy(&mut app, None);
        assert!(app.state().pending_copy.is_none());
        assert!(app.state().status_message.is_none());
    }
}
