//! TUI application - event handling and state management
//!
//! The App owns the Session and the AppState and turns key presses into
//! session actions. It does not do any rendering - that's delegated to
//! the views module.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use tracing::{debug, warn};

use super::state::{AppState, InteractionMode};
use crate::error::SessionError;
use crate::session::{Action, Outcome, Session};

/// TUI application
#[derive(Debug)]
pub struct App {
    /// Catalog and active instance
    session: Session,
    /// Presentation state
    state: AppState,
}

impl App {
    /// Create a new application instance
    pub fn new(session: Session) -> Self {
        Self {
            session,
            state: AppState::new(),
        }
    }

    /// Name blank fields in validation popups instead of the generic text
    pub fn with_named_missing_fields(mut self, named: bool) -> Self {
        self.state.name_missing_fields = named;
        self
    }

    /// Get reference to state
    pub fn state(&self) -> &AppState {
        &self.state
    }

    /// Get mutable reference to state
    pub fn state_mut(&mut self) -> &mut AppState {
        &mut self.state
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Handle a key event
    ///
    /// Returns true if the application should exit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        // Transient messages last until the next key press
        self.state.clear_error();
        self.state.status_message = None;

        if let (KeyCode::Char('c'), KeyModifiers::CONTROL) = (key.code, key.modifiers) {
            return true; // Force quit
        }

        match &self.state.interaction_mode {
            InteractionMode::Form => self.handle_form_key(key),
            InteractionMode::Result(_) | InteractionMode::Error(_) => self.handle_popup_key(key),
            InteractionMode::Help => self.handle_help_key(key),
        }
    }

    /// Handle key while typing in the form
    fn handle_form_key(&mut self, key: KeyEvent) -> bool {
        let field_count = self.session.template().marker_count();
        match (key.code, key.modifiers) {
            (KeyCode::Esc, _) => {
                self.state.should_quit = true;
            }
            (KeyCode::F(1), _) => {
                self.state.interaction_mode = InteractionMode::Help;
            }

            // === Template selection ===
            (KeyCode::Left, _) => self.cycle_template(false),
            (KeyCode::Right, _) => self.cycle_template(true),

            // === Field focus ===
            (KeyCode::Up, _) | (KeyCode::BackTab, _) => self.state.focus_prev(field_count),
            (KeyCode::Down, _) | (KeyCode::Tab, _) => self.state.focus_next(field_count),

            // === Actions ===
            (KeyCode::Char('g'), KeyModifiers::CONTROL) => self.generate(),
            (KeyCode::Char('x'), KeyModifiers::CONTROL) => self.clear(),
            (KeyCode::Enter, _) => {
                if self.state.focused_field >= field_count {
                    self.generate();
                } else {
                    self.state.focus_next(field_count);
                }
            }

            // === Editing ===
            (KeyCode::Backspace, _) => self.edit_focused(|text| {
                text.pop();
            }),
            (KeyCode::Char(c), modifiers) if !modifiers.contains(KeyModifiers::CONTROL) => {
                self.edit_focused(|text| text.push(c))
            }
            _ => {}
        }

        false
    }

    /// Handle key while the result or error popup is shown
    fn handle_popup_key(&mut self, key: KeyEvent) -> bool {
        if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
            self.state.interaction_mode = InteractionMode::Form;
        }
        false
    }

    /// Handle key in help overlay
    fn handle_help_key(&mut self, key: KeyEvent) -> bool {
        if matches!(key.code, KeyCode::F(1) | KeyCode::Esc | KeyCode::Enter) {
            self.state.interaction_mode = InteractionMode::Form;
        }
        false
    }

    /// Select the next or previous template, wrapping around
    fn cycle_template(&mut self, forward: bool) {
        let count = self.session.catalog().len();
        let current = self.session.selected();
        let next = if forward {
            (current + 1) % count
        } else {
            (current + count - 1) % count
        };
        debug!(current, next, "App::cycle_template: called");
        self.dispatch(Action::Select(next));
        self.state.reset_focus();
    }

    /// Apply `f` to the focused field's text
    fn edit_focused(&mut self, f: impl FnOnce(&mut String)) {
        let field = self.state.focused_field;
        let Some(current) = self.session.instance().value(field) else {
            return;
        };
        let mut text = current.to_string();
        f(&mut text);
        self.dispatch(Action::Edit { field, text });
    }

    /// Generate the text, or show why not
    fn generate(&mut self) {
        if let Some(Outcome::Generated(text)) = self.dispatch(Action::Generate) {
            self.state.pending_copy = Some(text.clone());
            self.state.interaction_mode = InteractionMode::Result(text);
            self.state.reset_focus();
        }
    }

    /// Blank every field
    fn clear(&mut self) {
        if self.dispatch(Action::Clear).is_some() {
            self.state.reset_focus();
            self.state.set_status("Cleared");
        }
    }

    /// Dispatch an action, routing failures to the right popup or message
    fn dispatch(&mut self, action: Action) -> Option<Outcome> {
        match self.session.dispatch(action) {
            Ok(outcome) => Some(outcome),
            Err(SessionError::Validation(err)) => {
                let msg = err.message(self.session.template(), self.state.name_missing_fields);
                self.state.interaction_mode = InteractionMode::Error(msg);
                None
            }
            Err(e) => {
                warn!("Action failed: {}", e);
                self.state.set_error(e.to_string());
                None
            }
        }
    }
}
