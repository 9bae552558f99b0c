//! TUI application state
//!
//! Pure data for the form screen. No rendering logic here, and no field
//! values either: those live in the Session's instance.

use tracing::debug;

/// Interaction mode (modal)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum InteractionMode {
    /// Typing into the form
    #[default]
    Form,
    /// Generated text popup ("Your Madlib")
    Result(String),
    /// Validation failure popup
    Error(String),
    /// Help overlay
    Help,
}

impl InteractionMode {
    /// Check if a popup or overlay covers the form
    pub fn is_modal(&self) -> bool {
        !matches!(self, Self::Form)
    }
}

/// Presentation state of the TUI
#[derive(Debug, Default)]
pub struct AppState {
    /// Current interaction mode
    pub interaction_mode: InteractionMode,
    /// 1-based field with keyboard focus
    pub focused_field: usize,
    /// Transient one-line status (e.g. clipboard result)
    pub status_message: Option<String>,
    /// Transient error not tied to validation
    pub error_message: Option<String>,
    /// Result waiting to be copied by the runner
    pub pending_copy: Option<String>,
    /// Name blank fields in validation popups
    pub name_missing_fields: bool,
    /// Exit the event loop after this event
    pub should_quit: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            focused_field: 1,
            ..Default::default()
        }
    }

    /// Move focus to the next field, wrapping around
    pub fn focus_next(&mut self, field_count: usize) {
        if field_count == 0 {
            return;
        }
        self.focused_field = self.focused_field % field_count + 1;
    }

    /// Move focus to the previous field, wrapping around
    pub fn focus_prev(&mut self, field_count: usize) {
        if field_count == 0 {
            return;
        }
        self.focused_field = if self.focused_field <= 1 {
            field_count
        } else {
            self.focused_field - 1
        };
    }

    /// Focus the first field
    pub fn reset_focus(&mut self) {
        self.focused_field = 1;
    }

    /// Set a status message
    pub fn set_status(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!(%msg, "AppState::set_status: called");
        self.status_message = Some(msg);
    }

    /// Set an error message
    pub fn set_error(&mut self, msg: impl Into<String>) {
        let msg = msg.into();
        debug!(%msg, "AppState::set_error: called");
        self.error_message = Some(msg);
    }

    /// Clear error message
    pub fn clear_error(&mut self) {
        self.error_message = None;
    }
}
