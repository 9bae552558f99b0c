//! Clipboard access
//!
//! Front ends copy every generated result through this trait; tests
//! swap in an in-memory sink.

use std::time::Duration;
#[cfg(target_os = "linux")]
use std::time::Instant;

use eyre::{Result, eyre};
use tracing::debug;

/// Somewhere generated text can be copied to
pub trait Clipboard {
    /// Replace the clipboard contents with `text`
    fn set_text(&mut self, text: &str) -> Result<()>;

    /// Short name for status messages
    fn name(&self) -> &'static str;
}

/// The system clipboard
///
/// On X11 the contents are only served while the owning handle exists,
/// so the TUI keeps one open for the whole run. One-shot commands exit
/// right after copying and use [`SystemClipboard::holding`] instead.
pub struct SystemClipboard {
    inner: arboard::Clipboard,
    #[cfg_attr(not(target_os = "linux"), allow(dead_code))]
    hold: Option<Duration>,
}

impl SystemClipboard {
    pub fn new() -> Result<Self> {
        debug!("SystemClipboard::new: called");
        let inner = arboard::Clipboard::new().map_err(|e| eyre!("Failed to open system clipboard: {}", e))?;
        Ok(Self { inner, hold: None })
    }

    /// A clipboard whose `set_text` blocks until another program takes
    /// the selection or `hold` elapses (Linux only)
    pub fn holding(hold: Duration) -> Result<Self> {
        debug!(?hold, "SystemClipboard::holding: called");
        let mut clipboard = Self::new()?;
        clipboard.hold = Some(hold);
        Ok(clipboard)
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        debug!(len = text.len(), "SystemClipboard::set_text: called");
        #[cfg(target_os = "linux")]
        if let Some(hold) = self.hold {
            use arboard::SetExtLinux;
            return self
                .inner
                .set()
                .wait_until(Instant::now() + hold)
                .text(text)
                .map_err(|e| eyre!("Failed to copy to clipboard: {}", e));
        }
        self.inner
            .set_text(text)
            .map_err(|e| eyre!("Failed to copy to clipboard: {}", e))
    }

    fn name(&self) -> &'static str {
        "system clipboard"
    }
}

/// In-memory clipboard, holds the last copied text
#[derive(Debug, Default)]
pub struct MemoryClipboard {
    contents: Option<String>,
}

impl MemoryClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contents(&self) -> Option<&str> {
        self.contents.as_deref()
    }
}

impl Clipboard for MemoryClipboard {
    fn set_text(&mut self, text: &str) -> Result<()> {
        self.contents = Some(text.to_string());
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}

/// How long a one-shot command keeps serving its copy
pub const ONE_SHOT_HOLD: Duration = Duration::from_secs(30);

/// Open the system clipboard when `enabled`
///
/// Returns None when copying is disabled or no clipboard is available
/// (headless session, no display); neither is fatal.
pub fn open(enabled: bool) -> Option<Box<dyn Clipboard>> {
    debug!(%enabled, "clipboard::open: called");
    open_with(enabled, SystemClipboard::new)
}

/// Like [`open`], for a process that exits right after copying
pub fn open_one_shot(enabled: bool) -> Option<Box<dyn Clipboard>> {
    debug!(%enabled, "clipboard::open_one_shot: called");
    open_with(enabled, || SystemClipboard::holding(ONE_SHOT_HOLD))
}

fn open_with(enabled: bool, connect: impl FnOnce() -> Result<SystemClipboard>) -> Option<Box<dyn Clipboard>> {
    if !enabled {
        return None;
    }
    match connect() {
        Ok(clipboard) => Some(Box::new(clipboard)),
        Err(e) => {
            tracing::warn!("{}; results will not be copied", e);
            None
        }
    }
}

/// Copy `text`, returning a one-line status for the user
pub fn copy(clipboard: &mut dyn Clipboard, text: &str) -> String {
    match clipboard.set_text(text) {
        Ok(()) => format!("Copied to {}", clipboard.name()),
        Err(e) => {
            tracing::warn!("{}", e);
            e.to_string()
        }
    }
}
