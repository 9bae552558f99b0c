//! Madlibs - fill-in-the-blanks story templates
//!
//! A template is a body with numbered markers (`[1]`, `[2]`, ...) and one
//! label per marker ("NOUN", "PLACE"). The user supplies a word per label
//! and gets the story back with every marker replaced.
//!
//! # Modules
//!
//! - [`template`] - Template values, marker scanning and substitution
//! - [`catalog`] - The fixed, ordered set of built-in (and user) templates
//! - [`instance`] - Per-template form values, validation and generation
//! - [`session`] - Action dispatch over the catalog and active instance
//! - [`tui`] - Full-screen form
//! - [`console`] - Line-oriented front end
//! - [`config`] - Configuration types and loading
//! - [`cli`] - Command-line interface
//!
//! # Example
//!
//! ```
//! use madlibs::{Action, Catalog, Outcome, Session};
//!
//! let mut session = Session::new(Catalog::load()?)?;
//! for (field, word) in ["paw", "geese", "mother", "Spain", "wet", "end"].iter().enumerate() {
//!     session.dispatch(Action::Edit { field: field + 1, text: word.to_string() })?;
//! }
//! let Outcome::Generated(text) = session.dispatch(Action::Generate)? else { unreachable!() };
//! assert!(text.starts_with("Be kind to your paw-footed geese."));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod catalog;
pub mod cli;
pub mod clipboard;
pub mod config;
pub mod console;
pub mod error;
pub mod instance;
pub mod session;
pub mod template;
pub mod tui;

// Re-export commonly used types
pub use catalog::Catalog;
pub use clipboard::{Clipboard, MemoryClipboard, SystemClipboard};
pub use config::Config;
pub use error::{CatalogError, FieldError, SessionError, ValidationError};
pub use instance::Instance;
pub use session::{Action, Outcome, Session};
pub use template::{Marker, Template, markers};
