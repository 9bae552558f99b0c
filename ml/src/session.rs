//! Session - explicit command dispatch over the active template
//!
//! A front end owns exactly one Session and passes it to every handler.
//! Each user gesture becomes an [`Action`] dispatched here.

use std::sync::Arc;

use tracing::debug;

use crate::catalog::Catalog;
use crate::error::SessionError;
use crate::instance::Instance;
use crate::template::Template;

/// A user action against the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Switch to the template at this 0-based catalog position
    Select(usize),
    /// Set the 1-based field to this text
    Edit { field: usize, text: String },
    /// Substitute the current values
    Generate,
    /// Blank every field
    Clear,
}

/// Result of a successful dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Selected(usize),
    Edited(usize),
    Generated(String),
    Cleared,
}

/// The catalog plus the single active instance
#[derive(Debug)]
pub struct Session {
    catalog: Catalog,
    selected: usize,
    instance: Instance,
}

impl Session {
    /// Start a session on the first template of `catalog`
    pub fn new(catalog: Catalog) -> Result<Self, SessionError> {
        debug!(templates = catalog.len(), "Session::new: called");
        let first = catalog.get(0).cloned().ok_or(SessionError::EmptyCatalog)?;
        Ok(Self {
            catalog,
            selected: 0,
            instance: Instance::new(first),
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// 0-based position of the active template
    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn template(&self) -> &Arc<Template> {
        self.instance.template()
    }

    pub fn instance(&self) -> &Instance {
        &self.instance
    }

    /// Apply one action
    pub fn dispatch(&mut self, action: Action) -> Result<Outcome, SessionError> {
        debug!(?action, "Session::dispatch: called");
        match action {
            Action::Select(index) => {
                let template = self.catalog.get(index).cloned().ok_or(SessionError::NoSuchTemplate {
                    index,
                    count: self.catalog.len(),
                })?;
                self.selected = index;
                self.instance = Instance::new(template);
                Ok(Outcome::Selected(index))
            }
            Action::Edit { field, text } => {
                self.instance.set_value(field, text)?;
                Ok(Outcome::Edited(field))
            }
            Action::Generate => Ok(Outcome::Generated(self.instance.generate()?)),
            Action::Clear => {
                self.instance.clear_all();
                Ok(Outcome::Cleared)
            }
        }
    }

    /// Select by catalog selector (number, title or slug)
    pub fn select(&mut self, selector: &str) -> Result<usize, SessionError> {
        let index = self.catalog.find(selector).ok_or(SessionError::UnknownTemplate {
            selector: selector.to_string(),
        })?;
        self.dispatch(Action::Select(index))?;
        Ok(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session() -> Session {
        Session::new(Catalog::load().unwrap()).unwrap()
    }

    fn edit(field: usize, text: &str) -> Action {
        Action::Edit {
            field,
            text: text.to_string(),
        }
    }

    #[test]
    fn test_new_selects_first() {
        let s = session();
        assert_eq!(s.selected(), 0);
        assert_eq!(s.template().title(), "Be Kind");
        assert!(s.instance().is_empty());
    }

    #[test]
    fn test_select_replaces_instance() {
        let mut s = session();
        s.dispatch(edit(1, "three")).unwrap();
        assert_eq!(s.dispatch(Action::Select(2)).unwrap(), Outcome::Selected(2));
        assert_eq!(s.template().title(), "Romeo and Juliet");
        assert_eq!(s.instance().values().len(), 11);
        assert!(s.instance().is_empty());
    }

    #[test]
    fn test_reselect_resets() {
        let mut s = session();
        s.dispatch(edit(1, "three")).unwrap();
        s.dispatch(Action::Select(0)).unwrap();
        assert!(s.instance().is_empty());
    }

    #[test]
    fn test_select_out_of_range() {
        let mut s = session();
        let err = s.dispatch(Action::Select(3)).unwrap_err();
        assert!(matches!(err, SessionError::NoSuchTemplate { index: 3, count: 3 }));
        assert_eq!(s.selected(), 0);
    }

    #[test]
    fn test_select_by_selector() {
        let mut s = session();
        assert_eq!(s.select("letter-from-camp").unwrap(), 1);
        assert_eq!(s.select("3").unwrap(), 2);
        assert!(matches!(s.select("hamlet"), Err(SessionError::UnknownTemplate { .. })));
    }

    #[test]
    fn test_generate_full_be_kind() {
        let mut s = session();
        for (i, word) in ["paw", "geese", "mother", "Spain", "wet", "end"].iter().enumerate() {
            s.dispatch(edit(i + 1, word)).unwrap();
        }
        let Outcome::Generated(text) = s.dispatch(Action::Generate).unwrap() else {
            panic!("expected generated text");
        };
        assert!(text.starts_with("Be kind to your paw-footed geese."));
        assert_eq!(text.matches("geese").count(), 2);
        assert!(!text.contains('['));
        assert!(s.instance().is_empty());
    }

    #[test]
    fn test_generate_validation_keeps_state() {
        let mut s = session();
        s.dispatch(edit(1, "paw")).unwrap();
        let err = s.dispatch(Action::Generate).unwrap_err();
        assert!(err.is_validation());
        assert_eq!(s.instance().value(1), Some("paw"));
    }

    #[test]
    fn test_edit_out_of_range() {
        let mut s = session();
        assert!(matches!(s.dispatch(edit(7, "x")), Err(SessionError::Field(_))));
    }

    #[test]
    fn test_clear() {
        let mut s = session();
        s.dispatch(edit(1, "paw")).unwrap();
        assert_eq!(s.dispatch(Action::Clear).unwrap(), Outcome::Cleared);
        assert!(s.dispatch(Action::Generate).is_err());
    }
}
