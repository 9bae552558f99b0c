//! Error types for the template model

use std::path::PathBuf;

use thiserror::Error;

use crate::template::Template;

/// Errors raised while loading or checking the template catalog
///
/// Any of these at startup means the template data itself is broken.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse template {name}: {source}")]
    Parse {
        name: String,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Failed to read template {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Template {name} has an empty title")]
    EmptyTitle { name: String },

    #[error("Template '{title}' has an empty label for placeholder {index}")]
    EmptyLabel { title: String, index: usize },

    #[error("Template '{title}' uses marker [{index}] but has only {count} placeholders")]
    MissingPlaceholder { title: String, index: usize, count: usize },

    #[error("Template '{title}' never uses placeholder {index} ({label})")]
    UnusedPlaceholder { title: String, index: usize, label: String },

    #[error("Template '{title}' introduces marker [{found}] before [{expected}]")]
    OutOfOrder { title: String, found: usize, expected: usize },

    #[error("Duplicate template title '{title}'")]
    DuplicateTitle { title: String },

    #[error("Template catalog is empty")]
    Empty,
}

/// A field index outside the template's placeholders
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Field {index} is out of range (template has {count} fields)")]
    OutOfRange { index: usize, count: usize },
}

/// One or more fields are blank after trimming
///
/// The message is the generic "fill in all fields" text; the blank
/// indices are kept for front ends that want to name them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Please fill in all fields.")]
pub struct ValidationError {
    missing: Vec<usize>,
}

impl ValidationError {
    pub(crate) fn new(missing: Vec<usize>) -> Self {
        Self { missing }
    }

    /// 1-based indices of the blank fields, ascending
    pub fn missing(&self) -> &[usize] {
        &self.missing
    }

    /// Message naming each blank field by its label
    pub fn describe(&self, template: &Template) -> String {
        let names: Vec<String> = self
            .missing
            .iter()
            .map(|&index| match template.label(index) {
                Some(label) => format!("{} ({})", label, index),
                None => format!("field {}", index),
            })
            .collect();
        format!("Please fill in: {}.", names.join(", "))
    }

    /// The generic message, or the detailed one when `named`
    pub fn message(&self, template: &Template, named: bool) -> String {
        if named {
            self.describe(template)
        } else {
            self.to_string()
        }
    }
}

/// Errors from dispatching an action to a session
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No template {index} (catalog has {count})")]
    NoSuchTemplate { index: usize, count: usize },

    #[error("No template matches '{selector}'")]
    UnknownTemplate { selector: String },

    #[error("Cannot start a session with an empty catalog")]
    EmptyCatalog,

    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl SessionError {
    /// Check if the user can fix this by filling in fields and retrying
    pub fn is_validation(&self) -> bool {
        matches!(self, SessionError::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn template() -> Template {
        Template::new("Be Kind", "Be kind to your [1]-footed [2].", ["NOUN", "NOUN (plural)"])
    }

    #[test]
    fn test_validation_error_generic_message() {
        let err = ValidationError::new(vec![1, 2]);
        assert_eq!(err.to_string(), "Please fill in all fields.");
        assert_eq!(err.missing(), &[1, 2]);
    }

    #[test]
    fn test_validation_error_describe() {
        let err = ValidationError::new(vec![2]);
        assert_eq!(err.describe(&template()), "Please fill in: NOUN (plural) (2).");
        assert_eq!(err.message(&template(), true), err.describe(&template()));
        assert_eq!(err.message(&template(), false), "Please fill in all fields.");
    }

    #[test]
    fn test_session_error_is_validation() {
        let err: SessionError = ValidationError::new(vec![1]).into();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Please fill in all fields.");

        let err: SessionError = FieldError::OutOfRange { index: 9, count: 2 }.into();
        assert!(!err.is_validation());
    }
}
