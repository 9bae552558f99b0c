//! Template Instance
//!
//! Collects one value per placeholder of a single template and produces
//! the substituted text. Whitespace is trimmed at generation time, not
//! when values are set.

use std::sync::Arc;

use tracing::{debug, info};

use crate::error::{FieldError, ValidationError};
use crate::template::Template;

/// Mutable form state for one template
#[derive(Debug, Clone)]
pub struct Instance {
    template: Arc<Template>,
    values: Vec<String>,
}

impl Instance {
    /// Create an empty instance bound to `template`
    pub fn new(template: Arc<Template>) -> Self {
        debug!(title = %template.title(), "Instance::new: called");
        let values = vec![String::new(); template.marker_count()];
        Self { template, values }
    }

    pub fn template(&self) -> &Arc<Template> {
        &self.template
    }

    /// Record or overwrite the value for 1-based placeholder `index`
    pub fn set_value(&mut self, index: usize, text: impl Into<String>) -> Result<(), FieldError> {
        let count = self.values.len();
        let slot = index
            .checked_sub(1)
            .and_then(|i| self.values.get_mut(i))
            .ok_or(FieldError::OutOfRange { index, count })?;
        *slot = text.into();
        Ok(())
    }

    /// Current value for 1-based placeholder `index`
    pub fn value(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.values.get(i))
            .map(String::as_str)
    }

    /// All current values in placeholder order
    pub fn values(&self) -> &[String] {
        &self.values
    }

    /// True if every value is blank after trimming
    pub fn is_empty(&self) -> bool {
        self.values.iter().all(|v| v.trim().is_empty())
    }

    /// 1-based indices of values that are blank after trimming
    pub fn missing(&self) -> Vec<usize> {
        self.values
            .iter()
            .enumerate()
            .filter(|(_, v)| v.trim().is_empty())
            .map(|(i, _)| i + 1)
            .collect()
    }

    /// Reset every value to empty
    pub fn clear_all(&mut self) {
        debug!("Instance::clear_all: called");
        self.values.iter_mut().for_each(String::clear);
    }

    /// Substitute the trimmed values into the template body
    ///
    /// Fails without touching any value if a field is blank. On success
    /// the values are cleared, ready for the next entry.
    pub fn generate(&mut self) -> Result<String, ValidationError> {
        debug!(title = %self.template.title(), "Instance::generate: called");
        let missing = self.missing();
        if !missing.is_empty() {
            debug!(?missing, "Instance::generate: blank fields");
            return Err(ValidationError::new(missing));
        }

        let trimmed: Vec<&str> = self.values.iter().map(|v| v.trim()).collect();
        let result = self.template.render(&trimmed);
        info!("Generated text for '{}' ({} bytes)", self.template.title(), result.len());

        self.clear_all();
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn ducks() -> Instance {
        Instance::new(Arc::new(Template::new(
            "Be Kind",
            "Be kind to your [1]-footed [2].",
            ["NOUN", "NOUN (plural)"],
        )))
    }

    #[test]
    fn test_new_is_empty() {
        let inst = ducks();
        assert!(inst.is_empty());
        assert_eq!(inst.values(), &["", ""]);
    }

    #[test]
    fn test_generate_scenario() {
        let mut inst = ducks();
        inst.set_value(1, "three").unwrap();
        inst.set_value(2, "ducks").unwrap();
        assert_eq!(inst.generate().unwrap(), "Be kind to your three-footed ducks.");
    }

    #[test]
    fn test_generate_whitespace_field_fails() {
        let mut inst = ducks();
        inst.set_value(1, "  ").unwrap();
        inst.set_value(2, "ducks").unwrap();
        let err = inst.generate().unwrap_err();
        assert_eq!(err.missing(), &[1]);
        // Form state is left for the user to fix
        assert_eq!(inst.value(1), Some("  "));
        assert_eq!(inst.value(2), Some("ducks"));
    }

    #[test]
    fn test_generate_all_blank_fails() {
        let mut inst = ducks();
        let err = inst.generate().unwrap_err();
        assert_eq!(err.missing(), &[1, 2]);
        assert!(!err.to_string().contains("footed"));
    }

    #[test]
    fn test_generate_trims_values() {
        let mut inst = ducks();
        inst.set_value(1, "  three\t").unwrap();
        inst.set_value(2, "\nducks ").unwrap();
        assert_eq!(inst.generate().unwrap(), "Be kind to your three-footed ducks.");
    }

    #[test]
    fn test_generate_resets_values() {
        let mut inst = ducks();
        inst.set_value(1, "three").unwrap();
        inst.set_value(2, "ducks").unwrap();
        inst.generate().unwrap();
        assert!(inst.is_empty());
        assert!(inst.generate().is_err());
    }

    #[test]
    fn test_clear_all_then_generate_fails() {
        let mut inst = ducks();
        inst.set_value(1, "three").unwrap();
        inst.set_value(2, "ducks").unwrap();
        inst.clear_all();
        inst.clear_all();
        assert!(inst.generate().is_err());
    }

    #[test]
    fn test_set_value_overwrites() {
        let mut inst = ducks();
        inst.set_value(1, "one").unwrap();
        inst.set_value(1, "two").unwrap();
        assert_eq!(inst.value(1), Some("two"));
    }

    #[test]
    fn test_set_value_out_of_range() {
        let mut inst = ducks();
        assert_eq!(
            inst.set_value(0, "x"),
            Err(FieldError::OutOfRange { index: 0, count: 2 })
        );
        assert_eq!(
            inst.set_value(3, "x"),
            Err(FieldError::OutOfRange { index: 3, count: 2 })
        );
    }

    #[test]
    fn test_marker_text_in_value_is_verbatim() {
        let mut inst = ducks();
        inst.set_value(1, "[2]").unwrap();
        inst.set_value(2, "[1]").unwrap();
        assert_eq!(inst.generate().unwrap(), "Be kind to your [2]-footed [1].");
    }

    proptest! {
        #[test]
        fn prop_values_substituted_exactly(a in "[a-z]{1,8}", b in "[A-Z]{1,8}") {
            let template = Arc::new(Template::new("t", "[1] x [2] y [1]", ["A", "B"]));
            let mut inst = Instance::new(template);
            inst.set_value(1, a.clone()).unwrap();
            inst.set_value(2, b.clone()).unwrap();
            let out = inst.generate().unwrap();
            prop_assert_eq!(out, format!("{a} x {b} y {a}"));
        }

        #[test]
        fn prop_bracketed_values_survive(k in 1usize..20, pad in " {0,3}") {
            let template = Arc::new(Template::new("t", "<[1]|[2]>", ["A", "B"]));
            let mut inst = Instance::new(template);
            let injected = format!("{pad}[{k}]{pad}");
            inst.set_value(1, injected).unwrap();
            inst.set_value(2, "v").unwrap();
            prop_assert_eq!(inst.generate().unwrap(), format!("<[{k}]|v>"));
        }

        #[test]
        fn prop_blank_values_rejected(ws in "[ \t\n]{0,4}") {
            let template = Arc::new(Template::new("t", "[1]", ["A"]));
            let mut inst = Instance::new(template);
            inst.set_value(1, ws).unwrap();
            prop_assert!(inst.generate().is_err());
        }
    }
}
