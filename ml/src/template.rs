//! Templates and marker substitution
//!
//! A template body contains positional markers `[1]`, `[2]`, ... `[N]`.
//! A marker is `[`, a decimal number without sign or leading zero, and `]`.
//! Anything else in brackets (`[0]`, `[01]`, `[x]`) is plain text.

use serde::Deserialize;
use tracing::debug;

use crate::error::CatalogError;

/// A fixed story template with numbered blanks
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Template {
    title: String,
    body: String,
    placeholders: Vec<String>,
}

impl Template {
    /// Create a template from its parts (not validated, see [`Template::validate`])
    pub fn new<L>(title: impl Into<String>, body: impl Into<String>, placeholders: L) -> Self
    where
        L: IntoIterator,
        L::Item: Into<String>,
    {
        Self {
            title: title.into(),
            body: body.into(),
            placeholders: placeholders.into_iter().map(Into::into).collect(),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    /// Placeholder labels in marker order
    pub fn placeholders(&self) -> &[String] {
        &self.placeholders
    }

    /// Number of distinct markers (and placeholders)
    pub fn marker_count(&self) -> usize {
        self.placeholders.len()
    }

    /// Label for the 1-based marker `index`
    pub fn label(&self, index: usize) -> Option<&str> {
        index
            .checked_sub(1)
            .and_then(|i| self.placeholders.get(i))
            .map(String::as_str)
    }

    /// Form prompt for the 1-based marker `index`, e.g. "Enter a NOUN:"
    pub fn prompt(&self, index: usize) -> Option<String> {
        self.label(index).map(|label| format!("Enter a {}:", label))
    }

    /// Lowercase title with every run of non-alphanumerics collapsed to `-`
    pub fn slug(&self) -> String {
        let mut slug = String::with_capacity(self.title.len());
        for c in self.title.chars() {
            if c.is_alphanumeric() {
                slug.extend(c.to_lowercase());
            } else if !slug.is_empty() && !slug.ends_with('-') {
                slug.push('-');
            }
        }
        while slug.ends_with('-') {
            slug.pop();
        }
        slug
    }

    /// How many times marker `index` occurs in the body
    pub fn occurrences(&self, index: usize) -> usize {
        markers(&self.body).filter(|m| m.index == index).count()
    }

    /// Check that markers and placeholders agree
    ///
    /// Every marker must have a label, every label must be used, and the
    /// first occurrence of each marker must come in order `[1]`, `[2]`, ...
    /// `source` names where the template came from, for error messages.
    pub fn validate(&self, source: &str) -> Result<(), CatalogError> {
        debug!(%source, title = %self.title, "Template::validate: called");
        if self.title.trim().is_empty() {
            return Err(CatalogError::EmptyTitle {
                name: source.to_string(),
            });
        }

        if let Some(i) = self.placeholders.iter().position(|l| l.trim().is_empty()) {
            return Err(CatalogError::EmptyLabel {
                title: self.title.clone(),
                index: i + 1,
            });
        }

        let count = self.placeholders.len();
        let mut expected = 1;
        for marker in markers(&self.body) {
            if marker.index > count {
                return Err(CatalogError::MissingPlaceholder {
                    title: self.title.clone(),
                    index: marker.index,
                    count,
                });
            }
            if marker.index == expected {
                expected += 1;
            } else if marker.index > expected {
                return Err(CatalogError::OutOfOrder {
                    title: self.title.clone(),
                    found: marker.index,
                    expected,
                });
            }
        }

        if expected <= count {
            return Err(CatalogError::UnusedPlaceholder {
                title: self.title.clone(),
                index: expected,
                label: self.placeholders[expected - 1].clone(),
            });
        }

        Ok(())
    }

    /// Replace every marker `[i]` with `values[i - 1]` in a single pass
    ///
    /// Replacement text is copied as-is and never scanned for markers.
    /// Markers without a matching value are left in place.
    pub fn render<S: AsRef<str>>(&self, values: &[S]) -> String {
        let mut out = String::with_capacity(self.body.len());
        let mut last = 0;
        for marker in markers(&self.body) {
            if let Some(value) = marker.index.checked_sub(1).and_then(|i| values.get(i)) {
                out.push_str(&self.body[last..marker.start]);
                out.push_str(value.as_ref());
                last = marker.end;
            }
        }
        out.push_str(&self.body[last..]);
        out
    }
}

/// A marker occurrence: its 1-based index and byte span in the body
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Marker {
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

/// Iterate over the markers of `body`, left to right
pub fn markers(body: &str) -> Markers<'_> {
    Markers { body, pos: 0 }
}

/// Iterator returned by [`markers`]
#[derive(Debug, Clone)]
pub struct Markers<'a> {
    body: &'a str,
    pos: usize,
}

impl Iterator for Markers<'_> {
    type Item = Marker;

    fn next(&mut self) -> Option<Marker> {
        let bytes = self.body.as_bytes();
        while let Some(offset) = bytes[self.pos..].iter().position(|&b| b == b'[') {
            let start = self.pos + offset;
            match parse_marker(&bytes[start..]) {
                Some((index, len)) => {
                    self.pos = start + len;
                    return Some(Marker {
                        index,
                        start,
                        end: start + len,
                    });
                }
                None => self.pos = start + 1,
            }
        }
        self.pos = bytes.len();
        None
    }
}

/// Parse a marker at the start of `bytes` (which begins with `[`)
///
/// Returns the marker index and its length in bytes.
fn parse_marker(bytes: &[u8]) -> Option<(usize, usize)> {
    let digits = bytes[1..].iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 || bytes[1] == b'0' || bytes.get(1 + digits) != Some(&b']') {
        return None;
    }
    // ASCII digits are valid UTF-8; overflow means "not a marker"
    let index = std::str::from_utf8(&bytes[1..1 + digits]).ok()?.parse().ok()?;
    Some((index, digits + 2))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ducks() -> Template {
        Template::new("Be Kind", "Be kind to your [1]-footed [2].", ["NOUN", "NOUN (plural)"])
    }

    #[test]
    fn test_markers_basic() {
        let found: Vec<usize> = markers("a [1] b [2] c [1]").map(|m| m.index).collect();
        assert_eq!(found, vec![1, 2, 1]);
    }

    #[test]
    fn test_markers_spans() {
        let m: Vec<Marker> = markers("x[12]y").collect();
        assert_eq!(m, vec![Marker { index: 12, start: 1, end: 5 }]);
    }

    #[test]
    fn test_markers_ignore_non_markers() {
        let found: Vec<usize> = markers("[0] [01] [x] [] [3 [[4]] [5").map(|m| m.index).collect();
        assert_eq!(found, vec![4]);
    }

    #[test]
    fn test_markers_overflow_is_text() {
        assert_eq!(markers("[99999999999999999999999999]").count(), 0);
    }

    #[test]
    fn test_markers_multibyte_text() {
        let found: Vec<usize> = markers("café [1] naïve [2]").map(|m| m.index).collect();
        assert_eq!(found, vec![1, 2]);
    }

    #[test]
    fn test_render_scenario() {
        assert_eq!(ducks().render(&["three", "ducks"]), "Be kind to your three-footed ducks.");
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        let rendered = ducks().render(&["[2]", "ducks"]);
        assert_eq!(rendered, "Be kind to your [2]-footed ducks.");
    }

    #[test]
    fn test_render_repeated_marker() {
        let t = Template::new("t", "[1] and [1] and [2]", ["A", "B"]);
        assert_eq!(t.render(&["x", "y"]), "x and x and y");
    }

    #[test]
    fn test_render_leaves_body_untouched() {
        let t = ducks();
        let _ = t.render(&["three", "ducks"]);
        assert_eq!(t.body(), "Be kind to your [1]-footed [2].");
    }

    #[test]
    fn test_label_and_prompt() {
        let t = ducks();
        assert_eq!(t.label(1), Some("NOUN"));
        assert_eq!(t.label(0), None);
        assert_eq!(t.label(3), None);
        assert_eq!(t.prompt(2).as_deref(), Some("Enter a NOUN (plural):"));
    }

    #[test]
    fn test_slug() {
        assert_eq!(ducks().slug(), "be-kind");
        let t = Template::new("  Romeo and Juliet!! ", "", Vec::<String>::new());
        assert_eq!(t.slug(), "romeo-and-juliet");
    }

    #[test]
    fn test_occurrences() {
        let t = Template::new("t", "[1] [2] [1]", ["A", "B"]);
        assert_eq!(t.occurrences(1), 2);
        assert_eq!(t.occurrences(2), 1);
        assert_eq!(t.occurrences(3), 0);
    }

    #[test]
    fn test_validate_ok() {
        assert!(ducks().validate("test").is_ok());
    }

    #[test]
    fn test_validate_missing_placeholder() {
        let t = Template::new("t", "[1] [2] [3]", ["A", "B"]);
        assert!(matches!(
            t.validate("test"),
            Err(CatalogError::MissingPlaceholder { index: 3, count: 2, .. })
        ));
    }

    #[test]
    fn test_validate_unused_placeholder() {
        let t = Template::new("t", "[1]", ["A", "B"]);
        assert!(matches!(
            t.validate("test"),
            Err(CatalogError::UnusedPlaceholder { index: 2, .. })
        ));
    }

    #[test]
    fn test_validate_gap() {
        let t = Template::new("t", "[1] [3]", ["A", "B", "C"]);
        assert!(matches!(
            t.validate("test"),
            Err(CatalogError::OutOfOrder { found: 3, expected: 2, .. })
        ));
    }

    #[test]
    fn test_validate_empty_title_and_label() {
        let t = Template::new(" ", "[1]", ["A"]);
        assert!(matches!(t.validate("x.yml"), Err(CatalogError::EmptyTitle { .. })));

        let t = Template::new("t", "[1]", [""]);
        assert!(matches!(t.validate("x.yml"), Err(CatalogError::EmptyLabel { index: 1, .. })));
    }

    #[test]
    fn test_deserialize_yaml() {
        let yaml = "title: T\nbody: Hello [1]\nplaceholders:\n  - NAME\n";
        let t: Template = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(t.title(), "T");
        assert_eq!(t.marker_count(), 1);
        assert!(t.validate("inline").is_ok());
    }
}
