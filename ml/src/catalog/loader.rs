//! Catalog Loader
//!
//! Parses embedded templates and optional user template files.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info};

use super::embedded;
use crate::error::CatalogError;
use crate::template::Template;

/// Ordered, read-only collection of templates
#[derive(Debug, Clone)]
pub struct Catalog {
    templates: Vec<Arc<Template>>,
}

impl Catalog {
    /// Load the built-in templates in their fixed order
    pub fn load() -> Result<Self, CatalogError> {
        debug!("Catalog::load: called");
        let templates = embedded::BUILTIN
            .iter()
            .map(|(name, yaml)| parse_template(name, yaml))
            .collect::<Result<Vec<_>, _>>()?;
        Self::from_templates(templates)
    }

    /// Load the built-ins followed by every template file in `dir`
    ///
    /// A missing directory adds nothing.
    pub fn with_user_templates(dir: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let dir = dir.as_ref();
        debug!(?dir, "Catalog::with_user_templates: called");
        let builtin = Self::load()?;
        if !dir.is_dir() {
            debug!(?dir, "Catalog::with_user_templates: no user templates directory");
            return Ok(builtin);
        }

        let mut user = Vec::new();
        for path in template_files(dir)? {
            let yaml = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
            user.push(parse_template(&path.display().to_string(), &yaml)?);
        }
        info!("Loaded {} user templates from {}", user.len(), dir.display());

        let mut all: Vec<Template> = builtin.iter().map(|t| Template::clone(t)).collect();
        all.extend(user);
        Self::from_templates(all)
    }

    /// Build a catalog from templates in the given order
    ///
    /// Rejects an empty list, invalid templates and duplicate titles
    /// (case-insensitive).
    pub fn from_templates(templates: Vec<Template>) -> Result<Self, CatalogError> {
        debug!(count = templates.len(), "Catalog::from_templates: called");
        if templates.is_empty() {
            return Err(CatalogError::Empty);
        }
        for (i, t) in templates.iter().enumerate() {
            t.validate(t.title())?;
            if templates[..i]
                .iter()
                .any(|other| other.title().eq_ignore_ascii_case(t.title()))
            {
                return Err(CatalogError::DuplicateTitle {
                    title: t.title().to_string(),
                });
            }
        }
        Ok(Self {
            templates: templates.into_iter().map(Arc::new).collect(),
        })
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// Template at 0-based position `index`
    pub fn get(&self, index: usize) -> Option<&Arc<Template>> {
        self.templates.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<Template>> {
        self.templates.iter()
    }

    pub fn titles(&self) -> Vec<&str> {
        self.templates.iter().map(|t| t.title()).collect()
    }

    /// Resolve a selector to a 0-based position
    ///
    /// Accepts a 1-based number, a title (case-insensitive) or a slug.
    pub fn find(&self, selector: &str) -> Option<usize> {
        debug!(%selector, "Catalog::find: called");
        let selector = selector.trim();
        if let Ok(n) = selector.parse::<usize>() {
            return n.checked_sub(1).filter(|&i| i < self.templates.len());
        }
        self.templates
            .iter()
            .position(|t| t.title().eq_ignore_ascii_case(selector) || t.slug() == selector.to_lowercase())
    }
}

/// Parse and validate one template document
fn parse_template(name: &str, yaml: &str) -> Result<Template, CatalogError> {
    debug!(%name, "parse_template: called");
    let template: Template = serde_yaml::from_str(yaml).map_err(|source| CatalogError::Parse {
        name: name.to_string(),
        source,
    })?;
    template.validate(name)?;
    Ok(template)
}

/// Template files in `dir`, sorted by file name
fn template_files(dir: &Path) -> Result<Vec<PathBuf>, CatalogError> {
    let entries = std::fs::read_dir(dir).map_err(|source| CatalogError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| CatalogError::Io {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        let is_yaml = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e == "yml" || e == "yaml");
        if is_yaml && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
