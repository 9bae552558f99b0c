//! Template Catalog
//!
//! Holds the fixed, ordered set of story templates.
//!
//! Template loading chain:
//! 1. Embedded built-ins, in fixed order
//! 2. `*.yml` / `*.yaml` files from a user templates directory, by file name
//!
//! Every template is checked on load; a marker/placeholder mismatch is a
//! startup error.

pub mod embedded;
mod loader;

pub use loader::Catalog;
