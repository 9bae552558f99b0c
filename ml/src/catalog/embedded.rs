//! Embedded templates
//!
//! These are compiled into the binary from .yml files at build time.

/// "Be Kind"
pub const BE_KIND: &str = include_str!("../../templates/be-kind.yml");

/// "Letter From Camp"
pub const LETTER_FROM_CAMP: &str = include_str!("../../templates/letter-from-camp.yml");

/// "Romeo and Juliet"
pub const ROMEO_AND_JULIET: &str = include_str!("../../templates/romeo-and-juliet.yml");

/// Built-in templates as (name, yaml) pairs, in catalog order
pub const BUILTIN: [(&str, &str); 3] = [
    ("be-kind", BE_KIND),
    ("letter-from-camp", LETTER_FROM_CAMP),
    ("romeo-and-juliet", ROMEO_AND_JULIET),
];
