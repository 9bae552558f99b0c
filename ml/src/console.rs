//! Line-oriented front end
//!
//! Output for the `list`, `show` and `fill` subcommands, and the
//! prompt-per-blank `play` loop.

use colored::*;
use eyre::{Result, eyre};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tracing::{debug, info};

use crate::catalog::Catalog;
use crate::clipboard::{self, Clipboard};
use crate::error::SessionError;
use crate::session::{Action, Outcome, Session};
use crate::template::Template;

/// Numbered template titles with their blank counts
pub fn format_list(catalog: &Catalog) -> String {
    catalog
        .iter()
        .enumerate()
        .map(|(i, t)| {
            format!(
                "{:>2}. {} {}\n",
                i + 1,
                t.title().bold(),
                format!("({} blanks, {})", t.marker_count(), t.slug()).dimmed()
            )
        })
        .collect()
}

/// Title, body and one prompt line per blank
pub fn format_show(template: &Template) -> String {
    let mut out = format!("{}\n\n{}\n\n", template.title().bold().cyan(), template.body());
    for index in 1..=template.marker_count() {
        if let Some(prompt) = template.prompt(index) {
            out.push_str(&format!("{:>3} {}\n", format!("[{}]", index).yellow(), prompt));
        }
    }
    out
}

/// Fill the session's template from `values`, one per blank in order
pub fn fill(session: &mut Session, values: &[String], named: bool) -> Result<String> {
    debug!(count = values.len(), "fill: called");
    let template = session.template().clone();
    if values.len() != template.marker_count() {
        return Err(eyre!(
            "'{}' needs {} values, got {}",
            template.title(),
            template.marker_count(),
            values.len()
        ));
    }

    for (i, value) in values.iter().enumerate() {
        session.dispatch(Action::Edit {
            field: i + 1,
            text: value.clone(),
        })?;
    }

    generate(session, named)
}

/// Dispatch Generate, turning a validation failure into its user message
fn generate(session: &mut Session, named: bool) -> Result<String> {
    match session.dispatch(Action::Generate) {
        Ok(Outcome::Generated(text)) => Ok(text),
        Ok(other) => Err(eyre!("Unexpected outcome from generate: {:?}", other)),
        Err(SessionError::Validation(err)) => Err(eyre!(err.message(session.template(), named))),
        Err(e) => Err(e.into()),
    }
}

/// Ask for every blank on the terminal, then print and copy the result
///
/// After a validation failure only the blank fields are asked again.
/// Returns None if the user aborts with Ctrl+C or Ctrl+D.
pub fn play(session: &mut Session, named: bool, mut clipboard: Option<Box<dyn Clipboard>>) -> Result<Option<String>> {
    debug!(title = %session.template().title(), "play: called");
    let template = session.template().clone();
    let mut editor = DefaultEditor::new().map_err(|e| eyre!("Failed to start line editor: {}", e))?;

    println!("{}\n", template.title().bold().cyan());
    let mut fields: Vec<usize> = (1..=template.marker_count()).collect();
    loop {
        for &field in &fields {
            let prompt = format!("{} ", template.prompt(field).unwrap_or_default());
            match editor.readline(&prompt) {
                Ok(line) => {
                    session.dispatch(Action::Edit { field, text: line })?;
                }
                Err(ReadlineError::Interrupted | ReadlineError::Eof) => {
                    info!("play aborted by user");
                    return Ok(None);
                }
                Err(e) => return Err(eyre!("Failed to read input: {}", e)),
            }
        }

        match session.dispatch(Action::Generate) {
            Ok(Outcome::Generated(text)) => {
                println!("\n{}\n", "Your Madlib".bold().green());
                println!("{}", text);
                if let Some(clipboard) = clipboard.as_deref_mut() {
                    println!("\n{}", clipboard::copy(clipboard, &text).dimmed());
                }
                return Ok(Some(text));
            }
            Ok(other) => return Err(eyre!("Unexpected outcome from generate: {:?}", other)),
            Err(SessionError::Validation(err)) => {
                eprintln!("{}", err.message(&template, named).red());
                fields = err.missing().to_vec();
            }
            Err(e) => return Err(e.into()),
        }
    }
}
