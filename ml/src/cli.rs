//! CLI command definitions and subcommands

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Madlibs - fill in the blanks, get a story
#[derive(Parser)]
#[command(
    name = "ml",
    about = "Fill-in-the-blanks story templates",
    version,
    after_help = "Run without a subcommand to open the full-screen form."
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to config file")]
    pub config: Option<PathBuf>,

    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    #[arg(
        short = 'l',
        long = "log-level",
        global = true,
        help = "Log level (TRACE, DEBUG, INFO, WARN, ERROR)"
    )]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// CLI subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List available templates
    List,

    /// Show a template's text and the words it asks for
    Show {
        /// Template number, title or slug (e.g. 1, "Be Kind", be-kind)
        #[arg(value_name = "TEMPLATE")]
        template: String,
    },

    /// Fill a template from the command line and print the result
    Fill {
        /// Template number, title or slug
        #[arg(value_name = "TEMPLATE")]
        template: String,

        /// One value per blank, in order
        #[arg(value_name = "VALUES")]
        values: Vec<String>,

        /// Also copy the result to the clipboard
        #[arg(long)]
        copy: bool,
    },

    /// Fill a template by answering one prompt per blank
    Play {
        /// Template number, title or slug
        #[arg(value_name = "TEMPLATE")]
        template: String,

        /// Do not copy the result to the clipboard
        #[arg(long)]
        no_copy: bool,
    },
}
