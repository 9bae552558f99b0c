//! Madlibs - fill-in-the-blanks story templates
//!
//! CLI entry point: scripted subcommands, the console prompt loop, and
//! the full-screen form (default).

use std::fs;
use std::path::PathBuf;

use clap::Parser;
use colored::*;
use eyre::{Context, Result, eyre};
use tracing::{debug, info};

use madlibs::catalog::Catalog;
use madlibs::cli::{Cli, Command};
use madlibs::config::Config;
use madlibs::session::Session;
use madlibs::{clipboard, console, tui};

fn setup_logging(cli_log_level: Option<&str>, config_log_level: Option<&str>) -> Result<()> {
    // The TUI owns the terminal, so logs go to a file
    let log_dir = dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("madlibs")
        .join("logs");

    fs::create_dir_all(&log_dir).context("Failed to create log directory")?;

    // Determine log level with priority: CLI --log-level > config file > default (INFO)
    let level = match cli_log_level.or(config_log_level).map(str::to_uppercase).as_deref() {
        Some("TRACE") => tracing::Level::TRACE,
        Some("DEBUG") => tracing::Level::DEBUG,
        Some("INFO") | None => tracing::Level::INFO,
        Some("WARN") | Some("WARNING") => tracing::Level::WARN,
        Some("ERROR") => tracing::Level::ERROR,
        Some(other) => {
            eprintln!("Warning: Unknown log-level '{}', defaulting to INFO", other);
            tracing::Level::INFO
        }
    };

    let log_file = fs::File::create(log_dir.join("madlibs.log")).context("Failed to create log file")?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_ansi(false)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()))
        .init();

    info!("Logging initialized (level: {:?})", level);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load log level from config file early (before full config load)
    let config_log_level = Config::load_log_level(cli.config.as_ref());

    setup_logging(cli.log_level.as_deref(), config_log_level.as_deref()).context("Failed to setup logging")?;

    let config = Config::load(cli.config.as_ref()).context("Failed to load configuration")?;

    let catalog = match &config.templates_dir {
        Some(dir) => Catalog::with_user_templates(dir),
        None => Catalog::load(),
    }
    .context("Failed to load templates")?;
    info!("Loaded {} templates", catalog.len());

    let mut session = Session::new(catalog)?;

    debug!(command = ?cli.command, "main: dispatching command");
    match cli.command {
        Some(Command::List) => {
            print!("{}", console::format_list(session.catalog()));
            Ok(())
        }
        Some(Command::Show { template }) => {
            session.select(&template)?;
            print!("{}", console::format_show(session.template()));
            Ok(())
        }
        Some(Command::Fill { template, values, copy }) => {
            session.select(&template)?;
            let text = console::fill(&mut session, &values, config.name_missing_fields)?;
            println!("{}", text);
            if copy {
                let mut clipboard = clipboard::open_one_shot(true).ok_or_else(|| eyre!("No clipboard available"))?;
                eprintln!("{}", clipboard::copy(clipboard.as_mut(), &text).dimmed());
            }
            Ok(())
        }
        Some(Command::Play { template, no_copy }) => {
            session.select(&template)?;
            let clipboard = clipboard::open_one_shot(config.copy_to_clipboard && !no_copy);
            console::play(&mut session, config.name_missing_fields, clipboard)?;
            Ok(())
        }
        None => {
            debug!("main: no command specified, launching TUI");
            let app = tui::App::new(session).with_named_missing_fields(config.name_missing_fields);
            tui::run(app, clipboard::open(config.copy_to_clipboard))
        }
    }
}
