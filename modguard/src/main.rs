// modguard/src/main.rs
//! modguard entry point.
//!
//! Parses the command line, initializes logging and dispatches to the
//! subcommand handlers.

use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use std::process::ExitCode;

use modguard::cli::{Cli, Commands, LexiconCommand};
use modguard::commands::{check, lexicon};
use modguard::logger;
use modguard::ui::theme::build_theme_map;

fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let level = if cli.quiet {
        Some(LevelFilter::Off)
    } else if cli.debug {
        Some(LevelFilter::Debug)
    } else {
        None
    };
    logger::init_logger(level);

    let theme_map = build_theme_map(cli.theme.as_ref())?;

    match cli.command {
        Commands::Check(args) => check::run_check_command(args, &theme_map),
        Commands::Lexicon(LexiconCommand::Show(args)) => {
            lexicon::show_lexicon(&args, &theme_map)?;
            Ok(ExitCode::SUCCESS)
        }
        Commands::Lexicon(LexiconCommand::Validate { path }) => {
            lexicon::validate_lexicon_file(&path, &theme_map)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
