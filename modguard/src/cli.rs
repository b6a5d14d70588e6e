//! This file defines the command-line interface (CLI) for the modguard
//! application, including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Args, Parser, Subcommand};
use modguard_core::CheckSelection;
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "modguard",
    version = env!("CARGO_PKG_VERSION"),
    about = "Check text for profanity, spam and malicious links",
    long_about = "modguard runs three heuristic checks over a piece of text (profanity, spam and malicious links) and reports whether it is safe to publish, with one line per issue found.",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `modguard` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Moderates text from an argument, a file or stdin.
    #[command(about = "Moderate text from an argument, a file or stdin.")]
    Check(CheckCommand),

    /// Inspects and validates lexicons.
    #[command(subcommand, about = "Inspect and validate moderation lexicons.")]
    Lexicon(LexiconCommand),
}

/// Lexicon selection shared by every command that builds an engine.
#[derive(Args, Debug, Clone, Default)]
pub struct LexiconArgs {
    /// Path to a lexicon YAML file merged over the defaults.
    #[arg(long = "lexicon", value_name = "FILE", env = "MODGUARD_LEXICON", help = "Path to a lexicon YAML file merged over the built-in defaults.")]
    pub lexicon: Option<PathBuf>,

    /// Do not look for a user lexicon in the home or config directory.
    #[arg(long = "no-user-lexicon", help = "Ignore ~/.modguard/lexicon.yaml and the config-directory lexicon.")]
    pub no_user_lexicon: bool,

    /// The site's own domains; links to them are never reported.
    #[arg(long = "site-domain", value_name = "DOMAIN", value_delimiter = ',', help = "Treat these domains (comma-separated) as the site's own, trusted domains.")]
    pub site_domains: Vec<String>,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Text to moderate. Takes precedence over --input-file and stdin.
    #[arg(long, short = 't', value_name = "TEXT", help = "Moderate this text instead of reading input.")]
    pub text: Option<String>,

    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE", help = "Read input from a specified file instead of stdin.")]
    pub input_file: Option<PathBuf>,

    /// Checks to run (comma-separated): profanity, spam, links, all.
    #[arg(long = "checks", short = 'c', value_name = "CHECKS", value_delimiter = ',', help = "Checks to run (comma-separated): profanity, spam, links, all. Defaults to all.")]
    pub checks: Vec<CheckSelection>,

    #[command(flatten)]
    pub lexicon: LexiconArgs,

    /// Print the report as JSON to stdout.
    #[arg(long = "json-stdout", help = "Print the moderation report to stdout as JSON.")]
    pub json_stdout: bool,

    /// Exit with status 1 when the content is not safe.
    #[arg(long = "fail-on-unsafe", help = "Exit with a non-zero code if any issue is found.")]
    pub fail_on_unsafe: bool,
}

/// Subcommands for the `lexicon` command.
#[derive(Subcommand, Debug)]
pub enum LexiconCommand {
    #[command(about = "Show the effective lexicon (defaults merged with any user lexicon).")]
    Show(LexiconArgs),
    #[command(about = "Validate a lexicon YAML file.")]
    Validate {
        /// The path to the lexicon YAML file to validate.
        #[arg(value_name = "FILE", help = "The path to the lexicon YAML file to validate.")]
        path: PathBuf,
    },
}
