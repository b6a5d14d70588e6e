//! `modguard check`: moderate a piece of text and report the verdict.

use anyhow::{Context, Result};
use is_terminal::IsTerminal;
use log::{debug, info};
use std::fs;
use std::io::{self, Read, Write};
use std::process::ExitCode;

use modguard_core::{
    find_user_lexicon, merge_lexicons, LexiconConfig, ModerationEngine, ModerationRequest,
};

use crate::cli::{CheckCommand, LexiconArgs};
use crate::commands::{error_msg, info_msg};
use crate::ui::output_format;
use crate::ui::theme::ThemeMap;

/// Exit code for unsafe content under `--fail-on-unsafe`.
const EXIT_UNSAFE: u8 = 1;
/// Exit code for rejected input (empty, too long, bad check list).
const EXIT_INVALID_INPUT: u8 = 2;

/// Builds the effective lexicon: defaults, merged with an explicit
/// `--lexicon` file or else the first user lexicon found, plus any
/// `--site-domain` entries.
pub fn resolve_lexicon(args: &LexiconArgs, theme: &ThemeMap) -> Result<LexiconConfig> {
    let default_config = LexiconConfig::load_default()?;

    let user_path = match &args.lexicon {
        Some(path) => Some(path.clone()),
        None if args.no_user_lexicon => None,
        None => find_user_lexicon(),
    };

    let user_config = match user_path {
        Some(path) => {
            info_msg(format!("Using lexicon: {}", path.display()), theme);
            Some(LexiconConfig::load_from_file(&path)?)
        }
        None => {
            debug!("No user lexicon in use.");
            None
        }
    };

    Ok(merge_lexicons(default_config, user_config).with_site_domains(&args.site_domains))
}

/// Reads the content to moderate: `--text`, then `--input-file`, then stdin.
/// A single trailing line break is dropped.
fn read_input(args: &CheckCommand) -> Result<String> {
    let mut input = if let Some(text) = &args.text {
        text.clone()
    } else if let Some(path) = &args.input_file {
        debug!("Reading input from file: {}", path.display());
        fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display()))?
    } else {
        debug!("Reading input from stdin.");
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read from stdin")?;
        buffer
    };

    if input.ends_with('\n') {
        input.pop();
        if input.ends_with('\r') {
            input.pop();
        }
    }
    Ok(input)
}

/// Runs the `check` command and returns the process exit code.
pub fn run_check_command(args: CheckCommand, theme: &ThemeMap) -> Result<ExitCode> {
    info!("Starting modguard check.");
    let lexicon = resolve_lexicon(&args.lexicon, theme)?;
    let engine = ModerationEngine::new(lexicon)?;

    let content = read_input(&args)?;
    let mut request = ModerationRequest::new(content);
    if !args.checks.is_empty() {
        request = request.with_checks(args.checks.clone());
    }

    let report = match engine.handle_request(&request) {
        Ok(report) => report,
        Err(e) if e.is_client_error() => {
            error_msg(e.to_string(), theme);
            return Ok(ExitCode::from(EXIT_INVALID_INPUT));
        }
        Err(e) => return Err(e.into()),
    };

    let stdout = io::stdout();
    let mut writer = stdout.lock();
    if args.json_stdout {
        let json = serde_json::to_string_pretty(&report).context("Failed to serialize report")?;
        writeln!(writer, "{}", json)?;
    } else {
        let supports_color = stdout.is_terminal();
        output_format::print_report(&mut writer, &report, theme, supports_color)?;
    }

    info!("modguard check completed.");
    if args.fail_on_unsafe && !report.safe {
        return Ok(ExitCode::from(EXIT_UNSAFE));
    }
    Ok(ExitCode::SUCCESS)
}
