//! `modguard lexicon`: inspect the effective lexicon or validate a file.

use anyhow::{Context, Result};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, Table};
use is_terminal::IsTerminal;
use std::io::{self, Write};
use std::path::Path;

use modguard_core::{compile_lexicon, LexiconConfig};

use crate::cli::LexiconArgs;
use crate::commands::check::resolve_lexicon;
use crate::commands::{info_msg, warn_msg};
use crate::ui::output_format::{paint, print_success_message};
use crate::ui::theme::{ThemeEntry, ThemeMap};

fn summary_table(config: &LexiconConfig, theme: &ThemeMap, supports_color: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL).set_header(vec![
        paint("Entry", ThemeEntry::Header, theme, supports_color),
        paint("Value", ThemeEntry::Header, theme, supports_color),
    ]);

    let counts = [
        ("profanity", config.profanity.len()),
        ("spam_phrases", config.spam_phrases.len()),
        ("spam_words", config.spam_words.len()),
        ("url_shorteners", config.url_shorteners.len()),
        ("safe_domains", config.safe_domains.len()),
        ("site_domains", config.site_domains.len()),
        ("suspicious_domains", config.suspicious_domains.len()),
    ];
    for (name, count) in counts {
        table.add_row(vec![Cell::new(name), Cell::new(count)]);
    }

    let thresholds = &config.thresholds;
    table.add_row(vec![Cell::new("caps_ratio"), Cell::new(thresholds.caps_ratio())]);
    table.add_row(vec![
        Cell::new("min_letters_for_caps"),
        Cell::new(thresholds.min_letters_for_caps()),
    ]);
    table.add_row(vec![Cell::new("acronym_share"), Cell::new(thresholds.acronym_share())]);
    table
}

/// Prints a summary of the effective lexicon and the site domains in use.
pub fn show_lexicon(args: &LexiconArgs, theme: &ThemeMap) -> Result<()> {
    let config = resolve_lexicon(args, theme)?;
    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    let mut writer = stdout.lock();

    writeln!(writer, "{}", summary_table(&config, theme, supports_color))?;
    if !config.site_domains.is_empty() {
        writeln!(writer, "Site domains: {}", config.site_domains.join(", "))?;
    }
    for pattern in &config.suspicious_domains {
        writeln!(
            writer,
            "{} {} ({})",
            paint("-", ThemeEntry::IssueCategory, theme, supports_color),
            pattern.name,
            pattern.pattern
        )?;
    }
    Ok(())
}

/// Loads, validates and compiles a lexicon file without merging it.
pub fn validate_lexicon_file(path: &Path, theme: &ThemeMap) -> Result<()> {
    info_msg(format!("Validating lexicon: {}", path.display()), theme);
    let config = LexiconConfig::load_from_file(path)?;
    compile_lexicon(&config)
        .with_context(|| format!("Lexicon {} failed to compile", path.display()))?;

    if config.profanity.is_empty() && config.spam_phrases.is_empty() && config.suspicious_domains.is_empty() {
        warn_msg("Lexicon is valid but adds no profanity, spam phrases or suspicious domains.", theme);
    }

    let stdout = io::stdout();
    let supports_color = stdout.is_terminal();
    print_success_message(
        &mut stdout.lock(),
        &format!("Lexicon {} is valid.", path.display()),
        theme,
        supports_color,
    )?;
    Ok(())
}
