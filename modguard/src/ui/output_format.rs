//! Formatting of messages and moderation reports for the terminal.
//!
//! Every printer takes an explicit writer and a `supports_color` flag so the
//! same code serves a TTY, a pipe and the tests.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{Cell, ContentArrangement, Table};
use modguard_core::ModerationReport;
use owo_colors::OwoColorize;
use std::io::{self, Write};

use crate::ui::theme::{ThemeEntry, ThemeMap};

/// Applies the theme color of `entry` to `text` when color is enabled.
pub fn paint(text: &str, entry: ThemeEntry, theme: &ThemeMap, supports_color: bool) -> String {
    if !supports_color {
        return text.to_string();
    }
    match theme.get(&entry).and_then(|style| style.fg.as_ref()) {
        Some(color) => text.color(color.to_ansi_color()).to_string(),
        None => text.to_string(),
    }
}

fn print_prefixed<W: Write>(
    writer: &mut W,
    prefix: &str,
    msg: &str,
    entry: ThemeEntry,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    writeln!(writer, "{}", paint(&format!("{}{}", prefix, msg), entry, theme, supports_color))
}

pub fn print_info_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_prefixed(writer, "", msg, ThemeEntry::Info, theme, supports_color)
}

pub fn print_success_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_prefixed(writer, "", msg, ThemeEntry::Success, theme, supports_color)
}

pub fn print_warn_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_prefixed(writer, "Warning: ", msg, ThemeEntry::Warn, theme, supports_color)
}

pub fn print_error_message<W: Write>(writer: &mut W, msg: &str, theme: &ThemeMap, supports_color: bool) -> io::Result<()> {
    print_prefixed(writer, "Error: ", msg, ThemeEntry::Error, theme, supports_color)
}

/// Splits a `"Category: issue"` string into its two halves.
fn split_issue(issue: &str) -> (&str, &str) {
    issue.split_once(": ").unwrap_or(("", issue))
}

/// Prints the human-readable verdict: a SAFE/UNSAFE line, then a table of
/// issues when there are any.
pub fn print_report<W: Write>(
    writer: &mut W,
    report: &ModerationReport,
    theme: &ThemeMap,
    supports_color: bool,
) -> io::Result<()> {
    let verdict = if report.safe {
        paint("SAFE", ThemeEntry::Success, theme, supports_color)
    } else {
        paint("UNSAFE", ThemeEntry::Error, theme, supports_color)
    };
    writeln!(
        writer,
        "{} {} ({} characters checked)",
        paint("Verdict:", ThemeEntry::Header, theme, supports_color),
        verdict,
        report.content_length
    )?;

    if report.issues.is_empty() {
        return Ok(());
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec![
            paint("Category", ThemeEntry::Header, theme, supports_color),
            paint("Issue", ThemeEntry::Header, theme, supports_color),
        ]);
    for issue in &report.issues {
        let (category, text) = split_issue(issue);
        table.add_row(vec![
            Cell::new(paint(category, ThemeEntry::IssueCategory, theme, supports_color)),
            Cell::new(paint(text, ThemeEntry::IssueText, theme, supports_color)),
        ]);
    }
    writeln!(writer, "{}", table)
}
