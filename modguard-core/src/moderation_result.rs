// modguard-core/src/moderation_result.rs
//! Core value types produced by the moderation checks, plus the helpers used
//! to keep user content out of debug logs.

use lazy_static::lazy_static;
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    /// Initialized once: whether raw user content may appear in debug logs.
    static ref CONTENT_DEBUG_ALLOWED: bool = {
        std::env::var("MODGUARD_ALLOW_DEBUG_CONTENT")
            .map(|s| s.eq_ignore_ascii_case("true"))
            .unwrap_or(false)
    };
}

/// The three independent checks, in the order the aggregator runs them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckKind {
    Profanity,
    Spam,
    Links,
}

impl CheckKind {
    pub const ALL: [CheckKind; 3] = [CheckKind::Profanity, CheckKind::Spam, CheckKind::Links];

    /// Prefix prepended to this check's issues in an aggregated result.
    pub fn label(self) -> &'static str {
        match self {
            CheckKind::Profanity => "Profanity",
            CheckKind::Spam => "Spam",
            CheckKind::Links => "Link",
        }
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CheckKind::Profanity => "profanity",
            CheckKind::Spam => "spam",
            CheckKind::Links => "links",
        })
    }
}

/// A single problem reported by a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Finding {
    Profanity,
    ExcessiveCapitalization,
    RepeatedCharacters,
    ExcessivePunctuation,
    SpamPhrase,
    ObfuscatedUrl,
    IpAddressUrl,
    InsecureHttp,
    UrlShortener,
    PhishingDomain,
}

impl Finding {
    /// The human-readable issue text.
    pub fn message(self) -> &'static str {
        match self {
            Finding::Profanity => "profanity detected",
            Finding::ExcessiveCapitalization => "excessive capitalization detected",
            Finding::RepeatedCharacters => "repeated characters detected",
            Finding::ExcessivePunctuation => "excessive punctuation detected",
            Finding::SpamPhrase => "spam phrase detected",
            Finding::ObfuscatedUrl => "obfuscated URL detected - suspicious",
            Finding::IpAddressUrl => "IP address URL detected - suspicious",
            Finding::InsecureHttp => "insecure HTTP link detected",
            Finding::UrlShortener => "URL shortener detected - destination unknown",
            Finding::PhishingDomain => "suspicious/phishing domain detected",
        }
    }
}

impl fmt::Display for Finding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// Converts findings into their issue strings.
pub fn issue_strings(findings: &[Finding]) -> Vec<String> {
    findings.iter().map(|f| f.message().to_string()).collect()
}

/// Verdict for one piece of content. `safe` is true iff `issues` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ModerationResult {
    pub safe: bool,
    pub issues: Vec<String>,
}

impl ModerationResult {
    pub fn from_issues(issues: Vec<String>) -> Self {
        Self { safe: issues.is_empty(), issues }
    }

    /// The verdict for empty or whitespace-only content.
    pub fn clean() -> Self {
        Self::from_issues(Vec::new())
    }
}

pub fn redact_content(s: &str) -> String {
    const MAX_LEN: usize = 8;
    let len = s.chars().count();
    if len <= MAX_LEN {
        "[CONTENT]".to_string()
    } else {
        format!("[CONTENT: {} chars]", len)
    }
}

fn get_loggable_content(content: &str) -> String {
    if *CONTENT_DEBUG_ALLOWED {
        content.to_string()
    } else {
        redact_content(content)
    }
}

pub fn log_finding_debug(kind: CheckKind, finding: Finding, matched: &str) {
    debug!(
        "{} check: {} (matched '{}')",
        kind,
        finding,
        get_loggable_content(matched)
    );
}
