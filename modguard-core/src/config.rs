//! Lexicon configuration for `modguard-core`.
//!
//! This module defines the static data the moderation checks are driven by:
//! profanity words, spam phrases, shortener and safe hostnames, and the
//! suspicious-domain patterns. It handles YAML (de)serialization and provides
//! utilities for loading, merging and validating lexicons.
//!
//! A lexicon is loaded once and handed to the engine as an immutable snapshot;
//! nothing in this crate mutates it after construction.
//!
//! License: MIT OR Apache-2.0

use anyhow::{anyhow, Context, Result};
use log::{debug, info, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::hash::{Hash, Hasher};
use std::path::{Path, PathBuf};

/// Maximum allowed length for a suspicious-domain pattern string.
pub const MAX_PATTERN_LENGTH: usize = 500;

/// Default uppercase/letter ratio above which text is flagged as shouting.
pub const DEFAULT_CAPS_RATIO: f64 = 0.6;
/// Default minimum number of letters before capitalization is evaluated.
pub const DEFAULT_MIN_LETTERS_FOR_CAPS: usize = 10;
/// Default share of words that must be true acronyms to exempt a text.
pub const DEFAULT_ACRONYM_SHARE: f64 = 0.5;

/// A regex describing look-alike hostnames of a well-known domain.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct SuspiciousDomain {
    /// Unique identifier for the pattern (e.g., "google_typosquat").
    pub name: String,
    /// Anchored regex, matched case-insensitively against the hostname.
    pub pattern: String,
}

/// Tunables for the spam capitalization check.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpamThresholds {
    /// Uppercase/letter ratio that must be exceeded (default: 0.6).
    pub caps_ratio: Option<f64>,
    /// Minimum letters before the ratio is evaluated (default: 10).
    pub min_letters_for_caps: Option<usize>,
    /// Share of true acronyms that exempts the text (default: 0.5).
    pub acronym_share: Option<f64>,
}

impl SpamThresholds {
    pub fn caps_ratio(&self) -> f64 {
        self.caps_ratio.unwrap_or(DEFAULT_CAPS_RATIO)
    }

    pub fn min_letters_for_caps(&self) -> usize {
        self.min_letters_for_caps.unwrap_or(DEFAULT_MIN_LETTERS_FOR_CAPS)
    }

    pub fn acronym_share(&self) -> f64 {
        self.acronym_share.unwrap_or(DEFAULT_ACRONYM_SHARE)
    }
}

impl Hash for SpamThresholds {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.caps_ratio.map(f64::to_bits).hash(state);
        self.min_letters_for_caps.hash(state);
        self.acronym_share.map(f64::to_bits).hash(state);
    }
}

/// The top-level lexicon structure.
#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LexiconConfig {
    /// Words reported as profanity. Checked in order; the first hit wins.
    pub profanity: Vec<String>,
    /// Phrases reported as spam when found anywhere in the text.
    pub spam_phrases: Vec<String>,
    /// Promotional words that never count as true acronyms.
    pub spam_words: Vec<String>,
    /// URL shortener hostnames.
    pub url_shorteners: Vec<String>,
    /// Hostnames whose links are never reported.
    pub safe_domains: Vec<String>,
    /// The site's own hostnames. Treated like `safe_domains`.
    pub site_domains: Vec<String>,
    /// Look-alike domain patterns reported as phishing.
    pub suspicious_domains: Vec<SuspiciousDomain>,
    /// Capitalization tunables.
    pub thresholds: SpamThresholds,
}

impl Hash for LexiconConfig {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.profanity.hash(state);
        self.spam_phrases.hash(state);
        self.spam_words.hash(state);
        self.url_shorteners.hash(state);
        self.safe_domains.hash(state);
        self.site_domains.hash(state);
        self.suspicious_domains.hash(state);
        self.thresholds.hash(state);
    }
}

impl LexiconConfig {
    /// Loads a lexicon from a YAML file and validates it.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading custom lexicon from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read lexicon file {}", path.display()))?;
        let mut config: LexiconConfig = serde_yml::from_str(&text)
            .with_context(|| format!("Failed to parse lexicon file {}", path.display()))?;

        config.normalize_entries();
        validate_lexicon(&config)?;
        info!(
            "Loaded lexicon from {} ({} profanity words, {} spam phrases, {} suspicious patterns).",
            path.display(),
            config.profanity.len(),
            config.spam_phrases.len(),
            config.suspicious_domains.len()
        );
        Ok(config)
    }

    /// Loads the default lexicon embedded in the library.
    pub fn load_default() -> Result<Self> {
        debug!("Loading default lexicon from embedded string...");
        let default_yaml = include_str!("../config/default_lexicon.yaml");
        let mut config: LexiconConfig = serde_yml::from_str(default_yaml)
            .context("Failed to parse default lexicon")?;

        config.normalize_entries();
        validate_lexicon(&config).context("Default lexicon is invalid")?;
        debug!(
            "Loaded default lexicon: {} profanity words, {} spam phrases.",
            config.profanity.len(),
            config.spam_phrases.len()
        );
        Ok(config)
    }

    /// Adds the site's own domains to the lexicon, skipping duplicates.
    pub fn with_site_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for domain in domains {
            let domain = normalize_host_entry(domain.as_ref());
            if !domain.is_empty() && !self.site_domains.contains(&domain) {
                self.site_domains.push(domain);
            }
        }
        self
    }

    /// Safe domains and site domains together.
    pub fn trusted_domains(&self) -> impl Iterator<Item = &str> {
        self.safe_domains
            .iter()
            .chain(self.site_domains.iter())
            .map(String::as_str)
    }

    /// Lower-cases and trims every list entry, drops empty ones and strips a
    /// leading `www.` from hostnames.
    fn normalize_entries(&mut self) {
        for list in [
            &mut self.profanity,
            &mut self.spam_phrases,
            &mut self.spam_words,
        ] {
            *list = dedup_preserving_order(list.iter().map(|s| normalize_entry(s)));
        }
        for list in [
            &mut self.url_shorteners,
            &mut self.safe_domains,
            &mut self.site_domains,
        ] {
            *list = dedup_preserving_order(list.iter().map(|s| normalize_host_entry(s)));
        }
        for suspicious in &mut self.suspicious_domains {
            suspicious.name = suspicious.name.trim().to_string();
        }
    }
}

fn normalize_entry(s: &str) -> String {
    s.trim().to_lowercase()
}

fn normalize_host_entry(s: &str) -> String {
    let lower = normalize_entry(s);
    lower.strip_prefix("www.").map(str::to_string).unwrap_or(lower)
}

fn dedup_preserving_order<I: IntoIterator<Item = String>>(items: I) -> Vec<String> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|s| !s.is_empty() && seen.insert(s.clone()))
        .collect()
}

/// Ordered list of locations checked for a user lexicon.
pub fn lexicon_candidate_paths() -> Vec<PathBuf> {
    [
        dirs::home_dir().map(|p| p.join(".modguard").join("lexicon.yaml")),
        dirs::config_dir().map(|p| p.join("modguard").join("lexicon.yaml")),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Returns the first user lexicon that exists on disk, if any.
pub fn find_user_lexicon() -> Option<PathBuf> {
    lexicon_candidate_paths().into_iter().find(|p| p.is_file())
}

/// Merges a user lexicon into the defaults.
///
/// User lists extend the default lists (duplicates dropped, default order
/// first). A suspicious-domain entry with the same name as a default one
/// replaces it in place. User thresholds override the defaults.
pub fn merge_lexicons(
    default_config: LexiconConfig,
    user_config: Option<LexiconConfig>,
) -> LexiconConfig {
    let Some(user) = user_config else {
        debug!("merge_lexicons called without a user lexicon; using defaults.");
        return default_config;
    };

    debug!(
        "Merging user lexicon: {} profanity words, {} spam phrases, {} suspicious patterns.",
        user.profanity.len(),
        user.spam_phrases.len(),
        user.suspicious_domains.len()
    );

    let extend = |base: Vec<String>, extra: Vec<String>| -> Vec<String> {
        dedup_preserving_order(base.into_iter().chain(extra))
    };

    let mut suspicious_domains = default_config.suspicious_domains;
    for user_pattern in user.suspicious_domains {
        match suspicious_domains.iter_mut().find(|p| p.name == user_pattern.name) {
            Some(existing) => {
                debug!("Overriding suspicious pattern '{}'.", user_pattern.name);
                *existing = user_pattern;
            }
            None => suspicious_domains.push(user_pattern),
        }
    }

    let mut thresholds = default_config.thresholds;
    if let Some(ratio) = user.thresholds.caps_ratio {
        debug!("Overriding caps ratio with user value: {}", ratio);
        thresholds.caps_ratio = Some(ratio);
    }
    if let Some(min_letters) = user.thresholds.min_letters_for_caps {
        debug!("Overriding minimum letters with user value: {}", min_letters);
        thresholds.min_letters_for_caps = Some(min_letters);
    }
    if let Some(share) = user.thresholds.acronym_share {
        debug!("Overriding acronym share with user value: {}", share);
        thresholds.acronym_share = Some(share);
    }

    LexiconConfig {
        profanity: extend(default_config.profanity, user.profanity),
        spam_phrases: extend(default_config.spam_phrases, user.spam_phrases),
        spam_words: extend(default_config.spam_words, user.spam_words),
        url_shorteners: extend(default_config.url_shorteners, user.url_shorteners),
        safe_domains: extend(default_config.safe_domains, user.safe_domains),
        site_domains: extend(default_config.site_domains, user.site_domains),
        suspicious_domains,
        thresholds,
    }
}

/// Validates lexicon integrity (pattern compilation, thresholds, hostnames).
pub fn validate_lexicon(config: &LexiconConfig) -> Result<()> {
    let mut errors = Vec::new();
    let mut pattern_names = HashSet::new();

    for suspicious in &config.suspicious_domains {
        if suspicious.name.is_empty() {
            errors.push("A suspicious domain pattern has an empty `name` field.".to_string());
        } else if !pattern_names.insert(suspicious.name.as_str()) {
            errors.push(format!("Duplicate suspicious pattern name found: '{}'.", suspicious.name));
        }

        if suspicious.pattern.is_empty() {
            errors.push(format!("Pattern '{}' has an empty `pattern` field.", suspicious.name));
            continue;
        }
        if suspicious.pattern.len() > MAX_PATTERN_LENGTH {
            errors.push(format!(
                "Pattern '{}' is {} characters long; maximum is {}.",
                suspicious.name,
                suspicious.pattern.len(),
                MAX_PATTERN_LENGTH
            ));
            continue;
        }
        if let Err(e) = Regex::new(&suspicious.pattern) {
            errors.push(format!("Pattern '{}' has an invalid regex: {}", suspicious.name, e));
        }
        if !suspicious.pattern.starts_with('^') || !suspicious.pattern.ends_with('$') {
            warn!(
                "Suspicious pattern '{}' is not anchored; it will match hostnames that merely contain it.",
                suspicious.name
            );
        }
    }

    for (list_name, hosts) in [
        ("url_shorteners", &config.url_shorteners),
        ("safe_domains", &config.safe_domains),
        ("site_domains", &config.site_domains),
    ] {
        for host in hosts.iter() {
            if host.contains("://") || host.contains('/') || host.chars().any(char::is_whitespace) {
                errors.push(format!(
                    "Entry '{}' in `{}` must be a bare hostname (no scheme, path or whitespace).",
                    host, list_name
                ));
            }
        }
    }

    for (name, value) in [
        ("caps_ratio", config.thresholds.caps_ratio),
        ("acronym_share", config.thresholds.acronym_share),
    ] {
        if let Some(v) = value {
            if !(v > 0.0 && v <= 1.0) {
                errors.push(format!("Threshold `{}` must be within (0, 1], got {}.", name, v));
            }
        }
    }

    if config.profanity.iter().any(|w| w.trim().is_empty()) {
        errors.push("The `profanity` list contains an empty entry.".to_string());
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(anyhow!("Lexicon validation failed:\n{}", errors.join("\n")))
    }
}
