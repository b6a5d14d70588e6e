//! compiler.rs - Compiles and caches lexicons for the moderation checks.
//!
//! This module converts a `LexiconConfig` into a `CompiledLexicon`, with every
//! regex built once. Compiled lexicons are kept in a global cache keyed by a
//! hash of the configuration, so engines built from the same lexicon share
//! one compiled copy.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use lazy_static::lazy_static;
use log::debug;
use regex::{Regex, RegexBuilder};
use std::collections::hash_map::DefaultHasher;
use std::collections::{HashMap, HashSet};
use std::hash::{Hash, Hasher};
use std::sync::{Arc, RwLock};

use crate::config::{LexiconConfig, SpamThresholds, MAX_PATTERN_LENGTH};
use crate::errors::ModguardError;

/// A profanity word with its word-boundary matcher.
#[derive(Debug)]
pub struct CompiledWord {
    pub word: String,
    /// `\bword\b`, case-insensitive.
    pub bounded: Regex,
}

/// A compiled suspicious-domain pattern.
#[derive(Debug)]
pub struct CompiledPattern {
    pub name: String,
    pub regex: Regex,
}

/// The lexicon in the form the checks consume it.
#[derive(Debug)]
pub struct CompiledLexicon {
    pub profanity: Vec<CompiledWord>,
    pub spam_phrases: Vec<String>,
    pub spam_words: HashSet<String>,
    pub url_shorteners: Vec<String>,
    /// Safe domains followed by site domains.
    pub trusted_domains: Vec<String>,
    pub suspicious_domains: Vec<CompiledPattern>,
    pub thresholds: SpamThresholds,
}

lazy_static! {
    /// A thread-safe, global cache for compiled lexicons.
    /// The key is a hash of the `LexiconConfig`.
    static ref COMPILED_LEXICON_CACHE: RwLock<HashMap<u64, Arc<CompiledLexicon>>> = RwLock::new(HashMap::new());
}

fn hash_config(config: &LexiconConfig) -> u64 {
    let mut hasher = DefaultHasher::new();
    config.hash(&mut hasher);
    hasher.finish()
}

fn build_regex(name: &str, pattern: &str) -> Result<Regex, ModguardError> {
    if pattern.len() > MAX_PATTERN_LENGTH {
        return Err(ModguardError::PatternLengthExceeded(
            name.to_string(),
            pattern.len(),
            MAX_PATTERN_LENGTH,
        ));
    }
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .size_limit(10 * (1 << 20))
        .build()
        .map_err(|e| ModguardError::PatternCompilationError(name.to_string(), e))
}

/// Compiles a lexicon. This is the low-level function that performs the
/// actual regex compilation; most callers want [`get_or_compile_lexicon`].
pub fn compile_lexicon(config: &LexiconConfig) -> Result<CompiledLexicon, ModguardError> {
    debug!(
        "Compiling lexicon: {} profanity words, {} suspicious patterns.",
        config.profanity.len(),
        config.suspicious_domains.len()
    );

    let mut errors = Vec::new();

    let mut profanity = Vec::with_capacity(config.profanity.len());
    for word in &config.profanity {
        let pattern = format!(r"\b{}\b", regex::escape(word));
        match build_regex(word, &pattern) {
            Ok(bounded) => profanity.push(CompiledWord { word: word.clone(), bounded }),
            Err(e) => errors.push(e),
        }
    }

    let mut suspicious_domains = Vec::with_capacity(config.suspicious_domains.len());
    for entry in &config.suspicious_domains {
        match build_regex(&entry.name, &entry.pattern) {
            Ok(regex) => {
                log::debug!(
                    target: "modguard_core::compiler",
                    "Suspicious pattern '{}' compiled successfully.",
                    entry.name
                );
                suspicious_domains.push(CompiledPattern {
                    name: entry.name.clone(),
                    regex,
                });
            }
            Err(e) => errors.push(e),
        }
    }

    if !errors.is_empty() {
        let error_message = errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<String>>()
            .join("\n");
        return Err(ModguardError::Fatal(format!(
            "Failed to compile {} lexicon pattern(s):\n{}",
            errors.len(),
            error_message
        )));
    }

    Ok(CompiledLexicon {
        profanity,
        spam_phrases: config.spam_phrases.clone(),
        spam_words: config.spam_words.iter().cloned().collect(),
        url_shorteners: config.url_shorteners.clone(),
        trusted_domains: config.trusted_domains().map(str::to_string).collect(),
        suspicious_domains,
        thresholds: config.thresholds.clone(),
    })
}

/// Gets a `CompiledLexicon` from the cache or compiles it if not found.
pub fn get_or_compile_lexicon(config: &LexiconConfig) -> Result<Arc<CompiledLexicon>> {
    let cache_key = hash_config(config);

    {
        let cache = COMPILED_LEXICON_CACHE
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if let Some(lexicon) = cache.get(&cache_key) {
            debug!("Serving compiled lexicon from cache for key: {}", cache_key);
            return Ok(Arc::clone(lexicon));
        }
    }

    debug!("Compiled lexicon not found in cache. Compiling now.");
    let compiled = Arc::new(compile_lexicon(config)?);

    let mut cache = COMPILED_LEXICON_CACHE
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    let cached = cache.entry(cache_key).or_insert(compiled);

    debug!("Compiled and cached lexicon for key: {}", cache_key);
    Ok(Arc::clone(cached))
}
