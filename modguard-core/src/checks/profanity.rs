//! Profanity check: word-boundary matching on normalized text, plus a
//! spacing-removed pass that catches words spelled out with gaps.
//! License: MIT OR APACHE 2.0

use std::sync::Arc;

use crate::checks::is_blank;
use crate::compiler::CompiledLexicon;
use crate::engine::ContentCheck;
use crate::moderation_result::{log_finding_debug, CheckKind, Finding};
use crate::normalize::normalize;

#[derive(Debug, Clone)]
pub struct ProfanityCheck {
    lexicon: Arc<CompiledLexicon>,
}

impl ProfanityCheck {
    pub fn new(lexicon: Arc<CompiledLexicon>) -> Self {
        Self { lexicon }
    }

    /// Returns the first lexicon word found in `text`, if any.
    ///
    /// A word counts when it appears as a whole word in the normalized text,
    /// or when it only appears once whitespace is removed. A word that is
    /// merely embedded in a longer word (`crap` in `scrap`) matches neither.
    pub fn first_match(&self, text: &str) -> Option<&str> {
        if is_blank(text) {
            return None;
        }
        let normalized = normalize(text);
        let compact = normalized.without_whitespace();

        self.lexicon
            .profanity
            .iter()
            .find(|entry| {
                entry.bounded.is_match(&normalized)
                    || (compact.contains(entry.word.as_str())
                        && !normalized.contains(entry.word.as_str()))
            })
            .map(|entry| entry.word.as_str())
    }
}

impl ContentCheck for ProfanityCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Profanity
    }

    fn run(&self, text: &str) -> Vec<Finding> {
        match self.first_match(text) {
            Some(word) => {
                log_finding_debug(self.kind(), Finding::Profanity, word);
                vec![Finding::Profanity]
            }
            None => Vec::new(),
        }
    }
}
