//! Spam check: four independent heuristics (shouting, repeated characters,
//! punctuation runs, trigger phrases). Each contributes at most one finding.
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::checks::is_blank;
use crate::compiler::CompiledLexicon;
use crate::engine::ContentCheck;
use crate::moderation_result::{log_finding_debug, CheckKind, Finding};
use crate::normalize::letters_only;

static PUNCTUATION_RUN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[!?.]{4,}").expect("punctuation run regex is valid"));

/// Consecutive identical characters needed to count as a repetition.
const REPEAT_RUN_LENGTH: usize = 4;

#[derive(Debug, Clone)]
pub struct SpamCheck {
    lexicon: Arc<CompiledLexicon>,
}

impl SpamCheck {
    pub fn new(lexicon: Arc<CompiledLexicon>) -> Self {
        Self { lexicon }
    }

    /// A 2-4 letter, fully uppercase word that is not a promotional word.
    pub fn is_true_acronym(&self, word: &str) -> bool {
        let letters = letters_only(word);
        (2..=4).contains(&letters.len())
            && letters.chars().all(|c| c.is_ascii_uppercase())
            && !self.lexicon.spam_words.contains(&letters.to_ascii_lowercase())
    }

    /// Uppercase ratio over ASCII letters exceeds the threshold, unless the
    /// text is mostly made of true acronyms.
    pub fn has_excessive_caps(&self, text: &str) -> bool {
        let thresholds = &self.lexicon.thresholds;
        let letters = letters_only(text);
        if letters.len() < thresholds.min_letters_for_caps() {
            return false;
        }

        let words: Vec<&str> = text.split_whitespace().collect();
        let acronyms = words.iter().filter(|w| self.is_true_acronym(w)).count();
        if !words.is_empty() && acronyms as f64 >= words.len() as f64 * thresholds.acronym_share() {
            return false;
        }

        let uppercase = letters.chars().filter(char::is_ascii_uppercase).count();
        uppercase as f64 / letters.len() as f64 > thresholds.caps_ratio()
    }

    /// The first spam phrase contained in `text`, compared case-insensitively.
    pub fn first_spam_phrase(&self, text: &str) -> Option<&str> {
        let lower = text.to_lowercase();
        self.lexicon
            .spam_phrases
            .iter()
            .find(|phrase| lower.contains(phrase.as_str()))
            .map(String::as_str)
    }
}

/// Any character (line breaks excepted) repeated four or more times in a row.
pub fn has_repeated_characters(text: &str) -> bool {
    let mut previous = None;
    let mut run = 0;
    for c in text.chars() {
        if matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}') {
            previous = None;
            run = 0;
            continue;
        }
        if previous == Some(c) {
            run += 1;
            if run >= REPEAT_RUN_LENGTH {
                return true;
            }
        } else {
            previous = Some(c);
            run = 1;
        }
    }
    false
}

/// Four or more of `!`, `?` and `.` in a row.
pub fn has_excessive_punctuation(text: &str) -> bool {
    PUNCTUATION_RUN.is_match(text)
}

impl ContentCheck for SpamCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Spam
    }

    fn run(&self, text: &str) -> Vec<Finding> {
        if is_blank(text) {
            return Vec::new();
        }

        let mut findings = Vec::new();
        if self.has_excessive_caps(text) {
            log_finding_debug(self.kind(), Finding::ExcessiveCapitalization, text);
            findings.push(Finding::ExcessiveCapitalization);
        }
        if has_repeated_characters(text) {
            log_finding_debug(self.kind(), Finding::RepeatedCharacters, text);
            findings.push(Finding::RepeatedCharacters);
        }
        if has_excessive_punctuation(text) {
            log_finding_debug(self.kind(), Finding::ExcessivePunctuation, text);
            findings.push(Finding::ExcessivePunctuation);
        }
        if let Some(phrase) = self.first_spam_phrase(text) {
            log_finding_debug(self.kind(), Finding::SpamPhrase, phrase);
            findings.push(Finding::SpamPhrase);
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile_lexicon;
    use crate::config::LexiconConfig;

    fn check() -> SpamCheck {
        let config = LexiconConfig::load_default().unwrap();
        SpamCheck::new(Arc::new(compile_lexicon(&config).unwrap()))
    }

    #[test]
    fn shouting_is_flagged() {
        assert!(check().has_excessive_caps("BUY NOW AMAZING DEAL FREE SHIPPING"));
    }

    #[test]
    fn acronym_heavy_text_is_exempt() {
        // Five of eight words are acronyms: above the 50% exemption share.
        assert!(!check().has_excessive_caps("NASA ESA JAXA CNES ISRO launch ROCKETS TODAY"));
        assert!(!check().has_excessive_caps("I work at NASA and use the API daily."));
    }

    #[test]
    fn promotional_words_are_not_acronyms() {
        let c = check();
        assert!(c.is_true_acronym("NASA"));
        assert!(c.is_true_acronym("A.P.I."));
        assert!(!c.is_true_acronym("FREE"));
        assert!(!c.is_true_acronym("Buy"));
        assert!(!c.is_true_acronym("AMAZING"));
    }

    #[test]
    fn short_text_is_never_shouting() {
        assert!(!check().has_excessive_caps("STOP IT"));
    }

    #[test]
    fn repeated_characters() {
        assert!(has_repeated_characters("Hellllllooooo therrrreee"));
        assert!(!has_repeated_characters("Hello there, balloon"));
        assert!(!has_repeated_characters("aaa\naaa"));
    }

    #[test]
    fn punctuation_runs() {
        assert!(has_excessive_punctuation("what?!?!"));
        assert!(has_excessive_punctuation("wait...."));
        assert!(!has_excessive_punctuation("wait..."));
    }

    #[test]
    fn findings_follow_check_order() {
        let findings = check().run("CLICK HERE NOW!!!! WINNNNER");
        assert_eq!(
            findings,
            vec![
                Finding::ExcessiveCapitalization,
                Finding::RepeatedCharacters,
                Finding::ExcessivePunctuation,
                Finding::SpamPhrase,
            ]
        );
    }

    #[test]
    fn plain_sentence_is_clean() {
        assert!(check().run("I work at NASA and use the API daily.").is_empty());
        assert!(check().run("   ").is_empty());
    }
}
