// File: modguard-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers around a process-wide engine built from the embedded
//! default lexicon. These are the entry points for callers that do not need
//! a custom lexicon.

use once_cell::sync::Lazy;

use crate::engine::ModerationEngine;
use crate::moderation_result::ModerationResult;

static DEFAULT_ENGINE: Lazy<ModerationEngine> = Lazy::new(|| {
    ModerationEngine::with_defaults().expect("embedded default lexicon must compile")
});

/// The shared engine over the default lexicon.
pub fn default_engine() -> &'static ModerationEngine {
    &DEFAULT_ENGINE
}

/// Classifies `content` with every check. See [`ModerationEngine::moderate_content`].
pub fn moderate_content(content: &str) -> ModerationResult {
    DEFAULT_ENGINE.moderate_content(content)
}

/// `["profanity detected"]` or `[]`.
pub fn check_profanity(text: &str) -> Vec<String> {
    DEFAULT_ENGINE.check_profanity(text)
}

/// Zero to four spam issues, in check order.
pub fn check_spam(text: &str) -> Vec<String> {
    DEFAULT_ENGINE.check_spam(text)
}

/// The obfuscation issue (if any) followed by at most one issue per URL.
pub fn check_malicious_links(text: &str) -> Vec<String> {
    DEFAULT_ENGINE.check_malicious_links(text)
}
