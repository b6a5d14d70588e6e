//! This module contains the individual moderation checks.
//!
//! Each check is a separate file within this directory and implements the
//! `ContentCheck` trait. Checks are independent of each other: they share the
//! compiled lexicon but no state, and each may be run on its own.
//!
//! To add a new check, create a new file (e.g., `language.rs`), implement
//! `ContentCheck` for it, and register it in `ModerationEngine::with_lexicon`.

pub mod links;
pub mod profanity;
pub mod spam;

pub use links::{extract_urls, ExtractedUrl, LinkCheck};
pub use profanity::ProfanityCheck;
pub use spam::SpamCheck;

/// Empty and whitespace-only input is clean for every check.
pub(crate) fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}
