//! errors.rs - Custom error types for the modguard-core library.
//!
//! This module defines a structured error enum for the library, providing
//! specific, actionable error types that can be handled programmatically.
//! Moderation itself never fails; these errors come from lexicon loading,
//! pattern compilation and request validation.
//!
//! License: MIT OR APACHE 2.0

use thiserror::Error;

/// This enum represents all possible error types in the `modguard-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ModguardError {
    #[error("Failed to compile lexicon pattern '{0}': {1}")]
    PatternCompilationError(String, regex::Error),

    #[error("Pattern '{0}': length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(String, usize, usize),

    #[error("Invalid lexicon: {0}")]
    InvalidLexicon(String),

    #[error("Content must not be empty")]
    ContentEmpty,

    #[error("Content is {len} characters long; maximum allowed is {max}")]
    ContentTooLong { len: usize, max: usize },

    #[error("Invalid checks selection: {0}")]
    InvalidChecks(String),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}

impl ModguardError {
    /// Returns true for errors caused by the caller's input rather than by
    /// the engine or its configuration.
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ModguardError::ContentEmpty
                | ModguardError::ContentTooLong { .. }
                | ModguardError::InvalidChecks(_)
        )
    }

    /// HTTP-style status code for hosts that expose the engine over a
    /// request/response boundary: 400 for bad input, 500 otherwise.
    pub fn status_code(&self) -> u16 {
        if self.is_client_error() {
            400
        } else {
            500
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_errors_map_to_400() {
        assert_eq!(ModguardError::ContentEmpty.status_code(), 400);
        assert_eq!(ModguardError::ContentTooLong { len: 50_001, max: 50_000 }.status_code(), 400);
        assert_eq!(ModguardError::InvalidChecks("none".into()).status_code(), 400);
    }

    #[test]
    fn internal_errors_map_to_500() {
        assert_eq!(ModguardError::Fatal("boom".into()).status_code(), 500);
        assert_eq!(ModguardError::InvalidLexicon("bad".into()).status_code(), 500);
    }

    #[test]
    fn too_long_message_names_both_lengths() {
        let msg = ModguardError::ContentTooLong { len: 60_000, max: 50_000 }.to_string();
        assert!(msg.contains("60000"));
        assert!(msg.contains("50000"));
    }
}
