// modguard-core/src/lib.rs
//! # modguard Core Library
//!
//! `modguard-core` classifies a piece of text as safe or unsafe by running
//! three independent heuristic checks and aggregating their issues:
//!
//! * **Profanity**: lexicon words matched on normalized text (lower-cased,
//!   leet characters mapped back to letters), including spaced-out spellings.
//! * **Spam**: shouting, repeated characters, punctuation runs and trigger
//!   phrases.
//! * **Links**: obfuscated URLs, IP-literal hosts, plain HTTP, URL shorteners
//!   and look-alike domains.
//!
//! The library is pure and synchronous. Checks hold only an immutable,
//! compiled lexicon, and every operation is total over its string input.
//!
//! ## Modules
//!
//! * `config`: `LexiconConfig`, loading, merging and validating lexicons.
//! * `compiler`: compiles and caches lexicons.
//! * `normalize`: the normalization pipeline.
//! * `checks`: the three `ContentCheck` implementations.
//! * `engine`: the `ContentCheck` trait and the aggregating `ModerationEngine`.
//! * `request`: request/report wrapper with input validation and check selection.
//! * `headless`: free functions over a shared default engine.
//! * `validators`: hostname helpers.
//!
//! ## Usage Example
//!
//! ```rust
//! use modguard_core::{moderate_content, check_malicious_links};
//!
//! let result = moderate_content("DAMN IT!!!! Visit http://bad.com NOW!!!!");
//! assert!(!result.safe);
//! assert_eq!(result.issues[0], "Profanity: profanity detected");
//!
//! assert!(check_malicious_links("Visit https://github.com/user/repo").is_empty());
//! ```
//!
//! ## Error Handling
//!
//! Moderation never fails. Loading or compiling a lexicon returns
//! `anyhow::Result`, and request validation returns [`ModguardError`].
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod checks;
pub mod compiler;
pub mod config;
pub mod engine;
pub mod errors;
pub mod headless;
pub mod moderation_result;
pub mod normalize;
pub mod request;
pub mod validators;

/// Re-exports the lexicon configuration types and functions.
pub use config::{
    find_user_lexicon,
    lexicon_candidate_paths,
    merge_lexicons,
    validate_lexicon,
    LexiconConfig,
    SpamThresholds,
    SuspiciousDomain,
    MAX_PATTERN_LENGTH,
};

/// Re-exports the custom error type for clear error reporting.
pub use errors::ModguardError;

/// Re-exports the engine and the check trait.
pub use engine::{ContentCheck, ModerationEngine};

/// Re-exports the verdict types.
pub use moderation_result::{CheckKind, Finding, ModerationResult};

/// Re-exports the request/report wrapper.
pub use request::{resolve_checks, CheckSelection, ModerationReport, ModerationRequest, MAX_CONTENT_LENGTH};

/// Re-exports the default-engine entry points.
pub use headless::{check_malicious_links, check_profanity, check_spam, default_engine, moderate_content};

pub use compiler::{compile_lexicon, get_or_compile_lexicon, CompiledLexicon};
pub use normalize::{normalize, NormalizedText};
