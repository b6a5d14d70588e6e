// modguard-core/src/engine.rs
//! Defines the `ContentCheck` trait and the `ModerationEngine` that aggregates
//! the checks into a single verdict.
//!
//! The engine holds nothing but an immutable compiled lexicon, so a single
//! instance can be shared freely between threads.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::debug;
use std::sync::Arc;

use crate::checks::{LinkCheck, ProfanityCheck, SpamCheck};
use crate::compiler::{get_or_compile_lexicon, CompiledLexicon};
use crate::config::LexiconConfig;
use crate::moderation_result::{issue_strings, redact_content, CheckKind, Finding, ModerationResult};

/// A single, independent moderation heuristic.
///
/// Implementations must be total: any string input, including empty or
/// whitespace-only text, yields a (possibly empty) list of findings.
pub trait ContentCheck: Send + Sync {
    /// Which category this check reports under.
    fn kind(&self) -> CheckKind;

    /// Runs the check over `text`.
    fn run(&self, text: &str) -> Vec<Finding>;
}

/// Runs the profanity, spam and link checks over text.
pub struct ModerationEngine {
    lexicon: Arc<CompiledLexicon>,
    checks: Vec<Box<dyn ContentCheck>>,
}

impl std::fmt::Debug for ModerationEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModerationEngine")
            .field("checks", &self.checks.iter().map(|c| c.kind()).collect::<Vec<_>>())
            .finish()
    }
}

impl ModerationEngine {
    /// Builds an engine from a lexicon, compiling it (or reusing a cached
    /// compilation of an identical lexicon).
    pub fn new(config: LexiconConfig) -> Result<Self> {
        let lexicon = get_or_compile_lexicon(&config)
            .context("Failed to compile lexicon for ModerationEngine")?;
        Ok(Self::with_lexicon(lexicon))
    }

    /// Builds an engine over the embedded default lexicon.
    pub fn with_defaults() -> Result<Self> {
        Self::new(LexiconConfig::load_default()?)
    }

    /// Builds an engine from an already compiled lexicon.
    pub fn with_lexicon(lexicon: Arc<CompiledLexicon>) -> Self {
        let checks: Vec<Box<dyn ContentCheck>> = vec![
            Box::new(ProfanityCheck::new(Arc::clone(&lexicon))),
            Box::new(SpamCheck::new(Arc::clone(&lexicon))),
            Box::new(LinkCheck::new(Arc::clone(&lexicon))),
        ];
        Self { lexicon, checks }
    }

    pub fn lexicon(&self) -> &CompiledLexicon {
        &self.lexicon
    }

    fn check(&self, kind: CheckKind) -> Option<&dyn ContentCheck> {
        self.checks.iter().find(|c| c.kind() == kind).map(|c| c.as_ref())
    }

    /// Findings of a single check.
    pub fn findings(&self, kind: CheckKind, text: &str) -> Vec<Finding> {
        self.check(kind).map(|c| c.run(text)).unwrap_or_default()
    }

    pub fn check_profanity(&self, text: &str) -> Vec<String> {
        issue_strings(&self.findings(CheckKind::Profanity, text))
    }

    pub fn check_spam(&self, text: &str) -> Vec<String> {
        issue_strings(&self.findings(CheckKind::Spam, text))
    }

    pub fn check_malicious_links(&self, text: &str) -> Vec<String> {
        issue_strings(&self.findings(CheckKind::Links, text))
    }

    /// Runs every check and concatenates their issues, each prefixed with the
    /// check's category label, in the order Profanity, Spam, Link.
    pub fn moderate_content(&self, content: &str) -> ModerationResult {
        self.run_checks(content, &CheckKind::ALL)
    }

    /// Runs only the selected checks. Issues still follow the fixed check
    /// order regardless of the order of `kinds`.
    pub fn run_checks(&self, content: &str, kinds: &[CheckKind]) -> ModerationResult {
        if content.trim().is_empty() {
            return ModerationResult::clean();
        }

        let mut issues = Vec::new();
        for check in self.checks.iter().filter(|c| kinds.contains(&c.kind())) {
            let kind = check.kind();
            let findings = check.run(content);
            debug!("{} check produced {} finding(s).", kind, findings.len());
            issues.extend(
                findings
                    .into_iter()
                    .map(|finding| format!("{}: {}", kind.label(), finding)),
            );
        }

        debug!(
            "Moderated {}: {} issue(s).",
            redact_content(content),
            issues.len()
        );
        ModerationResult::from_issues(issues)
    }
}
