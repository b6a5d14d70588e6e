//! Request/report types for hosts that expose the engine behind a
//! request/response boundary (an HTTP handler, a queue consumer, the CLI).
//!
//! The request carries the content and an optional selection of checks;
//! the report adds a timestamp and the content length to the verdict.
//!
//! License: MIT OR APACHE 2.0

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::engine::ModerationEngine;
use crate::errors::ModguardError;
use crate::moderation_result::{CheckKind, ModerationResult};

/// Largest accepted content, in characters.
pub const MAX_CONTENT_LENGTH: usize = 50_000;

/// One entry of a request's `checks` list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckSelection {
    Profanity,
    Spam,
    Links,
    All,
}

impl FromStr for CheckSelection {
    type Err = ModguardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "profanity" => Ok(CheckSelection::Profanity),
            "spam" => Ok(CheckSelection::Spam),
            "links" => Ok(CheckSelection::Links),
            "all" => Ok(CheckSelection::All),
            other => Err(ModguardError::InvalidChecks(format!(
                "unknown check '{}'; expected one of: profanity, spam, links, all",
                other
            ))),
        }
    }
}

impl fmt::Display for CheckSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            CheckSelection::Profanity => "profanity",
            CheckSelection::Spam => "spam",
            CheckSelection::Links => "links",
            CheckSelection::All => "all",
        })
    }
}

/// Resolves a selection list into the checks to run. `None` or any `all`
/// entry selects every check.
pub fn resolve_checks(selection: Option<&[CheckSelection]>) -> Result<Vec<CheckKind>, ModguardError> {
    let Some(selection) = selection else {
        return Ok(CheckKind::ALL.to_vec());
    };
    if selection.is_empty() {
        return Err(ModguardError::InvalidChecks(
            "at least one check must be selected".to_string(),
        ));
    }
    if selection.contains(&CheckSelection::All) {
        return Ok(CheckKind::ALL.to_vec());
    }

    let kinds: BTreeSet<CheckKind> = selection
        .iter()
        .filter_map(|s| match s {
            CheckSelection::Profanity => Some(CheckKind::Profanity),
            CheckSelection::Spam => Some(CheckKind::Spam),
            CheckSelection::Links => Some(CheckKind::Links),
            CheckSelection::All => None,
        })
        .collect();
    Ok(kinds.into_iter().collect())
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationRequest {
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub checks: Option<Vec<CheckSelection>>,
}

impl ModerationRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into(), checks: None }
    }

    pub fn with_checks(mut self, checks: Vec<CheckSelection>) -> Self {
        self.checks = Some(checks);
        self
    }

    /// Rejects empty content and content over [`MAX_CONTENT_LENGTH`].
    pub fn validate(&self) -> Result<usize, ModguardError> {
        let len = self.content.chars().count();
        if len == 0 {
            return Err(ModguardError::ContentEmpty);
        }
        if len > MAX_CONTENT_LENGTH {
            return Err(ModguardError::ContentTooLong { len, max: MAX_CONTENT_LENGTH });
        }
        Ok(len)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModerationReport {
    pub safe: bool,
    pub issues: Vec<String>,
    /// RFC 3339 time the report was produced.
    pub timestamp: String,
    /// Content length in characters.
    pub content_length: usize,
}

impl ModerationReport {
    pub fn new(result: ModerationResult, content_length: usize) -> Self {
        Self {
            safe: result.safe,
            issues: result.issues,
            timestamp: Utc::now().to_rfc3339(),
            content_length,
        }
    }
}

impl ModerationEngine {
    /// Validates a request, runs the selected checks and wraps the verdict in
    /// a report.
    pub fn handle_request(&self, request: &ModerationRequest) -> Result<ModerationReport, ModguardError> {
        let content_length = request.validate()?;
        let kinds = resolve_checks(request.checks.as_deref())?;
        debug!("Handling moderation request: {} chars, checks {:?}.", content_length, kinds);

        let result = if kinds.len() == CheckKind::ALL.len() {
            self.moderate_content(&request.content)
        } else {
            self.run_checks(&request.content, &kinds)
        };

        info!(
            "Moderation finished: safe={}, {} issue(s).",
            result.safe,
            result.issues.len()
        );
        Ok(ModerationReport::new(result, content_length))
    }
}
