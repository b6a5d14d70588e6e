//! Text normalization used to defeat simple keyword-filter evasion.
//!
//! Normalization is a short pipeline of pure transforms: lower-case, then
//! map "leet" look-alikes back to letters. The spacing-removed variant is
//! derived from the normalized text on demand.

use std::fmt;
use std::ops::Deref;

/// Lower-cased, leet-substituted text. Never stored beyond a single check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedText(String);

impl NormalizedText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The normalized text with every whitespace character removed, used to
    /// catch spaced-out words such as `s h i t`.
    pub fn without_whitespace(&self) -> String {
        self.0.chars().filter(|c| !c.is_whitespace()).collect()
    }
}

impl Deref for NormalizedText {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NormalizedText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Maps a leet-speak character to the letter it imitates.
fn unleet(c: char) -> char {
    match c {
        '0' => 'o',
        '1' => 'i',
        '3' => 'e',
        '4' => 'a',
        '5' => 's',
        '7' => 't',
        '@' => 'a',
        '$' => 's',
        other => other,
    }
}

/// Lower-cases `text` and substitutes leet characters.
pub fn normalize(text: &str) -> NormalizedText {
    NormalizedText(text.to_lowercase().chars().map(unleet).collect())
}

/// Keeps only ASCII letters.
pub fn letters_only(text: &str) -> String {
    text.chars().filter(char::is_ascii_alphabetic).collect()
}
