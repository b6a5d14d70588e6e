//! Terminal output: theme handling and report formatting.

pub mod output_format;
pub mod theme;
