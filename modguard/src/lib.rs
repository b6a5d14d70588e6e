// modguard/src/lib.rs
//! # modguard CLI
//!
//! Terminal front end for `modguard-core`: reads text from a file, an
//! argument or stdin, moderates it and prints a report.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod ui;
