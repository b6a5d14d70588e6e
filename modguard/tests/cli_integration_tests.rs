// modguard/tests/cli_integration_tests.rs
//! Command-line integration tests for the `modguard` binary.
//!
//! Every test runs the real executable with `--no-user-lexicon` (or an
//! explicit `--lexicon`) so a lexicon in the developer's home directory
//! cannot change the outcome. Output is stripped of ANSI escapes before
//! plain-text assertions.

use anyhow::Result;
use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn modguard() -> Command {
    let mut cmd = Command::cargo_bin("modguard").unwrap();
    cmd.env_remove("MODGUARD_LEXICON");
    cmd.env("RUST_LOG", "debug");
    cmd
}

fn run_check(input: &str, args: &[&str]) -> assert_cmd::assert::Assert {
    let mut cmd = modguard();
    cmd.arg("check").arg("--no-user-lexicon").args(args);
    cmd.write_stdin(input).assert()
}

fn strip_ansi(bytes: &[u8]) -> String {
    String::from_utf8_lossy(&strip_ansi_escapes::strip(bytes)).into_owned()
}

fn report_json(output: &[u8]) -> serde_json::Value {
    serde_json::from_slice(output).expect("stdout should be a JSON report")
}

#[test]
fn clean_text_from_stdin_is_safe() {
    let assert = run_check("Hello, how are you today?\n", &[]).success();
    let stdout = strip_ansi(&assert.get_output().stdout);
    assert!(stdout.contains("Verdict: SAFE (25 characters checked)"), "stdout: {}", stdout);
}

#[test]
fn json_report_has_all_fields() {
    let assert = run_check("DAMN IT!!!! Visit http://bad.com NOW!!!!", &["--json-stdout"]).success();
    let report = report_json(&assert.get_output().stdout);

    assert_eq!(report["safe"], false);
    assert_eq!(report["content_length"], 40);
    assert!(report["timestamp"].as_str().is_some_and(|t| !t.is_empty()));

    let issues: Vec<&str> = report["issues"]
        .as_array()
        .unwrap()
        .iter()
        .filter_map(|v| v.as_str())
        .collect();
    assert_eq!(issues.first(), Some(&"Profanity: profanity detected"));
    assert!(issues.contains(&"Spam: excessive punctuation detected"));
    assert_eq!(issues.last(), Some(&"Link: insecure HTTP link detected"));
}

#[test]
fn unsafe_text_prints_issue_table() {
    let assert = run_check("Click here to claim your prize", &[]).success();
    let stdout = strip_ansi(&assert.get_output().stdout);
    assert!(stdout.contains("Verdict: UNSAFE"));
    assert!(stdout.contains("Spam"));
    assert!(stdout.contains("spam phrase detected"));
}

#[test]
fn fail_on_unsafe_sets_exit_code() {
    run_check("Get rich quick: https://bit.ly/abc123", &["--fail-on-unsafe"]).code(1);
    run_check("A perfectly ordinary sentence.", &["--fail-on-unsafe"]).code(0);
}

#[test]
fn selected_checks_only() {
    let assert = run_check("Damn, visit http://bad.com", &["--checks", "links", "--json-stdout"]).success();
    let report = report_json(&assert.get_output().stdout);
    assert_eq!(report["issues"], serde_json::json!(["Link: insecure HTTP link detected"]));
}

#[test]
fn text_argument_takes_precedence_over_stdin() {
    let assert = modguard()
        .args(["check", "--no-user-lexicon", "--json-stdout", "--text", "hello there"])
        .write_stdin("this is shit")
        .assert()
        .success();
    let report = report_json(&assert.get_output().stdout);
    assert_eq!(report["safe"], true);
    assert_eq!(report["content_length"], 11);
}

#[test]
fn input_file_is_read() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "Visit http://192.168.1.1/admin")?;
    let path = file.path().to_str().unwrap();

    let assert = run_check("", &["--input-file", path, "--json-stdout"]).success();
    let report = report_json(&assert.get_output().stdout);
    assert_eq!(report["issues"], serde_json::json!(["Link: IP address URL detected - suspicious"]));
    Ok(())
}

#[test]
fn empty_input_is_rejected_with_exit_code_2() {
    let assert = run_check("\n", &[]).code(2);
    let stderr = strip_ansi(&assert.get_output().stderr);
    assert!(stderr.contains("Content must not be empty"), "stderr: {}", stderr);
}

#[test]
fn oversized_input_is_rejected_with_exit_code_2() {
    let content = "a".repeat(50_001);
    let assert = run_check(&content, &[]).code(2);
    let stderr = strip_ansi(&assert.get_output().stderr);
    assert!(stderr.contains("maximum allowed is 50000"), "stderr: {}", stderr);
}

#[test]
fn unknown_check_name_is_a_usage_error() {
    run_check("hello", &["--checks", "virus"])
        .code(2)
        .stderr(predicate::str::contains("unknown check 'virus'"));
}

#[test]
fn custom_lexicon_extends_the_defaults() -> Result<()> {
    let mut lexicon = NamedTempFile::new()?;
    writeln!(lexicon, "profanity:\n  - frak\nsafe_domains:\n  - example.org")?;
    let path = lexicon.path().to_str().unwrap();

    let assert = run_check("frak off, see http://example.org", &["--lexicon", path, "--json-stdout"]).success();
    let report = report_json(&assert.get_output().stdout);
    assert_eq!(report["issues"], serde_json::json!(["Profanity: profanity detected"]));

    let assert = run_check("this is shit", &["--lexicon", path, "--json-stdout"]).success();
    let report = report_json(&assert.get_output().stdout);
    assert_eq!(report["safe"], false);
    Ok(())
}

#[test]
fn site_domain_links_are_trusted() {
    let assert = run_check("My work: http://portfolio.dev", &["--json-stdout"]).success();
    assert_eq!(report_json(&assert.get_output().stdout)["safe"], false);

    let assert = run_check(
        "My work: http://portfolio.dev",
        &["--site-domain", "portfolio.dev", "--json-stdout"],
    )
    .success();
    assert_eq!(report_json(&assert.get_output().stdout)["safe"], true);
}

#[test]
fn lexicon_validate_accepts_good_file() -> Result<()> {
    let mut lexicon = NamedTempFile::new()?;
    writeln!(
        lexicon,
        "suspicious_domains:\n  - name: github_typo\n    pattern: \"^g[i1]thu[b8]\\\\.com$\""
    )?;
    modguard()
        .args(["lexicon", "validate"])
        .arg(lexicon.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("is valid"));
    Ok(())
}

#[test]
fn lexicon_validate_rejects_bad_pattern() -> Result<()> {
    let mut lexicon = NamedTempFile::new()?;
    writeln!(lexicon, "suspicious_domains:\n  - name: broken\n    pattern: \"(unclosed\"")?;
    let assert = modguard()
        .args(["lexicon", "validate"])
        .arg(lexicon.path())
        .assert()
        .failure();
    let stderr = strip_ansi(&assert.get_output().stderr);
    assert!(stderr.contains("broken"), "stderr: {}", stderr);
    Ok(())
}

#[test]
fn lexicon_show_lists_counts_and_thresholds() {
    modguard()
        .args(["lexicon", "show", "--no-user-lexicon", "--site-domain", "portfolio.dev"])
        .assert()
        .success()
        .stdout(predicate::str::contains("profanity"))
        .stdout(predicate::str::contains("caps_ratio"))
        .stdout(predicate::str::contains("Site domains: portfolio.dev"));
}
