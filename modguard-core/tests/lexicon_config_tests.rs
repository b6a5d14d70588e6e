// modguard-core/tests/lexicon_config_tests.rs
use anyhow::Result;
use std::io::Write;
use tempfile::NamedTempFile;

use modguard_core::config::{self, LexiconConfig, SuspiciousDomain};
use modguard_core::ModerationEngine;

fn write_lexicon(yaml: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new()?;
    file.write_all(yaml.as_bytes())?;
    Ok(file)
}

#[test]
fn test_load_default_lexicon() {
    let lexicon = LexiconConfig::load_default().unwrap();
    assert!(lexicon.profanity.iter().any(|w| w == "damn"));
    assert!(lexicon.spam_phrases.iter().any(|p| p == "click here"));
    assert_eq!(lexicon.spam_words.len(), 10);
    assert!(lexicon.suspicious_domains.iter().any(|p| p.name == "google_typosquat"));
    assert!(lexicon.site_domains.is_empty());
}

#[test]
fn test_load_from_file_normalizes_entries() -> Result<()> {
    let file = write_lexicon(
        r#"
profanity:
  - "  Frak "
  - frak
safe_domains:
  - WWW.Portfolio.Dev
thresholds:
  caps_ratio: 0.8
"#,
    )?;
    let lexicon = LexiconConfig::load_from_file(file.path())?;
    assert_eq!(lexicon.profanity, vec!["frak".to_string()]);
    assert_eq!(lexicon.safe_domains, vec!["portfolio.dev".to_string()]);
    assert_eq!(lexicon.thresholds.caps_ratio(), 0.8);
    assert_eq!(lexicon.thresholds.min_letters_for_caps(), 10);
    Ok(())
}

#[test]
fn test_load_from_file_rejects_invalid_pattern() -> Result<()> {
    let file = write_lexicon(
        r#"
suspicious_domains:
  - name: broken
    pattern: '^(bad\.com$'
"#,
    )?;
    let err = LexiconConfig::load_from_file(file.path()).unwrap_err();
    assert!(format!("{:#}", err).contains("broken"));
    Ok(())
}

#[test]
fn test_load_from_missing_file_fails_with_context() {
    let err = LexiconConfig::load_from_file("/definitely/not/here/lexicon.yaml").unwrap_err();
    assert!(err.to_string().contains("Failed to read lexicon file"));
}

#[test]
fn test_merge_without_user_lexicon_is_identity() {
    let defaults = LexiconConfig::load_default().unwrap();
    let merged = config::merge_lexicons(defaults.clone(), None);
    assert_eq!(merged, defaults);
}

#[test]
fn test_merge_extends_lists_and_overrides_thresholds() {
    let defaults = LexiconConfig::load_default().unwrap();
    let user = LexiconConfig {
        profanity: vec!["frak".into(), "damn".into()],
        site_domains: vec!["portfolio.dev".into()],
        suspicious_domains: vec![
            SuspiciousDomain {
                name: "google_typosquat".into(),
                pattern: r"^go{3,}gle\.com$".into(),
            },
            SuspiciousDomain {
                name: "github_typosquat".into(),
                pattern: r"^g[i1]thub\.com$".into(),
            },
        ],
        thresholds: modguard_core::SpamThresholds {
            acronym_share: Some(0.75),
            ..Default::default()
        },
        ..Default::default()
    };

    let default_count = defaults.profanity.len();
    let default_patterns = defaults.suspicious_domains.len();
    let merged = config::merge_lexicons(defaults, Some(user));

    assert_eq!(merged.profanity.len(), default_count + 1);
    assert_eq!(merged.profanity.last().map(String::as_str), Some("frak"));
    assert_eq!(merged.site_domains, vec!["portfolio.dev".to_string()]);
    assert_eq!(merged.suspicious_domains.len(), default_patterns + 1);
    let google = merged
        .suspicious_domains
        .iter()
        .find(|p| p.name == "google_typosquat")
        .unwrap();
    assert_eq!(google.pattern, r"^go{3,}gle\.com$");
    assert_eq!(merged.thresholds.acronym_share(), 0.75);
    assert_eq!(merged.thresholds.caps_ratio(), 0.6);
}

#[test]
fn test_merged_lexicon_drives_the_engine() -> Result<()> {
    let user_file = write_lexicon(
        r#"
profanity:
  - frak
site_domains:
  - portfolio.dev
"#,
    )?;
    let user = LexiconConfig::load_from_file(user_file.path())?;
    let engine = ModerationEngine::new(config::merge_lexicons(LexiconConfig::load_default()?, Some(user)))?;

    assert_eq!(engine.check_profanity("what the frak"), vec!["profanity detected"]);
    assert!(engine.check_malicious_links("see http://blog.portfolio.dev/post").is_empty());
    assert_eq!(engine.check_profanity("damn"), vec!["profanity detected"]);
    Ok(())
}

#[test]
fn test_candidate_paths_point_at_lexicon_yaml() {
    for path in config::lexicon_candidate_paths() {
        assert_eq!(path.file_name().and_then(|n| n.to_str()), Some("lexicon.yaml"));
    }
}
