//! Malicious-link check.
//!
//! Flags obfuscated URLs once per text, then classifies each standard URL by
//! a fixed precedence: trusted host, IP literal, plain HTTP, shortener,
//! look-alike domain. The first rule that fires decides the URL's finding.
//!
//! Hostname parsing never fails the check: a URL whose host cannot be
//! determined simply does not match any host-based rule.
//!
//! License: MIT OR APACHE 2.0

use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use crate::checks::is_blank;
use crate::compiler::CompiledLexicon;
use crate::engine::ContentCheck;
use crate::moderation_result::{log_finding_debug, CheckKind, Finding};
use crate::validators::{host_matches_domain, host_of, is_insecure_scheme, is_ipv4_host};

static OBFUSCATED_SCHEME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)hxxps?://").expect("obfuscated scheme regex is valid"));

static BRACKETED_DOT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\w+\[\.\]\w+").expect("bracketed dot regex is valid"));

static STANDARD_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)https?://[^\s<>"'`{}|\\^\[\]]+"#).expect("standard URL regex is valid")
});

static OBFUSCATED_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?i)hxxps?://[^\s<>"'`{}|\\^]+"#).expect("obfuscated URL regex is valid")
});

static BRACKETED_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\w-]+(?:\[\.\][\w-]+)+[^\s]*").expect("bracketed URL regex is valid")
});

/// Sentence punctuation that is almost never part of a URL when it ends one.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')'];

/// A URL-like substring found in the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedUrl {
    pub raw: String,
    /// `hxxp(s)://` or `domain[.]tld` forms. Covered by the text-wide
    /// obfuscation finding and never classified individually.
    pub obfuscated: bool,
}

/// Extracts standard URLs, then `hxxp(s)://` URLs, then bracket-obfuscated
/// domains, in that order.
pub fn extract_urls(text: &str) -> Vec<ExtractedUrl> {
    let standard = STANDARD_URL.find_iter(text).filter_map(|m| {
        let trimmed = m.as_str().trim_end_matches(TRAILING_PUNCTUATION);
        (!trimmed.is_empty()).then(|| ExtractedUrl { raw: trimmed.to_string(), obfuscated: false })
    });
    let obfuscated = OBFUSCATED_URL
        .find_iter(text)
        .chain(BRACKETED_URL.find_iter(text))
        .map(|m| ExtractedUrl { raw: m.as_str().to_string(), obfuscated: true });

    standard.chain(obfuscated).collect()
}

/// True if the text contains an `hxxp(s)://` scheme or a `word[.]word` domain.
pub fn has_obfuscated_url(text: &str) -> bool {
    OBFUSCATED_SCHEME.is_match(text) || BRACKETED_DOT.is_match(text)
}

#[derive(Debug, Clone)]
pub struct LinkCheck {
    lexicon: Arc<CompiledLexicon>,
}

impl LinkCheck {
    pub fn new(lexicon: Arc<CompiledLexicon>) -> Self {
        Self { lexicon }
    }

    fn is_trusted(&self, host: &str) -> bool {
        self.lexicon
            .trusted_domains
            .iter()
            .any(|domain| host_matches_domain(host, domain))
    }

    fn is_shortener(&self, host: &str) -> bool {
        self.lexicon
            .url_shorteners
            .iter()
            .any(|domain| host_matches_domain(host, domain))
    }

    fn is_lookalike(&self, host: &str) -> bool {
        self.lexicon
            .suspicious_domains
            .iter()
            .any(|pattern| pattern.regex.is_match(host))
    }

    /// Classifies one standard URL. `None` means nothing suspicious.
    pub fn classify(&self, raw_url: &str) -> Option<Finding> {
        let host = host_of(raw_url);
        let host = host.as_deref();
        if host.is_none() {
            debug!("Link check: could not determine host of a URL; host rules skipped.");
        }

        if host.is_some_and(|h| self.is_trusted(h)) {
            return None;
        }
        if host.is_some_and(is_ipv4_host) {
            return Some(Finding::IpAddressUrl);
        }
        if is_insecure_scheme(raw_url) {
            return Some(Finding::InsecureHttp);
        }
        if host.is_some_and(|h| self.is_shortener(h)) {
            return Some(Finding::UrlShortener);
        }
        if host.is_some_and(|h| self.is_lookalike(h)) {
            return Some(Finding::PhishingDomain);
        }
        None
    }
}

impl ContentCheck for LinkCheck {
    fn kind(&self) -> CheckKind {
        CheckKind::Links
    }

    fn run(&self, text: &str) -> Vec<Finding> {
        if is_blank(text) {
            return Vec::new();
        }

        let mut findings = Vec::new();
        if has_obfuscated_url(text) {
            log_finding_debug(self.kind(), Finding::ObfuscatedUrl, text);
            findings.push(Finding::ObfuscatedUrl);
        }

        for url in extract_urls(text).into_iter().filter(|u| !u.obfuscated) {
            if let Some(finding) = self.classify(&url.raw) {
                log_finding_debug(self.kind(), finding, &url.raw);
                findings.push(finding);
            }
        }
        findings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::compile_lexicon;
    use crate::config::LexiconConfig;

    fn check() -> LinkCheck {
        let config = LexiconConfig::load_default()
            .unwrap()
            .with_site_domains(["portfolio.dev"]);
        LinkCheck::new(Arc::new(compile_lexicon(&config).unwrap()))
    }

    #[test]
    fn extraction_order_and_trimming() {
        let urls = extract_urls("see hxxp://evil.com and https://a.com/x. then bad[.]net");
        let raws: Vec<_> = urls.iter().map(|u| (u.raw.as_str(), u.obfuscated)).collect();
        assert_eq!(
            raws,
            vec![
                ("https://a.com/x", false),
                ("hxxp://evil.com", true),
                ("bad[.]net", true),
            ]
        );
    }

    #[test]
    fn trusted_hosts_and_subdomains_are_skipped() {
        let c = check();
        assert_eq!(c.classify("https://github.com/user/repo"), None);
        assert_eq!(c.classify("http://docs.github.com"), None);
        assert_eq!(c.classify("https://www.portfolio.dev/about"), None);
    }

    #[test]
    fn precedence_ip_before_http() {
        assert_eq!(check().classify("http://192.168.1.1/admin"), Some(Finding::IpAddressUrl));
    }

    #[test]
    fn each_rule_fires() {
        let c = check();
        assert_eq!(c.classify("http://random-site.com"), Some(Finding::InsecureHttp));
        assert_eq!(c.classify("https://bit.ly/abc123"), Some(Finding::UrlShortener));
        assert_eq!(c.classify("https://g00gle.com/login"), Some(Finding::PhishingDomain));
        assert_eq!(c.classify("https://micr0s0ft.com"), Some(Finding::PhishingDomain));
        assert_eq!(c.classify("https://random-site.com"), None);
    }

    #[test]
    fn lookalike_pattern_applies_to_untrusted_genuine_domain() {
        assert_eq!(check().classify("https://paypal.com/signin"), Some(Finding::PhishingDomain));
        assert_eq!(check().classify("https://paypa1.com/signin"), Some(Finding::PhishingDomain));
        // google.com is on the safe list, which is consulted first.
        assert_eq!(check().classify("https://google.com"), None);
    }

    #[test]
    fn safe_domains_entry_exempts_a_lookalike_match() {
        let mut config = LexiconConfig::load_default().unwrap();
        config.safe_domains.push("paypal.com".into());
        let c = LinkCheck::new(Arc::new(compile_lexicon(&config).unwrap()));
        assert_eq!(c.classify("https://paypal.com/signin"), None);
    }

    #[test]
    fn urls_glued_to_preceding_word_are_extracted() {
        let c = check();
        assert_eq!(c.run("see_http://192.168.1.1/x"), vec![Finding::IpAddressUrl]);
        assert_eq!(c.run("clickhttp://malware.com"), vec![Finding::InsecureHttp]);
        assert_eq!(c.run("gohttps://bit.ly/abc"), vec![Finding::UrlShortener]);
        assert_eq!(c.run("(https://g00gle.com)"), vec![Finding::PhishingDomain]);
    }

    #[test]
    fn glued_obfuscated_url_is_extracted() {
        let urls = extract_urls("visithxxp://evil.com");
        assert_eq!(
            urls,
            vec![ExtractedUrl { raw: "hxxp://evil.com".to_string(), obfuscated: true }]
        );
    }

    #[test]
    fn one_issue_per_url_in_text_order() {
        let findings = check().run("http://1.2.3.4 https://bit.ly/x https://g00gle.com");
        assert_eq!(
            findings,
            vec![Finding::IpAddressUrl, Finding::UrlShortener, Finding::PhishingDomain]
        );
    }

    #[test]
    fn urls_inside_sentences_are_extracted() {
        let urls: Vec<String> = extract_urls("Docs at <https://a.com/p?q=1>, mirror \"http://b.org/x\"; or https://c.net!")
            .into_iter()
            .map(|u| u.raw)
            .collect();
        assert_eq!(urls, vec!["https://a.com/p?q=1", "http://b.org/x", "https://c.net"]);
    }

    #[test]
    fn malformed_url_does_not_panic() {
        assert_eq!(check().classify("https://exa mple"), None);
        assert_eq!(check().classify("http://"), Some(Finding::InsecureHttp));
    }

    #[test]
    fn obfuscation_reported_once_and_first() {
        let findings = check().run("go to hxxp://a.com or b[.]com or http://plain.org");
        assert_eq!(findings, vec![Finding::ObfuscatedUrl, Finding::InsecureHttp]);
    }
}
