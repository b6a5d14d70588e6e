// File: modguard-core/src/validators.rs
//! Programmatic hostname checks used by the link check.
//!
//! Everything here is total: a URL that cannot be parsed simply has no host,
//! and every predicate on a missing host is `false`.
//!
//! License: MIT OR APACHE 2.0

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static IPV4_HOST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{1,3}\.){3}\d{1,3}$").expect("IPv4 host regex is valid"));

/// Extracts the hostname of `raw_url`, lower-cased and with a leading `www.`
/// removed.
///
/// # Returns
///
/// `None` if the URL does not parse or has no host.
pub fn host_of(raw_url: &str) -> Option<String> {
    let parsed = Url::parse(raw_url).ok()?;
    let host = parsed.host_str()?.to_lowercase();
    Some(match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    })
}

/// True if `host` is a dotted-quad IPv4 literal.
pub fn is_ipv4_host(host: &str) -> bool {
    IPV4_HOST.is_match(host)
}

/// True if `host` equals `domain` or is a subdomain of it.
pub fn host_matches_domain(host: &str, domain: &str) -> bool {
    if host == domain {
        return true;
    }
    host.len() > domain.len()
        && host.ends_with(domain)
        && host.as_bytes()[host.len() - domain.len() - 1] == b'.'
}

/// True if the URL uses the plain-text `http://` scheme.
pub fn is_insecure_scheme(raw_url: &str) -> bool {
    raw_url
        .get(..7)
        .is_some_and(|scheme| scheme.eq_ignore_ascii_case("http://"))
}
