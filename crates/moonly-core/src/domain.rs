//! Client domain resolution and comparison.
//!
//! Hosts arrive either as a bare hostname (`viden.dk`) or as the full site URL
//! (`https://viden.dk/wp`). Both are reduced to the host, then internationalized
//! names are normalized to their readable Unicode form so that `xn--brn-0na.dk`
//! and `børn.dk` compare equal.

use url::Url;

/// Extract the public hostname from a site URL or bare host.
///
/// Returns `None` when nothing host-like remains after trimming.
pub fn resolve_client_host(input: &str) -> Option<String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return None;
    }

    if trimmed.contains("://") {
        let parsed = Url::parse(trimmed).ok()?;
        return parsed
            .host_str()
            .map(|h| h.trim_end_matches('.').to_string())
            .filter(|h| !h.is_empty());
    }

    let host = trimmed
        .split(|c| c == '/' || c == '?' || c == '#')
        .next()
        .unwrap_or(trimmed);
    let host = if host.starts_with('[') {
        host
    } else {
        host.split(':').next().unwrap_or(host)
    };
    let host = host.trim_end_matches('.');

    if host.is_empty() {
        None
    } else {
        Some(host.to_string())
    }
}

/// Normalize a hostname to lowercase readable Unicode.
///
/// Punycode labels are decoded. Inputs the IDNA mapping rejects fall back to a
/// trimmed, lowercased copy so comparison stays deterministic.
pub fn normalize_domain(host: &str) -> String {
    let trimmed = host.trim().trim_end_matches('.');
    let unicode = url::quirks::domain_to_unicode(trimmed);
    if unicode.is_empty() {
        trimmed.to_lowercase()
    } else {
        unicode
    }
}

/// Case-insensitive, whitespace-insensitive, IDN-aware domain equality.
pub fn domains_match(a: &str, b: &str) -> bool {
    let a = normalize_domain(a);
    !a.is_empty() && a == normalize_domain(b)
}
