use std::collections::HashSet;

use url::Url;

/// Parses a newline-delimited URL list.
///
/// Blank lines and `#` comments are ignored; duplicates collapse to the
/// first occurrence, preserving original order.
pub fn parse_url_list(input: &str) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    for line in input.lines() {
        let candidate = line.trim();
        if candidate.is_empty() || candidate.starts_with('#') {
            continue;
        }
        if seen.insert(candidate.to_string()) {
            urls.push(candidate.to_string());
        }
    }
    urls
}

/// Lowercased hostname of a URL, or empty string when unparsable.
pub fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|parsed| parsed.host_str().map(|host| host.to_ascii_lowercase()))
        .unwrap_or_default()
}
