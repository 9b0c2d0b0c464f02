//! Source extraction from page URLs.
//!
//! Derives the set of candidate "source" values from the URL of the page the
//! user is on. Any extracted value is a candidate, unconditionally; there is
//! no entropy or secret-classification heuristic.

use crate::error::{Result, ScanError};
use leaktrail_core::{ScanSettings, Source, SourceKind};
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Characters left unescaped when percent-encoding a URI component:
/// ASCII alphanumerics plus `- _ . ! ~ * ' ( )`.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encode a value as a URI component.
pub(crate) fn encode_component(raw: &str) -> String {
    utf8_percent_encode(raw, URI_COMPONENT).to_string()
}

/// Split a URL's path on `/`.
///
/// Leading and duplicate slashes yield empty segments (`/a//b` splits into
/// `["", "a", "", "b"]`); callers filter those where they matter.
pub(crate) fn path_segments(url: &Url) -> impl Iterator<Item = &str> {
    url.path().split('/')
}

/// Extract candidate source values from a page URL.
///
/// Which strategies run is controlled by `settings`:
/// - `search_query_values`: every query-parameter value (parameter names are
///   not scanned), paired with its percent-encoded form when encoding
///   changes the string
/// - `search_path`: every path segment, with the same encoded pairing
/// - `search_null_undefined`: the literal sentinels `"undefined"` and
///   `"null"`, regardless of URL content
///
/// Empty values are discarded, so every returned source satisfies the
/// non-empty invariant. The result is in insertion order but callers must
/// not depend on it; treat it as a set.
///
/// # Errors
/// Returns `ScanError::UrlParse` if `page_url` is not a valid URL. The whole
/// extraction is aborted; no partial results are returned.
pub fn extract_sources(page_url: &str, settings: &ScanSettings) -> Result<Vec<Source>> {
    let parsed = Url::parse(page_url).map_err(|source| ScanError::UrlParse {
        url: page_url.to_string(),
        source,
    })?;

    let mut sources = Vec::new();

    if settings.search_query_values {
        for (_, value) in parsed.query_pairs() {
            push_with_encoded_pair(
                &mut sources,
                SourceKind::QueryValue,
                SourceKind::QueryValueEncoded,
                page_url,
                &value,
            );
        }
    }

    if settings.search_path {
        for segment in path_segments(&parsed) {
            push_with_encoded_pair(
                &mut sources,
                SourceKind::PathValue,
                SourceKind::PathValueEncoded,
                page_url,
                segment,
            );
        }
    }

    if settings.search_null_undefined {
        // Sentinels for client-side bugs that serialize absent values into
        // URLs; emitted regardless of what the page URL contains.
        sources.extend(Source::new(SourceKind::UndefinedValue, page_url, "undefined"));
        sources.extend(Source::new(SourceKind::NullValue, page_url, "null"));
    }

    Ok(sources)
}

/// Push a raw source and, when percent-encoding changes the value, its
/// encoded companion. `Source::new` drops empty values on both paths.
fn push_with_encoded_pair(
    sources: &mut Vec<Source>,
    raw_kind: SourceKind,
    encoded_kind: SourceKind,
    origin_url: &str,
    value: &str,
) {
    sources.extend(Source::new(raw_kind, origin_url, value));

    let encoded = encode_component(value);
    if encoded != value {
        sources.extend(Source::new(encoded_kind, origin_url, encoded));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn values_of_kind(sources: &[Source], kind: SourceKind) -> Vec<&str> {
        sources
            .iter()
            .filter(|s| s.kind() == kind)
            .map(Source::value)
            .collect()
    }

    #[test]
    fn test_query_values_extracted() {
        let sources = extract_sources(
            "https://a.example/search?q=secret123&page=2",
            &ScanSettings::default(),
        )
        .expect("extract sources");

        let query_values = values_of_kind(&sources, SourceKind::QueryValue);
        assert!(query_values.contains(&"secret123"));
        assert!(query_values.contains(&"2"));
    }

    #[test]
    fn test_query_parameter_names_not_scanned() {
        let sources = extract_sources(
            "https://a.example/?token_name=abc",
            &ScanSettings::default(),
        )
        .expect("extract sources");

        assert!(!values_of_kind(&sources, SourceKind::QueryValue).contains(&"token_name"));
    }

    #[test]
    fn test_encoded_pairing_law() {
        let sources = extract_sources(
            "https://a.example/?redirect=https%3A%2F%2Fb.example%2Fhome&plain=abc",
            &ScanSettings::default(),
        )
        .expect("extract sources");

        // Encoding "https://b.example/home" changes it, so both forms exist
        let raw = values_of_kind(&sources, SourceKind::QueryValue);
        assert!(raw.contains(&"https://b.example/home"));
        let encoded = values_of_kind(&sources, SourceKind::QueryValueEncoded);
        assert!(encoded.contains(&"https%3A%2F%2Fb.example%2Fhome"));

        // Encoding "abc" is a no-op, so no encoded companion is emitted
        assert!(raw.contains(&"abc"));
        assert_eq!(encoded.len(), 1);
    }

    #[test]
    fn test_path_segments_extracted() {
        let sources = extract_sources("https://a.example/users/42", &ScanSettings::default())
            .expect("extract sources");

        let path_values = values_of_kind(&sources, SourceKind::PathValue);
        assert!(path_values.contains(&"users"));
        assert!(path_values.contains(&"42"));
    }

    #[test]
    fn test_empty_segments_filtered() {
        // "/a//b" splits into ["", "a", "", "b"]; the empties are dropped
        let sources = extract_sources("https://a.example/a//b", &ScanSettings::default())
            .expect("extract sources");

        assert_eq!(values_of_kind(&sources, SourceKind::PathValue), vec!["a", "b"]);
        for source in &sources {
            assert!(!source.value().is_empty());
        }
    }

    #[test]
    fn test_empty_query_value_filtered() {
        let sources = extract_sources("https://a.example/?name=", &ScanSettings::default())
            .expect("extract sources");

        assert!(values_of_kind(&sources, SourceKind::QueryValue).is_empty());
    }

    #[test]
    fn test_sentinels_present_regardless_of_content() {
        let sources =
            extract_sources("https://a.example/", &ScanSettings::default()).expect("extract");

        assert_eq!(
            values_of_kind(&sources, SourceKind::UndefinedValue),
            vec!["undefined"]
        );
        assert_eq!(values_of_kind(&sources, SourceKind::NullValue), vec!["null"]);
    }

    #[test]
    fn test_sentinels_disabled() {
        let settings = ScanSettings {
            search_null_undefined: false,
            ..ScanSettings::default()
        };
        let sources = extract_sources("https://a.example/", &settings).expect("extract");

        assert!(values_of_kind(&sources, SourceKind::UndefinedValue).is_empty());
        assert!(values_of_kind(&sources, SourceKind::NullValue).is_empty());
    }

    #[test]
    fn test_disabled_strategies_emit_nothing() {
        let settings = ScanSettings {
            search_query_values: false,
            search_path: false,
            search_null_undefined: false,
            ..ScanSettings::default()
        };
        let sources =
            extract_sources("https://a.example/users/42?q=secret", &settings).expect("extract");

        assert!(sources.is_empty());
    }

    #[test]
    fn test_invalid_url_fails_fast() {
        let result = extract_sources("not a url", &ScanSettings::default());
        assert!(matches!(result, Err(ScanError::UrlParse { .. })));
    }

    #[test]
    fn test_extraction_deterministic() {
        let url = "https://a.example/users/42?q=secret%20value&x=1";
        let settings = ScanSettings::default();

        let first: HashSet<Source> = extract_sources(url, &settings)
            .expect("extract")
            .into_iter()
            .collect();
        let second: HashSet<Source> = extract_sources(url, &settings)
            .expect("extract")
            .into_iter()
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_encode_component_matches_uri_component_rules() {
        assert_eq!(encode_component("abc-_.!~*'()"), "abc-_.!~*'()");
        assert_eq!(encode_component("a b"), "a%20b");
        assert_eq!(encode_component("a/b?c=d"), "a%2Fb%3Fc%3Dd");
        assert_eq!(encode_component("\u{e9}"), "%C3%A9");
    }
}
