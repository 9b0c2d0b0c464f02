//! Sink matching against request URLs.
//!
//! Scans the path of an outgoing request's URL for occurrences of previously
//! extracted source values. Matching is deliberately restricted to the
//! target's path segments; the target's query string and fragment are never
//! scanned.

use crate::error::{Result, ScanError};
use crate::extractor::path_segments;
use leaktrail_core::{Finding, ScanSettings, Source};
use url::Url;

/// Find source values that reappear in a request URL's path.
///
/// Every `(source, segment)` pair over the non-empty path segments of
/// `target_url` is checked: with `partial_match` a segment matches when it
/// contains the source value as a substring, otherwise only on exact
/// equality. Duplicate findings are intentionally retained; a segment may
/// match several sources and several segments may match one source.
///
/// Both collections are bounded by URL length, so the O(sources × segments)
/// pairing needs no special-casing for scale.
///
/// # Errors
/// Returns `ScanError::UrlParse` if `target_url` is not a valid URL. The
/// scan for this event is abandoned; no partial findings are returned.
pub fn find_leaks(
    target_url: &str,
    sources: &[Source],
    settings: &ScanSettings,
) -> Result<Vec<Finding>> {
    let parsed = Url::parse(target_url).map_err(|source| ScanError::UrlParse {
        url: target_url.to_string(),
        source,
    })?;

    let segments: Vec<&str> = path_segments(&parsed)
        .filter(|segment| !segment.is_empty())
        .collect();

    let mut findings = Vec::new();

    for source in sources {
        for segment in &segments {
            let matched = if settings.partial_match {
                segment.contains(source.value())
            } else {
                *segment == source.value()
            };

            if matched {
                findings.push(Finding::new(source.clone(), target_url));
            }
        }
    }

    Ok(findings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::extract_sources;
    use leaktrail_core::SourceKind;
    use std::collections::HashSet;

    fn source(value: &str) -> Source {
        Source::new(SourceKind::QueryValue, "https://a.example/?q=x", value)
            .expect("non-empty source")
    }

    #[test]
    fn test_exact_match_in_path() {
        let sources = vec![source("secret123")];
        let findings = find_leaks(
            "https://ads.example/track/secret123",
            &sources,
            &ScanSettings::default(),
        )
        .expect("find leaks");

        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].target.url, "https://ads.example/track/secret123");
        assert_eq!(findings[0].source.value(), "secret123");
    }

    #[test]
    fn test_target_query_string_not_scanned() {
        // "142" contains "42" but only the target's path is matched
        let sources = vec![source("42")];
        let findings = find_leaks(
            "https://ads.example/pixel?x=142",
            &sources,
            &ScanSettings::default(),
        )
        .expect("find leaks");

        assert!(findings.is_empty());
    }

    #[test]
    fn test_target_fragment_not_scanned() {
        let sources = vec![source("secret123")];
        let findings = find_leaks(
            "https://ads.example/pixel#secret123",
            &sources,
            &ScanSettings::default(),
        )
        .expect("find leaks");

        assert!(findings.is_empty());
    }

    #[test]
    fn test_partial_match_substring() {
        let sources = vec![source("42")];
        let findings = find_leaks(
            "https://ads.example/user-42-profile",
            &sources,
            &ScanSettings::default(),
        )
        .expect("find leaks");

        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_exact_mode_rejects_substring() {
        let settings = ScanSettings {
            partial_match: false,
            ..ScanSettings::default()
        };
        let sources = vec![source("42")];

        let findings = find_leaks("https://ads.example/user-42-profile", &sources, &settings)
            .expect("find leaks");
        assert!(findings.is_empty());

        let findings =
            find_leaks("https://ads.example/42", &sources, &settings).expect("find leaks");
        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_partial_match_superset_of_exact() {
        let url = "https://a.example/alpha/beta-42/null";
        let sources = extract_sources(
            "https://b.example/beta/42?q=alpha",
            &ScanSettings::default(),
        )
        .expect("extract sources");

        let exact_settings = ScanSettings {
            partial_match: false,
            ..ScanSettings::default()
        };
        let exact: HashSet<Finding> = find_leaks(url, &sources, &exact_settings)
            .expect("find leaks")
            .into_iter()
            .collect();
        let partial: HashSet<Finding> = find_leaks(url, &sources, &ScanSettings::default())
            .expect("find leaks")
            .into_iter()
            .collect();

        assert!(exact.is_subset(&partial));
    }

    #[test]
    fn test_duplicates_retained() {
        // One source matching two segments, and two sources matching one
        // segment, both produce one finding per pair.
        let sources = vec![source("42"), source("user-42")];
        let findings = find_leaks(
            "https://ads.example/user-42/42",
            &sources,
            &ScanSettings::default(),
        )
        .expect("find leaks");

        assert_eq!(findings.len(), 3);
    }

    #[test]
    fn test_empty_segments_never_match() {
        // "//" in the target path yields empty segments; they must not pair
        // with any source
        let sources = vec![source("x")];
        let findings = find_leaks("https://ads.example//x//", &sources, &ScanSettings::default())
            .expect("find leaks");

        assert_eq!(findings.len(), 1);
    }

    #[test]
    fn test_invalid_target_url_fails_fast() {
        let sources = vec![source("42")];
        let result = find_leaks("::not a url::", &sources, &ScanSettings::default());
        assert!(matches!(result, Err(ScanError::UrlParse { .. })));
    }

    #[test]
    fn test_no_sources_no_findings() {
        let findings = find_leaks(
            "https://ads.example/anything",
            &[],
            &ScanSettings::default(),
        )
        .expect("find leaks");
        assert!(findings.is_empty());
    }
}
