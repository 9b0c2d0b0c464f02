//! Shared types used across the Leaktrail crates.
//!
//! This module defines the data model of the taint engine: a [`Source`] is a
//! candidate sensitive value observed in a page URL, and a [`Finding`] is the
//! evidence that such a value reappeared in a later request's URL.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where a source value was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// A query-parameter value, as it appeared after decoding
    QueryValue,
    /// The percent-encoded form of a query-parameter value
    QueryValueEncoded,
    /// A `/`-delimited path segment
    PathValue,
    /// The percent-encoded form of a path segment
    PathValueEncoded,
    /// The literal sentinel `"undefined"`, checked regardless of URL content
    UndefinedValue,
    /// The literal sentinel `"null"`, checked regardless of URL content
    NullValue,
}

impl SourceKind {
    /// Parse from the persisted string representation.
    ///
    /// Returns `None` for unknown strings so callers can surface a decode
    /// error instead of silently defaulting.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "query_value" => Some(Self::QueryValue),
            "query_value_encoded" => Some(Self::QueryValueEncoded),
            "path_value" => Some(Self::PathValue),
            "path_value_encoded" => Some(Self::PathValueEncoded),
            "undefined_value" => Some(Self::UndefinedValue),
            "null_value" => Some(Self::NullValue),
            _ => None,
        }
    }

    /// Get the persisted string representation.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::QueryValue => "query_value",
            Self::QueryValueEncoded => "query_value_encoded",
            Self::PathValue => "path_value",
            Self::PathValueEncoded => "path_value_encoded",
            Self::UndefinedValue => "undefined_value",
            Self::NullValue => "null_value",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A candidate sensitive value observed in a page URL.
///
/// The value is guaranteed non-empty: construction through [`Source::new`]
/// rejects empty candidates, so every `Source` in circulation can participate
/// in matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Source {
    kind: SourceKind,
    origin_url: String,
    value: String,
}

impl Source {
    /// Create a new `Source`, rejecting empty values.
    ///
    /// Returns `None` if `value` is empty. Empty candidates arise naturally
    /// from URL segmentation (leading and duplicate slashes) and from blank
    /// query parameters; they carry no signal and are discarded here.
    #[must_use]
    pub fn new(
        kind: SourceKind,
        origin_url: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<Self> {
        let value = value.into();
        if value.is_empty() {
            return None;
        }
        Some(Self {
            kind,
            origin_url: origin_url.into(),
            value,
        })
    }

    /// Where this value was extracted from.
    #[must_use]
    pub fn kind(&self) -> SourceKind {
        self.kind
    }

    /// The page URL this value was extracted from.
    #[must_use]
    pub fn origin_url(&self) -> &str {
        &self.origin_url
    }

    /// The candidate value itself. Never empty.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.value
    }
}

/// The request URL in which a source value was found.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Target {
    /// The request URL
    pub url: String,
}

/// Evidence that a [`Source`] value reappeared in a different URL's path.
///
/// Findings are plain immutable data with structural equality only; they are
/// append-only once stored and duplicates are intentionally retained.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Finding {
    /// The originating source
    pub source: Source,
    /// The request URL in which the value was found
    pub target: Target,
}

impl Finding {
    /// Create a finding for a source observed in `target_url`.
    #[must_use]
    pub fn new(source: Source, target_url: impl Into<String>) -> Self {
        Self {
            source,
            target: Target {
                url: target_url.into(),
            },
        }
    }
}
