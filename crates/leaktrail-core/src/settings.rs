//! Scan settings controlling extraction and matching behavior.
//!
//! Settings are constructed once at process start and never mutated by the
//! scanning core; runtime reconfiguration, if any, is an external concern.

use serde::{Deserialize, Serialize};

/// Static configuration for the taint-extraction-and-matching engine.
///
/// All switches default to enabled, matching the monitor's out-of-the-box
/// behavior of treating every extracted value as a candidate secret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanSettings {
    /// Extract query-parameter values from the page URL
    pub search_query_values: bool,
    /// Extract path segments from the page URL
    pub search_path: bool,
    /// Always check for the literal sentinels `"undefined"` and `"null"`
    pub search_null_undefined: bool,
    /// Clear stored findings when the page is refreshed.
    /// Declared but currently inert; honored by callers, not by the engine.
    pub clear_on_refresh: bool,
    /// Case-insensitive matching.
    /// Declared but currently inert; neither extraction nor matching consults it.
    pub case_insensitive: bool,
    /// Match when a path segment contains a source value as a substring,
    /// rather than only on exact equality
    pub partial_match: bool,
}

impl Default for ScanSettings {
    fn default() -> Self {
        Self {
            search_query_values: true,
            search_path: true,
            search_null_undefined: true,
            clear_on_refresh: true,
            case_insensitive: true,
            partial_match: true,
        }
    }
}
