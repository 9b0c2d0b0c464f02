use thiserror::Error;

/// Errors raised by the taint engine.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A page or request URL could not be parsed. The scan for that one
    /// event is abandoned entirely; no partial sources or findings are
    /// produced.
    #[error("failed to parse URL '{url}': {source}")]
    UrlParse {
        /// The URL that failed to parse
        url: String,
        /// The underlying parse error
        source: url::ParseError,
    },
}

/// Result type alias for scanning operations.
pub type Result<T> = std::result::Result<T, ScanError>;
