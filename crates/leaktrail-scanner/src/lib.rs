//! Leaktrail Scanner - URL taint tracking for leaked page-URL values.
//!
//! This crate implements the taint-extraction-and-matching engine at the
//! heart of Leaktrail: deriving candidate "source" values from the URL of
//! the page the user is on, then scanning the URLs of subsequent outgoing
//! requests for reappearances of those values. Each hit becomes a structured
//! finding appended to the store.
//!
//! # Features
//!
//! - Pure, synchronous extraction and matching stages, safe to run from any
//!   task without coordination
//! - Per-event page-URL snapshots through a single-writer `watch` channel
//! - Fail-fast URL parsing: one malformed URL abandons that one scan, never
//!   the monitoring loop
//!
//! # Example
//!
//! ```rust
//! use leaktrail_core::ScanSettings;
//! use leaktrail_scanner::{extract_sources, find_leaks};
//!
//! # fn main() -> Result<(), leaktrail_scanner::ScanError> {
//! let settings = ScanSettings::default();
//! let sources = extract_sources("https://a.example/search?q=secret123", &settings)?;
//! let findings = find_leaks("https://ads.example/track/secret123", &sources, &settings)?;
//! assert!(!findings.is_empty());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

#[allow(missing_docs)]
pub mod error;
pub mod extractor;
pub mod matcher;
pub mod orchestrator;
pub mod tracker;

// Re-export commonly used types
pub use error::{Result, ScanError};
pub use extractor::extract_sources;
pub use matcher::find_leaks;
pub use orchestrator::ScanOrchestrator;
pub use tracker::{page_tracker, PageTracker, PageTrackerHandle};
