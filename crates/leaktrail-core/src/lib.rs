//! Leaktrail Core - Foundation crate for the Leaktrail leak monitor.
//!
//! This crate provides the shared data model, scan settings, configuration
//! management, and error types that the other Leaktrail crates depend on.
//!
//! # Modules
//!
//! - [`error`] - Central error types using thiserror
//! - [`config`] - TOML-based configuration with XDG paths
//! - [`settings`] - Scan settings controlling extraction and matching
//! - [`types`] - Shared data types (`Source`, `SourceKind`, `Finding`, `Target`)
//!
//! # Example
//!
//! ```rust
//! use leaktrail_core::{ScanSettings, Source, SourceKind};
//!
//! let settings = ScanSettings::default();
//! assert!(settings.search_query_values);
//!
//! let source = Source::new(
//!     SourceKind::QueryValue,
//!     "https://a.example/search?q=secret123",
//!     "secret123",
//! );
//! assert!(source.is_some());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod settings;
pub mod types;

// Re-export commonly used types
pub use config::{AppConfig, StorageConfig};
pub use error::{ConfigError, ConfigResult, LeaktrailError, Result};
pub use settings::ScanSettings;
pub use types::{Finding, Source, SourceKind, Target};
