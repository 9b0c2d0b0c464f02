//! Scan orchestrator tying extraction and matching to request events.
//!
//! The orchestrator consumes outgoing-request events, snapshots the tracked
//! page URL per event, runs the two pure stages, and forwards each finding
//! to the store. Events are independent computations: a failed scan affects
//! only its own request, never the monitoring loop.

use crate::error::Result;
use crate::extractor::extract_sources;
use crate::matcher::find_leaks;
use crate::tracker::PageTracker;
use leaktrail_core::ScanSettings;
use leaktrail_db::FindingStore;
use tokio::sync::mpsc;

/// Orchestrates leak scans for outgoing request events.
pub struct ScanOrchestrator {
    tracker: PageTracker,
    store: FindingStore,
    settings: ScanSettings,
}

impl ScanOrchestrator {
    /// Create a new scan orchestrator.
    ///
    /// Settings are fixed for the orchestrator's lifetime; reconfiguration
    /// means constructing a new orchestrator.
    #[must_use]
    pub fn new(tracker: PageTracker, store: FindingStore, settings: ScanSettings) -> Self {
        Self {
            tracker,
            store,
            settings,
        }
    }

    /// Consume request events until the channel closes.
    ///
    /// Each received URL is one outgoing network request observed by the
    /// external request source.
    pub async fn run(&self, mut requests: mpsc::Receiver<String>) {
        while let Some(request_url) = requests.recv().await {
            self.handle_request(&request_url).await;
        }
        tracing::debug!("Request stream closed, orchestrator stopping");
    }

    /// Handle one outgoing request event.
    ///
    /// Skips the event when no page is tracked or when the request URL
    /// equals the tracked page URL (self-navigation, not a leak candidate);
    /// neither extraction nor matching runs in those cases. Scan failures
    /// are logged and confined to this event. Returns the number of findings
    /// stored.
    pub async fn handle_request(&self, request_url: &str) -> usize {
        let Some(page_url) = self.tracker.current_page_url() else {
            tracing::trace!("No page tracked, skipping request {}", request_url);
            return 0;
        };

        if page_url == request_url {
            tracing::trace!("Request equals tracked page URL, skipping {}", request_url);
            return 0;
        }

        match self.scan_request(&page_url, request_url).await {
            Ok(stored) => {
                if stored > 0 {
                    tracing::info!(
                        "Stored {} finding(s) for request {} (page {})",
                        stored,
                        request_url,
                        page_url
                    );
                }
                stored
            }
            Err(e) => {
                tracing::warn!("Scan failed for request {}: {}", request_url, e);
                0
            }
        }
    }

    /// Run the pure extraction and matching stages for one event and append
    /// the findings.
    ///
    /// A store failure drops that single finding with a warning and moves
    /// on; findings are best-effort telemetry and occasional loss is
    /// preferable to killing the scan.
    ///
    /// # Errors
    /// Returns `ScanError::UrlParse` if either URL is invalid; the event
    /// produces no findings in that case.
    pub async fn scan_request(&self, page_url: &str, request_url: &str) -> Result<usize> {
        let sources = extract_sources(page_url, &self.settings)?;
        let findings = find_leaks(request_url, &sources, &self.settings)?;

        let mut stored = 0;
        for finding in findings {
            match self.store.append_finding(finding).await {
                Ok(_) => stored += 1,
                Err(e) => {
                    tracing::warn!("Dropping finding for request {}: {}", request_url, e);
                }
            }
        }

        Ok(stored)
    }
}
