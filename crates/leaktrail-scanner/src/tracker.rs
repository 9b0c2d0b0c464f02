//! Tracking of the currently active page URL.
//!
//! The active page is shared mutable state written by an external navigation
//! observer and read by every request event. Rather than a shared variable,
//! it is modeled as a single-writer, multi-reader `watch` channel: the
//! handler for each event takes an immutable snapshot of whatever was
//! current at event time. A snapshot may be briefly stale relative to the
//! very latest navigation; that last-writer-wins gap is accepted behavior,
//! not something the scanner tries to close.

use tokio::sync::watch;

/// Create a connected tracker pair.
///
/// The [`PageTrackerHandle`] is the write side, owned by whatever observes
/// navigation. The [`PageTracker`] is the read side, cloned into each
/// component that needs per-event snapshots. The tracker starts with no
/// page.
#[must_use]
pub fn page_tracker() -> (PageTrackerHandle, PageTracker) {
    let (tx, rx) = watch::channel(None);
    (PageTrackerHandle { tx }, PageTracker { rx })
}

/// Write side of the page tracker. Single writer by construction.
#[derive(Debug)]
pub struct PageTrackerHandle {
    tx: watch::Sender<Option<String>>,
}

impl PageTrackerHandle {
    /// Record a navigation to `url`.
    pub fn navigate(&self, url: impl Into<String>) {
        let url = url.into();
        tracing::debug!("Page navigation: {}", url);
        self.tx.send_replace(Some(url));
    }

    /// Record that no page is active (e.g. the tab was closed).
    pub fn clear(&self) {
        tracing::debug!("Page cleared");
        self.tx.send_replace(None);
    }
}

/// Read side of the page tracker.
#[derive(Debug, Clone)]
pub struct PageTracker {
    rx: watch::Receiver<Option<String>>,
}

impl PageTracker {
    /// Snapshot the current page URL.
    ///
    /// Returns `None` when no page is tracked, which callers treat as "no
    /// scan possible".
    #[must_use]
    pub fn current_page_url(&self) -> Option<String> {
        self.rx.borrow().clone()
    }
}
