//! Serialized append access to the findings table.
//!
//! Every matching request event appends findings concurrently. Appends are
//! funneled through a single writer task so that no finding is silently
//! dropped by racing writers: the task owns the insert sequence and processes
//! one append at a time, in arrival order.

use crate::error::{DatabaseError, Result};
use crate::findings::{self, FindingRecord};
use leaktrail_core::Finding;
use sqlx::{Pool, Sqlite};
use tokio::sync::{mpsc, oneshot};

/// Queue depth for pending appends. Scan events are small and sparse; this
/// only needs to absorb short bursts of concurrent requests.
const APPEND_QUEUE_CAPACITY: usize = 64;

enum StoreCommand {
    Append {
        finding: Finding,
        ack: oneshot::Sender<Result<FindingRecord>>,
    },
}

/// Handle to the single-writer findings store.
///
/// Cloning the handle is cheap; all clones feed the same writer task. The
/// writer task exits once every handle has been dropped.
#[derive(Debug, Clone)]
pub struct FindingStore {
    tx: mpsc::Sender<StoreCommand>,
}

impl FindingStore {
    /// Spawn the writer task over an open findings database pool.
    #[must_use]
    pub fn spawn(pool: Pool<Sqlite>) -> Self {
        let (tx, rx) = mpsc::channel(APPEND_QUEUE_CAPACITY);
        tokio::spawn(run_writer(pool, rx));
        Self { tx }
    }

    /// Append a finding to the store.
    ///
    /// Appends from concurrent callers are serialized by the writer task;
    /// this resolves once the row is durably inserted.
    ///
    /// # Errors
    /// Returns `DatabaseError::StoreClosed` if the writer task has shut
    /// down, or the underlying insert error otherwise.
    pub async fn append_finding(&self, finding: Finding) -> Result<FindingRecord> {
        let (ack, response) = oneshot::channel();
        self.tx
            .send(StoreCommand::Append { finding, ack })
            .await
            .map_err(|_| DatabaseError::StoreClosed)?;
        response.await.map_err(|_| DatabaseError::StoreClosed)?
    }
}

impl std::fmt::Debug for StoreCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Append { finding, .. } => f
                .debug_struct("Append")
                .field("target_url", &finding.target.url)
                .finish_non_exhaustive(),
        }
    }
}

async fn run_writer(pool: Pool<Sqlite>, mut rx: mpsc::Receiver<StoreCommand>) {
    while let Some(command) = rx.recv().await {
        match command {
            StoreCommand::Append { finding, ack } => {
                let result = findings::insert_finding(&pool, &finding).await;
                if let Err(e) = &result {
                    tracing::warn!("Failed to append finding: {}", e);
                }
                // The caller may have given up waiting; the row is already
                // written either way.
                let _ = ack.send(result);
            }
        }
    }
    tracing::debug!("Findings store writer task exiting");
}
