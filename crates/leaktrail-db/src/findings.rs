//! Findings operations for the append-only leak record.
//!
//! This module provides insert and query operations for the `findings` table,
//! which stores every detected reappearance of a source value in a request
//! URL. Records are append-only; nothing here updates or rewrites rows.

use crate::error::{DatabaseError, Result};
use chrono::{DateTime, Utc};
use leaktrail_core::{Finding, Source, SourceKind};
use serde::{Deserialize, Serialize};
use sqlx::{Pool, Row, Sqlite};

/// A persisted finding row.
///
/// Mirrors [`Finding`] field-for-field (source kind, origin URL, value,
/// target URL) plus storage bookkeeping (`id`, `detected_at`), so the
/// in-memory finding round-trips exactly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingRecord {
    /// Unique identifier for this record
    pub id: String,
    /// Where the source value was extracted from
    pub source_kind: SourceKind,
    /// The page URL the source value was extracted from
    pub origin_url: String,
    /// The leaked candidate value
    pub source_value: String,
    /// The request URL in which the value was found
    pub target_url: String,
    /// When this finding was recorded
    pub detected_at: DateTime<Utc>,
}

impl FindingRecord {
    /// Reconstruct the in-memory [`Finding`] this record was created from.
    ///
    /// # Errors
    /// Returns `DatabaseError::Decode` if the stored source value is empty,
    /// which would violate the non-empty invariant of [`Source`].
    pub fn into_finding(self) -> Result<Finding> {
        let source = Source::new(self.source_kind, self.origin_url, self.source_value)
            .ok_or_else(|| {
                DatabaseError::Decode(format!("finding {} has an empty source value", self.id))
            })?;
        Ok(Finding::new(source, self.target_url))
    }
}

/// Append a finding to the findings table.
///
/// # Errors
/// Returns `DatabaseError` if the database insert fails.
pub async fn insert_finding(pool: &Pool<Sqlite>, finding: &Finding) -> Result<FindingRecord> {
    let id = uuid::Uuid::new_v4().to_string();
    let detected_at = Utc::now();

    sqlx::query(
        "INSERT INTO findings (id, source_kind, origin_url, source_value, target_url, detected_at)
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&id)
    .bind(finding.source.kind().as_str())
    .bind(finding.source.origin_url())
    .bind(finding.source.value())
    .bind(&finding.target.url)
    .bind(detected_at.to_rfc3339())
    .execute(pool)
    .await?;

    Ok(FindingRecord {
        id,
        source_kind: finding.source.kind(),
        origin_url: finding.source.origin_url().to_string(),
        source_value: finding.source.value().to_string(),
        target_url: finding.target.url.clone(),
        detected_at,
    })
}

/// Get all findings in insertion order.
///
/// # Errors
/// Returns `DatabaseError` if the database query fails.
pub async fn get_all(pool: &Pool<Sqlite>) -> Result<Vec<FindingRecord>> {
    let rows = sqlx::query(
        "SELECT id, source_kind, origin_url, source_value, target_url, detected_at
         FROM findings
         ORDER BY rowid",
    )
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(parse_finding_row).collect()
}

/// Get all findings recorded against a specific target URL, in insertion order.
///
/// # Errors
/// Returns `DatabaseError` if the database query fails.
pub async fn get_by_target_url(
    pool: &Pool<Sqlite>,
    target_url: &str,
) -> Result<Vec<FindingRecord>> {
    let rows = sqlx::query(
        "SELECT id, source_kind, origin_url, source_value, target_url, detected_at
         FROM findings
         WHERE target_url = ?
         ORDER BY rowid",
    )
    .bind(target_url)
    .fetch_all(pool)
    .await?;

    rows.into_iter().map(parse_finding_row).collect()
}

/// Count stored findings.
///
/// # Errors
/// Returns `DatabaseError` if the database query fails.
pub async fn count(pool: &Pool<Sqlite>) -> Result<i64> {
    let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM findings")
        .fetch_one(pool)
        .await?;
    Ok(count)
}

/// Delete all stored findings.
///
/// The scanning core never calls this; it exists for callers that reset the
/// record on navigation (the `clear_on_refresh` setting) or on user request.
///
/// # Errors
/// Returns `DatabaseError` if the database delete fails.
pub async fn delete_all(pool: &Pool<Sqlite>) -> Result<u64> {
    let result = sqlx::query("DELETE FROM findings").execute(pool).await?;
    Ok(result.rows_affected())
}

/// Parse a single finding row.
fn parse_finding_row(row: sqlx::sqlite::SqliteRow) -> Result<FindingRecord> {
    let kind_str: String = row.try_get("source_kind")?;
    let source_kind = SourceKind::parse(&kind_str).ok_or_else(|| {
        DatabaseError::Decode(format!("unknown source kind '{kind_str}' in findings table"))
    })?;

    let detected_at_str: String = row.try_get("detected_at")?;
    let detected_at = DateTime::parse_from_rfc3339(&detected_at_str)
        .map_err(|e| DatabaseError::Decode(format!("invalid detected_at timestamp: {e}")))?
        .with_timezone(&Utc);

    Ok(FindingRecord {
        id: row.try_get("id")?,
        source_kind,
        origin_url: row.try_get("origin_url")?,
        source_value: row.try_get("source_value")?,
        target_url: row.try_get("target_url")?,
        detected_at,
    })
}
