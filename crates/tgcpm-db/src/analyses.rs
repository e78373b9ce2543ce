//! Database operations for the `channel_analyses` table.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde_json::Value;
use sqlx::PgPool;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row types
// ---------------------------------------------------------------------------

/// A row from the `channel_analyses` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ChannelAnalysisRow {
    pub id: i64,
    pub handle: String,
    pub niche: String,
    pub eligibility: String,
    pub composite_score: f64,
    pub conservative_ton: Decimal,
    pub competitive_ton: Decimal,
    pub aggressive_ton: Decimal,
    pub competitive_usd: Option<Decimal>,
    pub rate_usd_per_ton: Option<Decimal>,
    pub success_probability: f64,
    pub advisory_only: bool,
    pub profile: Value,
    pub analyzed_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

/// Insert parameters for a new analysis record.
#[derive(Debug, Clone)]
pub struct NewChannelAnalysis {
    pub handle: String,
    pub niche: String,
    pub eligibility: String,
    pub composite_score: f64,
    pub conservative_ton: Decimal,
    pub competitive_ton: Decimal,
    pub aggressive_ton: Decimal,
    pub competitive_usd: Option<Decimal>,
    pub rate_usd_per_ton: Option<Decimal>,
    pub success_probability: f64,
    pub advisory_only: bool,
    /// Full merged profile with per-field provenance, stored as JSONB.
    pub profile: Value,
    pub analyzed_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Insert a new channel analysis and return its generated id.
///
/// TON columns are [`Decimal`] bound directly to `NUMERIC(12,2)`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the insert fails.
pub async fn insert_channel_analysis(
    pool: &PgPool,
    analysis: &NewChannelAnalysis,
) -> Result<i64, DbError> {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO channel_analyses \
             (handle, niche, eligibility, composite_score, \
              conservative_ton, competitive_ton, aggressive_ton, \
              competitive_usd, rate_usd_per_ton, \
              success_probability, advisory_only, profile, analyzed_at) \
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
         RETURNING id",
    )
    .bind(&analysis.handle)
    .bind(&analysis.niche)
    .bind(&analysis.eligibility)
    .bind(analysis.composite_score)
    .bind(analysis.conservative_ton)
    .bind(analysis.competitive_ton)
    .bind(analysis.aggressive_ton)
    .bind(analysis.competitive_usd)
    .bind(analysis.rate_usd_per_ton)
    .bind(analysis.success_probability)
    .bind(analysis.advisory_only)
    .bind(&analysis.profile)
    .bind(analysis.analyzed_at)
    .fetch_one(pool)
    .await?;

    Ok(id)
}

/// List recent analyses, optionally filtered by handle.
///
/// Results are ordered by `analyzed_at DESC` then `id DESC`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_recent_analyses(
    pool: &PgPool,
    handle: Option<&str>,
    limit: i64,
) -> Result<Vec<ChannelAnalysisRow>, DbError> {
    let rows = match handle {
        Some(handle) => {
            sqlx::query_as::<_, ChannelAnalysisRow>(
                "SELECT id, handle, niche, eligibility, composite_score, \
                        conservative_ton, competitive_ton, aggressive_ton, \
                        competitive_usd, rate_usd_per_ton, \
                        success_probability, advisory_only, profile, analyzed_at, created_at \
                 FROM channel_analyses \
                 WHERE handle = $1 \
                 ORDER BY analyzed_at DESC, id DESC \
                 LIMIT $2",
            )
            .bind(handle)
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
        None => {
            sqlx::query_as::<_, ChannelAnalysisRow>(
                "SELECT id, handle, niche, eligibility, composite_score, \
                        conservative_ton, competitive_ton, aggressive_ton, \
                        competitive_usd, rate_usd_per_ton, \
                        success_probability, advisory_only, profile, analyzed_at, created_at \
                 FROM channel_analyses \
                 ORDER BY analyzed_at DESC, id DESC \
                 LIMIT $1",
            )
            .bind(limit)
            .fetch_all(pool)
            .await?
        }
    };

    Ok(rows)
}

/// Return the most recent analysis for a handle, or `None` if none exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn latest_analysis_for_channel(
    pool: &PgPool,
    handle: &str,
) -> Result<Option<ChannelAnalysisRow>, DbError> {
    let row = sqlx::query_as::<_, ChannelAnalysisRow>(
        "SELECT id, handle, niche, eligibility, composite_score, \
                conservative_ton, competitive_ton, aggressive_ton, \
                competitive_usd, rate_usd_per_ton, \
                success_probability, advisory_only, profile, analyzed_at, created_at \
         FROM channel_analyses \
         WHERE handle = $1 \
         ORDER BY analyzed_at DESC, id DESC \
         LIMIT 1",
    )
    .bind(handle)
    .fetch_optional(pool)
    .await?;

    Ok(row)
}
