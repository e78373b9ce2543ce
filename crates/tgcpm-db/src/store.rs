//! Postgres-backed persistence hook for the analysis pipeline.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use tgcpm_analysis::{AnalysisReport, AnalysisStore, EligibilityStatus, ScoreWeights, StoreError};
use tracing::debug;

use crate::analyses::{insert_channel_analysis, NewChannelAnalysis};

/// Saves completed analyses into `channel_analyses`.
pub struct PgAnalysisStore {
    pool: PgPool,
    weights: ScoreWeights,
}

impl PgAnalysisStore {
    #[must_use]
    pub fn new(pool: PgPool, weights: ScoreWeights) -> Self {
        Self { pool, weights }
    }
}

fn status_str(status: EligibilityStatus) -> &'static str {
    match status {
        EligibilityStatus::Eligible => "eligible",
        EligibilityStatus::Ineligible => "ineligible",
        EligibilityStatus::Indeterminate => "indeterminate",
    }
}

#[async_trait]
impl AnalysisStore for PgAnalysisStore {
    async fn save(&self, report: &AnalysisReport) -> Result<(), StoreError> {
        let record = NewChannelAnalysis {
            handle: report.profile.handle.clone(),
            niche: report.profile.niche.value.to_string(),
            eligibility: status_str(report.eligibility.status).to_string(),
            composite_score: report.scores.composite(&self.weights),
            conservative_ton: report.recommendation.conservative_ton,
            competitive_ton: report.recommendation.competitive_ton,
            aggressive_ton: report.recommendation.aggressive_ton,
            competitive_usd: report.recommendation.fiat.as_ref().map(|f| f.competitive_usd),
            rate_usd_per_ton: report.rate_usd_per_ton,
            success_probability: report.recommendation.success_probability,
            advisory_only: report.recommendation.advisory_only,
            profile: serde_json::to_value(&report.profile)?,
            analyzed_at: Utc::now(),
        };

        let id = insert_channel_analysis(&self.pool, &record).await?;
        debug!(channel = %record.handle, id, "analysis persisted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_strings_are_stable() {
        // Stored values; renaming the enum variants must not change them.
        assert_eq!(status_str(EligibilityStatus::Eligible), "eligible");
        assert_eq!(status_str(EligibilityStatus::Ineligible), "ineligible");
        assert_eq!(status_str(EligibilityStatus::Indeterminate), "indeterminate");
    }
}
