//! End-to-end analysis pipeline.
//!
//! Aggregate, gate, score, price, convert. The market rate and persistence are
//! both best-effort: a missing or invalid rate degrades the report to
//! native-unit prices with a warning, and a failing store is logged without
//! failing the analysis.

use async_trait::async_trait;
use tracing::{info, warn};

use tgcpm_providers::{ChannelProvider, MarketFeed};

use crate::aggregator::aggregate;
use crate::config::AnalysisConfig;
use crate::cpm::{fiat_tiers, recommend};
use crate::eligibility::check_eligibility;
use crate::error::AnalysisError;
use crate::scorer::{engagement_ratio, score_profile};
use crate::types::{AnalysisReport, EngagementBand};

/// Error a store may report from `save`; the pipeline only logs it.
pub type StoreError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Persistence hook for completed analyses.
#[async_trait]
pub trait AnalysisStore: Send + Sync {
    async fn save(&self, report: &AnalysisReport) -> Result<(), StoreError>;
}

/// Run the full pipeline for one channel handle.
///
/// # Errors
///
/// Returns [`AnalysisError::ChannelNotFound`] when no provider has data for
/// the handle. Rate and persistence failures are logged, not returned.
pub async fn analyze_channel(
    handle: &str,
    providers: &[Box<dyn ChannelProvider>],
    market: Option<&dyn MarketFeed>,
    store: Option<&dyn AnalysisStore>,
    config: &AnalysisConfig,
) -> Result<AnalysisReport, AnalysisError> {
    let profile = aggregate(handle, providers, config).await?;

    let eligibility = check_eligibility(&profile, config);
    let scores = score_profile(&profile, config);
    let engagement_band = engagement_ratio(&profile).map(EngagementBand::from_ratio);
    let mut recommendation = recommend(&scores, profile.niche.value, eligibility.status, config);

    let mut rate_usd_per_ton = None;
    if let Some(market) = market {
        match market.current_rate().await {
            Ok(rate) => match fiat_tiers(&recommendation, rate) {
                Ok(fiat) => {
                    recommendation.fiat = Some(fiat);
                    rate_usd_per_ton = Some(rate);
                }
                Err(err) => {
                    warn!(channel = %profile.handle, error = %err, "fiat conversion skipped");
                }
            },
            Err(err) => {
                warn!(channel = %profile.handle, error = %err, "market rate unavailable, native prices only");
            }
        }
    }

    let report = AnalysisReport {
        profile,
        eligibility,
        scores,
        engagement_band,
        recommendation,
        rate_usd_per_ton,
    };

    info!(
        channel = %report.profile.handle,
        status = ?report.eligibility.status,
        competitive_ton = %report.recommendation.competitive_ton,
        "analysis complete"
    );

    if let Some(store) = store {
        if let Err(err) = store.save(&report).await {
            warn!(channel = %report.profile.handle, error = %err, "failed to persist analysis");
        }
    }

    Ok(report)
}
