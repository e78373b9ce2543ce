//! Immutable analysis configuration.
//!
//! Every scoring and pricing knob lives here and is passed into the pure
//! functions explicitly, so the scorer and CPM calculator stay independently
//! testable with no ambient state.

use std::time::Duration;

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tgcpm_core::{AppConfig, Niche};

/// Weights for combining the four sub-scores into the composite. Must sum to 1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreWeights {
    pub engagement: f64,
    pub activity: f64,
    pub content_quality: f64,
    pub interaction: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            engagement: 0.35,
            activity: 0.20,
            content_quality: 0.20,
            interaction: 0.25,
        }
    }
}

/// All knobs consumed by the eligibility checker, scorer, and CPM calculator.
#[derive(Debug, Clone)]
pub struct AnalysisConfig {
    pub min_subscribers: u64,
    /// Observation window backing the activity rule, in days. The window is
    /// applied by the providers: `avg_views`, `posts_per_day`, reactions and
    /// forwards are already scoped to it when they arrive, so the eligibility
    /// rule reads those fields directly rather than re-filtering by date.
    pub activity_days: u32,
    /// Niches for which an explicitly unverified channel is ineligible.
    pub verified_niches: Vec<Niche>,
    /// Bounded wait per provider call during aggregation.
    pub provider_timeout: Duration,

    /// Views/subscribers ratio that earns a full engagement score.
    pub full_engagement_ratio: f64,
    /// Posting cadence treated as fully active, in posts per day.
    pub target_posts_per_day: f64,
    /// Media-ratio share of the content-quality score; the rest is
    /// description completeness.
    pub media_weight: f64,
    /// Description length treated as complete, in characters.
    pub full_description_len: usize,

    pub weights: ScoreWeights,
    /// Floor for every recommended tier, in TON.
    pub floor_ton: Decimal,
    /// Composite-score-to-TON scaling constant.
    pub scale_ton: Decimal,
    /// Tier offsets relative to the adjusted base price.
    pub conservative_offset: Decimal,
    pub aggressive_offset: Decimal,
    /// Niche multiplier table; niches not listed multiply by 1.
    pub niche_multipliers: Vec<(Niche, Decimal)>,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_subscribers: 1000,
            activity_days: 14,
            verified_niches: Vec::new(),
            provider_timeout: Duration::from_secs(10),
            full_engagement_ratio: 0.5,
            target_posts_per_day: 1.0,
            media_weight: 0.6,
            full_description_len: 50,
            weights: ScoreWeights::default(),
            floor_ton: Decimal::new(1, 1),  // 0.1 TON
            scale_ton: Decimal::new(5, 1),  // 0.5 TON at composite 1.0
            conservative_offset: Decimal::new(8, 1),
            aggressive_offset: Decimal::new(13, 1),
            niche_multipliers: vec![
                (Niche::Crypto, Decimal::new(14, 1)),
                (Niche::Finance, Decimal::new(13, 1)),
                (Niche::Tech, Decimal::new(12, 1)),
                (Niche::Business, Decimal::new(11, 1)),
                (Niche::Gaming, Decimal::ONE),
                (Niche::Education, Decimal::new(9, 1)),
                (Niche::News, Decimal::new(8, 1)),
                (Niche::Entertainment, Decimal::new(7, 1)),
                (Niche::Lifestyle, Decimal::new(8, 1)),
            ],
        }
    }
}

impl AnalysisConfig {
    /// Derive an analysis config from the env-driven [`AppConfig`], keeping
    /// defaults for knobs the environment does not expose.
    #[must_use]
    pub fn from_app(app: &AppConfig) -> Self {
        let defaults = Self::default();
        Self {
            min_subscribers: app.min_subscribers,
            activity_days: app.activity_days,
            verified_niches: app.verified_niches.clone(),
            provider_timeout: Duration::from_secs(app.provider_timeout_secs),
            floor_ton: Decimal::from_f64(app.min_cpm_ton).unwrap_or(defaults.floor_ton),
            scale_ton: Decimal::from_f64(app.cpm_scale_ton).unwrap_or(defaults.scale_ton),
            ..defaults
        }
    }

    /// Multiplier for a niche; unlisted niches (including `General`) get 1.
    #[must_use]
    pub fn niche_multiplier(&self, niche: Niche) -> Decimal {
        self.niche_multipliers
            .iter()
            .find(|(n, _)| *n == niche)
            .map_or(Decimal::ONE, |(_, m)| *m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        let w = ScoreWeights::default();
        let sum = w.engagement + w.activity + w.content_quality + w.interaction;
        assert!((sum - 1.0).abs() < 1e-9, "weights must sum to 1, got {sum}");
    }

    #[test]
    fn default_offsets_are_ordered() {
        let cfg = AnalysisConfig::default();
        assert!(cfg.conservative_offset < Decimal::ONE);
        assert!(cfg.aggressive_offset > Decimal::ONE);
    }

    #[test]
    fn crypto_multiplier_is_premium() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.niche_multiplier(Niche::Crypto), Decimal::new(14, 1));
    }

    #[test]
    fn general_multiplier_is_neutral() {
        let cfg = AnalysisConfig::default();
        assert_eq!(cfg.niche_multiplier(Niche::General), Decimal::ONE);
    }
}
