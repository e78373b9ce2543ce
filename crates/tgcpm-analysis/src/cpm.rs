//! CPM price calculation.
//!
//! Prices are `Decimal` end to end so that identical inputs produce
//! bit-identical tiers. The fiat conversion is a separate step: it always uses
//! the rate supplied for *this* computation and refuses non-positive rates
//! instead of quietly emitting a zero dollar figure.

use rust_decimal::prelude::FromPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use tgcpm_core::Niche;

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;
use crate::types::{CpmRecommendation, EligibilityStatus, FiatTiers, ScoreSet};

/// Compute the three-tier TON recommendation for a scored channel.
///
/// The fiat field is left empty; see [`fiat_tiers`]. Ineligible channels get
/// a full set of reference numbers with `advisory_only` set and a success
/// probability of exactly zero.
#[must_use]
pub fn recommend(
    scores: &ScoreSet,
    niche: Niche,
    eligibility: EligibilityStatus,
    config: &AnalysisConfig,
) -> CpmRecommendation {
    let composite = scores.composite(&config.weights);
    let composite_dec = Decimal::from_f64(composite).unwrap_or(Decimal::ZERO);

    let base = (composite_dec * config.scale_ton)
        .max(config.floor_ton)
        * config.niche_multiplier(niche);

    let conservative = (base * config.conservative_offset).max(config.floor_ton);
    let competitive = base.max(config.floor_ton);
    let aggressive = (base * config.aggressive_offset).max(config.floor_ton);

    // The tier ordering must survive any configured offsets.
    let competitive = competitive.max(conservative);
    let aggressive = aggressive.max(competitive);

    CpmRecommendation {
        conservative_ton: round_ton(conservative),
        competitive_ton: round_ton(competitive),
        aggressive_ton: round_ton(aggressive),
        fiat: None,
        success_probability: success_probability(composite, eligibility),
        advisory_only: eligibility == EligibilityStatus::Ineligible,
    }
}

/// Convert the native tiers to USD at the given rate, half-up to 2 decimals.
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidRate`] when `rate` is zero or negative;
/// the caller keeps the native-unit recommendation either way.
pub fn fiat_tiers(
    recommendation: &CpmRecommendation,
    rate: Decimal,
) -> Result<FiatTiers, AnalysisError> {
    if rate <= Decimal::ZERO {
        return Err(AnalysisError::InvalidRate(rate));
    }
    Ok(FiatTiers {
        conservative_usd: round_usd(recommendation.conservative_ton * rate),
        competitive_usd: round_usd(recommendation.competitive_ton * rate),
        aggressive_usd: round_usd(recommendation.aggressive_ton * rate),
    })
}

/// Probability the placement succeeds at the competitive tier.
///
/// Monotonically increasing in the composite score. Ineligible channels are
/// exactly zero; indeterminate eligibility halves the estimate.
fn success_probability(composite: f64, eligibility: EligibilityStatus) -> f64 {
    let base = (0.2 + 0.7 * composite).clamp(0.0, 1.0);
    match eligibility {
        EligibilityStatus::Eligible => base,
        EligibilityStatus::Indeterminate => base * 0.5,
        EligibilityStatus::Ineligible => 0.0,
    }
}

fn round_ton(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

fn round_usd(amount: Decimal) -> Decimal {
    amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mid_scores() -> ScoreSet {
        ScoreSet {
            engagement: 0.9,
            activity: 1.0,
            content_quality: 0.65,
            interaction: 0.63,
        }
    }

    fn assert_tiers_ordered(rec: &CpmRecommendation) {
        assert!(
            rec.conservative_ton <= rec.competitive_ton
                && rec.competitive_ton <= rec.aggressive_ton,
            "tier ordering violated: {rec:?}"
        );
    }

    #[test]
    fn tiers_are_monotonic() {
        let rec = recommend(
            &mid_scores(),
            Niche::Crypto,
            EligibilityStatus::Eligible,
            &AnalysisConfig::default(),
        );
        assert_tiers_ordered(&rec);
    }

    #[test]
    fn tiers_stay_monotonic_with_inverted_offsets() {
        // Misconfigured offsets must not break the invariant.
        let config = AnalysisConfig {
            conservative_offset: Decimal::new(15, 1),
            aggressive_offset: Decimal::new(6, 1),
            ..AnalysisConfig::default()
        };
        let rec = recommend(
            &mid_scores(),
            Niche::Tech,
            EligibilityStatus::Eligible,
            &config,
        );
        assert_tiers_ordered(&rec);
    }

    #[test]
    fn floor_applies_to_every_tier() {
        let config = AnalysisConfig::default();
        let zero_scores = ScoreSet {
            engagement: 0.0,
            activity: 0.0,
            content_quality: 0.0,
            interaction: 0.0,
        };
        let rec = recommend(
            &zero_scores,
            Niche::Entertainment,
            EligibilityStatus::Eligible,
            &config,
        );
        assert!(rec.conservative_ton >= config.floor_ton);
        assert!(rec.competitive_ton >= config.floor_ton);
        assert!(rec.aggressive_ton >= config.floor_ton);
    }

    #[test]
    fn identical_inputs_produce_bit_identical_tiers() {
        let config = AnalysisConfig::default();
        let a = recommend(&mid_scores(), Niche::Crypto, EligibilityStatus::Eligible, &config);
        let b = recommend(&mid_scores(), Niche::Crypto, EligibilityStatus::Eligible, &config);
        assert_eq!(a, b);
    }

    #[test]
    fn crypto_niche_prices_above_entertainment() {
        let config = AnalysisConfig::default();
        let crypto = recommend(&mid_scores(), Niche::Crypto, EligibilityStatus::Eligible, &config);
        let ent = recommend(
            &mid_scores(),
            Niche::Entertainment,
            EligibilityStatus::Eligible,
            &config,
        );
        assert!(crypto.competitive_ton > ent.competitive_ton);
    }

    #[test]
    fn ineligible_probability_is_exactly_zero_and_advisory() {
        let rec = recommend(
            &mid_scores(),
            Niche::Crypto,
            EligibilityStatus::Ineligible,
            &AnalysisConfig::default(),
        );
        assert_eq!(rec.success_probability, 0.0);
        assert!(rec.advisory_only);
        assert!(rec.competitive_ton > Decimal::ZERO, "prices still computed");
    }

    #[test]
    fn probability_monotone_in_composite() {
        let config = AnalysisConfig::default();
        let low = ScoreSet {
            engagement: 0.1,
            activity: 0.1,
            content_quality: 0.1,
            interaction: 0.1,
        };
        let a = recommend(&low, Niche::General, EligibilityStatus::Eligible, &config);
        let b = recommend(&mid_scores(), Niche::General, EligibilityStatus::Eligible, &config);
        assert!(b.success_probability > a.success_probability);
    }

    #[test]
    fn indeterminate_dampens_probability() {
        let config = AnalysisConfig::default();
        let sure = recommend(&mid_scores(), Niche::General, EligibilityStatus::Eligible, &config);
        let unsure = recommend(
            &mid_scores(),
            Niche::General,
            EligibilityStatus::Indeterminate,
            &config,
        );
        assert!(unsure.success_probability < sure.success_probability);
        assert!(unsure.success_probability > 0.0);
    }

    #[test]
    fn fiat_conversion_at_rate_five() {
        let rec = recommend(
            &mid_scores(),
            Niche::Crypto,
            EligibilityStatus::Eligible,
            &AnalysisConfig::default(),
        );
        let fiat = fiat_tiers(&rec, Decimal::from(5)).expect("positive rate");
        assert_eq!(
            fiat.competitive_usd,
            (rec.competitive_ton * Decimal::from(5))
                .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        );
        assert!(fiat.conservative_usd <= fiat.competitive_usd);
        assert!(fiat.competitive_usd <= fiat.aggressive_usd);
    }

    #[test]
    fn zero_rate_is_rejected() {
        let rec = recommend(
            &mid_scores(),
            Niche::Crypto,
            EligibilityStatus::Eligible,
            &AnalysisConfig::default(),
        );
        let err = fiat_tiers(&rec, Decimal::ZERO).expect_err("zero rate must be refused");
        assert!(matches!(err, AnalysisError::InvalidRate(r) if r == Decimal::ZERO));
    }

    #[test]
    fn negative_rate_is_rejected() {
        let rec = recommend(
            &mid_scores(),
            Niche::Crypto,
            EligibilityStatus::Eligible,
            &AnalysisConfig::default(),
        );
        assert!(fiat_tiers(&rec, Decimal::from(-1)).is_err());
    }

    #[test]
    fn fiat_rounding_is_half_up() {
        let rec = CpmRecommendation {
            conservative_ton: Decimal::new(45, 2),  // 0.45
            competitive_ton: Decimal::new(45, 2),
            aggressive_ton: Decimal::new(45, 2),
            fiat: None,
            success_probability: 0.5,
            advisory_only: false,
        };
        // 0.45 * 4.9 = 2.205 → 2.21 under half-up
        let fiat = fiat_tiers(&rec, Decimal::new(49, 1)).expect("positive rate");
        assert_eq!(fiat.competitive_usd, Decimal::new(221, 2));
    }
}
