//! Result types produced by the analysis engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tgcpm_core::ChannelProfile;

use crate::config::ScoreWeights;

/// One of the platform requirements for paid placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Requirement {
    MinSubscribers,
    Verification,
    Activity,
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Requirement::MinSubscribers => write!(f, "minimum subscribers"),
            Requirement::Verification => write!(f, "verification"),
            Requirement::Activity => write!(f, "recent activity"),
        }
    }
}

/// Overall eligibility verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EligibilityStatus {
    Eligible,
    Ineligible,
    /// No rule failed outright, but at least one could not be evaluated
    /// because its input is unknown. The caller decides whether to proceed
    /// with reduced confidence.
    Indeterminate,
}

/// Verdict plus the per-rule breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EligibilityResult {
    pub status: EligibilityStatus,
    /// Requirements that were evaluated and failed.
    pub failed: Vec<Requirement>,
    /// Requirements that could not be evaluated for lack of data.
    pub indeterminate: Vec<Requirement>,
}

/// Qualitative engagement band, for display only. Never feeds the numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngagementBand {
    Outstanding,
    Excellent,
    Good,
    Average,
    Weak,
}

impl EngagementBand {
    /// Band for a views/subscribers ratio.
    #[must_use]
    pub fn from_ratio(ratio: f64) -> Self {
        if ratio >= 0.40 {
            EngagementBand::Outstanding
        } else if ratio >= 0.30 {
            EngagementBand::Excellent
        } else if ratio >= 0.20 {
            EngagementBand::Good
        } else if ratio >= 0.10 {
            EngagementBand::Average
        } else {
            EngagementBand::Weak
        }
    }
}

impl std::fmt::Display for EngagementBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            EngagementBand::Outstanding => "outstanding",
            EngagementBand::Excellent => "excellent",
            EngagementBand::Good => "good",
            EngagementBand::Average => "average",
            EngagementBand::Weak => "weak",
        };
        write!(f, "{name}")
    }
}

/// Normalized sub-scores, each in `[0.0, 1.0]`.
///
/// A sub-score whose inputs are unknown is the neutral `0.5`, never an
/// undefined value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub engagement: f64,
    pub activity: f64,
    pub content_quality: f64,
    pub interaction: f64,
}

impl ScoreSet {
    /// Weighted composite in `[0.0, 1.0]`.
    #[must_use]
    pub fn composite(&self, weights: &ScoreWeights) -> f64 {
        let composite = self.engagement * weights.engagement
            + self.activity * weights.activity
            + self.content_quality * weights.content_quality
            + self.interaction * weights.interaction;
        composite.clamp(0.0, 1.0)
    }
}

/// USD equivalents of the three tiers, rounded half-up to 2 decimal places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiatTiers {
    pub conservative_usd: Decimal,
    pub competitive_usd: Decimal,
    pub aggressive_usd: Decimal,
}

/// Three-tier CPM recommendation.
///
/// Invariant: `conservative_ton <= competitive_ton <= aggressive_ton`, and the
/// same ordering holds for the fiat tiers when present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CpmRecommendation {
    pub conservative_ton: Decimal,
    pub competitive_ton: Decimal,
    pub aggressive_ton: Decimal,
    /// `None` when the conversion rate was unavailable or invalid.
    pub fiat: Option<FiatTiers>,
    /// Probability the placement succeeds at the competitive tier, in `[0, 1]`.
    /// Exactly `0.0` for ineligible channels.
    pub success_probability: f64,
    /// Set for ineligible channels: the numbers are computed for reference
    /// but must not be acted on.
    pub advisory_only: bool,
}

/// Everything the pipeline produces for one channel.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub profile: ChannelProfile,
    pub eligibility: EligibilityResult,
    pub scores: ScoreSet,
    /// Display band for the engagement ratio; `None` when the ratio is unknown.
    pub engagement_band: Option<EngagementBand>,
    pub recommendation: CpmRecommendation,
    /// The conversion rate used for the fiat tiers, when one was available.
    pub rate_usd_per_ton: Option<Decimal>,
}
