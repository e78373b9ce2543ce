//! Quality and engagement scoring.
//!
//! Every scoring function is total: any valid [`ChannelProfile`], including an
//! all-unknown one, produces a finite score in `[0.0, 1.0]`. A sub-score whose
//! inputs are unknown falls back to the neutral `0.5`; unknown data must not
//! read as either a dead channel or a great one.

use tgcpm_core::ChannelProfile;

use crate::config::AnalysisConfig;
use crate::types::ScoreSet;

const NEUTRAL: f64 = 0.5;

/// Views/subscribers ratio, when both inputs are known and meaningful.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn engagement_ratio(profile: &ChannelProfile) -> Option<f64> {
    let views = profile.avg_views.as_ref()?.value;
    let subs = profile.subscribers.as_ref()?.value;
    (subs > 0).then(|| views / subs as f64)
}

/// Derive all four sub-scores from a profile.
#[must_use]
pub fn score_profile(profile: &ChannelProfile, config: &AnalysisConfig) -> ScoreSet {
    ScoreSet {
        engagement: engagement_score(profile, config),
        activity: activity_score(profile, config),
        content_quality: content_quality_score(profile, config),
        interaction: interaction_score(profile),
    }
}

/// Views relative to audience size, normalized against the ratio that earns a
/// full score. A channel with no subscribers has no meaningful ratio and
/// scores neutral.
fn engagement_score(profile: &ChannelProfile, config: &AnalysisConfig) -> f64 {
    match engagement_ratio(profile) {
        Some(ratio) => (ratio / config.full_engagement_ratio).clamp(0.0, 1.0),
        None => NEUTRAL,
    }
}

/// Posting cadence against the target. Sub-linear (square root) below target
/// so sporadic posters are not written off; capped at the target so spammy
/// cadences earn no extra credit.
fn activity_score(profile: &ChannelProfile, config: &AnalysisConfig) -> f64 {
    match &profile.posts_per_day {
        Some(ppd) => {
            let normalized = (ppd.value / config.target_posts_per_day).clamp(0.0, 1.0);
            normalized.sqrt()
        }
        None => NEUTRAL,
    }
}

/// Weighted mix of media ratio and description completeness. Each half falls
/// back to neutral independently when its input is unknown.
fn content_quality_score(profile: &ChannelProfile, config: &AnalysisConfig) -> f64 {
    let media = profile
        .media_ratio
        .as_ref()
        .map_or(NEUTRAL, |m| m.value.clamp(0.0, 1.0));

    #[allow(clippy::cast_precision_loss)]
    let description = profile.description.as_ref().map_or(NEUTRAL, |d| {
        (d.value.trim().len() as f64 / config.full_description_len as f64).clamp(0.0, 1.0)
    });

    let score = config.media_weight * media + (1.0 - config.media_weight) * description;
    score.clamp(0.0, 1.0)
}

/// Reactions + forwards relative to audience size, log-scaled so large
/// channels cannot dominate on raw counts alone.
#[allow(clippy::cast_precision_loss)]
fn interaction_score(profile: &ChannelProfile) -> f64 {
    let reactions = profile.reactions.as_ref().map(|r| r.value);
    let forwards = profile.forwards.as_ref().map(|f| f.value);
    if reactions.is_none() && forwards.is_none() {
        return NEUTRAL;
    }

    let Some(subs) = profile.subscribers.as_ref().map(|s| s.value).filter(|s| *s > 0) else {
        return NEUTRAL;
    };

    let total = reactions.unwrap_or(0) + forwards.unwrap_or(0);
    ((1.0 + total as f64).ln() / (1.0 + subs as f64).ln()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tgcpm_core::{ProviderKind, Sourced};

    fn sourced<T>(value: T) -> Option<Sourced<T>> {
        Some(Sourced::from_provider(value, ProviderKind::Telemetrio))
    }

    fn full_profile() -> ChannelProfile {
        ChannelProfile {
            avg_views: sourced(11_200.0),
            subscribers: sourced(24_300),
            posts_per_day: sourced(2.3),
            media_ratio: sourced(0.75),
            reactions: sourced(450),
            forwards: sourced(123),
            description: sourced("Daily market analysis, on-chain data and trade ideas".to_string()),
            ..ChannelProfile::unknown("cryptodaily")
        }
    }

    #[test]
    fn all_unknown_profile_scores_all_neutral() {
        let scores = score_profile(&ChannelProfile::unknown("ghost"), &AnalysisConfig::default());
        assert!((scores.engagement - 0.5).abs() < 1e-9);
        assert!((scores.activity - 0.5).abs() < 1e-9);
        assert!((scores.content_quality - 0.5).abs() < 1e-9);
        assert!((scores.interaction - 0.5).abs() < 1e-9);
    }

    #[test]
    fn all_scores_in_range_for_full_profile() {
        let scores = score_profile(&full_profile(), &AnalysisConfig::default());
        for (name, score) in [
            ("engagement", scores.engagement),
            ("activity", scores.activity),
            ("content_quality", scores.content_quality),
            ("interaction", scores.interaction),
        ] {
            assert!(
                score.is_finite() && (0.0..=1.0).contains(&score),
                "{name} out of range: {score}"
            );
        }
    }

    #[test]
    fn engagement_ratio_matches_expected() {
        let ratio = engagement_ratio(&full_profile()).unwrap();
        assert!((ratio - 0.4609).abs() < 0.001, "got {ratio}");
    }

    #[test]
    fn high_engagement_scores_high() {
        let scores = score_profile(&full_profile(), &AnalysisConfig::default());
        assert!(scores.engagement > 0.9, "got {}", scores.engagement);
    }

    #[test]
    fn engagement_neutral_when_subscribers_zero() {
        let profile = ChannelProfile {
            avg_views: sourced(100.0),
            subscribers: sourced(0),
            ..ChannelProfile::unknown("empty")
        };
        let scores = score_profile(&profile, &AnalysisConfig::default());
        assert!((scores.engagement - 0.5).abs() < 1e-9);
    }

    #[test]
    fn known_zero_activity_scores_zero_not_neutral() {
        let profile = ChannelProfile {
            posts_per_day: sourced(0.0),
            ..ChannelProfile::unknown("silent")
        };
        let scores = score_profile(&profile, &AnalysisConfig::default());
        assert!(
            scores.activity.abs() < 1e-9,
            "a reported zero cadence is dead, not unknown: {}",
            scores.activity
        );
    }

    #[test]
    fn activity_is_capped_above_target() {
        let cfg = AnalysisConfig::default();
        let on_target = ChannelProfile {
            posts_per_day: sourced(cfg.target_posts_per_day),
            ..ChannelProfile::unknown("steady")
        };
        let spammy = ChannelProfile {
            posts_per_day: sourced(cfg.target_posts_per_day * 20.0),
            ..ChannelProfile::unknown("spam")
        };
        let a = score_profile(&on_target, &cfg).activity;
        let b = score_profile(&spammy, &cfg).activity;
        assert!((a - 1.0).abs() < 1e-9);
        assert!((b - a).abs() < 1e-9, "cadence above target must not over-reward");
    }

    #[test]
    fn activity_is_sublinear_below_target() {
        let cfg = AnalysisConfig::default();
        let profile = ChannelProfile {
            posts_per_day: sourced(cfg.target_posts_per_day * 0.25),
            ..ChannelProfile::unknown("slow")
        };
        let score = score_profile(&profile, &cfg).activity;
        assert!((score - 0.5).abs() < 1e-9, "sqrt(0.25) expected, got {score}");
    }

    #[test]
    fn content_quality_mixes_media_and_description() {
        let cfg = AnalysisConfig::default();
        let profile = ChannelProfile {
            media_ratio: sourced(1.0),
            description: sourced(String::new()),
            ..ChannelProfile::unknown("pics")
        };
        let score = score_profile(&profile, &cfg).content_quality;
        // full media, empty description: 0.6 * 1.0 + 0.4 * 0.0
        assert!((score - 0.6).abs() < 1e-9, "got {score}");
    }

    #[test]
    fn interaction_log_scaling_keeps_large_channels_honest() {
        let cfg = AnalysisConfig::default();
        let small = ChannelProfile {
            subscribers: sourced(2_000),
            reactions: sourced(400),
            forwards: sourced(100),
            ..ChannelProfile::unknown("small")
        };
        let huge = ChannelProfile {
            subscribers: sourced(2_000_000),
            reactions: sourced(400),
            forwards: sourced(100),
            ..ChannelProfile::unknown("huge")
        };
        let s = score_profile(&small, &cfg).interaction;
        let h = score_profile(&huge, &cfg).interaction;
        assert!(
            s > h,
            "same raw counts must score higher for the smaller audience ({s} vs {h})"
        );
    }

    #[test]
    fn interaction_neutral_when_counts_unknown() {
        let profile = ChannelProfile {
            subscribers: sourced(10_000),
            ..ChannelProfile::unknown("quiet")
        };
        let scores = score_profile(&profile, &AnalysisConfig::default());
        assert!((scores.interaction - 0.5).abs() < 1e-9);
    }
}
