//! Ad-eligibility rules.
//!
//! A pure function of the aggregated profile and the configured thresholds.
//! Each rule reports independently, and a rule whose input is unknown is
//! *indeterminate* rather than failed: the caller can still proceed with
//! reduced confidence, which is a different situation from a channel that
//! verifiably misses a requirement.

use tgcpm_core::ChannelProfile;

use crate::config::AnalysisConfig;
use crate::types::{EligibilityResult, EligibilityStatus, Requirement};

enum RuleOutcome {
    Pass,
    Fail,
    Unknown,
}

/// Check a profile against the platform requirements for paid placement.
#[must_use]
pub fn check_eligibility(profile: &ChannelProfile, config: &AnalysisConfig) -> EligibilityResult {
    let rules = [
        (Requirement::MinSubscribers, subscribers_rule(profile, config)),
        (Requirement::Verification, verification_rule(profile, config)),
        (Requirement::Activity, activity_rule(profile)),
    ];

    let mut failed = Vec::new();
    let mut indeterminate = Vec::new();
    for (requirement, outcome) in rules {
        match outcome {
            RuleOutcome::Pass => {}
            RuleOutcome::Fail => failed.push(requirement),
            RuleOutcome::Unknown => indeterminate.push(requirement),
        }
    }

    let status = if !failed.is_empty() {
        EligibilityStatus::Ineligible
    } else if !indeterminate.is_empty() {
        EligibilityStatus::Indeterminate
    } else {
        EligibilityStatus::Eligible
    };

    EligibilityResult {
        status,
        failed,
        indeterminate,
    }
}

fn subscribers_rule(profile: &ChannelProfile, config: &AnalysisConfig) -> RuleOutcome {
    match &profile.subscribers {
        Some(subs) if subs.value >= config.min_subscribers => RuleOutcome::Pass,
        Some(_) => RuleOutcome::Fail,
        None => RuleOutcome::Unknown,
    }
}

/// Verification only matters for niches the platform lists as requiring it.
/// An explicit `false` fails; an unknown flag is indeterminate.
fn verification_rule(profile: &ChannelProfile, config: &AnalysisConfig) -> RuleOutcome {
    if !config.verified_niches.contains(&profile.niche.value) {
        return RuleOutcome::Pass;
    }
    match &profile.verified {
        Some(v) if v.value => RuleOutcome::Pass,
        Some(_) => RuleOutcome::Fail,
        None => RuleOutcome::Unknown,
    }
}

/// The channel must show signs of life: at least one of average views or
/// posting cadence known and non-zero. Both fields are window-scoped by the
/// providers, so a non-zero value already means recent activity.
fn activity_rule(profile: &ChannelProfile) -> RuleOutcome {
    let views = profile.avg_views.as_ref().map(|v| v.value);
    let cadence = profile.posts_per_day.as_ref().map(|p| p.value);

    match (views, cadence) {
        (None, None) => RuleOutcome::Unknown,
        (v, c) => {
            if v.is_some_and(|v| v > 0.0) || c.is_some_and(|c| c > 0.0) {
                RuleOutcome::Pass
            } else {
                RuleOutcome::Fail
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tgcpm_core::{Niche, ProviderKind, Sourced};

    fn sourced<T>(value: T) -> Option<Sourced<T>> {
        Some(Sourced::from_provider(value, ProviderKind::Harvester))
    }

    fn eligible_profile() -> ChannelProfile {
        ChannelProfile {
            subscribers: sourced(24_300),
            avg_views: sourced(11_200.0),
            verified: sourced(true),
            posts_per_day: sourced(2.3),
            niche: Sourced::derived(Niche::Crypto),
            ..ChannelProfile::unknown("cryptodaily")
        }
    }

    #[test]
    fn complete_profile_is_eligible() {
        let result = check_eligibility(&eligible_profile(), &AnalysisConfig::default());
        assert_eq!(result.status, EligibilityStatus::Eligible);
        assert!(result.failed.is_empty());
        assert!(result.indeterminate.is_empty());
    }

    #[test]
    fn eligibility_is_deterministic() {
        let profile = eligible_profile();
        let cfg = AnalysisConfig::default();
        assert_eq!(check_eligibility(&profile, &cfg), check_eligibility(&profile, &cfg));
    }

    #[test]
    fn below_threshold_fails_subscribers_rule() {
        let profile = ChannelProfile {
            subscribers: sourced(400),
            ..eligible_profile()
        };
        let result = check_eligibility(&profile, &AnalysisConfig::default());
        assert_eq!(result.status, EligibilityStatus::Ineligible);
        assert_eq!(result.failed, vec![Requirement::MinSubscribers]);
    }

    #[test]
    fn unknown_subscribers_is_indeterminate_not_failed() {
        let profile = ChannelProfile {
            subscribers: None,
            ..eligible_profile()
        };
        let result = check_eligibility(&profile, &AnalysisConfig::default());
        assert_eq!(result.status, EligibilityStatus::Indeterminate);
        assert!(result.failed.is_empty());
        assert_eq!(result.indeterminate, vec![Requirement::MinSubscribers]);
    }

    #[test]
    fn zero_subscribers_fails_rather_than_indeterminate() {
        let profile = ChannelProfile {
            subscribers: sourced(0),
            ..eligible_profile()
        };
        let result = check_eligibility(&profile, &AnalysisConfig::default());
        assert!(result.failed.contains(&Requirement::MinSubscribers));
    }

    #[test]
    fn verification_ignored_for_unlisted_niche() {
        let profile = ChannelProfile {
            verified: sourced(false),
            ..eligible_profile()
        };
        // default config requires verification for no niche
        let result = check_eligibility(&profile, &AnalysisConfig::default());
        assert_eq!(result.status, EligibilityStatus::Eligible);
    }

    #[test]
    fn explicit_unverified_fails_for_required_niche() {
        let config = AnalysisConfig {
            verified_niches: vec![Niche::Crypto],
            ..AnalysisConfig::default()
        };
        let profile = ChannelProfile {
            verified: sourced(false),
            ..eligible_profile()
        };
        let result = check_eligibility(&profile, &config);
        assert_eq!(result.status, EligibilityStatus::Ineligible);
        assert_eq!(result.failed, vec![Requirement::Verification]);
    }

    #[test]
    fn unknown_verification_is_indeterminate_for_required_niche() {
        let config = AnalysisConfig {
            verified_niches: vec![Niche::Crypto],
            ..AnalysisConfig::default()
        };
        let profile = ChannelProfile {
            verified: None,
            ..eligible_profile()
        };
        let result = check_eligibility(&profile, &config);
        assert_eq!(result.status, EligibilityStatus::Indeterminate);
        assert_eq!(result.indeterminate, vec![Requirement::Verification]);
    }

    #[test]
    fn no_activity_signals_is_indeterminate() {
        let profile = ChannelProfile {
            avg_views: None,
            posts_per_day: None,
            ..eligible_profile()
        };
        let result = check_eligibility(&profile, &AnalysisConfig::default());
        assert_eq!(result.status, EligibilityStatus::Indeterminate);
        assert_eq!(result.indeterminate, vec![Requirement::Activity]);
    }

    #[test]
    fn known_zero_activity_fails() {
        let profile = ChannelProfile {
            avg_views: sourced(0.0),
            posts_per_day: sourced(0.0),
            ..eligible_profile()
        };
        let result = check_eligibility(&profile, &AnalysisConfig::default());
        assert_eq!(result.status, EligibilityStatus::Ineligible);
        assert_eq!(result.failed, vec![Requirement::Activity]);
    }

    #[test]
    fn one_live_signal_passes_activity() {
        let profile = ChannelProfile {
            avg_views: None,
            posts_per_day: sourced(0.5),
            ..eligible_profile()
        };
        let result = check_eligibility(&profile, &AnalysisConfig::default());
        assert_eq!(result.status, EligibilityStatus::Eligible);
    }

    #[test]
    fn multiple_failures_all_reported() {
        let config = AnalysisConfig {
            verified_niches: vec![Niche::Crypto],
            ..AnalysisConfig::default()
        };
        let profile = ChannelProfile {
            subscribers: sourced(10),
            verified: sourced(false),
            avg_views: sourced(0.0),
            posts_per_day: sourced(0.0),
            ..eligible_profile()
        };
        let result = check_eligibility(&profile, &config);
        assert_eq!(
            result.failed,
            vec![
                Requirement::MinSubscribers,
                Requirement::Verification,
                Requirement::Activity
            ]
        );
    }
}
