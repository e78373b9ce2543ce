//! Canonical channel profile model.
//!
//! Providers return a [`PartialProfile`] in which every metric is individually
//! optional. Aggregation merges partials into a [`ChannelProfile`] where each
//! populated field is wrapped in [`Sourced`] so it carries the provenance of the
//! provider that supplied it. An absent field means "unknown", which is never
//! collapsed into zero.

use serde::{Deserialize, Serialize};

use crate::niche::Niche;

/// The data providers queried during aggregation, in no particular order.
///
/// Priority is a property of the provider *list* handed to the aggregator,
/// not of this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderKind {
    /// Telemetr.io premium analytics API.
    Telemetrio,
    /// Local harvester stats cache overlaid with Bot API verification.
    Harvester,
    /// TGStat fallback discovery database.
    Tgstat,
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProviderKind::Telemetrio => write!(f, "telemetrio"),
            ProviderKind::Harvester => write!(f, "harvester"),
            ProviderKind::Tgstat => write!(f, "tgstat"),
        }
    }
}

/// Where a profile field value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Supplied verbatim by a provider.
    Provider(ProviderKind),
    /// Computed from other fields after the merge (e.g. the niche).
    Derived,
}

impl std::fmt::Display for Provenance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Provenance::Provider(kind) => write!(f, "{kind}"),
            Provenance::Derived => write!(f, "derived"),
        }
    }
}

/// A field value together with the provenance that supplied it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sourced<T> {
    pub value: T,
    pub source: Provenance,
}

impl<T> Sourced<T> {
    #[must_use]
    pub fn from_provider(value: T, kind: ProviderKind) -> Self {
        Self {
            value,
            source: Provenance::Provider(kind),
        }
    }

    #[must_use]
    pub fn derived(value: T) -> Self {
        Self {
            value,
            source: Provenance::Derived,
        }
    }
}

/// Best-effort channel record from a single provider.
///
/// Every field is individually nullable; a provider that knows nothing useful
/// should return `None` from its fetch instead of an all-`None` partial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PartialProfile {
    pub title: Option<String>,
    pub description: Option<String>,
    pub subscribers: Option<u64>,
    pub avg_views: Option<f64>,
    pub verified: Option<bool>,
    pub posts_per_day: Option<f64>,
    /// Share of posts carrying media, in `[0.0, 1.0]`.
    pub media_ratio: Option<f64>,
    /// Reaction count over the provider's observation window.
    pub reactions: Option<u64>,
    /// Forward count over the provider's observation window.
    pub forwards: Option<u64>,
}

impl PartialProfile {
    /// `true` when no field carries a value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.subscribers.is_none()
            && self.avg_views.is_none()
            && self.verified.is_none()
            && self.posts_per_day.is_none()
            && self.media_ratio.is_none()
            && self.reactions.is_none()
            && self.forwards.is_none()
    }
}

/// Canonical, provider-agnostic channel record.
///
/// Constructed fresh per analysis request by the aggregator and treated as
/// immutable afterwards. `None` means the value is unknown across all
/// providers, distinct from a provider reporting zero.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChannelProfile {
    /// Channel handle without the leading `@`.
    pub handle: String,
    pub title: Option<Sourced<String>>,
    pub description: Option<Sourced<String>>,
    pub subscribers: Option<Sourced<u64>>,
    pub avg_views: Option<Sourced<f64>>,
    pub verified: Option<Sourced<bool>>,
    pub posts_per_day: Option<Sourced<f64>>,
    pub media_ratio: Option<Sourced<f64>>,
    pub reactions: Option<Sourced<u64>>,
    pub forwards: Option<Sourced<u64>>,
    /// Classified from title + description after the merge; `General` when
    /// neither is known.
    pub niche: Sourced<Niche>,
}

impl ChannelProfile {
    /// An all-unknown profile for the given handle.
    #[must_use]
    pub fn unknown(handle: &str) -> Self {
        Self {
            handle: handle.to_string(),
            title: None,
            description: None,
            subscribers: None,
            avg_views: None,
            verified: None,
            posts_per_day: None,
            media_ratio: None,
            reactions: None,
            forwards: None,
            niche: Sourced::derived(Niche::General),
        }
    }
}

/// Strip a leading `@` and surrounding whitespace from a channel handle.
#[must_use]
pub fn normalize_handle(handle: &str) -> String {
    handle.trim().trim_start_matches('@').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_partial_is_empty() {
        assert!(PartialProfile::default().is_empty());
    }

    #[test]
    fn partial_with_one_field_is_not_empty() {
        let partial = PartialProfile {
            subscribers: Some(0),
            ..PartialProfile::default()
        };
        assert!(
            !partial.is_empty(),
            "a reported zero is data, not an unknown"
        );
    }

    #[test]
    fn normalize_handle_strips_at_and_whitespace() {
        assert_eq!(normalize_handle(" @durov "), "durov");
        assert_eq!(normalize_handle("durov"), "durov");
    }

    #[test]
    fn unknown_profile_has_no_populated_fields() {
        let profile = ChannelProfile::unknown("ghost");
        assert!(profile.subscribers.is_none());
        assert!(profile.verified.is_none());
        assert_eq!(profile.niche.value, Niche::General);
        assert_eq!(profile.niche.source, Provenance::Derived);
    }

    #[test]
    fn provenance_display_names_providers() {
        assert_eq!(
            Provenance::Provider(ProviderKind::Telemetrio).to_string(),
            "telemetrio"
        );
        assert_eq!(Provenance::Derived.to_string(), "derived");
    }
}
