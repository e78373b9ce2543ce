//! Multi-provider aggregation.
//!
//! All providers are queried concurrently with a bounded per-provider wait,
//! then the partials are merged strictly in the order the provider list was
//! given: for each field, the first provider in list order that reported a
//! value wins, regardless of which fetch finished first. A provider that
//! errors or times out is skipped with a warning; only when every provider
//! comes back empty is the channel reported as not found.

use futures::future;
use tgcpm_core::{normalize_handle, ChannelProfile, Niche, PartialProfile, ProviderKind, Sourced};
use tgcpm_providers::ChannelProvider;
use tracing::{debug, warn};

use crate::config::AnalysisConfig;
use crate::error::AnalysisError;

/// Fetch from every provider and merge the results into one profile.
///
/// # Errors
///
/// Returns [`AnalysisError::ChannelNotFound`] when no provider returned any
/// data for the handle.
pub async fn aggregate(
    handle: &str,
    providers: &[Box<dyn ChannelProvider>],
    config: &AnalysisConfig,
) -> Result<ChannelProfile, AnalysisError> {
    let handle = normalize_handle(handle);

    let fetches = providers.iter().map(|provider| {
        let handle = handle.clone();
        async move {
            let kind = provider.kind();
            let outcome =
                tokio::time::timeout(config.provider_timeout, provider.fetch(&handle)).await;
            (kind, outcome)
        }
    });
    // join_all preserves input order, so the merge below sees partials in
    // provider priority order no matter which fetch finished first.
    let outcomes = future::join_all(fetches).await;

    let mut partials: Vec<(ProviderKind, PartialProfile)> = Vec::new();
    for (kind, outcome) in outcomes {
        match outcome {
            Ok(Ok(Some(partial))) if !partial.is_empty() => {
                debug!(provider = %kind, channel = %handle, "provider returned data");
                partials.push((kind, partial));
            }
            Ok(Ok(_)) => {
                debug!(provider = %kind, channel = %handle, "provider has no data");
            }
            Ok(Err(err)) => {
                warn!(provider = %kind, channel = %handle, error = %err, "provider failed, skipping");
            }
            Err(_) => {
                warn!(
                    provider = %kind,
                    channel = %handle,
                    timeout_secs = config.provider_timeout.as_secs_f64(),
                    "provider timed out, skipping"
                );
            }
        }
    }

    if partials.is_empty() {
        return Err(AnalysisError::ChannelNotFound(handle));
    }

    Ok(merge(&handle, &partials))
}

/// Field-level merge: the first partial in priority order that carries a value
/// supplies it, tagged with that provider's kind.
fn merge(handle: &str, partials: &[(ProviderKind, PartialProfile)]) -> ChannelProfile {
    fn first<T: Clone>(
        partials: &[(ProviderKind, PartialProfile)],
        get: impl Fn(&PartialProfile) -> Option<&T>,
    ) -> Option<Sourced<T>> {
        partials
            .iter()
            .find_map(|(kind, p)| get(p).map(|v| Sourced::from_provider(v.clone(), *kind)))
    }

    let title = first(partials, |p| p.title.as_ref());
    let description = first(partials, |p| p.description.as_ref());

    let niche = Niche::classify(
        title.as_ref().map(|t| t.value.as_str()),
        description.as_ref().map(|d| d.value.as_str()),
    );

    ChannelProfile {
        handle: handle.to_string(),
        subscribers: first(partials, |p| p.subscribers.as_ref()),
        avg_views: first(partials, |p| p.avg_views.as_ref()),
        verified: first(partials, |p| p.verified.as_ref()),
        posts_per_day: first(partials, |p| p.posts_per_day.as_ref()),
        media_ratio: first(partials, |p| p.media_ratio.as_ref()),
        reactions: first(partials, |p| p.reactions.as_ref()),
        forwards: first(partials, |p| p.forwards.as_ref()),
        title,
        description,
        niche: Sourced::derived(niche),
    }
}
