//! Harvester adapter: local `channel_stats` cache + Bot API verification.
//!
//! The harvester process (out of scope here) crawls channels and writes
//! engagement stats into the `channel_stats` table. This adapter reads that
//! cache, discards rows past their freshness window, and overlays the Bot API
//! `getChat` answer: the Bot API's verification flag and description are
//! authoritative and replace whatever the crawl captured.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;
use tgcpm_core::{PartialProfile, ProviderKind};

use crate::botapi::BotApiClient;
use crate::error::ProviderError;
use crate::provider::ChannelProvider;

/// A row from the `channel_stats` cache.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ChannelStatsRow {
    title: Option<String>,
    description: Option<String>,
    subscribers: Option<i64>,
    avg_views: Option<f64>,
    posts_per_day: Option<f64>,
    media_ratio: Option<f64>,
    total_reactions: Option<i64>,
    total_forwards: Option<i64>,
    is_verified: Option<bool>,
    updated_at: DateTime<Utc>,
}

/// Channel data source backed by the harvester cache and the Bot API.
pub struct HarvesterProvider {
    pool: PgPool,
    bot: Option<BotApiClient>,
    cache_max_age_hours: u64,
}

impl HarvesterProvider {
    #[must_use]
    pub fn new(pool: PgPool, bot: Option<BotApiClient>, cache_max_age_hours: u64) -> Self {
        Self {
            pool,
            bot,
            cache_max_age_hours,
        }
    }

    async fn load_cached(&self, handle: &str) -> Result<Option<ChannelStatsRow>, ProviderError> {
        let row = sqlx::query_as::<_, ChannelStatsRow>(
            "SELECT title, description, subscribers, avg_views, posts_per_day, \
                    media_ratio, total_reactions, total_forwards, is_verified, updated_at \
             FROM channel_stats WHERE handle = $1",
        )
        .bind(handle)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }
}

/// `true` when the cache row is still within its freshness window.
fn is_fresh(updated_at: DateTime<Utc>, now: DateTime<Utc>, max_age_hours: u64) -> bool {
    let age = now.signed_duration_since(updated_at);
    age <= Duration::hours(i64::try_from(max_age_hours).unwrap_or(i64::MAX))
}

#[allow(clippy::cast_sign_loss)]
fn non_negative(count: Option<i64>) -> Option<u64> {
    count.filter(|c| *c >= 0).map(|c| c as u64)
}

#[async_trait]
impl ChannelProvider for HarvesterProvider {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Harvester
    }

    async fn fetch(&self, handle: &str) -> Result<Option<PartialProfile>, ProviderError> {
        let cached = self.load_cached(handle).await?;

        let cached = match cached {
            Some(row) if is_fresh(row.updated_at, Utc::now(), self.cache_max_age_hours) => {
                Some(row)
            }
            Some(row) => {
                tracing::debug!(
                    handle,
                    updated_at = %row.updated_at,
                    "harvester cache row is stale, ignoring"
                );
                None
            }
            None => None,
        };

        let mut partial = cached.map_or_else(PartialProfile::default, |row| PartialProfile {
            title: row.title,
            description: row.description,
            subscribers: non_negative(row.subscribers),
            avg_views: row.avg_views,
            verified: row.is_verified,
            posts_per_day: row.posts_per_day,
            media_ratio: row.media_ratio,
            reactions: non_negative(row.total_reactions),
            forwards: non_negative(row.total_forwards),
        });

        // Bot API overlay. Failures here must not discard the cached stats.
        if let Some(bot) = &self.bot {
            match bot.get_chat(handle).await {
                Ok(Some(info)) => {
                    if info.title.is_some() {
                        partial.title = info.title;
                    }
                    if info.description.is_some() {
                        partial.description = info.description;
                    }
                    if info.verified.is_some() {
                        partial.verified = info.verified;
                    }
                }
                Ok(None) => {
                    tracing::debug!(handle, "bot API does not know this chat");
                }
                Err(e) => {
                    tracing::warn!(handle, error = %e, "bot API overlay failed, using cache only");
                }
            }
        }

        Ok((!partial.is_empty()).then_some(partial))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_row_within_window() {
        let now = Utc::now();
        assert!(is_fresh(now - Duration::hours(2), now, 6));
    }

    #[test]
    fn stale_row_past_window() {
        let now = Utc::now();
        assert!(!is_fresh(now - Duration::hours(7), now, 6));
    }

    #[test]
    fn future_timestamp_counts_as_fresh() {
        // Clock skew between the harvester and this process.
        let now = Utc::now();
        assert!(is_fresh(now + Duration::minutes(5), now, 6));
    }

    #[test]
    fn negative_counts_become_unknown() {
        assert_eq!(non_negative(Some(-1)), None);
        assert_eq!(non_negative(Some(0)), Some(0));
        assert_eq!(non_negative(None), None);
    }
}
