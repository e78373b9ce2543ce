//! Telemetr.io premium analytics adapter.
//!
//! Combines the `channel/info` and `channel/stats` endpoints into one partial
//! profile. Telemetr.io responses vary between plan tiers, so field extraction
//! is deliberately tolerant: subscriber counts may arrive under several names,
//! as numbers or as formatted strings, sometimes nested under a `stats` object.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde_json::{Map, Value};
use tgcpm_core::{PartialProfile, ProviderKind};

use crate::error::ProviderError;
use crate::provider::ChannelProvider;
use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://api.telemetr.io/v1";
const ENDPOINTS: &[&str] = &["channel/info", "channel/stats"];

/// Client for the Telemetr.io REST API.
pub struct TelemetrioClient {
    client: Client,
    api_key: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl TelemetrioClient {
    /// Creates a client pointed at the production Telemetr.io API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        api_key: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ProviderError> {
        Self::with_base_url(api_key, timeout_secs, max_retries, backoff_base_ms, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the client cannot be constructed, or
    /// [`ProviderError::Api`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        api_key: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
        base_url: &str,
    ) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent("tgcpm/0.1 (channel-analytics)")
            .build()?;

        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|e| ProviderError::Api(format!("invalid base URL '{base_url}': {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.to_owned(),
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    /// Fetch and merge both endpoints into one JSON object.
    ///
    /// A 404 from an endpoint means the channel is not tracked there; only
    /// when every endpoint 404s is the channel reported as unknown.
    async fn fetch_combined(&self, handle: &str) -> Result<Option<Map<String, Value>>, ProviderError> {
        let mut combined = Map::new();
        let mut any_hit = false;

        for endpoint in ENDPOINTS {
            let url = self.base_url.join(endpoint).map_err(|e| {
                ProviderError::Api(format!("invalid endpoint '{endpoint}': {e}"))
            })?;

            let response = self
                .client
                .get(url)
                .header("x-api-key", &self.api_key)
                .query(&[("handle", handle)])
                .send()
                .await?;

            match response.status() {
                StatusCode::NOT_FOUND => {
                    tracing::debug!(handle, endpoint, "channel not tracked by telemetr.io");
                }
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    return Err(ProviderError::Api(format!(
                        "telemetr.io rejected API key ({})",
                        response.status()
                    )));
                }
                _ => {
                    let body: Value = response.error_for_status()?.json().await?;
                    if let Value::Object(map) = body {
                        combined.extend(map);
                        any_hit = true;
                    }
                }
            }
        }

        Ok(any_hit.then_some(combined))
    }
}

#[async_trait]
impl ChannelProvider for TelemetrioClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Telemetrio
    }

    async fn fetch(&self, handle: &str) -> Result<Option<PartialProfile>, ProviderError> {
        let combined = retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.fetch_combined(handle)
        })
        .await?;

        Ok(combined.map(|map| partial_from_payload(&Value::Object(map))))
    }
}

/// Map a merged Telemetr.io payload onto a [`PartialProfile`].
fn partial_from_payload(payload: &Value) -> PartialProfile {
    let posts_per_day = extract_number(payload, &["posts_per_day", "postsPerDay"]).or_else(|| {
        // Some plans only expose a weekly post count.
        extract_number(payload, &["posts_last_week", "postsLastWeek"]).map(|w| w / 7.0)
    });

    PartialProfile {
        title: extract_string(payload, &["title", "name"]),
        description: extract_string(payload, &["description", "about"]),
        subscribers: extract_subscribers(payload),
        avg_views: extract_number(payload, &["avg_views", "avgViews", "avg_post_reach"]),
        verified: extract_bool(payload, &["verified", "is_verified"]),
        posts_per_day,
        media_ratio: extract_number(payload, &["media_ratio", "mediaRatio"]),
        reactions: extract_count(payload, &["total_reactions", "totalReactions"]),
        forwards: extract_count(payload, &["total_forwards", "totalForwards"]),
    }
}

/// Extract a subscriber count from the many shapes Telemetr.io uses.
///
/// Checks a list of known field names at the top level, then recurses into a
/// nested `stats` object. Values may be integers, floats, or strings with
/// thousands separators.
pub(crate) fn extract_subscribers(payload: &Value) -> Option<u64> {
    const FIELDS: &[&str] = &[
        "participants_count",
        "subscribers_count",
        "member_count",
        "subscribers",
        "members",
        "participants",
        "participantsCount",
        "subscribersCount",
        "memberCount",
    ];

    if let Some(count) = extract_count(payload, FIELDS) {
        return Some(count);
    }

    payload.get("stats").and_then(extract_subscribers)
}

fn extract_string(payload: &Value, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|f| payload.get(f))
        .filter_map(Value::as_str)
        .map(str::trim)
        .find(|s| !s.is_empty())
        .map(ToOwned::to_owned)
}

fn extract_bool(payload: &Value, fields: &[&str]) -> Option<bool> {
    fields
        .iter()
        .filter_map(|f| payload.get(f))
        .find_map(Value::as_bool)
}

fn extract_number(payload: &Value, fields: &[&str]) -> Option<f64> {
    fields.iter().filter_map(|f| payload.get(f)).find_map(|v| match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_formatted_number(s),
        _ => None,
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn extract_count(payload: &Value, fields: &[&str]) -> Option<u64> {
    extract_number(payload, fields).map(|n| n.max(0.0).round() as u64)
}

/// Parse `"24,300"` / `"24 300"` style formatted numbers.
fn parse_formatted_number(raw: &str) -> Option<f64> {
    let cleaned: String = raw.chars().filter(|c| !matches!(c, ',' | ' ')).collect();
    cleaned.parse::<f64>().ok().filter(|n| n.is_finite())
}
