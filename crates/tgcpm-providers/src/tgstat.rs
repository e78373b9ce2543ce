//! TGStat fallback discovery adapter.
//!
//! TGStat tracks far more channels than the premium sources but exposes only
//! coarse metrics on the free tier, so it sits last in the priority order and
//! mostly fills subscriber counts and reach for channels nobody else knows.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;
use tgcpm_core::{PartialProfile, ProviderKind};

use crate::error::ProviderError;
use crate::provider::ChannelProvider;
use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://api.tgstat.ru";

#[derive(Debug, Deserialize)]
struct TgstatEnvelope {
    #[serde(default)]
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<TgstatChannel>,
}

#[derive(Debug, Deserialize)]
struct TgstatChannel {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default, rename = "participantsCount")]
    participants_count: Option<u64>,
    #[serde(default, rename = "avgPostReach")]
    avg_post_reach: Option<f64>,
    #[serde(default)]
    verified: Option<bool>,
}

/// Client for the TGStat REST API.
pub struct TgstatClient {
    client: Client,
    token: String,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl TgstatClient {
    /// Creates a client pointed at the production TGStat API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        token: &str,
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ProviderError> {
        Self::with_base_url(token, timeout_secs, max_retries, backoff_base_ms, DEFAULT_BASE_URL)
    }

    /// Creates a client with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the client cannot be constructed, or
    /// [`ProviderError::Api`] if `base_url` is not a valid URL.
    pub fn with_base_url(
        token: &str,
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
            token: token.to_owned(),
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    async fn fetch_channel(&self, handle: &str) -> Result<Option<PartialProfile>, ProviderError> {
        let url = self
            .base_url
            .join("channels/get")
            .map_err(|e| ProviderError::Api(format!("invalid endpoint: {e}")))?;

        let channel_id = format!("@{handle}");
        let response = self
            .client
            .get(url)
            .header("Authorization", format!("Token {}", self.token))
            .query(&[("channelId", channel_id.as_str())])
            .send()
            .await?;

        match response.status() {
            StatusCode::NOT_FOUND => return Ok(None),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(ProviderError::Api(format!(
                    "tgstat rejected API token ({})",
                    response.status()
                )));
            }
            _ => {}
        }

        let body = response.error_for_status()?.text().await?;
        let envelope: TgstatEnvelope =
            serde_json::from_str(&body).map_err(|source| ProviderError::Deserialize {
                context: format!("channels/get(@{handle})"),
                source,
            })?;

        if !envelope.ok {
            // TGStat reports unknown channels through the envelope rather
            // than the HTTP status.
            tracing::debug!(
                handle,
                reason = envelope.description.as_deref().unwrap_or("unspecified"),
                "tgstat returned no result"
            );
            return Ok(None);
        }

        Ok(envelope.result.map(|channel| PartialProfile {
            title: channel.title,
            description: channel.description,
            subscribers: channel.participants_count,
            avg_views: channel.avg_post_reach,
            verified: channel.verified,
            posts_per_day: None,
            media_ratio: None,
            reactions: None,
            forwards: None,
        }))
    }
}

#[async_trait]
impl ChannelProvider for TgstatClient {
    fn kind(&self) -> ProviderKind {
        ProviderKind::Tgstat
    }

    async fn fetch(&self, handle: &str) -> Result<Option<PartialProfile>, ProviderError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || {
            self.fetch_channel(handle)
        })
        .await
    }
}
