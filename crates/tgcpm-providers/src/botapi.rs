//! Telegram Bot API `getChat` client.
//!
//! The Bot API is the only source that reports verification authoritatively,
//! so the harvester adapter overlays its answer on top of cached stats.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::Deserialize;

use crate::error::ProviderError;

const DEFAULT_BASE_URL: &str = "https://api.telegram.org";

/// Basic chat metadata from `getChat`.
#[derive(Debug, Clone, Default)]
pub struct BotChatInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub verified: Option<bool>,
}

#[derive(Debug, Deserialize)]
struct GetChatEnvelope {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    result: Option<GetChatResult>,
}

#[derive(Debug, Deserialize)]
struct GetChatResult {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    is_verified: Option<bool>,
}

/// Client for the Telegram Bot API.
pub struct BotApiClient {
    client: Client,
    token: String,
    base_url: Url,
}

impl BotApiClient {
    /// Creates a client pointed at the production Bot API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(token: &str, timeout_secs: u64) -> Result<Self, ProviderError> {
        Self::with_base_url(token, timeout_secs, DEFAULT_BASE_URL)
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
        })
    }

    /// Look up a public chat by handle.
    ///
    /// Returns `Ok(None)` when Telegram reports the chat as unknown (HTTP 400
    /// or 404 with `ok: false`).
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Api`] on auth failure or an unexpected `ok: false`.
    /// - [`ProviderError::Http`] on network failure or 5xx.
    pub async fn get_chat(&self, handle: &str) -> Result<Option<BotChatInfo>, ProviderError> {
        let path = format!("bot{}/getChat", self.token);
        let url = self
            .base_url
            .join(&path)
            .map_err(|e| ProviderError::Api(format!("invalid bot token path: {e}")))?;

        let chat_id = format!("@{handle}");
        let response = self
            .client
            .get(url)
            .query(&[("chat_id", chat_id.as_str())])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(ProviderError::Api("bot API rejected token".to_owned()));
        }

        // getChat answers 400 with ok:false for unknown chats; read the body
        // before deciding, instead of failing on the status alone.
        let envelope: GetChatEnvelope = if status.is_success()
            || status == StatusCode::BAD_REQUEST
            || status == StatusCode::NOT_FOUND
        {
            let body = response.text().await?;
            serde_json::from_str(&body).map_err(|source| ProviderError::Deserialize {
                context: format!("getChat(@{handle})"),
                source,
            })?
        } else {
            return match response.error_for_status() {
                Err(e) => Err(ProviderError::Http(e)),
                Ok(_) => Err(ProviderError::Api(format!(
                    "unexpected getChat status {status}"
                ))),
            };
        };

        if !envelope.ok {
            let reason = envelope.description.unwrap_or_default();
            if reason.to_lowercase().contains("not found") {
                return Ok(None);
            }
            return Err(ProviderError::Api(format!("getChat failed: {reason}")));
        }

        let result = envelope.result.unwrap_or(GetChatResult {
            title: None,
            description: None,
            is_verified: None,
        });

        Ok(Some(BotChatInfo {
            title: result.title,
            description: result.description,
            verified: result.is_verified,
        }))
    }
}
