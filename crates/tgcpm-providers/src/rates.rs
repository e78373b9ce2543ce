//! CoinGecko market price feed for the TON→USD rate.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;

use crate::error::ProviderError;
use crate::provider::MarketFeed;
use crate::retry::retry_with_backoff;

const DEFAULT_BASE_URL: &str = "https://api.coingecko.com";
const COIN_ID: &str = "the-open-network";

/// TON price feed backed by the CoinGecko simple-price endpoint.
pub struct CoingeckoFeed {
    client: Client,
    base_url: Url,
    max_retries: u32,
    backoff_base_ms: u64,
}

impl CoingeckoFeed {
    /// Creates a feed pointed at the production CoinGecko API.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed.
    pub fn new(
        timeout_secs: u64,
        max_retries: u32,
        backoff_base_ms: u64,
    ) -> Result<Self, ProviderError> {
        Self::with_base_url(timeout_secs, max_retries, backoff_base_ms, DEFAULT_BASE_URL)
    }

    /// Creates a feed with a custom base URL (for testing with wiremock).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError::Http`] if the client cannot be constructed, or
    /// [`ProviderError::Api`] if `base_url` is not a valid URL.
    pub fn with_base_url(
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
            base_url,
            max_retries,
            backoff_base_ms,
        })
    }

    async fn fetch_rate(&self) -> Result<Decimal, ProviderError> {
        let url = self
            .base_url
            .join("api/v3/simple/price")
            .map_err(|e| ProviderError::Api(format!("invalid endpoint: {e}")))?;

        let body: Value = self
            .client
            .get(url)
            .query(&[("ids", COIN_ID), ("vs_currencies", "usd")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let usd = body
            .get(COIN_ID)
            .and_then(|coin| coin.get("usd"))
            .and_then(Value::as_f64)
            .ok_or_else(|| {
                ProviderError::Api(format!("simple/price response missing {COIN_ID}.usd"))
            })?;

        Decimal::from_f64(usd)
            .ok_or_else(|| ProviderError::Api(format!("unrepresentable usd rate: {usd}")))
    }
}

#[async_trait]
impl MarketFeed for CoingeckoFeed {
    async fn current_rate(&self) -> Result<Decimal, ProviderError> {
        retry_with_backoff(self.max_retries, self.backoff_base_ms, || self.fetch_rate()).await
    }
}
