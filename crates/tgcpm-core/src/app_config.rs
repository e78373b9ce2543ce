use crate::niche::Niche;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// Application configuration, loaded from env vars by [`crate::config`].
///
/// Every provider credential is optional: a missing credential disables that
/// provider rather than failing startup, mirroring how the analyzer degrades
/// at runtime when a provider is unavailable.
#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,

    /// Postgres URL for the analysis store and harvester stats cache.
    /// `None` runs without persistence and without the harvester provider.
    pub database_url: Option<String>,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,

    pub telemetrio_api_key: Option<String>,
    pub telemetrio_base_url: String,
    pub tgstat_api_token: Option<String>,
    pub tgstat_base_url: String,
    pub bot_token: Option<String>,
    pub bot_api_base_url: String,
    pub coingecko_base_url: String,

    pub provider_timeout_secs: u64,
    pub http_max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// Harvester cache rows older than this are treated as unavailable.
    pub harvester_cache_max_age_hours: u64,

    pub min_subscribers: u64,
    /// Observation window for activity stats, in days. Enforced by the
    /// providers when they compute window-scoped fields; recorded here so the
    /// agreed window is configurable alongside the other thresholds.
    pub activity_days: u32,
    /// Floor for every recommended tier, in TON.
    pub min_cpm_ton: f64,
    /// Composite-score-to-TON scaling constant.
    pub cpm_scale_ton: f64,
    /// Niches for which an explicitly unverified channel is ineligible.
    pub verified_niches: Vec<Niche>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[redacted]"),
            )
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field(
                "telemetrio_api_key",
                &self.telemetrio_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("telemetrio_base_url", &self.telemetrio_base_url)
            .field(
                "tgstat_api_token",
                &self.tgstat_api_token.as_ref().map(|_| "[redacted]"),
            )
            .field("tgstat_base_url", &self.tgstat_base_url)
            .field("bot_token", &self.bot_token.as_ref().map(|_| "[redacted]"))
            .field("bot_api_base_url", &self.bot_api_base_url)
            .field("coingecko_base_url", &self.coingecko_base_url)
            .field("provider_timeout_secs", &self.provider_timeout_secs)
            .field("http_max_retries", &self.http_max_retries)
            .field("retry_backoff_base_ms", &self.retry_backoff_base_ms)
            .field(
                "harvester_cache_max_age_hours",
                &self.harvester_cache_max_age_hours,
            )
            .field("min_subscribers", &self.min_subscribers)
            .field("activity_days", &self.activity_days)
            .field("min_cpm_ton", &self.min_cpm_ton)
            .field("cpm_scale_ton", &self.cpm_scale_ton)
            .field("verified_niches", &self.verified_niches)
            .finish()
    }
}
