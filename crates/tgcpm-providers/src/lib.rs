//! Data provider adapters for TGCPM.
//!
//! Each adapter implements the [`ChannelProvider`] trait: a best-effort fetch
//! that returns `Ok(None)` when the channel is simply not known to the source
//! and reserves `Err` for genuine transport, auth, or decode failures. The
//! aggregator in `tgcpm-analysis` iterates a priority-ordered list of these.
//!
//! Also hosts the [`MarketFeed`] trait and its CoinGecko implementation for
//! the TON→USD conversion rate.

pub mod botapi;
pub mod error;
pub mod harvester;
pub mod provider;
pub mod rates;
pub mod telemetrio;
pub mod tgstat;

mod retry;

pub use botapi::BotApiClient;
pub use error::ProviderError;
pub use harvester::HarvesterProvider;
pub use provider::{ChannelProvider, MarketFeed};
pub use rates::CoingeckoFeed;
pub use telemetrio::TelemetrioClient;
pub use tgstat::TgstatClient;
