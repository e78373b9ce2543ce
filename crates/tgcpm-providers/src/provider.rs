//! Collaborator traits implemented by the concrete adapters.

use async_trait::async_trait;
use rust_decimal::Decimal;
use tgcpm_core::{PartialProfile, ProviderKind};

use crate::error::ProviderError;

/// A single channel data source.
///
/// Implementations must not mutate any channel state and must map "channel not
/// found" to `Ok(None)`; `Err` is reserved for transport, auth, and decode
/// failures. The caller decides priority by the order in which providers are
/// listed; an adapter never needs to know its own rank.
#[async_trait]
pub trait ChannelProvider: Send + Sync {
    /// Which source this adapter speaks for, used in provenance and logs.
    fn kind(&self) -> ProviderKind;

    /// Fetch a best-effort partial record for `handle` (no leading `@`).
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] on transport, auth, or decode failure.
    async fn fetch(&self, handle: &str) -> Result<Option<PartialProfile>, ProviderError>;
}

/// Live conversion-rate source (USD per TON).
#[async_trait]
pub trait MarketFeed: Send + Sync {
    /// Current USD-per-TON rate. Implementations return whatever the upstream
    /// reports; validation (non-positive rates) happens in the CPM calculator.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the feed is unreachable or malformed.
    async fn current_rate(&self) -> Result<Decimal, ProviderError>;
}
