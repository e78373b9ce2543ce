use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AnalysisError {
    /// Every provider either failed or knew nothing about the channel.
    #[error("channel @{0} not found on any data source")]
    ChannelNotFound(String),

    /// The conversion rate is non-positive; fiat output is refused while
    /// native-unit prices remain valid.
    #[error("invalid TON conversion rate: {0}")]
    InvalidRate(Decimal),
}
