//! The `market` command: pricing context for a niche, independent of any
//! particular channel.

use rust_decimal::Decimal;
use tgcpm_analysis::AnalysisConfig;
use tgcpm_core::{AppConfig, Niche};
use tgcpm_providers::{CoingeckoFeed, MarketFeed};

pub async fn run(config: &AppConfig, niche_arg: &str) -> anyhow::Result<()> {
    let niche: Niche = niche_arg
        .parse()
        .map_err(|reason: String| anyhow::anyhow!(reason))?;

    let analysis_config = AnalysisConfig::from_app(config);
    let multiplier = analysis_config.niche_multiplier(niche);

    // Indicative competitive-tier prices at median and top composite scores.
    let mid = (analysis_config.scale_ton * Decimal::new(5, 1))
        .max(analysis_config.floor_ton)
        * multiplier;
    let top = analysis_config.scale_ton.max(analysis_config.floor_ton) * multiplier;

    println!("Niche: {niche}");
    println!("Multiplier: x{multiplier}");
    println!("CPM floor: {} TON", analysis_config.floor_ton);
    println!("Typical competitive CPM: {mid:.2} TON (average channel) to {top:.2} TON (top channel)");

    let feed = CoingeckoFeed::with_base_url(
        config.provider_timeout_secs,
        config.http_max_retries,
        config.retry_backoff_base_ms,
        &config.coingecko_base_url,
    )?;
    match feed.current_rate().await {
        Ok(rate) if rate > Decimal::ZERO => {
            println!("TON rate: {rate} USD");
            println!(
                "Typical competitive CPM: {:.2} USD to {:.2} USD",
                mid * rate,
                top * rate
            );
        }
        Ok(rate) => tracing::warn!(%rate, "rate source returned a non-positive rate"),
        Err(err) => tracing::warn!(error = %err, "TON rate unavailable"),
    }

    Ok(())
}
