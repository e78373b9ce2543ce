//! The `analyze` command: run the full pipeline for one channel and print
//! the report.
//!
//! Providers are assembled from whatever credentials the environment carries,
//! in fixed priority order: Telemetr.io, then the harvester cache, then
//! TGStat. A missing credential disables that provider; only a configuration
//! with no providers at all is an error.

use tgcpm_analysis::{
    analyze_channel, AnalysisConfig, AnalysisReport, AnalysisStore, EligibilityStatus,
};
use tgcpm_core::{AppConfig, Sourced};
use tgcpm_db::PgAnalysisStore;
use tgcpm_providers::{
    BotApiClient, ChannelProvider, CoingeckoFeed, HarvesterProvider, TelemetrioClient, TgstatClient,
};

pub async fn run(config: &AppConfig, handle: &str, json: bool, no_store: bool) -> anyhow::Result<()> {
    let analysis_config = AnalysisConfig::from_app(config);

    let pool = match config.database_url.as_deref() {
        Some(url) => Some(tgcpm_db::connect_pool(url, crate::pool_config(config)).await?),
        None => {
            tracing::info!("DATABASE_URL not set, running without persistence or harvester data");
            None
        }
    };

    let providers = build_providers(config, pool.as_ref())?;
    if providers.is_empty() {
        anyhow::bail!(
            "no data providers configured; set TELEMETRIO_API_KEY, DATABASE_URL, \
             or TGSTAT_API_TOKEN"
        );
    }

    let feed = CoingeckoFeed::with_base_url(
        config.provider_timeout_secs,
        config.http_max_retries,
        config.retry_backoff_base_ms,
        &config.coingecko_base_url,
    )?;

    let store = if no_store {
        None
    } else {
        pool.map(|p| PgAnalysisStore::new(p, analysis_config.weights))
    };
    let store_ref = store.as_ref().map(|s| s as &dyn AnalysisStore);

    let report = analyze_channel(handle, &providers, Some(&feed), store_ref, &analysis_config).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn build_providers(
    config: &AppConfig,
    pool: Option<&sqlx::PgPool>,
) -> anyhow::Result<Vec<Box<dyn ChannelProvider>>> {
    let mut providers: Vec<Box<dyn ChannelProvider>> = Vec::new();

    if let Some(key) = config.telemetrio_api_key.as_deref() {
        providers.push(Box::new(TelemetrioClient::with_base_url(
            key,
            config.provider_timeout_secs,
            config.http_max_retries,
            config.retry_backoff_base_ms,
            &config.telemetrio_base_url,
        )?));
    } else {
        tracing::debug!("telemetr.io API key not set, provider disabled");
    }

    if let Some(pool) = pool {
        let bot = match config.bot_token.as_deref() {
            Some(token) => Some(BotApiClient::with_base_url(
                token,
                config.provider_timeout_secs,
                &config.bot_api_base_url,
            )?),
            None => None,
        };
        providers.push(Box::new(HarvesterProvider::new(
            pool.clone(),
            bot,
            config.harvester_cache_max_age_hours,
        )));
    }

    if let Some(token) = config.tgstat_api_token.as_deref() {
        providers.push(Box::new(TgstatClient::with_base_url(
            token,
            config.provider_timeout_secs,
            config.http_max_retries,
            config.retry_backoff_base_ms,
            &config.tgstat_base_url,
        )?));
    } else {
        tracing::debug!("tgstat token not set, provider disabled");
    }

    Ok(providers)
}

fn fmt_sourced<T: std::fmt::Display>(field: Option<&Sourced<T>>) -> String {
    match field {
        Some(s) => format!("{} (via {})", s.value, s.source),
        None => "unknown".to_string(),
    }
}

fn print_report(report: &AnalysisReport) {
    let profile = &report.profile;
    let rec = &report.recommendation;

    println!("Channel: @{}", profile.handle);
    if let Some(title) = &profile.title {
        println!("Title:       {}", title.value);
    }
    println!("Niche:       {}", profile.niche.value);
    println!("Subscribers: {}", fmt_sourced(profile.subscribers.as_ref()));
    println!("Avg views:   {}", fmt_sourced(profile.avg_views.as_ref()));
    println!("Posts/day:   {}", fmt_sourced(profile.posts_per_day.as_ref()));
    println!("Verified:    {}", fmt_sourced(profile.verified.as_ref()));
    if let Some(band) = report.engagement_band {
        println!("Engagement:  {band}");
    }
    println!();

    match report.eligibility.status {
        EligibilityStatus::Eligible => println!("Eligibility: eligible"),
        EligibilityStatus::Ineligible => {
            println!("Eligibility: INELIGIBLE");
            for req in &report.eligibility.failed {
                println!("  failed: {req}");
            }
        }
        EligibilityStatus::Indeterminate => {
            println!("Eligibility: indeterminate");
            for req in &report.eligibility.indeterminate {
                println!("  unverifiable: {req}");
            }
        }
    }

    let scores = &report.scores;
    println!(
        "Scores: engagement {:.2}, activity {:.2}, content {:.2}, interaction {:.2}",
        scores.engagement, scores.activity, scores.content_quality, scores.interaction
    );
    println!();

    if rec.advisory_only {
        println!("Channel does not meet placement requirements; prices below are reference only.");
    }
    println!(
        "CPM (TON): conservative {}, competitive {}, aggressive {}",
        rec.conservative_ton, rec.competitive_ton, rec.aggressive_ton
    );
    match (&rec.fiat, report.rate_usd_per_ton) {
        (Some(fiat), Some(rate)) => {
            println!(
                "CPM (USD): conservative {}, competitive {}, aggressive {} (at {} USD/TON)",
                fiat.conservative_usd, fiat.competitive_usd, fiat.aggressive_usd, rate
            );
        }
        _ => println!("CPM (USD): unavailable, conversion rate could not be fetched"),
    }
    println!(
        "Success probability: {:.0}%",
        rec.success_probability * 100.0
    );
}
