//! The `recent` command: list persisted analyses.

use tgcpm_core::AppConfig;
use tgcpm_db::list_recent_analyses;

pub async fn run(config: &AppConfig, handle: Option<&str>, limit: i64) -> anyhow::Result<()> {
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;
    let pool = tgcpm_db::connect_pool(url, crate::pool_config(config)).await?;

    let rows = list_recent_analyses(&pool, handle, limit).await?;
    if rows.is_empty() {
        println!("no analyses recorded");
        return Ok(());
    }

    for row in rows {
        let usd = row
            .competitive_usd
            .map_or_else(|| "-".to_string(), |usd| format!("{usd} USD"));
        println!(
            "{}  @{:<24} {:<12} {:<13} {} TON / {}  p={:.2}{}",
            row.analyzed_at.format("%Y-%m-%d %H:%M"),
            row.handle,
            row.niche,
            row.eligibility,
            row.competitive_ton,
            usd,
            row.success_probability,
            if row.advisory_only { "  (advisory)" } else { "" },
        );
    }
    Ok(())
}
