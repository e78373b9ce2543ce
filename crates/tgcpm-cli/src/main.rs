mod analyze;
mod market;
mod recent;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tgcpm")]
#[command(about = "Telegram channel CPM analyzer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Analyze a channel and print a CPM recommendation
    Analyze {
        /// Channel handle, with or without the leading @
        handle: String,

        /// Print the full report as JSON
        #[arg(long)]
        json: bool,

        /// Skip persisting the result
        #[arg(long)]
        no_store: bool,
    },
    /// Show CPM market context for a niche
    Market {
        /// Niche name, e.g. crypto, finance, tech
        niche: String,
    },
    /// List recently persisted analyses
    Recent {
        /// Restrict to a single channel handle
        #[arg(long)]
        handle: Option<String>,

        #[arg(long, default_value_t = 10)]
        limit: i64,
    },
    /// Apply pending database migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = tgcpm_core::load_app_config()?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Analyze {
            handle,
            json,
            no_store,
        } => analyze::run(&config, &handle, json, no_store).await,
        Commands::Market { niche } => market::run(&config, &niche).await,
        Commands::Recent { handle, limit } => recent::run(&config, handle.as_deref(), limit).await,
        Commands::Migrate => migrate(&config).await,
    }
}

async fn migrate(config: &tgcpm_core::AppConfig) -> anyhow::Result<()> {
    let url = config
        .database_url
        .as_deref()
        .ok_or_else(|| anyhow::anyhow!("DATABASE_URL is not set"))?;
    let pool = tgcpm_db::connect_pool(url, pool_config(config)).await?;
    let applied = tgcpm_db::run_migrations(&pool).await?;
    println!("applied {applied} migration(s)");
    Ok(())
}

pub(crate) fn pool_config(config: &tgcpm_core::AppConfig) -> tgcpm_db::PoolConfig {
    tgcpm_db::PoolConfig {
        max_connections: config.db_max_connections,
        min_connections: config.db_min_connections,
        acquire_timeout_secs: config.db_acquire_timeout_secs,
    }
}
