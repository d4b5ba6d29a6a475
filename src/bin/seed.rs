//! Seeds the admin account and the default bot showcase, then exits.

use anyhow::Context;
use portfolio_site::{
    db::postgres::{create_pool, run_migrations},
    seed::seed_database,
    settings::{AppConfig, StorageBackend},
    shared_repos::SharedRepositories,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::new().context("loading configuration")?;

    if config.storage == StorageBackend::Memory {
        anyhow::bail!("the seed command needs postgres storage; memory storage seeds itself on startup");
    }

    let pool = create_pool(&config.database_url, config.database_max_connections)
        .await
        .context("connecting to the database")?;
    run_migrations(&pool).await.context("running migrations")?;

    seed_database(&SharedRepositories::postgres(pool), &config).await?;
    tracing::info!("Seeding complete");
    Ok(())
}
