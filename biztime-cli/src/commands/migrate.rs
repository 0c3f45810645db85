//! Apply the embedded schema migrations and exit

use anyhow::{Context, Result};
use clap::Parser;

use biztime_server::{create_pool, MIGRATOR};

use crate::config::resolve_database_url;

/// Arguments for the migrate command
#[derive(Parser, Debug)]
pub struct MigrateArgs {
    /// Database URL (falls back to DATABASE_USER/PASSWORD/HOST/PORT/NAME)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,
}

pub async fn run_migrate(args: MigrateArgs) -> Result<()> {
    let database_url = resolve_database_url(args.database_url)?;

    let pool = create_pool(&database_url)
        .await
        .context("Failed to create database pool")?;

    MIGRATOR
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    tracing::info!("Migrations applied");
    pool.close().await;
    Ok(())
}
