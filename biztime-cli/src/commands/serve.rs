//! HTTP server command for the BizTime API

use std::net::SocketAddr;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;

use biztime_server::{create_pool_with_options, run_server, PoolSettings, ServerConfig, MIGRATOR};

use crate::config::resolve_database_url;

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Address to bind to
    #[arg(long, short = 'b', env = "BIZTIME_BIND", default_value = "127.0.0.1:3000")]
    pub bind: SocketAddr,

    /// Database URL (falls back to DATABASE_USER/PASSWORD/HOST/PORT/NAME)
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "BIZTIME_MAX_CONNECTIONS", default_value_t = 5)]
    pub max_connections: u32,

    /// Seconds to wait for a free database connection
    #[arg(long, env = "BIZTIME_ACQUIRE_TIMEOUT_SECS", default_value_t = 30)]
    pub acquire_timeout_secs: u64,

    /// Seconds before an in-flight request is abandoned with 408
    #[arg(long, env = "BIZTIME_REQUEST_TIMEOUT_SECS", default_value_t = 30)]
    pub request_timeout_secs: u64,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    pub cors_permissive: bool,

    /// Do not apply pending migrations before serving
    #[arg(long)]
    pub skip_migrations: bool,
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let database_url = resolve_database_url(args.database_url)?;

    tracing::info!("Starting BizTime server on {}", args.bind);

    // Create database pool
    let pool = create_pool_with_options(
        &database_url,
        PoolSettings {
            max_connections: args.max_connections,
            acquire_timeout: Duration::from_secs(args.acquire_timeout_secs),
        },
    )
    .await
    .context("Failed to create database pool")?;

    if args.skip_migrations {
        tracing::warn!("Skipping migrations");
    } else {
        MIGRATOR
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    // Configure server
    let config = ServerConfig {
        bind_addr: args.bind,
        cors_permissive: args.cors_permissive,
        request_timeout: Duration::from_secs(args.request_timeout_secs),
    };

    // Run server (blocks until shutdown)
    run_server(pool, config).await.context("Server error")?;

    Ok(())
}
