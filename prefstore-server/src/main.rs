//! prefstore server binary
//!
//! Loads configuration from the environment, creates the database pool,
//! and serves until shutdown.
//!
//! Usage:
//!   prefstore                          # config from environment
//!   prefstore -b 0.0.0.0:8080         # override bind address
//!   RUST_LOG=prefstore_server=debug prefstore

use std::net::SocketAddr;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use prefstore_core::Config;
use prefstore_server::db::create_pool;
use prefstore_server::http::{run_server, ServerConfig};

/// Arguments for the prefstore server
#[derive(Parser, Debug)]
#[command(
    name = "prefstore",
    about = "Authenticated HTTP API for user records and user preferences",
    version
)]
struct Args {
    /// Address to bind to (overrides PREFSTORE_BIND_ADDR)
    #[arg(long, short = 'b')]
    bind: Option<SocketAddr>,

    /// Postgres connection string (overrides the environment)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    database_url: Option<String>,

    /// Allow permissive CORS (all origins) - use with caution
    #[arg(long)]
    cors_permissive: bool,

    /// Enable debug logging (sets RUST_LOG=debug if not already set)
    #[arg(long)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.debug)?;

    // Fail fast on broken configuration; DATABASE_URL is required, either
    // as a flag or in the environment.
    let database_url = args.database_url.clone();
    let mut config = Config::from_lookup(|key| match key {
        "DATABASE_URL" if database_url.is_some() => database_url.clone(),
        _ => std::env::var(key).ok(),
    })
    .context("invalid configuration")?;
    if let Some(bind) = args.bind {
        config.bind_addr = bind;
    }
    if args.cors_permissive {
        config.cors_permissive = true;
    }

    let pool = create_pool(&config.db).context("failed to create database pool")?;

    tracing::info!("Starting prefstore on {}", config.bind_addr);

    let server_config = ServerConfig {
        bind_addr: config.bind_addr,
        cors_permissive: config.cors_permissive,
    };

    run_server(pool, server_config).await.context("server error")?;

    Ok(())
}

/// Initialize tracing with console output.
fn init_tracing(debug: bool) -> Result<()> {
    let filter = if debug {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(debug)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
