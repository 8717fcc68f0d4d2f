//! Database connection pool management
//!
//! Uses sqlx PgPool with explicit connection limits. Connections are
//! established lazily: a missing DATABASE_URL is a startup failure, but an
//! unreachable database surfaces per-request when acquisition fails.

use prefstore_core::DbConfig;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions, PgSslMode};
use sqlx::PgPool;

/// Create a PostgreSQL connection pool from pool configuration.
///
/// The pool holds at most `max_connections` live sessions, closes
/// connections idle for longer than `idle_timeout`, and bounds waiting for
/// a free connection by `acquire_timeout` (`sqlx::Error::PoolTimedOut`).
///
/// # Errors
///
/// Returns an error if the connection string cannot be parsed. Reaching
/// the database is deferred to the first acquisition.
pub fn create_pool(config: &DbConfig) -> Result<PgPool, sqlx::Error> {
    let mut options: PgConnectOptions = config.database_url.parse()?;
    if config.disable_tls {
        options = options.ssl_mode(PgSslMode::Disable);
    }

    Ok(PgPoolOptions::new()
        .max_connections(config.max_connections)
        .idle_timeout(config.idle_timeout)
        .acquire_timeout(config.acquire_timeout)
        .connect_lazy_with(options))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn test_config(url: &str) -> DbConfig {
        DbConfig {
            database_url: url.to_string(),
            max_connections: 2,
            idle_timeout: Duration::from_secs(30),
            acquire_timeout: Duration::from_secs(1),
            disable_tls: true,
        }
    }

    // Pool construction spawns maintenance tasks, so even the lazy path
    // needs a runtime.
    #[tokio::test]
    async fn lazy_pool_construction_needs_no_database() {
        // No server is listening here; construction must still succeed.
        let pool = create_pool(&test_config("postgres://127.0.0.1:1/prefstore"));
        assert!(pool.is_ok());
    }

    #[test]
    fn invalid_connection_string_rejected() {
        let pool = create_pool(&test_config("not a url"));
        assert!(pool.is_err());
    }

    #[tokio::test]
    async fn acquire_fails_when_database_unreachable() {
        let pool = create_pool(&test_config("postgres://127.0.0.1:1/prefstore")).unwrap();
        let result = pool.acquire().await;
        assert!(result.is_err());
    }

    // Integration tests require a real database
    // Run with: DATABASE_URL=postgres://... cargo test -p prefstore-server -- --ignored

    #[tokio::test]
    #[ignore = "requires database"]
    async fn pool_acquires_connection() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&test_config(&url)).expect("pool creation failed");

        let result: (i32,) = sqlx::query_as("SELECT 1")
            .fetch_one(&pool)
            .await
            .expect("query failed");

        assert_eq!(result.0, 1);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn concurrent_pool_access() {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = create_pool(&test_config(&url)).expect("pool creation failed");

        let handles: Vec<_> = (0..10)
            .map(|i| {
                let pool = pool.clone();
                tokio::spawn(async move {
                    let result: (i32,) = sqlx::query_as("SELECT $1::int")
                        .bind(i)
                        .fetch_one(&pool)
                        .await
                        .expect("concurrent query failed");
                    result.0
                })
            })
            .collect();

        for (i, handle) in handles.into_iter().enumerate() {
            let result = handle.await.expect("task panicked");
            assert_eq!(result, i as i32);
        }
    }
}
