//! Environment-driven configuration for prefstore.
//!
//! Fails hard at startup when DATABASE_URL is absent; everything else has
//! a documented default. Loading goes through a lookup function so tests
//! never have to mutate process-wide environment variables.

use std::env;
use std::net::SocketAddr;
use std::time::Duration;

use crate::error::ConfigError;

/// Default listen address.
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3030";

// Pool tuning defaults. These mirror the documented contract:
// up to 20 live connections, idle ones closed after 30s, and a
// 10s bound on waiting for a free connection.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_ACQUIRE_TIMEOUT_SECS: u64 = 10;

/// Database pool configuration.
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Postgres connection string (sensitive - never logged).
    pub database_url: String,
    /// Maximum connections in the pool.
    pub max_connections: u32,
    /// Close connections idle for longer than this.
    pub idle_timeout: Duration,
    /// Give up acquiring a connection after this long.
    pub acquire_timeout: Duration,
    /// Disable TLS to the database (local development).
    pub disable_tls: bool,
}

/// Process configuration for the prefstore server.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the HTTP listener to.
    pub bind_addr: SocketAddr,
    /// Allow permissive CORS (all origins).
    pub cors_permissive: bool,
    /// Database pool configuration.
    pub db: DbConfig,
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingDatabaseUrl` when DATABASE_URL is not
    /// set, and `ConfigError::Invalid` for unparseable values.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through a lookup function.
    ///
    /// The production path passes `env::var`; tests pass a map.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let database_url = lookup("DATABASE_URL")
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::MissingDatabaseUrl)?;

        let bind_addr = parse_or_default(
            &lookup,
            "PREFSTORE_BIND_ADDR",
            DEFAULT_BIND_ADDR.parse().expect("default bind addr parses"),
            "expected host:port",
        )?;

        let max_connections = parse_or_default(
            &lookup,
            "PREFSTORE_DB_MAX_CONNECTIONS",
            DEFAULT_MAX_CONNECTIONS,
            "expected a positive integer",
        )?;
        if max_connections == 0 {
            return Err(ConfigError::invalid(
                "PREFSTORE_DB_MAX_CONNECTIONS",
                "0",
                "must be greater than 0",
            ));
        }

        let idle_timeout_secs = parse_or_default(
            &lookup,
            "PREFSTORE_DB_IDLE_TIMEOUT_SECS",
            DEFAULT_IDLE_TIMEOUT_SECS,
            "expected an integer number of seconds",
        )?;
        let acquire_timeout_secs = parse_or_default(
            &lookup,
            "PREFSTORE_DB_ACQUIRE_TIMEOUT_SECS",
            DEFAULT_ACQUIRE_TIMEOUT_SECS,
            "expected an integer number of seconds",
        )?;

        let disable_tls = parse_bool(&lookup, "PREFSTORE_DB_DISABLE_TLS")?;
        let cors_permissive = parse_bool(&lookup, "PREFSTORE_CORS_PERMISSIVE")?;

        Ok(Self {
            bind_addr,
            cors_permissive,
            db: DbConfig {
                database_url,
                max_connections,
                idle_timeout: Duration::from_secs(idle_timeout_secs),
                acquire_timeout: Duration::from_secs(acquire_timeout_secs),
                disable_tls,
            },
        })
    }
}

fn parse_or_default<F, T>(
    lookup: &F,
    variable: &'static str,
    default: T,
    reason: &'static str,
) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(variable) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::invalid(variable, raw, reason)),
        None => Ok(default),
    }
}

/// Parse an optional boolean variable. Accepts true/false/1/0, case
/// insensitive; anything else is a configuration error rather than a
/// silent default.
fn parse_bool<F>(lookup: &F, variable: &'static str) -> Result<bool, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(variable) {
        None => Ok(false),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(ConfigError::invalid(variable, raw, "expected true or false")),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from<'a>(pairs: &'a [(&'a str, &'a str)]) -> impl Fn(&str) -> Option<String> + 'a {
        let map: HashMap<&str, &str> = pairs.iter().copied().collect();
        move |key| map.get(key).map(|v| v.to_string())
    }

    #[test]
    fn missing_database_url_is_fatal() {
        let result = Config::from_lookup(|_| None);
        assert!(matches!(result, Err(ConfigError::MissingDatabaseUrl)));
    }

    #[test]
    fn empty_database_url_is_fatal() {
        let result = Config::from_lookup(lookup_from(&[("DATABASE_URL", "  ")]));
        assert!(matches!(result, Err(ConfigError::MissingDatabaseUrl)));
    }

    #[test]
    fn defaults_applied_when_only_database_url_set() {
        let config =
            Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://localhost/app")]))
                .unwrap();

        assert_eq!(config.bind_addr, DEFAULT_BIND_ADDR.parse().unwrap());
        assert!(!config.cors_permissive);
        assert_eq!(config.db.max_connections, 20);
        assert_eq!(config.db.idle_timeout, Duration::from_secs(30));
        assert_eq!(config.db.acquire_timeout, Duration::from_secs(10));
        assert!(!config.db.disable_tls);
    }

    #[test]
    fn overrides_respected() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("PREFSTORE_BIND_ADDR", "0.0.0.0:8080"),
            ("PREFSTORE_DB_MAX_CONNECTIONS", "5"),
            ("PREFSTORE_DB_IDLE_TIMEOUT_SECS", "120"),
            ("PREFSTORE_DB_ACQUIRE_TIMEOUT_SECS", "2"),
            ("PREFSTORE_DB_DISABLE_TLS", "true"),
            ("PREFSTORE_CORS_PERMISSIVE", "1"),
        ]))
        .unwrap();

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.db.max_connections, 5);
        assert_eq!(config.db.idle_timeout, Duration::from_secs(120));
        assert_eq!(config.db.acquire_timeout, Duration::from_secs(2));
        assert!(config.db.disable_tls);
        assert!(config.cors_permissive);
    }

    #[test]
    fn malformed_integer_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("PREFSTORE_DB_MAX_CONNECTIONS", "twenty"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { variable, .. })
            if variable == "PREFSTORE_DB_MAX_CONNECTIONS"));
    }

    #[test]
    fn zero_max_connections_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("PREFSTORE_DB_MAX_CONNECTIONS", "0"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn malformed_bool_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("PREFSTORE_DB_DISABLE_TLS", "yes"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { variable, .. })
            if variable == "PREFSTORE_DB_DISABLE_TLS"));
    }

    #[test]
    fn malformed_bind_addr_rejected() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/app"),
            ("PREFSTORE_BIND_ADDR", "not-an-addr"),
        ]));
        assert!(result.is_err());
    }
}
