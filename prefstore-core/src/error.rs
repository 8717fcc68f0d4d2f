//! Startup error types for prefstore.
//!
//! Uses `thiserror` for structured, composable errors. The server binary
//! wraps these in `anyhow` at the top level; library consumers get typed
//! variants they can match on.

use thiserror::Error;

/// Configuration error raised while loading process configuration.
///
/// All variants are fatal: the process must not start serving requests
/// with a broken configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// DATABASE_URL is not set. There is no usable default.
    #[error("DATABASE_URL is not set; a Postgres connection string is required")]
    MissingDatabaseUrl,

    /// A variable is set but its value cannot be parsed.
    #[error("invalid value for {variable}: '{value}' ({reason})")]
    Invalid {
        variable: &'static str,
        value: String,
        reason: &'static str,
    },
}

impl ConfigError {
    /// Create an invalid-value error.
    pub fn invalid(variable: &'static str, value: impl Into<String>, reason: &'static str) -> Self {
        Self::Invalid {
            variable,
            value: value.into(),
            reason,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_variable_and_value() {
        let err = ConfigError::invalid("PREFSTORE_DB_MAX_CONNECTIONS", "lots", "expected an integer");
        let msg = err.to_string();
        assert!(msg.contains("PREFSTORE_DB_MAX_CONNECTIONS"));
        assert!(msg.contains("lots"));
    }

    #[test]
    fn missing_database_url_names_the_variable() {
        assert!(ConfigError::MissingDatabaseUrl
            .to_string()
            .contains("DATABASE_URL"));
    }
}
