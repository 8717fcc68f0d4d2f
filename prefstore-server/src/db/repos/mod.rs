//! Repository implementations for database access
//!
//! Each repository owns the statements for one resource. Every statement
//! binds positional parameters and runs on a pool connection scoped to that
//! call; the connection goes back to the pool on success and failure alike.

pub mod preferences;
pub mod sessions;
pub mod users;

pub use preferences::{Preferences, PreferencesRepo};
pub use sessions::{Identity, IdentityResolver, SessionRepo};
pub use users::{User, UserRepo};

/// Database error type.
///
/// Constraint violations, syntax errors, and connectivity failures all
/// arrive as `Sqlx` with the underlying cause preserved. `NotFound` marks
/// row absence where the caller needs a 404.
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}
