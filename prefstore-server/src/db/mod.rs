//! Database layer - connection pool and repositories
//!
//! # Design Principles
//!
//! - Bounded connection pool, one scoped connection per statement
//! - Positional `$n` parameters everywhere - values are never interpolated
//!   into statement text
//! - Conflicts handled via ON CONFLICT - no check-then-insert
//! - Errors propagate upward as `DbError`; nothing is retried here

pub mod migrations;
pub mod pool;
pub mod repos;

pub use pool::create_pool;
pub use repos::*;
