//! prefstore-server: authenticated user/preferences HTTP API
//!
//! Request flow: router -> bearer-token auth gate -> handler -> repository
//! -> Postgres pool. Handlers are only reachable through the auth layer;
//! every database statement is parameterized and runs on a connection
//! scoped to that single statement.

pub mod db;
pub mod http;
pub mod models;

pub use http::{build_router, run_server, AppState, ServerConfig};
