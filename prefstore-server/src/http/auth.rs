//! Bearer-token authentication gate
//!
//! Layered in front of every protected route; handlers are not reachable
//! through any other path. On success the verified `Identity` rides in the
//! request extensions; on failure the pipeline short-circuits with 401
//! before any handler or statement runs.

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, Request};
use axum::middleware::Next;
use axum::response::Response;
use tracing::warn;

use crate::db::repos::Identity;

use super::error::ApiError;
use super::server::AppState;

/// Authentication middleware for protected routes.
pub async fn require_auth(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let token = bearer_token(request.headers())?;

    let identity: Identity = match state.resolver().resolve(token).await? {
        Some(identity) => identity,
        None => {
            warn!(token_prefix = %mask_token(token), "rejected unknown or expired token");
            return Err(ApiError::Unauthorized {
                reason: "invalid or expired credential".to_string(),
            });
        }
    };

    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

/// Extract the bearer token from the Authorization header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    let Some(value) = headers.get(header::AUTHORIZATION) else {
        return Err(unauthorized("missing Authorization header"));
    };

    let value = value
        .to_str()
        .map_err(|_| unauthorized("Authorization header contains invalid characters"))?;

    let Some(token) = value.strip_prefix("Bearer ") else {
        return Err(unauthorized("expected 'Bearer <token>'"));
    };

    if token.is_empty() {
        return Err(unauthorized("bearer token is empty"));
    }

    Ok(token)
}

fn unauthorized(reason: &str) -> ApiError {
    warn!("authentication failed: {}", reason);
    ApiError::Unauthorized {
        reason: reason.to_string(),
    }
}

/// Token prefix for logs; never log the full credential.
fn mask_token(token: &str) -> String {
    if token.len() <= 3 {
        "***".to_string()
    } else {
        format!("{}***", &token[..3])
    }
}
