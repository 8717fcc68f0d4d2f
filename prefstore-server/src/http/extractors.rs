//! Custom Axum extractors

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::db::repos::Identity;

use super::error::ApiError;

/// Extract the verified identity attached by the auth middleware.
///
/// Rejects with an internal error when the identity is absent: that means
/// a route was wired up without the auth layer, which is a bug, not a
/// client fault.
pub struct CurrentUser(pub Identity);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Identity>()
            .cloned()
            .map(Self)
            .ok_or_else(|| ApiError::Internal {
                message: "handler reached without auth layer".to_string(),
            })
    }
}
