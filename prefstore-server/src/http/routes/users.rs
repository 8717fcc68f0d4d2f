//! User record endpoints

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use crate::db::repos::{User, UserRepo};
use crate::http::error::ApiError;
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;

/// User response
#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub display_name: Option<String>,
    pub created_at: String,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id.to_string(),
            email: u.email,
            display_name: u.display_name,
            created_at: u.created_at.to_rfc3339(),
        }
    }
}

/// GET /user/me - the authenticated user's record
async fn get_me(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<UserResponse>, ApiError> {
    let user = UserRepo::new(state.pool()).get(identity.user_id).await?;
    Ok(Json(UserResponse::from(user)))
}

/// User routes
pub fn router() -> Router<AppState> {
    Router::new().route("/user/me", get(get_me))
}
