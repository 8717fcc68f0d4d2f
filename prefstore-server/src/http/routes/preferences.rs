//! User preferences endpoints
//!
//! GET returns the stored row or a default representation when the user
//! has never written preferences. PUT validates, then issues exactly one
//! upsert statement.

use axum::extract::rejection::JsonRejection;
use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::db::repos::{Preferences, PreferencesRepo};
use crate::http::error::ApiError;
use crate::http::extractors::CurrentUser;
use crate::http::server::AppState;
use crate::models::PreferencesUpdate;

/// Put preferences request.
///
/// Wholesale replacement: absent fields take fresh-row defaults.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PutPreferencesRequest {
    pub theme: Option<String>,
    pub locale: Option<String>,
    pub notifications: Option<bool>,
    pub settings: Option<JsonValue>,
}

/// Preferences response
#[derive(Serialize)]
pub struct PreferencesResponse {
    pub user_id: String,
    pub theme: String,
    pub locale: Option<String>,
    pub notifications: bool,
    pub settings: JsonValue,
    pub updated_at: Option<String>,
}

impl From<Preferences> for PreferencesResponse {
    fn from(p: Preferences) -> Self {
        Self {
            user_id: p.user_id.to_string(),
            theme: p.theme,
            locale: p.locale,
            notifications: p.notifications,
            settings: p.settings,
            updated_at: p.updated_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// GET /user-preferences - stored preferences, or defaults when absent
async fn get_preferences(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
) -> Result<Json<PreferencesResponse>, ApiError> {
    let prefs = PreferencesRepo::new(state.pool())
        .get(identity.user_id)
        .await?
        .unwrap_or_else(|| Preferences::default_for(identity.user_id));

    Ok(Json(PreferencesResponse::from(prefs)))
}

/// PUT /user-preferences - validate, then upsert the whole row
async fn put_preferences(
    State(state): State<AppState>,
    CurrentUser(identity): CurrentUser,
    payload: Result<Json<PutPreferencesRequest>, JsonRejection>,
) -> Result<Json<PreferencesResponse>, ApiError> {
    // Body that doesn't deserialize (wrong type for a known field, unknown
    // field, invalid JSON) is a 400 before any database interaction.
    let Json(req) = payload.map_err(|rejection| ApiError::MalformedBody {
        detail: rejection.body_text(),
    })?;

    let update = PreferencesUpdate::new(req.theme, req.locale, req.notifications, req.settings)?;

    let stored = PreferencesRepo::new(state.pool())
        .upsert(identity.user_id, &update)
        .await?;

    Ok(Json(PreferencesResponse::from(stored)))
}

/// Preferences routes
pub fn router() -> Router<AppState> {
    Router::new().route("/user-preferences", get(get_preferences).put(put_preferences))
}
