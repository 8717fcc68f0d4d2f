//! User preferences repository
//!
//! One row per user, replaced wholesale on write:
//! - upsert: INSERT with ON CONFLICT (user_id) DO UPDATE, single statement
//! - get: returns None for users who never stored preferences

use chrono::{DateTime, Utc};
use serde_json::Value as JsonValue;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::models::PreferencesUpdate;

use super::DbError;

/// Preferences record from database.
///
/// `updated_at` is None only for the synthesized default of a user with no
/// stored row.
#[derive(Debug, Clone, FromRow)]
pub struct Preferences {
    pub user_id: Uuid,
    pub theme: String,
    pub locale: Option<String>,
    pub notifications: bool,
    pub settings: JsonValue,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Preferences {
    /// Default representation for a user who has never stored preferences.
    pub fn default_for(user_id: Uuid) -> Self {
        Self {
            user_id,
            theme: "system".to_string(),
            locale: None,
            notifications: true,
            settings: JsonValue::Object(Default::default()),
            updated_at: None,
        }
    }
}

/// Preferences repository
pub struct PreferencesRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> PreferencesRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get stored preferences for a user.
    pub async fn get(&self, user_id: Uuid) -> Result<Option<Preferences>, DbError> {
        let prefs: Option<Preferences> = sqlx::query_as(
            r#"
            SELECT user_id, theme, locale, notifications, settings, updated_at
            FROM user_preferences
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(self.pool)
        .await?;

        Ok(prefs)
    }

    /// Replace a user's preferences, inserting the row if absent.
    ///
    /// One statement; concurrent writers race with last-write-wins
    /// semantics at the database level.
    pub async fn upsert(
        &self,
        user_id: Uuid,
        update: &PreferencesUpdate,
    ) -> Result<Preferences, DbError> {
        let prefs: Preferences = sqlx::query_as(
            r#"
            INSERT INTO user_preferences (user_id, theme, locale, notifications, settings)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (user_id) DO UPDATE
            SET theme = EXCLUDED.theme,
                locale = EXCLUDED.locale,
                notifications = EXCLUDED.notifications,
                settings = EXCLUDED.settings,
                updated_at = NOW()
            RETURNING user_id, theme, locale, notifications, settings, updated_at
            "#,
        )
        .bind(user_id)
        .bind(update.theme().as_str())
        .bind(update.locale())
        .bind(update.notifications())
        .bind(update.settings())
        .fetch_one(self.pool)
        .await?;

        Ok(prefs)
    }
}
