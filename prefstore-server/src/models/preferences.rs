//! Validated preferences input
//!
//! The PUT body is free-form JSON at the edge; this module turns it into a
//! `PreferencesUpdate` that is known-good before any statement runs.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value as JsonValue;

use super::validation::ValidationError;

/// Locale tags look like "en" or "en-US". Deliberately narrower than full
/// BCP 47; anything fancier gets rejected rather than stored.
static LOCALE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z]{2,3}(-[A-Z]{2})?$").expect("locale regex compiles"));

/// Maximum locale tag length
const MAX_LOCALE_LEN: usize = 16;

/// Maximum serialized size of the free-form settings object (16 KiB)
const MAX_SETTINGS_BYTES: usize = 16 * 1024;

/// UI theme preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
    System,
}

impl Theme {
    /// Parse a theme name, rejecting unknown variants.
    pub fn parse(value: &str) -> Result<Self, ValidationError> {
        match value {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            _ => Err(ValidationError::InvalidVariant {
                field: "theme",
                value: value.to_string(),
            }),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::System => "system",
        }
    }
}

/// A validated whole-row preferences replacement.
///
/// Fields absent from the request body take the same defaults a fresh row
/// would have (PUT replaces the row, it does not patch it).
#[derive(Debug, Clone)]
pub struct PreferencesUpdate {
    theme: Theme,
    locale: Option<String>,
    notifications: bool,
    settings: JsonValue,
}

impl PreferencesUpdate {
    /// Validate raw request fields into an update.
    pub fn new(
        theme: Option<String>,
        locale: Option<String>,
        notifications: Option<bool>,
        settings: Option<JsonValue>,
    ) -> Result<Self, ValidationError> {
        let theme = match theme {
            Some(value) => Theme::parse(&value)?,
            None => Theme::System,
        };

        let locale = match locale {
            Some(tag) => {
                if tag.is_empty() {
                    return Err(ValidationError::Empty { field: "locale" });
                }
                if tag.len() > MAX_LOCALE_LEN {
                    return Err(ValidationError::TooLong {
                        field: "locale",
                        max: MAX_LOCALE_LEN,
                    });
                }
                if !LOCALE_RE.is_match(&tag) {
                    return Err(ValidationError::InvalidFormat {
                        field: "locale",
                        reason: "expected a tag like 'en' or 'en-US'",
                    });
                }
                Some(tag)
            }
            None => None,
        };

        let settings = settings.unwrap_or_else(|| JsonValue::Object(Default::default()));
        if !settings.is_object() {
            return Err(ValidationError::InvalidFormat {
                field: "settings",
                reason: "must be a JSON object",
            });
        }
        let serialized_len = settings.to_string().len();
        if serialized_len > MAX_SETTINGS_BYTES {
            return Err(ValidationError::TooLong {
                field: "settings",
                max: MAX_SETTINGS_BYTES,
            });
        }

        Ok(Self {
            theme,
            locale,
            notifications: notifications.unwrap_or(true),
            settings,
        })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn locale(&self) -> Option<&str> {
        self.locale.as_deref()
    }

    pub fn notifications(&self) -> bool {
        self.notifications
    }

    pub fn settings(&self) -> &JsonValue {
        &self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_when_fields_absent() {
        let update = PreferencesUpdate::new(None, None, None, None).unwrap();
        assert_eq!(update.theme(), Theme::System);
        assert!(update.locale().is_none());
        assert!(update.notifications());
        assert_eq!(update.settings(), &json!({}));
    }

    #[test]
    fn known_theme_variants_accepted() {
        for (name, expected) in [
            ("light", Theme::Light),
            ("dark", Theme::Dark),
            ("system", Theme::System),
        ] {
            let update =
                PreferencesUpdate::new(Some(name.to_string()), None, None, None).unwrap();
            assert_eq!(update.theme(), expected);
        }
    }

    #[test]
    fn unknown_theme_rejected() {
        let err = PreferencesUpdate::new(Some("sepia".to_string()), None, None, None).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidVariant { field: "theme", .. }));
    }

    #[test]
    fn locale_formats() {
        assert!(PreferencesUpdate::new(None, Some("en".into()), None, None).is_ok());
        assert!(PreferencesUpdate::new(None, Some("en-US".into()), None, None).is_ok());
        assert!(PreferencesUpdate::new(None, Some("sr-RS".into()), None, None).is_ok());

        let err = PreferencesUpdate::new(None, Some("English".into()), None, None).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "locale", .. }));

        let err = PreferencesUpdate::new(None, Some("".into()), None, None).unwrap_err();
        assert!(matches!(err, ValidationError::Empty { field: "locale" }));
    }

    #[test]
    fn settings_must_be_object() {
        let err = PreferencesUpdate::new(None, None, None, Some(json!([1, 2, 3]))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "settings", .. }));

        let err = PreferencesUpdate::new(None, None, None, Some(json!("text"))).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFormat { field: "settings", .. }));
    }

    #[test]
    fn oversized_settings_rejected() {
        let big = "x".repeat(MAX_SETTINGS_BYTES);
        let err = PreferencesUpdate::new(None, None, None, Some(json!({ "blob": big }))).unwrap_err();
        assert!(matches!(err, ValidationError::TooLong { field: "settings", .. }));
    }

    #[test]
    fn notifications_passthrough() {
        let update = PreferencesUpdate::new(None, None, Some(false), None).unwrap();
        assert!(!update.notifications());
    }
}
