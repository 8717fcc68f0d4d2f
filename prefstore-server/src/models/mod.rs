//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod preferences;
pub mod validation;

pub use preferences::{PreferencesUpdate, Theme};
pub use validation::ValidationError;
