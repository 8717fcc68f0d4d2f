//! Route handlers organized by resource

pub mod health;
pub mod preferences;
pub mod users;
