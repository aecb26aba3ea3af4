//! # Album Common Library
//!
//! Shared code for the photo album services:
//! - Error types
//! - Configuration loading (TOML file, CLI/env overrides, defaults)
//! - Date override store (`photo_dates.json`)
//! - Date parsing and display formatting

pub mod config;
pub mod error;
pub mod store;
pub mod time;

pub use config::{ConfigOverrides, FileTimePreference, ServerConfig};
pub use error::{Error, Result};
pub use store::{DateOverrides, DateStore};
