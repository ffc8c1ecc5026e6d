//! Settings loading, parsing, and validation.
//!
//! - Schema definitions in [`schema`]
//! - File discovery and loading in [`loader`]
//! - Validation in [`validator`]
//!
//! # Example
//!
//! ```
//! use tuneup::config::load_settings;
//! use tempfile::TempDir;
//! use std::fs;
//!
//! let temp = TempDir::new().unwrap();
//! fs::write(temp.path().join("tuneup.yml"), "install_timeout: 600").unwrap();
//!
//! let settings = load_settings(None, temp.path()).unwrap();
//! assert_eq!(settings.install_timeout, 600);
//! ```

pub mod loader;
pub mod schema;
pub mod validator;

pub use loader::{
    find_settings_file, load_settings, load_settings_file, parse_settings, SETTINGS_FILE,
};
pub use schema::Settings;
pub use validator::{validate, validate_settings, ValidationError};
