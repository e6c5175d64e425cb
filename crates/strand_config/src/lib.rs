//! Parsing and validation of `strand.toml` report configuration.
//!
//! The configuration selects which cells the report covers, which properties
//! it hides, whether pin mappings and route traces are printed, and how trace
//! branches are indented.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod types;

pub use error::ConfigError;
pub use loader::{find_config, load_config, load_config_from_str, resolve_config, CONFIG_FILE_NAME};
pub use types::*;
