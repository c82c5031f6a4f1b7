//! Parsing and validation of `tessel.toml` project configuration files.
//!
//! This crate reads the project configuration file and produces a
//! strongly-typed [`ProjectConfig`], plus the resolved on-disk locations of
//! the bus library, module library and RTL output directories.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE_NAME};
pub use resolve::{resolve_paths, ResolvedPaths};
pub use types::*;
