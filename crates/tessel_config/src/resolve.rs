//! Resolution of configured directories against the project root.

use crate::types::ProjectConfig;
use std::path::{Path, PathBuf};

/// Library and output directories with the project root applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// The project root all relative paths were joined to.
    pub root: PathBuf,
    /// Directory scanned for `*.soc_bus` files.
    pub bus_dir: PathBuf,
    /// Directory scanned for `*.soc_mod` files.
    pub module_dir: PathBuf,
    /// Directory generated RTL is written to.
    pub output_dir: PathBuf,
}

/// Joins the configured directories to `root`.
///
/// Absolute entries in `[paths]` are kept as written.
pub fn resolve_paths(config: &ProjectConfig, root: &Path) -> ResolvedPaths {
    ResolvedPaths {
        root: root.to_path_buf(),
        bus_dir: root.join(&config.paths.bus),
        module_dir: root.join(&config.paths.module),
        output_dir: root.join(&config.paths.output),
    }
}
