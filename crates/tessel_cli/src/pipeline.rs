//! Shared pipeline helpers for CLI commands.
//!
//! Project root discovery, configuration loading, library loading and
//! diagnostic rendering used by `generate`, `bus` and `module`.

use std::path::{Path, PathBuf};

use tessel_common::NamePattern;
use tessel_config::{ProjectConfig, ResolvedPaths, CONFIG_FILE_NAME};
use tessel_diagnostics::{Diagnostic, DiagnosticRenderer, TerminalRenderer};
use tessel_library::{Catalog, LibraryEntry};

use crate::GlobalArgs;

/// A loaded project: its configuration and resolved directories.
pub struct Project {
    /// Parsed `tessel.toml`.
    pub config: ProjectConfig,
    /// Library and output directories.
    pub paths: ResolvedPaths,
}

/// Walks up from `start` looking for the nearest directory containing `tessel.toml`.
pub fn find_project_root(start: &Path) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(CONFIG_FILE_NAME).exists() {
            return Ok(current);
        }
        if !current.pop() {
            return Err(format!(
                "could not find {CONFIG_FILE_NAME} in {} or any parent directory",
                start.display()
            )
            .into());
        }
    }
}

/// Resolves the project root directory from global CLI args.
///
/// If `--config` is specified, uses that path (file → parent dir, dir → itself).
/// Otherwise walks up from the current directory looking for `tessel.toml`.
pub fn resolve_project_root(global: &GlobalArgs) -> Result<PathBuf, Box<dyn std::error::Error>> {
    if let Some(ref config_path) = global.config {
        let p = PathBuf::from(config_path);
        if p.is_file() {
            Ok(p.parent()
                .map(|p| p.to_path_buf())
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| PathBuf::from(".")))
        } else {
            Ok(p)
        }
    } else {
        find_project_root(&std::env::current_dir()?)
    }
}

/// Loads the project selected by the global arguments.
///
/// A `--config` pointing at a file is read as is, whatever its name.
pub fn load_project(global: &GlobalArgs) -> Result<Project, Box<dyn std::error::Error>> {
    let root = resolve_project_root(global)?;
    let config = match global.config.as_deref().map(Path::new) {
        Some(file) if file.is_file() => {
            tessel_config::load_config_from_str(&std::fs::read_to_string(file)?)?
        }
        _ => tessel_config::load_config(&root)?,
    };
    let paths = tessel_config::resolve_paths(&config, &root);
    log::debug!(
        "project `{}` at {}: bus {}, module {}, output {}",
        config.project.name,
        root.display(),
        paths.bus_dir.display(),
        paths.module_dir.display(),
        paths.output_dir.display()
    );
    Ok(Project { config, paths })
}

/// Loads every library of one kind from `dir`.
pub fn load_catalog<T: LibraryEntry>(dir: &Path) -> Result<Catalog<T>, Box<dyn std::error::Error>> {
    let mut catalog = Catalog::new();
    catalog.load_dir(dir, &NamePattern::any())?;
    Ok(catalog)
}

/// Builds a name pattern from an optional command-line argument.
pub fn name_pattern(pattern: Option<&str>) -> Result<NamePattern, Box<dyn std::error::Error>> {
    match pattern {
        Some(p) => Ok(NamePattern::new(p)?),
        None => Ok(NamePattern::any()),
    }
}

/// Returns the module name generated for a netlist file.
///
/// This is the file name up to its first `.`, so `soc.net.yaml` yields `soc`.
pub fn output_name(path: &Path) -> Option<String> {
    let file_name = path.file_name()?.to_str()?;
    let base = file_name.split('.').next()?;
    if base.is_empty() {
        None
    } else {
        Some(base.to_string())
    }
}

/// Renders diagnostics to stderr using the terminal renderer.
///
/// Returns the number of diagnostics rendered.
pub fn render_diagnostics(diagnostics: &[Diagnostic], color: bool) -> usize {
    let renderer = TerminalRenderer::new(color);
    for diag in diagnostics {
        eprintln!("{}", renderer.render(diag));
    }
    diagnostics.len()
}
