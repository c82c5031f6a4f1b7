//! `tessel bus` and `tessel module`: library browsing and editing.

use std::io::Write;
use std::path::Path;

use indexmap::IndexMap;
use tessel_library::{BusDefinition, Catalog, LibraryEntry, ModuleInterface};

use crate::pipeline::{load_catalog, load_project, name_pattern};
use crate::{GlobalArgs, LibraryCommand};

/// Runs a `tessel bus` subcommand.
pub fn run_bus(
    cmd: &LibraryCommand,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;
    run_command::<BusDefinition>(cmd, &project.paths.bus_dir, &mut std::io::stdout())
}

/// Runs a `tessel module` subcommand.
pub fn run_module(
    cmd: &LibraryCommand,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;
    run_command::<ModuleInterface>(cmd, &project.paths.module_dir, &mut std::io::stdout())
}

fn run_command<T: LibraryEntry>(
    cmd: &LibraryCommand,
    dir: &Path,
    out: &mut dyn Write,
) -> Result<i32, Box<dyn std::error::Error>> {
    let mut catalog: Catalog<T> = load_catalog(dir)?;
    match cmd {
        LibraryCommand::List { pattern } => {
            let pattern = name_pattern(pattern.as_deref())?;
            for name in catalog.list(&pattern) {
                let library = catalog.library_of(name).unwrap_or_default();
                writeln!(out, "{name:<24} {library}")?;
            }
            Ok(0)
        }
        LibraryCommand::Show { name } => {
            let entry = catalog
                .get(name)
                .ok_or_else(|| format!("{} '{name}' not found in {}", T::KIND, dir.display()))?;
            let mut single = IndexMap::new();
            single.insert(name.as_str(), entry);
            write!(out, "{}", serde_yaml::to_string(&single)?)?;
            Ok(0)
        }
        LibraryCommand::Remove { pattern } => {
            let pattern = name_pattern(Some(pattern.as_str()))?;
            let removed: Vec<String> =
                catalog.list(&pattern).into_iter().map(str::to_string).collect();
            if removed.is_empty() {
                let shown = pattern.as_str();
                return Err(format!("no {} matches '{shown}' in {}", T::KIND, dir.display()).into());
            }
            for name in &removed {
                writeln!(out, "removed {} {name}", T::KIND)?;
            }
            for library in catalog.remove(&pattern) {
                let path = catalog.save_library(dir, &library)?;
                writeln!(out, "saved {}", path.display())?;
            }
            Ok(0)
        }
    }
}
