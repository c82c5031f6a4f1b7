//! File-backed bus and module catalogs.
//!
//! A library is one YAML file named `<library>.<extension>` whose top-level
//! keys are entry names. A [`Catalog`] merges any number of libraries into a
//! single name-indexed collection and remembers which library each entry
//! came from, so a library can be written back on its own.

use crate::bus::{BusDefinition, BusLibrary};
use crate::error::LibraryError;
use crate::module::{ModuleInterface, ModuleLibrary};
use indexmap::{IndexMap, IndexSet};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tessel_common::NamePattern;

/// An entry type that can be stored in a [`Catalog`].
pub trait LibraryEntry: Serialize + DeserializeOwned + Clone {
    /// File extension of library files holding this entry type.
    const EXTENSION: &'static str;
    /// Human-readable kind used in messages.
    const KIND: &'static str;
}

impl LibraryEntry for BusDefinition {
    const EXTENSION: &'static str = "soc_bus";
    const KIND: &'static str = "bus";
}

impl LibraryEntry for ModuleInterface {
    const EXTENSION: &'static str = "soc_mod";
    const KIND: &'static str = "module";
}

/// A catalog of bus definitions.
pub type BusCatalog = Catalog<BusDefinition>;

/// A catalog of module interfaces.
pub type ModuleCatalog = Catalog<ModuleInterface>;

#[derive(Clone, Debug)]
struct CatalogEntry<T> {
    library: String,
    value: T,
}

/// Name-indexed entries merged from one or more library files.
///
/// Entries keep load order. Loading an entry whose name is already present
/// replaces it, so the library loaded last wins.
#[derive(Clone, Debug)]
pub struct Catalog<T> {
    entries: IndexMap<String, CatalogEntry<T>>,
    libraries: IndexSet<String>,
}

impl<T> Default for Catalog<T> {
    fn default() -> Self {
        Self {
            entries: IndexMap::new(),
            libraries: IndexSet::new(),
        }
    }
}

/// Lists the library files in `dir` whose names match `pattern`.
///
/// Returns sorted file stems. A missing directory holds no libraries.
pub fn list_libraries<T: LibraryEntry>(
    dir: &Path,
    pattern: &NamePattern,
) -> Result<Vec<String>, LibraryError> {
    if !dir.is_dir() {
        log::debug!("{} library directory {} does not exist", T::KIND, dir.display());
        return Ok(Vec::new());
    }
    let io_err = |source| LibraryError::Io {
        path: dir.to_path_buf(),
        source,
    };
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(io_err)? {
        let path = entry.map_err(io_err)?.path();
        if !path.is_file() || path.extension().and_then(|e| e.to_str()) != Some(T::EXTENSION) {
            continue;
        }
        if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
            if pattern.is_match(stem) {
                names.push(stem.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

impl<T: LibraryEntry> Catalog<T> {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the catalog holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the entry named `name`.
    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name).map(|e| &e.value)
    }

    /// Returns the library the entry `name` was loaded from.
    pub fn library_of(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(|e| e.library.as_str())
    }

    /// Inserts `value` as entry `name` of `library`, returning any replaced entry.
    pub fn insert(
        &mut self,
        library: impl Into<String>,
        name: impl Into<String>,
        value: T,
    ) -> Option<T> {
        let library = library.into();
        let name = name.into();
        self.libraries.insert(library.clone());
        if let Some(previous) = self.entries.get(&name) {
            if previous.library != library {
                log::debug!(
                    "{} '{}' from library '{}' replaces the one from '{}'",
                    T::KIND,
                    name,
                    library,
                    previous.library
                );
            }
        }
        self.entries
            .insert(name, CatalogEntry { library, value })
            .map(|e| e.value)
    }

    /// Parses library text and inserts its entries under `library`.
    ///
    /// Only text that is not a map of named entries is an error. An entry
    /// that does not fit the schema is skipped with a warning. Returns the
    /// number of entries inserted.
    pub fn load_str(&mut self, library: &str, content: &str) -> Result<usize, LibraryError> {
        let parsed: Option<IndexMap<String, serde_yaml::Value>> = serde_yaml::from_str(content)
            .map_err(|e| LibraryError::Parse {
                library: library.to_string(),
                message: e.to_string(),
            })?;
        self.libraries.insert(library.to_string());
        let mut count = 0;
        for (name, raw) in parsed.unwrap_or_default() {
            match serde_yaml::from_value::<T>(raw) {
                Ok(value) => {
                    self.insert(library, name, value);
                    count += 1;
                }
                Err(e) => {
                    log::warn!("skipping {} '{name}' in library '{library}': {e}", T::KIND);
                }
            }
        }
        Ok(count)
    }

    /// Loads `<dir>/<name>.<extension>`.
    pub fn load_library(&mut self, dir: &Path, name: &str) -> Result<usize, LibraryError> {
        let path = library_path::<T>(dir, name);
        let content = std::fs::read_to_string(&path).map_err(|source| LibraryError::Io {
            path: path.clone(),
            source,
        })?;
        let count = self.load_str(name, &content)?;
        log::debug!("loaded {count} {} entries from {}", T::KIND, path.display());
        Ok(count)
    }

    /// Loads every library in `dir` whose name matches `pattern`.
    ///
    /// Libraries load in sorted name order. Returns the number of libraries
    /// loaded.
    pub fn load_dir(&mut self, dir: &Path, pattern: &NamePattern) -> Result<usize, LibraryError> {
        let names = list_libraries::<T>(dir, pattern)?;
        for name in &names {
            self.load_library(dir, name)?;
        }
        log::info!(
            "loaded {} {} libraries ({} entries) from {}",
            names.len(),
            T::KIND,
            self.len(),
            dir.display()
        );
        Ok(names.len())
    }

    /// Returns the entry names matching `pattern`, in catalog order.
    pub fn list(&self, pattern: &NamePattern) -> Vec<&str> {
        self.entries
            .keys()
            .map(String::as_str)
            .filter(|name| pattern.is_match(name))
            .collect()
    }

    /// Removes every entry whose name matches `pattern`.
    ///
    /// Returns the libraries that lost an entry, in first-affected order.
    /// Those libraries stay known, so they can be saved even when empty.
    pub fn remove(&mut self, pattern: &NamePattern) -> Vec<String> {
        let mut affected: Vec<String> = Vec::new();
        self.entries.retain(|name, entry| {
            if !pattern.is_match(name) {
                return true;
            }
            log::debug!("removing {} '{name}' from library '{}'", T::KIND, entry.library);
            if !affected.contains(&entry.library) {
                affected.push(entry.library.clone());
            }
            false
        });
        affected
    }

    /// Writes every entry of library `name` to `<dir>/<name>.<extension>`.
    ///
    /// The file is replaced, not merged. A library whose entries were all
    /// removed is written as an empty map. Returns the path written.
    pub fn save_library(&self, dir: &Path, name: &str) -> Result<PathBuf, LibraryError> {
        if !self.libraries.contains(name) {
            return Err(LibraryError::UnknownLibrary {
                kind: T::KIND,
                name: name.to_string(),
            });
        }
        let selected: IndexMap<&str, &T> = self
            .entries
            .iter()
            .filter(|(_, e)| e.library == name)
            .map(|(k, e)| (k.as_str(), &e.value))
            .collect();
        let text = serde_yaml::to_string(&selected).map_err(|e| LibraryError::Serialize {
            library: name.to_string(),
            message: e.to_string(),
        })?;
        let path = library_path::<T>(dir, name);
        std::fs::write(&path, text).map_err(|source| LibraryError::Io {
            path: path.clone(),
            source,
        })?;
        log::info!("saved {} {} entries to {}", selected.len(), T::KIND, path.display());
        Ok(path)
    }
}

fn library_path<T: LibraryEntry>(dir: &Path, name: &str) -> PathBuf {
    dir.join(format!("{name}.{}", T::EXTENSION))
}

impl BusLibrary for Catalog<BusDefinition> {
    fn bus(&self, name: &str) -> Option<&BusDefinition> {
        self.get(name)
    }
}

impl ModuleLibrary for Catalog<ModuleInterface> {
    fn module(&self, name: &str) -> Option<&ModuleInterface> {
        self.get(name)
    }
}
