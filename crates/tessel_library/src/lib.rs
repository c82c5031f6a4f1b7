//! Bus type and module interface libraries.
//!
//! A bus library maps bus type names to their ordered signal lists; a module
//! library maps module names to their port, parameter and bus interface
//! declarations. The netlist engine only sees them through the read-only
//! [`BusLibrary`] and [`ModuleLibrary`] lookup traits. [`Catalog`] is the
//! file-backed implementation of both, loading `*.soc_bus` and `*.soc_mod`
//! YAML files from a directory.

#![warn(missing_docs)]

pub mod bus;
pub mod catalog;
pub mod error;
pub mod module;

pub use bus::{BusDefinition, BusLibrary, BusSignal, Direction, Width};
pub use catalog::{list_libraries, BusCatalog, Catalog, LibraryEntry, ModuleCatalog};
pub use error::LibraryError;
pub use module::{
    BusBinding, BusInterface, ModuleInterface, ModuleLibrary, ModuleParameter, ModulePort,
};
