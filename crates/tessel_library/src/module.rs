//! Module interface definitions.

use crate::bus::Direction;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tessel_common::null_as_empty;

/// One port of a module.
///
/// Ports that take part in a bus carry the bus type in `bus` and a table from
/// bus signal name to the module port implementing it in `mapping`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModulePort {
    /// Declared HDL type, e.g. `logic [31:0]`.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub port_type: Option<String>,
    /// Port direction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Bus type tag for bus-participating ports.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bus: Option<String>,
    /// Bus signal name to module port name.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub mapping: IndexMap<String, Option<String>>,
}

impl ModulePort {
    /// Returns the declared type, treating blank strings as undeclared.
    pub fn declared_type(&self) -> Option<&str> {
        self.port_type
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
    }
}

/// One parameter of a module.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleParameter {
    /// Declared HDL type.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub param_type: Option<String>,
    /// Default value as written in the library.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_yaml::Value>,
}

/// A named bus interface declared in a module's `bus` section.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusInterface {
    /// The bus type implemented by this interface.
    pub bus: String,
    /// Bus signal name to module port name.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub mapping: IndexMap<String, Option<String>>,
}

/// The port and parameter contract of a reusable module.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleInterface {
    /// Ports keyed by name, in declaration order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub port: IndexMap<String, ModulePort>,
    /// Parameters keyed by name, in declaration order.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub parameter: IndexMap<String, ModuleParameter>,
    /// Bus interfaces keyed by interface name.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub bus: IndexMap<String, BusInterface>,
}

/// The bus type and signal mapping behind one bus-tagged name of a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BusBinding<'a> {
    /// The bus type name.
    pub bus_type: &'a str,
    /// Bus signal name to module port name.
    pub mapping: &'a IndexMap<String, Option<String>>,
}

impl<'a> BusBinding<'a> {
    /// Returns the module port implementing `signal`.
    ///
    /// Missing, null and empty mappings all yield `None`.
    pub fn mapped_port(&self, signal: &str) -> Option<&'a str> {
        self.mapping
            .get(signal)
            .and_then(|p| p.as_deref())
            .filter(|p| !p.is_empty())
    }
}

impl ModuleInterface {
    /// Returns the port named `name`.
    pub fn port(&self, name: &str) -> Option<&ModulePort> {
        self.port.get(name)
    }

    /// Returns the bus binding for `name`, if it names a bus-tagged item.
    ///
    /// An entry in the `bus` section takes precedence over a port entry with
    /// a `bus` tag of the same name.
    pub fn bus_binding(&self, name: &str) -> Option<BusBinding<'_>> {
        if let Some(iface) = self.bus.get(name) {
            return Some(BusBinding {
                bus_type: &iface.bus,
                mapping: &iface.mapping,
            });
        }
        let port = self.port.get(name)?;
        let bus_type = port.bus.as_deref().filter(|b| !b.is_empty())?;
        Some(BusBinding {
            bus_type,
            mapping: &port.mapping,
        })
    }
}

/// Read-only lookup of module interfaces by exact name.
pub trait ModuleLibrary {
    /// Returns the interface of module `name`.
    fn module(&self, name: &str) -> Option<&ModuleInterface>;

    /// Returns `true` if module `name` is known.
    fn contains_module(&self, name: &str) -> bool {
        self.module(name).is_some()
    }
}

impl ModuleLibrary for IndexMap<String, ModuleInterface> {
    fn module(&self, name: &str) -> Option<&ModuleInterface> {
        self.get(name)
    }
}
