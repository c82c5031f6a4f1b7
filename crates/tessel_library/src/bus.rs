//! Bus type definitions.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use tessel_common::null_as_empty;

/// Signal or port direction as seen from the declaring side.
///
/// Directions outside the usual three (`ref`, `buffer`, ...) are kept as
/// written so that a library using them still loads.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Direction {
    /// Driven from outside (`in`, `input`).
    In,
    /// Driven by the declaring side (`out`, `output`).
    Out,
    /// Bidirectional (`inout`).
    InOut,
    /// Any other direction keyword.
    Other(String),
}

impl From<String> for Direction {
    fn from(text: String) -> Self {
        match text.as_str() {
            "in" | "input" => Direction::In,
            "out" | "output" => Direction::Out,
            "inout" => Direction::InOut,
            _ => Direction::Other(text),
        }
    }
}

impl From<Direction> for String {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::In => "in".to_string(),
            Direction::Out => "out".to_string(),
            Direction::InOut => "inout".to_string(),
            Direction::Other(text) => text,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::In => write!(f, "input"),
            Direction::Out => write!(f, "output"),
            Direction::InOut => write!(f, "inout"),
            Direction::Other(text) => f.write_str(text),
        }
    }
}

/// Width of a bus signal: a bit count or a parameter expression.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Width {
    /// Fixed number of bits.
    Bits(u32),
    /// Expression such as `ADDR_WIDTH`, kept as written.
    Expr(String),
}

impl fmt::Display for Width {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Width::Bits(bits) => write!(f, "{bits}"),
            Width::Expr(expr) => f.write_str(expr),
        }
    }
}

/// One signal role of a bus type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusSignal {
    /// Direction relative to the bus master.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Direction>,
    /// Bit width, when fixed by the protocol.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Width>,
    /// Free-form qualifier such as `address` or `data`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub qualifier: Option<String>,
}

/// A bus type: an ordered set of named signals.
///
/// Signal order is the order written in the library file and drives the
/// order of nets produced by bus expansion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusDefinition {
    /// Signals keyed by name, in definition order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub port: IndexMap<String, BusSignal>,
}

impl BusDefinition {
    /// Iterates over signal names in definition order.
    pub fn signal_names(&self) -> impl Iterator<Item = &str> + '_ {
        self.port.keys().map(String::as_str)
    }

    /// Returns the signal named `name`.
    pub fn signal(&self, name: &str) -> Option<&BusSignal> {
        self.port.get(name)
    }
}

/// Read-only lookup of bus types by exact name.
pub trait BusLibrary {
    /// Returns the definition of bus type `name`.
    fn bus(&self, name: &str) -> Option<&BusDefinition>;

    /// Returns `true` if bus type `name` is known.
    fn contains_bus(&self, name: &str) -> bool {
        self.bus(name).is_some()
    }
}

impl BusLibrary for IndexMap<String, BusDefinition> {
    fn bus(&self, name: &str) -> Option<&BusDefinition> {
        self.get(name)
    }
}
