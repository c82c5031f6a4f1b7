//! Deserialization helpers for library and netlist sections.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer};

/// Deserializes a name-keyed section, reading an explicit null as empty.
///
/// An empty YAML section (`port:`) arrives as null; combine with
/// `#[serde(default)]` to also accept an absent key.
pub fn null_as_empty<'de, D, V>(deserializer: D) -> Result<IndexMap<String, V>, D::Error>
where
    D: Deserializer<'de>,
    V: Deserialize<'de>,
{
    Ok(Option::<IndexMap<String, V>>::deserialize(deserializer)?.unwrap_or_default())
}
