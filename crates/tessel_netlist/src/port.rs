//! Bus port name resolution with the pad-prefix convention.

use tessel_library::{BusBinding, ModuleInterface};

/// Returns the names to try, in order, when resolving `name` on a module.
///
/// The literal name comes first. If it starts with `prefix`, the name with
/// the prefix removed follows; then the name with the prefix prepended.
/// Duplicates are dropped and an empty prefix yields only the literal.
pub fn port_candidates(name: &str, prefix: &str) -> Vec<String> {
    let mut candidates = vec![name.to_string()];
    if prefix.is_empty() {
        return candidates;
    }
    if let Some(stripped) = name.strip_prefix(prefix) {
        if !stripped.is_empty() {
            candidates.push(stripped.to_string());
        }
    }
    let prefixed = format!("{prefix}{name}");
    if !candidates.contains(&prefixed) {
        candidates.push(prefixed);
    }
    candidates
}

/// A bus-tagged port found on a module.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResolvedBusPort<'a> {
    /// The candidate name that matched.
    pub name: &'a str,
    /// Bus type and signal mapping of the matched port.
    pub binding: BusBinding<'a>,
}

/// Resolves `name` to a bus-tagged port of `module`.
///
/// The first candidate from [`port_candidates`] that names a bus-tagged port
/// or bus interface wins. Untagged ports of a matching name are passed over.
pub fn resolve_bus_port<'a>(
    module: &'a ModuleInterface,
    name: &str,
    prefix: &str,
) -> Option<ResolvedBusPort<'a>> {
    port_candidates(name, prefix).into_iter().find_map(|candidate| {
        let binding = module.bus_binding(&candidate)?;
        let name = module
            .bus
            .keys()
            .chain(module.port.keys())
            .map(String::as_str)
            .find(|key| *key == candidate)?;
        Some(ResolvedBusPort { name, binding })
    })
}
