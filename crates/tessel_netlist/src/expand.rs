//! Bus expansion: rewriting bus groups into signal-level nets.
//!
//! Each group is expanded on its own, in document order, in two passes.
//! Pass 1 validates the members and collects the connections that resolve
//! to a bus-tagged port of a known bus type; the first valid member fixes
//! the group's bus type. Pass 2 walks the signals of that bus type in
//! definition order and creates one net `<group>_<signal>` per signal that
//! at least one connection maps to a port.

use crate::codes;
use crate::document::{BusGroup, Endpoint, ExpandedNetlist, Instance, Net, RawNetlist, Record};
use crate::error::NetlistError;
use crate::port::{port_candidates, resolve_bus_port};
use indexmap::IndexMap;
use tessel_diagnostics::DiagnosticSink;
use tessel_library::{BusBinding, BusLibrary, ModuleLibrary};

/// Settings that affect bus expansion.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExpandOptions {
    /// Prefix used by the pad-style port name lookup. Empty disables it.
    pub pad_prefix: String,
}

impl Default for ExpandOptions {
    fn default() -> Self {
        Self {
            pad_prefix: "pad_".to_string(),
        }
    }
}

/// A bus group member that passed every Pass 1 check.
struct Connection<'a> {
    instance: &'a str,
    binding: BusBinding<'a>,
}

/// Expands every bus group of `raw` into nets.
///
/// Nets already in the document keep their position; an expanded net with
/// the same name as a well-formed existing net appends its endpoints to it.
/// New nets follow in creation order. Problems with individual groups,
/// members and signals are reported to `sink` and never stop expansion.
///
/// Fails only when the document has no instances.
pub fn expand(
    raw: RawNetlist,
    buses: &dyn BusLibrary,
    modules: &dyn ModuleLibrary,
    options: &ExpandOptions,
    sink: &DiagnosticSink,
) -> Result<ExpandedNetlist, NetlistError> {
    if raw.instances.is_empty() {
        return Err(NetlistError::Precondition(
            "netlist has no instances to expand".to_string(),
        ));
    }

    let RawNetlist {
        instances,
        mut nets,
        bus_groups,
    } = raw;

    for (group_name, record) in &bus_groups {
        let group = match record {
            Record::Valid(group) => group,
            Record::Malformed(reason) => {
                sink.emit(codes::warn_malformed_group(group_name, reason));
                continue;
            }
        };
        let expander = GroupExpander {
            name: group_name,
            instances: &instances,
            buses,
            modules,
            options,
            sink,
        };
        for (net_name, endpoints) in expander.expand(group) {
            merge_net(&mut nets, net_name, endpoints, sink);
        }
    }

    log::debug!(
        "expanded {} bus groups into {} nets",
        bus_groups.len(),
        nets.len()
    );
    Ok(ExpandedNetlist { instances, nets })
}

fn merge_net(
    nets: &mut IndexMap<String, Record<Net>>,
    name: String,
    endpoints: Vec<Endpoint>,
    sink: &DiagnosticSink,
) {
    match nets.get_mut(&name) {
        Some(Record::Valid(existing)) => {
            log::debug!("merging {} endpoints into existing net `{name}`", endpoints.len());
            existing
                .endpoints
                .extend(endpoints.into_iter().map(Record::Valid));
        }
        Some(slot) => {
            if let Record::Malformed(reason) = &*slot {
                sink.emit(codes::warn_replaced_net(&name, reason));
            }
            *slot = Record::Valid(Net::from_endpoints(endpoints));
        }
        None => {
            nets.insert(name, Record::Valid(Net::from_endpoints(endpoints)));
        }
    }
}

struct GroupExpander<'a> {
    name: &'a str,
    instances: &'a IndexMap<String, Record<Instance>>,
    buses: &'a dyn BusLibrary,
    modules: &'a dyn ModuleLibrary,
    options: &'a ExpandOptions,
    sink: &'a DiagnosticSink,
}

impl<'a> GroupExpander<'a> {
    fn expand(&self, group: &'a BusGroup) -> Vec<(String, Vec<Endpoint>)> {
        let Some((bus_type, connections)) = self.collect(group) else {
            self.sink.emit(codes::warn_empty_group(self.name));
            return Vec::new();
        };
        self.synthesize(bus_type, &connections)
    }

    /// Pass 1: validate members and fix the group's bus type.
    fn collect(&self, group: &'a BusGroup) -> Option<(&'a str, Vec<Connection<'a>>)> {
        let mut bus_type: Option<&'a str> = None;
        let mut connections = Vec::new();

        for record in &group.members {
            let member = match record {
                Record::Valid(member) => member,
                Record::Malformed(reason) => {
                    self.sink.emit(codes::warn_malformed_group(self.name, reason));
                    continue;
                }
            };

            let instance = match self.instances.get(&member.instance) {
                Some(Record::Valid(instance)) => instance,
                Some(Record::Malformed(reason)) => {
                    self.sink.emit(codes::warn_unknown_instance(
                        self.name,
                        &member.instance,
                        Some(reason),
                    ));
                    continue;
                }
                None => {
                    self.sink
                        .emit(codes::warn_unknown_instance(self.name, &member.instance, None));
                    continue;
                }
            };

            let Some(module) = self.modules.module(&instance.module) else {
                self.sink.emit(codes::warn_unknown_module(
                    self.name,
                    &member.instance,
                    &instance.module,
                ));
                continue;
            };

            let Some(resolved) = resolve_bus_port(module, &member.port, &self.options.pad_prefix)
            else {
                self.sink.emit(codes::warn_unresolved_port(
                    self.name,
                    &member.instance,
                    &instance.module,
                    &member.port,
                    &port_candidates(&member.port, &self.options.pad_prefix),
                ));
                continue;
            };

            let member_type = resolved.binding.bus_type;
            if !self.buses.contains_bus(member_type) {
                self.sink.emit(codes::warn_unknown_bus_type(
                    self.name,
                    &member.instance,
                    member_type,
                ));
                continue;
            }

            match bus_type {
                None => bus_type = Some(member_type),
                Some(expected) if expected != member_type => {
                    self.sink.emit(codes::warn_inconsistent_bus_type(
                        self.name,
                        &member.instance,
                        member_type,
                        expected,
                    ));
                    continue;
                }
                Some(_) => {}
            }

            log::debug!(
                "bus group `{}`: `{}` port `{}` resolved as `{}` ({})",
                self.name,
                member.instance,
                member.port,
                resolved.name,
                member_type
            );
            connections.push(Connection {
                instance: &member.instance,
                binding: resolved.binding,
            });
        }

        bus_type.map(|t| (t, connections))
    }

    /// Pass 2: one net per mapped signal, in bus definition order.
    fn synthesize(
        &self,
        bus_type: &str,
        connections: &[Connection<'a>],
    ) -> Vec<(String, Vec<Endpoint>)> {
        let Some(definition) = self.buses.bus(bus_type) else {
            return Vec::new();
        };
        let mut nets = Vec::new();
        for signal in definition.signal_names() {
            let net_name = format!("{}_{signal}", self.name);
            let endpoints: Vec<Endpoint> = connections
                .iter()
                .filter_map(|c| {
                    c.binding
                        .mapped_port(signal)
                        .map(|port| Endpoint::new(c.instance, port))
                })
                .collect();
            if endpoints.is_empty() {
                log::debug!("net `{net_name}` has no endpoints and is dropped");
                continue;
            }
            nets.push((net_name, endpoints));
        }
        nets
    }
}
