//! Netlist document loading.
//!
//! Only the top-level shape is enforced here: the `instance` section must be
//! present and a map, and `net`/`bus` must be maps when present. Everything
//! below that is recorded as [`Record::Malformed`] when it does not fit.

use crate::document::{
    BusGroup, BusMember, Endpoint, Instance, Net, Parameters, RawNetlist, Record,
};
use crate::error::NetlistError;
use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};
use std::path::Path;

/// Reads and parses the netlist file at `path`.
pub fn load_netlist(path: &Path) -> Result<RawNetlist, NetlistError> {
    let content = std::fs::read_to_string(path).map_err(|source| NetlistError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let netlist = load_netlist_from_str(&content)?;
    log::debug!(
        "loaded netlist {}: {} instances, {} nets, {} bus groups",
        path.display(),
        netlist.instances.len(),
        netlist.nets.len(),
        netlist.bus_groups.len()
    );
    Ok(netlist)
}

/// Parses a netlist document from YAML text.
pub fn load_netlist_from_str(content: &str) -> Result<RawNetlist, NetlistError> {
    let root: Value =
        serde_yaml::from_str(content).map_err(|e| NetlistError::Parse(e.to_string()))?;
    let root = match root {
        Value::Mapping(map) => map,
        Value::Null => return Err(NetlistError::MissingSection("instance")),
        other => {
            return Err(NetlistError::Parse(format!(
                "document root must be a map, found {}",
                kind(&other)
            )))
        }
    };

    let instances = match section(&root, "instance")? {
        Some(map) => read_instances(map),
        None => return Err(NetlistError::MissingSection("instance")),
    };
    let nets = section(&root, "net")?.map(read_nets).unwrap_or_default();
    let bus_groups = section(&root, "bus")?
        .map(read_bus_groups)
        .unwrap_or_default();

    Ok(RawNetlist {
        instances,
        nets,
        bus_groups,
    })
}

/// Returns the named top-level section, treating an explicit null as absent.
fn section<'a>(
    root: &'a Mapping,
    name: &'static str,
) -> Result<Option<&'a Mapping>, NetlistError> {
    match root.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Mapping(map)) => Ok(Some(map)),
        Some(other) => Err(NetlistError::InvalidSection {
            section: name,
            found: kind(other),
        }),
    }
}

fn read_instances(map: &Mapping) -> IndexMap<String, Record<Instance>> {
    map.iter()
        .map(|(key, body)| {
            let Some(name) = key.as_str() else {
                return (
                    render_key(key),
                    Record::Malformed("instance name is not a string".to_string()),
                );
            };
            (name.to_string(), read_instance(body))
        })
        .collect()
}

fn read_instance(body: &Value) -> Record<Instance> {
    let Value::Mapping(body) = body else {
        return Record::Malformed(format!("instance body is a {}, not a map", kind(body)));
    };
    let module = match body.get("module") {
        Some(Value::String(module)) if !module.is_empty() => module.clone(),
        Some(Value::String(_)) => return Record::Malformed("`module` is empty".to_string()),
        Some(other) => {
            return Record::Malformed(format!("`module` is a {}, not a string", kind(other)))
        }
        None => return Record::Malformed("missing `module` field".to_string()),
    };
    let parameters = match body.get("parameter") {
        None | Some(Value::Null) => Parameters::Absent,
        Some(Value::Mapping(params)) => read_parameters(params),
        Some(other) => {
            Parameters::Malformed(format!("`parameter` is a {}, not a map", kind(other)))
        }
    };
    Record::Valid(Instance { module, parameters })
}

fn read_parameters(params: &Mapping) -> Parameters {
    let mut overrides = IndexMap::new();
    for (key, value) in params {
        let Some(name) = key.as_str() else {
            return Parameters::Malformed(format!(
                "parameter name `{}` is not a string",
                render_key(key)
            ));
        };
        let Some(literal) = scalar_literal(value) else {
            return Parameters::Malformed(format!(
                "parameter `{name}` is a {}, not a scalar",
                kind(value)
            ));
        };
        overrides.insert(name.to_string(), literal);
    }
    Parameters::Overrides(overrides)
}

fn read_nets(map: &Mapping) -> IndexMap<String, Record<Net>> {
    map.iter()
        .map(|(key, value)| {
            let Some(name) = key.as_str() else {
                return (
                    render_key(key),
                    Record::Malformed("net name is not a string".to_string()),
                );
            };
            let record = match value {
                Value::Sequence(items) => Record::Valid(Net {
                    endpoints: items.iter().map(read_endpoint).collect(),
                }),
                other => Record::Malformed(format!("net is a {}, not a sequence", kind(other))),
            };
            (name.to_string(), record)
        })
        .collect()
}

fn read_endpoint(item: &Value) -> Record<Endpoint> {
    let Value::Mapping(fields) = item else {
        return Record::Malformed(format!("endpoint is a {}, not a map", kind(item)));
    };
    match (string_field(fields, "instance"), string_field(fields, "port")) {
        (Some(instance), Some(port)) => Record::Valid(Endpoint::new(instance, port)),
        (None, _) => Record::Malformed("endpoint has no `instance` string".to_string()),
        (_, None) => Record::Malformed("endpoint has no `port` string".to_string()),
    }
}

fn read_bus_groups(map: &Mapping) -> IndexMap<String, Record<BusGroup>> {
    map.iter()
        .map(|(key, value)| {
            let Some(name) = key.as_str() else {
                return (
                    render_key(key),
                    Record::Malformed("bus group name is not a string".to_string()),
                );
            };
            (name.to_string(), read_bus_group(value))
        })
        .collect()
}

/// Reads one bus group.
///
/// The documented form maps instance names to `{port}`. A sequence of
/// `{instance, port}` maps is accepted as well.
fn read_bus_group(value: &Value) -> Record<BusGroup> {
    let members = match value {
        Value::Mapping(entries) => entries
            .iter()
            .map(|(instance, body)| {
                let Some(instance) = instance.as_str() else {
                    return Record::Malformed(format!(
                        "member `{}` is not named by a string",
                        render_key(instance)
                    ));
                };
                match body {
                    Value::Mapping(fields) => match string_field(fields, "port") {
                        Some(port) => Record::Valid(BusMember {
                            instance: instance.to_string(),
                            port: port.to_string(),
                        }),
                        None => {
                            Record::Malformed(format!("member `{instance}` has no `port` string"))
                        }
                    },
                    other => Record::Malformed(format!(
                        "member `{instance}` is a {}, not a map",
                        kind(other)
                    )),
                }
            })
            .collect(),
        Value::Sequence(items) => items
            .iter()
            .map(|item| match read_endpoint(item) {
                Record::Valid(ep) => Record::Valid(BusMember {
                    instance: ep.instance,
                    port: ep.port,
                }),
                Record::Malformed(reason) => {
                    Record::Malformed(reason.replace("endpoint", "member"))
                }
            })
            .collect(),
        other => {
            return Record::Malformed(format!("bus group is a {}, not a map", kind(other)));
        }
    };
    Record::Valid(BusGroup { members })
}

fn string_field<'a>(fields: &'a Mapping, name: &str) -> Option<&'a str> {
    fields.get(name).and_then(Value::as_str)
}

/// Renders a scalar as the literal text written in the document.
fn scalar_literal(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

fn render_key(key: &Value) -> String {
    scalar_literal(key).unwrap_or_else(|| format!("<{}>", kind(key)))
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "map",
        Value::Tagged(_) => "tagged value",
    }
}
