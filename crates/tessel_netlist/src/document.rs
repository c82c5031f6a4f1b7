//! In-memory netlist documents.
//!
//! Records that fail their shape checks are kept as [`Record::Malformed`]
//! rather than rejected at load time, so that the stage which needs the
//! record can warn about it and carry on.

use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};

/// A document record that either passed its shape checks or did not.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Record<T> {
    /// A well-formed record.
    Valid(T),
    /// A record that failed shape checks, with the reason.
    Malformed(String),
}

impl<T> Record<T> {
    /// Returns the record if it is well-formed.
    pub fn valid(&self) -> Option<&T> {
        match self {
            Record::Valid(value) => Some(value),
            Record::Malformed(_) => None,
        }
    }

    /// Returns `true` for a well-formed record.
    pub fn is_valid(&self) -> bool {
        matches!(self, Record::Valid(_))
    }
}

/// Parameter overrides of an instance.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Parameters {
    /// No `parameter` key.
    #[default]
    Absent,
    /// Overrides in document order, values rendered as literals.
    Overrides(IndexMap<String, String>),
    /// A `parameter` key that is not a map of scalars.
    Malformed(String),
}

/// A placement of one module in the design.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Instance {
    /// Name of the instantiated module.
    pub module: String,
    /// Parameter overrides.
    pub parameters: Parameters,
}

impl Instance {
    /// Creates an instance of `module` without overrides.
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
            parameters: Parameters::Absent,
        }
    }
}

/// One `{instance, port}` connection of a net.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Endpoint {
    /// Instance name.
    pub instance: String,
    /// Port name on the instance's module.
    pub port: String,
}

impl Endpoint {
    /// Creates an endpoint.
    pub fn new(instance: impl Into<String>, port: impl Into<String>) -> Self {
        Self {
            instance: instance.into(),
            port: port.into(),
        }
    }
}

/// A signal-level wire.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Net {
    /// Endpoints in document order, then in the order expansion added them.
    pub endpoints: Vec<Record<Endpoint>>,
}

impl Net {
    /// Creates a net from well-formed endpoints.
    pub fn from_endpoints(endpoints: impl IntoIterator<Item = Endpoint>) -> Self {
        Self {
            endpoints: endpoints.into_iter().map(Record::Valid).collect(),
        }
    }
}

/// One `instance: {port}` entry of a bus group.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BusMember {
    /// Instance name.
    pub instance: String,
    /// The bus interface name on the instance, as written.
    pub port: String,
}

/// A named cluster of instance ports sharing one bus.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BusGroup {
    /// Members in document order.
    pub members: Vec<Record<BusMember>>,
}

/// A netlist as loaded, before bus expansion.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RawNetlist {
    /// Instances by name.
    pub instances: IndexMap<String, Record<Instance>>,
    /// Pre-populated nets by name.
    pub nets: IndexMap<String, Record<Net>>,
    /// Bus groups by name.
    pub bus_groups: IndexMap<String, Record<BusGroup>>,
}

/// A netlist whose bus groups have been rewritten into nets.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExpandedNetlist {
    /// Instances by name.
    pub instances: IndexMap<String, Record<Instance>>,
    /// Nets by name: pre-populated ones first, then those created by expansion.
    pub nets: IndexMap<String, Record<Net>>,
}

impl From<ExpandedNetlist> for RawNetlist {
    fn from(netlist: ExpandedNetlist) -> Self {
        RawNetlist {
            instances: netlist.instances,
            nets: netlist.nets,
            bus_groups: IndexMap::new(),
        }
    }
}

impl ExpandedNetlist {
    /// Renders the document as netlist YAML with `instance` and `net` sections.
    ///
    /// Malformed records are left out.
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        let mut instances = Mapping::new();
        for (name, record) in &self.instances {
            let Some(instance) = record.valid() else {
                continue;
            };
            let mut body = Mapping::new();
            body.insert("module".into(), instance.module.clone().into());
            if let Parameters::Overrides(overrides) = &instance.parameters {
                let params: Mapping = overrides
                    .iter()
                    .map(|(k, v)| (Value::from(k.as_str()), Value::from(v.as_str())))
                    .collect();
                body.insert("parameter".into(), Value::Mapping(params));
            }
            instances.insert(name.as_str().into(), Value::Mapping(body));
        }

        let mut nets = Mapping::new();
        for (name, record) in &self.nets {
            let Some(net) = record.valid() else {
                continue;
            };
            let endpoints: Vec<Value> = net
                .endpoints
                .iter()
                .filter_map(Record::valid)
                .map(|ep| {
                    let mut m = Mapping::new();
                    m.insert("instance".into(), ep.instance.as_str().into());
                    m.insert("port".into(), ep.port.as_str().into());
                    Value::Mapping(m)
                })
                .collect();
            nets.insert(name.as_str().into(), Value::Sequence(endpoints));
        }

        let mut root = Mapping::new();
        root.insert("instance".into(), Value::Mapping(instances));
        root.insert("net".into(), Value::Mapping(nets));
        serde_yaml::to_string(&Value::Mapping(root))
    }
}
