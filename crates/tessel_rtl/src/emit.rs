//! Verilog module emission.

use crate::codes;
use crate::error::RtlError;
use crate::output::RtlText;
use tessel_diagnostics::DiagnosticSink;
use tessel_library::ModuleLibrary;
use tessel_netlist::{ExpandedNetlist, Instance, Net, Parameters, Record};

/// Comment block at the top of every generated file.
pub const HEADER: &str = "// Generated by Tessel - Generated RTL Verilog file\n\
                          // Auto-generated file, do not edit manually\n";

const PLACEHOLDER: &str = "        // Port connections would go here\n";

/// Settings that affect RTL emission.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// Bind instance ports to nets instead of emitting a placeholder comment.
    ///
    /// When set, wires are declared ahead of the instances that use them.
    pub bind_ports: bool,
}

/// A net that resolved to a wire declaration.
struct Wire<'a> {
    name: &'a str,
    ty: Option<&'a str>,
    net: &'a Net,
}

/// Renders `netlist` as a Verilog module named `output_name`.
///
/// Instances and nets appear in document order. A net is declared as a wire
/// typed after the port of its first endpoint; nets whose first endpoint
/// cannot be resolved are left out with a warning, as are malformed
/// instances.
pub fn generate(
    netlist: &ExpandedNetlist,
    modules: &dyn ModuleLibrary,
    output_name: &str,
    options: &EmitOptions,
    sink: &DiagnosticSink,
) -> Result<RtlText, RtlError> {
    if netlist.instances.is_empty() {
        return Err(RtlError::Precondition(
            "netlist has no instances to emit".to_string(),
        ));
    }
    if output_name.trim().is_empty() {
        return Err(RtlError::Precondition("output name is empty".to_string()));
    }

    let wires = declare_wires(netlist, modules, sink);

    let mut out = String::from(HEADER);
    out.push('\n');
    out.push_str(&format!("module {output_name} (\n);\n\n"));

    if options.bind_ports {
        write_wires(&mut out, &wires);
        if !wires.is_empty() {
            out.push('\n');
        }
        write_instances(&mut out, netlist, Some(&wires), sink);
    } else {
        write_instances(&mut out, netlist, None, sink);
        write_wires(&mut out, &wires);
    }

    out.push_str("\nendmodule\n");
    log::debug!(
        "generated module `{output_name}`: {} instances, {} wires",
        netlist.instances.len(),
        wires.len()
    );
    Ok(RtlText::new(out))
}

fn declare_wires<'a>(
    netlist: &'a ExpandedNetlist,
    modules: &'a dyn ModuleLibrary,
    sink: &DiagnosticSink,
) -> Vec<Wire<'a>> {
    let mut wires = Vec::new();
    for (name, record) in &netlist.nets {
        let net = match record {
            Record::Valid(net) => net,
            Record::Malformed(reason) => {
                sink.emit(codes::warn_invalid_net(name, reason));
                continue;
            }
        };
        let first = match net.endpoints.first() {
            Some(Record::Valid(endpoint)) => endpoint,
            Some(Record::Malformed(reason)) => {
                sink.emit(codes::warn_malformed_endpoint(name, reason));
                continue;
            }
            None => {
                sink.emit(codes::warn_invalid_net(name, "net has no endpoints"));
                continue;
            }
        };
        let Some(instance) = netlist.instances.get(&first.instance).and_then(Record::valid)
        else {
            sink.emit(codes::warn_unknown_instance(name, &first.instance));
            continue;
        };
        let Some(module) = modules.module(&instance.module) else {
            sink.emit(codes::warn_unknown_module(
                name,
                &first.instance,
                &instance.module,
            ));
            continue;
        };
        let Some(port) = module.port(&first.port) else {
            sink.emit(codes::warn_unknown_port(name, &first.port, &instance.module));
            continue;
        };
        wires.push(Wire {
            name,
            ty: port.declared_type(),
            net,
        });
    }
    wires
}

fn write_wires(out: &mut String, wires: &[Wire<'_>]) {
    for wire in wires {
        match wire.ty {
            Some(ty) => out.push_str(&format!("    wire {ty} {};\n", wire.name)),
            None => out.push_str(&format!("    wire {};\n", wire.name)),
        }
    }
}

fn write_instances(
    out: &mut String,
    netlist: &ExpandedNetlist,
    bindings: Option<&[Wire<'_>]>,
    sink: &DiagnosticSink,
) {
    for (name, record) in &netlist.instances {
        let instance = match record {
            Record::Valid(instance) => instance,
            Record::Malformed(reason) => {
                sink.emit(codes::warn_malformed_instance(name, reason));
                continue;
            }
        };
        write_instance(out, name, instance, sink);
        match bindings {
            Some(wires) => write_bindings(out, name, wires),
            None => out.push_str(PLACEHOLDER),
        }
        out.push_str("    );\n\n");
    }
}

/// Writes the instantiation head up to and including the opening parenthesis.
fn write_instance(out: &mut String, name: &str, instance: &Instance, sink: &DiagnosticSink) {
    out.push_str(&format!("    {} ", instance.module));
    match &instance.parameters {
        Parameters::Overrides(overrides) if !overrides.is_empty() => {
            let params: Vec<String> = overrides
                .iter()
                .map(|(param, value)| format!("        .{param}({value})"))
                .collect();
            out.push_str("#(\n");
            out.push_str(&params.join(",\n"));
            out.push_str("\n    ) ");
        }
        Parameters::Malformed(reason) => {
            sink.emit(codes::warn_malformed_parameters(name, reason));
        }
        Parameters::Overrides(_) | Parameters::Absent => {}
    }
    out.push_str(&format!("{name} (\n"));
}

/// Writes one `.port(net)` line per endpoint of `instance` on a declared wire.
fn write_bindings(out: &mut String, instance: &str, wires: &[Wire<'_>]) {
    let lines: Vec<String> = wires
        .iter()
        .flat_map(|wire| {
            wire.net
                .endpoints
                .iter()
                .filter_map(Record::valid)
                .filter(move |ep| ep.instance == instance)
                .map(move |ep| format!("        .{}({})", ep.port, wire.name))
        })
        .collect();
    if !lines.is_empty() {
        out.push_str(&lines.join(",\n"));
        out.push('\n');
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codes::{W401, W402, W403, W404, W405, W406, W407};
    use indexmap::IndexMap;
    use tessel_library::ModuleInterface;
    use tessel_netlist::{load_netlist_from_str, Endpoint, ExpandedNetlist};

    const MODULES: &str = r#"
cpu:
  port:
    clk: {type: logic, direction: input}
    m_addr: {type: "logic [31:0]", direction: output}
    irq: {direction: input}
uart:
  port:
    pclk: {type: logic}
    paddr: {type: "logic [11:0]"}
"#;

    fn modules() -> IndexMap<String, ModuleInterface> {
        serde_yaml::from_str(MODULES).unwrap()
    }

    fn netlist(yaml: &str) -> ExpandedNetlist {
        let raw = load_netlist_from_str(yaml).unwrap();
        ExpandedNetlist {
            instances: raw.instances,
            nets: raw.nets,
        }
    }

    fn render(yaml: &str, options: &EmitOptions) -> (String, DiagnosticSink) {
        let sink = DiagnosticSink::new();
        let text = generate(&netlist(yaml), &modules(), "soc", options, &sink).unwrap();
        (text.into_string(), sink)
    }

    const SOC: &str = r#"
instance:
  cpu0:
    module: cpu
    parameter:
      XLEN: 32
      RESET: "'h0"
  uart0:
    module: uart
net:
  clk:
    - {instance: cpu0, port: clk}
    - {instance: uart0, port: pclk}
  sysbus_addr:
    - {instance: cpu0, port: m_addr}
    - {instance: uart0, port: paddr}
"#;

    #[test]
    fn placeholder_layout() {
        let (text, sink) = render(SOC, &EmitOptions::default());
        let expected = "\
// Generated by Tessel - Generated RTL Verilog file
// Auto-generated file, do not edit manually

module soc (
);

    cpu #(
        .XLEN(32),
        .RESET('h0)
    ) cpu0 (
        // Port connections would go here
    );

    uart uart0 (
        // Port connections would go here
    );

    wire logic clk;
    wire logic [31:0] sysbus_addr;

endmodule
";
        assert_eq!(text, expected);
        assert!(sink.is_empty());
    }

    #[test]
    fn bound_ports_layout() {
        let options = EmitOptions { bind_ports: true };
        let (text, _) = render(SOC, &options);
        let expected = "\
// Generated by Tessel - Generated RTL Verilog file
// Auto-generated file, do not edit manually

module soc (
);

    wire logic clk;
    wire logic [31:0] sysbus_addr;

    cpu #(
        .XLEN(32),
        .RESET('h0)
    ) cpu0 (
        .clk(clk),
        .m_addr(sysbus_addr)
    );

    uart uart0 (
        .pclk(clk),
        .paddr(sysbus_addr)
    );


endmodule
";
        assert_eq!(text, expected);
    }

    #[test]
    fn untyped_port_declares_plain_wire() {
        let (text, _) = render(
            "instance:\n  cpu0: {module: cpu}\nnet:\n  irq: [{instance: cpu0, port: irq}]\n",
            &EmitOptions::default(),
        );
        assert!(text.contains("    wire irq;\n"));
    }

    #[test]
    fn empty_and_malformed_nets_are_skipped() {
        let (text, sink) = render(
            r#"
instance:
  cpu0: {module: cpu}
net:
  empty: []
  scalar: 5
  bad_first: [7, {instance: cpu0, port: clk}]
  clk: [{instance: cpu0, port: clk}]
"#,
            &EmitOptions::default(),
        );
        assert_eq!(text.matches("wire ").count(), 1);
        assert!(text.contains("    wire logic clk;\n"));
        assert_eq!(sink.with_code(W403).len(), 2);
        assert_eq!(sink.with_code(W404).len(), 1);
    }

    #[test]
    fn unresolved_first_endpoint_skips_wire() {
        let (text, sink) = render(
            r#"
instance:
  cpu0: {module: cpu}
  mystery: {module: unknown}
net:
  a: [{instance: ghost, port: clk}]
  b: [{instance: mystery, port: clk}]
  c: [{instance: cpu0, port: nope}, {instance: cpu0, port: clk}]
"#,
            &EmitOptions::default(),
        );
        assert!(!text.contains("wire "));
        assert_eq!(sink.with_code(W405).len(), 1);
        assert_eq!(sink.with_code(W406).len(), 1);
        assert_eq!(sink.with_code(W407).len(), 1);
        // The instance of an unknown module is still instantiated.
        assert!(text.contains("    unknown mystery (\n"));
    }

    #[test]
    fn malformed_instance_and_parameters() {
        let (text, sink) = render(
            r#"
instance:
  broken: {parameter: {X: 1}}
  cpu0: {module: cpu, parameter: [1]}
  uart0: {module: uart, parameter: {}}
"#,
            &EmitOptions::default(),
        );
        assert!(!text.contains("broken"));
        assert!(text.contains("    cpu cpu0 (\n"));
        assert!(text.contains("    uart uart0 (\n"));
        assert!(!text.contains("#("));
        assert_eq!(sink.with_code(W401).len(), 1);
        assert_eq!(sink.with_code(W402).len(), 1);
    }

    #[test]
    fn first_endpoint_decides_type() {
        let mut nl = netlist("instance:\n  cpu0: {module: cpu}\n  uart0: {module: uart}\n");
        nl.nets.insert(
            "mixed".to_string(),
            Record::Valid(Net::from_endpoints([
                Endpoint::new("uart0", "paddr"),
                Endpoint::new("cpu0", "m_addr"),
            ])),
        );
        let sink = DiagnosticSink::new();
        let text = generate(&nl, &modules(), "top", &EmitOptions::default(), &sink).unwrap();
        assert!(text.as_str().contains("    wire logic [11:0] mixed;\n"));
    }

    #[test]
    fn preconditions() {
        let sink = DiagnosticSink::new();
        let empty = ExpandedNetlist::default();
        let err = generate(&empty, &modules(), "soc", &EmitOptions::default(), &sink).unwrap_err();
        assert!(matches!(err, RtlError::Precondition(_)));

        let nl = netlist("instance:\n  cpu0: {module: cpu}\n");
        let err = generate(&nl, &modules(), " ", &EmitOptions::default(), &sink).unwrap_err();
        assert!(matches!(err, RtlError::Precondition(_)));
    }

    #[test]
    fn output_is_deterministic() {
        let (a, _) = render(SOC, &EmitOptions::default());
        let (b, _) = render(SOC, &EmitOptions::default());
        assert_eq!(a, b);
    }
}
