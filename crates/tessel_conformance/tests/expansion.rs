//! Bus expansion scenarios run through the full pipeline.

use tessel_conformance::{
    bus_catalog, make_config, module_catalog, run_pipeline, run_pipeline_with,
};
use tessel_diagnostics::DiagnosticSink;
use tessel_netlist::{expand, load_netlist_from_str, ExpandOptions, RawNetlist};

fn pair(instance: &str, port: &str) -> (String, String) {
    (instance.to_string(), port.to_string())
}

// ---------------------------------------------------------------------------
// Scenario A: two fully mapped members
// ---------------------------------------------------------------------------

const TWO_MEMBERS: &str = r#"
instance:
  u_cpu: {module: cpu}
  u_uart: {module: uart}
bus:
  sysbus:
    u_cpu: {port: apb_m}
    u_uart: {port: apb_s}
"#;

#[test]
fn scenario_a_one_net_per_signal() {
    let result = run_pipeline(TWO_MEMBERS, "soc");
    assert!(result.error.is_none(), "unexpected error: {:?}", result.error);
    assert_eq!(result.warning_count, 0, "codes: {:?}", result.codes());
    assert_eq!(result.net_names(), vec!["sysbus_addr", "sysbus_wdata"]);
    assert_eq!(
        result.endpoints("sysbus_addr"),
        vec![pair("u_cpu", "cpu_addr"), pair("u_uart", "paddr")]
    );
    assert_eq!(
        result.endpoints("sysbus_wdata"),
        vec![pair("u_cpu", "cpu_wdata"), pair("u_uart", "pwdata")]
    );
}

#[test]
fn scenario_a_bus_section_removed() {
    let result = run_pipeline(TWO_MEMBERS, "soc");
    let yaml = result.expanded.unwrap().to_yaml().unwrap();
    assert!(!yaml.contains("bus:"), "bus section survived:\n{yaml}");
    assert!(yaml.contains("sysbus_addr"));
}

// ---------------------------------------------------------------------------
// Scenario B: member without bus metadata
// ---------------------------------------------------------------------------

#[test]
fn scenario_b_untagged_port_is_excluded() {
    let netlist = r#"
instance:
  u_cpu: {module: cpu}
  u_gpio: {module: gpio}
bus:
  sysbus:
    u_cpu: {port: apb_m}
    u_gpio: {port: apb_s}
"#;
    let result = run_pipeline(netlist, "soc");
    assert_eq!(result.codes(), vec!["W303"]);
    assert_eq!(result.net_names(), vec!["sysbus_addr", "sysbus_wdata"]);
    assert_eq!(result.endpoints("sysbus_addr"), vec![pair("u_cpu", "cpu_addr")]);
    assert_eq!(result.endpoints("sysbus_wdata"), vec![pair("u_cpu", "cpu_wdata")]);
}

// ---------------------------------------------------------------------------
// Scenario C: member naming an unknown instance
// ---------------------------------------------------------------------------

#[test]
fn scenario_c_unknown_instance_is_skipped() {
    let netlist = r#"
instance:
  u_cpu: {module: cpu}
  u_uart: {module: uart}
bus:
  sysbus:
    u_cpu: {port: apb_m}
    u_ghost: {port: apb_s}
    u_uart: {port: apb_s}
"#;
    let result = run_pipeline(netlist, "soc");
    assert_eq!(result.codes(), vec!["W301"]);
    let diag = &result.diagnostics[0];
    assert_eq!(diag.subject.as_deref(), Some("bus.sysbus.u_ghost"));
    assert_eq!(
        result.endpoints("sysbus_addr"),
        vec![pair("u_cpu", "cpu_addr"), pair("u_uart", "paddr")]
    );
    assert!(result.rtl.is_some());
}

// ---------------------------------------------------------------------------
// Scenario E: inconsistent bus types in one group
// ---------------------------------------------------------------------------

#[test]
fn scenario_e_first_bus_type_wins() {
    let netlist = r#"
instance:
  u_dma: {module: dma}
  u_cpu: {module: cpu}
  u_uart: {module: uart}
bus:
  mixed:
    u_dma: {port: ahb_m}
    u_cpu: {port: apb_m}
    u_uart: {port: apb_s}
"#;
    let result = run_pipeline(netlist, "soc");
    assert_eq!(result.codes(), vec!["W305", "W305"]);
    assert_eq!(result.net_names(), vec!["mixed_haddr", "mixed_hwdata"]);
    assert_eq!(result.endpoints("mixed_haddr"), vec![pair("u_dma", "dma_haddr")]);
}

#[test]
fn bus_type_consistency_holds_per_net() {
    let netlist = r#"
instance:
  u_cpu: {module: cpu}
  u_dma: {module: dma}
  u_timer: {module: timer}
bus:
  mixed:
    u_cpu: {port: apb_m}
    u_dma: {port: ahb_m}
    u_timer: {port: apb_s}
"#;
    let result = run_pipeline(netlist, "soc");
    assert_eq!(result.net_names(), vec!["mixed_addr", "mixed_wdata"]);
    for net in result.net_names() {
        assert!(result.endpoints(&net).iter().all(|(inst, _)| inst != "u_dma"));
    }
}

// ---------------------------------------------------------------------------
// Net discard and empty-net pruning
// ---------------------------------------------------------------------------

#[test]
fn unmapped_signal_produces_no_net() {
    let netlist = r#"
instance:
  u_timer: {module: timer}
bus:
  tbus:
    u_timer: {port: apb_s}
"#;
    let result = run_pipeline(netlist, "soc");
    assert_eq!(result.warning_count, 0);
    assert_eq!(result.net_names(), vec!["tbus_addr"]);
    assert_eq!(result.endpoints("tbus_addr"), vec![pair("u_timer", "taddr")]);
}

#[test]
fn group_without_valid_members_adds_nothing() {
    let netlist = r#"
instance:
  u_gpio: {module: gpio}
  u_x: {module: not_in_library}
bus:
  dead:
    u_gpio: {port: apb_s}
    u_x: {port: apb_s}
"#;
    let result = run_pipeline(netlist, "soc");
    assert_eq!(result.codes(), vec!["W303", "W302", "W307"]);
    assert!(result.net_names().is_empty());
    assert!(result.rtl.is_some());
}

#[test]
fn every_expanded_net_has_endpoints() {
    let netlist = r#"
instance:
  u_cpu: {module: cpu}
  u_timer: {module: timer}
  u_dma: {module: dma}
bus:
  a:
    u_timer: {port: apb_s}
  b:
    u_cpu: {port: apb_m}
    u_timer: {port: apb_s}
  c:
    u_dma: {port: ahb_m}
"#;
    let result = run_pipeline(netlist, "soc");
    assert!(!result.net_names().is_empty());
    for net in result.net_names() {
        assert!(!result.endpoints(&net).is_empty(), "net `{net}` is empty");
    }
}

// ---------------------------------------------------------------------------
// Port lookup and merging
// ---------------------------------------------------------------------------

#[test]
fn pad_prefix_is_added_during_lookup() {
    let netlist = r#"
instance:
  u_pad: {module: pad_ctrl}
bus:
  io:
    u_pad: {port: apb_s}
"#;
    let result = run_pipeline(netlist, "soc");
    assert_eq!(result.warning_count, 0, "codes: {:?}", result.codes());
    assert_eq!(result.endpoints("io_addr"), vec![pair("u_pad", "pad_addr")]);
}

#[test]
fn custom_pad_prefix_disables_default() {
    let netlist = r#"
instance:
  u_pad: {module: pad_ctrl}
bus:
  io:
    u_pad: {port: apb_s}
"#;
    let result = run_pipeline_with(
        netlist,
        "soc",
        &bus_catalog(),
        &module_catalog(),
        &make_config("io_", false),
    );
    assert_eq!(result.codes(), vec!["W303", "W307"]);
    assert!(result.net_names().is_empty());
}

#[test]
fn expanded_nets_merge_into_existing() {
    let netlist = r#"
instance:
  u_cpu: {module: cpu}
  u_uart: {module: uart}
net:
  clk:
    - {instance: u_cpu, port: clk}
    - {instance: u_uart, port: pclk}
  sysbus_addr:
    - {instance: u_uart, port: paddr}
bus:
  sysbus:
    u_cpu: {port: apb_m}
"#;
    let result = run_pipeline(netlist, "soc");
    assert_eq!(result.net_names(), vec!["clk", "sysbus_addr", "sysbus_wdata"]);
    assert_eq!(
        result.endpoints("sysbus_addr"),
        vec![pair("u_uart", "paddr"), pair("u_cpu", "cpu_addr")]
    );
}

#[test]
fn re_expansion_is_a_no_op() {
    let first = run_pipeline(TWO_MEMBERS, "soc");
    let yaml = first.expanded.unwrap().to_yaml().unwrap();

    let raw: RawNetlist = load_netlist_from_str(&yaml).unwrap();
    assert!(raw.bus_groups.is_empty());
    let sink = DiagnosticSink::new();
    let again = expand(
        raw,
        &bus_catalog(),
        &module_catalog(),
        &ExpandOptions::default(),
        &sink,
    )
    .unwrap();
    assert_eq!(again.to_yaml().unwrap(), yaml);
    assert_eq!(sink.warning_count(), 0);
}
