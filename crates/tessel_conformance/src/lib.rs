//! Conformance test helpers for the Tessel netlist pipeline.
//!
//! Provides fixture libraries and a pipeline function that runs netlist text
//! through load → expand → generate and returns structured results for
//! assertion in integration tests.

#![warn(missing_docs)]

use std::path::{Path, PathBuf};
use tessel_common::NamePattern;
use tessel_config::ProjectConfig;
use tessel_diagnostics::{Diagnostic, DiagnosticSink};
use tessel_library::{BusCatalog, ModuleCatalog};
use tessel_netlist::{ExpandOptions, ExpandedNetlist, Record};
use tessel_rtl::EmitOptions;

/// Bus types used by the scenarios: `apb` with `addr` and `wdata`, and `ahb`.
pub const BUS_LIBRARY: &str = r#"
apb:
  port:
    addr:
      direction: out
      width: 32
      qualifier: address
    wdata:
      direction: out
      width: 32
      qualifier: data
ahb:
  port:
    haddr:
      direction: out
      width: 32
    hwdata:
      direction: out
      width: 32
"#;

/// Module interfaces used by the scenarios.
///
/// `cpu` and `uart` map every `apb` signal, `timer` maps only `addr`,
/// `gpio` has no bus metadata, `dma` speaks `ahb`, and `pad_ctrl` declares
/// its bus port with the `pad_` prefix.
pub const MODULE_LIBRARY: &str = r#"
cpu:
  port:
    clk: {type: logic, direction: input}
    cpu_addr: {type: "logic [31:0]", direction: output}
    cpu_wdata: {type: "logic [31:0]", direction: output}
    apb_m:
      bus: apb
      mapping: {addr: cpu_addr, wdata: cpu_wdata}
  parameter:
    XLEN: {type: int, value: 32}
uart:
  port:
    pclk: {type: logic, direction: input}
    paddr: {type: "logic [11:0]", direction: input}
    pwdata: {type: "logic [31:0]", direction: input}
  bus:
    apb_s:
      bus: apb
      mapping: {addr: paddr, wdata: pwdata}
timer:
  port:
    taddr: {type: "logic [7:0]", direction: input}
    apb_s:
      bus: apb
      mapping: {addr: taddr, wdata: ""}
gpio:
  port:
    apb_s: {type: "logic [31:0]", direction: input}
dma:
  port:
    dma_haddr: {type: "logic [31:0]", direction: output}
    dma_hwdata: {type: "logic [31:0]", direction: output}
  bus:
    ahb_m:
      bus: ahb
      mapping: {haddr: dma_haddr, hwdata: dma_hwdata}
pad_ctrl:
  port:
    pad_addr: {type: "logic [31:0]", direction: input}
  bus:
    pad_apb_s:
      bus: apb
      mapping: {addr: pad_addr}
"#;

/// Result of running the load → expand → generate pipeline.
pub struct PipelineResult {
    /// The expanded netlist, if loading and expansion succeeded.
    pub expanded: Option<ExpandedNetlist>,
    /// The generated Verilog, if every stage succeeded.
    pub rtl: Option<String>,
    /// The fatal error that stopped the pipeline, if any.
    pub error: Option<String>,
    /// All diagnostics emitted during the pipeline.
    pub diagnostics: Vec<Diagnostic>,
    /// Number of warning-severity diagnostics.
    pub warning_count: usize,
    /// Path of the Verilog file written by [`run_project`], if any.
    pub written: Option<PathBuf>,
}

impl PipelineResult {
    /// Returns the diagnostic codes in emission order, e.g. `["W301"]`.
    pub fn codes(&self) -> Vec<String> {
        self.diagnostics.iter().map(|d| d.code.to_string()).collect()
    }

    /// Returns the net names of the expanded netlist in order.
    pub fn net_names(&self) -> Vec<String> {
        self.expanded
            .as_ref()
            .map(|n| n.nets.keys().cloned().collect())
            .unwrap_or_default()
    }

    /// Returns the `(instance, port)` endpoints of net `name`.
    pub fn endpoints(&self, name: &str) -> Vec<(String, String)> {
        self.expanded
            .as_ref()
            .and_then(|n| n.nets.get(name))
            .and_then(Record::valid)
            .map(|net| {
                net.endpoints
                    .iter()
                    .filter_map(Record::valid)
                    .map(|e| (e.instance.clone(), e.port.clone()))
                    .collect()
            })
            .unwrap_or_default()
    }
}

/// Builds the fixture bus catalog.
pub fn bus_catalog() -> BusCatalog {
    let mut catalog = BusCatalog::new();
    catalog
        .load_str("fixtures", BUS_LIBRARY)
        .expect("fixture bus library parses");
    catalog
}

/// Builds the fixture module catalog.
pub fn module_catalog() -> ModuleCatalog {
    let mut catalog = ModuleCatalog::new();
    catalog
        .load_str("fixtures", MODULE_LIBRARY)
        .expect("fixture module library parses");
    catalog
}

/// Creates a minimal `ProjectConfig` with the given `[generate]` settings.
pub fn make_config(pad_prefix: &str, bind_ports: bool) -> ProjectConfig {
    let toml_str = format!(
        r#"
[project]
name = "conformance_test"

[generate]
pad_prefix = "{pad_prefix}"
bind_ports = {bind_ports}
"#
    );
    tessel_config::load_config_from_str(&toml_str).expect("conformance config is valid")
}

/// Runs the pipeline with the fixture libraries and default settings.
pub fn run_pipeline(netlist: &str, output_name: &str) -> PipelineResult {
    run_pipeline_with(
        netlist,
        output_name,
        &bus_catalog(),
        &module_catalog(),
        &make_config("pad_", false),
    )
}

/// Runs the pipeline with explicit libraries and configuration.
pub fn run_pipeline_with(
    netlist: &str,
    output_name: &str,
    buses: &BusCatalog,
    modules: &ModuleCatalog,
    config: &ProjectConfig,
) -> PipelineResult {
    let sink = DiagnosticSink::new();
    let expand_options = ExpandOptions {
        pad_prefix: config.generate.pad_prefix.clone(),
    };
    let emit_options = EmitOptions {
        bind_ports: config.generate.bind_ports,
    };

    let mut expanded = None;
    let mut rtl = None;
    let error = match tessel_netlist::load_netlist_from_str(netlist)
        .and_then(|raw| tessel_netlist::expand(raw, buses, modules, &expand_options, &sink))
    {
        Ok(netlist) => {
            let generated =
                tessel_rtl::generate(&netlist, modules, output_name, &emit_options, &sink);
            expanded = Some(netlist);
            match generated {
                Ok(text) => {
                    rtl = Some(text.into_string());
                    None
                }
                Err(e) => Some(e.to_string()),
            }
        }
        Err(e) => Some(e.to_string()),
    };

    let warning_count = sink.warning_count();
    let diagnostics = sink.take_all();
    PipelineResult {
        expanded,
        rtl,
        error,
        diagnostics,
        warning_count,
        written: None,
    }
}

/// Lays out a project under `root`: `tessel.toml` with `config_toml`, the
/// fixture libraries in `bus/` and `module/`, and an empty `output/`.
pub fn create_project(root: &Path, config_toml: &str) -> std::io::Result<()> {
    std::fs::write(root.join(tessel_config::CONFIG_FILE_NAME), config_toml)?;
    std::fs::create_dir_all(root.join("bus"))?;
    std::fs::create_dir_all(root.join("module"))?;
    std::fs::create_dir_all(root.join("output"))?;
    std::fs::write(root.join("bus").join("fixtures.soc_bus"), BUS_LIBRARY)?;
    std::fs::write(root.join("module").join("fixtures.soc_mod"), MODULE_LIBRARY)?;
    Ok(())
}

/// Runs the pipeline against a project on disk.
///
/// Configuration and libraries are read from `root`, and the netlist from
/// `netlist`. On success the Verilog is written to the configured output
/// directory under the netlist file's stem.
pub fn run_project(root: &Path, netlist: &Path) -> Result<PipelineResult, String> {
    let config = tessel_config::load_config(root).map_err(|e| e.to_string())?;
    let paths = tessel_config::resolve_paths(&config, root);

    let mut buses = BusCatalog::new();
    buses
        .load_dir(&paths.bus_dir, &NamePattern::any())
        .map_err(|e| e.to_string())?;
    let mut modules = ModuleCatalog::new();
    modules
        .load_dir(&paths.module_dir, &NamePattern::any())
        .map_err(|e| e.to_string())?;

    let content = std::fs::read_to_string(netlist).map_err(|e| e.to_string())?;
    let name = netlist
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| format!("no output name for {}", netlist.display()))?;

    let mut result = run_pipeline_with(&content, name, &buses, &modules, &config);
    if let Some(rtl) = &result.rtl {
        let path = paths.output_dir.join(format!("{name}.v"));
        std::fs::write(&path, rtl).map_err(|e| e.to_string())?;
        result.written = Some(path);
    }
    Ok(result)
}
