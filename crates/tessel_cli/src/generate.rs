//! `tessel generate verilog`: netlist to RTL pipeline.
//!
//! For each netlist file:
//!
//! 1. Load the netlist document
//! 2. Expand bus groups into nets using the project's libraries
//! 3. Emit the Verilog module
//! 4. Write `<name>.v` to the output directory
//!
//! A file that fails does not stop the others; the exit code is 1 if any
//! file failed.

use std::path::{Path, PathBuf};

use tessel_diagnostics::{Diagnostic, DiagnosticSink};
use tessel_library::{BusCatalog, BusDefinition, ModuleCatalog, ModuleInterface};
use tessel_netlist::ExpandOptions;
use tessel_rtl::EmitOptions;

use crate::pipeline::{load_catalog, load_project, output_name, render_diagnostics};
use crate::{GenerateArgs, GlobalArgs, ReportFormat};

/// What happened to one netlist file.
struct FileOutcome {
    input: PathBuf,
    result: Result<PathBuf, String>,
    diagnostics: Vec<Diagnostic>,
    netlist: Option<String>,
}

/// Libraries and settings shared by every file of one run.
struct Generator {
    buses: BusCatalog,
    modules: ModuleCatalog,
    expand: ExpandOptions,
    emit: EmitOptions,
    output_dir: PathBuf,
    emit_netlist: bool,
}

/// Runs the `tessel generate verilog` command.
///
/// Returns exit code 0 if every file was generated, 1 otherwise.
pub fn run(args: &GenerateArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let project = load_project(global)?;

    if !global.quiet {
        match &project.config.project.version {
            Some(version) => eprintln!("   Loading {} v{version}", project.config.project.name),
            None => eprintln!("   Loading {}", project.config.project.name),
        }
    }

    let output_dir = args
        .output
        .clone()
        .unwrap_or_else(|| project.paths.output_dir.clone());
    std::fs::create_dir_all(&output_dir)
        .map_err(|e| format!("cannot create output directory {}: {e}", output_dir.display()))?;

    let generator = Generator {
        buses: load_catalog::<BusDefinition>(&project.paths.bus_dir)?,
        modules: load_catalog::<ModuleInterface>(&project.paths.module_dir)?,
        expand: ExpandOptions {
            pad_prefix: project.config.generate.pad_prefix.clone(),
        },
        emit: EmitOptions {
            bind_ports: project.config.generate.bind_ports,
        },
        output_dir,
        emit_netlist: args.emit_netlist,
    };

    let outcomes: Vec<FileOutcome> = args.files.iter().map(|f| generator.process(f)).collect();
    let failed = outcomes.iter().filter(|o| o.result.is_err()).count();

    match args.format {
        ReportFormat::Text => report_text(&outcomes, global),
        ReportFormat::Json => report_json(&outcomes)?,
    }

    if !global.quiet && args.format == ReportFormat::Text {
        let warnings: usize = outcomes.iter().map(|o| o.diagnostics.len()).sum();
        eprintln!(
            "   Result: {} file(s) generated, {} failed, {} warning(s)",
            outcomes.len() - failed,
            failed,
            warnings
        );
    }

    Ok(if failed > 0 { 1 } else { 0 })
}

impl Generator {
    fn process(&self, input: &Path) -> FileOutcome {
        let sink = DiagnosticSink::new();
        let mut netlist = None;
        let result = self
            .generate(input, &sink, &mut netlist)
            .map_err(|e| e.to_string());
        FileOutcome {
            input: input.to_path_buf(),
            result,
            diagnostics: sink.take_all(),
            netlist,
        }
    }

    fn generate(
        &self,
        input: &Path,
        sink: &DiagnosticSink,
        netlist_yaml: &mut Option<String>,
    ) -> Result<PathBuf, Box<dyn std::error::Error>> {
        let name = output_name(input)
            .ok_or_else(|| format!("cannot derive a module name from {}", input.display()))?;
        let raw = tessel_netlist::load_netlist(input)?;
        let expanded = tessel_netlist::expand(raw, &self.buses, &self.modules, &self.expand, sink)?;
        if self.emit_netlist {
            *netlist_yaml = Some(expanded.to_yaml()?);
        }
        let text = tessel_rtl::generate(&expanded, &self.modules, &name, &self.emit, sink)?;
        Ok(text.write_to(&self.output_dir, &name)?)
    }
}

fn report_text(outcomes: &[FileOutcome], global: &GlobalArgs) {
    for outcome in outcomes {
        if !global.quiet {
            render_diagnostics(&outcome.diagnostics, global.color);
        }
        if let Some(yaml) = &outcome.netlist {
            println!("{yaml}");
        }
        match &outcome.result {
            Ok(path) => {
                if !global.quiet {
                    eprintln!("   Generated {}", path.display());
                }
            }
            Err(e) => eprintln!("error: {}: {e}", outcome.input.display()),
        }
    }
}

fn report_json(outcomes: &[FileOutcome]) -> Result<(), Box<dyn std::error::Error>> {
    let files: Vec<serde_json::Value> = outcomes
        .iter()
        .map(|o| {
            let mut entry = serde_json::json!({
                "input": o.input.display().to_string(),
                "diagnostics": o.diagnostics,
            });
            match &o.result {
                Ok(path) => entry["output"] = path.display().to_string().into(),
                Err(e) => entry["error"] = e.clone().into(),
            }
            if let Some(yaml) = &o.netlist {
                entry["netlist"] = yaml.clone().into();
            }
            entry
        })
        .collect();
    println!("{}", serde_json::to_string_pretty(&files)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    const BUS: &str = "apb:\n  port:\n    addr: {direction: out}\n    wdata: {direction: out}\n";
    const MODULES: &str = r#"
cpu:
  port:
    m_addr: {type: "logic [31:0]"}
    m_wdata: {type: "logic [31:0]"}
  bus:
    apb_master: {bus: apb, mapping: {addr: m_addr, wdata: m_wdata}}
uart:
  port:
    paddr: {type: "logic [11:0]"}
    apb_slave: {bus: apb, mapping: {addr: paddr}}
"#;
    const NETLIST: &str = r#"
instance:
  cpu0: {module: cpu}
  uart0: {module: uart}
bus:
  sysbus:
    cpu0: {port: apb_master}
    uart0: {port: apb_slave}
    ghost: {port: apb_slave}
"#;

    fn project() -> TempDir {
        let tmp = TempDir::new().unwrap();
        fs::write(tmp.path().join("tessel.toml"), "[project]\nname = \"soc\"\n").unwrap();
        fs::create_dir_all(tmp.path().join("bus")).unwrap();
        fs::create_dir_all(tmp.path().join("module")).unwrap();
        fs::write(tmp.path().join("bus/amba.soc_bus"), BUS).unwrap();
        fs::write(tmp.path().join("module/cores.soc_mod"), MODULES).unwrap();
        tmp
    }

    fn global(root: &Path) -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            verbose: false,
            color: false,
            config: Some(root.to_str().unwrap().to_string()),
        }
    }

    fn args(files: Vec<PathBuf>, output: Option<PathBuf>) -> GenerateArgs {
        GenerateArgs {
            files,
            output,
            format: ReportFormat::Text,
            emit_netlist: false,
        }
    }

    #[test]
    fn generates_into_configured_output() {
        let tmp = project();
        let netlist = tmp.path().join("soc.yaml");
        fs::write(&netlist, NETLIST).unwrap();

        let code = run(&args(vec![netlist], None), &global(tmp.path())).unwrap();
        assert_eq!(code, 0);

        let rtl = fs::read_to_string(tmp.path().join("output/soc.v")).unwrap();
        assert!(rtl.starts_with("// Generated by Tessel"));
        assert!(rtl.contains("module soc (\n);"));
        assert!(rtl.contains("    wire logic [31:0] sysbus_addr;\n"));
        assert!(rtl.contains("    wire logic [31:0] sysbus_wdata;\n"));
        assert!(rtl.ends_with("endmodule\n"));
    }

    #[test]
    fn output_flag_overrides_config() {
        let tmp = project();
        let netlist = tmp.path().join("top.yaml");
        fs::write(&netlist, NETLIST).unwrap();
        let out = tmp.path().join("custom/rtl");

        let code = run(&args(vec![netlist], Some(out.clone())), &global(tmp.path())).unwrap();
        assert_eq!(code, 0);
        assert!(out.join("top.v").is_file());
    }

    #[test]
    fn failing_file_sets_exit_code_but_others_run() {
        let tmp = project();
        let good = tmp.path().join("good.yaml");
        let bad = tmp.path().join("bad.yaml");
        fs::write(&good, NETLIST).unwrap();
        fs::write(&bad, "net: {}\n").unwrap();
        let missing = tmp.path().join("missing.yaml");

        let code = run(&args(vec![bad, missing, good], None), &global(tmp.path())).unwrap();
        assert_eq!(code, 1);
        assert!(tmp.path().join("output/good.v").is_file());
        assert!(!tmp.path().join("output/bad.v").exists());
    }

    #[test]
    fn process_collects_diagnostics_and_netlist() {
        let tmp = project();
        let netlist = tmp.path().join("soc.yaml");
        fs::write(&netlist, NETLIST).unwrap();

        let generator = Generator {
            buses: load_catalog(&tmp.path().join("bus")).unwrap(),
            modules: load_catalog(&tmp.path().join("module")).unwrap(),
            expand: ExpandOptions::default(),
            emit: EmitOptions::default(),
            output_dir: tmp.path().to_path_buf(),
            emit_netlist: true,
        };
        let outcome = generator.process(&netlist);
        assert_eq!(outcome.result.unwrap(), tmp.path().join("soc.v"));
        assert_eq!(outcome.diagnostics.len(), 1);
        assert_eq!(outcome.diagnostics[0].code.to_string(), "W301");
        let yaml = outcome.netlist.unwrap();
        assert!(yaml.contains("sysbus_addr"));
        assert!(!yaml.contains("bus:"));
    }

    #[test]
    fn missing_project_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let result = run(
            &args(vec![tmp.path().join("soc.yaml")], None),
            &global(tmp.path()),
        );
        assert!(result.is_err());
    }
}
