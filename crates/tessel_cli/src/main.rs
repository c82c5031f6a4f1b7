//! Tessel CLI: the command-line interface for the Tessel SoC assembler.
//!
//! Provides `tessel generate verilog` for turning netlist files into RTL,
//! and `tessel bus` / `tessel module` for browsing the project's bus and
//! module libraries.

#![warn(missing_docs)]

mod generate;
mod library;
mod pipeline;

use std::io::IsTerminal;
use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// Tessel: assemble SoC netlists into RTL.
#[derive(Parser, Debug)]
#[command(name = "tessel", version, about = "Tessel SoC netlist assembler")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `tessel.toml` file or the directory containing it.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate output files from netlists.
    #[command(subcommand)]
    Generate(GenerateCommand),
    /// Inspect the bus library.
    #[command(subcommand)]
    Bus(LibraryCommand),
    /// Inspect the module library.
    #[command(subcommand)]
    Module(LibraryCommand),
}

/// Output kinds of `tessel generate`.
#[derive(Subcommand, Debug)]
pub enum GenerateCommand {
    /// Expand bus groups and write one Verilog file per netlist.
    Verilog(GenerateArgs),
}

/// Arguments for `tessel generate verilog`.
#[derive(Parser, Debug)]
pub struct GenerateArgs {
    /// Netlist files to process.
    #[arg(required = true, num_args = 1..)]
    pub files: Vec<PathBuf>,

    /// Output directory (default: `paths.output` from `tessel.toml`).
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Print each expanded netlist as YAML.
    #[arg(long)]
    pub emit_netlist: bool,
}

/// Library browsing commands shared by `tessel bus` and `tessel module`.
#[derive(Subcommand, Debug)]
pub enum LibraryCommand {
    /// List entry names, optionally filtered by a name or regex.
    List {
        /// Exact name, or a regular expression if it contains regex syntax.
        pattern: Option<String>,
    },
    /// Print one entry's definition.
    Show {
        /// Entry name.
        name: String,
    },
    /// Remove matching entries and rewrite the libraries that held them.
    Remove {
        /// Exact name, or a regular expression if it contains regex syntax.
        pattern: String,
    },
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::io::stderr().is_terminal(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        config: cli.config,
    };
    init_logging(&global);

    let result = match cli.command {
        Command::Generate(GenerateCommand::Verilog(ref args)) => generate::run(args, &global),
        Command::Bus(ref cmd) => library::run_bus(cmd, &global),
        Command::Module(ref cmd) => library::run_module(cmd, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the logger; `RUST_LOG` overrides the level chosen by flags.
fn init_logging(global: &GlobalArgs) {
    let _ = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(log_level(global)),
    )
    .format_timestamp(None)
    .try_init();
}

fn log_level(global: &GlobalArgs) -> &'static str {
    if global.verbose {
        "debug"
    } else if global.quiet {
        "error"
    } else {
        "warn"
    }
}
