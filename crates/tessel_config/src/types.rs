//! Configuration types deserialized from `tessel.toml`.

use serde::Deserialize;

/// The top-level project configuration parsed from `tessel.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectConfig {
    /// Core project metadata.
    pub project: ProjectMeta,
    /// Library and output directory locations.
    #[serde(default)]
    pub paths: PathsConfig,
    /// Netlist expansion and RTL emission settings.
    #[serde(default)]
    pub generate: GenerateConfig,
}

/// Core project metadata required in every `tessel.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectMeta {
    /// The project name.
    pub name: String,
    /// The project version string.
    #[serde(default)]
    pub version: Option<String>,
}

/// Directory layout of a project, relative to the project root.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PathsConfig {
    /// Directory holding `*.soc_bus` bus library files.
    #[serde(default = "default_bus_dir")]
    pub bus: String,
    /// Directory holding `*.soc_mod` module library files.
    #[serde(default = "default_module_dir")]
    pub module: String,
    /// Directory generated RTL is written to.
    #[serde(default = "default_output_dir")]
    pub output: String,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            bus: default_bus_dir(),
            module: default_module_dir(),
            output: default_output_dir(),
        }
    }
}

fn default_bus_dir() -> String {
    "bus".to_string()
}

fn default_module_dir() -> String {
    "module".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

/// Settings for bus expansion and Verilog generation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GenerateConfig {
    /// Prefix tried when resolving pad-style port names (`pad_` by default).
    ///
    /// An empty prefix disables the stripped and prefixed lookup candidates.
    #[serde(default = "default_pad_prefix")]
    pub pad_prefix: String,
    /// Emit `.port(net)` bindings instead of the placeholder comment.
    #[serde(default)]
    pub bind_ports: bool,
}

impl Default for GenerateConfig {
    fn default() -> Self {
        Self {
            pad_prefix: default_pad_prefix(),
            bind_ports: false,
        }
    }
}

/// The pad prefix used when no configuration overrides it.
pub const DEFAULT_PAD_PREFIX: &str = "pad_";

fn default_pad_prefix() -> String {
    DEFAULT_PAD_PREFIX.to_string()
}
