//! Generator configuration
//!
//! Loaded from `bindgen.yaml`. Every field has a default that matches the
//! layout of a signal-cli checkout, so an empty file (or no file at all)
//! is a valid configuration.

use crate::error::{Error, Result};
use crate::render::imports::type_names;
use crate::templates;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

/// Root configuration (`bindgen.yaml`)
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct BindgenConfig {
    /// Upstream checkout; relative paths resolve against the config file
    pub upstream_root: PathBuf,

    /// Source directories inside the upstream checkout
    pub sources: SourcesConfig,

    /// Command extraction tables
    pub commands: CommandsConfig,

    /// JSON model extraction
    pub records: RecordsConfig,

    /// Emitted module layout
    pub output: OutputConfig,
}

impl Default for BindgenConfig {
    fn default() -> Self {
        Self {
            upstream_root: PathBuf::from("signal-cli"),
            sources: SourcesConfig::default(),
            commands: CommandsConfig::default(),
            records: RecordsConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct SourcesConfig {
    /// Command classes, relative to `upstream_root`
    pub commands_dir: PathBuf,

    /// JSON model records, relative to `upstream_root`
    pub json_dir: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            commands_dir: PathBuf::from("src/main/java/org/asamk/signal/commands"),
            json_dir: PathBuf::from("src/main/java/org/asamk/signal/json"),
        }
    }
}

/// A conversion passed to argparse4j's `.type(...)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Converter {
    Int,
    Float,
    Bool,
    Str,
    /// Behaves like `.choices(values...)`
    Choices { values: Vec<String> },
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct CommandsConfig {
    /// Marker interface selecting RPC-exposed command classes
    pub interface: String,

    /// Flags dropped per command (PascalCase command name to argument names)
    pub excluded_args: BTreeMap<String, BTreeSet<String>>,

    /// Result type expression per command (PascalCase command name)
    pub outputs: BTreeMap<String, String>,

    /// Result type for commands missing from `outputs`
    pub default_output: String,

    /// `.type(...)` argument source text (`.class` stripped) to conversion
    pub converters: BTreeMap<String, Converter>,

    /// Chained call names that carry no information for the bindings
    pub ignored_calls: BTreeSet<String>,
}

impl Default for CommandsConfig {
    fn default() -> Self {
        let converters = [
            ("int", Converter::Int),
            ("long", Converter::Int),
            ("Integer", Converter::Int),
            ("Long", Converter::Int),
            ("boolean", Converter::Bool),
            ("Boolean", Converter::Bool),
            (
                "Arguments.enumStringType(MessageRequestResponseType)",
                Converter::Choices {
                    values: vec!["accept".into(), "delete".into()],
                },
            ),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();

        Self {
            interface: "JsonRpcLocalCommand".into(),
            excluded_args: BTreeMap::new(),
            outputs: BTreeMap::new(),
            default_output: "Empty".into(),
            converters,
            ignored_calls: BTreeSet::new(),
        }
    }
}

impl CommandsConfig {
    pub fn is_excluded(&self, command: &str, argument: &str) -> bool {
        self.excluded_args
            .get(command)
            .is_some_and(|args| args.contains(argument))
    }

    pub fn output_for(&self, command: &str) -> &str {
        self.outputs
            .get(command)
            .map(String::as_str)
            .unwrap_or(&self.default_output)
    }

    /// Look up a converter by source text, ignoring whitespace and `.class`
    pub fn converter(&self, expr: &str) -> Option<&Converter> {
        let wanted = normalize_converter_key(expr);
        self.converters
            .iter()
            .find(|(k, _)| normalize_converter_key(k) == wanted)
            .map(|(_, v)| v)
    }
}

/// Drop whitespace and every `.class` that ends a class literal
fn normalize_converter_key(s: &str) -> String {
    const CLASS: &str = ".class";
    let compact: String = s.split_whitespace().collect();
    let mut out = String::with_capacity(compact.len());
    let mut rest = compact.as_str();
    while let Some(at) = rest.find(CLASS) {
        let after = &rest[at + CLASS.len()..];
        out.push_str(&rest[..at]);
        if !(after.is_empty() || after.starts_with(')') || after.starts_with(',')) {
            out.push_str(CLASS);
        }
        rest = after;
    }
    out.push_str(rest);
    out
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct RecordsConfig {
    /// Domain prefix stripped from record and enum names
    pub name_prefix: String,
}

impl Default for RecordsConfig {
    fn default() -> Self {
        Self {
            name_prefix: "Json".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    pub commands_module: String,
    pub outputs_module: String,
    pub types_module: String,

    /// Hand-written module providing `RpcCommand`
    pub session_module: String,

    /// Hand-written module providing `NonEmptyTuple`
    pub utils_module: String,

    /// Hand-maintained type names and the module that provides them
    pub external_types: BTreeMap<String, String>,

    /// Column limit for one-line overload signatures
    pub line_length: usize,

    /// Docstring footer link, a template over `path`
    pub source_link: Option<String>,

    /// Emit the provenance header
    pub provenance: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            commands_module: "commands".into(),
            outputs_module: "outputs".into(),
            types_module: "types".into(),
            session_module: "session".into(),
            utils_module: "utils".into(),
            external_types: BTreeMap::new(),
            line_length: 100,
            source_link: None,
            provenance: true,
        }
    }
}

impl OutputConfig {
    fn module_names(&self) -> [(&'static str, &str); 5] {
        [
            ("commands_module", &self.commands_module),
            ("outputs_module", &self.outputs_module),
            ("types_module", &self.types_module),
            ("session_module", &self.session_module),
            ("utils_module", &self.utils_module),
        ]
    }
}

impl BindgenConfig {
    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!("Failed to read {}: {}", path.display(), e))
        })?;
        let mut config = Self::from_yaml(&content)?;
        if config.upstream_root.is_relative() {
            if let Some(dir) = path.parent() {
                config.upstream_root = dir.join(&config.upstream_root);
            }
        }
        Ok(config)
    }

    /// Load `path` if given, otherwise `bindgen.yaml` when present, otherwise defaults
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => {
                let local = Path::new("bindgen.yaml");
                if local.exists() {
                    Self::load(local)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_yaml(content: &str) -> Result<Self> {
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_norway::from_str(content)?
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for (field, name) in self.output.module_names() {
            if !is_identifier(name) {
                return Err(Error::Config(format!(
                    "output.{} must be a Python identifier, got {:?}",
                    field, name
                )));
            }
            if !seen.insert(name) {
                return Err(Error::Config(format!(
                    "output.{}: module name {:?} is used twice",
                    field, name
                )));
            }
        }

        if self.output.line_length < 40 {
            return Err(Error::Config(format!(
                "output.line_length must be at least 40, got {}",
                self.output.line_length
            )));
        }
        if self.commands.interface.is_empty() {
            return Err(Error::Config("commands.interface must not be empty".into()));
        }
        if self.commands.default_output.trim().is_empty() {
            return Err(Error::Config(
                "commands.default_output must not be empty".into(),
            ));
        }
        for expr in self
            .commands
            .outputs
            .values()
            .chain(std::iter::once(&self.commands.default_output))
        {
            type_names(expr)?;
        }
        if let Some(link) = &self.output.source_link {
            templates::check_source_link(link)?;
        }
        Ok(())
    }

    pub fn commands_path(&self) -> PathBuf {
        self.upstream_root.join(&self.sources.commands_dir)
    }

    pub fn json_path(&self) -> PathBuf {
        self.upstream_root.join(&self.sources.json_dir)
    }

    /// JSON schema of the configuration file
    pub fn schema_json() -> Result<String> {
        let schema = schemars::schema_for!(BindgenConfig);
        Ok(serde_json::to_string_pretty(&schema)?)
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}
