//! Generation driver
//!
//! Discovers the upstream Java sources, runs extraction, resolution and
//! rendering for each generated module, and writes or checks the results.
//! Everything is generated in memory first; an error anywhere leaves the
//! output directory untouched.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info, warn};

use crate::config::{BindgenConfig, OutputConfig};
use crate::error::{Error, Result};
use crate::extract::{CommandExtractor, RecordExtractor};
use crate::model::Declaration;
use crate::parse::JavaSource;
use crate::render::{Imports, RenderConfig, Rendered, Renderer};
use crate::resolve::{resolve, ResolvedCommand};
use crate::templates::{self, ModuleContext};

/// Name of the hand-written output type for commands without output
const EMPTY: &str = "Empty";

/// The generated Python modules
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ModuleKind {
    /// One dataclass per RPC command
    Commands,
    /// `Empty` plus the records nested in command classes
    Outputs,
    /// Shared JSON records and enums
    Types,
}

impl ModuleKind {
    pub const ALL: [ModuleKind; 3] = [ModuleKind::Commands, ModuleKind::Outputs, ModuleKind::Types];

    /// Configured Python module name
    pub fn module_name(self, output: &OutputConfig) -> &str {
        match self {
            ModuleKind::Commands => &output.commands_module,
            ModuleKind::Outputs => &output.outputs_module,
            ModuleKind::Types => &output.types_module,
        }
    }
}

/// One rendered Python module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedModule {
    pub kind: ModuleKind,
    /// Python module name, without extension
    pub name: String,
    pub text: String,
}

impl GeneratedModule {
    pub fn file_name(&self) -> String {
        format!("{}.py", self.name)
    }
}

/// Upstream sources, parsed, in sorted path order
struct Inputs {
    commands: Vec<JavaSource>,
    json: Vec<JavaSource>,
}

impl Inputs {
    fn all(&self) -> impl Iterator<Item = &JavaSource> {
        self.commands.iter().chain(&self.json)
    }
}

/// The extracted upstream model
struct Extracted {
    commands: Vec<ResolvedCommand>,
    outputs: Vec<Declaration>,
    types: Vec<Declaration>,
}

/// A generation run over one upstream checkout
#[derive(Debug, Clone)]
pub struct Project {
    config: BindgenConfig,
    renderer: Renderer,
}

impl Project {
    pub fn new(config: BindgenConfig) -> Self {
        let renderer = Renderer::new(RenderConfig::from(&config.output));
        Self { config, renderer }
    }

    /// Generate every module
    pub fn generate(&self) -> Result<Vec<GeneratedModule>> {
        let inputs = self.load_inputs()?;
        let extracted = self.extract(&inputs)?;
        let symbols = self.symbols(&extracted);
        let header = self.header(&inputs);

        let modules = ModuleKind::ALL
            .iter()
            .map(|kind| self.module(*kind, &extracted, &symbols, header.as_deref()))
            .collect::<Result<Vec<_>>>()?;

        info!(
            commands = extracted.commands.len(),
            outputs = extracted.outputs.len(),
            types = extracted.types.len(),
            "generated {} modules",
            modules.len()
        );
        Ok(modules)
    }

    /// Generate a single module
    pub fn generate_module(&self, kind: ModuleKind) -> Result<GeneratedModule> {
        self.generate()?
            .into_iter()
            .find(|m| m.kind == kind)
            .ok_or_else(|| Error::Other(format!("module {:?} was not generated", kind)))
    }

    /// Write every module into `out_dir`, returning the written paths
    pub fn write_modules(&self, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let modules = self.generate()?;
        fs::create_dir_all(out_dir)?;

        let mut written = Vec::with_capacity(modules.len());
        for module in modules {
            let path = out_dir.join(module.file_name());
            fs::write(&path, &module.text)?;
            debug!(path = %path.display(), "wrote module");
            written.push(path);
        }
        Ok(written)
    }

    /// Names of modules whose file in `out_dir` is missing or differs from
    /// a fresh generation
    pub fn check_modules(&self, out_dir: &Path) -> Result<Vec<String>> {
        let mut drifted = Vec::new();
        for module in self.generate()? {
            let path = out_dir.join(module.file_name());
            let current = match fs::read_to_string(&path) {
                Ok(text) => Some(text),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
                Err(e) => return Err(e.into()),
            };
            if current.as_deref() != Some(module.text.as_str()) {
                warn!(path = %path.display(), "generated module is out of date");
                drifted.push(module.name);
            }
        }
        Ok(drifted)
    }

    // ------------------------------------------------------------------------
    // Pipeline stages
    // ------------------------------------------------------------------------

    fn load_inputs(&self) -> Result<Inputs> {
        Ok(Inputs {
            commands: self.load_dir(&self.config.commands_path())?,
            json: self.load_dir(&self.config.json_path())?,
        })
    }

    fn load_dir(&self, dir: &Path) -> Result<Vec<JavaSource>> {
        if !dir.is_dir() {
            return Err(Error::Config(format!(
                "source directory {} does not exist",
                dir.display()
            )));
        }
        let mut files = Vec::new();
        list_java_files(dir, &mut files)?;
        files.sort();

        files
            .iter()
            .map(|path| {
                let text = fs::read_to_string(path)?;
                JavaSource::parse(self.relative_path(path), text)
            })
            .collect()
    }

    /// `/`-separated path relative to the upstream root
    fn relative_path(&self, path: &Path) -> String {
        let relative = path.strip_prefix(&self.config.upstream_root).unwrap_or(path);
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/")
    }

    fn extract(&self, inputs: &Inputs) -> Result<Extracted> {
        let commands = CommandExtractor::new(&self.config.commands);
        let records = RecordExtractor::new(self.config.records.name_prefix.as_str());

        let mut extracted = Extracted {
            commands: Vec::new(),
            outputs: Vec::new(),
            types: Vec::new(),
        };
        for src in &inputs.commands {
            debug!(path = src.path(), "extracting command file");
            if let Some(declaration) = commands.extract(src)? {
                extracted.commands.push(resolve(declaration)?);
            }
            extracted.outputs.extend(records.extract_nested(src)?);
        }
        for src in &inputs.json {
            debug!(path = src.path(), "extracting JSON model file");
            extracted.types.extend(records.extract_top_level(src)?);
        }
        Ok(extracted)
    }

    /// Top-level name to the relative module providing it
    fn symbols(&self, extracted: &Extracted) -> BTreeMap<String, String> {
        let output = &self.config.output;
        let mut symbols = BTreeMap::new();
        let mut define = |name: &str, module: &str| {
            let module = format!(".{}", module);
            match symbols.get(name) {
                Some(existing) if existing != &module => {
                    warn!(symbol = name, existing = %existing, ignored = %module, "name defined in two modules");
                }
                Some(_) => {}
                None => {
                    symbols.insert(name.to_string(), module);
                }
            }
        };

        define("RpcCommand", &output.session_module);
        define("NonEmptyTuple", &output.utils_module);
        for (name, module) in &output.external_types {
            define(name, module);
        }
        for decl in &extracted.types {
            define(decl.name(), &output.types_module);
        }
        define(EMPTY, &output.outputs_module);
        for decl in &extracted.outputs {
            define(decl.name(), &output.outputs_module);
        }
        symbols
    }

    /// Provenance comment, stable for unchanged inputs
    fn header(&self, inputs: &Inputs) -> Option<String> {
        if !self.config.output.provenance {
            return None;
        }
        let mut hasher = Sha256::new();
        for src in inputs.all() {
            hasher.update(src.path().as_bytes());
            hasher.update([0u8]);
            hasher.update(src.source_text().as_bytes());
            hasher.update([0u8]);
        }
        Some(format!(
            "# Generated by signal-cli-bindgen {} from signal-cli sources; do not edit.\n# sha256:{}",
            crate::VERSION,
            hex::encode(hasher.finalize())
        ))
    }

    fn module(
        &self,
        kind: ModuleKind,
        extracted: &Extracted,
        symbols: &BTreeMap<String, String>,
        header: Option<&str>,
    ) -> Result<GeneratedModule> {
        let name = kind.module_name(&self.config.output).to_string();
        let mut imports = Imports::new();

        let (rendered, locals): (Vec<Rendered>, Vec<&Declaration>) = match kind {
            ModuleKind::Commands => {
                let rendered = extracted
                    .commands
                    .iter()
                    .map(|c| self.renderer.render_command(c))
                    .collect::<Result<Vec<_>>>()?;
                (rendered, Vec::new())
            }
            ModuleKind::Outputs => {
                imports.add("__future__", "annotations");
                let mut rendered = vec![self.renderer.render_empty()];
                for decl in &extracted.outputs {
                    rendered.push(self.renderer.render_declaration(decl)?);
                }
                (rendered, extracted.outputs.iter().collect())
            }
            ModuleKind::Types => {
                imports.add("__future__", "annotations");
                let rendered = extracted
                    .types
                    .iter()
                    .map(|d| self.renderer.render_declaration(d))
                    .collect::<Result<Vec<_>>>()?;
                (rendered, extracted.types.iter().collect())
            }
        };

        let mut exports = Vec::with_capacity(rendered.len());
        let mut seen: BTreeSet<String> = BTreeSet::new();
        for r in &rendered {
            if !seen.insert(r.name.clone()) {
                return Err(Error::inconsistent(
                    name.as_str(),
                    format!("`{}` is declared twice", r.name),
                ));
            }
            exports.push(r.name.clone());
        }

        let mut declarations = Vec::with_capacity(rendered.len());
        for r in rendered {
            imports.merge(r.imports);
            declarations.push(r.text);
        }

        let module_ref = format!(".{}", name);
        let mut resolved = Vec::new();
        for reference in imports.references() {
            if seen.contains(reference) || locals.iter().any(|d| d.declares(reference)) {
                continue;
            }
            match symbols.get(reference) {
                Some(module) if *module == module_ref => {}
                Some(module) => resolved.push((module.clone(), reference.to_string())),
                None if kind == ModuleKind::Commands => {
                    return Err(Error::Config(format!(
                        "output type name `{}` is not generated or listed in output.external_types",
                        reference
                    )));
                }
                None => warn!(module = %name, reference = reference, "unresolved type reference"),
            }
        }
        for (module, reference) in resolved {
            imports.add(&module, &reference);
        }

        let import_block = imports.render(self.config.output.line_length);
        let text = templates::render_module(&ModuleContext {
            header,
            imports: &import_block,
            declarations: &declarations,
            exports: &exports,
        })?;
        debug!(module = %name, declarations = exports.len(), "rendered module");

        Ok(GeneratedModule { kind, name, text })
    }
}

/// Collect `*.java` files below `dir`
fn list_java_files(dir: &Path, out: &mut Vec<PathBuf>) -> Result<()> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            list_java_files(&path, out)?;
        } else if path.extension().is_some_and(|ext| ext == "java") {
            out.push(path);
        }
    }
    Ok(())
}
