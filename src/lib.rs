// Production-quality lints
#![warn(
    clippy::todo,
    clippy::unimplemented,
    clippy::dbg_macro,
    clippy::print_stdout,
    clippy::print_stderr
)]
// Deny truly dangerous patterns
#![deny(clippy::mem_forget)]
// Allow common patterns in library code
#![allow(clippy::missing_errors_doc, clippy::missing_panics_doc)]

//! # signal-cli-bindgen
//!
//! Typed Python bindings for signal-cli's JSON-RPC interface, generated from
//! signal-cli's own Java sources.
//!
//! ## Core Concept
//!
//! signal-cli declares every command's flags through argparse4j calls and
//! every JSON payload as a Jackson record. Instead of maintaining Python
//! wrappers by hand, this crate reads those declarations with tree-sitter and
//! emits:
//!
//! - **commands**: one frozen dataclass per RPC command, with `@overload`
//!   constructors for mutually exclusive flag groups
//! - **outputs**: the result records nested in command classes
//! - **types**: the shared JSON records and enums
//!
//! ## Pipeline
//!
//! ```text
//! Java source ──▶ TypeMapper / CommandExtractor / RecordExtractor
//!             ──▶ resolve (group dissolution, ordering, overloads)
//!             ──▶ Renderer (Python text + imports)
//!             ──▶ Project (module assembly, write / check)
//! ```
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use signal_cli_bindgen::{BindgenConfig, Project};
//!
//! let config = BindgenConfig::load_or_default(None)?;
//! let project = Project::new(config);
//!
//! // Write commands.py, outputs.py and types.py
//! project.write_modules("signal_client/generated".as_ref())?;
//!
//! // CI: fail when the checked-in bindings are stale
//! assert!(project.check_modules("signal_client/generated".as_ref())?.is_empty());
//! ```
//!
//! Generation is deterministic: unchanged upstream sources and configuration
//! produce byte-identical modules.

// Configuration and errors
pub mod config;
pub mod error;
pub mod model;

// Parsing and extraction
pub mod extract;
pub mod parse;
pub mod resolve;
pub mod types;

// Output
pub mod project;
pub mod render;
pub mod templates;
pub mod util;

pub use config::{BindgenConfig, CommandsConfig, Converter, OutputConfig};
pub use error::{Error, Location, Result};
pub use extract::{CommandExtractor, RecordExtractor};
pub use model::{
    ArgumentDescriptor, ArgumentGroup, CommandDeclaration, Declaration, EnumDeclaration, GroupId,
    PyDefault, PyType, RecordDeclaration, RecordField, SourceRef,
};
pub use parse::JavaSource;
pub use project::{GeneratedModule, ModuleKind, Project};
pub use render::{Imports, RenderConfig, Rendered, Renderer};
pub use resolve::{resolve, ResolvedCommand};
pub use types::TypeMapper;

/// Version of this crate, recorded in generated module headers
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
