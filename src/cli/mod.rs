//! CLI command implementations
//!
//! - `generate`: generation commands (generate, write, check)
//! - `inspect`: diagnostics (sexp, schema)

pub mod generate;
pub mod inspect;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand, ValueEnum};
use signal_cli_bindgen::{BindgenConfig, ModuleKind, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub use generate::{cmd_check, cmd_generate, cmd_write};
pub use inspect::{cmd_schema, cmd_sexp};

/// Generate typed Python bindings for signal-cli's JSON-RPC interface
#[derive(Parser, Debug)]
#[command(name = "signal-cli-bindgen")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Configuration file (defaults to ./bindgen.yaml when present)
    #[arg(long, global = true, env = "SIGNAL_CLI_BINDGEN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging (debug level)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Print one generated module to stdout
    Generate {
        #[arg(value_enum)]
        module: ModuleArg,
    },

    /// Write every generated module into a directory
    Write {
        #[arg(long)]
        out_dir: PathBuf,
    },

    /// Exit non-zero when modules in a directory differ from a fresh generation
    Check {
        #[arg(long)]
        out_dir: PathBuf,
    },

    /// Dump the tree-sitter S-expression of a Java file
    Sexp { file: PathBuf },

    /// Print the JSON schema of the configuration file
    Schema,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleArg {
    Commands,
    Outputs,
    Types,
}

impl From<ModuleArg> for ModuleKind {
    fn from(arg: ModuleArg) -> Self {
        match arg {
            ModuleArg::Commands => ModuleKind::Commands,
            ModuleArg::Outputs => ModuleKind::Outputs,
            ModuleArg::Types => ModuleKind::Types,
        }
    }
}

/// Log to stderr; stdout carries generated code
pub fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

pub fn run(cli: &Cli) -> Result<ExitCode> {
    match &cli.command {
        Command::Generate { module } => {
            let config = BindgenConfig::load_or_default(cli.config.as_deref())?;
            cmd_generate(config, (*module).into())
        }
        Command::Write { out_dir } => {
            let config = BindgenConfig::load_or_default(cli.config.as_deref())?;
            cmd_write(config, out_dir)
        }
        Command::Check { out_dir } => {
            let config = BindgenConfig::load_or_default(cli.config.as_deref())?;
            cmd_check(config, out_dir)
        }
        Command::Sexp { file } => cmd_sexp(file),
        Command::Schema => cmd_schema(),
    }
}
