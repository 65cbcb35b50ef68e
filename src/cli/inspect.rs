//! Diagnostic commands

use std::fs;
use std::path::Path;
use std::process::ExitCode;

use signal_cli_bindgen::{parse, BindgenConfig, Result};

/// Print the syntax tree of a Java file, for writing extraction rules
pub fn cmd_sexp(file: &Path) -> Result<ExitCode> {
    let source = fs::read_to_string(file)?;
    println!("{}", parse::to_sexp(&source)?);
    Ok(ExitCode::SUCCESS)
}

pub fn cmd_schema() -> Result<ExitCode> {
    println!("{}", BindgenConfig::schema_json()?);
    Ok(ExitCode::SUCCESS)
}
