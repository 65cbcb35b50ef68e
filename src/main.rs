//! signal-cli-bindgen CLI
//!
//! Commands:
//!   generate - Print one generated module
//!   write    - Write all generated modules to a directory
//!   check    - Compare modules on disk with a fresh generation
//!   sexp     - Dump the syntax tree of a Java file
//!   schema   - Print the configuration JSON schema

mod cli;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let args = cli::Cli::parse();
    cli::init_logging(args.verbose);

    match cli::run(&args) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(1)
        }
    }
}
