//! Generation commands

use std::path::Path;
use std::process::ExitCode;

use signal_cli_bindgen::{BindgenConfig, ModuleKind, Project, Result};

pub fn cmd_generate(config: BindgenConfig, kind: ModuleKind) -> Result<ExitCode> {
    let module = Project::new(config).generate_module(kind)?;
    print!("{}", module.text);
    Ok(ExitCode::SUCCESS)
}

pub fn cmd_write(config: BindgenConfig, out_dir: &Path) -> Result<ExitCode> {
    let written = Project::new(config).write_modules(out_dir)?;
    for path in written {
        eprintln!("Written to: {}", path.display());
    }
    Ok(ExitCode::SUCCESS)
}

/// Exit code 1 when any module is stale
pub fn cmd_check(config: BindgenConfig, out_dir: &Path) -> Result<ExitCode> {
    let drifted = Project::new(config).check_modules(out_dir)?;
    if drifted.is_empty() {
        eprintln!("✓ Generated modules in {} are up to date", out_dir.display());
        return Ok(ExitCode::SUCCESS);
    }
    for name in &drifted {
        eprintln!("✗ {}.py is out of date", name);
    }
    Ok(ExitCode::from(1))
}
