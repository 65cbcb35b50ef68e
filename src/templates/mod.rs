//! Template-based module layout
//!
//! Uses MiniJinja for the outer shape of each generated module (header,
//! imports, declarations, `__all__`) and for the configurable source-link
//! template. The module template is embedded in the binary.

pub mod filters;

use std::sync::OnceLock;

use minijinja::{context, Environment, UndefinedBehavior};
use serde::Serialize;

use crate::error::{Error, Result};

// Embedded templates (compiled into binary)
mod embedded {
    pub const MODULE: &str = include_str!("../../templates/module.py.jinja");
}

pub const MODULE_TEMPLATE: &str = "module.py.jinja";

/// Template engine singleton
static ENGINE: OnceLock<Environment<'static>> = OnceLock::new();

/// Initialize the template engine with embedded templates
fn init_engine() -> Environment<'static> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    filters::register_filters(&mut env);

    // A broken embedded template surfaces from `get_template` on first render
    if let Err(e) = env.add_template(MODULE_TEMPLATE, embedded::MODULE) {
        tracing::error!(error = %e, "embedded module template failed to parse");
    }
    env
}

/// Get the global template engine
pub fn engine() -> &'static Environment<'static> {
    ENGINE.get_or_init(init_engine)
}

/// Everything the module template lays out
#[derive(Debug, Clone, Serialize)]
pub struct ModuleContext<'a> {
    /// Provenance comment lines, if enabled
    pub header: Option<&'a str>,
    /// Rendered import block, possibly empty
    pub imports: &'a str,
    /// Top-level declarations in emission order
    pub declarations: &'a [String],
    /// Names listed in `__all__`
    pub exports: &'a [String],
}

/// Render a complete module, newline-terminated
pub fn render_module(ctx: &ModuleContext<'_>) -> Result<String> {
    let template = engine()
        .get_template(MODULE_TEMPLATE)
        .map_err(template_error)?;
    let mut text = template.render(ctx).map_err(template_error)?;
    text.push('\n');
    Ok(text)
}

/// Expand a source-link template for one upstream path
pub fn render_source_link(template: &str, path: &str) -> Result<String> {
    engine()
        .render_str(template, context! { path })
        .map_err(template_error)
}

/// Reject a source-link template that does not render
pub fn check_source_link(template: &str) -> Result<()> {
    render_source_link(template, "src/main/java/Example.java").map(|_| ())
}

fn template_error(e: minijinja::Error) -> Error {
    Error::Template(e.to_string())
}
