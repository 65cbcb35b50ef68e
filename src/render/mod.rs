//! Python rendering
//!
//! Turns resolved commands and extracted JSON declarations into Python
//! source text. Rendering is pure: the same model always yields the same
//! text.

pub mod docs;
pub mod imports;
mod python;

pub use imports::Imports;
pub use python::{Rendered, Renderer};

use crate::config::OutputConfig;

/// Render configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderConfig {
    /// Column limit for one-line overload signatures and import lines
    pub line_length: usize,
    /// Source link template over `path`
    pub source_link: Option<String>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            line_length: 100,
            source_link: None,
        }
    }
}

impl From<&OutputConfig> for RenderConfig {
    fn from(output: &OutputConfig) -> Self {
        Self {
            line_length: output.line_length,
            source_link: output.source_link.clone(),
        }
    }
}

/// Indent every non-empty line by `spaces`
pub(crate) fn indent(text: &str, spaces: usize) -> String {
    let prefix = " ".repeat(spaces);
    text.lines()
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", prefix, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_indent_skips_blank_lines() {
        assert_eq!(indent("a\n\nb", 4), "    a\n\n    b");
    }

    #[test]
    fn test_config_from_output() {
        let output = OutputConfig {
            line_length: 88,
            ..OutputConfig::default()
        };
        assert_eq!(RenderConfig::from(&output).line_length, 88);
    }
}
