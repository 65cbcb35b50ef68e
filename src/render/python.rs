//! Python declaration rendering
//!
//! Each `render_*` method returns the declaration text at column zero
//! together with the imports it needs. Module assembly happens in the
//! template.

use super::docs::{format_block_line, format_docstring, rewrap};
use super::imports::Imports;
use super::{indent, RenderConfig};
use crate::error::Result;
use crate::model::{
    ArgumentDescriptor, ArgumentGroup, Declaration, EnumDeclaration, RecordDeclaration,
    RecordField, SourceRef,
};
use crate::resolve::ResolvedCommand;
use crate::templates;
use crate::util::{join_prose, py_string};

/// One rendered top-level declaration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub name: String,
    pub text: String,
    pub imports: Imports,
}

/// Python renderer
#[derive(Debug, Clone)]
pub struct Renderer {
    config: RenderConfig,
}

impl Renderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    // ------------------------------------------------------------------------
    // Commands
    // ------------------------------------------------------------------------

    /// Render a command as a frozen dataclass deriving `RpcCommand[Output]`
    pub fn render_command(&self, resolved: &ResolvedCommand) -> Result<Rendered> {
        let decl = &resolved.declaration;
        let mut imports = Imports::new();
        imports.add("dataclasses", "dataclass");
        imports.reference("RpcCommand");
        imports.reference_expr(&decl.output_type)?;

        let mut sections = Vec::new();
        if let Some(doc) = self.command_docstring(resolved)? {
            sections.push(format_docstring(&doc));
        }

        if !decl.arguments.is_empty() {
            let fields: Vec<String> = decl
                .arguments
                .iter()
                .map(|arg| {
                    imports.reference_type(&arg.type_expr);
                    argument_field(arg)
                })
                .collect();
            sections.push(fields.join("\n"));
        }

        if !resolved.overloads.is_empty() {
            imports.add("typing", "overload");
            imports.add("dataclasses", "MISSING");
            imports.add("dataclasses", "fields");
            for params in &resolved.overloads {
                for p in params {
                    imports.reference_type(&p.type_expr);
                }
                sections.push(self.overload(params));
            }
            sections.push(runtime_init(resolved));
        }

        if sections.is_empty() {
            sections.push("pass".to_string());
        }

        let text = format!(
            "@dataclass(frozen=True, kw_only=True)\nclass {}(RpcCommand[{}]):\n{}",
            decl.name,
            decl.output_type,
            indent(&sections.join("\n\n"), 4)
        );
        Ok(Rendered {
            name: decl.name.clone(),
            text,
            imports,
        })
    }

    /// Help text, exclusivity notes, parameter list and source link,
    /// separated by blank lines
    fn command_docstring(&self, resolved: &ResolvedCommand) -> Result<Option<String>> {
        let decl = &resolved.declaration;
        let mut parts = Vec::new();

        if let Some(help) = &decl.help {
            parts.push(rewrap(help, ""));
        }

        if !resolved.exclusive_groups.is_empty() {
            let notes: Vec<String> = resolved
                .exclusive_groups
                .iter()
                .map(|g| format!(" - {}", group_note(resolved, g)))
                .collect();
            parts.push(format!("Note:\n{}", notes.join("\n")));
        }

        if !decl.arguments.is_empty() {
            let params: Vec<String> = decl
                .arguments
                .iter()
                .map(|arg| {
                    let doc = arg.documentation.as_deref().unwrap_or_default();
                    rewrap(&format!(":param {}: {}", arg.name, doc), "    ")
                })
                .collect();
            parts.push(params.join("\n"));
        }

        if let Some(link) = self.source_link(&decl.source)? {
            parts.push(link);
        }

        Ok((!parts.is_empty()).then(|| parts.join("\n\n")))
    }

    /// `@overload` stub, on one line when it fits
    fn overload(&self, params: &[ArgumentDescriptor]) -> String {
        if params.is_empty() {
            return "@overload\ndef __init__(self): ...".to_string();
        }
        let rendered: Vec<String> = params
            .iter()
            .map(|p| {
                let default = if p.has_default() { " = ..." } else { "" };
                format!("{}: {}{}", p.name, p.type_expr, default)
            })
            .collect();

        let one_line = format!("def __init__(self, *, {}): ...", rendered.join(", "));
        if 4 + one_line.chars().count() <= self.config.line_length {
            return format!("@overload\n{}", one_line);
        }
        let body: Vec<String> = rendered.iter().map(|p| format!("    {},", p)).collect();
        format!(
            "@overload\ndef __init__(\n    self,\n    *,\n{}\n): ...",
            body.join("\n")
        )
    }

    // ------------------------------------------------------------------------
    // JSON models
    // ------------------------------------------------------------------------

    /// Render a top-level record or enum
    pub fn render_declaration(&self, decl: &Declaration) -> Result<Rendered> {
        let mut imports = Imports::new();
        let text = self.declaration(decl, true, &mut imports)?;
        Ok(Rendered {
            name: decl.name().to_string(),
            text,
            imports,
        })
    }

    fn declaration(
        &self,
        decl: &Declaration,
        top_level: bool,
        imports: &mut Imports,
    ) -> Result<String> {
        match decl {
            Declaration::Record(r) => self.record(r, top_level, imports),
            Declaration::Enum(e) => self.enumeration(e, top_level, imports),
        }
    }

    fn record(
        &self,
        record: &RecordDeclaration,
        top_level: bool,
        imports: &mut Imports,
    ) -> Result<String> {
        imports.add("dataclasses", "dataclass");
        let mut sections = Vec::new();

        if top_level {
            if let Some(link) = self.source_link(&record.source)? {
                sections.push(format_block_line(&link));
            }
        }

        if !record.fields.is_empty() {
            let mut lines = Vec::new();
            for (i, field) in record.fields.iter().enumerate() {
                imports.reference_type(&field.type_expr);
                lines.push(record_field(field));
                if field.deprecated {
                    imports.add("typing", "TYPE_CHECKING");
                    imports.add("warnings", "deprecated");
                    lines.push(deprecated_stub(field));
                    if i + 1 < record.fields.len() {
                        lines.push(String::new());
                    }
                }
            }
            sections.push(lines.join("\n"));
        }

        for nested in &record.nested {
            sections.push(self.declaration(nested, false, imports)?);
        }

        if sections.is_empty() {
            sections.push("pass".to_string());
        }

        Ok(format!(
            "@dataclass(frozen=True, kw_only=True)\nclass {}:\n{}",
            record.name,
            indent(&sections.join("\n\n"), 4)
        ))
    }

    fn enumeration(
        &self,
        decl: &EnumDeclaration,
        top_level: bool,
        imports: &mut Imports,
    ) -> Result<String> {
        imports.add("enum", "StrEnum");
        let mut sections = Vec::new();

        if top_level {
            if let Some(link) = self.source_link(&decl.source)? {
                sections.push(format_block_line(&link));
            }
        }
        if !decl.members.is_empty() {
            imports.add("enum", "auto");
            let members: Vec<String> = decl
                .members
                .iter()
                .map(|m| format!("{} = auto()", m))
                .collect();
            sections.push(members.join("\n"));
        }
        if sections.is_empty() {
            sections.push("pass".to_string());
        }

        Ok(format!(
            "class {}(StrEnum):\n{}",
            decl.name,
            indent(&sections.join("\n\n"), 4)
        ))
    }

    /// The output type of commands that print nothing
    pub fn render_empty(&self) -> Rendered {
        let mut imports = Imports::new();
        imports.add("dataclasses", "dataclass");
        let text = "@dataclass(frozen=True)\n\
                    class Empty:\n    \
                    \"\"\"\n    \
                    Output type for commands which produce no output.\n\n    \
                    signal-cli answers these commands with an empty JSON object.\n    \
                    \"\"\""
            .to_string();
        Rendered {
            name: "Empty".into(),
            text,
            imports,
        }
    }

    /// `*[generated from [Java source](url)]*`, when a link template is set
    fn source_link(&self, source: &SourceRef) -> Result<Option<String>> {
        match &self.config.source_link {
            Some(template) => {
                let url = templates::render_source_link(template, &source.path)?;
                Ok(Some(format!("*[generated from [Java source]({})]*", url)))
            }
            None => Ok(None),
        }
    }
}

fn argument_field(arg: &ArgumentDescriptor) -> String {
    let mut line = format!("{}: {}", arg.name, arg.type_expr);
    if let Some(default) = arg.default {
        line.push_str(&format!(" = {}", default));
    }
    match &arg.documentation {
        Some(doc) => format!("{}\n{}", line, py_string(doc)),
        None => line,
    }
}

fn record_field(field: &RecordField) -> String {
    match field.default {
        Some(default) => format!("{}: {} = {}", field.name, field.type_expr, default),
        None => format!("{}: {}", field.name, field.type_expr),
    }
}

/// Type-checker-only property flagging a deprecated field
fn deprecated_stub(field: &RecordField) -> String {
    format!(
        "if TYPE_CHECKING:\n\n    @property\n    @deprecated(\"Deprecated\")\n    def {}(self) -> {}: ...",
        field.name, field.type_expr
    )
}

fn group_note(resolved: &ResolvedCommand, group: &ArgumentGroup) -> String {
    let attrs: Vec<String> = resolved
        .members(group)
        .iter()
        .map(|a| format!(":attr:`{}`", a.name))
        .collect();
    if group.is_required {
        format!("Exactly one of {} is required.", join_prose(&attrs, "or"))
    } else {
        format!("{} are mutually exclusive.", join_prose(&attrs, "and"))
    }
}

/// Keyword-only `__init__` enforcing group cardinality at runtime
fn runtime_init(resolved: &ResolvedCommand) -> String {
    let mut lines = vec![
        "def __init__(self, **kwargs):".to_string(),
        "    self.__dict__.update({f.name: f.default for f in fields(self) if f.default != MISSING})"
            .to_string(),
        "    self.__dict__.update(kwargs)".to_string(),
    ];
    for group in &resolved.exclusive_groups {
        let names: Vec<String> = resolved
            .members(group)
            .iter()
            .map(|a| py_string(&a.name))
            .collect();
        lines.push(format!(
            "    match len(kwargs.keys() & (args := [{}])):",
            names.join(", ")
        ));
        if group.is_required {
            lines.push("        case 0:".into());
            lines.push("            raise ValueError(f\"One of {args!r} is required!\")".into());
            lines.push("        case 1:".into());
        } else {
            lines.push("        case 0 | 1:".into());
        }
        lines.push("            pass".into());
        lines.push("        case _:".into());
        lines.push(
            "            raise ValueError(f\"Arguments {args!r} are mutually exclusive!\")".into(),
        );
    }
    lines.join("\n")
}
