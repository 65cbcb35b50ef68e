//! Import accumulation
//!
//! Every emission returns its own [`Imports`]. The driver merges them once
//! per module, resolves the type names emissions referenced against its
//! symbol table and renders the import block.

use std::collections::{BTreeMap, BTreeSet};

use regex::Regex;

use crate::error::{Error, Result};
use crate::model::PyType;

/// Names that need no import in a type expression
const BUILTIN_NAMES: &[&str] = &[
    "None", "bool", "bytes", "dict", "float", "frozenset", "int", "list", "set", "str", "tuple",
];

/// Names taken from `typing` when written in a type expression
const TYPING_NAMES: &[&str] = &["Any", "Literal"];

const FUTURE: &str = "__future__";

/// Import requirements of one or more emitted declarations
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Imports {
    /// Module (`typing`, `.types`) to imported names
    modules: BTreeMap<String, BTreeSet<String>>,
    /// Type names to resolve against the symbol table
    references: BTreeSet<String>,
}

impl Imports {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, module: &str, name: &str) {
        self.modules
            .entry(module.to_string())
            .or_default()
            .insert(name.to_string());
    }

    /// Record a name whose providing module is not known yet
    pub fn reference(&mut self, name: &str) {
        self.references.insert(name.to_string());
    }

    /// Record everything a type expression needs
    pub fn reference_type(&mut self, ty: &PyType) {
        if ty.uses_literal() {
            self.add("typing", "Literal");
        }
        if ty.uses_non_empty_tuple() {
            self.reference("NonEmptyTuple");
        }
        let mut named = Vec::new();
        ty.named_refs(&mut named);
        for path in named {
            if let Some(head) = path.first() {
                self.reference(head);
            }
        }
    }

    /// Record the names in a free-form type expression such as `list[Group]`
    pub fn reference_expr(&mut self, expr: &str) -> Result<()> {
        for name in type_names(expr)? {
            if TYPING_NAMES.contains(&name.as_str()) {
                self.add("typing", &name);
            } else {
                self.reference(&name);
            }
        }
        Ok(())
    }

    pub fn merge(&mut self, other: Imports) {
        for (module, names) in other.modules {
            self.modules.entry(module).or_default().extend(names);
        }
        self.references.extend(other.references);
    }

    pub fn references(&self) -> impl Iterator<Item = &str> {
        self.references.iter().map(String::as_str)
    }

    /// Render the import block.
    ///
    /// Sections are `__future__`, the standard library and package-relative
    /// imports, separated by blank lines. Lines over `line_length` are split
    /// into a parenthesized list.
    pub fn render(&self, line_length: usize) -> String {
        let line = |module: &str, names: &BTreeSet<String>| {
            let names: Vec<&str> = names.iter().map(String::as_str).collect();
            let single = format!("from {} import {}", module, names.join(", "));
            if single.chars().count() <= line_length {
                single
            } else {
                let body: String = names.iter().map(|n| format!("    {},\n", n)).collect();
                format!("from {} import (\n{})", module, body)
            }
        };

        let mut future = Vec::new();
        let mut stdlib = Vec::new();
        let mut relative = Vec::new();
        if let Some(names) = self.modules.get(FUTURE) {
            future.push(line(FUTURE, names));
        }
        for (module, names) in &self.modules {
            if module == FUTURE || names.is_empty() {
                continue;
            }
            if module.starts_with('.') {
                relative.push(line(module, names));
            } else {
                stdlib.push(line(module, names));
            }
        }

        [future.join("\n"), stdlib.join("\n"), relative.join("\n")]
            .into_iter()
            .filter(|block| !block.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Non-builtin names in a type expression.
///
/// Accepts `name ('[' expr (',' expr)* ']')? ('|' expr)*` over dotted names
/// and fails with [`Error::Config`] for anything else.
pub fn type_names(expr: &str) -> Result<Vec<String>> {
    let token = Regex::new(r"\s*([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*|[\[\],|])\s*")
        .map_err(|e| Error::Other(e.to_string()))?;
    let not_a_type = || Error::Config(format!("`{}` is not a type expression", expr));

    let mut tokens = Vec::new();
    let mut at = 0;
    for found in token.captures_iter(expr) {
        let (Some(whole), Some(text)) = (found.get(0), found.get(1)) else {
            return Err(not_a_type());
        };
        if whole.start() != at {
            return Err(not_a_type());
        }
        at = whole.end();
        tokens.push(text.as_str());
    }
    if at != expr.len() {
        return Err(not_a_type());
    }

    let mut parser = TypeExprParser {
        tokens: &tokens,
        pos: 0,
        names: Vec::new(),
    };
    if parser.union().is_none() || parser.pos != tokens.len() {
        return Err(not_a_type());
    }
    Ok(parser.names)
}

/// Recursive descent over `type_names` tokens; `None` on a syntax error
struct TypeExprParser<'a> {
    tokens: &'a [&'a str],
    pos: usize,
    names: Vec<String>,
}

impl<'a> TypeExprParser<'a> {
    fn peek(&self) -> Option<&'a str> {
        self.tokens.get(self.pos).copied()
    }

    fn eat(&mut self, punct: &str) -> bool {
        let matched = self.peek() == Some(punct);
        if matched {
            self.pos += 1;
        }
        matched
    }

    fn union(&mut self) -> Option<()> {
        self.term()?;
        while self.eat("|") {
            self.term()?;
        }
        Some(())
    }

    fn term(&mut self) -> Option<()> {
        let name = self.peek().filter(|t| !matches!(*t, "[" | "]" | "," | "|"))?;
        self.pos += 1;
        let head = name.split('.').next().unwrap_or_default();
        if !BUILTIN_NAMES.contains(&head) && !self.names.iter().any(|n| n == head) {
            self.names.push(head.to_string());
        }
        if self.eat("[") {
            self.union()?;
            while self.eat(",") {
                self.union()?;
            }
            if !self.eat("]") {
                return None;
            }
        }
        Some(())
    }
}
