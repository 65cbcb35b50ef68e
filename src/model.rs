//! Declaration model
//!
//! The intermediate representation between the Java syntax tree and the
//! emitted Python. Extraction builds it, the resolver derives overloads from
//! it and the emitter renders it.

use std::fmt;

// ============================================================================
// Target types
// ============================================================================

/// A Python type expression
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PyType {
    Str,
    Int,
    Float,
    Bool,
    Bytes,
    /// Reference to another generated declaration, e.g. `Contact.Profile`
    Named(Vec<String>),
    /// `Literal[...]` over rendered Python literals
    Literal(Vec<String>),
    /// `T | None`
    Optional(Box<PyType>),
    /// `tuple[T, ...]`
    Tuple(Box<PyType>),
    /// `NonEmptyTuple[T]`
    NonEmptyTuple(Box<PyType>),
}

impl PyType {
    pub fn named<S: Into<String>>(path: impl IntoIterator<Item = S>) -> Self {
        PyType::Named(path.into_iter().map(Into::into).collect())
    }

    /// The single-value `Literal[True]` type
    pub fn literal_true() -> Self {
        PyType::Literal(vec!["True".into()])
    }

    /// Wrap in `| None`; idempotent
    pub fn optional(self) -> Self {
        match self {
            PyType::Optional(_) => self,
            other => PyType::Optional(Box::new(other)),
        }
    }

    /// Drop the outer `| None` arm, if any
    pub fn without_optional(self) -> Self {
        match self {
            PyType::Optional(inner) => *inner,
            other => other,
        }
    }

    /// Replace the element type underneath optional and sequence wrappers.
    ///
    /// `tuple[str, ...]` with element `int` becomes `tuple[int, ...]`.
    pub fn with_element(self, element: PyType) -> Self {
        match self {
            PyType::Optional(inner) => PyType::Optional(Box::new(inner.with_element(element))),
            PyType::Tuple(inner) => PyType::Tuple(Box::new(inner.with_element(element))),
            PyType::NonEmptyTuple(inner) => {
                PyType::NonEmptyTuple(Box::new(inner.with_element(element)))
            }
            _ => element,
        }
    }

    /// Collect every declaration reference in this type
    pub fn named_refs<'a>(&'a self, out: &mut Vec<&'a [String]>) {
        match self {
            PyType::Named(path) => out.push(path),
            PyType::Optional(inner) | PyType::Tuple(inner) | PyType::NonEmptyTuple(inner) => {
                inner.named_refs(out)
            }
            _ => {}
        }
    }

    pub fn uses_literal(&self) -> bool {
        match self {
            PyType::Literal(_) => true,
            PyType::Optional(inner) | PyType::Tuple(inner) | PyType::NonEmptyTuple(inner) => {
                inner.uses_literal()
            }
            _ => false,
        }
    }

    pub fn uses_non_empty_tuple(&self) -> bool {
        match self {
            PyType::NonEmptyTuple(_) => true,
            PyType::Optional(inner) | PyType::Tuple(inner) => inner.uses_non_empty_tuple(),
            _ => false,
        }
    }
}

impl fmt::Display for PyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PyType::Str => f.write_str("str"),
            PyType::Int => f.write_str("int"),
            PyType::Float => f.write_str("float"),
            PyType::Bool => f.write_str("bool"),
            PyType::Bytes => f.write_str("bytes"),
            PyType::Named(path) => f.write_str(&path.join(".")),
            PyType::Literal(values) => write!(f, "Literal[{}]", values.join(", ")),
            PyType::Optional(inner) => write!(f, "{} | None", inner),
            PyType::Tuple(inner) => write!(f, "tuple[{}, ...]", inner),
            PyType::NonEmptyTuple(inner) => write!(f, "NonEmptyTuple[{}]", inner),
        }
    }
}

/// A default value literal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PyDefault {
    /// `None`
    NoValue,
    /// `False`
    False,
    /// `()`
    EmptyTuple,
}

impl fmt::Display for PyDefault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            PyDefault::NoValue => "None",
            PyDefault::False => "False",
            PyDefault::EmptyTuple => "()",
        })
    }
}

// ============================================================================
// Commands
// ============================================================================

/// Container an argument was registered on
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GroupId {
    /// Registered directly on the subparser
    Default,
    /// Registered on a mutually exclusive group bound to this variable
    Named(String),
}

/// One CLI flag of an upstream command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentDescriptor {
    pub group: GroupId,
    pub name: String,
    pub documentation: Option<String>,
    pub type_expr: PyType,
    pub is_optional: bool,
    pub default: Option<PyDefault>,
}

impl ArgumentDescriptor {
    /// A fresh flag: optional `str` without default, as argparse4j registers it
    pub fn new(group: GroupId, name: impl Into<String>) -> Self {
        Self {
            group,
            name: name.into(),
            documentation: None,
            type_expr: PyType::Str,
            is_optional: true,
            default: None,
        }
    }

    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }

    /// Mandatory narrowing.
    ///
    /// The result is never optional, has no default, loses its `| None` arm,
    /// and a plain `bool` becomes `Literal[True]`.
    pub fn make_mandatory(&self) -> Self {
        let narrowed = self.type_expr.clone().without_optional();
        let type_expr = if narrowed == PyType::Bool {
            PyType::literal_true()
        } else {
            narrowed
        };
        Self {
            is_optional: false,
            default: None,
            type_expr,
            ..self.clone()
        }
    }
}

/// A set of arguments sharing one container
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentGroup {
    pub name: String,
    pub is_mutually_exclusive: bool,
    pub is_required: bool,
    /// Member argument names in registration order
    pub members: Vec<String>,
}

impl ArgumentGroup {
    pub fn exclusive(name: impl Into<String>, is_required: bool) -> Self {
        Self {
            name: name.into(),
            is_mutually_exclusive: true,
            is_required,
            members: Vec::new(),
        }
    }

    pub fn id(&self) -> GroupId {
        GroupId::Named(self.name.clone())
    }
}

/// Upstream file a declaration came from
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SourceRef {
    /// Path relative to the upstream root, `/`-separated
    pub path: String,
}

impl SourceRef {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

/// One upstream command class implementing the RPC marker interface
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDeclaration {
    /// PascalCase command name
    pub name: String,
    pub help: Option<String>,
    /// Arguments in discovery order
    pub arguments: Vec<ArgumentDescriptor>,
    /// Exclusive groups in declaration order
    pub groups: Vec<ArgumentGroup>,
    /// Python expression for the command's result type
    pub output_type: String,
    pub source: SourceRef,
}

impl CommandDeclaration {
    pub fn group(&self, name: &str) -> Option<&ArgumentGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    pub fn argument(&self, name: &str) -> Option<&ArgumentDescriptor> {
        self.arguments.iter().find(|a| a.name == name)
    }
}

// ============================================================================
// JSON models
// ============================================================================

/// One component of a JSON record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordField {
    pub name: String,
    pub type_expr: PyType,
    pub default: Option<PyDefault>,
    /// Marked `@Deprecated` upstream
    pub deprecated: bool,
}

/// A JSON record with its nested declarations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordDeclaration {
    /// Name with the domain prefix stripped
    pub name: String,
    /// Components in declaration order
    pub fields: Vec<RecordField>,
    pub nested: Vec<Declaration>,
    pub source: SourceRef,
}

/// A closed set of named constants
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDeclaration {
    pub name: String,
    pub members: Vec<String>,
    pub source: SourceRef,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Declaration {
    Record(RecordDeclaration),
    Enum(EnumDeclaration),
}

impl Declaration {
    pub fn name(&self) -> &str {
        match self {
            Declaration::Record(r) => &r.name,
            Declaration::Enum(e) => &e.name,
        }
    }

    pub fn source(&self) -> &SourceRef {
        match self {
            Declaration::Record(r) => &r.source,
            Declaration::Enum(e) => &e.source,
        }
    }

    /// Whether `name` is declared by this declaration or any nested one
    pub fn declares(&self, name: &str) -> bool {
        if self.name() == name {
            return true;
        }
        match self {
            Declaration::Record(r) => r.nested.iter().any(|d| d.declares(name)),
            Declaration::Enum(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_types() {
        let t = PyType::Tuple(Box::new(PyType::named(["IceUpdate"]).optional()));
        assert_eq!(t.to_string(), "tuple[IceUpdate | None, ...]");

        let lit = PyType::Literal(vec!["\"accept\"".into(), "\"delete\"".into()]);
        assert_eq!(lit.to_string(), "Literal[\"accept\", \"delete\"]");

        let ne = PyType::NonEmptyTuple(Box::new(PyType::Str));
        assert_eq!(ne.to_string(), "NonEmptyTuple[str]");

        assert_eq!(PyType::named(["Contact", "Profile"]).to_string(), "Contact.Profile");
    }

    #[test]
    fn test_optional_is_idempotent() {
        let t = PyType::Str.optional().optional();
        assert_eq!(t.to_string(), "str | None");
    }

    #[test]
    fn test_with_element_keeps_wrappers() {
        let t = PyType::Tuple(Box::new(PyType::Str)).with_element(PyType::Int);
        assert_eq!(t, PyType::Tuple(Box::new(PyType::Int)));

        let t = PyType::Str.with_element(PyType::Bool);
        assert_eq!(t, PyType::Bool);
    }

    #[test]
    fn test_make_mandatory_narrows_bool_to_true_literal() {
        let mut arg = ArgumentDescriptor::new(GroupId::Named("g".into()), "hide");
        arg.type_expr = PyType::Bool;
        arg.is_optional = false;
        arg.default = Some(PyDefault::False);

        let narrowed = arg.make_mandatory();
        assert!(!narrowed.is_optional);
        assert_eq!(narrowed.default, None);
        assert_eq!(narrowed.type_expr, PyType::literal_true());
        assert_eq!(narrowed.group, arg.group);
    }

    #[test]
    fn test_make_mandatory_drops_none_arm() {
        let mut arg = ArgumentDescriptor::new(GroupId::Default, "recipient");
        arg.type_expr = PyType::Str.optional();
        arg.default = Some(PyDefault::NoValue);

        let narrowed = arg.make_mandatory();
        assert_eq!(narrowed.type_expr, PyType::Str);
        assert!(!narrowed.has_default());
    }

    #[test]
    fn test_optional_bool_narrows_to_true_literal() {
        let mut arg = ArgumentDescriptor::new(GroupId::Default, "blocked");
        arg.type_expr = PyType::Bool.optional();
        arg.default = Some(PyDefault::NoValue);
        assert_eq!(arg.make_mandatory().type_expr, PyType::literal_true());
    }

    #[test]
    fn test_declares_nested() {
        let inner = Declaration::Enum(EnumDeclaration {
            name: "Type".into(),
            members: vec!["SUCCESS".into()],
            source: SourceRef::default(),
        });
        let outer = Declaration::Record(RecordDeclaration {
            name: "SendMessageResult".into(),
            fields: vec![],
            nested: vec![inner],
            source: SourceRef::default(),
        });
        assert!(outer.declares("Type"));
        assert!(outer.declares("SendMessageResult"));
        assert!(!outer.declares("Other"));
    }
}
