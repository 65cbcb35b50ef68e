//! Type mapping from Java type syntax to Python type expressions
//!
//! Conventions of the upstream JSON models:
//! - boxed and reference types (capitalized) may be `null`, so they map to
//!   `T | None`; primitives (lowercase) never do
//! - `Optional<T>` adds nothing beyond `T`'s own nullability
//! - `List<T>` / `Set<T>` become `tuple[T, ...]`
//!
//! Anything outside these rules is a hard failure so schema drift upstream
//! surfaces at generation time.

use tree_sitter::Node;

use crate::error::Result;
use crate::model::PyType;
use crate::parse::java::named_children;
use crate::parse::JavaSource;

/// Fixed table of upstream spellings, matched case-sensitively
fn builtin(name: &str) -> Option<PyType> {
    Some(match name {
        "String" => PyType::Str,
        "int" | "long" | "Integer" | "Long" => PyType::Int,
        "float" | "double" | "Float" | "Double" => PyType::Float,
        "boolean" | "Boolean" => PyType::Bool,
        _ => return None,
    })
}

fn is_capitalized(name: &str) -> bool {
    name.chars().next().is_some_and(char::is_uppercase)
}

/// Strip the domain prefix from a declaration name (`JsonContact` → `Contact`).
///
/// Only strips when the remainder is itself a capitalized identifier.
pub fn strip_prefix<'a>(name: &'a str, prefix: &str) -> &'a str {
    match name.strip_prefix(prefix) {
        Some(rest) if !prefix.is_empty() && is_capitalized(rest) => rest,
        _ => name,
    }
}

/// Maps Java type nodes to [`PyType`]
#[derive(Debug, Clone)]
pub struct TypeMapper {
    prefix: String,
}

impl TypeMapper {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn map(&self, node: Node<'_>, src: &JavaSource) -> Result<PyType> {
        match node.kind() {
            "array_type" => {
                if src.text(node).split_whitespace().collect::<String>() == "byte[]" {
                    Ok(PyType::Bytes)
                } else {
                    Err(src.unrecognized(node, "unsupported array type"))
                }
            }
            "integral_type" | "floating_point_type" | "boolean_type" | "type_identifier" => {
                self.map_name(src.text(node))
                    .ok_or_else(|| src.unrecognized(node, "unknown primitive type"))
            }
            "scoped_type_identifier" => {
                let text = src.text(node);
                if !text.split('.').all(|s| is_capitalized(s.trim())) {
                    return Err(src.unrecognized(node, "package-qualified type"));
                }
                let segments: Vec<_> = text
                    .split('.')
                    .map(|s| strip_prefix(s.trim(), &self.prefix).to_string())
                    .collect();
                Ok(PyType::Named(segments).optional())
            }
            "generic_type" => self.map_generic(node, src),
            _ => Err(src.unrecognized(node, "unsupported type syntax")),
        }
    }

    /// Map a bare type name; `None` for an unknown lowercase name
    pub fn map_name(&self, name: &str) -> Option<PyType> {
        let mapped = match builtin(name) {
            Some(t) => t,
            None if is_capitalized(name) => {
                PyType::named([strip_prefix(name, &self.prefix).to_string()])
            }
            None => return None,
        };
        Some(if is_capitalized(name) {
            mapped.optional()
        } else {
            mapped
        })
    }

    fn map_generic(&self, node: Node<'_>, src: &JavaSource) -> Result<PyType> {
        let children = named_children(node);
        let (wrapper, arguments) = match children.as_slice() {
            [wrapper, args] if args.kind() == "type_arguments" => (*wrapper, named_children(*args)),
            _ => return Err(src.unrecognized(node, "malformed generic type")),
        };
        let [element] = arguments.as_slice() else {
            return Err(src.unrecognized(node, "generic type must have one argument"));
        };

        match src.text(wrapper) {
            "Optional" => self.map(*element, src),
            "List" | "Set" => Ok(PyType::Tuple(Box::new(self.map(*element, src)?))),
            _ => Err(src.unrecognized(node, "unknown generic wrapper")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::parse::java::find_descendant;
    use rstest::rstest;

    fn map_source(java_type: &str) -> Result<String> {
        let src = JavaSource::parse(
            "JsonT.java",
            format!("record JsonT({} value) {{}}", java_type),
        )?;
        let param = find_descendant(src.root(), |n| n.kind() == "formal_parameter").unwrap();
        let ty = param.child_by_field_name("type").unwrap();
        TypeMapper::new("Json").map(ty, &src).map(|t| t.to_string())
    }

    #[rstest]
    #[case("String", "str | None")]
    #[case("int", "int")]
    #[case("long", "int")]
    #[case("Integer", "int | None")]
    #[case("Long", "int | None")]
    #[case("Float", "float | None")]
    #[case("boolean", "bool")]
    #[case("Boolean", "bool | None")]
    #[case("byte[]", "bytes")]
    #[case("JsonAttachment", "Attachment | None")]
    #[case("JsonContact.JsonProfile", "Contact.Profile | None")]
    #[case("Optional<String>", "str | None")]
    #[case("List<JsonMention>", "tuple[Mention | None, ...]")]
    #[case("Set<String>", "tuple[str | None, ...]")]
    #[case("List<Long>", "tuple[int | None, ...]")]
    #[case("UUID", "UUID | None")]
    fn test_type_mapping(#[case] java: &str, #[case] expected: &str) {
        assert_eq!(map_source(java).unwrap(), expected);
    }

    #[rstest]
    #[case("Map<String, String>")]
    #[case("Stream<String>")]
    #[case("char")]
    #[case("int[]")]
    #[case("java.util.UUID")]
    #[case("JsonContact.profile")]
    fn test_unrecognized_types_fail(#[case] java: &str) {
        let err = map_source(java).unwrap_err();
        assert!(
            matches!(err, Error::UnrecognizedSyntax { .. }),
            "expected syntax error for {}, got {:?}",
            java,
            err
        );
    }

    #[test]
    fn test_strip_prefix_requires_capital() {
        assert_eq!(strip_prefix("JsonContact", "Json"), "Contact");
        assert_eq!(strip_prefix("Jsonify", "Json"), "Jsonify");
        assert_eq!(strip_prefix("Json", "Json"), "Json");
        assert_eq!(strip_prefix("Contact", ""), "Contact");
    }
}
