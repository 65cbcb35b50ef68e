//! JSON model extraction
//!
//! Jackson-serialized records and enums carry a domain prefix
//! (`JsonContact`), which selects them at the top level of a file. Records
//! become frozen dataclasses and enums become `StrEnum`s; declarations in a
//! record body are nested in the parent whether prefixed or not.

use tracing::debug;
use tree_sitter::Node;

use super::declared_name;
use crate::error::Result;
use crate::model::{
    Declaration, EnumDeclaration, PyDefault, PyType, RecordDeclaration, RecordField, SourceRef,
};
use crate::parse::java::{collapse_whitespace, find_outermost, named_children};
use crate::parse::JavaSource;
use crate::types::{strip_prefix, TypeMapper};
use crate::util::to_snake_case;

const NON_NULL: &str = "@JsonInclude(JsonInclude.Include.NON_NULL)";
const DEPRECATED: &str = "@Deprecated";

/// Extracts record and enum [`Declaration`]s
#[derive(Debug, Clone)]
pub struct RecordExtractor {
    prefix: String,
    mapper: TypeMapper,
}

impl RecordExtractor {
    pub fn new(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        Self {
            mapper: TypeMapper::new(prefix.clone()),
            prefix,
        }
    }

    /// Prefixed records and enums declared at the top level of a JSON model file
    pub fn extract_top_level(&self, src: &JavaSource) -> Result<Vec<Declaration>> {
        named_children(src.root())
            .into_iter()
            .filter(|n| self.is_model(*n, src))
            .map(|n| self.declaration(n, src))
            .collect()
    }

    /// Prefixed records and enums nested anywhere in a command file.
    ///
    /// These are the result shapes commands serialize, so they land in the
    /// outputs module.
    pub fn extract_nested(&self, src: &JavaSource) -> Result<Vec<Declaration>> {
        find_outermost(src.root(), |n| self.is_model(n, src))
            .into_iter()
            .map(|n| self.declaration(n, src))
            .collect()
    }

    fn is_model(&self, node: Node<'_>, src: &JavaSource) -> bool {
        is_declaration(node)
            && declared_name(node, src).is_some_and(|name| self.is_prefixed(name))
    }

    fn is_prefixed(&self, name: &str) -> bool {
        strip_prefix(name, &self.prefix) != name
    }

    fn declaration(&self, node: Node<'_>, src: &JavaSource) -> Result<Declaration> {
        let java_name = declared_name(node, src)
            .ok_or_else(|| src.unrecognized(node, "declaration without a name"))?;
        let name = strip_prefix(java_name, &self.prefix).to_string();
        let source = SourceRef::new(src.path());

        let decl = match node.kind() {
            "enum_declaration" => Declaration::Enum(EnumDeclaration {
                name,
                members: enum_constants(node, src),
                source,
            }),
            _ => {
                let parameters = node
                    .child_by_field_name("parameters")
                    .ok_or_else(|| src.unrecognized(node, "record without components"))?;
                let fields = named_children(parameters)
                    .into_iter()
                    .map(|p| self.component(p, src))
                    .collect::<Result<Vec<_>>>()?;
                let nested = match node.child_by_field_name("body") {
                    Some(body) => named_children(body)
                        .into_iter()
                        .filter(|n| is_declaration(*n))
                        .map(|n| self.declaration(n, src))
                        .collect::<Result<Vec<_>>>()?,
                    None => Vec::new(),
                };
                Declaration::Record(RecordDeclaration {
                    name,
                    fields: sort_fields(fields),
                    nested,
                    source,
                })
            }
        };
        debug!(path = src.path(), name = decl.name(), "extracted declaration");
        Ok(decl)
    }

    fn component(&self, param: Node<'_>, src: &JavaSource) -> Result<RecordField> {
        if param.kind() != "formal_parameter" {
            return Err(src.unrecognized(param, "unsupported record component"));
        }
        let java_name = declared_name(param, src)
            .ok_or_else(|| src.unrecognized(param, "record component without a name"))?;
        let java_type = param
            .child_by_field_name("type")
            .ok_or_else(|| src.unrecognized(param, "record component without a type"))?;
        let type_expr = self.mapper.map(java_type, src)?;

        let mut non_null = false;
        let mut deprecated = false;
        for annotation in annotations(param) {
            match collapse_whitespace(src.text(annotation)).as_str() {
                NON_NULL => non_null = true,
                DEPRECATED => deprecated = true,
                other => debug!(path = src.path(), annotation = other, "ignored annotation"),
            }
        }

        let default = match &type_expr {
            _ if !non_null => None,
            PyType::Optional(_) => Some(PyDefault::NoValue),
            PyType::Tuple(_) => Some(PyDefault::EmptyTuple),
            _ => None,
        };

        Ok(RecordField {
            name: to_snake_case(java_name),
            type_expr,
            default,
            deprecated,
        })
    }
}

fn is_declaration(node: Node<'_>) -> bool {
    matches!(node.kind(), "record_declaration" | "enum_declaration")
}

/// Annotation nodes in a parameter's modifier list
fn annotations(param: Node<'_>) -> Vec<Node<'_>> {
    named_children(param)
        .into_iter()
        .filter(|n| n.kind() == "modifiers")
        .flat_map(named_children)
        .filter(|n| matches!(n.kind(), "annotation" | "marker_annotation"))
        .collect()
}

fn enum_constants(node: Node<'_>, src: &JavaSource) -> Vec<String> {
    node.child_by_field_name("body")
        .map(|body| {
            named_children(body)
                .into_iter()
                .filter(|n| n.kind() == "enum_constant")
                .filter_map(|n| declared_name(n, src).map(str::to_string))
                .collect()
        })
        .unwrap_or_default()
}

/// Fields without a default first, declaration order kept within each half
fn sort_fields(mut fields: Vec<RecordField>) -> Vec<RecordField> {
    fields.sort_by_key(|f| f.default.is_some());
    fields
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use pretty_assertions::assert_eq;

    fn record(decl: &Declaration) -> &RecordDeclaration {
        match decl {
            Declaration::Record(r) => r,
            Declaration::Enum(e) => panic!("expected record, got enum {}", e.name),
        }
    }

    fn fields(r: &RecordDeclaration) -> Vec<(String, String, Option<PyDefault>)> {
        r.fields
            .iter()
            .map(|f| (f.name.clone(), f.type_expr.to_string(), f.default))
            .collect()
    }

    #[test]
    fn test_top_level_record() {
        let src = JavaSource::parse(
            "json/JsonCallMessage.java",
            r#"package org.asamk.signal.json;

record JsonCallMessage(
        @JsonInclude(JsonInclude.Include.NON_NULL) Offer offerMessage,
        @JsonInclude(JsonInclude.Include.NON_NULL) List<IceUpdate> iceUpdateMessages,
        long timestamp
) {
    static JsonCallMessage from(CallMessage callMessage) { return null; }

    record Offer(long id, String type, String opaque) {}

    record IceUpdate(long id, String opaque) {}
}
"#,
        )
        .unwrap();

        let decls = RecordExtractor::new("Json").extract_top_level(&src).unwrap();
        assert_eq!(decls.len(), 1);
        let call = record(&decls[0]);
        assert_eq!(call.name, "CallMessage");
        assert_eq!(
            fields(call),
            vec![
                ("timestamp".into(), "int".into(), None),
                ("offer_message".into(), "Offer | None".into(), Some(PyDefault::NoValue)),
                (
                    "ice_update_messages".into(),
                    "tuple[IceUpdate | None, ...]".into(),
                    Some(PyDefault::EmptyTuple)
                ),
            ]
        );
        let nested: Vec<_> = call.nested.iter().map(Declaration::name).collect();
        assert_eq!(nested, ["Offer", "IceUpdate"]);
        assert_eq!(
            fields(record(&call.nested[0]))[1],
            ("type".into(), "str | None".into(), None)
        );
    }

    #[test]
    fn test_nested_prefixed_declarations() {
        let src = JavaSource::parse(
            "json/JsonSendMessageResult.java",
            r#"public record JsonSendMessageResult(JsonRecipientAddress recipientAddress, Type type) {
    public enum Type { SUCCESS, NETWORK_FAILURE, UNREGISTERED_FAILURE }
    record JsonProof(@Deprecated String destination, byte[] data) {}
}"#,
        )
        .unwrap();

        let decls = RecordExtractor::new("Json").extract_top_level(&src).unwrap();
        let result = record(&decls[0]);
        assert_eq!(
            fields(result)[0],
            ("recipient_address".into(), "RecipientAddress | None".into(), None)
        );
        assert_eq!(result.nested.len(), 2);
        match &result.nested[0] {
            Declaration::Enum(e) => {
                assert_eq!(e.name, "Type");
                assert_eq!(e.members, ["SUCCESS", "NETWORK_FAILURE", "UNREGISTERED_FAILURE"]);
            }
            other => panic!("expected enum, got {:?}", other),
        }
        let proof = record(&result.nested[1]);
        assert!(proof.fields[0].deprecated);
        assert_eq!(proof.fields[1].type_expr, PyType::Bytes);
    }

    #[test]
    fn test_records_nested_in_command() {
        let src = JavaSource::parse(
            "commands/GetUserStatusCommand.java",
            r#"public class GetUserStatusCommand implements JsonRpcLocalCommand {
    public String getName() { return "getUserStatus"; }
    private record JsonUserStatus(String recipient, String number, boolean isRegistered) {}
    private record Helper(String x) {}
}"#,
        )
        .unwrap();

        let extractor = RecordExtractor::new("Json");
        assert!(extractor.extract_top_level(&src).unwrap().is_empty());

        let decls = extractor.extract_nested(&src).unwrap();
        assert_eq!(decls.len(), 1);
        assert_eq!(decls[0].name(), "UserStatus");
        assert_eq!(
            fields(record(&decls[0]))[2],
            ("is_registered".into(), "bool".into(), None)
        );
    }

    #[test]
    fn test_unknown_annotation_is_ignored() {
        let src = JavaSource::parse(
            "json/JsonX.java",
            r#"record JsonX(@JsonProperty("y") String y) {}"#,
        )
        .unwrap();
        let decls = RecordExtractor::new("Json").extract_top_level(&src).unwrap();
        assert_eq!(fields(record(&decls[0]))[0].2, None);
    }

    #[test]
    fn test_non_null_on_primitive_has_no_default() {
        let src = JavaSource::parse(
            "json/JsonX.java",
            r#"record JsonX(@JsonInclude(JsonInclude.Include.NON_NULL) int n) {}"#,
        )
        .unwrap();
        let decls = RecordExtractor::new("Json").extract_top_level(&src).unwrap();
        assert_eq!(fields(record(&decls[0]))[0], ("n".into(), "int".into(), None));
    }

    #[test]
    fn test_unsupported_component_type_fails() {
        let src = JavaSource::parse(
            "json/JsonX.java",
            r#"record JsonX(Map<String, String> values) {}"#,
        )
        .unwrap();
        let err = RecordExtractor::new("Json").extract_top_level(&src).unwrap_err();
        assert!(matches!(err, Error::UnrecognizedSyntax { .. }));
    }
}
