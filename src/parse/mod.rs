//! Java source parsing via tree-sitter
//!
//! Upstream sources are parsed once into a [`JavaSource`], which owns the
//! text and the syntax tree. Extractors walk the tree through the helpers
//! in [`java`] and report positions through [`JavaSource::location`].

pub mod java;

use crate::error::{Error, Location, Result};
use tree_sitter::{Node, Parser, Tree};

pub use java::MethodCall;

/// A parsed upstream Java file
pub struct JavaSource {
    path: String,
    text: String,
    tree: Tree,
}

impl std::fmt::Debug for JavaSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JavaSource")
            .field("path", &self.path)
            .field("len", &self.text.len())
            .finish()
    }
}

impl JavaSource {
    /// Parse Java source text.
    ///
    /// `path` is only used for diagnostics and source links. Any syntax error
    /// reported by tree-sitter aborts with [`Error::CodeParse`].
    pub fn parse(path: impl Into<String>, text: impl Into<String>) -> Result<Self> {
        let path = path.into();
        let text = text.into();
        let tree = new_parser()?
            .parse(&text, None)
            .ok_or_else(|| Error::CodeParse(format!("{}: failed to parse source", path)))?;

        let source = Self { path, text, tree };
        if let Some(bad) = java::find_descendant(source.root(), |n| n.is_error() || n.is_missing())
        {
            return Err(Error::CodeParse(format!(
                "{}: syntax error near `{}`",
                source.location(bad),
                java::excerpt(source.text(bad))
            )));
        }
        Ok(source)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn source_text(&self) -> &str {
        &self.text
    }

    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text covered by `node`
    pub fn text(&self, node: Node<'_>) -> &str {
        node.utf8_text(self.text.as_bytes()).unwrap_or("")
    }

    pub fn location(&self, node: Node<'_>) -> Location {
        Location {
            path: self.path.clone(),
            line: node.start_position().row + 1,
        }
    }

    /// Hard failure for a shape the pattern tables do not cover
    pub fn unrecognized(&self, node: Node<'_>, what: &str) -> Error {
        Error::syntax(
            self.location(node),
            format!("{}: `{}`", what, java::excerpt(self.text(node))),
        )
    }
}

fn new_parser() -> Result<Parser> {
    let mut parser = Parser::new();
    parser
        .set_language(&tree_sitter_java::LANGUAGE.into())
        .map_err(|e| Error::CodeParse(format!("Failed to set language: {}", e)))?;
    Ok(parser)
}

/// Get raw tree-sitter S-expression for Java source
///
/// Useful when extending the pattern tables: shows the node kinds and field
/// names the extractors match against.
pub fn to_sexp(source: &str) -> Result<String> {
    let tree = new_parser()?
        .parse(source, None)
        .ok_or_else(|| Error::CodeParse("Failed to parse source".into()))?;
    Ok(tree.root_node().to_sexp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_class() {
        let src = JavaSource::parse(
            "Foo.java",
            "class Foo { String getName() { return \"foo\"; } }",
        )
        .unwrap();
        assert_eq!(src.root().kind(), "program");
        assert_eq!(src.path(), "Foo.java");
    }

    #[test]
    fn test_syntax_error_is_fatal() {
        let err = JavaSource::parse("Bad.java", "class Bad { void f( { }").unwrap_err();
        assert!(matches!(err, Error::CodeParse(msg) if msg.starts_with("Bad.java:")));
    }

    #[test]
    fn test_location_is_one_based() {
        let src = JavaSource::parse("A.java", "\nclass A {}\n").unwrap();
        let class = java::find_descendant(src.root(), |n| n.kind() == "class_declaration").unwrap();
        assert_eq!(src.location(class).line, 2);
        assert_eq!(src.location(class).to_string(), "A.java:2");
    }

    #[test]
    fn test_to_sexp() {
        let sexp = to_sexp("record JsonFoo(String bar) {}").unwrap();
        assert!(sexp.contains("record_declaration"));
        assert!(sexp.contains("formal_parameter"));
    }
}
