//! Declaration extraction from upstream Java sources
//!
//! - [`command`]: argparse4j registrations in `attachToSubparser` become
//!   [`CommandDeclaration`](crate::model::CommandDeclaration)s
//! - [`record`]: prefixed `record` / `enum` declarations become
//!   [`Declaration`](crate::model::Declaration)s
//!
//! Both extractors are table driven: a shape that no table entry matches is
//! an [`Error::UnrecognizedSyntax`](crate::Error::UnrecognizedSyntax), never
//! a silent skip.

pub mod command;
pub mod record;

pub use command::CommandExtractor;
pub use record::RecordExtractor;

use tree_sitter::Node;

use crate::parse::java::named_children;
use crate::parse::JavaSource;

/// Method `name` declared directly in a class body
pub(crate) fn find_method<'t>(class: Node<'t>, name: &str, src: &JavaSource) -> Option<Node<'t>> {
    let body = class.child_by_field_name("body")?;
    named_children(body).into_iter().find(|member| {
        member.kind() == "method_declaration"
            && member
                .child_by_field_name("name")
                .is_some_and(|n| src.text(n) == name)
    })
}

/// Text of a declaration's `name` field
pub(crate) fn declared_name<'s>(node: Node<'_>, src: &'s JavaSource) -> Option<&'s str> {
    node.child_by_field_name("name").map(|n| src.text(n))
}
