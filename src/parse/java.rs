//! Java syntax helpers
//!
//! Small, allocation-light queries over tree-sitter-java nodes: descendant
//! search, method-invocation views, call chains and constant string
//! evaluation.

use tree_sitter::Node;

use super::JavaSource;

/// Named children of `node`, skipping comments
pub fn named_children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| !is_comment(*c))
        .collect()
}

pub fn is_comment(node: Node<'_>) -> bool {
    matches!(node.kind(), "line_comment" | "block_comment")
}

/// First node in pre-order (including `node` itself) matching `pred`
pub fn find_descendant<'t>(node: Node<'t>, pred: impl Fn(Node<'t>) -> bool + Copy) -> Option<Node<'t>> {
    if pred(node) {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(|child| find_descendant(child, pred))
}

/// All outermost nodes below `node` matching `pred`.
///
/// Does not descend into a match, so a record nested in another matching
/// record is left to its parent.
pub fn find_outermost<'t>(node: Node<'t>, pred: impl Fn(Node<'t>) -> bool + Copy) -> Vec<Node<'t>> {
    fn walk<'t>(node: Node<'t>, pred: impl Fn(Node<'t>) -> bool + Copy, out: &mut Vec<Node<'t>>) {
        let mut cursor = node.walk();
        let children: Vec<_> = node.children(&mut cursor).collect();
        for child in children {
            if pred(child) {
                out.push(child);
            } else {
                walk(child, pred, out);
            }
        }
    }

    let mut out = Vec::new();
    walk(node, pred, &mut out);
    out
}

/// First line of a node's text, shortened for error messages
pub fn excerpt(text: &str) -> String {
    let line = text.lines().next().unwrap_or("").trim();
    if line.chars().count() > 80 {
        let cut: String = line.chars().take(77).collect();
        format!("{}...", cut)
    } else {
        line.to_string()
    }
}

/// A `method_invocation` node split into its parts
#[derive(Debug, Clone)]
pub struct MethodCall<'t> {
    pub node: Node<'t>,
    /// Receiver expression, absent for unqualified calls
    pub object: Option<Node<'t>>,
    pub name: String,
    pub arguments: Vec<Node<'t>>,
}

impl<'t> MethodCall<'t> {
    pub fn from_node(node: Node<'t>, src: &'t JavaSource) -> Option<Self> {
        if node.kind() != "method_invocation" {
            return None;
        }
        let name = src.text(node.child_by_field_name("name")?).to_string();
        let arguments = node
            .child_by_field_name("arguments")
            .map(named_children)
            .unwrap_or_default();
        Some(Self {
            node,
            object: node.child_by_field_name("object"),
            name,
            arguments,
        })
    }

    /// Whether the receiver is the plain identifier `ident`
    pub fn is_on(&self, ident: &str, src: &JavaSource) -> bool {
        self.object
            .is_some_and(|o| o.kind() == "identifier" && src.text(o) == ident)
    }

    /// Argument list text without parentheses, whitespace-normalized
    pub fn arguments_text(&self, src: &JavaSource) -> String {
        let joined = self
            .arguments
            .iter()
            .map(|a| src.text(*a))
            .collect::<Vec<_>>()
            .join(", ");
        collapse_whitespace(&joined)
    }
}

/// Calls chained onto `node`, innermost first.
///
/// For `a.addArgument("x").help("h").required(true)` starting at the
/// `addArgument` invocation this yields the `help` and `required` calls.
pub fn chained_calls<'t>(node: Node<'t>, src: &'t JavaSource) -> Vec<MethodCall<'t>> {
    let mut calls = Vec::new();
    let mut current = node;
    while let Some(parent) = current.parent() {
        if parent.kind() != "method_invocation"
            || parent.child_by_field_name("object") != Some(current)
        {
            break;
        }
        match MethodCall::from_node(parent, src) {
            Some(call) => calls.push(call),
            None => break,
        }
        current = parent;
    }
    calls
}

/// Evaluate a constant string expression: literals, `+` concatenation and
/// parentheses. Returns `None` for anything else.
pub fn eval_string(node: Node<'_>, src: &JavaSource) -> Option<String> {
    match node.kind() {
        "string_literal" => decode_string_literal(src.text(node)),
        "parenthesized_expression" => eval_string(*named_children(node).first()?, src),
        "binary_expression" => {
            let operator = node.child_by_field_name("operator")?;
            if src.text(operator) != "+" {
                return None;
            }
            let left = eval_string(node.child_by_field_name("left")?, src)?;
            let right = eval_string(node.child_by_field_name("right")?, src)?;
            Some(left + &right)
        }
        _ => None,
    }
}

/// Decode a Java string literal (including text blocks) to its value
pub fn decode_string_literal(literal: &str) -> Option<String> {
    let body = if let Some(inner) = literal
        .strip_prefix("\"\"\"")
        .and_then(|s| s.strip_suffix("\"\"\""))
    {
        inner.trim_start_matches([' ', '\t']).strip_prefix('\n').unwrap_or(inner)
    } else {
        literal.strip_prefix('"')?.strip_suffix('"')?
    };

    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{8}'),
            'f' => out.push('\u{c}'),
            's' => out.push(' '),
            '0' => out.push('\0'),
            'u' => {
                let hex: String = chars.by_ref().take(4).collect();
                out.push(char::from_u32(u32::from_str_radix(&hex, 16).ok()?)?);
            }
            '\n' => {}
            other => out.push(other),
        }
    }
    Some(out)
}

/// Collapse runs of whitespace to single spaces and trim
pub fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
