//! Command extraction from argparse4j registrations
//!
//! A command class is the first `class_declaration` implementing the RPC
//! marker interface. Its `getName()` constant names the command and the body
//! of `attachToSubparser(subparser)` registers the flags:
//!
//! ```java
//! var mut = subparser.addMutuallyExclusiveGroup().required(true);
//! mut.addArgument("-g", "--group-id").help("Specify the recipient group ID.");
//! subparser.addArgument("--delete").action(Arguments.storeTrue());
//! ```
//!
//! Statements go through [`STATEMENT_RULES`] and the calls chained onto each
//! `addArgument(...)` through [`CALL_RULES`], both in table order.

use tracing::{debug, warn};
use tree_sitter::Node;

use super::{declared_name, find_method};
use crate::config::{CommandsConfig, Converter};
use crate::error::{Error, Result};
use crate::model::{
    ArgumentDescriptor, ArgumentGroup, CommandDeclaration, GroupId, PyDefault, PyType, SourceRef,
};
use crate::parse::java::{
    chained_calls, collapse_whitespace, decode_string_literal, eval_string, find_descendant,
    named_children,
};
use crate::parse::{JavaSource, MethodCall};
use crate::util::{py_string, to_pascal_case};

/// Extracts [`CommandDeclaration`]s from command source files
#[derive(Debug, Clone)]
pub struct CommandExtractor<'c> {
    config: &'c CommandsConfig,
}

impl<'c> CommandExtractor<'c> {
    pub fn new(config: &'c CommandsConfig) -> Self {
        Self { config }
    }

    /// Extract the command declared in `src`.
    ///
    /// Returns `Ok(None)` for files without a command class, and for command
    /// classes missing `getName()` or `attachToSubparser()` (logged).
    pub fn extract(&self, src: &JavaSource) -> Result<Option<CommandDeclaration>> {
        let Some(class) = self.find_command_class(src) else {
            return Ok(None);
        };

        let Some(name) = command_name(class, src)? else {
            warn!(path = src.path(), "skipping command class without getName()");
            return Ok(None);
        };
        let Some(attach) = find_method(class, "attachToSubparser", src) else {
            warn!(
                path = src.path(),
                command = %name,
                "skipping command class without attachToSubparser()"
            );
            return Ok(None);
        };

        let subparser = first_parameter(attach, src)
            .ok_or_else(|| src.unrecognized(attach, "attachToSubparser() without parameters"))?;
        let body = attach
            .child_by_field_name("body")
            .ok_or_else(|| src.unrecognized(attach, "attachToSubparser() without a body"))?;

        let mut builder = CommandBuilder {
            config: self.config,
            src,
            command: name,
            subparser,
            help: None,
            arguments: Vec::new(),
            groups: Vec::new(),
        };
        for statement in named_children(body) {
            builder.dispatch(statement)?;
        }

        let command = builder.finish();
        debug!(
            command = %command.name,
            arguments = command.arguments.len(),
            groups = command.groups.len(),
            "extracted command"
        );
        Ok(Some(command))
    }

    fn find_command_class<'t>(&self, src: &'t JavaSource) -> Option<Node<'t>> {
        let interface = self.config.interface.as_str();
        find_descendant(src.root(), |n| {
            n.kind() == "class_declaration" && implements(n, interface, src)
        })
    }
}

fn implements(class: Node<'_>, interface: &str, src: &JavaSource) -> bool {
    class
        .child_by_field_name("interfaces")
        .and_then(|list| {
            find_descendant(list, |t| t.kind() == "type_identifier" && src.text(t) == interface)
        })
        .is_some()
}

/// PascalCase name from the constant returned by `getName()`
fn command_name(class: Node<'_>, src: &JavaSource) -> Result<Option<String>> {
    let Some(method) = find_method(class, "getName", src) else {
        return Ok(None);
    };
    method
        .child_by_field_name("body")
        .and_then(|body| find_descendant(body, |n| n.kind() == "return_statement"))
        .and_then(|ret| named_children(ret).into_iter().next())
        .and_then(|value| eval_string(value, src))
        .map(|name| Some(to_pascal_case(&name)))
        .ok_or_else(|| src.unrecognized(method, "getName() must return a string constant"))
}

fn first_parameter(method: Node<'_>, src: &JavaSource) -> Option<String> {
    let params = method.child_by_field_name("parameters")?;
    let first = named_children(params)
        .into_iter()
        .find(|p| p.kind() == "formal_parameter")?;
    declared_name(first, src).map(str::to_string)
}

fn is_call_named(node: Node<'_>, name: &str, src: &JavaSource) -> bool {
    node.kind() == "method_invocation"
        && node
            .child_by_field_name("name")
            .is_some_and(|id| src.text(id) == name)
}

// ============================================================================
// Statement rules
// ============================================================================

/// Accumulates one command while its registration statements are walked
struct CommandBuilder<'a> {
    config: &'a CommandsConfig,
    src: &'a JavaSource,
    command: String,
    subparser: String,
    help: Option<String>,
    arguments: Vec<ArgumentDescriptor>,
    groups: Vec<ArgumentGroup>,
}

/// Returns `Ok(true)` when the statement was consumed
type StatementRule = for<'a> fn(&mut CommandBuilder<'a>, Node<'a>) -> Result<bool>;

/// Tried top to bottom; a statement no rule consumes is a hard failure
const STATEMENT_RULES: &[(&str, StatementRule)] = &[
    ("command help", help_statement),
    ("argument registration", argument_statement),
    ("exclusive group", group_statement),
];

impl<'a> CommandBuilder<'a> {
    fn dispatch(&mut self, statement: Node<'a>) -> Result<()> {
        for (label, rule) in STATEMENT_RULES {
            if rule(self, statement)? {
                debug!(command = %self.command, rule = *label, "statement");
                return Ok(());
            }
        }
        Err(self
            .src
            .unrecognized(statement, "unhandled statement in attachToSubparser()"))
    }

    /// Group an `addArgument` call was made on
    fn container(&self, call: &MethodCall<'_>) -> Result<GroupId> {
        let object = call
            .object
            .filter(|o| o.kind() == "identifier")
            .ok_or_else(|| self.src.unrecognized(call.node, "addArgument() on an expression"))?;
        let variable = self.src.text(object);
        if variable == self.subparser {
            Ok(GroupId::Default)
        } else if self.groups.iter().any(|g| g.name == variable) {
            Ok(GroupId::Named(variable.to_string()))
        } else {
            Err(self.src.unrecognized(
                object,
                &format!("argument registered on undeclared group `{}`", variable),
            ))
        }
    }

    fn finish(self) -> CommandDeclaration {
        CommandDeclaration {
            output_type: self.config.output_for(&self.command).to_string(),
            name: self.command,
            help: self.help,
            arguments: self.arguments,
            groups: self.groups,
            source: SourceRef::new(self.src.path()),
        }
    }
}

/// `subparser.help("...");`
fn help_statement<'a>(b: &mut CommandBuilder<'a>, statement: Node<'a>) -> Result<bool> {
    if statement.kind() != "expression_statement" {
        return Ok(false);
    }
    let Some(call) = named_children(statement)
        .first()
        .and_then(|n| MethodCall::from_node(*n, b.src))
    else {
        return Ok(false);
    };
    if call.name != "help" || !call.is_on(&b.subparser, b.src) {
        return Ok(false);
    }

    let [text] = call.arguments.as_slice() else {
        return Err(b.src.unrecognized(statement, "help() takes one argument"));
    };
    let text = eval_string(*text, b.src)
        .ok_or_else(|| b.src.unrecognized(*text, "command help must be a string constant"))?;
    b.help = Some(collapse_whitespace(&text));
    Ok(true)
}

/// Any statement containing `<container>.addArgument(...)`
fn argument_statement<'a>(b: &mut CommandBuilder<'a>, statement: Node<'a>) -> Result<bool> {
    let src = b.src;
    let Some(node) = find_descendant(statement, |n| is_call_named(n, "addArgument", src)) else {
        return Ok(false);
    };
    let call = MethodCall::from_node(node, src)
        .ok_or_else(|| src.unrecognized(node, "malformed addArgument() call"))?;

    let group = b.container(&call)?;
    let (name, positional) = argument_name(&call, src)?;
    let mut argument = ArgumentDescriptor::new(group, name);
    argument.is_optional = !positional;

    for chained in chained_calls(node, src) {
        apply_call(b.config, &mut argument, &chained, src)?;
    }
    finalize(&mut argument);

    if b.config.is_excluded(&b.command, &argument.name) {
        debug!(command = %b.command, argument = %argument.name, "excluded by configuration");
        return Ok(true);
    }

    if let GroupId::Named(variable) = &argument.group {
        if let Some(group) = b.groups.iter_mut().find(|g| &g.name == variable) {
            group.members.push(argument.name.clone());
        }
    }
    b.arguments.push(argument);
    Ok(true)
}

/// `var g = subparser.addMutuallyExclusiveGroup()[.required(true)];`
fn group_statement<'a>(b: &mut CommandBuilder<'a>, statement: Node<'a>) -> Result<bool> {
    if statement.kind() != "local_variable_declaration" {
        return Ok(false);
    }
    let Some(declarator) = statement.child_by_field_name("declarator") else {
        return Ok(false);
    };
    let (Some(variable), Some(value)) = (
        declared_name(declarator, b.src),
        declarator.child_by_field_name("value"),
    ) else {
        return Ok(false);
    };
    let Some(outer) = MethodCall::from_node(value, b.src) else {
        return Ok(false);
    };

    let (create, required) = if outer.name == "required" {
        let Some(inner) = outer.object.and_then(|o| MethodCall::from_node(o, b.src)) else {
            return Ok(false);
        };
        let required = match outer.arguments_text(b.src).as_str() {
            "true" => true,
            "false" => false,
            _ => return Err(b.src.unrecognized(value, "required() takes a boolean literal")),
        };
        (inner, required)
    } else {
        (outer, false)
    };

    if create.name != "addMutuallyExclusiveGroup" || !create.is_on(&b.subparser, b.src) {
        return Ok(false);
    }
    if b.groups.iter().any(|g| g.name == variable) {
        return Err(Error::inconsistent(
            b.command.as_str(),
            format!("exclusive group `{}` declared twice", variable),
        ));
    }
    b.groups.push(ArgumentGroup::exclusive(variable, required));
    Ok(true)
}

/// Field name from the first long flag or positional name, and whether it is positional
fn argument_name(call: &MethodCall<'_>, src: &JavaSource) -> Result<(String, bool)> {
    call.arguments
        .iter()
        .filter(|n| n.kind() == "string_literal")
        .filter_map(|n| decode_string_literal(src.text(*n)))
        .find(|flag| flag.starts_with("--") || !flag.starts_with('-'))
        .map(|flag| {
            let positional = !flag.starts_with('-');
            (flag.trim_start_matches('-').replace('-', "_"), positional)
        })
        .ok_or_else(|| src.unrecognized(call.node, "addArgument() without a long flag or name"))
}

/// Still-optional fields without a default become `T | None = None`
fn finalize(argument: &mut ArgumentDescriptor) {
    if argument.is_optional && !argument.has_default() {
        argument.type_expr = argument.type_expr.clone().optional();
        argument.default = Some(PyDefault::NoValue);
    }
}

// ============================================================================
// Chained call rules
// ============================================================================

type CallRule =
    fn(&CommandsConfig, &mut ArgumentDescriptor, &MethodCall<'_>, &JavaSource) -> Result<()>;

/// Chained configuration calls by method name
const CALL_RULES: &[(&str, CallRule)] = &[
    ("help", apply_help),
    ("action", apply_action),
    ("choices", apply_choices),
    ("type", apply_type),
    ("nargs", apply_nargs),
    ("required", apply_required),
];

fn apply_call(
    config: &CommandsConfig,
    argument: &mut ArgumentDescriptor,
    call: &MethodCall<'_>,
    src: &JavaSource,
) -> Result<()> {
    match CALL_RULES.iter().find(|(name, _)| *name == call.name) {
        Some((_, rule)) => rule(config, argument, call, src),
        None if config.ignored_calls.contains(&call.name) => {
            debug!(argument = %argument.name, call = %call.name, "ignored call");
            Ok(())
        }
        None => Err(src.unrecognized(
            call.node,
            &format!("unsupported call .{}() on argument `{}`", call.name, argument.name),
        )),
    }
}

fn single_string(call: &MethodCall<'_>, src: &JavaSource) -> Result<String> {
    match call.arguments.as_slice() {
        [arg] => eval_string(*arg, src).ok_or_else(|| {
            src.unrecognized(*arg, &format!(".{}() needs a string constant", call.name))
        }),
        _ => Err(src.unrecognized(
            call.node,
            &format!(".{}() takes exactly one argument", call.name),
        )),
    }
}

fn apply_help(
    _: &CommandsConfig,
    argument: &mut ArgumentDescriptor,
    call: &MethodCall<'_>,
    src: &JavaSource,
) -> Result<()> {
    argument.documentation = Some(collapse_whitespace(&single_string(call, src)?));
    Ok(())
}

fn apply_action(
    _: &CommandsConfig,
    argument: &mut ArgumentDescriptor,
    call: &MethodCall<'_>,
    src: &JavaSource,
) -> Result<()> {
    if call.arguments_text(src) != "Arguments.storeTrue()" {
        return Err(src.unrecognized(call.node, "unsupported argument action"));
    }
    argument.type_expr = PyType::Bool;
    argument.is_optional = false;
    argument.default = Some(PyDefault::False);
    Ok(())
}

fn apply_choices(
    _: &CommandsConfig,
    argument: &mut ArgumentDescriptor,
    call: &MethodCall<'_>,
    src: &JavaSource,
) -> Result<()> {
    let values = call
        .arguments
        .iter()
        .map(|arg| {
            eval_string(*arg, src)
                .map(|v| py_string(&v))
                .ok_or_else(|| src.unrecognized(*arg, "choices must be string constants"))
        })
        .collect::<Result<Vec<_>>>()?;
    if values.is_empty() {
        return Err(src.unrecognized(call.node, "choices() without values"));
    }
    argument.type_expr = argument.type_expr.clone().with_element(PyType::Literal(values));
    Ok(())
}

fn apply_type(
    config: &CommandsConfig,
    argument: &mut ArgumentDescriptor,
    call: &MethodCall<'_>,
    src: &JavaSource,
) -> Result<()> {
    let converter = call.arguments_text(src);
    let element = match config.converter(&converter) {
        Some(Converter::Int) => PyType::Int,
        Some(Converter::Float) => PyType::Float,
        Some(Converter::Bool) => PyType::Bool,
        Some(Converter::Str) => PyType::Str,
        Some(Converter::Choices { values }) => {
            PyType::Literal(values.iter().map(|v| py_string(v)).collect())
        }
        None => {
            return Err(src.unrecognized(
                call.node,
                &format!("unknown type converter `{}`", converter),
            ))
        }
    };
    argument.type_expr = argument.type_expr.clone().with_element(element);
    Ok(())
}

fn apply_nargs(
    _: &CommandsConfig,
    argument: &mut ArgumentDescriptor,
    call: &MethodCall<'_>,
    src: &JavaSource,
) -> Result<()> {
    let element = Box::new(argument.type_expr.clone());
    match single_string(call, src)?.as_str() {
        "*" => {
            argument.type_expr = PyType::Tuple(element);
            argument.default = Some(PyDefault::EmptyTuple);
        }
        "+" => {
            argument.type_expr = PyType::NonEmptyTuple(element);
        }
        other => {
            return Err(src.unrecognized(call.node, &format!("unsupported arity {:?}", other)))
        }
    }
    argument.name.push('s');
    argument.is_optional = false;
    Ok(())
}

fn apply_required(
    _: &CommandsConfig,
    argument: &mut ArgumentDescriptor,
    call: &MethodCall<'_>,
    src: &JavaSource,
) -> Result<()> {
    match call.arguments_text(src).as_str() {
        "true" => argument.is_optional = false,
        "false" => {}
        _ => return Err(src.unrecognized(call.node, "required() takes a boolean literal")),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn command_source(body: &str) -> String {
        format!(
            r#"package org.asamk.signal.commands;

public class FooCommand implements JsonRpcLocalCommand {{
    @Override
    public String getName() {{
        return "fooBar";
    }}

    @Override
    public void attachToSubparser(final Subparser subparser) {{
{}
    }}
}}
"#,
            body
        )
    }

    fn extract_with(config: &CommandsConfig, body: &str) -> Result<Option<CommandDeclaration>> {
        let src = JavaSource::parse("commands/FooCommand.java", command_source(body))?;
        CommandExtractor::new(config).extract(&src)
    }

    fn extract(body: &str) -> CommandDeclaration {
        extract_with(&CommandsConfig::default(), body)
            .unwrap()
            .expect("command class")
    }

    fn field(cmd: &CommandDeclaration, name: &str) -> (String, Option<PyDefault>, bool) {
        let arg = cmd.argument(name).unwrap_or_else(|| panic!("no argument {}", name));
        (arg.type_expr.to_string(), arg.default, arg.is_optional)
    }

    #[test]
    fn test_name_and_help() {
        let cmd = extract(r#"subparser.help("Do the " + "foo thing.");"#);
        assert_eq!(cmd.name, "FooBar");
        assert_eq!(cmd.help.as_deref(), Some("Do the foo thing."));
        assert_eq!(cmd.output_type, "Empty");
        assert_eq!(cmd.source.path, "commands/FooCommand.java");
        assert!(cmd.arguments.is_empty());
    }

    #[test]
    fn test_store_true_flag() {
        let cmd = extract(
            r#"subparser.addArgument("--delete")
                .help("Delete local group data completely after quitting group.")
                .action(Arguments.storeTrue());"#,
        );
        assert_eq!(field(&cmd, "delete"), ("bool".into(), Some(PyDefault::False), false));
        assert_eq!(
            cmd.argument("delete").unwrap().documentation.as_deref(),
            Some("Delete local group data completely after quitting group.")
        );
    }

    #[test]
    fn test_optional_flag_becomes_nullable() {
        let cmd = extract(r#"subparser.addArgument("-n", "--name").help("New name");"#);
        assert_eq!(field(&cmd, "name"), ("str | None".into(), Some(PyDefault::NoValue), true));
    }

    #[test]
    fn test_required_flag() {
        let cmd = extract(r#"subparser.addArgument("--uri").required(true);"#);
        assert_eq!(field(&cmd, "uri"), ("str".into(), None, false));
    }

    #[test]
    fn test_one_or_more_stays_mandatory() {
        let cmd = extract(r#"subparser.addArgument("--uri").nargs("+").help("Sticker pack uri");"#);
        assert_eq!(field(&cmd, "uris"), ("NonEmptyTuple[str]".into(), None, false));
        assert!(cmd.argument("uri").is_none());
    }

    #[test]
    fn test_zero_or_more_defaults_to_empty_tuple() {
        let cmd = extract(r#"subparser.addArgument("recipient").nargs("*");"#);
        assert_eq!(
            field(&cmd, "recipients"),
            ("tuple[str, ...]".into(), Some(PyDefault::EmptyTuple), false)
        );
    }

    #[test]
    fn test_positional_is_mandatory() {
        let cmd = extract(r#"subparser.addArgument("number").help("The new phone number");"#);
        assert_eq!(field(&cmd, "number"), ("str".into(), None, false));
    }

    #[test]
    fn test_long_flag_wins_over_short() {
        let cmd = extract(r#"subparser.addArgument("-g", "--group-id", "--group");"#);
        assert!(cmd.argument("group_id").is_some());
    }

    #[test]
    fn test_type_after_nargs_keeps_wrapper() {
        let cmd = extract(r#"subparser.addArgument("--timestamp").nargs("+").type(long.class);"#);
        assert_eq!(field(&cmd, "timestamps").0, "NonEmptyTuple[int]");

        let cmd = extract(r#"subparser.addArgument("--timestamp").type(long.class).nargs("+");"#);
        assert_eq!(field(&cmd, "timestamps").0, "NonEmptyTuple[int]");
    }

    #[test]
    fn test_choices_and_enum_converter() {
        let cmd = extract(
            r#"subparser.addArgument("--type").choices("read", "viewed").required(true);
               subparser.addArgument("--response")
                   .type(Arguments.enumStringType(MessageRequestResponseType.class))
                   .required(true);"#,
        );
        assert_eq!(field(&cmd, "type").0, r#"Literal["read", "viewed"]"#);
        assert_eq!(field(&cmd, "response").0, r#"Literal["accept", "delete"]"#);
    }

    #[test]
    fn test_exclusive_groups() {
        let cmd = extract(
            r#"var mut = subparser.addMutuallyExclusiveGroup().required(true);
               mut.addArgument("-r", "--recipient").help("Sender");
               mut.addArgument("-g", "--group-id").help("Group");
               final var other = subparser.addMutuallyExclusiveGroup();
               other.addArgument("--hide").action(Arguments.storeTrue());
               other.addArgument("--forget").action(Arguments.storeTrue());"#,
        );
        assert_eq!(
            cmd.groups,
            vec![
                ArgumentGroup {
                    name: "mut".into(),
                    is_mutually_exclusive: true,
                    is_required: true,
                    members: vec!["recipient".into(), "group_id".into()],
                },
                ArgumentGroup {
                    name: "other".into(),
                    is_mutually_exclusive: true,
                    is_required: false,
                    members: vec!["hide".into(), "forget".into()],
                },
            ]
        );
        assert_eq!(cmd.argument("recipient").unwrap().group, GroupId::Named("mut".into()));
    }

    #[test]
    fn test_exclusion_table_drops_member() {
        let mut config = CommandsConfig::default();
        config
            .excluded_args
            .entry("FooBar".into())
            .or_default()
            .insert("message_from_stdin".into());
        let cmd = extract_with(
            &config,
            r#"var mut = subparser.addMutuallyExclusiveGroup().required(true);
               mut.addArgument("-m", "--message").help("Message");
               mut.addArgument("--message-from-stdin").action(Arguments.storeTrue());"#,
        )
        .unwrap()
        .unwrap();

        assert!(cmd.argument("message_from_stdin").is_none());
        assert_eq!(cmd.group("mut").unwrap().members, vec!["message".to_string()]);
    }

    #[test]
    fn test_comments_are_skipped() {
        let cmd = extract(
            r#"// the recipient
               subparser.addArgument("--recipient"); /* trailing */"#,
        );
        assert_eq!(cmd.arguments.len(), 1);
    }

    #[test]
    fn test_unknown_statement_fails() {
        let err = extract_with(&CommandsConfig::default(), "int x = 1;").unwrap_err();
        assert!(matches!(err, Error::UnrecognizedSyntax { .. }), "{:?}", err);
    }

    #[test]
    fn test_unknown_call_fails_unless_ignored() {
        let body = r#"subparser.addArgument("--file").type(Arguments.fileType()).metavar("FILE");"#;
        let mut config = CommandsConfig::default();
        config
            .converters
            .insert("Arguments.fileType()".into(), Converter::Str);

        let err = extract_with(&config, body).unwrap_err();
        match err {
            Error::UnrecognizedSyntax { location, message } => {
                assert_eq!(location.path, "commands/FooCommand.java");
                assert!(message.contains(".metavar()"), "{}", message);
            }
            other => panic!("unexpected error {:?}", other),
        }

        config.ignored_calls.insert("metavar".into());
        let cmd = extract_with(&config, body).unwrap().unwrap();
        assert_eq!(field(&cmd, "file").0, "str | None");
    }

    #[test]
    fn test_undeclared_group_fails() {
        let err = extract_with(
            &CommandsConfig::default(),
            r#"mut.addArgument("--recipient");"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnrecognizedSyntax { message, .. } if message.contains("`mut`")));
    }

    #[test]
    fn test_unknown_converter_fails() {
        let err = extract_with(
            &CommandsConfig::default(),
            r#"subparser.addArgument("--when").type(Instant.class);"#,
        )
        .unwrap_err();
        assert!(matches!(err, Error::UnrecognizedSyntax { .. }));
    }

    #[test]
    fn test_non_command_class_is_ignored() {
        let src = JavaSource::parse(
            "commands/Util.java",
            "public class Util implements Command { public String getName() { return \"x\"; } }",
        )
        .unwrap();
        assert!(CommandExtractor::new(&CommandsConfig::default())
            .extract(&src)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_missing_get_name_is_skipped() {
        let src = JavaSource::parse(
            "commands/Anon.java",
            "public class Anon implements JsonRpcLocalCommand { public void attachToSubparser(Subparser s) {} }",
        )
        .unwrap();
        assert!(CommandExtractor::new(&CommandsConfig::default())
            .extract(&src)
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_output_type_from_config() {
        let mut config = CommandsConfig::default();
        config
            .outputs
            .insert("FooBar".into(), "list[Group]".into());
        let cmd = extract_with(&config, "").unwrap().unwrap();
        assert_eq!(cmd.output_type, "list[Group]");
    }
}
