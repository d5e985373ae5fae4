use indoc::indoc;

use crate::matcher::Pattern;
use crate::syntax;
use crate::test_utils::{calls, main_file, program};

fn method_call() -> Pattern {
    Pattern::node("call_expression")
        .field(
            "function",
            Pattern::node("selector_expression")
                .field("operand", Pattern::Any.capture("operand"))
                .field("field", Pattern::node("field_identifier").capture("method")),
        )
        .field("arguments", Pattern::node("argument_list").capture("args"))
}

#[test]
fn display_as_sexpr() {
    insta::assert_snapshot!(method_call(), @"(call_expression function: (selector_expression operand: _ @operand field: (field_identifier) @method) arguments: (argument_list) @args)");

    let alt = Pattern::Alt(vec![
        Pattern::node("identifier").text("goat"),
        Pattern::Any,
    ]);
    insta::assert_snapshot!(alt, @r#"[(identifier "goat") _]"#);
}

#[test]
fn captures_in_pattern_order() {
    let program = program(indoc! {r#"
        package main

        func main() {
            goat.Flag(name)
        }
    "#});
    let source = program.source(main_file());
    let call = calls(&program)[0];

    let captures = method_call().matches(call, source).expect("matches");
    let rendered: Vec<_> = captures
        .iter()
        .map(|(name, node)| format!("{name}={}", syntax::text(*node, source)))
        .collect();
    assert_eq!(rendered, ["operand=goat", "method=Flag", "args=(name)"]);
}

#[test]
fn plain_call_does_not_match() {
    let program = program(indoc! {r#"
        package main

        func main() {
            hello(name)
        }
    "#});
    let source = program.source(main_file());
    let call = calls(&program)[0];

    assert!(method_call().matches(call, source).is_none());
}

#[test]
fn parentheses_are_transparent() {
    let program = program(indoc! {r#"
        package main

        func main() {
            ((goat).Flag)(name)
        }
    "#});
    let source = program.source(main_file());
    let call = calls(&program)[0];

    let captures = method_call().matches(call, source).expect("matches");
    assert_eq!(syntax::text(captures["operand"], source), "goat");
    assert_eq!(captures["operand"].kind(), "identifier");
}

#[test]
fn parenthesized_kind_is_matched_literally() {
    let program = program(indoc! {r#"
        package main

        var x = (y)
    "#});
    let source = program.source(main_file());
    let root = program.file(main_file()).root();
    let paren = crate::walk::descendants_of_kind(root, "parenthesized_expression")
        .next()
        .unwrap();

    assert!(Pattern::node("parenthesized_expression").matches(paren, source).is_some());
    assert!(Pattern::node("identifier").matches(paren, source).is_some());
}

#[test]
fn text_constraint() {
    let program = program(indoc! {r#"
        package main

        func main() {
            goat.Run(hello)
        }
    "#});
    let source = program.source(main_file());
    let call = calls(&program)[0];

    let run = Pattern::node("call_expression").field(
        "function",
        Pattern::node("selector_expression").field(
            "field",
            Pattern::node("field_identifier").text("Run"),
        ),
    );
    let command = Pattern::node("call_expression").field(
        "function",
        Pattern::node("selector_expression").field(
            "field",
            Pattern::node("field_identifier").text("Command"),
        ),
    );
    assert!(run.matches(call, source).is_some());
    assert!(command.matches(call, source).is_none());
}

#[test]
fn first_matching_alternative_wins() {
    let program = program(indoc! {r#"
        package main

        func main() {
            goat.Run(cmds.Hello)
        }
    "#});
    let source = program.source(main_file());
    let arg = syntax::children(calls(&program)[0].child_by_field_name("arguments").unwrap())[0];

    let target = Pattern::Alt(vec![
        Pattern::node("identifier").capture("func"),
        Pattern::node("selector_expression")
            .field("operand", Pattern::node("identifier").capture("package"))
            .field("field", Pattern::node("field_identifier").capture("func")),
    ]);
    let captures = target.matches(arg, source).expect("matches");
    assert_eq!(syntax::text(captures["package"], source), "cmds");
    assert_eq!(syntax::text(captures["func"], source), "Hello");
}

#[test]
fn missing_field_fails() {
    let program = program(indoc! {r#"
        package main

        func main() {
            goat.Run(hello)
        }
    "#});
    let source = program.source(main_file());
    let call = calls(&program)[0];

    let pattern = Pattern::node("call_expression").field("type_arguments", Pattern::Any);
    assert!(pattern.matches(call, source).is_none());
}
