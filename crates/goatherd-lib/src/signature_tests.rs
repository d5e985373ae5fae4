use goatherd_core::FunctionRef;
use indoc::indoc;

use crate::diagnostics::Diagnostics;
use crate::program::Program;
use crate::signature::{FunctionSignature, parse_signature};
use crate::test_utils::{ROOT, program, resolver};
use crate::{Error, FatalKind};

fn signature_of(program: &Program, name: &str) -> (crate::Result<FunctionSignature>, Diagnostics) {
    let (_, decl) = program
        .function_declaration(&FunctionRef::new(ROOT, name))
        .expect("declared");
    let mut diagnostics = Diagnostics::new();
    let signature = parse_signature(decl, &resolver(program), &mut diagnostics);
    (signature, diagnostics)
}

fn render(signature: &FunctionSignature) -> String {
    let params: Vec<_> = signature
        .params
        .iter()
        .map(|p| format!("{} {}", p.name, p.ty))
        .collect();
    format!(
        "{}({}) error={}",
        signature.name,
        params.join(", "),
        signature.returns_error
    )
}

#[test]
fn named_parameters_in_order() {
    let program = program(indoc! {r#"
        package main

        import "github.com/tmr232/goat"

        func hello(ctx *goat.Context, a, b int, name string) error {
            return nil
        }
    "#});
    let (signature, diagnostics) = signature_of(&program, "hello");

    insta::assert_snapshot!(render(&signature.unwrap()), @"hello(ctx *github.com/tmr232/goat.Context, a int, b int, name string) error=true");
    assert!(diagnostics.is_empty());
}

#[test]
fn no_results() {
    let program = program(indoc! {r#"
        package main

        func hello() {}
    "#});
    let (signature, _) = signature_of(&program, "hello");

    insta::assert_snapshot!(render(&signature.unwrap()), @"hello() error=false");
}

#[test]
fn named_error_result() {
    let program = program(indoc! {r#"
        package main

        func hello() (err error) {
            return
        }
    "#});
    let (signature, _) = signature_of(&program, "hello");

    assert!(signature.unwrap().returns_error);
}

#[test]
fn multiple_results_are_fatal() {
    let program = program(indoc! {r#"
        package main

        func f() (int, error) {
            return 0, nil
        }
    "#});
    let (signature, _) = signature_of(&program, "f");
    let err = signature.unwrap_err();

    assert!(matches!(
        err,
        Error::Fatal {
            kind: FatalKind::UnsupportedResults,
            ..
        }
    ));
    insta::assert_snapshot!(err, @"main.go:3:10: action function `f` must return nothing or a single error, not `(int, error)`");
}

#[test]
fn non_error_result_is_fatal() {
    let program = program(indoc! {r#"
        package main

        func f() string {
            return ""
        }
    "#});
    let (signature, _) = signature_of(&program, "f");

    insta::assert_snapshot!(signature.unwrap_err(), @"main.go:3:10: action function `f` must return nothing or a single error, not `string`");
}

#[test]
fn type_parameters_are_fatal() {
    let program = program(indoc! {r#"
        package main

        func f[T any](x T) {}
    "#});
    let (signature, _) = signature_of(&program, "f");
    let err = signature.unwrap_err();

    assert!(matches!(
        err,
        Error::Fatal {
            kind: FatalKind::GenericAction,
            ..
        }
    ));
    insta::assert_snapshot!(err, @"main.go:3:7: action function `f` cannot have type parameters");
}

#[test]
fn unnamed_parameters_are_reported() {
    let program = program(indoc! {r#"
        package main

        func f(int, string) {}
    "#});
    let (signature, diagnostics) = signature_of(&program, "f");

    let signature = signature.unwrap();
    assert_eq!(signature.params.len(), 2);
    assert!(signature.params.iter().all(|p| p.name.is_empty()));
    assert_eq!(diagnostics.error_count(), 2);
    insta::assert_snapshot!(
        diagnostics.printer(program.sources()).snippets(false).render().trim_end(),
        @r"
    main.go:3:8: error: action parameters must be named: `int` in `f`
    main.go:3:13: error: action parameters must be named: `string` in `f`
    "
    );
}

#[test]
fn blank_parameters_are_reported() {
    let program = program(indoc! {r#"
        package main

        func f(_ string, _ int) {}
    "#});
    let (signature, diagnostics) = signature_of(&program, "f");

    assert_eq!(signature.unwrap().params.len(), 2);
    insta::assert_snapshot!(
        diagnostics.printer(program.sources()).snippets(false).render().trim_end(),
        @r"
    main.go:3:8: error: action parameters must be named: `string` in `f`
    main.go:3:18: error: action parameters must be named: `int` in `f`
    "
    );
}
