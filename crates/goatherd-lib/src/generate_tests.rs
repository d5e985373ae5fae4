use indoc::indoc;

use crate::test_utils::{ROOT, generation_error, model_json};
use crate::{Config, Program, generate};

#[test]
fn undescribed_parameter_becomes_required_flag() {
    let json = model_json(indoc! {r#"
        package main

        import "github.com/tmr232/goat"

        func f(name string) {
        }

        func main() {
            goat.Run(f)
        }
    "#});

    insta::assert_snapshot!(json, @r#"
    {
      "package": {
        "name": "main",
        "path": "example.com/app"
      },
      "actions": [
        {
          "function": {
            "package": "example.com/app",
            "name": "f"
          },
          "reference": "f",
          "name": "\"f\"",
          "usage": "\"\"",
          "returns_error": false,
          "arguments": [
            {
              "role": "flag",
              "param": "name",
              "type": "string",
              "kind": "string",
              "name": "\"name\"",
              "usage": "\"\"",
              "default": "required"
            }
          ]
        }
      ]
    }
    "#);
}

#[test]
fn usage_and_default_override_flag() {
    let json = model_json(indoc! {r#"
        package main

        import "github.com/tmr232/goat"

        func f(name string) {
            goat.Flag(name).Usage("greeting target").Default("world")
        }

        func main() {
            goat.Run(f)
        }
    "#});

    insta::assert_snapshot!(json, @r#"
    {
      "package": {
        "name": "main",
        "path": "example.com/app"
      },
      "actions": [
        {
          "function": {
            "package": "example.com/app",
            "name": "f"
          },
          "reference": "f",
          "name": "\"f\"",
          "usage": "\"\"",
          "returns_error": false,
          "arguments": [
            {
              "role": "flag",
              "param": "name",
              "type": "string",
              "kind": "string",
              "name": "\"name\"",
              "usage": "\"greeting target\"",
              "default": {
                "value": "\"world\""
              }
            }
          ]
        }
      ]
    }
    "#);
}

#[test]
fn flags_follow_parameter_order() {
    let json = model_json(indoc! {r#"
        package main

        import "github.com/tmr232/goat"

        func f(name string, bye bool) error {
            goat.Flag(bye).Name("goodbye")
            return nil
        }

        func main() {
            goat.RunE(f)
        }
    "#});

    insta::assert_snapshot!(json, @r#"
    {
      "package": {
        "name": "main",
        "path": "example.com/app"
      },
      "actions": [
        {
          "function": {
            "package": "example.com/app",
            "name": "f"
          },
          "reference": "f",
          "name": "\"f\"",
          "usage": "\"\"",
          "returns_error": true,
          "arguments": [
            {
              "role": "flag",
              "param": "name",
              "type": "string",
              "kind": "string",
              "name": "\"name\"",
              "usage": "\"\"",
              "default": "required"
            },
            {
              "role": "flag",
              "param": "bye",
              "type": "bool",
              "kind": "bool",
              "name": "\"goodbye\"",
              "usage": "\"\"",
              "default": "required"
            }
          ]
        }
      ]
    }
    "#);
}

#[test]
fn duplicate_usage_aborts() {
    let err = generation_error(indoc! {r#"
        package main

        import "github.com/tmr232/goat"

        func f(name string) {
            goat.Flag(name).Usage("a").Usage("b")
        }

        func main() {
            goat.Run(f)
        }
    "#});

    insta::assert_snapshot!(err, @r"
    analysis failed with 1 errors
    main.go:6:32: error: `Usage` is specified more than once
    main.go:6:21: note: first specified here
    ");
}

#[test]
fn function_literal_target_is_fatal() {
    let err = generation_error(indoc! {r#"
        package main

        import "github.com/tmr232/goat"

        func main() {
            goat.Run(func() {})
        }
    "#});

    insta::assert_snapshot!(err, @"main.go:6:14: goat.Run only accepts free functions");
}

#[test]
fn self_descriptor_names_action() {
    let json = model_json(indoc! {r#"
        package main

        import "github.com/tmr232/goat"

        // greet says hello.
        func greet() {
            goat.Self().Name("hello").Usage("Says hello")
        }

        func main() {
            goat.Run(greet)
        }
    "#});

    insta::assert_snapshot!(json, @r#"
    {
      "package": {
        "name": "main",
        "path": "example.com/app"
      },
      "actions": [
        {
          "function": {
            "package": "example.com/app",
            "name": "greet"
          },
          "reference": "greet",
          "name": "\"hello\"",
          "usage": "\"Says hello\"",
          "returns_error": false,
          "arguments": []
        }
      ]
    }
    "#);
}

#[test]
fn doc_comment_is_usage_fallback() {
    let json = model_json(indoc! {r#"
        package main

        import "github.com/tmr232/goat"

        // greet says hello.
        func greet() {
        }

        func main() {
            goat.Run(greet)
        }
    "#});

    assert!(json.contains(r#""usage": "\"says hello.\"""#), "{json}");
    assert!(json.contains(r#""name": "\"greet\"""#), "{json}");
}

#[test]
fn partial_self_descriptor_ignores_doc_comment() {
    let json = model_json(indoc! {r#"
        package main

        import "github.com/tmr232/goat"

        // greet says hello.
        func greet() {
            goat.Self().Name("hi")
        }

        func main() {
            goat.Run(greet)
        }
    "#});

    assert!(json.contains(r#""name": "\"hi\"""#), "{json}");
    assert!(json.contains(r#""usage": "\"\"""#), "{json}");
}

#[test]
fn context_parameter_is_not_a_flag() {
    let json = model_json(indoc! {r#"
        package main

        import "github.com/tmr232/goat"

        func f(ctx *goat.Context, times int) error {
            goat.Flag(ctx).Usage("ignored")
            goat.Flag(times).Default(1)
            return nil
        }

        func main() {
            goat.RunE(f)
        }
    "#});

    insta::assert_snapshot!(json, @r#"
    {
      "package": {
        "name": "main",
        "path": "example.com/app"
      },
      "actions": [
        {
          "function": {
            "package": "example.com/app",
            "name": "f"
          },
          "reference": "f",
          "name": "\"f\"",
          "usage": "\"\"",
          "returns_error": true,
          "arguments": [
            {
              "role": "context",
              "param": "ctx"
            },
            {
              "role": "flag",
              "param": "times",
              "type": "int",
              "kind": "int",
              "name": "\"times\"",
              "usage": "\"\"",
              "default": {
                "value": "1"
              }
            }
          ]
        }
      ]
    }
    "#);
}

#[test]
fn commands_register_each_function_once() {
    let program = crate::test_utils::program(indoc! {r#"
        package main

        import "github.com/tmr232/goat"

        func app() {}

        func hello() {}

        func bye() {}

        func main() {
            goat.Command(app,
                goat.Command(hello),
                goat.Command(bye),
                goat.Command(hello),
            ).Run()
        }
    "#});
    let generated = generate(&program, &Config::default()).unwrap();

    let names: Vec<_> = generated
        .generation
        .actions
        .iter()
        .map(|a| a.function.name.as_str())
        .collect();
    assert_eq!(names, ["app", "hello", "bye"]);
    assert!(generated.warnings.is_empty());
}

#[test]
fn aliased_library_import() {
    let json = model_json(indoc! {r#"
        package main

        import g "github.com/tmr232/goat"

        func f(n int) {
            g.Flag(n).Name("count")
        }

        func main() {
            g.Run(f)
        }
    "#});

    assert!(json.contains(r#""name": "\"count\"""#), "{json}");
}

#[test]
fn function_from_module_package() {
    let program = Program::builder(ROOT)
        .file(
            "main.go",
            indoc! {r#"
                package main

                import (
                    "example.com/app/cmds"
                    "github.com/tmr232/goat"
                )

                func main() {
                    goat.Command(cmds.Hello).Run()
                }
            "#},
        )
        .package_file(
            "example.com/app/cmds",
            "cmds/cmds.go",
            indoc! {r#"
                package cmds

                import "github.com/tmr232/goat"

                // Hello greets.
                func Hello(name string) error {
                    goat.Flag(name).Usage("who")
                    return nil
                }
            "#},
        )
        .build()
        .unwrap();

    let generated = generate(&program, &Config::default()).unwrap();
    let action = generated.generation.actions.iter().next().unwrap();
    assert_eq!(action.function.to_string(), "example.com/app/cmds.Hello");
    assert_eq!(action.reference, "cmds.Hello");
    assert_eq!(action.usage, "\"greets.\"");
    assert!(action.returns_error);
    assert_eq!(action.flags().next().unwrap().usage, "\"who\"");
}

#[test]
fn duplicate_self_is_a_warning() {
    let program = crate::test_utils::program(indoc! {r#"
        package main

        import "github.com/tmr232/goat"

        func f() {
            goat.Self().Name("first")
            goat.Self().Name("second")
        }

        func main() {
            goat.Run(f)
        }
    "#});
    let generated = generate(&program, &Config::default()).unwrap();

    assert_eq!(generated.warnings.warning_count(), 1);
    let action = generated.generation.actions.iter().next().unwrap();
    assert_eq!(action.name, "\"first\"");
}

#[test]
fn unsupported_parameter_type() {
    let err = generation_error(indoc! {r#"
        package main

        import "github.com/tmr232/goat"

        func f(ch chan int) {}

        func main() {
            goat.Run(f)
        }
    "#});

    insta::assert_snapshot!(err, @r"
    analysis failed with 1 errors
    main.go:5:8: error: no flag handler for type `chan int`
    ");
}

#[test]
fn errors_are_collected_across_functions() {
    let err = generation_error(indoc! {r#"
        package main

        import "github.com/tmr232/goat"

        func a(name string) {
            other := "x"
            goat.Flag(other)
        }

        func b(name string) {
            goat.Flag(name).Foo("x")
        }

        func main() {
            goat.Run(a)
            goat.Run(b)
        }
    "#});

    insta::assert_snapshot!(err, @r"
    analysis failed with 2 errors
    main.go:7:15: error: `other` is not a parameter of this function
    main.go:11:21: error: `Foo` is not a recognized directive
    ");
}

#[test]
fn no_registrations_yield_empty_model() {
    let json = model_json(indoc! {r#"
        package main

        func main() {}
    "#});

    insta::assert_snapshot!(json, @r#"
    {
      "package": {
        "name": "main",
        "path": "example.com/app"
      },
      "actions": []
    }
    "#);
}

#[test]
fn blank_parameters_are_rejected() {
    let err = generation_error(indoc! {r#"
        package main

        import "github.com/tmr232/goat"

        func f(_ string, _ int) {}

        func main() {
            goat.Run(f)
        }
    "#});

    insta::assert_snapshot!(err, @r"
    analysis failed with 2 errors
    main.go:5:8: error: action parameters must be named: `string` in `f`
    main.go:5:18: error: action parameters must be named: `int` in `f`
    ");
}

#[test]
fn shadowed_parameter_name_does_not_describe_the_action() {
    let err = generation_error(indoc! {r#"
        package main

        import "github.com/tmr232/goat"

        func f(x int) {
            g := func(x string) {
                goat.Flag(x).Usage("inner")
            }
            g("")
        }

        func main() {
            goat.Run(f)
        }
    "#});

    insta::assert_snapshot!(err, @r"
    analysis failed with 1 errors
    main.go:7:19: error: `x` is not a parameter of this function
    ");
}
