use indoc::indoc;

use goatherd_lib::{Config, Program};

use super::model::{ModelArgs, run, to_json};

fn generation(source: &str) -> goatherd_core::Generation {
    let program = Program::builder("example.com/app")
        .file("main.go", source)
        .build()
        .unwrap();
    goatherd_lib::generate(&program, &Config::default())
        .unwrap()
        .generation
}

const HELLO: &str = indoc! {r#"
    package main

    import "github.com/tmr232/goat"

    func hello(name string) {
        goat.Flag(name).Usage("who")
    }

    func main() {
        goat.Run(hello)
    }
"#};

#[test]
fn compact_json() {
    let json = to_json(&generation(HELLO), true).unwrap();

    insta::assert_snapshot!(json, @r#"{"package":{"name":"main","path":"example.com/app"},"actions":[{"function":{"package":"example.com/app","name":"hello"},"reference":"hello","name":"\"hello\"","usage":"\"\"","returns_error":false,"arguments":[{"role":"flag","param":"name","type":"string","kind":"string","name":"\"name\"","usage":"\"who\"","default":"required"}]}]}"#);
}

#[test]
fn pretty_json_is_multiline() {
    let json = to_json(&generation(HELLO), false).unwrap();

    assert!(json.starts_with("{\n  \"package\""));
    let compact: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(compact["actions"][0]["arguments"][0]["usage"], "\"who\"");
}

#[test]
fn loads_package_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("go.mod"), "module example.com/app\n").unwrap();
    std::fs::write(dir.path().join("main.go"), HELLO).unwrap();

    let program = Program::load(dir.path()).unwrap();
    let generated = goatherd_lib::generate(&program, &Config::default()).unwrap();

    assert!(generated.warnings.is_empty());
    assert_eq!(generated.generation.package.path, "example.com/app");
    assert_eq!(generated.generation.actions.len(), 1);
}

#[test]
fn model_command_writes_output_file() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("go.mod"), "module example.com/app\n").unwrap();
    std::fs::write(dir.path().join("main.go"), HELLO).unwrap();
    let output = dir.path().join("model.json");

    run(ModelArgs {
        dir: dir.path().to_path_buf(),
        output: Some(output.clone()),
        compact: true,
        config: Config::default(),
        color: false,
    });

    let written = std::fs::read_to_string(&output).unwrap();
    assert!(written.ends_with("}\n"));
    let model: serde_json::Value = serde_json::from_str(&written).unwrap();
    assert_eq!(model["package"]["path"], "example.com/app");
    assert_eq!(model["actions"][0]["function"]["name"], "hello");
}
