use goatherd_lib::syntax;

use super::tree::TreePrinter;

fn dump(source: &str, raw: bool, spans: bool) -> String {
    let tree = syntax::parse(source);
    TreePrinter { source, raw, spans }.render(tree.root_node())
}

#[test]
fn named_nodes_with_fields() {
    let out = dump("package main\n\nfunc f(x int) {}\n", false, false);

    insta::assert_snapshot!(out, @r#"
    (source_file
      (package_clause
        (package_identifier "main"))
      (function_declaration
        name: (identifier "f")
        parameters: (parameter_list
          (parameter_declaration
            name: (identifier "x")
            type: (type_identifier "int")))
        body: (block "{}")))
    "#);
}

#[test]
fn raw_includes_anonymous_nodes() {
    let named = dump("package main\n", false, false);
    let raw = dump("package main\n", true, false);

    assert!(!named.contains(r#"("package")"#), "{named}");
    assert!(raw.contains(r#"("package")"#), "{raw}");
    assert!(raw.contains(r#"(package_identifier "main")"#), "{raw}");
}

#[test]
fn spans_are_one_based() {
    let out = dump("package main\n", false, true);

    insta::assert_snapshot!(out, @r#"
    (source_file [1:1-2:1]
      (package_clause [1:1-1:13]
        (package_identifier "main") [1:9-1:13]))
    "#);
}
