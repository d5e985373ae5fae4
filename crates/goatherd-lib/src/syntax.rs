//! Go syntax access through tree-sitter.
//!
//! Thin helpers over `arborium_tree_sitter` nodes. Node kinds and field names
//! follow the tree-sitter Go grammar.

use std::sync::LazyLock;

use arborium_tree_sitter::{Language, Node, Parser, Tree};

static GO: LazyLock<Language> = LazyLock::new(|| arborium_go::language().into());

pub fn language() -> &'static Language {
    &GO
}

/// Parse Go source into a tree-sitter tree.
pub fn parse(source: &str) -> Tree {
    let mut parser = Parser::new();
    parser
        .set_language(language())
        .expect("failed to set language");
    parser.parse(source, None).expect("failed to parse source")
}

pub fn text<'s>(node: Node<'_>, source: &'s str) -> &'s str {
    &source[node.byte_range()]
}

/// Named children, without comments.
pub fn children(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    node.named_children(&mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect()
}

/// All children stored under `field`, without comments.
pub fn field_children<'t>(node: Node<'t>, field: &str) -> Vec<Node<'t>> {
    let mut cursor = node.walk();
    node.children_by_field_name(field, &mut cursor)
        .filter(|c| c.kind() != "comment")
        .collect()
}

/// Whether `node` has an anonymous child token of the given kind (`:=`, `...`).
pub fn has_token(node: Node<'_>, token: &str) -> bool {
    let mut cursor = node.walk();
    let found = node.children(&mut cursor).any(|c| c.kind() == token);
    found
}

/// Strip any number of enclosing parentheses from an expression.
pub fn unparen(mut node: Node<'_>) -> Node<'_> {
    while node.kind() == "parenthesized_expression" || node.kind() == "parenthesized_type" {
        match children(node).first() {
            Some(inner) => node = *inner,
            None => break,
        }
    }
    node
}

/// First `ERROR` or missing node, in source order.
pub fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    if !node.has_error() {
        return None;
    }
    let mut cursor = node.walk();
    let kids: Vec<_> = node.children(&mut cursor).collect();
    kids.into_iter().find_map(first_error)
}

/// Contents of a Go string literal (interpreted or raw).
///
/// Only the escapes that can appear in import paths are decoded.
pub fn string_value(node: Node<'_>, source: &str) -> Option<String> {
    let raw = text(node, source);
    match node.kind() {
        "raw_string_literal" => raw
            .strip_prefix('`')
            .and_then(|s| s.strip_suffix('`'))
            .map(str::to_owned),
        "interpreted_string_literal" => {
            let inner = raw.strip_prefix('"')?.strip_suffix('"')?;
            Some(inner.replace("\\\"", "\"").replace("\\\\", "\\"))
        }
        _ => None,
    }
}

// ============================================================================
// Doc comments
// ============================================================================

/// The doc comment of a top-level declaration, as `go/ast`'s `CommentGroup.Text`.
///
/// The comment group must end on the line right above the declaration.
/// Comment markers are removed, directives (`//go:generate`) are dropped,
/// blank lines are trimmed at both ends and collapsed inside.
pub fn doc_comment(decl: Node<'_>, source: &str) -> Option<String> {
    let mut group = Vec::new();
    let mut next_row = decl.start_position().row;
    let mut current = decl.prev_sibling();

    while let Some(comment) = current {
        if comment.kind() != "comment" || comment.end_position().row + 1 != next_row {
            break;
        }
        if let Some(prev) = comment.prev_sibling()
            && prev.kind() != "comment"
            && prev.end_position().row == comment.start_position().row
        {
            // trailing comment of the previous line
            break;
        }
        group.push(comment);
        next_row = comment.start_position().row;
        current = comment.prev_sibling();
    }

    if group.is_empty() {
        return None;
    }
    group.reverse();

    let mut lines = Vec::new();
    for comment in group {
        let raw = text(comment, source);
        if let Some(line) = raw.strip_prefix("//") {
            if is_directive(line) {
                continue;
            }
            lines.push(line.strip_prefix(' ').unwrap_or(line).to_owned());
        } else if let Some(block) = raw.strip_prefix("/*").and_then(|s| s.strip_suffix("*/")) {
            lines.extend(block.lines().map(str::to_owned));
        }
    }

    let mut out: Vec<&str> = Vec::new();
    for line in &lines {
        let line = line.trim_end();
        if line.is_empty() && out.last().is_none_or(|l| l.is_empty()) {
            continue;
        }
        out.push(line);
    }
    while out.last().is_some_and(|l| l.is_empty()) {
        out.pop();
    }

    let mut text = out.join("\n");
    if !text.is_empty() {
        text.push('\n');
    }
    Some(text)
}

/// `//line`, `//extern`, `//export` and `//tool:verb` style comments.
fn is_directive(line: &str) -> bool {
    if line.starts_with("line ") || line.starts_with("extern ") || line.starts_with("export ") {
        return true;
    }
    let Some((tool, rest)) = line.split_once(':') else {
        return false;
    };
    !tool.is_empty()
        && tool
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
        && rest
            .bytes()
            .next()
            .is_some_and(|b| b.is_ascii_lowercase() || b.is_ascii_digit())
}

// ============================================================================
// Parameter lists
// ============================================================================

/// One parameter of a `parameter_list`. Grouped names (`a, b int`) yield one
/// entry per name.
#[derive(Debug, Clone, Copy)]
pub struct Parameter<'t> {
    pub name: Option<Node<'t>>,
    pub ty: Node<'t>,
    pub variadic: bool,
    pub decl: Node<'t>,
}

pub fn parameters(list: Node<'_>) -> Vec<Parameter<'_>> {
    let mut out = Vec::new();
    for decl in children(list) {
        let variadic = match decl.kind() {
            "parameter_declaration" => false,
            "variadic_parameter_declaration" => true,
            _ => continue,
        };
        let Some(ty) = decl.child_by_field_name("type") else {
            continue;
        };
        let names = field_children(decl, "name");
        if names.is_empty() {
            out.push(Parameter {
                name: None,
                ty,
                variadic,
                decl,
            });
        }
        for name in names {
            out.push(Parameter {
                name: Some(name),
                ty,
                variadic,
                decl,
            });
        }
    }
    out
}
