//! `goatherd tree`: the tree-sitter view of a Go file, for writing patterns.

use std::fmt::{self, Write};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};

use arborium_tree_sitter::Node;
use goatherd_lib::syntax;

use super::analysis::fail;

pub struct TreeArgs {
    pub source_path: PathBuf,
    pub raw: bool,
    pub spans: bool,
}

pub fn run(args: TreeArgs) {
    let source = load_source(&args.source_path);
    let tree = syntax::parse(&source);
    let printer = TreePrinter {
        source: &source,
        raw: args.raw,
        spans: args.spans,
    };
    print!("{}", printer.render(tree.root_node()));
}

fn load_source(path: &Path) -> String {
    if path.as_os_str() == "-" {
        let mut buf = String::new();
        io::stdin()
            .read_to_string(&mut buf)
            .unwrap_or_else(|err| fail(format!("failed to read stdin: {err}")));
        return buf;
    }
    fs::read_to_string(path)
        .unwrap_or_else(|err| fail(format!("failed to read {}: {err}", path.display())))
}

/// S-expression dump with field names, leaf text and optional positions.
pub struct TreePrinter<'s> {
    pub source: &'s str,
    /// Include anonymous nodes.
    pub raw: bool,
    /// Append `[line:col-line:col]`, one-based.
    pub spans: bool,
}

impl TreePrinter<'_> {
    pub fn render(&self, root: Node<'_>) -> String {
        let mut out = String::new();
        self.write_node(&mut out, root, None, 0)
            .expect("String write never fails");
        out.push('\n');
        out
    }

    fn write_node(
        &self,
        w: &mut impl Write,
        node: Node<'_>,
        field: Option<&str>,
        depth: usize,
    ) -> fmt::Result {
        write!(w, "{}", "  ".repeat(depth))?;
        if let Some(field) = field {
            write!(w, "{field}: ")?;
        }

        let children = self.visible_children(node);
        let text = syntax::text(node, self.source);
        if children.is_empty() {
            if node.is_named() {
                write!(w, "({} {:?})", node.kind(), text)?;
            } else {
                write!(w, "({:?})", node.kind())?;
            }
            return self.write_span(w, node);
        }

        write!(w, "({}", node.kind())?;
        self.write_span(w, node)?;
        for (child, child_field) in children {
            writeln!(w)?;
            self.write_node(w, child, child_field, depth + 1)?;
        }
        write!(w, ")")
    }

    fn visible_children<'t>(&self, node: Node<'t>) -> Vec<(Node<'t>, Option<&'static str>)> {
        let mut cursor = node.walk();
        let mut children = Vec::new();
        if cursor.goto_first_child() {
            loop {
                let child = cursor.node();
                if self.raw || child.is_named() {
                    children.push((child, cursor.field_name()));
                }
                if !cursor.goto_next_sibling() {
                    break;
                }
            }
        }
        children
    }

    fn write_span(&self, w: &mut impl Write, node: Node<'_>) -> fmt::Result {
        if !self.spans {
            return Ok(());
        }
        let start = node.start_position();
        let end = node.end_position();
        write!(
            w,
            " [{}:{}-{}:{}]",
            start.row + 1,
            start.column + 1,
            end.row + 1,
            end.column + 1
        )
    }
}
