//! Identifier resolution and type printing.
//!
//! A small stand-in for a Go type checker: enough to tell which function a
//! call targets (through import aliases and shadowing), which parameter a
//! descriptor names, and how that parameter's type prints.

use arborium_tree_sitter::Node;
use goatherd_core::FunctionRef;

use crate::program::{DeclKind, FileId, GoFile, Package, Program};
use crate::source_map::{SourceId, Span};
use crate::syntax;

const UNIVERSE_TYPES: &[&str] = &[
    "any",
    "bool",
    "byte",
    "comparable",
    "complex64",
    "complex128",
    "error",
    "float32",
    "float64",
    "int",
    "int8",
    "int16",
    "int32",
    "int64",
    "rune",
    "string",
    "uint",
    "uint8",
    "uint16",
    "uint32",
    "uint64",
    "uintptr",
];

const UNIVERSE_VALUES: &[&str] = &[
    "append", "cap", "clear", "close", "complex", "copy", "delete", "false", "imag", "iota", "len",
    "make", "max", "min", "new", "nil", "panic", "print", "println", "real", "recover", "true",
];

/// What an identifier refers to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Symbol {
    /// A package-level function of a loaded package.
    Func(FunctionRef),
    /// A member of a package outside the loaded program.
    External { package: String, name: String },
    /// An imported package.
    Package(String),
    /// A parameter, receiver or named result; `decl` is its declaring identifier.
    Param { name: String, ty: String, decl: Span },
    Local { ty: Option<String> },
    Global { kind: DeclKind, ty: Option<String> },
    Builtin(String),
    Unresolved,
}

impl Symbol {
    /// Whether this symbol is the function `name` of package `package`.
    pub fn is_function(&self, package: &str, name: &str) -> bool {
        match self {
            Symbol::Func(f) => f.package == package && f.name == name,
            Symbol::External {
                package: p,
                name: n,
            } => p == package && n == name,
            _ => false,
        }
    }
}

/// Resolves names as seen from one file.
#[derive(Clone, Copy)]
pub struct Resolver<'p> {
    program: &'p Program,
    id: FileId,
    file: &'p GoFile,
    package: &'p Package,
    source: &'p str,
}

impl<'p> Resolver<'p> {
    pub fn new(program: &'p Program, id: FileId) -> Self {
        Self {
            program,
            id,
            file: program.file(id),
            package: program.package(id.package),
            source: program.source(id),
        }
    }

    pub fn program(&self) -> &'p Program {
        self.program
    }

    pub fn file_id(&self) -> FileId {
        self.id
    }

    pub fn package(&self) -> &'p Package {
        self.package
    }

    pub fn source(&self) -> &'p str {
        self.source
    }

    pub fn source_id(&self) -> SourceId {
        self.file.source
    }

    pub fn text(&self, node: Node<'_>) -> &'p str {
        syntax::text(node, self.source)
    }

    pub fn span(&self, node: Node<'_>) -> Span {
        Span::of(self.file.source, &node)
    }

    /// Resolve an identifier, a `pkg.Name` selector or a qualified type.
    pub fn resolve(&self, expr: Node<'_>) -> Symbol {
        let expr = syntax::unparen(expr);
        match expr.kind() {
            "identifier" | "type_identifier" | "package_identifier" => {
                self.lookup(self.text(expr), expr)
            }
            "selector_expression" => {
                match (
                    expr.child_by_field_name("operand"),
                    expr.child_by_field_name("field"),
                ) {
                    (Some(operand), Some(field)) => self.member_of(operand, field),
                    _ => Symbol::Unresolved,
                }
            }
            "qualified_type" => {
                match (
                    expr.child_by_field_name("package"),
                    expr.child_by_field_name("name"),
                ) {
                    (Some(package), Some(name)) => self.member_of(package, name),
                    _ => Symbol::Unresolved,
                }
            }
            _ => Symbol::Unresolved,
        }
    }

    fn member_of(&self, operand: Node<'_>, member: Node<'_>) -> Symbol {
        let operand = syntax::unparen(operand);
        if !matches!(operand.kind(), "identifier" | "package_identifier") {
            return Symbol::Unresolved;
        }
        match self.lookup(self.text(operand), operand) {
            Symbol::Package(path) => self.package_member(&path, self.text(member)),
            _ => Symbol::Unresolved,
        }
    }

    fn package_member(&self, path: &str, name: &str) -> Symbol {
        let Some(index) = self.program.package_index(path) else {
            return Symbol::External {
                package: path.to_owned(),
                name: name.to_owned(),
            };
        };
        let package = self.program.package(index);
        match package.decl(name) {
            Some(decl) if decl.kind == DeclKind::Func => {
                Symbol::Func(FunctionRef::new(&package.path, name))
            }
            Some(decl) => Symbol::Global {
                kind: decl.kind,
                ty: self.global_type(index, name),
            },
            None => Symbol::Unresolved,
        }
    }

    /// Look `name` up as seen from `at`: enclosing scopes innermost first,
    /// then imports, package declarations and the universe.
    pub fn lookup(&self, name: &str, at: Node<'_>) -> Symbol {
        let pos = at.start_byte();
        let mut child = at;
        while let Some(scope) = child.parent() {
            if let Some(symbol) = self.lookup_in_scope(scope, child, name, pos) {
                return symbol;
            }
            child = scope;
        }
        self.lookup_file_scope(name)
    }

    fn lookup_in_scope(&self, scope: Node<'_>, child: Node<'_>, name: &str, pos: usize) -> Option<Symbol> {
        match scope.kind() {
            "block" | "statement_list" | "expression_case" | "default_case" | "type_case"
            | "communication_case" => syntax::children(scope)
                .into_iter()
                .rev()
                .filter(|stmt| stmt.end_byte() <= pos)
                .find_map(|stmt| self.declared_by(stmt, name)),

            "if_statement" | "expression_switch_statement" | "type_switch_statement" => {
                if scope.kind() == "type_switch_statement"
                    && let Some(alias) = scope.child_by_field_name("alias")
                    && alias.end_byte() <= pos
                    && syntax::children(alias)
                        .iter()
                        .chain(std::iter::once(&alias))
                        .any(|n| n.kind() == "identifier" && self.text(*n) == name)
                {
                    return Some(Symbol::Local { ty: None });
                }
                let init = scope.child_by_field_name("initializer")?;
                if init.id() == child.id() || init.end_byte() > pos {
                    return None;
                }
                self.declared_by(init, name)
            }

            "for_clause" => {
                let init = scope.child_by_field_name("initializer")?;
                if init.end_byte() > pos {
                    return None;
                }
                self.declared_by(init, name)
            }

            "for_statement" => syntax::children(scope).into_iter().find_map(|clause| {
                if clause.id() == child.id() {
                    return None;
                }
                match clause.kind() {
                    "for_clause" => {
                        let init = clause.child_by_field_name("initializer")?;
                        self.declared_by(init, name)
                    }
                    "range_clause" if syntax::has_token(clause, ":=") => {
                        let left = clause.child_by_field_name("left")?;
                        identifiers(left)
                            .into_iter()
                            .any(|n| self.text(n) == name)
                            .then_some(Symbol::Local { ty: None })
                    }
                    _ => None,
                }
            }),

            "func_literal" | "function_declaration" | "method_declaration" => {
                ["receiver", "parameters", "result"]
                    .into_iter()
                    .filter_map(|field| scope.child_by_field_name(field))
                    .filter(|list| list.kind() == "parameter_list")
                    .flat_map(syntax::parameters)
                    .find_map(|p| {
                        let ident = p.name.filter(|n| self.text(*n) == name)?;
                        Some(Symbol::Param {
                            name: name.to_owned(),
                            ty: self.parameter_type(&p),
                            decl: self.span(ident),
                        })
                    })
                    .or_else(|| {
                        let params = scope.child_by_field_name("type_parameters")?;
                        syntax::children(params)
                            .into_iter()
                            .flat_map(|decl| syntax::field_children(decl, "name"))
                            .any(|n| self.text(n) == name)
                            .then_some(Symbol::Local { ty: None })
                    })
            }

            _ => None,
        }
    }

    /// Symbol `name` gets from a declaring statement, if it declares it.
    fn declared_by(&self, stmt: Node<'_>, name: &str) -> Option<Symbol> {
        match stmt.kind() {
            "short_var_declaration" => {
                let left = identifiers(stmt.child_by_field_name("left")?);
                let index = left.iter().position(|n| self.text(*n) == name)?;
                let right = stmt
                    .child_by_field_name("right")
                    .map(syntax::children)
                    .unwrap_or_default();
                let ty = (right.len() == left.len())
                    .then(|| self.type_of(right[index]))
                    .flatten();
                Some(Symbol::Local { ty })
            }
            "var_declaration" | "const_declaration" => crate::program::spec_nodes(stmt)
                .into_iter()
                .find_map(|spec| self.spec_type(spec, name))
                .map(|ty| Symbol::Local { ty }),
            "type_declaration" => crate::program::spec_nodes(stmt)
                .into_iter()
                .flat_map(|spec| syntax::field_children(spec, "name"))
                .any(|n| self.text(n) == name)
                .then_some(Symbol::Local { ty: None }),
            _ => None,
        }
    }

    /// `Some(type)` when `spec` declares `name`; the type itself may be unknown.
    fn spec_type(&self, spec: Node<'_>, name: &str) -> Option<Option<String>> {
        let names = syntax::field_children(spec, "name");
        let index = names.iter().position(|n| self.text(*n) == name)?;
        if let Some(ty) = spec.child_by_field_name("type") {
            return Some(Some(self.qualify_type(ty)));
        }
        let values = spec
            .child_by_field_name("value")
            .map(syntax::children)
            .unwrap_or_default();
        Some(values.get(index).and_then(|v| self.type_of(*v)))
    }

    fn lookup_file_scope(&self, name: &str) -> Symbol {
        for import in &self.file.imports {
            if self.program.import_name(import) == Some(name) {
                return Symbol::Package(import.path.clone());
            }
        }

        if let Some(decl) = self.package.decl(name) {
            if decl.kind == DeclKind::Func {
                return Symbol::Func(FunctionRef::new(&self.package.path, name));
            }
            return Symbol::Global {
                kind: decl.kind,
                ty: self.global_type(self.id.package, name),
            };
        }

        if UNIVERSE_TYPES.contains(&name) || UNIVERSE_VALUES.contains(&name) {
            return Symbol::Builtin(name.to_owned());
        }
        Symbol::Unresolved
    }

    fn global_type(&self, package: usize, name: &str) -> Option<String> {
        let (id, spec) = self.program.spec_declaration(package, name)?;
        if !matches!(spec.kind(), "var_spec" | "const_spec") {
            return None;
        }
        Resolver::new(self.program, id).spec_type(spec, name).flatten()
    }

    /// Printed type of an expression, when it can be known without full type checking.
    pub fn type_of(&self, expr: Node<'_>) -> Option<String> {
        let expr = syntax::unparen(expr);
        match expr.kind() {
            "identifier" | "selector_expression" => match self.resolve(expr) {
                Symbol::Param { ty, .. } => Some(ty),
                Symbol::Local { ty } | Symbol::Global { ty, .. } => ty,
                Symbol::Builtin(name) if name == "true" || name == "false" => {
                    Some("bool".to_owned())
                }
                _ => None,
            },
            "interpreted_string_literal" | "raw_string_literal" => Some("string".to_owned()),
            "int_literal" => Some("int".to_owned()),
            "float_literal" => Some("float64".to_owned()),
            "imaginary_literal" => Some("complex128".to_owned()),
            "rune_literal" => Some("rune".to_owned()),
            "true" | "false" => Some("bool".to_owned()),
            "composite_literal" => expr
                .child_by_field_name("type")
                .map(|ty| self.qualify_type(ty)),
            "unary_expression" if self.operator(expr) == Some("&") => {
                let operand = syntax::unparen(expr.child_by_field_name("operand")?);
                if operand.kind() != "composite_literal" {
                    return None;
                }
                Some(format!("*{}", self.type_of(operand)?))
            }
            _ => None,
        }
    }

    fn operator(&self, expr: Node<'_>) -> Option<&'p str> {
        expr.child_by_field_name("operator").map(|op| self.text(op))
    }

    /// Printed type of a parameter; variadic parameters are slices.
    pub fn parameter_type(&self, param: &syntax::Parameter<'_>) -> String {
        let ty = self.qualify_type(param.ty);
        if param.variadic {
            format!("[]{ty}")
        } else {
            ty
        }
    }

    /// Print a type expression the way `go/types` does, with package paths
    /// instead of import names (`*github.com/tmr232/goat.Context`).
    pub fn qualify_type(&self, ty: Node<'_>) -> String {
        let child = |field: &str| ty.child_by_field_name(field);
        match ty.kind() {
            "type_identifier" | "identifier" => {
                let name = self.text(ty);
                if UNIVERSE_TYPES.contains(&name) {
                    name.to_owned()
                } else {
                    format!("{}.{}", self.package.path, name)
                }
            }
            "qualified_type" => match (child("package"), child("name")) {
                (Some(package), Some(name)) => match self.lookup(self.text(package), package) {
                    Symbol::Package(path) => format!("{path}.{}", self.text(name)),
                    _ => self.text(ty).to_owned(),
                },
                _ => self.text(ty).to_owned(),
            },
            "pointer_type" => match syntax::children(ty).first() {
                Some(inner) => format!("*{}", self.qualify_type(*inner)),
                None => self.text(ty).to_owned(),
            },
            "slice_type" => match child("element") {
                Some(element) => format!("[]{}", self.qualify_type(element)),
                None => self.text(ty).to_owned(),
            },
            "array_type" => match (child("length"), child("element")) {
                (Some(length), Some(element)) => {
                    format!("[{}]{}", self.text(length), self.qualify_type(element))
                }
                _ => self.text(ty).to_owned(),
            },
            "map_type" => match (child("key"), child("value")) {
                (Some(key), Some(value)) => {
                    format!("map[{}]{}", self.qualify_type(key), self.qualify_type(value))
                }
                _ => self.text(ty).to_owned(),
            },
            "generic_type" => match (child("type"), child("type_arguments")) {
                (Some(base), Some(args)) => {
                    let args: Vec<_> = syntax::children(args)
                        .into_iter()
                        .map(|arg| self.qualify_type(arg))
                        .collect();
                    format!("{}[{}]", self.qualify_type(base), args.join(", "))
                }
                _ => self.text(ty).to_owned(),
            },
            "type_elem" => syntax::children(ty)
                .into_iter()
                .map(|t| self.qualify_type(t))
                .collect::<Vec<_>>()
                .join(" | "),
            "parenthesized_type" => self.qualify_type(syntax::unparen(ty)),
            _ => self
                .text(ty)
                .split_whitespace()
                .collect::<Vec<_>>()
                .join(" "),
        }
    }
}

/// Identifiers of an `expression_list` (or a lone identifier).
fn identifiers(list: Node<'_>) -> Vec<Node<'_>> {
    if list.kind() == "identifier" {
        return vec![list];
    }
    syntax::children(list)
        .into_iter()
        .filter(|n| n.kind() == "identifier")
        .collect()
}
