//! Parsed Go packages with their top-level declarations.
//!
//! A `Program` owns one root package (the one being generated for) plus the
//! packages of the same module it imports. Each file keeps its tree-sitter
//! tree; nodes are looked up again on demand instead of being stored.

mod loader;


use std::path::PathBuf;

use arborium_tree_sitter::{Node, Tree};
use goatherd_core::FunctionRef;
use indexmap::IndexMap;

use crate::source_map::{SourceId, SourceMap, Span};
use crate::{Error, Result, syntax};

/// Identifies one file of one package of a program.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FileId {
    pub package: usize,
    pub file: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Func,
    Var,
    Const,
    Type,
}

/// A package-level declaration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decl {
    pub kind: DeclKind,
    /// Index of the declaring file within its package.
    pub file: usize,
    /// Start byte of the declaring node (`function_declaration`, `var_spec`, ...).
    pub start: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Import {
    /// Explicit import name, including `_` and `.`.
    pub alias: Option<String>,
    pub path: String,
    pub span: Span,
}

#[derive(Debug)]
pub struct GoFile {
    pub source: SourceId,
    pub tree: Tree,
    pub imports: Vec<Import>,
}

impl GoFile {
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }
}

#[derive(Debug)]
pub struct Package {
    /// Import path.
    pub path: String,
    /// Package clause name.
    pub name: String,
    pub files: Vec<GoFile>,
    decls: IndexMap<String, Decl>,
}

impl Package {
    /// Parse the files of one package and index its declarations.
    fn parse(path: String, files: Vec<(String, String)>, sources: &mut SourceMap) -> Result<Self> {
        let mut names: Vec<String> = Vec::new();
        let mut parsed = Vec::with_capacity(files.len());

        for (file_path, content) in files {
            let source = sources.add_file(&file_path, &content);
            let tree = syntax::parse(&content);
            if let Some(error) = syntax::first_error(tree.root_node()) {
                let location = sources.location(Span::of(source, &error));
                return Err(Error::Syntax { location });
            }

            let root = tree.root_node();
            let name = syntax::children(root)
                .into_iter()
                .find(|n| n.kind() == "package_clause")
                .and_then(|clause| syntax::children(clause).first().copied())
                .map(|ident| syntax::text(ident, &content).to_owned())
                .unwrap_or_default();
            if !names.contains(&name) {
                names.push(name);
            }

            let imports = collect_imports(root, &content, source);
            parsed.push(GoFile {
                source,
                tree,
                imports,
            });
        }

        if names.len() != 1 {
            return Err(Error::PackageCount(names));
        }
        let name = names.remove(0);

        let mut decls = IndexMap::new();
        for (index, file) in parsed.iter().enumerate() {
            collect_decls(file.root(), sources.content(file.source), index, &mut decls);
        }

        tracing::debug!(
            package = %path,
            files = parsed.len(),
            decls = decls.len(),
            "parsed package"
        );

        Ok(Self {
            path,
            name,
            files: parsed,
            decls,
        })
    }

    pub fn decl(&self, name: &str) -> Option<&Decl> {
        self.decls.get(name)
    }

    pub fn decls(&self) -> impl Iterator<Item = (&str, &Decl)> {
        self.decls.iter().map(|(name, decl)| (name.as_str(), decl))
    }
}

fn collect_imports(root: Node<'_>, source: &str, id: SourceId) -> Vec<Import> {
    let mut imports = Vec::new();
    for decl in syntax::children(root) {
        if decl.kind() != "import_declaration" {
            continue;
        }
        let mut specs = Vec::new();
        for child in syntax::children(decl) {
            match child.kind() {
                "import_spec" => specs.push(child),
                "import_spec_list" => specs.extend(syntax::children(child)),
                _ => {}
            }
        }
        for spec in specs {
            let Some(path) = spec
                .child_by_field_name("path")
                .and_then(|p| syntax::string_value(p, source))
            else {
                continue;
            };
            let alias = spec
                .child_by_field_name("name")
                .map(|n| syntax::text(n, source).to_owned());
            imports.push(Import {
                alias,
                path,
                span: Span::of(id, &spec),
            });
        }
    }
    imports
}

fn collect_decls(root: Node<'_>, source: &str, file: usize, decls: &mut IndexMap<String, Decl>) {
    let mut add = |name: Node<'_>, kind: DeclKind, start: usize| {
        let name = syntax::text(name, source);
        if name == "_" || (kind == DeclKind::Func && name == "init") {
            return;
        }
        decls
            .entry(name.to_owned())
            .or_insert(Decl { kind, file, start });
    };

    for decl in syntax::children(root) {
        match decl.kind() {
            "function_declaration" => {
                if let Some(name) = decl.child_by_field_name("name") {
                    add(name, DeclKind::Func, decl.start_byte());
                }
            }
            "var_declaration" | "const_declaration" | "type_declaration" => {
                let kind = match decl.kind() {
                    "var_declaration" => DeclKind::Var,
                    "const_declaration" => DeclKind::Const,
                    _ => DeclKind::Type,
                };
                for spec in spec_nodes(decl) {
                    for name in syntax::field_children(spec, "name") {
                        add(name, kind, spec.start_byte());
                    }
                }
            }
            _ => {}
        }
    }
}

/// `var_spec`/`const_spec`/`type_spec` nodes of a declaration, grouped or not.
pub(crate) fn spec_nodes(decl: Node<'_>) -> Vec<Node<'_>> {
    let mut specs = Vec::new();
    for child in syntax::children(decl) {
        match child.kind() {
            "var_spec" | "const_spec" | "type_spec" | "type_alias" => specs.push(child),
            "var_spec_list" | "const_spec_list" | "type_spec_list" => {
                specs.extend(syntax::children(child))
            }
            _ => {}
        }
    }
    specs
}

/// Name a package is imported under when the import has no alias.
///
/// The last path element, skipping a `/vN` major-version element and
/// dropping a `.vN` suffix.
pub fn default_import_name(path: &str) -> &str {
    let mut elements = path.rsplit('/');
    let mut last = elements.next().unwrap_or(path);
    if is_major_version(last)
        && let Some(previous) = elements.next()
    {
        last = previous;
    }
    match last.rsplit_once('.') {
        Some((base, suffix)) if is_major_version(suffix) && !base.is_empty() => base,
        _ => last,
    }
}

fn is_major_version(element: &str) -> bool {
    element
        .strip_prefix('v')
        .is_some_and(|digits| !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()))
}

#[derive(Debug)]
pub struct Program {
    sources: SourceMap,
    packages: Vec<Package>,
}

impl Program {
    /// Build a program from in-memory sources.
    pub fn builder(root_path: impl Into<String>) -> ProgramBuilder {
        ProgramBuilder {
            root: root_path.into(),
            packages: IndexMap::new(),
        }
    }

    pub fn sources(&self) -> &SourceMap {
        &self.sources
    }

    /// The package generation runs for.
    pub fn root(&self) -> &Package {
        &self.packages[0]
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn package(&self, index: usize) -> &Package {
        &self.packages[index]
    }

    pub fn package_index(&self, path: &str) -> Option<usize> {
        self.packages.iter().position(|p| p.path == path)
    }

    pub fn file(&self, id: FileId) -> &GoFile {
        &self.packages[id.package].files[id.file]
    }

    /// Content of a file.
    pub fn source(&self, id: FileId) -> &str {
        self.sources.content(self.file(id).source)
    }

    /// All files of a package.
    pub fn files(&self, package: usize) -> impl Iterator<Item = FileId> + '_ {
        (0..self.packages[package].files.len()).map(move |file| FileId { package, file })
    }

    /// Name an import binds in its file, `None` for blank and dot imports.
    pub fn import_name<'a>(&'a self, import: &'a Import) -> Option<&'a str> {
        match import.alias.as_deref() {
            Some("_") | Some(".") => None,
            Some(alias) => Some(alias),
            None => Some(
                self.package_index(&import.path)
                    .map(|index| self.packages[index].name.as_str())
                    .unwrap_or_else(|| default_import_name(&import.path)),
            ),
        }
    }

    /// Locate the declaring `function_declaration` of a package-level function.
    ///
    /// Top-level declarations are scanned for the name and confirmed against
    /// the package's declaration index, so same-named functions in other
    /// files or packages are never picked.
    pub fn function_declaration(&self, function: &FunctionRef) -> Option<(FileId, Node<'_>)> {
        let package = self.package_index(&function.package)?;
        let decl = self.packages[package].decl(&function.name)?;
        if decl.kind != DeclKind::Func {
            return None;
        }
        let id = FileId {
            package,
            file: decl.file,
        };
        let source = self.source(id);
        let node = syntax::children(self.file(id).root())
            .into_iter()
            .find(|node| {
                node.kind() == "function_declaration"
                    && node.start_byte() == decl.start
                    && node
                        .child_by_field_name("name")
                        .is_some_and(|name| syntax::text(name, source) == function.name)
            })?;
        Some((id, node))
    }

    /// Locate the declaring spec node of a package-level var, const or type.
    pub fn spec_declaration(&self, package: usize, name: &str) -> Option<(FileId, Node<'_>)> {
        let decl = self.packages[package].decl(name)?;
        let id = FileId {
            package,
            file: decl.file,
        };
        syntax::children(self.file(id).root())
            .into_iter()
            .filter(|node| {
                matches!(
                    node.kind(),
                    "var_declaration" | "const_declaration" | "type_declaration"
                )
            })
            .flat_map(spec_nodes)
            .find(|spec| spec.start_byte() == decl.start)
            .map(|spec| (id, spec))
    }
}

/// Builder for in-memory programs.
pub struct ProgramBuilder {
    root: String,
    packages: IndexMap<String, Vec<(String, String)>>,
}

impl ProgramBuilder {
    /// Add a file to the root package.
    pub fn file(self, path: impl Into<String>, content: impl Into<String>) -> Self {
        let root = self.root.clone();
        self.package_file(root, path, content)
    }

    /// Add a file to the package with the given import path.
    pub fn package_file(
        mut self,
        package: impl Into<String>,
        path: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        self.packages
            .entry(package.into())
            .or_default()
            .push((path.into(), content.into()));
        self
    }

    pub fn build(mut self) -> Result<Program> {
        let Some(root_files) = self.packages.shift_remove(&self.root) else {
            return Err(Error::NoSources(PathBuf::from(&self.root)));
        };

        let mut sources = SourceMap::new();
        let mut packages = vec![Package::parse(self.root, root_files, &mut sources)?];
        for (path, files) in self.packages {
            packages.push(Package::parse(path, files, &mut sources)?);
        }
        Ok(Program { sources, packages })
    }
}
