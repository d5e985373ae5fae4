//! Loading packages from disk.

use std::collections::VecDeque;
use std::fs;
use std::path::{Path, PathBuf};

use crate::source_map::SourceMap;
use crate::{Error, Result};

use super::{Package, Program};

/// The module a package directory belongs to, from its `go.mod`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Module {
    pub(crate) root: PathBuf,
    pub(crate) path: String,
}

impl Module {
    /// Nearest `go.mod` at or above `dir`.
    pub(crate) fn find(dir: &Path) -> Result<Option<Module>> {
        for candidate in dir.ancestors() {
            let go_mod = candidate.join("go.mod");
            if !go_mod.is_file() {
                continue;
            }
            let content = read(&go_mod)?;
            return Ok(parse_module_path(&content).map(|path| Module {
                root: candidate.to_path_buf(),
                path,
            }));
        }
        Ok(None)
    }

    /// Import path of a directory inside the module.
    pub(crate) fn import_path(&self, dir: &Path) -> Option<String> {
        let relative = dir.strip_prefix(&self.root).ok()?;
        let mut path = self.path.clone();
        for component in relative.components() {
            path.push('/');
            path.push_str(&component.as_os_str().to_string_lossy());
        }
        Some(path)
    }

    /// Directory of an import path inside the module.
    pub(crate) fn dir_of(&self, import_path: &str) -> Option<PathBuf> {
        if import_path == self.path {
            return Some(self.root.clone());
        }
        let relative = import_path.strip_prefix(&self.path)?.strip_prefix('/')?;
        Some(relative.split('/').fold(self.root.clone(), |dir, e| dir.join(e)))
    }
}

/// Module path declared by a `go.mod` file.
pub(crate) fn parse_module_path(go_mod: &str) -> Option<String> {
    go_mod.lines().find_map(|line| {
        let line = line.split("//").next().unwrap_or_default().trim();
        let rest = line.strip_prefix("module")?;
        if !rest.starts_with(char::is_whitespace) {
            return None;
        }
        let path = rest.trim().trim_matches('"');
        (!path.is_empty()).then(|| path.to_owned())
    })
}

impl Program {
    /// Load the package in `dir` and the packages of the same module it imports.
    pub fn load(dir: impl AsRef<Path>) -> Result<Program> {
        let dir = dir.as_ref();
        let absolute = dir.canonicalize().map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let module = Module::find(&absolute)?;
        if let Some(module) = &module {
            tracing::debug!(module = %module.path, root = %module.root.display(), "found go.mod");
        }

        let files = read_package_files(dir)?;
        if files.is_empty() {
            return Err(Error::NoSources(dir.to_path_buf()));
        }

        let mut sources = SourceMap::new();
        let root_path = module.as_ref().and_then(|m| m.import_path(&absolute));
        let mut root = Package::parse(root_path.clone().unwrap_or_default(), files, &mut sources)?;
        if root_path.is_none() {
            root.path = root.name.clone();
        }
        tracing::info!(package = %root.path, files = root.files.len(), "loaded package");

        let mut packages = vec![root];
        if let Some(module) = &module {
            let mut queue: VecDeque<String> = imports_of(&packages[0]).collect();
            while let Some(import_path) = queue.pop_front() {
                if packages.iter().any(|p| p.path == import_path) {
                    continue;
                }
                let Some(package_dir) = module.dir_of(&import_path) else {
                    continue;
                };
                if !package_dir.is_dir() {
                    tracing::warn!(import = %import_path, "module package directory not found");
                    continue;
                }
                let files = read_package_files(&package_dir)?;
                if files.is_empty() {
                    continue;
                }
                let package = Package::parse(import_path, files, &mut sources)?;
                tracing::debug!(package = %package.path, "loaded dependency");
                queue.extend(imports_of(&package));
                packages.push(package);
            }
        }

        Ok(Program { sources, packages })
    }
}

fn imports_of(package: &Package) -> impl Iterator<Item = String> + '_ {
    package
        .files
        .iter()
        .flat_map(|f| f.imports.iter().map(|i| i.path.clone()))
}

/// Non-test Go files of a directory as `(display path, content)`, sorted by name.
fn read_package_files(dir: &Path) -> Result<Vec<(String, String)>> {
    let entries = fs::read_dir(dir).map_err(|source| Error::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| Error::Io {
            path: dir.to_path_buf(),
            source,
        })?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if is_package_file(name) && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort();

    let mut files = Vec::new();
    for path in paths {
        let content = read(&path)?;
        let display_path = path.strip_prefix(".").unwrap_or(&path).display().to_string();
        if is_ignored(&content) {
            tracing::debug!(file = %display_path, "skipping ignored file");
            continue;
        }
        files.push((display_path, content));
    }
    Ok(files)
}

/// `//go:build ignore` (or `// +build ignore`) in the header before the package clause.
fn is_ignored(content: &str) -> bool {
    content
        .lines()
        .map(str::trim)
        .take_while(|line| line.is_empty() || line.starts_with("//"))
        .filter_map(|line| {
            line.strip_prefix("//go:build")
                .or_else(|| line.strip_prefix("// +build"))
        })
        .any(|expr| expr.trim() == "ignore")
}

fn is_package_file(name: &str) -> bool {
    name.ends_with(".go")
        && !name.ends_with("_test.go")
        && !name.starts_with('.')
        && !name.starts_with('_')
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source,
    })
}
