//! Source storage for one analysis session.
//!
//! Stores sources as owned strings. Every diagnostic and fatal error points
//! into this map through a `Span`.

use std::fmt;
use std::ops::Range;

use arborium_tree_sitter::Node;

/// Lightweight handle to a source in an analysis session.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct SourceId(pub(crate) u32);

/// Byte range inside one source.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Span {
    pub source: SourceId,
    pub start: u32,
    pub end: u32,
}

impl Span {
    pub fn new(source: SourceId, range: Range<usize>) -> Self {
        Self {
            source,
            start: range.start as u32,
            end: range.end as u32,
        }
    }

    pub fn of(source: SourceId, node: &Node<'_>) -> Self {
        Self::new(source, node.byte_range())
    }

    pub fn range(&self) -> Range<usize> {
        self.start as usize..self.end as usize
    }
}

/// Human-facing position: `path:line:column`, both one-based.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Location {
    pub path: String,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.path, self.line, self.column)
    }
}

/// A borrowed view of a source: id, path, and content.
#[derive(Clone, Debug)]
pub struct Source<'s> {
    pub id: SourceId,
    pub path: &'s str,
    pub content: &'s str,
}

#[derive(Clone, Debug)]
struct SourceEntry {
    path: String,
    content: String,
}

/// Registry of all sources.
#[derive(Clone, Debug, Default)]
pub struct SourceMap {
    entries: Vec<SourceEntry>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&mut self, path: &str, content: &str) -> SourceId {
        let id = SourceId(self.entries.len() as u32);
        self.entries.push(SourceEntry {
            path: path.to_owned(),
            content: content.to_owned(),
        });
        id
    }

    pub fn content(&self, id: SourceId) -> &str {
        self.entries
            .get(id.0 as usize)
            .map(|e| e.content.as_str())
            .expect("invalid SourceId")
    }

    pub fn path(&self, id: SourceId) -> &str {
        self.entries
            .get(id.0 as usize)
            .map(|e| e.path.as_str())
            .expect("invalid SourceId")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: SourceId) -> Source<'_> {
        let entry = self.entries.get(id.0 as usize).expect("invalid SourceId");
        Source {
            id,
            path: &entry.path,
            content: &entry.content,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = Source<'_>> {
        self.entries.iter().enumerate().map(|(idx, entry)| Source {
            id: SourceId(idx as u32),
            path: &entry.path,
            content: &entry.content,
        })
    }

    /// Source text covered by a span.
    pub fn text(&self, span: Span) -> &str {
        &self.content(span.source)[span.range()]
    }

    /// Resolve the start of a span to a line and column.
    ///
    /// Columns count characters, not bytes, so they line up with editors.
    pub fn location(&self, span: Span) -> Location {
        let content = self.content(span.source);
        let offset = (span.start as usize).min(content.len());
        let before = &content[..offset];
        let line = before.matches('\n').count() + 1;
        let line_start = before.rfind('\n').map_or(0, |i| i + 1);
        let column = before[line_start..].chars().count() + 1;
        Location {
            path: self.path(span.source).to_owned(),
            line,
            column,
        }
    }
}
