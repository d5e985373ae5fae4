//! Builder-pattern printer for rendering diagnostics.

use std::fmt::Write;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use super::Diagnostics;
use super::message::Severity;
use crate::source_map::{SourceMap, Span};

/// Builder for rendering diagnostics with various options.
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    sources: &'s SourceMap,
    colored: bool,
    snippets: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics, sources: &'s SourceMap) -> Self {
        Self {
            diagnostics,
            sources,
            colored: false,
            snippets: true,
        }
    }

    pub fn colored(mut self, value: bool) -> Self {
        self.colored = value;
        self
    }

    /// Render source excerpts. When disabled, prints one
    /// `path:line:col: severity: message` line per diagnostic.
    pub fn snippets(mut self, value: bool) -> Self {
        self.snippets = value;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.format(&mut out).expect("String write never fails");
        out
    }

    pub fn format(&self, w: &mut impl Write) -> std::fmt::Result {
        if !self.snippets {
            return self.format_plain(w);
        }

        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diag) in self.diagnostics.iter().enumerate() {
            let source = self.sources.get(diag.span.source);
            let mut snippet = Snippet::source(source.content)
                .line_start(1)
                .path(source.path)
                .annotation(
                    AnnotationKind::Primary
                        .span(adjust_range(diag.span, source.content.len()))
                        .label(&diag.message),
                );

            let mut foreign = Vec::new();
            for related in &diag.related {
                if related.span.source == diag.span.source {
                    snippet = snippet.annotation(
                        AnnotationKind::Context
                            .span(adjust_range(related.span, source.content.len()))
                            .label(&related.message),
                    );
                } else {
                    foreign.push(related);
                }
            }

            let level = severity_to_level(diag.severity());
            let mut title_group = level.primary_title(&diag.message).element(snippet);

            for related in foreign {
                let other = self.sources.get(related.span.source);
                title_group = title_group.element(
                    Snippet::source(other.content)
                        .line_start(1)
                        .path(other.path)
                        .annotation(
                            AnnotationKind::Context
                                .span(adjust_range(related.span, other.content.len()))
                                .label(&related.message),
                        ),
                );
            }

            for hint in &diag.hints {
                title_group = title_group.element(Level::HELP.message(hint));
            }

            let report: Vec<Group> = vec![title_group];

            if i > 0 {
                w.write_char('\n')?;
            }
            write!(w, "{}", renderer.render(&report))?;
        }

        Ok(())
    }

    fn format_plain(&self, w: &mut impl Write) -> std::fmt::Result {
        for diag in self.diagnostics {
            let location = self.sources.location(diag.span);
            writeln!(w, "{}: {}: {}", location, diag.severity(), diag.message)?;
            for related in &diag.related {
                let location = self.sources.location(related.span);
                writeln!(w, "{}: note: {}", location, related.message)?;
            }
        }
        Ok(())
    }
}

fn severity_to_level(severity: Severity) -> Level<'static> {
    match severity {
        Severity::Error => Level::ERROR,
        Severity::Warning => Level::WARNING,
    }
}

fn adjust_range(span: Span, limit: usize) -> std::ops::Range<usize> {
    let range = span.range();
    if range.start == range.end {
        return range.start..(range.start + 1).min(limit);
    }
    range
}

impl Diagnostics {
    pub fn printer<'s>(&self, sources: &'s SourceMap) -> DiagnosticsPrinter<'_, 's> {
        DiagnosticsPrinter::new(self, sources)
    }
}
