//! Rendering of diagnostics, annotated against grammar source when it is available.

use std::fmt::{self, Write};
use std::ops::Range;

use annotate_snippets::{AnnotationKind, Group, Level, Renderer, Snippet};

use super::message::{DiagnosticMessage, Severity};
use super::Diagnostics;

/// Configurable renderer for a [`Diagnostics`] collection.
///
/// With source text each diagnostic becomes an annotated snippet; without,
/// it is one line in the `Display` form of [`DiagnosticMessage`].
pub struct DiagnosticsPrinter<'d, 's> {
    diagnostics: &'d Diagnostics,
    source: Option<&'s str>,
    path: Option<&'s str>,
    colored: bool,
}

impl<'d, 's> DiagnosticsPrinter<'d, 's> {
    pub fn new(diagnostics: &'d Diagnostics) -> Self {
        Self {
            diagnostics,
            source: None,
            path: None,
            colored: false,
        }
    }

    /// Grammar text the ranges point into.
    pub fn source(mut self, source: &'s str) -> Self {
        self.source = Some(source);
        self
    }

    /// File name shown in snippet headers.
    pub fn path(mut self, path: &'s str) -> Self {
        self.path = Some(path);
        self
    }

    /// ANSI styling for terminals.
    pub fn colored(mut self, colored: bool) -> Self {
        self.colored = colored;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_to(&mut out).expect("String write never fails");
        out
    }

    pub fn write_to(&self, w: &mut impl Write) -> fmt::Result {
        let renderer = if self.colored {
            Renderer::styled()
        } else {
            Renderer::plain()
        };

        for (i, diagnostic) in self.diagnostics.iter().enumerate() {
            if i > 0 {
                w.write_char('\n')?;
            }
            match self.source {
                Some(source) => {
                    let report = self.annotated(diagnostic, source);
                    write!(w, "{}", renderer.render(&report))?;
                }
                None => write!(w, "{diagnostic}")?,
            }
        }
        Ok(())
    }

    fn annotated<'a>(&'a self, diagnostic: &'a DiagnosticMessage, source: &'a str) -> Vec<Group<'a>> {
        let span = underline(diagnostic, source.len());
        let mut snippet = Snippet::source(source)
            .line_start(1)
            .annotation(AnnotationKind::Primary.span(span).label(diagnostic.message()));
        if let Some(path) = self.path {
            snippet = snippet.path(path);
        }

        let level = match diagnostic.severity() {
            Severity::Error => Level::ERROR,
            Severity::Warning => Level::WARNING,
        };
        let title = level.primary_title(diagnostic.message()).element(snippet);
        std::iter::once(title)
            .chain(
                diagnostic
                    .hints()
                    .iter()
                    .map(|hint| Group::with_title(Level::HELP.secondary_title(hint))),
            )
            .collect()
    }
}

/// Byte span to underline, clamped to the source; empty ranges widen to one byte.
fn underline(diagnostic: &DiagnosticMessage, len: usize) -> Range<usize> {
    let range = diagnostic.range();
    let start = usize::from(range.start()).min(len);
    let end = usize::from(range.end()).min(len);
    if start < end {
        start..end
    } else {
        start..(start + 1).min(len)
    }
}
