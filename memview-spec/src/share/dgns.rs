//! Utilities to report diagnostic messages.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use memview_diagnostics::{CodeSpan, Diagnostic};

pub use proc_macro2::Span;

pub trait HasSpan {
    fn span(&self) -> Span;
}

/// Collects the diagnostics of the compilation of a declaration file.
#[derive(Debug)]
pub struct DiagnosticContext {
    pub spec_file: PathBuf,
    pub source: String,
    sink: memview_diagnostics::DiagnosticContext,
}

impl DiagnosticContext {
    pub fn new(spec_file: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        Self {
            spec_file: spec_file.into(),
            source: source.into(),
            sink: Default::default(),
        }
    }

    pub fn error(&mut self, message: &str, span: Span) {
        self.report(Diagnostic::error(message), Some(span))
    }

    pub fn error_with_help(&mut self, message: &str, span: Span, help: &str) {
        self.report(Diagnostic::error(message).with_help(help), Some(span))
    }

    pub fn error_with_note(&mut self, message: &str, span: Span, note: &str) {
        self.report(Diagnostic::error(message).with_note(note), Some(span))
    }

    pub fn warning(&mut self, message: &str, span: Span) {
        self.report(Diagnostic::warning(message), Some(span))
    }

    /// Adds a diagnostic, pointing it at `span` when given.
    pub fn report(&mut self, diagnostic: Diagnostic, span: Option<Span>) {
        let diagnostic = match span.and_then(|span| self.code_span(span)) {
            Some(code_span) => diagnostic.with_code_span(code_span),
            None => diagnostic,
        };
        debug!("diagnostic: {:?}", diagnostic.message());
        self.sink.add_diagnostic(diagnostic);
    }

    /// Locates a token span in the source. Spans covering more than one line are cut at the
    /// end of their first line.
    pub fn code_span(&self, span: Span) -> Option<CodeSpan> {
        let start = span.start();
        let end = span.end();
        let len = if end.line == start.line {
            end.column.saturating_sub(start.column)
        } else {
            usize::MAX
        };

        match CodeSpan::from_line_column(
            &self.spec_file,
            &self.source,
            start.line,
            start.column,
            len,
        ) {
            Ok(code_span) => Some(code_span),
            Err(e) => {
                warn!("Cannot locate span {:?}: {}", span, e);
                None
            }
        }
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        self.sink.diagnostics()
    }

    pub fn has_errors(&self) -> bool {
        self.sink.has_errors()
    }

    pub fn print(&self, stderr: &mut dyn Write) -> anyhow::Result<()> {
        for diagnostic in self.diagnostics() {
            write!(stderr, "{}", diagnostic).context("while writing a diagnostic message")?;
        }
        Ok(())
    }
}
