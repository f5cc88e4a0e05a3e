//! Per-compilation state shared by every phase: trace options, the
//! listing and the diagnostics collector.

use log::debug;

use crate::diagnostic::{Diagnostic, DiagnosticKind};

/// Toggles for the listing output.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TraceOptions {
    /// Echo every source line, numbered, as the scanner reads it.
    pub echo_source: bool,
    /// Print each token as it is recognized.
    pub trace_scan: bool,
    /// Print the syntax tree after parsing.
    pub trace_parse: bool,
    /// Print phase boundaries and the symbol table during analysis.
    pub trace_analyze: bool,
}

impl TraceOptions {
    pub fn all() -> Self {
        TraceOptions {
            echo_source: true,
            trace_scan: true,
            trace_parse: true,
            trace_analyze: true,
        }
    }
}

/// Mutable context threaded through one compilation.
///
/// The listing is append-only; diagnostics are accumulated rather than
/// returned early so a single run reports every error it can find.
#[derive(Debug, Default)]
pub struct Session {
    pub options: TraceOptions,
    listing: String,
    diagnostics: Vec<Diagnostic>,
}

impl Session {
    pub fn new(options: TraceOptions) -> Self {
        Session {
            options,
            listing: String::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Append raw text to the listing.
    pub fn write(&mut self, text: &str) {
        self.listing.push_str(text);
    }

    /// Append `text` followed by a newline.
    pub fn write_line(&mut self, text: &str) {
        self.listing.push_str(text);
        self.listing.push('\n');
    }

    /// Record a diagnostic and render it into the listing.
    pub fn report(&mut self, diagnostic: Diagnostic) {
        debug!("recorded {diagnostic}");
        self.write_line(&diagnostic.to_string());
        self.diagnostics.push(diagnostic);
    }

    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics.len()
    }

    pub fn count_of(&self, kind: DiagnosticKind) -> usize {
        self.diagnostics.iter().filter(|d| d.kind == kind).count()
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    pub fn listing(&self) -> &str {
        &self.listing
    }

    pub fn into_parts(self) -> (String, Vec<Diagnostic>) {
        (self.listing, self.diagnostics)
    }
}
