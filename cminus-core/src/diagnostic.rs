//! Soft compiler diagnostics.

use core::fmt;

/// Which phase produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    Lexical,
    Syntax,
    Semantic,
}

impl DiagnosticKind {
    fn label(self) -> &'static str {
        match self {
            DiagnosticKind::Lexical => "Lexical error",
            DiagnosticKind::Syntax => "Syntax error",
            DiagnosticKind::Semantic => "Type error",
        }
    }
}

/// A single recoverable error tied to a source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub line: u32,
    pub message: String,
}

impl Diagnostic {
    pub fn lexical(line: u32, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Lexical, line, message)
    }

    pub fn syntax(line: u32, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Syntax, line, message)
    }

    pub fn semantic(line: u32, message: impl Into<String>) -> Self {
        Self::new(DiagnosticKind::Semantic, line, message)
    }

    fn new(kind: DiagnosticKind, line: u32, message: impl Into<String>) -> Self {
        Diagnostic {
            kind,
            line,
            message: message.into(),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {}: {}", self.kind.label(), self.line, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_kind_line_and_message() {
        let diag = Diagnostic::semantic(7, "if test is not Boolean");
        assert_eq!(diag.to_string(), "Type error at line 7: if test is not Boolean");
        let diag = Diagnostic::syntax(2, "expected ';', found '}'");
        assert_eq!(diag.to_string(), "Syntax error at line 2: expected ';', found '}'");
    }
}
