use std::path::PathBuf;

use thiserror::Error;

/// Failures that stop a compilation run outright.
///
/// Lexical, syntax and type errors are not represented here: they are
/// recorded as [`crate::diagnostic::Diagnostic`]s so that one run can
/// surface as many of them as possible.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("failed to read source {path}: {source}")]
    SourceIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("compilation failed with {0} error(s)")]
    CompilationFailed(usize),
    #[error("code generation failed: {0}")]
    CodeGen(String),
}
