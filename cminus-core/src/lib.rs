//! Front end for the C-minus teaching language.
//!
//! The pipeline is roughly:
//!
//!   source .cm
//!     -> source     (line-buffered characters, optional echo)
//!     -> lexer      (DFA scanner, tokens)
//!     -> parser     (recursive descent, syntax tree)
//!     -> analyze    (symbol table, then type checking)
//!     -> CodeGenerator (supplied by the caller)
//!
//! Every phase shares a [`Session`] that owns the trace options, the
//! listing text and the collected diagnostics. Higher-level tools (the
//! CLI, tests) should go through [`compile_source`] or [`compile_file`]
//! rather than driving the phases by hand.

// ---------------------------------------------------------------------
// Error handling and diagnostics
// ---------------------------------------------------------------------

pub mod diagnostic;
pub mod error;
pub mod session;

// ---------------------------------------------------------------------
// Front-end: reading, scanning and parsing
// ---------------------------------------------------------------------

pub mod source;
pub mod lexer;
pub mod ast;
pub mod parser;
pub mod printer;

// ---------------------------------------------------------------------
// Semantic layers: types, symbols, tree walking, type checking
// ---------------------------------------------------------------------

pub mod types;
pub mod symtab;
pub mod walker;
pub mod analyze;
pub mod typecheck;

// ---------------------------------------------------------------------
// Compiler orchestration
// ---------------------------------------------------------------------

pub mod compiler;

// ---------------------------------------------------------------------
// Public API re-exports
// ---------------------------------------------------------------------

pub use ast::{Node, NodeKind, Program};
pub use compiler::{
    ARTIFACT_EXTENSION, CodeGenerator, Compilation, SOURCE_EXTENSION, artifact_path,
    compile_file, compile_source, resolve_source_path,
};
pub use diagnostic::{Diagnostic, DiagnosticKind};
pub use error::CoreError;
pub use session::{Session, TraceOptions};
pub use symtab::{SymbolEntry, SymbolKind, SymbolTable};
pub use types::Type;
