use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::analyze::analyze;
use crate::ast::Program;
use crate::diagnostic::Diagnostic;
use crate::error::CoreError;
use crate::parser::parse;
use crate::printer::render_tree;
use crate::session::{Session, TraceOptions};
use crate::symtab::SymbolTable;

/// Appended to source paths given without an extension.
pub const SOURCE_EXTENSION: &str = "cm";
/// Extension of the generated-code artifact.
pub const ARTIFACT_EXTENSION: &str = "tm";

/// Consumer of a fully checked program. Implementations live outside
/// this crate.
pub trait CodeGenerator {
    fn generate(
        &mut self,
        program: &Program,
        symbols: &SymbolTable,
        artifact: &Path,
    ) -> Result<(), CoreError>;
}

/// Everything the front end produced for one translation unit.
#[derive(Debug)]
pub struct Compilation {
    pub program: Program,
    pub symbols: SymbolTable,
    pub diagnostics: Vec<Diagnostic>,
    pub listing: String,
}

impl Compilation {
    pub fn has_errors(&self) -> bool {
        !self.diagnostics.is_empty()
    }

    /// Hand the checked tree to `generator`, unless any phase reported an
    /// error.
    pub fn generate_with<G>(&self, generator: &mut G, artifact: &Path) -> Result<(), CoreError>
    where
        G: CodeGenerator + ?Sized,
    {
        if self.has_errors() {
            return Err(CoreError::CompilationFailed(self.diagnostics.len()));
        }
        debug!("handing off to code generator for {}", artifact.display());
        generator.generate(&self.program, &self.symbols, artifact)
    }
}

/// Run the front end over in-memory source text.
pub fn compile_source(source: &str, options: TraceOptions) -> Compilation {
    let mut session = Session::new(options);
    let (program, symbols) = run_phases(source, &mut session);
    let (listing, diagnostics) = session.into_parts();
    Compilation {
        program,
        symbols,
        diagnostics,
        listing,
    }
}

/// Read and compile the file at `path`, adding the `.cm` extension when
/// the path has none.
pub fn compile_file(
    path: impl AsRef<Path>,
    options: TraceOptions,
) -> Result<Compilation, CoreError> {
    let path = resolve_source_path(path);
    let source = fs::read_to_string(&path).map_err(|source| CoreError::SourceIo {
        path: path.clone(),
        source,
    })?;

    let mut session = Session::new(options);
    session.write(&format!("\nC-MINUS COMPILATION: {}\n", path.display()));
    let (program, symbols) = run_phases(&source, &mut session);
    let (listing, diagnostics) = session.into_parts();
    Ok(Compilation {
        program,
        symbols,
        diagnostics,
        listing,
    })
}

fn run_phases(source: &str, session: &mut Session) -> (Program, SymbolTable) {
    let mut program = parse(source, session);
    if session.options.trace_parse {
        session.write("\nSyntax tree:\n");
        session.write(&render_tree(&program));
    }

    if session.has_errors() {
        debug!(
            "skipping semantic analysis after {} parse error(s)",
            session.error_count()
        );
        return (program, SymbolTable::new());
    }
    let symbols = analyze(&mut program, session);
    (program, symbols)
}

pub fn resolve_source_path(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.extension().is_some() {
        path.to_path_buf()
    } else {
        path.with_extension(SOURCE_EXTENSION)
    }
}

/// Name of the generated-code file for `source`.
pub fn artifact_path(source: impl AsRef<Path>) -> PathBuf {
    source.as_ref().with_extension(ARTIFACT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostic::DiagnosticKind;
    use tempfile::tempdir;

    const PROGRAM: &str = "\
/* greatest common divisor */
int gcd(int u, int v)
{
  if (v == 0) return u;
  else return gcd(v, u - u / v * v);
}

void main(void)
{
  int x;
  int y;
  x = input();
  y = input();
  output(gcd(x, y));
}
";

    #[derive(Default)]
    struct Recording {
        calls: Vec<(usize, usize, PathBuf)>,
    }

    impl CodeGenerator for Recording {
        fn generate(
            &mut self,
            program: &Program,
            symbols: &SymbolTable,
            artifact: &Path,
        ) -> Result<(), CoreError> {
            self.calls.push((
                program.declarations.len(),
                symbols.len(),
                artifact.to_path_buf(),
            ));
            Ok(())
        }
    }

    #[test]
    fn clean_program_has_no_diagnostics() {
        let compilation = compile_source(PROGRAM, TraceOptions::default());
        assert!(!compilation.has_errors(), "{}", compilation.listing);
        assert_eq!(compilation.program.declarations.len(), 2);
        assert_eq!(compilation.symbols.location("gcd"), Some(0));
        assert_eq!(compilation.symbols.location("main"), Some(3));
        assert!(compilation.listing.is_empty());
    }

    #[test]
    fn parse_errors_skip_analysis() {
        let compilation = compile_source(
            "int x\nvoid main(void) { if (1) x = 1; }",
            TraceOptions::default(),
        );
        assert_eq!(compilation.diagnostics.len(), 1);
        assert_eq!(compilation.diagnostics[0].kind, DiagnosticKind::Syntax);
        assert!(compilation.symbols.is_empty());
    }

    #[test]
    fn generator_runs_only_without_errors() {
        let artifact = PathBuf::from("gcd.tm");

        let good = compile_source(PROGRAM, TraceOptions::default());
        let mut generator = Recording::default();
        good.generate_with(&mut generator, &artifact).expect("generate");
        assert_eq!(generator.calls, vec![(2, 8, artifact.clone())]);

        let bad = compile_source(
            "void main(void) { if (1) x = 1; }",
            TraceOptions::default(),
        );
        let mut generator = Recording::default();
        let err = bad.generate_with(&mut generator, &artifact).unwrap_err();
        assert!(matches!(err, CoreError::CompilationFailed(1)));
        assert!(generator.calls.is_empty());
    }

    #[test]
    fn full_trace_orders_sections() {
        let compilation =
            compile_source("int x;\nvoid main(void) { x = 1; }", TraceOptions::all());
        let listing = &compilation.listing;
        let echo = listing.find("   1: int x;").expect("echo");
        let token = listing.find("\t1: reserved word: int").expect("token trace");
        let tree = listing.find("Syntax tree:").expect("tree");
        let table = listing.find("Symbol table:").expect("table");
        let done = listing.find("Type Checking Finished").expect("done");
        assert!(echo < token);
        assert!(token < tree && tree < table && table < done);
        assert!(listing.contains("Function Declaration: main (returns void)"));
    }

    #[test]
    fn diagnostics_are_written_to_the_listing() {
        let compilation = compile_source(
            "void main(void)\n{\n  while (1) x = 1;\n}",
            TraceOptions::default(),
        );
        assert_eq!(
            compilation.listing,
            "Type error at line 3: while test is not Boolean\n"
        );
    }

    #[test]
    fn repeated_runs_are_identical() {
        let source = "int a;\nvoid main(void) {\n  if (a) a = (a < 1) + 1;\n  a = f();\n}";
        let first = compile_source(source, TraceOptions::all());
        let second = compile_source(source, TraceOptions::all());
        assert_eq!(first.diagnostics, second.diagnostics);
        assert_eq!(first.symbols, second.symbols);
        assert_eq!(first.listing, second.listing);
        assert_eq!(first.diagnostics.len(), 2);
    }

    #[test]
    fn compiles_file_and_appends_extension() {
        let dir = tempdir().expect("tempdir");
        fs::write(dir.path().join("prog.cm"), PROGRAM).expect("write source");

        let compilation =
            compile_file(dir.path().join("prog"), TraceOptions::default()).expect("compile");
        assert!(!compilation.has_errors());
        assert!(compilation.listing.starts_with("\nC-MINUS COMPILATION: "));
        assert!(compilation.listing.contains("prog.cm"));
    }

    #[test]
    fn missing_file_is_a_hard_error() {
        let dir = tempdir().expect("tempdir");
        let err =
            compile_file(dir.path().join("absent.cm"), TraceOptions::default()).unwrap_err();
        assert!(matches!(err, CoreError::SourceIo { .. }));
        assert!(err.to_string().contains("absent.cm"));
    }

    #[test]
    fn path_helpers() {
        assert_eq!(resolve_source_path("sample"), PathBuf::from("sample.cm"));
        assert_eq!(resolve_source_path("sample.txt"), PathBuf::from("sample.txt"));
        assert_eq!(artifact_path("dir/sample.cm"), PathBuf::from("dir/sample.tm"));
    }
}
