use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use cminus_core::{TraceOptions, compile_file};
use log::info;

/// Scan, parse and type check a C-minus source file.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Source file; `.cm` is appended when no extension is given
    file: PathBuf,

    #[arg(long, help = "Echo each source line, numbered, into the listing")]
    echo_source: bool,

    #[arg(long, help = "Print every token as it is scanned")]
    trace_scan: bool,

    #[arg(long, help = "Print the syntax tree after parsing")]
    trace_parse: bool,

    #[arg(long, help = "Print the symbol table and type checking progress")]
    trace_analyze: bool,

    #[arg(long, help = "Enable every trace option")]
    trace: bool,
}

impl Cli {
    fn trace_options(&self) -> TraceOptions {
        if self.trace {
            return TraceOptions::all();
        }
        TraceOptions {
            echo_source: self.echo_source,
            trace_scan: self.trace_scan,
            trace_parse: self.trace_parse,
            trace_analyze: self.trace_analyze,
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    execute(cli)
}

fn execute(cli: Cli) -> Result<()> {
    let options = cli.trace_options();
    let compilation = compile_file(&cli.file, options)
        .with_context(|| format!("failed to compile {}", cli.file.display()))?;

    print!("{}", compilation.listing);

    if compilation.has_errors() {
        bail!(
            "{} error(s) found in {}",
            compilation.diagnostics.len(),
            cli.file.display()
        );
    }
    info!(
        "{}: {} declaration(s), {} symbol(s)",
        cli.file.display(),
        compilation.program.declarations.len(),
        compilation.symbols.len()
    );
    Ok(())
}
