//! Semantic analysis: symbol table construction followed by type
//! checking, both driven by the generic tree walker.

use log::debug;

use crate::ast::{NodeKind, Program};
use crate::session::Session;
use crate::symtab::{SymbolKind, SymbolTable};
use crate::typecheck::type_check;
use crate::walker;

/// Run both semantic passes over `program`, annotating it in place.
pub fn analyze(program: &mut Program, session: &mut Session) -> SymbolTable {
    if session.options.trace_analyze {
        session.write("\nBuilding Symbol Table...\n");
    }
    let symbols = build_symbol_table(program, session);

    if session.options.trace_analyze {
        session.write("\nChecking Types...\n");
    }
    type_check(program, &symbols, session);

    if session.options.trace_analyze {
        session.write("\nType Checking Finished\n");
    }
    symbols
}

/// Preorder pass recording every declaration and reference.
pub fn build_symbol_table(program: &mut Program, session: &mut Session) -> SymbolTable {
    let mut symbols = SymbolTable::new();
    walker::preorder(&mut program.declarations, |node| {
        let line = node.line;
        match &node.kind {
            NodeKind::VarDeclaration { name, .. }
            | NodeKind::Parameter { name, .. }
            | NodeKind::Identifier(name) => {
                symbols.insert(name, line, SymbolKind::Variable);
            }
            NodeKind::FunctionDeclaration {
                name, return_type, ..
            } => {
                let entry = symbols.insert(name, line, SymbolKind::Function);
                entry.return_type = Some(return_type.to_type());
            }
            NodeKind::Call { name, .. } => {
                symbols.insert(name, line, SymbolKind::Function);
            }
            _ => {}
        }
    });
    debug!("symbol table holds {} names", symbols.len());

    if session.options.trace_analyze {
        session.write("\nSymbol table:\n\n");
        session.write(&symbols.to_string());
    }
    symbols
}
