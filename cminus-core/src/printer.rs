//! Linearized syntax tree dump for the listing.

use core::fmt::{self, Write};

use crate::ast::{Node, NodeKind, Program};

const INDENT: usize = 2;

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for node in &self.declarations {
            write_node(f, node, 0)?;
        }
        Ok(())
    }
}

/// Render the tree one node per line, children indented under parents.
pub fn render_tree(program: &Program) -> String {
    program.to_string()
}

fn write_node(out: &mut impl Write, node: &Node, depth: usize) -> fmt::Result {
    write!(out, "{:width$}", "", width = depth * INDENT)?;
    match &node.kind {
        NodeKind::Selection { .. } => writeln!(out, "If")?,
        NodeKind::While { .. } => writeln!(out, "While")?,
        NodeKind::Assign { target, value } => {
            writeln!(out, "Assign to: {}", target.name().unwrap_or_default())?;
            if let Some(value) = value {
                write_node(out, value, depth + 1)?;
            }
            return Ok(());
        }
        NodeKind::Return { .. } => writeln!(out, "Return")?,
        NodeKind::Compound { .. } => writeln!(out, "Compound")?,
        NodeKind::VarDeclaration { ty, name } => {
            writeln!(out, "Variable Declaration: {name} ({})", ty.keyword())?
        }
        NodeKind::FunctionDeclaration {
            return_type, name, ..
        } => writeln!(
            out,
            "Function Declaration: {name} (returns {})",
            return_type.keyword()
        )?,
        NodeKind::BinaryOp { op, .. } => writeln!(out, "Op: {}", op.symbol())?,
        NodeKind::Constant(value) => writeln!(out, "Const: {value}")?,
        NodeKind::Identifier(name) => writeln!(out, "Id: {name}")?,
        NodeKind::Parameter { ty, name } => writeln!(out, "Parameter: {name} ({})", ty.keyword())?,
        NodeKind::Call { name, .. } => writeln!(out, "Call: {name}")?,
    }
    for child in node.children() {
        write_node(out, child, depth + 1)?;
    }
    Ok(())
}
