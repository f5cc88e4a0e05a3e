//! Type checking pass.
//!
//! A postorder walk, so every child is typed before its parent is
//! checked. Failed rules are reported and the walk carries on.

use log::debug;

use crate::ast::{Node, NodeKind, Program};
use crate::diagnostic::Diagnostic;
use crate::session::Session;
use crate::symtab::SymbolTable;
use crate::types::Type;
use crate::walker;

pub fn type_check(program: &mut Program, symbols: &SymbolTable, session: &mut Session) {
    let before = session.error_count();
    walker::postorder(&mut program.declarations, |node| {
        check_node(node, symbols, session);
    });
    debug!("type check reported {} error(s)", session.error_count() - before);
}

fn check_node(node: &mut Node, symbols: &SymbolTable, session: &mut Session) {
    let line = node.line;
    let ty = match &node.kind {
        NodeKind::BinaryOp { op, lhs, rhs } => {
            let integer_operands = [lhs, rhs]
                .into_iter()
                .flatten()
                .all(|operand| operand.ty.is_some_and(Type::is_integer));
            if !integer_operands {
                session.report(Diagnostic::semantic(line, "operator applied to non-integer"));
            }
            Some(if op.is_relational() {
                Type::Boolean
            } else {
                Type::Integer
            })
        }
        NodeKind::Constant(_) | NodeKind::Identifier(_) => Some(Type::Integer),
        NodeKind::Parameter { ty, .. } => Some(ty.to_type()),
        // callees without a declaration are assumed to yield an int
        NodeKind::Call { name, .. } => Some(
            symbols
                .lookup(name)
                .and_then(|entry| entry.return_type)
                .unwrap_or(Type::Integer),
        ),
        NodeKind::Selection { test, .. } => {
            check_test(test.as_deref(), "if", session);
            None
        }
        NodeKind::While { test, .. } => {
            check_test(test.as_deref(), "while", session);
            None
        }
        NodeKind::Assign {
            value: Some(value), ..
        } => {
            // calls are accepted whatever their declared result
            if !value.is_call() && !value.ty.is_some_and(Type::is_integer) {
                session.report(Diagnostic::semantic(
                    value.line,
                    "assignment of non-integer value",
                ));
            }
            None
        }
        _ => None,
    };

    if ty.is_some() {
        node.ty = ty;
    }
}

fn check_test(test: Option<&Node>, keyword: &str, session: &mut Session) {
    if let Some(test) = test {
        if !test.ty.is_some_and(Type::is_boolean) {
            session.report(Diagnostic::semantic(
                test.line,
                format!("{keyword} test is not Boolean"),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyze::analyze;
    use crate::diagnostic::DiagnosticKind;
    use crate::parser::parse;
    use test_log::test;

    fn check(source: &str) -> (Program, Session) {
        let mut session = Session::default();
        let mut program = parse(source, &mut session);
        assert!(!session.has_errors(), "parse failed: {:?}", session.diagnostics());
        analyze(&mut program, &mut session);
        (program, session)
    }

    fn messages(session: &Session) -> Vec<(u32, String)> {
        session
            .diagnostics()
            .iter()
            .map(|d| (d.line, d.message.clone()))
            .collect()
    }

    fn main_statements(program: &Program) -> &[Node] {
        let last = program.declarations.last().expect("declarations");
        let NodeKind::FunctionDeclaration { body: Some(body), .. } = &last.kind else {
            panic!("last declaration is not a function");
        };
        let NodeKind::Compound { statements, .. } = &body.kind else {
            panic!("body is not a block");
        };
        statements
    }

    #[test]
    fn well_typed_arithmetic_assignment() {
        let (program, session) = check("int x; void main(void) { x = 1 + 2 * 3; }");
        assert!(!session.has_errors(), "{:?}", messages(&session));
        let statements = main_statements(&program);
        let NodeKind::Assign {
            target,
            value: Some(value),
        } = &statements[0].kind
        else {
            panic!("expected assignment");
        };
        assert_eq!(value.ty, Some(Type::Integer));
        assert_eq!(target.ty, Some(Type::Integer));
    }

    #[test]
    fn comparisons_are_boolean() {
        let (program, session) = check("void main(void) { if (x == 1) x = 1; }");
        assert!(!session.has_errors(), "{:?}", messages(&session));
        let statements = main_statements(&program);
        let NodeKind::Selection { test: Some(test), .. } = &statements[0].kind
        else {
            panic!("expected if");
        };
        assert_eq!(test.ty, Some(Type::Boolean));
    }

    #[test]
    fn integer_if_test_is_rejected_once() {
        let (_, session) = check("void main(void)\n{\n  if (1) x = 1;\n}");
        assert_eq!(messages(&session), [(3, "if test is not Boolean".to_string())]);
        assert_eq!(session.diagnostics()[0].kind, DiagnosticKind::Semantic);
    }

    #[test]
    fn integer_while_test_is_rejected() {
        let (_, session) = check("void main(void) { while (x - 1) x = x - 1; }");
        assert_eq!(messages(&session), [(1, "while test is not Boolean".to_string())]);
    }

    #[test]
    fn boolean_operand_is_not_an_integer() {
        let (_, session) = check("void main(void) {\n  x = (x < 1) + 2;\n}");
        assert_eq!(
            messages(&session),
            [(2, "operator applied to non-integer".to_string())]
        );
    }

    #[test]
    fn comparison_of_comparison_is_rejected() {
        let (_, session) = check("void main(void) { if ((a < b) == 1) x = 1; }");
        assert_eq!(
            messages(&session),
            [(1, "operator applied to non-integer".to_string())]
        );
    }

    #[test]
    fn assigning_a_comparison_is_rejected() {
        let (_, session) = check("void main(void) {\n  x =\n    y > 2;\n}");
        assert_eq!(
            messages(&session),
            [(3, "assignment of non-integer value".to_string())]
        );
    }

    #[test]
    fn assigning_a_void_call_is_accepted() {
        let (_, session) = check("void f(void) { }\nvoid main(void) { x = f(); }");
        assert!(!session.has_errors(), "{:?}", messages(&session));
    }

    #[test]
    fn void_call_in_arithmetic_is_rejected() {
        let (program, session) =
            check("void f(void) { }\nvoid main(void) {\n  x = f() + 1;\n}");
        assert_eq!(
            messages(&session),
            [(3, "operator applied to non-integer".to_string())]
        );
        let statements = main_statements(&program);
        let NodeKind::Assign { value: Some(sum), .. } = &statements[0].kind
        else {
            panic!("expected assignment");
        };
        assert_eq!(sum.ty, Some(Type::Integer));
    }

    #[test]
    fn int_calls_and_parameters_type_as_integer() {
        let (_, session) = check(
            "int twice(int n) { return n + n; }\n\
             void main(void) { x = twice(input()) * 2; if (twice(3) > input()) x = 0; }",
        );
        assert!(!session.has_errors(), "{:?}", messages(&session));
    }

    #[test]
    fn errors_are_collected_across_the_whole_program() {
        let (_, session) = check(
            "void main(void)\n\
             {\n\
               if (1) x = 1;\n\
               while (2) x = 2;\n\
               x = (1 < 2) * 3;\n\
             }",
        );
        let lines: Vec<u32> = session.diagnostics().iter().map(|d| d.line).collect();
        assert_eq!(lines, [3, 4, 5]);
        assert_eq!(session.count_of(DiagnosticKind::Semantic), 3);
    }
}
