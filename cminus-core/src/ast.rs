//! Syntax tree produced by the parser.
//!
//! Each node owns its children outright; lists (declarations, block
//! contents, parameters, arguments) are plain vectors in source order.
//! Child slots the parser could not fill after an error are `None`.

use crate::lexer::TokenKind;
use crate::types::Type;

/// A whole translation unit: the top-level declarations in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub declarations: Vec<Node>,
}

/// `int` or `void` as written in a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeSpecifier {
    Int,
    Void,
}

impl TypeSpecifier {
    pub fn to_type(self) -> Type {
        match self {
            TypeSpecifier::Int => Type::Integer,
            TypeSpecifier::Void => Type::Void,
        }
    }

    pub fn keyword(self) -> &'static str {
        match self {
            TypeSpecifier::Int => "int",
            TypeSpecifier::Void => "void",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    Add,
    Sub,
    Mul,
    Div,
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

impl BinaryOperator {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        let op = match kind {
            TokenKind::Plus => BinaryOperator::Add,
            TokenKind::Minus => BinaryOperator::Sub,
            TokenKind::Times => BinaryOperator::Mul,
            TokenKind::Over => BinaryOperator::Div,
            TokenKind::Lt => BinaryOperator::Lt,
            TokenKind::Le => BinaryOperator::Le,
            TokenKind::Gt => BinaryOperator::Gt,
            TokenKind::Ge => BinaryOperator::Ge,
            TokenKind::Eq => BinaryOperator::Eq,
            TokenKind::Ne => BinaryOperator::Ne,
            _ => return None,
        };
        Some(op)
    }

    /// Comparison operators yield a Boolean rather than an Integer.
    pub fn is_relational(self) -> bool {
        matches!(
            self,
            BinaryOperator::Lt
                | BinaryOperator::Le
                | BinaryOperator::Gt
                | BinaryOperator::Ge
                | BinaryOperator::Eq
                | BinaryOperator::Ne
        )
    }

    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOperator::Add => "+",
            BinaryOperator::Sub => "-",
            BinaryOperator::Mul => "*",
            BinaryOperator::Div => "/",
            BinaryOperator::Lt => "<",
            BinaryOperator::Le => "<=",
            BinaryOperator::Gt => ">",
            BinaryOperator::Ge => ">=",
            BinaryOperator::Eq => "==",
            BinaryOperator::Ne => "!=",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeCategory {
    Statement,
    Expression,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    // Statements
    Selection {
        test: Option<Box<Node>>,
        then_branch: Option<Box<Node>>,
        else_branch: Option<Box<Node>>,
    },
    While {
        test: Option<Box<Node>>,
        body: Option<Box<Node>>,
    },
    Assign {
        /// Always an [`NodeKind::Identifier`].
        target: Box<Node>,
        value: Option<Box<Node>>,
    },
    Return {
        value: Option<Box<Node>>,
    },
    Compound {
        locals: Vec<Node>,
        statements: Vec<Node>,
    },
    VarDeclaration {
        ty: TypeSpecifier,
        name: String,
    },
    FunctionDeclaration {
        return_type: TypeSpecifier,
        name: String,
        params: Vec<Node>,
        body: Option<Box<Node>>,
    },

    // Expressions
    BinaryOp {
        op: BinaryOperator,
        lhs: Option<Box<Node>>,
        rhs: Option<Box<Node>>,
    },
    Constant(i32),
    Identifier(String),
    Parameter {
        ty: TypeSpecifier,
        name: String,
    },
    Call {
        name: String,
        args: Vec<Node>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub line: u32,
    pub kind: NodeKind,
    /// Filled in by the type checker, for expressions only.
    pub ty: Option<Type>,
}

impl Node {
    pub fn new(line: u32, kind: NodeKind) -> Self {
        Node {
            line,
            kind,
            ty: None,
        }
    }

    pub fn category(&self) -> NodeCategory {
        match self.kind {
            NodeKind::Selection { .. }
            | NodeKind::While { .. }
            | NodeKind::Assign { .. }
            | NodeKind::Return { .. }
            | NodeKind::Compound { .. }
            | NodeKind::VarDeclaration { .. }
            | NodeKind::FunctionDeclaration { .. } => NodeCategory::Statement,
            NodeKind::BinaryOp { .. }
            | NodeKind::Constant(_)
            | NodeKind::Identifier(_)
            | NodeKind::Parameter { .. }
            | NodeKind::Call { .. } => NodeCategory::Expression,
        }
    }

    /// The name a node declares or refers to, if any.
    pub fn name(&self) -> Option<&str> {
        match &self.kind {
            NodeKind::VarDeclaration { name, .. }
            | NodeKind::FunctionDeclaration { name, .. }
            | NodeKind::Identifier(name)
            | NodeKind::Parameter { name, .. }
            | NodeKind::Call { name, .. } => Some(name),
            NodeKind::Assign { target, .. } => target.name(),
            _ => None,
        }
    }

    pub fn is_call(&self) -> bool {
        matches!(self.kind, NodeKind::Call { .. })
    }

    /// Children in source order, skipping empty slots.
    pub fn children(&self) -> Vec<&Node> {
        let mut children = Vec::new();
        match &self.kind {
            NodeKind::Selection {
                test,
                then_branch,
                else_branch,
            } => {
                children.extend(test.as_deref());
                children.extend(then_branch.as_deref());
                children.extend(else_branch.as_deref());
            }
            NodeKind::While { test, body } => {
                children.extend(test.as_deref());
                children.extend(body.as_deref());
            }
            NodeKind::Assign { target, value } => {
                children.push(target.as_ref());
                children.extend(value.as_deref());
            }
            NodeKind::Return { value } => children.extend(value.as_deref()),
            NodeKind::Compound { locals, statements } => {
                children.extend(locals.iter());
                children.extend(statements.iter());
            }
            NodeKind::FunctionDeclaration { params, body, .. } => {
                children.extend(params.iter());
                children.extend(body.as_deref());
            }
            NodeKind::BinaryOp { lhs, rhs, .. } => {
                children.extend(lhs.as_deref());
                children.extend(rhs.as_deref());
            }
            NodeKind::Call { args, .. } => children.extend(args.iter()),
            NodeKind::VarDeclaration { .. }
            | NodeKind::Constant(_)
            | NodeKind::Identifier(_)
            | NodeKind::Parameter { .. } => {}
        }
        children
    }

    /// Mutable counterpart of [`Node::children`].
    pub fn children_mut(&mut self) -> Vec<&mut Node> {
        let mut children = Vec::new();
        match &mut self.kind {
            NodeKind::Selection {
                test,
                then_branch,
                else_branch,
            } => {
                children.extend(test.as_deref_mut());
                children.extend(then_branch.as_deref_mut());
                children.extend(else_branch.as_deref_mut());
            }
            NodeKind::While { test, body } => {
                children.extend(test.as_deref_mut());
                children.extend(body.as_deref_mut());
            }
            NodeKind::Assign { target, value } => {
                children.push(target.as_mut());
                children.extend(value.as_deref_mut());
            }
            NodeKind::Return { value } => children.extend(value.as_deref_mut()),
            NodeKind::Compound { locals, statements } => {
                children.extend(locals.iter_mut());
                children.extend(statements.iter_mut());
            }
            NodeKind::FunctionDeclaration { params, body, .. } => {
                children.extend(params.iter_mut());
                children.extend(body.as_deref_mut());
            }
            NodeKind::BinaryOp { lhs, rhs, .. } => {
                children.extend(lhs.as_deref_mut());
                children.extend(rhs.as_deref_mut());
            }
            NodeKind::Call { args, .. } => children.extend(args.iter_mut()),
            NodeKind::VarDeclaration { .. }
            | NodeKind::Constant(_)
            | NodeKind::Identifier(_)
            | NodeKind::Parameter { .. } => {}
        }
        children
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(line: u32, name: &str) -> Node {
        Node::new(line, NodeKind::Identifier(name.to_string()))
    }

    #[test]
    fn categories_follow_variants() {
        let stmt = Node::new(1, NodeKind::Return { value: None });
        assert_eq!(stmt.category(), NodeCategory::Statement);
        assert_eq!(ident(1, "x").category(), NodeCategory::Expression);
    }

    #[test]
    fn children_skip_empty_slots_and_keep_order() {
        let node = Node::new(
            3,
            NodeKind::Selection {
                test: Some(Box::new(ident(3, "a"))),
                then_branch: None,
                else_branch: Some(Box::new(ident(4, "b"))),
            },
        );
        let names: Vec<_> = node.children().iter().filter_map(|c| c.name()).collect();
        assert_eq!(names, ["a", "b"]);
    }

    #[test]
    fn assignment_reports_target_name() {
        let node = Node::new(
            2,
            NodeKind::Assign {
                target: Box::new(ident(2, "x")),
                value: Some(Box::new(Node::new(2, NodeKind::Constant(1)))),
            },
        );
        assert_eq!(node.name(), Some("x"));
        assert_eq!(node.children().len(), 2);
    }

    #[test]
    fn only_comparisons_are_relational() {
        assert!(BinaryOperator::Ne.is_relational());
        assert!(BinaryOperator::Le.is_relational());
        assert!(!BinaryOperator::Add.is_relational());
        assert!(!BinaryOperator::Div.is_relational());
        assert_eq!(BinaryOperator::from_token(TokenKind::Semi), None);
    }
}
