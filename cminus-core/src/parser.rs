//! Recursive-descent parser for C-minus.
//!
//! ```text
//! program        -> declaration { declaration }
//! declaration    -> type ID ';' | type ID '(' params ')' compound
//! params         -> 'void' | param { ',' param }
//! param          -> type ID
//! compound       -> '{' { type ID ';' } { statement } '}'
//! statement      -> 'if' '(' expression ')' statement [ 'else' statement ]
//!                 | 'while' '(' expression ')' statement
//!                 | 'return' [ expression ] ';'
//!                 | compound
//!                 | expression ';' | ';'
//! expression     -> ID '=' expression | simple
//! simple         -> additive [ relop additive ]
//! additive       -> term { ('+' | '-') term }
//! term           -> factor { ('*' | '/') factor }
//! factor         -> '(' expression ')' | NUM | ID | ID '(' [ expression { ',' expression } ] ')'
//! ```
//!
//! An assignment is only accepted as a whole expression statement; one
//! used as a test, argument, operand or assigned value is reported.
//!
//! Errors never abort the parse. A mismatched token is reported and left
//! in place; a token that cannot start a declaration, statement or factor
//! is reported and discarded. A token is reported at most once, however
//! many rules reject it. Every rule tolerates empty results from the
//! rules it calls.

use log::debug;

use crate::ast::{BinaryOperator, Node, NodeKind, Program, TypeSpecifier};
use crate::diagnostic::Diagnostic;
use crate::lexer::{Scanner, Token, TokenKind};
use crate::session::Session;

/// Parse a whole translation unit, recording problems in `session`.
pub fn parse(source: &str, session: &mut Session) -> Program {
    Parser::new(source, session).program()
}

pub struct Parser<'src, 's> {
    scanner: Scanner<'src>,
    session: &'s mut Session,
    token: Token,
    /// Tokens consumed so far; identifies the current token.
    position: usize,
    /// Position of the last token reported as unexpected.
    reported_at: Option<usize>,
}

impl<'src, 's> Parser<'src, 's> {
    pub fn new(source: &'src str, session: &'s mut Session) -> Self {
        let mut scanner = Scanner::new(source);
        let token = scanner.next_token(session);
        Parser {
            scanner,
            session,
            token,
            position: 0,
            reported_at: None,
        }
    }

    pub fn program(&mut self) -> Program {
        let mut declarations = Vec::new();
        loop {
            declarations.extend(self.declaration());
            if self.token.kind == TokenKind::EndFile {
                break;
            }
        }
        debug!("parsed {} top-level declarations", declarations.len());
        Program { declarations }
    }

    // -----------------------------------------------------------------
    // Token handling
    // -----------------------------------------------------------------

    fn advance(&mut self) {
        self.token = self.scanner.next_token(self.session);
        self.position += 1;
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.token.kind == kind
    }

    /// Consume the current token if it is `expected`; otherwise report it
    /// and leave it for the next rule.
    fn match_token(&mut self, expected: TokenKind) -> bool {
        if self.check(expected) {
            self.advance();
            true
        } else {
            self.unexpected(&expected.to_string());
            false
        }
    }

    /// Report the current token, at most once however many rules reject it.
    fn unexpected(&mut self, expected: &str) {
        if self.reported_at == Some(self.position) {
            return;
        }
        self.reported_at = Some(self.position);
        let found = &self.token;
        let diagnostic = if found.kind == TokenKind::Error {
            Diagnostic::lexical(found.line, format!("invalid token '{}'", found.lexeme))
        } else {
            Diagnostic::syntax(
                found.line,
                format!("unexpected token -> {found} (expected {expected})"),
            )
        };
        self.session.report(diagnostic);
    }

    /// Panic-mode recovery: report the current token and drop it.
    fn skip_unexpected(&mut self, expected: &str) {
        self.unexpected(expected);
        debug!("discarding {:?} at line {}", self.token.kind, self.token.line);
        self.advance();
    }

    fn identifier(&mut self) -> Option<String> {
        if self.check(TokenKind::Id) {
            let name = self.token.lexeme.clone();
            self.advance();
            Some(name)
        } else {
            self.unexpected(&TokenKind::Id.to_string());
            None
        }
    }

    fn type_specifier(&mut self) -> Option<TypeSpecifier> {
        let ty = match self.token.kind {
            TokenKind::Int => TypeSpecifier::Int,
            TokenKind::Void => TypeSpecifier::Void,
            _ => {
                self.skip_unexpected("a type specifier");
                return None;
            }
        };
        self.advance();
        Some(ty)
    }

    // -----------------------------------------------------------------
    // Declarations
    // -----------------------------------------------------------------

    fn declaration(&mut self) -> Option<Node> {
        let line = self.token.line;
        let ty = self.type_specifier()?;
        let name = self.identifier();

        if self.check(TokenKind::LParen) {
            self.advance();
            let params = self.params();
            self.match_token(TokenKind::RParen);
            let body = self.compound_statement();
            name.map(|name| {
                Node::new(
                    line,
                    NodeKind::FunctionDeclaration {
                        return_type: ty,
                        name,
                        params,
                        body: Some(Box::new(body)),
                    },
                )
            })
        } else {
            self.match_token(TokenKind::Semi);
            name.map(|name| Node::new(line, NodeKind::VarDeclaration { ty, name }))
        }
    }

    fn params(&mut self) -> Vec<Node> {
        let mut params = Vec::new();
        match self.token.kind {
            TokenKind::Void => {
                let line = self.token.line;
                self.advance();
                // a bare `void` means "no parameters"
                if !self.check(TokenKind::Id) {
                    return params;
                }
                params.extend(self.identifier().map(|name| {
                    Node::new(
                        line,
                        NodeKind::Parameter {
                            ty: TypeSpecifier::Void,
                            name,
                        },
                    )
                }));
            }
            TokenKind::RParen => {
                self.unexpected("a parameter list or 'void'");
                return params;
            }
            _ => params.extend(self.param()),
        }

        while self.check(TokenKind::Comma) {
            self.advance();
            params.extend(self.param());
        }
        params
    }

    fn param(&mut self) -> Option<Node> {
        let line = self.token.line;
        let ty = self.type_specifier()?;
        let name = self.identifier()?;
        Some(Node::new(line, NodeKind::Parameter { ty, name }))
    }

    fn local_declaration(&mut self) -> Option<Node> {
        let line = self.token.line;
        let ty = self.type_specifier()?;
        let name = self.identifier();
        self.match_token(TokenKind::Semi);
        name.map(|name| Node::new(line, NodeKind::VarDeclaration { ty, name }))
    }

    // -----------------------------------------------------------------
    // Statements
    // -----------------------------------------------------------------

    fn compound_statement(&mut self) -> Node {
        let line = self.token.line;
        self.match_token(TokenKind::LBrace);

        let mut locals = Vec::new();
        while matches!(self.token.kind, TokenKind::Int | TokenKind::Void) {
            locals.extend(self.local_declaration());
        }

        let mut statements = Vec::new();
        while !matches!(self.token.kind, TokenKind::RBrace | TokenKind::EndFile) {
            statements.extend(self.statement());
        }
        self.match_token(TokenKind::RBrace);

        Node::new(line, NodeKind::Compound { locals, statements })
    }

    fn statement(&mut self) -> Option<Node> {
        match self.token.kind {
            TokenKind::If => Some(self.selection_statement()),
            TokenKind::While => Some(self.iteration_statement()),
            TokenKind::Return => Some(self.return_statement()),
            TokenKind::LBrace => Some(self.compound_statement()),
            TokenKind::Id => self.expression_statement(),
            TokenKind::Semi => {
                self.advance();
                None
            }
            _ => {
                self.skip_unexpected("a statement");
                None
            }
        }
    }

    fn selection_statement(&mut self) -> Node {
        let line = self.token.line;
        self.match_token(TokenKind::If);
        self.match_token(TokenKind::LParen);
        let test = self.value();
        self.match_token(TokenKind::RParen);
        let then_branch = self.statement();
        // binds to the nearest unmatched `if`
        let else_branch = if self.check(TokenKind::Else) {
            self.advance();
            self.statement()
        } else {
            None
        };
        Node::new(
            line,
            NodeKind::Selection {
                test: test.map(Box::new),
                then_branch: then_branch.map(Box::new),
                else_branch: else_branch.map(Box::new),
            },
        )
    }

    fn iteration_statement(&mut self) -> Node {
        let line = self.token.line;
        self.match_token(TokenKind::While);
        self.match_token(TokenKind::LParen);
        let test = self.value();
        self.match_token(TokenKind::RParen);
        let body = self.statement();
        Node::new(
            line,
            NodeKind::While {
                test: test.map(Box::new),
                body: body.map(Box::new),
            },
        )
    }

    fn return_statement(&mut self) -> Node {
        let line = self.token.line;
        self.match_token(TokenKind::Return);
        let value = if self.check(TokenKind::Semi) {
            None
        } else {
            self.value()
        };
        self.match_token(TokenKind::Semi);
        Node::new(
            line,
            NodeKind::Return {
                value: value.map(Box::new),
            },
        )
    }

    fn expression_statement(&mut self) -> Option<Node> {
        let line = self.token.line;
        let expr = self.expression()?;
        self.match_token(TokenKind::Semi);
        match expr.kind {
            NodeKind::Assign { .. } | NodeKind::Call { .. } => Some(expr),
            _ => {
                self.session.report(Diagnostic::syntax(
                    line,
                    "expression statement must be an assignment or a call",
                ));
                None
            }
        }
    }

    // -----------------------------------------------------------------
    // Expressions
    // -----------------------------------------------------------------

    /// An expression whose result is used. Assignments are statements, so
    /// one appearing here is reported.
    fn value(&mut self) -> Option<Node> {
        let expr = self.expression()?;
        if matches!(expr.kind, NodeKind::Assign { .. }) {
            self.session.report(Diagnostic::syntax(
                expr.line,
                "assignment cannot be used as a value",
            ));
        }
        Some(expr)
    }

    fn expression(&mut self) -> Option<Node> {
        let line = self.token.line;
        let lhs = self.simple_expression()?;
        if self.check(TokenKind::Assign) && matches!(lhs.kind, NodeKind::Identifier(_)) {
            self.advance();
            let value = self.value();
            return Some(Node::new(
                line,
                NodeKind::Assign {
                    target: Box::new(lhs),
                    value: value.map(Box::new),
                },
            ));
        }
        Some(lhs)
    }

    /// At most one comparison per expression.
    fn simple_expression(&mut self) -> Option<Node> {
        let lhs = self.additive_expression();
        match BinaryOperator::from_token(self.token.kind) {
            Some(op) if op.is_relational() => {
                let line = self.token.line;
                self.advance();
                let rhs = self.additive_expression();
                Some(binary(line, op, lhs, rhs))
            }
            _ => lhs,
        }
    }

    fn additive_expression(&mut self) -> Option<Node> {
        let mut lhs = self.term();
        while matches!(self.token.kind, TokenKind::Plus | TokenKind::Minus) {
            lhs = self.continue_binary(lhs, Self::term);
        }
        lhs
    }

    fn term(&mut self) -> Option<Node> {
        let mut lhs = self.factor();
        while matches!(self.token.kind, TokenKind::Times | TokenKind::Over) {
            lhs = self.continue_binary(lhs, Self::factor);
        }
        lhs
    }

    /// Consume the operator under the cursor and fold `lhs` with the next
    /// operand into a left-associative node.
    fn continue_binary(
        &mut self,
        lhs: Option<Node>,
        operand: fn(&mut Self) -> Option<Node>,
    ) -> Option<Node> {
        let line = self.token.line;
        let op = BinaryOperator::from_token(self.token.kind)?;
        self.advance();
        let rhs = operand(self);
        Some(binary(line, op, lhs, rhs))
    }

    fn factor(&mut self) -> Option<Node> {
        let line = self.token.line;
        match self.token.kind {
            TokenKind::LParen => {
                self.advance();
                let expr = self.value();
                self.match_token(TokenKind::RParen);
                expr
            }
            TokenKind::Num => {
                let value = match self.token.lexeme.parse::<i32>() {
                    Ok(value) => value,
                    Err(_) => {
                        self.session.report(Diagnostic::lexical(
                            line,
                            format!("numeric literal '{}' is out of range", self.token.lexeme),
                        ));
                        0
                    }
                };
                self.advance();
                Some(Node::new(line, NodeKind::Constant(value)))
            }
            TokenKind::Id => {
                let name = self.token.lexeme.clone();
                self.advance();
                if self.check(TokenKind::LParen) {
                    let args = self.arguments();
                    Some(Node::new(line, NodeKind::Call { name, args }))
                } else {
                    Some(Node::new(line, NodeKind::Identifier(name)))
                }
            }
            _ => {
                self.skip_unexpected("an expression");
                None
            }
        }
    }

    fn arguments(&mut self) -> Vec<Node> {
        let mut args = Vec::new();
        self.match_token(TokenKind::LParen);
        if !self.check(TokenKind::RParen) {
            args.extend(self.value());
            while self.check(TokenKind::Comma) {
                self.advance();
                args.extend(self.value());
            }
        }
        self.match_token(TokenKind::RParen);
        args
    }
}

fn binary(line: u32, op: BinaryOperator, lhs: Option<Node>, rhs: Option<Node>) -> Node {
    Node::new(
        line,
        NodeKind::BinaryOp {
            op,
            lhs: lhs.map(Box::new),
            rhs: rhs.map(Box::new),
        },
    )
}
