//! Scanner for C-minus.
//!
//! Tokens are produced on demand by [`Scanner::next_token`]; the parser
//! pulls them one at a time. The scanner never fails: characters it
//! cannot make sense of come back as [`TokenKind::Error`] tokens.

use core::fmt;

use log::trace;

use crate::session::Session;
use crate::source::SourceReader;

/// Longest lexeme kept in a token. Extra characters are consumed but
/// dropped.
pub const MAX_TOKEN_LEN: usize = 40;

/// Kind of a token produced by the scanner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Book-keeping
    EndFile,
    Error,

    // Reserved words
    If,
    Else,
    Int,
    Void,
    While,
    Return,

    // Multi-character tokens
    Id,
    Num,

    // Operators
    Assign, // =
    Eq,     // ==
    Ne,     // !=
    Lt,     // <
    Le,     // <=
    Gt,     // >
    Ge,     // >=
    Plus,   // +
    Minus,  // -
    Times,  // *
    Over,   // /

    // Punctuation
    LParen, // (
    RParen, // )
    LBrace, // {
    RBrace, // }
    Semi,   // ;
    Comma,  // ,
}

const RESERVED_WORDS: [(&str, TokenKind); 6] = [
    ("if", TokenKind::If),
    ("else", TokenKind::Else),
    ("int", TokenKind::Int),
    ("void", TokenKind::Void),
    ("while", TokenKind::While),
    ("return", TokenKind::Return),
];

impl TokenKind {
    pub fn is_reserved(self) -> bool {
        RESERVED_WORDS.iter().any(|(_, kind)| *kind == self)
    }

    /// Fixed spelling of keywords, operators and punctuation.
    pub fn symbol(self) -> Option<&'static str> {
        use TokenKind::*;

        let text = match self {
            If => "if",
            Else => "else",
            Int => "int",
            Void => "void",
            While => "while",
            Return => "return",
            Assign => "=",
            Eq => "==",
            Ne => "!=",
            Lt => "<",
            Le => "<=",
            Gt => ">",
            Ge => ">=",
            Plus => "+",
            Minus => "-",
            Times => "*",
            Over => "/",
            LParen => "(",
            RParen => ")",
            LBrace => "{",
            RBrace => "}",
            Semi => ";",
            Comma => ",",
            EndFile | Error | Id | Num => return None,
        };
        Some(text)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.symbol() {
            Some(text) => write!(f, "'{text}'"),
            None => f.write_str(match self {
                TokenKind::EndFile => "end of file",
                TokenKind::Error => "invalid token",
                TokenKind::Id => "identifier",
                _ => "number",
            }),
        }
    }
}

/// A token with its captured text and the line it started on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub line: u32,
}

impl fmt::Display for Token {
    /// Renders the token the way the scan trace prints it.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::EndFile => f.write_str("EOF"),
            TokenKind::Error => write!(f, "ERROR: {}", self.lexeme),
            TokenKind::Id => write!(f, "ID, name= {}", self.lexeme),
            TokenKind::Num => write!(f, "NUM, val= {}", self.lexeme),
            kind if kind.is_reserved() => write!(f, "reserved word: {}", self.lexeme),
            kind => f.write_str(kind.symbol().unwrap_or_default()),
        }
    }
}

fn reserved_lookup(text: &str) -> TokenKind {
    RESERVED_WORDS
        .iter()
        .find(|(word, _)| *word == text)
        .map(|(_, kind)| *kind)
        .unwrap_or(TokenKind::Id)
}

/// States of the scanner DFA.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Start,
    InNumber,
    InIdentifier,
    InLess,
    InGreater,
    InNotEqual,
    InEqual,
    /// Saw `/`, which may open a comment.
    InCommentStart,
    /// Inside `/* ... */`.
    InComment,
    /// Saw `*` inside a comment, which may close it.
    InCommentEnd,
    Done,
}

pub struct Scanner<'src> {
    source: SourceReader<'src>,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        Scanner {
            source: SourceReader::new(source),
        }
    }

    /// Scan the next token. Once the input is exhausted every call yields
    /// [`TokenKind::EndFile`].
    pub fn next_token(&mut self, session: &mut Session) -> Token {
        let mut lexeme = String::new();
        let mut state = State::Start;
        let mut kind = TokenKind::Error;
        let mut line = self.source.line();

        while state != State::Done {
            let c = self.source.next_char(session);
            let mut save = true;
            match state {
                State::Start => {
                    line = self.source.line();
                    match c {
                        None => {
                            save = false;
                            state = State::Done;
                            kind = TokenKind::EndFile;
                        }
                        Some(ch) if ch.is_ascii_digit() => state = State::InNumber,
                        Some(ch) if ch.is_ascii_alphabetic() => state = State::InIdentifier,
                        Some(' ' | '\t' | '\n' | '\r') => save = false,
                        Some('/') => {
                            save = false;
                            state = State::InCommentStart;
                        }
                        Some('<') => state = State::InLess,
                        Some('>') => state = State::InGreater,
                        Some('!') => state = State::InNotEqual,
                        Some('=') => state = State::InEqual,
                        Some(ch) => {
                            state = State::Done;
                            kind = match ch {
                                '+' => TokenKind::Plus,
                                '-' => TokenKind::Minus,
                                '*' => TokenKind::Times,
                                '(' => TokenKind::LParen,
                                ')' => TokenKind::RParen,
                                '{' => TokenKind::LBrace,
                                '}' => TokenKind::RBrace,
                                ';' => TokenKind::Semi,
                                ',' => TokenKind::Comma,
                                _ => TokenKind::Error,
                            };
                        }
                    }
                }
                State::InNumber => {
                    if !c.is_some_and(|ch| ch.is_ascii_digit()) {
                        self.source.unget();
                        save = false;
                        state = State::Done;
                        kind = TokenKind::Num;
                    }
                }
                State::InIdentifier => {
                    if !c.is_some_and(|ch| ch.is_ascii_alphabetic()) {
                        self.source.unget();
                        save = false;
                        state = State::Done;
                        kind = TokenKind::Id;
                    }
                }
                State::InLess | State::InGreater | State::InNotEqual | State::InEqual => {
                    let (with_equal, without_equal) = match state {
                        State::InLess => (TokenKind::Le, TokenKind::Lt),
                        State::InGreater => (TokenKind::Ge, TokenKind::Gt),
                        // a lone `!` is not an operator
                        State::InNotEqual => (TokenKind::Ne, TokenKind::Error),
                        _ => (TokenKind::Eq, TokenKind::Assign),
                    };
                    state = State::Done;
                    if c == Some('=') {
                        kind = with_equal;
                    } else {
                        save = false;
                        self.source.unget();
                        kind = without_equal;
                    }
                }
                State::InCommentStart => {
                    save = false;
                    match c {
                        None => {
                            state = State::Done;
                            kind = TokenKind::EndFile;
                        }
                        Some('*') => state = State::InComment,
                        Some(_) => {
                            self.source.unget();
                            lexeme.push('/');
                            state = State::Done;
                            kind = TokenKind::Over;
                        }
                    }
                }
                State::InComment => {
                    save = false;
                    match c {
                        None => {
                            state = State::Done;
                            kind = TokenKind::EndFile;
                        }
                        Some('*') => state = State::InCommentEnd,
                        Some(_) => {}
                    }
                }
                State::InCommentEnd => {
                    save = false;
                    match c {
                        None => {
                            state = State::Done;
                            kind = TokenKind::EndFile;
                        }
                        Some('/') => state = State::Start,
                        Some('*') => {}
                        Some(_) => state = State::InComment,
                    }
                }
                State::Done => {}
            }

            if save && lexeme.len() < MAX_TOKEN_LEN {
                if let Some(ch) = c {
                    lexeme.push(ch);
                }
            }
        }

        if kind == TokenKind::Id {
            kind = reserved_lookup(&lexeme);
        }

        let token = Token { kind, lexeme, line };
        trace!("token {:?} {:?} at line {}", token.kind, token.lexeme, token.line);
        if session.options.trace_scan {
            session.write_line(&format!("\t{}: {}", token.line, token));
        }
        token
    }
}
