use crate::parsing::span::Span;
use std::fmt::{Debug, Display, Formatter};

#[derive(Clone, PartialEq, Eq)]
pub struct Token {
    pub span: Span,
    pub kind: TokenKind,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Token { kind, span }
    }
}

impl Display for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

impl Debug for Token {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "'{}'{}", self.kind, self.span)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // Delimiters
    Lparen,
    Rparen,
    Lbrace,
    Rbrace,
    Comma,

    // Boolean connectives
    Tilde,
    Hat,
    Vee,
    Arrow,

    // Temporal operators
    At,
    Square,
    Diamond,
    Until,

    // Literals
    True,
    False,
    Word(String),

    // Utility
    Err(String),
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Lparen => write!(f, "("),
            TokenKind::Rparen => write!(f, ")"),
            TokenKind::Lbrace => write!(f, "{{"),
            TokenKind::Rbrace => write!(f, "}}"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Tilde => write!(f, "~"),
            TokenKind::Hat => write!(f, "^"),
            TokenKind::Vee => write!(f, "V"),
            TokenKind::Arrow => write!(f, "->"),
            TokenKind::At => write!(f, "@"),
            TokenKind::Square => write!(f, "[]"),
            TokenKind::Diamond => write!(f, "<>"),
            TokenKind::Until => write!(f, "U"),
            TokenKind::True => write!(f, "true"),
            TokenKind::False => write!(f, "false"),
            TokenKind::Word(w) => write!(f, "{w}"),
            TokenKind::Err(e) => write!(f, "{e}"),
        }
    }
}
