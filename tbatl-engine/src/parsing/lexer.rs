use crate::parsing::span::Span;
use crate::parsing::token::{Token, TokenKind};

/// A Lexer that converts formula text into a stream of tokens.
/// The Lexer is an iterator over tokens.
#[derive(Clone, Eq, PartialEq)]
pub struct Lexer<'a> {
    /// The original input.
    input: &'a str,
    /// The current position in the input, i.e. the number of consumed bytes.
    pos: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer { input, pos: 0 }
    }

    fn skip_ws(&mut self) {
        let bytes = self.input.as_bytes();
        while self.pos < bytes.len() && bytes[self.pos].is_ascii_whitespace() {
            self.pos += 1;
        }
    }

    #[inline]
    fn peek(&self, offset: usize) -> Option<u8> {
        self.input.as_bytes().get(self.pos + offset).copied()
    }

    #[inline]
    fn token(&mut self, len: usize, token: TokenKind) -> Token {
        let span = Span::new(self.pos, self.pos + len);
        self.pos += len;
        Token::new(token, span)
    }

    /// Lexes a word, i.e. a sequence of alphanumeric characters and underscores.
    /// `U` and `V` are operators when they stand alone, so `Up` is a name but `U p` is not.
    fn lex_word(&mut self) -> Token {
        let mut len = 1;
        while self
            .peek(len)
            .map_or(false, |c| c.is_ascii_alphanumeric() || c == b'_')
        {
            len += 1;
        }
        let word = &self.input[self.pos..self.pos + len];
        let kind = match word {
            "true" => TokenKind::True,
            "false" => TokenKind::False,
            "U" => TokenKind::Until,
            "V" => TokenKind::Vee,
            _ => TokenKind::Word(word.to_string()),
        };
        self.token(len, kind)
    }

    /// Consumes one whole character that does not start any token.
    fn lex_error(&mut self) -> Token {
        let len = self.input[self.pos..]
            .chars()
            .next()
            .map_or(1, |c| c.len_utf8());
        let e = self.input[self.pos..self.pos + len].to_string();
        self.token(len, TokenKind::Err(e))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_ws();
        let tk = match self.peek(0)? {
            b'(' => self.token(1, TokenKind::Lparen),
            b')' => self.token(1, TokenKind::Rparen),
            b'{' => self.token(1, TokenKind::Lbrace),
            b'}' => self.token(1, TokenKind::Rbrace),
            b',' => self.token(1, TokenKind::Comma),
            b'~' => self.token(1, TokenKind::Tilde),
            b'^' => self.token(1, TokenKind::Hat),
            b'@' => self.token(1, TokenKind::At),
            b'-' => match self.peek(1) {
                Some(b'>') => self.token(2, TokenKind::Arrow),
                _ => self.lex_error(),
            },
            b'[' => match self.peek(1) {
                Some(b']') => self.token(2, TokenKind::Square),
                _ => self.lex_error(),
            },
            b'<' => match self.peek(1) {
                Some(b'>') => self.token(2, TokenKind::Diamond),
                _ => self.lex_error(),
            },
            b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' => self.lex_word(),
            _ => self.lex_error(),
        };
        Some(tk)
    }
}
