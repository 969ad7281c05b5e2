use crate::atl::{Coalition, Phi};
use crate::parsing::errors::{ErrorLog, SeeErrorLog};
use crate::parsing::lexer::Lexer;
use crate::parsing::span::Span;
use crate::parsing::token::{Token, TokenKind};
use std::iter::Peekable;

/// Recursive descent parser for the formula syntax:
/// ```text
/// formula   := chain EOF
/// chain     := unary (('^' | 'V' | '->') unary)*
/// unary     := '~' unary | primary
/// primary   := 'true' | 'false' | name | '(' chain ')' | coalition path
/// path      := '@' operand | '[]' operand | '<>' operand
///            | operand 'U' operand | '(' chain 'U' chain ')'
/// operand   := '(' chain ')'
/// coalition := '{' '}' | '{' '0' '}' | '{' name (',' name)* '}'
/// ```
/// Connectives have no relative precedence, a chain folds left to right in
/// the order the connectives appear. The parser stops at the first error,
/// which is logged with the span of the offending token.
pub struct Parser<'a> {
    lexer: Peekable<Lexer<'a>>,
    errors: &'a ErrorLog,
    /// Length of the input, used as the position of unexpected end of input.
    end: usize,
}

impl<'a> Parser<'a> {
    pub fn new(lexer: Lexer<'a>, errors: &'a ErrorLog, input_len: usize) -> Parser<'a> {
        Parser {
            lexer: lexer.peekable(),
            errors,
            end: input_len,
        }
    }

    /// Parse a complete formula. The whole input must be consumed.
    pub fn formula(&mut self) -> Result<Phi, SeeErrorLog> {
        let phi = self.chain()?;
        self.expect_end()?;
        Ok(phi)
    }

    /// Parse EOF. If there are any tokens left, log an error.
    pub fn expect_end(&mut self) -> Result<(), SeeErrorLog> {
        match self.lexer.next() {
            None => Ok(()),
            Some(tok) => Err(self.unexpected(tok, "end of formula")),
        }
    }

    /// Parse a chain of boolean connectives, folding left to right.
    pub fn chain(&mut self) -> Result<Phi, SeeErrorLog> {
        let mut lhs = self.unary()?;
        loop {
            let combine: fn(Phi, Phi) -> Phi = match self.peek_kind() {
                Some(TokenKind::Hat) => Phi::and,
                Some(TokenKind::Vee) => Phi::or,
                Some(TokenKind::Arrow) => Phi::implies,
                _ => return Ok(lhs),
            };
            self.lexer.next();
            let rhs = self.unary()?;
            lhs = combine(lhs, rhs);
        }
    }

    /// Parse a possibly negated term.
    pub fn unary(&mut self) -> Result<Phi, SeeErrorLog> {
        if let Some(TokenKind::Tilde) = self.peek_kind() {
            self.lexer.next();
            return Ok(Phi::not(self.unary()?));
        }
        self.primary()
    }

    /// Parse a constant, a proposition, a parenthesized chain, or a path formula.
    pub fn primary(&mut self) -> Result<Phi, SeeErrorLog> {
        match self.lexer.next() {
            Some(Token {
                kind: TokenKind::True,
                ..
            }) => Ok(Phi::True),
            Some(Token {
                kind: TokenKind::False,
                ..
            }) => Ok(Phi::False),
            Some(Token {
                kind: TokenKind::Word(name),
                ..
            }) => Ok(Phi::Proposition(name)),
            Some(Token {
                kind: TokenKind::Lparen,
                ..
            }) => {
                let phi = self.chain()?;
                self.token(TokenKind::Rparen)?;
                Ok(phi)
            }
            Some(Token {
                kind: TokenKind::Lbrace,
                span,
            }) => {
                let players = self.coalition(span)?;
                self.path(players)
            }
            Some(tok) => Err(self.unexpected(tok, "formula")),
            None => Err(self.unexpected_end("formula")),
        }
    }

    /// Parse the temporal operator and operands following a coalition.
    pub fn path(&mut self, players: Coalition) -> Result<Phi, SeeErrorLog> {
        match self.lexer.next() {
            Some(Token {
                kind: TokenKind::At,
                ..
            }) => Ok(Phi::next(players, self.operand()?)),
            Some(Token {
                kind: TokenKind::Square,
                ..
            }) => Ok(Phi::invariant(players, self.operand()?)),
            Some(Token {
                kind: TokenKind::Diamond,
                ..
            }) => Ok(Phi::eventually(players, self.operand()?)),
            Some(Token {
                kind: TokenKind::Lparen,
                ..
            }) => {
                let pre = self.chain()?;
                if let Some(TokenKind::Until) = self.peek_kind() {
                    // {A}(pre U until)
                    self.lexer.next();
                    let until = self.chain()?;
                    self.token(TokenKind::Rparen)?;
                    return Ok(Phi::until(players, pre, until));
                }
                // {A}(pre) U (until)
                self.token(TokenKind::Rparen)?;
                self.token(TokenKind::Until)?;
                let until = self.operand()?;
                Ok(Phi::until(players, pre, until))
            }
            Some(tok) => Err(self.unexpected(tok, "temporal operator after coalition")),
            None => Err(self.unexpected_end("temporal operator after coalition")),
        }
    }

    /// Parse the operand of a temporal operator, which must be parenthesized.
    pub fn operand(&mut self) -> Result<Phi, SeeErrorLog> {
        match self.lexer.next() {
            Some(Token {
                kind: TokenKind::Lparen,
                ..
            }) => {
                let phi = self.chain()?;
                self.token(TokenKind::Rparen)?;
                Ok(phi)
            }
            Some(tok) => Err(self.errors.log(
                tok.span,
                format!(
                    "Unexpected '{}', operands of temporal operators must be parenthesized",
                    tok.kind
                ),
            )),
            None => Err(self.unexpected_end("'('")),
        }
    }

    /// Parse the players of a coalition. The opening brace has already been consumed.
    pub fn coalition(&mut self, begin: Span) -> Result<Coalition, SeeErrorLog> {
        let mut players: Vec<(Span, String)> = vec![];
        loop {
            match self.lexer.next() {
                Some(Token {
                    kind: TokenKind::Rbrace,
                    ..
                }) if players.is_empty() => return Ok(Coalition::empty()),
                Some(Token {
                    kind: TokenKind::Word(name),
                    span,
                }) => players.push((span, name)),
                Some(tok) => return Err(self.unexpected(tok, "player")),
                None => return Err(self.unexpected_end("player")),
            }
            match self.lexer.next() {
                Some(Token {
                    kind: TokenKind::Comma,
                    ..
                }) => {}
                Some(Token {
                    kind: TokenKind::Rbrace,
                    span,
                }) => {
                    return self.finish_coalition(begin + span, players);
                }
                Some(tok) => return Err(self.unexpected(tok, "',' or '}'")),
                None => return Err(self.unexpected_end("',' or '}'")),
            }
        }
    }

    /// `0` is the name of the empty coalition and cannot appear next to real players.
    fn finish_coalition(
        &mut self,
        span: Span,
        players: Vec<(Span, String)>,
    ) -> Result<Coalition, SeeErrorLog> {
        if players.len() == 1 && players[0].1 == "0" {
            return Ok(Coalition::empty());
        }
        if let Some((zero, _)) = players.iter().find(|(_, name)| name == "0") {
            return Err(self.errors.log(
                *zero,
                format!(
                    "'0' denotes the empty coalition and cannot be combined with other players in {}",
                    span
                ),
            ));
        }
        Ok(Coalition::new(players.into_iter().map(|(_, name)| name)))
    }

    /// Parse a token of the given kind.
    fn token(&mut self, kind: TokenKind) -> Result<Span, SeeErrorLog> {
        match self.lexer.next() {
            Some(tok) if tok.kind == kind => Ok(tok.span),
            Some(tok) => Err(self.unexpected(tok, &format!("'{}'", kind))),
            None => Err(self.unexpected_end(&format!("'{}'", kind))),
        }
    }

    fn peek_kind(&mut self) -> Option<&TokenKind> {
        self.lexer.peek().map(|t| &t.kind)
    }

    fn unexpected(&self, tok: Token, expected: &str) -> SeeErrorLog {
        let msg = match &tok.kind {
            TokenKind::Err(symbol) => format!("Unknown symbol '{}', expected {}", symbol, expected),
            kind => format!("Unexpected '{}', expected {}", kind, expected),
        };
        self.errors.log(tok.span, msg)
    }

    fn unexpected_end(&self, expected: &str) -> SeeErrorLog {
        self.errors.log(
            Span::at(self.end),
            format!("Unexpected end of formula, expected {}", expected),
        )
    }
}

#[cfg(test)]
mod tests {
    use crate::atl::{Coalition, Phi};
    use crate::parsing::errors::ErrorLog;
    use crate::parsing::lexer::Lexer;
    use crate::parsing::parser::Parser;
    use crate::parsing::span::Span;

    fn parse(input: &str, errors: &ErrorLog) -> Option<Phi> {
        let mut parser = Parser::new(Lexer::new(input), errors, input.len());
        parser.formula().ok()
    }

    #[test]
    fn chain_folds_left_001() {
        // Mixed connectives fold in order of appearance
        let errors = ErrorLog::new();
        let phi = parse("(a ^ b -> c V d)", &errors).unwrap();
        let a = || Phi::proposition("a");
        assert_eq!(
            phi,
            Phi::or(
                Phi::implies(Phi::and(a(), Phi::proposition("b")), Phi::proposition("c")),
                Phi::proposition("d")
            )
        );
    }

    #[test]
    fn negation_binds_tightest_001() {
        let errors = ErrorLog::new();
        let phi = parse("~~a ^ ~(b)", &errors).unwrap();
        assert_eq!(
            phi,
            Phi::and(
                Phi::not(Phi::not(Phi::proposition("a"))),
                Phi::not(Phi::proposition("b"))
            )
        );
    }

    #[test]
    fn coalition_001() {
        let errors = ErrorLog::new();
        assert_eq!(
            parse("{}@(p)", &errors).unwrap(),
            Phi::next(Coalition::empty(), Phi::proposition("p"))
        );
        assert_eq!(
            parse("{0}@(p)", &errors).unwrap(),
            Phi::next(Coalition::empty(), Phi::proposition("p"))
        );
        assert_eq!(
            parse("{t, c}@(p)", &errors).unwrap(),
            Phi::next(Coalition::new(["c", "t"]), Phi::proposition("p"))
        );
        assert!(errors.is_empty());
    }

    #[test]
    fn coalition_002() {
        // The empty coalition marker cannot be mixed with players
        let errors = ErrorLog::new();
        assert_eq!(parse("{0,c}@(p)", &errors), None);
        assert_eq!(errors.first().unwrap().span(), Span::new(1, 2));
    }

    #[test]
    fn coalition_003() {
        // Trailing comma
        let errors = ErrorLog::new();
        assert_eq!(parse("{c,}@(p)", &errors), None);
        assert_eq!(errors.first().unwrap().span(), Span::new(3, 4));
        assert_eq!(
            errors.first().unwrap().msg(),
            "Unexpected '}', expected player"
        );
    }
}
