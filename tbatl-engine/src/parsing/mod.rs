use crate::atl::Phi;
use crate::parsing::errors::{ErrorLog, MalformedFormula};
use crate::parsing::lexer::Lexer;
use crate::parsing::parser::Parser;

pub mod errors;
pub mod lexer;
pub mod parser;
pub mod span;
pub mod token;

/// Parse formula text. Returns None if the text is malformed, in which case
/// the reason has been logged in `errors`.
pub fn parse_atl(input: &str, errors: &ErrorLog) -> Option<Phi> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer, errors, input.len());
    let phi = parser.formula().ok();
    if errors.has_errors() {
        None
    } else {
        phi
    }
}

/// Parse formula text, bundling any errors with a rendered report.
pub fn parse_phi(input: &str) -> Result<Phi, MalformedFormula> {
    let errors = ErrorLog::new();
    parse_atl(input, &errors).ok_or_else(|| MalformedFormula::from_log(&errors, input))
}
