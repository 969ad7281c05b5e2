use crate::parsing::span::Span;
use std::cell::RefCell;
use std::cmp::{max, min};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// A log of errors that occurred while parsing a formula.
/// Each [ErrorLogEntry] has a span that indicates its origin in the formula text.
/// Given the original text, the error log can be converted to nicely presented error messages.
#[derive(Debug, Default, Clone)]
pub struct ErrorLog {
    errors: RefCell<Vec<ErrorLogEntry>>,
}

impl ErrorLog {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn log(&self, span: Span, msg: String) -> SeeErrorLog {
        self.errors.borrow_mut().push(ErrorLogEntry::new(span, msg));
        SeeErrorLog
    }

    pub fn len(&self) -> usize {
        self.errors.borrow().len()
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.borrow().is_empty()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.borrow().is_empty()
    }

    /// The first logged error, which is the one that stopped the parser.
    pub fn first(&self) -> Option<ErrorLogEntry> {
        self.errors.borrow().first().cloned()
    }

    pub fn entries(&self) -> Vec<ErrorLogEntry> {
        self.errors.borrow().clone()
    }

    /// Converts the error log to a nicely formatted string using the original formula text.
    /// Example:
    /// ```md
    /// 1:13 Error: Unexpected ')', expected expression
    /// | {c}[](oog ^ )
    /// |             ^
    /// ```
    /// where 1:13 indicates line 1, column 13 of the formula text.
    pub fn to_string(&self, orig_input: &str) -> String {
        let mut out = String::new();
        let bytes = orig_input.as_bytes();
        for entry in self.errors.borrow().iter() {
            let span = entry.span;

            // Find the line and column of the error
            let mut i = 0;
            let mut line = 1;
            let mut line_start = 0;
            while i < span.begin && i < bytes.len() {
                if bytes[i] == b'\n' {
                    line += 1;
                    line_start = i + 1;
                }
                i += 1;
            }
            let col = char_count(orig_input, line_start, i) + 1;
            out.push_str(&format!(
                "\x1b[31m{}:{} Error:\x1b[0m {}\n",
                line, col, entry.msg
            ));

            // Print the lines with the error, and underline the error span.
            // Zero-width spans (end of input) still get a single caret.
            while line_start <= span.end && i <= bytes.len() {
                if i == bytes.len() || bytes[i] == b'\n' {
                    out.push_str(&format!("| {}\n", &orig_input[line_start..i]));
                    let highlight_start = max(line_start, span.begin);
                    let highlight_end = max(min(i, span.end), highlight_start + 1);
                    let offset = char_count(orig_input, line_start, highlight_start);
                    let width = char_count(orig_input, highlight_start, highlight_end);
                    out.push_str(&format!(
                        "| {}{}\n",
                        " ".repeat(offset),
                        "^".repeat(max(width, 1))
                    ));
                    line_start = i + 1;
                }
                i += 1;
            }
        }
        out
    }
}

/// Number of characters starting within the byte range `from..to` of `text`.
fn char_count(text: &str, from: usize, to: usize) -> usize {
    text.char_indices()
        .skip_while(|&(i, _)| i < from)
        .take_while(|&(i, _)| i < to)
        .count()
}

/// A single error entry in the [ErrorLog].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorLogEntry {
    /// The span of the error in the formula text.
    span: Span,
    /// The error message.
    msg: String,
}

impl ErrorLogEntry {
    pub fn new(span: Span, msg: String) -> Self {
        ErrorLogEntry { span, msg }
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn msg(&self) -> &str {
        &self.msg
    }
}

impl Display for ErrorLogEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.msg, self.span)
    }
}

/// A formula that could not be parsed.
/// Owns the logged entries together with the rendered report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MalformedFormula {
    pub entries: Vec<ErrorLogEntry>,
    pub report: String,
}

impl MalformedFormula {
    pub fn from_log(log: &ErrorLog, orig_input: &str) -> Self {
        MalformedFormula {
            entries: log.entries(),
            report: log.to_string(orig_input),
        }
    }

    /// Position of the token that stopped the parser.
    pub fn span(&self) -> Option<Span> {
        self.entries.first().map(|e| e.span())
    }
}

impl Display for MalformedFormula {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Malformed formula:\n{}", self.report)
    }
}

impl Error for MalformedFormula {}

/// A dummy error for when errors occur and they can be found in the passed ErrorLog.
/// Also required to make clippy stop complaining about Result<_, ()>.
#[derive(Copy, Clone, Eq, PartialEq, Default, Debug)]
pub struct SeeErrorLog;

impl Display for SeeErrorLog {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "See content of ErrorLog for errors")
    }
}

impl Error for SeeErrorLog {}
