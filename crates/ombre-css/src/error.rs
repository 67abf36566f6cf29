use std::fmt;

/// A parse error from the gradient grammar.
///
/// Gradient strings are single-line, so the message carries the offending
/// token rather than a source position.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub message: String,
}

impl ParseError {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        Self { message: msg.into() }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "gradient parse error: {}", self.message)
    }
}

impl std::error::Error for ParseError {}
