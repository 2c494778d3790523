//! Parse-time errors.

use thiserror::Error;

/// A fatal error raised while parsing JSON text.
///
/// All parse failures surface as this one type, carrying a descriptive
/// [`ErrorKind`] and the 1-based line and column of the offending character.
#[derive(Debug, Error)]
#[error("{kind} at {line}:{column}")]
pub struct ParseError {
    kind: ErrorKind,
    line: usize,
    column: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, line: usize, column: usize) -> Self {
        Self { kind, line, column }
    }

    /// What went wrong.
    #[must_use]
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// 1-based line of the offending character.
    #[must_use]
    pub fn line(&self) -> usize {
        self.line
    }

    /// 1-based column of the offending character.
    #[must_use]
    pub fn column(&self) -> usize {
        self.column
    }
}

/// The cause of a [`ParseError`].
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// A character that cannot start or continue the construct being parsed.
    #[error("invalid character '{0}'")]
    InvalidCharacter(char),
    /// The input ended inside a value, string, escape, or structure.
    #[error("unexpected end of input")]
    UnexpectedEndOfInput,
    /// A backslash escape other than the eight named ones or `\uXXXX`.
    #[error("invalid escape character '{0}'")]
    InvalidEscape(char),
    /// A `\uXXXX` escape encoding half of a surrogate pair.
    #[error("unpaired surrogate in unicode escape")]
    UnpairedSurrogate,
    /// Nesting beyond [`ParseOptions::max_depth`](crate::ParseOptions).
    #[error("nesting depth exceeds {0}")]
    NestingTooDeep(usize),
    /// The input bytes are not valid UTF-8.
    #[error("invalid UTF-8 in input")]
    InvalidUtf8,
    /// The underlying reader failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
