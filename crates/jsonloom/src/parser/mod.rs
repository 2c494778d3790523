//! The structural JSON parser.
//!
//! Scanning (tokens, numbers, strings) lives in [`scanner`]; this module
//! drives the array/object grammar by recursive descent, announcing each
//! piece of the document to a [`Handler`]. The default handler materializes
//! a [`crate::Json`] tree; any other handler sees the same event sequence.
//! [`PullParser`] reimplements the identical grammar with an explicit
//! continuation stack for one-event-at-a-time iteration.
//!
//! Recursion depth equals JSON nesting depth and is bounded by
//! [`ParseOptions::max_depth`], so adversarially deep input is a structured
//! error rather than a native stack overflow.

mod error;
mod pull;
mod scanner;
mod source;

pub use error::{ErrorKind, ParseError};
pub use pull::PullParser;
pub(crate) use scanner::Scanner;
pub use source::{IoSource, Source, StrSource};

use crate::event::Handler;
use crate::tree::TreeBuilder;
use crate::value::Json;

/// Configuration options for parsing.
///
/// Shared by [`crate::parse`], [`crate::Reader`], and [`PullParser`].
#[derive(Debug, Clone, Copy)]
pub struct ParseOptions {
    /// Maximum container nesting depth.
    ///
    /// Exceeding it raises [`ErrorKind::NestingTooDeep`] instead of growing
    /// the native call stack without bound.
    ///
    /// # Default
    ///
    /// `512`
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_depth: 512 }
    }
}

/// Parses `text` as exactly one JSON value.
///
/// Leading and trailing whitespace is permitted; any other trailing content
/// is fatal. Use [`crate::Reader`] for streams carrying several
/// whitespace-separated top-level forms.
///
/// # Errors
///
/// Any [`ParseError`] raised by the grammar.
///
/// # Examples
///
/// ```
/// use jsonloom::{Json, parse};
///
/// let value = parse(r#"{"a": [1, 2]}"#)?;
/// assert!(value.is_object());
/// # Ok::<(), jsonloom::ParseError>(())
/// ```
pub fn parse(text: &str) -> Result<Json, ParseError> {
    parse_with_options(text, ParseOptions::default())
}

/// Like [`parse`], with explicit [`ParseOptions`].
///
/// # Errors
///
/// Any [`ParseError`] raised by the grammar.
pub fn parse_with_options(text: &str, options: ParseOptions) -> Result<Json, ParseError> {
    let mut builder = TreeBuilder::new();
    parse_with_handler(text, &mut builder, options)?;
    builder
        .into_value()
        .ok_or_else(|| ParseError::new(ErrorKind::UnexpectedEndOfInput, 1, 1))
}

/// Parses `text` as exactly one JSON value, feeding events to `handler`
/// instead of materializing a tree.
///
/// # Errors
///
/// Any [`ParseError`] raised by the grammar.
pub fn parse_with_handler<H: Handler>(
    text: &str,
    handler: &mut H,
    options: ParseOptions,
) -> Result<(), ParseError> {
    let mut scanner = Scanner::new(StrSource::new(text));
    scanner.skip_whitespace()?;
    if scanner.peek()?.is_none() {
        return Err(scanner.error(ErrorKind::UnexpectedEndOfInput));
    }
    parse_value(&mut scanner, handler, 0, options.max_depth)?;
    scanner.skip_whitespace()?;
    if let Some(c) = scanner.peek()? {
        return Err(scanner.error(ErrorKind::InvalidCharacter(c)));
    }
    Ok(())
}

/// Parses the next top-level form from `scanner`, if any.
///
/// Returns `Ok(false)` when the input is exhausted before any character of a
/// value is consumed.
pub(crate) fn next_form<S: Source, H: Handler>(
    scanner: &mut Scanner<S>,
    handler: &mut H,
    options: ParseOptions,
) -> Result<bool, ParseError> {
    scanner.skip_whitespace()?;
    if scanner.peek()?.is_none() {
        return Ok(false);
    }
    parse_value(scanner, handler, 0, options.max_depth)?;
    Ok(true)
}

fn parse_value<S: Source, H: Handler>(
    scanner: &mut Scanner<S>,
    handler: &mut H,
    depth: usize,
    max_depth: usize,
) -> Result<(), ParseError> {
    scanner.skip_whitespace()?;
    match scanner.peek()? {
        Some('{') => parse_object(scanner, handler, depth, max_depth),
        Some('[') => parse_array(scanner, handler, depth, max_depth),
        Some('"') => {
            scanner.bump()?;
            let value = scanner.read_string()?;
            handler.string(value);
            Ok(())
        }
        Some('n') => {
            scanner.bump()?;
            scanner.expect_rest("ull")?;
            handler.null();
            Ok(())
        }
        Some('t') => {
            scanner.bump()?;
            scanner.expect_rest("rue")?;
            handler.boolean(true);
            Ok(())
        }
        Some('f') => {
            scanner.bump()?;
            scanner.expect_rest("alse")?;
            handler.boolean(false);
            Ok(())
        }
        Some('-' | '0'..='9') => {
            let value = scanner.read_number()?;
            handler.number(value);
            Ok(())
        }
        Some(c) => Err(scanner.error(ErrorKind::InvalidCharacter(c))),
        None => Err(scanner.error(ErrorKind::UnexpectedEndOfInput)),
    }
}

fn parse_array<S: Source, H: Handler>(
    scanner: &mut Scanner<S>,
    handler: &mut H,
    depth: usize,
    max_depth: usize,
) -> Result<(), ParseError> {
    if depth >= max_depth {
        return Err(scanner.error(ErrorKind::NestingTooDeep(max_depth)));
    }
    scanner.bump()?; // '['
    handler.array_start();
    scanner.skip_whitespace()?;
    if scanner.peek()? == Some(']') {
        scanner.bump()?;
        handler.array_end();
        return Ok(());
    }
    loop {
        parse_value(scanner, handler, depth + 1, max_depth)?;
        scanner.skip_whitespace()?;
        match scanner.peek()? {
            Some(',') => {
                scanner.bump()?;
            }
            Some(']') => {
                scanner.bump()?;
                handler.array_end();
                return Ok(());
            }
            Some(c) => return Err(scanner.error(ErrorKind::InvalidCharacter(c))),
            None => return Err(scanner.error(ErrorKind::UnexpectedEndOfInput)),
        }
    }
}

fn parse_object<S: Source, H: Handler>(
    scanner: &mut Scanner<S>,
    handler: &mut H,
    depth: usize,
    max_depth: usize,
) -> Result<(), ParseError> {
    if depth >= max_depth {
        return Err(scanner.error(ErrorKind::NestingTooDeep(max_depth)));
    }
    scanner.bump()?; // '{'
    handler.object_start();
    scanner.skip_whitespace()?;
    if scanner.peek()? == Some('}') {
        scanner.bump()?;
        handler.object_end();
        return Ok(());
    }
    loop {
        // A comma must be followed by a key; `{"a":1,}` is fatal here.
        scanner.skip_whitespace()?;
        match scanner.peek()? {
            Some('"') => {
                scanner.bump()?;
            }
            Some(c) => return Err(scanner.error(ErrorKind::InvalidCharacter(c))),
            None => return Err(scanner.error(ErrorKind::UnexpectedEndOfInput)),
        }
        let name = scanner.read_string()?;
        handler.field_name(name);
        scanner.skip_whitespace()?;
        match scanner.peek()? {
            Some(':') => {
                scanner.bump()?;
            }
            Some(c) => return Err(scanner.error(ErrorKind::InvalidCharacter(c))),
            None => return Err(scanner.error(ErrorKind::UnexpectedEndOfInput)),
        }
        parse_value(scanner, handler, depth + 1, max_depth)?;
        scanner.skip_whitespace()?;
        match scanner.peek()? {
            Some(',') => {
                scanner.bump()?;
            }
            Some('}') => {
                scanner.bump()?;
                handler.object_end();
                return Ok(());
            }
            Some(c) => return Err(scanner.error(ErrorKind::InvalidCharacter(c))),
            None => return Err(scanner.error(ErrorKind::UnexpectedEndOfInput)),
        }
    }
}
