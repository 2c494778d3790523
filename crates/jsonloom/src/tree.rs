//! Materializing value trees from parse events.
//!
//! [`TreeBuilder`] is the default [`Handler`]: it keeps one accumulator per
//! open container and freezes each into an immutable [`Json`] when the
//! matching end event arrives. [`Reader`] layers on top to pull a sequence
//! of top-level forms out of a single input stream.

use std::io::Read;

use crate::event::Handler;
use crate::number::Number;
use crate::parser::{
    self, ErrorKind, IoSource, ParseError, ParseOptions, Scanner, Source, StrSource,
};
use crate::value::{Array, Json, Map};

enum Scope {
    Array(Array),
    Object(Map, Option<String>),
}

/// The handler that assembles a [`Json`] tree from parse events.
#[derive(Default)]
pub struct TreeBuilder {
    stack: Vec<Scope>,
    finished: Option<Json>,
}

impl TreeBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Takes the finished root value, or `None` if no complete value has
    /// been delivered yet.
    #[must_use]
    pub fn into_value(self) -> Option<Json> {
        self.finished
    }

    /// Delivers a finished value to the parent slot: the pending field of an
    /// open object, the end of an open array, or the root.
    fn place(&mut self, value: Json) {
        match self.stack.last_mut() {
            Some(Scope::Array(items)) => items.push(value),
            Some(Scope::Object(map, key)) => {
                debug_assert!(key.is_some(), "object value without a field name");
                if let Some(key) = key.take() {
                    // Duplicate keys: last write wins, first position kept.
                    map.insert(key, value);
                }
            }
            None => self.finished = Some(value),
        }
    }
}

impl Handler for TreeBuilder {
    fn null(&mut self) {
        self.place(Json::Null);
    }

    fn boolean(&mut self, value: bool) {
        self.place(Json::Boolean(value));
    }

    fn string(&mut self, value: String) {
        self.place(Json::String(value));
    }

    fn number(&mut self, value: Number) {
        self.place(Json::Number(value));
    }

    fn array_start(&mut self) {
        self.stack.push(Scope::Array(Array::new()));
    }

    fn array_end(&mut self) {
        if let Some(Scope::Array(items)) = self.stack.pop() {
            self.place(Json::Array(items));
        } else {
            debug_assert!(false, "array end without matching start");
        }
    }

    fn object_start(&mut self) {
        self.stack.push(Scope::Object(Map::new(), None));
    }

    fn field_name(&mut self, name: String) {
        if let Some(Scope::Object(_, key)) = self.stack.last_mut() {
            *key = Some(name);
        } else {
            debug_assert!(false, "field name outside an object");
        }
    }

    fn object_end(&mut self) {
        if let Some(Scope::Object(map, _)) = self.stack.pop() {
            self.place(Json::Object(map));
        } else {
            debug_assert!(false, "object end without matching start");
        }
    }
}

/// Reads a lazy, forward-only sequence of top-level forms from one input.
///
/// RFC 8259 allows one value per text; the reader supports the relaxed
/// extension of several whitespace-separated values in one stream, each
/// retrieved by a successive call.
///
/// # Examples
///
/// ```
/// use jsonloom::{Json, Reader};
///
/// let mut reader = Reader::new("1 2 3");
/// assert_eq!(reader.next_value()?, Some(Json::from(1)));
/// assert_eq!(reader.next_value()?, Some(Json::from(2)));
/// assert_eq!(reader.next_value()?, Some(Json::from(3)));
/// assert_eq!(reader.next_value()?, None);
/// # Ok::<(), jsonloom::ParseError>(())
/// ```
pub struct Reader<S> {
    scanner: Scanner<S>,
    options: ParseOptions,
    failed: bool,
}

impl<'a> Reader<StrSource<'a>> {
    /// Creates a reader over in-memory text.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self::with_options(text, ParseOptions::default())
    }

    /// Creates a reader over in-memory text with explicit options.
    #[must_use]
    pub fn with_options(text: &'a str, options: ParseOptions) -> Self {
        Self::from_source(StrSource::new(text), options)
    }
}

impl<R: Read> Reader<IoSource<R>> {
    /// Creates a reader over a blocking [`Read`] stream.
    pub fn from_reader(reader: R) -> Self {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Creates a reader over a blocking [`Read`] stream with explicit
    /// options.
    pub fn from_reader_with_options(reader: R, options: ParseOptions) -> Self {
        Self::from_source(IoSource::new(reader), options)
    }
}

impl<S: Source> Reader<S> {
    fn from_source(source: S, options: ParseOptions) -> Self {
        Self {
            scanner: Scanner::new(source),
            options,
            failed: false,
        }
    }

    /// Parses the next top-level form.
    ///
    /// `Ok(None)` signals clean end of input — distinguishable from a parsed
    /// `null`, which is `Ok(Some(Json::Null))`. End of input in the middle
    /// of a value is always fatal.
    ///
    /// # Errors
    ///
    /// Any [`ParseError`] raised by the grammar.
    pub fn next_value(&mut self) -> Result<Option<Json>, ParseError> {
        let mut builder = TreeBuilder::new();
        if parser::next_form(&mut self.scanner, &mut builder, self.options)? {
            Ok(builder.into_value())
        } else {
            Ok(None)
        }
    }

    /// Like [`next_value`](Reader::next_value), but clean end of input is an
    /// error rather than a sentinel.
    ///
    /// # Errors
    ///
    /// [`ErrorKind::UnexpectedEndOfInput`] at end of input, or any other
    /// [`ParseError`].
    pub fn require_next(&mut self) -> Result<Json, ParseError> {
        match self.next_value()? {
            Some(value) => Ok(value),
            None => Err(self.scanner.error(ErrorKind::UnexpectedEndOfInput)),
        }
    }
}

impl<S: Source> Iterator for Reader<S> {
    type Item = Result<Json, ParseError>;

    /// Yields each remaining top-level form; fused after the first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_value() {
            Ok(value) => value.map(Ok),
            Err(e) => {
                self.failed = true;
                Some(Err(e))
            }
        }
    }
}
