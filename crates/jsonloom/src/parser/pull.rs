//! Pull-based variant of the structural grammar.
//!
//! [`PullParser`] accepts exactly the language the recursive-descent parser
//! accepts, but keeps its continuation on an explicit stack so a caller can
//! retrieve one [`Event`] at a time. Nesting consumes heap, not native
//! stack, and is bounded by the same [`ParseOptions::max_depth`].

use std::io::Read;

use crate::event::Event;
use crate::number::Number;
use crate::parser::error::{ErrorKind, ParseError};
use crate::parser::scanner::Scanner;
use crate::parser::source::{IoSource, Source, StrSource};
use crate::parser::ParseOptions;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Container {
    Array,
    Object,
}

/// What the parser expects at its current position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Between top-level forms (also the initial state).
    Root,
    /// A value is required.
    Value,
    /// Just after `[`: a value or an immediate `]`.
    ArrayFirst,
    /// After an array element: `,` or `]`.
    ArrayNext,
    /// Just after `{`: a key or an immediate `}`.
    ObjectFirst,
    /// After an object entry: `,` (then a key) or `}`.
    ObjectNext,
    /// A previous call returned an error; the parser stays terminated.
    Failed,
}

/// A resumable parser yielding one event per call.
///
/// Multiple whitespace-separated top-level forms are yielded back to back;
/// [`next_event`](PullParser::next_event) returns `Ok(None)` at clean end of
/// input.
///
/// # Examples
///
/// ```
/// use jsonloom::{Event, PullParser};
///
/// let mut parser = PullParser::new("[true]");
/// assert_eq!(parser.next_event()?, Some(Event::ArrayStart));
/// assert_eq!(parser.next_event()?, Some(Event::Boolean(true)));
/// assert_eq!(parser.next_event()?, Some(Event::ArrayEnd));
/// assert_eq!(parser.next_event()?, None);
/// # Ok::<(), jsonloom::ParseError>(())
/// ```
pub struct PullParser<S> {
    scanner: Scanner<S>,
    stack: Vec<Container>,
    state: State,
    options: ParseOptions,
}

impl<'a> PullParser<StrSource<'a>> {
    /// Creates a pull parser over in-memory text.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self::with_options(text, ParseOptions::default())
    }

    /// Creates a pull parser over in-memory text with explicit options.
    #[must_use]
    pub fn with_options(text: &'a str, options: ParseOptions) -> Self {
        Self::from_source(StrSource::new(text), options)
    }
}

impl<R: Read> PullParser<IoSource<R>> {
    /// Creates a pull parser over a blocking reader.
    pub fn from_reader(reader: R) -> Self {
        Self::from_reader_with_options(reader, ParseOptions::default())
    }

    /// Creates a pull parser over a blocking reader with explicit options.
    pub fn from_reader_with_options(reader: R, options: ParseOptions) -> Self {
        Self::from_source(IoSource::new(reader), options)
    }
}

impl<S: Source> PullParser<S> {
    fn from_source(source: S, options: ParseOptions) -> Self {
        Self {
            scanner: Scanner::new(source),
            stack: Vec::new(),
            state: State::Root,
            options,
        }
    }

    /// Returns the next event, or `None` at clean end of input.
    ///
    /// # Errors
    ///
    /// Any [`ParseError`]; after an error the parser stays terminated and
    /// yields `None`.
    pub fn next_event(&mut self) -> Result<Option<Event>, ParseError> {
        match self.step() {
            Ok(event) => Ok(event),
            Err(e) => {
                self.state = State::Failed;
                Err(e)
            }
        }
    }

    fn step(&mut self) -> Result<Option<Event>, ParseError> {
        loop {
            self.scanner.skip_whitespace()?;
            match self.state {
                State::Failed => return Ok(None),
                State::Root => {
                    if self.scanner.peek()?.is_none() {
                        return Ok(None);
                    }
                    self.state = State::Value;
                }
                State::Value => return self.parse_value().map(Some),
                State::ArrayFirst => match self.scanner.peek()? {
                    Some(']') => return self.close(Event::ArrayEnd).map(Some),
                    _ => self.state = State::Value,
                },
                State::ArrayNext => match self.scanner.peek()? {
                    Some(',') => {
                        self.scanner.bump()?;
                        self.state = State::Value;
                    }
                    Some(']') => return self.close(Event::ArrayEnd).map(Some),
                    Some(c) => return Err(self.scanner.error(ErrorKind::InvalidCharacter(c))),
                    None => return Err(self.scanner.error(ErrorKind::UnexpectedEndOfInput)),
                },
                State::ObjectFirst => match self.scanner.peek()? {
                    Some('}') => return self.close(Event::ObjectEnd).map(Some),
                    _ => return self.parse_key().map(Some),
                },
                State::ObjectNext => match self.scanner.peek()? {
                    Some(',') => {
                        self.scanner.bump()?;
                        self.scanner.skip_whitespace()?;
                        return self.parse_key().map(Some);
                    }
                    Some('}') => return self.close(Event::ObjectEnd).map(Some),
                    Some(c) => return Err(self.scanner.error(ErrorKind::InvalidCharacter(c))),
                    None => return Err(self.scanner.error(ErrorKind::UnexpectedEndOfInput)),
                },
            }
        }
    }

    /// Consumes the closing bracket of the innermost container.
    fn close(&mut self, event: Event) -> Result<Event, ParseError> {
        self.scanner.bump()?;
        self.stack.pop();
        self.state = self.after_value();
        Ok(event)
    }

    fn after_value(&self) -> State {
        match self.stack.last() {
            Some(Container::Array) => State::ArrayNext,
            Some(Container::Object) => State::ObjectNext,
            None => State::Root,
        }
    }

    fn parse_value(&mut self) -> Result<Event, ParseError> {
        match self.scanner.peek()? {
            Some('[') => {
                if self.stack.len() >= self.options.max_depth {
                    return Err(self
                        .scanner
                        .error(ErrorKind::NestingTooDeep(self.options.max_depth)));
                }
                self.scanner.bump()?;
                self.stack.push(Container::Array);
                self.state = State::ArrayFirst;
                Ok(Event::ArrayStart)
            }
            Some('{') => {
                if self.stack.len() >= self.options.max_depth {
                    return Err(self
                        .scanner
                        .error(ErrorKind::NestingTooDeep(self.options.max_depth)));
                }
                self.scanner.bump()?;
                self.stack.push(Container::Object);
                self.state = State::ObjectFirst;
                Ok(Event::ObjectStart)
            }
            Some('"') => {
                self.scanner.bump()?;
                let value = self.scanner.read_string()?;
                self.state = self.after_value();
                Ok(Event::String(value))
            }
            Some('n') => self.literal("ull", Event::Null),
            Some('t') => self.literal("rue", Event::Boolean(true)),
            Some('f') => self.literal("alse", Event::Boolean(false)),
            Some('-' | '0'..='9') => {
                let value: Number = self.scanner.read_number()?;
                self.state = self.after_value();
                Ok(Event::Number(value))
            }
            Some(c) => Err(self.scanner.error(ErrorKind::InvalidCharacter(c))),
            None => Err(self.scanner.error(ErrorKind::UnexpectedEndOfInput)),
        }
    }

    fn literal(&mut self, rest: &str, event: Event) -> Result<Event, ParseError> {
        self.scanner.bump()?;
        self.scanner.expect_rest(rest)?;
        self.state = self.after_value();
        Ok(event)
    }

    fn parse_key(&mut self) -> Result<Event, ParseError> {
        match self.scanner.peek()? {
            Some('"') => {
                self.scanner.bump()?;
            }
            Some(c) => return Err(self.scanner.error(ErrorKind::InvalidCharacter(c))),
            None => return Err(self.scanner.error(ErrorKind::UnexpectedEndOfInput)),
        }
        let name = self.scanner.read_string()?;
        self.scanner.skip_whitespace()?;
        match self.scanner.peek()? {
            Some(':') => {
                self.scanner.bump()?;
            }
            Some(c) => return Err(self.scanner.error(ErrorKind::InvalidCharacter(c))),
            None => return Err(self.scanner.error(ErrorKind::UnexpectedEndOfInput)),
        }
        self.state = State::Value;
        Ok(Event::FieldName(name))
    }
}

impl<S: Source> Iterator for PullParser<S> {
    type Item = Result<Event, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_event().transpose()
    }
}
