//! The vocabulary exchanged between the parser and its consumers.
//!
//! The structural parser never materializes values itself; it announces each
//! piece of the document to a [`Handler`]. The default handler is
//! [`crate::tree::TreeBuilder`], which assembles a [`crate::Json`] tree, and
//! [`crate::writer::EventWriter`] re-serializes the stream directly. The
//! same notifications are available one at a time as [`Event`]s from
//! [`crate::parser::PullParser`].

use crate::number::Number;

/// One atomic notification emitted while parsing a JSON document.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A `null` literal.
    Null,
    /// A `true` or `false` literal.
    Boolean(bool),
    /// A string value, already unescaped.
    String(String),
    /// A number value with its canonical literal retained.
    Number(Number),
    /// A `[` opening an array.
    ArrayStart,
    /// A `]` closing the innermost array.
    ArrayEnd,
    /// A `{` opening an object.
    ObjectStart,
    /// An object key; the entry's value follows as the next value event(s).
    FieldName(String),
    /// A `}` closing the innermost object.
    ObjectEnd,
}

/// A consumer of parse events.
///
/// The parser guarantees a well-formed sequence: container starts and ends
/// balance, and inside an object every value is preceded by exactly one
/// [`field_name`](Handler::field_name).
pub trait Handler {
    /// A `null` literal was parsed.
    fn null(&mut self);

    /// A boolean literal was parsed.
    fn boolean(&mut self, value: bool);

    /// A string value was parsed and unescaped.
    fn string(&mut self, value: String);

    /// A number value was parsed.
    fn number(&mut self, value: Number);

    /// An array was opened.
    fn array_start(&mut self);

    /// The innermost array was closed.
    fn array_end(&mut self);

    /// An object was opened.
    fn object_start(&mut self);

    /// An object key was parsed; the entry's value follows.
    fn field_name(&mut self, name: String);

    /// The innermost object was closed.
    fn object_end(&mut self);

    /// Dispatches one [`Event`] to the matching method, so any handler can
    /// also consume a pull parser's output.
    fn event(&mut self, event: Event) {
        match event {
            Event::Null => self.null(),
            Event::Boolean(value) => self.boolean(value),
            Event::String(value) => self.string(value),
            Event::Number(value) => self.number(value),
            Event::ArrayStart => self.array_start(),
            Event::ArrayEnd => self.array_end(),
            Event::ObjectStart => self.object_start(),
            Event::FieldName(name) => self.field_name(name),
            Event::ObjectEnd => self.object_end(),
        }
    }
}
