//! Rendering values and raw event streams back to JSON text.
//!
//! The writer consumes an immutable [`Json`] tree ([`to_text`],
//! [`to_text_with`]) or a raw event stream ([`EventWriter`]) and produces
//! text per [`WriteOptions`]. String escaping is driven by a precomputed
//! classification of the 128 ASCII code points; everything above ASCII is
//! passed through or `\uXXXX`-escaped depending on the flags.

use core::fmt::{self, Write};

use crate::event::Handler;
use crate::number::Number;
use crate::value::Json;

/// Configuration options for the writer.
#[derive(Debug, Clone, Copy)]
pub struct WriteOptions {
    /// Escape every code point above ASCII as `\uXXXX` (surrogate pairs
    /// above the BMP), yielding pure-ASCII output.
    ///
    /// # Default
    ///
    /// `true`
    pub escape_non_ascii: bool,

    /// Escape U+2028 and U+2029 even when `escape_non_ascii` is off. The two
    /// separators are valid in JSON strings but not in JavaScript source,
    /// so embedding unescaped output in a script can change its meaning.
    ///
    /// # Default
    ///
    /// `true`
    pub escape_line_separators: bool,

    /// Escape `/` as `\/`, letting output be embedded in HTML `<script>`
    /// blocks without forming `</`.
    ///
    /// # Default
    ///
    /// `true`
    pub escape_slash: bool,

    /// Spaces of indentation per nesting level; `0` renders compact
    /// single-line output.
    ///
    /// # Default
    ///
    /// `0`
    pub indent: usize,
}

impl Default for WriteOptions {
    fn default() -> Self {
        Self {
            escape_non_ascii: true,
            escape_line_separators: true,
            escape_slash: true,
            indent: 0,
        }
    }
}

/// Renders `value` with default options (compact, ASCII-safe).
#[must_use]
pub fn to_text(value: &Json) -> String {
    to_text_with(value, &WriteOptions::default())
}

/// Renders `value` with explicit options.
#[must_use]
pub fn to_text_with(value: &Json, options: &WriteOptions) -> String {
    let mut out = String::new();
    // Writing to a String cannot fail.
    let _ = write_value(value, options, &mut out);
    out
}

/// Renders `value` into any [`fmt::Write`] sink.
///
/// # Errors
///
/// Propagates errors from the sink.
pub fn write_value<W: Write>(value: &Json, options: &WriteOptions, out: &mut W) -> fmt::Result {
    write_nested(value, options, out, 0)
}

fn write_nested<W: Write>(
    value: &Json,
    options: &WriteOptions,
    out: &mut W,
    depth: usize,
) -> fmt::Result {
    match value {
        Json::Null => out.write_str("null"),
        Json::Boolean(b) => out.write_str(if *b { "true" } else { "false" }),
        Json::Number(n) => write!(out, "{n}"),
        Json::String(s) => write_string(s, options, out),
        Json::Array(items) => {
            out.write_char('[')?;
            if items.is_empty() {
                return out.write_char(']');
            }
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                newline_indent(options, out, depth + 1)?;
                write_nested(item, options, out, depth + 1)?;
            }
            newline_indent(options, out, depth)?;
            out.write_char(']')
        }
        Json::Object(map) => {
            out.write_char('{')?;
            if map.is_empty() {
                return out.write_char('}');
            }
            for (i, (key, item)) in map.iter().enumerate() {
                if i > 0 {
                    out.write_char(',')?;
                }
                newline_indent(options, out, depth + 1)?;
                write_key(key, options, out)?;
                write_nested(item, options, out, depth + 1)?;
            }
            newline_indent(options, out, depth)?;
            out.write_char('}')
        }
    }
}

fn write_key<W: Write>(key: &str, options: &WriteOptions, out: &mut W) -> fmt::Result {
    write_string(key, options, out)?;
    out.write_char(':')?;
    if options.indent > 0 {
        out.write_char(' ')?;
    }
    Ok(())
}

fn newline_indent<W: Write>(options: &WriteOptions, out: &mut W, depth: usize) -> fmt::Result {
    if options.indent > 0 {
        out.write_char('\n')?;
        for _ in 0..options.indent * depth {
            out.write_char(' ')?;
        }
    }
    Ok(())
}

/// How an ASCII code point is rendered inside a string literal.
#[derive(Debug, Clone, Copy)]
enum Class {
    /// Written as itself.
    Plain,
    /// `"` and `\`: a backslash then the character itself.
    Pair,
    /// `/`: escaped only when [`WriteOptions::escape_slash`] is on.
    Slash,
    /// A control character with a one-letter escape, e.g. `\n`.
    Named(u8),
    /// Any other control character below 0x20: generic `\u00XX`.
    Hex,
}

const CLASSES: [Class; 128] = classes();

const fn classes() -> [Class; 128] {
    let mut table = [Class::Plain; 128];
    let mut i = 0;
    while i < 0x20 {
        table[i] = Class::Hex;
        i += 1;
    }
    table[0x08] = Class::Named(b'b');
    table[0x09] = Class::Named(b't');
    table[0x0A] = Class::Named(b'n');
    table[0x0C] = Class::Named(b'f');
    table[0x0D] = Class::Named(b'r');
    table[b'"' as usize] = Class::Pair;
    table[b'\\' as usize] = Class::Pair;
    table[b'/' as usize] = Class::Slash;
    table
}

fn write_string<W: Write>(s: &str, options: &WriteOptions, out: &mut W) -> fmt::Result {
    out.write_char('"')?;
    for c in s.chars() {
        let code = c as u32;
        if code < 128 {
            match CLASSES[code as usize] {
                Class::Plain => out.write_char(c)?,
                Class::Pair => {
                    out.write_char('\\')?;
                    out.write_char(c)?;
                }
                Class::Slash => {
                    if options.escape_slash {
                        out.write_char('\\')?;
                    }
                    out.write_char('/')?;
                }
                Class::Named(letter) => {
                    out.write_char('\\')?;
                    out.write_char(letter as char)?;
                }
                Class::Hex => write!(out, "\\u{code:04X}")?,
            }
        } else if options.escape_non_ascii
            || (options.escape_line_separators && matches!(c, '\u{2028}' | '\u{2029}'))
        {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                write!(out, "\\u{unit:04X}")?;
            }
        } else {
            out.write_char(c)?;
        }
    }
    out.write_char('"')
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Frame {
    Array,
    Object,
}

/// A [`Handler`] that serializes the event stream directly, without
/// materializing a tree.
///
/// Feeding it the events of a [`crate::PullParser`] reformats a document in
/// one streaming pass.
///
/// # Examples
///
/// ```
/// use jsonloom::{EventWriter, Handler, PullParser};
///
/// let mut writer = EventWriter::new(String::new());
/// for event in PullParser::new("[1,2]") {
///     writer.event(event?);
/// }
/// assert_eq!(writer.finish()?, "[1,2]");
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct EventWriter<W> {
    out: W,
    options: WriteOptions,
    stack: Vec<(Frame, bool)>,
    /// A field name was just written; the next value follows it directly.
    after_key: bool,
    /// At least one top-level form has been written.
    wrote_root: bool,
    error: Option<fmt::Error>,
}

impl<W: Write> EventWriter<W> {
    /// Creates an event writer with default options.
    pub fn new(out: W) -> Self {
        Self::with_options(out, WriteOptions::default())
    }

    /// Creates an event writer with explicit options.
    pub fn with_options(out: W, options: WriteOptions) -> Self {
        Self {
            out,
            options,
            stack: Vec::new(),
            after_key: false,
            wrote_root: false,
            error: None,
        }
    }

    /// Returns the sink, or the first write error encountered.
    ///
    /// # Errors
    ///
    /// The deferred [`fmt::Error`], if any event failed to write.
    pub fn finish(self) -> Result<W, fmt::Error> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.out),
        }
    }

    fn emit(&mut self, f: impl FnOnce(&mut W, &WriteOptions) -> fmt::Result) {
        if self.error.is_none() {
            if let Err(e) = f(&mut self.out, &self.options) {
                self.error = Some(e);
            }
        }
    }

    /// Writes whatever separates the upcoming value from what came before:
    /// nothing after a field name, a comma and indentation between
    /// container entries, a newline between top-level forms.
    fn before_value(&mut self) {
        if self.after_key {
            self.after_key = false;
            return;
        }
        let depth = self.stack.len();
        let entry = self.stack.last_mut().map(|(_, has_entries)| {
            let comma = *has_entries;
            *has_entries = true;
            comma
        });
        if let Some(comma) = entry {
            self.emit(move |out, options| {
                if comma {
                    out.write_char(',')?;
                }
                newline_indent(options, out, depth)
            });
        } else {
            if self.wrote_root {
                self.emit(|out, _| out.write_char('\n'));
            }
            self.wrote_root = true;
        }
    }

    fn close(&mut self, frame: Frame, bracket: char) {
        let closed = self.stack.pop();
        debug_assert_eq!(closed.map(|(f, _)| f), Some(frame));
        let had_entries = closed.is_some_and(|(_, entries)| entries);
        let depth = self.stack.len();
        self.emit(|out, options| {
            if had_entries {
                newline_indent(options, out, depth)?;
            }
            out.write_char(bracket)
        });
    }
}

impl<W: Write> Handler for EventWriter<W> {
    fn null(&mut self) {
        self.before_value();
        self.emit(|out, _| out.write_str("null"));
    }

    fn boolean(&mut self, value: bool) {
        self.before_value();
        self.emit(move |out, _| out.write_str(if value { "true" } else { "false" }));
    }

    fn string(&mut self, value: String) {
        self.before_value();
        self.emit(move |out, options| write_string(&value, options, out));
    }

    fn number(&mut self, value: Number) {
        self.before_value();
        self.emit(move |out, _| write!(out, "{value}"));
    }

    fn array_start(&mut self) {
        self.before_value();
        self.stack.push((Frame::Array, false));
        self.emit(|out, _| out.write_char('['));
    }

    fn array_end(&mut self) {
        self.close(Frame::Array, ']');
    }

    fn object_start(&mut self) {
        self.before_value();
        self.stack.push((Frame::Object, false));
        self.emit(|out, _| out.write_char('{'));
    }

    fn field_name(&mut self, name: String) {
        let depth = self.stack.len();
        let comma = match self.stack.last_mut() {
            Some((_, has_entries)) => {
                let comma = *has_entries;
                *has_entries = true;
                comma
            }
            None => false,
        };
        self.emit(move |out, options| {
            if comma {
                out.write_char(',')?;
            }
            newline_indent(options, out, depth)?;
            write_key(&name, options, out)
        });
        self.after_key = true;
    }

    fn object_end(&mut self) {
        self.close(Frame::Object, '}');
    }
}
