//! The character-level tokenizer.
//!
//! The scanner owns a [`Source`] and tracks the 1-based line and column used
//! in error reports. It lexes the token-level grammar: whitespace, the three
//! keyword literals, strings (with a bulk fast path over each source window
//! and a character-by-character escape path), and numbers via an explicit
//! state machine. The structural grammar lives one layer up.

use crate::number::Number;
use crate::parser::error::{ErrorKind, ParseError};
use crate::parser::source::Source;

pub(crate) struct Scanner<S> {
    source: S,
    line: usize,
    column: usize,
}

/// States of the number grammar. The machine starts after the optional minus
/// sign, on the first digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NumberState {
    /// Consumed a leading `0`; only `.`, an exponent, or a terminator may
    /// follow (rejects leading zeros).
    IntZero,
    /// Consuming integer digits.
    IntDigit,
    /// Consumed `.`; a fraction digit is required.
    FracPoint,
    /// Consuming fraction digits.
    FracDigit,
    /// Consumed `e`/`E`; a sign or digit is required.
    ExpSymbol,
    /// Consumed the exponent sign; a digit is required.
    ExpSign,
    /// Consuming exponent digits.
    ExpDigit,
}

/// Characters that may follow a complete number literal. The terminator is
/// left unconsumed for the structural parser.
fn terminates_number(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r' | ',' | ']' | '}')
}

impl<S: Source> Scanner<S> {
    pub(crate) fn new(source: S) -> Self {
        Self { source, line: 1, column: 1 }
    }

    /// Builds an error pointing at the next unconsumed character.
    pub(crate) fn error(&self, kind: ErrorKind) -> ParseError {
        ParseError::new(kind, self.line, self.column)
    }

    fn io_error(&self, e: std::io::Error) -> ParseError {
        if e.kind() == std::io::ErrorKind::InvalidData {
            self.error(ErrorKind::InvalidUtf8)
        } else {
            self.error(ErrorKind::Io(e))
        }
    }

    /// Looks at the next character without consuming it. `None` is end of
    /// input.
    pub(crate) fn peek(&mut self) -> Result<Option<char>, ParseError> {
        match self.source.chunk() {
            Ok(chunk) => Ok(chunk.chars().next()),
            Err(e) => Err(self.io_error(e)),
        }
    }

    /// Consumes the next character.
    pub(crate) fn bump(&mut self) -> Result<Option<char>, ParseError> {
        let c = self.peek()?;
        if let Some(c) = c {
            self.source.consume(c.len_utf8());
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        Ok(c)
    }

    /// Skips the four JSON whitespace characters between tokens.
    pub(crate) fn skip_whitespace(&mut self) -> Result<(), ParseError> {
        while matches!(self.peek()?, Some(' ' | '\t' | '\n' | '\r')) {
            self.bump()?;
        }
        Ok(())
    }

    /// Matches the fixed remaining characters of a keyword literal whose
    /// first character was already consumed.
    pub(crate) fn expect_rest(&mut self, rest: &str) -> Result<(), ParseError> {
        for expected in rest.chars() {
            match self.peek()? {
                Some(c) if c == expected => {
                    self.bump()?;
                }
                Some(c) => return Err(self.error(ErrorKind::InvalidCharacter(c))),
                None => return Err(self.error(ErrorKind::UnexpectedEndOfInput)),
            }
        }
        Ok(())
    }

    /// Reads a string body after the opening quote has been consumed.
    ///
    /// Each source window is first scanned for the closing quote, a
    /// backslash, or a control byte; everything before the stop byte is
    /// appended in one piece. Escapes drop to a character-level path.
    pub(crate) fn read_string(&mut self) -> Result<String, ParseError> {
        let mut out = String::new();
        loop {
            let chunk = match self.source.chunk() {
                Ok(chunk) => chunk,
                Err(e) => return Err(self.io_error(e)),
            };
            if chunk.is_empty() {
                return Err(self.error(ErrorKind::UnexpectedEndOfInput));
            }
            let bytes = chunk.as_bytes();
            let mut i = 0;
            while i < bytes.len() {
                // The stop bytes are all ASCII, so `i` stays on a character
                // boundary; UTF-8 continuation bytes pass straight through.
                let b = bytes[i];
                if b == b'"' || b == b'\\' || b < 0x20 {
                    break;
                }
                i += 1;
            }
            let (plain, _) = chunk.split_at(i);
            let stop = bytes.get(i).copied();
            self.column += plain.chars().count();
            out.push_str(plain);
            self.source.consume(i);
            match stop {
                // Window exhausted mid-string; pull the next one.
                None => {}
                Some(b'"') => {
                    self.bump()?;
                    return Ok(out);
                }
                Some(b'\\') => {
                    self.bump()?;
                    self.read_escape(&mut out)?;
                }
                Some(control) => {
                    return Err(self.error(ErrorKind::InvalidCharacter(control as char)));
                }
            }
        }
    }

    /// Decodes one escape sequence after the backslash has been consumed.
    fn read_escape(&mut self, out: &mut String) -> Result<(), ParseError> {
        let c = match self.peek()? {
            Some(c) => c,
            None => return Err(self.error(ErrorKind::UnexpectedEndOfInput)),
        };
        match c {
            '"' | '\\' | '/' => {
                self.bump()?;
                out.push(c);
            }
            'b' => {
                self.bump()?;
                out.push('\u{0008}');
            }
            'f' => {
                self.bump()?;
                out.push('\u{000C}');
            }
            'n' => {
                self.bump()?;
                out.push('\n');
            }
            'r' => {
                self.bump()?;
                out.push('\r');
            }
            't' => {
                self.bump()?;
                out.push('\t');
            }
            'u' => {
                self.bump()?;
                let unit = self.read_hex4()?;
                let code = if (0xD800..=0xDBFF).contains(&unit) {
                    // High surrogate: the low half must follow as another
                    // `\uXXXX` escape.
                    let low = self.read_low_surrogate()?;
                    0x10000 + ((u32::from(unit) - 0xD800) << 10) + (u32::from(low) - 0xDC00)
                } else {
                    u32::from(unit)
                };
                match char::from_u32(code) {
                    Some(c) => out.push(c),
                    None => return Err(self.error(ErrorKind::UnpairedSurrogate)),
                }
            }
            other => return Err(self.error(ErrorKind::InvalidEscape(other))),
        }
        Ok(())
    }

    /// Reads exactly four hex digits; fewer than four, or a non-hex digit,
    /// is fatal.
    fn read_hex4(&mut self) -> Result<u16, ParseError> {
        let mut value: u16 = 0;
        for _ in 0..4 {
            let c = match self.peek()? {
                Some(c) => c,
                None => return Err(self.error(ErrorKind::UnexpectedEndOfInput)),
            };
            let Some(digit) = c.to_digit(16) else {
                return Err(self.error(ErrorKind::InvalidCharacter(c)));
            };
            self.bump()?;
            #[allow(clippy::cast_possible_truncation)]
            {
                value = (value << 4) | digit as u16;
            }
        }
        Ok(value)
    }

    fn read_low_surrogate(&mut self) -> Result<u16, ParseError> {
        match self.peek()? {
            Some('\\') => {
                self.bump()?;
            }
            Some(_) => return Err(self.error(ErrorKind::UnpairedSurrogate)),
            None => return Err(self.error(ErrorKind::UnexpectedEndOfInput)),
        }
        match self.peek()? {
            Some('u') => {
                self.bump()?;
            }
            Some(_) => return Err(self.error(ErrorKind::UnpairedSurrogate)),
            None => return Err(self.error(ErrorKind::UnexpectedEndOfInput)),
        }
        let low = self.read_hex4()?;
        if (0xDC00..=0xDFFF).contains(&low) {
            Ok(low)
        } else {
            Err(self.error(ErrorKind::UnpairedSurrogate))
        }
    }

    /// Reads a number literal starting at the current character, which the
    /// caller has peeked as `-` or a digit. The terminator is left
    /// unconsumed.
    pub(crate) fn read_number(&mut self) -> Result<Number, ParseError> {
        let mut text = String::new();
        let mut decimal = false;

        if self.peek()? == Some('-') {
            self.bump()?;
            text.push('-');
        }
        let mut state = match self.peek()? {
            Some('0') => {
                self.bump()?;
                text.push('0');
                NumberState::IntZero
            }
            Some(c @ '1'..='9') => {
                self.bump()?;
                text.push(c);
                NumberState::IntDigit
            }
            Some(c) => return Err(self.error(ErrorKind::InvalidCharacter(c))),
            None => return Err(self.error(ErrorKind::UnexpectedEndOfInput)),
        };

        loop {
            let c = self.peek()?;
            state = match state {
                NumberState::IntZero | NumberState::IntDigit => match c {
                    Some(d @ '0'..='9') if state == NumberState::IntDigit => {
                        self.bump()?;
                        text.push(d);
                        NumberState::IntDigit
                    }
                    Some('.') => {
                        self.bump()?;
                        text.push('.');
                        decimal = true;
                        NumberState::FracPoint
                    }
                    Some(e @ ('e' | 'E')) => {
                        self.bump()?;
                        text.push(e);
                        decimal = true;
                        NumberState::ExpSymbol
                    }
                    Some(c) if terminates_number(c) => break,
                    None => break,
                    Some(c) => return Err(self.error(ErrorKind::InvalidCharacter(c))),
                },
                NumberState::FracPoint | NumberState::FracDigit => match c {
                    Some(d @ '0'..='9') => {
                        self.bump()?;
                        text.push(d);
                        NumberState::FracDigit
                    }
                    Some(e @ ('e' | 'E')) if state == NumberState::FracDigit => {
                        self.bump()?;
                        text.push(e);
                        NumberState::ExpSymbol
                    }
                    Some(c) if state == NumberState::FracDigit && terminates_number(c) => break,
                    None if state == NumberState::FracDigit => break,
                    Some(c) => return Err(self.error(ErrorKind::InvalidCharacter(c))),
                    None => return Err(self.error(ErrorKind::UnexpectedEndOfInput)),
                },
                NumberState::ExpSymbol => match c {
                    Some(s @ ('+' | '-')) => {
                        self.bump()?;
                        text.push(s);
                        NumberState::ExpSign
                    }
                    Some(d @ '0'..='9') => {
                        self.bump()?;
                        text.push(d);
                        NumberState::ExpDigit
                    }
                    Some(c) => return Err(self.error(ErrorKind::InvalidCharacter(c))),
                    None => return Err(self.error(ErrorKind::UnexpectedEndOfInput)),
                },
                NumberState::ExpSign | NumberState::ExpDigit => match c {
                    Some(d @ '0'..='9') => {
                        self.bump()?;
                        text.push(d);
                        NumberState::ExpDigit
                    }
                    Some(c) if state == NumberState::ExpDigit && terminates_number(c) => break,
                    None if state == NumberState::ExpDigit => break,
                    Some(c) => return Err(self.error(ErrorKind::InvalidCharacter(c))),
                    None => return Err(self.error(ErrorKind::UnexpectedEndOfInput)),
                },
            };
        }

        Ok(Number::from_parts(&text, decimal))
    }
}
