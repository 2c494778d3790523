//! Input sources feeding the scanner.
//!
//! A [`Source`] exposes the remaining input as a decoded text window. The
//! scanner peeks characters at the front of the window and consumes them by
//! byte count, which lets the string fast path hand whole unescaped spans to
//! the output in one append.

use std::io::{self, Read};

const BUF_SIZE: usize = 8 * 1024;

/// A supplier of decoded JSON text.
pub trait Source {
    /// Returns the current text window, refilling from the underlying input
    /// when empty. An empty window means end of input.
    ///
    /// # Errors
    ///
    /// Propagates read failures; invalid UTF-8 surfaces as
    /// [`io::ErrorKind::InvalidData`].
    fn chunk(&mut self) -> io::Result<&str>;

    /// Marks the first `bytes` bytes of the current window as consumed.
    /// `bytes` must lie on a character boundary of the window.
    fn consume(&mut self, bytes: usize);
}

/// A source over in-memory text; the window is simply the unread remainder.
#[derive(Debug)]
pub struct StrSource<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> StrSource<'a> {
    /// Creates a source reading from `text`.
    #[must_use]
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }
}

impl Source for StrSource<'_> {
    fn chunk(&mut self) -> io::Result<&str> {
        Ok(&self.text[self.pos..])
    }

    fn consume(&mut self, bytes: usize) {
        debug_assert!(self.text.is_char_boundary(self.pos + bytes));
        self.pos += bytes;
    }
}

/// A source over a blocking [`Read`] stream.
///
/// Bytes are read into a fixed 8 KiB buffer and validated as UTF-8; a
/// multi-byte sequence split across reads is carried over to the next refill.
/// Invalid bytes, or an incomplete sequence at true end of input, are fatal.
#[derive(Debug)]
pub struct IoSource<R> {
    inner: R,
    buf: Box<[u8]>,
    /// Bytes below this offset are consumed.
    start: usize,
    /// Bytes in `start..valid` are validated UTF-8 and not yet consumed.
    valid: usize,
    /// Bytes in `valid..filled` have been read but not yet validated.
    filled: usize,
    eof: bool,
}

impl<R: Read> IoSource<R> {
    /// Creates a source reading from `inner`.
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            buf: vec![0u8; BUF_SIZE].into_boxed_slice(),
            start: 0,
            valid: 0,
            filled: 0,
            eof: false,
        }
    }

    fn refill(&mut self) -> io::Result<()> {
        if self.start > 0 {
            self.buf.copy_within(self.start..self.filled, 0);
            self.filled -= self.start;
            self.start = 0;
            self.valid = 0;
        }
        loop {
            if self.filled > 0 {
                match core::str::from_utf8(&self.buf[..self.filled]) {
                    Ok(_) => {
                        self.valid = self.filled;
                        return Ok(());
                    }
                    Err(e) if e.valid_up_to() > 0 => {
                        self.valid = e.valid_up_to();
                        return Ok(());
                    }
                    Err(e) if e.error_len().is_some() || self.eof => {
                        return Err(invalid_utf8());
                    }
                    // Incomplete sequence at the front; read more below.
                    Err(_) => {}
                }
            }
            if self.eof {
                return Ok(());
            }
            if self.filled == self.buf.len() {
                // Unreachable with a sane buffer size: an incomplete UTF-8
                // sequence is at most three bytes.
                return Err(invalid_utf8());
            }
            let n = self.inner.read(&mut self.buf[self.filled..])?;
            if n == 0 {
                self.eof = true;
            } else {
                self.filled += n;
            }
        }
    }
}

fn invalid_utf8() -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, "invalid UTF-8 in input")
}

impl<R: Read> Source for IoSource<R> {
    fn chunk(&mut self) -> io::Result<&str> {
        if self.start >= self.valid {
            self.refill()?;
        }
        core::str::from_utf8(&self.buf[self.start..self.valid]).map_err(|_| invalid_utf8())
    }

    fn consume(&mut self, bytes: usize) {
        debug_assert!(self.start + bytes <= self.valid);
        self.start += bytes;
    }
}
