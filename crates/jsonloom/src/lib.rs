//! A JSON reader and writer with exact numbers and composable decoders.
//!
//! The crate parses standard JSON (RFC 8259) into an immutable [`Json`]
//! tree, renders trees back to text, and extracts application types from
//! trees with the combinators in [`decode`]. Numbers keep their source
//! spelling: an integer literal of any magnitude survives parse/write
//! round trips digit for digit, and every literal can be read back
//! losslessly as an arbitrary-precision [`Decimal`].
//!
//! # Parsing
//!
//! [`parse`] handles the common case of one value in one string:
//!
//! ```
//! use jsonloom::{Json, parse};
//!
//! let value = parse(r#"{"name": "ada", "tags": ["x", "y"]}"#)?;
//! let name = value.as_object().and_then(|m| m.get("name"));
//! assert_eq!(name.and_then(Json::as_string), Some("ada"));
//! # Ok::<(), jsonloom::ParseError>(())
//! ```
//!
//! [`Reader`] pulls several whitespace-separated top-level forms out of one
//! stream, and [`PullParser`] exposes the raw event sequence without
//! materializing a tree. All three accept input from an in-memory `&str` or
//! any blocking [`std::io::Read`].
//!
//! # Writing
//!
//! [`to_text`] renders compact ASCII-safe output; [`to_text_with`] takes
//! [`WriteOptions`] for indentation and escaping policy. [`EventWriter`] is
//! a [`Handler`] that serializes an event stream directly, so a document can
//! be reformatted in one streaming pass.
//!
//! # Decoding
//!
//! A decoder is any `Fn(&Json) -> Result<T, DecodeError>`; the [`decode`]
//! module provides the primitives and the combinators that compose them.
//! Failures carry the path to the offending value:
//!
//! ```
//! use jsonloom::{decode, parse};
//!
//! let value = parse(r#"{"port": 8080}"#)?;
//! let port = decode::field(&value, "port", decode::int32)?;
//! assert_eq!(port, 8080);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod builder;
pub mod decode;
mod event;
mod number;
mod parser;
mod tree;
mod value;
mod writer;

#[cfg(test)]
mod tests;

pub use builder::{ArrayBuilder, ObjectBuilder};
pub use event::{Event, Handler};
pub use number::{Decimal, Integer, Number, NumberError};
pub use parser::{
    ErrorKind, IoSource, ParseError, ParseOptions, PullParser, Source, StrSource, parse,
    parse_with_handler, parse_with_options,
};
pub use tree::{Reader, TreeBuilder};
pub use value::{Array, Json, Map};
pub use writer::{EventWriter, WriteOptions, to_text, to_text_with, write_value};
