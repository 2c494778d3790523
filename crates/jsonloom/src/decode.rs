//! Composable decoders extracting application types from [`Json`] values.
//!
//! A decoder is a plain function or closure `Fn(&Json) -> Result<T,
//! DecodeError>`; the functions in this module are the primitives, and the
//! higher-order ones ([`array`], [`field`], [`one_of`], …) compose caller
//! decoders into larger ones. Failures carry the path to the offending
//! value, and [`DecodeError`]'s `Display` renders a human-readable report.
//!
//! # Examples
//!
//! ```
//! use jsonloom::{decode, parse};
//!
//! let value = parse(r#"{"name": "ada", "scores": [1, 2, 3]}"#)?;
//! let name = decode::field(&value, "name", decode::string)?;
//! let scores = decode::field(&value, "scores", |v| decode::array(v, decode::int32))?;
//! assert_eq!(name, "ada");
//! assert_eq!(scores, vec![1, 2, 3]);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

use core::fmt::{self, Write as _};

use crate::number::{Decimal, Integer, Number};
use crate::value::Json;
use crate::writer::{WriteOptions, to_text_with};

/// The result of applying a decoder.
pub type DecodeResult<T> = Result<T, DecodeError>;

/// A structured decode failure.
///
/// [`Field`](DecodeError::Field) and [`Index`](DecodeError::Index) wrap a
/// cause with path context, [`OneOf`](DecodeError::OneOf) aggregates the
/// failures of an alternation, and [`Failure`](DecodeError::Failure) is the
/// leaf carrying a message and the offending value.
#[derive(Debug, Clone, PartialEq)]
pub enum DecodeError {
    /// The cause occurred under this object field.
    Field(String, Box<DecodeError>),
    /// The cause occurred under this array index.
    Index(usize, Box<DecodeError>),
    /// Every alternative of a [`one_of`] failed; never empty.
    OneOf(Vec<DecodeError>),
    /// The leaf: a message and the value that was rejected.
    Failure(String, Json),
}

impl DecodeError {
    /// Creates a leaf failure for `value`.
    #[must_use]
    pub fn failure(message: impl Into<String>, value: &Json) -> Self {
        Self::Failure(message.into(), value.clone())
    }

    /// Wraps a cause with the object field it occurred under.
    #[must_use]
    pub fn at_field(name: impl Into<String>, cause: Self) -> Self {
        Self::Field(name.into(), Box::new(cause))
    }

    /// Wraps a cause with the array index it occurred under.
    #[must_use]
    pub fn at_index(index: usize, cause: Self) -> Self {
        Self::Index(index, Box::new(cause))
    }

    /// Converts any error raised by caller logic into a uniform leaf
    /// failure, so mixed failure origins all render the same way.
    #[must_use]
    pub fn wrap(error: impl fmt::Display, value: &Json) -> Self {
        Self::Failure(error.to_string(), value.clone())
    }

    fn render(&self, path: &mut String, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name, cause) => {
                if is_identifier(name) {
                    let _ = write!(path, ".{name}");
                } else {
                    let _ = write!(path, "[{name}]");
                }
                cause.render(path, f)
            }
            Self::Index(index, cause) => {
                let _ = write!(path, "[{index}]");
                cause.render(path, f)
            }
            Self::OneOf(errors) => match errors.as_slice() {
                [] => write!(f, "The oneOf decoder at json{path} has no alternatives"),
                [single] => single.render(path, f),
                many => {
                    write!(
                        f,
                        "The oneOf decoder at json{path} failed in the following {} ways:",
                        many.len()
                    )?;
                    for (i, error) in many.iter().enumerate() {
                        // Each alternative renders standalone, with its own
                        // path rooted at the alternation point.
                        write!(f, "\n\n({}) {error}", i + 1)?;
                    }
                    Ok(())
                }
            },
            Self::Failure(message, value) => {
                if path.is_empty() {
                    f.write_str("Problem with the given value:\n\n")?;
                } else {
                    write!(f, "Problem with the value at json{path}:\n\n")?;
                }
                let pretty = to_text_with(value, &WriteOptions { indent: 4, ..WriteOptions::default() });
                for (i, line) in pretty.lines().enumerate() {
                    if i > 0 {
                        f.write_char('\n')?;
                    }
                    write!(f, "    {line}")?;
                }
                write!(f, "\n\n{message}")
            }
        }
    }
}

fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_alphabetic() || c == '_')
        && chars.all(|c| c.is_alphanumeric() || c == '_')
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.render(&mut String::new(), f)
    }
}

impl std::error::Error for DecodeError {}

// ------------------------------------------------------------------------
// Primitive decoders
// ------------------------------------------------------------------------

/// Decodes a JSON string.
///
/// # Errors
///
/// `Failure("expected a string")` for any other variant.
pub fn string(value: &Json) -> DecodeResult<String> {
    match value {
        Json::String(s) => Ok(s.clone()),
        _ => Err(DecodeError::failure("expected a string", value)),
    }
}

/// Decodes a JSON boolean.
///
/// # Errors
///
/// `Failure("expected a boolean")` for any other variant.
pub fn boolean(value: &Json) -> DecodeResult<bool> {
    match value {
        Json::Boolean(b) => Ok(*b),
        _ => Err(DecodeError::failure("expected a boolean", value)),
    }
}

/// Decodes a number that is integral and fits `i32` exactly.
///
/// # Errors
///
/// `Failure("expected a 32-bit integer")` for non-numbers, fractional
/// values, and out-of-range values.
pub fn int32(value: &Json) -> DecodeResult<i32> {
    value
        .as_number()
        .and_then(|n| n.to_i32().ok())
        .ok_or_else(|| DecodeError::failure("expected a 32-bit integer", value))
}

/// Decodes a number that is integral and fits `i64` exactly.
///
/// # Errors
///
/// `Failure("expected a 64-bit integer")` for non-numbers, fractional
/// values, and out-of-range values.
pub fn int64(value: &Json) -> DecodeResult<i64> {
    value
        .as_number()
        .and_then(|n| n.to_i64().ok())
        .ok_or_else(|| DecodeError::failure("expected a 64-bit integer", value))
}

/// Decodes any number to `f32`, nearest representable; never range-fails.
///
/// # Errors
///
/// `Failure("expected a number")` for non-numbers.
pub fn float32(value: &Json) -> DecodeResult<f32> {
    value
        .as_number()
        .map(Number::to_f32)
        .ok_or_else(|| DecodeError::failure("expected a number", value))
}

/// Decodes any number to `f64`, nearest representable; never range-fails.
///
/// # Errors
///
/// `Failure("expected a number")` for non-numbers.
pub fn float64(value: &Json) -> DecodeResult<f64> {
    value
        .as_number()
        .map(Number::to_f64)
        .ok_or_else(|| DecodeError::failure("expected a number", value))
}

/// Decodes a number with an exact arbitrary-precision integer form.
///
/// # Errors
///
/// `Failure("expected an integer")` for non-numbers and fractional values.
pub fn integer(value: &Json) -> DecodeResult<Integer> {
    value
        .as_number()
        .and_then(|n| n.to_integer().ok())
        .ok_or_else(|| DecodeError::failure("expected an integer", value))
}

/// Decodes any number as an arbitrary-precision decimal; always lossless.
///
/// # Errors
///
/// `Failure("expected a number")` for non-numbers.
pub fn decimal(value: &Json) -> DecodeResult<Decimal> {
    value
        .as_number()
        .map(Number::to_decimal)
        .ok_or_else(|| DecodeError::failure("expected a number", value))
}

/// Requires the JSON `null`.
///
/// # Errors
///
/// `Failure("expected null")` for any other variant.
pub fn null(value: &Json) -> DecodeResult<()> {
    match value {
        Json::Null => Ok(()),
        _ => Err(DecodeError::failure("expected null", value)),
    }
}

/// Requires the JSON `null` and returns `substitute` in its place.
///
/// # Errors
///
/// `Failure("expected null")` for any other variant.
pub fn null_or<T>(value: &Json, substitute: T) -> DecodeResult<T> {
    null(value).map(|()| substitute)
}

// ------------------------------------------------------------------------
// Containers
// ------------------------------------------------------------------------

/// Decodes every element of an array with `item`.
///
/// # Errors
///
/// `Failure("expected an array")` for non-arrays; an element failure is
/// wrapped as `Index(i, cause)`.
pub fn array<T>(value: &Json, item: impl Fn(&Json) -> DecodeResult<T>) -> DecodeResult<Vec<T>> {
    match value {
        Json::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, element)| item(element).map_err(|e| DecodeError::at_index(i, e)))
            .collect(),
        _ => Err(DecodeError::failure("expected an array", value)),
    }
}

/// Decodes every entry value of an object with `item`, preserving source
/// key order.
///
/// # Errors
///
/// `Failure("expected an object")` for non-objects; an entry failure is
/// wrapped as `Field(key, cause)`.
pub fn object<T>(
    value: &Json,
    item: impl Fn(&Json) -> DecodeResult<T>,
) -> DecodeResult<Vec<(String, T)>> {
    match value {
        Json::Object(map) => map
            .iter()
            .map(|(key, entry)| {
                item(entry)
                    .map(|v| (key.clone(), v))
                    .map_err(|e| DecodeError::at_field(key.clone(), e))
            })
            .collect(),
        _ => Err(DecodeError::failure("expected an object", value)),
    }
}

// ------------------------------------------------------------------------
// Field and index access
// ------------------------------------------------------------------------

/// Decodes a required object field.
///
/// # Errors
///
/// `Failure("expected an object")` for non-objects;
/// `Field(name, Failure("no value for field"))` when the key is absent; a
/// decoder failure is wrapped as `Field(name, cause)`.
pub fn field<T>(
    value: &Json,
    name: &str,
    decoder: impl FnOnce(&Json) -> DecodeResult<T>,
) -> DecodeResult<T> {
    let map = value
        .as_object()
        .ok_or_else(|| DecodeError::failure("expected an object", value))?;
    match map.get(name) {
        Some(entry) => decoder(entry).map_err(|e| DecodeError::at_field(name, e)),
        None => Err(DecodeError::at_field(
            name,
            DecodeError::failure("no value for field", value),
        )),
    }
}

/// Decodes an object field, substituting `default` when the key is absent.
///
/// A present `null` is handed to the decoder, not defaulted; combine with
/// [`nullable_field`] semantics via [`optional_nullable_field`] if both are
/// wanted.
///
/// # Errors
///
/// `Failure("expected an object")` for non-objects; a decoder failure is
/// wrapped as `Field(name, cause)`.
pub fn optional_field<T>(
    value: &Json,
    name: &str,
    default: T,
    decoder: impl FnOnce(&Json) -> DecodeResult<T>,
) -> DecodeResult<T> {
    let map = value
        .as_object()
        .ok_or_else(|| DecodeError::failure("expected an object", value))?;
    match map.get(name) {
        Some(entry) => decoder(entry).map_err(|e| DecodeError::at_field(name, e)),
        None => Ok(default),
    }
}

/// Decodes a required object field, substituting `default` when the value
/// is `null`.
///
/// # Errors
///
/// As [`field`]: an absent key is still
/// `Field(name, Failure("no value for field"))`.
pub fn nullable_field<T>(
    value: &Json,
    name: &str,
    default: T,
    decoder: impl FnOnce(&Json) -> DecodeResult<T>,
) -> DecodeResult<T> {
    let map = value
        .as_object()
        .ok_or_else(|| DecodeError::failure("expected an object", value))?;
    match map.get(name) {
        Some(Json::Null) => Ok(default),
        Some(entry) => decoder(entry).map_err(|e| DecodeError::at_field(name, e)),
        None => Err(DecodeError::at_field(
            name,
            DecodeError::failure("no value for field", value),
        )),
    }
}

/// Decodes an object field with two distinct defaults: `missing_default`
/// when the key is absent and `null_default` when the value is `null`.
///
/// # Errors
///
/// `Failure("expected an object")` for non-objects; a decoder failure is
/// wrapped as `Field(name, cause)`.
pub fn optional_nullable_field<T>(
    value: &Json,
    name: &str,
    missing_default: T,
    null_default: T,
    decoder: impl FnOnce(&Json) -> DecodeResult<T>,
) -> DecodeResult<T> {
    let map = value
        .as_object()
        .ok_or_else(|| DecodeError::failure("expected an object", value))?;
    match map.get(name) {
        Some(Json::Null) => Ok(null_default),
        Some(entry) => decoder(entry).map_err(|e| DecodeError::at_field(name, e)),
        None => Ok(missing_default),
    }
}

/// Decodes a required array position.
///
/// # Errors
///
/// `Failure("expected an array")` for non-arrays;
/// `Index(i, Failure("expected array index to be in bounds"))` when out of
/// range; a decoder failure is wrapped as `Index(i, cause)`.
pub fn index<T>(
    value: &Json,
    i: usize,
    decoder: impl FnOnce(&Json) -> DecodeResult<T>,
) -> DecodeResult<T> {
    let items = value
        .as_array()
        .ok_or_else(|| DecodeError::failure("expected an array", value))?;
    match items.get(i) {
        Some(element) => decoder(element).map_err(|e| DecodeError::at_index(i, e)),
        None => Err(DecodeError::at_index(
            i,
            DecodeError::failure("expected array index to be in bounds", value),
        )),
    }
}

// ------------------------------------------------------------------------
// Alternation
// ------------------------------------------------------------------------

/// Tries `decoders` left to right, returning the first success.
///
/// When all fail, every underlying error is aggregated into one
/// [`DecodeError::OneOf`]; a sub-decoder's own `OneOf` is flattened so
/// nested alternations present as one flat ordered list.
///
/// # Panics
///
/// On an empty decoder list — an alternation with no alternatives is a
/// programming error.
///
/// # Errors
///
/// The aggregated [`DecodeError::OneOf`] when every alternative fails.
pub fn one_of<T>(
    value: &Json,
    decoders: &[&dyn Fn(&Json) -> DecodeResult<T>],
) -> DecodeResult<T> {
    assert!(!decoders.is_empty(), "one_of requires at least one decoder");
    let mut errors = Vec::with_capacity(decoders.len());
    for decoder in decoders {
        match decoder(value) {
            Ok(result) => return Ok(result),
            Err(DecodeError::OneOf(inner)) => errors.extend(inner),
            Err(error) => errors.push(error),
        }
    }
    Err(DecodeError::OneOf(errors))
}
