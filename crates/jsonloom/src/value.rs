//! The JSON value tree.
//!
//! This module defines the [`Json`] enum, a closed set of variants for every
//! value RFC 8259 can express. Trees are immutable by ownership: once built
//! (by [`crate::parse`], the builders, or the `From` conversions) a value is
//! only ever read, so a finished tree can be shared freely across threads.

use indexmap::IndexMap;

use crate::number::{Number, NumberError};

/// The object representation: insertion-ordered map with unique string keys.
pub type Map = IndexMap<String, Json>;

/// The array representation.
pub type Array = Vec<Json>;

/// A JSON value as defined by [RFC 8259].
///
/// # Examples
///
/// ```
/// use jsonloom::{Json, Map};
///
/// let mut map = Map::new();
/// map.insert("key".to_string(), Json::String("value".into()));
/// let v = Json::Object(map);
/// assert_eq!(v.to_string(), r#"{"key":"value"}"#);
/// ```
///
/// [RFC 8259]: https://datatracker.ietf.org/doc/html/rfc8259
#[derive(Clone, Debug, PartialEq)]
pub enum Json {
    /// The JSON `null`.
    Null,
    /// A JSON boolean.
    Boolean(bool),
    /// A JSON number; see [`Number`] for the exact-vs-lossy contract.
    Number(Number),
    /// A JSON string, holding the literal text verbatim. Escaping is applied
    /// by the writer, never at construction.
    String(String),
    /// An ordered sequence of values. An absent element has no encoding;
    /// "nothing here" must be spelled as an explicit [`Json::Null`].
    Array(Array),
    /// An insertion-ordered mapping of unique string keys to values.
    Object(Map),
}

impl Default for Json {
    fn default() -> Self {
        Self::Null
    }
}

impl Json {
    /// Returns `true` if the value is [`Null`].
    ///
    /// [`Null`]: Json::Null
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if the value is [`Boolean`].
    ///
    /// [`Boolean`]: Json::Boolean
    #[must_use]
    pub fn is_boolean(&self) -> bool {
        matches!(self, Self::Boolean(..))
    }

    /// Returns `true` if the value is [`Number`].
    ///
    /// [`Number`]: Json::Number
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, Self::Number(..))
    }

    /// Returns `true` if the value is [`String`].
    ///
    /// [`String`]: Json::String
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(..))
    }

    /// Returns `true` if the value is [`Array`].
    ///
    /// [`Array`]: Json::Array
    #[must_use]
    pub fn is_array(&self) -> bool {
        matches!(self, Self::Array(..))
    }

    /// Returns `true` if the value is [`Object`].
    ///
    /// [`Object`]: Json::Object
    #[must_use]
    pub fn is_object(&self) -> bool {
        matches!(self, Self::Object(..))
    }

    /// Borrows the inner value if this is a [`Json::Boolean`], `None`
    /// otherwise.
    #[must_use]
    pub fn as_boolean(&self) -> Option<bool> {
        if let Self::Boolean(v) = self { Some(*v) } else { None }
    }

    /// Borrows the inner value if this is a [`Json::Number`], `None`
    /// otherwise.
    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        if let Self::Number(v) = self { Some(v) } else { None }
    }

    /// Borrows the inner value if this is a [`Json::String`], `None`
    /// otherwise.
    #[must_use]
    pub fn as_string(&self) -> Option<&str> {
        if let Self::String(v) = self { Some(v) } else { None }
    }

    /// Borrows the inner value if this is a [`Json::Array`], `None`
    /// otherwise.
    #[must_use]
    pub fn as_array(&self) -> Option<&Array> {
        if let Self::Array(v) = self { Some(v) } else { None }
    }

    /// Borrows the inner value if this is a [`Json::Object`], `None`
    /// otherwise.
    #[must_use]
    pub fn as_object(&self) -> Option<&Map> {
        if let Self::Object(v) = self { Some(v) } else { None }
    }
}

impl From<bool> for Json {
    fn from(v: bool) -> Self {
        Self::Boolean(v)
    }
}

impl From<Number> for Json {
    fn from(v: Number) -> Self {
        Self::Number(v)
    }
}

macro_rules! impl_json_from_int {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Json {
                fn from(v: $t) -> Self {
                    Self::Number(Number::from(v))
                }
            }
        )+
    };
}
impl_json_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

/// Fails on NaN and infinities, which have no JSON representation.
impl TryFrom<f64> for Json {
    type Error = NumberError;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        Number::from_f64(v).map(Self::Number)
    }
}

/// Fails on NaN and infinities, which have no JSON representation.
impl TryFrom<f32> for Json {
    type Error = NumberError;

    fn try_from(v: f32) -> Result<Self, Self::Error> {
        Number::from_f32(v).map(Self::Number)
    }
}

impl From<&str> for Json {
    fn from(v: &str) -> Self {
        Self::String(v.to_owned())
    }
}

impl From<String> for Json {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<Array> for Json {
    fn from(v: Array) -> Self {
        Self::Array(v)
    }
}

impl From<Map> for Json {
    fn from(v: Map) -> Self {
        Self::Object(v)
    }
}

impl<T: Into<Json>> FromIterator<T> for Json {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::Array(iter.into_iter().map(Into::into).collect())
    }
}

impl core::fmt::Display for Json {
    /// Renders the compact default form; see [`crate::writer`] for options.
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        crate::writer::write_value(self, &crate::writer::WriteOptions::default(), f)
    }
}
