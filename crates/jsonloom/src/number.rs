//! Arbitrary-precision JSON numbers.
//!
//! A [`Number`] is either an [`Integer`] or a [`Decimal`]. Both retain the
//! canonical literal text of the value, so writing a parsed document
//! reproduces each number exactly as it appeared. Equality and hashing are
//! defined by mathematical value: `Integer(2)`, `Decimal("2.0")`, and
//! `Decimal("2e0")` all compare equal and hash identically.

use core::{
    fmt,
    hash::{Hash, Hasher},
    str::FromStr,
};

use thiserror::Error;

/// Error produced by numeric construction and conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumberError {
    /// The value does not fit the requested fixed-width type.
    #[error("number does not fit in {0}")]
    OutOfRange(&'static str),
    /// The value has a fractional part and no exact integer form.
    #[error("number is not integral")]
    NotIntegral,
    /// NaN and infinities have no JSON representation.
    #[error("non-finite numbers cannot be represented in JSON")]
    NotFinite,
    /// The text is not a valid JSON number literal.
    #[error("invalid number literal")]
    InvalidLiteral,
}

/// Digit-string integers above this many digits are refused by
/// [`Decimal::to_integer`] rather than materialized.
const MAX_INTEGER_DIGITS: u64 = 1 << 20;

/// A JSON number.
///
/// The variant records how the literal was spelled: no fraction and no
/// exponent parses as [`Integer`], anything else as [`Decimal`]. Equality
/// ignores the variant and compares mathematical values.
#[derive(Debug, Clone)]
pub enum Number {
    /// A number written without fraction or exponent.
    Integer(Integer),
    /// A number written with a fraction and/or an exponent.
    Decimal(Decimal),
}

/// An arbitrary-precision integer.
///
/// Values that fit an `i64` are kept in a fixed-width representation; larger
/// literals keep their decimal digit string.
#[derive(Debug, Clone)]
pub struct Integer {
    repr: IntRepr,
}

#[derive(Debug, Clone)]
enum IntRepr {
    Small(i64),
    Big(Box<str>),
}

/// An arbitrary-precision decimal, retaining its literal text.
#[derive(Debug, Clone)]
pub struct Decimal {
    text: Box<str>,
}

// ------------------------------------------------------------------------
// Normalized form
// ------------------------------------------------------------------------

/// Sign, significand, and decimal exponent with all redundancy removed.
///
/// The represented value is `sign × 0.digits × 10^exponent` where `digits`
/// has no leading or trailing zeros. Zero is `(0, "", 0)` regardless of how
/// it was spelled, so `-0`, `0.00`, and `0e9` coincide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct Normal {
    sign: i8,
    digits: String,
    exponent: i64,
}

fn normalize(literal: &str) -> Normal {
    let mut rest = literal;
    let negative = if let Some(r) = rest.strip_prefix('-') {
        rest = r;
        true
    } else {
        false
    };

    let int_end = rest.find(['.', 'e', 'E']).unwrap_or(rest.len());
    let int_digits = &rest[..int_end];
    rest = &rest[int_end..];

    let frac_digits = if let Some(r) = rest.strip_prefix('.') {
        let end = r.find(['e', 'E']).unwrap_or(r.len());
        rest = &r[end..];
        &r[..end]
    } else {
        ""
    };

    let exp: i128 = match rest.strip_prefix(['e', 'E']) {
        // Clamp absurd exponents instead of failing; the saturation bound is
        // far outside anything a finite float or practical integer reaches.
        Some(e) => e.parse::<i128>().unwrap_or_else(|_| {
            if e.starts_with('-') { i128::MIN } else { i128::MAX }
        }),
        None => 0,
    };

    let mut digits = String::with_capacity(int_digits.len() + frac_digits.len());
    digits.push_str(int_digits);
    digits.push_str(frac_digits);

    // Value so far: 0.digits × 10^(exp + int_digits.len())
    let mut exponent = exp.saturating_add(int_digits.len() as i128);
    let leading = digits.len() - digits.trim_start_matches('0').len();
    exponent = exponent.saturating_sub(leading as i128);
    let trimmed = digits.trim_start_matches('0').trim_end_matches('0');

    if trimmed.is_empty() {
        return Normal { sign: 0, digits: String::new(), exponent: 0 };
    }

    #[allow(clippy::cast_possible_truncation)]
    let exponent = exponent.clamp(i128::from(i64::MIN), i128::from(i64::MAX)) as i64;
    Normal {
        sign: if negative { -1 } else { 1 },
        digits: trimmed.to_owned(),
        exponent,
    }
}

/// Validates `text` against the JSON number grammar.
///
/// Returns `true` when the literal contains a fraction or exponent (and thus
/// parses as a [`Decimal`]).
fn validate_literal(text: &str) -> Result<bool, NumberError> {
    let mut chars = text.chars().peekable();
    let mut decimal = false;

    if chars.peek() == Some(&'-') {
        chars.next();
    }
    match chars.next() {
        Some('0') => {}
        Some(c) if c.is_ascii_digit() => {
            while chars.peek().is_some_and(char::is_ascii_digit) {
                chars.next();
            }
        }
        _ => return Err(NumberError::InvalidLiteral),
    }
    if chars.peek() == Some(&'.') {
        chars.next();
        decimal = true;
        if !chars.next().is_some_and(|c| c.is_ascii_digit()) {
            return Err(NumberError::InvalidLiteral);
        }
        while chars.peek().is_some_and(char::is_ascii_digit) {
            chars.next();
        }
    }
    if matches!(chars.peek(), Some('e' | 'E')) {
        chars.next();
        decimal = true;
        if matches!(chars.peek(), Some('+' | '-')) {
            chars.next();
        }
        if !chars.next().is_some_and(|c| c.is_ascii_digit()) {
            return Err(NumberError::InvalidLiteral);
        }
        while chars.peek().is_some_and(char::is_ascii_digit) {
            chars.next();
        }
    }
    if chars.next().is_some() {
        return Err(NumberError::InvalidLiteral);
    }
    Ok(decimal)
}

// ------------------------------------------------------------------------
// Integer
// ------------------------------------------------------------------------

impl Integer {
    /// Builds an integer from a scanner-validated digit string.
    pub(crate) fn from_literal(text: &str) -> Self {
        // Small literals take the fixed-width fast representation; anything
        // that overflows keeps its digit string.
        match text.parse::<i64>() {
            Ok(v) => Self { repr: IntRepr::Small(v) },
            Err(_) => Self { repr: IntRepr::Big(text.into()) },
        }
    }

    /// Exact conversion to `i32`.
    ///
    /// # Errors
    ///
    /// [`NumberError::OutOfRange`] when the value does not fit.
    pub fn to_i32(&self) -> Result<i32, NumberError> {
        match &self.repr {
            IntRepr::Small(v) => {
                i32::try_from(*v).map_err(|_| NumberError::OutOfRange("i32"))
            }
            IntRepr::Big(_) => Err(NumberError::OutOfRange("i32")),
        }
    }

    /// Exact conversion to `i64`.
    ///
    /// # Errors
    ///
    /// [`NumberError::OutOfRange`] when the value does not fit.
    pub fn to_i64(&self) -> Result<i64, NumberError> {
        match &self.repr {
            IntRepr::Small(v) => Ok(*v),
            IntRepr::Big(_) => Err(NumberError::OutOfRange("i64")),
        }
    }

    /// Exact conversion to `u64`.
    ///
    /// # Errors
    ///
    /// [`NumberError::OutOfRange`] when the value is negative or too large.
    pub fn to_u64(&self) -> Result<u64, NumberError> {
        match &self.repr {
            IntRepr::Small(v) => {
                u64::try_from(*v).map_err(|_| NumberError::OutOfRange("u64"))
            }
            // A positive literal just past i64::MAX still fits u64.
            IntRepr::Big(text) => {
                text.parse::<u64>().map_err(|_| NumberError::OutOfRange("u64"))
            }
        }
    }

    /// Nearest-representable conversion to `f64`. May lose precision; values
    /// beyond the `f64` range saturate to the corresponding infinity.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn to_f64(&self) -> f64 {
        match &self.repr {
            IntRepr::Small(v) => *v as f64,
            IntRepr::Big(text) => parse_f64_saturating(text),
        }
    }

    /// The same value as an arbitrary-precision decimal with scale zero.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        Decimal { text: self.to_string().into() }
    }

    fn normal(&self) -> Normal {
        match &self.repr {
            IntRepr::Small(v) => normalize(&v.to_string()),
            IntRepr::Big(text) => normalize(text),
        }
    }
}

fn parse_f64_saturating(text: &str) -> f64 {
    text.parse::<f64>().unwrap_or_else(|_| {
        if text.starts_with('-') { f64::NEG_INFINITY } else { f64::INFINITY }
    })
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.repr {
            IntRepr::Small(v) => write!(f, "{v}"),
            IntRepr::Big(text) => f.write_str(text),
        }
    }
}

macro_rules! impl_integer_from_signed {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Integer {
                fn from(v: $t) -> Self {
                    Self { repr: IntRepr::Small(i64::from(v)) }
                }
            }
        )+
    };
}
impl_integer_from_signed!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Integer {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(v) => Self { repr: IntRepr::Small(v) },
            Err(_) => Self { repr: IntRepr::Big(v.to_string().into()) },
        }
    }
}

impl From<i128> for Integer {
    fn from(v: i128) -> Self {
        match i64::try_from(v) {
            Ok(v) => Self { repr: IntRepr::Small(v) },
            Err(_) => Self { repr: IntRepr::Big(v.to_string().into()) },
        }
    }
}

impl From<u128> for Integer {
    fn from(v: u128) -> Self {
        match i64::try_from(v) {
            Ok(v) => Self { repr: IntRepr::Small(v) },
            Err(_) => Self { repr: IntRepr::Big(v.to_string().into()) },
        }
    }
}

// ------------------------------------------------------------------------
// Decimal
// ------------------------------------------------------------------------

impl Decimal {
    /// Builds a decimal from a scanner-validated literal.
    pub(crate) fn from_literal(text: &str) -> Self {
        Self { text: text.into() }
    }

    /// Builds a decimal from a finite `f64`, using the shortest decimal text
    /// that round-trips to the same value.
    ///
    /// # Errors
    ///
    /// [`NumberError::NotFinite`] for NaN and infinities, which have no JSON
    /// representation.
    pub fn from_f64(v: f64) -> Result<Self, NumberError> {
        if v.is_finite() {
            Ok(Self { text: format!("{v}").into() })
        } else {
            Err(NumberError::NotFinite)
        }
    }

    /// Builds a decimal from a finite `f32`.
    ///
    /// # Errors
    ///
    /// [`NumberError::NotFinite`] for NaN and infinities.
    pub fn from_f32(v: f32) -> Result<Self, NumberError> {
        if v.is_finite() {
            Ok(Self { text: format!("{v}").into() })
        } else {
            Err(NumberError::NotFinite)
        }
    }

    /// The literal text of this decimal, exactly as parsed or constructed.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.text
    }

    /// Whether the value is mathematically an integer (scale zero after
    /// removing trailing zeros), e.g. `2.0`, `1e3`, and `120e-1`.
    #[must_use]
    pub fn is_integral(&self) -> bool {
        let n = self.normal();
        n.sign == 0 || n.exponent >= n.digits.len() as i64
    }

    /// Exact conversion to an arbitrary-precision [`Integer`].
    ///
    /// # Errors
    ///
    /// [`NumberError::NotIntegral`] when the value has a fractional part, or
    /// [`NumberError::OutOfRange`] when the exponent calls for an absurd
    /// number of digits.
    pub fn to_integer(&self) -> Result<Integer, NumberError> {
        let n = self.normal();
        if n.sign == 0 {
            return Ok(Integer { repr: IntRepr::Small(0) });
        }
        if n.exponent < n.digits.len() as i64 {
            return Err(NumberError::NotIntegral);
        }
        let zeros = n.exponent as u64 - n.digits.len() as u64;
        if zeros + n.digits.len() as u64 > MAX_INTEGER_DIGITS {
            return Err(NumberError::OutOfRange("integer"));
        }
        let mut text = String::with_capacity(1 + n.digits.len() + zeros as usize);
        if n.sign < 0 {
            text.push('-');
        }
        text.push_str(&n.digits);
        for _ in 0..zeros {
            text.push('0');
        }
        Ok(Integer::from_literal(&text))
    }

    /// Exact conversion to `i64`.
    ///
    /// # Errors
    ///
    /// [`NumberError::NotIntegral`] for fractional values, or
    /// [`NumberError::OutOfRange`] when the integral value does not fit.
    pub fn to_i64(&self) -> Result<i64, NumberError> {
        self.to_integer()?.to_i64().map_err(|_| NumberError::OutOfRange("i64"))
    }

    /// Nearest-representable conversion to `f64`; always succeeds, may lose
    /// precision, saturates to infinity beyond the `f64` range.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        parse_f64_saturating(&self.text)
    }

    /// Nearest-representable conversion to `f32`; always succeeds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_f32(&self) -> f32 {
        self.to_f64() as f32
    }

    fn normal(&self) -> Normal {
        normalize(&self.text)
    }
}

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

// ------------------------------------------------------------------------
// Number
// ------------------------------------------------------------------------

impl Number {
    /// Builds a number from a scanner-validated literal.
    pub(crate) fn from_parts(text: &str, decimal: bool) -> Self {
        if decimal {
            Self::Decimal(Decimal::from_literal(text))
        } else {
            Self::Integer(Integer::from_literal(text))
        }
    }

    /// Builds a number from a finite `f64`.
    ///
    /// # Errors
    ///
    /// [`NumberError::NotFinite`] for NaN and infinities.
    pub fn from_f64(v: f64) -> Result<Self, NumberError> {
        Decimal::from_f64(v).map(Self::Decimal)
    }

    /// Builds a number from a finite `f32`.
    ///
    /// # Errors
    ///
    /// [`NumberError::NotFinite`] for NaN and infinities.
    pub fn from_f32(v: f32) -> Result<Self, NumberError> {
        Decimal::from_f32(v).map(Self::Decimal)
    }

    /// Returns `true` if the literal was spelled as an integer (no fraction
    /// or exponent).
    #[must_use]
    pub fn is_integer(&self) -> bool {
        matches!(self, Self::Integer(_))
    }

    /// Returns `true` if the mathematical value is an integer, regardless of
    /// how it was spelled.
    #[must_use]
    pub fn is_integral(&self) -> bool {
        match self {
            Self::Integer(_) => true,
            Self::Decimal(d) => d.is_integral(),
        }
    }

    /// Exact conversion to `i32`.
    ///
    /// # Errors
    ///
    /// [`NumberError::NotIntegral`] or [`NumberError::OutOfRange`].
    pub fn to_i32(&self) -> Result<i32, NumberError> {
        match self {
            Self::Integer(i) => i.to_i32(),
            Self::Decimal(d) => {
                d.to_integer()?.to_i32().map_err(|_| NumberError::OutOfRange("i32"))
            }
        }
    }

    /// Exact conversion to `i64`.
    ///
    /// # Errors
    ///
    /// [`NumberError::NotIntegral`] or [`NumberError::OutOfRange`].
    pub fn to_i64(&self) -> Result<i64, NumberError> {
        match self {
            Self::Integer(i) => i.to_i64(),
            Self::Decimal(d) => d.to_i64(),
        }
    }

    /// Exact conversion to `u64`.
    ///
    /// # Errors
    ///
    /// [`NumberError::NotIntegral`] or [`NumberError::OutOfRange`].
    pub fn to_u64(&self) -> Result<u64, NumberError> {
        match self {
            Self::Integer(i) => i.to_u64(),
            Self::Decimal(d) => {
                d.to_integer()?.to_u64().map_err(|_| NumberError::OutOfRange("u64"))
            }
        }
    }

    /// Nearest-representable conversion to `f32`; always succeeds.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn to_f32(&self) -> f32 {
        self.to_f64() as f32
    }

    /// Nearest-representable conversion to `f64`; always succeeds.
    #[must_use]
    pub fn to_f64(&self) -> f64 {
        match self {
            Self::Integer(i) => i.to_f64(),
            Self::Decimal(d) => d.to_f64(),
        }
    }

    /// Exact conversion to an arbitrary-precision [`Integer`].
    ///
    /// # Errors
    ///
    /// [`NumberError::NotIntegral`] when the value is fractional.
    pub fn to_integer(&self) -> Result<Integer, NumberError> {
        match self {
            Self::Integer(i) => Ok(i.clone()),
            Self::Decimal(d) => d.to_integer(),
        }
    }

    /// The value as an arbitrary-precision [`Decimal`]; always lossless.
    #[must_use]
    pub fn to_decimal(&self) -> Decimal {
        match self {
            Self::Integer(i) => i.to_decimal(),
            Self::Decimal(d) => d.clone(),
        }
    }

    fn normal(&self) -> Normal {
        match self {
            Self::Integer(i) => i.normal(),
            Self::Decimal(d) => d.normal(),
        }
    }
}

impl PartialEq for Number {
    fn eq(&self, other: &Self) -> bool {
        self.normal() == other.normal()
    }
}

impl Eq for Number {}

impl Hash for Number {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.normal().hash(state);
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(i) => i.fmt(f),
            Self::Decimal(d) => d.fmt(f),
        }
    }
}

impl FromStr for Number {
    type Err = NumberError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = validate_literal(s)?;
        Ok(Self::from_parts(s, decimal))
    }
}

macro_rules! impl_number_from {
    ($($t:ty),+) => {
        $(
            impl From<$t> for Number {
                fn from(v: $t) -> Self {
                    Self::Integer(Integer::from(v))
                }
            }
        )+
    };
}
impl_number_from!(i8, i16, i32, i64, i128, u8, u16, u32, u64, u128);

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use super::{Number, NumberError};

    fn num(text: &str) -> Number {
        text.parse().unwrap()
    }

    fn hash_of(n: &Number) -> u64 {
        let mut h = DefaultHasher::new();
        n.hash(&mut h);
        h.finish()
    }

    #[test]
    fn equality_ignores_spelling() {
        assert_eq!(num("2"), num("2.0"));
        assert_eq!(num("2"), num("2e0"));
        assert_eq!(num("2"), num("0.2e1"));
        assert_eq!(num("1500"), num("1.5e3"));
        assert_eq!(num("-0"), num("0"));
        assert_eq!(num("0.00"), num("0e9"));
        assert_ne!(num("2"), num("2.01"));
        assert_ne!(num("2"), num("-2"));
    }

    #[test]
    fn hash_follows_equality() {
        assert_eq!(hash_of(&num("2")), hash_of(&num("2.000")));
        assert_eq!(hash_of(&num("1500")), hash_of(&num("1.5e3")));
        assert_eq!(hash_of(&num("-0")), hash_of(&num("0")));
    }

    #[test]
    fn integer_exact_conversions() {
        assert_eq!(num("123").to_i32(), Ok(123));
        assert_eq!(num("123").to_i64(), Ok(123));
        assert_eq!(num("-2147483649").to_i32(), Err(NumberError::OutOfRange("i32")));
        assert_eq!(num("9223372036854775807").to_i64(), Ok(i64::MAX));
        assert_eq!(
            num("9223372036854775808").to_i64(),
            Err(NumberError::OutOfRange("i64"))
        );
        assert_eq!(num("18446744073709551615").to_u64(), Ok(u64::MAX));
        assert_eq!(num("-1").to_u64(), Err(NumberError::OutOfRange("u64")));
    }

    #[test]
    fn decimal_integral_conversions() {
        assert_eq!(num("2.0").to_i64(), Ok(2));
        assert_eq!(num("1e3").to_i64(), Ok(1000));
        assert_eq!(num("120e-1").to_i64(), Ok(12));
        assert_eq!(num("2.5").to_i64(), Err(NumberError::NotIntegral));
        assert!(num("2.0").is_integral());
        assert!(!num("2.0").is_integer());
        assert!(!num("2.5").is_integral());
    }

    #[test]
    fn big_integers_survive_in_text() {
        let big = "123456789012345678901234567890";
        let n = num(big);
        assert_eq!(n.to_string(), big);
        assert_eq!(n.to_i64(), Err(NumberError::OutOfRange("i64")));
        assert!(n.to_f64().is_finite());
    }

    #[test]
    fn lossy_float_conversions() {
        assert!((num("1.5").to_f64() - 1.5).abs() < f64::EPSILON);
        assert!((num("0.1").to_f32() - 0.1).abs() < f32::EPSILON);
        // Beyond the f64 range the conversion saturates.
        assert_eq!(num("1e999").to_f64(), f64::INFINITY);
        assert_eq!(num("-1e999").to_f64(), f64::NEG_INFINITY);
    }

    #[test]
    fn non_finite_floats_are_rejected() {
        assert_eq!(Number::from_f64(f64::NAN), Err(NumberError::NotFinite));
        assert_eq!(Number::from_f64(f64::INFINITY), Err(NumberError::NotFinite));
        assert_eq!(Number::from_f32(f32::NEG_INFINITY), Err(NumberError::NotFinite));
        assert!(Number::from_f64(1.5).is_ok());
    }

    #[test]
    fn from_float_retains_shortest_text() {
        assert_eq!(Number::from_f64(1.5).unwrap().to_string(), "1.5");
        assert_eq!(Number::from_f64(-0.25).unwrap().to_string(), "-0.25");
        assert_eq!(Number::from_f64(2.0).unwrap().to_string(), "2");
    }

    #[test]
    fn invalid_literals_are_rejected() {
        for bad in ["", "-", "01", "1.", ".5", "1e", "1e+", "+1", "0x1", "1 "] {
            assert_eq!(bad.parse::<Number>(), Err(NumberError::InvalidLiteral), "{bad}");
        }
    }
}
