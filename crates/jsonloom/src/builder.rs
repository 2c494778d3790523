//! Mutable accumulators for constructing values by hand.
//!
//! A builder is the only mutable stage in a value's life: calls to
//! [`ArrayBuilder::push`] or [`ObjectBuilder::insert`] accumulate entries,
//! and [`build`](ArrayBuilder::build) freezes them into an immutable
//! [`Json`]. The fast path adopts the accumulated storage by move, so a
//! consumed builder cannot leak aliases into the frozen tree.

use crate::value::{Array, Json, Map};

/// Accumulates elements for a [`Json::Array`].
///
/// # Examples
///
/// ```
/// use jsonloom::ArrayBuilder;
///
/// let mut builder = ArrayBuilder::new();
/// builder.push(1).push(2).push("three");
/// assert_eq!(builder.build().to_string(), r#"[1,2,"three"]"#);
/// ```
#[derive(Debug, Default, Clone)]
pub struct ArrayBuilder {
    items: Array,
}

impl ArrayBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one element.
    pub fn push(&mut self, value: impl Into<Json>) -> &mut Self {
        self.items.push(value.into());
        self
    }

    /// Freezes the accumulated elements, adopting the storage without
    /// copying. Consumes the builder.
    #[must_use]
    pub fn build(self) -> Json {
        Json::Array(self.items)
    }

    /// Copying variant of [`build`](ArrayBuilder::build): snapshots the
    /// current elements and leaves the builder usable.
    #[must_use]
    pub fn to_value(&self) -> Json {
        Json::Array(self.items.clone())
    }
}

/// Accumulates entries for a [`Json::Object`].
///
/// Keys are unique; inserting an existing key replaces its value while
/// keeping the original position.
#[derive(Debug, Default, Clone)]
pub struct ObjectBuilder {
    entries: Map,
}

impl ObjectBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts one entry; an existing key is overwritten in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Json>) -> &mut Self {
        self.entries.insert(key.into(), value.into());
        self
    }

    /// Freezes the accumulated entries, adopting the storage without
    /// copying. Consumes the builder.
    #[must_use]
    pub fn build(self) -> Json {
        Json::Object(self.entries)
    }

    /// Copying variant of [`build`](ObjectBuilder::build): snapshots the
    /// current entries and leaves the builder usable.
    #[must_use]
    pub fn to_value(&self) -> Json {
        Json::Object(self.entries.clone())
    }
}
