//! Core types shared by the transform handlers.
//!
//! The raw document and the produced output are both `serde_json::Value`
//! trees. These types describe what sits between them: the closed tag
//! vocabulary, the per-field outcome, and the knobs a caller can turn.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// Default limit on tag nesting, see [`TransformOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// The type tag carried by a wrapper object such as `{"N": "42"}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `S`
    String,
    /// `N`
    Number,
    /// `BOOL`
    Boolean,
    /// `NULL`
    Null,
    /// `L`
    List,
    /// `M`
    Map,
}

impl Tag {
    /// Parse a wrapper key into a tag.
    ///
    /// Matching is exact, except that `NULL` tolerates surrounding
    /// whitespace (`"NULL "` is [`Tag::Null`]). `" S"`, `"s"` and `"Bool"`
    /// are not tags.
    ///
    /// ```
    /// use tagjson_core::Tag;
    ///
    /// assert_eq!(Tag::parse("NULL "), Some(Tag::Null));
    /// assert_eq!(Tag::parse("BOOL"), Some(Tag::Boolean));
    /// assert_eq!(Tag::parse(" S"), None);
    /// assert_eq!(Tag::parse("bool"), None);
    /// ```
    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "S" => Some(Tag::String),
            "N" => Some(Tag::Number),
            "BOOL" => Some(Tag::Boolean),
            "L" => Some(Tag::List),
            "M" => Some(Tag::Map),
            _ if key.trim() == "NULL" => Some(Tag::Null),
            _ => None,
        }
    }

    /// The canonical wrapper key for this tag.
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::String => "S",
            Tag::Number => "N",
            Tag::Boolean => "BOOL",
            Tag::Null => "NULL",
            Tag::List => "L",
            Tag::Map => "M",
        }
    }

    /// Whether values with this tag may appear as `L` elements.
    ///
    /// Lists hold scalars only: strings, numbers and booleans.
    pub fn allowed_in_list(self) -> bool {
        matches!(self, Tag::String | Tag::Number | Tag::Boolean)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of transforming one tagged value.
///
/// `Value(Value::Null)` and `Value(Value::Bool(false))` are ordinary produced
/// values: the field is present. `Omit` means the field must not appear in
/// its container at all.
#[derive(Debug, Clone, PartialEq)]
pub enum Transformed {
    Value(Value),
    Omit,
}

impl Transformed {
    pub fn is_omit(&self) -> bool {
        matches!(self, Transformed::Omit)
    }

    /// The produced value, or `None` for an omission.
    pub fn into_value(self) -> Option<Value> {
        match self {
            Transformed::Value(v) => Some(v),
            Transformed::Omit => None,
        }
    }
}

/// Ordering of keys in the top-level result document.
///
/// Nested `M` values are always sorted; this only affects the outermost object.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyOrder {
    /// Ascending lexical order, the same as nested maps.
    #[default]
    Sorted,
    /// First-seen order of the surviving input keys.
    Insertion,
}

/// Caller-tunable transform settings.
///
/// ```
/// use tagjson_core::{KeyOrder, TransformOptions};
///
/// let opts = TransformOptions::default()
///     .with_top_level_order(KeyOrder::Insertion)
///     .with_max_depth(16);
/// assert_eq!(opts.max_depth, 16);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformOptions {
    pub top_level_order: KeyOrder,
    /// Maximum tag nesting. A tagged value nested deeper than this is omitted.
    pub max_depth: usize,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self {
            top_level_order: KeyOrder::Sorted,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl TransformOptions {
    pub fn with_top_level_order(mut self, order: KeyOrder) -> Self {
        self.top_level_order = order;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
