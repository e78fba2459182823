//! Tag dispatch and the composite handlers (`L` and `M`).
//!
//! A tagged value is an object with exactly one key naming its type. The
//! transformer peels that wrapper, hands the payload to the matching handler,
//! and recurses for lists and maps. Every invalid input degrades to
//! [`Transformed::Omit`]; omission removes a field from its immediate
//! container only, but a container left empty is itself omitted, so collapse
//! propagates upward.
//!
//! # Ordering
//!
//! - `L` keeps the input order of surviving elements.
//! - `M` output is sorted lexically by key, whatever the input order.

use crate::scalar::{sanitize_key, transform_bool, transform_null, transform_number, transform_string};
use crate::types::{Tag, TransformOptions, Transformed};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Transform a single tagged value with default options.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tagjson_core::{transform_value, Transformed};
///
/// assert_eq!(transform_value(&json!({"N": " 011 "})), Transformed::Value(json!(11)));
/// assert_eq!(transform_value(&json!({"NULL": "true"})), Transformed::Value(json!(null)));
/// assert_eq!(transform_value(&json!({"BOOL": "truthy"})), Transformed::Omit);
/// ```
pub fn transform_value(tagged: &Value) -> Transformed {
    transform_value_with(tagged, &TransformOptions::default())
}

/// Transform a single tagged value.
pub fn transform_value_with(tagged: &Value, opts: &TransformOptions) -> Transformed {
    Transformer::new(opts).value(tagged, 1, Position::Field)
}

/// Log why a field is dropped and return the omission.
pub(crate) fn omit(tag: Tag, reason: &'static str) -> Transformed {
    tracing::debug!(tag = %tag, reason, "omitting field");
    Transformed::Omit
}

/// Where a tagged value sits. List elements accept fewer tags than fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Field,
    ListElement,
}

/// Recursive walker over a tagged tree. `depth` counts tag wrappers, starting
/// at 1 for the outermost one.
pub(crate) struct Transformer<'a> {
    opts: &'a TransformOptions,
}

impl<'a> Transformer<'a> {
    pub(crate) fn new(opts: &'a TransformOptions) -> Self {
        Self { opts }
    }

    fn value(&self, tagged: &Value, depth: usize, position: Position) -> Transformed {
        if depth > self.opts.max_depth {
            tracing::warn!(
                depth,
                max_depth = self.opts.max_depth,
                "tag nesting exceeds limit, omitting value"
            );
            return Transformed::Omit;
        }

        let Some((tag, raw)) = split_tagged(tagged) else {
            return Transformed::Omit;
        };

        if position == Position::ListElement && !tag.allowed_in_list() {
            return omit(tag, "type is not allowed inside a list");
        }

        match tag {
            Tag::String => transform_string(raw),
            Tag::Number => transform_number(raw),
            Tag::Boolean => transform_bool(raw),
            Tag::Null => transform_null(raw),
            Tag::List => self.list(raw, depth),
            Tag::Map => self.map(raw, depth),
        }
    }

    fn list(&self, raw: &Value, depth: usize) -> Transformed {
        let Value::Array(items) = raw else {
            return omit(Tag::List, "payload is not an array");
        };
        if items.is_empty() {
            return omit(Tag::List, "list is empty");
        }

        let mut out = Vec::with_capacity(items.len());
        for (index, item) in items.iter().enumerate() {
            if !item.is_object() {
                tracing::debug!(index, "skipping list element that is not a tagged value");
                continue;
            }
            out.extend(self.value(item, depth + 1, Position::ListElement).into_value());
        }

        if out.is_empty() {
            return omit(Tag::List, "no list element survived");
        }
        Transformed::Value(Value::Array(out))
    }

    fn map(&self, raw: &Value, depth: usize) -> Transformed {
        let Value::Object(entries) = raw else {
            return omit(Tag::Map, "payload is not an object");
        };

        let mut sorted = BTreeMap::new();
        for (key, value) in self.entries(entries, depth + 1) {
            if sorted.insert(key.to_string(), value).is_some() {
                warn_duplicate(key);
            }
        }

        if sorted.is_empty() {
            return omit(Tag::Map, "no map entry survived");
        }
        Transformed::Value(Value::Object(sorted.into_iter().collect()))
    }

    /// Sanitize keys and transform values of an object whose values are
    /// tagged, yielding the survivors in input order. Shared by `M` payloads
    /// and the top-level document.
    pub(crate) fn entries<'e>(
        &self,
        entries: &'e Map<String, Value>,
        depth: usize,
    ) -> Vec<(&'e str, Value)> {
        let mut out = Vec::with_capacity(entries.len());
        for (raw_key, tagged) in entries {
            let Some(key) = sanitize_key(raw_key) else {
                tracing::debug!(key = %raw_key, "skipping field with empty key");
                continue;
            };
            if !tagged.is_object() {
                tracing::debug!(key, "skipping field that is not a tagged value");
                continue;
            }
            if let Some(v) = self.value(tagged, depth, Position::Field).into_value() {
                out.push((key, v));
            }
        }
        out
    }
}

/// Log a key collision between two raw keys that trim to the same text.
pub(crate) fn warn_duplicate(key: &str) {
    tracing::warn!(key, "duplicate key after trimming, last value wins");
}

/// Split a wrapper object into its tag and payload.
///
/// The wrapper must have exactly one key and that key must name a tag.
fn split_tagged(tagged: &Value) -> Option<(Tag, &Value)> {
    let Value::Object(obj) = tagged else {
        tracing::debug!("tagged value is not an object");
        return None;
    };
    if obj.len() != 1 {
        tracing::debug!(keys = obj.len(), "tagged value must have exactly one key");
        return None;
    }
    let (key, raw) = obj.iter().next()?;
    match Tag::parse(key) {
        Some(tag) => Some((tag, raw)),
        None => {
            tracing::debug!(tag = %key, "unknown type tag");
            None
        }
    }
}
