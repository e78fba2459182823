//! Top-level document transformation.
//!
//! A document is a JSON object whose values are tagged values. Each entry is
//! sanitized and transformed on its own; invalid entries disappear from the
//! result without affecting their siblings. The only hard failure is a
//! top-level value that is not an object at all.

use crate::error::{Result, TransformError};
use crate::transform::{warn_duplicate, Transformer};
use crate::types::{KeyOrder, TransformOptions};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Transform a parsed document with default options.
///
/// # Errors
///
/// Returns [`TransformError::NotADocument`] if `document` is not a JSON object.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use tagjson_core::transform_document;
///
/// let doc = json!({
///     " name ": {"S": "Alice "},
///     "age": {"N": "030"},
///     "": {"S": "dropped"},
/// });
/// let out = transform_document(&doc).unwrap();
/// assert_eq!(out, json!({"age": 30, "name": "Alice"}));
/// ```
pub fn transform_document(document: &Value) -> Result<Value> {
    transform_document_with(document, &TransformOptions::default())
}

/// Transform a parsed document.
///
/// # Errors
///
/// Returns [`TransformError::NotADocument`] if `document` is not a JSON object.
pub fn transform_document_with(document: &Value, opts: &TransformOptions) -> Result<Value> {
    let Value::Object(fields) = document else {
        return Err(TransformError::NotADocument {
            found: json_type_name(document),
        });
    };

    let survivors = Transformer::new(opts).entries(fields, 1);
    tracing::debug!(
        fields = fields.len(),
        kept = survivors.len(),
        "transformed document"
    );

    let out: Map<String, Value> = match opts.top_level_order {
        KeyOrder::Sorted => {
            let mut sorted = BTreeMap::new();
            for (key, value) in survivors {
                if sorted.insert(key.to_string(), value).is_some() {
                    warn_duplicate(key);
                }
            }
            sorted.into_iter().collect()
        }
        KeyOrder::Insertion => {
            let mut ordered = Map::new();
            for (key, value) in survivors {
                if ordered.insert(key.to_string(), value).is_some() {
                    warn_duplicate(key);
                }
            }
            ordered
        }
    };

    Ok(Value::Object(out))
}

/// Parse a JSON string, transform it with default options, and return the
/// compact JSON result.
///
/// # Errors
///
/// Returns [`TransformError::JsonParse`] if the input is not valid JSON, or
/// [`TransformError::NotADocument`] if it is not a JSON object.
///
/// # Examples
///
/// ```
/// use tagjson_core::transform_str;
///
/// let out = transform_str(r#"{"when":{"S":"2014-07-16T20:55:46Z"},"ok":{"BOOL":"f"}}"#).unwrap();
/// assert_eq!(out, r#"{"ok":false,"when":1405544146}"#);
/// ```
pub fn transform_str(json: &str) -> Result<String> {
    transform_str_with(json, &TransformOptions::default())
}

/// Parse a JSON string, transform it, and return the compact JSON result.
///
/// # Errors
///
/// See [`transform_str`].
pub fn transform_str_with(json: &str, opts: &TransformOptions) -> Result<String> {
    let document: Value = serde_json::from_str(json)?;
    let out = transform_document_with(&document, opts)?;
    Ok(serde_json::to_string(&out)?)
}

/// Human-readable JSON type name for error messages.
fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
