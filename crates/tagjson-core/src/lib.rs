//! # tagjson-core
//!
//! Transform **type-tagged JSON** into plain JSON.
//!
//! In a tagged document every value is wrapped in a single-key object naming
//! its type: `{"S": "text"}`, `{"N": "1.50"}`, `{"BOOL": "t"}`,
//! `{"NULL": "true"}`, `{"L": [...]}` or `{"M": {...}}`. All scalar payloads
//! are strings. The transform unwraps each value, coerces it to its native
//! JSON type, and drops every field that fails validation instead of
//! reporting an error.
//!
//! ## Quick start
//!
//! ```rust
//! use tagjson_core::transform_str;
//!
//! let tagged = r#"{"price":{"N":"1.50"},"tags":{"L":[{"S":" a "},{"NULL":"1"},{"N":"007"}]}}"#;
//! let plain = transform_str(tagged).unwrap();
//! assert_eq!(plain, r#"{"price":1.5,"tags":["a",7]}"#);
//! ```
//!
//! ## Modules
//!
//! - [`document`] — top-level document → result document
//! - [`transform`] — tag dispatch plus the `L` and `M` handlers
//! - [`scalar`] — `S`, `N`, `BOOL`, `NULL` handlers and their parsing helpers
//! - [`types`] — `Tag`, `Transformed`, `TransformOptions`
//! - [`error`] — Error types for the few failures that are not omissions

pub mod document;
pub mod error;
pub mod scalar;
pub mod transform;
pub mod types;

pub use document::{transform_document, transform_document_with, transform_str, transform_str_with};
pub use error::TransformError;
pub use scalar::{parse_bool_token, parse_number, rfc3339_to_epoch, sanitize_key};
pub use transform::{transform_value, transform_value_with};
pub use types::{KeyOrder, Tag, TransformOptions, Transformed, DEFAULT_MAX_DEPTH};
