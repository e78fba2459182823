//! Error types for document transformation.
//!
//! Invalid fields never produce errors: they are omitted from their container.
//! Only failures that leave nothing to transform surface here.

use thiserror::Error;

/// Errors that can occur while transforming a tagged document.
#[derive(Error, Debug)]
pub enum TransformError {
    /// The input string was not valid JSON (`transform_str` path).
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// The top-level value was valid JSON but not an object, so there is no
    /// document to transform.
    #[error("expected a JSON object at the top level, found {found}")]
    NotADocument { found: &'static str },
}

/// Convenience alias used throughout tagjson-core.
pub type Result<T> = std::result::Result<T, TransformError>;
