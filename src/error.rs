//! The crate's three error/data surfaces: `InvalidSchema`, `MaxDepthExceeded`,
//! and `ValidationError`.
use serde::Serialize;
use std::{error, fmt};

/// The schema loader or verifier rejected a schema document.
///
/// Carries a human-readable cause naming the violated rule. Never
/// recovered internally — always surfaced to the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSchema {
    message: String,
}

impl InvalidSchema {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        InvalidSchema {
            message: message.into(),
        }
    }

    /// The human-readable cause.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for InvalidSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid schema: {}", self.message)
    }
}

impl error::Error for InvalidSchema {}

/// A `Ref` traversal would have pushed `schema_tokens` past the configured
/// `max_depth`. Aborts the validation call; no partial errors are returned
/// alongside it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MaxDepthExceeded;

impl fmt::Display for MaxDepthExceeded {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "maximum reference depth exceeded")
    }
}

impl error::Error for MaxDepthExceeded {}

/// A single validation failure: the instance location that was rejected,
/// and the schema keyword that rejected it.
///
/// This is not an error in the `std::error::Error` sense — it is data
/// returned from a successful validation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    /// Path from the instance root to the rejected value.
    pub instance_path: Vec<String>,
    /// Path from the schema root to the rejecting keyword.
    pub schema_path: Vec<String>,
}

impl ValidationError {
    pub(crate) fn new(instance_path: Vec<String>, schema_path: Vec<String>) -> Self {
        ValidationError {
            instance_path,
            schema_path,
        }
    }

    /// The path from the instance root to the rejected value.
    #[must_use]
    pub fn instance_path(&self) -> &[String] {
        &self.instance_path
    }

    /// The path from the schema root to the rejecting keyword.
    #[must_use]
    pub fn schema_path(&self) -> &[String] {
        &self.schema_path
    }
}
