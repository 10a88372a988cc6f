//! # jddf
//!
//! A crate for validating JSON instances against [JSON Data Definition
//! Format](https://jsontypedef.com/) (JDDF / RFC 8927) schemas.
//!
//! Schemas are loaded from `serde_json::Value` into an immutable, tagged
//! [`Schema`] representing one of eight mutually exclusive forms, checked
//! for semantic soundness (`Schema::verify`), and then validated against
//! an instance to produce an ordered list of [`ValidationError`]s under
//! configurable recursion and error-count limits.
//!
//! ## Example
//!
//! ```rust
//! use jddf::{validate, Schema, ValidatorConfig};
//! use serde_json::json;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let schema = Schema::from_json(&json!({"type": "boolean"}))?;
//!     schema.verify()?;
//!     let errors = validate(&ValidatorConfig::default(), &schema, &json!(null))?;
//!     assert_eq!(errors.len(), 1);
//!     Ok(())
//! }
//! ```
#![warn(
    clippy::doc_markdown,
    clippy::redundant_closure,
    clippy::explicit_iter_loop,
    clippy::match_same_arms,
    clippy::needless_borrow,
    clippy::print_stdout,
    clippy::cast_possible_truncation,
    clippy::trivially_copy_pass_by_ref,
    clippy::needless_pass_by_value,
    missing_docs,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    variant_size_differences
)]
mod checks;
mod error;
mod helpers;
mod primitive_type;
mod schema;
mod validator;

pub use error::{InvalidSchema, MaxDepthExceeded, ValidationError};
pub use helpers::{json_pointer_from_tokens, tokens_from_json_pointer};
pub use primitive_type::Type;
pub use schema::{Form, Schema};
pub use validator::{validate, ValidatorConfig};
