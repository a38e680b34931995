//! ExpressKart Domain Concerns

use thiserror::Error;

pub mod carts;
pub mod dashboard;
pub mod enquiries;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod users;
pub mod vendors;

/// A stored or submitted value didn't match any known variant.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value:?}")]
pub struct ParseValueError {
    pub kind: &'static str,
    pub value: String,
}

impl ParseValueError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_string(),
        }
    }
}

/// Trim a required text field, returning `None` when nothing is left.
pub(crate) fn required(value: &str) -> Option<String> {
    let trimmed = value.trim();

    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Trim an optional text field, treating blank input as absent.
pub(crate) fn optional(value: Option<String>) -> Option<String> {
    value.as_deref().and_then(required)
}
