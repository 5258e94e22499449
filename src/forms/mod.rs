//! Form definitions backing the command line.

use thiserror::Error;
use validator::ValidationErrors;

use crate::domain::types::TypeConstraintError;

pub mod auth;
pub mod client;
pub mod import;
pub mod order;
pub mod payment;
pub mod product;

#[derive(Debug, Error)]
/// Errors that can occur when processing form data.
pub enum FormError {
    #[error("validation errors: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email address")]
    InvalidEmail,

    #[error("invalid name")]
    InvalidName,

    #[error("invalid id")]
    InvalidId,

    #[error("invalid amount")]
    InvalidAmount,

    #[error("quantity must be at least 1")]
    InvalidQuantity,

    #[error("unknown visit day: {0}")]
    InvalidVisitDay(String),

    #[error("order has no items")]
    NoItems,

    #[error("unknown product: {0}")]
    UnknownProduct(String),

    #[error("invalid csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("row {row}: {message}")]
    InvalidRow { row: usize, message: String },
}

impl From<TypeConstraintError> for FormError {
    fn from(err: TypeConstraintError) -> Self {
        match err {
            TypeConstraintError::EmptyId => FormError::InvalidId,
            TypeConstraintError::InvalidEmail => FormError::InvalidEmail,
            TypeConstraintError::EmptyString | TypeConstraintError::InvalidValue(_) => {
                FormError::InvalidName
            }
            TypeConstraintError::InvalidAmount(_) => FormError::InvalidAmount,
            TypeConstraintError::ZeroQuantity => FormError::InvalidQuantity,
            TypeConstraintError::UnknownWeekday(day) => FormError::InvalidVisitDay(day),
        }
    }
}

/// Trims a free-text field, mapping blank input to `None`.
pub(crate) fn optional_text(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
