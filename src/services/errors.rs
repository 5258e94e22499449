use thiserror::Error;

use crate::domain::order::OrderStatus;
use crate::domain::types::TypeConstraintError;
use crate::forms::FormError;
use crate::repository::errors::RepositoryError;
use crate::schedule::RoutePlanError;
use crate::session::SessionError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("not signed in")]
    Unauthorized,

    #[error("not found")]
    NotFound,

    #[error("{0}")]
    Form(String),

    #[error("invalid value: {0}")]
    TypeConstraint(#[from] TypeConstraintError),

    #[error("cannot move an order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error(transparent)]
    RoutePlan(#[from] RoutePlanError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("{path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("imported {created} clients; row {row} failed: {source}")]
    PartialImport {
        created: usize,
        row: usize,
        #[source]
        source: RepositoryError,
    },

    #[error(transparent)]
    Repository(RepositoryError),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => ServiceError::NotFound,
            RepositoryError::Unauthorized => ServiceError::Unauthorized,
            other => ServiceError::Repository(other),
        }
    }
}

impl From<FormError> for ServiceError {
    fn from(err: FormError) -> Self {
        ServiceError::Form(err.to_string())
    }
}
