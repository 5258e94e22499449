//! Use cases combining repositories, forms and the scheduling core.

pub mod auth;
pub mod clients;
pub mod dashboard;
pub mod errors;
pub mod orders;
pub mod products;

pub use errors::{ServiceError, ServiceResult};
