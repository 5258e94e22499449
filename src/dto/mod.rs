//! DTO modules that bridge services with the command line views.

pub mod dashboard;
pub mod orders;
