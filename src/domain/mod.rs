//! Domain entities exposed to the scheduling core and the service layer.

pub mod auth;
pub mod client;
pub mod order;
pub mod product;
pub mod route;
pub mod types;
