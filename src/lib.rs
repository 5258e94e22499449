//! Route and order management client for a field sales team.
//!
//! The `data` feature builds the backend-independent layers: domain types,
//! visit scheduling, wire models, forms and view data. The `client` feature
//! adds the HTTP repository, session handling, services and the command line.

pub mod domain;
pub mod dto;
pub mod forms;
pub mod models;
pub mod schedule;

#[cfg(feature = "client")]
pub mod cli;
#[cfg(feature = "client")]
pub mod repository;
#[cfg(feature = "client")]
pub mod services;
#[cfg(feature = "client")]
pub mod session;
