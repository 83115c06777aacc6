//! # incidenthub-core
//!
//! Core crate for IncidentHub. Contains configuration schemas, pagination
//! types, and the unified error system.
//!
//! This crate has **no** internal dependencies on other IncidentHub crates.

pub mod config;
pub mod error;
pub mod result;
pub mod types;

pub use error::{AppError, AuthCode, ErrorKind};
pub use result::AppResult;
