//! # incidenthub-service
//!
//! Business logic services for IncidentHub. Services compose repositories
//! with the auth crate's predicates and policies; handlers stay thin.

pub mod context;
pub mod incident;
pub mod resource;
pub mod settings;
pub mod user;

pub use context::CurrentUser;
