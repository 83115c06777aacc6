//! # incidenthub-api
//!
//! HTTP API layer for IncidentHub built on Axum: application state, DTOs,
//! handlers, the access-control middleware, and the router.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use state::{AppState, AuthState};
