//! Tower/Axum middleware for the IncidentHub API.

pub mod auth;
pub mod cors;
pub mod role_gate;
pub mod security_headers;
