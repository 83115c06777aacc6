//! # incidenthub-entity
//!
//! Domain entity models for IncidentHub. Every struct in this crate
//! represents a database table row or a domain value object. All entities
//! derive `Debug`, `Clone`, `Serialize`, `Deserialize`, and database
//! entities additionally derive `sqlx::FromRow`.

pub mod action;
pub mod attachment;
pub mod incident;
pub mod resource;
pub mod settings;
pub mod user;
