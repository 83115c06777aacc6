//! Per-resource ownership/role access predicates.

pub mod predicates;

pub use predicates::{ResourceOwnership, can_act, can_read};
