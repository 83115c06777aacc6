//! User and authentication services.

pub mod service;

pub use service::{LoginOutcome, RefreshOutcome, UserService};
