//! Attachment domain entities.

pub mod model;

pub use model::Attachment;
