//! Response action domain entities.

pub mod model;

pub use model::Action;
