//! System settings domain entities.

pub mod model;

pub use model::SettingEntry;
