//! System settings service.

pub mod service;

pub use service::SettingsService;
