//! Protected resource service.

pub mod service;

pub use service::ResourceService;
