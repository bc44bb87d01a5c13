//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between
//! repositories and metrics. They provide a clean boundary between the
//! HTTP handlers and the data access layer.

mod contact_service;

pub use contact_service::{ContactService, ContactServiceImpl};
