//! Phonebook Service - a REST service for managing contacts.
//!
//! Contacts (first name, last name, phone, address) can be created, updated,
//! deleted and listed with pagination, sorting and free-text search. Every
//! operation is instrumented with counters and latency timers.
//!
//! # Architecture
//!
//! - **models**: Contact records and pagination types
//! - **error**: Custom error types for precise error handling
//! - **config**: Configuration management from environment variables
//! - **repositories**: Contact store abstraction with in-memory and Postgres backends
//! - **metrics**: Atomic counters, gauge and timers plus their flat reports
//! - **services**: Validation and orchestration on top of the store
//! - **http**: axum router, handlers and error translation

pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod services;

pub use config::{Config, StoreBackend};
pub use error::{ConfigError, PhonebookError, StoreError};
pub use http::{router, AppState};
pub use metrics::{ContactMetrics, MetricsRegistry, WebMetrics};
pub use models::{Contact, ContactDetails, ContactsResponse, Page, PageRequest, Sort};
pub use repositories::{ContactRepository, InMemoryContactRepository};
pub use services::{ContactService, ContactServiceImpl};
