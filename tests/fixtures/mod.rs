//! Test fixtures and sample data.
//!
//! Builds services and routers over fresh stores and seeds the standard
//! five-contact phonebook used across the suites.

#![allow(dead_code)]

use phonebook_service::metrics::MetricsRegistry;
use phonebook_service::models::{Contact, ContactDetails};
use phonebook_service::repositories::{ContactRepository, InMemoryContactRepository};
use phonebook_service::services::{ContactService, ContactServiceImpl};
use phonebook_service::{router, AppState};
use std::sync::Arc;

/// Max page size used by every fixture service.
pub const MAX_PAGE_SIZE: usize = 10;

/// The standard phonebook: (first, last, phone, address).
pub const SAMPLE_CONTACTS: [(&str, &str, &str, &str); 5] = [
    ("John", "Doe", "123-456-7890", "123 Main St"),
    ("Jane", "Smith", "456-789-0123", "456 Oak Ave"),
    ("Bob", "Johnson", "789-012-3456", "789 Pine Rd"),
    ("Alice", "Williams", "012-345-6789", "012 Elm Blvd"),
    ("Charlie", "Brown", "345-678-9012", "345 Maple Ln"),
];

/// Service, repository and metrics wired together over an in-memory store.
pub struct TestContext {
    pub repository: Arc<InMemoryContactRepository>,
    pub metrics: Arc<MetricsRegistry>,
    pub service: Arc<ContactServiceImpl>,
}

impl TestContext {
    pub fn new() -> Self {
        let repository = Arc::new(InMemoryContactRepository::new());
        let metrics = Arc::new(MetricsRegistry::new());
        let service = Arc::new(ContactServiceImpl::new(
            repository.clone() as Arc<dyn ContactRepository>,
            metrics.clone(),
            MAX_PAGE_SIZE,
        ));
        Self {
            repository,
            metrics,
            service,
        }
    }

    /// Router over the same service and metrics.
    pub fn router(&self) -> axum::Router {
        router(AppState::new(
            self.service.clone() as Arc<dyn ContactService>,
            self.metrics.clone(),
        ))
    }
}

/// Store the five sample contacts directly and return John Doe's id.
///
/// Writes go straight to the repository, so service metrics stay untouched.
pub async fn seed_sample_contacts(repository: &dyn ContactRepository) -> String {
    let mut john_id = String::new();
    for (first, last, phone, address) in SAMPLE_CONTACTS {
        let saved = repository
            .save(Contact::new(first, Some(last), phone, Some(address)))
            .await
            .expect("seeding contacts should not fail");
        if first == "John" {
            john_id = saved.id;
        }
    }
    john_id
}

/// Details for a brand new contact.
pub fn new_contact_details() -> ContactDetails {
    ContactDetails::new("New", Some("User"), "111-222-3333", Some("999 New St"))
}

/// First names of a page of contacts, in order.
pub fn first_names(contacts: &[Contact]) -> Vec<&str> {
    contacts.iter().map(|c| c.first_name.as_str()).collect()
}
