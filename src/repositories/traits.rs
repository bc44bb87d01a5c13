use crate::error::StoreResult;
use crate::models::{Contact, Page, PageRequest};
use async_trait::async_trait;

/// Repository for managing contacts.
///
/// Provides abstraction over contact storage and retrieval,
/// enabling different implementations (in-memory, Postgres, mock).
#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// Insert or replace a contact.
    ///
    /// A contact with an empty `id` receives a freshly generated identifier.
    /// The stored record is returned.
    async fn save(&self, contact: Contact) -> StoreResult<Contact>;

    /// Retrieve a single contact by ID.
    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Contact>>;

    /// Whether a contact with this ID exists.
    async fn exists_by_id(&self, id: &str) -> StoreResult<bool>;

    /// Remove a contact. Removing an absent ID is not an error.
    async fn delete_by_id(&self, id: &str) -> StoreResult<()>;

    /// List all contacts, ordered and paged.
    async fn find_all(&self, request: &PageRequest) -> StoreResult<Page<Contact>>;

    /// Case-insensitive substring search across first name, last name, phone
    /// and address, ordered and paged.
    async fn search(&self, text: &str, request: &PageRequest) -> StoreResult<Page<Contact>>;

    /// Number of stored contacts.
    async fn count(&self) -> StoreResult<u64>;
}
