use crate::error::StoreResult;
use crate::models::{fold_case, Contact, Page, PageRequest};
use crate::repositories::traits::ContactRepository;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Process-local contact store.
///
/// Contacts live in a map keyed by id behind an async `RwLock`; every listing
/// filters, sorts and slices a snapshot of the map.
#[derive(Default)]
pub struct InMemoryContactRepository {
    contacts: RwLock<HashMap<String, Contact>>,
}

impl InMemoryContactRepository {
    /// Create an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Order and slice an already filtered set of matches.
    fn paginate(mut matches: Vec<Contact>, request: &PageRequest) -> Page<Contact> {
        let total = matches.len() as u64;
        matches.sort_by(|a, b| request.sort.compare(a, b));

        let content = matches
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();

        Page::new(content, total)
    }
}

#[async_trait]
impl ContactRepository for InMemoryContactRepository {
    async fn save(&self, mut contact: Contact) -> StoreResult<Contact> {
        if contact.is_new() {
            contact.id = Uuid::new_v4().to_string();
        }

        let mut contacts = self.contacts.write().await;
        contacts.insert(contact.id.clone(), contact.clone());
        Ok(contact)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Contact>> {
        let contacts = self.contacts.read().await;
        Ok(contacts.get(id).cloned())
    }

    async fn exists_by_id(&self, id: &str) -> StoreResult<bool> {
        let contacts = self.contacts.read().await;
        Ok(contacts.contains_key(id))
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        let mut contacts = self.contacts.write().await;
        contacts.remove(id);
        Ok(())
    }

    async fn find_all(&self, request: &PageRequest) -> StoreResult<Page<Contact>> {
        let contacts = self.contacts.read().await;
        let all: Vec<Contact> = contacts.values().cloned().collect();
        Ok(Self::paginate(all, request))
    }

    async fn search(&self, text: &str, request: &PageRequest) -> StoreResult<Page<Contact>> {
        let needle = fold_case(text);

        let contacts = self.contacts.read().await;
        let matches: Vec<Contact> = contacts
            .values()
            .filter(|contact| contact.matches_text(&needle))
            .cloned()
            .collect();

        Ok(Self::paginate(matches, request))
    }

    async fn count(&self) -> StoreResult<u64> {
        let contacts = self.contacts.read().await;
        Ok(contacts.len() as u64)
    }
}
