use async_trait::async_trait;
use phonebook_service::error::{StoreError, StoreResult};
use phonebook_service::models::{fold_case, Contact, Page, PageRequest};
use phonebook_service::repositories::ContactRepository;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Mock contact repository for testing.
///
/// Provides an in-memory implementation of ContactRepository that tracks
/// method calls and can be told to fail, or to lose saved records, so the
/// service's error paths can be exercised.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct MockContactRepository {
    contacts: Arc<Mutex<HashMap<String, Contact>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    next_id: Arc<AtomicUsize>,
    failure: Arc<Mutex<Option<StoreError>>>,
    drop_saved_ids: Arc<Mutex<bool>>,
}

#[allow(dead_code)]
impl MockContactRepository {
    /// Create a new empty MockContactRepository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a contact directly, bypassing call tracking.
    pub fn add_contact(&self, contact: Contact) {
        let mut contacts = self.contacts.lock().unwrap();
        contacts.insert(contact.id.clone(), contact);
    }

    /// Make every subsequent call fail with `error`.
    pub fn fail_with(&self, error: StoreError) {
        *self.failure.lock().unwrap() = Some(error);
    }

    /// Make `save` return records with an empty id, as if nothing was stored.
    pub fn drop_saved_ids(&self) {
        *self.drop_saved_ids.lock().unwrap() = true;
    }

    /// Get the number of times a method was called.
    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    /// Snapshot of a stored contact.
    pub fn stored(&self, id: &str) -> Option<Contact> {
        self.contacts.lock().unwrap().get(id).cloned()
    }

    fn track_call(&self, method: &str) -> StoreResult<()> {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;

        match self.failure.lock().unwrap().clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }

    fn page(&self, filter: impl Fn(&Contact) -> bool, request: &PageRequest) -> Page<Contact> {
        let contacts = self.contacts.lock().unwrap();
        let mut matches: Vec<Contact> = contacts.values().filter(|c| filter(c)).cloned().collect();
        matches.sort_by(|a, b| request.sort.compare(a, b));

        let total = matches.len() as u64;
        let content = matches
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();
        Page::new(content, total)
    }
}

#[async_trait]
impl ContactRepository for MockContactRepository {
    async fn save(&self, mut contact: Contact) -> StoreResult<Contact> {
        self.track_call("save")?;

        if contact.id.is_empty() {
            let n = self.next_id.fetch_add(1, Ordering::Relaxed);
            contact.id = format!("mock-{}", n);
        }

        self.add_contact(contact.clone());

        if *self.drop_saved_ids.lock().unwrap() {
            contact.id.clear();
        }
        Ok(contact)
    }

    async fn find_by_id(&self, id: &str) -> StoreResult<Option<Contact>> {
        self.track_call("find_by_id")?;
        Ok(self.stored(id))
    }

    async fn exists_by_id(&self, id: &str) -> StoreResult<bool> {
        self.track_call("exists_by_id")?;
        Ok(self.contacts.lock().unwrap().contains_key(id))
    }

    async fn delete_by_id(&self, id: &str) -> StoreResult<()> {
        self.track_call("delete_by_id")?;
        self.contacts.lock().unwrap().remove(id);
        Ok(())
    }

    async fn find_all(&self, request: &PageRequest) -> StoreResult<Page<Contact>> {
        self.track_call("find_all")?;
        Ok(self.page(|_| true, request))
    }

    async fn search(&self, text: &str, request: &PageRequest) -> StoreResult<Page<Contact>> {
        self.track_call("search")?;
        let needle = fold_case(text);
        Ok(self.page(|c| c.matches_text(&needle), request))
    }

    async fn count(&self) -> StoreResult<u64> {
        self.track_call("count")?;
        Ok(self.contacts.lock().unwrap().len() as u64)
    }
}
