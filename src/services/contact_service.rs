//! Contact service layer.
//!
//! Validates request parameters, dispatches to the contact store and records
//! metrics around every store call.

use crate::error::{PhonebookError, PhonebookResult, StoreResult};
use crate::metrics::{ContactMetrics, ContactOperation, OperationTimer, OPERATION_TIMER};
use crate::models::{
    Contact, ContactDetails, ContactsResponse, Page, PageRequest, Sort, SortDirection, SortField,
};
use crate::repositories::ContactRepository;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;
use tracing::{debug, warn};

/// Contact service trait for business operations.
#[async_trait]
pub trait ContactService: Send + Sync {
    /// List contacts, optionally filtered by a free-text query.
    ///
    /// A `None` or empty query lists every contact. `direction` is matched
    /// case-insensitively against `ASC`/`DESC`; `sort_by` must be one of
    /// `firstName`, `lastName`, `address`.
    async fn search_contacts(
        &self,
        query: Option<&str>,
        page: usize,
        size: usize,
        direction: &str,
        sort_by: &str,
    ) -> PhonebookResult<ContactsResponse>;

    /// Validate and store a new contact, returning it with its assigned id.
    async fn create_contact(&self, details: ContactDetails) -> PhonebookResult<Contact>;

    /// Replace the fields of an existing contact.
    async fn update_contact(&self, id: &str, details: ContactDetails) -> PhonebookResult<Contact>;

    /// Delete an existing contact.
    async fn delete_contact(&self, id: &str) -> PhonebookResult<()>;
}

/// Default implementation of ContactService.
pub struct ContactServiceImpl {
    repository: Arc<dyn ContactRepository>,
    metrics: Arc<dyn ContactMetrics>,
    max_page_size: usize,
}

/// Validation helper functions.
impl ContactServiceImpl {
    fn validate_page_size(&self, size: usize) -> PhonebookResult<()> {
        if size > self.max_page_size {
            return Err(PhonebookError::validation(format!(
                "Page size cannot be larger than {}",
                self.max_page_size
            )));
        }
        if size == 0 {
            return Err(PhonebookError::validation("Page size must be at least 1"));
        }
        Ok(())
    }

    fn parse_sort(direction: &str, sort_by: &str) -> PhonebookResult<Sort> {
        let field = sort_by
            .parse::<SortField>()
            .map_err(PhonebookError::Validation)?;
        let direction = direction
            .parse::<SortDirection>()
            .map_err(PhonebookError::Validation)?;
        Ok(Sort::new(field, direction))
    }

    /// Check mandatory fields; whitespace-only values count as blank.
    fn validate_details(details: &ContactDetails) -> PhonebookResult<()> {
        fn has_text(value: &Option<String>) -> bool {
            value.as_deref().is_some_and(|v| !v.trim().is_empty())
        }

        if !has_text(&details.first_name) {
            return Err(PhonebookError::validation("First name is mandatory"));
        }
        if !has_text(&details.phone) {
            return Err(PhonebookError::validation("Phone number is mandatory"));
        }
        Ok(())
    }
}

impl ContactServiceImpl {
    /// Create a new contact service.
    pub fn new(
        repository: Arc<dyn ContactRepository>,
        metrics: Arc<dyn ContactMetrics>,
        max_page_size: usize,
    ) -> Self {
        Self {
            repository,
            metrics,
            max_page_size,
        }
    }

    /// Seed the total-contacts gauge from the store.
    pub async fn initialize_metrics(&self) -> PhonebookResult<u64> {
        let total = self.timed(self.repository.count()).await?;
        self.metrics.set_total_contacts(total);
        debug!(total = total, "Contact gauge initialized");
        Ok(total)
    }

    /// Run a store call under the repository timer.
    ///
    /// The sample is recorded whatever the outcome; store errors become
    /// internal errors.
    async fn timed<T, F>(&self, call: F) -> PhonebookResult<T>
    where
        F: Future<Output = StoreResult<T>> + Send,
    {
        let timer = OperationTimer::start(OPERATION_TIMER);
        let result = call.await;
        self.metrics.record_repository_call(timer.finish());

        result.map_err(|e| {
            warn!(error = %e, "Contact store call failed");
            PhonebookError::from(e)
        })
    }

    fn into_response(page: Page<Contact>) -> ContactsResponse {
        ContactsResponse {
            contacts: page.content,
            total_count: page.total_elements,
        }
    }
}

#[async_trait]
impl ContactService for ContactServiceImpl {
    async fn search_contacts(
        &self,
        query: Option<&str>,
        page: usize,
        size: usize,
        direction: &str,
        sort_by: &str,
    ) -> PhonebookResult<ContactsResponse> {
        let started = OperationTimer::start(ContactOperation::Search.timer_name());

        self.validate_page_size(size)?;
        let sort = Self::parse_sort(direction, sort_by)?;
        let request = PageRequest::new(page, size, sort);

        debug!(
            query = ?query,
            page = page,
            size = size,
            direction = %sort.direction,
            sort_by = %sort.field,
            "Searching contacts"
        );

        let result = match query.filter(|q| !q.is_empty()) {
            None => self.timed(self.repository.find_all(&request)).await?,
            Some(text) => self.timed(self.repository.search(text, &request)).await?,
        };
        self.metrics.contact_searched();

        let response = Self::into_response(result);
        self.metrics
            .record_operation(ContactOperation::Search, started.finish());
        Ok(response)
    }

    async fn create_contact(&self, details: ContactDetails) -> PhonebookResult<Contact> {
        let started = OperationTimer::start(ContactOperation::Create.timer_name());

        Self::validate_details(&details)?;
        let contact = Contact {
            id: String::new(),
            first_name: details.first_name.unwrap_or_default(),
            last_name: details.last_name,
            phone: details.phone.unwrap_or_default(),
            address: details.address,
        };
        debug!(name = %contact.display_name(), "Creating new contact");

        let saved = self.timed(self.repository.save(contact)).await?;
        if saved.id.is_empty() {
            return Err(PhonebookError::Internal(
                "Failed to create contact".to_string(),
            ));
        }
        self.metrics.contact_created();

        debug!(id = %saved.id, "Contact created successfully");
        self.metrics
            .record_operation(ContactOperation::Create, started.finish());
        Ok(saved)
    }

    async fn update_contact(&self, id: &str, details: ContactDetails) -> PhonebookResult<Contact> {
        let started = OperationTimer::start(ContactOperation::Update.timer_name());

        Self::validate_details(&details)?;
        debug!(id = %id, "Attempting to update contact");

        let mut existing = self
            .timed(self.repository.find_by_id(id))
            .await?
            .ok_or_else(|| PhonebookError::contact_not_found(id))?;

        existing.first_name = details.first_name.unwrap_or_default();
        existing.last_name = details.last_name;
        existing.phone = details.phone.unwrap_or_default();
        if let Some(address) = details.address {
            existing.address = Some(address);
        }

        let updated = self.timed(self.repository.save(existing)).await?;
        self.metrics.contact_updated();

        debug!(id = %updated.id, "Contact updated successfully");
        self.metrics
            .record_operation(ContactOperation::Update, started.finish());
        Ok(updated)
    }

    async fn delete_contact(&self, id: &str) -> PhonebookResult<()> {
        let started = OperationTimer::start(ContactOperation::Delete.timer_name());
        debug!(id = %id, "Attempting to delete contact");

        if !self.timed(self.repository.exists_by_id(id)).await? {
            return Err(PhonebookError::contact_not_found(id));
        }

        self.timed(self.repository.delete_by_id(id)).await?;
        self.metrics.contact_deleted();

        debug!(id = %id, "Contact deleted successfully");
        self.metrics
            .record_operation(ContactOperation::Delete, started.finish());
        Ok(())
    }
}
