//! Service behaviour against a call-tracking mock store.
//!
//! Checks which store calls each operation makes and how store failures
//! surface to callers.

mod mocks;

use mocks::MockContactRepository;
use phonebook_service::error::{PhonebookError, StoreError, STORE_FAILURE_MESSAGE};
use phonebook_service::metrics::{ContactOperation, MetricsRegistry};
use phonebook_service::models::{Contact, ContactDetails};
use phonebook_service::repositories::ContactRepository;
use phonebook_service::services::{ContactService, ContactServiceImpl};
use std::sync::Arc;

fn service_over(mock: &MockContactRepository) -> (ContactServiceImpl, Arc<MetricsRegistry>) {
    let metrics = Arc::new(MetricsRegistry::new());
    let service = ContactServiceImpl::new(
        Arc::new(mock.clone()) as Arc<dyn ContactRepository>,
        metrics.clone(),
        10,
    );
    (service, metrics)
}

fn stored_contact(id: &str, first_name: &str) -> Contact {
    Contact {
        id: id.to_string(),
        first_name: first_name.to_string(),
        last_name: Some("Stored".to_string()),
        phone: "000".to_string(),
        address: Some("1 Old Road".to_string()),
    }
}

#[tokio::test]
async fn test_empty_query_uses_find_all() {
    let mock = MockContactRepository::new();
    mock.add_contact(stored_contact("a", "Ann"));
    let (service, _) = service_over(&mock);

    let result = service
        .search_contacts(Some(""), 0, 10, "ASC", "firstName")
        .await
        .unwrap();

    assert_eq!(result.total_count, 1);
    assert_eq!(mock.get_call_count("find_all"), 1);
    assert_eq!(mock.get_call_count("search"), 0);
}

#[tokio::test]
async fn test_text_query_uses_search() {
    let mock = MockContactRepository::new();
    mock.add_contact(stored_contact("a", "Ann"));
    mock.add_contact(stored_contact("b", "Ben"));
    let (service, metrics) = service_over(&mock);

    let result = service
        .search_contacts(Some("ann"), 0, 10, "ASC", "firstName")
        .await
        .unwrap();

    assert_eq!(result.contacts.len(), 1);
    assert_eq!(result.contacts[0].id, "a");
    assert_eq!(mock.get_call_count("search"), 1);
    assert_eq!(mock.get_call_count("find_all"), 0);
    assert_eq!(metrics.repository_calls(), 1);
}

#[tokio::test]
async fn test_invalid_parameters_never_reach_store() {
    let mock = MockContactRepository::new();
    let (service, _) = service_over(&mock);

    assert!(service
        .search_contacts(None, 0, 11, "ASC", "firstName")
        .await
        .is_err());
    assert!(service
        .search_contacts(None, 0, 5, "ASC", "phone")
        .await
        .is_err());
    assert!(service
        .search_contacts(None, 0, 5, "UP", "firstName")
        .await
        .is_err());

    assert_eq!(mock.get_call_count("find_all"), 0);
    assert_eq!(mock.get_call_count("search"), 0);
}

#[tokio::test]
async fn test_create_assigns_id_through_store() {
    let mock = MockContactRepository::new();
    let (service, _) = service_over(&mock);

    let created = service
        .create_contact(ContactDetails::new("Ann", None, "555", None))
        .await
        .unwrap();

    assert_eq!(created.id, "mock-0");
    assert_eq!(mock.get_call_count("save"), 1);
    assert_eq!(mock.stored("mock-0"), Some(created));
}

#[tokio::test]
async fn test_create_fails_when_store_returns_no_id() {
    let mock = MockContactRepository::new();
    mock.drop_saved_ids();
    let (service, metrics) = service_over(&mock);

    let err = service
        .create_contact(ContactDetails::new("Ann", None, "555", None))
        .await
        .unwrap_err();

    assert_eq!(err, PhonebookError::Internal("Failed to create contact".to_string()));
    assert_eq!(metrics.contacts_created(), 0);
    assert_eq!(metrics.operation_count(ContactOperation::Create), 0);
}

#[tokio::test]
async fn test_invalid_contact_is_never_saved() {
    let mock = MockContactRepository::new();
    let (service, _) = service_over(&mock);

    let err = service
        .create_contact(ContactDetails::default())
        .await
        .unwrap_err();

    assert!(matches!(err, PhonebookError::Validation(_)));
    assert_eq!(mock.get_call_count("save"), 0);
}

#[tokio::test]
async fn test_update_keeps_id_and_stored_address() {
    let mock = MockContactRepository::new();
    mock.add_contact(stored_contact("c-1", "Old"));
    let (service, _) = service_over(&mock);

    let updated = service
        .update_contact("c-1", ContactDetails::new("New", Some("Name"), "111", None))
        .await
        .unwrap();

    assert_eq!(updated.id, "c-1");
    assert_eq!(updated.first_name, "New");
    assert_eq!(updated.address.as_deref(), Some("1 Old Road"));
    assert_eq!(mock.get_call_count("find_by_id"), 1);
    assert_eq!(mock.get_call_count("save"), 1);
    assert_eq!(mock.stored("c-1"), Some(updated));
}

#[tokio::test]
async fn test_update_missing_contact_does_not_save() {
    let mock = MockContactRepository::new();
    let (service, _) = service_over(&mock);

    let err = service
        .update_contact("ghost", ContactDetails::new("New", None, "111", None))
        .await
        .unwrap_err();

    assert_eq!(err, PhonebookError::contact_not_found("ghost"));
    assert_eq!(mock.get_call_count("save"), 0);
}

#[tokio::test]
async fn test_delete_checks_existence_first() {
    let mock = MockContactRepository::new();
    mock.add_contact(stored_contact("c-1", "Old"));
    let (service, metrics) = service_over(&mock);

    service.delete_contact("c-1").await.unwrap();
    assert_eq!(mock.get_call_count("exists_by_id"), 1);
    assert_eq!(mock.get_call_count("delete_by_id"), 1);
    assert!(mock.stored("c-1").is_none());
    assert_eq!(metrics.repository_calls(), 2);

    let err = service.delete_contact("c-1").await.unwrap_err();
    assert!(matches!(err, PhonebookError::NotFound { .. }));
    assert_eq!(mock.get_call_count("delete_by_id"), 1);
}

#[tokio::test]
async fn test_store_failure_becomes_internal_error() {
    let mock = MockContactRepository::new();
    mock.fail_with(StoreError::Connection("connection refused".to_string()));
    let (service, metrics) = service_over(&mock);

    let search = service
        .search_contacts(None, 0, 10, "ASC", "firstName")
        .await
        .unwrap_err();
    let create = service
        .create_contact(ContactDetails::new("Ann", None, "555", None))
        .await
        .unwrap_err();
    let delete = service.delete_contact("x").await.unwrap_err();

    for err in [search, create, delete] {
        assert_eq!(err, PhonebookError::Internal(STORE_FAILURE_MESSAGE.to_string()));
        assert!(!err.to_string().contains("connection refused"));
    }

    // Failed store calls are still timed; the operations are not.
    assert_eq!(metrics.repository_calls(), 3);
    assert_eq!(metrics.contacts_searched(), 0);
    assert_eq!(metrics.operation_count(ContactOperation::Search), 0);
}

#[tokio::test]
async fn test_initialize_metrics_reads_store_count() {
    let mock = MockContactRepository::new();
    mock.add_contact(stored_contact("a", "Ann"));
    mock.add_contact(stored_contact("b", "Ben"));
    let (service, metrics) = service_over(&mock);

    assert_eq!(service.initialize_metrics().await.unwrap(), 2);
    assert_eq!(metrics.total_contacts(), 2);
    assert_eq!(mock.get_call_count("count"), 1);
}

#[tokio::test]
async fn test_initialize_metrics_propagates_store_failure() {
    let mock = MockContactRepository::new();
    mock.fail_with(StoreError::Query("relation does not exist".to_string()));
    let (service, metrics) = service_over(&mock);

    assert!(service.initialize_metrics().await.is_err());
    assert_eq!(metrics.total_contacts(), 0);
}
