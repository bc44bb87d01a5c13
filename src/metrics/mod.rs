//! Metrics instrumentation for contact operations and HTTP traffic.
//!
//! The service and the web layer depend on the [`ContactMetrics`] and
//! [`WebMetrics`] traits; [`MetricsRegistry`] is the atomic in-process
//! implementation that also renders the flat reports served under
//! `/phonebook/metrics`.

mod registry;
mod timer;

pub use registry::{MetricsRegistry, MetricsReport};
pub use timer::{OperationTimer, TimerStat};

use std::time::Duration;

/// Counter tracking created contacts.
pub const CONTACTS_CREATED: &str = "phonebook.contacts.created";
/// Counter tracking updated contacts.
pub const CONTACTS_UPDATED: &str = "phonebook.contacts.updated";
/// Counter tracking deleted contacts.
pub const CONTACTS_DELETED: &str = "phonebook.contacts.deleted";
/// Counter tracking search operations.
pub const CONTACTS_SEARCH: &str = "phonebook.contacts.search";
/// Gauge holding the current number of contacts.
pub const CONTACTS_COUNT: &str = "phonebook.contacts.count";
/// Timer wrapping each store call issued by the service.
pub const OPERATION_TIMER: &str = "phonebook.operation.timer";

/// Service-level operations with their own latency timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactOperation {
    Search,
    Create,
    Update,
    Delete,
}

impl ContactOperation {
    pub const ALL: [ContactOperation; 4] = [
        ContactOperation::Search,
        ContactOperation::Create,
        ContactOperation::Update,
        ContactOperation::Delete,
    ];

    /// Name of the timer recording this operation.
    pub fn timer_name(&self) -> &'static str {
        match self {
            ContactOperation::Search => "search_contacts_timer",
            ContactOperation::Create => "create_contact_timer",
            ContactOperation::Update => "update_contact_timer",
            ContactOperation::Delete => "delete_contact_timer",
        }
    }

    /// Key of the mean latency in the performance report.
    pub fn report_key(&self) -> &'static str {
        match self {
            ContactOperation::Search => "search_time_mean_ms",
            ContactOperation::Create => "create_time_mean_ms",
            ContactOperation::Update => "update_time_mean_ms",
            ContactOperation::Delete => "delete_time_mean_ms",
        }
    }
}

/// Metrics sink used by the contact service.
///
/// Implementations must be safe to call from concurrently executing requests.
pub trait ContactMetrics: Send + Sync {
    /// A contact was created; also raises the total-contacts gauge.
    fn contact_created(&self);

    /// A contact was updated.
    fn contact_updated(&self);

    /// A contact was deleted; also lowers the total-contacts gauge.
    fn contact_deleted(&self);

    /// A search or listing reached the store.
    fn contact_searched(&self);

    /// Overwrite the total-contacts gauge.
    fn set_total_contacts(&self, count: u64);

    /// Record the latency of a single store call.
    fn record_repository_call(&self, elapsed: Duration);

    /// Record the latency of a successful service operation.
    fn record_operation(&self, operation: ContactOperation, elapsed: Duration);
}

/// Metrics sink used by the HTTP middleware.
pub trait WebMetrics: Send + Sync {
    /// Record a completed HTTP exchange.
    fn record_request(&self, path: &str, method: &str, status: u16, elapsed: Duration);
}
