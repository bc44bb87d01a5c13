use super::timer::TimerStat;
use super::{
    ContactMetrics, ContactOperation, WebMetrics, CONTACTS_COUNT, CONTACTS_CREATED,
    CONTACTS_DELETED, CONTACTS_SEARCH, CONTACTS_UPDATED, OPERATION_TIMER,
};
use dashmap::DashMap;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, AtomicU64, Ordering};
use std::time::Duration;

/// Flat key/value view of a group of metrics.
pub type MetricsReport = BTreeMap<String, f64>;

/// Only requests under this prefix get per-endpoint counters and timers.
const API_PREFIX: &str = "/phonebook";

/// In-process metrics registry built on atomics.
///
/// Shared behind an `Arc` by the service and the HTTP middleware; every
/// update is lock-free or goes through a sharded `DashMap`.
#[derive(Debug, Default)]
pub struct MetricsRegistry {
    contacts_created: AtomicU64,
    contacts_updated: AtomicU64,
    contacts_deleted: AtomicU64,
    contacts_search: AtomicU64,
    total_contacts: AtomicI64,
    repository_timer: TimerStat,
    search_timer: TimerStat,
    create_timer: TimerStat,
    update_timer: TimerStat,
    delete_timer: TimerStat,

    http_requests_total: AtomicU64,
    status_counts: DashMap<u16, AtomicU64>,
    endpoint_counts: DashMap<String, AtomicU64>,
    endpoint_timers: DashMap<(String, String, u16), TimerStat>,
}

impl MetricsRegistry {
    /// Create a registry with every value at zero.
    pub fn new() -> Self {
        Self::default()
    }

    fn operation_timer(&self, operation: ContactOperation) -> &TimerStat {
        match operation {
            ContactOperation::Search => &self.search_timer,
            ContactOperation::Create => &self.create_timer,
            ContactOperation::Update => &self.update_timer,
            ContactOperation::Delete => &self.delete_timer,
        }
    }

    pub fn contacts_created(&self) -> u64 {
        self.contacts_created.load(Ordering::Relaxed)
    }

    pub fn contacts_updated(&self) -> u64 {
        self.contacts_updated.load(Ordering::Relaxed)
    }

    pub fn contacts_deleted(&self) -> u64 {
        self.contacts_deleted.load(Ordering::Relaxed)
    }

    pub fn contacts_searched(&self) -> u64 {
        self.contacts_search.load(Ordering::Relaxed)
    }

    /// Current value of the total-contacts gauge.
    pub fn total_contacts(&self) -> i64 {
        self.total_contacts.load(Ordering::Relaxed)
    }

    /// Samples recorded by the repository-call timer.
    pub fn repository_calls(&self) -> u64 {
        self.repository_timer.count()
    }

    /// Samples recorded for a service operation.
    pub fn operation_count(&self, operation: ContactOperation) -> u64 {
        self.operation_timer(operation).count()
    }

    pub fn http_requests_total(&self) -> u64 {
        self.http_requests_total.load(Ordering::Relaxed)
    }

    /// Responses seen with the given status code.
    pub fn status_count(&self, status: u16) -> u64 {
        self.status_counts
            .get(&status)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Requests seen for an API endpoint.
    pub fn endpoint_count(&self, endpoint: &str) -> u64 {
        self.endpoint_counts
            .get(endpoint)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Contact counters, the gauge and the HTTP request total.
    pub fn contact_report(&self) -> MetricsReport {
        let mut report = MetricsReport::new();
        report.insert(CONTACTS_CREATED.to_string(), self.contacts_created() as f64);
        report.insert(CONTACTS_UPDATED.to_string(), self.contacts_updated() as f64);
        report.insert(CONTACTS_DELETED.to_string(), self.contacts_deleted() as f64);
        report.insert(CONTACTS_SEARCH.to_string(), self.contacts_searched() as f64);
        report.insert(CONTACTS_COUNT.to_string(), self.total_contacts() as f64);
        report.insert("http_requests".to_string(), self.http_requests_total() as f64);
        report
    }

    /// Mean latency per service operation, in milliseconds.
    pub fn performance_report(&self) -> MetricsReport {
        let mut report: MetricsReport = ContactOperation::ALL
            .iter()
            .map(|op| (op.report_key().to_string(), self.operation_timer(*op).mean_ms()))
            .collect();
        report.insert(
            format!("{}_mean_ms", OPERATION_TIMER.replace('.', "_")),
            self.repository_timer.mean_ms(),
        );
        report
    }

    /// Status-code counts, endpoint counts and endpoint mean latencies.
    pub fn web_report(&self) -> MetricsReport {
        let mut report = MetricsReport::new();

        for entry in self.status_counts.iter() {
            report.insert(
                format!("status_{}_count", entry.key()),
                entry.value().load(Ordering::Relaxed) as f64,
            );
        }

        for entry in self.endpoint_counts.iter() {
            report.insert(
                format!("endpoint_{}_count", entry.key().replace('/', "_")),
                entry.value().load(Ordering::Relaxed) as f64,
            );
        }

        for entry in self.endpoint_timers.iter() {
            let (endpoint, method, status) = entry.key();
            report.insert(
                format!(
                    "execution_time_{}_{}_{}",
                    endpoint.replace('/', "_"),
                    method,
                    status
                ),
                entry.value().mean_ms(),
            );
        }

        report
    }

    /// Reset every metric to zero.
    pub fn reset(&self) {
        for counter in [
            &self.contacts_created,
            &self.contacts_updated,
            &self.contacts_deleted,
            &self.contacts_search,
            &self.http_requests_total,
        ] {
            counter.store(0, Ordering::Relaxed);
        }
        self.total_contacts.store(0, Ordering::Relaxed);
        self.repository_timer.reset();
        for op in ContactOperation::ALL {
            self.operation_timer(op).reset();
        }
        self.status_counts.clear();
        self.endpoint_counts.clear();
        self.endpoint_timers.clear();
    }
}

impl ContactMetrics for MetricsRegistry {
    fn contact_created(&self) {
        self.contacts_created.fetch_add(1, Ordering::Relaxed);
        self.total_contacts.fetch_add(1, Ordering::Relaxed);
    }

    fn contact_updated(&self) {
        self.contacts_updated.fetch_add(1, Ordering::Relaxed);
    }

    fn contact_deleted(&self) {
        self.contacts_deleted.fetch_add(1, Ordering::Relaxed);
        self.total_contacts.fetch_sub(1, Ordering::Relaxed);
    }

    fn contact_searched(&self) {
        self.contacts_search.fetch_add(1, Ordering::Relaxed);
    }

    fn set_total_contacts(&self, count: u64) {
        let count = i64::try_from(count).unwrap_or(i64::MAX);
        self.total_contacts.store(count, Ordering::Relaxed);
    }

    fn record_repository_call(&self, elapsed: Duration) {
        self.repository_timer.record(elapsed);
    }

    fn record_operation(&self, operation: ContactOperation, elapsed: Duration) {
        self.operation_timer(operation).record(elapsed);
    }
}

impl WebMetrics for MetricsRegistry {
    fn record_request(&self, path: &str, method: &str, status: u16, elapsed: Duration) {
        self.http_requests_total.fetch_add(1, Ordering::Relaxed);
        self.status_counts
            .entry(status)
            .or_default()
            .fetch_add(1, Ordering::Relaxed);

        if path.starts_with(API_PREFIX) {
            self.endpoint_counts
                .entry(path.to_string())
                .or_default()
                .fetch_add(1, Ordering::Relaxed);
            self.endpoint_timers
                .entry((path.to_string(), method.to_string(), status))
                .or_default()
                .record(elapsed);
        }

        tracing::debug!(
            path = %path,
            method = %method,
            status = status,
            duration_ms = elapsed.as_millis() as u64,
            "HTTP request completed"
        );
    }
}
