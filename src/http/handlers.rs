//! Route handlers for contacts and metrics.

use super::error::ApiError;
use super::AppState;
use crate::error::{PhonebookError, PhonebookResult};
use crate::metrics::MetricsReport;
use crate::models::{Contact, ContactDetails, ContactsResponse};
use axum::body::Bytes;
use axum::extract::rejection::QueryRejection;
use axum::extract::{OriginalUri, Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

fn default_size() -> usize {
    10
}

fn default_direction() -> String {
    "ASC".to_string()
}

fn default_sort_by() -> String {
    "firstName".to_string()
}

/// Query parameters for contact listing and search.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchParams {
    /// Free-text filter; absent or empty lists everything
    pub query: Option<String>,
    #[serde(default)]
    pub page: usize,
    #[serde(default = "default_size")]
    pub size: usize,
    #[serde(default = "default_direction")]
    pub direction: String,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
}

/// Parse a create/update body.
///
/// An empty body and a literal `null` are both treated as a missing contact.
pub(crate) fn parse_contact_body(body: &[u8]) -> PhonebookResult<ContactDetails> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(PhonebookError::validation("Contact cannot be null"));
    }

    let details: Option<ContactDetails> = serde_json::from_slice(body)
        .map_err(|e| PhonebookError::validation(format!("Malformed contact body: {}", e)))?;
    details.ok_or_else(|| PhonebookError::validation("Contact cannot be null"))
}

/// `GET /phonebook/contacts` (and the legacy `GET /contacts`).
pub async fn search_contacts(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> Result<Json<ContactsResponse>, ApiError> {
    let path = uri.path();
    let Query(params) = params
        .map_err(|rejection| ApiError::new(PhonebookError::validation(rejection.body_text()), path))?;

    let response = state
        .contacts
        .search_contacts(
            params.query.as_deref(),
            params.page,
            params.size,
            &params.direction,
            &params.sort_by,
        )
        .await
        .map_err(|e| ApiError::new(e, path))?;

    Ok(Json(response))
}

/// `POST /phonebook`
pub async fn create_contact(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    body: Bytes,
) -> Result<(StatusCode, Json<Contact>), ApiError> {
    let path = uri.path();
    let details = parse_contact_body(&body).map_err(|e| ApiError::new(e, path))?;

    let contact = state
        .contacts
        .create_contact(details)
        .await
        .map_err(|e| ApiError::new(e, path))?;

    Ok((StatusCode::CREATED, Json(contact)))
}

/// `PUT /phonebook/:id`
pub async fn update_contact(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Contact>, ApiError> {
    let path = uri.path();
    let details = parse_contact_body(&body).map_err(|e| ApiError::new(e, path))?;

    let contact = state
        .contacts
        .update_contact(&id, details)
        .await
        .map_err(|e| ApiError::new(e, path))?;

    Ok(Json(contact))
}

/// `DELETE /phonebook/:id`
pub async fn delete_contact(
    State(state): State<AppState>,
    OriginalUri(uri): OriginalUri,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    state
        .contacts
        .delete_contact(&id)
        .await
        .map_err(|e| ApiError::new(e, uri.path()))?;

    Ok(StatusCode::NO_CONTENT)
}

/// `GET /phonebook/metrics/contacts`
pub async fn contact_metrics(State(state): State<AppState>) -> Json<MetricsReport> {
    Json(state.metrics.contact_report())
}

/// `GET /phonebook/metrics/performance`
pub async fn performance_metrics(State(state): State<AppState>) -> Json<MetricsReport> {
    Json(state.metrics.performance_report())
}

/// `GET /phonebook/metrics/web`
pub async fn web_metrics(State(state): State<AppState>) -> Json<MetricsReport> {
    Json(state.metrics.web_report())
}
