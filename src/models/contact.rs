//! Contact model representing a person in the phonebook.

use serde::{Deserialize, Serialize};

/// A stored contact.
///
/// The `id` is assigned by the store on first save; callers never choose it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Contact {
    /// Unique identifier, empty until the contact has been saved
    #[serde(default)]
    pub id: String,

    /// First name (mandatory)
    pub first_name: String,

    /// Last name
    #[serde(default)]
    pub last_name: Option<String>,

    /// Phone number (mandatory)
    pub phone: String,

    /// Postal address
    #[serde(default)]
    pub address: Option<String>,
}

impl Contact {
    /// Create an unsaved contact.
    pub fn new(
        first_name: impl Into<String>,
        last_name: Option<&str>,
        phone: impl Into<String>,
        address: Option<&str>,
    ) -> Self {
        Self {
            id: String::new(),
            first_name: first_name.into(),
            last_name: last_name.map(str::to_string),
            phone: phone.into(),
            address: address.map(str::to_string),
        }
    }

    /// Whether the store has assigned an identifier yet.
    pub fn is_new(&self) -> bool {
        self.id.is_empty()
    }

    /// Case-insensitive substring match across first name, last name, phone and address.
    ///
    /// `needle_lower` must already be folded with [`fold_case`].
    pub fn matches_text(&self, needle_lower: &str) -> bool {
        let hit = |value: &str| fold_case(value).contains(needle_lower);

        hit(&self.first_name)
            || self.last_name.as_deref().is_some_and(hit)
            || hit(&self.phone)
            || self.address.as_deref().is_some_and(hit)
    }

    /// Full display name.
    pub fn display_name(&self) -> String {
        match self.last_name.as_deref() {
            Some(last) if !last.is_empty() => format!("{} {}", self.first_name, last),
            _ => self.first_name.clone(),
        }
    }
}

/// Fold `text` for case-insensitive comparison.
///
/// Lowercases one char at a time, so the result never depends on the
/// surrounding word, and maps final sigma onto sigma.
pub fn fold_case(text: &str) -> String {
    text.chars()
        .flat_map(char::to_lowercase)
        .map(|c| if c == 'ς' { 'σ' } else { c })
        .collect()
}

/// Incoming contact fields for create and update requests.
///
/// Every field is optional on the wire so that missing mandatory fields are
/// reported as validation errors rather than deserialization failures. Any
/// `id` in the body is ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct ContactDetails {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ContactDetails {
    /// Convenience constructor, mostly for tests and fixtures.
    pub fn new(
        first_name: &str,
        last_name: Option<&str>,
        phone: &str,
        address: Option<&str>,
    ) -> Self {
        Self {
            first_name: Some(first_name.to_string()),
            last_name: last_name.map(str::to_string),
            phone: Some(phone.to_string()),
            address: address.map(str::to_string),
        }
    }
}

/// Paginated contact listing returned by searches.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct ContactsResponse {
    /// Contacts on the requested page
    pub contacts: Vec<Contact>,

    /// Number of matching contacts across all pages
    pub total_count: u64,
}
