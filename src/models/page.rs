//! Pagination and sorting types shared by the service and the stores.

use super::Contact;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Contact fields a listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortField {
    FirstName,
    LastName,
    Address,
}

impl SortField {
    /// Every accepted sort field, in the order they are reported to callers.
    pub const ALL: [SortField; 3] = [SortField::FirstName, SortField::LastName, SortField::Address];

    /// Wire name used in the `sortBy` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::FirstName => "firstName",
            SortField::LastName => "lastName",
            SortField::Address => "address",
        }
    }

    /// Database column backing the field.
    pub fn column(&self) -> &'static str {
        match self {
            SortField::FirstName => "first_name",
            SortField::LastName => "last_name",
            SortField::Address => "address",
        }
    }

    /// Comma separated list of accepted wire names.
    pub fn allowed() -> String {
        Self::ALL
            .iter()
            .map(SortField::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }

    // Absent values order before present ones.
    fn key<'a>(&self, contact: &'a Contact) -> Option<&'a str> {
        match self {
            SortField::FirstName => Some(contact.first_name.as_str()),
            SortField::LastName => contact.last_name.as_deref(),
            SortField::Address => contact.address.as_deref(),
        }
    }
}

impl FromStr for SortField {
    type Err = String;

    /// Field names are matched exactly, as they appear on the wire.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| {
                format!(
                    "Invalid sort field '{}'. Allowed fields are: {}",
                    s,
                    Self::allowed()
                )
            })
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    /// Case-insensitive: `asc`, `Asc` and `ASC` are all accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(SortDirection::Asc),
            "DESC" => Ok(SortDirection::Desc),
            _ => Err(format!(
                "Invalid sort direction '{}'. Allowed values are: ASC, DESC",
                s
            )),
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single-key sort with a fixed identifier tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Total order over contacts.
    ///
    /// Compares the sort key byte-wise in the requested direction, then the
    /// identifier ascending regardless of direction.
    pub fn compare(&self, a: &Contact, b: &Contact) -> Ordering {
        let by_field = self.field.key(a).cmp(&self.field.key(b));
        let by_field = match self.direction {
            SortDirection::Asc => by_field,
            SortDirection::Desc => by_field.reverse(),
        };
        by_field.then_with(|| a.id.cmp(&b.id))
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::new(SortField::FirstName, SortDirection::Asc)
    }
}

/// Zero-based page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: usize,
    pub size: usize,
    pub sort: Sort,
}

impl PageRequest {
    pub fn new(page: usize, size: usize, sort: Sort) -> Self {
        Self { page, size, sort }
    }

    /// Index of the first element on this page, saturating on overflow.
    pub fn offset(&self) -> usize {
        self.page.saturating_mul(self.size)
    }
}

/// One page of an ordered result set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    /// Elements on this page
    pub content: Vec<T>,

    /// Number of elements across all pages
    pub total_elements: u64,
}

impl<T> Page<T> {
    pub fn new(content: Vec<T>, total_elements: u64) -> Self {
        Self {
            content,
            total_elements,
        }
    }

    /// Number of pages needed to hold every element at the given size.
    pub fn total_pages(&self, size: usize) -> u64 {
        if size == 0 {
            return 0;
        }
        self.total_elements.div_ceil(size as u64)
    }
}
