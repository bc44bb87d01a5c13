//! Data models for the phonebook service.

pub mod contact;
pub mod page;

pub use contact::{fold_case, Contact, ContactDetails, ContactsResponse};
pub use page::{Page, PageRequest, Sort, SortDirection, SortField};
