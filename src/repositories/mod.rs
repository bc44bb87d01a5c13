mod memory_contact_repository;
#[cfg(feature = "postgres")]
mod postgres_contact_repository;
mod traits;

pub use memory_contact_repository::InMemoryContactRepository;
#[cfg(feature = "postgres")]
pub use postgres_contact_repository::PostgresContactRepository;
pub use traits::ContactRepository;
