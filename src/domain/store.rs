//! Record store contract
//!
//! Every entity lives in its own named collection. The accessor is
//! deliberately narrow: reads always return the whole collection and all
//! filtering, sorting and aggregation happens in memory on the caller's
//! side. Implementations live in the infrastructure layer.

use async_trait::async_trait;

use super::DomainError;

/// A record persisted in a named collection.
pub trait Record: Clone + Send + Sync {
    /// Collection (table) name the record lives in.
    const COLLECTION: &'static str;
}

/// Generic create/read/update/delete accessor for one collection.
#[async_trait]
pub trait RecordStore<R: Record>: Send + Sync {
    /// Returns the full, unfiltered collection.
    async fn list(&self) -> Result<Vec<R>, DomainError>;

    /// Persists a new record; the store assigns the id and returns it.
    /// Any id carried by `fields` is ignored.
    async fn create(&self, fields: R) -> Result<String, DomainError>;

    /// Full replace of the stored record.
    async fn update(&self, id: &str, fields: R) -> Result<(), DomainError>;

    /// Deletes a record by id.
    async fn remove(&self, id: &str) -> Result<(), DomainError>;
}
