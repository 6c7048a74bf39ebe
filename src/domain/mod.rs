//! Domain layer - business types and contracts
//!
//! Framework-agnostic: no axum or SeaORM types leak out of here beyond the
//! error conversion.

pub mod context;
pub mod errors;
pub mod store;

pub use context::ReportContext;
pub use errors::DomainError;
pub use store::{Record, RecordStore};
