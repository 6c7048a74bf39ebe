//! Services Layer
//!
//! Pure business logic extracted from HTTP handlers: the in-memory filter
//! and aggregation engines, the bulk-entry cart, and the write-time
//! snapshotting rules for posts and sales.

pub mod cart;
pub mod filter;
pub mod post_service;
pub mod report;
pub mod sale_service;
