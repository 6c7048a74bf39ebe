//! Application state containing the per-collection stores

use sea_orm::DatabaseConnection;
use std::sync::Arc;

use crate::domain::RecordStore;
use crate::infrastructure::SqlRecordStore;
use crate::models::{account, post, product, sale, talent};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Database connection (auth handlers query users directly)
    db: DatabaseConnection,
    pub talents: Arc<dyn RecordStore<talent::Model>>,
    pub accounts: Arc<dyn RecordStore<account::Model>>,
    pub products: Arc<dyn RecordStore<product::Model>>,
    pub posts: Arc<dyn RecordStore<post::Model>>,
    pub sales: Arc<dyn RecordStore<sale::Model>>,
}

impl AppState {
    /// Create a new AppState with one store handle per collection
    pub fn new(db: DatabaseConnection) -> Self {
        let store = SqlRecordStore::new(db.clone());

        Self {
            db,
            talents: Arc::new(store.clone()),
            accounts: Arc::new(store.clone()),
            products: Arc::new(store.clone()),
            posts: Arc::new(store.clone()),
            sales: Arc::new(store),
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.db
    }
}

// Allow handlers to extract the bare DatabaseConnection from AppState
impl axum::extract::FromRef<AppState> for DatabaseConnection {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}
