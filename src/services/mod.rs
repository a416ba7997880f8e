//! Business logic services

pub mod authors;

use std::sync::Arc;

use crate::repository::CatalogStore;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub authors: authors::AuthorsService,
    store: Arc<dyn CatalogStore>,
}

impl Services {
    /// Create all services on top of the given store
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self {
            authors: authors::AuthorsService::new(store.clone()),
            store,
        }
    }

    /// Direct access to the store, for readiness checks and seeding
    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }
}
