use std::sync::Arc;

use tokio::sync::RwLock;

use crate::db::KeyValueStore;
use crate::services::{
    providers::CatalogApi, CatalogService, ListManager, ProfileManager, ViewHandle,
};

/// Shared application state, injected into every handler
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogService,
    pub store: Arc<dyn KeyValueStore>,
    pub lists: Arc<RwLock<ListManager>>,
    pub profiles: Arc<RwLock<ProfileManager>>,
    /// Sequencing for the search-results view
    pub search_view: Arc<ViewHandle>,
}

impl AppState {
    /// Builds the state, seeding the managers from `store`
    pub async fn new(api: Arc<dyn CatalogApi>, store: Arc<dyn KeyValueStore>) -> Self {
        let lists = ListManager::load(store.clone()).await;
        let profiles = ProfileManager::load(store.clone()).await;

        Self {
            catalog: CatalogService::new(api),
            store,
            lists: Arc::new(RwLock::new(lists)),
            profiles: Arc::new(RwLock::new(profiles)),
            search_view: Arc::new(ViewHandle::new("search")),
        }
    }
}
