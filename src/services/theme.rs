use crate::{
    db::{KeyValueStore, StoreKey},
    error::AppResult,
    models::Theme,
};

/// Stored theme; unreadable or missing values read as light
pub async fn load_theme(store: &dyn KeyValueStore) -> Theme {
    match store.get(StoreKey::Theme).await {
        Ok(Some(raw)) => Theme::from_stored(&raw),
        Ok(None) => Theme::default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read theme, using default");
            Theme::default()
        }
    }
}

/// Stored as the bare string (`dark` / `light`), not JSON
pub async fn save_theme(store: &dyn KeyValueStore, theme: Theme) -> AppResult<()> {
    store.set(StoreKey::Theme, theme.as_str().to_string()).await
}
