use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Display;

use crate::error::AppResult;

/// Keys of the persistent local store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Liked,
    WatchLater,
    Profiles,
    ActiveProfile,
    Theme,
    /// Single-profile record superseded by `Profiles`
    LegacyUserProfile,
}

impl StoreKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            StoreKey::Liked => "likedMovies",
            StoreKey::WatchLater => "watchLater",
            StoreKey::Profiles => "profiles",
            StoreKey::ActiveProfile => "activeProfile",
            StoreKey::Theme => "theme",
            StoreKey::LegacyUserProfile => "userProfile",
        }
    }
}

impl Display for StoreKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// String-keyed durable storage scoped to this device
///
/// Values are opaque strings; callers decide the encoding. Implementations
/// return `Ok(None)` for a key that was never written.
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync {
    async fn get(&self, key: StoreKey) -> AppResult<Option<String>>;

    /// Overwrites the whole value stored under `key`
    async fn set(&self, key: StoreKey, value: String) -> AppResult<()>;

    /// Backend name for logging
    fn name(&self) -> &'static str;
}

/// Reads a JSON value, degrading to `T::default()` when the key is missing,
/// unreadable, or does not parse.
pub async fn load_json_or_default<T>(store: &dyn KeyValueStore, key: StoreKey) -> T
where
    T: DeserializeOwned + Default,
{
    let raw = match store.get(key).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return T::default(),
        Err(e) => {
            tracing::warn!(key = %key, store = store.name(), error = %e, "Store read failed, using empty default");
            return T::default();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(key = %key, store = store.name(), error = %e, "Stored value is not valid JSON, using empty default");
            T::default()
        }
    }
}

/// Serializes `value` as JSON and overwrites `key`
pub async fn save_json<T>(store: &dyn KeyValueStore, key: StoreKey, value: &T) -> AppResult<()>
where
    T: Serialize + ?Sized,
{
    let json = serde_json::to_string(value)?;
    store.set(key, json).await?;
    tracing::debug!(key = %key, store = store.name(), "Persisted value");
    Ok(())
}
