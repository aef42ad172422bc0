use serde::Serialize;
use std::sync::Arc;

use crate::{
    db::{load_json_or_default, save_json, KeyValueStore, StoreKey},
    error::{AppError, AppResult},
    models::MovieRef,
};

/// The two user-curated collections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ListKind {
    Liked,
    WatchLater,
}

impl ListKind {
    fn store_key(&self) -> StoreKey {
        match self {
            ListKind::Liked => StoreKey::Liked,
            ListKind::WatchLater => StoreKey::WatchLater,
        }
    }

    /// Notice a front end shows after a successful add
    pub fn added_notice(&self) -> &'static str {
        match self {
            ListKind::Liked => "Added to Liked Movies",
            ListKind::WatchLater => "Added to Watch Later",
        }
    }
}

/// Result of an add intent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddOutcome {
    Added,
    /// A reference with the same id is already in the collection
    AlreadyPresent,
}

/// Owns the liked and watch-later collections and their durable mirror
pub struct ListManager {
    store: Arc<dyn KeyValueStore>,
    liked: Vec<MovieRef>,
    watch_later: Vec<MovieRef>,
}

impl ListManager {
    /// Seeds both collections from the store; unreadable values start empty
    pub async fn load(store: Arc<dyn KeyValueStore>) -> Self {
        let liked: Vec<MovieRef> = load_json_or_default(store.as_ref(), StoreKey::Liked).await;
        let watch_later: Vec<MovieRef> =
            load_json_or_default(store.as_ref(), StoreKey::WatchLater).await;

        tracing::info!(
            liked = liked.len(),
            watch_later = watch_later.len(),
            "Loaded movie lists"
        );

        Self {
            store,
            liked,
            watch_later,
        }
    }

    pub fn liked(&self) -> &[MovieRef] {
        &self.liked
    }

    pub fn watch_later(&self) -> &[MovieRef] {
        &self.watch_later
    }

    pub fn list(&self, kind: ListKind) -> &[MovieRef] {
        match kind {
            ListKind::Liked => &self.liked,
            ListKind::WatchLater => &self.watch_later,
        }
    }

    pub async fn add_to_liked(&mut self, movie: MovieRef) -> AppResult<AddOutcome> {
        self.add(ListKind::Liked, movie).await
    }

    pub async fn add_to_watch_later(&mut self, movie: MovieRef) -> AppResult<AddOutcome> {
        self.add(ListKind::WatchLater, movie).await
    }

    /// Appends `movie` unless its id is already present.
    ///
    /// The updated collection is written to the store before the in-memory
    /// copy changes; if the write fails the collection is left as it was.
    pub async fn add(&mut self, kind: ListKind, movie: MovieRef) -> AppResult<AddOutcome> {
        if movie.id.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Movie reference must have an id".to_string(),
            ));
        }

        let current = self.list(kind);
        if current.iter().any(|m| m.same_title(&movie)) {
            tracing::debug!(list = ?kind, id = %movie.id, "Movie already in list");
            return Ok(AddOutcome::AlreadyPresent);
        }

        let mut updated = current.to_vec();
        let id = movie.id.clone();
        updated.push(movie);

        save_json(self.store.as_ref(), kind.store_key(), &updated).await?;

        let len = updated.len();
        match kind {
            ListKind::Liked => self.liked = updated,
            ListKind::WatchLater => self.watch_later = updated,
        }

        tracing::info!(list = ?kind, id = %id, size = len, "Movie added to list");

        Ok(AddOutcome::Added)
    }
}
