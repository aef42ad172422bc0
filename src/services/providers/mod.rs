//! Movie catalog provider abstraction
//!
//! The catalog is an external collaborator: something that answers title
//! searches and identifier lookups. `OmdbProvider` talks to the OMDb REST API;
//! tests substitute their own implementations.
use crate::{
    error::AppResult,
    models::{MovieLookup, MovieSummary, TitleKind},
};

pub mod omdb;

pub use omdb::OmdbProvider;

/// Trait for movie catalog providers
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait CatalogApi: Send + Sync {
    /// Search titles by free-text term, optionally restricted to one kind.
    ///
    /// A catalog-reported "no match" is an empty list, not an error.
    async fn search(&self, term: &str, kind: Option<TitleKind>) -> AppResult<Vec<MovieSummary>>;

    /// Look a single title up by its catalog identifier
    async fn lookup(&self, id: &str) -> AppResult<MovieLookup>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
