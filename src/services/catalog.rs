use futures::future::join_all;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::HashSet;
use std::sync::Arc;

use crate::{
    models::{MovieDetail, MovieLookup, MovieSummary, TitleKind},
    services::{providers::CatalogApi, view::ViewHandle},
};

/// Category searches that feed the landing pool
pub const LANDING_SEEDS: [&str; 5] = ["movie", "action", "drama", "thriller", "series"];

/// Maximum number of "more like this" entries
pub const SIMILAR_LIMIT: usize = 8;

const HERO_COUNT: usize = 5;

/// Landing rows as `(title, start, end)` slices of the shuffled pool
const LANDING_ROWS: [(&str, usize, usize); 3] = [
    ("Trending Movies", 5, 20),
    ("Popular Picks", 20, 35),
    ("Action & Thriller", 35, 55),
];

/// Genres whose search works better through a representative title
const GENRE_KEYWORDS: [(&str, &str); 5] = [
    ("action", "Avengers"),
    ("comedy", "Friends"),
    ("drama", "Breaking Bad"),
    ("sci-fi", "Interstellar"),
    ("romance", "The Notebook"),
];

/// Fixed browse pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Movies,
    Series,
    Trending,
}

impl Section {
    fn query(&self) -> (&'static str, Option<TitleKind>) {
        match self {
            Section::Movies => ("movie", Some(TitleKind::Movie)),
            Section::Series => ("series", Some(TitleKind::Series)),
            Section::Trending => ("trending", None),
        }
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CatalogRow {
    pub title: String,
    pub movies: Vec<MovieSummary>,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct LandingPage {
    pub hero: Vec<MovieSummary>,
    pub rows: Vec<CatalogRow>,
}

/// Detail view body. When the catalog is unreachable the page is empty and
/// `unavailable` is set.
#[derive(Debug, Clone, Serialize)]
pub struct MovieDetailPage {
    pub movie: Option<MovieDetail>,
    pub similar: Vec<MovieSummary>,
    pub trailer_url: Option<String>,
    pub unavailable: bool,
}

impl MovieDetailPage {
    fn empty() -> Self {
        Self {
            movie: None,
            similar: Vec::new(),
            trailer_url: None,
            unavailable: true,
        }
    }
}

/// Read-side facade over the catalog provider.
///
/// Searches never fail from the caller's point of view: transport and parse
/// errors are logged and produce an empty list.
#[derive(Clone)]
pub struct CatalogService {
    api: Arc<dyn CatalogApi>,
}

impl CatalogService {
    pub fn new(api: Arc<dyn CatalogApi>) -> Self {
        Self { api }
    }

    pub async fn search_by_term(&self, term: &str) -> Vec<MovieSummary> {
        self.search_kind(term, None).await
    }

    async fn search_kind(&self, term: &str, kind: Option<TitleKind>) -> Vec<MovieSummary> {
        let term = term.trim();
        if term.is_empty() {
            return Vec::new();
        }

        match self.api.search(term, kind).await {
            Ok(titles) => titles,
            Err(e) => {
                tracing::warn!(term = %term, kind = ?kind, error = %e, "Catalog search failed");
                Vec::new()
            }
        }
    }

    /// Movie-only search on behalf of `view`; `None` when a newer request from
    /// the same view was issued meanwhile or the view has been unmounted.
    pub async fn search_for_view(&self, view: &ViewHandle, term: &str) -> Option<Vec<MovieSummary>> {
        let ticket = view.begin();
        let results = self.search_kind(term, Some(TitleKind::Movie)).await;

        if view.accepts(ticket) {
            Some(results)
        } else {
            tracing::debug!(view = view.name(), term = %term, "Discarding stale search response");
            None
        }
    }

    /// Looks a title up; a blank id is `NotFound` without a catalog call.
    /// Transport and parse failures are logged and reported as `Unavailable`.
    pub async fn fetch_by_id(&self, id: &str) -> MovieLookup {
        let id = id.trim();
        if id.is_empty() {
            return MovieLookup::NotFound;
        }

        match self.api.lookup(id).await {
            Ok(lookup) => lookup,
            Err(e) => {
                tracing::warn!(id = %id, error = %e, "Catalog lookup failed");
                MovieLookup::Unavailable
            }
        }
    }

    /// "More like this" for a primary genre; best-effort
    pub async fn fetch_similar(&self, primary_genre: &str) -> Vec<MovieSummary> {
        let mut similar = self.search_by_term(primary_genre).await;
        similar.truncate(SIMILAR_LIMIT);
        similar
    }

    /// Detail record plus similar titles; `None` when the id does not resolve.
    /// An unreachable catalog yields an empty page rather than an error.
    pub async fn movie_page(&self, id: &str) -> Option<MovieDetailPage> {
        let movie = match self.fetch_by_id(id).await {
            MovieLookup::Found(movie) => movie,
            MovieLookup::NotFound => return None,
            MovieLookup::Unavailable => return Some(MovieDetailPage::empty()),
        };

        let similar = match movie.primary_genre() {
            Some(genre) => self.fetch_similar(genre).await,
            None => Vec::new(),
        };
        let trailer_url = trailer_search_url(&movie.title);

        Some(MovieDetailPage {
            movie: Some(movie),
            similar,
            trailer_url: Some(trailer_url),
            unavailable: false,
        })
    }

    /// Fans out the seed searches, merges and shuffles the pool, and slices
    /// it into the hero strip and rows.
    ///
    /// A failing seed only contributes an empty batch.
    pub async fn landing(&self) -> LandingPage {
        let batches = join_all(
            LANDING_SEEDS
                .iter()
                .map(|seed| self.search_kind(seed, Some(TitleKind::Movie))),
        )
        .await;

        let empty_batches = batches.iter().filter(|b| b.is_empty()).count();
        let mut pool = merge_batches(batches);
        pool.shuffle(&mut rand::thread_rng());

        tracing::info!(
            pool = pool.len(),
            empty_batches = empty_batches,
            "Landing pool assembled"
        );

        compose_landing(pool)
    }

    pub async fn browse(&self, section: Section) -> Vec<MovieSummary> {
        let (term, kind) = section.query();
        self.search_kind(term, kind).await
    }

    /// Genre page listing; a non-blank `query` searches within the page instead
    pub async fn browse_genre(&self, genre: &str, query: Option<&str>) -> Vec<MovieSummary> {
        match query.map(str::trim).filter(|q| !q.is_empty()) {
            Some(query) => self.search_by_term(query).await,
            None => self.search_by_term(&genre_keyword(genre)).await,
        }
    }
}

/// Merges search batches into one display pool: entries without a poster are
/// dropped, then duplicates by id keep their first occurrence.
pub fn merge_batches(batches: Vec<Vec<MovieSummary>>) -> Vec<MovieSummary> {
    let mut seen = HashSet::new();
    batches
        .into_iter()
        .flatten()
        .filter(MovieSummary::has_poster)
        .filter(|m| seen.insert(m.id.clone()))
        .collect()
}

/// Slices a (shuffled) pool into the landing layout; short pools give short rows
pub fn compose_landing(pool: Vec<MovieSummary>) -> LandingPage {
    let slice = |start: usize, end: usize| -> Vec<MovieSummary> {
        let end = end.min(pool.len());
        let start = start.min(end);
        pool[start..end].to_vec()
    };

    LandingPage {
        hero: slice(0, HERO_COUNT),
        rows: LANDING_ROWS
            .iter()
            .map(|(title, start, end)| CatalogRow {
                title: title.to_string(),
                movies: slice(*start, *end),
            })
            .collect(),
    }
}

/// Search term used for a genre page
pub fn genre_keyword(genre: &str) -> String {
    let normalized = genre.trim().to_lowercase();
    GENRE_KEYWORDS
        .iter()
        .find(|(g, _)| *g == normalized)
        .map(|(_, keyword)| keyword.to_string())
        .unwrap_or_else(|| genre.trim().to_string())
}

pub fn trailer_search_url(title: &str) -> String {
    format!(
        "https://www.youtube.com/results?search_query={}",
        urlencoding::encode(&format!("{} official trailer", title))
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{AppError, AppResult};
    use crate::services::providers::MockCatalogApi;
    use tokio::sync::Notify;

    fn summary(id: &str) -> MovieSummary {
        MovieSummary {
            id: id.to_string(),
            title: format!("Title {}", id),
            year: "2020".to_string(),
            poster: Some(format!("https://img/{}.jpg", id)),
            kind: Some(TitleKind::Movie),
        }
    }

    fn without_poster(id: &str) -> MovieSummary {
        MovieSummary {
            poster: None,
            ..summary(id)
        }
    }

    fn ids(movies: &[MovieSummary]) -> Vec<&str> {
        movies.iter().map(|m| m.id.as_str()).collect()
    }

    fn service(mock: MockCatalogApi) -> CatalogService {
        CatalogService::new(Arc::new(mock))
    }

    #[tokio::test]
    async fn test_blank_search_makes_no_call() {
        let mut mock = MockCatalogApi::new();
        mock.expect_search().times(0);
        let catalog = service(mock);

        assert!(catalog.search_by_term("").await.is_empty());
        assert!(catalog.search_by_term("   ").await.is_empty());
    }

    #[tokio::test]
    async fn test_search_trims_term() {
        let mut mock = MockCatalogApi::new();
        mock.expect_search()
            .withf(|term, kind| term == "inception" && kind.is_none())
            .times(1)
            .returning(|_, _| Ok(vec![summary("tt1375666")]));
        let catalog = service(mock);

        let results = catalog.search_by_term("  inception ").await;
        assert_eq!(ids(&results), vec!["tt1375666"]);
    }

    #[tokio::test]
    async fn test_search_failure_yields_empty() {
        let mut mock = MockCatalogApi::new();
        mock.expect_search()
            .returning(|_, _| Err(AppError::ExternalApi("boom".to_string())));
        let catalog = service(mock);

        assert!(catalog.search_by_term("matrix").await.is_empty());
    }

    #[test]
    fn test_merge_batches_dedups_by_id() {
        let merged = merge_batches(vec![
            vec![summary("a"), summary("b")],
            vec![summary("b"), summary("c")],
        ]);
        assert_eq!(ids(&merged), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_merge_batches_drops_missing_posters_before_dedup() {
        let merged = merge_batches(vec![
            vec![without_poster("a"), summary("b")],
            vec![summary("a")],
        ]);
        assert_eq!(ids(&merged), vec!["b", "a"]);
    }

    #[test]
    fn test_compose_landing_full_pool() {
        let pool: Vec<MovieSummary> = (0..60).map(|i| summary(&i.to_string())).collect();
        let page = compose_landing(pool);

        assert_eq!(page.hero.len(), 5);
        assert_eq!(page.rows.len(), 3);
        assert_eq!(page.rows[0].title, "Trending Movies");
        assert_eq!(page.rows[0].movies.len(), 15);
        assert_eq!(page.rows[0].movies[0].id, "5");
        assert_eq!(page.rows[1].movies.len(), 15);
        assert_eq!(page.rows[2].title, "Action & Thriller");
        assert_eq!(page.rows[2].movies.len(), 20);
    }

    #[test]
    fn test_compose_landing_short_pool() {
        let pool: Vec<MovieSummary> = (0..7).map(|i| summary(&i.to_string())).collect();
        let page = compose_landing(pool);

        assert_eq!(page.hero.len(), 5);
        assert_eq!(page.rows[0].movies.len(), 2);
        assert!(page.rows[1].movies.is_empty());
        assert!(page.rows[2].movies.is_empty());
    }

    #[tokio::test]
    async fn test_landing_isolates_failing_seed() {
        let mut mock = MockCatalogApi::new();
        mock.expect_search()
            .times(LANDING_SEEDS.len())
            .returning(|term, kind| {
                assert_eq!(kind, Some(TitleKind::Movie));
                if term == "action" {
                    Err(AppError::ExternalApi("timeout".to_string()))
                } else {
                    Ok(vec![summary(&format!("{}-1", term)), summary("shared")])
                }
            });
        let catalog = service(mock);

        let page = catalog.landing().await;
        let mut all: Vec<&str> = page
            .hero
            .iter()
            .chain(page.rows.iter().flat_map(|r| r.movies.iter()))
            .map(|m| m.id.as_str())
            .collect();
        all.sort();

        assert_eq!(
            all,
            vec!["drama-1", "movie-1", "series-1", "shared", "thriller-1"]
        );
    }

    #[tokio::test]
    async fn test_fetch_by_id_not_found() {
        let mut mock = MockCatalogApi::new();
        mock.expect_lookup()
            .withf(|id| id == "tt0000000")
            .returning(|_| Ok(MovieLookup::NotFound));
        let catalog = service(mock);

        let lookup = catalog.fetch_by_id("tt0000000").await;
        assert_eq!(lookup, MovieLookup::NotFound);
        assert!(catalog.movie_page("tt0000000").await.is_none());
    }

    #[tokio::test]
    async fn test_fetch_by_blank_id_makes_no_call() {
        let mut mock = MockCatalogApi::new();
        mock.expect_lookup().times(0);
        let catalog = service(mock);

        assert_eq!(catalog.fetch_by_id(" ").await, MovieLookup::NotFound);
    }

    #[tokio::test]
    async fn test_fetch_similar_caps_results() {
        let mut mock = MockCatalogApi::new();
        mock.expect_search()
            .withf(|term, _| term == "Action")
            .returning(|_, _| Ok((0..10).map(|i| summary(&i.to_string())).collect()));
        let catalog = service(mock);

        assert_eq!(catalog.fetch_similar("Action").await.len(), SIMILAR_LIMIT);
    }

    #[tokio::test]
    async fn test_movie_page_includes_similar_and_trailer() {
        let mut mock = MockCatalogApi::new();
        mock.expect_lookup().returning(|_| {
            Ok(MovieLookup::Found(MovieDetail {
                id: "tt1375666".to_string(),
                title: "Inception".to_string(),
                genre: Some("Action, Sci-Fi".to_string()),
                ..Default::default()
            }))
        });
        mock.expect_search()
            .withf(|term, _| term == "Action")
            .returning(|_, _| Ok(vec![summary("tt0848228")]));
        let catalog = service(mock);

        let page = catalog.movie_page("tt1375666").await.unwrap();
        assert!(!page.unavailable);
        assert_eq!(page.movie.unwrap().title, "Inception");
        assert_eq!(ids(&page.similar), vec!["tt0848228"]);
        assert_eq!(
            page.trailer_url.as_deref(),
            Some("https://www.youtube.com/results?search_query=Inception%20official%20trailer")
        );
    }

    #[tokio::test]
    async fn test_movie_page_without_genre_skips_similar() {
        let mut mock = MockCatalogApi::new();
        mock.expect_lookup().returning(|_| {
            Ok(MovieLookup::Found(MovieDetail {
                id: "tt1".to_string(),
                title: "Sparse".to_string(),
                ..Default::default()
            }))
        });
        mock.expect_search().times(0);
        let catalog = service(mock);

        let page = catalog.movie_page("tt1").await.unwrap();
        assert!(page.similar.is_empty());
    }

    #[tokio::test]
    async fn test_browse_sections() {
        let mut mock = MockCatalogApi::new();
        mock.expect_search()
            .withf(|term, kind| term == "series" && *kind == Some(TitleKind::Series))
            .times(1)
            .returning(|_, _| Ok(vec![summary("tt0903747")]));
        let catalog = service(mock);

        assert_eq!(ids(&catalog.browse(Section::Series).await), vec!["tt0903747"]);
    }

    #[tokio::test]
    async fn test_browse_genre_prefers_query() {
        let mut mock = MockCatalogApi::new();
        mock.expect_search()
            .withf(|term, _| term == "Iron Man")
            .times(1)
            .returning(|_, _| Ok(vec![summary("tt0371746")]));
        let catalog = service(mock);

        let results = catalog.browse_genre("action", Some(" Iron Man ")).await;
        assert_eq!(ids(&results), vec!["tt0371746"]);
    }

    #[test]
    fn test_genre_keyword() {
        assert_eq!(genre_keyword("Action"), "Avengers");
        assert_eq!(genre_keyword("sci-fi"), "Interstellar");
        assert_eq!(genre_keyword("horror"), "horror");
    }

    #[tokio::test]
    async fn test_lookup_failure_degrades_to_empty_page() {
        let mut mock = MockCatalogApi::new();
        mock.expect_lookup()
            .returning(|_| Err(AppError::ExternalApi("connection reset".to_string())));
        mock.expect_search().times(0);
        let catalog = service(mock);

        assert_eq!(catalog.fetch_by_id("tt1375666").await, MovieLookup::Unavailable);

        let page = catalog.movie_page("tt1375666").await.unwrap();
        assert!(page.unavailable);
        assert!(page.movie.is_none());
        assert!(page.similar.is_empty());
        assert!(page.trailer_url.is_none());
    }

    /// Holds searches for "slow" until released
    struct GatedCatalog {
        gate: Arc<Notify>,
    }

    #[async_trait::async_trait]
    impl CatalogApi for GatedCatalog {
        async fn search(&self, term: &str, _kind: Option<TitleKind>) -> AppResult<Vec<MovieSummary>> {
            if term == "slow" {
                self.gate.notified().await;
            }
            Ok(vec![summary(term)])
        }

        async fn lookup(&self, _id: &str) -> AppResult<MovieLookup> {
            Ok(MovieLookup::NotFound)
        }

        fn name(&self) -> &'static str {
            "gated"
        }
    }

    #[tokio::test]
    async fn test_search_for_view_discards_overtaken_response() {
        let gate = Arc::new(Notify::new());
        let catalog = CatalogService::new(Arc::new(GatedCatalog { gate: gate.clone() }));
        let view = ViewHandle::new("search");

        let slow = catalog.search_for_view(&view, "slow");
        let fast = async {
            let results = catalog.search_for_view(&view, "fast").await;
            gate.notify_one();
            results
        };
        let (slow, fast) = tokio::join!(slow, fast);

        assert!(slow.is_none());
        assert_eq!(fast.map(|r| ids(&r).join(",")), Some("fast".to_string()));
    }

    #[tokio::test]
    async fn test_search_for_view_restricts_to_movies() {
        let mut mock = MockCatalogApi::new();
        mock.expect_search()
            .withf(|term, kind| term == "alien" && *kind == Some(TitleKind::Movie))
            .times(1)
            .returning(|_, _| Ok(vec![summary("tt0078748")]));
        let catalog = service(mock);
        let view = ViewHandle::new("search");

        let results = catalog.search_for_view(&view, "alien").await;
        assert_eq!(results.map(|r| r.len()), Some(1));
    }

    #[tokio::test]
    async fn test_search_for_unmounted_view_is_discarded() {
        let mut mock = MockCatalogApi::new();
        mock.expect_search()
            .returning(|_, _| Ok(vec![summary("tt1")]));
        let catalog = service(mock);
        let view = ViewHandle::new("search");
        view.unmount();

        assert!(catalog.search_for_view(&view, "alien").await.is_none());
    }
}
