use serde::Deserialize;

pub mod movie;
pub mod preferences;
pub mod profile;

pub use movie::{non_placeholder, MovieDetail, MovieLookup, MovieRef, MovieSummary, TitleKind};
pub use preferences::Theme;
pub use profile::{LegacyUserProfile, Profile, ProfileId};

// ============================================================================
// OMDb API Types
// ============================================================================

/// One element of the `Search` array
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchItem {
    #[serde(rename = "imdbID", default)]
    pub imdb_id: String,
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Year", default)]
    pub year: String,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Type", default)]
    pub title_type: Option<String>,
}

/// Multi-result search payload
///
/// A "no match" is reported as `Response: "False"` with no `Search` field.
#[derive(Debug, Clone, Deserialize)]
pub struct OmdbSearchResponse {
    #[serde(rename = "Search", default)]
    pub search: Option<Vec<OmdbSearchItem>>,
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

/// Flat single-title payload from a lookup by identifier
#[derive(Debug, Clone, Deserialize, Default)]
pub struct OmdbRecord {
    #[serde(rename = "imdbID", default)]
    pub imdb_id: Option<String>,
    #[serde(rename = "Title", default)]
    pub title: Option<String>,
    #[serde(rename = "Year", default)]
    pub year: Option<String>,
    #[serde(rename = "Poster", default)]
    pub poster: Option<String>,
    #[serde(rename = "Plot", default)]
    pub plot: Option<String>,
    #[serde(rename = "Runtime", default)]
    pub runtime: Option<String>,
    #[serde(rename = "Rated", default)]
    pub rated: Option<String>,
    #[serde(rename = "Genre", default)]
    pub genre: Option<String>,
    #[serde(rename = "Director", default)]
    pub director: Option<String>,
    #[serde(rename = "Language", default)]
    pub language: Option<String>,
    #[serde(rename = "Awards", default)]
    pub awards: Option<String>,
    #[serde(rename = "imdbRating", default)]
    pub imdb_rating: Option<String>,
    #[serde(rename = "Response", default)]
    pub response: Option<String>,
    #[serde(rename = "Error", default)]
    pub error: Option<String>,
}

/// `Response` is the string `"True"` or `"False"`
pub fn is_success_flag(response: Option<&str>) -> bool {
    response
        .map(|r| r.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn parse_title_kind(raw: &str) -> Option<TitleKind> {
    match raw.to_lowercase().as_str() {
        "movie" => Some(TitleKind::Movie),
        "series" => Some(TitleKind::Series),
        "episode" => Some(TitleKind::Episode),
        "game" => Some(TitleKind::Game),
        _ => None,
    }
}

impl From<OmdbSearchItem> for MovieSummary {
    fn from(item: OmdbSearchItem) -> Self {
        MovieSummary {
            id: item.imdb_id,
            title: item.title,
            year: item.year,
            poster: non_placeholder(item.poster),
            kind: item.title_type.as_deref().and_then(parse_title_kind),
        }
    }
}

impl OmdbRecord {
    /// Converts a successful payload; `None` when the record carries no identifier
    pub fn into_detail(self) -> Option<MovieDetail> {
        let id = non_placeholder(self.imdb_id)?;

        Some(MovieDetail {
            id,
            title: non_placeholder(self.title).unwrap_or_default(),
            year: non_placeholder(self.year),
            poster: non_placeholder(self.poster),
            plot: non_placeholder(self.plot),
            runtime: non_placeholder(self.runtime),
            rated: non_placeholder(self.rated),
            genre: non_placeholder(self.genre),
            director: non_placeholder(self.director),
            language: non_placeholder(self.language),
            awards: non_placeholder(self.awards),
            imdb_rating: non_placeholder(self.imdb_rating),
        })
    }
}
