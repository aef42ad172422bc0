use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel the catalog uses for "no value"
pub const PLACEHOLDER: &str = "N/A";

/// Normalizes catalog placeholders (`"N/A"`, blank) to `None`
pub fn non_placeholder(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        if trimmed.is_empty() || trimmed == PLACEHOLDER {
            None
        } else {
            Some(v)
        }
    })
}

fn deserialize_placeholder<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(non_placeholder(raw))
}

/// Kind of catalog entry, as reported by the catalog's `Type` field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TitleKind {
    Movie,
    Series,
    Episode,
    Game,
}

impl TitleKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TitleKind::Movie => "movie",
            TitleKind::Series => "series",
            TitleKind::Episode => "episode",
            TitleKind::Game => "game",
        }
    }
}

/// Lightweight reference to a catalog item, as kept in the liked and
/// watch-later collections.
///
/// Field names follow the catalog's casing so collections written by the
/// browser front end load unchanged.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRef {
    #[serde(rename = "imdbID", alias = "id", default)]
    pub id: String,
    #[serde(rename = "Title", alias = "title", default)]
    pub title: String,
    #[serde(
        rename = "Poster",
        alias = "poster",
        alias = "posterUrl",
        default,
        deserialize_with = "deserialize_placeholder"
    )]
    pub poster_url: Option<String>,
    #[serde(rename = "Year", alias = "year", default)]
    pub year: String,
}

impl MovieRef {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            poster_url: None,
            year: String::new(),
        }
    }

    /// Two references are the same title when their ids match
    pub fn same_title(&self, other: &MovieRef) -> bool {
        self.id == other.id
    }
}

/// One entry of a multi-result catalog search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: String,
    pub title: String,
    pub year: String,
    pub poster: Option<String>,
    pub kind: Option<TitleKind>,
}

impl MovieSummary {
    pub fn has_poster(&self) -> bool {
        self.poster.is_some()
    }
}

impl From<MovieSummary> for MovieRef {
    fn from(summary: MovieSummary) -> Self {
        MovieRef {
            id: summary.id,
            title: summary.title,
            poster_url: summary.poster,
            year: summary.year,
        }
    }
}

/// Extended record for a single title
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MovieDetail {
    pub id: String,
    pub title: String,
    pub year: Option<String>,
    pub poster: Option<String>,
    pub plot: Option<String>,
    pub runtime: Option<String>,
    pub rated: Option<String>,
    pub genre: Option<String>,
    pub director: Option<String>,
    pub language: Option<String>,
    pub awards: Option<String>,
    pub imdb_rating: Option<String>,
}

impl MovieDetail {
    /// First entry of the comma-separated genre list
    pub fn primary_genre(&self) -> Option<&str> {
        self.genre
            .as_deref()
            .and_then(|g| g.split(',').next())
            .map(str::trim)
            .filter(|g| !g.is_empty())
    }
}

/// Outcome of looking a title up by identifier
#[derive(Debug, Clone, PartialEq)]
pub enum MovieLookup {
    Found(MovieDetail),
    /// The catalog answered and has no such title
    NotFound,
    /// The catalog could not be reached or its answer could not be read
    Unavailable,
}

impl MovieLookup {
    pub fn into_option(self) -> Option<MovieDetail> {
        match self {
            MovieLookup::Found(detail) => Some(detail),
            MovieLookup::NotFound | MovieLookup::Unavailable => None,
        }
    }
}
