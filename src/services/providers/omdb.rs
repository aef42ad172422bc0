//! OMDb API provider
//!
//! Both operations hit the same endpoint:
//! 1. Search: `/?s=<term>[&type=movie|series]` → `{ Search: [...] }`
//! 2. Lookup: `/?i=<imdb id>&plot=full` → flat record
//!
//! Failures are reported in-band with `Response: "False"` and an `Error`
//! message; "no match" messages are not errors.
use crate::{
    error::{AppError, AppResult},
    models::{
        is_success_flag, MovieLookup, MovieSummary, OmdbRecord, OmdbSearchResponse, TitleKind,
    },
    services::providers::CatalogApi,
};
use reqwest::Client as HttpClient;

const SEARCH_PAGE: &str = "1";

/// Error messages that mean "nothing matched" rather than a failure
const NO_MATCH_MESSAGES: &[&str] = &["not found", "incorrect imdb id", "too many results"];

#[derive(Clone)]
pub struct OmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl OmdbProvider {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/", self.api_url)
    }

    async fn get(&self, params: &[(&str, &str)]) -> AppResult<reqwest::Response> {
        let response = self
            .http_client
            .get(self.endpoint())
            .query(&[("apikey", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "OMDb API returned status {}: {}",
                status, body
            )));
        }

        Ok(response)
    }
}

fn is_no_match(error: Option<&str>) -> bool {
    let Some(message) = error else {
        return true;
    };
    let message = message.to_lowercase();
    NO_MATCH_MESSAGES.iter().any(|m| message.contains(m))
}

/// Maps a search payload to summaries; an in-band "no match" is an empty list
pub(crate) fn interpret_search(payload: OmdbSearchResponse) -> AppResult<Vec<MovieSummary>> {
    if let Some(items) = payload.search {
        return Ok(items.into_iter().map(MovieSummary::from).collect());
    }

    if is_success_flag(payload.response.as_deref()) || is_no_match(payload.error.as_deref()) {
        return Ok(Vec::new());
    }

    Err(AppError::ExternalApi(
        payload
            .error
            .unwrap_or_else(|| "Invalid OMDb search response".to_string()),
    ))
}

/// Maps a lookup payload; in-band "not found" becomes `MovieLookup::NotFound`
pub(crate) fn interpret_lookup(payload: OmdbRecord) -> AppResult<MovieLookup> {
    if !is_success_flag(payload.response.as_deref()) {
        if is_no_match(payload.error.as_deref()) {
            return Ok(MovieLookup::NotFound);
        }
        return Err(AppError::ExternalApi(
            payload
                .error
                .unwrap_or_else(|| "Invalid OMDb lookup response".to_string()),
        ));
    }

    Ok(payload
        .into_detail()
        .map(MovieLookup::Found)
        .unwrap_or(MovieLookup::NotFound))
}

#[async_trait::async_trait]
impl CatalogApi for OmdbProvider {
    async fn search(&self, term: &str, kind: Option<TitleKind>) -> AppResult<Vec<MovieSummary>> {
        let mut params = vec![("s", term), ("page", SEARCH_PAGE)];
        if let Some(kind) = kind {
            params.push(("type", kind.as_str()));
        }

        let response = self.get(&params).await?;
        let payload: OmdbSearchResponse = response.json().await?;
        let titles = interpret_search(payload)?;

        tracing::info!(
            term = %term,
            kind = ?kind,
            results = titles.len(),
            provider = "omdb",
            "Title search completed"
        );

        Ok(titles)
    }

    async fn lookup(&self, id: &str) -> AppResult<MovieLookup> {
        let response = self.get(&[("i", id), ("plot", "full")]).await?;

        let response_text = response.text().await?;
        tracing::debug!(response = %response_text, "Raw OMDb lookup response");

        let payload: OmdbRecord = serde_json::from_str(&response_text).map_err(|e| {
            tracing::error!(
                error = %e,
                response = %response_text,
                "Failed to deserialize OMDb response"
            );
            AppError::ExternalApi(format!("Failed to parse OMDb response: {}", e))
        })?;

        let lookup = interpret_lookup(payload)?;

        tracing::info!(
            id = %id,
            found = matches!(lookup, MovieLookup::Found(_)),
            provider = "omdb",
            "Title lookup completed"
        );

        Ok(lookup)
    }

    fn name(&self) -> &'static str {
        "omdb"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn search_payload(json: &str) -> OmdbSearchResponse {
        serde_json::from_str(json).unwrap()
    }

    fn record_payload(json: &str) -> OmdbRecord {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_new_trims_trailing_slash() {
        let provider = OmdbProvider::new("key".to_string(), "http://test.local/".to_string());
        assert_eq!(provider.endpoint(), "http://test.local/");
    }

    #[test]
    fn test_interpret_search_results() {
        let payload = search_payload(
            r#"{
                "Search": [
                    {"Title":"Avengers: Endgame","Year":"2019","imdbID":"tt4154796","Type":"movie","Poster":"https://img/endgame.jpg"},
                    {"Title":"The Avengers","Year":"2012","imdbID":"tt0848228","Type":"movie","Poster":"N/A"}
                ],
                "totalResults": "2",
                "Response": "True"
            }"#,
        );

        let titles = interpret_search(payload).unwrap();
        assert_eq!(titles.len(), 2);
        assert_eq!(titles[0].id, "tt4154796");
        assert_eq!(titles[1].poster, None);
    }

    #[test]
    fn test_interpret_search_not_found_is_empty() {
        let payload = search_payload(r#"{"Response":"False","Error":"Movie not found!"}"#);
        assert!(interpret_search(payload).unwrap().is_empty());
    }

    #[test]
    fn test_interpret_search_too_many_results_is_empty() {
        let payload = search_payload(r#"{"Response":"False","Error":"Too many results."}"#);
        assert!(interpret_search(payload).unwrap().is_empty());
    }

    #[test]
    fn test_interpret_search_invalid_key_is_error() {
        let payload = search_payload(r#"{"Response":"False","Error":"Invalid API key!"}"#);
        let result = interpret_search(payload);
        assert!(matches!(result, Err(AppError::ExternalApi(msg)) if msg == "Invalid API key!"));
    }

    #[test]
    fn test_interpret_lookup_found() {
        let payload = record_payload(
            r#"{"Title":"Inception","Year":"2010","imdbID":"tt1375666","Genre":"Action, Sci-Fi","Response":"True"}"#,
        );
        match interpret_lookup(payload).unwrap() {
            MovieLookup::Found(detail) => {
                assert_eq!(detail.id, "tt1375666");
                assert_eq!(detail.title, "Inception");
            }
            other => panic!("expected a found record, got {:?}", other),
        }
    }

    #[test]
    fn test_interpret_lookup_incorrect_id_is_not_found() {
        let payload = record_payload(r#"{"Response":"False","Error":"Incorrect IMDb ID."}"#);
        assert_eq!(interpret_lookup(payload).unwrap(), MovieLookup::NotFound);
    }

    #[test]
    fn test_interpret_lookup_sparse_record_is_found() {
        let payload = record_payload(r#"{"imdbID":"tt0000002","Plot":"N/A","Response":"True"}"#);
        let lookup = interpret_lookup(payload).unwrap();
        assert_ne!(lookup, MovieLookup::NotFound);
        let detail = lookup.into_option().unwrap();
        assert_eq!(detail.plot, None);
        assert!(detail.title.is_empty());
    }

    #[test]
    fn test_interpret_lookup_invalid_key_is_error() {
        let payload = record_payload(r#"{"Response":"False","Error":"Invalid API key!"}"#);
        assert!(interpret_lookup(payload).is_err());
    }
}
