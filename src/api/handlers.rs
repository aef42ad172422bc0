use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{MovieRef, MovieSummary, Profile, ProfileId, Theme};
use crate::services::{
    newsletter, theme, AddOutcome, LandingPage, ListKind, MovieDetailPage, Section,
};

use super::AppState;

// Request/Response types

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub results: Vec<MovieSummary>,
    /// A newer search from the same view was issued while this one ran
    pub superseded: bool,
}

#[derive(Debug, Serialize)]
pub struct GenreResponse {
    pub genre: String,
    pub heading: String,
    pub movies: Vec<MovieSummary>,
}

#[derive(Debug, Serialize)]
pub struct ListResponse {
    pub list: ListKind,
    pub movies: Vec<MovieRef>,
}

#[derive(Debug, Serialize)]
pub struct ListAddResponse {
    pub outcome: AddOutcome,
    pub notice: Option<&'static str>,
    pub size: usize,
}

#[derive(Debug, Serialize)]
pub struct ProfilesResponse {
    pub profiles: Vec<Profile>,
    pub active_id: Option<ProfileId>,
    pub active: Option<Profile>,
    pub welcome_name: String,
    pub avatar_initial: char,
}

#[derive(Debug, Deserialize, Serialize)]
pub struct ThemeBody {
    pub theme: Theme,
}

#[derive(Debug, Deserialize)]
pub struct NewsletterRequest {
    #[serde(default)]
    pub email: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Landing page: hero strip plus category rows
pub async fn landing(State(state): State<AppState>) -> Json<LandingPage> {
    Json(state.catalog.landing().await)
}

pub async fn movies(State(state): State<AppState>) -> Json<Vec<MovieSummary>> {
    Json(state.catalog.browse(Section::Movies).await)
}

pub async fn series(State(state): State<AppState>) -> Json<Vec<MovieSummary>> {
    Json(state.catalog.browse(Section::Series).await)
}

pub async fn trending(State(state): State<AppState>) -> Json<Vec<MovieSummary>> {
    Json(state.catalog.browse(Section::Trending).await)
}

/// Genre listing, optionally narrowed by `?q=`
pub async fn genre(
    State(state): State<AppState>,
    Path(genre): Path<String>,
    Query(params): Query<SearchQuery>,
) -> Json<GenreResponse> {
    let query = params.q.as_deref().map(str::trim).filter(|q| !q.is_empty());

    let heading = match query {
        Some(q) => format!("Results for \"{}\"", q),
        None => format!("Genre: {}", genre),
    };
    let movies = state.catalog.browse_genre(&genre, query).await;

    Json(GenreResponse {
        genre,
        heading,
        movies,
    })
}

/// Search results; responses overtaken by a newer search come back empty
/// with `superseded` set
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchQuery>,
) -> Json<SearchResponse> {
    let query = params.q.unwrap_or_default();

    let response = match state.catalog.search_for_view(&state.search_view, &query).await {
        Some(results) => SearchResponse {
            query,
            results,
            superseded: false,
        },
        None => SearchResponse {
            query,
            results: Vec::new(),
            superseded: true,
        },
    };

    Json(response)
}

/// Detail page for one title; an unreachable catalog still answers 200 with
/// an empty page
pub async fn movie_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<MovieDetailPage>> {
    state
        .catalog
        .movie_page(&id)
        .await
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("No movie with id {}", id)))
}

async fn list_snapshot(state: &AppState, kind: ListKind) -> Json<ListResponse> {
    let lists = state.lists.read().await;
    Json(ListResponse {
        list: kind,
        movies: lists.list(kind).to_vec(),
    })
}

async fn add_to_list(
    state: &AppState,
    kind: ListKind,
    movie: MovieRef,
) -> AppResult<(StatusCode, Json<ListAddResponse>)> {
    let mut lists = state.lists.write().await;
    let outcome = lists.add(kind, movie).await?;
    let size = lists.list(kind).len();

    let (status, notice) = match outcome {
        AddOutcome::Added => (StatusCode::CREATED, Some(kind.added_notice())),
        AddOutcome::AlreadyPresent => (StatusCode::OK, None),
    };

    Ok((
        status,
        Json(ListAddResponse {
            outcome,
            notice,
            size,
        }),
    ))
}

pub async fn get_liked(State(state): State<AppState>) -> Json<ListResponse> {
    list_snapshot(&state, ListKind::Liked).await
}

pub async fn add_liked(
    State(state): State<AppState>,
    Json(movie): Json<MovieRef>,
) -> AppResult<(StatusCode, Json<ListAddResponse>)> {
    add_to_list(&state, ListKind::Liked, movie).await
}

pub async fn get_watch_later(State(state): State<AppState>) -> Json<ListResponse> {
    list_snapshot(&state, ListKind::WatchLater).await
}

pub async fn add_watch_later(
    State(state): State<AppState>,
    Json(movie): Json<MovieRef>,
) -> AppResult<(StatusCode, Json<ListAddResponse>)> {
    add_to_list(&state, ListKind::WatchLater, movie).await
}

async fn profiles_snapshot(state: &AppState) -> ProfilesResponse {
    let profiles = state.profiles.read().await;
    let active = profiles.active_profile().cloned();

    let (welcome_name, avatar_initial) = match &active {
        Some(profile) => (profile.welcome_name().to_string(), profile.display_initial()),
        None => ("User".to_string(), 'U'),
    };

    ProfilesResponse {
        profiles: profiles.list_profiles().to_vec(),
        active_id: profiles.active_id().cloned(),
        active,
        welcome_name,
        avatar_initial,
    }
}

pub async fn get_profiles(State(state): State<AppState>) -> Json<ProfilesResponse> {
    Json(profiles_snapshot(&state).await)
}

/// Blank profile with a fresh id; nothing is stored until it is saved
pub async fn create_profile_draft(State(state): State<AppState>) -> Json<Profile> {
    Json(state.profiles.read().await.create_draft())
}

pub async fn save_profile(
    State(state): State<AppState>,
    Json(profile): Json<Profile>,
) -> AppResult<Json<Profile>> {
    let saved = state.profiles.write().await.save(profile).await?;
    Ok(Json(saved))
}

pub async fn select_profile(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ProfilesResponse>> {
    state
        .profiles
        .write()
        .await
        .select_active(ProfileId::from_segment(&id))
        .await?;
    Ok(Json(profiles_snapshot(&state).await))
}

pub async fn get_theme(State(state): State<AppState>) -> Json<ThemeBody> {
    Json(ThemeBody {
        theme: theme::load_theme(state.store.as_ref()).await,
    })
}

pub async fn put_theme(
    State(state): State<AppState>,
    Json(body): Json<ThemeBody>,
) -> AppResult<Json<ThemeBody>> {
    theme::save_theme(state.store.as_ref(), body.theme).await?;
    Ok(Json(body))
}

pub async fn subscribe_newsletter(
    Json(request): Json<NewsletterRequest>,
) -> AppResult<Json<Value>> {
    let notice = newsletter::subscribe(&request.email)?;
    Ok(Json(json!({ "message": notice })))
}
