use axum::{
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Browsing
        .route("/", get(handlers::landing))
        .route("/movies", get(handlers::movies))
        .route("/series", get(handlers::series))
        .route("/trending", get(handlers::trending))
        .route("/genre/:genre", get(handlers::genre))
        .route("/search", get(handlers::search))
        .route("/movie/:id", get(handlers::movie_detail))
        // User lists
        .route("/liked", get(handlers::get_liked).post(handlers::add_liked))
        .route(
            "/watchlater",
            get(handlers::get_watch_later).post(handlers::add_watch_later),
        )
        // Profiles
        .route(
            "/profile",
            get(handlers::get_profiles).put(handlers::save_profile),
        )
        .route("/profile/draft", post(handlers::create_profile_draft))
        .route("/profile/:id/select", post(handlers::select_profile))
        // Preferences
        .route("/theme", get(handlers::get_theme).put(handlers::put_theme))
        .route("/newsletter", post(handlers::subscribe_newsletter))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
