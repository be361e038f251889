use std::sync::Arc;

use axum::{
    routing::get,
    Router,
};
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod models;
pub mod routes;

use crate::db::PlayerStore;
use crate::handlers::PlayerHandlers;

/// Build the HTTP router around an already-connected store.
pub fn app(store: Arc<dyn PlayerStore>) -> Router {
    // Front-end clients are served from other origins
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Football Players API - v1.0" }))
        .route("/health", get(routes::health::health_check))

        // Player endpoints
        .route(
            "/players",
            get(routes::players::get_players).post(routes::players::create_player),
        )
        .route(
            "/players/{id}",
            get(routes::players::get_player_by_id)
                .put(routes::players::update_player)
                .delete(routes::players::delete_player),
        )

        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(PlayerHandlers::new(store))
}
