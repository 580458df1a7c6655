//! instagrab: Instagram post metadata lookup and media download proxy.
//!
//! Post URLs are resolved through Instagram's public oEmbed endpoint. The
//! server exposes the result as JSON (`/info`, `/api/scrape`), can stream the
//! media back as an attachment (`/download`), and serves a small static
//! frontend for everything else.

use axum::http::Request;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use tower_http::normalize_path::NormalizePath;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;
use tracing::Level;

pub mod config;
pub mod error;
pub mod handlers;
pub mod scraper;
pub mod state;
pub mod utils;

pub use config::Config;
pub use error::AppError;
pub use state::AppState;

/// The router wrapped so trailing slashes are trimmed before routing.
pub type App = NormalizePath<Router>;

pub fn build_router(state: AppState) -> Router {
    let frontend_dir = state.config.frontend_dir.clone();
    let frontend = ServeDir::new(&frontend_dir)
        .fallback(ServeFile::new(frontend_dir.join("index.html")));

    Router::new()
        .route("/info", get(handlers::info::handle))
        .route("/download", get(handlers::download::handle))
        .route("/api/scrape", get(handlers::scrape::handle))
        .route("/health", get(handlers::health::handle))
        .fallback_service(frontend)
        .with_state(state)
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<_>| {
                tracing::span!(
                    Level::INFO,
                    "http_request",
                    method = %request.method(),
                    path = %request.uri().path(),
                )
            }),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
}

/// `/info/` and `/info` hit the same handler.
pub fn build_app(state: AppState) -> App {
    NormalizePath::trim_trailing_slash(build_router(state))
}
