pub mod config;
pub mod error;
pub mod state;
pub mod db;
pub mod models;
pub mod matching;
pub mod registry;
pub mod routes;

use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue};
use axum::Router;
use sqlx::SqlitePool;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::registry::Registry;
use crate::state::{AppState, SharedState};

pub fn build_app(pool: SqlitePool, config: Config) -> Router {
    let admin_ui = ServeDir::new(&config.static_dir);
    let max_body_size = config.max_body_size;

    let state: SharedState = Arc::new(AppState {
        registry: Registry::new(pool),
    });

    let manage = routes::manage_routes()
        .nest_service("/api/_manage/ui", admin_ui)
        .layer(SetResponseHeaderLayer::overriding(
            HeaderName::from_static("x-content-type-options"),
            HeaderValue::from_static("nosniff"),
        ));

    // Everything outside the management routes is a mock request.
    Router::new()
        .merge(manage)
        .fallback(routes::mock::serve)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body_size))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
