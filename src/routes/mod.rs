pub mod endpoints;
pub mod mock;

use axum::routing::get;
use axum::Router;

use crate::state::SharedState;

/// Requests under this prefix are never served from the mock table.
pub const MANAGE_PREFIX: &str = "/api/_manage/";

pub fn manage_routes() -> Router<SharedState> {
    Router::new()
        .route(
            "/api/_manage/endpoints",
            get(endpoints::list).post(endpoints::create),
        )
        .route(
            "/api/_manage/endpoints/{id}",
            get(endpoints::get)
                .put(endpoints::update)
                .delete(endpoints::delete),
        )
        .route("/api/_manage/health", get(health))
}

async fn health() -> &'static str {
    "ok"
}
