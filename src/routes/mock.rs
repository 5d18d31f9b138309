use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::error::AppError;
use crate::matching::ParsedPath;
use crate::models::MockEndpoint;
use crate::routes::MANAGE_PREFIX;
use crate::state::SharedState;

/// Fallback handler: answers any unrouted request from the mock table.
pub async fn serve(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
) -> Result<Response, AppError> {
    let path = uri.path();
    if path.starts_with(MANAGE_PREFIX) {
        return Ok((StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" }))).into_response());
    }

    let method = method.as_str().to_ascii_uppercase();
    let request = ParsedPath::from_parts(path, uri.query());

    let Some(endpoint) = state.registry.resolve(&method, &request).await? else {
        tracing::debug!(%method, %uri, "No mock endpoint matched");
        return Ok((
            StatusCode::NOT_FOUND,
            Json(json!({
                "error": "Mock endpoint not found",
                "path": path,
                "method": method,
            })),
        )
            .into_response());
    };

    tracing::debug!(%method, %uri, id = %endpoint.id, "Serving mock endpoint");
    Ok(mock_response(&endpoint))
}

/// JSON bodies are sent back as JSON; anything else goes out as plain text.
fn mock_response(endpoint: &MockEndpoint) -> Response {
    let status =
        StatusCode::from_u16(endpoint.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match serde_json::from_str::<serde_json::Value>(&endpoint.body) {
        Ok(value) => (status, Json(value)).into_response(),
        Err(_) => (status, endpoint.body.clone()).into_response(),
    }
}
