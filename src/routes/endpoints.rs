use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::MockEndpoint;
use crate::registry::EndpointInput;
use crate::state::SharedState;

pub async fn list(State(state): State<SharedState>) -> Result<Json<Vec<MockEndpoint>>, AppError> {
    let endpoints = state.registry.list().await?;
    Ok(Json(endpoints))
}

pub async fn create(
    State(state): State<SharedState>,
    payload: Result<Json<EndpointInput>, JsonRejection>,
) -> Result<(StatusCode, Json<MockEndpoint>), AppError> {
    let Json(req) = payload?;
    validate_json_body(&req)?;

    let endpoint = state.registry.create(req).await?;
    Ok((StatusCode::CREATED, Json(endpoint)))
}

pub async fn get(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<MockEndpoint>, AppError> {
    let endpoint = state.registry.get(parse_id(&id)?).await?;
    Ok(Json(endpoint))
}

pub async fn update(
    State(state): State<SharedState>,
    Path(id): Path<String>,
    payload: Result<Json<EndpointInput>, JsonRejection>,
) -> Result<Json<MockEndpoint>, AppError> {
    let id = parse_id(&id)?;
    let Json(req) = payload?;
    validate_json_body(&req)?;

    let endpoint = state.registry.update(id, req).await?;
    Ok(Json(endpoint))
}

pub async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    state.registry.delete(parse_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Ids that are not UUIDs cannot name a stored endpoint.
fn parse_id(id: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(id).map_err(|_| AppError::NotFound("Endpoint not found".to_string()))
}

/// The store keeps bodies as opaque text; the management API only accepts JSON.
fn validate_json_body(req: &EndpointInput) -> Result<(), AppError> {
    match req.body.as_deref() {
        Some(body) if !body.is_empty() => serde_json::from_str::<serde_json::Value>(body)
            .map(|_| ())
            .map_err(|_| AppError::Validation("Invalid JSON in response body".to_string())),
        _ => Ok(()),
    }
}
