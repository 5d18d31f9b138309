use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::db;
use crate::error::AppError;
use crate::matching::{self, ParsedPath};
use crate::models::MockEndpoint;

pub const SUPPORTED_METHODS: [&str; 7] = ["GET", "POST", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"];

const CONFLICT_MESSAGE: &str = "Endpoint with this path and method already exists";
const NOT_FOUND_MESSAGE: &str = "Endpoint not found";

/// Fields accepted by create and update. Everything is optional here so that
/// a missing field is reported as a validation error rather than a decode error.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndpointInput {
    pub path: Option<String>,
    pub method: Option<String>,
    pub status_code: Option<i64>,
    pub body: Option<String>,
}

/// A validated, normalized `EndpointInput`.
#[derive(Debug, Clone, PartialEq)]
struct Definition {
    path: String,
    method: String,
    status_code: u16,
    body: String,
}

/// Owns the endpoint store and enforces the `(path, method)` uniqueness rule.
///
/// Uniqueness is checked by the store's unique index as part of the write, so
/// two concurrent creates for the same pair can never both succeed.
#[derive(Debug, Clone)]
pub struct Registry {
    pool: SqlitePool,
}

impl Registry {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All endpoints, most recently created first.
    pub async fn list(&self) -> Result<Vec<MockEndpoint>, AppError> {
        Ok(db::mock_endpoints::list(&self.pool).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<MockEndpoint, AppError> {
        db::mock_endpoints::find_by_id(&self.pool, id)
            .await?
            .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))
    }

    pub async fn create(&self, input: EndpointInput) -> Result<MockEndpoint, AppError> {
        let def = validate(input)?;
        let now = Utc::now();

        let endpoint = MockEndpoint {
            id: Uuid::now_v7(),
            path: def.path,
            method: def.method,
            status_code: def.status_code,
            body: def.body,
            created_at: now,
            updated_at: now,
        };

        let endpoint = db::mock_endpoints::insert(&self.pool, &endpoint)
            .await
            .map_err(conflict_or_storage)?;

        tracing::info!(
            id = %endpoint.id,
            method = %endpoint.method,
            path = %endpoint.path,
            "Mock endpoint created"
        );
        Ok(endpoint)
    }

    pub async fn update(&self, id: Uuid, input: EndpointInput) -> Result<MockEndpoint, AppError> {
        let def = validate(input)?;

        let endpoint = db::mock_endpoints::update(
            &self.pool,
            id,
            &def.path,
            &def.method,
            def.status_code,
            &def.body,
            Utc::now(),
        )
        .await
        .map_err(conflict_or_storage)?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND_MESSAGE.to_string()))?;

        tracing::info!(
            id = %endpoint.id,
            method = %endpoint.method,
            path = %endpoint.path,
            "Mock endpoint updated"
        );
        Ok(endpoint)
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), AppError> {
        if !db::mock_endpoints::delete(&self.pool, id).await? {
            return Err(AppError::NotFound(NOT_FOUND_MESSAGE.to_string()));
        }

        tracing::info!(%id, "Mock endpoint deleted");
        Ok(())
    }

    /// Find the endpoint that should answer a request. `None` is a normal
    /// outcome; only storage failures are errors.
    pub async fn resolve(
        &self,
        method: &str,
        request: &ParsedPath,
    ) -> Result<Option<MockEndpoint>, AppError> {
        let method = method.to_ascii_uppercase();
        let candidates = db::mock_endpoints::list_by_method(&self.pool, &method).await?;

        Ok(matching::find_match(&method, request, &candidates).cloned())
    }
}

fn validate(input: EndpointInput) -> Result<Definition, AppError> {
    let missing = || AppError::Validation("Missing required fields".to_string());

    let path = input
        .path
        .as_deref()
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(missing)?;
    let method = input
        .method
        .as_deref()
        .map(str::trim)
        .filter(|m| !m.is_empty())
        .ok_or_else(missing)?;
    let status_code = input.status_code.filter(|&s| s != 0).ok_or_else(missing)?;
    let body = input.body.filter(|b| !b.is_empty()).ok_or_else(missing)?;

    let method = method.to_ascii_uppercase();
    if !SUPPORTED_METHODS.contains(&method.as_str()) {
        return Err(AppError::Validation(format!(
            "Unsupported HTTP method: {method}"
        )));
    }

    let status_code = u16::try_from(status_code)
        .ok()
        .filter(|s| (200..=599).contains(s))
        .ok_or_else(|| {
            AppError::Validation("Status code must be between 200 and 599".to_string())
        })?;

    Ok(Definition {
        path: normalize_path(path),
        method,
        status_code,
        body,
    })
}

/// Stored paths always start with `/`.
pub fn normalize_path(path: &str) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{path}")
    }
}

fn conflict_or_storage(e: sqlx::Error) -> AppError {
    match e {
        sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
            AppError::Conflict(CONFLICT_MESSAGE.to_string())
        }
        _ => AppError::Storage(e),
    }
}
