use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::models::MockEndpoint;

const COLUMNS: &str = "id, path, method, status_code, response_body, created_at, updated_at";

/// All endpoints, most recently created first.
pub async fn list(pool: &SqlitePool) -> Result<Vec<MockEndpoint>, sqlx::Error> {
    sqlx::query_as::<_, MockEndpoint>(&format!(
        "SELECT {COLUMNS} FROM mock_endpoints ORDER BY seq DESC"
    ))
    .fetch_all(pool)
    .await
}

/// Matching candidates for one method, in the same order as `list`.
pub async fn list_by_method(
    pool: &SqlitePool,
    method: &str,
) -> Result<Vec<MockEndpoint>, sqlx::Error> {
    sqlx::query_as::<_, MockEndpoint>(&format!(
        "SELECT {COLUMNS} FROM mock_endpoints WHERE method = ?1 ORDER BY seq DESC"
    ))
    .bind(method)
    .fetch_all(pool)
    .await
}

pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<MockEndpoint>, sqlx::Error> {
    sqlx::query_as::<_, MockEndpoint>(&format!(
        "SELECT {COLUMNS} FROM mock_endpoints WHERE id = ?1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Fails with a unique violation when `(path, method)` is taken.
pub async fn insert(pool: &SqlitePool, endpoint: &MockEndpoint) -> Result<MockEndpoint, sqlx::Error> {
    sqlx::query_as::<_, MockEndpoint>(&format!(
        "INSERT INTO mock_endpoints (id, path, method, status_code, response_body, created_at, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING {COLUMNS}"
    ))
    .bind(endpoint.id)
    .bind(&endpoint.path)
    .bind(&endpoint.method)
    .bind(endpoint.status_code)
    .bind(&endpoint.body)
    .bind(endpoint.created_at)
    .bind(endpoint.updated_at)
    .fetch_one(pool)
    .await
}

/// Returns `None` when no row has this id. A collision with another row's
/// `(path, method)` surfaces as a unique violation.
pub async fn update(
    pool: &SqlitePool,
    id: Uuid,
    path: &str,
    method: &str,
    status_code: u16,
    body: &str,
    updated_at: DateTime<Utc>,
) -> Result<Option<MockEndpoint>, sqlx::Error> {
    sqlx::query_as::<_, MockEndpoint>(&format!(
        "UPDATE mock_endpoints
         SET path = ?2, method = ?3, status_code = ?4, response_body = ?5, updated_at = ?6
         WHERE id = ?1 RETURNING {COLUMNS}"
    ))
    .bind(id)
    .bind(path)
    .bind(method)
    .bind(status_code)
    .bind(body)
    .bind(updated_at)
    .fetch_optional(pool)
    .await
}

/// Returns whether a row was removed.
pub async fn delete(pool: &SqlitePool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM mock_endpoints WHERE id = ?1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
