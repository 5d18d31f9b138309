#![allow(dead_code)]

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;

use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use uuid::Uuid;

use mockapi::config::Config;

/// A running test server backed by its own in-memory database.
pub struct TestApp {
    pub addr: SocketAddr,
    pub pool: SqlitePool,
    pub client: Client,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Register a mock endpoint, return (body, status).
    pub async fn create_endpoint(
        &self,
        path: &str,
        method: &str,
        status_code: u16,
        body: &str,
    ) -> (Value, StatusCode) {
        self.post_json(
            "/api/_manage/endpoints",
            &json!({ "path": path, "method": method, "statusCode": status_code, "body": body }),
        )
        .await
    }

    /// Register a mock endpoint that must succeed, return its id.
    pub async fn create_ok(&self, path: &str, method: &str, status_code: u16, body: &str) -> String {
        let (created, status) = self.create_endpoint(path, method, status_code, body).await;
        assert_eq!(status, StatusCode::CREATED, "create endpoint failed: {created}");
        created["id"].as_str().unwrap().to_string()
    }

    pub async fn get_json(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url(path))
            .send()
            .await
            .expect("get request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn post_json(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("post request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn put_json(&self, path: &str, body: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .put(self.url(path))
            .json(body)
            .send()
            .await
            .expect("put request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn delete(&self, path: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .delete(self.url(path))
            .send()
            .await
            .expect("delete request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

/// A migrated in-memory database.
///
/// Every connection to `sqlite::memory:` opens a separate database, so the pool
/// is pinned to a single connection that is never recycled.
pub async fn test_pool() -> SqlitePool {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("Invalid in-memory database url");

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("Failed to open in-memory database");

    mockapi::db::migrate(&pool)
        .await
        .expect("Failed to run migrations on test database");

    pool
}

/// A migrated database file under the temp dir, for tests that need several
/// connections racing on the same store. Remove it with `remove_file_db`.
pub async fn file_pool(max_connections: u32) -> (SqlitePool, PathBuf) {
    let path = std::env::temp_dir().join(format!("mockapi_test_{}.db", Uuid::now_v7().simple()));
    let url = format!("sqlite://{}", path.display());

    let pool = mockapi::db::connect(&url, max_connections)
        .await
        .expect("Failed to open test database file");

    mockapi::db::migrate(&pool)
        .await
        .expect("Failed to run migrations on test database");

    (pool, path)
}

pub async fn remove_file_db(pool: SqlitePool, path: PathBuf) {
    pool.close().await;
    for suffix in ["", "-wal", "-shm"] {
        let _ = std::fs::remove_file(format!("{}{suffix}", path.display()));
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        db_max_connections: 1,
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        max_body_size: 1_048_576,
        static_dir: PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/static")),
        log_level: "warn".to_string(),
    }
}

/// Spawn the full app on a random port.
pub async fn spawn_app() -> TestApp {
    let pool = test_pool().await;
    let app = mockapi::build_app(pool.clone(), test_config());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        pool,
        client: Client::new(),
    }
}
