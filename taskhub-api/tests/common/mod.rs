//! Common test utilities for API tests
//!
//! Every `TestContext` owns a private in-memory database with migrations
//! applied and a router built on top of it. Requests go straight into the
//! router as a `tower::Service`; no socket is opened.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use sqlx::SqlitePool;
use taskhub_api::app::{build_router, AppState};
use taskhub_api::config::{ApiConfig, Config, DatabaseConfig};
use taskhub_shared::db::migrations::run_migrations;
use taskhub_shared::db::pool::{self, create_pool, IN_MEMORY_URL};
use tower::Service as _;

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: SqlitePool,
    pub app: axum::Router,
    pub config: Config,
}

impl TestContext {
    /// Creates a new test context with a fresh database
    pub async fn new() -> anyhow::Result<Self> {
        let config = Config {
            api: ApiConfig {
                host: "127.0.0.1".to_string(),
                port: 0,
                cors_origins: vec!["*".to_string()],
            },
            database: DatabaseConfig {
                url: IN_MEMORY_URL.to_string(),
                max_connections: 1,
            },
        };

        let db = create_pool(pool::DatabaseConfig::in_memory()).await?;
        run_migrations(&db).await?;

        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext { db, app, config })
    }

    /// Sends a request and returns the status and parsed JSON body
    ///
    /// An empty body comes back as `Value::Null`.
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let request = builder.body(body).unwrap();
        let response = self.app.clone().call(request).await.unwrap();

        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();

        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or_else(|_| {
                Value::String(String::from_utf8_lossy(&bytes).into_owned())
            })
        };

        (status, json)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send("GET", uri, None).await
    }

    pub async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("POST", uri, Some(body)).await
    }

    pub async fn put(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.send("PUT", uri, Some(body)).await
    }

    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send("DELETE", uri, None).await
    }

    /// Creates a user through the API and returns its id
    pub async fn create_user(&self, username: &str) -> i64 {
        let (status, body) = self
            .post(
                "/users",
                serde_json::json!({
                    "username": username,
                    "email": format!("{}@example.com", username),
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create user failed: {}", body);
        body["id"].as_i64().unwrap()
    }

    /// Creates a category through the API and returns its id
    pub async fn create_category(&self, name: &str) -> i64 {
        let (status, body) = self
            .post("/categories", serde_json::json!({ "name": name }))
            .await;
        assert_eq!(status, StatusCode::CREATED, "create category failed: {}", body);
        body["id"].as_i64().unwrap()
    }

    /// Creates a task through the API and returns its id
    pub async fn create_task(&self, title: &str, user_id: i64, category_id: Option<i64>) -> i64 {
        let (status, body) = self
            .post(
                "/tasks",
                serde_json::json!({
                    "title": title,
                    "user_id": user_id,
                    "category_id": category_id,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "create task failed: {}", body);
        body["id"].as_i64().unwrap()
    }
}
