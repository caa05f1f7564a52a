//! Shared setup for data-layer integration tests
//!
//! Every test gets its own private in-memory database with migrations
//! applied, so tests never see each other's rows.

#![allow(dead_code)]

use sqlx::SqlitePool;
use taskhub_shared::db::migrations::run_migrations;
use taskhub_shared::db::pool::{create_pool, DatabaseConfig};
use taskhub_shared::models::category::{Category, CreateCategory};
use taskhub_shared::models::task::{CreateTask, Task};
use taskhub_shared::models::user::{CreateUser, User};

/// Creates a migrated in-memory database
pub async fn setup_pool() -> SqlitePool {
    let pool = create_pool(DatabaseConfig::in_memory())
        .await
        .expect("Failed to create in-memory pool");
    run_migrations(&pool).await.expect("Migrations failed");
    pool
}

/// Creates a user named `username` with email `{username}@example.com`
pub async fn create_user(pool: &SqlitePool, username: &str) -> User {
    User::create(
        pool,
        CreateUser {
            username: username.to_string(),
            email: format!("{}@example.com", username),
        },
    )
    .await
    .expect("Failed to create user")
}

/// Creates a category without description
pub async fn create_category(pool: &SqlitePool, name: &str) -> Category {
    Category::create(
        pool,
        CreateCategory {
            name: name.to_string(),
            description: None,
        },
    )
    .await
    .expect("Failed to create category")
}

/// Creates an open task for `user_id`
pub async fn create_task(
    pool: &SqlitePool,
    title: &str,
    user_id: i64,
    category_id: Option<i64>,
) -> Task {
    Task::create(
        pool,
        CreateTask {
            title: title.to_string(),
            description: None,
            is_completed: false,
            user_id,
            category_id,
        },
    )
    .await
    .expect("Failed to create task")
}
