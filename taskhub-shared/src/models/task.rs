//! Task model and database operations
//!
//! A task belongs to exactly one user and optionally to one category. Both
//! references are checked before a write so a dangling id comes back as
//! [`DataError::ReferencedEntityNotFound`] rather than an opaque
//! foreign-key failure.
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE tasks (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     title VARCHAR(100) NOT NULL,
//!     description TEXT,
//!     is_completed BOOLEAN NOT NULL DEFAULT FALSE,
//!     user_id INTEGER NOT NULL REFERENCES users(id),
//!     category_id INTEGER REFERENCES categories(id),
//!     created_at TEXT NOT NULL,
//!     updated_at TEXT NOT NULL
//! );
//! ```
//!
//! # Example
//!
//! ```no_run
//! use taskhub_shared::models::task::{Task, CreateTask, UpdateTask};
//! use sqlx::SqlitePool;
//!
//! # async fn example(pool: SqlitePool) -> Result<(), Box<dyn std::error::Error>> {
//! let task = Task::create(&pool, CreateTask {
//!     title: "buy milk".to_string(),
//!     description: None,
//!     is_completed: false,
//!     user_id: 1,
//!     category_id: Some(2),
//! }).await?;
//!
//! // Move it out of its category
//! Task::update(&pool, task.id, UpdateTask {
//!     category_id: Some(None),
//!     ..Default::default()
//! }).await?;
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use super::category::Category;
use super::relations;
use super::user::User;
use super::EntityKind;
use crate::error::{DataError, DataResult};

/// Task model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Task {
    /// Unique task ID
    pub id: i64,

    /// Short title
    pub title: String,

    /// Optional longer description
    pub description: Option<String>,

    /// Whether the task is done
    pub is_completed: bool,

    /// Owning user
    pub user_id: i64,

    /// Category, if any
    pub category_id: Option<i64>,

    /// When the task was created
    pub created_at: DateTime<Utc>,

    /// When the task was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new task
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTask {
    pub title: String,

    pub description: Option<String>,

    #[serde(default)]
    pub is_completed: bool,

    /// Must reference an existing user
    pub user_id: i64,

    /// Must reference an existing category when set
    pub category_id: Option<i64>,
}

/// Input for updating a task
///
/// Fields left as `None` are untouched. For the nullable columns,
/// `Some(None)` clears the value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateTask {
    pub title: Option<String>,

    #[serde(default, deserialize_with = "crate::serde_utils::double_option")]
    pub description: Option<Option<String>>,

    pub is_completed: Option<bool>,

    /// Must reference an existing category when set to a value
    #[serde(default, deserialize_with = "crate::serde_utils::double_option")]
    pub category_id: Option<Option<i64>>,
}

/// Fails with `ReferencedEntityNotFound` unless the category exists
async fn require_category(pool: &SqlitePool, category_id: i64) -> DataResult<()> {
    if Category::exists(pool, category_id).await? {
        return Ok(());
    }

    debug!(category_id, "Referenced category does not exist");
    Err(DataError::ReferencedEntityNotFound {
        entity: EntityKind::Category,
        id: category_id,
    })
}

impl Task {
    /// Creates a new task
    ///
    /// The owner is checked first, then the category if one was given.
    /// Both timestamps are set to the same instant.
    ///
    /// # Errors
    ///
    /// - `ReferencedEntityNotFound(User, id)` if the owner doesn't exist
    /// - `ReferencedEntityNotFound(Category, id)` if the category doesn't exist
    /// - `Database` if the insert fails
    pub async fn create(pool: &SqlitePool, data: CreateTask) -> DataResult<Self> {
        if !User::exists(pool, data.user_id).await? {
            debug!(user_id = data.user_id, "Task owner does not exist");
            return Err(DataError::ReferencedEntityNotFound {
                entity: EntityKind::User,
                id: data.user_id,
            });
        }

        if let Some(category_id) = data.category_id {
            require_category(pool, category_id).await?;
        }

        let now = Utc::now();

        let task = sqlx::query_as::<_, Task>(
            r#"
            INSERT INTO tasks (title, description, is_completed, user_id, category_id, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, title, description, is_completed, user_id, category_id,
                      created_at, updated_at
            "#,
        )
        .bind(data.title)
        .bind(data.description)
        .bind(data.is_completed)
        .bind(data.user_id)
        .bind(data.category_id)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(task)
    }

    /// Finds a task by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let task = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, is_completed, user_id, category_id,
                   created_at, updated_at
            FROM tasks
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(task)
    }

    /// Lists tasks with pagination, in ID order
    pub async fn list(pool: &SqlitePool, skip: i64, limit: i64) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, is_completed, user_id, category_id,
                   created_at, updated_at
            FROM tasks
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Lists one user's tasks with pagination, in ID order
    ///
    /// An unknown user simply has no tasks.
    pub async fn list_by_owner(
        pool: &SqlitePool,
        user_id: i64,
        skip: i64,
        limit: i64,
    ) -> Result<Vec<Self>, sqlx::Error> {
        let tasks = sqlx::query_as::<_, Task>(
            r#"
            SELECT id, title, description, is_completed, user_id, category_id,
                   created_at, updated_at
            FROM tasks
            WHERE user_id = ?
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .bind(skip)
        .fetch_all(pool)
        .await?;

        Ok(tasks)
    }

    /// Updates a task
    ///
    /// A missing task returns `Ok(None)` before any reference is checked.
    /// When `category_id` is set to a value, that category must exist;
    /// otherwise nothing is written.
    ///
    /// # Errors
    ///
    /// - `ReferencedEntityNotFound(Category, id)` for an unknown category
    /// - `Database` if the update fails
    pub async fn update(pool: &SqlitePool, id: i64, data: UpdateTask) -> DataResult<Option<Self>> {
        if Self::find_by_id(pool, id).await?.is_none() {
            return Ok(None);
        }

        if let Some(Some(category_id)) = data.category_id {
            require_category(pool, category_id).await?;
        }

        let mut query: QueryBuilder<Sqlite> = QueryBuilder::new("UPDATE tasks SET updated_at = ");
        query.push_bind(Utc::now());

        if let Some(title) = data.title {
            query.push(", title = ").push_bind(title);
        }
        if let Some(description) = data.description {
            query.push(", description = ").push_bind(description);
        }
        if let Some(is_completed) = data.is_completed {
            query.push(", is_completed = ").push_bind(is_completed);
        }
        if let Some(category_id) = data.category_id {
            query.push(", category_id = ").push_bind(category_id);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(
            " RETURNING id, title, description, is_completed, user_id, category_id, created_at, updated_at",
        );

        let task = query.build_query_as::<Task>().fetch_optional(pool).await?;

        Ok(task)
    }

    /// Deletes a task
    ///
    /// Returns false if the task didn't exist.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        relations::delete_with_policies(pool, EntityKind::Task, id).await
    }

    /// Counts total number of tasks
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Counts the tasks owned by one user
    pub async fn count_by_owner(pool: &SqlitePool, user_id: i64) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM tasks WHERE user_id = ?")
            .bind(user_id)
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_task_defaults_to_not_completed() {
        let data: CreateTask =
            serde_json::from_str(r#"{"title": "buy milk", "user_id": 1}"#).unwrap();
        assert!(!data.is_completed);
        assert_eq!(data.description, None);
        assert_eq!(data.category_id, None);
    }

    #[test]
    fn test_update_task_tri_state_category() {
        let update: UpdateTask = serde_json::from_str("{}").unwrap();
        assert_eq!(update.category_id, None);

        let update: UpdateTask = serde_json::from_str(r#"{"category_id": null}"#).unwrap();
        assert_eq!(update.category_id, Some(None));

        let update: UpdateTask = serde_json::from_str(r#"{"category_id": 4}"#).unwrap();
        assert_eq!(update.category_id, Some(Some(4)));
    }
}
