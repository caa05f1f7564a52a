//! Category model and database operations
//!
//! Categories group tasks. Deleting a category keeps its tasks and clears
//! their `category_id` (see [`relations::TASK_CATEGORY`](super::relations::TASK_CATEGORY)).
//!
//! # Schema
//!
//! ```sql
//! CREATE TABLE categories (
//!     id INTEGER PRIMARY KEY AUTOINCREMENT,
//!     name VARCHAR(100) NOT NULL UNIQUE,
//!     description TEXT,
//!     created_at TEXT NOT NULL,
//!     updated_at TEXT NOT NULL
//! );
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use super::relations;
use super::EntityKind;

/// Category model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Category {
    /// Unique category ID
    pub id: i64,

    /// Category name, unique across all categories
    pub name: String,

    /// Optional free-text description
    pub description: Option<String>,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCategory {
    pub name: String,
    pub description: Option<String>,
}

/// Input for updating a category
///
/// `description: Some(None)` clears the description; `None` leaves it alone.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateCategory {
    pub name: Option<String>,

    #[serde(default, deserialize_with = "crate::serde_utils::double_option")]
    pub description: Option<Option<String>>,
}

impl Category {
    /// Creates a new category
    ///
    /// # Errors
    ///
    /// Returns an error if the name is already taken or the database fails.
    pub async fn create(pool: &SqlitePool, data: CreateCategory) -> Result<Self, sqlx::Error> {
        let now = Utc::now();

        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description, created_at, updated_at)
            VALUES (?, ?, ?, ?)
            RETURNING id, name, description, created_at, updated_at
            "#,
        )
        .bind(data.name)
        .bind(data.description)
        .bind(now)
        .bind(now)
        .fetch_one(pool)
        .await?;

        Ok(category)
    }

    /// Finds a category by ID
    pub async fn find_by_id(pool: &SqlitePool, id: i64) -> Result<Option<Self>, sqlx::Error> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            WHERE id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(category)
    }

    /// Checks whether a category with this ID exists
    pub async fn exists(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM categories WHERE id = ?)")
                .bind(id)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }

    /// Updates a category
    ///
    /// Returns None if the category doesn't exist.
    pub async fn update(
        pool: &SqlitePool,
        id: i64,
        data: UpdateCategory,
    ) -> Result<Option<Self>, sqlx::Error> {
        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("UPDATE categories SET updated_at = ");
        query.push_bind(Utc::now());

        if let Some(name) = data.name {
            query.push(", name = ").push_bind(name);
        }
        if let Some(description) = data.description {
            query.push(", description = ").push_bind(description);
        }

        query.push(" WHERE id = ").push_bind(id);
        query.push(" RETURNING id, name, description, created_at, updated_at");

        let category = query
            .build_query_as::<Category>()
            .fetch_optional(pool)
            .await?;

        Ok(category)
    }

    /// Deletes a category, leaving its tasks uncategorized
    ///
    /// Returns false if the category didn't exist.
    pub async fn delete(pool: &SqlitePool, id: i64) -> Result<bool, sqlx::Error> {
        relations::delete_with_policies(pool, EntityKind::Category, id).await
    }

    /// Lists categories with pagination, in ID order
    pub async fn list(pool: &SqlitePool, skip: i64, limit: i64) -> Result<Vec<Self>, sqlx::Error> {
        let categories = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name, description, created_at, updated_at
            FROM categories
            ORDER BY id
            LIMIT ? OFFSET ?
            "#,
        )
        .bind(limit)
        .bind(skip)
        .fetch_all(pool)
        .await?;

        Ok(categories)
    }

    /// Counts total number of categories
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM categories")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }
}
