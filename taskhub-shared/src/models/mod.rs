//! Database models for TaskHub
//!
//! This module contains all database models and their CRUD operations.
//! Every operation takes the connection pool as its first argument.
//!
//! # Models
//!
//! - `user`: User accounts; own tasks
//! - `category`: Optional task grouping
//! - `task`: To-do items owned by a user, optionally in a category
//! - `relations`: What happens to tasks when their user or category is deleted
//!
//! # Example
//!
//! ```no_run
//! use taskhub_shared::models::user::{User, CreateUser};
//! use taskhub_shared::models::task::{Task, CreateTask};
//! use taskhub_shared::db::pool::{create_pool, DatabaseConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = create_pool(DatabaseConfig::in_memory()).await?;
//!
//! let user = User::create(&pool, CreateUser {
//!     username: "alice".to_string(),
//!     email: "a@x.com".to_string(),
//! }).await?;
//!
//! let task = Task::create(&pool, CreateTask {
//!     title: "buy milk".to_string(),
//!     description: None,
//!     is_completed: false,
//!     user_id: user.id,
//!     category_id: None,
//! }).await?;
//! # Ok(())
//! # }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod category;
pub mod relations;
pub mod task;
pub mod user;

/// The kinds of persisted entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    User,
    Category,
    Task,
}

impl EntityKind {
    /// Table holding rows of this kind
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::User => "users",
            EntityKind::Category => "categories",
            EntityKind::Task => "tasks",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::User => "User",
            EntityKind::Category => "Category",
            EntityKind::Task => "Task",
        };
        f.write_str(name)
    }
}
