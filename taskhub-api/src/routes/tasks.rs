/// Task endpoints
///
/// # Endpoints
///
/// - `POST /tasks` - Create task
/// - `GET /tasks` - List tasks
/// - `GET /tasks/:id` - Get task
/// - `PUT /tasks/:id` - Update task
/// - `DELETE /tasks/:id` - Delete task
///
/// A task's owner and category are checked before every write; a reference
/// to a missing user or category answers `404` with the offending id.

use super::Pagination;
use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use taskhub_shared::models::task::{CreateTask, Task, UpdateTask};
use tracing::info;
use validator::Validate;

/// Create task request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateTaskRequest {
    #[validate(length(min = 3, max = 100, message = "Title must be 3-100 characters"))]
    pub title: String,

    pub description: Option<String>,

    #[serde(default)]
    pub is_completed: bool,

    pub user_id: i64,

    pub category_id: Option<i64>,
}

/// Update task request
///
/// For `description` and `category_id`, an explicit `null` clears the
/// column while an omitted field leaves it unchanged.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateTaskRequest {
    #[validate(length(min = 3, max = 100, message = "Title must be 3-100 characters"))]
    pub title: Option<String>,

    #[serde(
        default,
        deserialize_with = "taskhub_shared::serde_utils::double_option"
    )]
    pub description: Option<Option<String>>,

    pub is_completed: Option<bool>,

    #[serde(
        default,
        deserialize_with = "taskhub_shared::serde_utils::double_option"
    )]
    pub category_id: Option<Option<i64>>,
}

fn task_not_found() -> ApiError {
    ApiError::NotFound("Task not found".to_string())
}

/// Create task
///
/// # Endpoint
///
/// ```text
/// POST /tasks
/// Content-Type: application/json
///
/// {
///   "title": "buy milk",
///   "user_id": 1,
///   "category_id": 2
/// }
/// ```
///
/// # Errors
///
/// - `404 Not Found`: "User with ID n not found" or "Category with ID n not found"
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_task(
    State(state): State<AppState>,
    Json(req): Json<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    req.validate()?;

    let task = Task::create(
        &state.db,
        CreateTask {
            title: req.title,
            description: req.description,
            is_completed: req.is_completed,
            user_id: req.user_id,
            category_id: req.category_id,
        },
    )
    .await?;

    info!(task_id = task.id, user_id = task.user_id, "Task created");

    Ok((StatusCode::CREATED, Json(task)))
}

/// List tasks
pub async fn list_tasks(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<Task>>> {
    page.validate()?;

    let tasks = Task::list(&state.db, page.skip, page.limit).await?;

    Ok(Json(tasks))
}

/// Get task by ID
pub async fn get_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Task>> {
    let task = Task::find_by_id(&state.db, id)
        .await?
        .ok_or_else(task_not_found)?;

    Ok(Json(task))
}

/// Update task
///
/// # Errors
///
/// - `404 Not Found`: Task not found, or the new category doesn't exist
/// - `422 Unprocessable Entity`: Validation failed
pub async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTaskRequest>,
) -> ApiResult<Json<Task>> {
    req.validate()?;

    let task = Task::update(
        &state.db,
        id,
        UpdateTask {
            title: req.title,
            description: req.description,
            is_completed: req.is_completed,
            category_id: req.category_id,
        },
    )
    .await?
    .ok_or_else(task_not_found)?;

    Ok(Json(task))
}

/// Delete task
pub async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !Task::delete(&state.db, id).await? {
        return Err(task_not_found());
    }

    info!(task_id = id, "Task deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_request_distinguishes_null_from_missing() {
        let req: UpdateTaskRequest =
            serde_json::from_str(r#"{"category_id": null, "title": "new title"}"#).unwrap();
        assert_eq!(req.category_id, Some(None));
        assert_eq!(req.description, None);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_title_length() {
        let req: CreateTaskRequest =
            serde_json::from_str(r#"{"title": "hi", "user_id": 1}"#).unwrap();
        assert!(!req.is_completed);
        assert!(req.validate().is_err());
    }
}
