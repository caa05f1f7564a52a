/// User endpoints
///
/// # Endpoints
///
/// - `POST /users` - Create user
/// - `GET /users` - List users
/// - `GET /users/:id` - Get user
/// - `PUT /users/:id` - Update user
/// - `DELETE /users/:id` - Delete user and their tasks
/// - `GET /users/:id/tasks` - List a user's tasks

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
use taskhub_shared::models::{
    task::Task,
    user::{CreateUser, UpdateUser, User},
};
use tracing::info;
use validator::Validate;

/// Create user request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,
}

/// Update user request; omitted fields are left unchanged
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 50, message = "Username must be 3-50 characters"))]
    pub username: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub is_active: Option<bool>,
}

fn user_not_found() -> ApiError {
    ApiError::NotFound("User not found".to_string())
}

/// Create user
///
/// # Endpoint
///
/// ```text
/// POST /users
/// Content-Type: application/json
///
/// {
///   "username": "alice",
///   "email": "a@x.com"
/// }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Email already registered
/// - `409 Conflict`: Username already taken
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_user(
    State(state): State<AppState>,
    Json(req): Json<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<User>)> {
    req.validate()?;

    if User::find_by_email(&state.db, &req.email).await?.is_some() {
        return Err(ApiError::BadRequest("Email already registered".to_string()));
    }

    let user = User::create(
        &state.db,
        CreateUser {
            username: req.username,
            email: req.email,
        },
    )
    .await?;

    info!(user_id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(user)))
}

/// List users
pub async fn list_users(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<User>>> {
    page.validate()?;

    let users = User::list(&state.db, page.skip, page.limit).await?;

    Ok(Json(users))
}

/// Get user by ID
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<User>> {
    let user = User::find_by_id(&state.db, id)
        .await?
        .ok_or_else(user_not_found)?;

    Ok(Json(user))
}

/// Update user
///
/// # Errors
///
/// - `404 Not Found`: User not found
/// - `409 Conflict`: Username or email belongs to another user
/// - `422 Unprocessable Entity`: Validation failed
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    req.validate()?;

    let user = User::update(
        &state.db,
        id,
        UpdateUser {
            username: req.username,
            email: req.email,
            is_active: req.is_active,
        },
    )
    .await?
    .ok_or_else(user_not_found)?;

    Ok(Json(user))
}

/// Delete user
///
/// Every task owned by the user is deleted with it.
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !User::delete(&state.db, id).await? {
        return Err(user_not_found());
    }

    info!(user_id = id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// List the tasks owned by a user
///
/// # Errors
///
/// - `404 Not Found`: User not found
/// - `422 Unprocessable Entity`: Invalid paging parameters
pub async fn list_user_tasks(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<Task>>> {
    page.validate()?;

    if !User::exists(&state.db, id).await? {
        return Err(user_not_found());
    }

    let tasks = Task::list_by_owner(&state.db, id, page.skip, page.limit).await?;

    Ok(Json(tasks))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_request_validation() {
        let req = CreateUserRequest {
            username: "al".to_string(),
            email: "not-an-email".to_string(),
        };
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("username"));
        assert!(fields.contains_key("email"));

        let req = CreateUserRequest {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_user_request_validates_supplied_fields_only() {
        assert!(UpdateUserRequest::default().validate().is_ok());

        let req = UpdateUserRequest {
            username: Some("x".to_string()),
            ..Default::default()
        };
        assert!(req.validate().is_err());
    }
}
