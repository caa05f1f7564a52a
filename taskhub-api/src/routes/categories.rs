/// Category endpoints
///
/// Deleting a category keeps its tasks and leaves them uncategorized.

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
use taskhub_shared::models::category::{Category, CreateCategory, UpdateCategory};
use tracing::info;
use validator::Validate;

/// Create category request
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 3, max = 100, message = "Name must be 3-100 characters"))]
    pub name: String,

    pub description: Option<String>,
}

/// Update category request
///
/// `"description": null` clears the description.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(length(min = 3, max = 100, message = "Name must be 3-100 characters"))]
    pub name: Option<String>,

    #[serde(
        default,
        deserialize_with = "taskhub_shared::serde_utils::double_option"
    )]
    pub description: Option<Option<String>>,
}

fn category_not_found() -> ApiError {
    ApiError::NotFound("Category not found".to_string())
}

/// Create category
///
/// # Errors
///
/// - `409 Conflict`: Name already taken
/// - `422 Unprocessable Entity`: Validation failed
pub async fn create_category(
    State(state): State<AppState>,
    Json(req): Json<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    req.validate()?;

    let category = Category::create(
        &state.db,
        CreateCategory {
            name: req.name,
            description: req.description,
        },
    )
    .await?;

    info!(category_id = category.id, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

pub async fn list_categories(
    State(state): State<AppState>,
    Query(page): Query<Pagination>,
) -> ApiResult<Json<Vec<Category>>> {
    page.validate()?;

    let categories = Category::list(&state.db, page.skip, page.limit).await?;

    Ok(Json(categories))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Category>> {
    let category = Category::find_by_id(&state.db, id)
        .await?
        .ok_or_else(category_not_found)?;

    Ok(Json(category))
}

pub async fn update_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateCategoryRequest>,
) -> ApiResult<Json<Category>> {
    req.validate()?;

    let category = Category::update(
        &state.db,
        id,
        UpdateCategory {
            name: req.name,
            description: req.description,
        },
    )
    .await?
    .ok_or_else(category_not_found)?;

    Ok(Json(category))
}

pub async fn delete_category(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
    if !Category::delete(&state.db, id).await? {
        return Err(category_not_found());
    }

    info!(category_id = id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
