//! User handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::{Extension, Json};

use crate::auth::Claims;
use crate::error::{ApiError, Result};
use crate::models::{Page, PageQuery, UpdateUserRequest, UserResponse};

use super::AppState;

/// Handler for GET /users/profile
///
/// Resolves the caller's own account from the verified claims the
/// authorization layer stored on the request.
pub async fn get_profile(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<UserResponse>> {
    Ok(Json(state.services.users.profile(claims.sub).await?))
}

/// Handler for GET /users
pub async fn list_users(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<UserResponse>>> {
    if let Some(error_msg) = query.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }
    Ok(Json(state.services.users.list(&query).await?))
}

/// Handler for GET /users/:id
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<UserResponse>> {
    Ok(Json(state.services.users.get(id).await?))
}

/// Handler for PATCH /users/:id
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateUserRequest>,
) -> Result<Json<UserResponse>> {
    if let Some(error_msg) = request.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }
    Ok(Json(state.services.users.update(id, request).await?))
}

/// Handler for DELETE /users/:id
pub async fn delete_user(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    state.services.users.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
