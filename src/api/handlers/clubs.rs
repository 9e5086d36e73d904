//! Club handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{ApiError, Result};
use crate::models::{ClubResponse, CreateClubRequest, Page, PageQuery, UpdateClubRequest};

use super::AppState;

/// Handler for GET /clubs
pub async fn list_clubs(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<ClubResponse>>> {
    if let Some(error_msg) = query.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }
    Ok(Json(state.services.clubs.list(&query).await?))
}

/// Handler for GET /clubs/:id
pub async fn get_club(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<ClubResponse>> {
    Ok(Json(state.services.clubs.get(id).await?))
}

/// Handler for POST /clubs
pub async fn create_club(
    State(state): State<AppState>,
    Json(request): Json<CreateClubRequest>,
) -> Result<(StatusCode, Json<ClubResponse>)> {
    if let Some(error_msg) = request.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }
    let club = state.services.clubs.create(request).await?;
    Ok((StatusCode::CREATED, Json(club)))
}

/// Handler for POST /clubs/create-bulk
///
/// Validates every payload up front, then creates clubs in order.
pub async fn create_clubs_bulk(
    State(state): State<AppState>,
    Json(requests): Json<Vec<CreateClubRequest>>,
) -> Result<(StatusCode, Json<Vec<ClubResponse>>)> {
    for request in &requests {
        if let Some(error_msg) = request.validate() {
            return Err(ApiError::BadRequest(error_msg));
        }
    }
    let clubs = state.services.clubs.create_bulk(requests).await?;
    Ok((StatusCode::CREATED, Json(clubs)))
}

/// Handler for PATCH /clubs/:id
pub async fn update_club(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateClubRequest>,
) -> Result<Json<ClubResponse>> {
    if let Some(error_msg) = request.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }
    Ok(Json(state.services.clubs.update(id, request).await?))
}

/// Handler for DELETE /clubs/:id
pub async fn delete_club(State(state): State<AppState>, Path(id): Path<i64>) -> Result<StatusCode> {
    state.services.clubs.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST /clubs/:id/players/:player_id
///
/// Signs the player for the club and returns the updated squad view.
pub async fn add_player_to_club(
    State(state): State<AppState>,
    Path((id, player_id)): Path<(i64, i64)>,
) -> Result<(StatusCode, Json<ClubResponse>)> {
    let club = state.services.clubs.add_player(id, player_id).await?;
    Ok((StatusCode::CREATED, Json(club)))
}

/// Handler for DELETE /clubs/:id/players/:player_id
pub async fn remove_player_from_club(
    State(state): State<AppState>,
    Path((id, player_id)): Path<(i64, i64)>,
) -> Result<Json<ClubResponse>> {
    Ok(Json(
        state.services.clubs.remove_player(id, player_id).await?,
    ))
}
