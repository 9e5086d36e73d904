//! Player handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{ApiError, Result};
use crate::models::{CreatePlayerRequest, Page, PageQuery, PlayerResponse, UpdatePlayerRequest};

use super::AppState;

/// Handler for GET /players
pub async fn list_players(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<PlayerResponse>>> {
    if let Some(error_msg) = query.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }
    Ok(Json(state.services.players.list(&query).await?))
}

/// Handler for GET /players/:id
pub async fn get_player(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<PlayerResponse>> {
    Ok(Json(state.services.players.get(id).await?))
}

/// Handler for POST /players
pub async fn create_player(
    State(state): State<AppState>,
    Json(request): Json<CreatePlayerRequest>,
) -> Result<(StatusCode, Json<PlayerResponse>)> {
    if let Some(error_msg) = request.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }
    let player = state.services.players.create(request).await?;
    Ok((StatusCode::CREATED, Json(player)))
}

/// Handler for POST /players/create-bulk
pub async fn create_players_bulk(
    State(state): State<AppState>,
    Json(requests): Json<Vec<CreatePlayerRequest>>,
) -> Result<(StatusCode, Json<Vec<PlayerResponse>>)> {
    for request in &requests {
        if let Some(error_msg) = request.validate() {
            return Err(ApiError::BadRequest(error_msg));
        }
    }
    let players = state.services.players.create_bulk(requests).await?;
    Ok((StatusCode::CREATED, Json(players)))
}

/// Handler for PATCH /players/:id
pub async fn update_player(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdatePlayerRequest>,
) -> Result<Json<PlayerResponse>> {
    if let Some(error_msg) = request.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }
    Ok(Json(state.services.players.update(id, request).await?))
}

/// Handler for DELETE /players/:id
pub async fn delete_player(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.services.players.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
