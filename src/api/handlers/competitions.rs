//! Competition handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{ApiError, Result};
use crate::models::{
    CompetitionResponse, CreateCompetitionRequest, Page, PageQuery, UpdateCompetitionRequest,
};

use super::AppState;

/// Handler for GET /competitions
pub async fn list_competitions(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<CompetitionResponse>>> {
    if let Some(error_msg) = query.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }
    Ok(Json(state.services.competitions.list(&query).await?))
}

/// Handler for GET /competitions/:id
pub async fn get_competition(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CompetitionResponse>> {
    Ok(Json(state.services.competitions.get(id).await?))
}

/// Handler for POST /competitions
pub async fn create_competition(
    State(state): State<AppState>,
    Json(request): Json<CreateCompetitionRequest>,
) -> Result<(StatusCode, Json<CompetitionResponse>)> {
    if let Some(error_msg) = request.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }
    let competition = state.services.competitions.create(request).await?;
    Ok((StatusCode::CREATED, Json(competition)))
}

/// Handler for POST /competitions/create-bulk
pub async fn create_competitions_bulk(
    State(state): State<AppState>,
    Json(requests): Json<Vec<CreateCompetitionRequest>>,
) -> Result<(StatusCode, Json<Vec<CompetitionResponse>>)> {
    for request in &requests {
        if let Some(error_msg) = request.validate() {
            return Err(ApiError::BadRequest(error_msg));
        }
    }
    let competitions = state.services.competitions.create_bulk(requests).await?;
    Ok((StatusCode::CREATED, Json(competitions)))
}

/// Handler for PATCH /competitions/:id
pub async fn update_competition(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateCompetitionRequest>,
) -> Result<Json<CompetitionResponse>> {
    if let Some(error_msg) = request.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }
    Ok(Json(
        state.services.competitions.update(id, request).await?,
    ))
}

/// Handler for DELETE /competitions/:id
pub async fn delete_competition(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.services.competitions.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for POST /competitions/:id/clubs/:club_id
///
/// Enters the club into the competition and returns the updated view.
pub async fn add_club_to_competition(
    State(state): State<AppState>,
    Path((id, club_id)): Path<(i64, i64)>,
) -> Result<(StatusCode, Json<CompetitionResponse>)> {
    let competition = state.services.competitions.add_club(id, club_id).await?;
    Ok((StatusCode::CREATED, Json(competition)))
}

/// Handler for DELETE /competitions/:id/clubs/:club_id
pub async fn remove_club_from_competition(
    State(state): State<AppState>,
    Path((id, club_id)): Path<(i64, i64)>,
) -> Result<Json<CompetitionResponse>> {
    Ok(Json(
        state.services.competitions.remove_club(id, club_id).await?,
    ))
}
