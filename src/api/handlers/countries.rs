//! Country handlers

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::error::{ApiError, Result};
use crate::models::{
    CountryDetailResponse, CountryResponse, CreateCountryRequest, Page, PageQuery,
    UpdateCountryRequest,
};

use super::AppState;

/// Handler for GET /countries
pub async fn list_countries(
    State(state): State<AppState>,
    Query(query): Query<PageQuery>,
) -> Result<Json<Page<CountryResponse>>> {
    if let Some(error_msg) = query.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }
    Ok(Json(state.services.countries.list(&query).await?))
}

/// Handler for GET /countries/:id
///
/// Returns the country together with the clubs, players and
/// competitions that reference it.
pub async fn get_country(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CountryDetailResponse>> {
    Ok(Json(state.services.countries.get(id).await?))
}

/// Handler for POST /countries
pub async fn create_country(
    State(state): State<AppState>,
    Json(request): Json<CreateCountryRequest>,
) -> Result<(StatusCode, Json<CountryResponse>)> {
    if let Some(error_msg) = request.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }
    let country = state.services.countries.create(request).await?;
    Ok((StatusCode::CREATED, Json(country)))
}

/// Handler for POST /countries/create-bulk
pub async fn create_countries_bulk(
    State(state): State<AppState>,
    Json(requests): Json<Vec<CreateCountryRequest>>,
) -> Result<(StatusCode, Json<Vec<CountryResponse>>)> {
    for request in &requests {
        if let Some(error_msg) = request.validate() {
            return Err(ApiError::BadRequest(error_msg));
        }
    }
    let countries = state.services.countries.create_bulk(requests).await?;
    Ok((StatusCode::CREATED, Json(countries)))
}

/// Handler for PATCH /countries/:id
pub async fn update_country(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(request): Json<UpdateCountryRequest>,
) -> Result<Json<CountryResponse>> {
    if let Some(error_msg) = request.validate() {
        return Err(ApiError::BadRequest(error_msg));
    }
    Ok(Json(state.services.countries.update(id, request).await?))
}

/// Handler for DELETE /countries/:id
pub async fn delete_country(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode> {
    state.services.countries.remove(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
