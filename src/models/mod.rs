//! Request and Response models for the API
//!
//! This module defines the DTOs (Data Transfer Objects) used for
//! serializing/deserializing HTTP request and response bodies, plus the
//! shared pagination envelope.

pub mod pagination;
pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use pagination::{Page, PageQuery};
pub use requests::{
    CreateClubRequest, CreateCompetitionRequest, CreateCountryRequest, CreatePlayerRequest,
    UpdateClubRequest, UpdateCompetitionRequest, UpdateCountryRequest, UpdatePlayerRequest,
    UpdateUserRequest,
};
pub use responses::{
    ClubResponse, ClubSummary, CompetitionResponse, CompetitionSummary, CountryDetailResponse,
    CountryResponse, HealthResponse, PlayerResponse, PlayerSummary, UserResponse,
};
