//! Response DTOs
//!
//! Outgoing view types. These are what ends up in the cache, so every
//! type derives Deserialize as well as Serialize and must round-trip
//! through JSON unchanged.
//!
//! Views embed one level of related data: full detail for the entity
//! asked about, summary shapes for everything it references. The user
//! view has no password field at all, cached or not.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Club, Competition, CompetitionType, Country, Player, Position, Role, User};

// == Countries ==
/// Country row, also embedded in club, player and competition views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryResponse {
    pub id: i64,
    pub name: String,
    pub iso_code: String,
    pub flag_url: String,
}

impl From<Country> for CountryResponse {
    fn from(country: Country) -> Self {
        Self {
            id: country.id,
            name: country.name,
            iso_code: country.iso_code,
            flag_url: country.flag_url,
        }
    }
}

/// Country detail with everything that points at it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryDetailResponse {
    pub id: i64,
    pub name: String,
    pub iso_code: String,
    pub flag_url: String,
    pub clubs: Vec<ClubSummary>,
    pub players: Vec<PlayerSummary>,
    pub competitions: Vec<CompetitionSummary>,
}

// == Summary Shapes ==
/// Club reference inside player, competition and country views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubSummary {
    pub id: i64,
    pub name: String,
    pub logo_url: String,
}

impl From<&Club> for ClubSummary {
    fn from(club: &Club) -> Self {
        Self {
            id: club.id,
            name: club.name.clone(),
            logo_url: club.logo_url.clone(),
        }
    }
}

/// Player row without its club linkage, embedded in club and country
/// views where the linkage is implied by the parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSummary {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub position: Position,
    pub rating: u32,
    pub market_value: f64,
    pub image_url: String,
}

impl From<&Player> for PlayerSummary {
    fn from(player: &Player) -> Self {
        Self {
            id: player.id,
            name: player.name.clone(),
            age: player.age,
            position: player.position,
            rating: player.rating,
            market_value: player.market_value,
            image_url: player.image_url.clone(),
        }
    }
}

/// Competition reference inside club and country views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionSummary {
    pub id: i64,
    pub name: String,
    pub logo_url: String,
    pub competition_type: CompetitionType,
}

impl From<&Competition> for CompetitionSummary {
    fn from(competition: &Competition) -> Self {
        Self {
            id: competition.id,
            name: competition.name.clone(),
            logo_url: competition.logo_url.clone(),
            competition_type: competition.competition_type,
        }
    }
}

// == Clubs ==
/// Club detail: home country, current squad, competition memberships.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClubResponse {
    pub id: i64,
    pub name: String,
    pub logo_url: String,
    pub established_at: NaiveDate,
    pub country: CountryResponse,
    pub players: Vec<PlayerSummary>,
    pub competitions: Vec<CompetitionSummary>,
}

// == Players ==
/// Player detail with club and nationality resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerResponse {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub position: Position,
    pub rating: u32,
    pub market_value: f64,
    pub image_url: String,
    pub club: Option<ClubSummary>,
    pub nationality: CountryResponse,
}

// == Competitions ==
/// Competition detail with host country and participating clubs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompetitionResponse {
    pub id: i64,
    pub name: String,
    pub logo_url: String,
    pub established_at: NaiveDate,
    pub competition_type: CompetitionType,
    pub country: Option<CountryResponse>,
    pub clubs: Vec<ClubSummary>,
}

// == Users ==
/// Account view. Deliberately has no password field, so a cached user
/// can never leak a hash.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

// == Health ==
/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }
    }
}
