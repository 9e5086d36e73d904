//! Request DTOs
//!
//! Incoming bodies for the write endpoints. Create requests carry the
//! full field set; update requests make every field optional and only
//! touch what is present. Each type validates itself and reports the
//! first violation, which handlers turn into a 400.

use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use crate::domain::{CompetitionType, Position};

/// Accepts http(s) URLs; anything else fails field validation.
fn is_url(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

fn is_email(value: &str) -> bool {
    matches!(value.split_once('@'), Some((local, domain)) if !local.is_empty() && domain.contains('.'))
}

fn is_future(date: NaiveDate) -> bool {
    date > Utc::now().date_naive()
}

// == Clubs ==
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClubRequest {
    pub name: String,
    pub logo_url: String,
    pub country_id: i64,
    pub established_at: Option<NaiveDate>,
}

impl CreateClubRequest {
    pub fn validate(&self) -> Option<String> {
        if !(3..=100).contains(&self.name.chars().count()) {
            return Some("Club name must be between 3 and 100 characters".to_string());
        }
        if !is_url(&self.logo_url) {
            return Some("Logo URL must be a valid URL".to_string());
        }
        if self.country_id < 1 {
            return Some("Country ID must be a positive number".to_string());
        }
        if self.established_at.is_some_and(is_future) {
            return Some("Date cannot be in the future".to_string());
        }
        None
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateClubRequest {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub country_id: Option<i64>,
}

impl UpdateClubRequest {
    pub fn validate(&self) -> Option<String> {
        if let Some(name) = &self.name {
            if !(3..=100).contains(&name.chars().count()) {
                return Some("Club name must be between 3 and 100 characters".to_string());
            }
        }
        if let Some(logo_url) = &self.logo_url {
            if !is_url(logo_url) {
                return Some("Logo URL must be a valid URL".to_string());
            }
        }
        if let Some(country_id) = self.country_id {
            if country_id < 1 {
                return Some("Country ID must be a positive number".to_string());
            }
        }
        None
    }
}

// == Players ==
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlayerRequest {
    pub name: String,
    pub age: u32,
    pub position: Position,
    pub rating: u32,
    pub market_value: f64,
    pub image_url: String,
    pub club_id: Option<i64>,
    pub nationality_id: i64,
}

impl CreatePlayerRequest {
    pub fn validate(&self) -> Option<String> {
        if !(2..=100).contains(&self.name.chars().count()) {
            return Some("Player name must be between 2 and 100 characters".to_string());
        }
        if self.age < 16 {
            return Some("Age must be at least 16".to_string());
        }
        if self.rating < 55 {
            return Some("Rating must be at least 55".to_string());
        }
        if self.rating > 100 {
            return Some("Rating cannot exceed 100".to_string());
        }
        if self.market_value <= 0.0 {
            return Some("Market value must be a positive number".to_string());
        }
        if self.club_id.is_some_and(|id| id < 1) {
            return Some("Club ID must be a positive number".to_string());
        }
        if self.nationality_id < 1 {
            return Some("Nationality ID must be a positive number".to_string());
        }
        None
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdatePlayerRequest {
    pub name: Option<String>,
    pub age: Option<u32>,
    pub position: Option<Position>,
    pub rating: Option<u32>,
    pub market_value: Option<f64>,
    pub image_url: Option<String>,
    pub club_id: Option<i64>,
    pub nationality_id: Option<i64>,
}

impl UpdatePlayerRequest {
    pub fn validate(&self) -> Option<String> {
        if let Some(name) = &self.name {
            if !(2..=100).contains(&name.chars().count()) {
                return Some("Player name must be between 2 and 100 characters".to_string());
            }
        }
        if self.age.is_some_and(|age| age < 16) {
            return Some("Age must be at least 16".to_string());
        }
        if let Some(rating) = self.rating {
            if rating < 55 {
                return Some("Rating must be at least 55".to_string());
            }
            if rating > 100 {
                return Some("Rating cannot exceed 100".to_string());
            }
        }
        if self.market_value.is_some_and(|value| value <= 0.0) {
            return Some("Market value must be a positive number".to_string());
        }
        if self.club_id.is_some_and(|id| id < 1) {
            return Some("Club ID must be a positive number".to_string());
        }
        if self.nationality_id.is_some_and(|id| id < 1) {
            return Some("Nationality ID must be a positive number".to_string());
        }
        None
    }
}

// == Countries ==
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCountryRequest {
    pub name: String,
    pub iso_code: String,
    pub flag_url: String,
}

impl CreateCountryRequest {
    pub fn validate(&self) -> Option<String> {
        if !(1..=50).contains(&self.name.chars().count()) {
            return Some("Country name must be between 1 and 50 characters".to_string());
        }
        if !(2..=3).contains(&self.iso_code.chars().count()) {
            return Some("ISO code must be between 2 and 3 characters".to_string());
        }
        if !is_url(&self.flag_url) {
            return Some("Flag URL must be a valid URL".to_string());
        }
        None
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCountryRequest {
    pub name: Option<String>,
    pub iso_code: Option<String>,
    pub flag_url: Option<String>,
}

impl UpdateCountryRequest {
    pub fn validate(&self) -> Option<String> {
        if let Some(name) = &self.name {
            if !(1..=50).contains(&name.chars().count()) {
                return Some("Country name must be between 1 and 50 characters".to_string());
            }
        }
        if let Some(iso_code) = &self.iso_code {
            if !(2..=3).contains(&iso_code.chars().count()) {
                return Some("ISO code must be between 2 and 3 characters".to_string());
            }
        }
        if let Some(flag_url) = &self.flag_url {
            if !is_url(flag_url) {
                return Some("Flag URL must be a valid URL".to_string());
            }
        }
        None
    }
}

// == Competitions ==
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCompetitionRequest {
    pub name: String,
    pub logo_url: String,
    pub established_at: Option<NaiveDate>,
    pub competition_type: CompetitionType,
    pub country_id: Option<i64>,
    pub club_ids: Option<Vec<i64>>,
}

impl CreateCompetitionRequest {
    pub fn validate(&self) -> Option<String> {
        if !(3..=100).contains(&self.name.chars().count()) {
            return Some("Competition name must be between 3 and 100 characters".to_string());
        }
        if !is_url(&self.logo_url) {
            return Some("Logo URL must be a valid URL".to_string());
        }
        if self.established_at.is_some_and(is_future) {
            return Some("Date cannot be in the future".to_string());
        }
        if self.country_id.is_some_and(|id| id < 1) {
            return Some("Country ID must be a positive number".to_string());
        }
        None
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCompetitionRequest {
    pub name: Option<String>,
    pub logo_url: Option<String>,
    pub competition_type: Option<CompetitionType>,
    pub country_id: Option<i64>,
}

impl UpdateCompetitionRequest {
    pub fn validate(&self) -> Option<String> {
        if let Some(name) = &self.name {
            if !(3..=100).contains(&name.chars().count()) {
                return Some("Competition name must be between 3 and 100 characters".to_string());
            }
        }
        if let Some(logo_url) = &self.logo_url {
            if !is_url(logo_url) {
                return Some("Logo URL must be a valid URL".to_string());
            }
        }
        if self.country_id.is_some_and(|id| id < 1) {
            return Some("Country ID must be a positive number".to_string());
        }
        None
    }
}

// == Users ==
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

impl UpdateUserRequest {
    pub fn validate(&self) -> Option<String> {
        if let Some(email) = &self.email {
            if !is_email(email) {
                return Some("Email must be a valid email address".to_string());
            }
        }
        for password in [&self.new_password, &self.confirm_password]
            .into_iter()
            .flatten()
        {
            if !(5..=50).contains(&password.chars().count()) {
                return Some("Password must be between 5 and 50 characters".to_string());
            }
        }
        None
    }
}
