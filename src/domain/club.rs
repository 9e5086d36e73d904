//! Club entity

use chrono::NaiveDate;

use super::{Entity, EntityKind};

/// A football club. Players point at their club through `Player::club_id`;
/// competition membership is stored on the competition side.
#[derive(Debug, Clone, PartialEq)]
pub struct Club {
    pub id: i64,
    /// Unique display name
    pub name: String,
    pub logo_url: String,
    pub established_at: NaiveDate,
    /// Home country, must exist
    pub country_id: i64,
}

impl Entity for Club {
    const KIND: EntityKind = EntityKind::Clubs;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn unique_fields() -> &'static [&'static str] {
        &["name"]
    }

    fn unique_field(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            _ => None,
        }
    }
}
