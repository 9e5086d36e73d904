//! Competition entity

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

/// Kind of competition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CompetitionType {
    League,
    Cup,
    SuperCup,
    International,
    Friendly,
}

/// A competition. Owns the club membership list; clubs do not store a
/// back reference.
#[derive(Debug, Clone, PartialEq)]
pub struct Competition {
    pub id: i64,
    /// Unique display name
    pub name: String,
    pub logo_url: String,
    pub established_at: NaiveDate,
    pub competition_type: CompetitionType,
    /// Host country, None for international competitions
    pub country_id: Option<i64>,
    /// Ids of participating clubs
    pub club_ids: Vec<i64>,
}

impl Entity for Competition {
    const KIND: EntityKind = EntityKind::Competitions;

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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_competition_type_serializes_screaming_snake() {
        let json = serde_json::to_string(&CompetitionType::SuperCup).unwrap();
        assert_eq!(json, "\"SUPER_CUP\"");

        let parsed: CompetitionType = serde_json::from_str("\"LEAGUE\"").unwrap();
        assert_eq!(parsed, CompetitionType::League);
    }
}
