//! Country entity

use super::{Entity, EntityKind};

/// A country, referenced by clubs (home country), players (nationality)
/// and competitions (host country).
#[derive(Debug, Clone, PartialEq)]
pub struct Country {
    pub id: i64,
    /// Unique display name
    pub name: String,
    /// Unique ISO 3166 code, 2 or 3 letters
    pub iso_code: String,
    pub flag_url: String,
}

impl Entity for Country {
    const KIND: EntityKind = EntityKind::Countries;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn unique_fields() -> &'static [&'static str] {
        &["name", "iso_code"]
    }

    fn unique_field(&self, field: &str) -> Option<&str> {
        match field {
            "name" => Some(&self.name),
            "iso_code" => Some(&self.iso_code),
            _ => None,
        }
    }
}
