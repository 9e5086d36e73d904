//! Player entity

use serde::{Deserialize, Serialize};

use super::{Entity, EntityKind};

/// On-pitch position, serialized in its conventional short form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Position {
    Gk,
    Lb,
    Cb,
    Rb,
    Lwb,
    Rwb,
    Cdm,
    Cm,
    Lm,
    Rm,
    Cam,
    Rw,
    Lw,
    St,
    Cf,
}

/// A player. `club_id` is None for free agents; `nationality_id` always
/// points at an existing country.
#[derive(Debug, Clone, PartialEq)]
pub struct Player {
    pub id: i64,
    pub name: String,
    pub age: u32,
    pub position: Position,
    /// Overall rating, 55 to 100
    pub rating: u32,
    /// Market value in euros
    pub market_value: f64,
    pub image_url: String,
    pub club_id: Option<i64>,
    pub nationality_id: i64,
}

impl Entity for Player {
    const KIND: EntityKind = EntityKind::Players;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn unique_fields() -> &'static [&'static str] {
        &[]
    }

    fn unique_field(&self, _field: &str) -> Option<&str> {
        None
    }
}
