//! Domain Model
//!
//! Entity types for the football reference data set, plus the small
//! amount of shared machinery the storage and cache layers need:
//! [`EntityKind`] names each collection (and doubles as the cache key
//! namespace) and [`Entity`] exposes identity and unique fields in a
//! uniform way.

mod club;
mod competition;
mod country;
mod player;
mod user;

pub use club::Club;
pub use competition::{Competition, CompetitionType};
pub use country::Country;
pub use player::{Player, Position};
pub use user::{Role, User};

/// The five entity collections served by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Clubs,
    Players,
    Competitions,
    Countries,
    Users,
}

impl EntityKind {
    /// Namespace prefix for cache keys of this collection.
    ///
    /// Every cached view of the collection starts with this string, so
    /// prefix deletion wipes single-entity and page views together.
    pub fn key_prefix(self) -> &'static str {
        match self {
            EntityKind::Clubs => "clubs",
            EntityKind::Players => "players",
            EntityKind::Competitions => "competitions",
            EntityKind::Countries => "countries",
            EntityKind::Users => "users",
        }
    }
}

/// Behavior every stored entity shares.
///
/// `id` 0 marks an entity that has not been persisted yet; the repository
/// assigns the real id on save. `unique_fields` lists the fields guarded
/// by uniqueness checks, and `unique_field` reads one by name.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Collection this entity belongs to.
    const KIND: EntityKind;

    fn id(&self) -> i64;

    fn set_id(&mut self, id: i64);

    /// Field names that carry a uniqueness constraint.
    fn unique_fields() -> &'static [&'static str];

    /// Value of a unique field, or None when the name is not one.
    fn unique_field(&self, field: &str) -> Option<&str>;
}
