//! Repository Seam
//!
//! The storage boundary the services talk through. The trait stays
//! deliberately small so a SQL-backed implementation can slot in behind
//! it; the in-memory implementation in [`memory`] is what the server
//! runs with today.

mod memory;

pub use memory::MemoryRepo;

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Club, Competition, Country, Entity, Player, User};

// == Repository Error ==
/// Failure inside a storage backend.
#[derive(Debug, Error)]
pub enum RepoError {
    /// A uniqueness probe named a field the entity does not have
    #[error("unknown unique field '{0}'")]
    UnknownField(String),

    /// The backend could not complete the operation
    #[error("storage unavailable: {0}")]
    Unavailable(String),
}

// == Repository Trait ==
/// Persistence operations shared by every entity collection.
///
/// `save` persists inserts and updates alike: an entity with id 0 gets a
/// fresh id assigned, any other id overwrites that slot. `find_page`
/// also reports the total count so callers can build page envelopes
/// without a second query.
#[async_trait]
pub trait Repository<E: Entity>: Send + Sync {
    async fn find_by_id(&self, id: i64) -> Result<Option<E>, RepoError>;

    /// Every entity in the collection, in id order.
    async fn find_all(&self) -> Result<Vec<E>, RepoError>;

    /// One page of entities in id order, plus the total count.
    async fn find_page(&self, offset: u64, limit: u64) -> Result<(Vec<E>, u64), RepoError>;

    /// Persists the entity, returning it with its id filled in.
    async fn save(&self, entity: E) -> Result<E, RepoError>;

    async fn delete(&self, entity: &E) -> Result<(), RepoError>;

    /// Whether any entity holds `value` in the named unique field.
    async fn exists_by_unique_field(&self, field: &str, value: &str) -> Result<bool, RepoError>;
}

/// Shared handle to a repository implementation.
pub type DynRepo<E> = Arc<dyn Repository<E>>;

// == Repository Set ==
/// One repository per collection, wired into the services at startup.
#[derive(Clone)]
pub struct Repos {
    pub clubs: DynRepo<Club>,
    pub players: DynRepo<Player>,
    pub countries: DynRepo<Country>,
    pub competitions: DynRepo<Competition>,
    pub users: DynRepo<User>,
}

impl Repos {
    /// Fresh, empty in-memory repositories.
    pub fn in_memory() -> Self {
        Self {
            clubs: Arc::new(MemoryRepo::new()),
            players: Arc::new(MemoryRepo::new()),
            countries: Arc::new(MemoryRepo::new()),
            competitions: Arc::new(MemoryRepo::new()),
            users: Arc::new(MemoryRepo::new()),
        }
    }
}
