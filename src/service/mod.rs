//! Entity Services
//!
//! Business logic per collection: validation against the stored data,
//! referential integrity, and the caching discipline. Reads go through
//! the cache; writes go straight to the repositories and invalidate the
//! affected collections only after the data has been committed.

mod clubs;
mod competitions;
mod countries;
mod players;
mod users;

pub use clubs::ClubsService;
pub use competitions::CompetitionsService;
pub use countries::CountriesService;
pub use players::PlayersService;
pub use users::UsersService;

use crate::cache::EntityCache;
use crate::repo::Repos;

/// All entity services, wired over one repository set and one cache.
#[derive(Clone)]
pub struct Services {
    pub clubs: ClubsService,
    pub players: PlayersService,
    pub countries: CountriesService,
    pub competitions: CompetitionsService,
    pub users: UsersService,
}

impl Services {
    pub fn new(repos: Repos, cache: EntityCache) -> Self {
        Self {
            clubs: ClubsService::new(
                repos.clubs.clone(),
                repos.players.clone(),
                repos.countries.clone(),
                repos.competitions.clone(),
                cache.clone(),
            ),
            players: PlayersService::new(
                repos.players.clone(),
                repos.clubs.clone(),
                repos.countries.clone(),
                cache.clone(),
            ),
            countries: CountriesService::new(
                repos.countries.clone(),
                repos.clubs.clone(),
                repos.players.clone(),
                repos.competitions.clone(),
                cache.clone(),
            ),
            competitions: CompetitionsService::new(
                repos.competitions.clone(),
                repos.clubs.clone(),
                repos.countries.clone(),
                cache.clone(),
            ),
            users: UsersService::new(repos.users, cache),
        }
    }
}
