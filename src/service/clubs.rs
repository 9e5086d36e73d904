//! Clubs service

use chrono::Utc;

use crate::cache::EntityCache;
use crate::domain::{Club, Competition, Country, EntityKind, Player};
use crate::error::{ApiError, Result};
use crate::models::{
    ClubResponse, CompetitionSummary, CountryResponse, CreateClubRequest, Page, PageQuery,
    PlayerSummary, UpdateClubRequest,
};
use crate::repo::DynRepo;

// == Clubs Service ==
/// CRUD and squad management for clubs.
///
/// Club views embed the home country, the current squad and competition
/// memberships, so squad changes invalidate both the clubs and players
/// collections.
#[derive(Clone)]
pub struct ClubsService {
    clubs: DynRepo<Club>,
    players: DynRepo<Player>,
    countries: DynRepo<Country>,
    competitions: DynRepo<Competition>,
    cache: EntityCache,
}

impl ClubsService {
    pub fn new(
        clubs: DynRepo<Club>,
        players: DynRepo<Player>,
        countries: DynRepo<Country>,
        competitions: DynRepo<Competition>,
        cache: EntityCache,
    ) -> Self {
        Self {
            clubs,
            players,
            countries,
            competitions,
            cache,
        }
    }

    // == Reads ==
    pub async fn list(&self, query: &PageQuery) -> Result<Page<ClubResponse>> {
        self.cache
            .read_through_page(EntityKind::Clubs, query.page, query.limit, || {
                self.load_page(query)
            })
            .await
    }

    pub async fn get(&self, id: i64) -> Result<ClubResponse> {
        self.cache
            .read_through(EntityKind::Clubs, id, || self.load_detail(id))
            .await
    }

    async fn load_page(&self, query: &PageQuery) -> Result<Page<ClubResponse>> {
        let (clubs, total) = self.clubs.find_page(query.offset(), query.limit).await?;
        let mut items = Vec::with_capacity(clubs.len());
        for club in clubs {
            items.push(self.assemble(club).await?);
        }
        Ok(Page::new(items, query, total))
    }

    async fn load_detail(&self, id: i64) -> Result<ClubResponse> {
        let club = self.require_club(id).await?;
        self.assemble(club).await
    }

    // == Writes ==
    pub async fn create(&self, request: CreateClubRequest) -> Result<ClubResponse> {
        self.ensure_name_free(&request.name).await?;
        let country = self.require_country(request.country_id).await?;

        let club = self
            .clubs
            .save(Club {
                id: 0,
                name: request.name,
                logo_url: request.logo_url,
                established_at: request
                    .established_at
                    .unwrap_or_else(|| Utc::now().date_naive()),
                country_id: country.id,
            })
            .await?;

        self.cache.invalidate(EntityKind::Clubs).await;
        self.assemble(club).await
    }

    /// Creates clubs one by one; the first failure aborts the rest while
    /// clubs already created stay.
    pub async fn create_bulk(&self, requests: Vec<CreateClubRequest>) -> Result<Vec<ClubResponse>> {
        let mut created = Vec::with_capacity(requests.len());
        for request in requests {
            created.push(self.create(request).await?);
        }
        Ok(created)
    }

    pub async fn update(&self, id: i64, request: UpdateClubRequest) -> Result<ClubResponse> {
        let mut club = self.require_club(id).await?;

        if let Some(name) = request.name {
            // Only a changed name can collide with another club's
            if name != club.name {
                self.ensure_name_free(&name).await?;
                club.name = name;
            }
        }
        if let Some(logo_url) = request.logo_url {
            club.logo_url = logo_url;
        }
        if let Some(country_id) = request.country_id {
            self.require_country(country_id).await?;
            club.country_id = country_id;
        }

        let club = self.clubs.save(club).await?;
        self.cache.invalidate(EntityKind::Clubs).await;
        self.assemble(club).await
    }

    pub async fn remove(&self, id: i64) -> Result<()> {
        let club = self.require_club(id).await?;

        // Detach squad members and withdraw from competitions before
        // the club row goes away
        for mut player in self.players.find_all().await? {
            if player.club_id == Some(club.id) {
                player.club_id = None;
                self.players.save(player).await?;
            }
        }
        for mut competition in self.competitions.find_all().await? {
            if competition.club_ids.contains(&club.id) {
                competition.club_ids.retain(|&club_id| club_id != club.id);
                self.competitions.save(competition).await?;
            }
        }

        self.clubs.delete(&club).await?;

        self.cache.invalidate(EntityKind::Clubs).await;
        self.cache.invalidate(EntityKind::Players).await;
        self.cache.invalidate(EntityKind::Competitions).await;
        Ok(())
    }

    // == Squad Management ==
    /// Signs a player for the club. A player already at another club is
    /// transferred; a player already at this club is a conflict.
    pub async fn add_player(&self, club_id: i64, player_id: i64) -> Result<ClubResponse> {
        let club = self.require_club(club_id).await?;
        let mut player = self.require_player(player_id).await?;

        if player.club_id == Some(club.id) {
            return Err(ApiError::Conflict(format!(
                "Player with ID {player_id} already exists in the club with ID {club_id}"
            )));
        }

        player.club_id = Some(club.id);
        self.players.save(player).await?;

        self.cache.invalidate(EntityKind::Clubs).await;
        self.cache.invalidate(EntityKind::Players).await;
        self.assemble(club).await
    }

    /// Releases a player from the club.
    pub async fn remove_player(&self, club_id: i64, player_id: i64) -> Result<ClubResponse> {
        let club = self.require_club(club_id).await?;
        let mut player = self.require_player(player_id).await?;

        if player.club_id != Some(club.id) {
            return Err(ApiError::BadRequest(format!(
                "Player with ID {player_id} does not exist in the club with ID {club_id}"
            )));
        }

        player.club_id = None;
        self.players.save(player).await?;

        self.cache.invalidate(EntityKind::Clubs).await;
        self.cache.invalidate(EntityKind::Players).await;
        self.assemble(club).await
    }

    // == Helpers ==
    async fn require_club(&self, id: i64) -> Result<Club> {
        self.clubs
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Club with id {id} does not exist")))
    }

    async fn require_country(&self, id: i64) -> Result<Country> {
        self.countries
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Country with id {id} does not exist")))
    }

    async fn require_player(&self, id: i64) -> Result<Player> {
        self.players
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Player with ID {id} not found")))
    }

    async fn ensure_name_free(&self, name: &str) -> Result<()> {
        if self.clubs.exists_by_unique_field("name", name).await? {
            return Err(ApiError::Conflict(format!(
                "Club with name {name} already exists"
            )));
        }
        Ok(())
    }

    async fn assemble(&self, club: Club) -> Result<ClubResponse> {
        let country = self
            .countries
            .find_by_id(club.country_id)
            .await?
            .ok_or_else(|| {
                ApiError::Internal(format!("Club {} references a missing country", club.id))
            })?;

        let players: Vec<PlayerSummary> = self
            .players
            .find_all()
            .await?
            .iter()
            .filter(|player| player.club_id == Some(club.id))
            .map(PlayerSummary::from)
            .collect();

        let competitions: Vec<CompetitionSummary> = self
            .competitions
            .find_all()
            .await?
            .iter()
            .filter(|competition| competition.club_ids.contains(&club.id))
            .map(CompetitionSummary::from)
            .collect();

        Ok(ClubResponse {
            id: club.id,
            name: club.name,
            logo_url: club.logo_url,
            established_at: club.established_at,
            country: CountryResponse::from(country),
            players,
            competitions,
        })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheClient, MemoryStore};
    use crate::domain::Position;
    use crate::repo::Repos;
    use std::sync::Arc;

    fn fixture() -> (ClubsService, Repos) {
        let repos = Repos::in_memory();
        let cache = EntityCache::new(CacheClient::new(Arc::new(MemoryStore::new()), 60));
        let service = ClubsService::new(
            repos.clubs.clone(),
            repos.players.clone(),
            repos.countries.clone(),
            repos.competitions.clone(),
            cache,
        );
        (service, repos)
    }

    async fn seed_country(repos: &Repos) -> Country {
        repos
            .countries
            .save(Country {
                id: 0,
                name: "England".to_string(),
                iso_code: "GB".to_string(),
                flag_url: "https://flags.example.com/gb.png".to_string(),
            })
            .await
            .unwrap()
    }

    async fn seed_player(repos: &Repos, nationality_id: i64, club_id: Option<i64>) -> Player {
        repos
            .players
            .save(Player {
                id: 0,
                name: "Bukayo Saka".to_string(),
                age: 23,
                position: Position::Rw,
                rating: 86,
                market_value: 120_000_000.0,
                image_url: "https://cdn.example.com/saka.png".to_string(),
                club_id,
                nationality_id,
            })
            .await
            .unwrap()
    }

    fn club_request(name: &str, country_id: i64) -> CreateClubRequest {
        CreateClubRequest {
            name: name.to_string(),
            logo_url: "https://cdn.example.com/club.png".to_string(),
            country_id,
            established_at: None,
        }
    }

    #[tokio::test]
    async fn test_create_resolves_country() {
        let (service, repos) = fixture();
        let country = seed_country(&repos).await;

        let club = service
            .create(club_request("Arsenal", country.id))
            .await
            .unwrap();

        assert_eq!(club.name, "Arsenal");
        assert_eq!(club.country.iso_code, "GB");
        assert!(club.players.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_unknown_country() {
        let (service, _repos) = fixture();

        let err = service.create(club_request("Arsenal", 99)).await.unwrap_err();
        assert_eq!(err.to_string(), "Country with id 99 does not exist");
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let (service, repos) = fixture();
        let country = seed_country(&repos).await;

        service
            .create(club_request("Arsenal", country.id))
            .await
            .unwrap();
        let err = service
            .create(club_request("Arsenal", country.id))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Club with name Arsenal already exists");
    }

    #[tokio::test]
    async fn test_update_same_name_is_not_a_conflict() {
        let (service, repos) = fixture();
        let country = seed_country(&repos).await;
        let club = service
            .create(club_request("Arsenal", country.id))
            .await
            .unwrap();

        let updated = service
            .update(
                club.id,
                UpdateClubRequest {
                    name: Some("Arsenal".to_string()),
                    logo_url: Some("https://cdn.example.com/new.png".to_string()),
                    country_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.logo_url, "https://cdn.example.com/new.png");
    }

    #[tokio::test]
    async fn test_add_player_twice_is_a_conflict() {
        let (service, repos) = fixture();
        let country = seed_country(&repos).await;
        let club = service
            .create(club_request("Arsenal", country.id))
            .await
            .unwrap();
        let player = seed_player(&repos, country.id, None).await;

        let view = service.add_player(club.id, player.id).await.unwrap();
        assert_eq!(view.players.len(), 1);

        let err = service.add_player(club.id, player.id).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Player with ID {} already exists in the club with ID {}",
                player.id, club.id
            )
        );
    }

    #[tokio::test]
    async fn test_remove_player_not_in_club() {
        let (service, repos) = fixture();
        let country = seed_country(&repos).await;
        let club = service
            .create(club_request("Arsenal", country.id))
            .await
            .unwrap();
        let player = seed_player(&repos, country.id, None).await;

        let err = service.remove_player(club.id, player.id).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Player with ID {} does not exist in the club with ID {}",
                player.id, club.id
            )
        );
    }

    #[tokio::test]
    async fn test_remove_detaches_players() {
        let (service, repos) = fixture();
        let country = seed_country(&repos).await;
        let club = service
            .create(club_request("Arsenal", country.id))
            .await
            .unwrap();
        let player = seed_player(&repos, country.id, Some(club.id)).await;

        service.remove(club.id).await.unwrap();

        let freed = repos.players.find_by_id(player.id).await.unwrap().unwrap();
        assert_eq!(freed.club_id, None);
        assert!(repos.clubs.find_by_id(club.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_get_missing_club() {
        let (service, _repos) = fixture();

        let err = service.get(42).await.unwrap_err();
        assert_eq!(err.to_string(), "Club with id 42 does not exist");
    }
}
