//! Players service

use crate::cache::EntityCache;
use crate::domain::{Club, Country, EntityKind, Player};
use crate::error::{ApiError, Result};
use crate::models::{
    ClubSummary, CountryResponse, CreatePlayerRequest, Page, PageQuery, PlayerResponse,
    UpdatePlayerRequest,
};
use crate::repo::DynRepo;

// == Players Service ==
/// CRUD for players. Player views embed the club and the nationality;
/// any change to a player's club assignment also invalidates the cached
/// club views, whose squads just changed.
#[derive(Clone)]
pub struct PlayersService {
    players: DynRepo<Player>,
    clubs: DynRepo<Club>,
    countries: DynRepo<Country>,
    cache: EntityCache,
}

impl PlayersService {
    pub fn new(
        players: DynRepo<Player>,
        clubs: DynRepo<Club>,
        countries: DynRepo<Country>,
        cache: EntityCache,
    ) -> Self {
        Self {
            players,
            clubs,
            countries,
            cache,
        }
    }

    // == Reads ==
    pub async fn list(&self, query: &PageQuery) -> Result<Page<PlayerResponse>> {
        self.cache
            .read_through_page(EntityKind::Players, query.page, query.limit, || {
                self.load_page(query)
            })
            .await
    }

    pub async fn get(&self, id: i64) -> Result<PlayerResponse> {
        self.cache
            .read_through(EntityKind::Players, id, || self.load_detail(id))
            .await
    }

    async fn load_page(&self, query: &PageQuery) -> Result<Page<PlayerResponse>> {
        let (players, total) = self.players.find_page(query.offset(), query.limit).await?;
        let mut items = Vec::with_capacity(players.len());
        for player in players {
            items.push(self.assemble(player).await?);
        }
        Ok(Page::new(items, query, total))
    }

    async fn load_detail(&self, id: i64) -> Result<PlayerResponse> {
        let player = self.require_player(id).await?;
        self.assemble(player).await
    }

    // == Writes ==
    pub async fn create(&self, request: CreatePlayerRequest) -> Result<PlayerResponse> {
        if let Some(club_id) = request.club_id {
            self.require_club(club_id).await?;
        }
        self.require_country(request.nationality_id).await?;

        let player = self
            .players
            .save(Player {
                id: 0,
                name: request.name,
                age: request.age,
                position: request.position,
                rating: request.rating,
                market_value: request.market_value,
                image_url: request.image_url,
                club_id: request.club_id,
                nationality_id: request.nationality_id,
            })
            .await?;

        self.cache.invalidate(EntityKind::Players).await;
        if player.club_id.is_some() {
            self.cache.invalidate(EntityKind::Clubs).await;
        }
        self.assemble(player).await
    }

    /// Creates players one by one; the first failure aborts the rest
    /// while players already created stay.
    pub async fn create_bulk(
        &self,
        requests: Vec<CreatePlayerRequest>,
    ) -> Result<Vec<PlayerResponse>> {
        let mut created = Vec::with_capacity(requests.len());
        for request in requests {
            created.push(self.create(request).await?);
        }
        Ok(created)
    }

    pub async fn update(&self, id: i64, request: UpdatePlayerRequest) -> Result<PlayerResponse> {
        let mut player = self.require_player(id).await?;
        let previous_club = player.club_id;

        if let Some(name) = request.name {
            player.name = name;
        }
        if let Some(age) = request.age {
            player.age = age;
        }
        if let Some(position) = request.position {
            player.position = position;
        }
        if let Some(rating) = request.rating {
            player.rating = rating;
        }
        if let Some(market_value) = request.market_value {
            player.market_value = market_value;
        }
        if let Some(image_url) = request.image_url {
            player.image_url = image_url;
        }
        if let Some(club_id) = request.club_id {
            self.require_club(club_id).await?;
            player.club_id = Some(club_id);
        }
        if let Some(nationality_id) = request.nationality_id {
            self.require_country(nationality_id).await?;
            player.nationality_id = nationality_id;
        }

        let player = self.players.save(player).await?;

        self.cache.invalidate(EntityKind::Players).await;
        if player.club_id != previous_club {
            self.cache.invalidate(EntityKind::Clubs).await;
        }
        self.assemble(player).await
    }

    pub async fn remove(&self, id: i64) -> Result<()> {
        let player = self.require_player(id).await?;
        self.players.delete(&player).await?;

        self.cache.invalidate(EntityKind::Players).await;
        if player.club_id.is_some() {
            self.cache.invalidate(EntityKind::Clubs).await;
        }
        Ok(())
    }

    // == Helpers ==
    async fn require_player(&self, id: i64) -> Result<Player> {
        self.players
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Player with ID {id} not found")))
    }

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

    async fn assemble(&self, player: Player) -> Result<PlayerResponse> {
        let club = match player.club_id {
            Some(club_id) => {
                let club = self.clubs.find_by_id(club_id).await?.ok_or_else(|| {
                    ApiError::Internal(format!("Player {} references a missing club", player.id))
                })?;
                Some(ClubSummary::from(&club))
            }
            None => None,
        };

        let nationality = self
            .countries
            .find_by_id(player.nationality_id)
            .await?
            .ok_or_else(|| {
                ApiError::Internal(format!("Player {} references a missing country", player.id))
            })?;

        Ok(PlayerResponse {
            id: player.id,
            name: player.name,
            age: player.age,
            position: player.position,
            rating: player.rating,
            market_value: player.market_value,
            image_url: player.image_url,
            club,
            nationality: CountryResponse::from(nationality),
        })
    }
}
