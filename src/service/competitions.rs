//! Competitions service

use chrono::Utc;

use crate::cache::EntityCache;
use crate::domain::{Club, Competition, Country, EntityKind};
use crate::error::{ApiError, Result};
use crate::models::{
    ClubSummary, CompetitionResponse, CountryResponse, CreateCompetitionRequest, Page, PageQuery,
    UpdateCompetitionRequest,
};
use crate::repo::DynRepo;

// == Competitions Service ==
/// CRUD and club membership for competitions. The competition owns the
/// membership list, but club views render it too, so membership changes
/// invalidate both collections.
#[derive(Clone)]
pub struct CompetitionsService {
    competitions: DynRepo<Competition>,
    clubs: DynRepo<Club>,
    countries: DynRepo<Country>,
    cache: EntityCache,
}

impl CompetitionsService {
    pub fn new(
        competitions: DynRepo<Competition>,
        clubs: DynRepo<Club>,
        countries: DynRepo<Country>,
        cache: EntityCache,
    ) -> Self {
        Self {
            competitions,
            clubs,
            countries,
            cache,
        }
    }

    // == Reads ==
    pub async fn list(&self, query: &PageQuery) -> Result<Page<CompetitionResponse>> {
        self.cache
            .read_through_page(EntityKind::Competitions, query.page, query.limit, || {
                self.load_page(query)
            })
            .await
    }

    pub async fn get(&self, id: i64) -> Result<CompetitionResponse> {
        self.cache
            .read_through(EntityKind::Competitions, id, || self.load_detail(id))
            .await
    }

    async fn load_page(&self, query: &PageQuery) -> Result<Page<CompetitionResponse>> {
        let (competitions, total) = self
            .competitions
            .find_page(query.offset(), query.limit)
            .await?;
        let mut items = Vec::with_capacity(competitions.len());
        for competition in competitions {
            items.push(self.assemble(competition).await?);
        }
        Ok(Page::new(items, query, total))
    }

    async fn load_detail(&self, id: i64) -> Result<CompetitionResponse> {
        let competition = self.require_competition(id).await?;
        self.assemble(competition).await
    }

    // == Writes ==
    pub async fn create(&self, request: CreateCompetitionRequest) -> Result<CompetitionResponse> {
        self.ensure_name_free(&request.name).await?;

        if let Some(country_id) = request.country_id {
            self.require_country(country_id).await?;
        }

        let mut club_ids = request.club_ids.unwrap_or_default();
        club_ids.dedup();
        for club_id in &club_ids {
            self.require_club(*club_id).await?;
        }

        let competition = self
            .competitions
            .save(Competition {
                id: 0,
                name: request.name,
                logo_url: request.logo_url,
                established_at: request
                    .established_at
                    .unwrap_or_else(|| Utc::now().date_naive()),
                competition_type: request.competition_type,
                country_id: request.country_id,
                club_ids,
            })
            .await?;

        self.cache.invalidate(EntityKind::Competitions).await;
        if !competition.club_ids.is_empty() {
            self.cache.invalidate(EntityKind::Clubs).await;
        }
        self.assemble(competition).await
    }

    /// Creates competitions one by one; the first failure aborts the
    /// rest while competitions already created stay.
    pub async fn create_bulk(
        &self,
        requests: Vec<CreateCompetitionRequest>,
    ) -> Result<Vec<CompetitionResponse>> {
        let mut created = Vec::with_capacity(requests.len());
        for request in requests {
            created.push(self.create(request).await?);
        }
        Ok(created)
    }

    pub async fn update(
        &self,
        id: i64,
        request: UpdateCompetitionRequest,
    ) -> Result<CompetitionResponse> {
        let mut competition = self.require_competition(id).await?;

        if let Some(name) = request.name {
            if name != competition.name {
                self.ensure_name_free(&name).await?;
                competition.name = name;
            }
        }
        if let Some(logo_url) = request.logo_url {
            competition.logo_url = logo_url;
        }
        if let Some(competition_type) = request.competition_type {
            competition.competition_type = competition_type;
        }
        if let Some(country_id) = request.country_id {
            self.require_country(country_id).await?;
            competition.country_id = Some(country_id);
        }

        let competition = self.competitions.save(competition).await?;
        self.cache.invalidate(EntityKind::Competitions).await;
        self.assemble(competition).await
    }

    pub async fn remove(&self, id: i64) -> Result<()> {
        let competition = self.require_competition(id).await?;
        self.competitions.delete(&competition).await?;

        self.cache.invalidate(EntityKind::Competitions).await;
        if !competition.club_ids.is_empty() {
            self.cache.invalidate(EntityKind::Clubs).await;
        }
        Ok(())
    }

    // == Membership ==
    pub async fn add_club(&self, competition_id: i64, club_id: i64) -> Result<CompetitionResponse> {
        let mut competition = self.require_competition(competition_id).await?;
        let club = self.require_club(club_id).await?;

        if competition.club_ids.contains(&club.id) {
            return Err(ApiError::Conflict(format!(
                "Club with id {club_id} already exists in competition with id {competition_id}"
            )));
        }

        competition.club_ids.push(club.id);
        let competition = self.competitions.save(competition).await?;

        self.cache.invalidate(EntityKind::Competitions).await;
        self.cache.invalidate(EntityKind::Clubs).await;
        self.assemble(competition).await
    }

    /// Withdraws a club from the competition. Withdrawing a club that
    /// is not a member leaves the list as it was.
    pub async fn remove_club(
        &self,
        competition_id: i64,
        club_id: i64,
    ) -> Result<CompetitionResponse> {
        let mut competition = self.require_competition(competition_id).await?;
        let club = self.require_club(club_id).await?;

        competition.club_ids.retain(|&member| member != club.id);
        let competition = self.competitions.save(competition).await?;

        self.cache.invalidate(EntityKind::Competitions).await;
        self.cache.invalidate(EntityKind::Clubs).await;
        self.assemble(competition).await
    }

    // == Helpers ==
    async fn require_competition(&self, id: i64) -> Result<Competition> {
        self.competitions
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Competition with id {id} does not exist")))
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

    async fn ensure_name_free(&self, name: &str) -> Result<()> {
        if self
            .competitions
            .exists_by_unique_field("name", name)
            .await?
        {
            return Err(ApiError::Conflict(format!(
                "Competition with name {name} already exists"
            )));
        }
        Ok(())
    }

    async fn assemble(&self, competition: Competition) -> Result<CompetitionResponse> {
        let country = match competition.country_id {
            Some(country_id) => {
                let country = self.countries.find_by_id(country_id).await?.ok_or_else(|| {
                    ApiError::Internal(format!(
                        "Competition {} references a missing country",
                        competition.id
                    ))
                })?;
                Some(CountryResponse::from(country))
            }
            None => None,
        };

        let mut clubs = Vec::with_capacity(competition.club_ids.len());
        for club_id in &competition.club_ids {
            let club = self.clubs.find_by_id(*club_id).await?.ok_or_else(|| {
                ApiError::Internal(format!(
                    "Competition {} references a missing club",
                    competition.id
                ))
            })?;
            clubs.push(ClubSummary::from(&club));
        }

        Ok(CompetitionResponse {
            id: competition.id,
            name: competition.name,
            logo_url: competition.logo_url,
            established_at: competition.established_at,
            competition_type: competition.competition_type,
            country,
            clubs,
        })
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheClient, MemoryStore};
    use crate::domain::CompetitionType;
    use crate::repo::Repos;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn fixture() -> (CompetitionsService, Repos) {
        let repos = Repos::in_memory();
        let cache = EntityCache::new(CacheClient::new(Arc::new(MemoryStore::new()), 60));
        let service = CompetitionsService::new(
            repos.competitions.clone(),
            repos.clubs.clone(),
            repos.countries.clone(),
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

    async fn seed_club(repos: &Repos, name: &str, country_id: i64) -> Club {
        repos
            .clubs
            .save(Club {
                id: 0,
                name: name.to_string(),
                logo_url: "https://cdn.example.com/club.png".to_string(),
                established_at: NaiveDate::from_ymd_opt(1886, 10, 1).unwrap(),
                country_id,
            })
            .await
            .unwrap()
    }

    fn competition_request(name: &str, country_id: Option<i64>) -> CreateCompetitionRequest {
        CreateCompetitionRequest {
            name: name.to_string(),
            logo_url: "https://cdn.example.com/comp.png".to_string(),
            established_at: None,
            competition_type: CompetitionType::League,
            country_id,
            club_ids: None,
        }
    }

    #[tokio::test]
    async fn test_create_without_country() {
        let (service, _repos) = fixture();

        let competition = service
            .create(competition_request("Champions League", None))
            .await
            .unwrap();

        assert!(competition.country.is_none());
        assert!(competition.clubs.is_empty());
    }

    #[tokio::test]
    async fn test_create_with_initial_clubs() {
        let (service, repos) = fixture();
        let country = seed_country(&repos).await;
        let club = seed_club(&repos, "Arsenal", country.id).await;

        let mut request = competition_request("Premier League", Some(country.id));
        request.club_ids = Some(vec![club.id]);

        let competition = service.create(request).await.unwrap();
        assert_eq!(competition.clubs.len(), 1);
        assert_eq!(competition.country.unwrap().name, "England");
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let (service, _repos) = fixture();
        service
            .create(competition_request("Premier League", None))
            .await
            .unwrap();

        let err = service
            .create(competition_request("Premier League", None))
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Competition with name Premier League already exists"
        );
    }

    #[tokio::test]
    async fn test_add_club_twice_is_a_conflict() {
        let (service, repos) = fixture();
        let country = seed_country(&repos).await;
        let club = seed_club(&repos, "Arsenal", country.id).await;
        let competition = service
            .create(competition_request("Premier League", None))
            .await
            .unwrap();

        service.add_club(competition.id, club.id).await.unwrap();
        let err = service.add_club(competition.id, club.id).await.unwrap_err();

        assert_eq!(
            err.to_string(),
            format!(
                "Club with id {} already exists in competition with id {}",
                club.id, competition.id
            )
        );
    }

    #[tokio::test]
    async fn test_remove_club_is_silent_for_non_members() {
        let (service, repos) = fixture();
        let country = seed_country(&repos).await;
        let club = seed_club(&repos, "Arsenal", country.id).await;
        let competition = service
            .create(competition_request("Premier League", None))
            .await
            .unwrap();

        let view = service
            .remove_club(competition.id, club.id)
            .await
            .unwrap();
        assert!(view.clubs.is_empty());
    }

    #[tokio::test]
    async fn test_update_does_not_touch_membership() {
        let (service, repos) = fixture();
        let country = seed_country(&repos).await;
        let club = seed_club(&repos, "Arsenal", country.id).await;
        let competition = service
            .create(competition_request("Premier League", None))
            .await
            .unwrap();
        service.add_club(competition.id, club.id).await.unwrap();

        let updated = service
            .update(
                competition.id,
                UpdateCompetitionRequest {
                    name: Some("Premier League".to_string()),
                    logo_url: None,
                    competition_type: Some(CompetitionType::Cup),
                    country_id: None,
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.competition_type, CompetitionType::Cup);
        assert_eq!(updated.clubs.len(), 1);
    }

    #[tokio::test]
    async fn test_get_missing_competition() {
        let (service, _repos) = fixture();

        let err = service.get(9).await.unwrap_err();
        assert_eq!(err.to_string(), "Competition with id 9 does not exist");
    }
}
