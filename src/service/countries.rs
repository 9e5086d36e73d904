//! Countries service

use crate::cache::EntityCache;
use crate::domain::{Club, Competition, Country, EntityKind, Player};
use crate::error::{ApiError, Result};
use crate::models::{
    ClubSummary, CompetitionSummary, CountryDetailResponse, CountryResponse, CreateCountryRequest,
    Page, PageQuery, PlayerSummary, UpdateCountryRequest,
};
use crate::repo::DynRepo;

// == Countries Service ==
/// CRUD for countries. List views are plain rows; the detail view pulls
/// in every club, player and competition that references the country.
/// Deletion refuses while such references exist.
#[derive(Clone)]
pub struct CountriesService {
    countries: DynRepo<Country>,
    clubs: DynRepo<Club>,
    players: DynRepo<Player>,
    competitions: DynRepo<Competition>,
    cache: EntityCache,
}

impl CountriesService {
    pub fn new(
        countries: DynRepo<Country>,
        clubs: DynRepo<Club>,
        players: DynRepo<Player>,
        competitions: DynRepo<Competition>,
        cache: EntityCache,
    ) -> Self {
        Self {
            countries,
            clubs,
            players,
            competitions,
            cache,
        }
    }

    // == Reads ==
    pub async fn list(&self, query: &PageQuery) -> Result<Page<CountryResponse>> {
        self.cache
            .read_through_page(EntityKind::Countries, query.page, query.limit, || {
                self.load_page(query)
            })
            .await
    }

    pub async fn get(&self, id: i64) -> Result<CountryDetailResponse> {
        self.cache
            .read_through(EntityKind::Countries, id, || self.load_detail(id))
            .await
    }

    async fn load_page(&self, query: &PageQuery) -> Result<Page<CountryResponse>> {
        let (countries, total) = self.countries.find_page(query.offset(), query.limit).await?;
        let items = countries.into_iter().map(CountryResponse::from).collect();
        Ok(Page::new(items, query, total))
    }

    async fn load_detail(&self, id: i64) -> Result<CountryDetailResponse> {
        let country = self.require_country(id).await?;

        let clubs: Vec<ClubSummary> = self
            .clubs
            .find_all()
            .await?
            .iter()
            .filter(|club| club.country_id == country.id)
            .map(ClubSummary::from)
            .collect();

        let players: Vec<PlayerSummary> = self
            .players
            .find_all()
            .await?
            .iter()
            .filter(|player| player.nationality_id == country.id)
            .map(PlayerSummary::from)
            .collect();

        let competitions: Vec<CompetitionSummary> = self
            .competitions
            .find_all()
            .await?
            .iter()
            .filter(|competition| competition.country_id == Some(country.id))
            .map(CompetitionSummary::from)
            .collect();

        Ok(CountryDetailResponse {
            id: country.id,
            name: country.name,
            iso_code: country.iso_code,
            flag_url: country.flag_url,
            clubs,
            players,
            competitions,
        })
    }

    // == Writes ==
    pub async fn create(&self, request: CreateCountryRequest) -> Result<CountryResponse> {
        self.ensure_name_free(&request.name).await?;
        self.ensure_iso_code_free(&request.iso_code).await?;

        let country = self
            .countries
            .save(Country {
                id: 0,
                name: request.name,
                iso_code: request.iso_code,
                flag_url: request.flag_url,
            })
            .await?;

        self.cache.invalidate(EntityKind::Countries).await;
        Ok(CountryResponse::from(country))
    }

    /// Creates countries one by one; the first failure aborts the rest
    /// while countries already created stay.
    pub async fn create_bulk(
        &self,
        requests: Vec<CreateCountryRequest>,
    ) -> Result<Vec<CountryResponse>> {
        let mut created = Vec::with_capacity(requests.len());
        for request in requests {
            created.push(self.create(request).await?);
        }
        Ok(created)
    }

    pub async fn update(&self, id: i64, request: UpdateCountryRequest) -> Result<CountryResponse> {
        let mut country = self.require_country(id).await?;

        if let Some(name) = request.name {
            if name != country.name {
                self.ensure_name_free(&name).await?;
                country.name = name;
            }
        }
        if let Some(iso_code) = request.iso_code {
            if iso_code != country.iso_code {
                self.ensure_iso_code_free(&iso_code).await?;
                country.iso_code = iso_code;
            }
        }
        if let Some(flag_url) = request.flag_url {
            country.flag_url = flag_url;
        }

        let country = self.countries.save(country).await?;
        self.cache.invalidate(EntityKind::Countries).await;
        Ok(CountryResponse::from(country))
    }

    pub async fn remove(&self, id: i64) -> Result<()> {
        let country = self.require_country(id).await?;

        let referenced = self
            .clubs
            .find_all()
            .await?
            .iter()
            .any(|club| club.country_id == country.id)
            || self
                .players
                .find_all()
                .await?
                .iter()
                .any(|player| player.nationality_id == country.id)
            || self
                .competitions
                .find_all()
                .await?
                .iter()
                .any(|competition| competition.country_id == Some(country.id));

        if referenced {
            return Err(ApiError::Conflict(format!(
                "Country with id {id} is still referenced by other records"
            )));
        }

        self.countries.delete(&country).await?;
        self.cache.invalidate(EntityKind::Countries).await;
        Ok(())
    }

    // == Helpers ==
    async fn require_country(&self, id: i64) -> Result<Country> {
        self.countries
            .find_by_id(id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("Country with id {id} does not exist")))
    }

    async fn ensure_name_free(&self, name: &str) -> Result<()> {
        if self.countries.exists_by_unique_field("name", name).await? {
            return Err(ApiError::Conflict(format!(
                "Country with name {name} already exists"
            )));
        }
        Ok(())
    }

    async fn ensure_iso_code_free(&self, iso_code: &str) -> Result<()> {
        if self
            .countries
            .exists_by_unique_field("iso_code", iso_code)
            .await?
        {
            return Err(ApiError::Conflict(format!(
                "Country with ISO code {iso_code} already exists"
            )));
        }
        Ok(())
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{CacheClient, MemoryStore};
    use crate::repo::Repos;
    use chrono::NaiveDate;
    use std::sync::Arc;

    fn fixture() -> (CountriesService, Repos) {
        let repos = Repos::in_memory();
        let cache = EntityCache::new(CacheClient::new(Arc::new(MemoryStore::new()), 60));
        let service = CountriesService::new(
            repos.countries.clone(),
            repos.clubs.clone(),
            repos.players.clone(),
            repos.competitions.clone(),
            cache,
        );
        (service, repos)
    }

    fn country_request(name: &str, iso_code: &str) -> CreateCountryRequest {
        CreateCountryRequest {
            name: name.to_string(),
            iso_code: iso_code.to_string(),
            flag_url: format!("https://flags.example.com/{iso_code}.png"),
        }
    }

    #[tokio::test]
    async fn test_create_and_get_detail() {
        let (service, _repos) = fixture();

        let created = service.create(country_request("England", "GB")).await.unwrap();
        let detail = service.get(created.id).await.unwrap();

        assert_eq!(detail.name, "England");
        assert!(detail.clubs.is_empty());
        assert!(detail.players.is_empty());
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_name() {
        let (service, _repos) = fixture();
        service.create(country_request("England", "GB")).await.unwrap();

        let err = service
            .create(country_request("England", "EN"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Country with name England already exists");
    }

    #[tokio::test]
    async fn test_create_rejects_duplicate_iso_code() {
        let (service, _repos) = fixture();
        service.create(country_request("England", "GB")).await.unwrap();

        let err = service
            .create(country_request("Britain", "GB"))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Country with ISO code GB already exists");
    }

    #[tokio::test]
    async fn test_update_checks_only_changed_fields() {
        let (service, _repos) = fixture();
        let created = service.create(country_request("England", "GB")).await.unwrap();

        // Same name resubmitted must not conflict with itself
        let updated = service
            .update(
                created.id,
                UpdateCountryRequest {
                    name: Some("England".to_string()),
                    iso_code: None,
                    flag_url: Some("https://flags.example.com/new.png".to_string()),
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.flag_url, "https://flags.example.com/new.png");
    }

    #[tokio::test]
    async fn test_detail_collects_references() {
        let (service, repos) = fixture();
        let created = service.create(country_request("England", "GB")).await.unwrap();

        repos
            .clubs
            .save(Club {
                id: 0,
                name: "Arsenal".to_string(),
                logo_url: "https://cdn.example.com/arsenal.png".to_string(),
                established_at: NaiveDate::from_ymd_opt(1886, 10, 1).unwrap(),
                country_id: created.id,
            })
            .await
            .unwrap();

        let detail = service.get(created.id).await.unwrap();
        assert_eq!(detail.clubs.len(), 1);
        assert_eq!(detail.clubs[0].name, "Arsenal");
    }

    #[tokio::test]
    async fn test_remove_refuses_while_referenced() {
        let (service, repos) = fixture();
        let created = service.create(country_request("England", "GB")).await.unwrap();

        repos
            .clubs
            .save(Club {
                id: 0,
                name: "Arsenal".to_string(),
                logo_url: "https://cdn.example.com/arsenal.png".to_string(),
                established_at: NaiveDate::from_ymd_opt(1886, 10, 1).unwrap(),
                country_id: created.id,
            })
            .await
            .unwrap();

        let err = service.remove(created.id).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!(
                "Country with id {} is still referenced by other records",
                created.id
            )
        );
    }

    #[tokio::test]
    async fn test_remove_unreferenced_country() {
        let (service, _repos) = fixture();
        let created = service.create(country_request("England", "GB")).await.unwrap();

        service.remove(created.id).await.unwrap();

        let err = service.get(created.id).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            format!("Country with id {} does not exist", created.id)
        );
    }
}
