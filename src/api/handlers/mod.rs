//! API Handlers
//!
//! HTTP request handlers, grouped per resource. Each handler validates
//! its payload, delegates to the matching service, and maps the result
//! into a JSON response.

pub mod clubs;
pub mod competitions;
pub mod countries;
pub mod players;
pub mod users;

use std::sync::Arc;

use axum::Json;

use crate::auth::{Gate, TokenVerifier};
use crate::cache::{CacheClient, EntityCache, KeyValueStore};
use crate::config::Config;
use crate::models::HealthResponse;
use crate::repo::Repos;
use crate::service::Services;

/// Application state shared across all handlers.
///
/// Carries the service layer and the authorization gate. Both are cheap
/// to clone; the repositories and cache store behind them are shared.
#[derive(Clone)]
pub struct AppState {
    pub services: Services,
    pub gate: Gate,
}

impl AppState {
    /// Wires repositories, cache store and route policies into a state
    /// ready for [`create_router`](crate::api::create_router).
    pub fn new(repos: Repos, store: Arc<dyn KeyValueStore>, config: &Config) -> Self {
        let cache = EntityCache::new(CacheClient::new(store, config.cache_ttl));
        let gate = Gate::new(
            Arc::new(super::routes::route_policies()),
            TokenVerifier::new(&config.jwt_secret),
        );
        Self {
            services: Services::new(repos, cache),
            gate,
        }
    }
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
