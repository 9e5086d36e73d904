//! API Routes
//!
//! Configures the Axum router with every resource endpoint, the
//! per-route access policies, and the middleware stack.

use axum::http::Method;
use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::auth::{authorize, PolicyDecl, PolicyTable};
use crate::domain::Role;

use super::handlers::{clubs, competitions, countries, health_handler, players, users, AppState};

/// Creates the main router with all endpoints configured.
///
/// # Middleware
/// - Tracing: logs all requests for debugging
/// - CORS: allows any origin (configurable for production)
/// - Authorization: enforces the route policies ahead of every handler
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let gate = state.gate.clone();

    // Build router with all endpoints
    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/clubs",
            get(clubs::list_clubs).post(clubs::create_club),
        )
        .route("/clubs/create-bulk", post(clubs::create_clubs_bulk))
        .route(
            "/clubs/:id",
            get(clubs::get_club)
                .patch(clubs::update_club)
                .delete(clubs::delete_club),
        )
        .route(
            "/clubs/:id/players/:player_id",
            post(clubs::add_player_to_club).delete(clubs::remove_player_from_club),
        )
        .route(
            "/players",
            get(players::list_players).post(players::create_player),
        )
        .route("/players/create-bulk", post(players::create_players_bulk))
        .route(
            "/players/:id",
            get(players::get_player)
                .patch(players::update_player)
                .delete(players::delete_player),
        )
        .route(
            "/countries",
            get(countries::list_countries).post(countries::create_country),
        )
        .route(
            "/countries/create-bulk",
            post(countries::create_countries_bulk),
        )
        .route(
            "/countries/:id",
            get(countries::get_country)
                .patch(countries::update_country)
                .delete(countries::delete_country),
        )
        .route(
            "/competitions",
            get(competitions::list_competitions).post(competitions::create_competition),
        )
        .route(
            "/competitions/create-bulk",
            post(competitions::create_competitions_bulk),
        )
        .route(
            "/competitions/:id",
            get(competitions::get_competition)
                .patch(competitions::update_competition)
                .delete(competitions::delete_competition),
        )
        .route(
            "/competitions/:id/clubs/:club_id",
            post(competitions::add_club_to_competition)
                .delete(competitions::remove_club_from_competition),
        )
        .route("/users/profile", get(users::get_profile))
        .route("/users", get(users::list_users))
        .route(
            "/users/:id",
            get(users::get_user)
                .patch(users::update_user)
                .delete(users::delete_user),
        )
        .layer(middleware::from_fn_with_state(gate, authorize))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Access policies for every registered route.
///
/// Reads on reference data are open, writes need the ADMIN role, and
/// user account routes accept any authenticated caller except the
/// listing, which stays ADMIN. Routes missing from this table fall back
/// to requiring authentication.
pub(crate) fn route_policies() -> PolicyTable {
    let admin = PolicyDecl::roles(&[Role::Admin]);

    PolicyTable::builder()
        .route(Method::GET, "/health", PolicyDecl::public())
        // Clubs: open reads, admin writes
        .controller(admin.clone())
        .route(Method::GET, "/clubs", PolicyDecl::public())
        .route(Method::GET, "/clubs/:id", PolicyDecl::public())
        .route(Method::POST, "/clubs", PolicyDecl::default())
        .route(Method::POST, "/clubs/create-bulk", PolicyDecl::default())
        .route(Method::PATCH, "/clubs/:id", PolicyDecl::default())
        .route(Method::DELETE, "/clubs/:id", PolicyDecl::default())
        .route(
            Method::POST,
            "/clubs/:id/players/:player_id",
            PolicyDecl::default(),
        )
        .route(
            Method::DELETE,
            "/clubs/:id/players/:player_id",
            PolicyDecl::default(),
        )
        // Players: open reads, admin writes
        .controller(admin.clone())
        .route(Method::GET, "/players", PolicyDecl::public())
        .route(Method::GET, "/players/:id", PolicyDecl::public())
        .route(Method::POST, "/players", PolicyDecl::default())
        .route(Method::POST, "/players/create-bulk", PolicyDecl::default())
        .route(Method::PATCH, "/players/:id", PolicyDecl::default())
        .route(Method::DELETE, "/players/:id", PolicyDecl::default())
        // Countries: open reads, admin writes
        .controller(admin.clone())
        .route(Method::GET, "/countries", PolicyDecl::public())
        .route(Method::GET, "/countries/:id", PolicyDecl::public())
        .route(Method::POST, "/countries", PolicyDecl::default())
        .route(Method::POST, "/countries/create-bulk", PolicyDecl::default())
        .route(Method::PATCH, "/countries/:id", PolicyDecl::default())
        .route(Method::DELETE, "/countries/:id", PolicyDecl::default())
        // Competitions: open reads, admin writes
        .controller(admin)
        .route(Method::GET, "/competitions", PolicyDecl::public())
        .route(Method::GET, "/competitions/:id", PolicyDecl::public())
        .route(Method::POST, "/competitions", PolicyDecl::default())
        .route(
            Method::POST,
            "/competitions/create-bulk",
            PolicyDecl::default(),
        )
        .route(Method::PATCH, "/competitions/:id", PolicyDecl::default())
        .route(Method::DELETE, "/competitions/:id", PolicyDecl::default())
        .route(
            Method::POST,
            "/competitions/:id/clubs/:club_id",
            PolicyDecl::default(),
        )
        .route(
            Method::DELETE,
            "/competitions/:id/clubs/:club_id",
            PolicyDecl::default(),
        )
        // Users: any authenticated caller, listing admin-only
        .controller(PolicyDecl::default())
        .route(Method::GET, "/users/profile", PolicyDecl::default())
        .route(Method::GET, "/users", PolicyDecl::roles(&[Role::Admin]))
        .route(Method::GET, "/users/:id", PolicyDecl::default())
        .route(Method::PATCH, "/users/:id", PolicyDecl::default())
        .route(Method::DELETE, "/users/:id", PolicyDecl::default())
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::config::Config;
    use crate::repo::Repos;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use std::sync::Arc;
    use tower::util::ServiceExt;

    fn create_test_app() -> Router {
        let state = AppState::new(
            Repos::in_memory(),
            Arc::new(MemoryStore::new()),
            &Config::default(),
        );
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_public_listing_without_credentials() {
        let app = create_test_app();

        let response = app
            .oneshot(Request::builder().uri("/clubs").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_write_without_credentials_is_rejected() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/clubs")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"name":"Arsenal"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_route_not_found() {
        let app = create_test_app();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/managers")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_policy_table_matches_route_surface() {
        let table = route_policies();

        assert!(table.resolve(&Method::GET, "/health").is_public);
        assert!(table.resolve(&Method::GET, "/clubs").is_public);
        assert!(table.resolve(&Method::GET, "/competitions/:id").is_public);

        let create = table.resolve(&Method::POST, "/clubs");
        assert!(!create.is_public);
        assert_eq!(create.required_roles, vec![Role::Admin]);

        let squad = table.resolve(&Method::DELETE, "/clubs/:id/players/:player_id");
        assert_eq!(squad.required_roles, vec![Role::Admin]);

        // Any authenticated caller may read their profile
        let profile = table.resolve(&Method::GET, "/users/profile");
        assert!(!profile.is_public);
        assert!(profile.required_roles.is_empty());

        let listing = table.resolve(&Method::GET, "/users");
        assert_eq!(listing.required_roles, vec![Role::Admin]);
    }
}
