//! API Module
//!
//! HTTP handlers and routing for the football reference data REST API.
//!
//! # Endpoints
//! Each resource (`/clubs`, `/players`, `/countries`, `/competitions`)
//! exposes the same surface:
//! - `GET /<resource>` - Paginated listing (public)
//! - `GET /<resource>/:id` - Single record with its relations (public)
//! - `POST /<resource>` - Create one record (admin)
//! - `POST /<resource>/create-bulk` - Create many records (admin)
//! - `PATCH /<resource>/:id` - Partial update (admin)
//! - `DELETE /<resource>/:id` - Remove a record (admin)
//!
//! On top of that:
//! - `POST|DELETE /clubs/:id/players/:player_id` - Squad membership (admin)
//! - `POST|DELETE /competitions/:id/clubs/:club_id` - Competition entries (admin)
//! - `GET /users/profile`, `GET|PATCH|DELETE /users/:id` - Account routes (authenticated)
//! - `GET /users` - Account listing (admin)
//! - `GET /health` - Health check endpoint (public)

pub mod handlers;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
