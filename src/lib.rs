//! FootAdmin - A football reference data service
//!
//! CRUD platform for clubs, players, competitions, countries and user
//! accounts, with role-gated routes and cache-aside reads.

pub mod api;
pub mod auth;
pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod models;
pub mod repo;
pub mod service;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
