//! Token claims

use serde::{Deserialize, Serialize};

use crate::domain::Role;

/// Claims carried by a verified bearer token.
///
/// The gate stores these in request extensions once verification
/// succeeds, so handlers can read the caller's identity without touching
/// the token again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Id of the authenticated user
    pub sub: i64,
    pub email: String,
    pub role: Role,
    /// Issued-at, seconds since the epoch
    pub iat: i64,
    /// Expiry, seconds since the epoch
    pub exp: i64,
}
