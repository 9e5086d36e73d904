//! Request gate middleware
//!
//! Runs in front of every route, after routing and before the handler.
//! Stages, in order: resolve the route's policy, let public routes
//! through untouched, verify the bearer token, then check the role
//! requirement. Verified claims ride along in request extensions.

use std::sync::Arc;

use axum::{
    extract::{MatchedPath, Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};

use crate::auth::policy::PolicyTable;
use crate::auth::verifier::TokenVerifier;
use crate::error::ApiError;

// == Gate ==
/// State the gate middleware needs: the policy table and the verifier.
#[derive(Clone)]
pub struct Gate {
    policies: Arc<PolicyTable>,
    verifier: TokenVerifier,
}

impl Gate {
    pub fn new(policies: Arc<PolicyTable>, verifier: TokenVerifier) -> Self {
        Self { policies, verifier }
    }
}

// == Middleware ==
/// Enforces the route policy for one request.
///
/// Public routes skip credential handling entirely, so an expired or
/// garbled token in the header cannot break a public read. On private
/// routes a missing or invalid token is a 401 and a role mismatch a 403,
/// each with its fixed message.
pub async fn authorize(
    State(gate): State<Gate>,
    matched_path: Option<MatchedPath>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // No matched route pattern means the fallback will answer; nothing
    // to enforce here.
    let Some(path) = matched_path else {
        return Ok(next.run(req).await);
    };

    let policy = gate.policies.resolve(req.method(), path.as_str());
    if policy.is_public {
        return Ok(next.run(req).await);
    }

    let token = bearer_token(req.headers()).ok_or_else(ApiError::unauthorized)?;
    let claims = gate.verifier.verify(token)?;

    if !policy.required_roles.is_empty() && !policy.required_roles.contains(&claims.role) {
        return Err(ApiError::forbidden());
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}

/// Extracts the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
}
