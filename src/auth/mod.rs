//! Authentication and Authorization
//!
//! Request gating in two stages: a token verifier checks the HS256
//! signature and expiry of bearer tokens, and a route policy table says
//! which routes are public, which need any authenticated caller, and
//! which are restricted to specific roles. The gate middleware wires the
//! two together in front of every route.

mod claims;
mod gate;
mod policy;
mod verifier;

pub use claims::Claims;
pub use gate::{authorize, Gate};
pub use policy::{PolicyDecl, PolicyTable, PolicyTableBuilder, RoutePolicy};
pub use verifier::TokenVerifier;
