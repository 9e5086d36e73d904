//! Route access policies
//!
//! Declarative access control, resolved ahead of time into one effective
//! policy per route. Declarations exist at two levels, controller and
//! route, and merge per field with the route level winning. A route
//! nobody declared anything for requires authentication but no
//! particular role, so forgetting a declaration locks a route down
//! instead of exposing it.

use std::collections::HashMap;

use axum::http::Method;

use crate::domain::Role;

// == Policy Declaration ==
/// What a controller or a single route declares about access.
///
/// Both fields are optional; an unset field defers to the enclosing
/// controller declaration, then to the locked-down default.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PolicyDecl {
    pub is_public: Option<bool>,
    pub required_roles: Option<Vec<Role>>,
}

impl PolicyDecl {
    /// Declares a route open to anonymous callers.
    pub fn public() -> Self {
        Self {
            is_public: Some(true),
            required_roles: None,
        }
    }

    /// Declares a route restricted to the given roles.
    pub fn roles(roles: &[Role]) -> Self {
        Self {
            is_public: None,
            required_roles: Some(roles.to_vec()),
        }
    }
}

// == Route Policy ==
/// Effective access policy of one route after merging declarations.
///
/// `is_public` wins outright: a public route never inspects credentials,
/// whatever `required_roles` says. An empty role list on a private route
/// means any authenticated caller passes.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutePolicy {
    pub is_public: bool,
    pub required_roles: Vec<Role>,
}

impl Default for RoutePolicy {
    fn default() -> Self {
        Self {
            is_public: false,
            required_roles: Vec::new(),
        }
    }
}

// == Policy Table ==
/// Effective policies keyed by method and route pattern.
///
/// The pattern is the one the router matched, parameters unexpanded
/// (`/clubs/:id`), so every concrete request for a route shares one
/// entry.
pub struct PolicyTable {
    routes: HashMap<(Method, String), RoutePolicy>,
}

impl PolicyTable {
    pub fn builder() -> PolicyTableBuilder {
        PolicyTableBuilder {
            routes: HashMap::new(),
            controller: PolicyDecl::default(),
        }
    }

    /// Effective policy for a route, locked-down default when undeclared.
    pub fn resolve(&self, method: &Method, pattern: &str) -> RoutePolicy {
        self.routes
            .get(&(method.clone(), pattern.to_string()))
            .cloned()
            .unwrap_or_default()
    }
}

// == Builder ==
/// Collects declarations controller by controller.
///
/// `controller` opens a new scope whose declaration backs every `route`
/// call until the next `controller`. Merging happens here, at build
/// time, never per request.
pub struct PolicyTableBuilder {
    routes: HashMap<(Method, String), RoutePolicy>,
    controller: PolicyDecl,
}

impl PolicyTableBuilder {
    /// Starts a controller scope with its class-level declaration.
    pub fn controller(mut self, decl: PolicyDecl) -> Self {
        self.controller = decl;
        self
    }

    /// Registers a route, merging its declaration over the controller's.
    pub fn route(mut self, method: Method, pattern: &str, decl: PolicyDecl) -> Self {
        let policy = RoutePolicy {
            is_public: decl
                .is_public
                .or(self.controller.is_public)
                .unwrap_or(false),
            required_roles: decl
                .required_roles
                .or_else(|| self.controller.required_roles.clone())
                .unwrap_or_default(),
        };
        self.routes.insert((method, pattern.to_string()), policy);
        self
    }

    pub fn build(self) -> PolicyTable {
        PolicyTable {
            routes: self.routes,
        }
    }
}
