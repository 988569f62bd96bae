//! # Routes and Navigation State
//!
//! The shape every router agrees on, whatever it layers on top.
//!
//! ```text
//! State
//! ├── key: String                 // "<kind>-<id>", fixed for the state tree's lifetime
//! ├── index: usize                // focused route, always < routes.len()
//! ├── route_names: Vec<String>    // configured names, source of truth
//! ├── routes: Vec<Route>          // one per name, same order
//! └── route_key_history: Vec<String>
//! ```
//!
//! States are never mutated. Routers hand them around as `Arc<State>` and a
//! transition either returns the same `Arc` (nothing changed) or a new one.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Opaque per-route parameters.
pub type Params = serde_json::Map<String, serde_json::Value>;

/// One navigable screen.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Route {
    /// Unique across all states, generated as `"<name>-<id>"`.
    pub key: String,
    /// Configured name. Not unique across navigators.
    pub name: String,
    pub params: Option<Params>,
}

impl Route {
    /// Returns a copy of this route with `params` shallow-merged over the
    /// existing ones. The route itself is left alone.
    pub fn with_merged_params(&self, params: &Params) -> Route {
        let mut merged = self.params.clone().unwrap_or_default();
        merged.extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        Route {
            key: self.key.clone(),
            name: self.name.clone(),
            params: Some(merged),
        }
    }
}

/// What a navigator is built from: the names it shows and their params.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteConfig {
    pub route_names: Vec<String>,
    pub route_params: HashMap<String, Params>,
}

impl RouteConfig {
    pub fn new<I, S>(route_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            route_names: route_names.into_iter().map(Into::into).collect(),
            route_params: HashMap::new(),
        }
    }

    /// Builder-style helper for attaching params to one route name.
    pub fn with_params(mut self, name: impl Into<String>, params: Params) -> Self {
        self.route_params.insert(name.into(), params);
        self
    }
}

/// Raw fields of a freshly built state, before a router wraps them in its
/// own state type.
#[derive(Debug, Clone, PartialEq)]
pub struct StateParts {
    pub key: String,
    pub index: usize,
    pub route_names: Vec<String>,
    pub routes: Vec<Route>,
    pub route_key_history: Vec<String>,
}

/// Read access shared by every router's state type.
///
/// `from_parts` is the constructor seam: a router extending another one builds
/// its delegate's state through it without knowing the concrete type.
pub trait NavigationState: Sized {
    fn from_parts(parts: StateParts) -> Self;

    fn key(&self) -> &str;
    fn index(&self) -> usize;
    fn route_names(&self) -> &[String];
    fn routes(&self) -> &[Route];
    fn route_key_history(&self) -> &[String];

    /// Position of the route with the given key, if any.
    fn route_index(&self, key: &str) -> Option<usize> {
        self.routes().iter().position(|r| r.key == key)
    }

    fn focused_route(&self) -> Option<&Route> {
        self.routes().get(self.index())
    }
}
