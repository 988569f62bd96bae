//! # Router Contract
//!
//! Every router, base or extending, speaks the same four operations:
//!
//! ```text
//! initial_state(config)              → Result<Arc<State>, RouterError>
//! state_for_action(state, action)    → Arc<State>
//! state_for_route_focus(state, key)  → Arc<State>
//! should_action_change_focus(action) → bool
//! ```
//!
//! The two reducers are total. When nothing observable changes they hand back
//! the input `Arc` itself, so callers can skip work with `Arc::ptr_eq`.

use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use crate::core::keys::{KeyGenerator, prefixed_key};
use crate::core::route::{NavigationState, Route, RouteConfig, StateParts};

/// An action enum that knows its own wire-level type literal.
pub trait NavigationAction {
    /// The `"SCREAMING_CASE"` type literal of this action.
    fn kind(&self) -> &'static str;
}

pub trait Router {
    type State: NavigationState;
    type Action: NavigationAction;

    /// Builds the first state of a navigator.
    fn initial_state(&self, config: &RouteConfig) -> Result<Arc<Self::State>, RouterError>;

    /// Reduces `action` against `state`. Returns `state` itself iff nothing
    /// observable changed.
    fn state_for_action(&self, state: &Arc<Self::State>, action: &Self::Action) -> Arc<Self::State>;

    /// Focuses the route with the given key. Unknown or already focused keys
    /// return `state` itself.
    fn state_for_route_focus(&self, state: &Arc<Self::State>, key: &str) -> Arc<Self::State>;

    /// Whether the host should move focus to this navigator after dispatching.
    fn should_action_change_focus(&self, _action: &Self::Action) -> bool {
        false
    }
}

/// Where `GO_BACK` leads.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BackBehavior {
    /// Previously focused route, most recent first.
    #[default]
    History,
    /// The initial route, unless already there.
    InitialRoute,
    /// The route before the focused one in declaration order.
    Order,
    /// Never goes back.
    None,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouterOptions {
    pub initial_route_name: Option<String>,
    pub back_behavior: BackBehavior,
}

impl RouterOptions {
    pub fn with_initial_route(name: impl Into<String>) -> Self {
        Self {
            initial_route_name: Some(name.into()),
            ..Default::default()
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouterError {
    /// A navigator needs at least one route.
    NoRoutes,
    /// The configured initial route is not one of the route names.
    UnknownInitialRoute {
        name: String,
        route_names: Vec<String>,
    },
}

impl fmt::Display for RouterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouterError::NoRoutes => write!(f, "navigator has no routes"),
            RouterError::UnknownInitialRoute { name, route_names } => write!(
                f,
                "initial route '{name}' is not one of the configured routes [{}]",
                route_names.join(", ")
            ),
        }
    }
}

impl std::error::Error for RouterError {}

// ============================================================================
// Initial State
// ============================================================================

/// Builds the fields of a fresh state: resolves the focused index, generates
/// the state key (`"<kind>-<id>"`) and one route per name.
pub fn initial_parts(
    kind: &str,
    options: &RouterOptions,
    config: &RouteConfig,
    keys: &dyn KeyGenerator,
) -> Result<StateParts, RouterError> {
    if config.route_names.is_empty() {
        return Err(RouterError::NoRoutes);
    }

    let index = match options.initial_route_name {
        None => 0,
        Some(ref name) => config
            .route_names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| RouterError::UnknownInitialRoute {
                name: name.clone(),
                route_names: config.route_names.clone(),
            })?,
    };

    let routes = config
        .route_names
        .iter()
        .map(|name| Route {
            key: prefixed_key(keys, name),
            name: name.clone(),
            params: config.route_params.get(name).cloned(),
        })
        .collect();

    let parts = StateParts {
        key: prefixed_key(keys, kind),
        index,
        route_names: config.route_names.clone(),
        routes,
        route_key_history: Vec::new(),
    };
    debug!(
        "Built initial {} state {} focused on {}",
        kind, parts.key, config.route_names[index]
    );
    Ok(parts)
}
