//! # Tab Router
//!
//! The base router: a fixed list of routes, exactly one focused. Selection
//! moves with `JUMP_TO` / `NAVIGATE`, `GO_BACK` walks back according to the
//! configured [`BackBehavior`], and `SET_PARAMS` replaces one route's params.
//!
//! ```text
//! TabState { index: 0, history: [] }
//!     │ jump_to("Feed")
//!     ▼
//! TabState { index: 1, history: ["Home-…"] }
//!     │ go_back()
//!     ▼
//! TabState { index: 0, history: [] }
//! ```

use log::{debug, trace, warn};
use std::sync::Arc;

use crate::core::keys::KeyGenerator;
use crate::core::route::{NavigationState, Params, Route, RouteConfig, StateParts};
use crate::core::router::{
    BackBehavior, NavigationAction, Router, RouterError, RouterOptions, initial_parts,
};

/// State key prefix for tab navigators.
pub const TAB_KIND: &str = "tab";

#[derive(Debug, Clone, PartialEq)]
pub struct TabState {
    pub key: String,
    pub index: usize,
    pub route_names: Vec<String>,
    pub routes: Vec<Route>,
    /// Keys of previously focused routes, oldest first. Never contains the
    /// focused route's key.
    pub route_key_history: Vec<String>,
}

impl NavigationState for TabState {
    fn from_parts(parts: StateParts) -> Self {
        Self {
            key: parts.key,
            index: parts.index,
            route_names: parts.route_names,
            routes: parts.routes,
            route_key_history: parts.route_key_history,
        }
    }

    fn key(&self) -> &str {
        &self.key
    }

    fn index(&self) -> usize {
        self.index
    }

    fn route_names(&self) -> &[String] {
        &self.route_names
    }

    fn routes(&self) -> &[Route] {
        &self.routes
    }

    fn route_key_history(&self) -> &[String] {
        &self.route_key_history
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TabAction {
    /// Focus the route with this name, merging `params` into it.
    JumpTo { name: String, params: Option<Params> },
    /// Same as `JumpTo` within a tab navigator, but also asks the host to
    /// focus this navigator.
    Navigate { name: String, params: Option<Params> },
    GoBack,
    /// Merge params into the route keyed `source`, or the focused route.
    SetParams {
        source: Option<String>,
        params: Params,
    },
}

impl TabAction {
    pub const ACTION_TYPES: &'static [&'static str] =
        &["JUMP_TO", "NAVIGATE", "GO_BACK", "SET_PARAMS"];

    pub fn jump_to(name: impl Into<String>, params: Option<Params>) -> Self {
        TabAction::JumpTo {
            name: name.into(),
            params,
        }
    }

    pub fn navigate(name: impl Into<String>, params: Option<Params>) -> Self {
        TabAction::Navigate {
            name: name.into(),
            params,
        }
    }

    pub fn go_back() -> Self {
        TabAction::GoBack
    }

    pub fn set_params(params: Params) -> Self {
        TabAction::SetParams {
            source: None,
            params,
        }
    }

    pub fn set_params_for(source: impl Into<String>, params: Params) -> Self {
        TabAction::SetParams {
            source: Some(source.into()),
            params,
        }
    }
}

impl NavigationAction for TabAction {
    fn kind(&self) -> &'static str {
        match self {
            TabAction::JumpTo { .. } => "JUMP_TO",
            TabAction::Navigate { .. } => "NAVIGATE",
            TabAction::GoBack => "GO_BACK",
            TabAction::SetParams { .. } => "SET_PARAMS",
        }
    }
}

pub struct TabRouter {
    options: RouterOptions,
    keys: Arc<dyn KeyGenerator>,
}

impl TabRouter {
    pub fn new(options: RouterOptions, keys: Arc<dyn KeyGenerator>) -> Self {
        Self { options, keys }
    }

    /// Options this router was built with. An extending router reads them so
    /// both layers resolve the same initial route.
    pub fn options(&self) -> &RouterOptions {
        &self.options
    }

    /// Index `GO_BACK` lands on under `BackBehavior::InitialRoute`.
    fn initial_index(&self, state: &TabState) -> usize {
        self.options
            .initial_route_name
            .as_ref()
            .and_then(|name| state.route_names.iter().position(|n| n == name))
            .unwrap_or(0)
    }

    fn jump(&self, state: &Arc<TabState>, name: &str, params: Option<&Params>) -> Arc<TabState> {
        let Some(index) = state.routes.iter().position(|r| r.name == name) else {
            trace!("No route named {} in {}, ignoring", name, state.key);
            return Arc::clone(state);
        };
        if index == state.index && params.is_none() {
            trace!("Route {} already focused in {}", name, state.key);
            return Arc::clone(state);
        }

        let mut next = if index == state.index {
            TabState::clone(state)
        } else {
            let Some(next) = change_index(state, index) else {
                return Arc::clone(state);
            };
            next
        };
        if let Some(params) = params {
            let merged = next.routes[index].with_merged_params(params);
            if index == state.index && merged == state.routes[index] {
                trace!("Params of {} unchanged in {}", name, state.key);
                return Arc::clone(state);
            }
            next.routes[index] = merged;
        }
        debug!("Tab {} focused {} (index {})", state.key, name, index);
        Arc::new(next)
    }

    fn go_back(&self, state: &Arc<TabState>) -> Arc<TabState> {
        let target = match self.options.back_behavior {
            BackBehavior::History => {
                let Some((last, rest)) = state.route_key_history.split_last() else {
                    trace!("Nothing to go back to in {}", state.key);
                    return Arc::clone(state);
                };
                let Some(index) = state.route_index(last) else {
                    return Arc::clone(state);
                };
                debug!("Tab {} went back to {}", state.key, last);
                return Arc::new(TabState {
                    index,
                    route_key_history: rest.to_vec(),
                    ..TabState::clone(state)
                });
            }
            BackBehavior::InitialRoute => Some(self.initial_index(state)),
            BackBehavior::Order => state.index.checked_sub(1),
            BackBehavior::None => None,
        };

        let next = target
            .filter(|&index| index != state.index)
            .and_then(|index| change_index(state, index));
        match next {
            Some(next) => {
                debug!("Tab {} went back to index {}", state.key, next.index);
                Arc::new(next)
            }
            None => {
                trace!("Nothing to go back to in {}", state.key);
                Arc::clone(state)
            }
        }
    }

    fn set_params(&self, state: &Arc<TabState>, source: Option<&str>, params: &Params) -> Arc<TabState> {
        let index = match source {
            Some(key) => state.route_index(key),
            None => Some(state.index),
        };
        let Some((index, route)) = index.and_then(|i| state.routes.get(i).map(|r| (i, r))) else {
            trace!("SET_PARAMS source {:?} not in {}", source, state.key);
            return Arc::clone(state);
        };

        let merged = route.with_merged_params(params);
        if merged == *route {
            trace!("Params of {} unchanged in {}", route.key, state.key);
            return Arc::clone(state);
        }
        let mut routes = state.routes.clone();
        routes[index] = merged;
        debug!("Tab {} updated params of {}", state.key, routes[index].key);
        Arc::new(TabState {
            routes,
            ..TabState::clone(state)
        })
    }
}

/// Moves focus to `index`, recording the previously focused key at the end of
/// the history. `None` when either index is out of range.
fn change_index(state: &TabState, index: usize) -> Option<TabState> {
    let previous = &state.routes.get(state.index)?.key;
    let target = &state.routes.get(index)?.key;
    let mut route_key_history: Vec<String> = state
        .route_key_history
        .iter()
        .filter(|k| *k != previous && *k != target)
        .cloned()
        .collect();
    route_key_history.push(previous.clone());

    Some(TabState {
        index,
        route_key_history,
        ..state.clone()
    })
}

impl Router for TabRouter {
    type State = TabState;
    type Action = TabAction;

    fn initial_state(&self, config: &RouteConfig) -> Result<Arc<TabState>, RouterError> {
        let parts = initial_parts(TAB_KIND, &self.options, config, self.keys.as_ref())?;
        Ok(Arc::new(TabState::from_parts(parts)))
    }

    fn state_for_action(&self, state: &Arc<TabState>, action: &TabAction) -> Arc<TabState> {
        match action {
            TabAction::JumpTo { name, params } | TabAction::Navigate { name, params } => {
                self.jump(state, name, params.as_ref())
            }
            TabAction::GoBack => self.go_back(state),
            TabAction::SetParams { source, params } => {
                self.set_params(state, source.as_deref(), params)
            }
        }
    }

    fn state_for_route_focus(&self, state: &Arc<TabState>, key: &str) -> Arc<TabState> {
        match state.route_index(key) {
            Some(index) if index != state.index => match change_index(state, index) {
                Some(next) => {
                    debug!("Tab {} focused route {}", state.key, key);
                    Arc::new(next)
                }
                None => {
                    warn!("Tab {} has out-of-range index {}, ignoring focus", state.key, state.index);
                    Arc::clone(state)
                }
            },
            _ => Arc::clone(state),
        }
    }

    fn should_action_change_focus(&self, action: &TabAction) -> bool {
        matches!(action, TabAction::Navigate { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{params, sequential_tab_router};

    fn three_tabs(router: &TabRouter) -> Arc<TabState> {
        router
            .initial_state(&RouteConfig::new(["Home", "Feed", "Settings"]))
            .unwrap()
    }

    #[test]
    fn test_initial_state_shape() {
        let router = sequential_tab_router(RouterOptions::default());
        let state = three_tabs(&router);
        assert_eq!(state.key, "tab-4");
        assert_eq!(state.index, 0);
        assert_eq!(state.route_names, vec!["Home", "Feed", "Settings"]);
        assert_eq!(state.routes[1].key, "Feed-2");
        assert!(state.route_key_history.is_empty());
    }

    #[test]
    fn test_jump_to_changes_focus_and_records_history() {
        let router = sequential_tab_router(RouterOptions::default());
        let state = three_tabs(&router);
        let next = router.state_for_action(&state, &TabAction::jump_to("Settings", None));
        assert_eq!(next.index, 2);
        assert_eq!(next.route_key_history, vec!["Home-1"]);
        assert_eq!(next.key, state.key);
    }

    #[test]
    fn test_jump_to_focused_route_is_noop() {
        let router = sequential_tab_router(RouterOptions::default());
        let state = three_tabs(&router);
        let next = router.state_for_action(&state, &TabAction::jump_to("Home", None));
        assert!(Arc::ptr_eq(&state, &next));
    }

    #[test]
    fn test_jump_to_unknown_route_is_noop() {
        let router = sequential_tab_router(RouterOptions::default());
        let state = three_tabs(&router);
        let next = router.state_for_action(&state, &TabAction::jump_to("Nowhere", None));
        assert!(Arc::ptr_eq(&state, &next));
    }

    #[test]
    fn test_jump_to_focused_route_with_params_updates_route() {
        let router = sequential_tab_router(RouterOptions::default());
        let state = three_tabs(&router);
        let next = router.state_for_action(
            &state,
            &TabAction::jump_to("Home", Some(params(serde_json::json!({ "q": "rust" })))),
        );
        assert!(!Arc::ptr_eq(&state, &next));
        assert_eq!(next.index, 0);
        assert_eq!(next.routes[0].params, Some(params(serde_json::json!({ "q": "rust" }))));
        assert!(next.route_key_history.is_empty());
        // input state untouched
        assert_eq!(state.routes[0].params, None);
    }

    #[test]
    fn test_history_back_walks_previous_routes() {
        let router = sequential_tab_router(RouterOptions::default());
        let state = three_tabs(&router);
        let state = router.state_for_action(&state, &TabAction::jump_to("Feed", None));
        let state = router.state_for_action(&state, &TabAction::jump_to("Settings", None));
        assert_eq!(state.route_key_history, vec!["Home-1", "Feed-2"]);

        let state = router.state_for_action(&state, &TabAction::go_back());
        assert_eq!(state.index, 1);
        let state = router.state_for_action(&state, &TabAction::go_back());
        assert_eq!(state.index, 0);
        assert!(state.route_key_history.is_empty());

        let again = router.state_for_action(&state, &TabAction::go_back());
        assert!(Arc::ptr_eq(&state, &again));
    }

    #[test]
    fn test_history_never_contains_focused_key() {
        let router = sequential_tab_router(RouterOptions::default());
        let state = three_tabs(&router);
        let state = router.state_for_action(&state, &TabAction::jump_to("Feed", None));
        let state = router.state_for_action(&state, &TabAction::jump_to("Home", None));
        assert_eq!(state.route_key_history, vec!["Feed-2"]);
    }

    #[test]
    fn test_initial_route_back_behavior() {
        let router = sequential_tab_router(RouterOptions {
            initial_route_name: Some("Feed".to_string()),
            back_behavior: BackBehavior::InitialRoute,
        });
        let state = three_tabs(&router);
        assert_eq!(state.index, 1);
        let at_initial = router.state_for_action(&state, &TabAction::go_back());
        assert!(Arc::ptr_eq(&state, &at_initial));

        let state = router.state_for_action(&state, &TabAction::jump_to("Settings", None));
        let state = router.state_for_action(&state, &TabAction::go_back());
        assert_eq!(state.index, 1);
    }

    #[test]
    fn test_order_back_behavior() {
        let router = sequential_tab_router(RouterOptions {
            back_behavior: BackBehavior::Order,
            ..Default::default()
        });
        let state = three_tabs(&router);
        let state = router.state_for_action(&state, &TabAction::jump_to("Settings", None));
        let state = router.state_for_action(&state, &TabAction::go_back());
        assert_eq!(state.index, 1);
        let state = router.state_for_action(&state, &TabAction::go_back());
        assert_eq!(state.index, 0);
        let first = router.state_for_action(&state, &TabAction::go_back());
        assert!(Arc::ptr_eq(&state, &first));
    }

    #[test]
    fn test_none_back_behavior() {
        let router = sequential_tab_router(RouterOptions {
            back_behavior: BackBehavior::None,
            ..Default::default()
        });
        let state = three_tabs(&router);
        let state = router.state_for_action(&state, &TabAction::jump_to("Feed", None));
        let back = router.state_for_action(&state, &TabAction::go_back());
        assert!(Arc::ptr_eq(&state, &back));
    }

    #[test]
    fn test_set_params_targets_focused_route() {
        let router = sequential_tab_router(RouterOptions::default());
        let state = three_tabs(&router);
        let next = router.state_for_action(
            &state,
            &TabAction::set_params(params(serde_json::json!({ "page": 2 }))),
        );
        assert_eq!(next.routes[0].params, Some(params(serde_json::json!({ "page": 2 }))));
        assert_eq!(next.routes[1], state.routes[1]);
    }

    #[test]
    fn test_set_params_by_source_key() {
        let router = sequential_tab_router(RouterOptions::default());
        let state = three_tabs(&router);
        let next = router.state_for_action(
            &state,
            &TabAction::set_params_for("Settings-3", params(serde_json::json!({ "dark": true }))),
        );
        assert_eq!(next.routes[2].params, Some(params(serde_json::json!({ "dark": true }))));
        assert_eq!(next.index, 0);

        let unknown = router.state_for_action(
            &state,
            &TabAction::set_params_for("Gone-9", params(serde_json::json!({ "dark": true }))),
        );
        assert!(Arc::ptr_eq(&state, &unknown));
    }

    #[test]
    fn test_set_params_with_same_values_is_noop() {
        let router = sequential_tab_router(RouterOptions::default());
        let state = three_tabs(&router);
        let action = TabAction::set_params(params(serde_json::json!({ "x": 1 })));
        let once = router.state_for_action(&state, &action);
        assert!(!Arc::ptr_eq(&state, &once));
        let twice = router.state_for_action(&once, &action);
        assert!(Arc::ptr_eq(&once, &twice));
    }

    #[test]
    fn test_jump_to_focused_route_with_same_params_is_noop() {
        let router = sequential_tab_router(RouterOptions::default());
        let state = three_tabs(&router);
        let state = router.state_for_action(
            &state,
            &TabAction::set_params(params(serde_json::json!({ "x": 1 }))),
        );
        let next = router.state_for_action(
            &state,
            &TabAction::jump_to("Home", Some(params(serde_json::json!({ "x": 1 })))),
        );
        assert!(Arc::ptr_eq(&state, &next));

        // focus still moves when the params already match
        let other = router.state_for_action(
            &state,
            &TabAction::jump_to("Feed", Some(Params::new())),
        );
        assert_eq!(other.index, 1);
    }

    #[test]
    fn test_out_of_range_index_never_panics() {
        let router = sequential_tab_router(RouterOptions {
            back_behavior: BackBehavior::Order,
            ..Default::default()
        });
        let valid = three_tabs(&router);
        let broken = Arc::new(TabState {
            index: 5,
            ..TabState::clone(&valid)
        });

        let focused = router.state_for_route_focus(&broken, "Feed-2");
        assert!(Arc::ptr_eq(&broken, &focused));
        let with_params = router.state_for_action(
            &broken,
            &TabAction::set_params(params(serde_json::json!({ "x": 1 }))),
        );
        assert!(Arc::ptr_eq(&broken, &with_params));
        let back = router.state_for_action(&broken, &TabAction::go_back());
        assert!(Arc::ptr_eq(&broken, &back));
        let jumped = router.state_for_action(&broken, &TabAction::jump_to("Feed", None));
        assert!(Arc::ptr_eq(&broken, &jumped));
    }

    #[test]
    fn test_route_focus() {
        let router = sequential_tab_router(RouterOptions::default());
        let state = three_tabs(&router);
        let next = router.state_for_route_focus(&state, "Feed-2");
        assert_eq!(next.index, 1);
        assert_eq!(next.route_key_history, vec!["Home-1"]);

        assert!(Arc::ptr_eq(&state, &router.state_for_route_focus(&state, "Home-1")));
        assert!(Arc::ptr_eq(&state, &router.state_for_route_focus(&state, "Nope-0")));
    }

    #[test]
    fn test_only_navigate_changes_focus() {
        let router = sequential_tab_router(RouterOptions::default());
        assert!(router.should_action_change_focus(&TabAction::navigate("Home", None)));
        assert!(!router.should_action_change_focus(&TabAction::jump_to("Home", None)));
        assert!(!router.should_action_change_focus(&TabAction::go_back()));
    }

    #[test]
    fn test_action_kinds_match_vocabulary() {
        let actions = [
            TabAction::jump_to("A", None),
            TabAction::navigate("A", None),
            TabAction::go_back(),
            TabAction::set_params(Params::new()),
        ];
        let kinds: Vec<&str> = actions.iter().map(|a| a.kind()).collect();
        assert_eq!(kinds, TabAction::ACTION_TYPES);
    }
}
