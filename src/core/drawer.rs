//! # Drawer Router
//!
//! Wraps another router and adds one flag, `is_drawer_open`, plus three
//! actions that move it. Everything else goes to the wrapped router.
//!
//! ```text
//! DrawerAction::OpenDrawer   ─┐
//! DrawerAction::CloseDrawer  ─┼─► handled here, touches is_drawer_open only
//! DrawerAction::ToggleDrawer ─┘
//! DrawerAction::Delegate(a)  ───► base.state_for_action(state.base, a)
//! ```
//!
//! Focusing a different route closes the drawer. That is the only place the
//! two concerns meet.

use log::{debug, trace};
use std::ops::Deref;
use std::sync::Arc;

use crate::core::keys::{KeyGenerator, UuidKeys};
use crate::core::route::{NavigationState, Params, Route, RouteConfig, StateParts};
use crate::core::router::{NavigationAction, Router, RouterError, RouterOptions, initial_parts};
use crate::core::tab::{TabAction, TabRouter};

/// State key prefix for drawer navigators.
pub const DRAWER_KIND: &str = "drawer";

/// The wrapped router's state plus the drawer flag.
///
/// Derefs to the base state, so `state.index` and `state.routes` read through.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawerState<S> {
    pub base: Arc<S>,
    pub is_drawer_open: bool,
}

impl<S> DrawerState<S> {
    fn with_drawer(&self, is_drawer_open: bool) -> Self {
        Self {
            base: Arc::clone(&self.base),
            is_drawer_open,
        }
    }
}

impl<S> Deref for DrawerState<S> {
    type Target = S;

    fn deref(&self) -> &S {
        &self.base
    }
}

impl<S: NavigationState> NavigationState for DrawerState<S> {
    fn from_parts(parts: StateParts) -> Self {
        Self {
            base: Arc::new(S::from_parts(parts)),
            is_drawer_open: false,
        }
    }

    fn key(&self) -> &str {
        self.base.key()
    }

    fn index(&self) -> usize {
        self.base.index()
    }

    fn route_names(&self) -> &[String] {
        self.base.route_names()
    }

    fn routes(&self) -> &[Route] {
        self.base.routes()
    }

    fn route_key_history(&self) -> &[String] {
        self.base.route_key_history()
    }
}

/// Drawer actions, with the wrapped router's vocabulary under `Delegate`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawerAction<A = TabAction> {
    OpenDrawer,
    CloseDrawer,
    ToggleDrawer,
    Delegate(A),
}

impl<A> DrawerAction<A> {
    /// Type literals owned by this layer. Must not overlap the base router's.
    pub const ACTION_TYPES: &'static [&'static str] =
        &["OPEN_DRAWER", "CLOSE_DRAWER", "TOGGLE_DRAWER"];

    pub fn open_drawer() -> Self {
        DrawerAction::OpenDrawer
    }

    pub fn close_drawer() -> Self {
        DrawerAction::CloseDrawer
    }

    pub fn toggle_drawer() -> Self {
        DrawerAction::ToggleDrawer
    }
}

// Tab creators, re-exported so callers have one vocabulary.
impl DrawerAction<TabAction> {
    pub fn jump_to(name: impl Into<String>, params: Option<Params>) -> Self {
        TabAction::jump_to(name, params).into()
    }

    pub fn navigate(name: impl Into<String>, params: Option<Params>) -> Self {
        TabAction::navigate(name, params).into()
    }

    pub fn go_back() -> Self {
        TabAction::go_back().into()
    }

    pub fn set_params(params: Params) -> Self {
        TabAction::set_params(params).into()
    }

    pub fn set_params_for(source: impl Into<String>, params: Params) -> Self {
        TabAction::set_params_for(source, params).into()
    }
}

impl From<TabAction> for DrawerAction<TabAction> {
    fn from(action: TabAction) -> Self {
        DrawerAction::Delegate(action)
    }
}

impl<A: NavigationAction> NavigationAction for DrawerAction<A> {
    fn kind(&self) -> &'static str {
        match self {
            DrawerAction::OpenDrawer => "OPEN_DRAWER",
            DrawerAction::CloseDrawer => "CLOSE_DRAWER",
            DrawerAction::ToggleDrawer => "TOGGLE_DRAWER",
            DrawerAction::Delegate(action) => action.kind(),
        }
    }
}

pub struct DrawerRouter<R = TabRouter> {
    base: R,
    options: RouterOptions,
    keys: Arc<dyn KeyGenerator>,
}

impl DrawerRouter<TabRouter> {
    /// A drawer over a tab router, both configured with `options` and
    /// generating UUID keys.
    pub fn from_options(options: RouterOptions) -> Self {
        let keys: Arc<dyn KeyGenerator> = Arc::new(UuidKeys);
        Self::over_tabs(TabRouter::new(options, Arc::clone(&keys)), keys)
    }

    /// A drawer over `base`, taking its options from the tab router so both
    /// layers resolve the same initial route.
    pub fn over_tabs(base: TabRouter, keys: Arc<dyn KeyGenerator>) -> Self {
        let options = base.options().clone();
        Self::new(base, options, keys)
    }
}

impl<R: Router> DrawerRouter<R> {
    /// `options` must be the ones `base` was built with: the drawer resolves
    /// the initial index itself, while the base uses its own copy for
    /// `BackBehavior::InitialRoute`.
    pub fn new(base: R, options: RouterOptions, keys: Arc<dyn KeyGenerator>) -> Self {
        Self {
            base,
            options,
            keys,
        }
    }

    pub fn base(&self) -> &R {
        &self.base
    }

    /// Re-wraps a base result. Same base reference means same drawer reference.
    fn lift(state: &Arc<DrawerState<R::State>>, base: Arc<R::State>) -> Arc<DrawerState<R::State>> {
        if Arc::ptr_eq(&state.base, &base) {
            return Arc::clone(state);
        }
        Arc::new(DrawerState {
            base,
            is_drawer_open: state.is_drawer_open,
        })
    }
}

impl<R: Router> Router for DrawerRouter<R> {
    type State = DrawerState<R::State>;
    type Action = DrawerAction<R::Action>;

    fn initial_state(&self, config: &RouteConfig) -> Result<Arc<Self::State>, RouterError> {
        let parts = initial_parts(DRAWER_KIND, &self.options, config, self.keys.as_ref())?;
        Ok(Arc::new(DrawerState::from_parts(parts)))
    }

    fn state_for_route_focus(&self, state: &Arc<Self::State>, key: &str) -> Arc<Self::State> {
        match state.route_index(key) {
            Some(index) if index != state.index() => {}
            _ => {
                trace!("Focus on {} is a no-op for {}", key, state.key());
                return Arc::clone(state);
            }
        }

        let base = self.base.state_for_route_focus(&state.base, key);
        if Arc::ptr_eq(&base, &state.base) {
            trace!("Base kept focus for {} in {}", key, state.key());
            return Arc::clone(state);
        }
        if state.is_drawer_open {
            debug!("Focus moved to {}, closing drawer of {}", key, state.key());
        }
        Arc::new(DrawerState {
            base,
            is_drawer_open: false,
        })
    }

    fn state_for_action(&self, state: &Arc<Self::State>, action: &Self::Action) -> Arc<Self::State> {
        match action {
            DrawerAction::OpenDrawer => {
                if state.is_drawer_open {
                    return Arc::clone(state);
                }
                debug!("Drawer of {} opened", state.key());
                Arc::new(state.with_drawer(true))
            }
            DrawerAction::CloseDrawer => {
                if !state.is_drawer_open {
                    return Arc::clone(state);
                }
                debug!("Drawer of {} closed", state.key());
                Arc::new(state.with_drawer(false))
            }
            DrawerAction::ToggleDrawer => {
                debug!(
                    "Drawer of {} toggled to {}",
                    state.key(),
                    if state.is_drawer_open { "closed" } else { "open" }
                );
                Arc::new(state.with_drawer(!state.is_drawer_open))
            }
            DrawerAction::Delegate(action) => {
                Self::lift(state, self.base.state_for_action(&state.base, action))
            }
        }
    }

    fn should_action_change_focus(&self, action: &Self::Action) -> bool {
        match action {
            DrawerAction::Delegate(action) => self.base.should_action_change_focus(action),
            _ => false,
        }
    }
}
