//! # Core Routing Logic
//!
//! Pure navigation reducers. Nothing here renders, and nothing here keeps
//! state between calls: the caller owns the current `Arc<State>`.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!    DrawerAction ──►│      DrawerRouter       │── OPEN/CLOSE/TOGGLE_DRAWER
//!                    │  (is_drawer_open flag)  │
//!                    └───────────┬─────────────┘
//!                                │ Delegate(TabAction)
//!                                ▼
//!                    ┌─────────────────────────┐
//!                    │        TabRouter        │── JUMP_TO, NAVIGATE,
//!                    │  (index, routes, hist.) │   GO_BACK, SET_PARAMS
//!                    └─────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`route`]: `Route`, `RouteConfig`, and the `NavigationState` trait
//! - [`router`]: the `Router` contract, options, and initial-state building
//! - [`keys`]: injectable key generation
//! - [`tab`]: the base tab router
//! - [`drawer`]: the drawer router layered over any `Router`
//! - [`config`]: TOML navigator configuration

pub mod config;
pub mod drawer;
pub mod keys;
pub mod route;
pub mod router;
pub mod tab;

pub use drawer::{DrawerAction, DrawerRouter, DrawerState};
pub use keys::{KeyGenerator, SequentialKeys, UuidKeys};
pub use route::{NavigationState, Params, Route, RouteConfig};
pub use router::{BackBehavior, NavigationAction, Router, RouterError, RouterOptions};
pub use tab::{TabAction, TabRouter, TabState};
