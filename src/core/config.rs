//! # Navigator Configuration
//!
//! Describes a navigator in TOML: its routes, their initial params, and the
//! router options. Override hierarchy: defaults → config file → env vars →
//! CLI flags.
//!
//! ```toml
//! [navigator]
//! initial_route_name = "Home"
//! back_behavior = "history"
//!
//! [[routes]]
//! name = "Home"
//! params = { greeting = "hi" }
//! ```

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::fs;
use std::path::Path;

use crate::core::route::{Params, RouteConfig};
use crate::core::router::{BackBehavior, RouterOptions};

/// Env var overriding the configured initial route.
pub const INITIAL_ROUTE_ENV: &str = "ROUTERS_INITIAL_ROUTE";

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavigatorConfig {
    #[serde(default)]
    pub navigator: NavigatorSection,
    #[serde(default)]
    pub routes: Vec<RouteEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavigatorSection {
    pub initial_route_name: Option<String>,
    pub back_behavior: Option<BackBehavior>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteEntry {
    pub name: String,
    pub params: Option<Params>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub options: RouterOptions,
    pub routes: RouteConfig,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
    /// Route names must be unique within a navigator.
    DuplicateRoute(String),
    EmptyRoutes,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
            ConfigError::DuplicateRoute(name) => write!(f, "route '{name}' is declared twice"),
            ConfigError::EmptyRoutes => write!(f, "config declares no routes"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

pub fn load_config(path: &Path) -> Result<NavigatorConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config = parse_config(&contents)?;
    info!("Loaded navigator config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

pub fn parse_config(contents: &str) -> Result<NavigatorConfig, ConfigError> {
    toml::from_str(contents).map_err(ConfigError::Parse)
}

// ============================================================================
// Resolution
// ============================================================================

/// Collapses CLI → env → config file → default into router inputs.
///
/// The initial route is not checked against the route list here; building
/// the initial state reports that.
pub fn resolve(
    config: &NavigatorConfig,
    cli_initial_route: Option<&str>,
) -> Result<ResolvedConfig, ConfigError> {
    if config.routes.is_empty() {
        return Err(ConfigError::EmptyRoutes);
    }

    let mut seen = HashSet::new();
    let mut routes = RouteConfig::default();
    for entry in &config.routes {
        if !seen.insert(entry.name.as_str()) {
            return Err(ConfigError::DuplicateRoute(entry.name.clone()));
        }
        routes.route_names.push(entry.name.clone());
        if let Some(ref params) = entry.params {
            routes.route_params.insert(entry.name.clone(), params.clone());
        }
    }

    let initial_route_name = cli_initial_route
        .map(|s| s.to_string())
        .or_else(|| std::env::var(INITIAL_ROUTE_ENV).ok())
        .or_else(|| config.navigator.initial_route_name.clone());

    Ok(ResolvedConfig {
        options: RouterOptions {
            initial_route_name,
            back_behavior: config.navigator.back_behavior.unwrap_or_default(),
        },
        routes,
    })
}
