//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use crate::core::keys::{KeyGenerator, SequentialKeys};
use crate::core::route::Params;
use crate::core::router::RouterOptions;
use crate::core::{DrawerRouter, TabRouter};

/// Turns a `json!({...})` object into `Params`. Non-objects give empty params.
pub fn params(value: serde_json::Value) -> Params {
    value.as_object().cloned().unwrap_or_default()
}

/// A tab router with predictable keys (`Home-1`, `Feed-2`, ...).
pub fn sequential_tab_router(options: RouterOptions) -> TabRouter {
    TabRouter::new(options, Arc::new(SequentialKeys::new()))
}

/// A drawer over a tab router, both drawing from one sequential generator.
pub fn sequential_drawer_router(options: RouterOptions) -> DrawerRouter {
    let keys: Arc<dyn KeyGenerator> = Arc::new(SequentialKeys::new());
    DrawerRouter::over_tabs(TabRouter::new(options, Arc::clone(&keys)), keys)
}
