//! # Key Generation
//!
//! Routers never call a random source directly. They hold an
//! `Arc<dyn KeyGenerator>` so tests can swap in a deterministic one.

use std::sync::atomic::{AtomicU64, Ordering};

/// Produces identifiers for state and route keys.
pub trait KeyGenerator: Send + Sync {
    /// Returns a fresh identifier. Two calls must never return the same value.
    fn generate(&self) -> String;
}

/// UUID v4 identifiers in simple (hyphen-free) form. The default.
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidKeys;

impl KeyGenerator for UuidKeys {
    fn generate(&self) -> String {
        uuid::Uuid::new_v4().simple().to_string()
    }
}

/// Counter-based identifiers: `1`, `2`, `3`, ...
#[derive(Debug, Default)]
pub struct SequentialKeys {
    next: AtomicU64,
}

impl SequentialKeys {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyGenerator for SequentialKeys {
    fn generate(&self) -> String {
        (self.next.fetch_add(1, Ordering::Relaxed) + 1).to_string()
    }
}

/// `"<prefix>-<id>"`, used for both state keys (prefix = router kind) and
/// route keys (prefix = route name).
pub fn prefixed_key(keys: &dyn KeyGenerator, prefix: &str) -> String {
    format!("{prefix}-{}", keys.generate())
}
