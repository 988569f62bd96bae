//! Drawer and tab navigation routers.

pub mod core;
pub mod shell;

#[cfg(test)]
pub mod test_support;
