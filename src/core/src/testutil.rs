//! Helpers shared by unit and integration tests.
//!
//! The name tables are process-global and `cargo test` runs tests on
//! concurrent threads, so tests must not share object names unless they
//! mean to.

use std::sync::atomic::{AtomicU64, Ordering};

/// Produce an object name no other caller of this function will get.
pub fn unique_name(prefix: &str) -> String {
    static NEXT: AtomicU64 = AtomicU64::new(0);
    format!("{prefix}.{}", NEXT.fetch_add(1, Ordering::Relaxed))
}
