//! Spindle core
//!
//! Named synchronization objects and call-argument marshalling for an
//! embedding script host.
//!
//! # Architecture
//!
//! The crate is structured into the following modules:
//! - `sync`: named mutexes and counting semaphores, resolved by string
//!   through a process-global name table on every call
//! - `task`: owned snapshots of script call sites ([`task::CallArgs`]) for
//!   handing work to detached worker threads
//! - `testutil`: helpers shared by unit and integration tests
//!
//! The six script-facing operations are re-exported at the crate root.
//! Diagnostics go through the [`log`] facade; the crate never installs a
//! logger of its own.

#![warn(missing_docs)]

pub mod sync;
pub mod task;
pub mod testutil;

pub use spindle_common::error::SyncError;
pub use sync::ops::{
    mutex_acquire, mutex_create, mutex_release, semaphore_acquire, semaphore_create,
    semaphore_release,
};
