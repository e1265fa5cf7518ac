//! Named synchronization objects.
//!
//! Script callers resolve objects purely by name: each operation opens a
//! transient handle from the global [`registry`], performs its action, and
//! drops the handle before returning. Ownership and counts live in the
//! table objects, never in a handle, so acquire and release can be invoked
//! from call sites with no memory of a prior handle.
//!
//! # Primitives
//!
//! - [`NamedMutex`]: exclusive ownership per thread, recursive for the
//!   owner, blocking acquisition
//! - [`NamedSemaphore`]: counting semaphore with a fixed maximum
//!
//! The script-facing entry points live in [`ops`].

mod mutex;
pub mod ops;
pub mod registry;
mod semaphore;

pub use mutex::{MutexHandle, NamedMutex};
pub use semaphore::{NamedSemaphore, SemaphoreHandle};
