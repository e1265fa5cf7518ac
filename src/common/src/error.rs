//! System-wide error types for spindle.

use std::fmt;

/// Failures surfaced by the named synchronization layer.
///
/// Every condition here is per-call and recoverable; none is fatal to the
/// host process. Transient handles are closed on every exit path regardless
/// of which variant an operation returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SyncError {
    /// No object has been created under the requested name.
    NotFound,
    /// The handle was opened without the right required for the attempted
    /// action.
    AccessDenied,
    /// Creation parameters were rejected: a semaphore's initial count was
    /// above its maximum.
    CreateFailed,
    /// The object's state was corrupted by a thread that panicked while
    /// updating it, so the wait cannot be carried out.
    WaitFailed,
    /// A mutex release was attempted by a thread that does not own the
    /// mutex.
    NotOwner,
    /// A semaphore release would have pushed the count past its maximum.
    AtMaximum,
}

impl fmt::Display for SyncError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyncError::NotFound => write!(f, "no synchronization object under that name"),
            SyncError::AccessDenied => write!(f, "handle lacks the required rights"),
            SyncError::CreateFailed => write!(f, "synchronization object creation failed"),
            SyncError::WaitFailed => write!(f, "synchronization object state is corrupted"),
            SyncError::NotOwner => write!(f, "mutex is not owned by the calling thread"),
            SyncError::AtMaximum => write!(f, "semaphore count is already at its maximum"),
        }
    }
}

impl std::error::Error for SyncError {}
