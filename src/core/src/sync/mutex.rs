//! Named mutex with per-thread ownership and blocking acquisition.

use std::sync::{Arc, Condvar, Mutex};
use std::thread::{self, ThreadId};

use spindle_common::error::SyncError;
use spindle_common::rights::HandleRights;

/// Ownership record guarded by the state lock.
#[derive(Debug, Default)]
struct MutexState {
    /// Thread currently holding the mutex, if any.
    owner: Option<ThreadId>,
    /// Acquisitions by the owner not yet matched by a release.
    recursion: u32,
}

/// A mutex slot in the global name table.
///
/// Ownership is tracked per thread and lives here, not in any handle: a
/// thread that acquired through one transient handle releases through
/// another, possibly much later. The owning thread may acquire again
/// without blocking; each acquisition must be matched by a release before
/// the mutex becomes available to other threads.
#[derive(Debug, Default)]
pub struct NamedMutex {
    state: Mutex<MutexState>,
    unlocked: Condvar,
}

impl NamedMutex {
    /// Create a new, unowned mutex.
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Block until the calling thread owns the mutex.
    pub(crate) fn acquire(&self) -> Result<(), SyncError> {
        let me = thread::current().id();
        let mut state = self.state.lock().map_err(|_| SyncError::WaitFailed)?;
        loop {
            match state.owner {
                None => {
                    state.owner = Some(me);
                    state.recursion = 1;
                    return Ok(());
                }
                Some(owner) if owner == me => {
                    state.recursion += 1;
                    return Ok(());
                }
                Some(_) => {
                    state = self.unlocked.wait(state).map_err(|_| SyncError::WaitFailed)?;
                }
            }
        }
    }

    /// Acquire without blocking. `Ok(false)` means another thread owns the
    /// mutex.
    pub(crate) fn try_acquire(&self) -> Result<bool, SyncError> {
        let me = thread::current().id();
        let mut state = self.state.lock().map_err(|_| SyncError::WaitFailed)?;
        match state.owner {
            None => {
                state.owner = Some(me);
                state.recursion = 1;
                Ok(true)
            }
            Some(owner) if owner == me => {
                state.recursion += 1;
                Ok(true)
            }
            Some(_) => Ok(false),
        }
    }

    /// Release one level of ownership held by the calling thread.
    pub(crate) fn release(&self) -> Result<(), SyncError> {
        let me = thread::current().id();
        let mut state = self.state.lock().map_err(|_| SyncError::WaitFailed)?;
        if state.owner != Some(me) {
            return Err(SyncError::NotOwner);
        }
        // owner == me implies recursion >= 1
        state.recursion -= 1;
        if state.recursion == 0 {
            state.owner = None;
            drop(state);
            self.unlocked.notify_one();
        }
        Ok(())
    }
}

/// Transient handle to a [`NamedMutex`].
///
/// Opened from the registry at the start of an operation and dropped before
/// the operation returns, on success and failure alike. Mutex ownership
/// outlives the handle: dropping it is the close, never a release.
pub struct MutexHandle {
    name: String,
    object: Arc<NamedMutex>,
    rights: HandleRights,
}

impl MutexHandle {
    pub(crate) fn new(name: &str, object: Arc<NamedMutex>, rights: HandleRights) -> Self {
        log::trace!("mutex handle '{name}' opened ({rights:?})");
        Self {
            name: name.to_owned(),
            object,
            rights,
        }
    }

    /// Name the handle was opened under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rights the handle was opened with.
    pub fn rights(&self) -> HandleRights {
        self.rights
    }

    /// Block until the calling thread owns the mutex.
    ///
    /// Requires [`HandleRights::WAIT`].
    pub fn wait(&self) -> Result<(), SyncError> {
        if !self.rights.contains(HandleRights::WAIT) {
            return Err(SyncError::AccessDenied);
        }
        self.object.acquire()
    }

    /// Acquire without blocking; `Ok(false)` when another thread owns the
    /// mutex.
    ///
    /// Requires [`HandleRights::WAIT`].
    pub fn try_wait(&self) -> Result<bool, SyncError> {
        if !self.rights.contains(HandleRights::WAIT) {
            return Err(SyncError::AccessDenied);
        }
        self.object.try_acquire()
    }

    /// Release one level of ownership held by the calling thread.
    ///
    /// Requires [`HandleRights::MODIFY`].
    pub fn release(&self) -> Result<(), SyncError> {
        if !self.rights.contains(HandleRights::MODIFY) {
            return Err(SyncError::AccessDenied);
        }
        self.object.release()
    }
}

impl Drop for MutexHandle {
    fn drop(&mut self) {
        log::trace!("mutex handle '{}' closed", self.name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn acquire_release_uncontended() {
        let mutex = NamedMutex::new();
        mutex.acquire().unwrap();
        mutex.release().unwrap();
    }

    #[test]
    fn owner_reacquires_without_blocking() {
        let mutex = Arc::new(NamedMutex::new());
        mutex.acquire().unwrap();
        mutex.acquire().unwrap();
        mutex.release().unwrap();

        // One release of two is not enough to give the mutex up.
        let shared = Arc::clone(&mutex);
        thread::spawn(move || assert_eq!(shared.try_acquire(), Ok(false)))
            .join()
            .unwrap();

        mutex.release().unwrap();
        let shared = Arc::clone(&mutex);
        thread::spawn(move || assert_eq!(shared.try_acquire(), Ok(true)))
            .join()
            .unwrap();
    }

    #[test]
    fn release_without_ownership_fails() {
        let mutex = NamedMutex::new();
        assert_eq!(mutex.release(), Err(SyncError::NotOwner));
    }

    #[test]
    fn release_from_other_thread_fails() {
        let mutex = Arc::new(NamedMutex::new());
        mutex.acquire().unwrap();

        let shared = Arc::clone(&mutex);
        thread::spawn(move || {
            assert_eq!(shared.release(), Err(SyncError::NotOwner));
            assert_eq!(shared.try_acquire(), Ok(false));
        })
        .join()
        .unwrap();

        mutex.release().unwrap();
    }

    #[test]
    fn handle_rights_are_enforced() {
        let object = Arc::new(NamedMutex::new());

        let wait_only = MutexHandle::new("m", Arc::clone(&object), HandleRights::WAIT);
        wait_only.wait().unwrap();
        assert_eq!(wait_only.release(), Err(SyncError::AccessDenied));

        let modify_only = MutexHandle::new("m", object, HandleRights::MODIFY);
        assert_eq!(modify_only.wait(), Err(SyncError::AccessDenied));
        assert_eq!(modify_only.try_wait(), Err(SyncError::AccessDenied));
        modify_only.release().unwrap();
    }
}
