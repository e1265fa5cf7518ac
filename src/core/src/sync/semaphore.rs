//! Named counting semaphore with a fixed maximum.

use std::sync::{Arc, Condvar, Mutex};

use spindle_common::error::SyncError;
use spindle_common::rights::HandleRights;

/// Count state guarded by the state lock.
#[derive(Debug)]
struct SemaphoreState {
    /// Permits currently available.
    count: u32,
    /// Upper bound the count may never exceed.
    max: u32,
}

/// A counting semaphore slot in the global name table.
///
/// The count lives here and is the single source of truth; handles carry no
/// state of their own. Acquiring consumes one permit, releasing produces
/// exactly one, and the count is bounded by the maximum fixed at creation.
#[derive(Debug)]
pub struct NamedSemaphore {
    state: Mutex<SemaphoreState>,
    available: Condvar,
}

impl NamedSemaphore {
    /// Create a semaphore with `initial` permits out of `max`.
    pub(crate) fn new(initial: u32, max: u32) -> Result<Self, SyncError> {
        if initial > max {
            return Err(SyncError::CreateFailed);
        }
        Ok(Self {
            state: Mutex::new(SemaphoreState {
                count: initial,
                max,
            }),
            available: Condvar::new(),
        })
    }

    /// Block until a permit can be taken.
    pub(crate) fn acquire(&self) -> Result<(), SyncError> {
        let mut state = self.state.lock().map_err(|_| SyncError::WaitFailed)?;
        while state.count == 0 {
            state = self
                .available
                .wait(state)
                .map_err(|_| SyncError::WaitFailed)?;
        }
        state.count -= 1;
        Ok(())
    }

    /// Take a permit without blocking. `Ok(false)` means none was
    /// available.
    pub(crate) fn try_acquire(&self) -> Result<bool, SyncError> {
        let mut state = self.state.lock().map_err(|_| SyncError::WaitFailed)?;
        if state.count == 0 {
            return Ok(false);
        }
        state.count -= 1;
        Ok(true)
    }

    /// Return one permit.
    ///
    /// Fails with [`SyncError::AtMaximum`] when the count is already at its
    /// maximum; the count is left untouched in that case.
    pub(crate) fn release(&self) -> Result<(), SyncError> {
        let mut state = self.state.lock().map_err(|_| SyncError::WaitFailed)?;
        if state.count == state.max {
            return Err(SyncError::AtMaximum);
        }
        state.count += 1;
        drop(state);
        self.available.notify_one();
        Ok(())
    }

    /// Permits currently available.
    ///
    /// A poisoned state lock reads as zero; waiters surface the poisoning
    /// through `acquire` instead.
    pub(crate) fn available(&self) -> u32 {
        self.state.lock().map(|state| state.count).unwrap_or(0)
    }
}

/// Transient handle to a [`NamedSemaphore`].
///
/// Opened from the registry at the start of an operation and dropped before
/// the operation returns, on success and failure alike. The count lives in
/// the table object; dropping the handle never returns a permit.
pub struct SemaphoreHandle {
    name: String,
    object: Arc<NamedSemaphore>,
    rights: HandleRights,
}

impl SemaphoreHandle {
    pub(crate) fn new(name: &str, object: Arc<NamedSemaphore>, rights: HandleRights) -> Self {
        log::trace!("semaphore handle '{name}' opened ({rights:?})");
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

    /// Block until a permit can be taken.
    ///
    /// Requires [`HandleRights::WAIT`].
    pub fn wait(&self) -> Result<(), SyncError> {
        if !self.rights.contains(HandleRights::WAIT) {
            return Err(SyncError::AccessDenied);
        }
        self.object.acquire()
    }

    /// Take a permit without blocking; `Ok(false)` when none was available.
    ///
    /// Requires [`HandleRights::WAIT`].
    pub fn try_wait(&self) -> Result<bool, SyncError> {
        if !self.rights.contains(HandleRights::WAIT) {
            return Err(SyncError::AccessDenied);
        }
        self.object.try_acquire()
    }

    /// Return exactly one permit.
    ///
    /// Requires [`HandleRights::MODIFY`].
    pub fn release(&self) -> Result<(), SyncError> {
        if !self.rights.contains(HandleRights::MODIFY) {
            return Err(SyncError::AccessDenied);
        }
        self.object.release()
    }

    /// Permits currently available.
    pub fn available(&self) -> u32 {
        self.object.available()
    }
}

impl Drop for SemaphoreHandle {
    fn drop(&mut self) {
        log::trace!("semaphore handle '{}' closed", self.name);
    }
}
