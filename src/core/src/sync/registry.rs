//! Global name table for synchronization objects.
//!
//! This module provides the process-wide tables through which script
//! callers reach mutexes and semaphores by name. Each kind has a table of
//! its own; an entry lives for the rest of the host session once created.
//! The table locks are held only for lookup and insert, never across a
//! blocking wait.

use std::collections::BTreeMap;
use std::sync::Arc;

use spin::{Mutex, Once};

use spindle_common::error::SyncError;
use spindle_common::rights::HandleRights;

use super::mutex::{MutexHandle, NamedMutex};
use super::semaphore::{NamedSemaphore, SemaphoreHandle};

/// Global table of named mutexes.
static MUTEXES: Once<Mutex<BTreeMap<String, Arc<NamedMutex>>>> = Once::new();

/// Global table of named semaphores.
static SEMAPHORES: Once<Mutex<BTreeMap<String, Arc<NamedSemaphore>>>> = Once::new();

fn mutex_table() -> &'static Mutex<BTreeMap<String, Arc<NamedMutex>>> {
    MUTEXES.call_once(|| Mutex::new(BTreeMap::new()))
}

fn semaphore_table() -> &'static Mutex<BTreeMap<String, Arc<NamedSemaphore>>> {
    SEMAPHORES.call_once(|| Mutex::new(BTreeMap::new()))
}

/// Register a new, unowned mutex under `name`.
///
/// Returns `false` when the name was already registered; the existing
/// object is left untouched.
pub fn create_mutex(name: &str) -> bool {
    let mut table = mutex_table().lock();
    if table.contains_key(name) {
        log::trace!("mutex '{name}' already exists");
        return false;
    }
    table.insert(name.to_owned(), Arc::new(NamedMutex::new()));
    log::debug!("mutex '{name}' created");
    true
}

/// Open a transient handle to the mutex registered under `name`.
pub fn open_mutex(name: &str, rights: HandleRights) -> Result<MutexHandle, SyncError> {
    let object = mutex_table()
        .lock()
        .get(name)
        .cloned()
        .ok_or(SyncError::NotFound)?;
    Ok(MutexHandle::new(name, object, rights))
}

/// Register a new semaphore under `name` with `initial` permits out of
/// `max`.
///
/// Returns `Ok(false)` when the name was already registered; the existing
/// object — including its current count and maximum — is left untouched
/// and the new parameters are ignored. `initial` above `max` is rejected
/// with [`SyncError::CreateFailed`].
pub fn create_semaphore(name: &str, initial: u32, max: u32) -> Result<bool, SyncError> {
    let mut table = semaphore_table().lock();
    if table.contains_key(name) {
        log::trace!("semaphore '{name}' already exists, keeping its state");
        return Ok(false);
    }
    let semaphore = NamedSemaphore::new(initial, max)?;
    table.insert(name.to_owned(), Arc::new(semaphore));
    log::debug!("semaphore '{name}' created ({initial}/{max})");
    Ok(true)
}

/// Open a transient handle to the semaphore registered under `name`.
pub fn open_semaphore(name: &str, rights: HandleRights) -> Result<SemaphoreHandle, SyncError> {
    let object = semaphore_table()
        .lock()
        .get(name)
        .cloned()
        .ok_or(SyncError::NotFound)?;
    Ok(SemaphoreHandle::new(name, object, rights))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::unique_name;

    #[test]
    fn open_requires_create() {
        let name = unique_name("registry.mutex");
        assert_eq!(
            open_mutex(&name, HandleRights::WAIT).err(),
            Some(SyncError::NotFound)
        );
        assert!(create_mutex(&name));
        assert!(open_mutex(&name, HandleRights::WAIT).is_ok());
    }

    #[test]
    fn create_existing_mutex_is_a_noop() {
        let name = unique_name("registry.mutex");
        assert!(create_mutex(&name));
        assert!(!create_mutex(&name));
    }

    #[test]
    fn create_existing_semaphore_keeps_its_state() {
        let name = unique_name("registry.sem");
        assert_eq!(create_semaphore(&name, 2, 5), Ok(true));
        let handle = open_semaphore(&name, HandleRights::WAIT).unwrap();
        assert_eq!(handle.try_wait(), Ok(true));

        // Re-creation under the same name ignores the new parameters.
        assert_eq!(create_semaphore(&name, 9, 9), Ok(false));
        assert_eq!(handle.available(), 1);
    }

    #[test]
    fn invalid_capacity_is_rejected() {
        let name = unique_name("registry.sem");
        assert_eq!(
            create_semaphore(&name, 3, 2),
            Err(SyncError::CreateFailed)
        );
        assert_eq!(
            open_semaphore(&name, HandleRights::WAIT).err(),
            Some(SyncError::NotFound)
        );
    }

    #[test]
    fn tables_are_keyed_per_kind() {
        let name = unique_name("registry.shared");
        assert!(create_mutex(&name));
        assert_eq!(
            open_semaphore(&name, HandleRights::WAIT).err(),
            Some(SyncError::NotFound)
        );
    }

    #[test]
    fn handles_carry_their_name_and_rights() {
        let name = unique_name("registry.mutex");
        create_mutex(&name);
        let handle = open_mutex(&name, HandleRights::all()).unwrap();
        assert_eq!(handle.name(), name);
        assert_eq!(handle.rights(), HandleRights::all());

        let name = unique_name("registry.sem");
        create_semaphore(&name, 0, 1).unwrap();
        let handle = open_semaphore(&name, HandleRights::MODIFY).unwrap();
        assert_eq!(handle.name(), name);
        assert_eq!(handle.rights(), HandleRights::MODIFY);
    }
}
